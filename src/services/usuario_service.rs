// src/services/usuario_service.rs

use uuid::Uuid;

use crate::{
    common::error::AppError,
    db::UserRepository,
    models::auth::{CreateUsuarioPayload, LogEntry, UpdateUsuarioPayload, Usuario},
    services::auth_service::hash_senha,
};

// Gestão de usuários (somente admin) e consulta de auditoria
#[derive(Clone)]
pub struct UsuarioService {
    user_repo: UserRepository,
}

impl UsuarioService {
    pub fn new(user_repo: UserRepository) -> Self {
        Self { user_repo }
    }

    pub async fn listar(&self) -> Result<Vec<Usuario>, AppError> {
        self.user_repo.listar().await
    }

    pub async fn buscar(&self, id: Uuid) -> Result<Usuario, AppError> {
        self.user_repo
            .buscar_por_id(id)
            .await?
            .ok_or(AppError::NotFound("Usuário"))
    }

    pub async fn criar(
        &self,
        autor_id: Uuid,
        payload: &CreateUsuarioPayload,
    ) -> Result<Usuario, AppError> {
        let password_hash = hash_senha(&payload.password).await?;

        let usuario = self
            .user_repo
            .inserir(
                &payload.username,
                payload.nome.as_deref(),
                &password_hash,
                payload.role,
            )
            .await?;

        self.user_repo
            .registrar_log(
                Some(autor_id),
                "INSERIR",
                "usuarios",
                Some(&usuario.id.to_string()),
                Some(&usuario.username),
            )
            .await?;

        Ok(usuario)
    }

    pub async fn atualizar(
        &self,
        autor_id: Uuid,
        id: Uuid,
        payload: &UpdateUsuarioPayload,
    ) -> Result<Usuario, AppError> {
        let password_hash = match payload.password.as_deref() {
            Some(senha) => Some(hash_senha(senha).await?),
            None => None,
        };

        let usuario = self
            .user_repo
            .atualizar(
                id,
                payload.nome.as_deref(),
                payload.role,
                payload.ativo,
                password_hash.as_deref(),
            )
            .await?
            .ok_or(AppError::NotFound("Usuário"))?;

        self.user_repo
            .registrar_log(
                Some(autor_id),
                "ATUALIZAR",
                "usuarios",
                Some(&id.to_string()),
                None,
            )
            .await?;

        Ok(usuario)
    }

    pub async fn excluir(&self, autor_id: Uuid, id: Uuid) -> Result<(), AppError> {
        // O próprio admin não se exclui
        if autor_id == id {
            return Err(AppError::HasDependencies("o usuário da sessão atual"));
        }

        let removidos = self.user_repo.excluir(id).await?;
        if removidos == 0 {
            return Err(AppError::NotFound("Usuário"));
        }

        self.user_repo
            .registrar_log(
                Some(autor_id),
                "EXCLUIR",
                "usuarios",
                Some(&id.to_string()),
                None,
            )
            .await?;

        Ok(())
    }

    pub async fn listar_logs(
        &self,
        limit: i64,
        offset: i64,
    ) -> Result<(Vec<LogEntry>, i64), AppError> {
        self.user_repo.listar_logs(limit, offset).await
    }
}
