// src/db/user_repo.rs

use chrono::{DateTime, Utc};
use sqlx::PgPool;
use uuid::Uuid;

use crate::{
    common::error::AppError,
    models::auth::{LogEntry, Papel, Sessao, Usuario},
};

// O repositório de usuários, sessões e auditoria
#[derive(Clone)]
pub struct UserRepository {
    pool: PgPool,
}

impl UserRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn buscar_por_username(&self, username: &str) -> Result<Option<Usuario>, AppError> {
        let usuario = sqlx::query_as::<_, Usuario>("SELECT * FROM usuarios WHERE username = $1")
            .bind(username)
            .fetch_optional(&self.pool)
            .await?;

        Ok(usuario)
    }

    pub async fn buscar_por_id(&self, id: Uuid) -> Result<Option<Usuario>, AppError> {
        let usuario = sqlx::query_as::<_, Usuario>("SELECT * FROM usuarios WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(usuario)
    }

    pub async fn listar(&self) -> Result<Vec<Usuario>, AppError> {
        let usuarios = sqlx::query_as::<_, Usuario>("SELECT * FROM usuarios ORDER BY username")
            .fetch_all(&self.pool)
            .await?;

        Ok(usuarios)
    }

    pub async fn inserir(
        &self,
        username: &str,
        nome: Option<&str>,
        password_hash: &str,
        role: Papel,
    ) -> Result<Usuario, AppError> {
        let usuario = sqlx::query_as::<_, Usuario>(
            r#"
            INSERT INTO usuarios (username, nome, password_hash, role)
            VALUES ($1, $2, $3, $4)
            RETURNING *
            "#,
        )
        .bind(username)
        .bind(nome)
        .bind(password_hash)
        .bind(role)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| {
            // Converte violação de chave única em um erro mais amigável
            if let Some(db_err) = e.as_database_error() {
                if db_err.is_unique_violation() {
                    return AppError::DuplicateUsername;
                }
            }
            e.into()
        })?;

        Ok(usuario)
    }

    pub async fn atualizar(
        &self,
        id: Uuid,
        nome: Option<&str>,
        role: Papel,
        ativo: bool,
        password_hash: Option<&str>,
    ) -> Result<Option<Usuario>, AppError> {
        let usuario = sqlx::query_as::<_, Usuario>(
            r#"
            UPDATE usuarios
            SET nome = $2, role = $3, ativo = $4,
                password_hash = COALESCE($5, password_hash),
                updated_at = now()
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(nome)
        .bind(role)
        .bind(ativo)
        .bind(password_hash)
        .fetch_optional(&self.pool)
        .await?;

        Ok(usuario)
    }

    pub async fn atualizar_senha(&self, id: Uuid, password_hash: &str) -> Result<(), AppError> {
        sqlx::query("UPDATE usuarios SET password_hash = $2, updated_at = now() WHERE id = $1")
            .bind(id)
            .bind(password_hash)
            .execute(&self.pool)
            .await?;

        Ok(())
    }

    pub async fn excluir(&self, id: Uuid) -> Result<u64, AppError> {
        let resultado = sqlx::query("DELETE FROM usuarios WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(resultado.rows_affected())
    }

    // --- Sessões ---

    pub async fn criar_sessao(
        &self,
        id: Uuid,
        usuario_id: Uuid,
        expira_em: DateTime<Utc>,
        ip: Option<&str>,
        user_agent: Option<&str>,
    ) -> Result<(), AppError> {
        sqlx::query(
            r#"
            INSERT INTO sessoes (id, usuario_id, expira_em, ip, user_agent)
            VALUES ($1, $2, $3, $4, $5)
            "#,
        )
        .bind(id)
        .bind(usuario_id)
        .bind(expira_em)
        .bind(ip)
        .bind(user_agent)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    pub async fn buscar_sessao(&self, id: Uuid) -> Result<Option<Sessao>, AppError> {
        let sessao = sqlx::query_as::<_, Sessao>(
            "SELECT id, usuario_id, expira_em FROM sessoes WHERE id = $1",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(sessao)
    }

    pub async fn excluir_sessao(&self, id: Uuid) -> Result<(), AppError> {
        sqlx::query("DELETE FROM sessoes WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(())
    }

    // --- Auditoria ---

    pub async fn registrar_log(
        &self,
        usuario_id: Option<Uuid>,
        acao: &str,
        entidade: &str,
        entidade_id: Option<&str>,
        descricao: Option<&str>,
    ) -> Result<(), AppError> {
        sqlx::query(
            r#"
            INSERT INTO logs (usuario_id, acao, entidade, entidade_id, descricao)
            VALUES ($1, $2, $3, $4, $5)
            "#,
        )
        .bind(usuario_id)
        .bind(acao)
        .bind(entidade)
        .bind(entidade_id)
        .bind(descricao)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    pub async fn listar_logs(&self, limit: i64, offset: i64) -> Result<(Vec<LogEntry>, i64), AppError> {
        let logs = sqlx::query_as::<_, LogEntry>(
            "SELECT * FROM logs ORDER BY created_at DESC LIMIT $1 OFFSET $2",
        )
        .bind(limit)
        .bind(offset)
        .fetch_all(&self.pool)
        .await?;

        let total: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM logs")
            .fetch_one(&self.pool)
            .await?;

        Ok((logs, total))
    }
}
