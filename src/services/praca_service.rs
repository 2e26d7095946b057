// src/services/praca_service.rs

use sqlx::PgPool;
use uuid::Uuid;

use crate::{
    common::error::AppError,
    common::pagination::PaginationParams,
    db::{PracaRepository, TabelaPrecoRepository, TransportadoraRepository, UserRepository},
    models::praca::{
        CreatePracaPayload, ListPracasParams, Praca, PracaDetalhe, PracaResumo, UpdatePracaPayload,
    },
};

#[derive(Clone)]
pub struct PracaService {
    praca_repo: PracaRepository,
    tabela_repo: TabelaPrecoRepository,
    transportadora_repo: TransportadoraRepository,
    user_repo: UserRepository,
    pool: PgPool,
}

impl PracaService {
    pub fn new(
        praca_repo: PracaRepository,
        tabela_repo: TabelaPrecoRepository,
        transportadora_repo: TransportadoraRepository,
        user_repo: UserRepository,
        pool: PgPool,
    ) -> Self {
        Self {
            praca_repo,
            tabela_repo,
            transportadora_repo,
            user_repo,
            pool,
        }
    }

    pub async fn listar(
        &self,
        params: &ListPracasParams,
        pag: &PaginationParams,
    ) -> Result<(Vec<PracaResumo>, i64), AppError> {
        self.praca_repo.listar(params, pag).await
    }

    pub async fn detalhar(&self, id: Uuid) -> Result<PracaDetalhe, AppError> {
        let praca = self
            .praca_repo
            .buscar_por_id(id)
            .await?
            .ok_or(AppError::NotFound("Praça"))?;

        let transportadora_nome = self
            .praca_repo
            .nome_transportadora(praca.transportadora_id)
            .await?;
        let municipios = self.praca_repo.listar_municipios(id).await?;
        let tabelas = self.tabela_repo.listar_por_praca(id).await?;

        Ok(PracaDetalhe {
            praca,
            transportadora_nome,
            municipios,
            tabelas,
        })
    }

    pub async fn criar(
        &self,
        autor_id: Uuid,
        payload: &CreatePracaPayload,
    ) -> Result<Praca, AppError> {
        if self
            .transportadora_repo
            .buscar_por_id(payload.transportadora_id)
            .await?
            .is_none()
        {
            return Err(AppError::NotFound("Transportadora"));
        }

        if self
            .praca_repo
            .existe_nome(payload.transportadora_id, &payload.nome, None)
            .await?
        {
            return Err(AppError::DuplicatePracaNome);
        }

        // Praça e cobertura entram na mesma transação
        let mut tx = self.pool.begin().await?;

        let praca = self
            .praca_repo
            .inserir(&mut *tx, payload.transportadora_id, &payload.nome)
            .await?;

        self.praca_repo
            .vincular_municipios(&mut *tx, praca.id, &payload.municipios)
            .await?;

        tx.commit().await?;

        self.user_repo
            .registrar_log(
                Some(autor_id),
                "INSERIR",
                "pracas",
                Some(&praca.id.to_string()),
                Some(&praca.nome),
            )
            .await?;

        Ok(praca)
    }

    pub async fn atualizar(
        &self,
        autor_id: Uuid,
        id: Uuid,
        payload: &UpdatePracaPayload,
    ) -> Result<Praca, AppError> {
        let atual = self
            .praca_repo
            .buscar_por_id(id)
            .await?
            .ok_or(AppError::NotFound("Praça"))?;

        if self
            .praca_repo
            .existe_nome(atual.transportadora_id, &payload.nome, Some(id))
            .await?
        {
            return Err(AppError::DuplicatePracaNome);
        }

        let mut tx = self.pool.begin().await?;

        let praca = self.praca_repo.atualizar_nome(&mut *tx, id, &payload.nome).await?;

        // Cobertura só é trocada quando o payload a traz
        if let Some(municipios) = &payload.municipios {
            self.praca_repo
                .vincular_municipios(&mut *tx, id, municipios)
                .await?;
        }

        tx.commit().await?;

        self.user_repo
            .registrar_log(
                Some(autor_id),
                "ATUALIZAR",
                "pracas",
                Some(&id.to_string()),
                Some(&praca.nome),
            )
            .await?;

        Ok(praca)
    }

    /// Exclui a praça. Tabelas de preço vinculadas barram a exclusão; as
    /// associações com municípios caem em cascata.
    pub async fn excluir(&self, autor_id: Uuid, id: Uuid) -> Result<(), AppError> {
        if self.praca_repo.buscar_por_id(id).await?.is_none() {
            return Err(AppError::NotFound("Praça"));
        }

        if self.praca_repo.tem_tabelas(id).await? {
            return Err(AppError::HasDependencies(
                "existem tabelas de preço vinculadas à praça",
            ));
        }

        self.praca_repo.excluir(id).await?;

        self.user_repo
            .registrar_log(
                Some(autor_id),
                "EXCLUIR",
                "pracas",
                Some(&id.to_string()),
                None,
            )
            .await?;

        Ok(())
    }
}
