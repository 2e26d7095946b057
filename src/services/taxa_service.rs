// src/services/taxa_service.rs

use uuid::Uuid;

use crate::{
    common::error::AppError,
    db::{TaxaRepository, UserRepository},
    models::taxa::{CreateTaxaTipoPayload, TaxaTipo, TaxaTransporte, UpdateTaxaTipoPayload},
};

// Catálogos de taxas: tipos (CRUD) e definições (consulta)
#[derive(Clone)]
pub struct TaxaService {
    taxa_repo: TaxaRepository,
    user_repo: UserRepository,
}

impl TaxaService {
    pub fn new(taxa_repo: TaxaRepository, user_repo: UserRepository) -> Self {
        Self {
            taxa_repo,
            user_repo,
        }
    }

    pub async fn listar_tipos(&self) -> Result<Vec<TaxaTipo>, AppError> {
        self.taxa_repo.listar_tipos().await
    }

    pub async fn buscar_tipo(&self, id: Uuid) -> Result<TaxaTipo, AppError> {
        self.taxa_repo
            .buscar_tipo(id)
            .await?
            .ok_or(AppError::NotFound("Tipo de taxa"))
    }

    pub async fn criar_tipo(
        &self,
        autor_id: Uuid,
        payload: &CreateTaxaTipoPayload,
    ) -> Result<TaxaTipo, AppError> {
        let tipo = self.taxa_repo.inserir_tipo(payload).await?;

        self.user_repo
            .registrar_log(
                Some(autor_id),
                "INSERIR",
                "taxa_tipos",
                Some(&tipo.id.to_string()),
                Some(&tipo.sigla),
            )
            .await?;

        Ok(tipo)
    }

    pub async fn atualizar_tipo(
        &self,
        autor_id: Uuid,
        id: Uuid,
        payload: &UpdateTaxaTipoPayload,
    ) -> Result<TaxaTipo, AppError> {
        let tipo = self
            .taxa_repo
            .atualizar_tipo(id, payload)
            .await?
            .ok_or(AppError::NotFound("Tipo de taxa"))?;

        self.user_repo
            .registrar_log(
                Some(autor_id),
                "ATUALIZAR",
                "taxa_tipos",
                Some(&id.to_string()),
                Some(&tipo.sigla),
            )
            .await?;

        Ok(tipo)
    }

    pub async fn excluir_tipo(&self, autor_id: Uuid, id: Uuid) -> Result<(), AppError> {
        if self.taxa_repo.buscar_tipo(id).await?.is_none() {
            return Err(AppError::NotFound("Tipo de taxa"));
        }

        // Tipo referenciado por tabelas de preço não sai
        if self.taxa_repo.tipo_em_uso(id).await? {
            return Err(AppError::HasDependencies(
                "existem tabelas de preço usando este tipo de taxa",
            ));
        }

        self.taxa_repo.excluir_tipo(id).await?;

        self.user_repo
            .registrar_log(
                Some(autor_id),
                "EXCLUIR",
                "taxa_tipos",
                Some(&id.to_string()),
                None,
            )
            .await?;

        Ok(())
    }

    pub async fn listar_taxas(&self) -> Result<Vec<TaxaTransporte>, AppError> {
        self.taxa_repo.listar_taxas().await
    }
}
