// src/db/taxa_repo.rs

use sqlx::PgPool;
use uuid::Uuid;

use crate::{
    common::error::AppError,
    models::taxa::{CreateTaxaTipoPayload, TaxaTipo, TaxaTransporte, UpdateTaxaTipoPayload},
};

// Catálogos de taxas (tipos e definições)
#[derive(Clone)]
pub struct TaxaRepository {
    pool: PgPool,
}

impl TaxaRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn listar_tipos(&self) -> Result<Vec<TaxaTipo>, AppError> {
        let tipos = sqlx::query_as::<_, TaxaTipo>("SELECT * FROM taxa_tipos ORDER BY sigla")
            .fetch_all(&self.pool)
            .await?;

        Ok(tipos)
    }

    pub async fn buscar_tipo(&self, id: Uuid) -> Result<Option<TaxaTipo>, AppError> {
        let tipo = sqlx::query_as::<_, TaxaTipo>("SELECT * FROM taxa_tipos WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(tipo)
    }

    pub async fn inserir_tipo(
        &self,
        payload: &CreateTaxaTipoPayload,
    ) -> Result<TaxaTipo, AppError> {
        let tipo = sqlx::query_as::<_, TaxaTipo>(
            r#"
            INSERT INTO taxa_tipos (sigla, descricao, aplicacao, observacoes)
            VALUES ($1, $2, $3, $4)
            RETURNING *
            "#,
        )
        .bind(&payload.sigla)
        .bind(&payload.descricao)
        .bind(&payload.aplicacao)
        .bind(&payload.observacoes)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| {
            if let Some(db_err) = e.as_database_error() {
                if db_err.is_unique_violation() {
                    return AppError::DuplicateSigla;
                }
            }
            e.into()
        })?;

        Ok(tipo)
    }

    pub async fn atualizar_tipo(
        &self,
        id: Uuid,
        payload: &UpdateTaxaTipoPayload,
    ) -> Result<Option<TaxaTipo>, AppError> {
        let tipo = sqlx::query_as::<_, TaxaTipo>(
            r#"
            UPDATE taxa_tipos
            SET descricao = $2, aplicacao = $3, observacoes = $4, updated_at = now()
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(&payload.descricao)
        .bind(&payload.aplicacao)
        .bind(&payload.observacoes)
        .fetch_optional(&self.pool)
        .await?;

        Ok(tipo)
    }

    pub async fn tipo_em_uso(&self, id: Uuid) -> Result<bool, AppError> {
        let em_uso = sqlx::query_scalar::<_, bool>(
            "SELECT EXISTS (SELECT 1 FROM tabela_taxas WHERE taxa_tipo_id = $1)",
        )
        .bind(id)
        .fetch_one(&self.pool)
        .await?;

        Ok(em_uso)
    }

    pub async fn excluir_tipo(&self, id: Uuid) -> Result<(), AppError> {
        sqlx::query("DELETE FROM taxa_tipos WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(())
    }

    pub async fn listar_taxas(&self) -> Result<Vec<TaxaTransporte>, AppError> {
        let taxas =
            sqlx::query_as::<_, TaxaTransporte>("SELECT * FROM taxas_transporte ORDER BY sigla")
                .fetch_all(&self.pool)
                .await?;

        Ok(taxas)
    }
}
