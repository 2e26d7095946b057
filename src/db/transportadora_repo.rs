// src/db/transportadora_repo.rs

use sqlx::{PgPool, Postgres, QueryBuilder};
use uuid::Uuid;

use crate::{
    common::error::AppError,
    common::pagination::PaginationParams,
    models::transportadora::{
        CreateTransportadoraPayload, ListTransportadorasParams, TipoUnidade, Transportadora,
        TransportadoraResumo,
    },
};

#[derive(Clone)]
pub struct TransportadoraRepository {
    pool: PgPool,
}

// Filtros da listagem aplicados com QueryBuilder (nunca concatenação de
// strings): o mesmo bloco vale para a página e para a contagem.
fn aplicar_filtros(qb: &mut QueryBuilder<'_, Postgres>, params: &ListTransportadorasParams) {
    if let Some(busca) = params.busca.as_deref().filter(|b| !b.is_empty()) {
        let padrao = format!("%{}%", busca);
        qb.push(" AND (t.razao_social ILIKE ")
            .push_bind(padrao.clone())
            .push(" OR t.nome_fantasia ILIKE ")
            .push_bind(padrao.clone())
            .push(" OR t.cnpj ILIKE ")
            .push_bind(padrao.clone())
            .push(" OR t.codigo ILIKE ")
            .push_bind(padrao)
            .push(")");
    }

    if let Some(tipo) = params.tipo {
        qb.push(" AND t.tipo_unidade = ").push_bind(tipo);
    }
}

impl TransportadoraRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn listar(
        &self,
        params: &ListTransportadorasParams,
        pag: &PaginationParams,
    ) -> Result<(Vec<TransportadoraResumo>, i64), AppError> {
        let mut qb = QueryBuilder::new(
            r#"
            SELECT t.id, t.codigo, t.razao_social, t.nome_fantasia, t.cnpj,
                   t.tipo_unidade, m.razao_social AS matriz_nome
            FROM transportadoras t
            LEFT JOIN transportadoras m ON m.id = t.matriz_id
            WHERE 1=1
            "#,
        );
        aplicar_filtros(&mut qb, params);
        qb.push(" ORDER BY t.razao_social LIMIT ")
            .push_bind(pag.per_page())
            .push(" OFFSET ")
            .push_bind(pag.offset());

        let transportadoras = qb
            .build_query_as::<TransportadoraResumo>()
            .fetch_all(&self.pool)
            .await?;

        let mut qb = QueryBuilder::new("SELECT COUNT(*) FROM transportadoras t WHERE 1=1");
        aplicar_filtros(&mut qb, params);
        let total: i64 = qb.build_query_scalar().fetch_one(&self.pool).await?;

        Ok((transportadoras, total))
    }

    pub async fn buscar_por_id(&self, id: Uuid) -> Result<Option<Transportadora>, AppError> {
        let transportadora = sqlx::query_as::<_, Transportadora>(
            "SELECT * FROM transportadoras WHERE id = $1",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(transportadora)
    }

    pub async fn nome_matriz(&self, matriz_id: Uuid) -> Result<Option<String>, AppError> {
        let nome = sqlx::query_scalar::<_, String>(
            "SELECT razao_social FROM transportadoras WHERE id = $1",
        )
        .bind(matriz_id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(nome)
    }

    pub async fn listar_filiais(
        &self,
        matriz_id: Uuid,
    ) -> Result<Vec<TransportadoraResumo>, AppError> {
        let filiais = sqlx::query_as::<_, TransportadoraResumo>(
            r#"
            SELECT t.id, t.codigo, t.razao_social, t.nome_fantasia, t.cnpj,
                   t.tipo_unidade, NULL::text AS matriz_nome
            FROM transportadoras t
            WHERE t.matriz_id = $1
            ORDER BY t.razao_social
            "#,
        )
        .bind(matriz_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(filiais)
    }

    pub async fn existe_codigo(&self, codigo: &str) -> Result<bool, AppError> {
        let existe = sqlx::query_scalar::<_, bool>(
            "SELECT EXISTS (SELECT 1 FROM transportadoras WHERE codigo = $1)",
        )
        .bind(codigo)
        .fetch_one(&self.pool)
        .await?;

        Ok(existe)
    }

    pub async fn existe_cnpj(&self, cnpj: &str) -> Result<bool, AppError> {
        let existe = sqlx::query_scalar::<_, bool>(
            "SELECT EXISTS (SELECT 1 FROM transportadoras WHERE cnpj = $1)",
        )
        .bind(cnpj)
        .fetch_one(&self.pool)
        .await?;

        Ok(existe)
    }

    pub async fn inserir(
        &self,
        payload: &CreateTransportadoraPayload,
    ) -> Result<Transportadora, AppError> {
        let transportadora = sqlx::query_as::<_, Transportadora>(
            r#"
            INSERT INTO transportadoras (
                codigo, razao_social, nome_fantasia, cnpj,
                inscricao_estadual, inscricao_municipal, tipo_unidade, matriz_id
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            RETURNING *
            "#,
        )
        .bind(&payload.codigo)
        .bind(&payload.razao_social)
        .bind(&payload.nome_fantasia)
        .bind(&payload.cnpj)
        .bind(&payload.inscricao_estadual)
        .bind(&payload.inscricao_municipal)
        .bind(payload.tipo_unidade)
        .bind(payload.matriz_id)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| {
            if let Some(db_err) = e.as_database_error() {
                if db_err.is_unique_violation() {
                    return AppError::DuplicateCodigo;
                }
            }
            e.into()
        })?;

        Ok(transportadora)
    }

    pub async fn eh_matriz(&self, id: Uuid) -> Result<bool, AppError> {
        let tipo = sqlx::query_scalar::<_, TipoUnidade>(
            "SELECT tipo_unidade FROM transportadoras WHERE id = $1",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(matches!(tipo, Some(TipoUnidade::Matriz)))
    }
}
