// src/db/praca_repo.rs

use sqlx::{PgConnection, PgPool, Postgres, QueryBuilder};
use uuid::Uuid;

use crate::{
    common::error::AppError,
    common::pagination::PaginationParams,
    models::geo::MunicipioComEstado,
    models::praca::{ListPracasParams, Praca, PracaCobertura, PracaResumo},
};

#[derive(Clone)]
pub struct PracaRepository {
    pool: PgPool,
}

fn aplicar_filtros(qb: &mut QueryBuilder<'_, Postgres>, params: &ListPracasParams) {
    if let Some(busca) = params.busca.as_deref().filter(|b| !b.is_empty()) {
        let padrao = format!("%{}%", busca);
        qb.push(" AND (p.nome ILIKE ")
            .push_bind(padrao.clone())
            .push(" OR t.razao_social ILIKE ")
            .push_bind(padrao)
            .push(")");
    }

    if let Some(transportadora_id) = params.transportadora_id {
        qb.push(" AND p.transportadora_id = ").push_bind(transportadora_id);
    }
}

impl PracaRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn listar(
        &self,
        params: &ListPracasParams,
        pag: &PaginationParams,
    ) -> Result<(Vec<PracaResumo>, i64), AppError> {
        let mut qb = QueryBuilder::new(
            r#"
            SELECT p.id, p.nome, p.transportadora_id,
                   t.razao_social AS transportadora_nome,
                   (SELECT COUNT(*) FROM praca_municipios pm WHERE pm.praca_id = p.id) AS total_municipios,
                   (SELECT COUNT(*) FROM tabelas_preco tp WHERE tp.praca_id = p.id) AS total_tabelas
            FROM pracas p
            JOIN transportadoras t ON t.id = p.transportadora_id
            WHERE 1=1
            "#,
        );
        aplicar_filtros(&mut qb, params);
        qb.push(" ORDER BY t.razao_social, p.nome LIMIT ")
            .push_bind(pag.per_page())
            .push(" OFFSET ")
            .push_bind(pag.offset());

        let pracas = qb
            .build_query_as::<PracaResumo>()
            .fetch_all(&self.pool)
            .await?;

        let mut qb = QueryBuilder::new(
            r#"
            SELECT COUNT(*)
            FROM pracas p
            JOIN transportadoras t ON t.id = p.transportadora_id
            WHERE 1=1
            "#,
        );
        aplicar_filtros(&mut qb, params);
        let total: i64 = qb.build_query_scalar().fetch_one(&self.pool).await?;

        Ok((pracas, total))
    }

    pub async fn buscar_por_id(&self, id: Uuid) -> Result<Option<Praca>, AppError> {
        let praca = sqlx::query_as::<_, Praca>("SELECT * FROM pracas WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(praca)
    }

    pub async fn listar_por_transportadora(
        &self,
        transportadora_id: Uuid,
    ) -> Result<Vec<PracaResumo>, AppError> {
        let pracas = sqlx::query_as::<_, PracaResumo>(
            r#"
            SELECT p.id, p.nome, p.transportadora_id,
                   t.razao_social AS transportadora_nome,
                   (SELECT COUNT(*) FROM praca_municipios pm WHERE pm.praca_id = p.id) AS total_municipios,
                   (SELECT COUNT(*) FROM tabelas_preco tp WHERE tp.praca_id = p.id) AS total_tabelas
            FROM pracas p
            JOIN transportadoras t ON t.id = p.transportadora_id
            WHERE p.transportadora_id = $1
            ORDER BY p.nome
            "#,
        )
        .bind(transportadora_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(pracas)
    }

    /// Índice de cobertura: toda praça que declara atender o município,
    /// opcionalmente restrita a uma transportadora.
    pub async fn listar_por_municipio(
        &self,
        codigo_ibge: i32,
        transportadora_id: Option<Uuid>,
    ) -> Result<Vec<PracaCobertura>, AppError> {
        let pracas = sqlx::query_as::<_, PracaCobertura>(
            r#"
            SELECT p.id, p.nome, p.transportadora_id,
                   t.razao_social AS transportadora_nome,
                   t.codigo AS transportadora_codigo
            FROM pracas p
            JOIN transportadoras t ON t.id = p.transportadora_id
            JOIN praca_municipios pm ON pm.praca_id = p.id
            WHERE pm.codigo_ibge = $1
              AND ($2::uuid IS NULL OR p.transportadora_id = $2)
            ORDER BY t.razao_social, p.nome
            "#,
        )
        .bind(codigo_ibge)
        .bind(transportadora_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(pracas)
    }

    pub async fn existe_nome(
        &self,
        transportadora_id: Uuid,
        nome: &str,
        ignorar: Option<Uuid>,
    ) -> Result<bool, AppError> {
        let existe = sqlx::query_scalar::<_, bool>(
            r#"
            SELECT EXISTS (
                SELECT 1 FROM pracas
                WHERE transportadora_id = $1 AND nome = $2
                  AND ($3::uuid IS NULL OR id <> $3)
            )
            "#,
        )
        .bind(transportadora_id)
        .bind(nome)
        .bind(ignorar)
        .fetch_one(&self.pool)
        .await?;

        Ok(existe)
    }

    pub async fn inserir(
        &self,
        conn: &mut PgConnection,
        transportadora_id: Uuid,
        nome: &str,
    ) -> Result<Praca, AppError> {
        let praca = sqlx::query_as::<_, Praca>(
            "INSERT INTO pracas (transportadora_id, nome) VALUES ($1, $2) RETURNING *",
        )
        .bind(transportadora_id)
        .bind(nome)
        .fetch_one(&mut *conn)
        .await?;

        Ok(praca)
    }

    pub async fn atualizar_nome(
        &self,
        conn: &mut PgConnection,
        id: Uuid,
        nome: &str,
    ) -> Result<Praca, AppError> {
        let praca = sqlx::query_as::<_, Praca>(
            "UPDATE pracas SET nome = $2, updated_at = now() WHERE id = $1 RETURNING *",
        )
        .bind(id)
        .bind(nome)
        .fetch_one(&mut *conn)
        .await?;

        Ok(praca)
    }

    /// Substitui a cobertura da praça pelo conjunto informado.
    pub async fn vincular_municipios(
        &self,
        conn: &mut PgConnection,
        praca_id: Uuid,
        municipios: &[i32],
    ) -> Result<(), AppError> {
        sqlx::query("DELETE FROM praca_municipios WHERE praca_id = $1")
            .bind(praca_id)
            .execute(&mut *conn)
            .await?;

        if !municipios.is_empty() {
            sqlx::query(
                r#"
                INSERT INTO praca_municipios (praca_id, codigo_ibge)
                SELECT $1, unnest($2::int4[])
                "#,
            )
            .bind(praca_id)
            .bind(municipios)
            .execute(&mut *conn)
            .await?;
        }

        Ok(())
    }

    pub async fn listar_municipios(
        &self,
        praca_id: Uuid,
    ) -> Result<Vec<MunicipioComEstado>, AppError> {
        let municipios = sqlx::query_as::<_, MunicipioComEstado>(
            r#"
            SELECT m.codigo_ibge, m.nome, m.codigo_uf, e.uf, e.nome AS estado_nome
            FROM praca_municipios pm
            JOIN municipios m ON m.codigo_ibge = pm.codigo_ibge
            JOIN estados e ON e.codigo_uf = m.codigo_uf
            WHERE pm.praca_id = $1
            ORDER BY m.nome
            "#,
        )
        .bind(praca_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(municipios)
    }

    pub async fn tem_tabelas(&self, praca_id: Uuid) -> Result<bool, AppError> {
        let existe = sqlx::query_scalar::<_, bool>(
            "SELECT EXISTS (SELECT 1 FROM tabelas_preco WHERE praca_id = $1)",
        )
        .bind(praca_id)
        .fetch_one(&self.pool)
        .await?;

        Ok(existe)
    }

    // As associações com municípios caem junto (ON DELETE CASCADE).
    pub async fn excluir(&self, id: Uuid) -> Result<(), AppError> {
        sqlx::query("DELETE FROM pracas WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(())
    }

    pub async fn nome_transportadora(&self, transportadora_id: Uuid) -> Result<String, AppError> {
        let nome = sqlx::query_scalar::<_, String>(
            "SELECT razao_social FROM transportadoras WHERE id = $1",
        )
        .bind(transportadora_id)
        .fetch_optional(&self.pool)
        .await?
        .ok_or(AppError::NotFound("Transportadora"))?;

        Ok(nome)
    }
}
