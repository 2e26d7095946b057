// src/db/geo_repo.rs

use sqlx::PgPool;

use crate::{
    common::error::AppError,
    models::geo::{DestinoResolvido, EnderecoCep, Estado, Municipio, MunicipioComEstado},
};

// Repositório da referência geográfica (estados, municípios, CEPs).
// Dados imutáveis: somente leitura.
#[derive(Clone)]
pub struct GeoRepository {
    pool: PgPool,
}

impl GeoRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn listar_estados(&self) -> Result<Vec<Estado>, AppError> {
        let estados = sqlx::query_as::<_, Estado>(
            "SELECT codigo_uf, nome, uf, regiao FROM estados ORDER BY nome",
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(estados)
    }

    pub async fn listar_municipios_por_uf(
        &self,
        codigo_uf: i16,
    ) -> Result<Vec<Municipio>, AppError> {
        let municipios = sqlx::query_as::<_, Municipio>(
            "SELECT codigo_ibge, nome, codigo_uf FROM municipios WHERE codigo_uf = $1 ORDER BY nome",
        )
        .bind(codigo_uf)
        .fetch_all(&self.pool)
        .await?;

        Ok(municipios)
    }

    pub async fn buscar_municipios(
        &self,
        termo: &str,
    ) -> Result<Vec<MunicipioComEstado>, AppError> {
        let municipios = sqlx::query_as::<_, MunicipioComEstado>(
            r#"
            SELECT m.codigo_ibge, m.nome, m.codigo_uf, e.uf, e.nome AS estado_nome
            FROM municipios m
            JOIN estados e ON e.codigo_uf = m.codigo_uf
            WHERE lower(m.nome) LIKE lower($1)
            ORDER BY m.nome
            LIMIT 50
            "#,
        )
        .bind(format!("%{}%", termo))
        .fetch_all(&self.pool)
        .await?;

        Ok(municipios)
    }

    pub async fn buscar_municipio(
        &self,
        codigo_ibge: i32,
    ) -> Result<Option<MunicipioComEstado>, AppError> {
        let municipio = sqlx::query_as::<_, MunicipioComEstado>(
            r#"
            SELECT m.codigo_ibge, m.nome, m.codigo_uf, e.uf, e.nome AS estado_nome
            FROM municipios m
            JOIN estados e ON e.codigo_uf = m.codigo_uf
            WHERE m.codigo_ibge = $1
            "#,
        )
        .bind(codigo_ibge)
        .fetch_optional(&self.pool)
        .await?;

        Ok(municipio)
    }

    /// Atalho de resolução: endereço cadastrado com o CEP exato.
    pub async fn buscar_endereco(&self, cep: i32) -> Result<Option<EnderecoCep>, AppError> {
        let endereco = sqlx::query_as::<_, EnderecoCep>(
            r#"
            SELECT en.cep, en.logradouro, en.bairro, m.codigo_ibge,
                   m.nome AS municipio, e.uf
            FROM enderecos en
            JOIN municipios m ON m.codigo_ibge = en.codigo_ibge
            JOIN estados e ON e.codigo_uf = m.codigo_uf
            WHERE en.cep = $1
            "#,
        )
        .bind(cep)
        .fetch_optional(&self.pool)
        .await?;

        Ok(endereco)
    }

    /// Resolve um CEP pela faixa que o contém (comparação numérica).
    /// Faixas sobrepostas são desempatadas de forma determinística: a faixa
    /// mais estreita vence, depois a de menor `cep_inicial`.
    pub async fn buscar_faixa_cep(&self, cep: i32) -> Result<Option<DestinoResolvido>, AppError> {
        let destino = sqlx::query_as::<_, DestinoResolvido>(
            r#"
            SELECT m.codigo_ibge, m.nome AS municipio, e.uf
            FROM faixas_cep fc
            JOIN municipios m ON m.codigo_ibge = fc.codigo_ibge
            JOIN estados e ON e.codigo_uf = fc.codigo_uf
            WHERE $1 BETWEEN fc.cep_inicial AND fc.cep_final
            ORDER BY fc.cep_final - fc.cep_inicial, fc.cep_inicial
            LIMIT 1
            "#,
        )
        .bind(cep)
        .fetch_optional(&self.pool)
        .await?;

        Ok(destino)
    }
}
