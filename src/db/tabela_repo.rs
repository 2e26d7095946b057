// src/db/tabela_repo.rs

use sqlx::{PgConnection, PgPool};
use uuid::Uuid;

use crate::{
    common::error::AppError,
    models::frete::TabelaCobertura,
    models::tabela::{
        FaixaPayload, FaixaPreco, Modal, TabelaPreco, TabelaResumo, TabelaTaxaPayload,
        TipoCobranca, TipoFaixa,
    },
    models::taxa::{TabelaTaxaDetalhe, TaxaAplicavel},
};

#[derive(Clone)]
pub struct TabelaPrecoRepository {
    pool: PgPool,
}

impl TabelaPrecoRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn listar(
        &self,
        praca_id: Option<Uuid>,
        limit: i64,
        offset: i64,
    ) -> Result<(Vec<TabelaResumo>, i64), AppError> {
        let tabelas = sqlx::query_as::<_, TabelaResumo>(
            r#"
            SELECT tp.id, tp.nome, tp.modal, tp.tipo_cobranca, tp.prazo_entrega,
                   tp.praca_id, p.nome AS praca_nome,
                   t.razao_social AS transportadora_nome
            FROM tabelas_preco tp
            JOIN pracas p ON p.id = tp.praca_id
            JOIN transportadoras t ON t.id = p.transportadora_id
            WHERE ($1::uuid IS NULL OR tp.praca_id = $1)
            ORDER BY t.razao_social, p.nome, tp.modal
            LIMIT $2 OFFSET $3
            "#,
        )
        .bind(praca_id)
        .bind(limit)
        .bind(offset)
        .fetch_all(&self.pool)
        .await?;

        let total: i64 = sqlx::query_scalar(
            "SELECT COUNT(*) FROM tabelas_preco tp WHERE ($1::uuid IS NULL OR tp.praca_id = $1)",
        )
        .bind(praca_id)
        .fetch_one(&self.pool)
        .await?;

        Ok((tabelas, total))
    }

    pub async fn buscar_por_id(&self, id: Uuid) -> Result<Option<TabelaPreco>, AppError> {
        let tabela = sqlx::query_as::<_, TabelaPreco>("SELECT * FROM tabelas_preco WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(tabela)
    }

    pub async fn listar_por_praca(&self, praca_id: Uuid) -> Result<Vec<TabelaPreco>, AppError> {
        let tabelas = sqlx::query_as::<_, TabelaPreco>(
            "SELECT * FROM tabelas_preco WHERE praca_id = $1 ORDER BY modal",
        )
        .bind(praca_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(tabelas)
    }

    /// Pares praça × tabela que cobrem um município — a entrada do
    /// orquestrador de cotação.
    pub async fn listar_cobertura(
        &self,
        codigo_ibge: i32,
        transportadora_id: Option<Uuid>,
    ) -> Result<Vec<TabelaCobertura>, AppError> {
        let tabelas = sqlx::query_as::<_, TabelaCobertura>(
            r#"
            SELECT p.id AS praca_id, p.nome AS praca_nome,
                   tp.id AS tabela_id, tp.modal, tp.tipo_cobranca, tp.prazo_entrega
            FROM pracas p
            JOIN praca_municipios pm ON pm.praca_id = p.id
            JOIN tabelas_preco tp ON tp.praca_id = p.id
            WHERE pm.codigo_ibge = $1
              AND ($2::uuid IS NULL OR p.transportadora_id = $2)
            ORDER BY p.nome, tp.modal
            "#,
        )
        .bind(codigo_ibge)
        .bind(transportadora_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(tabelas)
    }

    pub async fn existe_modal(
        &self,
        praca_id: Uuid,
        modal: Modal,
        ignorar: Option<Uuid>,
    ) -> Result<bool, AppError> {
        let existe = sqlx::query_scalar::<_, bool>(
            r#"
            SELECT EXISTS (
                SELECT 1 FROM tabelas_preco
                WHERE praca_id = $1 AND modal = $2
                  AND ($3::uuid IS NULL OR id <> $3)
            )
            "#,
        )
        .bind(praca_id)
        .bind(modal)
        .bind(ignorar)
        .fetch_one(&self.pool)
        .await?;

        Ok(existe)
    }

    #[allow(clippy::too_many_arguments)]
    pub async fn inserir(
        &self,
        conn: &mut PgConnection,
        praca_id: Uuid,
        nome: &str,
        modal: Modal,
        tipo_cobranca: TipoCobranca,
        observacoes: Option<&str>,
        prazo_entrega: Option<i32>,
        entrega_tipo: Option<&str>,
    ) -> Result<TabelaPreco, AppError> {
        let tabela = sqlx::query_as::<_, TabelaPreco>(
            r#"
            INSERT INTO tabelas_preco (
                praca_id, nome, modal, tipo_cobranca, observacoes, prazo_entrega, entrega_tipo
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            RETURNING *
            "#,
        )
        .bind(praca_id)
        .bind(nome)
        .bind(modal)
        .bind(tipo_cobranca)
        .bind(observacoes)
        .bind(prazo_entrega)
        .bind(entrega_tipo)
        .fetch_one(&mut *conn)
        .await?;

        Ok(tabela)
    }

    #[allow(clippy::too_many_arguments)]
    pub async fn atualizar(
        &self,
        conn: &mut PgConnection,
        id: Uuid,
        nome: &str,
        modal: Modal,
        tipo_cobranca: TipoCobranca,
        observacoes: Option<&str>,
        prazo_entrega: Option<i32>,
        entrega_tipo: Option<&str>,
    ) -> Result<TabelaPreco, AppError> {
        let tabela = sqlx::query_as::<_, TabelaPreco>(
            r#"
            UPDATE tabelas_preco
            SET nome = $2, modal = $3, tipo_cobranca = $4, observacoes = $5,
                prazo_entrega = $6, entrega_tipo = $7, updated_at = now()
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(nome)
        .bind(modal)
        .bind(tipo_cobranca)
        .bind(observacoes)
        .bind(prazo_entrega)
        .bind(entrega_tipo)
        .fetch_one(&mut *conn)
        .await?;

        Ok(tabela)
    }

    // Faixas e taxas caem junto (ON DELETE CASCADE).
    pub async fn excluir(&self, id: Uuid) -> Result<(), AppError> {
        sqlx::query("DELETE FROM tabelas_preco WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(())
    }

    /// Substitui todas as faixas da tabela pelas informadas.
    pub async fn substituir_faixas(
        &self,
        conn: &mut PgConnection,
        tabela_id: Uuid,
        faixas: &[FaixaPayload],
    ) -> Result<(), AppError> {
        sqlx::query("DELETE FROM faixas_preco WHERE tabela_id = $1")
            .bind(tabela_id)
            .execute(&mut *conn)
            .await?;

        for faixa in faixas {
            sqlx::query(
                r#"
                INSERT INTO faixas_preco (
                    tabela_id, tipo, faixa_min, faixa_max, valor, adicional_por_excedente
                )
                VALUES ($1, $2, $3, $4, $5, $6)
                "#,
            )
            .bind(tabela_id)
            .bind(faixa.tipo)
            .bind(faixa.faixa_min)
            .bind(faixa.faixa_max)
            .bind(faixa.valor)
            .bind(faixa.adicional_por_excedente)
            .execute(&mut *conn)
            .await?;
        }

        Ok(())
    }

    /// Substitui todas as taxas da tabela; `ordem` preserva a ordem do payload.
    pub async fn substituir_taxas(
        &self,
        conn: &mut PgConnection,
        tabela_id: Uuid,
        taxas: &[TabelaTaxaPayload],
    ) -> Result<(), AppError> {
        sqlx::query("DELETE FROM tabela_taxas WHERE tabela_id = $1")
            .bind(tabela_id)
            .execute(&mut *conn)
            .await?;

        for (ordem, taxa) in taxas.iter().enumerate() {
            sqlx::query(
                r#"
                INSERT INTO tabela_taxas (
                    tabela_id, taxa_tipo_id, taxa_id, transportadora_id,
                    valor, unidade, obrigatoria, ordem
                )
                VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
                "#,
            )
            .bind(tabela_id)
            .bind(taxa.taxa_tipo_id)
            .bind(taxa.taxa_id)
            .bind(taxa.transportadora_id)
            .bind(taxa.valor)
            .bind(taxa.unidade)
            .bind(taxa.obrigatoria)
            .bind(ordem as i32)
            .execute(&mut *conn)
            .await?;
        }

        Ok(())
    }

    pub async fn listar_faixas(&self, tabela_id: Uuid) -> Result<Vec<FaixaPreco>, AppError> {
        let faixas = sqlx::query_as::<_, FaixaPreco>(
            "SELECT * FROM faixas_preco WHERE tabela_id = $1 ORDER BY tipo, faixa_min",
        )
        .bind(tabela_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(faixas)
    }

    /// Faixas de um único tipo, ordenadas por limite inferior — a forma que o
    /// seletor de faixa consome.
    pub async fn listar_faixas_por_tipo(
        &self,
        tabela_id: Uuid,
        tipo: TipoFaixa,
    ) -> Result<Vec<FaixaPreco>, AppError> {
        let faixas = sqlx::query_as::<_, FaixaPreco>(
            "SELECT * FROM faixas_preco WHERE tabela_id = $1 AND tipo = $2 ORDER BY faixa_min",
        )
        .bind(tabela_id)
        .bind(tipo)
        .fetch_all(&self.pool)
        .await?;

        Ok(faixas)
    }

    pub async fn listar_taxas_detalhe(
        &self,
        tabela_id: Uuid,
    ) -> Result<Vec<TabelaTaxaDetalhe>, AppError> {
        let taxas = sqlx::query_as::<_, TabelaTaxaDetalhe>(
            r#"
            SELECT tt.id, tt.taxa_tipo_id, tt.taxa_id, tt.transportadora_id,
                   tt.valor, tt.unidade, tt.obrigatoria,
                   tp.sigla AS tipo_sigla, tx.sigla AS taxa_sigla,
                   tx.descricao AS taxa_descricao
            FROM tabela_taxas tt
            JOIN taxa_tipos tp ON tp.id = tt.taxa_tipo_id
            JOIN taxas_transporte tx ON tx.id = tt.taxa_id
            WHERE tt.tabela_id = $1
            ORDER BY tt.ordem
            "#,
        )
        .bind(tabela_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(taxas)
    }

    /// Taxas da tabela prontas para o cálculo, na ordem de configuração.
    pub async fn listar_taxas_aplicaveis(
        &self,
        tabela_id: Uuid,
    ) -> Result<Vec<TaxaAplicavel>, AppError> {
        let taxas = sqlx::query_as::<_, TaxaAplicavel>(
            r#"
            SELECT tt.id, tt.valor, tt.unidade, tt.obrigatoria,
                   tp.sigla AS tipo_sigla, tx.sigla AS taxa_sigla,
                   tx.descricao AS taxa_descricao
            FROM tabela_taxas tt
            JOIN taxa_tipos tp ON tp.id = tt.taxa_tipo_id
            JOIN taxas_transporte tx ON tx.id = tt.taxa_id
            WHERE tt.tabela_id = $1
            ORDER BY tt.ordem
            "#,
        )
        .bind(tabela_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(taxas)
    }

    pub async fn nome_praca(&self, praca_id: Uuid) -> Result<String, AppError> {
        let nome = sqlx::query_scalar::<_, String>("SELECT nome FROM pracas WHERE id = $1")
            .bind(praca_id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or(AppError::NotFound("Praça"))?;

        Ok(nome)
    }
}
