// src/models/taxa.rs

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;
use validator::Validate;

/// Unidade de uma taxa configurada: percentual sobre o frete ou valor fixo.
/// Enum fechado — uma unidade desconhecida falha na desserialização, em vez
/// de virar zero silencioso.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "unidade_taxa")]
pub enum TaxaUnidade {
    #[sqlx(rename = "%")]
    #[serde(rename = "%")]
    Percentual,

    #[sqlx(rename = "R$")]
    #[serde(rename = "R$")]
    Fixo,
}

#[derive(Debug, Clone, Serialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct TaxaTipo {
    pub id: Uuid,
    pub sigla: String,
    pub descricao: String,
    pub aplicacao: Option<String>,
    pub observacoes: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

// Catálogo de taxas; "aplicacao" carrega tags separadas por vírgula
#[derive(Debug, Clone, Serialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct TaxaTransporte {
    pub id: Uuid,
    pub sigla: String,
    pub descricao: String,
    pub aplicacao: Option<String>,
    pub observacoes: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

// Taxa vinculada a uma tabela, com os catálogos resolvidos (detalhe da tabela)
#[derive(Debug, Clone, Serialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct TabelaTaxaDetalhe {
    pub id: Uuid,
    pub taxa_tipo_id: Uuid,
    pub taxa_id: Uuid,
    pub transportadora_id: Option<Uuid>,
    pub valor: Decimal,
    pub unidade: TaxaUnidade,
    pub obrigatoria: bool,
    pub tipo_sigla: String,
    pub taxa_sigla: String,
    pub taxa_descricao: String,
}

/// Linha de taxa pronta para o cálculo de frete (join com os catálogos,
/// na ordem de configuração).
#[derive(Debug, Clone, FromRow)]
pub struct TaxaAplicavel {
    pub id: Uuid,
    pub valor: Decimal,
    pub unidade: TaxaUnidade,
    pub obrigatoria: bool,
    pub tipo_sigla: String,
    pub taxa_sigla: String,
    pub taxa_descricao: String,
}

#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateTaxaTipoPayload {
    #[validate(length(min = 1, message = "A sigla é obrigatória."))]
    pub sigla: String,

    #[validate(length(min = 1, message = "A descrição é obrigatória."))]
    pub descricao: String,

    pub aplicacao: Option<String>,
    pub observacoes: Option<String>,
}

#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UpdateTaxaTipoPayload {
    #[validate(length(min = 1, message = "A descrição é obrigatória."))]
    pub descricao: String,

    pub aplicacao: Option<String>,
    pub observacoes: Option<String>,
}
