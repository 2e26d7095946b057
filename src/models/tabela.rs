// src/models/tabela.rs

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;
use validator::Validate;

use crate::models::taxa::{TabelaTaxaDetalhe, TaxaUnidade};

// Mapeia o CREATE TYPE modal_transporte do banco
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "modal_transporte", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum Modal {
    Rodoviario,
    Aereo,
    Fluvial,
}

// Política de cobrança da tabela: qual valor seleciona a faixa de preço
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "tipo_cobranca", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum TipoCobranca {
    Peso,
    Cubagem,
    // Cobra pelo maior entre peso e cubagem
    Ambos,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "tipo_faixa", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum TipoFaixa {
    Peso,
    Cubagem,
}

#[derive(Debug, Clone, Serialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct TabelaPreco {
    pub id: Uuid,
    pub praca_id: Uuid,
    pub nome: String,
    pub modal: Modal,
    pub tipo_cobranca: TipoCobranca,
    pub observacoes: Option<String>,
    pub prazo_entrega: Option<i32>,
    pub entrega_tipo: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Faixa de preço: intervalo inclusivo `[faixa_min, faixa_max]` (teto nulo =
/// ilimitado), valor cheio dentro da faixa e adicional por unidade excedente
/// além do teto.
#[derive(Debug, Clone, Serialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct FaixaPreco {
    pub id: Uuid,
    pub tabela_id: Uuid,
    pub tipo: TipoFaixa,
    pub faixa_min: Decimal,
    pub faixa_max: Option<Decimal>,
    pub valor: Decimal,
    pub adicional_por_excedente: Option<Decimal>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TabelaDetalhe {
    #[serde(flatten)]
    pub tabela: TabelaPreco,
    pub praca_nome: String,
    pub faixas: Vec<FaixaPreco>,
    pub taxas: Vec<TabelaTaxaDetalhe>,
}

// Linha da listagem, com praça e transportadora resolvidas
#[derive(Debug, Clone, Serialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct TabelaResumo {
    pub id: Uuid,
    pub nome: String,
    pub modal: Modal,
    pub tipo_cobranca: TipoCobranca,
    pub prazo_entrega: Option<i32>,
    pub praca_id: Uuid,
    pub praca_nome: String,
    pub transportadora_nome: String,
}

// --- Payloads ---

#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct FaixaPayload {
    pub tipo: TipoFaixa,
    pub faixa_min: Decimal,
    pub faixa_max: Option<Decimal>,
    pub valor: Decimal,
    pub adicional_por_excedente: Option<Decimal>,
}

#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct TabelaTaxaPayload {
    pub taxa_tipo_id: Uuid,
    pub taxa_id: Uuid,
    pub transportadora_id: Option<Uuid>,
    pub valor: Decimal,
    pub unidade: TaxaUnidade,

    #[serde(default)]
    pub obrigatoria: bool,
}

#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateTabelaPayload {
    pub praca_id: Uuid,

    #[validate(length(min = 1, message = "O nome da tabela é obrigatório."))]
    pub nome: String,

    pub modal: Modal,
    pub tipo_cobranca: TipoCobranca,
    pub observacoes: Option<String>,
    pub prazo_entrega: Option<i32>,
    pub entrega_tipo: Option<String>,

    #[serde(default)]
    pub faixas: Vec<FaixaPayload>,

    #[serde(default)]
    pub taxas: Vec<TabelaTaxaPayload>,
}

#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UpdateTabelaPayload {
    #[validate(length(min = 1, message = "O nome da tabela é obrigatório."))]
    pub nome: String,

    pub modal: Modal,
    pub tipo_cobranca: TipoCobranca,
    pub observacoes: Option<String>,
    pub prazo_entrega: Option<i32>,
    pub entrega_tipo: Option<String>,

    // Se presentes, substituem integralmente as configuradas
    pub faixas: Option<Vec<FaixaPayload>>,
    pub taxas: Option<Vec<TabelaTaxaPayload>>,
}
