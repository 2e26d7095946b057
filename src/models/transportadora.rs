// src/models/transportadora.rs

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;
use validator::Validate;

use crate::models::praca::PracaResumo;

// Mapeia o CREATE TYPE tipo_unidade do banco
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "tipo_unidade", rename_all = "UPPERCASE")]
#[serde(rename_all = "UPPERCASE")]
pub enum TipoUnidade {
    Matriz,
    Filial,
}

#[derive(Debug, Clone, Serialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Transportadora {
    pub id: Uuid,
    pub codigo: String,
    pub razao_social: String,
    pub nome_fantasia: Option<String>,
    pub cnpj: Option<String>,
    pub inscricao_estadual: Option<String>,
    pub inscricao_municipal: Option<String>,
    pub tipo_unidade: TipoUnidade,
    pub matriz_id: Option<Uuid>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

// Linha da listagem paginada (matriz já resolvida)
#[derive(Debug, Clone, Serialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct TransportadoraResumo {
    pub id: Uuid,
    pub codigo: String,
    pub razao_social: String,
    pub nome_fantasia: Option<String>,
    pub cnpj: Option<String>,
    pub tipo_unidade: TipoUnidade,
    pub matriz_nome: Option<String>,
}

// Detalhe: transportadora + filiais (se matriz) + praças
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TransportadoraDetalhe {
    #[serde(flatten)]
    pub transportadora: Transportadora,
    pub matriz_nome: Option<String>,
    pub filiais: Vec<TransportadoraResumo>,
    pub pracas: Vec<PracaResumo>,
}

#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateTransportadoraPayload {
    #[validate(length(min = 1, message = "O código de fornecedor é obrigatório."))]
    pub codigo: String,

    #[validate(length(min = 1, message = "A razão social é obrigatória."))]
    pub razao_social: String,

    pub nome_fantasia: Option<String>,
    pub cnpj: Option<String>,
    pub inscricao_estadual: Option<String>,
    pub inscricao_municipal: Option<String>,
    pub tipo_unidade: TipoUnidade,
    pub matriz_id: Option<Uuid>,
}

// Filtros da listagem (a paginação chega em um extrator próprio)
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListTransportadorasParams {
    pub busca: Option<String>,
    pub tipo: Option<TipoUnidade>,
}
