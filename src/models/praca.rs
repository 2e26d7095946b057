// src/models/praca.rs

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;
use validator::Validate;

use crate::models::geo::MunicipioComEstado;
use crate::models::tabela::TabelaPreco;

#[derive(Debug, Clone, Serialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Praca {
    pub id: Uuid,
    pub transportadora_id: Uuid,
    pub nome: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

// Linha da listagem paginada, com os totais que o frontend exibe
#[derive(Debug, Clone, Serialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct PracaResumo {
    pub id: Uuid,
    pub nome: String,
    pub transportadora_id: Uuid,
    pub transportadora_nome: String,
    pub total_municipios: i64,
    pub total_tabelas: i64,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PracaDetalhe {
    #[serde(flatten)]
    pub praca: Praca,
    pub transportadora_nome: String,
    pub municipios: Vec<MunicipioComEstado>,
    pub tabelas: Vec<TabelaPreco>,
}

/// Praça que cobre um município, como aparece no índice de cobertura
/// (consulta de CEP e cotação de frete).
#[derive(Debug, Clone, Serialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct PracaCobertura {
    pub id: Uuid,
    pub nome: String,
    pub transportadora_id: Uuid,
    pub transportadora_nome: String,
    pub transportadora_codigo: String,
}

#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreatePracaPayload {
    pub transportadora_id: Uuid,

    #[validate(length(min = 1, message = "O nome da praça é obrigatório."))]
    pub nome: String,

    // Códigos IBGE dos municípios cobertos
    #[serde(default)]
    pub municipios: Vec<i32>,
}

#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UpdatePracaPayload {
    #[validate(length(min = 1, message = "O nome da praça é obrigatório."))]
    pub nome: String,

    // Se presente, substitui integralmente a cobertura
    pub municipios: Option<Vec<i32>>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListPracasParams {
    pub busca: Option<String>,
    pub transportadora_id: Option<Uuid>,
}
