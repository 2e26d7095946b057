// src/models/frete.rs

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;
use validator::Validate;

use crate::models::tabela::{Modal, TipoCobranca, TipoFaixa};

#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CalculoFretePayload {
    #[validate(length(min = 1, message = "O CEP de destino é obrigatório."))]
    pub cep_destino: String,

    #[serde(default)]
    pub peso: Decimal,

    #[serde(default)]
    pub cubagem: Decimal,

    // Recebido por compatibilidade; não entra no cálculo
    #[serde(default)]
    pub valor_mercadoria: Decimal,

    pub transportadora_id: Option<Uuid>,
}

/// Par praça × tabela retornado pelo índice de cobertura para um município.
#[derive(Debug, Clone, FromRow)]
pub struct TabelaCobertura {
    pub praca_id: Uuid,
    pub praca_nome: String,
    pub tabela_id: Uuid,
    pub modal: Modal,
    pub tipo_cobranca: TipoCobranca,
    pub prazo_entrega: Option<i32>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TaxaCalculada {
    pub id: Uuid,
    pub sigla: String,
    pub tipo: String,
    pub descricao: String,
    pub valor: Decimal,
    pub obrigatoria: bool,
}

/// Um candidato de cotação por par praça × tabela. A API devolve todos —
/// ranking e escolha ficam com o chamador.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CandidatoFrete {
    pub tabela_id: Uuid,
    pub praca_nome: String,
    pub modal: Modal,
    pub prazo_entrega: Option<i32>,
    pub valor_frete: Decimal,
    pub tipo_calculo: TipoFaixa,
    pub valor_utilizado: Decimal,
    pub taxas: Vec<TaxaCalculada>,
    pub valor_total: Decimal,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DestinoCotacao {
    pub cep: String,
    pub municipio: String,
    pub uf: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CotacaoFrete {
    pub destino: DestinoCotacao,
    pub resultados: Vec<CandidatoFrete>,
}
