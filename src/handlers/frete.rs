// src/handlers/frete.rs

use axum::{extract::State, Json};
use validator::Validate;

use crate::{
    common::error::AppError,
    config::AppState,
    models::frete::{CalculoFretePayload, CotacaoFrete},
};

// Handler do cálculo de frete — a porta de entrada do motor de cotação
pub async fn calcular_frete(
    State(app_state): State<AppState>,
    Json(payload): Json<CalculoFretePayload>,
) -> Result<Json<CotacaoFrete>, AppError> {
    payload.validate().map_err(AppError::ValidationError)?;

    let cotacao = app_state.frete_service.calcular(&payload).await?;

    Ok(Json(cotacao))
}
