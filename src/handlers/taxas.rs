// src/handlers/taxas.rs

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use serde_json::json;
use uuid::Uuid;
use validator::Validate;

use crate::{
    common::error::AppError,
    config::AppState,
    middleware::auth::AuthenticatedUser,
    models::taxa::{CreateTaxaTipoPayload, UpdateTaxaTipoPayload},
};

pub async fn list_taxa_tipos(
    State(app_state): State<AppState>,
) -> Result<impl IntoResponse, AppError> {
    let tipos = app_state.taxa_service.listar_tipos().await?;

    Ok(Json(json!({ "taxaTipos": tipos })))
}

pub async fn get_taxa_tipo(
    State(app_state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, AppError> {
    let tipo = app_state.taxa_service.buscar_tipo(id).await?;

    Ok(Json(json!({ "taxaTipo": tipo })))
}

pub async fn create_taxa_tipo(
    State(app_state): State<AppState>,
    AuthenticatedUser(usuario): AuthenticatedUser,
    Json(payload): Json<CreateTaxaTipoPayload>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate().map_err(AppError::ValidationError)?;

    let tipo = app_state
        .taxa_service
        .criar_tipo(usuario.id, &payload)
        .await?;

    Ok((StatusCode::CREATED, Json(tipo)))
}

pub async fn update_taxa_tipo(
    State(app_state): State<AppState>,
    AuthenticatedUser(usuario): AuthenticatedUser,
    Path(id): Path<Uuid>,
    Json(payload): Json<UpdateTaxaTipoPayload>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate().map_err(AppError::ValidationError)?;

    let tipo = app_state
        .taxa_service
        .atualizar_tipo(usuario.id, id, &payload)
        .await?;

    Ok(Json(tipo))
}

pub async fn delete_taxa_tipo(
    State(app_state): State<AppState>,
    AuthenticatedUser(usuario): AuthenticatedUser,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, AppError> {
    app_state.taxa_service.excluir_tipo(usuario.id, id).await?;

    Ok(Json(json!({
        "success": true,
        "message": "Tipo de taxa excluído com sucesso",
    })))
}

pub async fn list_taxas_transporte(
    State(app_state): State<AppState>,
) -> Result<impl IntoResponse, AppError> {
    let taxas = app_state.taxa_service.listar_taxas().await?;

    Ok(Json(json!({ "taxasTransporte": taxas })))
}
