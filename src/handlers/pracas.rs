// src/handlers/pracas.rs

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use serde_json::json;
use uuid::Uuid;
use validator::Validate;

use crate::{
    common::error::AppError,
    common::pagination::{Pagination, PaginationParams},
    config::AppState,
    middleware::auth::AuthenticatedUser,
    models::praca::{CreatePracaPayload, ListPracasParams, UpdatePracaPayload},
};

pub async fn list_pracas(
    State(app_state): State<AppState>,
    Query(params): Query<ListPracasParams>,
    Query(pag): Query<PaginationParams>,
) -> Result<impl IntoResponse, AppError> {
    let (pracas, total) = app_state.praca_service.listar(&params, &pag).await?;
    let pagination = Pagination::new(&pag, total);

    Ok(Json(json!({
        "pracas": pracas,
        "pagination": pagination,
    })))
}

pub async fn get_praca(
    State(app_state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, AppError> {
    let detalhe = app_state.praca_service.detalhar(id).await?;

    Ok(Json(json!({ "praca": detalhe })))
}

pub async fn create_praca(
    State(app_state): State<AppState>,
    AuthenticatedUser(usuario): AuthenticatedUser,
    Json(payload): Json<CreatePracaPayload>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate().map_err(AppError::ValidationError)?;

    let praca = app_state.praca_service.criar(usuario.id, &payload).await?;

    Ok((StatusCode::CREATED, Json(praca)))
}

pub async fn update_praca(
    State(app_state): State<AppState>,
    AuthenticatedUser(usuario): AuthenticatedUser,
    Path(id): Path<Uuid>,
    Json(payload): Json<UpdatePracaPayload>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate().map_err(AppError::ValidationError)?;

    let praca = app_state
        .praca_service
        .atualizar(usuario.id, id, &payload)
        .await?;

    Ok(Json(praca))
}

pub async fn delete_praca(
    State(app_state): State<AppState>,
    AuthenticatedUser(usuario): AuthenticatedUser,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, AppError> {
    app_state.praca_service.excluir(usuario.id, id).await?;

    Ok(Json(json!({ "success": true, "message": "Praça excluída com sucesso" })))
}
