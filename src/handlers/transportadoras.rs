// src/handlers/transportadoras.rs

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
    models::transportadora::{CreateTransportadoraPayload, ListTransportadorasParams},
};

pub async fn list_transportadoras(
    State(app_state): State<AppState>,
    Query(params): Query<ListTransportadorasParams>,
    Query(pag): Query<PaginationParams>,
) -> Result<impl IntoResponse, AppError> {
    let (transportadoras, total) = app_state
        .transportadora_service
        .listar(&params, &pag)
        .await?;
    let pagination = Pagination::new(&pag, total);

    Ok(Json(json!({
        "transportadoras": transportadoras,
        "pagination": pagination,
    })))
}

pub async fn get_transportadora(
    State(app_state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, AppError> {
    let detalhe = app_state.transportadora_service.detalhar(id).await?;

    Ok(Json(json!({ "transportadora": detalhe })))
}

pub async fn create_transportadora(
    State(app_state): State<AppState>,
    AuthenticatedUser(usuario): AuthenticatedUser,
    Json(payload): Json<CreateTransportadoraPayload>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate().map_err(AppError::ValidationError)?;

    let transportadora = app_state
        .transportadora_service
        .criar(usuario.id, &payload)
        .await?;

    Ok((StatusCode::CREATED, Json(transportadora)))
}
