// src/handlers/tabelas.rs

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use serde::Deserialize;
use serde_json::json;
use uuid::Uuid;
use validator::Validate;

use crate::{
    common::error::AppError,
    common::pagination::{Pagination, PaginationParams},
    config::AppState,
    middleware::auth::AuthenticatedUser,
    models::tabela::{CreateTabelaPayload, UpdateTabelaPayload},
};

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListTabelasParams {
    pub praca_id: Option<Uuid>,
}

pub async fn list_tabelas(
    State(app_state): State<AppState>,
    Query(params): Query<ListTabelasParams>,
    Query(pag): Query<PaginationParams>,
) -> Result<impl IntoResponse, AppError> {
    let (tabelas, total) = app_state
        .tabela_service
        .listar(params.praca_id, pag.per_page(), pag.offset())
        .await?;
    let pagination = Pagination::new(&pag, total);

    Ok(Json(json!({
        "tabelas": tabelas,
        "pagination": pagination,
    })))
}

pub async fn get_tabela(
    State(app_state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, AppError> {
    let detalhe = app_state.tabela_service.detalhar(id).await?;

    Ok(Json(json!({ "tabela": detalhe })))
}

pub async fn create_tabela(
    State(app_state): State<AppState>,
    AuthenticatedUser(usuario): AuthenticatedUser,
    Json(payload): Json<CreateTabelaPayload>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate().map_err(AppError::ValidationError)?;

    let tabela = app_state.tabela_service.criar(usuario.id, &payload).await?;

    Ok((StatusCode::CREATED, Json(tabela)))
}

pub async fn update_tabela(
    State(app_state): State<AppState>,
    AuthenticatedUser(usuario): AuthenticatedUser,
    Path(id): Path<Uuid>,
    Json(payload): Json<UpdateTabelaPayload>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate().map_err(AppError::ValidationError)?;

    let tabela = app_state
        .tabela_service
        .atualizar(usuario.id, id, &payload)
        .await?;

    Ok(Json(tabela))
}

pub async fn delete_tabela(
    State(app_state): State<AppState>,
    AuthenticatedUser(usuario): AuthenticatedUser,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, AppError> {
    app_state.tabela_service.excluir(usuario.id, id).await?;

    Ok(Json(json!({
        "success": true,
        "message": "Tabela de preço excluída com sucesso",
    })))
}
