// src/handlers/usuarios.rs

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
    models::auth::{CreateUsuarioPayload, UpdateUsuarioPayload},
};

pub async fn list_usuarios(
    State(app_state): State<AppState>,
) -> Result<impl IntoResponse, AppError> {
    let usuarios = app_state.usuario_service.listar().await?;

    Ok(Json(json!({ "usuarios": usuarios })))
}

pub async fn get_usuario(
    State(app_state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, AppError> {
    let usuario = app_state.usuario_service.buscar(id).await?;

    Ok(Json(json!({ "usuario": usuario })))
}

pub async fn create_usuario(
    State(app_state): State<AppState>,
    AuthenticatedUser(autor): AuthenticatedUser,
    Json(payload): Json<CreateUsuarioPayload>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate().map_err(AppError::ValidationError)?;

    let usuario = app_state.usuario_service.criar(autor.id, &payload).await?;

    Ok((StatusCode::CREATED, Json(usuario)))
}

pub async fn update_usuario(
    State(app_state): State<AppState>,
    AuthenticatedUser(autor): AuthenticatedUser,
    Path(id): Path<Uuid>,
    Json(payload): Json<UpdateUsuarioPayload>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate().map_err(AppError::ValidationError)?;

    let usuario = app_state
        .usuario_service
        .atualizar(autor.id, id, &payload)
        .await?;

    Ok(Json(usuario))
}

pub async fn delete_usuario(
    State(app_state): State<AppState>,
    AuthenticatedUser(autor): AuthenticatedUser,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, AppError> {
    app_state.usuario_service.excluir(autor.id, id).await?;

    Ok(Json(json!({ "success": true, "message": "Usuário excluído com sucesso" })))
}

pub async fn list_logs(
    State(app_state): State<AppState>,
    Query(params): Query<PaginationParams>,
) -> Result<impl IntoResponse, AppError> {
    let (logs, total) = app_state
        .usuario_service
        .listar_logs(params.per_page(), params.offset())
        .await?;
    let pagination = Pagination::new(&params, total);

    Ok(Json(json!({ "logs": logs, "pagination": pagination })))
}
