// src/handlers/auth.rs

use axum::{extract::State, http::header, http::HeaderMap, Json};
use serde_json::json;
use validator::Validate;

use crate::{
    common::error::AppError,
    config::AppState,
    middleware::auth::AuthenticatedUser,
    models::auth::{AuthResponse, LoginPayload, UpdateSenhaPayload, Usuario},
};

// Handler de login: abre sessão e devolve o token que a referencia
pub async fn login(
    State(app_state): State<AppState>,
    headers: HeaderMap,
    Json(payload): Json<LoginPayload>,
) -> Result<Json<AuthResponse>, AppError> {
    payload.validate().map_err(AppError::ValidationError)?;

    let ip = headers
        .get("x-forwarded-for")
        .and_then(|v| v.to_str().ok())
        .map(|v| v.split(',').next().unwrap_or(v).trim().to_string());
    let user_agent = headers
        .get(header::USER_AGENT)
        .and_then(|v| v.to_str().ok())
        .map(str::to_string);

    let token = app_state
        .auth_service
        .login(
            &payload.username,
            &payload.password,
            ip.as_deref(),
            user_agent.as_deref(),
        )
        .await?;

    Ok(Json(AuthResponse { token }))
}

// Handler de logout: encerra a sessão persistida do token
pub async fn logout(
    State(app_state): State<AppState>,
    headers: HeaderMap,
) -> Result<Json<serde_json::Value>, AppError> {
    let token = headers
        .get(header::AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.strip_prefix("Bearer "))
        .ok_or(AppError::InvalidToken)?;

    let claims = app_state.auth_service.decodificar(token)?;
    app_state.auth_service.logout(claims.sid).await?;

    Ok(Json(json!({ "success": true, "message": "Sessão encerrada" })))
}

// Handler da rota protegida /perfil
pub async fn get_perfil(AuthenticatedUser(usuario): AuthenticatedUser) -> Json<Usuario> {
    Json(usuario)
}

pub async fn update_senha(
    State(app_state): State<AppState>,
    AuthenticatedUser(usuario): AuthenticatedUser,
    Json(payload): Json<UpdateSenhaPayload>,
) -> Result<Json<serde_json::Value>, AppError> {
    payload.validate().map_err(AppError::ValidationError)?;

    app_state
        .auth_service
        .alterar_senha(&usuario, &payload.senha_atual, &payload.senha_nova)
        .await?;

    Ok(Json(json!({ "success": true, "message": "Senha atualizada com sucesso" })))
}
