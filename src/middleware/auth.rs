// src/middleware/auth.rs
//
// Estágios de autenticação/autorização compostos na ordem: `auth_guard`
// valida token + sessão e põe o usuário na requisição; `admin_guard` exige
// papel de administrador sobre o que o primeiro estabeleceu.

use axum::{
    extract::{FromRequestParts, State},
    http::request::Parts,
    middleware::Next,
    response::Response,
};

use crate::{
    common::error::AppError,
    config::AppState,
    models::auth::{Papel, Usuario},
};

pub async fn auth_guard(
    State(app_state): State<AppState>,
    mut request: axum::http::Request<axum::body::Body>,
    next: Next,
) -> Result<Response, AppError> {
    let auth_header = request
        .headers()
        .get("Authorization")
        .and_then(|value| value.to_str().ok());

    if let Some(auth_header) = auth_header {
        if let Some(token) = auth_header.strip_prefix("Bearer ") {
            let usuario = app_state.auth_service.validar_token(token).await?;

            // Insere o usuário nos "extensions" da requisição
            request.extensions_mut().insert(usuario);
            return Ok(next.run(request).await);
        }
    }

    Err(AppError::InvalidToken)
}

/// Aplicado depois do `auth_guard`: barra quem não for administrador.
pub async fn admin_guard(
    request: axum::http::Request<axum::body::Body>,
    next: Next,
) -> Result<Response, AppError> {
    let usuario = request
        .extensions()
        .get::<Usuario>()
        .ok_or(AppError::InvalidToken)?;

    if usuario.role != Papel::Admin {
        return Err(AppError::PermissionDenied);
    }

    Ok(next.run(request).await)
}

// Extrator para obter o usuário autenticado diretamente nos handlers
pub struct AuthenticatedUser(pub Usuario);

impl<S> FromRequestParts<S> for AuthenticatedUser
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<Usuario>()
            .cloned()
            .map(AuthenticatedUser)
            .ok_or(AppError::InvalidToken)
    }
}
