// src/models/auth.rs

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;
use validator::Validate;

// Mapeia o CREATE TYPE papel_usuario do banco
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "papel_usuario", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum Papel {
    Admin,
    Operador,
}

// Representa um usuário vindo do banco de dados
#[derive(Debug, Clone, Serialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Usuario {
    pub id: Uuid,
    pub username: String,
    pub nome: Option<String>,

    #[serde(skip_serializing)] // IMPORTANTE para segurança
    pub password_hash: String,

    pub role: Papel,
    pub ativo: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

// Sessão persistida no servidor; o JWT referencia o id dela
#[derive(Debug, Clone, FromRow)]
pub struct Sessao {
    pub id: Uuid,
    pub usuario_id: Uuid,
    pub expira_em: DateTime<Utc>,
}

// Estrutura de dados ("claims") dentro do JWT
#[derive(Debug, Serialize, Deserialize)]
pub struct Claims {
    pub sub: Uuid,  // ID do usuário
    pub sid: Uuid,  // ID da sessão persistida
    pub exp: usize, // Quando o token expira
    pub iat: usize, // Quando o token foi criado
}

#[derive(Debug, Deserialize, Validate)]
pub struct LoginPayload {
    #[validate(length(min = 1, message = "O usuário é obrigatório."))]
    pub username: String,

    #[validate(length(min = 1, message = "A senha é obrigatória."))]
    pub password: String,
}

// Resposta de autenticação com o token
#[derive(Debug, Serialize)]
pub struct AuthResponse {
    pub token: String,
}

#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateUsuarioPayload {
    #[validate(length(min = 3, message = "O usuário deve ter no mínimo 3 caracteres."))]
    pub username: String,

    pub nome: Option<String>,

    #[validate(length(min = 6, message = "A senha deve ter no mínimo 6 caracteres."))]
    pub password: String,

    pub role: Papel,
}

#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UpdateUsuarioPayload {
    pub nome: Option<String>,
    pub role: Papel,
    pub ativo: bool,

    // Se presente, redefine a senha
    #[validate(length(min = 6, message = "A senha deve ter no mínimo 6 caracteres."))]
    pub password: Option<String>,
}

#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UpdateSenhaPayload {
    #[validate(length(min = 1, message = "A senha atual é obrigatória."))]
    pub senha_atual: String,

    #[validate(length(min = 6, message = "A nova senha deve ter no mínimo 6 caracteres."))]
    pub senha_nova: String,
}

// Registro de auditoria gravado após mutações bem-sucedidas
#[derive(Debug, Clone, Serialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct LogEntry {
    pub id: Uuid,
    pub usuario_id: Option<Uuid>,
    pub acao: String,
    pub entidade: String,
    pub entidade_id: Option<String>,
    pub descricao: Option<String>,
    pub created_at: DateTime<Utc>,
}
