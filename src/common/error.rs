use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

// Nosso tipo de erro, com `thiserror` para melhor ergonomia.
// As quatro falhas de domínio da cotação (entrada inválida, CEP não
// encontrado, sem cobertura, sem tabela aplicável) são resultados esperados
// e viram respostas tipadas, nunca panics.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Erro de validação")]
    ValidationError(#[from] validator::ValidationErrors),

    // --- Cotação de frete ---
    #[error("CEP de destino e peso ou cubagem são obrigatórios")]
    InvalidQuoteInput,

    #[error("CEP inválido")]
    InvalidPostalCode,

    #[error("CEP não encontrado")]
    PostalCodeNotFound,

    #[error("Não há praças que atendam esse destino")]
    NoCoverage,

    #[error("Não foi possível calcular o frete para este destino")]
    NoApplicableTable,

    // --- Cadastros ---
    #[error("CNPJ inválido")]
    InvalidCnpj,

    #[error("CNPJ já cadastrado")]
    DuplicateCnpj,

    #[error("Código de fornecedor já existe")]
    DuplicateCodigo,

    #[error("Sigla já cadastrada")]
    DuplicateSigla,

    #[error("Já existe uma praça com este nome para esta transportadora")]
    DuplicatePracaNome,

    #[error("Já existe uma tabela com este modal para esta praça")]
    DuplicateModal,

    #[error("Filial precisa ter uma matriz associada")]
    MissingMatriz,

    #[error("Faixas de preço com sobreposição para o mesmo tipo")]
    OverlappingBrackets,

    #[error("{0} não encontrado(a)")]
    NotFound(&'static str),

    #[error("Não é possível excluir: {0}")]
    HasDependencies(&'static str),

    // --- Autenticação ---
    #[error("Usuário ou senha inválidos")]
    InvalidCredentials,

    #[error("Token de autenticação inválido ou ausente")]
    InvalidToken,

    #[error("Sessão expirada")]
    SessionExpired,

    #[error("Acesso negado. Permissão de administrador necessária.")]
    PermissionDenied,

    #[error("Nome de usuário já está em uso")]
    DuplicateUsername,

    // --- Infraestrutura ---
    // Variante para erros de banco de dados (sqlx)
    #[error("Erro de banco de dados")]
    DatabaseError(#[from] sqlx::Error),

    // Variante genérica para qualquer outro erro inesperado.
    // `anyhow::Error` é ótimo para capturar o contexto do erro.
    #[error("Erro interno do servidor")]
    InternalServerError(#[from] anyhow::Error),

    #[error("Erro de Bcrypt: {0}")]
    BcryptError(#[from] bcrypt::BcryptError),

    #[error("Erro de JWT: {0}")]
    JwtError(#[from] jsonwebtoken::errors::Error),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, error_message) = match self {
            // Retorna todos os detalhes da validação, campo a campo.
            AppError::ValidationError(errors) => {
                let mut details = std::collections::HashMap::new();
                for (field, field_errors) in errors.field_errors() {
                    let messages: Vec<String> = field_errors
                        .iter()
                        .filter_map(|e| e.message.as_ref().map(|m| m.to_string()))
                        .collect();
                    details.insert(field.to_string(), messages);
                }
                let body = Json(json!({
                    "error": "Um ou mais campos são inválidos.",
                    "details": details,
                }));
                return (StatusCode::BAD_REQUEST, body).into_response();
            }

            AppError::InvalidQuoteInput
            | AppError::InvalidPostalCode
            | AppError::InvalidCnpj
            | AppError::MissingMatriz
            | AppError::OverlappingBrackets => (StatusCode::BAD_REQUEST, self.to_string()),

            AppError::PostalCodeNotFound
            | AppError::NoCoverage
            | AppError::NoApplicableTable
            | AppError::NotFound(_) => (StatusCode::NOT_FOUND, self.to_string()),

            AppError::DuplicateCnpj
            | AppError::DuplicateCodigo
            | AppError::DuplicateSigla
            | AppError::DuplicatePracaNome
            | AppError::DuplicateModal
            | AppError::DuplicateUsername
            | AppError::HasDependencies(_) => (StatusCode::CONFLICT, self.to_string()),

            AppError::InvalidCredentials | AppError::InvalidToken | AppError::SessionExpired => {
                (StatusCode::UNAUTHORIZED, self.to_string())
            }

            AppError::PermissionDenied => (StatusCode::FORBIDDEN, self.to_string()),

            // Todos os outros erros (DatabaseError, InternalServerError...) viram 500.
            // O `tracing` loga a mensagem detalhada; o cliente recebe algo opaco.
            ref e => {
                tracing::error!("Erro interno do servidor: {}", e);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Ocorreu um erro inesperado.".to_string(),
                )
            }
        };

        // Resposta padrão para erros simples que só têm uma mensagem.
        let body = Json(json!({ "error": error_message }));
        (status, body).into_response()
    }
}
