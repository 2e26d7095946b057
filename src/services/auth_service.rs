// src/services/auth_service.rs

use bcrypt::{hash, verify};
use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use uuid::Uuid;

use crate::{
    common::error::AppError,
    db::UserRepository,
    models::auth::{Claims, Usuario},
};

// Duração da sessão (e do token que a referencia)
const SESSAO_HORAS: i64 = 2;

#[derive(Clone)]
pub struct AuthService {
    user_repo: UserRepository,
    jwt_secret: String,
}

impl AuthService {
    pub fn new(user_repo: UserRepository, jwt_secret: String) -> Self {
        Self {
            user_repo,
            jwt_secret,
        }
    }

    /// Autentica o usuário e abre uma sessão persistida; o token devolvido
    /// carrega o id da sessão ("sid"), conferido a cada requisição.
    pub async fn login(
        &self,
        username: &str,
        password: &str,
        ip: Option<&str>,
        user_agent: Option<&str>,
    ) -> Result<String, AppError> {
        let usuario = self
            .user_repo
            .buscar_por_username(username)
            .await?
            .ok_or(AppError::InvalidCredentials)?;

        if !usuario.ativo {
            return Err(AppError::InvalidCredentials);
        }

        let password_clone = password.to_owned();
        let password_hash_clone = usuario.password_hash.clone();

        // Executa a verificação em um thread separado
        let senha_valida = tokio::task::spawn_blocking(move || {
            verify(&password_clone, &password_hash_clone)
        })
        .await
        .map_err(|e| anyhow::anyhow!("Falha na task de verificação de senha: {}", e))??;

        if !senha_valida {
            return Err(AppError::InvalidCredentials);
        }

        let sessao_id = Uuid::new_v4();
        let expira_em = Utc::now() + Duration::hours(SESSAO_HORAS);

        self.user_repo
            .criar_sessao(sessao_id, usuario.id, expira_em, ip, user_agent)
            .await?;

        tracing::info!(usuario = %usuario.username, "login efetuado");

        self.criar_token(usuario.id, sessao_id, expira_em.timestamp())
    }

    /// Encerra a sessão referenciada pelo token.
    pub async fn logout(&self, sessao_id: Uuid) -> Result<(), AppError> {
        self.user_repo.excluir_sessao(sessao_id).await
    }

    /// Valida o token e a sessão que ele referencia; devolve o usuário.
    pub async fn validar_token(&self, token: &str) -> Result<Usuario, AppError> {
        let validation = Validation::default();
        let token_data = decode::<Claims>(
            token,
            &DecodingKey::from_secret(self.jwt_secret.as_bytes()),
            &validation,
        )
        .map_err(|_| AppError::InvalidToken)?;

        let claims = token_data.claims;

        let sessao = self
            .user_repo
            .buscar_sessao(claims.sid)
            .await?
            .ok_or(AppError::InvalidToken)?;

        // A sessão precisa pertencer ao usuário do token
        if sessao.usuario_id != claims.sub {
            return Err(AppError::InvalidToken);
        }

        if Utc::now() > sessao.expira_em {
            // Sessão vencida não fica para trás no banco
            self.user_repo.excluir_sessao(sessao.id).await?;
            return Err(AppError::SessionExpired);
        }

        let usuario = self
            .user_repo
            .buscar_por_id(claims.sub)
            .await?
            .ok_or(AppError::InvalidToken)?;

        if !usuario.ativo {
            return Err(AppError::InvalidToken);
        }

        Ok(usuario)
    }

    /// Extrai as claims sem conferir a sessão (usado pelo logout).
    pub fn decodificar(&self, token: &str) -> Result<Claims, AppError> {
        let token_data = decode::<Claims>(
            token,
            &DecodingKey::from_secret(self.jwt_secret.as_bytes()),
            &Validation::default(),
        )
        .map_err(|_| AppError::InvalidToken)?;

        Ok(token_data.claims)
    }

    pub async fn alterar_senha(
        &self,
        usuario: &Usuario,
        senha_atual: &str,
        senha_nova: &str,
    ) -> Result<(), AppError> {
        let atual_clone = senha_atual.to_owned();
        let hash_clone = usuario.password_hash.clone();

        let senha_valida =
            tokio::task::spawn_blocking(move || verify(&atual_clone, &hash_clone))
                .await
                .map_err(|e| anyhow::anyhow!("Falha na task de verificação de senha: {}", e))??;

        if !senha_valida {
            return Err(AppError::InvalidCredentials);
        }

        let novo_hash = hash_senha(senha_nova).await?;
        self.user_repo.atualizar_senha(usuario.id, &novo_hash).await
    }

    fn criar_token(&self, usuario_id: Uuid, sessao_id: Uuid, exp: i64) -> Result<String, AppError> {
        let claims = Claims {
            sub: usuario_id,
            sid: sessao_id,
            exp: exp as usize,
            iat: Utc::now().timestamp() as usize,
        };

        let token = encode(
            &Header::default(),
            &claims,
            &EncodingKey::from_secret(self.jwt_secret.as_bytes()),
        )?;

        Ok(token)
    }
}

/// Hashing de senha em um thread separado (bcrypt é caro).
pub async fn hash_senha(senha: &str) -> Result<String, AppError> {
    let senha_clone = senha.to_owned();

    let hashed = tokio::task::spawn_blocking(move || hash(&senha_clone, bcrypt::DEFAULT_COST))
        .await
        .map_err(|e| anyhow::anyhow!("Falha na task de hashing: {}", e))??;

    Ok(hashed)
}
