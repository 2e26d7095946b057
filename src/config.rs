// src/config.rs

use sqlx::{postgres::PgPoolOptions, PgPool};
use std::{env, time::Duration};

use crate::db::{
    GeoRepository, PracaRepository, TabelaPrecoRepository, TaxaRepository,
    TransportadoraRepository, UserRepository,
};
use crate::services::{
    AuthService, FreteService, GeoService, PracaService, TabelaPrecoService, TaxaService,
    TransportadoraService, UsuarioService,
};

// Estado da aplicação, construído uma vez no startup e injetado nos
// handlers — nada de estado global.
#[derive(Clone)]
pub struct AppState {
    pub db_pool: PgPool,
    pub auth_service: AuthService,
    pub usuario_service: UsuarioService,
    pub transportadora_service: TransportadoraService,
    pub praca_service: PracaService,
    pub tabela_service: TabelaPrecoService,
    pub taxa_service: TaxaService,
    pub geo_service: GeoService,
    pub frete_service: FreteService,
}

impl AppState {
    pub async fn new() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();

        let database_url = env::var("DATABASE_URL").expect("DATABASE_URL deve ser definida");
        let jwt_secret = env::var("JWT_SECRET").expect("JWT_SECRET deve ser definido");

        // Conecta ao banco de dados, usando '?' para propagar erros
        let db_pool = PgPoolOptions::new()
            .max_connections(5)
            .acquire_timeout(Duration::from_secs(3))
            .connect(&database_url)
            .await?;

        tracing::info!("✅ Conexão com o banco de dados estabelecida com sucesso!");

        // --- Monta o gráfico de dependências ---
        let geo_repo = GeoRepository::new(db_pool.clone());
        let transportadora_repo = TransportadoraRepository::new(db_pool.clone());
        let praca_repo = PracaRepository::new(db_pool.clone());
        let tabela_repo = TabelaPrecoRepository::new(db_pool.clone());
        let taxa_repo = TaxaRepository::new(db_pool.clone());
        let user_repo = UserRepository::new(db_pool.clone());

        let auth_service = AuthService::new(user_repo.clone(), jwt_secret);
        let usuario_service = UsuarioService::new(user_repo.clone());
        let transportadora_service = TransportadoraService::new(
            transportadora_repo.clone(),
            praca_repo.clone(),
            user_repo.clone(),
        );
        let praca_service = PracaService::new(
            praca_repo.clone(),
            tabela_repo.clone(),
            transportadora_repo,
            user_repo.clone(),
            db_pool.clone(),
        );
        let tabela_service = TabelaPrecoService::new(
            tabela_repo.clone(),
            praca_repo.clone(),
            user_repo.clone(),
            db_pool.clone(),
        );
        let taxa_service = TaxaService::new(taxa_repo, user_repo);
        let geo_service = GeoService::new(geo_repo.clone(), praca_repo.clone());
        let frete_service = FreteService::new(geo_repo, praca_repo, tabela_repo);

        Ok(Self {
            db_pool,
            auth_service,
            usuario_service,
            transportadora_service,
            praca_service,
            tabela_service,
            taxa_service,
            geo_service,
            frete_service,
        })
    }
}
