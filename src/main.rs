// src/main.rs

use axum::{
    middleware as axum_middleware,
    routing::{get, post, put},
    Router,
};
use tokio::net::TcpListener;
use tower_http::{cors::CorsLayer, trace::TraceLayer};

// Declaração dos nossos módulos
mod common;
mod config;
mod db;
mod handlers;
mod middleware;
mod models;
mod services;

use crate::config::AppState;
use crate::middleware::auth::{admin_guard, auth_guard};

#[tokio::main]
async fn main() {
    // Inicializa o logger
    tracing_subscriber::fmt().with_target(false).compact().init();

    let app_state = AppState::new()
        .await
        .expect("Falha ao inicializar o estado da aplicação.");

    // Roda as migrações do SQLx na inicialização
    sqlx::migrate!()
        .run(&app_state.db_pool)
        .await
        .expect("Falha ao rodar as migrações do banco de dados.");

    tracing::info!("✅ Migrações do banco de dados executadas com sucesso!");

    // Rotas de autenticação: login é público, logout exige sessão válida
    let auth_publicas = Router::new().route("/login", post(handlers::auth::login));
    let auth_protegidas = Router::new()
        .route("/logout", post(handlers::auth::logout))
        .layer(axum_middleware::from_fn_with_state(
            app_state.clone(),
            auth_guard,
        ));

    let perfil_routes = Router::new()
        .route("/", get(handlers::auth::get_perfil))
        .route("/senha", put(handlers::auth::update_senha))
        .layer(axum_middleware::from_fn_with_state(
            app_state.clone(),
            auth_guard,
        ));

    // Consultas e cotação: qualquer usuário autenticado
    let consulta_routes = Router::new()
        .route(
            "/transportadoras",
            get(handlers::transportadoras::list_transportadoras),
        )
        .route(
            "/transportadoras/{id}",
            get(handlers::transportadoras::get_transportadora),
        )
        .route("/pracas", get(handlers::pracas::list_pracas))
        .route("/pracas/{id}", get(handlers::pracas::get_praca))
        .route("/tabelas", get(handlers::tabelas::list_tabelas))
        .route("/tabelas/{id}", get(handlers::tabelas::get_tabela))
        .route("/taxa-tipos", get(handlers::taxas::list_taxa_tipos))
        .route("/taxa-tipos/{id}", get(handlers::taxas::get_taxa_tipo))
        .route(
            "/taxas-transporte",
            get(handlers::taxas::list_taxas_transporte),
        )
        .route("/estados", get(handlers::geo::list_estados))
        .route(
            "/estados/{codigo_uf}/municipios",
            get(handlers::geo::list_municipios_do_estado),
        )
        .route("/municipios/busca", get(handlers::geo::search_municipios))
        .route(
            "/municipios/{codigo_ibge}/pracas",
            get(handlers::geo::get_municipio_pracas),
        )
        .route("/cep/{cep}", get(handlers::geo::get_cep_info))
        .route("/frete/calcular", post(handlers::frete::calcular_frete))
        .layer(axum_middleware::from_fn_with_state(
            app_state.clone(),
            auth_guard,
        ));

    // Mutações de cadastro e gestão de usuários: somente administradores.
    // Ordem dos estágios: auth_guard roda primeiro, admin_guard em seguida.
    let admin_routes = Router::new()
        .route(
            "/transportadoras",
            post(handlers::transportadoras::create_transportadora),
        )
        .route("/pracas", post(handlers::pracas::create_praca))
        .route(
            "/pracas/{id}",
            put(handlers::pracas::update_praca).delete(handlers::pracas::delete_praca),
        )
        .route("/tabelas", post(handlers::tabelas::create_tabela))
        .route(
            "/tabelas/{id}",
            put(handlers::tabelas::update_tabela).delete(handlers::tabelas::delete_tabela),
        )
        .route("/taxa-tipos", post(handlers::taxas::create_taxa_tipo))
        .route(
            "/taxa-tipos/{id}",
            put(handlers::taxas::update_taxa_tipo).delete(handlers::taxas::delete_taxa_tipo),
        )
        .route(
            "/usuarios",
            get(handlers::usuarios::list_usuarios).post(handlers::usuarios::create_usuario),
        )
        .route(
            "/usuarios/{id}",
            get(handlers::usuarios::get_usuario)
                .put(handlers::usuarios::update_usuario)
                .delete(handlers::usuarios::delete_usuario),
        )
        .route("/logs", get(handlers::usuarios::list_logs))
        .layer(axum_middleware::from_fn(admin_guard))
        .layer(axum_middleware::from_fn_with_state(
            app_state.clone(),
            auth_guard,
        ));

    // Combina tudo no router principal
    let app = Router::new()
        .route("/api/health", get(|| async { "OK" }))
        .nest("/api/auth", auth_publicas.merge(auth_protegidas))
        .nest("/api/perfil", perfil_routes)
        .nest("/api", consulta_routes.merge(admin_routes))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(app_state);

    // Inicia o servidor
    let addr = "0.0.0.0:3000";
    let listener = TcpListener::bind(addr)
        .await
        .expect("Falha ao iniciar o listener TCP");
    tracing::info!("🚀 Servidor escutando em {}", listener.local_addr().unwrap());
    axum::serve(listener, app)
        .await
        .expect("Erro no servidor Axum");
}
