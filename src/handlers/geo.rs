// src/handlers/geo.rs

use axum::{
    extract::{Path, Query, State},
    response::IntoResponse,
    Json,
};
use serde::Deserialize;
use serde_json::json;

use crate::{common::error::AppError, config::AppState};

pub async fn list_estados(
    State(app_state): State<AppState>,
) -> Result<impl IntoResponse, AppError> {
    let estados = app_state.geo_service.listar_estados().await?;

    Ok(Json(json!({ "estados": estados })))
}

pub async fn list_municipios_do_estado(
    State(app_state): State<AppState>,
    Path(codigo_uf): Path<i16>,
) -> Result<impl IntoResponse, AppError> {
    let municipios = app_state
        .geo_service
        .listar_municipios_por_uf(codigo_uf)
        .await?;

    Ok(Json(json!({ "municipios": municipios })))
}

#[derive(Debug, Deserialize)]
pub struct BuscaMunicipiosParams {
    pub q: String,
}

pub async fn search_municipios(
    State(app_state): State<AppState>,
    Query(params): Query<BuscaMunicipiosParams>,
) -> Result<impl IntoResponse, AppError> {
    let municipios = app_state.geo_service.buscar_municipios(&params.q).await?;

    Ok(Json(json!({ "municipios": municipios })))
}

pub async fn get_cep_info(
    State(app_state): State<AppState>,
    Path(cep): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let consulta = app_state.geo_service.consultar_cep(&cep).await?;

    Ok(Json(consulta))
}

pub async fn get_municipio_pracas(
    State(app_state): State<AppState>,
    Path(codigo_ibge): Path<i32>,
) -> Result<impl IntoResponse, AppError> {
    let (municipio, pracas) = app_state
        .geo_service
        .pracas_do_municipio(codigo_ibge)
        .await?;

    Ok(Json(json!({ "municipio": municipio, "pracas": pracas })))
}
