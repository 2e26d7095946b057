// src/models/geo.rs

use serde::Serialize;
use sqlx::FromRow;

use crate::models::praca::PracaCobertura;

// Dados de referência (imutáveis, carregados por seed)

#[derive(Debug, Clone, Serialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Estado {
    pub codigo_uf: i16,
    pub nome: String,
    pub uf: String,
    pub regiao: String,
}

#[derive(Debug, Clone, Serialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Municipio {
    pub codigo_ibge: i32,
    pub nome: String,
    pub codigo_uf: i16,
}

// Município com o estado já resolvido, para buscas e detalhes
#[derive(Debug, Clone, Serialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct MunicipioComEstado {
    pub codigo_ibge: i32,
    pub nome: String,
    pub codigo_uf: i16,
    pub uf: String,
    pub estado_nome: String,
}

/// Destino canônico de um CEP: município + estado.
#[derive(Debug, Clone, Serialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct DestinoResolvido {
    pub codigo_ibge: i32,
    pub municipio: String,
    pub uf: String,
}

/// Endereço de CEP exato, quando cadastrado (atalho de resolução).
#[derive(Debug, Clone, Serialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct EnderecoCep {
    pub cep: i32,
    pub logradouro: Option<String>,
    pub bairro: Option<String>,
    pub codigo_ibge: i32,
    pub municipio: String,
    pub uf: String,
}

// Resposta da consulta GET /api/cep/{cep}
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ConsultaCep {
    pub cep: String,
    pub logradouro: Option<String>,
    pub bairro: Option<String>,
    pub codigo_ibge: i32,
    pub municipio: String,
    pub uf: String,
    pub pracas: Vec<PracaCobertura>,
}
