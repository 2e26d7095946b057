// src/services/geo_service.rs

use crate::{
    common::error::AppError,
    common::validators::normalizar_cep,
    db::{GeoRepository, PracaRepository},
    models::geo::{ConsultaCep, Estado, Municipio, MunicipioComEstado},
    models::praca::PracaCobertura,
};

// Consulta da referência geográfica (estados, municípios, CEP)
#[derive(Clone)]
pub struct GeoService {
    geo_repo: GeoRepository,
    praca_repo: PracaRepository,
}

impl GeoService {
    pub fn new(geo_repo: GeoRepository, praca_repo: PracaRepository) -> Self {
        Self {
            geo_repo,
            praca_repo,
        }
    }

    pub async fn listar_estados(&self) -> Result<Vec<Estado>, AppError> {
        self.geo_repo.listar_estados().await
    }

    pub async fn listar_municipios_por_uf(
        &self,
        codigo_uf: i16,
    ) -> Result<Vec<Municipio>, AppError> {
        self.geo_repo.listar_municipios_por_uf(codigo_uf).await
    }

    pub async fn buscar_municipios(
        &self,
        termo: &str,
    ) -> Result<Vec<MunicipioComEstado>, AppError> {
        self.geo_repo.buscar_municipios(termo).await
    }

    /// Consulta de CEP: endereço exato quando cadastrado, senão a faixa que
    /// contém o código; junto vão as praças que cobrem o município.
    pub async fn consultar_cep(&self, cep_bruto: &str) -> Result<ConsultaCep, AppError> {
        let cep = normalizar_cep(cep_bruto)?;

        if let Some(endereco) = self.geo_repo.buscar_endereco(cep).await? {
            let pracas = self
                .praca_repo
                .listar_por_municipio(endereco.codigo_ibge, None)
                .await?;

            return Ok(ConsultaCep {
                cep: format!("{:08}", cep),
                logradouro: endereco.logradouro,
                bairro: endereco.bairro,
                codigo_ibge: endereco.codigo_ibge,
                municipio: endereco.municipio,
                uf: endereco.uf,
                pracas,
            });
        }

        let destino = self
            .geo_repo
            .buscar_faixa_cep(cep)
            .await?
            .ok_or(AppError::PostalCodeNotFound)?;

        let pracas = self
            .praca_repo
            .listar_por_municipio(destino.codigo_ibge, None)
            .await?;

        Ok(ConsultaCep {
            cep: format!("{:08}", cep),
            logradouro: None,
            bairro: None,
            codigo_ibge: destino.codigo_ibge,
            municipio: destino.municipio,
            uf: destino.uf,
            pracas,
        })
    }

    /// Município com as praças que o cobrem.
    pub async fn pracas_do_municipio(
        &self,
        codigo_ibge: i32,
    ) -> Result<(MunicipioComEstado, Vec<PracaCobertura>), AppError> {
        let municipio = self
            .geo_repo
            .buscar_municipio(codigo_ibge)
            .await?
            .ok_or(AppError::NotFound("Município"))?;

        let pracas = self
            .praca_repo
            .listar_por_municipio(codigo_ibge, None)
            .await?;

        Ok((municipio, pracas))
    }
}
