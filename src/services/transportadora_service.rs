// src/services/transportadora_service.rs

use uuid::Uuid;

use crate::{
    common::error::AppError,
    common::pagination::PaginationParams,
    common::validators::validar_cnpj,
    db::{PracaRepository, TransportadoraRepository, UserRepository},
    models::transportadora::{
        CreateTransportadoraPayload, ListTransportadorasParams, TipoUnidade, Transportadora,
        TransportadoraDetalhe, TransportadoraResumo,
    },
};

#[derive(Clone)]
pub struct TransportadoraService {
    transportadora_repo: TransportadoraRepository,
    praca_repo: PracaRepository,
    user_repo: UserRepository,
}

impl TransportadoraService {
    pub fn new(
        transportadora_repo: TransportadoraRepository,
        praca_repo: PracaRepository,
        user_repo: UserRepository,
    ) -> Self {
        Self {
            transportadora_repo,
            praca_repo,
            user_repo,
        }
    }

    pub async fn listar(
        &self,
        params: &ListTransportadorasParams,
        pag: &PaginationParams,
    ) -> Result<(Vec<TransportadoraResumo>, i64), AppError> {
        self.transportadora_repo.listar(params, pag).await
    }

    pub async fn detalhar(&self, id: Uuid) -> Result<TransportadoraDetalhe, AppError> {
        let transportadora = self
            .transportadora_repo
            .buscar_por_id(id)
            .await?
            .ok_or(AppError::NotFound("Transportadora"))?;

        let matriz_nome = match transportadora.matriz_id {
            Some(matriz_id) => self.transportadora_repo.nome_matriz(matriz_id).await?,
            None => None,
        };

        // Filiais só fazem sentido para matrizes
        let filiais = if transportadora.tipo_unidade == TipoUnidade::Matriz {
            self.transportadora_repo.listar_filiais(id).await?
        } else {
            Vec::new()
        };

        let pracas = self.praca_repo.listar_por_transportadora(id).await?;

        Ok(TransportadoraDetalhe {
            transportadora,
            matriz_nome,
            filiais,
            pracas,
        })
    }

    pub async fn criar(
        &self,
        autor_id: Uuid,
        payload: &CreateTransportadoraPayload,
    ) -> Result<Transportadora, AppError> {
        if let Some(cnpj) = payload.cnpj.as_deref() {
            if !validar_cnpj(cnpj) {
                return Err(AppError::InvalidCnpj);
            }
        }

        if payload.tipo_unidade == TipoUnidade::Filial && payload.matriz_id.is_none() {
            return Err(AppError::MissingMatriz);
        }

        if let Some(matriz_id) = payload.matriz_id {
            if !self.transportadora_repo.eh_matriz(matriz_id).await? {
                return Err(AppError::NotFound("Matriz"));
            }
        }

        if self.transportadora_repo.existe_codigo(&payload.codigo).await? {
            return Err(AppError::DuplicateCodigo);
        }

        if let Some(cnpj) = payload.cnpj.as_deref() {
            if self.transportadora_repo.existe_cnpj(cnpj).await? {
                return Err(AppError::DuplicateCnpj);
            }
        }

        let transportadora = self.transportadora_repo.inserir(payload).await?;

        self.user_repo
            .registrar_log(
                Some(autor_id),
                "INSERIR",
                "transportadoras",
                Some(&transportadora.id.to_string()),
                Some(&transportadora.razao_social),
            )
            .await?;

        Ok(transportadora)
    }
}
