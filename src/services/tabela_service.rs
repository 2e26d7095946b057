// src/services/tabela_service.rs

use sqlx::PgPool;
use uuid::Uuid;

use crate::{
    common::error::AppError,
    db::{PracaRepository, TabelaPrecoRepository, UserRepository},
    models::tabela::{
        CreateTabelaPayload, FaixaPayload, TabelaDetalhe, TabelaPreco, TabelaResumo, TipoFaixa,
        UpdateTabelaPayload,
    },
};

#[derive(Clone)]
pub struct TabelaPrecoService {
    tabela_repo: TabelaPrecoRepository,
    praca_repo: PracaRepository,
    user_repo: UserRepository,
    pool: PgPool,
}

impl TabelaPrecoService {
    pub fn new(
        tabela_repo: TabelaPrecoRepository,
        praca_repo: PracaRepository,
        user_repo: UserRepository,
        pool: PgPool,
    ) -> Self {
        Self {
            tabela_repo,
            praca_repo,
            user_repo,
            pool,
        }
    }

    pub async fn listar(
        &self,
        praca_id: Option<Uuid>,
        limit: i64,
        offset: i64,
    ) -> Result<(Vec<TabelaResumo>, i64), AppError> {
        self.tabela_repo.listar(praca_id, limit, offset).await
    }

    pub async fn detalhar(&self, id: Uuid) -> Result<TabelaDetalhe, AppError> {
        let tabela = self
            .tabela_repo
            .buscar_por_id(id)
            .await?
            .ok_or(AppError::NotFound("Tabela de preço"))?;

        let praca_nome = self.tabela_repo.nome_praca(tabela.praca_id).await?;
        let faixas = self.tabela_repo.listar_faixas(id).await?;
        let taxas = self.tabela_repo.listar_taxas_detalhe(id).await?;

        Ok(TabelaDetalhe {
            tabela,
            praca_nome,
            faixas,
            taxas,
        })
    }

    pub async fn criar(
        &self,
        autor_id: Uuid,
        payload: &CreateTabelaPayload,
    ) -> Result<TabelaPreco, AppError> {
        if self
            .praca_repo
            .buscar_por_id(payload.praca_id)
            .await?
            .is_none()
        {
            return Err(AppError::NotFound("Praça"));
        }

        if self
            .tabela_repo
            .existe_modal(payload.praca_id, payload.modal, None)
            .await?
        {
            return Err(AppError::DuplicateModal);
        }

        if faixas_sobrepostas(&payload.faixas) {
            return Err(AppError::OverlappingBrackets);
        }

        // Tabela, faixas e taxas entram na mesma transação
        let mut tx = self.pool.begin().await?;

        let tabela = self
            .tabela_repo
            .inserir(
                &mut *tx,
                payload.praca_id,
                &payload.nome,
                payload.modal,
                payload.tipo_cobranca,
                payload.observacoes.as_deref(),
                payload.prazo_entrega,
                payload.entrega_tipo.as_deref(),
            )
            .await?;

        self.tabela_repo
            .substituir_faixas(&mut *tx, tabela.id, &payload.faixas)
            .await?;
        self.tabela_repo
            .substituir_taxas(&mut *tx, tabela.id, &payload.taxas)
            .await?;

        tx.commit().await?;

        self.user_repo
            .registrar_log(
                Some(autor_id),
                "INSERIR",
                "tabelas_preco",
                Some(&tabela.id.to_string()),
                Some(&tabela.nome),
            )
            .await?;

        Ok(tabela)
    }

    pub async fn atualizar(
        &self,
        autor_id: Uuid,
        id: Uuid,
        payload: &UpdateTabelaPayload,
    ) -> Result<TabelaPreco, AppError> {
        let atual = self
            .tabela_repo
            .buscar_por_id(id)
            .await?
            .ok_or(AppError::NotFound("Tabela de preço"))?;

        if self
            .tabela_repo
            .existe_modal(atual.praca_id, payload.modal, Some(id))
            .await?
        {
            return Err(AppError::DuplicateModal);
        }

        if let Some(faixas) = &payload.faixas {
            if faixas_sobrepostas(faixas) {
                return Err(AppError::OverlappingBrackets);
            }
        }

        let mut tx = self.pool.begin().await?;

        let tabela = self
            .tabela_repo
            .atualizar(
                &mut *tx,
                id,
                &payload.nome,
                payload.modal,
                payload.tipo_cobranca,
                payload.observacoes.as_deref(),
                payload.prazo_entrega,
                payload.entrega_tipo.as_deref(),
            )
            .await?;

        // Faixas e taxas são substituídas integralmente quando enviadas
        if let Some(faixas) = &payload.faixas {
            self.tabela_repo
                .substituir_faixas(&mut *tx, id, faixas)
                .await?;
        }
        if let Some(taxas) = &payload.taxas {
            self.tabela_repo
                .substituir_taxas(&mut *tx, id, taxas)
                .await?;
        }

        tx.commit().await?;

        self.user_repo
            .registrar_log(
                Some(autor_id),
                "ATUALIZAR",
                "tabelas_preco",
                Some(&id.to_string()),
                Some(&tabela.nome),
            )
            .await?;

        Ok(tabela)
    }

    // Faixas e taxas caem em cascata junto com a tabela.
    pub async fn excluir(&self, autor_id: Uuid, id: Uuid) -> Result<(), AppError> {
        if self.tabela_repo.buscar_por_id(id).await?.is_none() {
            return Err(AppError::NotFound("Tabela de preço"));
        }

        self.tabela_repo.excluir(id).await?;

        self.user_repo
            .registrar_log(
                Some(autor_id),
                "EXCLUIR",
                "tabelas_preco",
                Some(&id.to_string()),
                None,
            )
            .await?;

        Ok(())
    }
}

/// Rejeita faixas do mesmo tipo que se intersectam — a seleção de faixa
/// pressupõe intervalos disjuntos. Lacunas são permitidas.
fn faixas_sobrepostas(faixas: &[FaixaPayload]) -> bool {
    for tipo in [TipoFaixa::Peso, TipoFaixa::Cubagem] {
        let mut do_tipo: Vec<&FaixaPayload> = faixas.iter().filter(|f| f.tipo == tipo).collect();
        do_tipo.sort_by(|a, b| a.faixa_min.cmp(&b.faixa_min));

        for par in do_tipo.windows(2) {
            match par[0].faixa_max {
                // Faixa sem teto não pode ter outra acima
                None => return true,
                Some(max) if par[1].faixa_min <= max => return true,
                _ => {}
            }
        }
    }

    false
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal::Decimal;
    use rust_decimal_macros::dec;

    fn faixa(tipo: TipoFaixa, min: Decimal, max: Option<Decimal>) -> FaixaPayload {
        FaixaPayload {
            tipo,
            faixa_min: min,
            faixa_max: max,
            valor: dec!(10),
            adicional_por_excedente: None,
        }
    }

    #[test]
    fn aceita_faixas_disjuntas() {
        let faixas = vec![
            faixa(TipoFaixa::Peso, dec!(0), Some(dec!(100))),
            faixa(TipoFaixa::Peso, dec!(100.001), None),
        ];
        assert!(!faixas_sobrepostas(&faixas));
    }

    #[test]
    fn rejeita_intervalos_que_se_intersectam() {
        let faixas = vec![
            faixa(TipoFaixa::Peso, dec!(0), Some(dec!(100))),
            faixa(TipoFaixa::Peso, dec!(50), Some(dec!(200))),
        ];
        assert!(faixas_sobrepostas(&faixas));

        // Teto de uma encostando no piso da outra também é interseção
        let faixas = vec![
            faixa(TipoFaixa::Peso, dec!(0), Some(dec!(100))),
            faixa(TipoFaixa::Peso, dec!(100), Some(dec!(200))),
        ];
        assert!(faixas_sobrepostas(&faixas));
    }

    #[test]
    fn rejeita_faixa_sem_teto_que_nao_seja_a_ultima() {
        let faixas = vec![
            faixa(TipoFaixa::Peso, dec!(0), None),
            faixa(TipoFaixa::Peso, dec!(100), Some(dec!(200))),
        ];
        assert!(faixas_sobrepostas(&faixas));
    }

    #[test]
    fn tipos_diferentes_nao_se_intersectam() {
        let faixas = vec![
            faixa(TipoFaixa::Peso, dec!(0), Some(dec!(100))),
            faixa(TipoFaixa::Cubagem, dec!(0), Some(dec!(100))),
        ];
        assert!(!faixas_sobrepostas(&faixas));
    }
}
