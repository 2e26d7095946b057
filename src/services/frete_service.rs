// src/services/frete_service.rs
//
// O motor de cotação de frete: resolve o CEP de destino para um município,
// percorre cada par praça × tabela que o cobre, seleciona a faixa de preço
// pelo valor cobrável (peso, cubagem ou o maior dos dois) e aplica as taxas
// configuradas. Devolve um candidato por par — ranking fica com o chamador.

use rust_decimal::Decimal;

use crate::{
    common::error::AppError,
    common::validators::normalizar_cep,
    db::{GeoRepository, PracaRepository, TabelaPrecoRepository},
    models::frete::{
        CalculoFretePayload, CandidatoFrete, CotacaoFrete, DestinoCotacao, TabelaCobertura,
        TaxaCalculada,
    },
    models::geo::DestinoResolvido,
    models::tabela::{FaixaPreco, TipoCobranca, TipoFaixa},
    models::taxa::{TaxaAplicavel, TaxaUnidade},
};

#[derive(Clone)]
pub struct FreteService {
    geo_repo: GeoRepository,
    praca_repo: PracaRepository,
    tabela_repo: TabelaPrecoRepository,
}

impl FreteService {
    pub fn new(
        geo_repo: GeoRepository,
        praca_repo: PracaRepository,
        tabela_repo: TabelaPrecoRepository,
    ) -> Self {
        Self {
            geo_repo,
            praca_repo,
            tabela_repo,
        }
    }

    pub async fn calcular(&self, payload: &CalculoFretePayload) -> Result<CotacaoFrete, AppError> {
        validar_entrada(payload)?;
        let cep = normalizar_cep(&payload.cep_destino)?;

        // CEP -> município (endereço exato como atalho, senão faixa)
        let destino = self.resolver_destino(cep).await?;

        // Praças que cobrem o município, opcionalmente de uma transportadora
        let pracas = self
            .praca_repo
            .listar_por_municipio(destino.codigo_ibge, payload.transportadora_id)
            .await?;
        if pracas.is_empty() {
            return Err(AppError::NoCoverage);
        }

        // Um candidato por par praça × tabela; par sem faixa aplicável é
        // ignorado, não é erro
        let coberturas = self
            .tabela_repo
            .listar_cobertura(destino.codigo_ibge, payload.transportadora_id)
            .await?;

        let mut resultados = Vec::new();
        for cobertura in &coberturas {
            let (valor_utilizado, tipo_calculo) =
                valor_cobravel(cobertura.tipo_cobranca, payload.peso, payload.cubagem);

            let faixas = self
                .tabela_repo
                .listar_faixas_por_tipo(cobertura.tabela_id, tipo_calculo)
                .await?;

            let Some(valor_frete) = selecionar_faixa(&faixas, valor_utilizado) else {
                continue;
            };

            let taxas = calcular_taxas(
                &self
                    .tabela_repo
                    .listar_taxas_aplicaveis(cobertura.tabela_id)
                    .await?,
                valor_frete,
            );

            resultados.push(montar_candidato(
                cobertura,
                valor_utilizado,
                tipo_calculo,
                valor_frete,
                taxas,
            ));
        }

        if resultados.is_empty() {
            return Err(AppError::NoApplicableTable);
        }

        tracing::debug!(
            cep,
            candidatos = resultados.len(),
            "cotação de frete calculada"
        );

        Ok(CotacaoFrete {
            destino: DestinoCotacao {
                cep: format!("{:08}", cep),
                municipio: destino.municipio,
                uf: destino.uf,
            },
            resultados,
        })
    }

    async fn resolver_destino(&self, cep: i32) -> Result<DestinoResolvido, AppError> {
        if let Some(endereco) = self.geo_repo.buscar_endereco(cep).await? {
            return Ok(DestinoResolvido {
                codigo_ibge: endereco.codigo_ibge,
                municipio: endereco.municipio,
                uf: endereco.uf,
            });
        }

        self.geo_repo
            .buscar_faixa_cep(cep)
            .await?
            .ok_or(AppError::PostalCodeNotFound)
    }
}

fn validar_entrada(payload: &CalculoFretePayload) -> Result<(), AppError> {
    if payload.cep_destino.trim().is_empty()
        || (payload.peso <= Decimal::ZERO && payload.cubagem <= Decimal::ZERO)
    {
        return Err(AppError::InvalidQuoteInput);
    }
    Ok(())
}

/// Define o valor cobrável e a base da cobrança a partir da política da
/// tabela. Com `Ambos`, a cubagem só vence quando estritamente maior.
fn valor_cobravel(
    tipo_cobranca: TipoCobranca,
    peso: Decimal,
    cubagem: Decimal,
) -> (Decimal, TipoFaixa) {
    match tipo_cobranca {
        TipoCobranca::Peso => (peso, TipoFaixa::Peso),
        TipoCobranca::Cubagem => (cubagem, TipoFaixa::Cubagem),
        TipoCobranca::Ambos => {
            if cubagem > peso {
                (cubagem, TipoFaixa::Cubagem)
            } else {
                (peso, TipoFaixa::Peso)
            }
        }
    }
}

/// Seleciona a faixa pelo limite inferior — vence a de maior
/// `faixa_min <= valor` — e calcula o preço-base. Acima de um teto finito o
/// adicional por excedente cobre a diferença; sem adicional configurado a
/// faixa não se aplica. `faixas` deve chegar ordenado por `faixa_min`.
fn selecionar_faixa(faixas: &[FaixaPreco], valor: Decimal) -> Option<Decimal> {
    let faixa = faixas.iter().rev().find(|f| valor >= f.faixa_min)?;

    match faixa.faixa_max {
        Some(max) if valor > max => {
            let adicional = faixa.adicional_por_excedente?;
            Some(faixa.valor + (valor - max) * adicional)
        }
        _ => Some(faixa.valor),
    }
}

/// Calcula cada taxa configurada sobre o preço-base, preservando a ordem de
/// configuração. Percentual incide sobre o frete; valor fixo entra como está.
fn calcular_taxas(taxas: &[TaxaAplicavel], valor_frete: Decimal) -> Vec<TaxaCalculada> {
    taxas
        .iter()
        .map(|taxa| {
            let valor = match taxa.unidade {
                TaxaUnidade::Percentual => (taxa.valor / Decimal::from(100)) * valor_frete,
                TaxaUnidade::Fixo => taxa.valor,
            };

            TaxaCalculada {
                id: taxa.id,
                sigla: taxa.taxa_sigla.clone(),
                tipo: taxa.tipo_sigla.clone(),
                descricao: taxa.taxa_descricao.clone(),
                valor,
                obrigatoria: taxa.obrigatoria,
            }
        })
        .collect()
}

/// Monta o candidato final. Só as taxas obrigatórias entram no total; as
/// opcionais aparecem na resposta a título informativo.
fn montar_candidato(
    cobertura: &TabelaCobertura,
    valor_utilizado: Decimal,
    tipo_calculo: TipoFaixa,
    valor_frete: Decimal,
    taxas: Vec<TaxaCalculada>,
) -> CandidatoFrete {
    let total_obrigatorias: Decimal = taxas
        .iter()
        .filter(|t| t.obrigatoria)
        .map(|t| t.valor)
        .sum();

    CandidatoFrete {
        tabela_id: cobertura.tabela_id,
        praca_nome: cobertura.praca_nome.clone(),
        modal: cobertura.modal,
        prazo_entrega: cobertura.prazo_entrega,
        valor_frete,
        tipo_calculo,
        valor_utilizado,
        taxas,
        valor_total: valor_frete + total_obrigatorias,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::tabela::Modal;
    use rust_decimal_macros::dec;
    use uuid::Uuid;

    fn faixa(
        min: Decimal,
        max: Option<Decimal>,
        valor: Decimal,
        adicional: Option<Decimal>,
    ) -> FaixaPreco {
        FaixaPreco {
            id: Uuid::new_v4(),
            tabela_id: Uuid::new_v4(),
            tipo: TipoFaixa::Peso,
            faixa_min: min,
            faixa_max: max,
            valor,
            adicional_por_excedente: adicional,
        }
    }

    fn taxa(valor: Decimal, unidade: TaxaUnidade, obrigatoria: bool) -> TaxaAplicavel {
        TaxaAplicavel {
            id: Uuid::new_v4(),
            valor,
            unidade,
            obrigatoria,
            tipo_sigla: "FRETE".to_string(),
            taxa_sigla: "TX".to_string(),
            taxa_descricao: "Taxa de teste".to_string(),
        }
    }

    fn cobertura() -> TabelaCobertura {
        TabelaCobertura {
            praca_id: Uuid::new_v4(),
            praca_nome: "Grande São Paulo".to_string(),
            tabela_id: Uuid::new_v4(),
            modal: Modal::Rodoviario,
            tipo_cobranca: TipoCobranca::Peso,
            prazo_entrega: Some(3),
        }
    }

    // --- Valor cobrável ---

    #[test]
    fn ambos_usa_cubagem_quando_maior_que_o_peso() {
        let (valor, tipo) = valor_cobravel(TipoCobranca::Ambos, dec!(10), dec!(15));
        assert_eq!(valor, dec!(15));
        assert_eq!(tipo, TipoFaixa::Cubagem);
    }

    #[test]
    fn ambos_usa_peso_quando_maior_ou_igual_a_cubagem() {
        let (valor, tipo) = valor_cobravel(TipoCobranca::Ambos, dec!(20), dec!(15));
        assert_eq!(valor, dec!(20));
        assert_eq!(tipo, TipoFaixa::Peso);

        // Empate fica com o peso
        let (valor, tipo) = valor_cobravel(TipoCobranca::Ambos, dec!(10), dec!(10));
        assert_eq!(valor, dec!(10));
        assert_eq!(tipo, TipoFaixa::Peso);
    }

    #[test]
    fn politicas_simples_usam_o_valor_da_base() {
        assert_eq!(
            valor_cobravel(TipoCobranca::Peso, dec!(8), dec!(30)),
            (dec!(8), TipoFaixa::Peso)
        );
        assert_eq!(
            valor_cobravel(TipoCobranca::Cubagem, dec!(8), dec!(30)),
            (dec!(30), TipoFaixa::Cubagem)
        );
    }

    // --- Seleção de faixa ---

    #[test]
    fn seleciona_faixa_que_contem_o_valor() {
        let faixas = vec![
            faixa(dec!(0), Some(dec!(100)), dec!(50), None),
            faixa(dec!(100.001), Some(dec!(500)), dec!(120), None),
        ];

        assert_eq!(selecionar_faixa(&faixas, dec!(50)), Some(dec!(50)));
        assert_eq!(selecionar_faixa(&faixas, dec!(250)), Some(dec!(120)));
    }

    #[test]
    fn faixa_superior_sem_teto_cobre_qualquer_valor() {
        let faixas = vec![
            faixa(dec!(0), Some(dec!(100)), dec!(50), None),
            faixa(dec!(100.001), None, dec!(200), None),
        ];

        assert_eq!(selecionar_faixa(&faixas, dec!(9999)), Some(dec!(200)));
    }

    // A seleção é pelo limite inferior; o adicional por excedente cobre o
    // que passa do teto (resolução da condição de excedente inalcançável na
    // seleção por intervalo fechado).
    #[test]
    fn excedente_alem_do_teto_aplica_o_adicional() {
        let faixas = vec![faixa(dec!(0), Some(dec!(100)), dec!(50), Some(dec!(2)))];

        // 10 unidades além do teto a 2 por unidade
        assert_eq!(selecionar_faixa(&faixas, dec!(110)), Some(dec!(70)));
    }

    #[test]
    fn excedente_sem_adicional_configurado_nao_casa() {
        let faixas = vec![faixa(dec!(0), Some(dec!(100)), dec!(50), None)];

        assert_eq!(selecionar_faixa(&faixas, dec!(110)), None);
    }

    #[test]
    fn valor_abaixo_do_minimo_de_todas_as_faixas_nao_casa() {
        let faixas = vec![faixa(dec!(10), Some(dec!(100)), dec!(50), None)];

        assert_eq!(selecionar_faixa(&faixas, dec!(5)), None);
        assert_eq!(selecionar_faixa(&[], dec!(5)), None);
    }

    #[test]
    fn limite_inferior_e_teto_sao_inclusivos() {
        let faixas = vec![faixa(dec!(10), Some(dec!(100)), dec!(50), None)];

        assert_eq!(selecionar_faixa(&faixas, dec!(10)), Some(dec!(50)));
        assert_eq!(selecionar_faixa(&faixas, dec!(100)), Some(dec!(50)));
    }

    // --- Cálculo de taxas ---

    #[test]
    fn taxa_percentual_incide_sobre_o_frete() {
        let taxas = calcular_taxas(&[taxa(dec!(10), TaxaUnidade::Percentual, true)], dec!(100));

        assert_eq!(taxas.len(), 1);
        assert_eq!(taxas[0].valor, dec!(10));
    }

    #[test]
    fn taxa_fixa_ignora_o_valor_do_frete() {
        let taxas = calcular_taxas(&[taxa(dec!(25), TaxaUnidade::Fixo, true)], dec!(1));
        assert_eq!(taxas[0].valor, dec!(25));

        let taxas = calcular_taxas(&[taxa(dec!(25), TaxaUnidade::Fixo, true)], dec!(100000));
        assert_eq!(taxas[0].valor, dec!(25));
    }

    #[test]
    fn total_soma_apenas_taxas_obrigatorias() {
        let taxas = calcular_taxas(
            &[
                taxa(dec!(10), TaxaUnidade::Fixo, true),
                taxa(dec!(5), TaxaUnidade::Percentual, false),
            ],
            dec!(100),
        );

        let candidato = montar_candidato(
            &cobertura(),
            dec!(50),
            TipoFaixa::Peso,
            dec!(100),
            taxas,
        );

        // A opcional aparece na resposta mas não entra no total
        assert_eq!(candidato.taxas.len(), 2);
        assert_eq!(candidato.taxas[1].valor, dec!(5));
        assert_eq!(candidato.valor_total, dec!(110));
    }

    // --- Entrada ---

    #[test]
    fn rejeita_peso_e_cubagem_nao_positivos() {
        let payload = CalculoFretePayload {
            cep_destino: "01310-100".to_string(),
            peso: Decimal::ZERO,
            cubagem: Decimal::ZERO,
            valor_mercadoria: Decimal::ZERO,
            transportadora_id: None,
        };

        assert!(matches!(
            validar_entrada(&payload),
            Err(AppError::InvalidQuoteInput)
        ));
    }

    #[test]
    fn rejeita_cep_vazio() {
        let payload = CalculoFretePayload {
            cep_destino: "  ".to_string(),
            peso: dec!(10),
            cubagem: Decimal::ZERO,
            valor_mercadoria: Decimal::ZERO,
            transportadora_id: None,
        };

        assert!(matches!(
            validar_entrada(&payload),
            Err(AppError::InvalidQuoteInput)
        ));
    }

    #[test]
    fn aceita_apenas_um_dos_valores_positivo() {
        let payload = CalculoFretePayload {
            cep_destino: "01310-100".to_string(),
            peso: Decimal::ZERO,
            cubagem: dec!(2.5),
            valor_mercadoria: Decimal::ZERO,
            transportadora_id: None,
        };

        assert!(validar_entrada(&payload).is_ok());
    }

    // --- Cenário completo sobre o motor puro ---

    #[test]
    fn cenario_completo_uma_faixa_uma_taxa_obrigatoria() {
        let cobertura = cobertura();
        let faixas = vec![faixa(dec!(0), Some(dec!(100)), dec!(50), None)];
        let taxas_configuradas = vec![taxa(dec!(10), TaxaUnidade::Fixo, true)];

        let (valor_utilizado, tipo_calculo) =
            valor_cobravel(cobertura.tipo_cobranca, dec!(50), Decimal::ZERO);
        let valor_frete = selecionar_faixa(&faixas, valor_utilizado).unwrap();
        let taxas = calcular_taxas(&taxas_configuradas, valor_frete);
        let candidato =
            montar_candidato(&cobertura, valor_utilizado, tipo_calculo, valor_frete, taxas);

        assert_eq!(candidato.valor_frete, dec!(50));
        assert_eq!(candidato.tipo_calculo, TipoFaixa::Peso);
        assert_eq!(candidato.valor_utilizado, dec!(50));
        assert_eq!(candidato.taxas.len(), 1);
        assert_eq!(candidato.valor_total, dec!(60));
    }
}
