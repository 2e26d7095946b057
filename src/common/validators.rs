// src/common/validators.rs

use crate::common::error::AppError;

/// Normaliza um CEP: remove separadores e exige exatamente 8 dígitos.
/// O valor retornado é numérico — a resolução por faixa compara números,
/// não strings.
pub fn normalizar_cep(bruto: &str) -> Result<i32, AppError> {
    let digitos: String = bruto.chars().filter(|c| c.is_ascii_digit()).collect();

    if digitos.len() != 8 {
        return Err(AppError::InvalidPostalCode);
    }

    digitos.parse::<i32>().map_err(|_| AppError::InvalidPostalCode)
}

/// Valida um CNPJ pelos dois dígitos verificadores.
/// Aceita o número com ou sem máscara ("12.345.678/0001-95").
pub fn validar_cnpj(bruto: &str) -> bool {
    let digitos: Vec<u32> = bruto.chars().filter_map(|c| c.to_digit(10)).collect();

    if digitos.len() != 14 {
        return false;
    }

    // Sequências de um único dígito repetido passam no cálculo, mas são inválidas.
    if digitos.iter().all(|&d| d == digitos[0]) {
        return false;
    }

    let dv = |tamanho: usize| -> u32 {
        let pesos = [6u32, 5, 4, 3, 2, 9, 8, 7, 6, 5, 4, 3, 2];
        let soma: u32 = digitos[..tamanho]
            .iter()
            .zip(&pesos[13 - tamanho..])
            .map(|(d, p)| d * p)
            .sum();
        let resto = soma % 11;
        if resto < 2 { 0 } else { 11 - resto }
    };

    dv(12) == digitos[12] && dv(13) == digitos[13]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normaliza_cep_com_mascara() {
        assert_eq!(normalizar_cep("01310-100").unwrap(), 1_310_100);
        assert_eq!(normalizar_cep("01.310-100").unwrap(), 1_310_100);
        assert_eq!(normalizar_cep("89010000").unwrap(), 89_010_000);
    }

    #[test]
    fn rejeita_cep_com_tamanho_errado() {
        assert!(matches!(
            normalizar_cep("0131010"),
            Err(AppError::InvalidPostalCode)
        ));
        assert!(matches!(
            normalizar_cep("013101001"),
            Err(AppError::InvalidPostalCode)
        ));
        assert!(matches!(normalizar_cep(""), Err(AppError::InvalidPostalCode)));
        assert!(matches!(
            normalizar_cep("abcdefgh"),
            Err(AppError::InvalidPostalCode)
        ));
    }

    #[test]
    fn aceita_cnpj_valido() {
        assert!(validar_cnpj("11.222.333/0001-81"));
        assert!(validar_cnpj("11222333000181"));
    }

    #[test]
    fn rejeita_cnpj_com_digito_alterado() {
        assert!(!validar_cnpj("11.222.333/0001-82"));
        assert!(!validar_cnpj("11222333000191"));
    }

    #[test]
    fn rejeita_cnpj_de_digitos_repetidos() {
        assert!(!validar_cnpj("00000000000000"));
        assert!(!validar_cnpj("11111111111111"));
    }

    #[test]
    fn rejeita_cnpj_com_tamanho_errado() {
        assert!(!validar_cnpj("1122233300018"));
        assert!(!validar_cnpj(""));
    }
}
