// src/common/pagination.rs

use serde::{Deserialize, Serialize};

const PER_PAGE_PADRAO: i64 = 10;
const PER_PAGE_MAXIMO: i64 = 100;

/// Parâmetros de paginação vindos da query string (`?page=2&per_page=20`).
#[derive(Debug, Default, Deserialize)]
pub struct PaginationParams {
    pub page: Option<i64>,
    pub per_page: Option<i64>,
}

impl PaginationParams {
    pub fn page(&self) -> i64 {
        self.page.unwrap_or(1).max(1)
    }

    // Limite máximo por página
    pub fn per_page(&self) -> i64 {
        self.per_page
            .unwrap_or(PER_PAGE_PADRAO)
            .clamp(1, PER_PAGE_MAXIMO)
    }

    pub fn offset(&self) -> i64 {
        (self.page() - 1) * self.per_page()
    }
}

/// Bloco de paginação devolvido junto com as listagens.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Pagination {
    pub page: i64,
    pub per_page: i64,
    pub total_items: i64,
    pub total_pages: i64,
}

impl Pagination {
    pub fn new(params: &PaginationParams, total_items: i64) -> Self {
        let per_page = params.per_page();
        Self {
            page: params.page(),
            per_page,
            total_items,
            total_pages: (total_items + per_page - 1) / per_page,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn aplica_limites_de_per_page() {
        let params = PaginationParams {
            page: None,
            per_page: Some(500),
        };
        assert_eq!(params.per_page(), 100);

        let params = PaginationParams {
            page: None,
            per_page: Some(0),
        };
        assert_eq!(params.per_page(), 1);
    }

    #[test]
    fn calcula_offset_e_total_de_paginas() {
        let params = PaginationParams {
            page: Some(3),
            per_page: Some(10),
        };
        assert_eq!(params.offset(), 20);

        let pagination = Pagination::new(&params, 25);
        assert_eq!(pagination.total_pages, 3);

        let pagination = Pagination::new(&params, 30);
        assert_eq!(pagination.total_pages, 3);

        let pagination = Pagination::new(&params, 0);
        assert_eq!(pagination.total_pages, 0);
    }
}
