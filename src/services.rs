pub mod auth_service;
pub use auth_service::AuthService;
pub mod frete_service;
pub use frete_service::FreteService;
pub mod geo_service;
pub use geo_service::GeoService;
pub mod praca_service;
pub use praca_service::PracaService;
pub mod tabela_service;
pub use tabela_service::TabelaPrecoService;
pub mod taxa_service;
pub use taxa_service::TaxaService;
pub mod transportadora_service;
pub use transportadora_service::TransportadoraService;
pub mod usuario_service;
pub use usuario_service::UsuarioService;
