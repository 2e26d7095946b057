pub mod geo_repo;
pub use geo_repo::GeoRepository;
pub mod transportadora_repo;
pub use transportadora_repo::TransportadoraRepository;
pub mod praca_repo;
pub use praca_repo::PracaRepository;
pub mod tabela_repo;
pub use tabela_repo::TabelaPrecoRepository;
pub mod taxa_repo;
pub use taxa_repo::TaxaRepository;
pub mod user_repo;
pub use user_repo::UserRepository;
