//! Pokemon module: repository boundary, SeaORM adapter and the catalog service.

pub mod repository;
pub mod repo;
pub mod service;

pub use service::PokemonService;
