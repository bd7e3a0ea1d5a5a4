use std::sync::Arc;

use common::http::HttpAdapter;
use configs::AppConfig;
use service::{
    pokemon::{repository::PokemonRepository, PokemonService},
    seed::SeedService,
};

pub type CatalogService = PokemonService<dyn PokemonRepository>;
pub type CatalogSeeder = SeedService<dyn PokemonRepository, dyn HttpAdapter>;

/// Shared handler state; services sit behind trait objects so tests can swap the store.
#[derive(Clone)]
pub struct ServerState {
    pub pokemon: Arc<CatalogService>,
    pub seed: Arc<CatalogSeeder>,
}

impl ServerState {
    pub fn new(repo: Arc<dyn PokemonRepository>, http: Arc<dyn HttpAdapter>, cfg: &AppConfig) -> Self {
        let pokemon = PokemonService::new(Arc::clone(&repo)).with_default_limit(cfg.pagination.default_limit);
        let seed = SeedService::new(repo, http, cfg.seed.clone());
        Self { pokemon: Arc::new(pokemon), seed: Arc::new(seed) }
    }
}
