use std::sync::Arc;

use common::{http::HttpAdapter, CoreError};
use configs::SeedConfig;
use models::pokemon::NewPokemon;
use tracing::{info, instrument, warn};

use crate::errors::ServiceError;
use crate::pokemon::repository::PokemonRepository;
use crate::pokemon::service::store_error;
use crate::seed::domain::{PokeResponse, PokeResult};

pub const SEED_ACK: &str = "Seed executed";

/// Replaces the whole catalog with a snapshot of the external source.
///
/// The pipeline is wipe, fetch, transform, bulk load. Nothing is rolled back:
/// a failure after the wipe leaves the store empty or partially loaded.
pub struct SeedService<R: PokemonRepository + ?Sized, H: HttpAdapter + ?Sized> {
    repo: Arc<R>,
    http: Arc<H>,
    cfg: SeedConfig,
}

impl<R: PokemonRepository + ?Sized, H: HttpAdapter + ?Sized> SeedService<R, H> {
    pub fn new(repo: Arc<R>, http: Arc<H>, cfg: SeedConfig) -> Self { Self { repo, http, cfg } }

    #[instrument(skip(self), fields(source = %self.cfg.source_url, limit = self.cfg.limit))]
    pub async fn execute_seed(&self) -> Result<&'static str, ServiceError> {
        let wiped = self.repo.delete_all().await.map_err(|e| store_error("seed", e))?;
        info!(wiped, "seed_wipe_done");

        let url = self.cfg.page_url();
        let body = self.http.get_json(&url).await?;
        let page: PokeResponse = serde_json::from_value(body).map_err(|e| CoreError::Parse(e.to_string()))?;

        let (rows, skipped) = catalog_rows(&page.results);

        let inserted = self.repo.insert_many(&rows).await.map_err(|e| store_error("seed", e))?;
        info!(fetched = page.results.len(), inserted, skipped, "seed_executed");
        Ok(SEED_ACK)
    }
}

/// Rows to load plus the number of entries dropped for lacking a catalog number.
pub(crate) fn catalog_rows(results: &[PokeResult]) -> (Vec<NewPokemon>, usize) {
    let mut rows = Vec::with_capacity(results.len());
    let mut skipped = 0;
    for entry in results {
        match entry.catalog_no() {
            Some(no) => rows.push(NewPokemon::new(entry.name.clone(), no)),
            None => {
                skipped += 1;
                warn!(name = %entry.name, url = %entry.url, "seed_entry_without_catalog_no");
            }
        }
    }
    (rows, skipped)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pokemon::repository::mock::MockPokemonRepository;
    use common::http::mock::MockHttpAdapter;
    use serde_json::json;

    fn cfg() -> SeedConfig {
        SeedConfig { source_url: "https://pokeapi.co/api/v2/pokemon".into(), limit: 151 }
    }

    async fn preload(repo: &MockPokemonRepository, n: i32) {
        for no in 1..=n {
            repo.insert(&NewPokemon::new(format!("old{no}"), 500 + no)).await.unwrap();
        }
    }

    #[tokio::test]
    async fn seed_replaces_existing_records() {
        let repo = Arc::new(MockPokemonRepository::default());
        preload(&repo, 3).await;
        let http = Arc::new(MockHttpAdapter::ok(json!({
            "count": 1302,
            "results": [
                {"name": "bulbasaur", "url": "https://pokeapi.co/api/v2/pokemon/1/"},
                {"name": "ivysaur", "url": "https://pokeapi.co/api/v2/pokemon/2/"}
            ]
        })));
        let svc = SeedService::new(repo.clone(), http.clone(), cfg());

        assert_eq!(svc.execute_seed().await.unwrap(), SEED_ACK);

        let rows: Vec<(String, i32)> = repo.all().into_iter().map(|m| (m.name, m.no)).collect();
        assert_eq!(rows, vec![("bulbasaur".to_string(), 1), ("ivysaur".to_string(), 2)]);
        assert_eq!(http.requested(), vec!["https://pokeapi.co/api/v2/pokemon?limit=151".to_string()]);
    }

    #[tokio::test]
    async fn fetch_failure_leaves_store_wiped() {
        let repo = Arc::new(MockPokemonRepository::default());
        preload(&repo, 5).await;
        let http = Arc::new(MockHttpAdapter::failing("dns error"));
        let svc = SeedService::new(repo.clone(), http, cfg());

        let err = svc.execute_seed().await.unwrap_err();
        assert!(matches!(err, ServiceError::Fetch(CoreError::Network(_))));
        assert!(repo.is_empty());
    }

    #[tokio::test]
    async fn malformed_body_is_a_fetch_error() {
        let repo = Arc::new(MockPokemonRepository::default());
        let http = Arc::new(MockHttpAdapter::ok(json!({"unexpected": true})));
        let svc = SeedService::new(repo.clone(), http, cfg());
        assert!(matches!(svc.execute_seed().await, Err(ServiceError::Fetch(CoreError::Parse(_)))));
        assert!(repo.is_empty());
    }

    #[tokio::test]
    async fn entries_without_catalog_no_are_skipped() {
        let repo = Arc::new(MockPokemonRepository::default());
        let http = Arc::new(MockHttpAdapter::ok(json!({"results": [
            {"name": "bulbasaur", "url": "https://pokeapi.co/api/v2/pokemon/1/"},
            {"name": "missingno", "url": "https://pokeapi.co/api/v2/pokemon/"}
        ]})));
        SeedService::new(repo.clone(), http, cfg()).execute_seed().await.unwrap();
        assert_eq!(repo.len(), 1);
    }

    #[test]
    fn catalog_rows_counts_skipped_entries() {
        let entry = |name: &str, url: &str| PokeResult { name: name.into(), url: url.into() };
        let (rows, skipped) = catalog_rows(&[
            entry("bulbasaur", "https://pokeapi.co/api/v2/pokemon/1/"),
            entry("missingno", "https://pokeapi.co/api/v2/pokemon/"),
            entry("glitch", "https://pokeapi.co/api/v2/pokemon/abc/"),
        ]);
        assert_eq!(rows, vec![NewPokemon::new("bulbasaur", 1)]);
        assert_eq!(skipped, 2);
    }

    #[tokio::test]
    async fn duplicate_in_batch_propagates_without_verification() {
        let repo = Arc::new(MockPokemonRepository::default());
        let http = Arc::new(MockHttpAdapter::ok(json!({"results": [
            {"name": "bulbasaur", "url": "https://pokeapi.co/api/v2/pokemon/1/"},
            {"name": "bulbasaur", "url": "https://pokeapi.co/api/v2/pokemon/2/"}
        ]})));
        let err = SeedService::new(repo.clone(), http, cfg()).execute_seed().await.unwrap_err();
        assert!(matches!(err, ServiceError::Duplicate(_)));
        // the mock stops at the first failing row, like an ordered bulk insert
        assert_eq!(repo.len(), 1);
    }
}
