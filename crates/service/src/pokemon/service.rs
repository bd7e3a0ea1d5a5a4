use std::sync::Arc;

use models::errors::ModelError;
use models::pokemon::{self, Model, NewPokemon, PokemonPatch, PokemonSummary};
use tracing::{debug, error, info, instrument};

use crate::errors::ServiceError;
use crate::pagination::Pagination;
use crate::pokemon::repository::PokemonRepository;

pub const DEFAULT_LIMIT: u64 = 10;

/// Translate a store failure into the service error surface.
/// Constraint violations become `Duplicate`; anything unexpected is logged
/// and replaced by an opaque message.
pub(crate) fn store_error(op: &str, e: ModelError) -> ServiceError {
    match e {
        ModelError::Conflict(key) => ServiceError::Duplicate(key),
        ModelError::Validation(msg) => ServiceError::Validation(msg),
        ModelError::Db(detail) => {
            error!(op, error = %detail, "pokemon store failure");
            ServiceError::internal(op)
        }
    }
}

/// Catalog CRUD over a `PokemonRepository`.
pub struct PokemonService<R: PokemonRepository + ?Sized> {
    repo: Arc<R>,
    default_limit: u64,
}

impl<R: PokemonRepository + ?Sized> PokemonService<R> {
    pub fn new(repo: Arc<R>) -> Self { Self { repo, default_limit: DEFAULT_LIMIT } }

    pub fn with_default_limit(mut self, limit: u64) -> Self {
        self.default_limit = limit.max(1);
        self
    }

    /// Insert a new record; the name is stored lowercase.
    ///
    /// # Examples
    /// ```
    /// use service::pokemon::{repository::mock::MockPokemonRepository, service::PokemonService};
    /// use models::pokemon::NewPokemon;
    /// use std::sync::Arc;
    /// let svc = PokemonService::new(Arc::new(MockPokemonRepository::default()));
    /// let created = tokio_test::block_on(svc.create(NewPokemon::new("Pikachu", 25))).unwrap();
    /// assert_eq!(created.name, "pikachu");
    /// ```
    #[instrument(skip(self, input), fields(no = input.no))]
    pub async fn create(&self, mut input: NewPokemon) -> Result<Model, ServiceError> {
        input.name = pokemon::normalize_name(&input.name);
        let created = self.repo.insert(&input).await.map_err(|e| store_error("create", e))?;
        info!(id = %created.id, name = %created.name, no = created.no, "pokemon_created");
        Ok(created)
    }

    /// Page through the catalog ordered by `no`, metadata stripped.
    pub async fn list(&self, page: Pagination) -> Result<Vec<PokemonSummary>, ServiceError> {
        let (limit, offset) = page.resolve(self.default_limit)?;
        let rows = self.repo.list(limit, offset).await.map_err(|e| store_error("list", e))?;
        debug!(limit, offset, count = rows.len(), "pokemon_listed");
        Ok(rows)
    }

    /// Resolve `term` as catalog number, then store id, then name.
    /// The first hit wins.
    #[instrument(skip(self))]
    pub async fn find_one(&self, term: &str) -> Result<Model, ServiceError> {
        let mut found = None;

        if let Some(no) = pokemon::parse_no(term) {
            found = self.repo.find_by_no(no).await.map_err(|e| store_error("find", e))?;
        }

        if found.is_none() {
            if let Some(id) = pokemon::parse_id(term) {
                found = self.repo.find_by_id(id).await.map_err(|e| store_error("find", e))?;
            }
        }

        if found.is_none() {
            let key = pokemon::search_key(term);
            found = self.repo.find_by_name(&key).await.map_err(|e| store_error("find", e))?;
        }

        found.ok_or_else(|| ServiceError::not_found(term))
    }

    /// Patch the record `term` resolves to and return it as stored afterwards.
    #[instrument(skip(self, patch))]
    pub async fn update(&self, term: &str, mut patch: PokemonPatch) -> Result<Model, ServiceError> {
        let current = self.find_one(term).await?;
        if patch.is_empty() {
            return Ok(current);
        }
        if let Some(name) = patch.name.as_deref() {
            patch.name = Some(pokemon::normalize_name(name));
        }
        let updated = self
            .repo
            .update(current.id, &patch)
            .await
            .map_err(|e| store_error("update", e))?
            .ok_or_else(|| ServiceError::not_found(term))?;
        info!(id = %updated.id, version = updated.version, "pokemon_updated");
        Ok(updated)
    }

    /// Delete by exact store id.
    #[instrument(skip(self))]
    pub async fn remove(&self, id: &str) -> Result<(), ServiceError> {
        // a malformed id cannot match any record
        let Some(uuid) = pokemon::parse_id(id) else {
            return Err(ServiceError::not_found(id));
        };
        let deleted = self.repo.delete_by_id(uuid).await.map_err(|e| store_error("delete", e))?;
        if deleted == 0 {
            return Err(ServiceError::not_found(id));
        }
        info!(%uuid, "pokemon_removed");
        Ok(())
    }
}
