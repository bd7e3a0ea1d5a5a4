use async_trait::async_trait;
use uuid::Uuid;

use models::errors::ModelError;
use models::pokemon::{Model, NewPokemon, PokemonPatch, PokemonSummary};

/// Entity store boundary for the catalog.
///
/// Uniqueness of `name` and `no` is the store's job: implementations report a
/// violated unique constraint as `ModelError::Conflict` and never pre-check.
#[async_trait]
pub trait PokemonRepository: Send + Sync {
    async fn insert(&self, input: &NewPokemon) -> Result<Model, ModelError>;
    /// Ordered ascending by `no`.
    async fn list(&self, limit: u64, offset: u64) -> Result<Vec<PokemonSummary>, ModelError>;
    async fn find_by_no(&self, no: i32) -> Result<Option<Model>, ModelError>;
    async fn find_by_id(&self, id: Uuid) -> Result<Option<Model>, ModelError>;
    async fn find_by_name(&self, name: &str) -> Result<Option<Model>, ModelError>;
    async fn update(&self, id: Uuid, patch: &PokemonPatch) -> Result<Option<Model>, ModelError>;
    async fn delete_by_id(&self, id: Uuid) -> Result<u64, ModelError>;
    async fn delete_all(&self) -> Result<u64, ModelError>;
    async fn insert_many(&self, rows: &[NewPokemon]) -> Result<u64, ModelError>;
}

/// Simple in-memory mock repository for tests and doc examples
pub mod mock {
    use super::*;
    use chrono::Utc;
    use std::sync::Mutex;

    #[derive(Default)]
    pub struct MockPokemonRepository {
        rows: Mutex<Vec<Model>>,
        write_failure: Mutex<Option<String>>, // when set, every write fails with ModelError::Db
    }

    impl MockPokemonRepository {
        /// Make subsequent writes fail with a non-constraint store error.
        pub fn fail_writes(&self, detail: &str) {
            *self.write_failure.lock().unwrap() = Some(detail.to_string());
        }

        pub fn len(&self) -> usize { self.rows.lock().unwrap().len() }

        pub fn is_empty(&self) -> bool { self.len() == 0 }

        pub fn all(&self) -> Vec<Model> {
            let mut rows = self.rows.lock().unwrap().clone();
            rows.sort_by_key(|m| m.no);
            rows
        }

        fn check_writable(&self) -> Result<(), ModelError> {
            match self.write_failure.lock().unwrap().as_ref() {
                Some(detail) => Err(ModelError::Db(detail.clone())),
                None => Ok(()),
            }
        }

        fn conflict(rows: &[Model], skip: Option<Uuid>, name: &str, no: i32) -> Option<ModelError> {
            let others = rows.iter().filter(|m| Some(m.id) != skip);
            for m in others {
                if m.name == name {
                    return Some(ModelError::Conflict(serde_json::json!({ "name": name }).to_string()));
                }
                if m.no == no {
                    return Some(ModelError::Conflict(serde_json::json!({ "no": no }).to_string()));
                }
            }
            None
        }

        fn insert_row(rows: &mut Vec<Model>, input: &NewPokemon) -> Result<Model, ModelError> {
            models::pokemon::validate_name(&input.name)?;
            models::pokemon::validate_no(input.no)?;
            let name = models::pokemon::normalize_name(&input.name);
            if let Some(e) = Self::conflict(rows, None, &name, input.no) {
                return Err(e);
            }
            let now = Utc::now().into();
            let m = Model { id: Uuid::new_v4(), name, no: input.no, version: 0, created_at: now, updated_at: now };
            rows.push(m.clone());
            Ok(m)
        }
    }

    #[async_trait]
    impl PokemonRepository for MockPokemonRepository {
        async fn insert(&self, input: &NewPokemon) -> Result<Model, ModelError> {
            self.check_writable()?;
            let mut rows = self.rows.lock().unwrap();
            Self::insert_row(&mut rows, input)
        }

        async fn list(&self, limit: u64, offset: u64) -> Result<Vec<PokemonSummary>, ModelError> {
            Ok(self
                .all()
                .into_iter()
                .skip(offset as usize)
                .take(limit as usize)
                .map(PokemonSummary::from)
                .collect())
        }

        async fn find_by_no(&self, no: i32) -> Result<Option<Model>, ModelError> {
            Ok(self.rows.lock().unwrap().iter().find(|m| m.no == no).cloned())
        }

        async fn find_by_id(&self, id: Uuid) -> Result<Option<Model>, ModelError> {
            Ok(self.rows.lock().unwrap().iter().find(|m| m.id == id).cloned())
        }

        async fn find_by_name(&self, name: &str) -> Result<Option<Model>, ModelError> {
            Ok(self.rows.lock().unwrap().iter().find(|m| m.name == name).cloned())
        }

        async fn update(&self, id: Uuid, patch: &PokemonPatch) -> Result<Option<Model>, ModelError> {
            self.check_writable()?;
            let mut rows = self.rows.lock().unwrap();
            let Some(pos) = rows.iter().position(|m| m.id == id) else { return Ok(None) };
            let normalized = PokemonPatch {
                name: patch.name.as_deref().map(models::pokemon::normalize_name),
                no: patch.no,
            };
            let mut next = normalized.merged_into(&rows[pos]);
            if let Some(e) = Self::conflict(&rows, Some(id), &next.name, next.no) {
                return Err(e);
            }
            next.version += 1;
            next.updated_at = Utc::now().into();
            rows[pos] = next.clone();
            Ok(Some(next))
        }

        async fn delete_by_id(&self, id: Uuid) -> Result<u64, ModelError> {
            self.check_writable()?;
            let mut rows = self.rows.lock().unwrap();
            let before = rows.len();
            rows.retain(|m| m.id != id);
            Ok((before - rows.len()) as u64)
        }

        async fn delete_all(&self) -> Result<u64, ModelError> {
            self.check_writable()?;
            let mut rows = self.rows.lock().unwrap();
            let n = rows.len() as u64;
            rows.clear();
            Ok(n)
        }

        /// Ordered insert: rows before the first failure stay written.
        async fn insert_many(&self, batch: &[NewPokemon]) -> Result<u64, ModelError> {
            self.check_writable()?;
            let mut rows = self.rows.lock().unwrap();
            let mut written = 0;
            for input in batch {
                Self::insert_row(&mut rows, input)?;
                written += 1;
            }
            Ok(written)
        }
    }
}
