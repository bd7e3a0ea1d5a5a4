use sea_orm::{ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder, QuerySelect};
use uuid::Uuid;

use models::errors::ModelError;
use models::pokemon::{self, Model, NewPokemon, PokemonPatch, PokemonSummary};

use crate::pokemon::repository::PokemonRepository;

/// SeaORM-backed repository implementation.
pub struct SeaOrmPokemonRepository {
    pub db: DatabaseConnection,
}

fn db_err(e: sea_orm::DbErr) -> ModelError { ModelError::Db(e.to_string()) }

#[async_trait::async_trait]
impl PokemonRepository for SeaOrmPokemonRepository {
    async fn insert(&self, input: &NewPokemon) -> Result<Model, ModelError> {
        pokemon::create(&self.db, &input.name, input.no).await
    }

    async fn list(&self, limit: u64, offset: u64) -> Result<Vec<PokemonSummary>, ModelError> {
        pokemon::Entity::find()
            .select_only()
            .columns([pokemon::Column::Id, pokemon::Column::Name, pokemon::Column::No])
            .order_by_asc(pokemon::Column::No)
            .limit(limit)
            .offset(offset)
            .into_model::<PokemonSummary>()
            .all(&self.db)
            .await
            .map_err(db_err)
    }

    async fn find_by_no(&self, no: i32) -> Result<Option<Model>, ModelError> {
        pokemon::Entity::find()
            .filter(pokemon::Column::No.eq(no))
            .one(&self.db)
            .await
            .map_err(db_err)
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Model>, ModelError> {
        pokemon::Entity::find_by_id(id).one(&self.db).await.map_err(db_err)
    }

    async fn find_by_name(&self, name: &str) -> Result<Option<Model>, ModelError> {
        pokemon::Entity::find()
            .filter(pokemon::Column::Name.eq(name))
            .one(&self.db)
            .await
            .map_err(db_err)
    }

    async fn update(&self, id: Uuid, patch: &PokemonPatch) -> Result<Option<Model>, ModelError> {
        pokemon::update(&self.db, id, patch).await
    }

    async fn delete_by_id(&self, id: Uuid) -> Result<u64, ModelError> {
        let res = pokemon::Entity::delete_by_id(id).exec(&self.db).await.map_err(db_err)?;
        Ok(res.rows_affected)
    }

    async fn delete_all(&self) -> Result<u64, ModelError> {
        pokemon::delete_all(&self.db).await
    }

    async fn insert_many(&self, rows: &[NewPokemon]) -> Result<u64, ModelError> {
        pokemon::insert_many(&self.db, rows).await
    }
}
