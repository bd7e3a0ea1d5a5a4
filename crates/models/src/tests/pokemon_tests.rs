use anyhow::Result;
use migration::{Migrator, MigratorTrait};
use sea_orm::{DatabaseConnection, EntityTrait, ColumnTrait, QueryFilter};
use uuid::Uuid;

use crate::{db::connect, errors::ModelError, pokemon};

/// Connect and migrate; `None` when the database is not available.
async fn setup_test_db() -> Option<DatabaseConnection> {
    if std::env::var("SKIP_DB_TESTS").is_ok() { return None; }
    let db = match connect().await {
        Ok(db) => db,
        Err(e) => {
            eprintln!("skip: cannot connect to db: {}", e);
            return None;
        }
    };
    if let Err(e) = Migrator::up(&db, None).await {
        eprintln!("skip: migrate up failed: {}", e);
        return None;
    }
    Some(db)
}

/// Unique name and catalog number per test run; tests share one database.
fn unique_pair() -> (String, i32) {
    let id = Uuid::new_v4();
    let no = (id.as_u128() % 1_000_000_000) as i32 + 10_000;
    (format!("Test_{}", id.simple()), no)
}

#[tokio::test]
async fn test_create_lowercases_and_update_bumps_version() -> Result<()> {
    let Some(db) = setup_test_db().await else { return Ok(()) };

    let (name, no) = unique_pair();
    let created = pokemon::create(&db, &name, no).await?;
    assert_eq!(created.name, name.to_lowercase());
    assert_eq!(created.no, no);
    assert_eq!(created.version, 0);

    let found = pokemon::Entity::find()
        .filter(pokemon::Column::No.eq(no))
        .one(&db)
        .await?
        .expect("created row");
    assert_eq!(found.id, created.id);

    let patch = pokemon::PokemonPatch { name: Some(format!("{}_RENAMED", name)), no: None };
    let updated = pokemon::update(&db, created.id, &patch).await?.expect("row exists");
    assert_eq!(updated.name, format!("{}_renamed", name.to_lowercase()));
    assert_eq!(updated.version, 1);

    pokemon::Entity::delete_by_id(created.id).exec(&db).await?;
    assert!(pokemon::update(&db, created.id, &patch).await?.is_none());
    Ok(())
}

#[tokio::test]
async fn test_unique_name_and_no() -> Result<()> {
    let Some(db) = setup_test_db().await else { return Ok(()) };

    let (name, no) = unique_pair();
    let first = pokemon::create(&db, &name, no).await?;

    // same name in a different case still collides on the lowercase column
    let dup = pokemon::create(&db, &name.to_uppercase(), no + 1).await;
    assert!(matches!(dup, Err(ModelError::Conflict(ref k)) if k.contains("name")));

    let (other_name, _) = unique_pair();
    let dup = pokemon::create(&db, &other_name, no).await;
    assert!(matches!(dup, Err(ModelError::Conflict(ref k)) if k.contains("\"no\"")));

    let rows = pokemon::Entity::find()
        .filter(pokemon::Column::No.eq(no))
        .all(&db)
        .await?;
    assert_eq!(rows.len(), 1);

    pokemon::Entity::delete_by_id(first.id).exec(&db).await?;
    Ok(())
}

#[tokio::test]
async fn test_insert_many_conflict_names_the_index() -> Result<()> {
    let Some(db) = setup_test_db().await else { return Ok(()) };

    let (name, no) = unique_pair();
    let first = pokemon::create(&db, &name, no).await?;

    let (other_name, _) = unique_pair();
    let batch = [pokemon::NewPokemon::new(other_name, no)];
    let err = pokemon::insert_many(&db, &batch).await.unwrap_err();
    assert!(matches!(err, ModelError::Conflict(ref k) if k == r#"{"index":"idx_pokemon_no"}"#), "{err:?}");

    pokemon::Entity::delete_by_id(first.id).exec(&db).await?;
    Ok(())
}
