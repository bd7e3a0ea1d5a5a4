//! Unique indexes backing the catalog invariants.
//! The service layer never checks uniqueness itself; it only translates the
//! violation raised by these indexes.
use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_index(
                Index::create()
                    .name("idx_pokemon_name")
                    .table(Pokemon::Table)
                    .col(Pokemon::Name)
                    .unique()
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_pokemon_no")
                    .table(Pokemon::Table)
                    .col(Pokemon::No)
                    .unique()
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_index(Index::drop().name("idx_pokemon_name").table(Pokemon::Table).to_owned())
            .await?;
        manager
            .drop_index(Index::drop().name("idx_pokemon_no").table(Pokemon::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum Pokemon { Table, Name, No }
