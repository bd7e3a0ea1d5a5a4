//! Create `pokemon` table.
//! Unique indexes on `name` and `no` are added by `m20240101_000002_add_indexes`.
use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Pokemon::Table)
                    .if_not_exists()
                    .col(uuid(Pokemon::Id).primary_key())
                    .col(string_len(Pokemon::Name, 128).not_null())
                    .col(integer(Pokemon::No).not_null())
                    .col(integer(Pokemon::Version).not_null().default(0))
                    .col(timestamp_with_time_zone(Pokemon::CreatedAt).not_null())
                    .col(timestamp_with_time_zone(Pokemon::UpdatedAt).not_null())
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager.drop_table(Table::drop().table(Pokemon::Table).to_owned()).await
    }
}

#[derive(DeriveIden)]
enum Pokemon {
    Table,
    Id,
    Name,
    No,
    Version,
    CreatedAt,
    UpdatedAt,
}
