//! Service layer providing the catalog operations on top of models.
//! - `pokemon`: create, list, flexible lookup, update, remove.
//! - `seed`: wipe-and-reimport from the external catalog.
//! - Storage sits behind `PokemonRepository`; SeaORM and in-memory implementations.

pub mod errors;
pub mod pagination;
pub mod pokemon;
pub mod seed;
#[cfg(test)]
pub mod test_support;
