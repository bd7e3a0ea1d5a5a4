//! Seed module: wipe the catalog and re-import it from the external source.

pub mod domain;
pub mod service;

pub use service::SeedService;
