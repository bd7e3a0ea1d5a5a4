/// Pokemon entity CRUD and constraint tests against a live database
pub mod pokemon_tests;
