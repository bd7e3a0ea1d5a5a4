use serde::{Deserialize, Serialize};

/// One page of the external catalog listing.
#[derive(Clone, Debug, Deserialize, Serialize)]
pub struct PokeResponse {
    #[serde(default)]
    pub count: Option<u64>,
    #[serde(default)]
    pub next: Option<String>,
    #[serde(default)]
    pub previous: Option<String>,
    pub results: Vec<PokeResult>,
}

#[derive(Clone, Debug, Deserialize, Serialize)]
pub struct PokeResult {
    pub name: String,
    pub url: String,
}

impl PokeResult {
    /// Catalog number from the second-to-last `/` segment,
    /// e.g. `https://pokeapi.co/api/v2/pokemon/25/` -> 25.
    pub fn catalog_no(&self) -> Option<i32> {
        let segments: Vec<&str> = self.url.split('/').collect();
        let idx = segments.len().checked_sub(2)?;
        segments[idx].parse().ok()
    }
}
