use axum::extract::State;
use tracing::warn;

use crate::{errors::JsonApiError, state::ServerState};

/// Wipe the catalog and re-import it. Not idempotent under concurrency.
#[utoipa::path(
    get, path = "/api/v2/seed", tag = "seed",
    responses(
        (status = 200, description = "Seed executed"),
        (status = 502, description = "Catalog source unavailable"),
        (status = 500, description = "Seed Failed")
    )
)]
pub async fn execute(State(state): State<ServerState>) -> Result<&'static str, JsonApiError> {
    warn!("seed requested; existing catalog will be replaced");
    Ok(state.seed.execute_seed().await?)
}
