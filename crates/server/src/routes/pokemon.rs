use axum::{extract::{Path, Query, State}, http::StatusCode, Json};
use models::pokemon::{self, Model, NewPokemon, PokemonPatch, PokemonSummary};
use serde::Deserialize;
use service::pagination::Pagination;
use tracing::info;

use crate::{errors::JsonApiError, state::ServerState};

#[derive(Debug, Default, Deserialize, utoipa::IntoParams)]
#[into_params(parameter_in = Query)]
pub struct ListQuery {
    /// page size, >= 1
    pub limit: Option<u64>,
    pub offset: Option<u64>,
}

impl From<ListQuery> for Pagination {
    fn from(q: ListQuery) -> Self { Pagination { limit: q.limit, offset: q.offset } }
}

#[utoipa::path(
    post, path = "/api/v2/pokemon", tag = "pokemon",
    request_body = crate::openapi::CreatePokemonDoc,
    responses(
        (status = 201, description = "Created"),
        (status = 400, description = "Validation Error or Duplicate Entity"),
        (status = 500, description = "Create Failed")
    )
)]
pub async fn create(State(state): State<ServerState>, Json(input): Json<NewPokemon>) -> Result<(StatusCode, Json<Model>), JsonApiError> {
    pokemon::validate_name(&input.name)?;
    pokemon::validate_no(input.no)?;
    let created = state.pokemon.create(input).await?;
    Ok((StatusCode::CREATED, Json(created)))
}

#[utoipa::path(
    get, path = "/api/v2/pokemon", tag = "pokemon",
    params(ListQuery),
    responses(
        (status = 200, description = "List OK"),
        (status = 400, description = "Validation Error")
    )
)]
pub async fn list(State(state): State<ServerState>, Query(q): Query<ListQuery>) -> Result<Json<Vec<PokemonSummary>>, JsonApiError> {
    let rows = state.pokemon.list(q.into()).await?;
    Ok(Json(rows))
}

#[utoipa::path(
    get, path = "/api/v2/pokemon/{term}", tag = "pokemon",
    params(("term" = String, Path, description = "Catalog number, id or name")),
    responses(
        (status = 200, description = "OK"),
        (status = 404, description = "Not Found")
    )
)]
pub async fn find_one(State(state): State<ServerState>, Path(term): Path<String>) -> Result<Json<Model>, JsonApiError> {
    Ok(Json(state.pokemon.find_one(&term).await?))
}

#[utoipa::path(
    patch, path = "/api/v2/pokemon/{term}", tag = "pokemon",
    params(("term" = String, Path, description = "Catalog number, id or name")),
    request_body = crate::openapi::UpdatePokemonDoc,
    responses(
        (status = 200, description = "Updated"),
        (status = 400, description = "Validation Error or Duplicate Entity"),
        (status = 404, description = "Not Found"),
        (status = 500, description = "Update Failed")
    )
)]
pub async fn update(State(state): State<ServerState>, Path(term): Path<String>, Json(patch): Json<PokemonPatch>) -> Result<Json<Model>, JsonApiError> {
    if let Some(name) = patch.name.as_deref() { pokemon::validate_name(name)?; }
    if let Some(no) = patch.no { pokemon::validate_no(no)?; }
    let updated = state.pokemon.update(&term, patch).await?;
    Ok(Json(updated))
}

#[utoipa::path(
    delete, path = "/api/v2/pokemon/{term}", tag = "pokemon",
    params(("term" = String, Path, description = "Store id of the record to delete")),
    responses(
        (status = 204, description = "Deleted"),
        (status = 404, description = "Not Found"),
        (status = 500, description = "Delete Failed")
    )
)]
pub async fn delete(State(state): State<ServerState>, Path(id): Path<String>) -> Result<StatusCode, JsonApiError> {
    state.pokemon.remove(&id).await?;
    info!(%id, "deleted pokemon");
    Ok(StatusCode::NO_CONTENT)
}
