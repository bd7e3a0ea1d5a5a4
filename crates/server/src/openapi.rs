use utoipa::OpenApi;
use utoipa::ToSchema;
use uuid::Uuid;

#[derive(ToSchema)]
pub struct HealthResponse { pub status: String }

#[derive(ToSchema)]
pub struct CreatePokemonDoc { pub name: String, pub no: i32 }

#[derive(ToSchema)]
pub struct UpdatePokemonDoc { pub name: Option<String>, pub no: Option<i32> }

#[derive(ToSchema)]
pub struct PokemonDoc {
    pub id: Uuid,
    pub name: String,
    pub no: i32,
    pub version: i32,
    pub created_at: String,
    pub updated_at: String,
}

#[derive(ToSchema)]
pub struct PokemonSummaryDoc { pub id: Uuid, pub name: String, pub no: i32 }

#[derive(OpenApi)]
#[openapi(
    paths(
        crate::routes::health,
        crate::routes::pokemon::create,
        crate::routes::pokemon::list,
        crate::routes::pokemon::find_one,
        crate::routes::pokemon::update,
        crate::routes::pokemon::delete,
        crate::routes::seed::execute,
    ),
    components(
        schemas(
            HealthResponse,
            CreatePokemonDoc,
            UpdatePokemonDoc,
            PokemonDoc,
            PokemonSummaryDoc,
        )
    ),
    tags(
        (name = "health"),
        (name = "pokemon"),
        (name = "seed")
    )
)]
pub struct ApiDoc;
