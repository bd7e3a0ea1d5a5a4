use std::net::SocketAddr;
use std::sync::Arc;

use common::http::{mock::MockHttpAdapter, HttpAdapter};
use configs::AppConfig;
use reqwest::StatusCode as HttpStatusCode;
use serde_json::json;
use service::pokemon::repository::{mock::MockPokemonRepository, PokemonRepository};
use tokio::net::TcpListener;

use server::{routes, state::ServerState};

struct TestApp {
    base_url: String,
}

/// Serve the router on an ephemeral port over the in-memory store.
async fn start_server() -> anyhow::Result<TestApp> {
    let repo: Arc<dyn PokemonRepository> = Arc::new(MockPokemonRepository::default());
    let http: Arc<dyn HttpAdapter> = Arc::new(MockHttpAdapter::ok(json!({"results": [
        {"name": "bulbasaur", "url": "https://pokeapi.co/api/v2/pokemon/1/"},
        {"name": "ivysaur", "url": "https://pokeapi.co/api/v2/pokemon/2/"},
        {"name": "venusaur", "url": "https://pokeapi.co/api/v2/pokemon/3/"}
    ]})));
    let state = ServerState::new(repo, http, &AppConfig::default());
    let app = routes::build_router(state, tower_http::cors::CorsLayer::very_permissive());

    let listener = TcpListener::bind((std::net::Ipv4Addr::LOCALHOST, 0)).await?;
    let addr: SocketAddr = listener.local_addr()?;
    let base_url = format!("http://{}:{}", addr.ip(), addr.port());

    tokio::spawn(async move {
        if let Err(e) = axum::serve(listener, app).await { eprintln!("server error: {}", e); }
    });

    Ok(TestApp { base_url })
}

#[tokio::test]
async fn e2e_seed_then_browse() -> anyhow::Result<()> {
    let app = start_server().await?;
    let c = reqwest::Client::new();

    let res = c.get(format!("{}/api/v2/seed", app.base_url)).send().await?;
    assert_eq!(res.status(), HttpStatusCode::OK);
    assert_eq!(res.text().await?, "Seed executed");

    let res = c.get(format!("{}/api/v2/pokemon?limit=2", app.base_url)).send().await?;
    assert_eq!(res.status(), HttpStatusCode::OK);
    let page = res.json::<serde_json::Value>().await?;
    assert_eq!(page.as_array().map(|a| a.len()), Some(2));
    assert_eq!(page[0]["name"], "bulbasaur");
    assert_eq!(page[1]["name"], "ivysaur");

    let res = c.get(format!("{}/api/v2/pokemon/%20Venusaur%20", app.base_url)).send().await?;
    assert_eq!(res.status(), HttpStatusCode::OK);
    let found = res.json::<serde_json::Value>().await?;
    assert_eq!(found["no"], 3);
    Ok(())
}

#[tokio::test]
async fn e2e_openapi_document_served() -> anyhow::Result<()> {
    let app = start_server().await?;
    let res = reqwest::get(format!("{}/api-docs/openapi.json", app.base_url)).await?;
    assert_eq!(res.status(), HttpStatusCode::OK);
    let doc = res.json::<serde_json::Value>().await?;
    assert!(doc["paths"]["/api/v2/seed"].is_object());
    Ok(())
}
