use routedoc::prelude::*;
use routedoc::http::{routing, Method};
use tower_http::trace::TraceLayer;
use tracing_subscriber::EnvFilter;

mod handlers;
mod models;
mod state;

use models::ErrorBody;
use state::PetStore;

const DEFAULT_ADDR: &str = "127.0.0.1:3000";

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info,tower_http=debug,routedoc_core=debug"));
    tracing_subscriber::fmt().with_env_filter(filter).init();
}

fn openapi_config() -> Result<OpenApiConfig, routedoc::ConfigError> {
    Ok(OpenApiConfig::from_yaml_str(include_str!("../openapi.yaml"))?
        .with_docs_ui(true)
        .with_yaml_path("/openapi.yaml")
        .exclude_path("/healthz")
        .with_default(
            RouteMethod::All,
            describe_route().response_with::<ErrorBody>(500, "Unexpected error"),
        )
        .with_default(
            Method::POST,
            describe_route().response_with::<ErrorBody>(400, "Malformed request"),
        ))
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Does not overwrite variables already set in the environment.
    let _ = dotenvy::dotenv();
    init_tracing();

    let app = handlers::routes()
        .undocumented("/healthz", routing::get(|| async { "OK" }))
        .layer(TraceLayer::new_for_http())
        .with_openapi(openapi_config()?)
        .with_state(PetStore::default());

    let addr = std::env::var("ROUTEDOC_ADDR").unwrap_or_else(|_| DEFAULT_ADDR.to_string());
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!(%addr, "Petstore listening, docs at /docs");
    axum::serve(listener, app).await?;
    Ok(())
}
