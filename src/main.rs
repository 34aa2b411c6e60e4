use axum::{Extension, Router};
use std::sync::Arc;
use tokio::net::TcpListener;
use tower_http::{
    compression::CompressionLayer,
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use geogate::{
    api::{capabilities, collections, conformance, landing},
    catalog::MemoryCatalog,
    config::Config,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            "geogate=debug,tower_http=debug,axum::rejection=trace".into()
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Load configuration
    let config = Config::load()?;

    // Seed the catalog
    let catalog = Arc::new(MemoryCatalog::new(config.collections.clone()));
    tracing::info!(
        "Catalog seeded with {} collections",
        config.collections.len()
    );

    let app = build_router(config.clone(), catalog);

    // Start server
    let addr = format!("{}:{}", config.host, config.port);
    let listener = TcpListener::bind(&addr).await?;
    tracing::info!("Listening on {}", addr);

    axum::serve(listener, app).await?;

    Ok(())
}

fn build_router(config: Arc<Config>, catalog: Arc<MemoryCatalog>) -> Router {
    Router::new()
        .merge(landing::routes())
        .merge(conformance::routes())
        .merge(collections::routes(catalog.clone()))
        .merge(capabilities::routes(catalog))
        .layer(Extension(config))
        .layer(CompressionLayer::new())
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .layer(TraceLayer::new_for_http())
}
