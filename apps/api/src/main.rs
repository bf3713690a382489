mod analysis;
mod backend_client;
mod config;
mod errors;
mod routes;
mod state;
mod submission;

use anyhow::{Context, Result};
use std::net::SocketAddr;
use std::sync::Arc;
use tower::ServiceBuilder;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::backend_client::HttpBackend;
use crate::config::Config;
use crate::routes::build_router;
use crate::state::AppState;
use crate::submission::builder::SubmissionBuilder;

#[tokio::main]
async fn main() -> Result<()> {
    let config = Config::from_env()?;

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!("{}={}", env!("CARGO_CRATE_NAME"), &config.rust_log))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting Resume Analyzer v{}", env!("CARGO_PKG_VERSION"));
    config.warn_missing();

    let backend = HttpBackend::new().context("Failed to build HTTP client")?;
    let endpoints = config.endpoints();
    info!(
        "Backends: upload={} analyze={}",
        endpoints.upload_url(),
        endpoints.analyze_url()
    );

    let state = AppState {
        submitter: SubmissionBuilder::new(endpoints, Arc::new(backend)),
    };

    // The upload page is served from a different origin.
    let app = build_router(state).layer(
        ServiceBuilder::new()
            .layer(TraceLayer::new_for_http())
            .layer(CorsLayer::permissive()),
    );

    let addr: SocketAddr = format!("0.0.0.0:{}", config.port).parse()?;
    info!("Listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
