//! Main entry point for the trivia backend.
//!
//! This file loads settings, initializes logging, opens the question store,
//! and serves the API router.

use std::sync::Arc;

use tracing_subscriber::EnvFilter;
use trivia_backend::config::Settings;
use trivia_backend::services::random;
use trivia_backend::{build_router, database, TriviaService};

fn init_tracing(default_level: &str) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt().with_env_filter(filter).with_target(false).compact().init();
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let settings = Settings::from_env()?;
    init_tracing(&settings.log_level);

    let store = database::connect(&settings).await?;
    let service = Arc::new(TriviaService::new(store, random::from_seed(settings.random_seed)));
    let app = build_router(service);

    let addr = settings.address();
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!("listening on {}", addr);

    axum::serve(listener, app).await?;
    Ok(())
}
