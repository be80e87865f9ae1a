//! Server entry point: settings, store connection, then listen. Any startup failure exits
//! before the listener is bound.

use infinity_api::{app, connect, AppState, ResourceRegistry, Settings};
use std::time::Instant;
use tokio::net::TcpListener;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let started_at = Instant::now();
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("infinity_api=info")),
        )
        .init();

    let settings = Settings::from_env()?;
    let registry = ResourceRegistry::builtin()?;
    let store = connect(&settings, &registry.collections()).await?;
    tracing::info!(backend = store.backend(), database = %settings.database, "connected to document store");

    let state = AppState::new(store, registry, started_at);
    let router = app(state, &settings);

    let listener = TcpListener::bind(settings.listen_addr()).await?;
    tracing::info!("listening on {}", listener.local_addr()?);
    axum::serve(listener, router).await?;
    Ok(())
}
