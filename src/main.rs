use std::sync::Arc;

use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use nautical_admin::api::app;
use nautical_admin::config::AppConfig;
use nautical_admin::db::SqliteDocumentStore;
use nautical_admin::state::AppState;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG")
                .unwrap_or_else(|_| "nautical_admin=debug,tower_http=info".to_string()),
        ))
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = AppConfig::from_env()?;

    let store = SqliteDocumentStore::connect(&config.database_url, config.max_connections).await?;

    let addr = config.socket_addr();
    let state = AppState::new(Arc::new(store), config);

    let app = app(state);

    info!("listening on http://{}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
