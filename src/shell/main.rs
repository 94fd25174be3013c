use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing_subscriber::{EnvFilter, fmt};

use generator_log::shell::config::AppConfig;
use generator_log::shell::http::router;
use generator_log::shell::state::{AppState, connect_store};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    fmt().with_env_filter(EnvFilter::from_default_env()).init();

    let config = AppConfig::from_env().unwrap_or_else(|error| {
        tracing::error!(%error, "invalid configuration");
        std::process::exit(1);
    });

    let store = connect_store(&config.storage).unwrap_or_else(|error| {
        tracing::error!(%error, storage = ?config.storage, "could not open the entry store");
        std::process::exit(1);
    });
    tracing::info!(storage = ?config.storage, "entry store ready");

    let app = router(AppState::with_store(store))
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http());

    let addr = config.bind_address();
    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!("Backend running at http://{}", addr);
    axum::serve(listener, app).await?;
    Ok(())
}
