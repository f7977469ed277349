//! xpayroll server entry point
//!
//! Loads configuration, opens the database, prepares the shared ledger
//! client and serves the HTTP API. Missing signing-key or issuer-seed
//! configuration aborts startup instead of serving degraded traffic.

use xpayroll::api;
use xpayroll::config::Config;
use xpayroll::state::AppState;

type BoxError = Box<dyn std::error::Error + Send + Sync>;

#[tokio::main]
async fn main() -> Result<(), BoxError> {
    // Load .env file
    let _ = dotenvy::dotenv();

    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "xpayroll=info,tower_http=info".into()),
        )
        .init();

    let config = Config::from_env()?;

    tracing::info!("Starting xpayroll (env: {})", config.environment);

    let state = AppState::new(&config).await?;
    let app = api::create_router(state);

    let addr = format!("0.0.0.0:{}", config.http_port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!("xpayroll listening on {addr}");

    axum::serve(listener, app).await?;

    Ok(())
}
