//! Wardline REST API server binary.
//!
//! Resolves configuration from the environment once at startup, opens the
//! registry (loading snapshots when a data directory is configured), seeds
//! the bed pool if it is empty, and serves the REST API.

use api_rest::auth::AuthConfig;
use api_rest::AppState;
use std::path::PathBuf;
use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use wardline_core::{seed_beds, standard_seed, CoreConfig, Registry, DEFAULT_SEED_BED_COUNT};

/// Main entry point for the Wardline REST API server.
///
/// # Environment Variables
/// - `WARDLINE_ADDR`: server address (default: "0.0.0.0:5000")
/// - `WARDLINE_DATA_DIR`: directory for JSON snapshots (default: in-memory only)
/// - `WARDLINE_JWT_SECRET`: token signing secret (required outside development)
/// - `WARDLINE_TOKEN_TTL_HOURS`: token lifetime (default: 168, i.e. 7 days)
/// - `WARDLINE_SEED_BEDS`: beds to provision when the pool is empty
///   (default: 50; 0 disables seeding)
///
/// # Errors
/// Returns an error if:
/// - the logging/tracing configuration cannot be initialised,
/// - the configured data directory is missing or its snapshots are corrupt,
/// - the server address cannot be bound, or
/// - the HTTP server fails while running.
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("api_rest=info".parse()?)
                .add_directive("wardline_core=info".parse()?),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let addr = std::env::var("WARDLINE_ADDR").unwrap_or_else(|_| "0.0.0.0:5000".into());

    let data_dir = std::env::var("WARDLINE_DATA_DIR").ok().map(PathBuf::from);
    let seed_count = match std::env::var("WARDLINE_SEED_BEDS") {
        Ok(value) => value.parse::<usize>()?,
        Err(_) => DEFAULT_SEED_BED_COUNT,
    };

    let secret = std::env::var("WARDLINE_JWT_SECRET").unwrap_or_else(|_| {
        tracing::warn!("WARDLINE_JWT_SECRET not set, using development secret");
        "wardline-dev-secret".into()
    });
    let token_ttl_hours = match std::env::var("WARDLINE_TOKEN_TTL_HOURS") {
        Ok(value) => value.parse::<i64>()?,
        Err(_) => 168,
    };

    let cfg = CoreConfig::new(data_dir, seed_count)?;
    let registry = Arc::new(Registry::open(&cfg)?);

    if cfg.seed_bed_count() > 0 {
        let seeded = seed_beds(&registry, &standard_seed(cfg.seed_bed_count()))?;
        if seeded > 0 {
            tracing::info!("provisioned {seeded} beds");
        }
    }

    let state = AppState::new(registry, AuthConfig::new(secret, token_ttl_hours));

    tracing::info!("-- Starting Wardline REST API on {}", addr);

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, api_rest::app(state)).await?;

    Ok(())
}
