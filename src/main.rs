use snackworld_admin::app::{self, AppState};
use snackworld_admin::config;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env if present so cargo run picks up SNACKWORLD_PORT, AUTH_*, etc.
    let _ = dotenvy::dotenv();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("snackworld_admin=info,tower_http=info")),
        )
        .init();

    // Initialize configuration (this loads the config singleton)
    let config = config::config().clone();
    tracing::info!(
        "Starting Snack World admin API in {:?} mode (token mode: {:?}, unit value: {})",
        config.environment,
        config.auth.token_mode,
        config.stats.unit_value
    );
    if !config.catalog.guard_catalog_writes {
        tracing::warn!("Catalog writes on /api/cajas are not behind the bearer guard (CATALOG_GUARD_WRITES=false)");
    }

    let bind_addr = format!("0.0.0.0:{}", config.server.port);
    let listener = tokio::net::TcpListener::bind(&bind_addr)
        .await
        .map_err(|e| anyhow::anyhow!("failed to bind {}: {}", bind_addr, e))?;

    tracing::info!("Snack World admin API listening on http://{}", bind_addr);

    app::serve(listener, AppState::new(config)).await?;
    Ok(())
}
