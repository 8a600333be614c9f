//src/main.rs

use anyhow::Context;
use tokio::net::TcpListener;
use tracing_subscriber::EnvFilter;

use asset_allocation::{
    config::{AppState, Config},
    db::PgStore,
    router::router,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_target(false)
        .compact()
        .init();

    let config = Config::from_env()?;

    let store = PgStore::connect(&config)
        .await
        .context("Failed to connect to the database")?;

    sqlx::migrate!()
        .run(store.pool())
        .await
        .context("Failed to run database migrations")?;

    tracing::info!("✅ Database migrations applied");

    let app = router(AppState::new(store, config.retry));

    let listener = TcpListener::bind(config.bind_addr)
        .await
        .with_context(|| format!("Failed to bind {}", config.bind_addr))?;
    tracing::info!("🚀 Server listening on {}", listener.local_addr()?);

    axum::serve(listener, app).await.context("Axum server error")?;
    Ok(())
}
