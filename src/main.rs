use anyhow::Context;
use dotenvy::dotenv;
use schooldesk::router::init_router;
use schooldesk::state::{AppConfig, init_app_state};
use schooldesk_config::{DatabaseConfig, ServerConfig};
use schooldesk_db::{init_db_pool, run_migrations};
use schooldesk_observability::{LoggingConfig, init_logging, init_metrics};
use tracing::info;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv().ok();

    init_logging(&LoggingConfig::from_env())?;

    // Fatal configuration problems surface before the database is touched.
    let app_config = AppConfig::from_env()?;
    let server_config = ServerConfig::from_env();
    let db_config = DatabaseConfig::from_env()?;

    let pool = init_db_pool(&db_config)
        .await
        .context("Failed to connect to database")?;
    run_migrations(&pool)
        .await
        .context("Failed to run database migrations")?;

    let state = init_app_state(app_config, pool);
    let metrics = init_metrics(server_config.metrics_enabled)?;
    let app = init_router(state, metrics);

    let listener = tokio::net::TcpListener::bind(&server_config.bind_addr)
        .await
        .with_context(|| format!("Failed to bind {}", server_config.bind_addr))?;
    info!(addr = %server_config.bind_addr, "Server listening");

    axum::serve(listener, app).await?;
    Ok(())
}
