use std::sync::Arc;

use anyhow::Context;
use sqlx::PgPool;
use tracing_subscriber::EnvFilter;

use user_api_rust::config::{self, is_valid_table_name, StoreBackend};
use user_api_rust::database::{DatabaseManager, MemoryUserStore, PgUserStore, UserStore};
use user_api_rust::routes;
use user_api_rust::state::AppState;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env if present so cargo run picks up DATABASE_URL, USER_TABLE, etc.
    let _ = dotenvy::dotenv();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info,tower_http=info")),
        )
        .init();

    let config = config::config();
    tracing::info!("Starting user API in {:?} mode", config.environment);

    // Table check or connection failure halts startup
    let (store, pool) = open_store(config).await?;
    let app = routes::app(AppState::new(store), config);

    let bind_addr = config.bind_addr();
    let listener = tokio::net::TcpListener::bind(&bind_addr)
        .await
        .with_context(|| format!("failed to bind {}", bind_addr))?;

    tracing::info!("User API listening on http://{}", bind_addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("server")?;

    if let Some(pool) = pool {
        DatabaseManager::close(&pool).await;
    }
    tracing::info!("User API stopped");
    Ok(())
}

async fn open_store(
    config: &config::AppConfig,
) -> anyhow::Result<(Arc<dyn UserStore>, Option<PgPool>)> {
    let db = &config.database;
    if !is_valid_table_name(&db.table_name) {
        anyhow::bail!("invalid table name '{}'", db.table_name);
    }

    match db.backend {
        StoreBackend::Memory => {
            tracing::warn!("Using in-memory user store; records are lost on restart");
            Ok((Arc::new(MemoryUserStore::new()), None))
        }
        StoreBackend::Postgres => {
            let pool = DatabaseManager::connect(db)
                .await
                .context("failed to open database")?;
            DatabaseManager::ensure_table(&pool, &db.table_name)
                .await
                .context("failed to initialize user table")?;
            tracing::info!("Database initialized (table '{}')", db.table_name);

            let store = PgUserStore::new(pool.clone(), &db.table_name)?
                .with_query_logging(db.enable_query_logging);
            Ok((Arc::new(store), Some(pool)))
        }
    }
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
    tracing::info!("Shutdown signal received");
}
