use std::sync::Arc;

use anyhow::{Context, Result};
use sqlx::SqlitePool;
use tracing::info;
use zccore_config::{AppConfig, DatabaseConfig, StoreBackend};
use zccore_database::{initialize_database, DocumentStore, MemoryDocumentStore, SqliteDocumentStore};

pub mod telemetry {
    use anyhow::Result;
    use tracing_subscriber::{fmt::SubscriberBuilder, EnvFilter};
    use zccore_config::LoggingConfig;

    /// Install the global subscriber. `RUST_LOG` wins over the configured level.
    pub fn init_tracing(logging: &LoggingConfig) -> Result<()> {
        let env_filter = EnvFilter::try_from_default_env()
            .or_else(|_| EnvFilter::try_new(&logging.level))
            .unwrap_or_else(|_| EnvFilter::new("info"));

        let subscriber = SubscriberBuilder::default()
            .with_env_filter(env_filter)
            .finish();

        tracing::subscriber::set_global_default(subscriber)
            .map_err(|error| anyhow::anyhow!("failed to set tracing subscriber: {error}"))
    }
}

#[derive(Clone)]
pub struct BackendServices {
    pub store: Arc<dyn DocumentStore>,
    pub backend: StoreBackend,
    /// Present when the store is SQLite backed.
    pub db_pool: Option<SqlitePool>,
}

impl BackendServices {
    pub async fn initialise(config: &AppConfig) -> Result<Self> {
        let services = match config.database.backend {
            StoreBackend::Sqlite => {
                let pool = migrate_database(&config.database).await?;
                Self {
                    store: Arc::new(SqliteDocumentStore::new(pool.clone())),
                    backend: StoreBackend::Sqlite,
                    db_pool: Some(pool),
                }
            }
            StoreBackend::Memory => Self {
                store: Arc::new(MemoryDocumentStore::with_default_indexes()),
                backend: StoreBackend::Memory,
                db_pool: None,
            },
        };

        info!(backend = services.backend.as_str(), "document store ready");
        Ok(services)
    }
}

/// Connect to the SQLite database and create the document table and indexes.
pub async fn migrate_database(config: &DatabaseConfig) -> Result<SqlitePool> {
    initialize_database(config)
        .await
        .with_context(|| format!("failed to prepare document store at {}", config.url))
}

pub async fn shutdown_signal() {
    if let Err(error) = tokio::signal::ctrl_c().await {
        tracing::warn!(?error, "failed to listen for shutdown signal");
    }
    info!("shutdown signal received");
}
