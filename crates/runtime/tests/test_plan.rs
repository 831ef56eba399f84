use std::{path::Path, time::Duration};

use anyhow::{Context, Result};
use serde_json::json;
use tempfile::TempDir;
use tokio::time::{sleep, timeout};
use zccore_backend_runtime::{self, migrate_database, BackendServices};
use zccore_config::{AppConfig, LoggingConfig, StoreBackend};
use zccore_database::{collections, document_id, Document, Filter};

fn sqlite_url(path: &Path) -> String {
    format!("sqlite://{}", path.to_string_lossy())
}

fn build_config(database_url: String, max_connections: u32) -> AppConfig {
    let mut config = AppConfig::default();
    config.database.url = database_url;
    config.database.max_connections = max_connections;
    config
}

async fn initialise(config: &AppConfig) -> Result<BackendServices> {
    BackendServices::initialise(config)
        .await
        .context("failed to initialise backend services")
}

fn user_document(email: &str) -> Document {
    match json!({"email": email, "created_at": "2021-06-01T00:00:00+00:00"}) {
        serde_json::Value::Object(map) => map,
        _ => unreachable!(),
    }
}

#[tokio::test(flavor = "multi_thread")]
async fn initialise_creates_document_table_and_indexes() -> Result<()> {
    let temp_dir = TempDir::new()?;
    let db_path = temp_dir.path().join("runtime/init.db");
    let config = build_config(sqlite_url(&db_path), 4);

    let services = initialise(&config).await?;
    assert_eq!(services.backend, StoreBackend::Sqlite);
    let pool = services.db_pool.as_ref().context("sqlite backend exposes its pool")?;

    let table: String = sqlx::query_scalar(
        "SELECT name FROM sqlite_master WHERE type = 'table' AND name = 'documents'",
    )
    .fetch_one(pool)
    .await?;
    assert_eq!("documents", table);

    let indexes: Vec<String> = sqlx::query_scalar(
        "SELECT name FROM sqlite_master WHERE type = 'index' AND name LIKE 'idx_%' ORDER BY name",
    )
    .fetch_all(pool)
    .await?;
    assert!(indexes.contains(&"idx_members_org_email".to_string()));
    assert!(indexes.contains(&"idx_users_email".to_string()));

    Ok(())
}

#[tokio::test(flavor = "multi_thread")]
async fn sqlite_store_persists_across_initialisations() -> Result<()> {
    let temp_dir = TempDir::new()?;
    let db_path = temp_dir.path().join("persist.db");
    let config = build_config(sqlite_url(&db_path), 2);

    let first = initialise(&config).await?;
    let created = first
        .store
        .insert_one(collections::USERS, user_document("a@example.com"))
        .await?;
    let id = document_id(&created).context("inserted document has an id")?.to_string();
    drop(first);

    let second = initialise(&config).await?;
    let found = second
        .store
        .find_one(collections::USERS, &Filter::new().eq("_id", id))
        .await?;
    assert_eq!(found, Some(created));
    Ok(())
}

#[tokio::test(flavor = "multi_thread")]
async fn memory_backend_skips_sqlite() -> Result<()> {
    let temp_dir = TempDir::new()?;
    let db_path = temp_dir.path().join("unused/never.db");
    let mut config = build_config(sqlite_url(&db_path), 1);
    config.database.backend = StoreBackend::Memory;

    let services = initialise(&config).await?;
    assert!(services.db_pool.is_none());
    assert!(!db_path.exists());

    services
        .store
        .insert_one(collections::USERS, user_document("a@example.com"))
        .await?;
    let duplicate = services
        .store
        .insert_one(collections::USERS, user_document("a@example.com"))
        .await;
    assert!(matches!(duplicate, Err(error) if error.is_duplicate()));
    Ok(())
}

#[tokio::test(flavor = "multi_thread")]
async fn prepare_database_creates_sqlite_directory_if_missing() -> Result<()> {
    let temp_dir = TempDir::new()?;
    let db_dir = temp_dir.path().join("nested");
    let db_path = db_dir.join("prepared.db");
    let config = build_config(sqlite_url(&db_path), 2);

    assert!(!db_dir.exists());

    let pool = migrate_database(&config.database).await?;
    assert!(db_dir.exists(), "database directory should be created");
    assert!(db_path.exists(), "sqlite database file should be created");
    drop(pool);
    Ok(())
}

#[tokio::test(flavor = "multi_thread")]
async fn prepare_database_applies_max_connections_setting() -> Result<()> {
    let temp_dir = TempDir::new()?;
    let db_path = temp_dir.path().join("runtime/max_conn.db");
    let max_connections = 3;
    let config = build_config(sqlite_url(&db_path), max_connections);

    let pool = migrate_database(&config.database).await?;
    assert_eq!(max_connections, pool.options().get_max_connections());
    Ok(())
}

#[tokio::test(flavor = "multi_thread")]
async fn non_sqlite_urls_fail_with_context() -> Result<()> {
    let temp_dir = TempDir::new()?;
    let target_dir = temp_dir.path().join("should_not_exist");
    let malformed_url = format!("postgres://{}/ignored.db", target_dir.to_string_lossy());
    let config = build_config(malformed_url, 1);

    let error = match BackendServices::initialise(&config).await {
        Ok(_) => panic!("expected sqlite connection to fail for non-sqlite URL"),
        Err(error) => error,
    };
    assert!(!target_dir.exists());
    assert!(
        error.to_string().contains("failed to prepare document store"),
        "unexpected error: {error:#}"
    );
    Ok(())
}

#[test]
fn telemetry_init_tracing_sets_global_subscriber() {
    let logging = LoggingConfig::default();
    zccore_backend_runtime::telemetry::init_tracing(&logging)
        .expect("first initialisation should succeed");

    let second = zccore_backend_runtime::telemetry::init_tracing(&logging);
    assert!(
        second.is_err(),
        "initialising telemetry twice should fail with global subscriber already set"
    );
}

#[tokio::test(flavor = "multi_thread")]
#[cfg_attr(not(unix), ignore = "requires Unix signal handling")]
async fn shutdown_signal_completes_on_ctrl_c_notification() -> Result<()> {
    let shutdown_task = tokio::spawn(async { zccore_backend_runtime::shutdown_signal().await });

    sleep(Duration::from_millis(50)).await;
    #[cfg(unix)]
    unsafe {
        libc::raise(libc::SIGINT);
    }

    timeout(Duration::from_secs(2), shutdown_task).await??;
    Ok(())
}
