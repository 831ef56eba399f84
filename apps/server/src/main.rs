use anyhow::Context;
use clap::{Parser, Subcommand};
use tokio::net::TcpListener;
use tracing::info;
use zccore_backend_runtime::{migrate_database, telemetry, BackendServices};
use zccore_config::{load as load_config, AppConfig, StoreBackend};
use zccore_gateway::{build_router, AppState};

#[derive(Parser)]
#[command(name = "zccore-backend")]
#[command(about = "zccore users, organizations and memberships backend")]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the HTTP server (default)
    Serve,
    /// Create the SQLite document table and unique indexes, then exit
    Migrate,
    /// Print the resolved configuration as JSON
    ShowConfig,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let config = load_config().context("failed to load configuration")?;

    match cli.command.unwrap_or(Commands::Serve) {
        Commands::Serve => run_server(config).await,
        Commands::Migrate => run_migrations(config).await,
        Commands::ShowConfig => show_config(&config),
    }
}

async fn run_server(config: AppConfig) -> anyhow::Result<()> {
    telemetry::init_tracing(&config.logging).context("failed to initialise tracing")?;

    info!("starting zccore backend");

    let services = BackendServices::initialise(&config)
        .await
        .context("failed to initialise backend services")?;

    let app = build_router(AppState::new(services.store.clone()));

    let address = format!("{}:{}", config.http.address, config.http.port);
    let listener = TcpListener::bind(&address)
        .await
        .with_context(|| format!("failed to bind http listener on {address}"))?;

    info!(%address, backend = services.backend.as_str(), "http server listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(zccore_backend_runtime::shutdown_signal())
        .await
        .context("http server error")?;

    info!("backend shut down");
    Ok(())
}

async fn run_migrations(config: AppConfig) -> anyhow::Result<()> {
    telemetry::init_tracing(&config.logging).context("failed to initialise tracing")?;

    if config.database.backend != StoreBackend::Sqlite {
        info!(backend = config.database.backend.as_str(), "nothing to migrate");
        return Ok(());
    }

    let pool = migrate_database(&config.database).await?;
    pool.close().await;

    println!("Document store ready at {}", config.database.url);
    Ok(())
}

fn show_config(config: &AppConfig) -> anyhow::Result<()> {
    let rendered =
        serde_json::to_string_pretty(config).context("failed to serialise configuration")?;
    println!("{rendered}");
    Ok(())
}
