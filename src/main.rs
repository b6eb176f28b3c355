use std::sync::Arc;

use anyhow::Context;
use clap::{Parser, Subcommand};
use tokio::{net::TcpListener, signal};
use tracing::info;
use tracing_subscriber::EnvFilter;

use customer_api::auth::StaticSecret;
use customer_api::config::{self, AppConfig};
use customer_api::database::{CustomerStore, DatabaseManager, PgCustomerStore};
use customer_api::router::{self, AppState};

#[derive(Parser)]
#[command(name = "customer-api")]
#[command(about = "Customer CRUD service backed by PostgreSQL")]
#[command(version)]
struct Cli {
    #[arg(long, global = true, help = "Port to listen on (overrides CUSTOMER_API_PORT/PORT)")]
    port: Option<u16>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    #[command(about = "Create the customers table if needed and serve HTTP (default)")]
    Serve,

    #[command(about = "Create the customers table if needed and exit")]
    InitDb,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env if present so cargo run picks up DATABASE_URL, AUTH_TOKEN, etc.
    let _ = dotenvy::dotenv();

    let cli = Cli::parse();
    let config = config::config();

    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.log_level));
    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_target(false)
        .init();

    info!("Starting Customer API in {:?} mode", config.environment);

    let pool = DatabaseManager::connect(&config.database)
        .await
        .context("failed to connect to database")?;
    let store = PgCustomerStore::new(pool.clone());

    store
        .ensure_schema()
        .await
        .context("failed to create customers table")?;
    info!("customers table ready");

    match cli.command.unwrap_or(Commands::Serve) {
        Commands::InitDb => {}
        Commands::Serve => serve(config, cli.port, store).await?,
    }

    pool.close().await;
    Ok(())
}

async fn serve(config: &AppConfig, port: Option<u16>, store: PgCustomerStore) -> anyhow::Result<()> {
    let state = AppState::new(
        Arc::new(store),
        Arc::new(StaticSecret::new(config.security.auth_token.clone())),
    );
    let app = router::app(state, &config.api, &config.security);

    let port = port.unwrap_or(config.server.port);
    let bind_addr = format!("{}:{}", config.server.host, port);
    let listener = TcpListener::bind(&bind_addr)
        .await
        .with_context(|| format!("failed to bind {}", bind_addr))?;

    info!("Customer API listening on http://{}", bind_addr);
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;
    info!("Server has shut down gracefully.");
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            tracing::error!("failed to listen for Ctrl+C: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sig) => {
                sig.recv().await;
            }
            Err(e) => {
                tracing::error!("failed to install SIGTERM handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
}
