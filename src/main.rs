//! Chirpy Server
//!
//! Entry point that loads configuration, sets up logging and either serves
//! the HTTP API or applies database migrations.

use clap::{Parser, Subcommand};
use tracing_subscriber::{EnvFilter, fmt};

use chirpy_core::config::{AppConfig, LogFormat, LoggingConfig};
use chirpy_core::error::AppError;
use chirpy_database::{DatabasePool, Repositories};

#[derive(Debug, Parser)]
#[command(name = "chirpy-server", version, about = "Chirpy microblogging API server")]
struct Cli {
    /// Configuration overlay to load from `config/<env>.toml`
    #[arg(long, env = "CHIRPY_ENV", default_value = "development")]
    env: String,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Run the HTTP server (default)
    Serve,
    /// Apply pending database migrations and exit
    Migrate,
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    let config = match AppConfig::load(&cli.env) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Failed to load configuration: {e}");
            std::process::exit(1);
        }
    };

    init_logging(&config.logging);
    tracing::info!(env = %cli.env, "Configuration loaded");

    let result = match cli.command.unwrap_or(Command::Serve) {
        Command::Serve => serve(config).await,
        Command::Migrate => migrate(config).await,
    };

    if let Err(e) = result {
        tracing::error!(error = %e, "Chirpy server error");
        std::process::exit(1);
    }
}

/// Initialize tracing/logging
fn init_logging(config: &LoggingConfig) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.level));

    match config.format {
        LogFormat::Json => {
            fmt()
                .json()
                .with_env_filter(filter)
                .with_target(true)
                .with_thread_ids(true)
                .init();
        }
        LogFormat::Pretty => {
            fmt()
                .pretty()
                .with_env_filter(filter)
                .with_target(true)
                .init();
        }
    }
}

async fn serve(config: AppConfig) -> Result<(), AppError> {
    tracing::info!("Starting Chirpy v{}", env!("CARGO_PKG_VERSION"));

    if config.auth.uses_placeholder_secret() {
        tracing::warn!("auth.jwt_secret is the shipped placeholder; set CHIRPY__AUTH__JWT_SECRET");
    }
    if config.auth.polka_key.is_empty() {
        tracing::warn!("auth.polka_key is empty; billing webhooks will be rejected");
    }

    let repositories = match config.database.url {
        Some(_) => {
            let db = DatabasePool::connect(&config.database).await?;
            tracing::info!("Running database migrations...");
            db.migrate().await?;
            Repositories::postgres(db.pool().clone())
        }
        None => {
            tracing::warn!("No database.url configured; using in-memory storage");
            Repositories::memory()
        }
    };

    chirpy_api::run_server(config, repositories).await
}

async fn migrate(config: AppConfig) -> Result<(), AppError> {
    let db = DatabasePool::connect(&config.database).await?;
    db.migrate().await?;
    tracing::info!("Database migrations complete");
    db.close().await;
    Ok(())
}
