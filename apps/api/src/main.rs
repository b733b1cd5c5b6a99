mod config;
mod db;
mod errors;
mod models;
mod profile;
mod routes;
mod state;

use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{bail, Result};
use clap::{Parser, Subcommand};
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::Config;
use crate::db::{create_pool, ensure_schema};
use crate::profile::pg::PgProfileStore;
use crate::profile::seed::seed_profile;
use crate::profile::store::{MemoryProfileStore, ProfileStore};
use crate::routes::{build_router, layers::with_http_layers};
use crate::state::AppState;

#[derive(Debug, Parser)]
#[command(name = "profile_api", version, about = "Single-profile resume API")]
struct Cli {
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Run the HTTP server (default)
    Serve,
    /// Upsert the profile from a JSON file and exit
    Seed {
        #[arg(short, long, value_name = "FILE", default_value = "seed.json")]
        file: PathBuf,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    let config = Config::from_env()?;

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!("{}={}", env!("CARGO_PKG_NAME"), &config.rust_log))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    match cli.command.unwrap_or(Command::Serve) {
        Command::Serve => {
            let store = build_store(&config).await?;
            serve(config, store).await
        }
        Command::Seed { file } => {
            let url = seed_database_url(&config)?;
            let pool = create_pool(url).await?;
            ensure_schema(&pool).await?;
            seed_profile(&PgProfileStore::new(pool), &file).await?;
            Ok(())
        }
    }
}

/// Seeding the in-memory store would be lost on exit, so it needs a database.
fn seed_database_url(config: &Config) -> Result<&str> {
    match config.database_url.as_deref() {
        Some(url) => Ok(url),
        None => bail!("DATABASE_URL must be set to seed"),
    }
}

async fn build_store(config: &Config) -> Result<Arc<dyn ProfileStore>> {
    match &config.database_url {
        Some(url) => {
            let pool = create_pool(url).await?;
            ensure_schema(&pool).await?;
            Ok(Arc::new(PgProfileStore::new(pool)))
        }
        None => {
            warn!("DATABASE_URL not set; profile is held in memory and lost on exit");
            Ok(Arc::new(MemoryProfileStore::new()))
        }
    }
}

async fn serve(config: Config, store: Arc<dyn ProfileStore>) -> Result<()> {
    info!("Starting Profile API v{}", env!("CARGO_PKG_VERSION"));

    if config.basic_auth.is_some() {
        info!("Basic auth enabled for profile writes");
    }
    if let Some(dir) = &config.static_dir {
        info!("Serving static front-end from {dir}");
    }

    let state = AppState {
        store,
        config: config.clone(),
    };

    let app = with_http_layers(build_router(state), &config);

    let addr: SocketAddr = format!("0.0.0.0:{}", config.port).parse()?;
    info!("Listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
