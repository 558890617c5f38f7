//! CLI commands for gaf

use std::path::PathBuf;
use std::sync::Arc;

use clap::{Args, Subcommand};
use color_eyre::eyre::Result;
use gaf_core::ArtifactStore;
use gaf_db::config::DEFAULT_MAX_CONNECTIONS;
use gaf_db::{Pool, PoolConfig};

use crate::config::{GafConfig, CONFIG_FILE};

pub mod get;
pub mod init;
pub mod list;
pub mod serve;

/// All available CLI commands
#[derive(Subcommand)]
pub enum Command {
    /// Create the crypto_gaf schema and tables if missing
    Init(init::InitCommand),

    /// List every cached product
    List(list::ListCommand),

    /// Print one product's artifact as JSON
    Get(get::GetCommand),

    /// Restore the artifact cache and start the HTTP API
    Serve(serve::ServeCommand),
}

impl Command {
    /// Execute the command
    pub async fn run(self) -> Result<()> {
        match self {
            Command::Init(cmd) => cmd.run().await,
            Command::List(cmd) => cmd.run().await,
            Command::Get(cmd) => cmd.run().await,
            Command::Serve(cmd) => cmd.run().await,
        }
    }
}

/// Database options shared by every command
#[derive(Args, Debug, Clone)]
pub struct DatabaseArgs {
    /// PostgreSQL URL (defaults to gaf.toml, DATABASE_URL, PG, then POSTGRES_*)
    #[arg(long)]
    pub database_url: Option<String>,

    /// Path to the configuration file
    #[arg(long, default_value = CONFIG_FILE)]
    pub config: PathBuf,

    /// Maximum pooled connections (at least 2)
    #[arg(long)]
    pub max_connections: Option<u32>,
}

impl DatabaseArgs {
    pub fn load_config(&self) -> Result<GafConfig> {
        GafConfig::load_from(&self.config)
    }

    /// Build the connection pool; no connection is opened yet
    pub fn connect(&self, config: &GafConfig) -> Result<Pool> {
        let url = config.database_url(self.database_url.as_deref())?;
        let max_connections = self
            .max_connections
            .or(config.database.max_connections)
            .unwrap_or(DEFAULT_MAX_CONNECTIONS);

        let pool_config = PoolConfig::parse(&url)?.with_max_connections(max_connections);
        Ok(Pool::with_config(&pool_config)?)
    }

    /// Connect and fill a fresh artifact store from storage
    pub async fn restore(&self, config: &GafConfig) -> Result<Arc<ArtifactStore>> {
        let pool = self.connect(config)?;
        let store = ArtifactStore::new(Arc::new(pool));
        store.restore().await?;
        Ok(Arc::new(store))
    }
}
