//! PostgreSQL implementation for GAF
//!
//! This crate provides the [`Pool`] struct, which owns a sqlx connection pool
//! and implements [`gaf_core::ConnectionPool`], and the [`Connection`] it
//! hands out.
//!
//! # Usage
//!
//! The Pool can be used in two ways:
//!
//! 1. **Directly** - `Pool::get_connection` returns a concrete [`Connection`]
//!    with a generic positional-argument `query`. Good for CLI commands.
//!
//! 2. **Through the storage traits** - pass the pool to
//!    [`gaf_core::ArtifactStore`] as an `Arc<dyn ConnectionPool>`.

pub mod config;
mod connection;
mod repositories;

pub use config::PoolConfig;
pub use connection::{Connection, QueryArg};

use gaf_core::{schema, Error, Result};
use sqlx::postgres::{PgPool, PgPoolOptions};
use tracing::info;

/// PostgreSQL connection pool
///
/// Physical connections are opened lazily on first acquisition. Must be
/// created inside a Tokio runtime.
pub struct Pool {
    pool: PgPool,
}

impl Pool {
    /// Create a pool from a `postgresql://` connection URL
    pub fn new(connection_url: &str) -> Result<Self> {
        Self::with_config(&PoolConfig::parse(connection_url)?)
    }

    /// Create a pool from an already parsed configuration
    pub fn with_config(config: &PoolConfig) -> Result<Self> {
        // restore holds its listing connection while each product load takes another
        if config.max_connections < 2 {
            return Err(Error::InvalidPoolConfig(format!(
                "max_connections must be at least 2, got {}",
                config.max_connections
            )));
        }

        let pool = PgPoolOptions::new()
            .max_connections(config.max_connections)
            .acquire_timeout(config.acquire_timeout)
            .connect_lazy_with(config.connect_options());

        info!(
            database = %config,
            max_connections = config.max_connections,
            "created connection pool"
        );
        Ok(Self { pool })
    }

    /// Acquire a connection, waiting until one is available
    pub async fn get_connection(&self) -> Result<Connection> {
        let connection = self.pool.acquire().await.map_err(Error::Connection)?;
        Ok(Connection::new(connection))
    }

    /// Initialize the database schema
    pub async fn init_schema(&self) -> Result<()> {
        schema::init_schema(&self.pool).await
    }

    /// Get a reference to the underlying connection pool
    pub fn inner(&self) -> &PgPool {
        &self.pool
    }

    /// Close every connection and stop handing out new ones
    pub async fn close(&self) {
        self.pool.close().await;
    }
}
