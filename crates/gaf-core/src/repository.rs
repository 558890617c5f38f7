//! Storage traits for the artifact registry
//!
//! A [`ConnectionPool`] hands out [`ArtifactConnection`]s; the registry only
//! ever talks to storage through these two traits. The PostgreSQL
//! implementation lives in `gaf-db`; [`crate::memory`] provides a counting
//! double for tests.

use async_trait::async_trait;

use crate::error::Result;
use crate::models::ArtifactRow;
use crate::types::Rows;

// =============================================================================
// Storage Traits
// =============================================================================

/// Source of checked-out storage sessions
#[async_trait]
pub trait ConnectionPool: Send + Sync {
    /// Acquire a connection, waiting until one is available.
    ///
    /// Fails with [`crate::Error::Connection`]; no connection is handed out
    /// on failure.
    async fn get_connection(&self) -> Result<Box<dyn ArtifactConnection>>;
}

/// One checked-out storage session
///
/// Must be released with [`ArtifactConnection::free`] exactly once. `free`
/// consumes the box, so a second release does not compile.
#[async_trait]
pub trait ArtifactConnection: Send {
    /// List every distinct product known to storage
    async fn list_products(&mut self) -> Result<Rows<String>>;

    /// Load the artifact row for a single product (zero or one row)
    async fn fetch_artifact(&mut self, product: &str) -> Result<Rows<ArtifactRow>>;

    /// Return the session to its pool
    fn free(self: Box<Self>);
}
