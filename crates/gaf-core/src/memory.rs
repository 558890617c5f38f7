//! In-memory storage double
//!
//! [`MemoryPool`] implements [`ConnectionPool`] over a map of artifact rows
//! and counts every acquisition, release and query, so tests can assert
//! that the registry never leaks a connection and never touches storage
//! when it should not.

use std::collections::BTreeMap;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex, PoisonError};

use async_trait::async_trait;

use crate::error::{Error, Result};
use crate::models::ArtifactRow;
use crate::repository::{ArtifactConnection, ConnectionPool};
use crate::types::Rows;

#[derive(Debug, Default)]
struct Shared {
    rows: Mutex<BTreeMap<String, ArtifactRow>>,
    acquired: AtomicUsize,
    freed: AtomicUsize,
    queries: AtomicUsize,
    fail_acquire: AtomicBool,
    fail_queries: AtomicBool,
    withhold_rows: AtomicBool,
}

/// Counting in-memory pool
#[derive(Debug, Clone, Default)]
pub struct MemoryPool {
    shared: Arc<Shared>,
}

impl MemoryPool {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or overwrite a product's row
    pub fn insert(&self, product: impl Into<String>, row: ArtifactRow) {
        self.rows().insert(product.into(), row);
    }

    pub fn remove(&self, product: &str) -> Option<ArtifactRow> {
        self.rows().remove(product)
    }

    /// Make every subsequent `get_connection` fail
    pub fn fail_acquire(&self, fail: bool) {
        self.shared.fail_acquire.store(fail, Ordering::SeqCst);
    }

    /// Make every subsequent query fail
    pub fn fail_queries(&self, fail: bool) {
        self.shared.fail_queries.store(fail, Ordering::SeqCst);
    }

    /// Keep listing products but match no row when loading one
    pub fn withhold_rows(&self, withhold: bool) {
        self.shared.withhold_rows.store(withhold, Ordering::SeqCst);
    }

    pub fn acquired(&self) -> usize {
        self.shared.acquired.load(Ordering::SeqCst)
    }

    pub fn freed(&self) -> usize {
        self.shared.freed.load(Ordering::SeqCst)
    }

    pub fn queries(&self) -> usize {
        self.shared.queries.load(Ordering::SeqCst)
    }

    /// Connections acquired but not yet freed
    pub fn outstanding(&self) -> usize {
        self.acquired() - self.freed()
    }

    fn rows(&self) -> std::sync::MutexGuard<'_, BTreeMap<String, ArtifactRow>> {
        self.shared
            .rows
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
    }
}

#[async_trait]
impl ConnectionPool for MemoryPool {
    async fn get_connection(&self) -> Result<Box<dyn ArtifactConnection>> {
        if self.shared.fail_acquire.load(Ordering::SeqCst) {
            return Err(Error::Connection(sqlx::Error::PoolTimedOut));
        }
        self.shared.acquired.fetch_add(1, Ordering::SeqCst);
        Ok(Box::new(MemoryConnection { pool: self.clone() }))
    }
}

struct MemoryConnection {
    pool: MemoryPool,
}

impl MemoryConnection {
    fn begin_query(&self) -> Result<()> {
        self.pool.shared.queries.fetch_add(1, Ordering::SeqCst);
        if self.pool.shared.fail_queries.load(Ordering::SeqCst) {
            return Err(Error::Query(sqlx::Error::Protocol(
                "relation \"crypto_gaf.gafs\" does not exist".into(),
            )));
        }
        Ok(())
    }
}

#[async_trait]
impl ArtifactConnection for MemoryConnection {
    async fn list_products(&mut self) -> Result<Rows<String>> {
        self.begin_query()?;
        Ok(Rows::from_vec(self.pool.rows().keys().cloned().collect()))
    }

    async fn fetch_artifact(&mut self, product: &str) -> Result<Rows<ArtifactRow>> {
        self.begin_query()?;
        if self.pool.shared.withhold_rows.load(Ordering::SeqCst) {
            return Ok(Rows::NoRows);
        }
        let row = self.pool.rows().get(product).cloned();
        Ok(Rows::from_vec(row.into_iter().collect()))
    }

    fn free(self: Box<Self>) {
        self.pool.shared.freed.fetch_add(1, Ordering::SeqCst);
    }
}
