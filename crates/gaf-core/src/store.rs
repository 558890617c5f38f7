//! Process-wide product → artifact registry
//!
//! The registry is built once at startup with [`ArtifactStore::new`], filled
//! by [`ArtifactStore::restore`] and then shared as `Arc<ArtifactStore>` with
//! request handlers, which call [`ArtifactStore::refresh`] before reading.
//!
//! # Concurrency
//!
//! Each product key has a single writer at a time only by convention:
//! concurrent refreshes of the same product are not serialized, each runs
//! its own load, and the last load to complete wins. A load swaps in a
//! complete snapshot, so readers never see fields from two different loads.

use std::sync::Arc;

use dashmap::DashMap;
use tracing::{debug, info};

use crate::artifact::Artifact;
use crate::error::Result;
use crate::repository::{ArtifactConnection, ConnectionPool};
use crate::types::Rows;

/// Registry of cached artifacts keyed by product
pub struct ArtifactStore {
    pool: Arc<dyn ConnectionPool>,
    artifacts: DashMap<String, Arc<Artifact>>,
}

impl ArtifactStore {
    /// Create an empty registry over the given pool
    pub fn new(pool: Arc<dyn ConnectionPool>) -> Self {
        Self {
            pool,
            artifacts: DashMap::new(),
        }
    }

    /// Load every product known to storage into the registry.
    ///
    /// Products are loaded one at a time; the listing connection stays
    /// checked out while each load acquires and frees its own, so the pool
    /// needs room for two connections. An existing entry for a product is
    /// reloaded in place, never duplicated. The first failure aborts the
    /// restore.
    ///
    /// Returns the number of products loaded.
    pub async fn restore(&self) -> Result<usize> {
        info!("restoring artifacts from storage");

        let mut connection = self.pool.get_connection().await?;
        let restored = self.restore_products(connection.as_mut()).await;
        connection.free();

        let count = restored?;
        info!(products = count, "restored artifacts");
        Ok(count)
    }

    async fn restore_products(&self, connection: &mut dyn ArtifactConnection) -> Result<usize> {
        let products = match connection.list_products().await? {
            Rows::Matched(products) => products,
            Rows::NoRows => return Ok(0),
        };

        let mut count = 0;
        for product in products {
            // a known product reloads in place and keeps its values on a miss
            let artifact = self
                .retrieve(&product)
                .unwrap_or_else(|| Arc::new(Artifact::new(product.clone())));
            artifact.load(self.pool.as_ref()).await?;
            self.artifacts.entry(product).or_insert(artifact);
            count += 1;
        }
        Ok(count)
    }

    /// Look up a cached artifact without touching storage
    pub fn retrieve(&self, product: &str) -> Option<Arc<Artifact>> {
        self.artifacts.get(product).map(|entry| Arc::clone(entry.value()))
    }

    /// Reload a cached artifact from storage and return it.
    ///
    /// Unknown products return `Ok(None)` without contacting storage; the
    /// registry never creates entries on a miss.
    pub async fn refresh(&self, product: &str) -> Result<Option<Arc<Artifact>>> {
        let Some(artifact) = self.retrieve(product) else {
            debug!(product, "refresh of unknown product");
            return Ok(None);
        };

        artifact.load(self.pool.as_ref()).await?;
        Ok(Some(artifact))
    }

    /// Cached product ids, sorted
    pub fn products(&self) -> Vec<String> {
        let mut products: Vec<String> = self
            .artifacts
            .iter()
            .map(|entry| entry.key().clone())
            .collect();
        products.sort();
        products
    }

    pub fn len(&self) -> usize {
        self.artifacts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.artifacts.is_empty()
    }
}
