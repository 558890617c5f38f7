//! The cached artifact record for one product

use std::sync::{Arc, PoisonError, RwLock};

use tracing::{debug, warn};

use crate::error::Result;
use crate::models::{ArtifactRow, ArtifactView};
use crate::repository::ConnectionPool;

/// Last-loaded artifact values for one product.
///
/// Field values live in an immutable [`ArtifactRow`] snapshot that `load`
/// replaces wholesale, so a reader always sees every field from the same
/// load. `None` until a load matches a row.
#[derive(Debug)]
pub struct Artifact {
    product: String,
    snapshot: RwLock<Option<Arc<ArtifactRow>>>,
}

impl Artifact {
    pub fn new(product: impl Into<String>) -> Self {
        Self {
            product: product.into(),
            snapshot: RwLock::new(None),
        }
    }

    /// Reload this product's row from storage.
    ///
    /// Returns `true` when a row matched and the snapshot was replaced. On
    /// `NoRows` or on error the previous snapshot is kept. The connection is
    /// freed on every path.
    pub(crate) async fn load(&self, pool: &dyn ConnectionPool) -> Result<bool> {
        let mut connection = pool.get_connection().await?;
        let fetched = connection.fetch_artifact(&self.product).await;
        connection.free();

        match fetched?.into_first() {
            Some(row) => {
                debug!(product = %self.product, size = row.size, "loaded artifact");
                self.replace(row);
                Ok(true)
            }
            None => {
                warn!(product = %self.product, "no artifact row matched");
                Ok(false)
            }
        }
    }

    fn replace(&self, row: ArtifactRow) {
        let row = Arc::new(row);
        *self
            .snapshot
            .write()
            .unwrap_or_else(PoisonError::into_inner) = Some(row);
    }

    pub fn product(&self) -> &str {
        &self.product
    }

    /// The current field values, if any load has matched a row
    pub fn snapshot(&self) -> Option<Arc<ArtifactRow>> {
        self.snapshot
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    pub fn is_loaded(&self) -> bool {
        self.snapshot().is_some()
    }

    pub fn size(&self) -> Option<i32> {
        self.snapshot().map(|row| row.size)
    }

    pub fn max_size(&self) -> Option<i32> {
        self.snapshot().map(|row| row.max_size)
    }

    pub fn midpoint(&self) -> Option<f64> {
        self.snapshot().and_then(|row| row.midpoint)
    }

    pub fn midpoint_images(&self) -> Vec<String> {
        self.snapshot()
            .map(|row| row.midpoint_images.clone())
            .unwrap_or_default()
    }

    pub fn ask_price_images(&self) -> Vec<String> {
        self.snapshot()
            .map(|row| row.ask_price_images.clone())
            .unwrap_or_default()
    }

    pub fn bid_price_images(&self) -> Vec<String> {
        self.snapshot()
            .map(|row| row.bid_price_images.clone())
            .unwrap_or_default()
    }

    pub fn view(&self) -> ArtifactView {
        ArtifactView::new(&self.product, self.snapshot().as_deref())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::memory::MemoryPool;

    fn row(size: i32) -> ArtifactRow {
        ArtifactRow {
            size,
            max_size: 64,
            midpoint: Some(42_000.5),
            midpoint_images: vec!["mid-a".into(), "mid-b".into()],
            ask_price_images: vec!["ask".into()],
            bid_price_images: vec!["bid".into()],
        }
    }

    #[tokio::test]
    async fn test_load_copies_all_fields() {
        let pool = MemoryPool::new();
        pool.insert("BTC-USD", row(21));

        let artifact = Artifact::new("BTC-USD");
        assert!(!artifact.is_loaded());
        assert_eq!(artifact.size(), None);

        assert!(artifact.load(&pool).await.unwrap());

        assert_eq!(artifact.size(), Some(21));
        assert_eq!(artifact.max_size(), Some(64));
        assert_eq!(artifact.midpoint(), Some(42_000.5));
        assert_eq!(artifact.midpoint_images(), vec!["mid-a", "mid-b"]);
        assert_eq!(artifact.ask_price_images(), vec!["ask"]);
        assert_eq!(artifact.bid_price_images(), vec!["bid"]);
        assert_eq!(pool.acquired(), 1);
        assert_eq!(pool.freed(), 1);
    }

    #[tokio::test]
    async fn test_load_without_row_keeps_previous_values() {
        let pool = MemoryPool::new();
        pool.insert("ETH-USD", row(30));

        let artifact = Artifact::new("ETH-USD");
        artifact.load(&pool).await.unwrap();

        pool.remove("ETH-USD");
        assert!(!artifact.load(&pool).await.unwrap());

        assert_eq!(artifact.size(), Some(30));
        assert_eq!(pool.freed(), 2);
    }

    #[tokio::test]
    async fn test_failed_load_frees_connection_and_keeps_values() {
        let pool = MemoryPool::new();
        pool.insert("ETH-USD", row(30));

        let artifact = Artifact::new("ETH-USD");
        artifact.load(&pool).await.unwrap();

        pool.insert("ETH-USD", row(31));
        pool.fail_queries(true);
        let result = artifact.load(&pool).await;

        assert!(matches!(result, Err(crate::Error::Query(_))));
        assert_eq!(artifact.size(), Some(30));
        assert_eq!(pool.acquired(), pool.freed());
    }

    #[test]
    fn test_view_of_unloaded_artifact() {
        let view = Artifact::new("XRP-USD").view();
        assert_eq!(view.product, "XRP-USD");
        assert!(!view.loaded);
        assert!(view.midpoint_images.is_empty());
    }
}
