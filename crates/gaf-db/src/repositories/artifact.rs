//! ArtifactConnection implementation for PostgreSQL

use async_trait::async_trait;
use gaf_core::{ArtifactConnection, ArtifactRow, Error, Result, Rows};
use sqlx::{FromRow, Row};

use crate::connection::{Connection, QueryArg};

pub(crate) const LIST_PRODUCTS: &str =
    "SELECT DISTINCT product FROM crypto_gaf.gafs ORDER BY product";

pub(crate) const LOAD_ARTIFACT: &str = r#"
    SELECT
        COALESCE(size, 0) AS size,
        COALESCE(max_size, 0) AS max_size,
        midpoint,
        COALESCE(midpoint_images, '{}') AS midpoint_images,
        COALESCE(ask_price_images, '{}') AS ask_price_images,
        COALESCE(bid_price_images, '{}') AS bid_price_images
    FROM crypto_gaf.gafs
    WHERE product = $1
"#;

#[async_trait]
impl ArtifactConnection for Connection {
    async fn list_products(&mut self) -> Result<Rows<String>> {
        let rows = self.query(LIST_PRODUCTS, &[]).await?;
        rows.try_map(|row| row.try_get::<String, _>("product").map_err(Error::Query))
    }

    async fn fetch_artifact(&mut self, product: &str) -> Result<Rows<ArtifactRow>> {
        let rows = self
            .query(LOAD_ARTIFACT, &[QueryArg::from(product)])
            .await?;
        rows.try_map(|row| ArtifactRow::from_row(&row).map_err(Error::Query))
    }

    fn free(self: Box<Self>) {
        Connection::free(*self)
    }
}
