use sqlx::PgPool;

use crate::error::Error;

/// SQL schema for initializing the database
///
/// The upstream collect/calculate jobs own the contents of these tables;
/// this DDL exists so a fresh database can be prepared for them.
pub const SCHEMA: &str = r#"
CREATE SCHEMA IF NOT EXISTS crypto_gaf;

-- One precomputed artifact per product
CREATE TABLE IF NOT EXISTS crypto_gaf.gafs (
    product TEXT PRIMARY KEY,
    max_size INTEGER NOT NULL DEFAULT 64,
    size INTEGER,
    midpoint DOUBLE PRECISION,
    midpoint_images TEXT[],
    ask_price_images TEXT[],
    bid_price_images TEXT[]
);

-- Raw orderbook samples the artifacts are computed from
CREATE TABLE IF NOT EXISTS crypto_gaf.samples (
    sample_id BIGSERIAL PRIMARY KEY,
    product TEXT NOT NULL REFERENCES crypto_gaf.gafs(product),
    midpoint DOUBLE PRECISION,
    ask_prices DOUBLE PRECISION[],
    ask_sizes DOUBLE PRECISION[],
    bid_prices DOUBLE PRECISION[],
    bid_sizes DOUBLE PRECISION[],
    buys DOUBLE PRECISION[],
    sells DOUBLE PRECISION[]
);

CREATE INDEX IF NOT EXISTS idx_samples_product ON crypto_gaf.samples(product, sample_id DESC);
"#;

/// Initialize the database schema
pub async fn init_schema(pool: &PgPool) -> Result<(), Error> {
    sqlx::raw_sql(SCHEMA)
        .execute(pool)
        .await
        .map_err(Error::Query)?;
    Ok(())
}
