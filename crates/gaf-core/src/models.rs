//! Artifact entity models
//!
//! [`ArtifactRow`] is the read model of one `crypto_gaf.gafs` row (with
//! `FromRow`); [`ArtifactView`] is what the HTTP layer serializes.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// Payload columns of one product's artifact row
#[derive(Debug, Clone, Default, PartialEq, FromRow, Serialize, Deserialize)]
pub struct ArtifactRow {
    pub size: i32,
    pub max_size: i32,
    pub midpoint: Option<f64>,
    pub midpoint_images: Vec<String>, // base64 PNG
    pub ask_price_images: Vec<String>,
    pub bid_price_images: Vec<String>,
}

/// Serializable view of a cached artifact
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ArtifactView {
    pub product: String,
    pub loaded: bool,
    pub size: i32,
    pub max_size: i32,
    pub midpoint: Option<f64>,
    pub midpoint_images: Vec<String>,
    pub ask_price_images: Vec<String>,
    pub bid_price_images: Vec<String>,
}

impl ArtifactView {
    pub fn new(product: impl Into<String>, row: Option<&ArtifactRow>) -> Self {
        let product = product.into();
        match row {
            Some(row) => Self {
                product,
                loaded: true,
                size: row.size,
                max_size: row.max_size,
                midpoint: row.midpoint,
                midpoint_images: row.midpoint_images.clone(),
                ask_price_images: row.ask_price_images.clone(),
                bid_price_images: row.bid_price_images.clone(),
            },
            None => Self {
                product,
                loaded: false,
                size: 0,
                max_size: 0,
                midpoint: None,
                midpoint_images: Vec::new(),
                ask_price_images: Vec::new(),
                bid_price_images: Vec::new(),
            },
        }
    }
}
