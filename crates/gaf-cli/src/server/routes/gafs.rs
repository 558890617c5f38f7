use axum::{
    extract::{Path, State},
    routing::get,
    Json, Router,
};
use gaf_core::ArtifactView;
use serde::{Deserialize, Serialize};

use crate::server::error::ApiError;
use crate::server::AppState;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/gafs", get(list))
        .route("/gafs/{product}", get(get_by_product))
}

/// A refreshed artifact; `gaf` is null for unknown products
#[derive(Debug, Serialize, Deserialize)]
pub struct GafResponse {
    pub product: String,
    pub gaf: Option<ArtifactView>,
}

async fn list(State(state): State<AppState>) -> Json<Vec<String>> {
    Json(state.store().products())
}

async fn get_by_product(
    State(state): State<AppState>,
    Path(product): Path<String>,
) -> Result<Json<GafResponse>, ApiError> {
    let artifact = state.store().refresh(&product).await?;

    Ok(Json(GafResponse {
        gaf: artifact.map(|artifact| artifact.view()),
        product,
    }))
}
