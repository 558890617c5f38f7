use axum::{extract::State, routing::get, Json, Router};
use serde::{Deserialize, Serialize};

use crate::server::AppState;

pub fn router() -> Router<AppState> {
    Router::new().route("/health", get(check))
}

#[derive(Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    pub products: usize,
}

async fn check(State(state): State<AppState>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        products: state.store().len(),
    })
}
