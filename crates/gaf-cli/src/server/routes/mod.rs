mod gafs;
mod health;

use axum::Router;

use crate::server::AppState;

pub fn create_router(state: AppState) -> Router {
    Router::new()
        .nest("/api", health::router().merge(gafs::router()))
        .with_state(state)
}
