use std::sync::Arc;

use axum::{Extension, Router};
use tower_http::trace::TraceLayer;

use self::rest::router as rest_router;
use crate::infrastructure::state::AppState;

pub mod rest;

pub fn build_router(state: Arc<AppState>) -> Router {
    rest_router()
        .layer(Extension(state))
        .layer(TraceLayer::new_for_http())
}
