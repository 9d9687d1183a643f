use axum::{
    routing::{get, post},
    Router,
};

pub mod health;
pub mod transactions;

pub fn router() -> Router {
    Router::new()
        .route("/health", get(health::healthcheck))
        .route("/get-transactions", post(transactions::get_transactions))
}
