use axum::{http::StatusCode, response::IntoResponse, Json};
use thiserror::Error;

use crate::infrastructure::upstream::UpstreamError;

/// Every failure path of the relay. Display strings are the wire contract:
/// they are returned verbatim in the `error` field of the JSON body.
#[derive(Debug, Error)]
pub enum ProxyError {
    #[error("Unauthorized: Invalid or missing API Key.")]
    InvalidApiKey,
    #[error("Authorization header with a Token is required.")]
    MissingBearerToken,
    #[error("Missing \"filters\" in request body.")]
    MissingFilters,
    #[error("An internal server error occurred.")]
    Upstream(#[source] UpstreamError),
}

impl From<UpstreamError> for ProxyError {
    fn from(err: UpstreamError) -> Self {
        ProxyError::Upstream(err)
    }
}

impl ProxyError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            ProxyError::InvalidApiKey | ProxyError::MissingBearerToken => {
                StatusCode::UNAUTHORIZED
            }
            ProxyError::MissingFilters => StatusCode::BAD_REQUEST,
            ProxyError::Upstream(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ProxyError {
    fn into_response(self) -> axum::response::Response {
        let body = match &self {
            ProxyError::Upstream(source) => serde_json::json!({
                "error": self.to_string(),
                "details": source.to_string(),
            }),
            _ => serde_json::json!({ "error": self.to_string() }),
        };
        (self.status_code(), Json(body)).into_response()
    }
}
