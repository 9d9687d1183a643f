use std::sync::Arc;

use axum::{
    extract::{rejection::JsonRejection, Extension},
    Json,
};
use serde::Deserialize;
use serde_json::Value;
use tracing::{error, info};

use crate::{
    infrastructure::{
        auth::{BearerToken, ProxyApiKey},
        state::AppState,
    },
    services::errors::ProxyError,
};

#[derive(Debug, Deserialize)]
pub struct TransactionsRequest {
    /// Opaque filter mapping, forwarded verbatim to the upstream query.
    #[serde(default)]
    filters: Option<Value>,
}

/// Validation order is fixed: proxy key, then bearer token (extractor order),
/// then body. Exactly one upstream call per accepted request, no retries.
pub async fn get_transactions(
    Extension(state): Extension<Arc<AppState>>,
    _api_key: ProxyApiKey,
    BearerToken(token): BearerToken,
    payload: Result<Json<TransactionsRequest>, JsonRejection>,
) -> Result<Json<Value>, ProxyError> {
    info!("received request for /get-transactions");

    // An absent, unparseable, or wrongly-typed body is treated as a body
    // without filters, so every failure keeps the JSON error shape.
    let filters = match payload {
        Ok(Json(TransactionsRequest {
            filters: Some(filters),
        })) if !filters.is_null() => filters,
        _ => {
            info!("request rejected: missing \"filters\" in body");
            return Err(ProxyError::MissingFilters);
        }
    };

    let data = state
        .upstream
        .transactions_summary(&token, &filters)
        .await
        .map_err(|err| {
            error!(error = %err, "upstream request failed");
            ProxyError::from(err)
        })?;

    info!("successfully fetched data from upstream");
    Ok(Json(data))
}
