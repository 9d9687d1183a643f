use std::sync::Arc;

use axum::{async_trait, extract::FromRequestParts, http::request::Parts};
use subtle::ConstantTimeEq;
use tracing::warn;

use crate::{infrastructure::state::AppState, services::errors::ProxyError};

const API_KEY_HEADER: &str = "x-api-key";
const TOKEN_PREFIX: &str = "Token ";

/// Proof that the caller presented the configured proxy secret. Runs before
/// any other validation; an unconfigured secret rejects everything.
#[derive(Clone, Debug)]
pub struct ProxyApiKey;

#[async_trait]
impl FromRequestParts<()> for ProxyApiKey {
    type Rejection = ProxyError;

    async fn from_request_parts(parts: &mut Parts, _state: &()) -> Result<Self, Self::Rejection> {
        let Some(state) = parts.extensions.get::<Arc<AppState>>() else {
            warn!("application state missing from request extensions");
            return Err(ProxyError::InvalidApiKey);
        };

        let secret = state.config.proxy.api_key.as_bytes();
        if secret.is_empty() {
            return Err(ProxyError::InvalidApiKey);
        }

        let Some(header_value) = parts.headers.get(API_KEY_HEADER) else {
            return Err(ProxyError::InvalidApiKey);
        };
        let provided = header_value
            .to_str()
            .map_err(|_| ProxyError::InvalidApiKey)?;

        if bool::from(provided.as_bytes().ct_eq(secret)) {
            Ok(ProxyApiKey)
        } else {
            Err(ProxyError::InvalidApiKey)
        }
    }
}

/// Caller-supplied upstream credential, taken from `authorization: Token <t>`.
/// The token is everything after the first space and is forwarded verbatim.
#[derive(Clone, Debug)]
pub struct BearerToken(pub String);

#[async_trait]
impl FromRequestParts<()> for BearerToken {
    type Rejection = ProxyError;

    async fn from_request_parts(parts: &mut Parts, _state: &()) -> Result<Self, Self::Rejection> {
        let Some(header_value) = parts.headers.get(axum::http::header::AUTHORIZATION) else {
            return Err(ProxyError::MissingBearerToken);
        };
        let header_str = header_value
            .to_str()
            .map_err(|_| ProxyError::MissingBearerToken)?;
        let token = header_str
            .strip_prefix(TOKEN_PREFIX)
            .ok_or(ProxyError::MissingBearerToken)?;

        Ok(BearerToken(token.to_string()))
    }
}
