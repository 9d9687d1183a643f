use async_trait::async_trait;
use reqwest::{header, Client, StatusCode};
use serde_json::{json, Value};
use thiserror::Error;
use tracing::debug;

/// Query document the Monarch web client sends for the transactions page.
/// Forwarded as-is; the `filters` variable is bound from the caller's payload.
const TRANSACTIONS_PAGE_QUERY: &str = r#"
query Web_GetTransactionsPage($filters: TransactionFilterInput) {
  aggregates(filters: $filters) {
    summary {
      ...TransactionsSummaryFields
      __typename
    }
    __typename
  }
}
fragment TransactionsSummaryFields on TransactionsSummary {
  avg count max maxExpense sum sumIncome sumExpense first last __typename
}
"#;

#[derive(Debug, Error)]
pub enum UpstreamError {
    #[error("{0}")]
    Transport(#[from] reqwest::Error),
    #[error("upstream returned {status}: {body}")]
    Status { status: StatusCode, body: String },
}

/// Seam between the ingress handler and the Monarch API. The bearer token is
/// a per-call parameter; implementations must not retain it across calls.
#[async_trait]
pub trait UpstreamClient: Send + Sync {
    async fn transactions_summary(
        &self,
        token: &str,
        filters: &Value,
    ) -> Result<Value, UpstreamError>;
}

pub struct MonarchClient {
    client: Client,
    graphql_url: String,
}

impl MonarchClient {
    pub fn new(graphql_url: String) -> Result<Self, reqwest::Error> {
        Ok(Self {
            client: Client::builder().build()?,
            graphql_url,
        })
    }
}

fn query_body(filters: &Value) -> Value {
    json!({
        "query": TRANSACTIONS_PAGE_QUERY,
        "variables": { "filters": filters },
    })
}

#[async_trait]
impl UpstreamClient for MonarchClient {
    async fn transactions_summary(
        &self,
        token: &str,
        filters: &Value,
    ) -> Result<Value, UpstreamError> {
        debug!(url = %self.graphql_url, "dispatching transactions summary query");

        let response = self
            .client
            .post(&self.graphql_url)
            .header(header::AUTHORIZATION, format!("Token {token}"))
            .header(header::CONTENT_TYPE, "application/json")
            .header("Client-Platform", "web")
            .json(&query_body(filters))
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "unable to read upstream body".to_string());
            return Err(UpstreamError::Status { status, body });
        }

        // Relayed verbatim: a 2xx body is opaque here, GraphQL-level errors
        // included.
        Ok(response.json::<Value>().await?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn query_body_binds_filters_verbatim() {
        let filters = json!({ "startDate": "2024-01-01", "accounts": ["a", "b"] });

        let body = query_body(&filters);

        assert_eq!(body["variables"]["filters"], filters);
        let document = body["query"].as_str().expect("query must be a string");
        assert!(document.contains("query Web_GetTransactionsPage($filters: TransactionFilterInput)"));
        assert!(document.contains("aggregates(filters: $filters)"));
        assert!(document.contains("fragment TransactionsSummaryFields on TransactionsSummary"));
    }

    #[test]
    fn status_error_reports_code_and_body() {
        let err = UpstreamError::Status {
            status: StatusCode::BAD_GATEWAY,
            body: "upstream melted".to_string(),
        };

        assert_eq!(
            err.to_string(),
            "upstream returned 502 Bad Gateway: upstream melted"
        );
    }
}
