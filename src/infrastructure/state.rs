use std::sync::Arc;

use crate::infrastructure::{config::Config, upstream::UpstreamClient};

/// Read-only after startup; shared across requests as `Arc<AppState>`.
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    pub upstream: Arc<dyn UpstreamClient>,
}

impl AppState {
    pub fn new(config: Arc<Config>, upstream: Arc<dyn UpstreamClient>) -> Self {
        Self { config, upstream }
    }
}
