use std::sync::Arc;

use crate::config::Config;
use crate::sample::cache::TableCache;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    pub config: Config,
    /// Sample tables keyed by path and file identity.
    pub sample_cache: Arc<TableCache>,
}

impl AppState {
    pub fn new(config: Config) -> Self {
        Self {
            config,
            sample_cache: Arc::new(TableCache::new()),
        }
    }
}
