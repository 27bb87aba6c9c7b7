use std::sync::Arc;
use tokio::sync::RwLock;

use crate::config::Config;
use crate::observability::Metrics;
use crate::parsers::ParserRegistry;

/// Shared request state
///
/// Parsing and listing take the registry read lock; priority changes take
/// the write lock.
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    pub registry: Arc<RwLock<ParserRegistry>>,
    pub metrics: Arc<Metrics>,
}

impl AppState {
    pub fn new(config: Config, registry: ParserRegistry) -> Self {
        Self {
            config: Arc::new(config),
            registry: Arc::new(RwLock::new(registry)),
            metrics: Arc::new(Metrics::new()),
        }
    }
}
