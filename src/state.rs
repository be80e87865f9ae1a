//! Shared application state for all routes. Holds no mutable data; records live in the store.

use crate::config::ResourceRegistry;
use crate::store::DocumentStore;
use std::sync::Arc;
use std::time::Instant;

#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn DocumentStore>,
    pub registry: Arc<ResourceRegistry>,
    /// Process start, for `/health` uptime.
    pub started_at: Instant,
}

impl AppState {
    pub fn new(store: Arc<dyn DocumentStore>, registry: ResourceRegistry, started_at: Instant) -> Self {
        Self {
            store,
            registry: Arc::new(registry),
            started_at,
        }
    }
}
