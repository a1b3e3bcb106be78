//! Application State
//!
//! Shared state accessible by all API handlers.
//! Wrapped in Arc for thread-safe sharing across async tasks.

use std::sync::Arc;
use std::time::Instant;
use tokio::sync::RwLock;

use crate::config::ServerConfig;
use crate::dashboard::{build_layout, Component, DispatchTable, Variable};
use crate::dataset::Dataset;

/// Shared application state for all handlers
#[derive(Clone)]
pub struct AppState {
    /// Encounter records, read-only after load
    pub dataset: Arc<Dataset>,
    /// Callbacks bound to page inputs
    pub dispatch: Arc<DispatchTable>,
    /// Static page tree
    pub layout: Arc<Component>,
    /// Current dropdown value
    pub selection: Arc<RwLock<Variable>>,
    /// Server configuration
    pub config: Arc<ServerConfig>,
    /// Server start time for uptime tracking
    pub start_time: Instant,
}

impl AppState {
    /// Create state for the dashboard around a loaded dataset
    pub fn new(dataset: Dataset, config: ServerConfig) -> Self {
        Self {
            dataset: Arc::new(dataset),
            dispatch: Arc::new(DispatchTable::dashboard()),
            layout: Arc::new(build_layout()),
            selection: Arc::new(RwLock::new(Variable::default())),
            config: Arc::new(config),
            start_time: Instant::now(),
        }
    }

    /// Get server uptime in seconds
    pub fn uptime_seconds(&self) -> u64 {
        self.start_time.elapsed().as_secs()
    }

    /// Current dropdown value
    pub async fn selected(&self) -> Variable {
        *self.selection.read().await
    }

    /// Record a new dropdown value
    pub async fn select(&self, variable: Variable) {
        *self.selection.write().await = variable;
    }
}
