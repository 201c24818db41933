//! Application state for the SixDegrees server.

use std::sync::Arc;

use config::Config;
use metrics_exporter_prometheus::PrometheusHandle;
use query::QueryEngine;
use sd_core::ActorId;
use storage::InMemoryGraphStore;

use crate::error::{ApiError, Result};

/// Shared application state for Axum handlers.
pub struct AppState {
    /// Entity store shared with the query engine.
    pub store: Arc<InMemoryGraphStore>,
    /// Read facade for Bacon queries and listings.
    pub engine: QueryEngine<InMemoryGraphStore>,
    /// Effective configuration.
    pub config: Arc<Config>,
    /// Prometheus handle; `None` when metrics are disabled.
    pub metrics_handle: Option<PrometheusHandle>,
}

impl AppState {
    /// Creates state over an empty store.
    pub fn new(config: Config) -> Result<Self> {
        Self::with_store(config, Arc::new(InMemoryGraphStore::new()))
    }

    /// Creates state over an existing store.
    pub fn with_store(config: Config, store: Arc<InMemoryGraphStore>) -> Result<Self> {
        let reference = ActorId::new(config.graph.reference_actor_id.clone()).ok_or_else(|| {
            ApiError::Configuration("graph.reference_actor_id must not be empty".to_string())
        })?;

        tracing::info!(reference = %reference, "Query engine configured");

        Ok(Self {
            engine: QueryEngine::new(Arc::clone(&store), reference),
            store,
            config: Arc::new(config),
            metrics_handle: None,
        })
    }

    /// Attaches the Prometheus handle served at `/metrics`.
    #[must_use]
    pub fn with_metrics(mut self, handle: PrometheusHandle) -> Self {
        self.metrics_handle = Some(handle);
        self
    }
}
