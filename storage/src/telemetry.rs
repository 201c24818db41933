//! Metrics emitted by the entity store and the query engine.
//!
//! All recording goes through the `metrics` facade; the binary decides which
//! recorder (if any) is installed.

use errors::GraphError;
use metrics::{counter, gauge, histogram};
use sd_core::GraphStats;

#[derive(Debug, Clone, Copy, Default)]
pub struct GraphMetrics;

impl GraphMetrics {
    pub fn new() -> Self {
        Self
    }

    pub fn record_write(&self, operation: &'static str, result: &Result<(), GraphError>) {
        counter!(
            "graph_writes_total",
            "operation" => operation,
            "status" => status_label(result)
        )
        .increment(1);
    }

    pub fn record_query<T>(
        &self,
        operation: &'static str,
        result: &Result<T, GraphError>,
        duration_secs: f64,
    ) {
        counter!(
            "graph_queries_total",
            "operation" => operation,
            "status" => status_label(result)
        )
        .increment(1);
        histogram!("graph_query_duration_seconds", "operation" => operation).record(duration_secs);
    }

    pub fn record_entities(&self, stats: &GraphStats) {
        gauge!("graph_entities", "kind" => "actors").set(stats.actor_count as f64);
        gauge!("graph_entities", "kind" => "movies").set(stats.movie_count as f64);
        gauge!("graph_entities", "kind" => "relationships").set(stats.relationship_count as f64);
    }
}

fn status_label<T>(result: &Result<T, GraphError>) -> &'static str {
    match result {
        Ok(_) => "success",
        Err(e) => e.code(),
    }
}
