//! # Storage Layer
//!
//! Entity store for the SixDegrees actor/movie graph.

pub mod graph;
pub mod telemetry;

pub use graph::{GraphSnapshot, InMemoryGraphStore};
pub use telemetry::GraphMetrics;
