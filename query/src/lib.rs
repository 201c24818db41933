//! # Query Engine
//!
//! Graph queries for the SixDegrees service: Bacon numbers and Bacon paths
//! computed by breadth-first search over a single store snapshot, plus the
//! ranked listings that read straight through to the entity store.

pub mod bacon;
pub mod engine;

pub use bacon::{Connection, Node, connect, shortest_path};
pub use engine::QueryEngine;
