//! # SixDegrees Core
//!
//! Shared types and traits for the SixDegrees graph service.
//!
//! This crate provides:
//! - Identifier newtypes for actors and movies
//! - Validated creation requests
//! - Read models returned by the entity store
//! - The store traits the query engine is written against
//!
//! # Best Practices
//!
//! - Follows Microsoft Pragmatic Rust Guidelines
//! - Uses Rust Edition 2024
//! - Errors are `errors::GraphError` values, never panics

pub mod traits;
pub mod types;

pub use traits::{EntityStore, GraphRead, SnapshotSource};
pub use types::{
    ActorDetails, ActorId, DEFAULT_REFERENCE_ACTOR_ID, GraphStats, MovieDetails, MovieId,
    MovieSummary, NewActor, NewMovie, NewRelationship, RankedActor, validate_request,
};
