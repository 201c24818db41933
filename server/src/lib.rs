//! # SixDegrees Server
//!
//! HTTP dispatcher over the SixDegrees entity store and query engine. Each
//! request is parsed, checked for required fields, answered by exactly one
//! store or engine operation, and the typed outcome is mapped to a status.
//!
//! ## Endpoints
//!
//! All graph endpoints live under `/api/v1`:
//!
//! - `PUT|POST /addActor`, `/addMovie`, `/addRelationship` - JSON bodies
//! - `GET /getActor`, `/getMovie`, `/hasRelationship` - query strings
//! - `GET /computeBaconNumber`, `/computeBaconPath` - query strings
//! - `GET /top10Actors`, `/moviesByGenre`
//! - `DELETE /deleteActor`
//!
//! Plus `GET /health` and `GET /metrics` (Prometheus text).

pub mod error;
pub mod handlers;
pub mod routes;
pub mod server;
pub mod state;

pub use error::ApiError;
pub use routes::create_router;
pub use server::SixDegreesServer;
pub use state::AppState;
