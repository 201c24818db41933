//! Route definitions for the SixDegrees server.

use axum::{
    Router,
    routing::{delete, get, put},
};
use std::sync::Arc;
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

use crate::handlers;
use crate::state::AppState;

/// Creates the Axum router with all routes configured.
pub fn create_router(state: Arc<AppState>) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    // Writes accept PUT and POST alike.
    let api_v1 = Router::new()
        .route(
            "/addActor",
            put(handlers::add_actor).post(handlers::add_actor),
        )
        .route(
            "/addMovie",
            put(handlers::add_movie).post(handlers::add_movie),
        )
        .route(
            "/addRelationship",
            put(handlers::add_relationship).post(handlers::add_relationship),
        )
        .route("/getActor", get(handlers::get_actor))
        .route("/getMovie", get(handlers::get_movie))
        .route("/hasRelationship", get(handlers::has_relationship))
        .route("/computeBaconNumber", get(handlers::compute_bacon_number))
        .route("/computeBaconPath", get(handlers::compute_bacon_path))
        .route("/top10Actors", get(handlers::top_actors))
        .route("/moviesByGenre", get(handlers::movies_by_genre))
        .route("/deleteActor", delete(handlers::delete_actor));

    Router::new()
        .route("/health", get(handlers::health))
        .route("/metrics", get(handlers::metrics))
        .nest("/api/v1", api_v1)
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
