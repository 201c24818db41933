//! HTTP request handlers for the SixDegrees server.

use axum::{
    Json,
    body::Bytes,
    extract::{Query, State},
    http::{StatusCode, header},
    response::IntoResponse,
};
use errors::{EntityKind, GraphError};
use sd_core::{
    ActorDetails, ActorId, EntityStore, GraphStats, MovieDetails, MovieSummary, NewActor,
    NewMovie, NewRelationship, RankedActor,
};
use serde::{Deserialize, Serialize, de::DeserializeOwned};
use std::sync::Arc;

use crate::error::{ApiError, Result};
use crate::state::AppState;

/// Plain acknowledgement for successful writes.
#[derive(Debug, Serialize, Deserialize)]
pub struct MessageResponse {
    pub message: String,
}

impl MessageResponse {
    fn new(message: &str) -> Json<Self> {
        Json(Self {
            message: message.to_string(),
        })
    }
}

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: String,
    #[serde(flatten)]
    pub stats: GraphStats,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AddActorRequest {
    pub name: Option<String>,
    pub actor_id: Option<String>,
}

/// `genre` may be sent as a single tag or as a list of tags.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub enum GenreField {
    One(String),
    Many(Vec<String>),
}

impl GenreField {
    fn into_tags(self) -> Vec<String> {
        match self {
            Self::One(tag) => vec![tag],
            Self::Many(tags) => tags,
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AddMovieRequest {
    pub name: Option<String>,
    pub movie_id: Option<String>,
    pub genre: Option<GenreField>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RelationshipRequest {
    pub actor_id: Option<String>,
    pub movie_id: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ActorParams {
    pub actor_id: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MovieParams {
    pub movie_id: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct GenreParams {
    pub genre: Option<String>,
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RelationshipResponse {
    pub actor_id: String,
    pub movie_id: String,
    pub has_relationship: bool,
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BaconNumberResponse {
    pub actor_id: String,
    pub bacon_number: usize,
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BaconPathResponse {
    pub actor_id: String,
    pub bacon_path: Vec<ActorId>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct TopActorsResponse {
    pub actors: Vec<RankedActor>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct MoviesByGenreResponse {
    pub genre: String,
    pub movies: Vec<MovieSummary>,
}

/// Parses a JSON body regardless of the declared content type.
fn parse_body<T: DeserializeOwned>(body: &Bytes) -> Result<T> {
    serde_json::from_slice(body).map_err(|e| {
        tracing::debug!(error = %e, "Rejected request body");
        ApiError::BadRequest(format!("JSON format not valid: {e}"))
    })
}

fn required(field: &str, value: Option<String>) -> Result<String> {
    match value {
        Some(v) if !v.is_empty() => Ok(v),
        _ => Err(ApiError::BadRequest(format!("{field} is required"))),
    }
}

/// Health check endpoint.
///
/// Always 200 while the process is serving; reports current entity counts.
pub async fn health(State(state): State<Arc<AppState>>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy".to_string(),
        stats: state.store.stats(),
    })
}

/// Prometheus text exposition, or 404 when metrics are disabled.
pub async fn metrics(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    match &state.metrics_handle {
        Some(handle) => (
            StatusCode::OK,
            [(header::CONTENT_TYPE, "text/plain; version=0.0.4")],
            handle.render(),
        ),
        None => (
            StatusCode::NOT_FOUND,
            [(header::CONTENT_TYPE, "text/plain")],
            "Metrics are disabled".to_string(),
        ),
    }
}

/// PUT|POST /api/v1/addActor
pub async fn add_actor(
    State(state): State<Arc<AppState>>,
    body: Bytes,
) -> Result<Json<MessageResponse>> {
    let request: AddActorRequest = parse_body(&body)?;
    let name = required("name", request.name)?;
    let actor_id = required("actorId", request.actor_id)?;

    state.store.create_actor(NewActor::new(actor_id, name))?;
    Ok(MessageResponse::new("Actor successfully added"))
}

/// PUT|POST /api/v1/addMovie
pub async fn add_movie(
    State(state): State<Arc<AppState>>,
    body: Bytes,
) -> Result<Json<MessageResponse>> {
    let request: AddMovieRequest = parse_body(&body)?;
    let name = required("name", request.name)?;
    let movie_id = required("movieId", request.movie_id)?;
    let genres = request
        .genre
        .map(GenreField::into_tags)
        .filter(|tags| !tags.is_empty())
        .ok_or_else(|| ApiError::BadRequest("genre is required".to_string()))?;

    state
        .store
        .create_movie(NewMovie::new(movie_id, name, genres))?;
    Ok(MessageResponse::new("Movie successfully added"))
}

/// PUT|POST /api/v1/addRelationship
pub async fn add_relationship(
    State(state): State<Arc<AppState>>,
    body: Bytes,
) -> Result<Json<MessageResponse>> {
    let request: RelationshipRequest = parse_body(&body)?;
    let actor_id = required("actorId", request.actor_id)?;
    let movie_id = required("movieId", request.movie_id)?;

    state
        .store
        .create_relationship(NewRelationship::new(actor_id, movie_id))?;
    Ok(MessageResponse::new("Relationship successfully added"))
}

/// GET /api/v1/getActor?actorId=
pub async fn get_actor(
    State(state): State<Arc<AppState>>,
    Query(params): Query<ActorParams>,
) -> Result<Json<ActorDetails>> {
    let actor_id = required("actorId", params.actor_id)?;
    state
        .store
        .get_actor(&actor_id)
        .map(Json)
        .ok_or_else(|| GraphError::not_found(EntityKind::Actor, actor_id).into())
}

/// GET /api/v1/getMovie?movieId=
pub async fn get_movie(
    State(state): State<Arc<AppState>>,
    Query(params): Query<MovieParams>,
) -> Result<Json<MovieDetails>> {
    let movie_id = required("movieId", params.movie_id)?;
    state
        .store
        .get_movie(&movie_id)
        .map(Json)
        .ok_or_else(|| GraphError::not_found(EntityKind::Movie, movie_id).into())
}

/// GET /api/v1/hasRelationship?actorId=&movieId=
///
/// Answers 404 when no such edge exists, including when either endpoint is
/// absent.
pub async fn has_relationship(
    State(state): State<Arc<AppState>>,
    Query(params): Query<RelationshipRequest>,
) -> Result<Json<RelationshipResponse>> {
    let actor_id = required("actorId", params.actor_id)?;
    let movie_id = required("movieId", params.movie_id)?;

    if !state.store.has_relationship(&actor_id, &movie_id) {
        return Err(
            GraphError::not_found(EntityKind::Relationship, format!("{actor_id}->{movie_id}"))
                .into(),
        );
    }

    Ok(Json(RelationshipResponse {
        actor_id,
        movie_id,
        has_relationship: true,
    }))
}

/// GET /api/v1/computeBaconNumber?actorId=
pub async fn compute_bacon_number(
    State(state): State<Arc<AppState>>,
    Query(params): Query<ActorParams>,
) -> Result<Json<BaconNumberResponse>> {
    let actor_id = required("actorId", params.actor_id)?;
    let bacon_number = state.engine.bacon_number(&actor_id)?;

    Ok(Json(BaconNumberResponse {
        actor_id,
        bacon_number,
    }))
}

/// GET /api/v1/computeBaconPath?actorId=
pub async fn compute_bacon_path(
    State(state): State<Arc<AppState>>,
    Query(params): Query<ActorParams>,
) -> Result<Json<BaconPathResponse>> {
    let actor_id = required("actorId", params.actor_id)?;
    let bacon_path = state.engine.bacon_path(&actor_id)?;

    Ok(Json(BaconPathResponse {
        actor_id,
        bacon_path,
    }))
}

/// GET /api/v1/top10Actors
///
/// The list length comes from `graph.top_actors_limit`.
pub async fn top_actors(State(state): State<Arc<AppState>>) -> Result<Json<TopActorsResponse>> {
    let actors = state.engine.top_actors(state.config.graph.top_actors_limit);
    if actors.is_empty() {
        return Err(ApiError::NotFound("No actors with movies".to_string()));
    }

    tracing::debug!(count = actors.len(), "Returning top actors");
    Ok(Json(TopActorsResponse { actors }))
}

/// GET /api/v1/moviesByGenre?genre=
pub async fn movies_by_genre(
    State(state): State<Arc<AppState>>,
    Query(params): Query<GenreParams>,
) -> Result<Json<MoviesByGenreResponse>> {
    let genre = required("genre", params.genre)?;
    let movies = state.engine.movies_by_genre(&genre);
    if movies.is_empty() {
        return Err(ApiError::NotFound(format!("No movies found for genre {genre}")));
    }

    Ok(Json(MoviesByGenreResponse { genre, movies }))
}

/// DELETE /api/v1/deleteActor?actorId=
pub async fn delete_actor(
    State(state): State<Arc<AppState>>,
    Query(params): Query<ActorParams>,
) -> Result<Json<MessageResponse>> {
    let actor_id = required("actorId", params.actor_id)?;
    state.store.delete_actor(&actor_id)?;
    Ok(MessageResponse::new("Actor deleted successfully"))
}
