//! Core traits for the SixDegrees graph service

use std::collections::BTreeSet;

use errors::GraphError;

use crate::types::{
    ActorDetails, ActorId, GraphStats, MovieDetails, MovieId, MovieSummary, NewActor, NewMovie,
    NewRelationship, RankedActor,
};

/// Read access to one consistent view of the actor/movie graph.
///
/// Adjacency is exposed as ordered sets so traversals can rely on ascending
/// identifier order when expanding neighbours.
pub trait GraphRead {
    fn actor_name(&self, actor_id: &str) -> Option<&str>;

    fn movie_name(&self, movie_id: &str) -> Option<&str>;

    /// Movies reached through the actor's outgoing ACTED_IN edges.
    fn movies_of(&self, actor_id: &str) -> Option<&BTreeSet<MovieId>>;

    /// Actors with an ACTED_IN edge into the movie.
    fn cast_of(&self, movie_id: &str) -> Option<&BTreeSet<ActorId>>;

    fn contains_actor(&self, actor_id: &str) -> bool {
        self.actor_name(actor_id).is_some()
    }
}

/// Source of read snapshots. No write is applied while a snapshot is alive.
pub trait SnapshotSource: Send + Sync {
    type Snapshot<'a>: GraphRead
    where
        Self: 'a;

    fn snapshot(&self) -> Self::Snapshot<'_>;
}

/// Entity store for actors, movies and ACTED_IN edges.
///
/// Every method is atomic: existence checks and the mutation they guard
/// happen in one critical section.
pub trait EntityStore: SnapshotSource {
    fn create_actor(&self, actor: NewActor) -> Result<(), GraphError>;

    fn create_movie(&self, movie: NewMovie) -> Result<(), GraphError>;

    fn create_relationship(&self, relationship: NewRelationship) -> Result<(), GraphError>;

    fn get_actor(&self, actor_id: &str) -> Option<ActorDetails>;

    fn get_movie(&self, movie_id: &str) -> Option<MovieDetails>;

    fn has_relationship(&self, actor_id: &str, movie_id: &str) -> bool;

    /// Removes the actor together with every edge incident to it.
    fn delete_actor(&self, actor_id: &str) -> Result<(), GraphError>;

    /// Actors with at least one edge, by descending out-degree then
    /// ascending actor id.
    fn list_top_by_out_degree(&self, limit: usize) -> Vec<RankedActor>;

    /// Movies tagged with `genre`, by ascending movie id.
    fn list_movies_by_genre(&self, genre: &str) -> Vec<MovieSummary>;

    fn stats(&self) -> GraphStats;
}
