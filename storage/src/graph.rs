//! In-memory entity store for the actor/movie graph.
//!
//! ## Features
//! - Indexed adjacency in both directions (actor → movies, movie → cast)
//! - Genre index for attribute filtering
//! - Atomic check-and-insert and cascading actor deletion
//! - Consistent read snapshots for traversals
//!
//! ## Thread Safety
//! All state sits behind one `parking_lot::RwLock`. Reads share the lock and
//! run concurrently; every write holds the exclusive lock for its whole
//! check-then-act sequence, so two callers racing on the same key can never
//! both succeed.

use parking_lot::{RwLock, RwLockReadGuard};
use sd_core::{
    ActorDetails, ActorId, EntityStore, GraphRead, GraphStats, MovieDetails, MovieId,
    MovieSummary, NewActor, NewMovie, NewRelationship, RankedActor, SnapshotSource,
    validate_request,
};
use errors::{EntityKind, GraphError};
use std::cmp::Reverse;
use std::collections::hash_map::Entry;
use std::collections::{BTreeSet, HashMap};
use tracing::{debug, error, info, instrument, warn};

use crate::telemetry::GraphMetrics;

#[derive(Debug)]
struct ActorRecord {
    name: String,
    movies: BTreeSet<MovieId>,
}

#[derive(Debug)]
struct MovieRecord {
    name: String,
    genres: BTreeSet<String>,
    cast: BTreeSet<ActorId>,
}

/// Canonical graph state. Only reachable through the store's lock.
#[derive(Debug, Default)]
struct GraphState {
    actors: HashMap<ActorId, ActorRecord>,
    movies: HashMap<MovieId, MovieRecord>,
    genre_index: HashMap<String, BTreeSet<MovieId>>,
    relationship_count: usize,
}

impl GraphState {
    fn stats(&self) -> GraphStats {
        GraphStats {
            actor_count: self.actors.len(),
            movie_count: self.movies.len(),
            relationship_count: self.relationship_count,
        }
    }
}

impl GraphRead for GraphState {
    fn actor_name(&self, actor_id: &str) -> Option<&str> {
        self.actors.get(actor_id).map(|a| a.name.as_str())
    }

    fn movie_name(&self, movie_id: &str) -> Option<&str> {
        self.movies.get(movie_id).map(|m| m.name.as_str())
    }

    fn movies_of(&self, actor_id: &str) -> Option<&BTreeSet<MovieId>> {
        self.actors.get(actor_id).map(|a| &a.movies)
    }

    fn cast_of(&self, movie_id: &str) -> Option<&BTreeSet<ActorId>> {
        self.movies.get(movie_id).map(|m| &m.cast)
    }
}

/// Shared read guard over the graph. Writers wait until it is dropped.
pub struct GraphSnapshot<'a> {
    guard: RwLockReadGuard<'a, GraphState>,
}

impl GraphRead for GraphSnapshot<'_> {
    fn actor_name(&self, actor_id: &str) -> Option<&str> {
        self.guard.actor_name(actor_id)
    }

    fn movie_name(&self, movie_id: &str) -> Option<&str> {
        self.guard.movie_name(movie_id)
    }

    fn movies_of(&self, actor_id: &str) -> Option<&BTreeSet<MovieId>> {
        self.guard.movies_of(actor_id)
    }

    fn cast_of(&self, movie_id: &str) -> Option<&BTreeSet<ActorId>> {
        self.guard.cast_of(movie_id)
    }
}

/// In-memory implementation of [`EntityStore`].
#[derive(Debug, Default)]
pub struct InMemoryGraphStore {
    state: RwLock<GraphState>,
    metrics: GraphMetrics,
}

impl InMemoryGraphStore {
    pub fn new() -> Self {
        info!("Initializing in-memory graph store");
        Self::default()
    }

    fn insert_actor(&self, actor: NewActor) -> Result<(), GraphError> {
        validate_request(&actor)?;
        let actor_id: ActorId = actor.actor_id.parse()?;

        let mut state = self.state.write();
        match state.actors.entry(actor_id) {
            Entry::Occupied(existing) => {
                warn!(actor_id = %existing.key(), "Actor already exists");
                Err(GraphError::conflict(EntityKind::Actor, existing.key().as_str()))
            }
            Entry::Vacant(slot) => {
                info!(actor_id = %slot.key(), "Actor added");
                slot.insert(ActorRecord {
                    name: actor.name,
                    movies: BTreeSet::new(),
                });
                self.metrics.record_entities(&state.stats());
                Ok(())
            }
        }
    }

    fn insert_movie(&self, movie: NewMovie) -> Result<(), GraphError> {
        validate_request(&movie)?;
        let movie_id: MovieId = movie.movie_id.parse()?;
        let genres: BTreeSet<String> = movie.genres.into_iter().collect();

        let mut guard = self.state.write();
        let state = &mut *guard;
        if state.movies.contains_key(&movie_id) {
            warn!(movie_id = %movie_id, "Movie already exists");
            return Err(GraphError::conflict(EntityKind::Movie, movie_id.as_str()));
        }

        for genre in &genres {
            state
                .genre_index
                .entry(genre.clone())
                .or_default()
                .insert(movie_id.clone());
        }
        info!(movie_id = %movie_id, genres = ?genres, "Movie added");
        state.movies.insert(
            movie_id,
            MovieRecord {
                name: movie.name,
                genres,
                cast: BTreeSet::new(),
            },
        );
        self.metrics.record_entities(&state.stats());
        Ok(())
    }

    fn insert_relationship(&self, relationship: NewRelationship) -> Result<(), GraphError> {
        let actor_id: ActorId = relationship.actor_id.parse()?;
        let movie_id: MovieId = relationship.movie_id.parse()?;

        let mut guard = self.state.write();
        let state = &mut *guard;

        let Some(actor) = state.actors.get_mut(&actor_id) else {
            warn!(actor_id = %actor_id, "Actor not found for relationship");
            return Err(GraphError::not_found(EntityKind::Actor, actor_id.into_inner()));
        };
        let Some(movie) = state.movies.get_mut(&movie_id) else {
            warn!(movie_id = %movie_id, "Movie not found for relationship");
            return Err(GraphError::not_found(EntityKind::Movie, movie_id.into_inner()));
        };

        if actor.movies.contains(&movie_id) {
            warn!(
                actor_id = %actor_id,
                movie_id = %movie_id,
                "Relationship ACTED_IN already exists"
            );
            return Err(GraphError::conflict(
                EntityKind::Relationship,
                format!("{actor_id}->{movie_id}"),
            ));
        }

        actor.movies.insert(movie_id.clone());
        movie.cast.insert(actor_id.clone());
        state.relationship_count += 1;

        info!(actor_id = %actor_id, movie_id = %movie_id, "Relationship ACTED_IN added");
        self.metrics.record_entities(&state.stats());
        Ok(())
    }

    fn remove_actor(&self, actor_id: &str) -> Result<(), GraphError> {
        let mut guard = self.state.write();
        let state = &mut *guard;

        let Some(record) = state.actors.remove(actor_id) else {
            warn!(actor_id = %actor_id, "Actor not found for deletion");
            return Err(GraphError::not_found(EntityKind::Actor, actor_id));
        };

        for movie_id in &record.movies {
            match state.movies.get_mut(movie_id) {
                Some(movie) => {
                    movie.cast.remove(actor_id);
                }
                None => error!(movie_id = %movie_id, "Dangling ACTED_IN edge during cascade"),
            }
        }
        state.relationship_count -= record.movies.len();

        info!(
            actor_id = %actor_id,
            edges_removed = record.movies.len(),
            "Actor deleted with cascading edges"
        );
        self.metrics.record_entities(&state.stats());
        Ok(())
    }
}

impl SnapshotSource for InMemoryGraphStore {
    type Snapshot<'a> = GraphSnapshot<'a>;

    fn snapshot(&self) -> GraphSnapshot<'_> {
        GraphSnapshot {
            guard: self.state.read(),
        }
    }
}

impl EntityStore for InMemoryGraphStore {
    #[instrument(skip(self, actor), fields(actor_id = %actor.actor_id))]
    fn create_actor(&self, actor: NewActor) -> Result<(), GraphError> {
        let result = self.insert_actor(actor);
        self.metrics.record_write("create_actor", &result);
        result
    }

    #[instrument(skip(self, movie), fields(movie_id = %movie.movie_id))]
    fn create_movie(&self, movie: NewMovie) -> Result<(), GraphError> {
        let result = self.insert_movie(movie);
        self.metrics.record_write("create_movie", &result);
        result
    }

    #[instrument(
        skip(self, relationship),
        fields(actor_id = %relationship.actor_id, movie_id = %relationship.movie_id)
    )]
    fn create_relationship(&self, relationship: NewRelationship) -> Result<(), GraphError> {
        let result = validate_request(&relationship)
            .and_then(|()| self.insert_relationship(relationship));
        self.metrics.record_write("create_relationship", &result);
        result
    }

    #[instrument(skip(self))]
    fn get_actor(&self, actor_id: &str) -> Option<ActorDetails> {
        let state = self.state.read();
        let (id, record) = state.actors.get_key_value(actor_id)?;

        let movies = record
            .movies
            .iter()
            .filter_map(|movie_id| {
                let name = state.movie_name(movie_id.as_str());
                if name.is_none() {
                    error!(movie_id = %movie_id, "Dangling ACTED_IN edge");
                }
                name.map(str::to_string)
            })
            .collect::<Vec<_>>();

        debug!(movie_count = movies.len(), "Actor fetched");
        Some(ActorDetails {
            actor_id: id.clone(),
            name: record.name.clone(),
            movies,
        })
    }

    #[instrument(skip(self))]
    fn get_movie(&self, movie_id: &str) -> Option<MovieDetails> {
        let state = self.state.read();
        let (id, record) = state.movies.get_key_value(movie_id)?;

        let actors = record
            .cast
            .iter()
            .filter_map(|actor_id| {
                let name = state.actor_name(actor_id.as_str());
                if name.is_none() {
                    error!(actor_id = %actor_id, "Dangling ACTED_IN edge");
                }
                name.map(str::to_string)
            })
            .collect::<Vec<_>>();

        debug!(actor_count = actors.len(), "Movie fetched");
        Some(MovieDetails {
            movie_id: id.clone(),
            name: record.name.clone(),
            genres: record.genres.iter().cloned().collect(),
            actors,
        })
    }

    fn has_relationship(&self, actor_id: &str, movie_id: &str) -> bool {
        self.state
            .read()
            .movies_of(actor_id)
            .is_some_and(|movies| movies.contains(movie_id))
    }

    #[instrument(skip(self))]
    fn delete_actor(&self, actor_id: &str) -> Result<(), GraphError> {
        let result = self.remove_actor(actor_id);
        self.metrics.record_write("delete_actor", &result);
        result
    }

    #[instrument(skip(self))]
    fn list_top_by_out_degree(&self, limit: usize) -> Vec<RankedActor> {
        if limit == 0 {
            return Vec::new();
        }

        let state = self.state.read();
        let mut ranked: Vec<(&ActorId, &ActorRecord)> = state
            .actors
            .iter()
            .filter(|(_, record)| !record.movies.is_empty())
            .collect();
        ranked.sort_unstable_by_key(|(id, record)| (Reverse(record.movies.len()), *id));
        ranked.truncate(limit);

        debug!(returned = ranked.len(), "Ranked actors by out-degree");
        ranked
            .into_iter()
            .map(|(id, record)| RankedActor {
                actor_id: id.clone(),
                name: record.name.clone(),
                out_degree: record.movies.len(),
            })
            .collect()
    }

    #[instrument(skip(self))]
    fn list_movies_by_genre(&self, genre: &str) -> Vec<MovieSummary> {
        let state = self.state.read();
        let Some(movie_ids) = state.genre_index.get(genre) else {
            debug!("No movies tagged with genre");
            return Vec::new();
        };

        movie_ids
            .iter()
            .filter_map(|movie_id| {
                state.movie_name(movie_id.as_str()).map(|name| MovieSummary {
                    movie_id: movie_id.clone(),
                    name: name.to_string(),
                })
            })
            .collect()
    }

    fn stats(&self) -> GraphStats {
        self.state.read().stats()
    }
}
