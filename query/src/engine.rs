use std::sync::Arc;
use std::time::Instant;

use errors::GraphError;
use sd_core::{ActorId, EntityStore, MovieSummary, RankedActor};
use storage::GraphMetrics;
use tracing::{debug, instrument};

use crate::bacon::{Connection, connect};

/// Answers graph queries against an entity store relative to one reference
/// actor.
///
/// Each Bacon query runs entirely under one snapshot, so concurrent writes
/// are either fully visible to it or not at all.
pub struct QueryEngine<S> {
    store: Arc<S>,
    reference: ActorId,
    metrics: GraphMetrics,
}

impl<S> Clone for QueryEngine<S> {
    fn clone(&self) -> Self {
        Self {
            store: Arc::clone(&self.store),
            reference: self.reference.clone(),
            metrics: self.metrics,
        }
    }
}

impl<S: EntityStore> QueryEngine<S> {
    pub fn new(store: Arc<S>, reference: ActorId) -> Self {
        Self {
            store,
            reference,
            metrics: GraphMetrics::new(),
        }
    }

    pub fn reference(&self) -> &ActorId {
        &self.reference
    }

    pub fn store(&self) -> &Arc<S> {
        &self.store
    }

    /// Minimal number of actor-to-actor hops between `actor_id` and the
    /// reference actor. The reference actor itself has number 0.
    #[instrument(skip(self), fields(reference = %self.reference))]
    pub fn bacon_number(&self, actor_id: &str) -> Result<usize, GraphError> {
        let started = Instant::now();
        let result = self.connect(actor_id).map(|c| c.bacon_number());
        self.metrics
            .record_query("bacon_number", &result, started.elapsed().as_secs_f64());
        if let Ok(number) = &result {
            debug!(bacon_number = number, "Computed Bacon number");
        }
        result
    }

    /// Actor ids along a shortest path from `actor_id` to the reference
    /// actor, both endpoints included. Its length is always the Bacon number
    /// plus one.
    #[instrument(skip(self), fields(reference = %self.reference))]
    pub fn bacon_path(&self, actor_id: &str) -> Result<Vec<ActorId>, GraphError> {
        let started = Instant::now();
        let result = self.connect(actor_id).map(|c| c.actors);
        self.metrics
            .record_query("bacon_path", &result, started.elapsed().as_secs_f64());
        result
    }

    #[instrument(skip(self))]
    pub fn top_actors(&self, limit: usize) -> Vec<RankedActor> {
        let started = Instant::now();
        let actors = self.store.list_top_by_out_degree(limit);
        self.metrics
            .record_query("top_actors", &Ok::<_, GraphError>(()), started.elapsed().as_secs_f64());
        actors
    }

    #[instrument(skip(self))]
    pub fn movies_by_genre(&self, genre: &str) -> Vec<MovieSummary> {
        let started = Instant::now();
        let movies = self.store.list_movies_by_genre(genre);
        self.metrics.record_query(
            "movies_by_genre",
            &Ok::<_, GraphError>(()),
            started.elapsed().as_secs_f64(),
        );
        movies
    }

    fn connect(&self, actor_id: &str) -> Result<Connection, GraphError> {
        let snapshot = self.store.snapshot();
        connect(&snapshot, actor_id, self.reference.as_str())
    }
}
