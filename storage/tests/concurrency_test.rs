//! Integration tests for concurrent writers and readers on the in-memory store.

use std::sync::Arc;

use errors::GraphError;
use sd_core::{EntityStore, GraphRead, NewActor, NewMovie, NewRelationship, SnapshotSource};
use storage::InMemoryGraphStore;
use tokio::sync::Barrier;

const WRITERS: usize = 32;

/// Every cast member seen through one snapshot must still exist.
fn assert_cast_consistent(store: &InMemoryGraphStore) {
    let snapshot = store.snapshot();
    for i in 0..20 {
        let movie_id = format!("m{i:02}");
        for actor_id in snapshot.cast_of(&movie_id).unwrap() {
            assert!(
                snapshot.contains_actor(actor_id.as_str()),
                "edge into {movie_id} points at deleted actor {actor_id}"
            );
        }
    }
}

#[tokio::test(flavor = "multi_thread", worker_threads = 8)]
async fn test_concurrent_create_actor_single_winner() {
    let store = Arc::new(InMemoryGraphStore::new());
    let barrier = Arc::new(Barrier::new(WRITERS));

    let mut handles = Vec::with_capacity(WRITERS);
    for i in 0..WRITERS {
        let store = store.clone();
        let barrier = barrier.clone();
        handles.push(tokio::spawn(async move {
            barrier.wait().await;
            store.create_actor(NewActor::new("a1", format!("Alice #{i}")))
        }));
    }

    let mut successes = 0;
    let mut conflicts = 0;
    for handle in handles {
        match handle.await.unwrap() {
            Ok(()) => successes += 1,
            Err(GraphError::Conflict { .. }) => conflicts += 1,
            Err(other) => panic!("unexpected outcome: {other}"),
        }
    }

    assert_eq!(successes, 1, "exactly one writer should win");
    assert_eq!(conflicts, WRITERS - 1);
    assert_eq!(store.stats().actor_count, 1);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 8)]
async fn test_concurrent_create_relationship_single_winner() {
    let store = Arc::new(InMemoryGraphStore::new());
    store.create_actor(NewActor::new("a1", "Alice")).unwrap();
    store
        .create_movie(NewMovie::new("m1", "Film", ["Drama"]))
        .unwrap();

    let barrier = Arc::new(Barrier::new(WRITERS));
    let mut handles = Vec::with_capacity(WRITERS);
    for _ in 0..WRITERS {
        let store = store.clone();
        let barrier = barrier.clone();
        handles.push(tokio::spawn(async move {
            barrier.wait().await;
            store.create_relationship(NewRelationship::new("a1", "m1"))
        }));
    }

    let mut successes = 0;
    for handle in handles {
        if handle.await.unwrap().is_ok() {
            successes += 1;
        }
    }

    assert_eq!(successes, 1);
    assert_eq!(store.stats().relationship_count, 1);
    assert_eq!(store.get_movie("m1").unwrap().actors, vec!["Alice"]);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_readers_never_observe_partial_cascade() {
    let store = Arc::new(InMemoryGraphStore::new());
    for i in 0..20 {
        store
            .create_movie(NewMovie::new(format!("m{i:02}"), format!("Film {i}"), ["Drama"]))
            .unwrap();
    }

    let writer = {
        let store = store.clone();
        tokio::spawn(async move {
            for round in 0..50 {
                let actor_id = format!("a{round}");
                store.create_actor(NewActor::new(&actor_id, "Busy")).unwrap();
                for i in 0..20 {
                    store
                        .create_relationship(NewRelationship::new(&actor_id, format!("m{i:02}")))
                        .unwrap();
                }
                store.delete_actor(&actor_id).unwrap();
                tokio::task::yield_now().await;
            }
        })
    };

    let reader = {
        let store = store.clone();
        tokio::spawn(async move {
            for _ in 0..200 {
                assert_cast_consistent(&store);
                tokio::task::yield_now().await;
            }
        })
    };

    writer.await.unwrap();
    reader.await.unwrap();

    let stats = store.stats();
    assert_eq!(stats.actor_count, 0);
    assert_eq!(stats.relationship_count, 0);
}
