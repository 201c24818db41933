//! Breadth-first connectivity over the bipartite actor/movie graph.
//!
//! ACTED_IN edges are directed actor → movie, but connectivity ignores
//! direction: an actor is adjacent to each of its movies and a movie to each
//! of its cast members.
//!
//! ## Tie-break
//! The queue is FIFO and neighbours are expanded in ascending identifier
//! order (adjacency sets are ordered). A node's parent is the first dequeued
//! node that discovers it, so the same graph always yields the same path.

use std::collections::hash_map::Entry;
use std::collections::{HashMap, VecDeque};

use errors::{EntityKind, GraphError};
use sd_core::{ActorId, GraphRead};
use tracing::debug;

/// A node of the bipartite graph, borrowed from the snapshot being searched.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Node<'g> {
    Actor(&'g str),
    Movie(&'g str),
}

/// Result of a successful connectivity search.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Connection {
    /// Actor-layer ids from the queried actor to the reference, inclusive.
    pub actors: Vec<ActorId>,
    /// Number of graph edges on the path (actor→movie and movie→actor hops).
    pub edge_count: usize,
}

impl Connection {
    /// Actor-to-actor hops: each one crosses exactly two graph edges.
    pub fn bacon_number(&self) -> usize {
        self.edge_count / 2
    }
}

/// Shortest undirected path from `start` to `target`, both actor ids.
///
/// Returns every node on the path including both endpoints, or `None` when
/// the two actors are not connected. Stops as soon as `target` is dequeued.
pub fn shortest_path<'g, G>(graph: &'g G, start: &'g str, target: &'g str) -> Option<Vec<Node<'g>>>
where
    G: GraphRead + ?Sized,
{
    let goal = Node::Actor(target);
    let mut parents: HashMap<Node<'g>, Option<Node<'g>>> = HashMap::new();
    let mut queue: VecDeque<Node<'g>> = VecDeque::new();

    parents.insert(Node::Actor(start), None);
    queue.push_back(Node::Actor(start));

    while let Some(node) = queue.pop_front() {
        if node == goal {
            debug!(explored = parents.len(), "Reference actor reached");
            return Some(trace_back(&parents, node));
        }

        let mut discover = |next: Node<'g>| {
            if let Entry::Vacant(slot) = parents.entry(next) {
                slot.insert(Some(node));
                queue.push_back(next);
            }
        };

        match node {
            Node::Actor(actor_id) => {
                for movie_id in graph.movies_of(actor_id).into_iter().flatten() {
                    discover(Node::Movie(movie_id.as_str()));
                }
            }
            Node::Movie(movie_id) => {
                for actor_id in graph.cast_of(movie_id).into_iter().flatten() {
                    discover(Node::Actor(actor_id.as_str()));
                }
            }
        }
    }

    debug!(explored = parents.len(), "Component exhausted without reaching reference");
    None
}

fn trace_back<'g>(parents: &HashMap<Node<'g>, Option<Node<'g>>>, end: Node<'g>) -> Vec<Node<'g>> {
    let mut path = vec![end];
    let mut current = end;
    while let Some(Some(parent)) = parents.get(&current) {
        path.push(*parent);
        current = *parent;
    }
    path.reverse();
    path
}

/// Connects `actor_id` to `reference` over one consistent view of the graph.
///
/// Both actors must exist; an absent actor or an absent path is reported as
/// [`GraphError::NotFound`].
pub fn connect<G>(graph: &G, actor_id: &str, reference: &str) -> Result<Connection, GraphError>
where
    G: GraphRead + ?Sized,
{
    if !graph.contains_actor(actor_id) {
        return Err(GraphError::not_found(EntityKind::Actor, actor_id));
    }
    if !graph.contains_actor(reference) {
        return Err(GraphError::not_found(EntityKind::Actor, reference));
    }

    let path = shortest_path(graph, actor_id, reference)
        .ok_or_else(|| GraphError::not_found(EntityKind::BaconPath, actor_id))?;

    let edge_count = path.len() - 1;
    if edge_count % 2 != 0 {
        return Err(GraphError::internal(format!(
            "odd-length path ({edge_count} edges) between two actors"
        )));
    }

    let actors = path
        .into_iter()
        .filter_map(|node| match node {
            Node::Actor(id) => ActorId::new(id),
            Node::Movie(_) => None,
        })
        .collect();

    Ok(Connection { actors, edge_count })
}

#[cfg(test)]
mod tests {
    use super::*;
    use sd_core::MovieId;
    use std::collections::BTreeSet;

    /// Adjacency-only graph for exercising the traversal without a store.
    #[derive(Default)]
    struct TestGraph {
        actors: HashMap<String, BTreeSet<MovieId>>,
        movies: HashMap<String, BTreeSet<ActorId>>,
    }

    impl TestGraph {
        fn with_edges(edges: &[(&str, &str)]) -> Self {
            let mut graph = Self::default();
            for (actor, movie) in edges {
                graph
                    .actors
                    .entry((*actor).to_string())
                    .or_default()
                    .insert(MovieId::new(*movie).unwrap());
                graph
                    .movies
                    .entry((*movie).to_string())
                    .or_default()
                    .insert(ActorId::new(*actor).unwrap());
            }
            graph
        }

        fn add_actor(&mut self, actor: &str) {
            self.actors.entry(actor.to_string()).or_default();
        }
    }

    impl GraphRead for TestGraph {
        fn actor_name(&self, actor_id: &str) -> Option<&str> {
            self.actors.get_key_value(actor_id).map(|(k, _)| k.as_str())
        }

        fn movie_name(&self, movie_id: &str) -> Option<&str> {
            self.movies.get_key_value(movie_id).map(|(k, _)| k.as_str())
        }

        fn movies_of(&self, actor_id: &str) -> Option<&BTreeSet<MovieId>> {
            self.actors.get(actor_id)
        }

        fn cast_of(&self, movie_id: &str) -> Option<&BTreeSet<ActorId>> {
            self.movies.get(movie_id)
        }
    }

    fn actor_ids(connection: &Connection) -> Vec<&str> {
        connection.actors.iter().map(ActorId::as_str).collect()
    }

    #[test]
    fn test_reference_to_itself() {
        let mut graph = TestGraph::default();
        graph.add_actor("kb");

        let connection = connect(&graph, "kb", "kb").unwrap();
        assert_eq!(connection.edge_count, 0);
        assert_eq!(connection.bacon_number(), 0);
        assert_eq!(actor_ids(&connection), vec!["kb"]);
    }

    #[test]
    fn test_shared_movie_is_one_hop() {
        let graph = TestGraph::with_edges(&[("a1", "m1"), ("kb", "m1")]);

        let path = shortest_path(&graph, "a1", "kb").unwrap();
        assert_eq!(
            path,
            vec![Node::Actor("a1"), Node::Movie("m1"), Node::Actor("kb")]
        );

        let connection = connect(&graph, "a1", "kb").unwrap();
        assert_eq!(connection.bacon_number(), 1);
        assert_eq!(actor_ids(&connection), vec!["a1", "kb"]);
    }

    #[test]
    fn test_chain_of_three_hops() {
        let graph = TestGraph::with_edges(&[
            ("a", "m1"),
            ("b", "m1"),
            ("b", "m2"),
            ("c", "m2"),
            ("c", "m3"),
            ("kb", "m3"),
        ]);

        let connection = connect(&graph, "a", "kb").unwrap();
        assert_eq!(connection.edge_count, 6);
        assert_eq!(connection.bacon_number(), 3);
        assert_eq!(actor_ids(&connection), vec!["a", "b", "c", "kb"]);
    }

    #[test]
    fn test_prefers_shorter_route() {
        let graph = TestGraph::with_edges(&[
            ("a", "long1"),
            ("x", "long1"),
            ("x", "long2"),
            ("kb", "long2"),
            ("a", "short"),
            ("kb", "short"),
        ]);

        let connection = connect(&graph, "a", "kb").unwrap();
        assert_eq!(connection.bacon_number(), 1);
    }

    #[test]
    fn test_tie_break_takes_smallest_ids() {
        // Two equal-length routes: a -m1- b -m3- kb and a -m2- c -m4- kb.
        let graph = TestGraph::with_edges(&[
            ("a", "m2"),
            ("a", "m1"),
            ("c", "m2"),
            ("b", "m1"),
            ("c", "m4"),
            ("b", "m3"),
            ("kb", "m4"),
            ("kb", "m3"),
        ]);

        for _ in 0..10 {
            let path = shortest_path(&graph, "a", "kb").unwrap();
            assert_eq!(
                path,
                vec![
                    Node::Actor("a"),
                    Node::Movie("m1"),
                    Node::Actor("b"),
                    Node::Movie("m3"),
                    Node::Actor("kb"),
                ]
            );
        }
    }

    #[test]
    fn test_disconnected_actor() {
        let mut graph = TestGraph::with_edges(&[("kb", "m1")]);
        graph.add_actor("a2");

        let err = connect(&graph, "a2", "kb").unwrap_err();
        assert_eq!(err, GraphError::not_found(EntityKind::BaconPath, "a2"));
    }

    #[test]
    fn test_missing_actor_or_reference() {
        let graph = TestGraph::with_edges(&[("a1", "m1")]);

        let err = connect(&graph, "ghost", "a1").unwrap_err();
        assert_eq!(err, GraphError::not_found(EntityKind::Actor, "ghost"));

        let err = connect(&graph, "a1", "kb").unwrap_err();
        assert_eq!(err, GraphError::not_found(EntityKind::Actor, "kb"));
    }

    #[test]
    fn test_movie_id_equal_to_actor_id_is_not_confused() {
        // Movie "kb" shares its id with the reference actor.
        let graph = TestGraph::with_edges(&[("a1", "kb"), ("z", "kb"), ("z", "m9"), ("kb", "m9")]);

        let connection = connect(&graph, "a1", "kb").unwrap();
        assert_eq!(connection.bacon_number(), 2);
        assert_eq!(actor_ids(&connection), vec!["a1", "z", "kb"]);
    }
}
