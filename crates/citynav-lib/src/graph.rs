use std::collections::HashMap;

use tracing::{debug, warn};

use crate::dataset::DataSource;
use crate::error::{Error, Result};
use crate::geo::Coordinates;

/// Minimum Jaro-Winkler similarity for a key to be offered as a suggestion.
const SUGGESTION_THRESHOLD: f64 = 0.8;

/// Index of a node inside a [`Graph`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct NodeId(usize);

impl NodeId {
    /// Position of the node in the graph's arena.
    pub fn index(self) -> usize {
        self.0
    }
}

/// Directed half of an undirected road.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Edge {
    pub target: NodeId,
    pub weight: f64,
}

/// A city in the routing graph.
#[derive(Debug, Clone)]
pub struct Node {
    pub key: String,
    pub coordinates: Coordinates,
    edges: Vec<Edge>,
}

impl Node {
    /// Outgoing edges in insertion order.
    pub fn edges(&self) -> &[Edge] {
        &self.edges
    }
}

/// Graph structure used by the search engines.
///
/// Nodes live in an arena addressed by [`NodeId`]; a key index maps city
/// names to their slot. The graph is built once per request and dropped
/// afterwards, so it carries no interior mutability.
#[derive(Debug, Clone, Default)]
pub struct Graph {
    nodes: Vec<Node>,
    index: HashMap<String, NodeId>,
}

impl Graph {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a node, failing if the key is already taken.
    pub fn add_node(&mut self, key: &str, latitude: f64, longitude: f64) -> Result<NodeId> {
        if self.index.contains_key(key) {
            return Err(Error::DuplicateKey {
                key: key.to_string(),
            });
        }

        let id = NodeId(self.nodes.len());
        self.nodes.push(Node {
            key: key.to_string(),
            coordinates: Coordinates::new(latitude, longitude),
            edges: Vec::new(),
        });
        self.index.insert(key.to_string(), id);
        Ok(id)
    }

    /// Insert both directed halves of an undirected edge with the same weight.
    pub fn add_undirected_edge(&mut self, from: &str, to: &str, weight: f64) -> Result<()> {
        let a = self.require(from)?;
        let b = self.require(to)?;

        self.nodes[a.0].edges.push(Edge { target: b, weight });
        self.nodes[b.0].edges.push(Edge { target: a, weight });
        Ok(())
    }

    /// Return the node stored under `key`.
    pub fn lookup(&self, key: &str) -> Result<&Node> {
        self.require(key).map(|id| self.node(id))
    }

    /// Whether a node with `key` exists.
    pub fn contains(&self, key: &str) -> bool {
        self.index.contains_key(key)
    }

    /// Resolve a key to its node identifier.
    pub fn node_id(&self, key: &str) -> Option<NodeId> {
        self.index.get(key).copied()
    }

    /// Access a node by identifier.
    ///
    /// # Panics
    ///
    /// Panics if `id` was issued by a larger graph. Use [`Graph::get`] when
    /// the identifier's origin is not known.
    pub fn node(&self, id: NodeId) -> &Node {
        &self.nodes[id.0]
    }

    /// Access a node by identifier, or `None` when `id` is out of range.
    pub fn get(&self, id: NodeId) -> Option<&Node> {
        self.nodes.get(id.0)
    }

    /// Neighbour/weight pairs of `id` in insertion order.
    pub fn neighbours(&self, id: NodeId) -> &[Edge] {
        self.nodes
            .get(id.0)
            .map(|node| node.edges.as_slice())
            .unwrap_or(&[])
    }

    /// Weight of the direct road between two nodes, if they are adjacent.
    ///
    /// When parallel edges exist the lightest one is returned.
    pub fn edge_weight(&self, from: NodeId, to: NodeId) -> Option<f64> {
        self.neighbours(from)
            .iter()
            .filter(|edge| edge.target == to)
            .map(|edge| edge.weight)
            .min_by(|a, b| a.total_cmp(b))
    }

    /// Node keys in insertion order.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.nodes.iter().map(|node| node.key.as_str())
    }

    /// Number of nodes.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Number of undirected edges.
    pub fn edge_count(&self) -> usize {
        self.nodes.iter().map(|node| node.edges.len()).sum::<usize>() / 2
    }

    /// Up to `limit` keys that look like `name`, best match first.
    pub fn suggest(&self, name: &str, limit: usize) -> Vec<String> {
        let needle = name.to_lowercase();
        let mut scored: Vec<(f64, &str)> = self
            .keys()
            .map(|key| (strsim::jaro_winkler(&needle, &key.to_lowercase()), key))
            .filter(|(score, _)| *score >= SUGGESTION_THRESHOLD)
            .collect();
        scored.sort_by(|a, b| b.0.total_cmp(&a.0).then_with(|| a.1.cmp(b.1)));
        scored
            .into_iter()
            .take(limit)
            .map(|(_, key)| key.to_string())
            .collect()
    }

    /// Resolve a city name, producing [`Error::UnknownCity`] with suggestions
    /// when it is missing.
    pub fn resolve_city(&self, name: &str) -> Result<NodeId> {
        self.node_id(name).ok_or_else(|| Error::UnknownCity {
            name: name.to_string(),
            suggestions: self.suggest(name, 3),
        })
    }

    fn require(&self, key: &str) -> Result<NodeId> {
        self.node_id(key).ok_or_else(|| Error::UnknownNode {
            key: key.to_string(),
        })
    }
}

/// Build the routing graph from a data collaborator snapshot.
///
/// Cities become nodes and every distance record becomes an undirected edge.
/// Weights are trusted as supplied; obviously broken rows are logged but not
/// rejected.
pub fn build_graph<S: DataSource + ?Sized>(source: &S) -> Result<Graph> {
    let cities = source.list_cities()?;
    let distances = source.list_distances()?;

    let mut graph = Graph::new();
    for city in &cities {
        graph.add_node(&city.name, city.latitude, city.longitude)?;
    }

    for record in &distances {
        if !record.km.is_finite() || record.km < 0.0 {
            warn!(from = %record.from, to = %record.to, km = record.km, "suspicious edge weight");
        }
        graph.add_undirected_edge(&record.from, &record.to, record.km)?;
    }

    debug!(
        nodes = graph.len(),
        edges = graph.edge_count(),
        "built routing graph"
    );
    Ok(graph)
}
