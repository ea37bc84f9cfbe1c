//! Persistent partial paths and resolved search results.
//!
//! A [`PathArena`] stores every partial path produced during a search as a
//! link to its predecessor. Extending a path appends a new link and never
//! touches existing ones, so any number of partial paths can share their
//! common prefix while waiting in a frontier.

use crate::graph::{Graph, NodeId};

/// Handle to a partial path stored in a [`PathArena`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PathId(usize);

#[derive(Debug, Clone, Copy)]
struct PathLink {
    node: NodeId,
    previous: Option<PathId>,
    cost: f64,
}

/// Append-only store of persistent partial paths.
#[derive(Debug, Default)]
pub struct PathArena {
    links: Vec<PathLink>,
}

impl PathArena {
    pub fn new() -> Self {
        Self::default()
    }

    /// Zero-cost path holding only `node`.
    pub fn root(&mut self, node: NodeId) -> PathId {
        self.push(PathLink {
            node,
            previous: None,
            cost: 0.0,
        })
    }

    /// New path made of `path` followed by `node`, reached through an edge of
    /// `step_cost`.
    ///
    /// Returns `None` if `path` was not issued by this arena.
    pub fn extend(&mut self, path: PathId, node: NodeId, step_cost: f64) -> Option<PathId> {
        let cost = self.cost(path)? + step_cost;
        Some(self.push(PathLink {
            node,
            previous: Some(path),
            cost,
        }))
    }

    /// Last node of the path.
    pub fn last(&self, path: PathId) -> Option<NodeId> {
        self.link(path).map(|link| link.node)
    }

    /// Cumulative cost of the path.
    pub fn cost(&self, path: PathId) -> Option<f64> {
        self.link(path).map(|link| link.cost)
    }

    /// Predecessor path, or `None` for a root.
    pub fn previous(&self, path: PathId) -> Option<PathId> {
        self.link(path).and_then(|link| link.previous)
    }

    /// Nodes of the path from its root to its last node.
    pub fn nodes(&self, path: PathId) -> Vec<NodeId> {
        let mut nodes = Vec::new();
        let mut current = self.link(path);
        while let Some(link) = current {
            nodes.push(link.node);
            current = link.previous.and_then(|previous| self.link(previous));
        }
        nodes.reverse();
        nodes
    }

    /// Resolve a partial path into an owned [`Path`].
    pub fn resolve(&self, path: PathId) -> Option<Path> {
        Some(Path {
            nodes: self.nodes(path),
            cost: self.cost(path)?,
        })
    }

    /// Number of links allocated so far.
    pub fn len(&self) -> usize {
        self.links.len()
    }

    pub fn is_empty(&self) -> bool {
        self.links.is_empty()
    }

    fn link(&self, path: PathId) -> Option<&PathLink> {
        self.links.get(path.0)
    }

    fn push(&mut self, link: PathLink) -> PathId {
        let id = PathId(self.links.len());
        self.links.push(link);
        id
    }
}

/// Sequence of nodes returned by a search, with its total cost.
#[derive(Debug, Clone, PartialEq)]
pub struct Path {
    pub nodes: Vec<NodeId>,
    pub cost: f64,
}

impl Path {
    /// Zero-cost path consisting of a single node.
    pub fn single(node: NodeId) -> Self {
        Self {
            nodes: vec![node],
            cost: 0.0,
        }
    }

    /// Number of edges travelled.
    pub fn hop_count(&self) -> usize {
        self.nodes.len().saturating_sub(1)
    }

    /// Node keys along the path.
    pub fn keys<'g>(&self, graph: &'g Graph) -> Vec<&'g str> {
        self.nodes
            .iter()
            .filter_map(|id| graph.get(*id))
            .map(|node| node.key.as_str())
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn graph() -> (Graph, NodeId, NodeId, NodeId) {
        let mut graph = Graph::new();
        let a = graph.add_node("A", 0.0, 0.0).unwrap();
        let b = graph.add_node("B", 0.0, 1.0).unwrap();
        let c = graph.add_node("C", 0.0, 2.0).unwrap();
        (graph, a, b, c)
    }

    #[test]
    fn extending_leaves_the_prefix_untouched() {
        let (_, a, b, c) = graph();
        let mut arena = PathArena::new();
        let root = arena.root(a);
        let ab = arena.extend(root, b, 4.0).unwrap();
        let ac = arena.extend(root, c, 9.0).unwrap();
        let abc = arena.extend(ab, c, 3.0).unwrap();

        assert_eq!(arena.nodes(root), vec![a]);
        assert_eq!(arena.cost(root), Some(0.0));
        assert_eq!(arena.nodes(ab), vec![a, b]);
        assert_eq!(arena.nodes(ac), vec![a, c]);
        assert_eq!(arena.nodes(abc), vec![a, b, c]);
        assert_eq!(arena.cost(abc), Some(7.0));
        assert_eq!(arena.previous(abc), Some(ab));
        assert_eq!(arena.len(), 4);
    }

    #[test]
    fn resolve_produces_owned_path() {
        let (graph, a, b, _) = graph();
        let mut arena = PathArena::new();
        let root = arena.root(a);
        let ab = arena.extend(root, b, 2.5).unwrap();
        let path = arena.resolve(ab).unwrap();

        assert_eq!(path.cost, 2.5);
        assert_eq!(path.hop_count(), 1);
        assert_eq!(path.keys(&graph), vec!["A", "B"]);
    }

    #[test]
    fn ids_from_another_arena_resolve_to_nothing() {
        let (_, a, b, c) = graph();
        let mut larger = PathArena::new();
        let root = larger.root(a);
        let ab = larger.extend(root, b, 1.0).unwrap();
        let abc = larger.extend(ab, c, 1.0).unwrap();

        let mut arena = PathArena::new();
        arena.root(a);

        assert_eq!(arena.last(abc), None);
        assert_eq!(arena.cost(abc), None);
        assert_eq!(arena.previous(abc), None);
        assert!(arena.nodes(abc).is_empty());
        assert!(arena.resolve(abc).is_none());
        assert!(arena.extend(abc, a, 1.0).is_none());
        assert_eq!(arena.len(), 1);
    }

    #[test]
    fn single_node_path_has_no_hops() {
        let (_, a, _, _) = graph();
        let path = Path::single(a);
        assert_eq!(path.hop_count(), 0);
        assert_eq!(path.cost, 0.0);
    }
}
