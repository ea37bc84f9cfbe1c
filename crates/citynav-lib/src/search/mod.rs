//! Heuristic search engines over a [`Graph`].
//!
//! Three interchangeable strategies are provided:
//! - [`a_star`] - single-directional best-first search
//! - [`ida_star`] - iterative-deepening bounded depth-first search
//! - [`nba_star`] - bidirectional best-first search with dual-bound pruning
//!
//! All of them use the great-circle distance to the target as heuristic and
//! keep every piece of working state local to one invocation, so a single
//! [`Graph`] can be searched from several threads at once.

pub mod a_star;
pub mod ida_star;
pub mod nba_star;

pub use a_star::find_route_a_star;
pub use ida_star::find_route_ida_star;
pub use nba_star::find_route_nba_star;

use tracing::warn;

use crate::graph::{Graph, NodeId};
use crate::path::Path;

/// Counters collected while a search runs.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SearchStats {
    /// Nodes whose neighbour list was scanned.
    pub expanded: usize,
    /// Outer iterations performed (IDA* bound raises; 1 for the others).
    pub iterations: usize,
    /// Popped nodes rejected by a pruning bound before expansion (NBA* only).
    pub pruned: usize,
}

/// Result of a single leg search.
#[derive(Debug, Clone, PartialEq)]
pub struct SearchOutcome {
    pub path: Option<Path>,
    pub stats: SearchStats,
}

impl SearchOutcome {
    /// Trivial outcome for `start == goal`.
    pub(crate) fn same_node(node: NodeId) -> Self {
        Self {
            path: Some(Path::single(node)),
            stats: SearchStats::default(),
        }
    }

    /// Outcome for endpoints that do not belong to the searched graph.
    pub(crate) fn foreign_endpoint(graph: &Graph, start: NodeId, goal: NodeId) -> Option<Self> {
        if graph.get(start).is_some() && graph.get(goal).is_some() {
            return None;
        }
        warn!(
            start = start.index(),
            goal = goal.index(),
            nodes = graph.len(),
            "search endpoint is not a node of this graph"
        );
        Some(Self {
            path: None,
            stats: SearchStats::default(),
        })
    }
}

/// Memoised great-circle estimate towards a fixed target node.
pub(crate) struct Heuristic<'g> {
    graph: &'g Graph,
    target: NodeId,
    cache: Vec<Option<f64>>,
}

impl<'g> Heuristic<'g> {
    pub(crate) fn new(graph: &'g Graph, target: NodeId) -> Self {
        Self {
            graph,
            target,
            cache: vec![None; graph.len()],
        }
    }

    /// Estimated remaining cost from `node` to the target, in kilometres.
    pub(crate) fn estimate(&mut self, node: NodeId) -> f64 {
        if let Some(Some(value)) = self.cache.get(node.index()) {
            return *value;
        }

        let target = self.graph.node(self.target).coordinates;
        let value = self.graph.node(node).coordinates.distance_to(&target);
        if let Some(slot) = self.cache.get_mut(node.index()) {
            *slot = Some(value);
        }
        value
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn heuristic_is_zero_at_target_and_cached() {
        let mut graph = Graph::new();
        let a = graph.add_node("A", 45.0, 25.0).unwrap();
        let b = graph.add_node("B", 46.0, 25.0).unwrap();

        let mut heuristic = Heuristic::new(&graph, b);
        assert_eq!(heuristic.estimate(b), 0.0);
        let first = heuristic.estimate(a);
        assert!(first > 100.0 && first < 120.0, "got {first}");
        assert_eq!(heuristic.estimate(a), first);
    }
}
