//! Single-directional best-first search.
//!
//! The open set is a [`PriorityFrontier`] of persistent partial paths keyed by
//! `f = g + h`. Because the frontier is append-only, a node can be queued
//! several times; entries whose last node has already been closed are dropped
//! when they surface.

use tracing::debug;

use crate::frontier::{Priority, PriorityFrontier};
use crate::graph::{Graph, NodeId};
use crate::path::{Path, PathArena, PathId};

use super::{Heuristic, SearchOutcome, SearchStats};

/// Run A* from `start` to `goal`, returning the path and search counters.
pub fn search(graph: &Graph, start: NodeId, goal: NodeId) -> SearchOutcome {
    if let Some(outcome) = SearchOutcome::foreign_endpoint(graph, start, goal) {
        return outcome;
    }
    if start == goal {
        return SearchOutcome::same_node(start);
    }

    let mut heuristic = Heuristic::new(graph, goal);
    let mut arena = PathArena::new();
    let mut open: PriorityFrontier<Priority, PathId> = PriorityFrontier::new();
    let mut closed = vec![false; graph.len()];
    let mut stats = SearchStats {
        iterations: 1,
        ..SearchStats::default()
    };

    let root = arena.root(start);
    open.push(heuristic.estimate(start), root);

    while let Some(path) = open.dequeue() {
        let (Some(current), Some(cost)) = (arena.last(path), arena.cost(path)) else {
            continue;
        };
        if closed[current.index()] {
            continue;
        }

        if current == goal {
            debug!(
                expanded = stats.expanded,
                queued = arena.len(),
                cost,
                "a* reached goal"
            );
            return SearchOutcome {
                path: arena.resolve(path),
                stats,
            };
        }

        closed[current.index()] = true;
        stats.expanded += 1;

        for edge in graph.neighbours(current) {
            if closed[edge.target.index()] {
                continue;
            }
            if let Some(extended) = arena.extend(path, edge.target, edge.weight) {
                let estimate = cost + edge.weight + heuristic.estimate(edge.target);
                open.push(estimate, extended);
            }
        }
    }

    debug!(expanded = stats.expanded, "a* exhausted frontier");
    SearchOutcome { path: None, stats }
}

/// Find the least-cost path between `start` and `goal` with A*.
pub fn find_route_a_star(graph: &Graph, start: NodeId, goal: NodeId) -> Option<Path> {
    search(graph, start, goal).path
}

#[cfg(test)]
mod tests {
    use super::*;

    fn triangle() -> (Graph, NodeId, NodeId, NodeId) {
        let mut graph = Graph::new();
        let a = graph.add_node("A", 0.0, 0.0).unwrap();
        let b = graph.add_node("B", 0.0, 0.05).unwrap();
        let c = graph.add_node("C", 0.0, 0.1).unwrap();
        graph.add_undirected_edge("A", "B", 10.0).unwrap();
        graph.add_undirected_edge("B", "C", 10.0).unwrap();
        graph.add_undirected_edge("A", "C", 100.0).unwrap();
        (graph, a, b, c)
    }

    #[test]
    fn prefers_two_short_edges_over_one_long_edge() {
        let (graph, a, b, c) = triangle();
        let path = find_route_a_star(&graph, a, c).expect("route exists");
        assert_eq!(path.nodes, vec![a, b, c]);
        assert_eq!(path.cost, 20.0);
    }

    #[test]
    fn same_start_and_goal_expands_nothing() {
        let (graph, a, _, _) = triangle();
        let outcome = search(&graph, a, a);
        assert_eq!(outcome.path, Some(Path::single(a)));
        assert_eq!(outcome.stats.expanded, 0);
    }

    #[test]
    fn unreachable_goal_returns_none() {
        let (mut graph, a, _, _) = triangle();
        let island = graph.add_node("Island", 1.0, 1.0).unwrap();
        let outcome = search(&graph, a, island);
        assert!(outcome.path.is_none());
        assert_eq!(outcome.stats.expanded, 3);
    }

    #[test]
    fn node_from_another_graph_is_not_found() {
        let (graph, a, _, _) = triangle();
        let (mut larger, _, _, _) = triangle();
        let outsider = larger.add_node("D", 0.0, 0.3).unwrap();

        let outcome = search(&graph, outsider, a);
        assert!(outcome.path.is_none());
        assert_eq!(outcome.stats, SearchStats::default());
        assert!(find_route_a_star(&graph, a, outsider).is_none());
    }
}
