//! New bidirectional A* (NBA*).
//!
//! Two best-first processes run interleaved on the same undirected graph: the
//! forward process grows from the start towards the goal and the backward
//! process grows from the goal towards the start. Each has its own frontier,
//! tentative distances, and parent pointers; a single closed set is shared.
//!
//! Whenever a relaxed node already carries a finite distance from the other
//! side, the sum of both distances is a candidate route length. A popped node
//! is rejected without expansion when either
//!
//! - `g(n) + h(n) >= best`, or
//! - `g(n) + f_other - h_other(n) >= best`
//!
//! where `f_other` is the lowest priority in the opposite frontier and
//! `h_other` is the opposite side's heuristic. Once both frontiers drain the
//! best candidate is optimal for a consistent heuristic.

use tracing::{debug, trace};

use crate::frontier::{Priority, PriorityFrontier};
use crate::graph::{Graph, NodeId};
use crate::path::Path;

use super::{Heuristic, SearchOutcome, SearchStats};

/// Working state of one search direction.
struct Side<'g> {
    frontier: PriorityFrontier<Priority, NodeId>,
    distance: Vec<f64>,
    parent: Vec<Option<NodeId>>,
    heuristic: Heuristic<'g>,
}

impl<'g> Side<'g> {
    fn new(graph: &'g Graph, origin: NodeId, target: NodeId) -> Self {
        let mut side = Self {
            frontier: PriorityFrontier::new(),
            distance: vec![f64::INFINITY; graph.len()],
            parent: vec![None; graph.len()],
            heuristic: Heuristic::new(graph, target),
        };
        side.distance[origin.index()] = 0.0;
        let estimate = side.heuristic.estimate(origin);
        side.frontier.push(estimate, origin);
        side
    }

    fn distance(&self, node: NodeId) -> f64 {
        self.distance[node.index()]
    }

    /// Walk parent pointers from `node` back to this side's origin.
    fn chain(&self, node: NodeId) -> Vec<NodeId> {
        let mut chain = vec![node];
        let mut current = self.parent[node.index()];
        while let Some(previous) = current {
            chain.push(previous);
            current = self.parent[previous.index()];
        }
        chain
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Direction {
    Forward,
    Backward,
}

/// Pruning rule that rejected a popped node.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Bound {
    /// `g(n) + h(n) >= best`
    Estimate,
    /// `g(n) + f_other - h_other(n) >= best`
    Opposite,
}

/// What became of an entry taken off a frontier.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Settled {
    Expanded,
    Pruned(Bound),
    /// The node had already been closed by either side.
    Stale,
}

/// Per-invocation state shared by both directions.
struct SearchContext<'g> {
    graph: &'g Graph,
    forward: Side<'g>,
    backward: Side<'g>,
    closed: Vec<bool>,
    best: f64,
    meeting: Option<NodeId>,
    stats: SearchStats,
}

impl<'g> SearchContext<'g> {
    fn new(graph: &'g Graph, start: NodeId, goal: NodeId) -> Self {
        Self {
            graph,
            forward: Side::new(graph, start, goal),
            backward: Side::new(graph, goal, start),
            closed: vec![false; graph.len()],
            best: f64::INFINITY,
            meeting: None,
            stats: SearchStats {
                iterations: 1,
                ..SearchStats::default()
            },
        }
    }

    fn run(&mut self) {
        while self.step().is_some() {}
    }

    /// The side holding fewer queued entries goes next; ties go backward.
    fn next_direction(&self) -> Direction {
        if self.forward.frontier.len() < self.backward.frontier.len() {
            Direction::Forward
        } else {
            Direction::Backward
        }
    }

    /// Settle one frontier entry, or `None` once either frontier is empty.
    fn step(&mut self) -> Option<(Direction, NodeId, Settled)> {
        if self.forward.frontier.is_empty() || self.backward.frontier.is_empty() {
            return None;
        }
        let direction = self.next_direction();
        let (node, settled) = self.expand(direction)?;
        trace!(?direction, node = node.index(), ?settled, "nba* settled");
        Some((direction, node, settled))
    }

    fn expand(&mut self, direction: Direction) -> Option<(NodeId, Settled)> {
        let graph = self.graph;
        let (this, other) = match direction {
            Direction::Forward => (&mut self.forward, &mut self.backward),
            Direction::Backward => (&mut self.backward, &mut self.forward),
        };

        let node = this.frontier.dequeue()?;
        if self.closed[node.index()] {
            return Some((node, Settled::Stale));
        }
        self.closed[node.index()] = true;

        let g = this.distance(node);
        let other_min = other.frontier.min_priority().unwrap_or(f64::INFINITY);
        let bound = if g + this.heuristic.estimate(node) >= self.best {
            Some(Bound::Estimate)
        } else if g + other_min - other.heuristic.estimate(node) >= self.best {
            Some(Bound::Opposite)
        } else {
            None
        };
        if let Some(bound) = bound {
            self.stats.pruned += 1;
            return Some((node, Settled::Pruned(bound)));
        }

        self.stats.expanded += 1;
        for edge in graph.neighbours(node) {
            let next = edge.target;
            if self.closed[next.index()] {
                continue;
            }

            let tentative = g + edge.weight;
            if tentative < this.distance(next) {
                this.distance[next.index()] = tentative;
                this.parent[next.index()] = Some(node);
                let estimate = tentative + this.heuristic.estimate(next);
                this.frontier.push(estimate, next);

                let across = other.distance(next);
                if across.is_finite() {
                    let candidate = tentative + across;
                    if candidate < self.best {
                        self.best = candidate;
                        self.meeting = Some(next);
                    }
                }
            }
        }
        Some((node, Settled::Expanded))
    }

    fn reconstruct(&self) -> Option<Path> {
        let meeting = self.meeting?;
        let mut nodes = self.forward.chain(meeting);
        nodes.reverse();
        nodes.extend(self.backward.chain(meeting).into_iter().skip(1));
        Some(Path {
            nodes,
            cost: self.best,
        })
    }
}

/// Run NBA* from `start` to `goal`, returning the path and search counters.
pub fn search(graph: &Graph, start: NodeId, goal: NodeId) -> SearchOutcome {
    if let Some(outcome) = SearchOutcome::foreign_endpoint(graph, start, goal) {
        return outcome;
    }
    if start == goal {
        return SearchOutcome::same_node(start);
    }

    let mut context = SearchContext::new(graph, start, goal);
    context.run();

    let path = context.reconstruct();
    debug!(
        expanded = context.stats.expanded,
        pruned = context.stats.pruned,
        best = context.best,
        found = path.is_some(),
        "nba* finished"
    );
    SearchOutcome {
        path,
        stats: context.stats,
    }
}

/// Find the least-cost path between `start` and `goal` with NBA*.
pub fn find_route_nba_star(graph: &Graph, start: NodeId, goal: NodeId) -> Option<Path> {
    search(graph, start, goal).path
}
