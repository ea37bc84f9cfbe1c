//! Iterative-deepening A*.
//!
//! Each iteration runs a depth-first descent that refuses to go deeper than the
//! current `f = g + h` bound. The smallest `f` that was refused becomes the
//! bound for the next iteration. Memory use is proportional to the depth of
//! the current branch rather than to the size of the explored region.
//!
//! The descent keeps its branch on an explicit stack instead of recursing, so
//! long simple paths cannot overflow the call stack. All state, including the
//! branch-local visited set and the bound, lives in a [`SearchContext`] that is
//! created per call.

use tracing::{debug, trace};

use crate::graph::{Graph, NodeId};
use crate::path::Path;

use super::{Heuristic, SearchOutcome, SearchStats};

/// Result of one bounded depth-first descent.
#[derive(Debug, Clone, Copy, PartialEq)]
enum Descent {
    /// The goal was reached within the bound; the branch stack holds the path.
    Found,
    /// Some branch was cut off; carries the smallest `f` that exceeded the bound.
    Bound(f64),
    /// Every branch was exhausted without exceeding the bound.
    NotFound,
}

/// One node of the branch currently being explored.
#[derive(Debug, Clone, Copy)]
struct Frame {
    node: NodeId,
    cost: f64,
    next_edge: usize,
    min_excess: f64,
}

impl Frame {
    fn new(node: NodeId, cost: f64) -> Self {
        Self {
            node,
            cost,
            next_edge: 0,
            min_excess: f64::INFINITY,
        }
    }

    fn record_excess(&mut self, bound: f64) {
        self.min_excess = self.min_excess.min(bound);
    }

    fn outcome(&self) -> Descent {
        if self.min_excess.is_finite() {
            Descent::Bound(self.min_excess)
        } else {
            Descent::NotFound
        }
    }
}

/// Per-invocation working state.
struct SearchContext<'g> {
    graph: &'g Graph,
    goal: NodeId,
    heuristic: Heuristic<'g>,
    on_branch: Vec<bool>,
    branch: Vec<Frame>,
    stats: SearchStats,
}

impl<'g> SearchContext<'g> {
    fn new(graph: &'g Graph, goal: NodeId) -> Self {
        Self {
            graph,
            goal,
            heuristic: Heuristic::new(graph, goal),
            on_branch: vec![false; graph.len()],
            branch: Vec::new(),
            stats: SearchStats::default(),
        }
    }

    fn enter(&mut self, node: NodeId, cost: f64) {
        self.on_branch[node.index()] = true;
        self.branch.push(Frame::new(node, cost));
    }

    fn leave(&mut self) -> Option<Frame> {
        let frame = self.branch.pop()?;
        self.on_branch[frame.node.index()] = false;
        Some(frame)
    }

    fn reset(&mut self) {
        while self.leave().is_some() {}
    }

    /// Depth-first descent from `start` limited to `bound`.
    fn descend(&mut self, start: NodeId, bound: f64) -> Descent {
        self.reset();

        let f = self.heuristic.estimate(start);
        if f > bound {
            return Descent::Bound(f);
        }
        if start == self.goal {
            self.enter(start, 0.0);
            return Descent::Found;
        }
        self.enter(start, 0.0);

        loop {
            let Some(frame) = self.branch.last_mut() else {
                return Descent::NotFound;
            };
            let (node, cost) = (frame.node, frame.cost);

            if frame.next_edge == 0 {
                self.stats.expanded += 1;
            }

            let Some(edge) = self.graph.neighbours(node).get(frame.next_edge).copied() else {
                let finished = self.leave().map(|frame| frame.outcome());
                let outcome = finished.unwrap_or(Descent::NotFound);
                match self.branch.last_mut() {
                    None => return outcome,
                    Some(parent) => {
                        if let Descent::Bound(excess) = outcome {
                            parent.record_excess(excess);
                        }
                    }
                }
                continue;
            };
            frame.next_edge += 1;

            if self.on_branch[edge.target.index()] {
                continue;
            }

            let next_cost = cost + edge.weight;
            let f = next_cost + self.heuristic.estimate(edge.target);
            if f > bound {
                if let Some(frame) = self.branch.last_mut() {
                    frame.record_excess(f);
                }
                continue;
            }

            self.enter(edge.target, next_cost);
            if edge.target == self.goal {
                return Descent::Found;
            }
        }
    }

    /// Path spelled out by the branch stack after a successful descent.
    fn branch_path(&self) -> Option<Path> {
        let last = self.branch.last()?;
        Some(Path {
            nodes: self.branch.iter().map(|frame| frame.node).collect(),
            cost: last.cost,
        })
    }
}

/// Run IDA* from `start` to `goal`, returning the path and search counters.
pub fn search(graph: &Graph, start: NodeId, goal: NodeId) -> SearchOutcome {
    if let Some(outcome) = SearchOutcome::foreign_endpoint(graph, start, goal) {
        return outcome;
    }
    if start == goal {
        return SearchOutcome::same_node(start);
    }

    let mut context = SearchContext::new(graph, goal);
    let mut bound = context.heuristic.estimate(start);

    loop {
        context.stats.iterations += 1;
        match context.descend(start, bound) {
            Descent::Found => {
                let path = context.branch_path();
                debug!(
                    iterations = context.stats.iterations,
                    expanded = context.stats.expanded,
                    bound,
                    "ida* reached goal"
                );
                return SearchOutcome {
                    path,
                    stats: context.stats,
                };
            }
            Descent::Bound(next) => {
                trace!(from = bound, to = next, "ida* raising bound");
                bound = next;
            }
            Descent::NotFound => {
                debug!(
                    iterations = context.stats.iterations,
                    expanded = context.stats.expanded,
                    "ida* exhausted search space"
                );
                return SearchOutcome {
                    path: None,
                    stats: context.stats,
                };
            }
        }
    }
}

/// Find the least-cost path between `start` and `goal` with IDA*.
pub fn find_route_ida_star(graph: &Graph, start: NodeId, goal: NodeId) -> Option<Path> {
    search(graph, start, goal).path
}
