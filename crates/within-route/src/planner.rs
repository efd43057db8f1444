//! Route planner trait and default A* implementation.
//!
//! # Pluggability
//!
//! The recommender calls search via the [`RoutePlanner`] trait, so callers
//! can swap in other algorithms without touching the rest of the pipeline.
//!
//! # Cost model
//!
//! Edge cost is `distance_m * traffic_factor`; the heuristic is the haversine
//! distance to the goal.  The heuristic is admissible and consistent as long
//! as every traffic factor is at least 1.0 and no edge is shorter than the
//! straight line between its ends.  Otherwise A* still terminates and returns
//! a connected path, but it may not be the cheapest one.
//!
//! Relaxation updates any node whose best known cost improves, expanded or
//! not.  Costs are non-negative, so an improved predecessor chain never runs
//! back through the node it improves and reconstruction cannot loop.

use std::cmp::Ordering;
use std::collections::BinaryHeap;

use rustc_hash::{FxHashMap, FxHashSet};
use tracing::debug;

use within_core::{GeoPoint, NodeId};
use within_network::TransportNetwork;

/// An ordered node sequence from start to end.  Empty means "no path".
pub type Path = Vec<NodeId>;

// ── RoutePlanner trait ────────────────────────────────────────────────────────

/// Pluggable shortest-path engine.
///
/// # Thread safety
///
/// Implementations must be `Send + Sync` so one planner can serve concurrent
/// requests over a shared network.  Each call allocates its own search state.
pub trait RoutePlanner: Send + Sync {
    /// Compute a path from `start` to `end`.
    ///
    /// Returns an empty path if `end` is unreachable; `start == end` gives
    /// the single-node path `[start]`.
    fn find_route(&self, network: &TransportNetwork, start: NodeId, end: NodeId) -> Path;
}

// ── AStarPlanner ──────────────────────────────────────────────────────────────

/// A* over the network adjacency with a haversine heuristic.
///
/// The frontier is a binary heap without decrease-key: improved nodes are
/// pushed again and stale entries are discarded when popped.
#[derive(Clone, Copy, Debug, Default)]
pub struct AStarPlanner;

impl RoutePlanner for AStarPlanner {
    fn find_route(&self, network: &TransportNetwork, start: NodeId, end: NodeId) -> Path {
        astar(network, start, end)
    }
}

// ── A* internals ──────────────────────────────────────────────────────────────

/// Frontier entry ordered so that `BinaryHeap` (a max-heap) pops the lowest
/// `f` first.  `NodeId` is the secondary key for deterministic tie-breaking.
#[derive(Clone, Copy, Debug)]
struct FrontierEntry {
    f:    f64,
    node: NodeId,
}

impl Ord for FrontierEntry {
    fn cmp(&self, other: &Self) -> Ordering {
        other
            .f
            .total_cmp(&self.f)
            .then_with(|| other.node.cmp(&self.node))
    }
}

impl PartialOrd for FrontierEntry {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl PartialEq for FrontierEntry {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for FrontierEntry {}

/// Haversine distance from `node` to the goal.  Nodes without a registered
/// coordinate (or an unregistered goal) get 0, which keeps it admissible.
#[inline]
fn heuristic(network: &TransportNetwork, node: NodeId, goal: Option<GeoPoint>) -> f64 {
    match (network.node_pos(node), goal) {
        (Some(p), Some(g)) => p.distance_m(g),
        _ => 0.0,
    }
}

fn astar(network: &TransportNetwork, start: NodeId, end: NodeId) -> Path {
    let goal = network.node_pos(end);

    let mut open: BinaryHeap<FrontierEntry> = BinaryHeap::new();
    let mut g_score: FxHashMap<NodeId, f64> = FxHashMap::default();
    let mut came_from: FxHashMap<NodeId, NodeId> = FxHashMap::default();
    let mut closed: FxHashSet<NodeId> = FxHashSet::default();

    g_score.insert(start, 0.0);
    open.push(FrontierEntry { f: heuristic(network, start, goal), node: start });

    while let Some(FrontierEntry { node: current, .. }) = open.pop() {
        // Stale duplicate of a node that was already expanded.
        if !closed.insert(current) {
            continue;
        }

        if current == end {
            debug!(%start, %end, expanded = closed.len(), "route found");
            return reconstruct(&came_from, current);
        }

        let g_current = g_score[&current];
        for edge in network.neighbors(current) {
            // Closed nodes are re-linked too: with an inconsistent heuristic a
            // cheaper prefix can turn up after expansion.  The stale frontier
            // entry this pushes is discarded on pop, so nothing is re-expanded.
            let tentative = g_current + edge.effective_cost();
            let improves = g_score
                .get(&edge.target)
                .is_none_or(|&known| tentative < known);
            if improves {
                came_from.insert(edge.target, current);
                g_score.insert(edge.target, tentative);
                open.push(FrontierEntry {
                    f:    tentative + heuristic(network, edge.target, goal),
                    node: edge.target,
                });
            }
        }
    }

    debug!(%start, %end, expanded = closed.len(), "frontier exhausted, no route");
    Vec::new()
}

fn reconstruct(came_from: &FxHashMap<NodeId, NodeId>, end: NodeId) -> Path {
    let mut path = vec![end];
    let mut cur = end;
    while let Some(&prev) = came_from.get(&cur) {
        path.push(prev);
        cur = prev;
    }
    path.reverse();
    path
}

// ── Path helpers ──────────────────────────────────────────────────────────────

/// Total effective cost of `path`, taking the cheapest parallel edge for each
/// step.
///
/// Returns `None` for an empty path or if some consecutive pair has no edge.
pub fn path_cost(network: &TransportNetwork, path: &[NodeId]) -> Option<f64> {
    if path.is_empty() {
        return None;
    }
    path.windows(2).try_fold(0.0, |acc, pair| {
        network
            .neighbors(pair[0])
            .iter()
            .filter(|e| e.target == pair[1])
            .map(|e| e.effective_cost())
            .min_by(f64::total_cmp)
            .map(|c| acc + c)
    })
}
