//! Turn a node path into merged, direction-labelled instructions.
//!
//! Two pure stages:
//!
//! 1. [`annotate_path`] — one segment per consecutive node pair, using the
//!    first registered edge between them and the bearing between their
//!    coordinates.  Pairs with no edge (or no coordinates) are skipped and
//!    add no distance.
//! 2. [`merge_segments`] — consecutive segments with the same street name
//!    and the same direction are folded into one.
//!
//! Distances accumulate at full precision; rounding to whole metres happens
//! only when text is rendered.

use std::fmt;

use tracing::debug;

use within_core::{CardinalDirection, NodeId};
use within_network::TransportNetwork;

// ── InstructionSegment ────────────────────────────────────────────────────────

/// A stretch of the route along one street in one direction.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct InstructionSegment {
    pub street_name: String,
    pub distance_m:  f64,
    pub direction:   CardinalDirection,
}

impl InstructionSegment {
    pub fn new(street_name: impl Into<String>, distance_m: f64, direction: CardinalDirection) -> Self {
        Self { street_name: street_name.into(), distance_m, direction }
    }

    #[inline]
    fn continues(&self, other: &InstructionSegment) -> bool {
        self.street_name == other.street_name && self.direction == other.direction
    }
}

impl fmt::Display for InstructionSegment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Continue {} on {} for approximately {:.0} meters.",
            self.direction, self.street_name, self.distance_m
        )
    }
}

// ── Directions ────────────────────────────────────────────────────────────────

/// Merged instruction segments plus the total distance of every matched edge.
#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct Directions {
    pub segments:         Vec<InstructionSegment>,
    pub total_distance_m: f64,
}

impl Directions {
    /// One rendered sentence per segment.
    pub fn instructions(&self) -> Vec<String> {
        self.segments.iter().map(ToString::to_string).collect()
    }

    /// Header line with the rounded total, then one line per segment.
    pub fn describe(&self) -> String {
        let mut out = format!("Recommended route (~{:.0} meters):", self.total_distance_m);
        for seg in &self.segments {
            out.push('\n');
            out.push_str(&seg.to_string());
        }
        out
    }
}

// ── Stages ────────────────────────────────────────────────────────────────────

/// Annotate each step of `path` with street, length and direction.
///
/// Returns the unmerged segments and the summed length of matched edges.
pub fn annotate_path(network: &TransportNetwork, path: &[NodeId]) -> (Vec<InstructionSegment>, f64) {
    let mut segments = Vec::with_capacity(path.len().saturating_sub(1));
    let mut total_m = 0.0;

    for pair in path.windows(2) {
        let (from, to) = (pair[0], pair[1]);

        let Some(edge) = network.first_edge(from, to) else {
            debug!(%from, %to, "no adjacency edge for path step, skipping");
            continue;
        };
        let (Some(a), Some(b)) = (network.node_pos(from), network.node_pos(to)) else {
            debug!(%from, %to, "path step has no coordinates, skipping");
            continue;
        };

        let direction = CardinalDirection::from_bearing(a.bearing_to(b));
        segments.push(InstructionSegment::new(edge.street_name.clone(), edge.distance_m, direction));
        total_m += edge.distance_m;
    }

    (segments, total_m)
}

/// Fold consecutive segments that share both street name and direction.
///
/// Running this over its own output returns the same segments.
pub fn merge_segments(segments: impl IntoIterator<Item = InstructionSegment>) -> Vec<InstructionSegment> {
    let mut merged: Vec<InstructionSegment> = Vec::new();
    for seg in segments {
        match merged.last_mut() {
            Some(open) if open.continues(&seg) => open.distance_m += seg.distance_m,
            _ => merged.push(seg),
        }
    }
    merged
}

/// Annotate then merge.
pub fn synthesize(network: &TransportNetwork, path: &[NodeId]) -> Directions {
    let (segments, total_distance_m) = annotate_path(network, path);
    Directions { segments: merge_segments(segments), total_distance_m }
}
