//! Nearest-node spatial index.
//!
//! An R-tree (via `rstar`) over `[lat, lon]` points.  Each entry carries its
//! position in the registration order; the index keeps the matching
//! `NodeId` table so a positional hit maps back to the node exactly.
//!
//! Distances are squared Euclidean over raw degrees.  This ignores meridian
//! convergence, which is acceptable at city scale and keeps snapping results
//! identical to a planar KD-tree over the same points.

use rstar::{AABB, PointDistance, RTree, RTreeObject};

use within_core::{GeoPoint, NodeId};

use crate::{NetworkError, NetworkResult};

// ── R-tree entry ──────────────────────────────────────────────────────────────

/// Entry stored in the R-tree: a 2-D `[lat, lon]` point and its position in
/// [`SpatialIndex::ids`].
#[derive(Clone)]
struct IndexEntry {
    point: [f64; 2], // [lat, lon]
    pos:   usize,
}

impl RTreeObject for IndexEntry {
    type Envelope = AABB<[f64; 2]>;
    fn envelope(&self) -> Self::Envelope {
        AABB::from_point(self.point)
    }
}

impl PointDistance for IndexEntry {
    /// Squared Euclidean distance in lat/lon space.
    fn distance_2(&self, point: &[f64; 2]) -> f64 {
        let dlat = self.point[0] - point[0];
        let dlon = self.point[1] - point[1];
        dlat * dlat + dlon * dlon
    }
}

// ── SpatialIndex ──────────────────────────────────────────────────────────────

/// Immutable nearest-node index, bulk-loaded once from the ordered node set.
pub struct SpatialIndex {
    tree: RTree<IndexEntry>,
    ids:  Vec<NodeId>,
}

impl SpatialIndex {
    /// Bulk-load the index from `(id, position)` pairs.
    ///
    /// The iteration order defines the positional index of every node, so
    /// callers pass nodes in registration order.
    pub fn build(nodes: impl IntoIterator<Item = (NodeId, GeoPoint)>) -> Self {
        let mut ids = Vec::new();
        let mut entries = Vec::new();
        for (pos, (id, p)) in nodes.into_iter().enumerate() {
            ids.push(id);
            entries.push(IndexEntry { point: [p.lat, p.lon], pos });
        }
        Self { tree: RTree::bulk_load(entries), ids }
    }

    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    /// Node IDs in positional order.
    pub fn ids(&self) -> &[NodeId] {
        &self.ids
    }

    /// The node closest to `(lat, lon)` in the planar degree metric.
    ///
    /// # Errors
    ///
    /// [`NetworkError::EmptyIndex`] if the index was built over no nodes.
    pub fn nearest_node(&self, lat: f64, lon: f64) -> NetworkResult<NodeId> {
        self.tree
            .nearest_neighbor(&[lat, lon])
            .map(|e| self.ids[e.pos])
            .ok_or(NetworkError::EmptyIndex)
    }

    /// Up to `k` nearest nodes, sorted by ascending distance.
    pub fn k_nearest(&self, lat: f64, lon: f64, k: usize) -> Vec<NodeId> {
        self.tree
            .nearest_neighbor_iter(&[lat, lon])
            .take(k)
            .map(|e| self.ids[e.pos])
            .collect()
    }
}
