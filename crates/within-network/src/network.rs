//! Transport network representation.
//!
//! # Data layout
//!
//! - **Coordinate table**: `NodeId → GeoPoint`, plus the registration order
//!   of those nodes.  The order is what the spatial index is built from, so
//!   a positional hit in the index maps back to the right `NodeId`.
//! - **Adjacency**: `NodeId → Vec<Edge>`, outgoing edges in insertion order.
//!   Parallel edges between the same pair of nodes are kept; lookups that
//!   need a single edge take the first one registered.
//!
//! Edges may reference nodes that have no registered coordinate.  The
//! network does not validate this at insertion time; consumers treat such
//! gaps as data inconsistencies.
//!
//! # Lifecycle
//!
//! Build once (via [`TransportNetwork::build_from_raw_graph`] or
//! `register_node` / `add_edge` / `build_spatial_index`), then share
//! immutably.  Nothing on the query side takes `&mut self`.

use rustc_hash::FxHashMap;
use tracing::info;

use within_core::{GeoPoint, NetworkConfig, NodeId};

use crate::raw::RawGraph;
use crate::spatial::SpatialIndex;
use crate::{NetworkError, NetworkResult};

// ── Edge ──────────────────────────────────────────────────────────────────────

/// A directed street segment, owned by its source node's adjacency list.
#[derive(Clone, Debug, PartialEq)]
pub struct Edge {
    pub target:         NodeId,
    /// Physical length in metres (non-negative).
    pub distance_m:     f64,
    /// Positive cost multiplier; 1.0 means free-flowing.
    pub traffic_factor: f64,
    pub street_name:    String,
}

impl Edge {
    /// Search cost of traversing this edge: `distance_m * traffic_factor`.
    #[inline]
    pub fn effective_cost(&self) -> f64 {
        self.distance_m * self.traffic_factor
    }
}

// ── TransportNetwork ──────────────────────────────────────────────────────────

/// Directed street graph plus a nearest-node spatial index.
pub struct TransportNetwork {
    config:      NetworkConfig,
    node_pos:    FxHashMap<NodeId, GeoPoint>,
    node_order:  Vec<NodeId>,
    adjacency:   FxHashMap<NodeId, Vec<Edge>>,
    spatial_idx: Option<SpatialIndex>,
}

impl TransportNetwork {
    /// An empty network using [`NetworkConfig::default`].
    pub fn new() -> Self {
        Self::from_parts(NetworkConfig::default())
    }

    /// An empty network whose raw-graph defaults come from `config`.
    ///
    /// # Errors
    ///
    /// Propagates [`NetworkConfig::validate`] failures.
    pub fn with_config(config: NetworkConfig) -> NetworkResult<Self> {
        config.validate()?;
        Ok(Self::from_parts(config))
    }

    fn from_parts(config: NetworkConfig) -> Self {
        Self {
            config,
            node_pos:    FxHashMap::default(),
            node_order:  Vec::new(),
            adjacency:   FxHashMap::default(),
            spatial_idx: None,
        }
    }

    pub fn config(&self) -> &NetworkConfig {
        &self.config
    }

    // ── Construction ──────────────────────────────────────────────────────

    /// Register (or move) a node's coordinate.
    ///
    /// A new ID is appended to the registration order; re-registering an
    /// existing ID only updates its position.  Either way the spatial index
    /// no longer reflects the coordinate table and is dropped until the next
    /// [`build_spatial_index`](Self::build_spatial_index).
    pub fn register_node(&mut self, id: NodeId, pos: GeoPoint) {
        if self.node_pos.insert(id, pos).is_none() {
            self.node_order.push(id);
        }
        self.spatial_idx = None;
    }

    /// Append a **directed** edge to `source`'s adjacency list.
    ///
    /// Neither endpoint needs to be registered yet.
    pub fn add_edge(
        &mut self,
        source:         NodeId,
        target:         NodeId,
        distance_m:     f64,
        traffic_factor: f64,
        street_name:    impl Into<String>,
    ) {
        debug_assert!(
            distance_m * traffic_factor >= 0.0,
            "negative edge cost {source}->{target}"
        );
        self.adjacency.entry(source).or_default().push(Edge {
            target,
            distance_m,
            traffic_factor,
            street_name: street_name.into(),
        });
    }

    /// Bulk-load the R-tree over every registered node, in registration order.
    pub fn build_spatial_index(&mut self) {
        let index = SpatialIndex::build(
            self.node_order.iter().map(|id| (*id, self.node_pos[id])),
        );
        self.spatial_idx = Some(index);
    }

    /// Populate coordinates and adjacency from `graph`, then build the
    /// spatial index.
    ///
    /// Edges without a length get `config.default_length_m`; edges without a
    /// name get `config.default_street_name`; every edge starts at
    /// `config.default_traffic_factor`.
    pub fn build_from_raw_graph(&mut self, graph: &RawGraph) {
        self.node_pos.reserve(graph.nodes.len());
        self.node_order.reserve(graph.nodes.len());
        for node in &graph.nodes {
            self.register_node(node.id, GeoPoint::new(node.lat, node.lon));
        }

        let traffic_factor = self.config.default_traffic_factor;
        for edge in &graph.edges {
            let length = edge.length_m.unwrap_or(self.config.default_length_m);
            let name = edge
                .name
                .clone()
                .unwrap_or_else(|| self.config.default_street_name.clone());
            self.add_edge(edge.source, edge.target, length, traffic_factor, name);
        }

        self.build_spatial_index();

        info!(
            place = %self.config.place_name,
            nodes = self.node_count(),
            edges = self.edge_count(),
            "transport network built"
        );
    }

    // ── Graph dimensions ──────────────────────────────────────────────────

    /// Number of nodes with a registered coordinate.
    pub fn node_count(&self) -> usize {
        self.node_order.len()
    }

    pub fn edge_count(&self) -> usize {
        self.adjacency.values().map(Vec::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.node_order.is_empty()
    }

    // ── Graph traversal ───────────────────────────────────────────────────

    /// Registered coordinate of `id`, if any.
    #[inline]
    pub fn node_pos(&self, id: NodeId) -> Option<GeoPoint> {
        self.node_pos.get(&id).copied()
    }

    /// Registered node IDs in registration order.
    pub fn node_ids(&self) -> &[NodeId] {
        &self.node_order
    }

    /// Outgoing edges of `id` in insertion order (empty if none).
    #[inline]
    pub fn neighbors(&self, id: NodeId) -> &[Edge] {
        self.adjacency.get(&id).map(Vec::as_slice).unwrap_or(&[])
    }

    /// First registered edge `from → to`, if one exists.
    pub fn first_edge(&self, from: NodeId, to: NodeId) -> Option<&Edge> {
        self.neighbors(from).iter().find(|e| e.target == to)
    }

    // ── Spatial queries ───────────────────────────────────────────────────

    pub fn spatial_index(&self) -> Option<&SpatialIndex> {
        self.spatial_idx.as_ref()
    }

    /// The node nearest to `(lat, lon)`.
    ///
    /// # Errors
    ///
    /// [`NetworkError::NotInitialized`] before the spatial index is built,
    /// [`NetworkError::EmptyIndex`] if it was built over no nodes.
    pub fn nearest_node(&self, lat: f64, lon: f64) -> NetworkResult<NodeId> {
        self.spatial_idx
            .as_ref()
            .ok_or(NetworkError::NotInitialized)?
            .nearest_node(lat, lon)
    }

    /// Up to `k` nodes nearest to `(lat, lon)`, closest first.
    pub fn k_nearest_nodes(&self, lat: f64, lon: f64, k: usize) -> NetworkResult<Vec<NodeId>> {
        let index = self.spatial_idx.as_ref().ok_or(NetworkError::NotInitialized)?;
        Ok(index.k_nearest(lat, lon, k))
    }
}

impl Default for TransportNetwork {
    fn default() -> Self {
        Self::new()
    }
}
