//! Raw street-graph ingestion contract and CSV reader.
//!
//! Whatever acquires street data (a file, an OSM extract, a remote service)
//! hands the network a [`RawGraph`]: node coordinates plus directed edges
//! whose length and name may be missing.  Defaults for missing attributes
//! are applied by [`TransportNetwork::build_from_raw_graph`], not here.
//!
//! # CSV format
//!
//! Two files.  Nodes:
//!
//! ```csv
//! id,lat,lon
//! 1,30.2672,-97.7431
//! 2,30.2672,-97.7421
//! ```
//!
//! Edges (an empty `length` or `name` cell means "absent"):
//!
//! ```csv
//! source,target,length,name
//! 1,2,96.2,Congress Avenue
//! 2,1,,
//! ```
//!
//! [`TransportNetwork::build_from_raw_graph`]: crate::TransportNetwork::build_from_raw_graph

use std::io::Read;

use serde::Deserialize;

use within_core::NodeId;

use crate::NetworkError;

/// A node as delivered by the data source.
#[derive(Clone, Debug, PartialEq)]
pub struct RawNode {
    pub id:  NodeId,
    pub lat: f64,
    pub lon: f64,
}

/// A directed edge as delivered by the data source.
#[derive(Clone, Debug, PartialEq)]
pub struct RawEdge {
    pub source:   NodeId,
    pub target:   NodeId,
    /// Length in metres, if the source knows it.
    pub length_m: Option<f64>,
    pub name:     Option<String>,
}

/// Node coordinates and directed edges, in source order.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct RawGraph {
    pub nodes: Vec<RawNode>,
    pub edges: Vec<RawEdge>,
}

impl RawGraph {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_capacity(nodes: usize, edges: usize) -> Self {
        Self {
            nodes: Vec::with_capacity(nodes),
            edges: Vec::with_capacity(edges),
        }
    }

    pub fn push_node(&mut self, id: impl Into<NodeId>, lat: f64, lon: f64) -> &mut Self {
        self.nodes.push(RawNode { id: id.into(), lat, lon });
        self
    }

    pub fn push_edge(
        &mut self,
        source:   impl Into<NodeId>,
        target:   impl Into<NodeId>,
        length_m: Option<f64>,
        name:     Option<&str>,
    ) -> &mut Self {
        self.edges.push(RawEdge {
            source: source.into(),
            target: target.into(),
            length_m,
            name: name.map(str::to_owned),
        });
        self
    }
}

// ── CSV records ───────────────────────────────────────────────────────────────

#[derive(Deserialize)]
struct NodeRecord {
    id:  u64,
    lat: f64,
    lon: f64,
}

#[derive(Deserialize)]
struct EdgeRecord {
    source: u64,
    target: u64,
    length: Option<f64>,
    name:   Option<String>,
}

/// Read a [`RawGraph`] from a nodes CSV and an edges CSV.
///
/// Accepts any `Read` source, so tests can pass a `std::io::Cursor`.
///
/// # Errors
///
/// [`NetworkError::Parse`] on malformed rows.
pub fn load_raw_graph_reader<N: Read, E: Read>(nodes: N, edges: E) -> Result<RawGraph, NetworkError> {
    let mut graph = RawGraph::new();

    let mut node_reader = csv::ReaderBuilder::new().trim(csv::Trim::All).from_reader(nodes);
    for result in node_reader.deserialize::<NodeRecord>() {
        let row = result.map_err(|e| NetworkError::Parse(format!("nodes: {e}")))?;
        graph.push_node(row.id, row.lat, row.lon);
    }

    let mut edge_reader = csv::ReaderBuilder::new().trim(csv::Trim::All).from_reader(edges);
    for result in edge_reader.deserialize::<EdgeRecord>() {
        let row = result.map_err(|e| NetworkError::Parse(format!("edges: {e}")))?;
        graph.edges.push(RawEdge {
            source:   NodeId(row.source),
            target:   NodeId(row.target),
            length_m: row.length,
            name:     row.name.filter(|n| !n.is_empty()),
        });
    }

    Ok(graph)
}
