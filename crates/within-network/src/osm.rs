//! OSM PBF source — enabled with the `osm` Cargo feature.
//!
//! # Usage
//!
//! ```ignore
//! use within_network::{GraphSource, OsmPbfSource, TransportNetwork};
//!
//! let source = OsmPbfSource::new("austin.osm.pbf", "drive");
//! let mut network = TransportNetwork::new();
//! network.build_from_raw_graph(&source.fetch()?);
//! ```
//!
//! # What is loaded
//!
//! Only `highway=*` ways accepted for the configured network type (see
//! `accepts_highway`).  Node IDs are the OSM node IDs.  Each pair of
//! consecutive way nodes becomes a directed edge whose length is the
//! haversine distance between them and whose name is the way's `name` tag.
//! For `"drive"`, one-way roads add a single directed edge, reversed for
//! `oneway=-1`; otherwise both directions are added.
//!
//! # Memory note
//!
//! All OSM node positions are buffered in a `HashMap<i64, GeoPoint>` during
//! the single pass over the file (ways reference nodes by ID).  Only the
//! road-referenced subset survives into the returned graph.

use std::collections::{HashMap, HashSet};
use std::path::PathBuf;

use osmpbf::{Element, ElementReader};
use tracing::info;

use within_core::{GeoPoint, NodeId};

use crate::raw::{RawEdge, RawGraph, RawNode};
use crate::source::GraphSource;
use crate::{NetworkError, NetworkResult};

/// A [`GraphSource`] reading an OSM PBF extract.
pub struct OsmPbfSource {
    path:         PathBuf,
    network_type: String,
}

impl OsmPbfSource {
    /// `network_type` is one of `"drive"`, `"walk"` or `"all"`.
    pub fn new(path: impl Into<PathBuf>, network_type: impl Into<String>) -> Self {
        Self { path: path.into(), network_type: network_type.into() }
    }
}

impl GraphSource for OsmPbfSource {
    fn describe(&self) -> String {
        format!("OSM extract {} (network_type={})", self.path.display(), self.network_type)
    }

    fn fetch(&self) -> NetworkResult<RawGraph> {
        info!(source = %self.describe(), "reading OSM data");
        load_pbf(&self.path, &self.network_type)
    }
}

// ── Loader ────────────────────────────────────────────────────────────────────

pub(crate) struct OsmWay {
    pub(crate) refs:   Vec<i64>,
    pub(crate) name:   Option<String>,
    pub(crate) oneway: Oneway,
}

/// Travel direction permitted along a way, relative to its node order.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum Oneway {
    Both,
    /// Only in node order (`oneway=yes`, motorways).
    Forward,
    /// Only against node order (`oneway=-1`).
    Reverse,
}

fn load_pbf(path: &std::path::Path, network_type: &str) -> NetworkResult<RawGraph> {
    // ── Phase 1: collect all OSM nodes + accepted ways in one pass ────────
    let reader = ElementReader::from_path(path).map_err(|e| NetworkError::Osm(e.to_string()))?;

    let mut all_nodes: HashMap<i64, GeoPoint> = HashMap::new();
    let mut road_ways: Vec<OsmWay> = Vec::new();

    reader
        .for_each(|elem| match elem {
            Element::Node(n) => {
                all_nodes.insert(n.id(), GeoPoint::new(n.lat(), n.lon()));
            }
            Element::DenseNode(n) => {
                all_nodes.insert(n.id(), GeoPoint::new(n.lat(), n.lon()));
            }
            Element::Way(w) => {
                // Collect tags eagerly so &str lifetimes don't escape the closure.
                let tags: Vec<(&str, &str)> = w.tags().collect();
                let highway = tags.iter().find(|(k, _)| *k == "highway").map(|(_, v)| *v);

                if let Some(highway) = highway.filter(|h| accepts_highway(network_type, h)) {
                    let name = tags
                        .iter()
                        .find(|(k, _)| *k == "name")
                        .map(|(_, v)| (*v).to_owned());
                    let oneway = if network_type == "drive" {
                        oneway_direction(highway, &tags)
                    } else {
                        Oneway::Both
                    };
                    road_ways.push(OsmWay { refs: w.refs().collect(), name, oneway });
                }
            }
            _ => {}
        })
        .map_err(|e| NetworkError::Osm(e.to_string()))?;

    // ── Phase 2: keep only road-referenced nodes, in first-seen order ─────
    let mut seen: HashSet<i64> = HashSet::new();
    let mut graph = RawGraph::new();
    for osm_id in road_ways.iter().flat_map(|w| w.refs.iter().copied()) {
        if !seen.insert(osm_id) {
            continue;
        }
        if let (Some(pos), Ok(id)) = (all_nodes.get(&osm_id), u64::try_from(osm_id)) {
            graph.nodes.push(RawNode { id: NodeId(id), lat: pos.lat, lon: pos.lon });
        }
    }

    // ── Phase 3: directed edges from way node sequences ───────────────────
    for way in &road_ways {
        push_way_edges(&mut graph, way, &all_nodes);
    }

    Ok(graph)
}

/// Append the directed edges of `way`, one or two per consecutive node pair.
/// Pairs with an unknown or negative node ID are skipped.
pub(crate) fn push_way_edges(graph: &mut RawGraph, way: &OsmWay, positions: &HashMap<i64, GeoPoint>) {
    for window in way.refs.windows(2) {
        let (osm_a, osm_b) = (window[0], window[1]);
        let (Some(&a), Some(&b)) = (positions.get(&osm_a), positions.get(&osm_b)) else {
            continue;
        };
        let (Ok(from), Ok(to)) = (u64::try_from(osm_a), u64::try_from(osm_b)) else {
            continue;
        };
        let length_m = Some(a.distance_m(b));

        let mut push = |source: u64, target: u64| {
            graph.edges.push(RawEdge {
                source: NodeId(source),
                target: NodeId(target),
                length_m,
                name: way.name.clone(),
            });
        };
        match way.oneway {
            Oneway::Both => {
                push(from, to);
                push(to, from);
            }
            Oneway::Forward => push(from, to),
            Oneway::Reverse => push(to, from),
        }
    }
}

// ── Tag helpers ───────────────────────────────────────────────────────────────

/// Whether a way with this `highway` value belongs in a network of the
/// given type.  Unknown network types accept every highway.
pub(crate) fn accepts_highway(network_type: &str, highway: &str) -> bool {
    let foot_only = matches!(
        highway,
        "footway" | "path" | "cycleway" | "pedestrian" | "steps" | "track" | "bridleway"
    );
    let motor_only = matches!(highway, "motorway" | "motorway_link" | "trunk" | "trunk_link");
    match network_type {
        "drive" => !foot_only && highway != "construction" && highway != "proposed",
        "walk"  => !motor_only && highway != "construction" && highway != "proposed",
        _       => true,
    }
}

/// Car travel direction for a way.
///
/// `oneway=yes|1|true` is forward, `oneway=-1|reverse` is against node order,
/// and `oneway=no|false|0` overrides the implicit one-way of motorways.
pub(crate) fn oneway_direction(highway: &str, tags: &[(&str, &str)]) -> Oneway {
    let tag = tags.iter().find(|(k, _)| *k == "oneway").map(|(_, v)| *v);
    match tag {
        Some("yes" | "1" | "true") => Oneway::Forward,
        Some("-1" | "reverse") => Oneway::Reverse,
        Some("no" | "false" | "0") => Oneway::Both,
        _ if matches!(highway, "motorway" | "motorway_link") => Oneway::Forward,
        _ => Oneway::Both,
    }
}
