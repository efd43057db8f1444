//! Unit tests for within-network.
//!
//! All tests use hand-crafted graphs so they run without any map data.

#[cfg(test)]
mod helpers {
    use within_core::NodeId;

    use crate::{RawGraph, TransportNetwork};

    /// Build a small grid network for testing.
    ///
    /// Nodes (lat, lon), IDs deliberately sparse like OSM IDs:
    ///   10:(0,0)  20:(0,1)  30:(0,2)
    ///   40:(1,0)            50:(1,2)
    ///
    /// Two-way streets: 10-20, 20-30 ("Main St"), 10-40, 30-50, 40-50 ("Oak Ave").
    pub fn grid_graph() -> RawGraph {
        let mut g = RawGraph::new();
        g.push_node(10u64, 0.0, 0.0)
            .push_node(20u64, 0.0, 1.0)
            .push_node(30u64, 0.0, 2.0)
            .push_node(40u64, 1.0, 0.0)
            .push_node(50u64, 1.0, 2.0);

        for (a, b, len, name) in [
            (10u64, 20u64, 100.0, "Main St"),
            (20, 30, 100.0, "Main St"),
            (30, 50, 100.0, "Oak Ave"),
            (10, 40, 500.0, "Oak Ave"),
            (40, 50, 100.0, "Oak Ave"),
        ] {
            g.push_edge(a, b, Some(len), Some(name));
            g.push_edge(b, a, Some(len), Some(name));
        }
        g
    }

    pub fn grid_network() -> TransportNetwork {
        let mut net = TransportNetwork::new();
        net.build_from_raw_graph(&grid_graph());
        net
    }

    pub fn id(n: u64) -> NodeId {
        NodeId(n)
    }
}

// ── Network construction ──────────────────────────────────────────────────────

#[cfg(test)]
mod network {
    use within_core::{GeoPoint, NetworkConfig, NodeId};

    use super::helpers::{grid_network, id};
    use crate::{NetworkError, RawGraph, TransportNetwork};

    #[test]
    fn empty_network() {
        let net = TransportNetwork::new();
        assert_eq!(net.node_count(), 0);
        assert_eq!(net.edge_count(), 0);
        assert!(net.is_empty());
        assert!(net.neighbors(id(1)).is_empty());
    }

    #[test]
    fn build_counts() {
        let net = grid_network();
        assert_eq!(net.node_count(), 5);
        assert_eq!(net.edge_count(), 10);
        assert_eq!(net.node_ids(), &[id(10), id(20), id(30), id(40), id(50)]);
    }

    #[test]
    fn add_edge_is_directed_and_unvalidated() {
        let mut net = TransportNetwork::new();
        // Neither endpoint has a coordinate; allowed while building.
        net.add_edge(id(1), id(2), 42.0, 1.5, "Elm St");
        assert_eq!(net.edge_count(), 1);
        assert_eq!(net.neighbors(id(1)).len(), 1);
        assert!(net.neighbors(id(2)).is_empty());
        assert_eq!(net.node_count(), 0);

        let e = &net.neighbors(id(1))[0];
        assert_eq!(e.target, id(2));
        assert_eq!(e.street_name, "Elm St");
        assert_eq!(e.effective_cost(), 63.0);
    }

    #[test]
    fn parallel_edges_keep_insertion_order() {
        let mut net = TransportNetwork::new();
        net.add_edge(id(1), id(2), 80.0, 1.0, "Service Rd");
        net.add_edge(id(1), id(2), 50.0, 1.0, "Main St");
        assert_eq!(net.neighbors(id(1)).len(), 2);
        assert_eq!(net.first_edge(id(1), id(2)).unwrap().street_name, "Service Rd");
        assert!(net.first_edge(id(2), id(1)).is_none());
    }

    #[test]
    fn raw_defaults_applied() {
        let mut g = RawGraph::new();
        g.push_node(1u64, 0.0, 0.0).push_node(2u64, 0.0, 0.001);
        g.push_edge(1u64, 2u64, None, None);

        let mut net = TransportNetwork::new();
        net.build_from_raw_graph(&g);

        let e = net.first_edge(id(1), id(2)).unwrap();
        assert_eq!(e.distance_m, 1.0);
        assert_eq!(e.traffic_factor, 1.0);
        assert_eq!(e.street_name, "Unnamed Road");
    }

    #[test]
    fn raw_defaults_follow_config() {
        let cfg = NetworkConfig {
            default_length_m:       5.0,
            default_street_name:    "Calle sin nombre".to_owned(),
            default_traffic_factor: 2.0,
            ..NetworkConfig::for_place("Mobile, AL")
        };
        let mut g = RawGraph::new();
        g.push_node(1u64, 0.0, 0.0).push_node(2u64, 0.0, 0.001);
        g.push_edge(1u64, 2u64, None, None);

        let mut net = TransportNetwork::with_config(cfg).unwrap();
        net.build_from_raw_graph(&g);

        let e = net.first_edge(id(1), id(2)).unwrap();
        assert_eq!(e.distance_m, 5.0);
        assert_eq!(e.street_name, "Calle sin nombre");
        assert_eq!(e.effective_cost(), 10.0);
        assert_eq!(net.config().place_name, "Mobile, AL");
    }

    #[test]
    fn with_config_rejects_invalid() {
        let cfg = NetworkConfig { default_traffic_factor: -1.0, ..NetworkConfig::default() };
        assert!(matches!(
            TransportNetwork::with_config(cfg),
            Err(NetworkError::Core(_))
        ));
    }

    #[test]
    fn reregistering_moves_node_without_duplicating() {
        let mut net = TransportNetwork::new();
        net.register_node(id(7), GeoPoint::new(0.0, 0.0));
        net.register_node(id(7), GeoPoint::new(1.0, 1.0));
        assert_eq!(net.node_count(), 1);
        assert_eq!(net.node_pos(id(7)), Some(GeoPoint::new(1.0, 1.0)));
        assert_eq!(net.node_pos(NodeId(8)), None);
    }
}

// ── Spatial index ─────────────────────────────────────────────────────────────

#[cfg(test)]
mod spatial {
    use within_core::GeoPoint;

    use super::helpers::{grid_network, id};
    use crate::{NetworkError, SpatialIndex, TransportNetwork};

    #[test]
    fn not_initialized_before_build() {
        let mut net = TransportNetwork::new();
        assert!(matches!(net.nearest_node(0.0, 0.0), Err(NetworkError::NotInitialized)));

        net.register_node(id(1), GeoPoint::new(0.0, 0.0));
        assert!(matches!(net.nearest_node(0.0, 0.0), Err(NetworkError::NotInitialized)));

        net.build_spatial_index();
        assert_eq!(net.nearest_node(0.0, 0.0).unwrap(), id(1));
    }

    #[test]
    fn registering_after_build_invalidates_index() {
        let mut net = grid_network();
        assert!(net.nearest_node(0.0, 0.0).is_ok());
        assert_eq!(net.spatial_index().map(SpatialIndex::len), Some(5));
        net.register_node(id(60), GeoPoint::new(5.0, 5.0));
        assert!(net.spatial_index().is_none());
        assert!(matches!(net.nearest_node(0.0, 0.0), Err(NetworkError::NotInitialized)));
        net.build_spatial_index();
        assert_eq!(net.spatial_index().map(SpatialIndex::len), Some(6));
        assert_eq!(net.nearest_node(4.9, 5.1).unwrap(), id(60));
    }

    #[test]
    fn empty_index() {
        let mut net = TransportNetwork::new();
        net.build_spatial_index();
        assert!(matches!(net.nearest_node(0.0, 0.0), Err(NetworkError::EmptyIndex)));
    }

    #[test]
    fn snap_exact_position() {
        let net = grid_network();
        assert_eq!(net.nearest_node(0.0, 0.0).unwrap(), id(10));
        assert_eq!(net.nearest_node(1.0, 2.0).unwrap(), id(50));
    }

    #[test]
    fn snap_nearest() {
        let net = grid_network();
        assert_eq!(net.nearest_node(0.0, 0.4).unwrap(), id(10));
        assert_eq!(net.nearest_node(0.0, 0.6).unwrap(), id(20));
        assert_eq!(net.nearest_node(0.9, 1.9).unwrap(), id(50));
    }

    #[test]
    fn index_maps_positions_back_to_ids() {
        let index = SpatialIndex::build([
            (id(900), GeoPoint::new(30.0, -97.0)),
            (id(5), GeoPoint::new(31.0, -97.0)),
            (id(77), GeoPoint::new(30.0, -96.0)),
        ]);
        assert_eq!(index.len(), 3);
        assert_eq!(index.ids(), &[id(900), id(5), id(77)]);
        assert_eq!(index.nearest_node(30.9, -97.05).unwrap(), id(5));
        assert_eq!(index.nearest_node(30.1, -96.2).unwrap(), id(77));
    }

    #[test]
    fn planar_degree_metric() {
        // At 60°N a degree of longitude is about half a degree of latitude on
        // the ground.  Node 2 is closer on the ground (~28 km vs ~44 km) but
        // the index compares raw degrees, so node 1 wins.
        let index = SpatialIndex::build([
            (id(1), GeoPoint::new(60.4, 10.0)),
            (id(2), GeoPoint::new(60.0, 10.5)),
        ]);
        assert_eq!(index.nearest_node(60.0, 10.0).unwrap(), id(1));
    }

    #[test]
    fn k_nearest_order() {
        let net = grid_network();
        let nearest = net.k_nearest_nodes(0.0, 0.0, 2).unwrap();
        assert_eq!(nearest[0], id(10));
        // 20 (dist=1) and 40 (dist=1) are equidistant in lat/lon, so either is valid.
        assert!(nearest[1] == id(20) || nearest[1] == id(40));
        assert_eq!(net.k_nearest_nodes(0.0, 0.0, 10).unwrap().len(), 5);
    }
}

// ── CSV ingestion ─────────────────────────────────────────────────────────────

#[cfg(test)]
mod csv_source {
    use std::io::{Cursor, Write};

    use within_core::NodeId;

    use crate::{CsvGraphSource, GraphSource, InMemorySource, NetworkError, load_raw_graph_reader};

    const NODES: &str = "\
id,lat,lon
1,30.2672,-97.7431
2,30.2672,-97.7421
3,30.2682,-97.7421
";

    const EDGES: &str = "\
source,target,length,name
1,2,96.2,Congress Avenue
2,3,,
3,1,150.0,
";

    #[test]
    fn parses_optional_cells() {
        let g = load_raw_graph_reader(Cursor::new(NODES), Cursor::new(EDGES)).unwrap();
        assert_eq!(g.nodes.len(), 3);
        assert_eq!(g.nodes[2].id, NodeId(3));
        assert_eq!(g.edges.len(), 3);

        assert_eq!(g.edges[0].length_m, Some(96.2));
        assert_eq!(g.edges[0].name.as_deref(), Some("Congress Avenue"));
        assert_eq!(g.edges[1].length_m, None);
        assert_eq!(g.edges[1].name, None);
        assert_eq!(g.edges[2].length_m, Some(150.0));
        assert_eq!(g.edges[2].name, None);
    }

    #[test]
    fn malformed_row_is_parse_error() {
        let bad_nodes = "id,lat,lon\n1,not-a-number,-97.0\n";
        let result = load_raw_graph_reader(Cursor::new(bad_nodes), Cursor::new(EDGES));
        assert!(matches!(result, Err(NetworkError::Parse(_))));
    }

    #[test]
    fn reads_files_from_disk() {
        let dir = tempfile::tempdir().unwrap();
        let nodes_path = dir.path().join("nodes.csv");
        let edges_path = dir.path().join("edges.csv");
        std::fs::File::create(&nodes_path).unwrap().write_all(NODES.as_bytes()).unwrap();
        std::fs::File::create(&edges_path).unwrap().write_all(EDGES.as_bytes()).unwrap();

        let source = CsvGraphSource::new(&nodes_path, &edges_path);
        assert!(source.describe().contains("nodes.csv"));
        let g = source.fetch().unwrap();
        assert_eq!(g.nodes.len(), 3);
        assert_eq!(g.edges.len(), 3);
    }

    #[test]
    fn missing_file_is_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let source = CsvGraphSource::new(dir.path().join("nope.csv"), dir.path().join("nada.csv"));
        assert!(matches!(source.fetch(), Err(NetworkError::Io(_))));
    }

    #[test]
    fn in_memory_source_clones() {
        let g = super::helpers::grid_graph();
        let source = InMemorySource::new("grid", g.clone());
        assert_eq!(source.fetch().unwrap(), g);
        assert_eq!(source.describe(), "in-memory graph 'grid'");
    }

    #[test]
    fn boxed_source_delegates() {
        let g = super::helpers::grid_graph();
        let boxed: Box<dyn GraphSource> = Box::new(InMemorySource::new("grid", g.clone()));
        assert_eq!(boxed.fetch().unwrap(), g);
        assert_eq!(GraphSource::describe(&boxed), "in-memory graph 'grid'");
    }
}

// ── OSM tag handling ──────────────────────────────────────────────────────────

#[cfg(all(test, feature = "osm"))]
mod osm_tags {
    use std::collections::HashMap;

    use within_core::GeoPoint;

    use super::helpers::id;
    use crate::RawGraph;
    use crate::osm::{Oneway, OsmWay, accepts_highway, oneway_direction, push_way_edges};

    #[test]
    fn drive_excludes_footways() {
        assert!(accepts_highway("drive", "residential"));
        assert!(accepts_highway("drive", "motorway"));
        assert!(!accepts_highway("drive", "footway"));
        assert!(!accepts_highway("walk", "motorway"));
        assert!(accepts_highway("walk", "footway"));
        assert!(accepts_highway("all", "steps"));
    }

    #[test]
    fn oneway_rules() {
        assert_eq!(oneway_direction("residential", &[("oneway", "yes")]), Oneway::Forward);
        assert_eq!(oneway_direction("residential", &[("oneway", "-1")]), Oneway::Reverse);
        assert_eq!(oneway_direction("motorway", &[]), Oneway::Forward);
        assert_eq!(oneway_direction("motorway", &[("oneway", "no")]), Oneway::Both);
        assert_eq!(oneway_direction("residential", &[("oneway", "no")]), Oneway::Both);
        assert_eq!(oneway_direction("residential", &[]), Oneway::Both);
    }

    fn edges_for(oneway: Oneway) -> Vec<(u64, u64)> {
        let positions = HashMap::from([
            (1_i64, GeoPoint::new(0.0, 0.0)),
            (2, GeoPoint::new(0.0, 0.001)),
            (3, GeoPoint::new(0.0, 0.002)),
        ]);
        let way = OsmWay { refs: vec![1, 2, 3], name: Some("Guadalupe St".to_owned()), oneway };
        let mut graph = RawGraph::new();
        push_way_edges(&mut graph, &way, &positions);
        graph.edges.iter().map(|e| (e.source.get(), e.target.get())).collect()
    }

    #[test]
    fn way_edges_follow_direction() {
        assert_eq!(edges_for(Oneway::Both), vec![(1, 2), (2, 1), (2, 3), (3, 2)]);
        assert_eq!(edges_for(Oneway::Forward), vec![(1, 2), (2, 3)]);
        assert_eq!(edges_for(Oneway::Reverse), vec![(2, 1), (3, 2)]);
    }

    #[test]
    fn way_edges_carry_name_and_length() {
        let positions = HashMap::from([(5_i64, GeoPoint::new(0.0, 0.0)), (6, GeoPoint::new(0.0, 0.001))]);
        let way = OsmWay { refs: vec![5, 6, 7], name: None, oneway: Oneway::Reverse };
        let mut graph = RawGraph::new();
        push_way_edges(&mut graph, &way, &positions);

        // 7 has no position, so only the 5-6 pair yields an edge.
        assert_eq!(graph.edges.len(), 1);
        let e = &graph.edges[0];
        assert_eq!((e.source, e.target), (id(6), id(5)));
        assert_eq!(e.name, None);
        let len = e.length_m.unwrap();
        assert!((len - 111.19).abs() < 0.1, "got {len}");
    }
}
