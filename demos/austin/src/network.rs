//! Embedded downtown Austin street grid.
//!
//! Twelve intersections between 2nd Street and MLK Jr Blvd.  Lavaca St is
//! one-way northbound and Guadalupe St one-way southbound, as in the real
//! grid; everything else is two-way.  `data/nodes.csv` and `data/edges.csv`
//! hold the same network for the `--csv` path.

use within_core::haversine_distance;
use within_network::RawGraph;

const AVENUES: [(f64, &str); 3] = [
    (-97.7445, "Lavaca St"),
    (-97.7431, "Congress Ave"),
    (-97.7410, "Guadalupe St"),
];

const STREETS: [(f64, &str); 4] = [
    (30.2672, "W 2nd St"),
    (30.2720, "W 7th St"),
    (30.2760, "W 11th St"),
    (30.2814, "MLK Jr Blvd"),
];

fn node_id(row: usize, col: usize) -> u64 {
    1_000 + 10 * row as u64 + col as u64
}

fn coord(row: usize, col: usize) -> (f64, f64) {
    (STREETS[row].0, AVENUES[col].0)
}

/// Edge with its length taken as the great-circle distance between ends.
fn road(g: &mut RawGraph, from: (usize, usize), to: (usize, usize), name: &str) {
    let (lat1, lon1) = coord(from.0, from.1);
    let (lat2, lon2) = coord(to.0, to.1);
    g.push_edge(
        node_id(from.0, from.1),
        node_id(to.0, to.1),
        Some(haversine_distance(lat1, lon1, lat2, lon2)),
        Some(name),
    );
}

pub fn build_raw_graph() -> RawGraph {
    let mut g = RawGraph::with_capacity(STREETS.len() * AVENUES.len(), 32);

    for row in 0..STREETS.len() {
        for col in 0..AVENUES.len() {
            let (lat, lon) = coord(row, col);
            g.push_node(node_id(row, col), lat, lon);
        }
    }

    // Cross streets, both directions.
    for (row, &(_, name)) in STREETS.iter().enumerate() {
        for col in 0..AVENUES.len() - 1 {
            road(&mut g, (row, col), (row, col + 1), name);
            road(&mut g, (row, col + 1), (row, col), name);
        }
    }

    // Avenues.
    for (col, &(_, name)) in AVENUES.iter().enumerate() {
        for row in 0..STREETS.len() - 1 {
            let (south, north) = ((row, col), (row + 1, col));
            match name {
                "Lavaca St" => road(&mut g, south, north, name),
                "Guadalupe St" => road(&mut g, north, south, name),
                _ => {
                    road(&mut g, south, north, name);
                    road(&mut g, north, south, name);
                }
            }
        }
    }

    g
}
