//! austin — walk-through of the within routing engine.
//!
//! Recommends a drive from Austin City Hall to the UT Austin campus over a
//! small embedded downtown grid, or over a network loaded from disk.
//!
//! Run with:
//!   cargo run -p austin
//!   cargo run -p austin -- --csv demos/austin/data/nodes.csv demos/austin/data/edges.csv
//!   cargo run -p austin --release -- --pbf texas-latest.osm.pbf --config austin.json
//!
//! `--config` takes a JSON `NetworkConfig`; missing fields keep their
//! defaults.  `--json` prints the full `RouteOutput` as JSON.  Log verbosity
//! follows `RUST_LOG` (default `info`).

mod network;

use std::path::PathBuf;
use std::time::Instant;

use anyhow::{Context, Result, bail};
use tracing::info;
use tracing_subscriber::EnvFilter;

use within_core::NetworkConfig;
use within_network::{CsvGraphSource, GraphSource, InMemorySource, OsmPbfSource, SpatialIndex};
use within_route::{AStarPlanner, PassThroughSummarizer, RouteInput, RouteRecommender};

use network::build_raw_graph;

// ── Constants ─────────────────────────────────────────────────────────────────

const CITY_HALL: (f64, f64) = (30.2672, -97.7431);
const UT_AUSTIN: (f64, f64) = (30.2814, -97.7410);
/// Candidate nodes listed around each endpoint.
const SNAP_CANDIDATES: usize = 3;

// ── Arguments ─────────────────────────────────────────────────────────────────

enum Network {
    Embedded,
    Csv { nodes: PathBuf, edges: PathBuf },
    Pbf(PathBuf),
}

struct Args {
    network: Network,
    config:  Option<PathBuf>,
    json:    bool,
}

fn parse_args() -> Result<Args> {
    let mut args = Args { network: Network::Embedded, config: None, json: false };
    let mut it = std::env::args().skip(1);

    while let Some(arg) = it.next() {
        match arg.as_str() {
            "--csv" => {
                let nodes = it.next().context("--csv needs <nodes.csv> <edges.csv>")?;
                let edges = it.next().context("--csv needs <nodes.csv> <edges.csv>")?;
                args.network = Network::Csv { nodes: nodes.into(), edges: edges.into() };
            }
            "--pbf" => {
                let path = it.next().context("--pbf needs a file")?;
                args.network = Network::Pbf(path.into());
            }
            "--config" => {
                let path = it.next().context("--config needs a file")?;
                args.config = Some(path.into());
            }
            "--json" => args.json = true,
            other => bail!("unknown argument {other:?}"),
        }
    }
    Ok(args)
}

fn load_config(path: Option<&PathBuf>) -> Result<NetworkConfig> {
    let Some(path) = path else {
        return Ok(NetworkConfig::default());
    };
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("reading config {}", path.display()))?;
    let config = serde_json::from_str(&text)
        .with_context(|| format!("parsing config {}", path.display()))?;
    Ok(config)
}

// ── main ──────────────────────────────────────────────────────────────────────

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let args = parse_args()?;
    let config = load_config(args.config.as_ref())?;

    println!("=== austin — within route recommender ===");
    println!("Place: {}  |  Network type: {}", config.place_name, config.network_type);
    println!();

    let source: Box<dyn GraphSource> = match args.network {
        Network::Embedded => Box::new(InMemorySource::new("downtown Austin grid", build_raw_graph())),
        Network::Csv { nodes, edges } => Box::new(CsvGraphSource::new(nodes, edges)),
        Network::Pbf(path) => Box::new(OsmPbfSource::new(path, config.network_type.clone())),
    };

    // 1. Build the network.
    let t0 = Instant::now();
    let mut rec = RouteRecommender::with_config(source, AStarPlanner, config)?
        .summarizer(PassThroughSummarizer);
    rec.initialize_network()?;
    let net = rec.network();
    println!(
        "Network: {} nodes, {} edges  ({:.3} s)",
        net.node_count(),
        net.edge_count(),
        t0.elapsed().as_secs_f64()
    );
    println!(
        "Spatial index: {} nodes",
        net.spatial_index().map_or(0, SpatialIndex::len)
    );

    // 2. Show what each endpoint snaps to.
    for (label, (lat, lon)) in [("City Hall", CITY_HALL), ("UT Austin", UT_AUSTIN)] {
        let candidates = net.k_nearest_nodes(lat, lon, SNAP_CANDIDATES)?;
        let listed: Vec<String> = candidates.iter().map(ToString::to_string).collect();
        println!("{label:<10} ({lat:.4}, {lon:.4}) → nearest nodes [{}]", listed.join(", "));
    }
    println!();

    // 3. Recommend.
    let input = RouteInput::new(CITY_HALL.0, CITY_HALL.1, UT_AUSTIN.0, UT_AUSTIN.1)?;
    let t1 = Instant::now();
    let out = rec.recommend(&input)?;
    info!(elapsed_ms = t1.elapsed().as_millis() as u64, found = out.is_found(), "recommendation done");

    if args.json {
        println!("{}", serde_json::to_string_pretty(&out)?);
        return Ok(());
    }

    let nodes: Vec<String> = out.raw_nodes.iter().map(ToString::to_string).collect();
    println!("Raw nodes: [{}]", nodes.join(", "));
    println!();
    println!("{}", out.text_instructions);

    Ok(())
}
