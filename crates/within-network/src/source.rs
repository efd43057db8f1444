//! Pluggable street-data sources.
//!
//! The route recommender asks a [`GraphSource`] for a [`RawGraph`] once at
//! start-up.  Fetching is synchronous: a source that talks to a remote
//! service blocks the caller until the graph is available.

use std::fs::File;
use std::path::PathBuf;

use tracing::info;

use crate::raw::{RawGraph, load_raw_graph_reader};
use crate::NetworkResult;

/// Something that can produce the raw street graph for a network build.
///
/// Implementations must be `Send + Sync` so the owning recommender can be
/// shared across Rayon worker threads.
pub trait GraphSource: Send + Sync {
    /// Short human-readable description used in logs.
    fn describe(&self) -> String;

    /// Produce the raw graph.
    fn fetch(&self) -> NetworkResult<RawGraph>;
}

/// Lets a source picked at run time be passed wherever a concrete one is.
impl<S: GraphSource + ?Sized> GraphSource for Box<S> {
    fn describe(&self) -> String {
        (**self).describe()
    }

    fn fetch(&self) -> NetworkResult<RawGraph> {
        (**self).fetch()
    }
}

// ── InMemorySource ────────────────────────────────────────────────────────────

/// A [`GraphSource`] over a graph already held in memory.
pub struct InMemorySource {
    label: String,
    graph: RawGraph,
}

impl InMemorySource {
    pub fn new(label: impl Into<String>, graph: RawGraph) -> Self {
        Self { label: label.into(), graph }
    }
}

impl GraphSource for InMemorySource {
    fn describe(&self) -> String {
        format!("in-memory graph '{}'", self.label)
    }

    fn fetch(&self) -> NetworkResult<RawGraph> {
        Ok(self.graph.clone())
    }
}

// ── CsvGraphSource ────────────────────────────────────────────────────────────

/// A [`GraphSource`] reading a nodes CSV and an edges CSV from disk.
///
/// See [`crate::raw`] for the column layout.
pub struct CsvGraphSource {
    nodes_path: PathBuf,
    edges_path: PathBuf,
}

impl CsvGraphSource {
    pub fn new(nodes_path: impl Into<PathBuf>, edges_path: impl Into<PathBuf>) -> Self {
        Self { nodes_path: nodes_path.into(), edges_path: edges_path.into() }
    }
}

impl GraphSource for CsvGraphSource {
    fn describe(&self) -> String {
        format!(
            "CSV graph ({}, {})",
            self.nodes_path.display(),
            self.edges_path.display()
        )
    }

    fn fetch(&self) -> NetworkResult<RawGraph> {
        info!(nodes = %self.nodes_path.display(), edges = %self.edges_path.display(), "reading street graph");
        let nodes = File::open(&self.nodes_path)?;
        let edges = File::open(&self.edges_path)?;
        load_raw_graph_reader(nodes, edges)
    }
}
