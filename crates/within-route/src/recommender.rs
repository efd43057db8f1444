//! End-to-end route recommendation.
//!
//! [`RouteRecommender`] owns the network for the life of the process: it is
//! built once from a [`GraphSource`] and then only read, so `recommend` takes
//! `&self` and may be called from many threads at once.

use tracing::{info, warn};

use within_core::{GeoPoint, NetworkConfig, NodeId};
use within_network::{GraphSource, TransportNetwork};

use crate::instructions::{Directions, synthesize};
use crate::planner::RoutePlanner;
use crate::summarizer::RouteSummarizer;
use crate::RouteResult;

/// Text returned when the two snapped nodes are not connected.
pub const NO_ROUTE_MESSAGE: &str = "No route available between the requested points.";

// ── Request / response ────────────────────────────────────────────────────────

/// A validated pair of route endpoints.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct RouteInput {
    pub start: GeoPoint,
    pub end:   GeoPoint,
}

impl RouteInput {
    /// # Errors
    ///
    /// `CoreError::InvalidCoordinate` if either point is NaN or outside the
    /// WGS-84 ranges.
    pub fn new(start_lat: f64, start_lon: f64, end_lat: f64, end_lon: f64) -> RouteResult<Self> {
        let start = GeoPoint::new(start_lat, start_lon);
        let end = GeoPoint::new(end_lat, end_lon);
        start.validate()?;
        end.validate()?;
        Ok(Self { start, end })
    }
}

/// Result of a recommendation.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct RouteOutput {
    /// Node sequence from the snapped start to the snapped end; empty if none.
    pub raw_nodes:         Vec<NodeId>,
    pub directions:        Directions,
    /// Final text: the generated description, possibly rewritten by the
    /// summarizer, or [`NO_ROUTE_MESSAGE`].
    pub text_instructions: String,
}

impl RouteOutput {
    pub fn is_found(&self) -> bool {
        !self.raw_nodes.is_empty()
    }
}

// ── RouteRecommender ──────────────────────────────────────────────────────────

/// Ties a graph source, a planner and an optional summarizer together.
///
/// # Example
///
/// ```rust,ignore
/// let mut rec = RouteRecommender::new(source, AStarPlanner)
///     .summarizer(PassThroughSummarizer);
/// rec.initialize_network()?;
/// let out = rec.recommend(&RouteInput::new(30.2672, -97.7431, 30.2814, -97.7410)?)?;
/// ```
pub struct RouteRecommender<P: RoutePlanner> {
    source:     Box<dyn GraphSource>,
    planner:    P,
    summarizer: Option<Box<dyn RouteSummarizer>>,
    network:    TransportNetwork,
}

impl<P: RoutePlanner> RouteRecommender<P> {
    /// Recommender with [`NetworkConfig::default`].
    pub fn new(source: impl GraphSource + 'static, planner: P) -> Self {
        Self {
            source:     Box::new(source),
            planner,
            summarizer: None,
            network:    TransportNetwork::new(),
        }
    }

    /// # Errors
    ///
    /// Propagates [`NetworkConfig::validate`] failures.
    pub fn with_config(
        source:  impl GraphSource + 'static,
        planner: P,
        config:  NetworkConfig,
    ) -> RouteResult<Self> {
        Ok(Self {
            source:     Box::new(source),
            planner,
            summarizer: None,
            network:    TransportNetwork::with_config(config)?,
        })
    }

    /// Install a summarizer for the final text.
    pub fn summarizer(mut self, summarizer: impl RouteSummarizer + 'static) -> Self {
        self.summarizer = Some(Box::new(summarizer));
        self
    }

    /// Fetch the raw graph and (re)build the network and its spatial index.
    pub fn initialize_network(&mut self) -> RouteResult<()> {
        info!(
            source = %self.source.describe(),
            network_type = %self.network.config().network_type,
            "fetching street network"
        );
        let raw = self.source.fetch()?;
        let mut network = TransportNetwork::with_config(self.network.config().clone())?;
        network.build_from_raw_graph(&raw);
        self.network = network;
        Ok(())
    }

    pub fn network(&self) -> &TransportNetwork {
        &self.network
    }

    /// Snap both endpoints, search, and render instructions.
    ///
    /// # Errors
    ///
    /// `NetworkError::NotInitialized` if called before
    /// [`initialize_network`](Self::initialize_network).  An unreachable
    /// destination is not an error: it yields an empty `raw_nodes` and
    /// [`NO_ROUTE_MESSAGE`].
    pub fn recommend(&self, input: &RouteInput) -> RouteResult<RouteOutput> {
        let start = self.network.nearest_node(input.start.lat, input.start.lon)?;
        let end = self.network.nearest_node(input.end.lat, input.end.lon)?;

        let raw_nodes = self.planner.find_route(&self.network, start, end);
        if raw_nodes.is_empty() {
            info!(%start, %end, "no route between snapped nodes");
            return Ok(RouteOutput {
                raw_nodes,
                directions:        Directions::default(),
                text_instructions: NO_ROUTE_MESSAGE.to_owned(),
            });
        }

        let directions = synthesize(&self.network, &raw_nodes);
        let description = directions.describe();

        let text_instructions = match &self.summarizer {
            None => description,
            Some(s) => match s.summarize(&description) {
                Ok(text) => text,
                Err(e) => {
                    warn!(error = %e, "summarizer failed, returning generated description");
                    description
                }
            },
        };

        Ok(RouteOutput { raw_nodes, directions, text_instructions })
    }

    /// [`recommend`](Self::recommend) for every input, results in input order.
    ///
    /// With the `parallel` Cargo feature the requests run on Rayon's thread
    /// pool; each search allocates its own state over the shared network.
    pub fn recommend_many(&self, inputs: &[RouteInput]) -> Vec<RouteResult<RouteOutput>> {
        #[cfg(not(feature = "parallel"))]
        {
            inputs.iter().map(|input| self.recommend(input)).collect()
        }

        #[cfg(feature = "parallel")]
        {
            use rayon::prelude::*;

            inputs.par_iter().map(|input| self.recommend(input)).collect()
        }
    }
}
