//! Optional rewriting of the generated route description.
//!
//! A summarizer turns the engine's mechanical instructions into friendlier
//! prose (for example by calling a text-generation service).  None ships with
//! the engine beyond [`PassThroughSummarizer`].

use crate::RouteResult;

/// Rewrites a route description.
///
/// Must be `Send + Sync` because the recommender may serve requests from
/// several threads.
pub trait RouteSummarizer: Send + Sync {
    fn summarize(&self, description: &str) -> RouteResult<String>;
}

/// A [`RouteSummarizer`] that returns the description unchanged.
pub struct PassThroughSummarizer;

impl RouteSummarizer for PassThroughSummarizer {
    fn summarize(&self, description: &str) -> RouteResult<String> {
        Ok(description.to_owned())
    }
}
