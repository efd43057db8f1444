//! Network-subsystem error type.

use thiserror::Error;

use within_core::CoreError;

/// Errors produced by `within-network`.
#[derive(Debug, Error)]
pub enum NetworkError {
    #[error("spatial index not initialized: build the network before querying nearest nodes")]
    NotInitialized,

    #[error("spatial index contains no nodes")]
    EmptyIndex,

    #[error("graph parse error: {0}")]
    Parse(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Core(#[from] CoreError),

    #[cfg(feature = "osm")]
    #[error("OSM parse error: {0}")]
    Osm(String),
}

pub type NetworkResult<T> = Result<T, NetworkError>;
