use thiserror::Error;

use within_core::CoreError;
use within_network::NetworkError;

#[derive(Debug, Error)]
pub enum RouteError {
    #[error(transparent)]
    Core(#[from] CoreError),

    #[error("network error: {0}")]
    Network(#[from] NetworkError),

    #[error("summarizer error: {0}")]
    Summarizer(String),
}

pub type RouteResult<T> = Result<T, RouteError>;
