//! `within-network` — street network, raw-graph ingestion, and spatial indexing.
//!
//! # Crate layout
//!
//! | Module      | Contents                                                    |
//! |-------------|-------------------------------------------------------------|
//! | [`network`] | `TransportNetwork`, `Edge`                                  |
//! | [`spatial`] | `SpatialIndex` (R-tree nearest-node lookup)                 |
//! | [`raw`]     | `RawGraph` ingestion contract, CSV reader                   |
//! | [`source`]  | `GraphSource` trait, `InMemorySource`, `CsvGraphSource`     |
//! | [`osm`]     | `OsmPbfSource` (feature = `"osm"` only)                     |
//! | [`error`]   | `NetworkError`, `NetworkResult<T>`                          |
//!
//! # Feature flags
//!
//! | Flag    | Effect                                                       |
//! |---------|--------------------------------------------------------------|
//! | `osm`   | Enables OSM PBF loading via the `osmpbf` crate.             |
//! | `serde` | Derives `Serialize`/`Deserialize` on `within-core` types.    |

pub mod error;
pub mod network;
pub mod raw;
pub mod source;
pub mod spatial;

#[cfg(feature = "osm")]
pub mod osm;

#[cfg(test)]
mod tests;

pub use error::{NetworkError, NetworkResult};
pub use network::{Edge, TransportNetwork};
pub use raw::{RawEdge, RawGraph, RawNode, load_raw_graph_reader};
pub use source::{CsvGraphSource, GraphSource, InMemorySource};
pub use spatial::SpatialIndex;

#[cfg(feature = "osm")]
pub use osm::OsmPbfSource;
