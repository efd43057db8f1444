//! `within-core` — foundational types for the `within` route engine.
//!
//! This crate is a dependency of every other `within-*` crate.  It has no
//! `within-*` dependencies and minimal external ones (only `thiserror`, plus
//! optional `serde`).
//!
//! # What lives here
//!
//! | Module     | Contents                                                   |
//! |------------|------------------------------------------------------------|
//! | [`ids`]    | `NodeId`                                                   |
//! | [`geo`]    | `GeoPoint`, haversine distance, bearing, `CardinalDirection` |
//! | [`config`] | `NetworkConfig`                                            |
//! | [`error`]  | `CoreError`, `CoreResult`                                  |
//!
//! # Feature flags
//!
//! | Flag    | Effect                                                     |
//! |---------|------------------------------------------------------------|
//! | `serde` | Adds `Serialize`/`Deserialize` to all public types.        |

pub mod config;
pub mod error;
pub mod geo;
pub mod ids;


// ── Re-exports ────────────────────────────────────────────────────────────────

pub use config::NetworkConfig;
pub use error::{CoreError, CoreResult};
pub use geo::{CardinalDirection, GeoPoint, compute_bearing, haversine_distance};
pub use ids::NodeId;
