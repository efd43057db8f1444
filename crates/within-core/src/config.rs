//! Network construction configuration.
//!
//! Values that would otherwise be process-wide defaults (which place to load,
//! what to call a nameless street) are carried explicitly and handed to the
//! network and its data source at construction time.

use crate::{CoreError, CoreResult};

/// Parameters for acquiring and building a transport network.
///
/// Typically constructed with [`Default`] and overridden field by field, or
/// loaded from a JSON file by the application crate (feature `serde`).
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct NetworkConfig {
    /// Human-readable place the network covers, e.g. `"Austin, Texas"`.
    pub place_name: String,

    /// Network flavour requested from the data source.  Default: `"drive"`.
    pub network_type: String,

    /// Edge length used when the raw data carries none.  Default: 1.0 m.
    pub default_length_m: f64,

    /// Street name used when the raw data carries none.
    pub default_street_name: String,

    /// Traffic multiplier given to every edge at build time.  Default: 1.0.
    ///
    /// Values below 1.0 make the haversine heuristic inadmissible and A*
    /// may then return suboptimal paths.
    pub default_traffic_factor: f64,
}

impl NetworkConfig {
    pub fn for_place(place_name: impl Into<String>) -> Self {
        Self { place_name: place_name.into(), ..Self::default() }
    }

    /// Reject values that would break the edge-cost invariant
    /// `distance * traffic_factor >= 0`.
    pub fn validate(&self) -> CoreResult<()> {
        if !(self.default_length_m.is_finite() && self.default_length_m >= 0.0) {
            return Err(CoreError::Config(format!(
                "default_length_m must be finite and non-negative, got {}",
                self.default_length_m
            )));
        }
        if !(self.default_traffic_factor.is_finite() && self.default_traffic_factor > 0.0) {
            return Err(CoreError::Config(format!(
                "default_traffic_factor must be finite and positive, got {}",
                self.default_traffic_factor
            )));
        }
        Ok(())
    }
}

impl Default for NetworkConfig {
    fn default() -> Self {
        Self {
            place_name:             "Austin, Texas".to_owned(),
            network_type:           "drive".to_owned(),
            default_length_m:       1.0,
            default_street_name:    "Unnamed Road".to_owned(),
            default_traffic_factor: 1.0,
        }
    }
}
