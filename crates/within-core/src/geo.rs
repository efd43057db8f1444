//! Geographic coordinate type and spherical-earth helpers.
//!
//! `GeoPoint` uses `f64` latitude/longitude.  Haversine distances feed the
//! A* heuristic directly, so they must agree with edge lengths to within
//! floating-point rounding rather than the ~1 m granularity of `f32`.

use std::fmt;

use crate::{CoreError, CoreResult};

/// Mean Earth radius in metres.
pub const EARTH_RADIUS_M: f64 = 6_371_000.0;

/// A WGS-84 geographic coordinate in degrees.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GeoPoint {
    pub lat: f64,
    pub lon: f64,
}

impl GeoPoint {
    #[inline]
    pub fn new(lat: f64, lon: f64) -> Self {
        Self { lat, lon }
    }

    /// Haversine great-circle distance in metres.
    #[inline]
    pub fn distance_m(self, other: GeoPoint) -> f64 {
        haversine_distance(self.lat, self.lon, other.lat, other.lon)
    }

    /// Initial bearing from `self` towards `other`, in `[0, 360)` degrees.
    #[inline]
    pub fn bearing_to(self, other: GeoPoint) -> f64 {
        compute_bearing(self.lat, self.lon, other.lat, other.lon)
    }

    /// Check that the coordinate is finite and inside the WGS-84 ranges
    /// (latitude `[-90, 90]`, longitude `[-180, 180]`).
    pub fn validate(self) -> CoreResult<()> {
        let lat_ok = !self.lat.is_nan() && (-90.0..=90.0).contains(&self.lat);
        let lon_ok = !self.lon.is_nan() && (-180.0..=180.0).contains(&self.lon);
        if lat_ok && lon_ok {
            Ok(())
        } else {
            Err(CoreError::InvalidCoordinate { lat: self.lat, lon: self.lon })
        }
    }
}

impl fmt::Display for GeoPoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({:.6}, {:.6})", self.lat, self.lon)
    }
}

/// Haversine great-circle distance in metres between two lat/lon pairs.
///
/// Returns exactly `0.0` for identical points.  The intermediate term is
/// clamped to `[0, 1]` so near-antipodal pairs never produce NaN.
pub fn haversine_distance(lat1: f64, lon1: f64, lat2: f64, lon2: f64) -> f64 {
    let d_lat = (lat2 - lat1).to_radians();
    let d_lon = (lon2 - lon1).to_radians();

    let a = (d_lat * 0.5).sin().powi(2)
        + lat1.to_radians().cos() * lat2.to_radians().cos() * (d_lon * 0.5).sin().powi(2);
    let a = a.clamp(0.0, 1.0);

    let c = 2.0 * a.sqrt().atan2((1.0 - a).sqrt());
    EARTH_RADIUS_M * c
}

/// Initial great-circle bearing from point 1 to point 2, normalised to
/// `[0, 360)` degrees.  Identical points give `0.0`.
pub fn compute_bearing(lat1: f64, lon1: f64, lat2: f64, lon2: f64) -> f64 {
    let (lat1, lat2) = (lat1.to_radians(), lat2.to_radians());
    let d_lon = (lon2 - lon1).to_radians();

    let x = d_lon.sin() * lat2.cos();
    let y = lat1.cos() * lat2.sin() - lat1.sin() * lat2.cos() * d_lon.cos();

    (x.atan2(y).to_degrees() + 360.0) % 360.0
}

// ── CardinalDirection ─────────────────────────────────────────────────────────

/// One of the eight compass directions used in route instructions.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum CardinalDirection {
    North,
    Northeast,
    East,
    Southeast,
    South,
    Southwest,
    West,
    Northwest,
}

impl CardinalDirection {
    /// Upper (exclusive) bound of each 45° sector, paired with its direction.
    /// Anything at or above 337.5° wraps back to north.
    const SECTORS: [(f64, CardinalDirection); 8] = [
        (22.5, CardinalDirection::North),
        (67.5, CardinalDirection::Northeast),
        (112.5, CardinalDirection::East),
        (157.5, CardinalDirection::Southeast),
        (202.5, CardinalDirection::South),
        (247.5, CardinalDirection::Southwest),
        (292.5, CardinalDirection::West),
        (337.5, CardinalDirection::Northwest),
    ];

    /// Map a bearing in `[0, 360)` degrees onto its 45° sector.
    pub fn from_bearing(bearing_degs: f64) -> Self {
        Self::SECTORS
            .iter()
            .find(|(upper, _)| bearing_degs < *upper)
            .map(|&(_, dir)| dir)
            .unwrap_or(CardinalDirection::North)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            CardinalDirection::North     => "north",
            CardinalDirection::Northeast => "northeast",
            CardinalDirection::East      => "east",
            CardinalDirection::Southeast => "southeast",
            CardinalDirection::South     => "south",
            CardinalDirection::Southwest => "southwest",
            CardinalDirection::West      => "west",
            CardinalDirection::Northwest => "northwest",
        }
    }
}

impl fmt::Display for CardinalDirection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
