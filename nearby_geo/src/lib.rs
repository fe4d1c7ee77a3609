use arcstr::ArcStr;
use serde::{Deserialize, Serialize};

pub use crate::distance::distance;
pub use crate::error::{GeoError, Result};
pub use crate::records::{parse_line, Record, Records};
pub use crate::search::{nearby, nearby_locations, Collector, Limits};

mod distance;
mod error;
mod records;
mod search;

/// A point on the earth's surface, in degrees.
/// Ranges are not validated.
#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct GeoPoint {
    pub latitude: f64,
    pub longitude: f64,
}

impl GeoPoint {
    pub const fn new(latitude: f64, longitude: f64) -> Self {
        Self { latitude, longitude }
    }

    /// Distance to another point in meters.
    pub fn distance_to(&self, other: GeoPoint) -> f64 {
        distance(*self, other)
    }
}

/// The name of a location found by a search and its distance to the query point.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NamedDistance {
    pub name: ArcStr,
    pub distance_meters: f64,
}
