//! Defines the SMHI weather station record as it appears in the `metobs`
//! parameter metadata.

use crate::types::coordinate::LatLon;
use serde::{Deserialize, Serialize};

/// A single weather-observing station.
///
/// Only `id`, `key`, `active` and the position take part in matching; `name`
/// and `height` are carried along for display.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct Station {
    /// Stable numeric station identifier (e.g. `98210` for Stockholm).
    pub id: i64,
    /// Secondary identifier, used to intersect per-parameter station lists.
    pub key: String,
    /// Whether the station is still reporting.
    pub active: bool,
    /// Latitude in decimal degrees.
    pub latitude: f64,
    /// Longitude in decimal degrees.
    pub longitude: f64,
    #[serde(default)]
    pub name: Option<String>,
    /// Elevation above sea level in meters.
    #[serde(default)]
    pub height: Option<f64>,
}

impl Station {
    pub fn location(&self) -> LatLon {
        LatLon(self.latitude, self.longitude)
    }
}

/// Body of `parameter/{id}.json`. Everything except the station list is ignored.
#[derive(Debug, Deserialize)]
pub(crate) struct StationListResponse {
    #[serde(default)]
    pub station: Vec<Station>,
}
