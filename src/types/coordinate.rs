//! Geographic coordinates and the conversions that turn loosely typed input
//! (floats, numeric strings) into them.

use std::num::ParseFloatError;
use thiserror::Error;

/// Represents a geographical coordinate using latitude and longitude.
///
/// Latitude is the first element (index 0), and longitude is the second (index 1).
/// Both values are decimal degrees.
///
/// # Examples
///
/// ```
/// use sighting_weather::LatLon;
///
/// let stockholm = LatLon(59.33, 18.06);
/// assert_eq!(stockholm.latitude(), 59.33);
/// assert_eq!(stockholm.longitude(), 18.06);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LatLon(pub f64, pub f64);

impl LatLon {
    pub fn latitude(self) -> f64 {
        self.0
    }
    pub fn longitude(self) -> f64 {
        self.1
    }
}

#[derive(Debug, Error)]
pub enum CoordinateError {
    #[error("Coordinate component '{value}' is not a number")]
    InvalidNumber {
        value: String,
        #[source]
        source: ParseFloatError,
    },
}

pub(crate) fn parse_degrees(value: &str) -> Result<f64, CoordinateError> {
    value
        .trim()
        .parse::<f64>()
        .map_err(|source| CoordinateError::InvalidNumber {
            value: value.to_string(),
            source,
        })
}

/// Anything that can be read as a `(latitude, longitude)` pair.
///
/// Registry payloads sometimes carry coordinates as strings, so string pairs
/// are accepted as long as both halves parse as floats.
pub trait IntoLatLon {
    fn into_lat_lon(self) -> Result<LatLon, CoordinateError>;
}

impl IntoLatLon for LatLon {
    fn into_lat_lon(self) -> Result<LatLon, CoordinateError> {
        Ok(self)
    }
}

impl IntoLatLon for (f64, f64) {
    fn into_lat_lon(self) -> Result<LatLon, CoordinateError> {
        Ok(LatLon(self.0, self.1))
    }
}

impl IntoLatLon for (&str, &str) {
    fn into_lat_lon(self) -> Result<LatLon, CoordinateError> {
        Ok(LatLon(parse_degrees(self.0)?, parse_degrees(self.1)?))
    }
}

impl IntoLatLon for (String, String) {
    fn into_lat_lon(self) -> Result<LatLon, CoordinateError> {
        (self.0.as_str(), self.1.as_str()).into_lat_lon()
    }
}
