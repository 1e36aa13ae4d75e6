//! Ellipsoidal distances between coordinates.

use crate::types::coordinate::{CoordinateError, IntoLatLon, LatLon};
use geo::{Distance, Geodesic, Point};

/// Distance in kilometers between two coordinates on the WGS84 ellipsoid,
/// using Karney's geodesic algorithm.
///
/// # Examples
///
/// ```
/// use sighting_weather::{geodistance_km, LatLon};
///
/// let stockholm = LatLon(59.33, 18.06);
/// let malmo = LatLon(55.60, 13.00);
/// let km = geodistance_km(stockholm, malmo);
/// assert!(km > 500.0 && km < 530.0);
/// ```
pub fn geodistance_km(a: LatLon, b: LatLon) -> f64 {
    // geo points are (x = longitude, y = latitude)
    let a = Point::new(a.longitude(), a.latitude());
    let b = Point::new(b.longitude(), b.latitude());
    Geodesic::distance(a, b) / 1000.0
}

/// Like [`geodistance_km`], but accepts anything coercible to a coordinate,
/// including numeric strings.
///
/// # Errors
///
/// Returns [`CoordinateError::InvalidNumber`] if either coordinate cannot be
/// read as a float.
pub fn geodistance(a: impl IntoLatLon, b: impl IntoLatLon) -> Result<f64, CoordinateError> {
    Ok(geodistance_km(a.into_lat_lon()?, b.into_lat_lon()?))
}
