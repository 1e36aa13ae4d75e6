use crate::geodesy::geodistance_km;
use crate::stations::catalog::StationCatalog;
use crate::stations::error::ResolveError;
use crate::types::coordinate::{IntoLatLon, LatLon};
use crate::types::station::Station;
use ordered_float::OrderedFloat;
use rstar::primitives::GeomWithData;
use rstar::RTree;

/// Something that can pick the station closest to a coordinate.
pub trait NearestStation {
    fn nearest(&self, target: LatLon) -> Result<&Station, ResolveError>;
}

/// Returns the id of the station closest to `coordinate`.
///
/// Every station is measured, so the result is exact. When several stations
/// are equally close the one listed first wins.
///
/// # Errors
///
/// [`ResolveError::EmptyCatalog`] if `catalog` is empty,
/// [`ResolveError::Coordinate`] if `coordinate` is not numeric.
///
/// # Examples
///
/// ```
/// use sighting_weather::{resolve_nearest_station, Station};
///
/// let station = |id, latitude, longitude| Station {
///     id,
///     key: id.to_string(),
///     active: true,
///     latitude,
///     longitude,
///     name: None,
///     height: None,
/// };
/// let catalog = [station(1, 59.33, 18.06), station(2, 55.60, 13.00)];
/// assert_eq!(resolve_nearest_station(&catalog, (59.30, 18.10)).unwrap(), 1);
/// assert_eq!(resolve_nearest_station(&catalog, ("55.7", "13.2")).unwrap(), 2);
/// ```
pub fn resolve_nearest_station(
    catalog: &[Station],
    coordinate: impl IntoLatLon,
) -> Result<i64, ResolveError> {
    let target = coordinate.into_lat_lon()?;
    catalog.nearest(target).map(|station| station.id)
}

// min_by_key keeps the first of equal minima, which gives catalog-order tie-breaking.
fn scan_nearest<'a>(
    stations: impl IntoIterator<Item = &'a Station>,
    target: LatLon,
) -> Option<&'a Station> {
    stations
        .into_iter()
        .min_by_key(|station| OrderedFloat(geodistance_km(station.location(), target)))
}

impl NearestStation for [Station] {
    fn nearest(&self, target: LatLon) -> Result<&Station, ResolveError> {
        scan_nearest(self, target).ok_or(ResolveError::EmptyCatalog)
    }
}

impl NearestStation for StationCatalog {
    fn nearest(&self, target: LatLon) -> Result<&Station, ResolveError> {
        self.stations().nearest(target)
    }
}

/// Smallest radius of curvature on the WGS84 ellipsoid, `a(1 - e²)`, in km,
/// rounded down. A surface path whose normal turns through `θ` radians is at
/// least `θ` times this long.
const MIN_CURVATURE_RADIUS_KM: f64 = 6335.0;

/// Surface normal of `location` as a point on the unit sphere.
fn unit_normal(location: LatLon) -> [f64; 3] {
    let latitude = location.latitude().to_radians();
    let longitude = location.longitude().to_radians();
    [
        latitude.cos() * longitude.cos(),
        latitude.cos() * longitude.sin(),
        latitude.sin(),
    ]
}

/// No geodesic between two points whose normals are `chord_2` apart
/// (squared chord length) is shorter than this.
fn geodesic_lower_bound_km(chord_2: f64) -> f64 {
    let half_chord = (chord_2.sqrt() / 2.0).min(1.0);
    2.0 * half_chord.asin() * MIN_CURVATURE_RADIUS_KM
}

/// R-tree backed locator for catalogs too large for a linear scan.
///
/// Stations are indexed by their surface normals, so tree order follows
/// angular distance at every latitude. Candidates are measured geodesically
/// until the next one's angular distance alone rules it out, so the result is
/// the same as [`resolve_nearest_station`], ties included.
#[derive(Debug, Clone)]
pub struct StationLocator {
    stations: Vec<Station>,
    rtree: RTree<GeomWithData<[f64; 3], usize>>,
}

impl StationLocator {
    pub fn new(catalog: &StationCatalog) -> Self {
        let stations = catalog.stations().to_vec();
        let points = stations
            .iter()
            .enumerate()
            .map(|(index, station)| GeomWithData::new(unit_normal(station.location()), index))
            .collect();
        Self {
            stations,
            rtree: RTree::bulk_load(points),
        }
    }
}

impl NearestStation for StationLocator {
    fn nearest(&self, target: LatLon) -> Result<&Station, ResolveError> {
        let mut best: Option<(f64, usize)> = None;
        for (point, chord_2) in self
            .rtree
            .nearest_neighbor_iter_with_distance_2(&unit_normal(target))
        {
            if let Some((best_km, _)) = best {
                if geodesic_lower_bound_km(chord_2) > best_km {
                    break;
                }
            }
            let index = point.data;
            let km = geodistance_km(self.stations[index].location(), target);
            let closer = match best {
                None => true,
                Some((best_km, best_index)) => {
                    km < best_km || (km == best_km && index < best_index)
                }
            };
            if closer {
                best = Some((km, index));
            }
        }
        best.map(|(_, index)| &self.stations[index])
            .ok_or(ResolveError::EmptyCatalog)
    }
}
