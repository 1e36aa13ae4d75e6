//! Assigns observations to their nearest station.

use crate::stations::error::ResolveError;
use crate::stations::locate_station::NearestStation;
use crate::types::observation::Observation;
use std::collections::HashMap;

/// Raw observation dates grouped by station id.
///
/// Stations iterate in the order they were first assigned an observation, and
/// each station's dates in the order they were added. Repeated dates are kept.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct StationDates {
    entries: Vec<(i64, Vec<String>)>,
    positions: HashMap<i64, usize>,
}

impl StationDates {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, station_id: i64, date: impl Into<String>) {
        match self.positions.get(&station_id) {
            Some(&position) => self.entries[position].1.push(date.into()),
            None => {
                self.positions.insert(station_id, self.entries.len());
                self.entries.push((station_id, vec![date.into()]));
            }
        }
    }

    pub fn get(&self, station_id: i64) -> Option<&[String]> {
        self.positions
            .get(&station_id)
            .map(|&position| self.entries[position].1.as_slice())
    }

    pub fn iter(&self) -> impl Iterator<Item = (i64, &[String])> {
        self.entries
            .iter()
            .map(|(station_id, dates)| (*station_id, dates.as_slice()))
    }

    pub fn station_ids(&self) -> impl Iterator<Item = i64> + '_ {
        self.entries.iter().map(|(station_id, _)| *station_id)
    }

    /// Number of stations.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Number of dates across all stations.
    pub fn date_count(&self) -> usize {
        self.entries.iter().map(|(_, dates)| dates.len()).sum()
    }
}

impl<S: Into<String>> FromIterator<(i64, S)> for StationDates {
    fn from_iter<I: IntoIterator<Item = (i64, S)>>(iter: I) -> Self {
        let mut station_dates = StationDates::new();
        for (station_id, date) in iter {
            station_dates.push(station_id, date);
        }
        station_dates
    }
}

/// Resolves the nearest station for every observation, in order, and
/// collects each observation's raw event date under that station.
///
/// # Errors
///
/// Propagates the first [`ResolveError`] from `resolver`.
pub fn join_observations_to_stations<R>(
    resolver: &R,
    observations: &[Observation],
) -> Result<StationDates, ResolveError>
where
    R: NearestStation + ?Sized,
{
    let mut station_dates = StationDates::new();
    for observation in observations {
        let station = resolver.nearest(observation.location())?;
        station_dates.push(station.id, observation.event_date.as_str());
    }
    Ok(station_dates)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::stations::catalog::StationCatalog;
    use crate::types::coordinate::LatLon;
    use crate::types::station::Station;

    fn station(id: i64, latitude: f64, longitude: f64) -> Station {
        Station {
            id,
            key: id.to_string(),
            active: true,
            latitude,
            longitude,
            name: None,
            height: None,
        }
    }

    fn catalog() -> StationCatalog {
        StationCatalog::new(vec![
            station(1, 59.33, 18.06), // Stockholm
            station(2, 55.60, 13.00), // Malmö
            station(3, 63.83, 20.26), // Umeå
        ])
        .unwrap()
    }

    #[test]
    fn test_groups_dates_by_nearest_station() {
        let observations = vec![
            Observation::new("2023-08-10T12:00:00", LatLon(55.7, 13.2)),
            Observation::new("2023-08-11", LatLon(59.30, 18.10)),
            Observation::new("2023-08-12/2023-08-13", LatLon(55.5, 12.9)),
            Observation::new("2023-08-12/2023-08-13", LatLon(55.5, 12.9)),
            Observation::new("2023-09-01", LatLon(63.9, 20.1)),
        ];
        let station_dates = join_observations_to_stations(&catalog(), &observations).unwrap();

        assert_eq!(station_dates.station_ids().collect::<Vec<_>>(), [2, 1, 3]);
        assert_eq!(
            station_dates.get(2).unwrap(),
            [
                "2023-08-10T12:00:00",
                "2023-08-12/2023-08-13",
                "2023-08-12/2023-08-13"
            ]
        );
        assert_eq!(station_dates.get(1).unwrap(), ["2023-08-11"]);
        assert_eq!(station_dates.date_count(), observations.len());
    }

    #[test]
    fn test_each_observation_uses_its_own_coordinate() {
        // Reordering observations must reorder the assignments with them.
        let north = Observation::new("2023-01-01", LatLon(63.8, 20.3));
        let south = Observation::new("2023-01-02", LatLon(55.6, 13.0));
        let forward =
            join_observations_to_stations(&catalog(), &[north.clone(), south.clone()]).unwrap();
        let backward = join_observations_to_stations(&catalog(), &[south, north]).unwrap();

        assert_eq!(forward.get(3).unwrap(), ["2023-01-01"]);
        assert_eq!(backward.get(3).unwrap(), ["2023-01-01"]);
        assert_eq!(forward.get(2).unwrap(), ["2023-01-02"]);
        assert_eq!(backward.get(2).unwrap(), ["2023-01-02"]);
    }

    #[test]
    fn test_no_observations_gives_empty_map() {
        let station_dates = join_observations_to_stations(&catalog(), &[]).unwrap();
        assert!(station_dates.is_empty());
    }

    #[test]
    fn test_empty_resolver_fails() {
        let empty: Vec<Station> = Vec::new();
        let observations = [Observation::new("2023-08-10", LatLon(59.0, 18.0))];
        assert!(matches!(
            join_observations_to_stations(empty.as_slice(), &observations),
            Err(ResolveError::EmptyCatalog)
        ));
    }
}
