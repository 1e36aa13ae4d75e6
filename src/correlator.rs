//! The main entry point: fetch observations and stations, then match them up.

use crate::error::SightingWeatherError;
use crate::joining::{join_observations_to_stations, StationDates};
use crate::observations::client::{ObservationClient, ObservationQuery, SosCredentials};
use crate::stations::catalog::{StationCatalog, StationCatalogBuilder};
use crate::types::lookback_window::{LookbackWindow, WindowDateFormat};
use crate::types::observation::Observation;
use crate::windows::{build_lookback_windows, windows_to_frame};
use bon::bon;
use log::info;
use polars::prelude::DataFrame;
use reqwest::Client;

pub const DEFAULT_KINGDOM: &str = "fungi";
pub const DEFAULT_DAYS_BACK: u32 = 14;

/// Everything one run produced, from the raw inputs to the windows.
#[derive(Debug, Clone)]
pub struct Correlation {
    pub observations: Vec<Observation>,
    pub catalog: StationCatalog,
    pub station_dates: StationDates,
    pub windows: Vec<LookbackWindow>,
}

impl Correlation {
    /// Matches already-fetched observations against `catalog`.
    ///
    /// This is the network-free half of [`SightingWeather::correlate`].
    pub fn from_records(
        observations: Vec<Observation>,
        catalog: StationCatalog,
        days_back: u32,
    ) -> Result<Self, SightingWeatherError> {
        let station_dates = join_observations_to_stations(&catalog, &observations)?;
        let windows = build_lookback_windows(&station_dates, days_back)?;
        info!(
            "Assigned {} observations to {} stations, {} windows",
            observations.len(),
            station_dates.len(),
            windows.len()
        );
        Ok(Self {
            observations,
            catalog,
            station_dates,
            windows,
        })
    }

    pub fn to_frame(&self, format: WindowDateFormat) -> Result<DataFrame, SightingWeatherError> {
        Ok(windows_to_frame(&self.windows, format)?)
    }
}

/// Client tying the observation registry to the station network.
///
/// # Examples
///
/// ```no_run
/// # use sighting_weather::{SightingWeather, SightingWeatherError, SosCredentials};
/// # #[tokio::main]
/// # async fn main() -> Result<(), SightingWeatherError> {
/// let client = SightingWeather::new(SosCredentials::new("key", "token"))?;
/// let correlation = client
///     .correlate()
///     .species("Cantharellus cibarius")
///     .days_back(14)
///     .call()
///     .await?;
/// for window in &correlation.windows {
///     println!("{}", window);
/// }
/// # Ok(())
/// # }
/// ```
pub struct SightingWeather {
    observations: ObservationClient,
    stations: StationCatalogBuilder,
}

#[bon]
impl SightingWeather {
    /// Creates a client against the public SOS and SMHI endpoints.
    pub fn new(credentials: SosCredentials) -> Result<Self, SightingWeatherError> {
        let client = Client::builder()
            .build()
            .map_err(SightingWeatherError::HttpClient)?;
        Ok(Self::from_parts(
            ObservationClient::new(client.clone(), credentials),
            StationCatalogBuilder::new(client),
        ))
    }

    pub fn from_parts(observations: ObservationClient, stations: StationCatalogBuilder) -> Self {
        Self {
            observations,
            stations,
        }
    }

    /// Fetches observations of `species`, builds the station catalog, and
    /// returns the lookback windows for every observation.
    ///
    /// # Arguments
    ///
    /// * `.species(&str)`: **Required.** Scientific name to search for.
    /// * `.kingdom(&str)`: Optional. Defaults to [`DEFAULT_KINGDOM`].
    /// * `.days_back(u32)`: Optional. Defaults to [`DEFAULT_DAYS_BACK`].
    ///
    /// # Errors
    ///
    /// Any fetch failure, [`SightingWeatherError::NoObservations`] when the
    /// search comes back empty, and date parse failures from the windows.
    #[builder]
    pub async fn correlate(
        &self,
        species: &str,
        kingdom: Option<&str>,
        days_back: Option<u32>,
    ) -> Result<Correlation, SightingWeatherError> {
        let kingdom = kingdom.unwrap_or(DEFAULT_KINGDOM);
        let days_back = days_back.unwrap_or(DEFAULT_DAYS_BACK);

        let observations = self
            .observations
            .search(&ObservationQuery::new(species, kingdom))
            .await?;
        if observations.is_empty() {
            return Err(SightingWeatherError::NoObservations {
                species: species.to_string(),
            });
        }

        let catalog = self.stations.build().await?;
        Correlation::from_records(observations, catalog, days_back)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::stations::catalog::intersect_station_lists;
    use crate::test_server::{self, Route};
    use crate::types::coordinate::LatLon;
    use crate::types::station::Station;
    use chrono::NaiveDate;

    const SEARCH_PATH: &str = "/sos/Observations/Search/DwC";

    fn station_list() -> String {
        r#"{"station": [
            {"id": 1, "key": "1", "active": true, "latitude": 59.33, "longitude": 18.06},
            {"id": 2, "key": "2", "active": true, "latitude": 55.60, "longitude": 13.00}
        ]}"#
        .to_string()
    }

    fn client(base_url: &str) -> SightingWeather {
        let http = test_server::http_client();
        SightingWeather::from_parts(
            ObservationClient::with_search_url(
                http.clone(),
                SosCredentials::new("key", "token"),
                &format!("{}{}", base_url, SEARCH_PATH),
            ),
            StationCatalogBuilder::with_base_url(http, base_url),
        )
    }

    fn parameter_routes() -> Vec<Route> {
        ["/parameter/1.json", "/parameter/18.json", "/parameter/38.json", "/parameter/7.json", "/parameter/6.json"]
            .into_iter()
            .map(|path| Route::ok(path, station_list()))
            .collect()
    }

    #[test]
    fn test_from_records() -> Result<(), SightingWeatherError> {
        let catalog = intersect_station_lists(vec![vec![
            Station {
                id: 1,
                key: "1".into(),
                active: true,
                latitude: 59.33,
                longitude: 18.06,
                name: None,
                height: None,
            },
            Station {
                id: 2,
                key: "2".into(),
                active: true,
                latitude: 55.60,
                longitude: 13.00,
                name: None,
                height: None,
            },
        ]])?;
        let observations = vec![
            Observation::new("2023-08-10T12:00:00", LatLon(59.30, 18.10)),
            Observation::new("2023-08-11", LatLon(55.65, 13.10)),
        ];
        let correlation = Correlation::from_records(observations, catalog, 14)?;

        assert_eq!(correlation.windows.len(), 2);
        assert_eq!(correlation.windows[0].station_id, 1);
        assert_eq!(
            correlation.windows[0].start,
            NaiveDate::from_ymd_opt(2023, 7, 27).unwrap()
        );
        assert_eq!(correlation.windows[1].station_id, 2);

        let frame = correlation.to_frame(WindowDateFormat::Iso)?;
        assert_eq!(frame.height(), 2);
        Ok(())
    }

    #[tokio::test]
    async fn test_correlate_end_to_end() -> Result<(), SightingWeatherError> {
        let mut routes = parameter_routes();
        routes.push(Route::ok(
            SEARCH_PATH,
            r#"[{"eventDate": "2023-08-10T12:00:00", "decimalLatitude": 59.30, "decimalLongitude": 18.10}]"#,
        ));
        let (base_url, _) = test_server::spawn(routes).await;

        let correlation = client(&base_url)
            .correlate()
            .species("Cantharellus cibarius")
            .call()
            .await?;

        assert_eq!(correlation.catalog.stations().len(), 2);
        assert_eq!(correlation.station_dates.get(1).unwrap(), ["2023-08-10T12:00:00"]);
        assert_eq!(
            correlation.windows[0].start_label(WindowDateFormat::Legacy),
            "2023-07_27"
        );
        Ok(())
    }

    #[tokio::test]
    async fn test_correlate_without_observations() {
        let mut routes = parameter_routes();
        routes.push(Route::ok(SEARCH_PATH, "[]"));
        let (base_url, _) = test_server::spawn(routes).await;

        let result = client(&base_url)
            .correlate()
            .species("Boletus edulis")
            .kingdom("fungi")
            .days_back(7)
            .call()
            .await;
        assert!(matches!(
            result,
            Err(SightingWeatherError::NoObservations { ref species }) if species == "Boletus edulis"
        ));
    }
}
