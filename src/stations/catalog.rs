//! Builds the station catalog: the SMHI stations that report every
//! [`MeasurementParameter::REQUIRED`] parameter.

use crate::stations::error::CatalogError;
use crate::types::parameter::MeasurementParameter;
use crate::types::station::{Station, StationListResponse};
use log::{debug, info, warn};
use reqwest::Client;
use std::collections::HashSet;

pub const METOBS_URL: &str = "https://opendata-download-metobs.smhi.se/api/version/latest/";

/// The stations usable for matching. Never empty.
#[derive(Debug, Clone, PartialEq)]
pub struct StationCatalog {
    stations: Vec<Station>,
}

impl StationCatalog {
    /// # Errors
    ///
    /// Returns [`CatalogError::EmptyCatalog`] if `stations` is empty.
    pub fn new(stations: Vec<Station>) -> Result<Self, CatalogError> {
        if stations.is_empty() {
            return Err(CatalogError::EmptyCatalog);
        }
        Ok(Self { stations })
    }

    pub fn stations(&self) -> &[Station] {
        &self.stations
    }

    pub fn get(&self, station_id: i64) -> Option<&Station> {
        self.stations.iter().find(|s| s.id == station_id)
    }
}

/// Intersects per-parameter station lists on `key`.
///
/// Starts from the full first list and keeps only rows whose key appears in
/// each following list. The surviving rows keep the first list's order.
///
/// # Errors
///
/// [`CatalogError::NoParameterLists`] if `lists` is empty,
/// [`CatalogError::EmptyCatalog`] if no station survives.
pub fn intersect_station_lists(
    lists: impl IntoIterator<Item = Vec<Station>>,
) -> Result<StationCatalog, CatalogError> {
    let mut lists = lists.into_iter();
    let mut surviving = lists.next().ok_or(CatalogError::NoParameterLists)?;
    for list in lists {
        let keys: HashSet<&str> = list.iter().map(|s| s.key.as_str()).collect();
        surviving.retain(|s| keys.contains(s.key.as_str()));
    }
    StationCatalog::new(surviving)
}

/// Fetches station metadata from the SMHI `metobs` API.
pub struct StationCatalogBuilder {
    client: Client,
    base_url: String,
}

impl StationCatalogBuilder {
    pub fn new(client: Client) -> Self {
        Self::with_base_url(client, METOBS_URL)
    }

    /// Points the builder at another `metobs` root, e.g. a mirror.
    pub fn with_base_url(client: Client, base_url: &str) -> Self {
        Self {
            client,
            base_url: format!("{}/", base_url.trim_end_matches('/')),
        }
    }

    /// Fetches the stations reporting `parameter`.
    pub async fn fetch_parameter(
        &self,
        parameter: MeasurementParameter,
    ) -> Result<Vec<Station>, CatalogError> {
        let url = format!("{}{}", self.base_url, parameter.metadata_path());
        debug!("Fetching stations for {} from {}", parameter, url);

        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|e| CatalogError::NetworkRequest(url.clone(), e))?;

        let response = match response.error_for_status() {
            Ok(resp) => resp,
            Err(e) => {
                warn!("HTTP error for {}: {:?}", url, e);
                return Err(if let Some(status) = e.status() {
                    CatalogError::HttpStatus {
                        url,
                        status,
                        source: e,
                    }
                } else {
                    CatalogError::NetworkRequest(url, e)
                });
            }
        };

        let body = response
            .text()
            .await
            .map_err(|e| CatalogError::NetworkRequest(url.clone(), e))?;
        let parsed: StationListResponse = serde_json::from_str(&body)
            .map_err(|source| CatalogError::JsonParse { url, source })?;

        info!("{} stations report {}", parsed.station.len(), parameter);
        Ok(parsed.station)
    }

    /// Fetches every required parameter in order and intersects the lists.
    /// The first failure aborts the build.
    pub async fn build(&self) -> Result<StationCatalog, CatalogError> {
        let mut lists = Vec::with_capacity(MeasurementParameter::REQUIRED.len());
        for parameter in MeasurementParameter::REQUIRED {
            lists.push(self.fetch_parameter(parameter).await?);
        }
        let catalog = intersect_station_lists(lists)?;
        info!(
            "{} stations report all {} required parameters",
            catalog.stations().len(),
            MeasurementParameter::REQUIRED.len()
        );
        Ok(catalog)
    }
}
