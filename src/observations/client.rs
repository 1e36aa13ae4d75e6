//! Client for the Species Observation System (SOS) Darwin Core search.

use crate::observations::error::ObservationError;
use crate::types::observation::Observation;
use log::{info, warn};
use reqwest::header::{HeaderMap, HeaderValue, AUTHORIZATION, CACHE_CONTROL};
use reqwest::Client;
use std::fmt;

pub const SOS_SEARCH_URL: &str =
    "https://api.artdatabanken.se/species-observation-system/v1/Observations/Search/DwC";
pub const SOS_API_VERSION: &str = "1.5";
/// Observations requested per search. Only the first page is fetched.
pub const PAGE_SIZE: u32 = 1000;

/// The two secrets the SOS API requires on every request.
#[derive(Clone)]
pub struct SosCredentials {
    pub subscription_key: String,
    /// Bearer token, with or without the `Bearer ` prefix.
    pub authorization: String,
}

impl SosCredentials {
    pub fn new(subscription_key: impl Into<String>, authorization: impl Into<String>) -> Self {
        Self {
            subscription_key: subscription_key.into(),
            authorization: authorization.into(),
        }
    }

    fn bearer(&self) -> String {
        if self.authorization.starts_with("Bearer ") {
            self.authorization.clone()
        } else {
            format!("Bearer {}", self.authorization)
        }
    }

    fn headers(&self) -> Result<HeaderMap, ObservationError> {
        let mut headers = HeaderMap::new();
        headers.insert("X-Api-Version", HeaderValue::from_static(SOS_API_VERSION));
        headers.insert(CACHE_CONTROL, HeaderValue::from_static("no-cache"));
        let mut key = HeaderValue::from_str(&self.subscription_key)
            .map_err(|e| ObservationError::InvalidHeader("subscription key", e))?;
        key.set_sensitive(true);
        headers.insert("Ocp-Apim-Subscription-Key", key);
        let mut bearer = HeaderValue::from_str(&self.bearer())
            .map_err(|e| ObservationError::InvalidHeader("authorization", e))?;
        bearer.set_sensitive(true);
        headers.insert(AUTHORIZATION, bearer);
        Ok(headers)
    }
}

impl fmt::Debug for SosCredentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SosCredentials")
            .field("subscription_key", &"<redacted>")
            .field("authorization", &"<redacted>")
            .finish()
    }
}

/// Which organism to search for.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ObservationQuery {
    pub scientific_name: String,
    pub kingdom: String,
}

impl ObservationQuery {
    pub fn new(scientific_name: impl Into<String>, kingdom: impl Into<String>) -> Self {
        Self {
            scientific_name: scientific_name.into(),
            kingdom: kingdom.into(),
        }
    }

    fn params(&self) -> [(&'static str, String); 7] {
        [
            ("kingdom", self.kingdom.clone()),
            ("scientificName", self.scientific_name.clone()),
            ("translationCultureCode", "en-GB".to_string()),
            ("sensitiveObservations", "false".to_string()),
            ("skip", "0".to_string()),
            ("take", PAGE_SIZE.to_string()),
            ("sortOrder", "Asc".to_string()),
        ]
    }
}

pub struct ObservationClient {
    client: Client,
    search_url: String,
    credentials: SosCredentials,
}

impl ObservationClient {
    pub fn new(client: Client, credentials: SosCredentials) -> Self {
        Self::with_search_url(client, credentials, SOS_SEARCH_URL)
    }

    pub fn with_search_url(client: Client, credentials: SosCredentials, search_url: &str) -> Self {
        Self {
            client,
            search_url: search_url.to_string(),
            credentials,
        }
    }

    /// Fetches up to [`PAGE_SIZE`] observations, oldest first.
    pub async fn search(
        &self,
        query: &ObservationQuery,
    ) -> Result<Vec<Observation>, ObservationError> {
        let url = self.search_url.clone();
        info!(
            "Searching observations of {} ({}) at {}",
            query.scientific_name, query.kingdom, url
        );

        let response = self
            .client
            .get(&url)
            .headers(self.credentials.headers()?)
            .query(&query.params())
            .send()
            .await
            .map_err(|e| ObservationError::NetworkRequest(url.clone(), e))?;

        let response = match response.error_for_status() {
            Ok(resp) => resp,
            Err(e) => {
                warn!("HTTP error for {}: {:?}", url, e);
                return Err(if let Some(status) = e.status() {
                    ObservationError::HttpStatus {
                        url,
                        status,
                        source: e,
                    }
                } else {
                    ObservationError::NetworkRequest(url, e)
                });
            }
        };

        let body = response
            .text()
            .await
            .map_err(|e| ObservationError::NetworkRequest(url.clone(), e))?;
        let observations: Vec<Observation> = serde_json::from_str(&body)
            .map_err(|source| ObservationError::JsonParse { url, source })?;

        info!(
            "Received {} observations of {}",
            observations.len(),
            query.scientific_name
        );
        Ok(observations)
    }
}
