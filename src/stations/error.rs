use crate::types::coordinate::CoordinateError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("Network request failed for {0}")]
    NetworkRequest(String, #[source] reqwest::Error),

    #[error("HTTP request failed for {url} with status {status}")]
    HttpStatus {
        url: String,
        status: reqwest::StatusCode,
        #[source]
        source: reqwest::Error,
    },

    #[error("Failed to parse station metadata from {url}")]
    JsonParse {
        url: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("No station lists to intersect")]
    NoParameterLists,

    #[error("No station reports every required parameter")]
    EmptyCatalog,
}

#[derive(Debug, Error)]
pub enum ResolveError {
    #[error("Cannot resolve a nearest station from an empty catalog")]
    EmptyCatalog,

    #[error(transparent)]
    Coordinate(#[from] CoordinateError),
}
