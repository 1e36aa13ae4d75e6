use crate::observations::error::ObservationError;
use crate::stations::error::{CatalogError, ResolveError};
use crate::windows::WindowError;
use polars::error::PolarsError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum SightingWeatherError {
    #[error(transparent)]
    Observations(#[from] ObservationError),

    #[error(transparent)]
    Catalog(#[from] CatalogError),

    #[error(transparent)]
    Resolve(#[from] ResolveError),

    #[error(transparent)]
    Window(#[from] WindowError),

    #[error("No observations found for '{species}'")]
    NoObservations { species: String },

    #[error("Failed to build window table")]
    Frame(#[from] PolarsError),

    #[error("Failed to build HTTP client")]
    HttpClient(#[source] reqwest::Error),
}
