mod correlator;
mod error;
mod geodesy;
mod joining;
mod observations;
mod stations;
#[cfg(test)]
mod test_server;
mod types;
mod windows;

pub use correlator::*;
pub use error::SightingWeatherError;
pub use geodesy::{geodistance, geodistance_km};
pub use joining::{join_observations_to_stations, StationDates};
pub use windows::{build_lookback_windows, parse_event_date, windows_to_frame, WindowError};

pub use observations::client::*;
pub use observations::error::ObservationError;

pub use stations::catalog::*;
pub use stations::error::{CatalogError, ResolveError};
pub use stations::locate_station::*;

pub use types::coordinate::{CoordinateError, IntoLatLon, LatLon};
pub use types::lookback_window::{LookbackWindow, WindowDateFormat};
pub use types::observation::Observation;
pub use types::parameter::MeasurementParameter;
pub use types::station::Station;
