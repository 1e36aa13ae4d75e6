pub mod coordinate;
pub mod lookback_window;
pub mod observation;
pub mod parameter;
pub mod station;
