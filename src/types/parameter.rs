//! The SMHI measurement parameters a station must report to be usable.

use std::fmt;

/// A `metobs` measurement parameter.
///
/// The catalog only keeps stations that report every one of
/// [`MeasurementParameter::REQUIRED`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MeasurementParameter {
    /// Air temperature, instantaneous value once per hour.
    Temperature,
    /// Precipitation type, categorical.
    RainCategorical,
    /// Precipitation intensity, max of mean, four times per hour.
    RainIntensity,
    /// Precipitation amount, sum per 15 minutes.
    RainAmount,
    /// Relative humidity, once per hour.
    Humidity,
}

impl MeasurementParameter {
    /// The parameters the catalog intersects over, in fetch order.
    pub const REQUIRED: [MeasurementParameter; 5] = [
        MeasurementParameter::Temperature,
        MeasurementParameter::RainCategorical,
        MeasurementParameter::RainIntensity,
        MeasurementParameter::RainAmount,
        MeasurementParameter::Humidity,
    ];

    pub fn id(&self) -> u32 {
        match self {
            MeasurementParameter::Temperature => 1,
            MeasurementParameter::RainCategorical => 18,
            MeasurementParameter::RainIntensity => 38,
            MeasurementParameter::RainAmount => 7,
            MeasurementParameter::Humidity => 6,
        }
    }

    pub(crate) fn metadata_path(&self) -> String {
        format!("parameter/{}.json?measuringStations=core", self.id())
    }
}

impl fmt::Display for MeasurementParameter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            MeasurementParameter::Temperature => "temperature",
            MeasurementParameter::RainCategorical => "rain_categorical",
            MeasurementParameter::RainIntensity => "rain_intensity",
            MeasurementParameter::RainAmount => "rain_amount",
            MeasurementParameter::Humidity => "humidity",
        };
        write!(f, "{} ({})", name, self.id())
    }
}
