use chrono::NaiveDate;
use std::fmt;

/// How window dates are rendered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum WindowDateFormat {
    /// `YYYY-MM_DD`, the layout downstream consumers of the window table expect.
    #[default]
    Legacy,
    /// `YYYY-MM-DD`.
    Iso,
}

impl WindowDateFormat {
    pub fn pattern(&self) -> &'static str {
        match self {
            WindowDateFormat::Legacy => "%Y-%m_%d",
            WindowDateFormat::Iso => "%Y-%m-%d",
        }
    }
}

/// The period before an observation for which weather should be retrieved
/// from `station_id`. Both ends are inclusive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct LookbackWindow {
    pub station_id: i64,
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl LookbackWindow {
    pub fn start_label(&self, format: WindowDateFormat) -> String {
        self.start.format(format.pattern()).to_string()
    }

    pub fn end_label(&self, format: WindowDateFormat) -> String {
        self.end.format(format.pattern()).to_string()
    }
}

impl fmt::Display for LookbackWindow {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {} {}",
            self.station_id,
            self.start_label(WindowDateFormat::Legacy),
            self.end_label(WindowDateFormat::Legacy)
        )
    }
}
