//! A species observation as returned by the SOS Darwin Core search endpoint.

use crate::types::coordinate::{parse_degrees, LatLon};
use serde::{Deserialize, Deserializer, Serialize};

/// One geotagged sighting.
///
/// The coordinate is part of the record so that whoever iterates observations
/// always resolves the position of the row in hand.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Observation {
    /// Raw event date, e.g. `2023-08-10T12:00:00` or `2023-08-10/2023-08-11`.
    pub event_date: String,
    #[serde(rename = "decimalLatitude", deserialize_with = "deserialize_degrees")]
    pub latitude: f64,
    #[serde(rename = "decimalLongitude", deserialize_with = "deserialize_degrees")]
    pub longitude: f64,
    #[serde(default)]
    pub scientific_name: Option<String>,
    #[serde(default)]
    pub vernacular_name: Option<String>,
    #[serde(default)]
    pub county: Option<String>,
    #[serde(default)]
    pub municipality: Option<String>,
    #[serde(default)]
    pub locality: Option<String>,
}

impl Observation {
    pub fn new(event_date: impl Into<String>, location: LatLon) -> Self {
        Self {
            event_date: event_date.into(),
            latitude: location.0,
            longitude: location.1,
            scientific_name: None,
            vernacular_name: None,
            county: None,
            municipality: None,
            locality: None,
        }
    }

    pub fn location(&self) -> LatLon {
        LatLon(self.latitude, self.longitude)
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum Degrees {
    Number(f64),
    Text(String),
}

fn deserialize_degrees<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    match Degrees::deserialize(deserializer)? {
        Degrees::Number(value) => Ok(value),
        Degrees::Text(text) => parse_degrees(&text).map_err(serde::de::Error::custom),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decode_dwc_records() {
        let json = r#"[
            {"eventDate": "2023-08-10T12:00:00", "county": "Stockholm", "municipality": "Solna",
             "locality": "Hagaparken", "decimalLatitude": 59.3573, "decimalLongitude": 18.0384,
             "scientificName": "Cantharellus cibarius", "vernacularName": "kantarell",
             "occurrenceId": "urn:lsid:artportalen.se:sighting:1"},
            {"eventDate": "2023-09-01/2023-09-02", "decimalLatitude": "55.60",
             "decimalLongitude": "13.00"}
        ]"#;
        let observations: Vec<Observation> = serde_json::from_str(json).unwrap();
        assert_eq!(observations.len(), 2);
        assert_eq!(observations[0].location(), LatLon(59.3573, 18.0384));
        assert_eq!(observations[0].vernacular_name.as_deref(), Some("kantarell"));
        assert_eq!(observations[1].location(), LatLon(55.60, 13.00));
        assert_eq!(observations[1].county, None);
    }

    #[test]
    fn test_non_numeric_coordinate_is_rejected() {
        let json = r#"[{"eventDate": "2023-08-10", "decimalLatitude": "north",
                        "decimalLongitude": 18.0}]"#;
        assert!(serde_json::from_str::<Vec<Observation>>(json).is_err());
    }
}
