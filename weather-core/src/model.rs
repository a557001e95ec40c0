use serde::{Deserialize, Serialize};

use crate::flag::country_code_to_flag;

/// First geocoding hit for a query.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GeoPlace {
    pub latitude: f64,
    pub longitude: f64,
    #[serde(default)]
    pub timezone: Option<String>,
    pub name: String,
    #[serde(default)]
    pub country_code: String,
}

impl GeoPlace {
    pub fn resolved(&self) -> ResolvedPlace {
        ResolvedPlace {
            name: self.name.clone(),
            country_code: self.country_code.clone(),
        }
    }
}

/// Place name published to the UI as soon as geocoding succeeds.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResolvedPlace {
    pub name: String,
    pub country_code: String,
}

impl ResolvedPlace {
    /// `"<name> <flag>"`, e.g. `Berlin 🇩🇪`.
    pub fn display_label(&self) -> String {
        format!("{} {}", self.name, country_code_to_flag(&self.country_code))
    }
}

/// Daily forecast as parallel vectors: index `i` of each describes day `i`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ForecastData {
    pub name: String,
    pub dates: Vec<String>,
    pub min: Vec<f64>,
    pub max: Vec<f64>,
    pub codes: Vec<i32>,
}

impl ForecastData {
    /// Build from possibly uneven series, truncating every vector to the
    /// shortest one so the parallel-array invariant always holds.
    pub fn new(
        name: String,
        mut dates: Vec<String>,
        mut min: Vec<f64>,
        mut max: Vec<f64>,
        mut codes: Vec<i32>,
    ) -> Self {
        let days = dates.len().min(min.len()).min(max.len()).min(codes.len());
        dates.truncate(days);
        min.truncate(days);
        max.truncate(days);
        codes.truncate(days);

        Self { name, dates, min, max, codes }
    }

    pub fn days(&self) -> usize {
        self.dates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.dates.is_empty()
    }
}

/// What the presentation layer should show, derived from a
/// [`WeatherState`](crate::state::WeatherState) snapshot.
#[derive(Debug, Clone, PartialEq)]
pub enum RequestState {
    Idle,
    Loading,
    Success { forecast: ForecastData, label: String },
    Failure(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_label_appends_flag() {
        let place = ResolvedPlace { name: "Berlin".into(), country_code: "DE".into() };
        assert_eq!(place.display_label(), "Berlin 🇩🇪");
    }

    #[test]
    fn display_label_keeps_unmappable_code() {
        let place = ResolvedPlace { name: "Atlantis".into(), country_code: String::new() };
        assert_eq!(place.display_label(), "Atlantis ");
    }

    #[test]
    fn forecast_truncates_to_shortest_series() {
        let data = ForecastData::new(
            "Berlin".into(),
            vec!["2024-01-01".into(), "2024-01-02".into()],
            vec![-1.0, 0.0],
            vec![5.0, 6.0],
            vec![],
        );
        assert!(data.is_empty());
        assert_eq!(data.min.len(), 0);
        assert_eq!(data.max.len(), 0);
    }

    #[test]
    fn geo_place_tolerates_missing_optional_fields() {
        let place: GeoPlace =
            serde_json::from_str(r#"{"latitude":1.0,"longitude":2.0,"name":"X"}"#).unwrap();
        assert_eq!(place.timezone, None);
        assert_eq!(place.country_code, "");
    }
}
