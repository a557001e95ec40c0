use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use tracing::debug;

use crate::{
    ForecastError,
    model::{ForecastData, GeoPlace},
};

use super::WeatherProvider;

const DAILY_SERIES: &str = "weathercode,temperature_2m_max,temperature_2m_min";

/// Open-Meteo geocoding + forecast endpoints. No API key required.
#[derive(Debug, Clone)]
pub struct OpenMeteoProvider {
    geocoding_url: String,
    forecast_url: String,
    http: Client,
}

impl OpenMeteoProvider {
    pub fn new(geocoding_url: String, forecast_url: String) -> Self {
        Self { geocoding_url, forecast_url, http: Client::new() }
    }
}

#[derive(Debug, Deserialize)]
struct GeoResponse {
    #[serde(default)]
    results: Option<Vec<GeoPlace>>,
}

#[derive(Debug, Default, Deserialize)]
struct DailySeries {
    #[serde(default)]
    time: Option<Vec<String>>,
    #[serde(default)]
    temperature_2m_max: Option<Vec<f64>>,
    #[serde(default)]
    temperature_2m_min: Option<Vec<f64>>,
    #[serde(default)]
    weathercode: Option<Vec<i32>>,
}

#[derive(Debug, Deserialize)]
struct ForecastResponse {
    #[serde(default)]
    daily: Option<DailySeries>,
}

#[async_trait]
impl WeatherProvider for OpenMeteoProvider {
    async fn geocode(&self, query: &str) -> Result<Option<GeoPlace>, ForecastError> {
        debug!(url = %self.geocoding_url, query, "geocoding");

        let res = self.http.get(&self.geocoding_url).query(&[("name", query)]).send().await?;

        let status = res.status();
        let body = res.text().await?;
        debug!(%status, "geocoding response");

        let parsed: GeoResponse = serde_json::from_str(&body)?;

        Ok(parsed.results.and_then(|results| results.into_iter().next()))
    }

    async fn forecast(&self, place: &GeoPlace) -> Result<ForecastData, ForecastError> {
        let mut params = vec![
            ("latitude", place.latitude.to_string()),
            ("longitude", place.longitude.to_string()),
        ];
        if let Some(tz) = place.timezone.as_deref().filter(|tz| !tz.is_empty()) {
            params.push(("timezone", tz.to_string()));
        }
        params.push(("daily", DAILY_SERIES.to_string()));

        debug!(url = %self.forecast_url, ?params, "fetching forecast");

        let res = self.http.get(&self.forecast_url).query(&params).send().await?;

        let status = res.status();
        if !status.is_success() {
            debug!(%status, "forecast request failed");
            return Err(ForecastError::ForecastUnavailable {
                label: place.resolved().display_label(),
            });
        }

        let body = res.text().await?;
        let parsed: ForecastResponse = serde_json::from_str(&body)?;
        let daily = parsed.daily.unwrap_or_default();

        Ok(ForecastData::new(
            place.name.clone(),
            daily.time.unwrap_or_default(),
            daily.temperature_2m_min.unwrap_or_default(),
            daily.temperature_2m_max.unwrap_or_default(),
            daily.weathercode.unwrap_or_default(),
        ))
    }
}
