use async_trait::async_trait;
use std::fmt::Debug;

use crate::{
    Config, ForecastError,
    model::{ForecastData, GeoPlace},
};

pub mod open_meteo;

pub use open_meteo::OpenMeteoProvider;

/// The two upstream collaborators a resolution attempt talks to.
#[async_trait]
pub trait WeatherProvider: Send + Sync + Debug {
    /// First geocoding hit for `query`, or `None` when there are no results.
    async fn geocode(&self, query: &str) -> Result<Option<GeoPlace>, ForecastError>;

    /// Daily forecast for `place`.
    ///
    /// A non-success response is reported as
    /// [`ForecastError::ForecastUnavailable`].
    async fn forecast(&self, place: &GeoPlace) -> Result<ForecastData, ForecastError>;
}

/// Construct the provider described by `config`.
pub fn provider_from_config(config: &Config) -> anyhow::Result<Box<dyn WeatherProvider>> {
    config.validate()?;
    Ok(Box::new(OpenMeteoProvider::new(
        config.geocoding_url.clone(),
        config.forecast_url.clone(),
    )))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn provider_from_default_config() {
        let cfg = Config::default();
        assert!(provider_from_config(&cfg).is_ok());
    }

    #[test]
    fn provider_from_config_rejects_bad_url() {
        let cfg = Config { forecast_url: "ftp://example.com".into(), ..Config::default() };
        let err = provider_from_config(&cfg).unwrap_err();
        assert!(err.to_string().contains("forecast_url"));
    }
}
