use anyhow::{Context, Result, anyhow, bail};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::{fs, path::PathBuf, time::Duration};

pub const DEFAULT_GEOCODING_URL: &str = "https://geocoding-api.open-meteo.com/v1/search";
pub const DEFAULT_FORECAST_URL: &str = "https://api.open-meteo.com/v1/forecast";
pub const DEFAULT_DEBOUNCE_MS: u64 = 500;

/// Top-level configuration stored on disk.
///
/// Example TOML:
/// ```toml
/// geocoding_url = "https://geocoding-api.open-meteo.com/v1/search"
/// forecast_url = "https://api.open-meteo.com/v1/forecast"
/// debounce_ms = 500
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub geocoding_url: String,
    pub forecast_url: String,
    /// Quiet period after the last query edit before a lookup fires.
    pub debounce_ms: u64,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            geocoding_url: DEFAULT_GEOCODING_URL.to_string(),
            forecast_url: DEFAULT_FORECAST_URL.to_string(),
            debounce_ms: DEFAULT_DEBOUNCE_MS,
        }
    }
}

impl Config {
    pub fn debounce(&self) -> Duration {
        Duration::from_millis(self.debounce_ms)
    }

    /// Both endpoints must be http(s) URLs.
    pub fn validate(&self) -> Result<()> {
        for (field, value) in
            [("geocoding_url", &self.geocoding_url), ("forecast_url", &self.forecast_url)]
        {
            if !(value.starts_with("http://") || value.starts_with("https://")) {
                bail!("Invalid {field} '{value}': expected an http:// or https:// URL");
            }
        }
        Ok(())
    }

    /// Load config from disk, or return defaults if it doesn't exist yet.
    pub fn load() -> Result<Self> {
        let path = Self::config_file_path()?;
        if !path.exists() {
            return Ok(Self::default());
        }

        Self::from_toml(
            &fs::read_to_string(&path)
                .with_context(|| format!("Failed to read config file: {}", path.display()))?,
        )
        .with_context(|| format!("Failed to parse config file: {}", path.display()))
    }

    pub fn from_toml(contents: &str) -> Result<Self> {
        let cfg: Config = toml::from_str(contents)?;
        cfg.validate()?;
        Ok(cfg)
    }

    /// Validate, then write as pretty TOML to [`Config::config_file_path`].
    /// The config directory is created on first save.
    pub fn save(&self) -> Result<()> {
        self.validate()?;
        let path = Self::config_file_path()?;

        let dir = path
            .parent()
            .ok_or_else(|| anyhow!("Config path has no parent: {}", path.display()))?;
        fs::create_dir_all(dir)
            .with_context(|| format!("Failed to create config directory: {}", dir.display()))?;

        let contents = toml::to_string_pretty(self).context("Failed to encode config as TOML")?;
        fs::write(&path, contents)
            .with_context(|| format!("Failed to write config file: {}", path.display()))
    }

    /// `config.toml` inside the per-user config dir, e.g.
    /// `~/.config/classy-weather/config.toml` on Linux.
    pub fn config_file_path() -> Result<PathBuf> {
        ProjectDirs::from("dev", "classy-weather", "classy-weather")
            .map(|dirs| dirs.config_dir().join("config.toml"))
            .ok_or_else(|| anyhow!("No home directory; cannot locate the config dir"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn config_file_lives_in_project_dir() {
        let path = Config::config_file_path().expect("home directory available");
        assert!(path.ends_with("config.toml"));
        assert!(path.to_string_lossy().contains("classy-weather"));
    }

    #[test]
    fn defaults_point_at_open_meteo() {
        let cfg = Config::default();
        assert_eq!(cfg.geocoding_url, DEFAULT_GEOCODING_URL);
        assert_eq!(cfg.forecast_url, DEFAULT_FORECAST_URL);
        assert_eq!(cfg.debounce(), Duration::from_millis(500));
        assert!(cfg.validate().is_ok());
    }

    #[test]
    fn partial_toml_fills_defaults() {
        let cfg = Config::from_toml("debounce_ms = 250").expect("valid config");
        assert_eq!(cfg.debounce_ms, 250);
        assert_eq!(cfg.forecast_url, DEFAULT_FORECAST_URL);
    }

    #[test]
    fn empty_toml_is_default() {
        let cfg = Config::from_toml("").expect("valid config");
        assert_eq!(cfg, Config::default());
    }

    #[test]
    fn rejects_non_http_endpoint() {
        let err = Config::from_toml(r#"geocoding_url = "localhost:8080""#).unwrap_err();
        assert!(err.to_string().contains("Invalid geocoding_url"));
    }

    #[test]
    fn toml_roundtrip_preserves_values() {
        let cfg = Config {
            geocoding_url: "http://127.0.0.1:9000/search".into(),
            forecast_url: "http://127.0.0.1:9000/forecast".into(),
            debounce_ms: 10,
        };
        let text = toml::to_string_pretty(&cfg).expect("serializable");
        assert_eq!(Config::from_toml(&text).expect("parseable"), cfg);
    }
}
