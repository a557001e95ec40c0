use thiserror::Error;

/// Failures surfaced by a resolution attempt.
///
/// The `Display` text of each variant is what the UI shows on its error line.
#[derive(Debug, Error)]
pub enum ForecastError {
    /// Geocoding returned no results for the query.
    #[error("Location not found: {query}")]
    NotFound { query: String },

    /// The forecast endpoint answered with a non-success status.
    #[error("Unable to determine weather for {label}")]
    ForecastUnavailable { label: String },

    #[error("Request failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("Malformed response: {0}")]
    Parse(#[from] serde_json::Error),
}
