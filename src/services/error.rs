// src/services/error.rs
use thiserror::Error;

/// Failures raised while fetching or interpreting provider data. Each variant's
/// Display text is the message surfaced to API clients unchanged.
#[derive(Debug, Error)]
pub enum WeatherError {
    #[error("Error connecting to Open-Meteo API, probably rate-limited.")]
    Connection(#[source] reqwest::Error),

    #[error("Error response from Open-Meteo API: {body}")]
    UpstreamStatus {
        status: reqwest::StatusCode,
        body: String,
    },

    #[error("No daily forecast data available from API.")]
    MissingDailyData,

    #[error("No hourly pressure data available from API.")]
    MissingHourlyPressure,

    #[error("An unexpected error occurred: {0}")]
    Unexpected(String),
}

impl WeatherError {
    /// HTTP status this error surfaces as. Provider status errors pass the
    /// provider's own code through; everything else is a 500.
    pub fn status_code(&self) -> reqwest::StatusCode {
        match self {
            WeatherError::UpstreamStatus { status, .. } => *status,
            _ => reqwest::StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}
