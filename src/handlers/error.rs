// src/handlers/error.rs
use std::fmt;

use warp::http::StatusCode;
use warp::reject::Reject;

use crate::services::error::WeatherError;

#[derive(Debug, Clone)]
pub struct ApiError {
    pub status: StatusCode,
    pub message: String,
}

impl ApiError {
    pub fn new(status: StatusCode, message: impl Into<String>) -> Self {
        ApiError {
            status,
            message: message.into(),
        }
    }

    pub fn validation(message: impl Into<String>) -> Self {
        Self::new(StatusCode::UNPROCESSABLE_ENTITY, message)
    }
}

impl From<WeatherError> for ApiError {
    fn from(err: WeatherError) -> Self {
        ApiError::new(err.status_code(), err.to_string())
    }
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::error::Error for ApiError {}
impl Reject for ApiError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn upstream_status_errors_keep_the_provider_code() {
        let err = ApiError::from(WeatherError::UpstreamStatus {
            status: reqwest::StatusCode::FORBIDDEN,
            body: "Forbidden".to_string(),
        });
        assert_eq!(err.status, StatusCode::FORBIDDEN);
        assert_eq!(err.message, "Error response from Open-Meteo API: Forbidden");
    }

    #[test]
    fn data_errors_surface_as_internal_errors() {
        let err = ApiError::from(WeatherError::MissingDailyData);
        assert_eq!(err.status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(err.message, "No daily forecast data available from API.");
    }

    #[test]
    fn validation_errors_are_unprocessable() {
        let err = ApiError::validation("Latitude out of range");
        assert_eq!(err.status, StatusCode::UNPROCESSABLE_ENTITY);
    }
}
