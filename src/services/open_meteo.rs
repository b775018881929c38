// src/services/open_meteo.rs
use std::time::Duration;

use log::{error, info};
use serde::Deserialize;

use crate::services::cache::PayloadCache;
use crate::services::error::WeatherError;

pub const OPEN_METEO_API_URL: &str = "https://api.open-meteo.com/v1/forecast";

pub const FORECAST_DAILY_FIELDS: &[&str] = &[
    "weather_code",
    "temperature_2m_max",
    "temperature_2m_min",
    "sunshine_duration",
];
pub const SUMMARY_DAILY_FIELDS: &[&str] = &[
    "temperature_2m_max",
    "temperature_2m_min",
    "sunshine_duration",
    "precipitation_sum",
];
pub const SUMMARY_HOURLY_FIELDS: &[&str] = &["pressure_msl"];

/// Raw provider response. Sections and individual readings are all optional;
/// presence of whatever a computation needs is checked where it is consumed.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ForecastPayload {
    pub daily: Option<DailyBlock>,
    pub hourly: Option<HourlyBlock>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct DailyBlock {
    #[serde(default)]
    pub time: Vec<Option<String>>,
    #[serde(default)]
    pub weather_code: Vec<Option<i32>>,
    #[serde(default)]
    pub temperature_2m_max: Vec<Option<f64>>,
    #[serde(default)]
    pub temperature_2m_min: Vec<Option<f64>>,
    #[serde(default)]
    pub sunshine_duration: Vec<Option<f64>>,
    #[serde(default)]
    pub precipitation_sum: Vec<Option<f64>>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct HourlyBlock {
    #[serde(default)]
    pub time: Vec<Option<String>>,
    pub pressure_msl: Option<Vec<Option<f64>>>,
}

/// Open-Meteo client fronted by the payload cache. One instance is shared
/// across all requests; handlers call `fetch_forecast` / `fetch_summary`.
pub struct OpenMeteoClient {
    client: reqwest::Client,
    base_url: String,
    cache: PayloadCache,
}

impl Default for OpenMeteoClient {
    fn default() -> Self {
        Self::new()
    }
}

impl OpenMeteoClient {
    pub fn new() -> Self {
        Self::with_base_url(OPEN_METEO_API_URL)
    }

    pub fn with_base_url(base_url: impl Into<String>) -> Self {
        Self::with_cache(base_url, PayloadCache::new())
    }

    pub fn with_cache(base_url: impl Into<String>, cache: PayloadCache) -> Self {
        OpenMeteoClient {
            client: reqwest::Client::builder()
                .timeout(Duration::from_secs(10))
                .build()
                .expect("reqwest client"),
            base_url: base_url.into(),
            cache,
        }
    }

    pub async fn fetch_forecast(
        &self,
        latitude: f64,
        longitude: f64,
    ) -> Result<ForecastPayload, WeatherError> {
        self.fetch(latitude, longitude, "forecast", FORECAST_DAILY_FIELDS, &[])
            .await
    }

    pub async fn fetch_summary(
        &self,
        latitude: f64,
        longitude: f64,
    ) -> Result<ForecastPayload, WeatherError> {
        self.fetch(
            latitude,
            longitude,
            "summary",
            SUMMARY_DAILY_FIELDS,
            SUMMARY_HOURLY_FIELDS,
        )
        .await
    }

    /// Returns the cached payload for (purpose, coordinates) when fresh,
    /// otherwise issues a single GET with the fixed parameter set and the
    /// given field lists. No retries: any failure surfaces immediately.
    pub async fn fetch(
        &self,
        latitude: f64,
        longitude: f64,
        purpose: &str,
        daily_fields: &[&str],
        hourly_fields: &[&str],
    ) -> Result<ForecastPayload, WeatherError> {
        let key = PayloadCache::key(purpose, latitude, longitude);
        if let Some(payload) = self.cache.get(&key).await {
            info!("Serving {} from cache", key);
            return Ok(payload);
        }

        info!("Cache miss for {}, querying {}", key, self.base_url);

        let mut params = vec![
            ("latitude", latitude.to_string()),
            ("longitude", longitude.to_string()),
            ("temperature_unit", "celsius".to_string()),
            ("wind_speed_unit", "kmh".to_string()),
            ("precipitation_unit", "mm".to_string()),
            ("timezone", "auto".to_string()),
            ("forecast_days", "7".to_string()),
            ("daily", daily_fields.join(",")),
        ];
        if !hourly_fields.is_empty() {
            params.push(("hourly", hourly_fields.join(",")));
        }

        let response = self
            .client
            .get(&self.base_url)
            .query(&params)
            .send()
            .await
            .map_err(|e| {
                error!("Failed to reach Open-Meteo: {}", e);
                WeatherError::Connection(e)
            })?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            error!("Open-Meteo returned {}: {}", status, body);
            return Err(WeatherError::UpstreamStatus { status, body });
        }

        let payload = response.json::<ForecastPayload>().await.map_err(|e| {
            error!("Failed to decode Open-Meteo response: {}", e);
            WeatherError::Unexpected(e.to_string())
        })?;

        self.cache.insert(key, payload.clone()).await;
        Ok(payload)
    }
}
