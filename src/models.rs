// src/models.rs
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Deserialize)]
pub struct CoordinatesQuery {
    pub latitude: f64,
    pub longitude: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DailyForecast {
    pub date: NaiveDate,
    pub weather_code: i32,
    pub temperature_min_celsius: f64,
    pub temperature_max_celsius: f64,
    pub estimated_energy_kwh: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WeeklySummary {
    #[serde(rename = "average_weekly_pressure_hPa")]
    pub average_weekly_pressure_hpa: f64,
    pub average_weekly_sunshine_hours: f64,
    pub weekly_min_temperature_celsius: f64,
    pub weekly_max_temperature_celsius: f64,
    pub weekly_weather_summary: String,
}
