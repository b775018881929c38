// src/services/forecast.rs
use chrono::NaiveDate;
use log::debug;

use crate::models::DailyForecast;
use crate::services::error::WeatherError;
use crate::services::open_meteo::ForecastPayload;

pub const INSTALLATION_POWER_KW: f64 = 2.5;
pub const PANEL_EFFICIENCY: f64 = 0.2;

fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// Daily yield of the fixed 2.5 kW installation at 20% efficiency, from
/// sunshine duration in seconds. Zero sunshine yields 0.0 kWh.
pub fn estimate_energy_kwh(sunshine_seconds: f64) -> f64 {
    let exposure_hours = sunshine_seconds / 3600.0;
    round2(INSTALLATION_POWER_KW * exposure_hours * PANEL_EFFICIENCY)
}

/// Projects the raw daily arrays into per-day records, preserving upstream
/// order. A position missing any of date, weather code, min/max temperature
/// or sunshine duration produces no record; other positions are unaffected.
pub fn project_daily_forecast(
    payload: &ForecastPayload,
) -> Result<Vec<DailyForecast>, WeatherError> {
    let daily = payload
        .daily
        .as_ref()
        .filter(|daily| !daily.time.is_empty())
        .ok_or(WeatherError::MissingDailyData)?;

    let mut records = Vec::with_capacity(daily.time.len());
    for idx in 0..daily.time.len() {
        let date = daily.time[idx]
            .as_deref()
            .and_then(|raw| NaiveDate::parse_from_str(raw, "%Y-%m-%d").ok());
        let fields = (
            date,
            daily.weather_code.get(idx).copied().flatten(),
            daily.temperature_2m_max.get(idx).copied().flatten(),
            daily.temperature_2m_min.get(idx).copied().flatten(),
            daily.sunshine_duration.get(idx).copied().flatten(),
        );
        let (date, weather_code, temp_max, temp_min, sunshine) = match fields {
            (Some(date), Some(code), Some(max), Some(min), Some(sun)) => {
                (date, code, max, min, sun)
            }
            _ => {
                debug!("Skipping day {}: incomplete data", idx);
                continue;
            }
        };

        records.push(DailyForecast {
            date,
            weather_code,
            temperature_min_celsius: temp_min,
            temperature_max_celsius: temp_max,
            estimated_energy_kwh: estimate_energy_kwh(sunshine),
        });
    }

    Ok(records)
}
