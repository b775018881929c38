// src/services/summary.rs
use chrono::{NaiveDate, NaiveDateTime};
use log::debug;

use crate::models::WeeklySummary;
use crate::services::error::WeatherError;
use crate::services::open_meteo::ForecastPayload;

fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

fn average(values: &[f64]) -> f64 {
    if values.is_empty() {
        0.0
    } else {
        values.iter().sum::<f64>() / values.len() as f64
    }
}

// Open-Meteo sends hourly stamps without seconds; other ISO producers include them.
fn parse_hour_date(raw: &str) -> Option<NaiveDate> {
    NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S")
        .or_else(|_| NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M"))
        .map(|dt| dt.date())
        .ok()
}

/// Averages pressure readings per run of consecutive same-date timestamps.
/// A date change closes the current bucket, so a revisited date opens a new
/// one rather than merging; no sorting is applied. Buckets without a single
/// valid reading contribute nothing.
fn bucket_daily_pressures(times: &[Option<String>], pressures: &[Option<f64>]) -> Vec<f64> {
    let mut bucket_means = Vec::new();
    let mut current_day: Option<NaiveDate> = None;
    let mut current_readings: Vec<f64> = Vec::new();

    for (idx, raw_time) in times.iter().enumerate() {
        let hour_date = match raw_time.as_deref().and_then(parse_hour_date) {
            Some(day) => day,
            None => {
                debug!("Skipping hourly reading {}: unusable timestamp", idx);
                continue;
            }
        };

        if current_day != Some(hour_date) {
            if !current_readings.is_empty() {
                bucket_means.push(average(&current_readings));
            }
            current_day = Some(hour_date);
            current_readings.clear();
        }
        if let Some(pressure) = pressures.get(idx).copied().flatten() {
            current_readings.push(pressure);
        }
    }
    if !current_readings.is_empty() {
        bucket_means.push(average(&current_readings));
    }

    bucket_means
}

/// Reduces the raw daily and hourly arrays to the weekly aggregates. Each
/// metric falls back to 0.0 when it has no valid source values; only a
/// missing daily section or a missing hourly pressure array is an error.
pub fn summarize_week(payload: &ForecastPayload) -> Result<WeeklySummary, WeatherError> {
    let daily = payload
        .daily
        .as_ref()
        .filter(|daily| !daily.time.is_empty())
        .ok_or(WeatherError::MissingDailyData)?;
    let hourly = payload
        .hourly
        .as_ref()
        .ok_or(WeatherError::MissingHourlyPressure)?;
    let pressures = hourly
        .pressure_msl
        .as_ref()
        .ok_or(WeatherError::MissingHourlyPressure)?;

    let bucket_means = bucket_daily_pressures(&hourly.time, pressures);
    let average_weekly_pressure_hpa = if bucket_means.is_empty() {
        0.0
    } else {
        round2(average(&bucket_means))
    };

    let sunshine: Vec<f64> = daily.sunshine_duration.iter().copied().flatten().collect();
    let average_weekly_sunshine_hours = if sunshine.is_empty() {
        0.0
    } else {
        round2(average(&sunshine) / 3600.0)
    };

    // Extremes span the union of both series, not min-of-mins / max-of-maxes.
    let temperatures: Vec<f64> = daily
        .temperature_2m_max
        .iter()
        .chain(daily.temperature_2m_min.iter())
        .copied()
        .flatten()
        .collect();
    let (weekly_min, weekly_max) = if temperatures.is_empty() {
        (0.0, 0.0)
    } else {
        (
            temperatures.iter().copied().fold(f64::INFINITY, f64::min),
            temperatures
                .iter()
                .copied()
                .fold(f64::NEG_INFINITY, f64::max),
        )
    };

    let days_with_precipitation = daily
        .precipitation_sum
        .iter()
        .copied()
        .flatten()
        .filter(|sum| *sum > 0.0)
        .count();
    let weekly_weather_summary = if days_with_precipitation >= 4 {
        "with precipitation".to_string()
    } else {
        "without precipitation".to_string()
    };

    Ok(WeeklySummary {
        average_weekly_pressure_hpa,
        average_weekly_sunshine_hours,
        weekly_min_temperature_celsius: weekly_min,
        weekly_max_temperature_celsius: weekly_max,
        weekly_weather_summary,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::open_meteo::{DailyBlock, HourlyBlock};
    use chrono::Duration;

    fn daily_week(precipitation: [f64; 7]) -> DailyBlock {
        let dates = [
            "2025-06-18",
            "2025-06-19",
            "2025-06-20",
            "2025-06-21",
            "2025-06-22",
            "2025-06-23",
            "2025-06-24",
        ];
        DailyBlock {
            time: dates.iter().map(|d| Some(d.to_string())).collect(),
            weather_code: vec![],
            temperature_2m_max: vec![
                Some(15.0),
                Some(16.5),
                Some(17.0),
                Some(12.0),
                Some(10.0),
                Some(14.5),
                Some(13.0),
            ],
            temperature_2m_min: vec![
                Some(5.0),
                Some(6.0),
                Some(7.5),
                Some(8.0),
                Some(7.0),
                Some(5.5),
                Some(4.0),
            ],
            sunshine_duration: vec![
                Some(36000.0),
                Some(28800.0),
                Some(21600.0),
                Some(14400.0),
                Some(7200.0),
                Some(28800.0),
                Some(18000.0),
            ],
            precipitation_sum: precipitation.iter().map(|p| Some(*p)).collect(),
        }
    }

    fn hourly_week() -> HourlyBlock {
        let start = NaiveDate::from_ymd_opt(2025, 6, 18)
            .unwrap()
            .and_hms_opt(0, 0, 0)
            .unwrap();
        let mut time = Vec::new();
        let mut pressure = Vec::new();
        for i in 0..168 {
            let stamp = start + Duration::hours(i);
            time.push(Some(stamp.format("%Y-%m-%dT%H:%M").to_string()));
            pressure.push(Some(1012.0 + i as f64 * 0.1));
        }
        HourlyBlock {
            time,
            pressure_msl: Some(pressure),
        }
    }

    fn week_payload(precipitation: [f64; 7]) -> ForecastPayload {
        ForecastPayload {
            daily: Some(daily_week(precipitation)),
            hourly: Some(hourly_week()),
        }
    }

    #[test]
    fn aggregates_a_full_week() {
        let summary = summarize_week(&week_payload([0.0, 0.0, 0.0, 5.0, 10.0, 0.0, 0.0])).unwrap();

        // 7 day buckets of 24 ascending readings each.
        assert_eq!(summary.average_weekly_pressure_hpa, 1020.35);
        // mean(154800 s) / 3600 = 6.1428...
        assert_eq!(summary.average_weekly_sunshine_hours, 6.14);
        assert_eq!(summary.weekly_min_temperature_celsius, 4.0);
        assert_eq!(summary.weekly_max_temperature_celsius, 17.0);
        assert_eq!(summary.weekly_weather_summary, "without precipitation");
    }

    #[test]
    fn four_wet_days_flip_the_label() {
        let summary = summarize_week(&week_payload([1.0, 2.0, 3.0, 4.0, 0.0, 0.0, 0.0])).unwrap();
        assert_eq!(summary.weekly_weather_summary, "with precipitation");
    }

    #[test]
    fn three_wet_days_do_not() {
        let summary = summarize_week(&week_payload([1.0, 2.0, 3.0, 0.0, 0.0, 0.0, 0.0])).unwrap();
        assert_eq!(summary.weekly_weather_summary, "without precipitation");
    }

    #[test]
    fn null_precipitation_days_are_not_wet_days() {
        let mut payload = week_payload([1.0, 2.0, 3.0, 4.0, 0.0, 0.0, 0.0]);
        payload.daily.as_mut().unwrap().precipitation_sum[3] = None;
        let summary = summarize_week(&payload).unwrap();
        assert_eq!(summary.weekly_weather_summary, "without precipitation");
    }

    #[test]
    fn null_pressure_readings_are_excluded_from_their_bucket() {
        let times: Vec<Option<String>> = vec![
            Some("2025-06-18T00:00".to_string()),
            Some("2025-06-18T01:00".to_string()),
            Some("2025-06-19T00:00".to_string()),
        ];
        let pressures = vec![Some(1000.0), None, Some(1020.0)];

        let means = bucket_daily_pressures(&times, &pressures);
        assert_eq!(means, vec![1000.0, 1020.0]);
    }

    #[test]
    fn a_bucket_with_no_valid_readings_contributes_nothing() {
        let times: Vec<Option<String>> = vec![
            Some("2025-06-18T00:00".to_string()),
            Some("2025-06-18T01:00".to_string()),
            Some("2025-06-19T00:00".to_string()),
            Some("2025-06-19T01:00".to_string()),
        ];
        let pressures = vec![None, None, Some(1010.0), Some(1020.0)];

        let means = bucket_daily_pressures(&times, &pressures);
        assert_eq!(means, vec![1015.0]);
    }

    #[test]
    fn a_revisited_date_starts_a_new_bucket() {
        let times: Vec<Option<String>> = vec![
            Some("2025-06-18T00:00".to_string()),
            Some("2025-06-19T00:00".to_string()),
            Some("2025-06-18T02:00".to_string()),
        ];
        let pressures = vec![Some(1000.0), Some(1010.0), Some(1030.0)];

        let means = bucket_daily_pressures(&times, &pressures);
        assert_eq!(means, vec![1000.0, 1010.0, 1030.0]);
    }

    #[test]
    fn second_timestamps_are_understood() {
        let times: Vec<Option<String>> = vec![
            Some("2025-06-18T00:00:00".to_string()),
            Some("2025-06-18T01:00:00".to_string()),
        ];
        let pressures = vec![Some(1000.0), Some(1002.0)];

        let means = bucket_daily_pressures(&times, &pressures);
        assert_eq!(means, vec![1001.0]);
    }

    #[test]
    fn unusable_timestamps_are_skipped() {
        let times: Vec<Option<String>> = vec![
            Some("2025-06-18T00:00".to_string()),
            None,
            Some("garbage".to_string()),
            Some("2025-06-18T03:00".to_string()),
        ];
        let pressures = vec![Some(1000.0), Some(9999.0), Some(9999.0), Some(1002.0)];

        let means = bucket_daily_pressures(&times, &pressures);
        assert_eq!(means, vec![1001.0]);
    }

    #[test]
    fn readings_without_a_pressure_value_yield_zero_average() {
        let mut payload = week_payload([0.0; 7]);
        payload.hourly.as_mut().unwrap().pressure_msl = Some(vec![]);

        let summary = summarize_week(&payload).unwrap();
        assert_eq!(summary.average_weekly_pressure_hpa, 0.0);
    }

    #[test]
    fn all_null_sunshine_yields_zero_hours() {
        let mut payload = week_payload([0.0; 7]);
        payload.daily.as_mut().unwrap().sunshine_duration = vec![None; 7];

        let summary = summarize_week(&payload).unwrap();
        assert_eq!(summary.average_weekly_sunshine_hours, 0.0);
    }

    #[test]
    fn all_null_temperatures_fall_back_to_zero_extremes() {
        let mut payload = week_payload([0.0; 7]);
        {
            let daily = payload.daily.as_mut().unwrap();
            daily.temperature_2m_max = vec![None; 7];
            daily.temperature_2m_min = vec![None; 7];
        }

        let summary = summarize_week(&payload).unwrap();
        assert_eq!(summary.weekly_min_temperature_celsius, 0.0);
        assert_eq!(summary.weekly_max_temperature_celsius, 0.0);
    }

    #[test]
    fn extremes_span_both_temperature_series() {
        let mut payload = week_payload([0.0; 7]);
        {
            let daily = payload.daily.as_mut().unwrap();
            // An inverted pair: the max series carries the weekly minimum.
            daily.temperature_2m_max[0] = Some(-20.0);
            daily.temperature_2m_min[1] = Some(30.0);
        }

        let summary = summarize_week(&payload).unwrap();
        assert_eq!(summary.weekly_min_temperature_celsius, -20.0);
        assert_eq!(summary.weekly_max_temperature_celsius, 30.0);
    }

    #[test]
    fn missing_daily_section_is_reported_first() {
        let err = summarize_week(&ForecastPayload::default()).unwrap_err();
        assert!(matches!(err, WeatherError::MissingDailyData));
    }

    #[test]
    fn missing_hourly_section_is_a_pressure_data_error() {
        let payload = ForecastPayload {
            daily: Some(daily_week([0.0; 7])),
            hourly: None,
        };
        let err = summarize_week(&payload).unwrap_err();
        assert!(matches!(err, WeatherError::MissingHourlyPressure));
        assert_eq!(
            err.to_string(),
            "No hourly pressure data available from API."
        );
    }

    #[test]
    fn missing_pressure_array_is_a_pressure_data_error() {
        let payload = ForecastPayload {
            daily: Some(daily_week([0.0; 7])),
            hourly: Some(HourlyBlock {
                time: vec![Some("2025-06-18T00:00".to_string())],
                pressure_msl: None,
            }),
        };
        let err = summarize_week(&payload).unwrap_err();
        assert!(matches!(err, WeatherError::MissingHourlyPressure));
    }
}
