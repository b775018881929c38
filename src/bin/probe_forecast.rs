// src/bin/probe_forecast.rs
use anyhow::{Context, Result};

use solar_forecast_api::services::forecast::project_daily_forecast;
use solar_forecast_api::services::open_meteo::OpenMeteoClient;
use solar_forecast_api::services::summary::summarize_week;

#[tokio::main]
async fn main() -> Result<()> {
    let mut args = std::env::args().skip(1);
    let latitude: f64 = args
        .next()
        .unwrap_or_else(|| "52.52".to_string())
        .parse()
        .context("latitude must be a number")?;
    let longitude: f64 = args
        .next()
        .unwrap_or_else(|| "13.405".to_string())
        .parse()
        .context("longitude must be a number")?;

    let client = OpenMeteoClient::new();

    let payload = client.fetch_forecast(latitude, longitude).await?;
    for record in project_daily_forecast(&payload)? {
        println!(
            "{}  code={:>3}  min={:>5.1}C  max={:>5.1}C  energy={:.2}kWh",
            record.date,
            record.weather_code,
            record.temperature_min_celsius,
            record.temperature_max_celsius,
            record.estimated_energy_kwh
        );
    }

    let payload = client.fetch_summary(latitude, longitude).await?;
    println!("{:#?}", summarize_week(&payload)?);

    Ok(())
}
