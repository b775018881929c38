// src/handlers/forecast.rs
use std::sync::Arc;

use log::{error, info};
use warp::reply::Json;
use warp::Rejection;

use crate::handlers::error::ApiError;
use crate::handlers::validate_coordinates;
use crate::models::CoordinatesQuery;
use crate::services::forecast::project_daily_forecast;
use crate::services::open_meteo::OpenMeteoClient;

pub async fn get_daily_forecast(
    query: CoordinatesQuery,
    client: Arc<OpenMeteoClient>,
) -> Result<Json, Rejection> {
    info!(
        "Handling forecast request for ({}, {})",
        query.latitude, query.longitude
    );
    validate_coordinates(&query)?;

    let payload = client
        .fetch_forecast(query.latitude, query.longitude)
        .await
        .map_err(|e| {
            error!("Forecast fetch failed: {}", e);
            warp::reject::custom(ApiError::from(e))
        })?;

    let records = project_daily_forecast(&payload).map_err(|e| {
        error!("Forecast projection failed: {}", e);
        warp::reject::custom(ApiError::from(e))
    })?;

    info!("Returning {} forecast records", records.len());
    Ok(warp::reply::json(&records))
}
