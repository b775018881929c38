// src/handlers/summary.rs
use std::sync::Arc;

use log::{error, info};
use warp::reply::Json;
use warp::Rejection;

use crate::handlers::error::ApiError;
use crate::handlers::validate_coordinates;
use crate::models::CoordinatesQuery;
use crate::services::open_meteo::OpenMeteoClient;
use crate::services::summary::summarize_week;

pub async fn get_weekly_summary(
    query: CoordinatesQuery,
    client: Arc<OpenMeteoClient>,
) -> Result<Json, Rejection> {
    info!(
        "Handling summary request for ({}, {})",
        query.latitude, query.longitude
    );
    validate_coordinates(&query)?;

    let payload = client
        .fetch_summary(query.latitude, query.longitude)
        .await
        .map_err(|e| {
            error!("Summary fetch failed: {}", e);
            warp::reject::custom(ApiError::from(e))
        })?;

    let summary = summarize_week(&payload).map_err(|e| {
        error!("Summary aggregation failed: {}", e);
        warp::reject::custom(ApiError::from(e))
    })?;

    Ok(warp::reply::json(&summary))
}
