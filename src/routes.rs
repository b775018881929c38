// src/routes.rs
use std::convert::Infallible;
use std::sync::Arc;

use log::info;
use warp::reject::Rejection;
use warp::{Filter, Reply};

use crate::handlers::error::ApiError;
use crate::handlers::{forecast::get_daily_forecast, summary::get_weekly_summary};
use crate::models::CoordinatesQuery;
use crate::services::open_meteo::OpenMeteoClient;

// Recovery handling for our custom errors
async fn handle_rejection(err: Rejection) -> Result<impl Reply, Infallible> {
    let code;
    let message;

    if err.is_not_found() {
        code = warp::http::StatusCode::NOT_FOUND;
        message = "Not Found".to_string();
    } else if let Some(api_error) = err.find::<ApiError>() {
        code = api_error.status;
        message = api_error.message.clone();
    } else if err.find::<warp::reject::InvalidQuery>().is_some() {
        code = warp::http::StatusCode::UNPROCESSABLE_ENTITY;
        message = "latitude and longitude are required and must be numbers".to_string();
    } else if err.find::<warp::reject::MethodNotAllowed>().is_some() {
        code = warp::http::StatusCode::METHOD_NOT_ALLOWED;
        message = "Method Not Allowed".to_string();
    } else {
        code = warp::http::StatusCode::INTERNAL_SERVER_ERROR;
        message = "Internal Server Error".to_string();
    }

    Ok(warp::reply::with_status(
        warp::reply::json(&serde_json::json!({
            "error": message,
        })),
        code,
    ))
}

pub fn routes(
    client: Arc<OpenMeteoClient>,
) -> impl Filter<Extract = impl Reply, Error = Infallible> + Clone {
    info!("Configuring routes...");

    let client_filter = warp::any().map(move || client.clone());

    let forecast_route = warp::path!("forecast")
        .and(warp::get())
        .and(warp::query::<CoordinatesQuery>())
        .and(client_filter.clone())
        .and_then(get_daily_forecast);

    let summary_route = warp::path!("summary")
        .and(warp::get())
        .and(warp::query::<CoordinatesQuery>())
        .and(client_filter.clone())
        .and_then(get_weekly_summary);

    info!("All routes configured successfully.");

    forecast_route.or(summary_route).recover(handle_rejection)
}

// Open cross-origin policy: any caller may read the API. warp's builder
// has no header wildcard, so the usual request headers are listed.
pub fn cors() -> warp::cors::Builder {
    warp::cors()
        .allow_any_origin()
        .allow_methods(vec![
            "GET", "POST", "PUT", "PATCH", "DELETE", "HEAD", "OPTIONS",
        ])
        .allow_headers(vec![
            "accept",
            "authorization",
            "content-type",
            "origin",
            "user-agent",
            "x-requested-with",
        ])
}
