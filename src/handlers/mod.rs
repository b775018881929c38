// src/handlers/mod.rs
pub mod error;
pub mod forecast;
pub mod summary;

use log::warn;
use warp::Rejection;

use crate::models::CoordinatesQuery;
use error::ApiError;

// Lower bounds are exclusive, upper bounds inclusive. NaN fails both checks.
pub(crate) fn validate_coordinates(query: &CoordinatesQuery) -> Result<(), Rejection> {
    if !(query.latitude > -90.0 && query.latitude <= 90.0) {
        warn!("Rejecting out-of-range latitude {}", query.latitude);
        return Err(warp::reject::custom(ApiError::validation(
            "Latitude must be greater than -90 and less than or equal to 90",
        )));
    }
    if !(query.longitude > -180.0 && query.longitude <= 180.0) {
        warn!("Rejecting out-of-range longitude {}", query.longitude);
        return Err(warp::reject::custom(ApiError::validation(
            "Longitude must be greater than -180 and less than or equal to 180",
        )));
    }
    Ok(())
}
