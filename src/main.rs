use dotenv::dotenv;
use log::{info, warn};
use std::env;
use std::net::SocketAddr;
use std::sync::Arc;
use warp::Filter;

use solar_forecast_api::routes;
use solar_forecast_api::services::open_meteo::{OpenMeteoClient, OPEN_METEO_API_URL};

#[tokio::main]
async fn main() {
    dotenv().ok();

    // Initialize the logger
    env_logger::init();
    info!("Logger initialized. Starting the application...");

    let port_str = env::var("PORT").unwrap_or_else(|_| {
        warn!("$PORT not set, defaulting to 3030");
        "3030".to_string()
    });

    let port: u16 = port_str.parse().expect("PORT must be a number");
    info!("Using PORT: {}", port);

    let base_url =
        env::var("OPEN_METEO_URL").unwrap_or_else(|_| OPEN_METEO_API_URL.to_string());
    info!("Forecast provider: {}", base_url);

    let client = Arc::new(OpenMeteoClient::with_base_url(base_url));

    let addr: SocketAddr = ([0, 0, 0, 0], port).into();
    info!("Will bind to: {}", addr);

    // Set up routes
    let api = routes::routes(client).with(routes::cors());
    info!("Routes configured successfully with CORS.");

    // Start the server
    info!("Starting server on {}", addr);
    warp::serve(api).run(addr).await;
}
