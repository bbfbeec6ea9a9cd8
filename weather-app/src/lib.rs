//! Weather lookup web service.
//!
//! Takes a city name from a form, calls OpenWeatherMap twice (current
//! conditions and the 5-day/3-hour forecast), and serves the combined view
//! as JSON with the forecast grouped by calendar day. When the provider
//! knows nothing about the city, the caller gets an explicit not-found
//! response instead of partial data.

pub mod api_client;
pub mod config;
pub mod handlers;
pub mod openapi;
pub mod presenter;

use axum::{
    Router,
    routing::{get, post},
};
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

/// Build the application router.
pub fn app(state: handlers::AppState) -> Router {
    Router::new()
        .route("/health", get(handlers::health))
        .route("/api/weather", post(handlers::weather))
        .merge(openapi::swagger_ui())
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}
