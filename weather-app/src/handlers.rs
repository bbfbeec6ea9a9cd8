use axum::{Form, extract::State, response::Json};
use common::errors::AppError;
use common::http_client::Fetched;
use common::models::WeatherAndForecast;
use serde::Deserialize;
use std::sync::Arc;
use tracing::info;
use utoipa::ToSchema;

use crate::api_client::OpenWeatherClient;
use crate::presenter;

#[derive(Clone)]
pub struct AppState {
    pub client: Arc<OpenWeatherClient>,
}

#[utoipa::path(
    get,
    path = "/health",
    responses(
        (status = 200, description = "Service health check")
    )
)]
pub async fn health() -> Json<serde_json::Value> {
    Json(serde_json::json!({ "status": "ok", "service": "weather-app" }))
}

/// The search form: one field, the city name.
#[derive(Debug, Deserialize, ToSchema)]
pub struct CityForm {
    pub city: String,
}

#[utoipa::path(
    post,
    path = "/api/weather",
    request_body(
        content = CityForm,
        content_type = "application/x-www-form-urlencoded",
        description = "City to look up"
    ),
    responses(
        (status = 200, description = "Current conditions and day-grouped forecast", body = WeatherAndForecast),
        (status = 400, description = "Empty city name"),
        (status = 404, description = "City not found by the provider"),
        (status = 502, description = "Provider unreachable or returned garbage")
    )
)]
pub async fn weather(
    State(state): State<AppState>,
    Form(form): Form<CityForm>,
) -> Result<Json<WeatherAndForecast>, AppError> {
    let city = form.city;
    if city.is_empty() {
        return Err(AppError::validation("city must not be empty"));
    }

    info!(city = %city, "Weather request received");

    // The two fetches are independent; issue them concurrently and await
    // both before assembling anything.
    let (current, forecast) = tokio::join!(
        state.client.fetch_current(&city),
        state.client.fetch_forecast(&city)
    );

    match (current?, forecast?) {
        (Fetched::Success(current), Fetched::Success(forecast)) => {
            Ok(Json(presenter::assemble(current, forecast)))
        }
        // Either miss means no partial view: the whole request is not found.
        _ => Err(AppError::city_not_found(city)),
    }
}
