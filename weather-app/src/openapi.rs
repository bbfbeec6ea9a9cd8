use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::handlers;
use common::models::{CurrentConditions, ForecastDay, ForecastSlot, WeatherAndForecast};

#[derive(OpenApi)]
#[openapi(
    paths(
        handlers::health,
        handlers::weather,
    ),
    components(schemas(
        WeatherAndForecast,
        CurrentConditions,
        ForecastDay,
        ForecastSlot,
        handlers::CityForm,
    )),
    tags(
        (name = "weather", description = "Current conditions and forecast lookup"),
    ),
)]
struct ApiDoc;

pub fn swagger_ui() -> SwaggerUi {
    SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi())
}
