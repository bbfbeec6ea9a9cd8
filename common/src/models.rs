use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Combined view returned once both provider fetches succeed.
#[derive(Debug, Serialize, Deserialize, Clone, ToSchema)]
pub struct WeatherAndForecast {
    pub current: CurrentConditions,
    pub forecast: Vec<ForecastDay>,
}

/// Current conditions for the requested city.
///
/// Every field is optional: the provider may omit any of them and the view
/// keeps "absent" distinct from zero values.
#[derive(Debug, Serialize, Deserialize, Clone, ToSchema)]
pub struct CurrentConditions {
    pub city: Option<String>,
    /// Temperature in °C, rounded to the nearest whole degree.
    pub temperature_c: Option<i64>,
    pub humidity_pct: Option<i64>,
    pub description: Option<String>,
    pub icon_url: Option<String>,
}

/// One calendar day of the forecast.
#[derive(Debug, Serialize, Deserialize, Clone, ToSchema)]
pub struct ForecastDay {
    pub date: NaiveDate,
    /// Weekday and date in Polish, e.g. "środa, 01.11.2023".
    pub label: String,
    pub slots: Vec<ForecastSlot>,
}

/// A single 3-hour forecast slot, in time-ascending order within its day.
#[derive(Debug, Serialize, Deserialize, Clone, ToSchema)]
pub struct ForecastSlot {
    /// Time of day as "HH:MM".
    pub time: String,
    pub temperature_c: Option<i64>,
    pub humidity_pct: Option<i64>,
    pub description: Option<String>,
    pub icon_url: Option<String>,
}
