use chrono::NaiveDateTime;
use common::errors::AppError;
use common::http_client::{Fetched, HttpClient};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer};
use tracing::{info, instrument};

/// Timestamp format used by the forecast feed's `dt_txt` field.
const DT_TXT_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Deserialize a field into `None` when it is absent or has the wrong type,
/// instead of failing the whole payload.
fn lenient<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned,
{
    let value = serde_json::Value::deserialize(deserializer)?;
    Ok(serde_json::from_value(value).ok())
}

fn lenient_dt_txt<'de, D>(deserializer: D) -> Result<Option<NaiveDateTime>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = serde_json::Value::deserialize(deserializer)?;
    Ok(value
        .as_str()
        .and_then(|text| NaiveDateTime::parse_from_str(text, DT_TXT_FORMAT).ok()))
}

/// Current conditions payload from `GET /weather`.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct CurrentWeather {
    #[serde(default, deserialize_with = "lenient")]
    pub name: Option<String>,
    #[serde(default, deserialize_with = "lenient")]
    pub main: Option<MainConditions>,
    #[serde(default, deserialize_with = "lenient")]
    pub weather: Option<Vec<WeatherDescriptor>>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct MainConditions {
    #[serde(default, deserialize_with = "lenient")]
    pub temp: Option<f64>,
    #[serde(default, deserialize_with = "lenient")]
    pub humidity: Option<i64>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct WeatherDescriptor {
    #[serde(default, deserialize_with = "lenient")]
    pub description: Option<String>,
    #[serde(default, deserialize_with = "lenient")]
    pub icon: Option<String>,
}

/// Forecast payload from `GET /forecast`.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct ForecastResponse {
    #[serde(default, deserialize_with = "lenient")]
    pub list: Option<Vec<ForecastEntry>>,
    #[serde(default, deserialize_with = "lenient")]
    pub city: Option<CityInfo>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct ForecastEntry {
    #[serde(default, deserialize_with = "lenient_dt_txt")]
    pub dt_txt: Option<NaiveDateTime>,
    #[serde(default, deserialize_with = "lenient")]
    pub main: Option<MainConditions>,
    #[serde(default, deserialize_with = "lenient")]
    pub weather: Option<Vec<WeatherDescriptor>>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct CityInfo {
    #[serde(default, deserialize_with = "lenient")]
    pub name: Option<String>,
    #[serde(default, deserialize_with = "lenient")]
    pub country: Option<String>,
}

/// Client for the OpenWeatherMap current-weather and forecast endpoints.
pub struct OpenWeatherClient {
    http_client: HttpClient,
    base_url: String,
    api_key: String,
}

impl OpenWeatherClient {
    pub fn new(base_url: String, api_key: String) -> Self {
        Self {
            http_client: HttpClient::new(),
            base_url,
            api_key,
        }
    }

    #[instrument(skip(self), fields(city = %city))]
    pub async fn fetch_current(&self, city: &str) -> Result<Fetched<CurrentWeather>, AppError> {
        info!("Fetching current weather");

        // The city is substituted verbatim; encoding, if any, is left to the
        // transport when it parses the URL.
        let url = format!(
            "{}/weather?q={}&appid={}&units=metric&lang=pl",
            self.base_url, city, self.api_key
        );

        self.http_client.get_json(&url).await
    }

    #[instrument(skip(self), fields(city = %city))]
    pub async fn fetch_forecast(&self, city: &str) -> Result<Fetched<ForecastResponse>, AppError> {
        info!("Fetching forecast");

        let url = format!(
            "{}/forecast?q={}&appid={}&units=metric&lang=pl",
            self.base_url, city, self.api_key
        );

        self.http_client.get_json(&url).await
    }
}
