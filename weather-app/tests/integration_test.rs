use axum::body::Body;
use axum::http::{Request, StatusCode, header::CONTENT_TYPE};
use http_body_util::BodyExt;
use serde_json::json;
use std::sync::Arc;
use tower::ServiceExt;
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

use weather_app::api_client::OpenWeatherClient;
use weather_app::handlers::AppState;

fn client_for(server: &MockServer) -> OpenWeatherClient {
    OpenWeatherClient::new(format!("{}/data/2.5", server.uri()), "testkey".to_string())
}

fn app_for(server: &MockServer) -> axum::Router {
    weather_app::app(AppState {
        client: Arc::new(client_for(server)),
    })
}

fn current_warsaw() -> serde_json::Value {
    json!({
        "name": "Warsaw",
        "main": {"temp": 20.5, "humidity": 65},
        "weather": [{"description": "Słonecznie", "icon": "01d"}]
    })
}

fn forecast_two_days() -> serde_json::Value {
    json!({
        "list": [
            {
                "dt_txt": "2023-11-01 09:00:00",
                "main": {"temp": 10.2, "humidity": 80},
                "weather": [{"description": "mgła", "icon": "50d"}]
            },
            {
                "dt_txt": "2023-11-01 12:00:00",
                "main": {"temp": 12.7, "humidity": 70},
                "weather": [{"description": "zachmurzenie", "icon": "04d"}]
            },
            {
                "dt_txt": "2023-11-02 09:00:00",
                "main": {"temp": 9.5, "humidity": 85},
                "weather": [{"description": "deszcz", "icon": "10d"}]
            }
        ],
        "city": {"name": "Warsaw", "country": "PL"}
    })
}

#[tokio::test]
async fn fetch_current_sends_city_credential_units_and_lang() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/data/2.5/weather"))
        .and(query_param("q", "TestCity"))
        .and(query_param("appid", "testkey"))
        .and(query_param("units", "metric"))
        .and(query_param("lang", "pl"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({})))
        .expect(1)
        .mount(&server)
        .await;

    let fetched = client_for(&server)
        .fetch_current("TestCity")
        .await
        .expect("transport should succeed");

    // An empty object is a valid success with every field absent.
    let current = fetched.into_option().expect("should be a success");
    assert!(current.name.is_none());
    assert!(current.main.is_none());
    assert!(current.weather.is_none());
}

#[tokio::test]
async fn fetch_forecast_sends_city_credential_units_and_lang() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/data/2.5/forecast"))
        .and(query_param("q", "TestCity"))
        .and(query_param("appid", "testkey"))
        .and(query_param("units", "metric"))
        .and(query_param("lang", "pl"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({})))
        .expect(1)
        .mount(&server)
        .await;

    let fetched = client_for(&server)
        .fetch_forecast("TestCity")
        .await
        .expect("transport should succeed");

    let forecast = fetched.into_option().expect("should be a success");
    assert!(forecast.list.is_none());
    assert!(forecast.city.is_none());
}

#[tokio::test]
async fn city_with_spaces_and_diacritics_reaches_provider_intact() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/data/2.5/weather"))
        .and(query_param("q", "Zielona Góra"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({})))
        .expect(1)
        .mount(&server)
        .await;

    let fetched = client_for(&server)
        .fetch_current("Zielona Góra")
        .await
        .expect("transport should succeed");

    assert!(fetched.into_option().is_some());
}

#[tokio::test]
async fn not_found_on_one_endpoint_leaves_the_other_untouched() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/data/2.5/weather"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/data/2.5/forecast"))
        .respond_with(ResponseTemplate::new(200).set_body_json(forecast_two_days()))
        .mount(&server)
        .await;

    let client = client_for(&server);

    let current = client.fetch_current("Nowhere").await.unwrap();
    assert!(current.is_not_found());

    let forecast = client.fetch_forecast("Nowhere").await.unwrap();
    let forecast = forecast.into_option().expect("forecast should succeed");
    assert_eq!(forecast.list.unwrap().len(), 3);
}

#[tokio::test]
async fn current_weather_payload_parses_end_to_end() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/data/2.5/weather"))
        .respond_with(ResponseTemplate::new(200).set_body_json(current_warsaw()))
        .mount(&server)
        .await;

    let fetched = client_for(&server).fetch_current("Warsaw").await.unwrap();
    let current = fetched.into_option().expect("should be a success");

    assert_eq!(current.name.as_deref(), Some("Warsaw"));
    let main = current.main.unwrap();
    assert_eq!(main.temp, Some(20.5));
    assert_eq!(main.humidity, Some(65));
    assert_eq!(
        current.weather.unwrap()[0].description.as_deref(),
        Some("Słonecznie")
    );
}

#[tokio::test]
async fn combined_view_when_both_fetches_succeed() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/data/2.5/weather"))
        .respond_with(ResponseTemplate::new(200).set_body_json(current_warsaw()))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/data/2.5/forecast"))
        .respond_with(ResponseTemplate::new(200).set_body_json(forecast_two_days()))
        .mount(&server)
        .await;

    let response = app_for(&server)
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/api/weather")
                .header(CONTENT_TYPE, "application/x-www-form-urlencoded")
                .body(Body::from("city=Warsaw"))
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);

    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let view: serde_json::Value = serde_json::from_slice(&bytes).unwrap();

    assert_eq!(view["current"]["city"], "Warsaw");
    assert_eq!(view["current"]["temperature_c"], 21);
    assert_eq!(view["current"]["humidity_pct"], 65);
    assert_eq!(
        view["current"]["icon_url"],
        "http://openweathermap.org/img/wn/01d@2x.png"
    );

    let days = view["forecast"].as_array().unwrap();
    assert_eq!(days.len(), 2);
    assert_eq!(days[0]["label"], "środa, 01.11.2023");
    let slots = days[0]["slots"].as_array().unwrap();
    assert_eq!(slots.len(), 2);
    assert_eq!(slots[0]["time"], "09:00");
    assert_eq!(slots[1]["time"], "12:00");
    assert_eq!(days[1]["label"], "czwartek, 02.11.2023");
    assert_eq!(days[1]["slots"].as_array().unwrap().len(), 1);
}

#[tokio::test]
async fn not_found_when_either_fetch_misses() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/data/2.5/weather"))
        .respond_with(ResponseTemplate::new(200).set_body_json(current_warsaw()))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/data/2.5/forecast"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&server)
        .await;

    let response = app_for(&server)
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/api/weather")
                .header(CONTENT_TYPE, "application/x-www-form-urlencoded")
                .body(Body::from("city=Atlantyda"))
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let body: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
    assert_eq!(body["error"], "Nie znaleziono miasta \"Atlantyda\".");
}

#[tokio::test]
async fn empty_city_is_rejected() {
    let server = MockServer::start().await;

    let response = app_for(&server)
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/api/weather")
                .header(CONTENT_TYPE, "application/x-www-form-urlencoded")
                .body(Body::from("city="))
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn health_endpoint_responds() {
    let server = MockServer::start().await;

    let response = app_for(&server)
        .oneshot(Request::builder().uri("/health").body(Body::empty()).unwrap())
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
}
