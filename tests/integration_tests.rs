//! Integration tests for fetch, retry, and delivery against a mock server

use httpmock::prelude::*;
use mallorkayak::config::{AppConfig, DeliveryConfig, WeatherConfig};
use mallorkayak::models::Zone;
use mallorkayak::telegram::TelegramNotifier;
use mallorkayak::weather::ForecastClient;
use mallorkayak::{kayak_forecast, report};

static TEST_ZONES: &[Zone] = &[
    Zone {
        name: "Cala Norte",
        latitude: 39.5,
        longitude: 2.5,
    },
    Zone {
        name: "Cala Sur",
        latitude: 39.25,
        longitude: 3.25,
    },
];

fn weather_config(server: &MockServer, max_retries: u32) -> WeatherConfig {
    WeatherConfig {
        base_url: server.base_url(),
        timeout_seconds: 5,
        max_retries,
        retry_delay_seconds: 0,
        request_pause_ms: 0,
        forecast_days: 2,
    }
}

fn app_config(server: &MockServer, max_retries: u32) -> AppConfig {
    AppConfig {
        weather: weather_config(server, max_retries),
        ..AppConfig::default()
    }
}

/// A plausible two-day Open-Meteo payload with ideal conditions on day 0
fn forecast_payload() -> serde_json::Value {
    let wave: Vec<f64> = std::iter::repeat(0.6).take(48).collect();
    let visibility: Vec<f64> = std::iter::repeat(20000.0).take(48).collect();
    serde_json::json!({
        "latitude": 39.5,
        "longitude": 2.5,
        "hourly": {
            "time": [],
            "wave_height": wave,
            "visibility": visibility
        },
        "daily": {
            "time": ["2026-08-06", "2026-08-07"],
            "temperature_2m_max": [21.0, 23.0],
            "temperature_2m_min": [17.0, 18.0],
            "windspeed_10m_max": [4.0, 9.5],
            "precipitation_sum": [0.0, 0.5]
        }
    })
}

#[tokio::test]
async fn test_fetch_forecast_success() {
    let server = MockServer::start();
    let mock = server.mock(|when, then| {
        when.method(GET)
            .path("/forecast")
            .query_param("latitude", "39.5")
            .query_param("timezone", "Europe/Madrid");
        then.status(200).json_body(forecast_payload());
    });

    let config = weather_config(&server, 0);
    let client = ForecastClient::new(&config).unwrap();
    let forecast = client.fetch_forecast(&TEST_ZONES[0]).await.unwrap();

    mock.assert();
    assert_eq!(forecast.days.len(), 2);
    let today = &forecast.days[0];
    // 4 m/s * 1.944
    assert!((today.wind_speed_max_kn.unwrap() - 7.776).abs() < 1e-9);
    assert_eq!(today.temperature_max_c, Some(21.0));
}

#[tokio::test]
async fn test_fetch_retry_budget_is_bounded() {
    let server = MockServer::start();
    let mut failing = server.mock(|when, then| {
        when.method(GET).path("/forecast");
        then.status(500);
    });

    let config = weather_config(&server, 2);
    let client = ForecastClient::new(&config).unwrap();

    // Every attempt hits the 500 mock until the budget is spent
    let result = client.fetch_forecast(&TEST_ZONES[0]).await;
    assert!(result.is_err());
    failing.assert_hits(3); // 1 initial + 2 retries
    failing.delete();

    let healthy = server.mock(|when, then| {
        when.method(GET).path("/forecast");
        then.status(200).json_body(forecast_payload());
    });

    let forecast = client.fetch_forecast(&TEST_ZONES[0]).await.unwrap();
    healthy.assert();
    assert_eq!(forecast.days.len(), 2);
}

#[tokio::test]
async fn test_fetch_fails_fast_on_client_error() {
    let server = MockServer::start();
    let mock = server.mock(|when, then| {
        when.method(GET).path("/forecast");
        then.status(404);
    });

    let config = weather_config(&server, 3);
    let client = ForecastClient::new(&config).unwrap();
    let result = client.fetch_forecast(&TEST_ZONES[0]).await;

    assert!(result.is_err());
    // 404 is not retryable, exactly one request
    mock.assert_hits(1);
}

#[tokio::test]
async fn test_failed_zone_is_skipped_without_affecting_others() {
    let server = MockServer::start();
    let _healthy = server.mock(|when, then| {
        when.method(GET)
            .path("/forecast")
            .query_param("latitude", "39.5");
        then.status(200).json_body(forecast_payload());
    });
    let _broken = server.mock(|when, then| {
        when.method(GET)
            .path("/forecast")
            .query_param("latitude", "39.25");
        then.status(500);
    });

    let config = app_config(&server, 0);
    let client = ForecastClient::new(&config.weather).unwrap();
    let kayak_report = kayak_forecast::generate_report(&client, &config, TEST_ZONES)
        .await
        .unwrap();

    assert_eq!(kayak_report.days.len(), 2);
    for day in &kayak_report.days {
        assert_eq!(day.ranked.len(), 1);
        assert_eq!(day.ranked[0].zone_name, "Cala Norte");
    }
    assert!(kayak_report.best.is_some());
}

#[tokio::test]
async fn test_all_zones_failing_still_produces_report() {
    let server = MockServer::start();
    let _broken = server.mock(|when, then| {
        when.method(GET).path("/forecast");
        then.status(500);
    });

    let config = app_config(&server, 0);
    let client = ForecastClient::new(&config.weather).unwrap();
    let kayak_report = kayak_forecast::generate_report(&client, &config, TEST_ZONES)
        .await
        .unwrap();

    assert!(kayak_report.days.iter().all(|d| d.ranked.is_empty()));
    assert!(kayak_report.best.is_none());

    let text = report::render(&kayak_report, config.report.top_n);
    assert!(text.contains("Sin datos de previsión para este día"));
}

#[tokio::test]
async fn test_telegram_delivery_posts_message() {
    let server = MockServer::start();
    let mock = server.mock(|when, then| {
        when.method(POST)
            .path("/bottest-token/sendMessage")
            .json_body_partial(
                r#"{"chat_id": "42", "parse_mode": "Markdown"}"#,
            );
        then.status(200).json_body(serde_json::json!({"ok": true}));
    });

    let delivery = DeliveryConfig {
        bot_token: "test-token".to_string(),
        chat_id: "42".to_string(),
        api_base: server.base_url(),
        timeout_seconds: 5,
    };

    let notifier = TelegramNotifier::new(&delivery).unwrap();
    notifier.send_report("*informe de prueba*").await.unwrap();

    mock.assert();
}

#[tokio::test]
async fn test_telegram_delivery_failure_is_an_error_not_a_panic() {
    let server = MockServer::start();
    let _mock = server.mock(|when, then| {
        when.method(POST).path_contains("/sendMessage");
        then.status(403)
            .json_body(serde_json::json!({"ok": false, "description": "bot was blocked"}));
    });

    let delivery = DeliveryConfig {
        bot_token: "test-token".to_string(),
        chat_id: "42".to_string(),
        api_base: server.base_url(),
        timeout_seconds: 5,
    };

    let notifier = TelegramNotifier::new(&delivery).unwrap();
    let result = notifier.send_report("*informe*").await;

    assert!(result.is_err());
    let message = result.unwrap_err().to_string();
    assert!(message.contains("403"), "unexpected error: {message}");
}
