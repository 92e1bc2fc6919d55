use httpmock::MockServer;
use httpmock::prelude::*;
use pond_net::error::NetError;
use pond_net::{HttpDevice, SheetSource};
use pond_traits::SensorSource;
use std::time::Duration;

const TIMEOUT: Duration = Duration::from_secs(2);

#[test]
fn device_push_sends_settings_as_query_params() {
    let server = MockServer::start();
    let mock = server.mock(|when, then| {
        when.method(GET)
            .path("/update")
            .query_param("temp_lower", "25")
            .query_param("temp_upper", "30")
            .query_param("humidity_lower", "40")
            .query_param("humidity_upper", "80")
            .query_param("notif_active", "1");
        then.status(200).body("OK");
    });

    HttpDevice::push_blocking(
        &server.url("/update"),
        "temp_lower=25&temp_upper=30&humidity_lower=40&humidity_upper=80&notif_active=1",
        TIMEOUT,
    )
    .unwrap();

    mock.assert();
}

#[test]
fn device_push_reports_http_status_errors() {
    let server = MockServer::start();
    server.mock(|when, then| {
        when.method(GET).path("/update");
        then.status(503);
    });

    let err = HttpDevice::push_blocking(&server.url("/update"), "notif_active=1", TIMEOUT)
        .unwrap_err();
    assert!(matches!(err, NetError::Status(503)));
}

#[test]
fn fire_and_forget_push_returns_before_the_request_completes() {
    use pond_traits::DeviceLink;

    let server = MockServer::start();
    let mock = server.mock(|when, then| {
        when.method(GET).path("/update");
        then.status(200).delay(Duration::from_millis(200));
    });

    let mut device = HttpDevice::new(server.url("/update"), TIMEOUT);
    let start = std::time::Instant::now();
    device.push("notif_active=0").unwrap();
    assert!(start.elapsed() < Duration::from_millis(100));

    // The detached request still lands.
    for _ in 0..50 {
        if mock.hits() > 0 {
            return;
        }
        std::thread::sleep(Duration::from_millis(50));
    }
    panic!("detached push never reached the server");
}

#[test]
fn sheet_source_parses_latest_row() {
    let server = MockServer::start();
    server.mock(|when, then| {
        when.method(POST)
            .path("/sheet")
            .form_urlencoded_tuple("action", "getLatest");
        then.status(200).json_body(serde_json::json!({
            "temperature": 26.5,
            "humidity": "61",
            "date": "2026-08-29",
            "time": "10:15"
        }));
    });

    let mut source = SheetSource::new(server.url("/sheet"));
    let reading = source.fetch_latest(TIMEOUT).unwrap();
    assert_eq!(reading.temperature, 26.5);
    assert_eq!(reading.humidity, 61.0);
    assert_eq!(reading.observed_at, "2026-08-29 10:15");
}

#[test]
fn sheet_source_surfaces_endpoint_errors() {
    let server = MockServer::start();
    server.mock(|when, then| {
        when.method(POST).path("/sheet");
        then.status(200)
            .json_body(serde_json::json!({ "error": "no data rows" }));
    });

    let mut source = SheetSource::new(server.url("/sheet"));
    let err = source.fetch_latest(TIMEOUT).unwrap_err();
    assert!(err.to_string().contains("no data rows"));
}

#[test]
fn sheet_source_rejects_malformed_rows() {
    let server = MockServer::start();
    server.mock(|when, then| {
        when.method(POST).path("/sheet");
        then.status(200)
            .json_body(serde_json::json!({ "temperature": "warm", "humidity": 60 }));
    });

    let mut source = SheetSource::new(server.url("/sheet"));
    let err = source.fetch_latest(TIMEOUT).unwrap_err();
    assert!(err.to_string().contains("not a number"));
}
