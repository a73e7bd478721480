mod common;
use common::{app_for, entry_json};

use clockodo_mcp::utils::format::format_timestamp;
use serde_json::json;
use wiremock::matchers::{body_json, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

#[tokio::test]
async fn idle_clock_reports_nothing_running() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/v2/clock"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"running": null})))
        .mount(&server)
        .await;

    let text = app_for(&server)
        .tool_executor
        .execute("clockodo_get_clock", json!({}))
        .await
        .expect("clock");
    assert_eq!(text, "No stopwatch is running.");
}

#[tokio::test]
async fn start_then_stop_keeps_the_start_time() {
    let server = MockServer::start().await;
    let started_at = "2024-03-15T08:00:00Z";

    Mock::given(method("POST"))
        .and(path("/v2/clock"))
        .and(body_json(
            json!({"customers_id": 10, "services_id": 20, "billable": 1, "text": "Planning"}),
        ))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "running": entry_json(55, started_at, None, None)
        })))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("DELETE"))
        .and(path("/v2/clock/55"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "stopped": entry_json(55, started_at, Some("2024-03-15T08:02:00Z"), Some(120)),
            "running": null
        })))
        .expect(1)
        .mount(&server)
        .await;

    let app = app_for(&server);
    let started = app
        .tool_executor
        .execute(
            "clockodo_start_clock",
            json!({"customers_id": 10, "services_id": 20, "text": "Planning"}),
        )
        .await
        .expect("start");
    let start_label = format_timestamp(Some(started_at));
    assert!(started.starts_with("Stopwatch started (ID: 55):"));
    assert!(started.contains(&format!("Started: {}", start_label)));

    let stopped = app
        .tool_executor
        .execute("clockodo_stop_clock", json!({"entry_id": 55}))
        .await
        .expect("stop");
    assert!(stopped.starts_with("Stopwatch stopped (ID: 55):"));
    assert!(stopped.contains(&format!("Time: {} - ", start_label)));
    assert!(stopped.contains("Duration: 0h 02min"));
    assert!(!stopped.contains("Still running"));
}

#[tokio::test]
async fn stop_mentions_entry_that_keeps_running() {
    let server = MockServer::start().await;
    Mock::given(method("DELETE"))
        .and(path("/v2/clock/1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "stopped": entry_json(1, "2024-03-15T08:00:00Z", Some("2024-03-15T09:00:00Z"), Some(3600)),
            "running": entry_json(2, "2024-03-15T08:30:00Z", None, None)
        })))
        .mount(&server)
        .await;

    let text = app_for(&server)
        .tool_executor
        .execute("clockodo_stop_clock", json!({"entry_id": 1}))
        .await
        .expect("stop");
    assert!(text.contains(&format!(
        "Still running: ID 2 (since {})",
        format_timestamp(Some("2024-03-15T08:30:00Z"))
    )));
}

#[tokio::test]
async fn start_with_billable_false_sends_zero() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/v2/clock"))
        .and(body_json(json!({"customers_id": 1, "services_id": 2, "projects_id": 3, "billable": 0})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "running": entry_json(8, "2024-03-15T08:00:00Z", None, None)
        })))
        .expect(1)
        .mount(&server)
        .await;

    app_for(&server)
        .tool_executor
        .execute(
            "clockodo_start_clock",
            json!({"customers_id": 1, "services_id": 2, "projects_id": 3, "billable": false}),
        )
        .await
        .expect("start");
}

#[tokio::test]
async fn start_without_billable_sends_one() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/v2/clock"))
        .and(body_json(json!({"customers_id": 1, "services_id": 2, "billable": 1})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "running": entry_json(9, "2024-03-15T08:00:00Z", None, None)
        })))
        .expect(1)
        .mount(&server)
        .await;

    app_for(&server)
        .tool_executor
        .execute("clockodo_start_clock", json!({"customers_id": 1, "services_id": 2}))
        .await
        .expect("start");
}
