mod common;
use common::{app_for, entry_json, mcp_for, API_KEY, API_USER};

use chrono::NaiveTime;
use clockodo_mcp::utils::timestamps::{combine_local, parse_date, today_local, DayRange};
use serde_json::json;
use std::collections::HashSet;
use wiremock::matchers::{body_json, header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn local_ts(date: &str, time: (u32, u32)) -> String {
    combine_local(
        parse_date(date, "date").unwrap(),
        NaiveTime::from_hms_opt(time.0, time.1, 0).unwrap(),
    )
    .unwrap()
}

#[tokio::test]
async fn list_entries_for_an_empty_day_names_today() {
    let server = MockServer::start().await;
    let range = DayRange::resolve(None, None, today_local()).unwrap();
    let (since, until) = range.bounds_local().unwrap();

    Mock::given(method("GET"))
        .and(path("/v2/entries"))
        .and(query_param("time_since", since.as_str()))
        .and(query_param("time_until", until.as_str()))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!({"paging": {}, "entries": []})),
        )
        .expect(1)
        .mount(&server)
        .await;

    let text = app_for(&server)
        .tool_executor
        .execute("clockodo_list_entries", json!({}))
        .await
        .expect("list");
    let today = range.label_from();
    assert_eq!(
        text,
        format!("No time entries found for {} to {}.", today, today)
    );
}

#[tokio::test]
async fn list_entries_query_never_carries_absent_filters() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/v2/entries"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "paging": {"count_pages": 1},
            "entries": [entry_json(
                7,
                "2024-03-15T08:00:00Z",
                Some("2024-03-15T09:30:00Z"),
                Some(5400)
            )]
        })))
        .mount(&server)
        .await;

    let text = app_for(&server)
        .tool_executor
        .execute(
            "clockodo_list_entries",
            json!({"date_from": "2024-03-15", "date_to": "2024-03-15", "customers_id": 10}),
        )
        .await
        .expect("list");
    assert!(text.starts_with("Time entries (2024-03-15 to 2024-03-15):"));
    assert!(text.contains("ID 7 | "));
    assert!(text.contains("| 1h 30min"));
    assert!(text.contains("Customer: ACME | Project: - | Service: Consulting | User: Jo"));
    assert!(text.contains("Text: Planning | Billable: yes"));

    let requests = server.received_requests().await.expect("recording enabled");
    assert_eq!(requests.len(), 1);
    let keys: HashSet<String> = requests[0]
        .url
        .query_pairs()
        .map(|(k, _)| k.into_owned())
        .collect();
    let expected: HashSet<String> = ["time_since", "time_until", "customers_id"]
        .iter()
        .map(|s| s.to_string())
        .collect();
    assert_eq!(keys, expected);
    assert!(requests[0].url.query_pairs().all(|(_, v)| !v.is_empty()));
}

#[tokio::test]
async fn inverted_range_fails_before_any_request() {
    let server = MockServer::start().await;
    let err = app_for(&server)
        .tool_executor
        .execute(
            "clockodo_list_entries",
            json!({"date_from": "2024-03-20", "date_to": "2024-03-01"}),
        )
        .await
        .unwrap_err();
    assert!(err.message.contains("must not be after"));
    let requests = server.received_requests().await.expect("recording enabled");
    assert!(requests.is_empty());
}

#[tokio::test]
async fn every_request_carries_authentication_headers() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/v2/customers"))
        .and(header("X-ClockodoApiUser", API_USER))
        .and(header("X-ClockodoApiKey", API_KEY))
        .and(header(
            "X-Clockodo-External-Application",
            format!("clockodo-mcp;{}", API_USER).as_str(),
        ))
        .and(header("content-type", "application/json"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"customers": []})))
        .expect(1)
        .mount(&server)
        .await;

    app_for(&server)
        .tool_executor
        .execute("clockodo_list_customers", json!({}))
        .await
        .expect("customers");
}

#[tokio::test]
async fn create_entry_sends_utc_times_and_default_billable() {
    let server = MockServer::start().await;
    let since = local_ts("2024-03-15", (9, 0));
    let until = local_ts("2024-03-15", (10, 30));

    Mock::given(method("POST"))
        .and(path("/v2/entries"))
        .and(body_json(json!({
            "customers_id": 10,
            "services_id": 20,
            "billable": 1,
            "time_since": since,
            "time_until": until,
            "text": "Planning"
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "entry": entry_json(99, &since, Some(until.as_str()), Some(5400))
        })))
        .expect(1)
        .mount(&server)
        .await;

    let text = app_for(&server)
        .tool_executor
        .execute(
            "clockodo_create_entry",
            json!({
                "customers_id": 10,
                "services_id": 20,
                "date": "2024-03-15",
                "time_from": "09:00",
                "time_until": "10:30",
                "text": "Planning"
            }),
        )
        .await
        .expect("create");
    assert!(text.starts_with("Time entry created (ID: 99):"));
    assert!(text.contains("Customer: ACME"));
    assert!(text.contains("Service: Consulting"));
}

#[tokio::test]
async fn edit_entry_sends_only_supplied_fields() {
    let server = MockServer::start().await;
    Mock::given(method("PUT"))
        .and(path("/v2/entries/5"))
        .and(body_json(json!({"text": "Review", "billable": 0})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "entry": entry_json(5, "2024-03-15T08:00:00Z", Some("2024-03-15T09:00:00Z"), Some(3600))
        })))
        .expect(1)
        .mount(&server)
        .await;

    let text = app_for(&server)
        .tool_executor
        .execute(
            "clockodo_edit_entry",
            json!({"entry_id": 5, "text": "Review", "billable": false}),
        )
        .await
        .expect("edit");
    assert!(text.starts_with("Time entry 5 updated:"));
}

#[tokio::test]
async fn edit_with_date_and_start_only_sends_time_since() {
    let server = MockServer::start().await;
    let since = local_ts("2024-03-16", (8, 15));
    Mock::given(method("PUT"))
        .and(path("/v2/entries/5"))
        .and(body_json(json!({"time_since": since})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "entry": entry_json(5, &since, Some("2024-03-16T12:00:00Z"), Some(3600))
        })))
        .expect(1)
        .mount(&server)
        .await;

    app_for(&server)
        .tool_executor
        .execute(
            "clockodo_edit_entry",
            json!({"entry_id": 5, "date": "2024-03-16", "time_from": "08:15"}),
        )
        .await
        .expect("edit");
}

#[tokio::test]
async fn delete_confirms_removal() {
    let server = MockServer::start().await;
    Mock::given(method("DELETE"))
        .and(path("/v2/entries/12"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"success": true})))
        .expect(1)
        .mount(&server)
        .await;

    let text = app_for(&server)
        .tool_executor
        .execute("clockodo_delete_entry", json!({"entry_id": 12}))
        .await
        .expect("delete");
    assert_eq!(text, "Time entry 12 deleted.");
}

#[tokio::test]
async fn delete_of_missing_entry_carries_404() {
    let server = MockServer::start().await;
    Mock::given(method("DELETE"))
        .and(path("/v2/entries/404"))
        .respond_with(ResponseTemplate::new(404).set_body_string(r#"{"error":{"message":"Entry not found"}}"#))
        .mount(&server)
        .await;

    let err = app_for(&server)
        .tool_executor
        .execute("clockodo_delete_entry", json!({"entry_id": 404}))
        .await
        .unwrap_err();
    assert_eq!(err.status(), Some(404));
    assert!(err.message.contains("Clockodo API error 404"));
    assert!(err.message.contains("Entry not found"));

    let result = mcp_for(&server)
        .handle_tools_call("clockodo_delete_entry", json!({"entry_id": 404}))
        .await
        .expect("in-band error");
    assert_eq!(result["isError"], true);
    assert!(common::call_text(&result).contains("404"));
}

#[tokio::test]
async fn unconfirmed_delete_is_a_failure() {
    let server = MockServer::start().await;
    Mock::given(method("DELETE"))
        .and(path("/v2/entries/3"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"success": false})))
        .mount(&server)
        .await;

    let err = app_for(&server)
        .tool_executor
        .execute("clockodo_delete_entry", json!({"entry_id": 3}))
        .await
        .unwrap_err();
    assert!(err.message.contains("did not confirm"));
}
