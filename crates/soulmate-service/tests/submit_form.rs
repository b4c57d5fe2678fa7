//! Form intake integration tests.

mod common;

use std::time::Duration;

use axum::http::StatusCode;
use chrono::NaiveDateTime;
use common::{lead_payload, test_config, TestHarness, LEADS_SHEET};
use serde_json::Value;
use soulmate_core::CellValue;

const REQUIRED: [&str; 7] = [
    "firstName",
    "lastName",
    "email",
    "gender",
    "birthDate",
    "country",
    "city",
];

#[tokio::test]
async fn valid_lead_appends_one_row_in_column_order() {
    let harness = TestHarness::new();

    let response = harness
        .server
        .post("/api/submit-form")
        .json(&lead_payload())
        .await;

    response.assert_status_ok();
    let body: Value = response.json();
    assert_eq!(body["success"], true);

    let rows = harness.sheets.rows();
    assert_eq!(rows.len(), 1);
    let row = &rows[0];
    assert_eq!(row.sheet_id, LEADS_SHEET);
    assert_eq!(row.tab, "Sheet1");
    assert_eq!(row.values.len(), 10);

    assert!(NaiveDateTime::parse_from_str(row.text(0), "%d/%m/%Y %H:%M:%S").is_ok());
    assert_eq!(
        &row.values[1..],
        &[
            CellValue::from("Ada"),
            CellValue::from("Lovelace"),
            CellValue::from("male"),
            CellValue::from("Sagittarius"),
            CellValue::from("1815-12-10"),
            CellValue::from("Single"),
            CellValue::from("London"),
            CellValue::from("ada@example.com"),
            CellValue::from("LEAD"),
        ]
    );
}

#[tokio::test]
async fn each_missing_field_is_reported_alone() {
    for field in REQUIRED {
        let harness = TestHarness::new();
        let mut payload = lead_payload();
        payload.as_object_mut().unwrap().remove(field);

        let response = harness.server.post("/api/submit-form").json(&payload).await;

        response.assert_status(StatusCode::BAD_REQUEST);
        let body: Value = response.json();
        assert_eq!(body["success"], false);
        assert_eq!(body["missingFields"], serde_json::json!([field]), "field {field}");
        assert_eq!(
            body["message"],
            format!("Missing required fields: {field}")
        );
        assert!(harness.sheets.rows().is_empty());
    }
}

#[tokio::test]
async fn empty_strings_count_as_missing() {
    let harness = TestHarness::new();
    let mut payload = lead_payload();
    payload["email"] = "".into();
    payload["city"] = "".into();

    let response = harness.server.post("/api/submit-form").json(&payload).await;

    response.assert_status(StatusCode::BAD_REQUEST);
    let body: Value = response.json();
    assert_eq!(body["missingFields"], serde_json::json!(["email", "city"]));
}

#[tokio::test]
async fn empty_object_lists_every_required_field() {
    let harness = TestHarness::new();

    let response = harness
        .server
        .post("/api/submit-form")
        .json(&serde_json::json!({}))
        .await;

    response.assert_status(StatusCode::BAD_REQUEST);
    let body: Value = response.json();
    assert_eq!(body["missingFields"], serde_json::json!(REQUIRED));
}

#[tokio::test]
async fn zodiac_sign_is_optional() {
    let harness = TestHarness::new();
    let mut payload = lead_payload();
    payload.as_object_mut().unwrap().remove("zodiacSign");

    harness
        .server
        .post("/api/submit-form")
        .json(&payload)
        .await
        .assert_status_ok();

    assert_eq!(harness.sheets.rows()[0].text(4), "");
}

#[tokio::test]
async fn sentinel_birth_date_is_rejected() {
    let harness = TestHarness::new();
    let mut payload = lead_payload();
    payload["birthDate"] = "-00-00".into();

    let response = harness.server.post("/api/submit-form").json(&payload).await;

    response.assert_status(StatusCode::BAD_REQUEST);
    let body: Value = response.json();
    assert_eq!(body["message"], "Invalid birth date");
    assert!(harness.sheets.rows().is_empty());
}

#[tokio::test]
async fn non_json_body_is_rejected() {
    let harness = TestHarness::new();

    let response = harness
        .server
        .post("/api/submit-form")
        .text("firstName=Ada")
        .await;

    response.assert_status(StatusCode::BAD_REQUEST);
    let body: Value = response.json();
    assert_eq!(body["success"], false);
    assert_eq!(body["message"], "No data received");
}

#[tokio::test]
async fn spreadsheet_failure_is_internal_error_with_message() {
    let harness = TestHarness::new();
    harness.sheets.fail_with("The caller does not have permission");

    let response = harness
        .server
        .post("/api/submit-form")
        .json(&lead_payload())
        .await;

    response.assert_status(StatusCode::INTERNAL_SERVER_ERROR);
    let body: Value = response.json();
    assert_eq!(body["success"], false);
    assert!(body["message"]
        .as_str()
        .unwrap()
        .contains("The caller does not have permission"));
}

#[tokio::test]
async fn duplicate_submissions_append_duplicate_rows() {
    let harness = TestHarness::new();

    for _ in 0..2 {
        harness
            .server
            .post("/api/submit-form")
            .json(&lead_payload())
            .await
            .assert_status_ok();
    }

    assert_eq!(harness.sheets.rows_for(LEADS_SHEET).len(), 2);
}

#[tokio::test]
async fn unconfigured_sheets_is_internal_error() {
    let server = TestHarness::unconfigured();

    let response = server.post("/api/submit-form").json(&lead_payload()).await;

    response.assert_status(StatusCode::INTERNAL_SERVER_ERROR);
    let body: Value = response.json();
    assert_eq!(body["success"], false);
}

#[tokio::test]
async fn slow_spreadsheet_times_out_with_envelope() {
    let mut config = test_config();
    config.request_timeout_seconds = 1;
    let harness = TestHarness::with_config(config);
    harness.sheets.respond_after(Duration::from_secs(3));

    let response = harness
        .server
        .post("/api/submit-form")
        .json(&lead_payload())
        .await;

    response.assert_status(StatusCode::REQUEST_TIMEOUT);
    let body: Value = response.json();
    assert_eq!(body["success"], false);
    assert_eq!(body["message"], "Request timed out");
    assert!(harness.sheets.rows().is_empty());
}
