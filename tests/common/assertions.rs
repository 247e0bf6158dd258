//! Assertion helpers for tests.

use axum::http::StatusCode;
use pretty_assertions::assert_eq;

use super::app::TestResponse;

/// Assert response has expected status code
pub fn assert_status(response: &TestResponse, expected: StatusCode) {
    assert_eq!(
        response.status,
        expected,
        "Expected status {}, got {}. Body: {}",
        expected,
        response.status,
        response.text()
    );
}

/// Assert response is OK (200)
pub fn assert_ok(response: &TestResponse) {
    assert_status(response, StatusCode::OK);
}

/// Assert an error response with the JSON `{status, error}` body
pub fn assert_json_error(response: &TestResponse, expected: StatusCode) {
    assert_status(response, expected);
    let json: serde_json::Value = response.json();
    assert_eq!(json["status"].as_u64(), Some(expected.as_u16() as u64));
    assert!(
        json["error"].as_str().is_some_and(|e| !e.is_empty()),
        "Expected an error message, got {json}"
    );
}

/// Assert a grid JSON value is `height` rows of `width` values in 0..=6
pub fn assert_valid_grid(grid: &serde_json::Value, width: usize, height: usize) {
    let rows = grid.as_array().expect("grid should be an array of rows");
    assert_eq!(rows.len(), height, "row count");
    for (i, row) in rows.iter().enumerate() {
        let row = row.as_array().expect("row should be an array");
        assert_eq!(row.len(), width, "width of row {i}");
        for v in row {
            let v = v.as_u64().expect("cell should be a number");
            assert!(v <= 6, "cell value {v} out of range in row {i}");
        }
    }
}

/// Assert counts are keyed "0".."6" and sum to `total`
pub fn assert_counts_sum(json: &serde_json::Value, total: u64) {
    let counts = json["counts"].as_object().expect("counts object");
    assert_eq!(counts.len(), 7);
    let sum: u64 = (0..7)
        .map(|k| counts[&k.to_string()].as_u64().expect("count"))
        .sum();
    assert_eq!(sum, total);
    assert_eq!(json["total"].as_u64(), Some(total));
}
