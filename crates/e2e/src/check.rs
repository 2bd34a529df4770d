//! Assertion layer
//!
//! Structural checks (key presence, type, enum membership) and value
//! checks (field equality, monetary tolerance) over loose JSON responses.
//! Every failure names the step it happened in.

use reqwest::StatusCode;
use serde_json::Value;
use studioflow_common::money;
use studioflow_common::types::SearchModule;

use crate::error::{E2eError, E2eResult};
use crate::http::ApiResponse;

/// Substrings accepted in a booking-conflict error message.
pub const CONFLICT_KEYWORDS: &[&str] = &["conflict", "overlap", "double booking"];

/// Statuses accepted for a rejected login.
pub const AUTH_FAILURE_STATUSES: &[StatusCode] =
    &[StatusCode::UNAUTHORIZED, StatusCode::BAD_REQUEST];

/// Statuses accepted for a validation/conflict rejection.
pub const CONFLICT_STATUSES: &[StatusCode] = &[StatusCode::BAD_REQUEST, StatusCode::CONFLICT];

pub fn expect_status(response: &ApiResponse, expected: StatusCode, context: &str) -> E2eResult<()> {
    if response.status == expected {
        Ok(())
    } else {
        Err(unexpected_status(response, expected.to_string(), context))
    }
}

pub fn expect_status_in(
    response: &ApiResponse,
    allowed: &[StatusCode],
    context: &str,
) -> E2eResult<()> {
    if allowed.contains(&response.status) {
        Ok(())
    } else {
        let expected = allowed
            .iter()
            .map(|status| status.as_u16().to_string())
            .collect::<Vec<_>>()
            .join(" or ");
        Err(unexpected_status(response, expected, context))
    }
}

pub fn created(response: &ApiResponse, context: &str) -> E2eResult<()> {
    expect_status(response, StatusCode::CREATED, context)
}

pub fn ok(response: &ApiResponse, context: &str) -> E2eResult<()> {
    expect_status(response, StatusCode::OK, context)
}

pub fn no_content(response: &ApiResponse, context: &str) -> E2eResult<()> {
    expect_status(response, StatusCode::NO_CONTENT, context)
}

pub fn not_found(response: &ApiResponse, context: &str) -> E2eResult<()> {
    expect_status(response, StatusCode::NOT_FOUND, context)
}

fn unexpected_status(response: &ApiResponse, expected: String, context: &str) -> E2eError {
    E2eError::UnexpectedStatus {
        context: context.to_string(),
        expected,
        actual: response.status,
        body: response.body.to_string(),
    }
}

// ---------------------------------------------------------------------------
// Field extraction
// ---------------------------------------------------------------------------

pub fn require_field<'a>(value: &'a Value, field: &str, context: &str) -> E2eResult<&'a Value> {
    value.get(field).ok_or_else(|| E2eError::MissingField {
        context: context.to_string(),
        field: field.to_string(),
    })
}

pub fn require_str<'a>(value: &'a Value, field: &str, context: &str) -> E2eResult<&'a str> {
    require_field(value, field, context)?
        .as_str()
        .ok_or_else(|| wrong_type(context, field, "a string"))
}

pub fn require_f64(value: &Value, field: &str, context: &str) -> E2eResult<f64> {
    require_field(value, field, context)?
        .as_f64()
        .ok_or_else(|| wrong_type(context, field, "a number"))
}

pub fn require_bool(value: &Value, field: &str, context: &str) -> E2eResult<bool> {
    require_field(value, field, context)?
        .as_bool()
        .ok_or_else(|| wrong_type(context, field, "a boolean"))
}

pub fn require_array<'a>(value: &'a Value, field: &str, context: &str) -> E2eResult<&'a Vec<Value>> {
    require_field(value, field, context)?
        .as_array()
        .ok_or_else(|| wrong_type(context, field, "an array"))
}

pub fn require_object<'a>(
    value: &'a Value,
    field: &str,
    context: &str,
) -> E2eResult<&'a serde_json::Map<String, Value>> {
    require_field(value, field, context)?
        .as_object()
        .ok_or_else(|| wrong_type(context, field, "an object"))
}

/// Extract `id`, normalizing both string and integer server conventions.
pub fn require_id(value: &Value, context: &str) -> E2eResult<String> {
    let id = require_field(value, "id", context)?;
    match id {
        Value::String(s) if !s.is_empty() => Ok(s.clone()),
        Value::Number(n) => Ok(n.to_string()),
        _ => Err(wrong_type(context, "id", "a string or number")),
    }
}

/// Whether an id-bearing field of `entry` equals a normalized id,
/// accepting both string and numeric formatting.
pub fn id_field_matches(entry: &Value, field: &str, expected: &str) -> bool {
    match entry.get(field) {
        Some(Value::String(s)) => s == expected,
        Some(Value::Number(n)) => n.to_string() == expected,
        _ => false,
    }
}

/// Assert an id-bearing field equals a normalized id.
pub fn expect_id_eq(value: &Value, field: &str, expected: &str, context: &str) -> E2eResult<()> {
    require_field(value, field, context)?;
    if id_field_matches(value, field, expected) {
        Ok(())
    } else {
        Err(E2eError::Assertion(format!(
            "{context}: `{field}` does not reference id {expected:?}"
        )))
    }
}

fn wrong_type(context: &str, field: &str, expected: &'static str) -> E2eError {
    E2eError::WrongType {
        context: context.to_string(),
        field: field.to_string(),
        expected,
    }
}

// ---------------------------------------------------------------------------
// Value checks
// ---------------------------------------------------------------------------

pub fn expect_str_eq(value: &Value, field: &str, expected: &str, context: &str) -> E2eResult<()> {
    let actual = require_str(value, field, context)?;
    if actual == expected {
        Ok(())
    } else {
        Err(E2eError::Assertion(format!(
            "{context}: `{field}` is {actual:?}, expected {expected:?}"
        )))
    }
}

/// Monetary comparison within the shared 0.01 tolerance.
pub fn expect_f64_near(actual: f64, expected: f64, context: &str) -> E2eResult<()> {
    if money::approx_eq(actual, expected) {
        Ok(())
    } else {
        Err(E2eError::Assertion(format!(
            "{context}: {actual} differs from {expected} by more than {}",
            money::MONEY_TOLERANCE
        )))
    }
}

/// Best-effort extraction of the server's error message (`error` or
/// `message` key).
pub fn error_message(body: &Value) -> String {
    body.get("error")
        .or_else(|| body.get("message"))
        .and_then(Value::as_str)
        .unwrap_or_default()
        .to_string()
}

/// A rejected booking: 400 or 409 with a recognizable conflict keyword.
pub fn expect_conflict(response: &ApiResponse, context: &str) -> E2eResult<()> {
    expect_status_in(response, CONFLICT_STATUSES, context)?;
    let message = error_message(&response.body).to_lowercase();
    if CONFLICT_KEYWORDS.iter().any(|kw| message.contains(kw)) {
        Ok(())
    } else {
        Err(E2eError::Assertion(format!(
            "{context}: error message {message:?} carries no conflict keyword"
        )))
    }
}

/// Parse a server-side timestamp, accepting any RFC 3339 offset.
pub fn parse_instant(text: &str, context: &str) -> E2eResult<chrono::DateTime<chrono::Utc>> {
    chrono::DateTime::parse_from_rfc3339(text)
        .map(|dt| dt.with_timezone(&chrono::Utc))
        .map_err(|_| {
            E2eError::Assertion(format!("{context}: {text:?} is not an RFC 3339 instant"))
        })
}

/// A search result's `module` must be one of the known categories.
pub fn expect_module(value: &Value, context: &str) -> E2eResult<SearchModule> {
    let module = require_str(value, "module", context)?;
    module.parse::<SearchModule>().map_err(|_| {
        E2eError::Assertion(format!("{context}: unknown search module {module:?}"))
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn response(status: u16, body: Value) -> ApiResponse {
        ApiResponse {
            status: StatusCode::from_u16(status).unwrap(),
            body,
        }
    }

    #[test]
    fn status_mismatch_reports_expected_and_actual() {
        let resp = response(404, json!({"error": "gone"}));
        let err = ok(&resp, "get client").unwrap_err();
        let text = err.to_string();
        assert!(text.contains("get client"), "context missing: {text}");
        assert!(text.contains("404"), "actual status missing: {text}");
    }

    #[test]
    fn status_sets_accept_any_member() {
        let resp = response(409, json!({}));
        assert!(expect_status_in(&resp, CONFLICT_STATUSES, "booking").is_ok());
        let resp = response(500, json!({}));
        assert!(expect_status_in(&resp, CONFLICT_STATUSES, "booking").is_err());
    }

    #[test]
    fn id_normalizes_strings_and_numbers() {
        assert_eq!(require_id(&json!({"id": "abc"}), "t").unwrap(), "abc");
        assert_eq!(require_id(&json!({"id": 42}), "t").unwrap(), "42");
        assert!(require_id(&json!({"id": true}), "t").is_err());
        assert!(require_id(&json!({}), "t").is_err());
    }

    #[test]
    fn id_comparison_spans_formatting_conventions() {
        assert!(id_field_matches(&json!({"client_id": "7"}), "client_id", "7"));
        assert!(id_field_matches(&json!({"client_id": 7}), "client_id", "7"));
        assert!(!id_field_matches(&json!({"client_id": 8}), "client_id", "7"));
        assert!(expect_id_eq(&json!({"client_id": 7}), "client_id", "7", "t").is_ok());
        assert!(matches!(
            expect_id_eq(&json!({}), "client_id", "7", "t").unwrap_err(),
            E2eError::MissingField { .. }
        ));
    }

    #[test]
    fn missing_and_mistyped_fields_are_distinguished() {
        let body = json!({"name": 7});
        assert!(matches!(
            require_str(&body, "email", "t").unwrap_err(),
            E2eError::MissingField { .. }
        ));
        assert!(matches!(
            require_str(&body, "name", "t").unwrap_err(),
            E2eError::WrongType { .. }
        ));
    }

    #[test]
    fn conflict_accepts_either_message_key_and_any_keyword() {
        let resp = response(409, json!({"error": "Booking OVERLAP detected"}));
        assert!(expect_conflict(&resp, "booking").is_ok());
        let resp = response(400, json!({"message": "double booking for SN-1"}));
        assert!(expect_conflict(&resp, "booking").is_ok());
        let resp = response(400, json!({"message": "invalid payload"}));
        assert!(expect_conflict(&resp, "booking").is_err());
        let resp = response(201, json!({"id": "b-1"}));
        assert!(expect_conflict(&resp, "booking").is_err());
    }

    #[test]
    fn money_tolerance_is_a_hundredth() {
        assert!(expect_f64_near(7500.0, 7500.009, "total").is_ok());
        assert!(expect_f64_near(7500.0, 7500.02, "total").is_err());
    }

    #[test]
    fn module_membership_is_enforced() {
        assert_eq!(
            expect_module(&json!({"module": "clients"}), "search").unwrap(),
            SearchModule::Clients
        );
        assert!(expect_module(&json!({"module": "billing"}), "search").is_err());
    }
}
