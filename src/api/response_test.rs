use super::*;
use crate::types::HealthStatus;
use serde_json::json;

fn raw<'a>(status: u16, status_text: Option<&'a str>, content_type: Option<&'a str>, body: &'a [u8]) -> RawResponse<'a> {
    RawResponse { status, status_text, content_type, body }
}

// ===== html guard =====

#[test]
fn html_on_success_is_misconfigured() {
    let r = raw(200, Some("OK"), Some("text/html; charset=utf-8"), b"<!doctype html><html></html>");
    let err = classify::<Value>(&r).unwrap_err();
    assert_eq!(err, ApiError::MisconfiguredServer);
}

#[test]
fn html_wins_over_error_status() {
    let body = br#"{"detail":"should not be read"}"#;
    for status in [301, 404, 500, 502] {
        let r = raw(status, Some("Whatever"), Some("TEXT/HTML"), body);
        assert_eq!(classify::<Value>(&r).unwrap_err(), ApiError::MisconfiguredServer);
    }
}

// ===== error statuses =====

#[test]
fn error_detail_is_surfaced_verbatim() {
    let body = json!({ "detail": "No analysis found for this product" }).to_string();
    let r = raw(404, Some("Not Found"), Some("application/json"), body.as_bytes());
    let err = classify::<Value>(&r).unwrap_err();
    assert_eq!(err.status(), Some(404));
    assert_eq!(err.to_string(), "No analysis found for this product");
}

#[test]
fn error_message_field_is_second_choice() {
    let body = json!({ "message": "Rate limit exceeded" }).to_string();
    let r = raw(429, Some("Too Many Requests"), Some("application/json"), body.as_bytes());
    assert_eq!(classify::<Value>(&r).unwrap_err().to_string(), "Rate limit exceeded");
}

#[test]
fn error_detail_beats_message() {
    let body = json!({ "message": "generic", "detail": "specific" }).to_string();
    assert_eq!(error_message(400, Some("Bad Request"), body.as_bytes()), "specific");
}

#[test]
fn error_null_detail_falls_through_to_message() {
    let body = json!({ "detail": null, "message": "fallback" }).to_string();
    assert_eq!(error_message(400, Some("Bad Request"), body.as_bytes()), "fallback");
}

#[test]
fn error_structured_detail_is_compact_json() {
    let body = json!({ "detail": [{ "loc": ["query", "limit"], "msg": "bad" }] }).to_string();
    let message = error_message(422, Some("Unprocessable Entity"), body.as_bytes());
    assert_eq!(message, r#"[{"loc":["query","limit"],"msg":"bad"}]"#);
}

#[test]
fn error_unparsable_body_uses_status_text() {
    let r = raw(502, Some("Bad Gateway"), Some("text/plain"), b"upstream exploded");
    assert_eq!(classify::<Value>(&r).unwrap_err().to_string(), "Bad Gateway");
}

#[test]
fn error_json_without_known_fields_uses_status_text() {
    let body = json!({ "error": "nope" }).to_string();
    assert_eq!(error_message(403, Some("Forbidden"), body.as_bytes()), "Forbidden");
}

#[test]
fn error_without_status_text_uses_generic_message() {
    assert_eq!(error_message(599, None, b""), "Request failed with status 599");
    assert_eq!(error_message(520, Some("  "), b"<<"), "Request failed with status 520");
}

// ===== success =====

#[test]
fn success_decodes_payload() {
    let r = raw(200, Some("OK"), Some("application/json"), br#"{"status":"healthy"}"#);
    let health: HealthStatus = classify(&r).unwrap();
    assert_eq!(health.status, "healthy");
}

#[test]
fn success_without_content_type_still_decodes() {
    let r = raw(201, None, None, b"[1,2,3]");
    let values: Vec<u8> = classify(&r).unwrap();
    assert_eq!(values, vec![1, 2, 3]);
}

#[test]
fn success_with_broken_json_is_malformed() {
    let r = raw(200, Some("OK"), Some("application/json"), br#"{"status":"heal"#);
    assert_eq!(classify::<Value>(&r).unwrap_err(), ApiError::MalformedPayload);
}

#[test]
fn success_with_wrong_shape_is_malformed() {
    let r = raw(200, Some("OK"), Some("application/json"), br#"{"state":"healthy"}"#);
    assert_eq!(classify::<HealthStatus>(&r).unwrap_err(), ApiError::MalformedPayload);
}

#[test]
fn success_with_empty_body_is_malformed() {
    let r = raw(204, Some("No Content"), None, b"");
    assert_eq!(classify::<Value>(&r).unwrap_err(), ApiError::MalformedPayload);
}

// ===== strategies =====

#[test]
fn message_field_order_is_detail_then_message() {
    assert_eq!(MessageField::ORDER, [MessageField::Detail, MessageField::Message]);
    assert_eq!(MessageField::Detail.key(), "detail");
    assert_eq!(MessageField::Message.key(), "message");
}

#[test]
fn message_field_ignores_non_objects() {
    assert_eq!(MessageField::Detail.extract(&json!(["detail"])), None);
    assert_eq!(MessageField::Message.extract(&json!("message")), None);
}
