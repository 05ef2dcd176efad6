use super::*;
use serde_json::json;

fn analysis_json() -> Value {
    json!({
        "id": 7,
        "product_id": 3,
        "product_name": "Noise Cancelling Headphones",
        "avg_sentiment": 0.712,
        "sentiment_label": "positive",
        "total_reviews": 20,
        "positive_count": 14,
        "negative_count": 2,
        "neutral_count": 4,
        "keywords": ["battery", "comfort", "sound"],
        "price_data": { "amazon": 199.99, "ebay": 185.5 },
        "analyzed_at": "2026-10-01T12:30:00.123456"
    })
}

// =============================================================
// SentimentLabel
// =============================================================

#[test]
fn label_from_score_uses_backend_cutoffs() {
    assert_eq!(SentimentLabel::from_score(0.6), SentimentLabel::Positive);
    assert_eq!(SentimentLabel::from_score(0.95), SentimentLabel::Positive);
    assert_eq!(SentimentLabel::from_score(0.59), SentimentLabel::Neutral);
    assert_eq!(SentimentLabel::from_score(0.41), SentimentLabel::Neutral);
    assert_eq!(SentimentLabel::from_score(0.4), SentimentLabel::Negative);
    assert_eq!(SentimentLabel::from_score(0.0), SentimentLabel::Negative);
}

#[test]
fn label_unrecognized_string_is_unknown() {
    let label: SentimentLabel = serde_json::from_value(json!("mixed")).unwrap();
    assert_eq!(label, SentimentLabel::Unknown);
}

#[test]
fn label_display_is_lowercase() {
    assert_eq!(SentimentLabel::Negative.to_string(), "negative");
}

// =============================================================
// AnalysisResult
// =============================================================

#[test]
fn analysis_result_parses_backend_shape() {
    let result: AnalysisResult = serde_json::from_value(analysis_json()).unwrap();
    assert_eq!(result.id, 7);
    assert_eq!(result.product_id, 3);
    assert_eq!(result.sentiment_label, SentimentLabel::Positive);
    assert_eq!(result.keywords, vec!["battery", "comfort", "sound"]);
    let prices = result.price_data.unwrap();
    assert!((prices["ebay"] - 185.5).abs() < f64::EPSILON);
}

#[test]
fn analysis_result_tolerates_null_json_columns() {
    let mut raw = analysis_json();
    raw["keywords"] = Value::Null;
    raw["price_data"] = Value::Null;
    raw["sentiment_label"] = Value::Null;

    let result: AnalysisResult = serde_json::from_value(raw).unwrap();
    assert!(result.keywords.is_empty());
    assert!(result.price_data.is_none());
    assert_eq!(result.sentiment_label, SentimentLabel::Unknown);
}

#[test]
fn effective_label_falls_back_to_score() {
    let mut raw = analysis_json();
    raw["sentiment_label"] = json!("");
    raw["avg_sentiment"] = json!(0.2);

    let result: AnalysisResult = serde_json::from_value(raw).unwrap();
    assert_eq!(result.effective_label(), SentimentLabel::Negative);
}

#[test]
fn effective_label_prefers_server_label() {
    let mut raw = analysis_json();
    raw["sentiment_label"] = json!("neutral");

    let result: AnalysisResult = serde_json::from_value(raw).unwrap();
    assert_eq!(result.effective_label(), SentimentLabel::Neutral);
}

// =============================================================
// Requests
// =============================================================

#[test]
fn analysis_request_omits_missing_platform() {
    let req = AnalysisRequest { product_url: "https://shop.test/p/1".into(), platform: None };
    assert_eq!(serde_json::to_value(&req).unwrap(), json!({ "product_url": "https://shop.test/p/1" }));
}

#[test]
fn analysis_request_includes_platform() {
    let req = AnalysisRequest { product_url: "u".into(), platform: Some("ebay".into()) };
    assert_eq!(serde_json::to_value(&req).unwrap(), json!({ "product_url": "u", "platform": "ebay" }));
}

#[test]
fn analysis_response_reads_receipt() {
    let resp: AnalysisResponse = serde_json::from_value(json!({
        "status": "processing",
        "message": "Analysis started",
        "product_id": 12,
        "product_url": "https://shop.test/p/12",
        "platform": "amazon"
    }))
    .unwrap();
    assert_eq!(resp.status, "processing");
    assert_eq!(resp.product_id, 12);
    assert_eq!(resp.platform.as_deref(), Some("amazon"));
}

// =============================================================
// SearchResult
// =============================================================

#[test]
fn search_result_keeps_unmodelled_fields() {
    let raw = json!({
        "name": "iPhone 16",
        "price": 999.0,
        "platform": "amazon",
        "url": "https://amazon.test/iphone",
        "rating": 4.5,
        "reviews_count": 1200,
        "image_url": "https://img.test/1.png"
    });
    let hit: SearchResult = serde_json::from_value(raw.clone()).unwrap();
    assert_eq!(hit.reviews_count, Some(1200));
    assert_eq!(hit.extra.get("image_url"), Some(&json!("https://img.test/1.png")));
    assert_eq!(serde_json::to_value(&hit).unwrap(), raw);
}

#[test]
fn search_result_optional_fields_may_be_absent() {
    let hit: SearchResult = serde_json::from_value(json!({
        "name": "Widget",
        "price": 10.0,
        "platform": "ebay",
        "url": "https://ebay.test/w"
    }))
    .unwrap();
    assert_eq!(hit.rating, None);
    assert_eq!(hit.reviews_count, None);
    assert!(hit.extra.is_empty());
}

#[test]
fn review_list_parses_page() {
    let list: ReviewList = serde_json::from_value(json!({
        "reviews": [{
            "id": 1,
            "product_id": 3,
            "user_name": "Anonymous",
            "rating": 4.0,
            "text": "Solid battery life",
            "review_date": null,
            "platform": "amazon",
            "created_at": "2026-10-01T00:00:00"
        }],
        "total": 41
    }))
    .unwrap();
    assert_eq!(list.total, 41);
    assert_eq!(list.reviews[0].user_name.as_deref(), Some("Anonymous"));
    assert_eq!(list.reviews[0].review_date, None);
}
