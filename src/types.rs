//! Backend data transfer records.
//!
//! Every record is an immutable snapshot of what the server sent. Nothing
//! here is cached or reconciled client-side; callers refetch after a
//! mutation.

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};

// =============================================================================
// PRODUCTS
// =============================================================================

/// A product known to the backend.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    pub id: i64,
    pub name: String,
    pub platform: String,
    pub url: String,
    /// Creation timestamp as formatted by the server.
    pub created_at: String,
}

/// Body for `POST /api/products/`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProductRequest {
    pub url: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub platform: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
}

/// One search hit. Not persisted server-side.
///
/// Fields the client does not model are kept in `extra` so the record
/// serializes back exactly as received.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SearchResult {
    pub name: String,
    pub price: f64,
    pub platform: String,
    pub url: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rating: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reviews_count: Option<u64>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

// =============================================================================
// ANALYSIS
// =============================================================================

/// Categorical sentiment summary.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SentimentLabel {
    Positive,
    Neutral,
    Negative,
    #[default]
    #[serde(other)]
    Unknown,
}

impl SentimentLabel {
    pub const POSITIVE_THRESHOLD: f64 = 0.6;
    pub const NEGATIVE_THRESHOLD: f64 = 0.4;

    /// Label for a 0..=1 score using the backend's cut-offs.
    #[must_use]
    pub fn from_score(score: f64) -> Self {
        if score >= Self::POSITIVE_THRESHOLD {
            Self::Positive
        } else if score <= Self::NEGATIVE_THRESHOLD {
            Self::Negative
        } else {
            Self::Neutral
        }
    }

    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Positive => "positive",
            Self::Neutral => "neutral",
            Self::Negative => "negative",
            Self::Unknown => "unknown",
        }
    }
}

impl fmt::Display for SentimentLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Aggregate sentiment outcome for one product.
///
/// `total_reviews` is expected to equal the sum of the three counts but the
/// client does not enforce it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisResult {
    /// Analysis id, used for deletion.
    pub id: i64,
    pub product_id: i64,
    pub product_name: String,
    /// Mean review score in `0.0..=1.0`.
    pub avg_sentiment: f64,
    #[serde(default, deserialize_with = "null_as_default")]
    pub sentiment_label: SentimentLabel,
    pub total_reviews: u64,
    pub positive_count: u64,
    pub neutral_count: u64,
    pub negative_count: u64,
    /// Most significant first.
    #[serde(default, deserialize_with = "null_as_default")]
    pub keywords: Vec<String>,
    /// Platform name to price.
    #[serde(default)]
    pub price_data: Option<BTreeMap<String, f64>>,
    pub analyzed_at: String,
}

impl AnalysisResult {
    /// Server label, or one derived from the score when the server sent
    /// something unrecognized.
    #[must_use]
    pub fn effective_label(&self) -> SentimentLabel {
        match self.sentiment_label {
            SentimentLabel::Unknown => SentimentLabel::from_score(self.avg_sentiment),
            label => label,
        }
    }
}

/// Body for `POST /api/analysis/analyze`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisRequest {
    pub product_url: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub platform: Option<String>,
}

/// Receipt for a started analysis job. The client does not poll for
/// completion.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisResponse {
    pub status: String,
    pub message: String,
    pub product_id: i64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub product_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub platform: Option<String>,
}

// =============================================================================
// REVIEWS
// =============================================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Review {
    pub id: i64,
    pub product_id: i64,
    #[serde(default)]
    pub user_name: Option<String>,
    pub rating: f64,
    #[serde(default)]
    pub text: Option<String>,
    #[serde(default)]
    pub review_date: Option<String>,
    #[serde(default)]
    pub platform: Option<String>,
    pub created_at: String,
}

/// One page of reviews plus the product's total review count.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReviewList {
    pub reviews: Vec<Review>,
    pub total: u64,
}

// =============================================================================
// ACKNOWLEDGEMENTS
// =============================================================================

/// `GET /health` body.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HealthStatus {
    pub status: String,
}

/// Acknowledgement returned by delete endpoints.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatusMessage {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

/// JSON columns on the backend may be `null`; treat that like a missing field.
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de> + Default,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

#[cfg(test)]
#[path = "types_test.rs"]
mod tests;
