//! Sentiment distribution chart.

use std::fmt::Write as _;

use super::bar;
use crate::types::{AnalysisResult, SentimentLabel};

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SentimentSlice {
    pub label: SentimentLabel,
    pub count: u64,
    pub percent: f64,
}

/// Review counts per label, as shares of `total_reviews`.
#[derive(Debug, Clone, PartialEq)]
pub struct SentimentBreakdown {
    pub label: SentimentLabel,
    /// `avg_sentiment` scaled to 0..=100.
    pub score_percent: f64,
    pub total: u64,
    pub slices: [SentimentSlice; 3],
}

impl SentimentBreakdown {
    #[must_use]
    pub fn from_analysis(analysis: &AnalysisResult) -> Self {
        let total = analysis.total_reviews;
        let slice = |label, count| SentimentSlice { label, count, percent: percent_of(count, total) };
        Self {
            label: analysis.effective_label(),
            score_percent: analysis.avg_sentiment * 100.0,
            total,
            slices: [
                slice(SentimentLabel::Positive, analysis.positive_count),
                slice(SentimentLabel::Neutral, analysis.neutral_count),
                slice(SentimentLabel::Negative, analysis.negative_count),
            ],
        }
    }

    #[must_use]
    pub fn render(&self) -> String {
        let mut out = String::new();
        let _ = writeln!(
            out,
            "Sentiment: {} ({:.1}% score, {} reviews)",
            self.label, self.score_percent, self.total
        );
        for slice in &self.slices {
            let _ = writeln!(
                out,
                "  {:<8} {} {:>5.1}% ({})",
                slice.label.as_str(),
                bar(slice.percent),
                slice.percent,
                slice.count
            );
        }
        out
    }
}

#[allow(clippy::cast_precision_loss)]
fn percent_of(count: u64, total: u64) -> f64 {
    if total == 0 {
        return 0.0;
    }
    count as f64 * 100.0 / total as f64
}

#[cfg(test)]
#[path = "sentiment_test.rs"]
mod tests;
