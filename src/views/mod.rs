//! Terminal views over backend snapshots.
//!
//! DESIGN
//! ======
//! Each view is split in two: a view model computed from the snapshot
//! (`SentimentBreakdown`, `PriceComparison`, ...) and a `render` that turns
//! the model into a text block. Derived numbers are computed on every
//! render and never stored. The only stateful view is the analysis
//! history, which owns transient in-progress flags for its delete flows.

pub mod history;
pub mod keywords;
pub mod price;
pub mod sentiment;
pub mod summary;

pub use history::{AnalysisHistory, Confirm, DeleteOutcome, HistoryView};
pub use keywords::KeywordCloud;
pub use price::PriceComparison;
pub use sentiment::SentimentBreakdown;

const BAR_WIDTH: usize = 30;

/// Fixed-width bar filled proportionally to `percent` (0..=100).
fn bar(percent: f64) -> String {
    let clamped = percent.clamp(0.0, 100.0);
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss, clippy::cast_precision_loss)]
    let filled = ((clamped / 100.0) * BAR_WIDTH as f64).round() as usize;
    let mut out = String::with_capacity(BAR_WIDTH * 3);
    out.push_str(&"█".repeat(filled));
    out.push_str(&"░".repeat(BAR_WIDTH - filled.min(BAR_WIDTH)));
    out
}

fn money(amount: f64) -> String {
    format!("${amount:.2}")
}

/// Trim a backend timestamp (`2026-10-01T12:30:00.123456`) to minutes.
fn short_timestamp(raw: &str) -> String {
    let replaced = raw.replacen('T', " ", 1);
    replaced.chars().take(16).collect()
}

#[cfg(test)]
#[path = "mod_test.rs"]
mod tests;
