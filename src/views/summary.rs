//! Cards and tables for single records and result lists.

use std::fmt::Write as _;

use super::keywords::KeywordCloud;
use super::price::render_prices;
use super::sentiment::SentimentBreakdown;
use super::{money, short_timestamp};
use crate::types::{AnalysisResponse, AnalysisResult, Product, ReviewList, SearchResult};

/// One-line-per-field header for an analysis.
#[must_use]
pub fn render_analysis_card(analysis: &AnalysisResult) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "{} (product #{})", analysis.product_name, analysis.product_id);
    let _ = writeln!(
        out,
        "  {} · score {:.1}% · {} reviews · analyzed {}",
        analysis.effective_label(),
        analysis.avg_sentiment * 100.0,
        analysis.total_reviews,
        short_timestamp(&analysis.analyzed_at)
    );
    out
}

/// Card, sentiment chart, keyword cloud and price comparison.
#[must_use]
pub fn render_analysis_report(analysis: &AnalysisResult) -> String {
    let mut out = render_analysis_card(analysis);
    out.push('\n');
    out.push_str(&SentimentBreakdown::from_analysis(analysis).render());
    out.push('\n');
    out.push_str(&KeywordCloud::from_keywords(&analysis.keywords).render());
    out.push('\n');
    out.push_str(&render_prices(analysis.price_data.as_ref()));
    out
}

#[must_use]
pub fn render_search_results(results: &[SearchResult]) -> String {
    if results.is_empty() {
        return "No products found.\n".to_owned();
    }
    let mut out = String::new();
    for (i, hit) in results.iter().enumerate() {
        let rating = hit.rating.map_or_else(|| "-".to_owned(), |r| format!("{r:.1}★"));
        let reviews = hit.reviews_count.map_or_else(|| "-".to_owned(), |c| c.to_string());
        let _ = writeln!(
            out,
            "{:>2}. {} [{}] {} · rating {} · {} reviews",
            i + 1,
            hit.name,
            hit.platform,
            money(hit.price),
            rating,
            reviews
        );
        let _ = writeln!(out, "    {}", hit.url);
    }
    out
}

#[must_use]
pub fn render_products(products: &[Product]) -> String {
    if products.is_empty() {
        return "No products yet.\n".to_owned();
    }
    let mut out = String::new();
    for product in products {
        let _ = writeln!(
            out,
            "#{:<5} {} [{}] added {}",
            product.id,
            product.name,
            product.platform,
            short_timestamp(&product.created_at)
        );
        let _ = writeln!(out, "       {}", product.url);
    }
    out
}

#[must_use]
pub fn render_analysis_receipt(receipt: &AnalysisResponse) -> String {
    format!(
        "{} ({}): product #{}. Fetch results later with `analysis get {}`.\n",
        receipt.message, receipt.status, receipt.product_id, receipt.product_id
    )
}

#[must_use]
pub fn render_reviews(list: &ReviewList) -> String {
    let mut out = format!("{} of {} reviews\n", list.reviews.len(), list.total);
    for review in &list.reviews {
        let author = review.user_name.as_deref().unwrap_or("Anonymous");
        let _ = writeln!(out, "  {:.1}★ {author}: {}", review.rating, review.text.as_deref().unwrap_or(""));
    }
    out
}

#[cfg(test)]
#[path = "summary_test.rs"]
mod tests;
