//! Price comparison across platforms.

use std::collections::BTreeMap;
use std::fmt::Write as _;

use super::money;

pub const BEST_PRICE_BADGE: &str = "Best Price";

#[derive(Debug, Clone, PartialEq)]
pub struct PriceEntry {
    pub platform: String,
    pub price: f64,
    pub best: bool,
}

/// Cheapest-first comparison with savings against the most expensive
/// platform.
#[derive(Debug, Clone, PartialEq)]
pub struct PriceComparison {
    pub entries: Vec<PriceEntry>,
    pub lowest: f64,
    pub highest: f64,
    pub savings: f64,
    /// Savings relative to `highest`, 0 when `highest` is not positive.
    pub savings_percent: f64,
}

impl PriceComparison {
    /// `None` when there is nothing to compare.
    #[must_use]
    pub fn from_prices(prices: &BTreeMap<String, f64>) -> Option<Self> {
        let mut entries: Vec<PriceEntry> = prices
            .iter()
            .filter(|(_, price)| price.is_finite())
            .map(|(platform, price)| PriceEntry { platform: platform.clone(), price: *price, best: false })
            .collect();
        entries.sort_by(|a, b| a.price.total_cmp(&b.price).then_with(|| a.platform.cmp(&b.platform)));

        let lowest = entries.first()?.price;
        let highest = entries.last()?.price;
        entries[0].best = true;

        let savings = round_cents(highest - lowest);
        let savings_percent = if highest > 0.0 { round_cents(savings / highest * 100.0) } else { 0.0 };

        Some(Self { entries, lowest, highest, savings, savings_percent })
    }

    #[must_use]
    pub fn best(&self) -> &PriceEntry {
        &self.entries[0]
    }

    #[must_use]
    pub fn render(&self) -> String {
        let mut out = String::from("Price comparison:\n");
        for entry in &self.entries {
            let badge = if entry.best { format!("  [{BEST_PRICE_BADGE}]") } else { String::new() };
            let _ = writeln!(out, "  {:<14} {:>12}{badge}", entry.platform, money(entry.price));
        }
        let _ = writeln!(out, "  Lowest:  {}", money(self.lowest));
        let _ = writeln!(out, "  Highest: {}", money(self.highest));
        let _ = writeln!(out, "  Savings: {} ({:.2}%)", money(self.savings), self.savings_percent);
        out
    }
}

/// Render `price_data`, or a placeholder line when there is none.
#[must_use]
pub fn render_prices(prices: Option<&BTreeMap<String, f64>>) -> String {
    match prices.and_then(PriceComparison::from_prices) {
        Some(comparison) => comparison.render(),
        None => "Price comparison: no price data\n".to_owned(),
    }
}

fn round_cents(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

#[cfg(test)]
#[path = "price_test.rs"]
mod tests;
