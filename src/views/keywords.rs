//! Keyword cloud. Keywords arrive most significant first; weight tiers
//! shrink with rank.

use std::fmt::Write as _;

pub const MAX_WEIGHT: u8 = 5;
pub const MIN_WEIGHT: u8 = 1;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeywordEntry {
    pub word: String,
    pub rank: usize,
    pub weight: u8,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct KeywordCloud {
    pub entries: Vec<KeywordEntry>,
}

impl KeywordCloud {
    #[must_use]
    pub fn from_keywords(keywords: &[String]) -> Self {
        let len = keywords.len();
        let entries = keywords
            .iter()
            .enumerate()
            .map(|(rank, word)| KeywordEntry { word: word.clone(), rank, weight: weight_for(rank, len) })
            .collect();
        Self { entries }
    }

    #[must_use]
    pub fn render(&self) -> String {
        if self.entries.is_empty() {
            return "Keywords: no keywords extracted\n".to_owned();
        }
        let mut out = String::from("Keywords:\n");
        for entry in &self.entries {
            let _ = writeln!(
                out,
                "  {:<5} {}",
                "▇".repeat(usize::from(entry.weight)),
                entry.word
            );
        }
        out
    }
}

fn weight_for(rank: usize, len: usize) -> u8 {
    if len == 0 {
        return MIN_WEIGHT;
    }
    let drop = rank * usize::from(MAX_WEIGHT) / len;
    let weight = usize::from(MAX_WEIGHT).saturating_sub(drop);
    u8::try_from(weight).unwrap_or(MIN_WEIGHT).max(MIN_WEIGHT)
}

#[cfg(test)]
#[path = "keywords_test.rs"]
mod tests;
