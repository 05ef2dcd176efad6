use super::*;

fn analysis(positive: u64, neutral: u64, negative: u64, total: u64) -> AnalysisResult {
    AnalysisResult {
        id: 1,
        product_id: 1,
        product_name: "Kettle".into(),
        avg_sentiment: 0.65,
        sentiment_label: SentimentLabel::Positive,
        total_reviews: total,
        positive_count: positive,
        neutral_count: neutral,
        negative_count: negative,
        keywords: Vec::new(),
        price_data: None,
        analyzed_at: "2026-10-01T00:00:00".into(),
    }
}

#[test]
fn percentages_are_shares_of_total() {
    let view = SentimentBreakdown::from_analysis(&analysis(14, 4, 2, 20));
    let percents: Vec<f64> = view.slices.iter().map(|s| s.percent).collect();
    assert_eq!(percents, vec![70.0, 20.0, 10.0]);
    assert_eq!(view.slices[0].label, SentimentLabel::Positive);
    assert_eq!(view.slices[2].count, 2);
}

#[test]
fn zero_total_yields_zero_percent() {
    let view = SentimentBreakdown::from_analysis(&analysis(0, 0, 0, 0));
    assert!(view.slices.iter().all(|s| s.percent == 0.0));
}

#[test]
fn score_is_scaled_to_percent() {
    let view = SentimentBreakdown::from_analysis(&analysis(1, 0, 0, 1));
    assert!((view.score_percent - 65.0).abs() < 1e-9);
}

#[test]
fn unknown_label_is_derived_from_score() {
    let mut a = analysis(0, 1, 0, 1);
    a.sentiment_label = SentimentLabel::Unknown;
    a.avg_sentiment = 0.5;
    assert_eq!(SentimentBreakdown::from_analysis(&a).label, SentimentLabel::Neutral);
}

#[test]
fn render_lists_each_label() {
    let text = SentimentBreakdown::from_analysis(&analysis(14, 4, 2, 20)).render();
    assert!(text.starts_with("Sentiment: positive (65.0% score, 20 reviews)"));
    assert!(text.contains("positive"));
    assert!(text.contains(" 70.0% (14)"));
    assert!(text.contains(" 20.0% (4)"));
    assert!(text.contains(" 10.0% (2)"));
}
