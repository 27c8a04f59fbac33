use topic_recommender::scoring::{
    blended_score, classify_status, classify_trend, rank_by_er, ScoredTopic,
};
use topic_recommender::{Status, Trend};

#[test]
fn trend_bounds_are_strict() {
    assert_eq!(classify_trend(0.03), Trend::Stable);
    assert_eq!(classify_trend(-0.03), Trend::Stable);
    assert_eq!(classify_trend(0.0301), Trend::Rising);
    assert_eq!(classify_trend(-0.0301), Trend::Falling);
    assert_eq!(classify_trend(0.0), Trend::Stable);
}

#[test]
fn status_bounds_are_inclusive() {
    assert_eq!(classify_status(0.70), Status::Candidate);
    assert_eq!(classify_status(0.95), Status::Candidate);
    assert_eq!(classify_status(0.6999), Status::Reserve);
    assert_eq!(classify_status(0.55), Status::Reserve);
    assert_eq!(classify_status(0.5499), Status::Review);
    assert_eq!(classify_status(0.0), Status::Review);
}

#[test]
fn blended_score_normalizes_by_upper_bounds() {
    assert!((blended_score(0.16, 0.14) - 1.0).abs() < 1e-12);
    assert!((blended_score(0.08, 0.07) - 0.5).abs() < 1e-12);
    assert!(blended_score(0.0, 0.0).abs() < 1e-12);
}

#[test]
fn ranking_orders_by_er_and_keeps_ties_stable() {
    let mut topics = vec![
        ScoredTopic::new(0, 0.05, 0.13, 0.0),
        ScoredTopic::new(1, 0.09, 0.02, 0.0),
        ScoredTopic::new(2, 0.05, 0.01, 0.0),
        ScoredTopic::new(3, 0.12, 0.05, 0.0),
    ];
    rank_by_er(&mut topics);
    let order: Vec<usize> = topics.iter().map(|topic| topic.position).collect();
    assert_eq!(order, vec![3, 1, 0, 2]);
}

#[test]
fn labels_are_lowercase_words() {
    assert_eq!(Trend::Rising.label(), "rising");
    assert_eq!(Status::Review.label(), "review");
    assert_eq!(
        serde_json::to_string(&Status::Candidate).unwrap(),
        "\"candidate\""
    );
}
