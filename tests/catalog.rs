use topic_recommender::catalog::{generate_segments, generate_topics, DEFAULT_CATALOG_SEED};

#[test]
fn topics_are_deterministic_per_seed() {
    let first = generate_topics(DEFAULT_CATALOG_SEED);
    let second = generate_topics(DEFAULT_CATALOG_SEED);
    assert_eq!(first, second);

    let other = generate_topics(DEFAULT_CATALOG_SEED + 1);
    assert_eq!(first.len(), other.len());
    assert_ne!(first, other);
}

#[test]
fn topic_traits_stay_in_unit_range_and_near_base() {
    for seed in 0..50 {
        let topics = generate_topics(seed);
        assert_eq!(topics.len(), 12);
        for topic in &topics {
            assert!(!topic.keywords.is_empty());
            for value in [topic.base_popularity, topic.seasonality, topic.novelty] {
                assert!((0.0..=1.0).contains(&value));
            }
        }
        let lead = &topics[0];
        assert_eq!(lead.topic, "AI tools for creators");
        assert!((lead.base_popularity - 0.78).abs() <= 0.05 + 1e-12);
        assert!((lead.seasonality - 0.22).abs() <= 0.05 + 1e-12);
        assert!((lead.novelty - 0.62).abs() <= 0.05 + 1e-12);
    }
}

#[test]
fn topic_text_passes_through_unmodified() {
    let topics = generate_topics(3);
    let analytics = topics
        .iter()
        .find(|topic| topic.topic == "SMM analytics and KPIs")
        .expect("analytics topic present");
    assert_eq!(analytics.keywords, vec!["CTR", "ER", "A/B", "dashboards", "metrics"]);
    assert_eq!(analytics.document(), "SMM analytics and KPIs CTR ER A/B dashboards metrics");
}

#[test]
fn segment_shares_sum_to_one_and_sort_descending() {
    for seed in 0..100 {
        let segments = generate_segments(seed);
        assert_eq!(segments.len(), 4);

        let total: f64 = segments.iter().map(|segment| segment.share).sum();
        assert!((total - 1.0).abs() < 1e-9, "seed {} sums to {}", seed, total);

        for pair in segments.windows(2) {
            assert!(pair[0].share >= pair[1].share);
        }
    }
}

#[test]
fn segments_are_reproducible() {
    assert_eq!(generate_segments(11), generate_segments(11));
    let percents: f64 = generate_segments(11)
        .iter()
        .map(|segment| segment.share_percent())
        .sum();
    assert!((percents - 100.0).abs() <= 2.0);
}
