use topic_recommender::catalog::generate_topics;
use topic_recommender::config::ForestConfig;
use topic_recommender::features::{dominant_feature, FeatureVector, FEATURE_NAMES};
use topic_recommender::model::{
    ClosedFormPredictor, EngagementPredictor, LearnedPredictor, RandomForestRegressor,
};
use topic_recommender::synthetic::{synthesize_training_set, TrainingSet};
use topic_recommender::EngineError;

fn small_forest() -> ForestConfig {
    ForestConfig {
        n_trees: 30,
        max_depth: 6,
        min_samples_split: 2,
    }
}

fn training_set() -> TrainingSet {
    synthesize_training_set(&generate_topics(7), 600, 42).expect("training set")
}

fn features(popularity: f64, seasonality: f64, novelty: f64, trend_delta: f64) -> FeatureVector {
    FeatureVector {
        popularity,
        seasonality,
        novelty,
        trend_delta,
        cluster_id: 1,
    }
}

#[test]
fn forest_rejects_empty_training_data() {
    let mut forest = RandomForestRegressor::new(small_forest(), 1);
    let err = forest.fit(&[], &[]).unwrap_err();
    assert!(matches!(err, EngineError::InvalidTrainingSet(_)));
    assert!(!forest.is_fitted());
}

#[test]
fn forest_rejects_mismatched_labels() {
    let set = training_set();
    let mut forest = RandomForestRegressor::new(small_forest(), 1);
    let err = forest.fit(&set.rows, &set.er_labels[..10]).unwrap_err();
    assert!(matches!(err, EngineError::InvalidTrainingSet(_)));
}

#[test]
fn forest_refuses_to_predict_before_fit() {
    let forest = RandomForestRegressor::new(small_forest(), 1);
    let err = forest.predict(&features(0.5, 0.2, 0.4, 0.0)).unwrap_err();
    assert!(matches!(err, EngineError::ModelNotReady(_)));
    assert!(forest.feature_importances().is_none());
}

#[test]
fn forest_beats_the_mean_baseline() {
    let set = training_set();
    let mut forest = RandomForestRegressor::new(small_forest(), 42);
    forest.fit(&set.rows, &set.er_labels).unwrap();

    let mean = set.er_labels.iter().sum::<f64>() / set.len() as f64;
    let mut forest_error = 0.0;
    let mut baseline_error = 0.0;
    for (row, label) in set.rows.iter().zip(&set.er_labels) {
        forest_error += (forest.predict(row).unwrap() - label).abs();
        baseline_error += (mean - label).abs();
    }
    assert!(forest_error < baseline_error * 0.7);
}

#[test]
fn forest_importances_highlight_the_trend_shock() {
    let set = training_set();
    let mut forest = RandomForestRegressor::new(small_forest(), 42);
    forest.fit(&set.rows, &set.er_labels).unwrap();

    let importances = forest.feature_importances().expect("importances after fit");
    let total: f64 = importances.iter().sum();
    assert!((total - 1.0).abs() < 1e-9);
    assert!(importances.iter().all(|value| *value >= 0.0));
    assert!(importances[3] > 0.4);
    assert_eq!(dominant_feature(&importances), FEATURE_NAMES[3]);
}

#[test]
fn forest_is_reproducible_for_a_seed() {
    let set = training_set();
    let mut first = RandomForestRegressor::new(small_forest(), 9);
    let mut second = RandomForestRegressor::new(small_forest(), 9);
    first.fit(&set.rows, &set.ctr_labels).unwrap();
    second.fit(&set.rows, &set.ctr_labels).unwrap();

    let probe = features(0.62, 0.2, 0.5, 0.03);
    assert_eq!(first.predict(&probe).unwrap(), second.predict(&probe).unwrap());
}

#[test]
fn closed_form_matches_the_linear_formula() {
    let model = ClosedFormPredictor;
    let row = features(0.7, 0.2, 0.5, 0.02);
    let er = 0.06 + 0.06 * 0.7 + 0.04 * 0.5 + 0.02;
    let ctr = 0.04 + 0.05 * 0.7 + 0.03 * 0.2 + 0.6 * 0.02;
    assert!((model.predict_er(&row) - er).abs() < 1e-12);
    assert!((model.predict_ctr(&row) - ctr).abs() < 1e-12);

    let crash = features(0.0, 0.0, 0.0, -0.5);
    assert_eq!(model.predict_er(&crash), 0.02);
    assert_eq!(model.predict_ctr(&crash), 0.01);
    let boom = features(1.0, 1.0, 1.0, 0.5);
    assert_eq!(model.predict_er(&boom), 0.16);
    assert_eq!(model.predict_ctr(&boom), 0.14);
}

#[test]
fn learned_predictions_stay_clamped() {
    let set = training_set();
    let predictor = EngagementPredictor::Learned(
        LearnedPredictor::train(&set, &small_forest(), 42).unwrap(),
    );
    assert!(predictor.er_feature_importances().is_some());

    for trend in [-0.2, -0.06, 0.0, 0.08, 0.3] {
        for popularity in [0.0, 0.5, 1.0] {
            let row = features(popularity, 0.2, 0.5, trend);
            let er = predictor.predict_er(&row).unwrap();
            let ctr = predictor.predict_ctr(&row).unwrap();
            assert!((0.02..=0.16).contains(&er));
            assert!((0.01..=0.14).contains(&ctr));
        }
    }
}

#[test]
fn closed_form_predictor_exposes_no_importances() {
    let predictor = EngagementPredictor::ClosedForm(ClosedFormPredictor);
    assert!(predictor.er_feature_importances().is_none());
    assert!(predictor.predict_er(&features(0.5, 0.5, 0.5, 0.0)).is_ok());
}
