use chrono::NaiveDate;
use std::fs;
use tempfile::tempdir;
use topic_recommender::catalog::generate_segments;
use topic_recommender::report::{
    period_label, safe_title, ReportFormat, ReportRequest, ReportService,
};
use topic_recommender::session::Identity;
use topic_recommender::{
    BackendKind, EngineError, KpiSummary, Recommendations, Status, TopicRecommendation, Trend,
};

fn item(rank: usize, topic: &str, er_pred: f64, ctr_pred: f64, trend: Trend) -> TopicRecommendation {
    TopicRecommendation {
        rank,
        topic: topic.to_string(),
        drivers: "AI, workflow, automation".to_string(),
        er_pred,
        ctr_pred,
        trend,
        explain: "Terms: ai, workflow, tools / key factor: trend".to_string(),
        status: Status::Reserve,
    }
}

fn sample_recommendations() -> Recommendations {
    let items = vec![
        item(1, "AI tools for creators", 0.1234, 0.0876, Trend::Rising),
        item(2, "Short video <Reels> & Shorts", 0.0951, 0.0612, Trend::Stable),
    ];
    let kpi = KpiSummary::from_recommendations(&items);
    Recommendations {
        items,
        kpi,
        backend: BackendKind::Learned,
    }
}

fn date(month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, month, day).unwrap()
}

fn request(format: ReportFormat) -> ReportRequest {
    ReportRequest {
        title: "Weekly topics: May!".to_string(),
        period_from: date(5, 1),
        period_to: date(5, 7),
        format,
        author: Identity::sign_in(""),
    }
}

#[test]
fn period_and_title_helpers() {
    assert_eq!(period_label(date(5, 1), date(5, 7)), "01.05–07.05");
    assert_eq!(safe_title("Weekly topics: May!"), "Weekly_topics_May");
    assert_eq!(safe_title("  a/b - c_d "), "ab_-_c_d");
}

#[test]
fn format_names_parse() {
    assert_eq!(ReportFormat::from_str("CSV"), Some(ReportFormat::Csv));
    assert_eq!(ReportFormat::from_str("html"), Some(ReportFormat::Html));
    assert_eq!(ReportFormat::from_str("pdf"), Some(ReportFormat::Text));
    assert_eq!(ReportFormat::from_str("docx"), None);
}

#[test]
fn csv_report_lists_kpis_then_topics() {
    let dir = tempdir().unwrap();
    let mut service = ReportService::new(dir.path()).unwrap();
    let now = date(5, 8).and_hms_opt(9, 30, 0).unwrap();
    let entry = service
        .build_at(
            &request(ReportFormat::Csv),
            &sample_recommendations(),
            &generate_segments(11),
            now,
        )
        .unwrap();

    assert_eq!(entry.id, 1);
    assert_eq!(entry.status, "ready");
    assert_eq!(entry.period, "01.05–07.05");
    assert_eq!(
        entry.path.file_name().unwrap().to_str().unwrap(),
        "report_Weekly_topics_May_20240508_093000_1.csv"
    );

    let mut reader = csv::Reader::from_path(&entry.path).unwrap();
    let header = reader.headers().unwrap().clone();
    assert_eq!(header.get(0), Some("rank"));
    assert_eq!(header.len(), 8);

    let rows: Vec<csv::StringRecord> = reader.records().map(|row| row.unwrap()).collect();
    assert_eq!(rows.len(), 6);
    assert_eq!(rows[0].get(0), Some("KPI"));
    assert_eq!(rows[0].get(1), Some("Average ER (%)"));
    assert_eq!(rows[0].get(2), Some("10.9"));
    assert_eq!(rows[2].get(2), Some("1"));
    assert_eq!(rows[3].get(2), Some("0.82"));

    assert_eq!(rows[4].get(0), Some("1"));
    assert_eq!(rows[4].get(1), Some("AI tools for creators"));
    assert_eq!(rows[4].get(3), Some("12.3"));
    assert_eq!(rows[4].get(4), Some("8.8"));
    assert_eq!(rows[4].get(5), Some("rising"));
    assert_eq!(rows[5].get(1), Some("Short video <Reels> & Shorts"));
}

#[test]
fn html_report_escapes_text_and_lists_segments() {
    let dir = tempdir().unwrap();
    let mut service = ReportService::new(dir.path()).unwrap();
    let segments = generate_segments(11);
    let entry = service
        .build(&request(ReportFormat::Html), &sample_recommendations(), &segments)
        .unwrap();

    let html = fs::read_to_string(&entry.path).unwrap();
    assert!(html.starts_with("<!doctype html>"));
    assert!(html.contains("Short video &lt;Reels&gt; &amp; Shorts"));
    assert!(html.contains("Prepared for: guest"));
    assert!(html.contains("Period: 01.05–07.05"));
    for segment in &segments {
        assert!(html.contains(&segment.name));
    }
}

#[test]
fn text_report_fits_on_one_page() {
    let dir = tempdir().unwrap();
    let mut service = ReportService::new(dir.path()).unwrap();
    let entry = service
        .build(&request(ReportFormat::Text), &sample_recommendations(), &generate_segments(11))
        .unwrap();

    assert_eq!(entry.path.extension().unwrap(), "txt");
    let text = fs::read_to_string(&entry.path).unwrap();
    assert!(text.starts_with("Weekly topics: May!"));
    assert!(text.contains("1. AI tools for creators | ER: 12.3% | CTR: 8.8% | rising | reserve"));
    assert!(text.trim_end().ends_with("Page 1/1"));
    assert!(!text.contains('\u{000C}'));
}

#[test]
fn entries_are_listed_newest_first() {
    let dir = tempdir().unwrap();
    let mut service = ReportService::new(dir.path()).unwrap();
    let recommendations = sample_recommendations();
    let segments = generate_segments(11);

    for (second, format) in [ReportFormat::Csv, ReportFormat::Html, ReportFormat::Text]
        .into_iter()
        .enumerate()
    {
        let now = date(5, 8).and_hms_opt(10, 0, second as u32).unwrap();
        service
            .build_at(&request(format), &recommendations, &segments, now)
            .unwrap();
    }

    let ids: Vec<u64> = service.entries().iter().map(|entry| entry.id).collect();
    assert_eq!(ids, vec![3, 2, 1]);
    assert_eq!(service.entries()[0].format, ReportFormat::Text);
    assert!(service.entries().iter().all(|entry| entry.path.exists()));
}

#[test]
fn inverted_period_is_rejected() {
    let dir = tempdir().unwrap();
    let mut service = ReportService::new(dir.path()).unwrap();
    let mut bad = request(ReportFormat::Csv);
    bad.period_from = date(5, 9);

    let err = service
        .build(&bad, &sample_recommendations(), &generate_segments(11))
        .unwrap_err();
    assert!(matches!(err, EngineError::Report(_)));
    assert!(service.entries().is_empty());
}

#[test]
fn same_second_builds_keep_separate_files() {
    let dir = tempdir().unwrap();
    let mut service = ReportService::new(dir.path()).unwrap();
    let recommendations = sample_recommendations();
    let segments = generate_segments(11);
    let now = date(5, 8).and_hms_opt(12, 0, 0).unwrap();

    let first = service
        .build_at(&request(ReportFormat::Csv), &recommendations, &segments, now)
        .unwrap();
    let second = service
        .build_at(&request(ReportFormat::Csv), &recommendations, &segments, now)
        .unwrap();

    assert_ne!(first.path, second.path);
    assert!(first.path.exists());
    assert!(second.path.exists());
    assert_eq!(fs::read_dir(dir.path()).unwrap().count(), 2);
}
