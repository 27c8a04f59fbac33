use crate::report::{percent_field, ReportDocument};

pub const PAGE_LINES: usize = 60;
pub const PAGE_BREAK: char = '\u{000C}';

const TOPIC_LINE_WIDTH: usize = 110;
const EXPLAIN_LINE_WIDTH: usize = 120;

/// Print-ready document: pages of at most `PAGE_LINES` lines (footer included),
/// separated by form feeds.
pub fn render_text(document: &ReportDocument<'_>) -> String {
    let pages = paginate(body_lines(document));
    let total = pages.len();
    let separator = format!("\n{}\n", PAGE_BREAK);

    pages
        .into_iter()
        .enumerate()
        .map(|(idx, mut lines)| {
            lines.push(format!("Page {}/{}", idx + 1, total));
            lines.join("\n")
        })
        .collect::<Vec<_>>()
        .join(separator.as_str())
}

fn body_lines(document: &ReportDocument<'_>) -> Vec<String> {
    let kpi = &document.recommendations.kpi;
    let mut lines = vec![
        document.title.to_string(),
        format!("Period: {}", document.period),
        format!("Prepared for: {}", document.author),
        format!(
            "Average CTR: {}% | Average ER: {}% | Rising trends: {} | Model quality: {:.2}",
            percent_field(kpi.avg_ctr),
            percent_field(kpi.avg_er),
            kpi.rising_trend_count,
            kpi.model_quality_proxy
        ),
        String::new(),
        "Recommended topics:".to_string(),
    ];

    for item in &document.recommendations.items {
        lines.push(truncate(
            &format!(
                "{}. {} | ER: {}% | CTR: {}% | {} | {}",
                item.rank,
                item.topic,
                percent_field(item.er_pred),
                percent_field(item.ctr_pred),
                item.trend.label(),
                item.status.label()
            ),
            TOPIC_LINE_WIDTH,
        ));
        lines.push(truncate(
            &format!("   Explanation: {}", item.explain),
            EXPLAIN_LINE_WIDTH,
        ));
    }

    lines.push(String::new());
    lines.push("Audience segments:".to_string());
    for row in &document.segments {
        lines.push(format!(
            "- {}: {:.0}% | Focus: {}",
            row.name, row.share_percent, row.focus
        ));
    }
    lines
}

fn paginate(lines: Vec<String>) -> Vec<Vec<String>> {
    let per_page = PAGE_LINES - 1;
    let mut pages: Vec<Vec<String>> = lines
        .chunks(per_page)
        .map(|chunk| chunk.to_vec())
        .collect();
    if pages.is_empty() {
        pages.push(Vec::new());
    }
    pages
}

fn truncate(line: &str, width: usize) -> String {
    line.chars().take(width).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn paginates_long_bodies() {
        let lines: Vec<String> = (0..130).map(|i| format!("line {}", i)).collect();
        let pages = paginate(lines);
        assert_eq!(pages.len(), 3);
        assert!(pages.iter().all(|page| page.len() < PAGE_LINES));
    }

    #[test]
    fn truncates_on_char_boundaries() {
        assert_eq!(truncate("днів", 2), "дн");
    }
}
