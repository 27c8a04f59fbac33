use std::fmt::Write;

use crate::report::{percent_field, ReportDocument};

const CARD_STYLE: &str =
    "padding:12px;border:1px solid #d7e3f4;border-radius:12px;background:#fff";
const PANEL_STYLE: &str =
    "background:#fff;border:1px solid #d7e3f4;border-radius:12px;padding:12px";

pub fn render_html(document: &ReportDocument<'_>) -> String {
    let kpi = &document.recommendations.kpi;
    let title = escape(document.title);

    let mut html = String::new();
    html.push_str("<!doctype html>\n<html>\n<head><meta charset='utf-8'/>");
    let _ = write!(html, "<title>{}</title></head>\n", title);
    html.push_str(
        "<body style='font-family:Segoe UI,Arial;background:#f4f7fb;padding:24px;color:#0f172a'>\n",
    );
    let _ = writeln!(html, "  <h2 style='margin:0 0 6px 0'>{}</h2>", title);
    let _ = writeln!(
        html,
        "  <div style='color:#64748b;margin-bottom:14px'>Period: {} | Prepared for: {}</div>",
        escape(document.period),
        escape(document.author)
    );

    html.push_str("  <div style='display:flex;gap:12px;flex-wrap:wrap'>\n");
    for (label, value) in [
        ("Average CTR", format!("{}%", percent_field(kpi.avg_ctr))),
        ("Average ER", format!("{}%", percent_field(kpi.avg_er))),
        ("Rising trends", kpi.rising_trend_count.to_string()),
        ("Model quality", format!("{:.2}", kpi.model_quality_proxy)),
    ] {
        let _ = writeln!(
            html,
            "    <div style='{}'><div style='color:#64748b'>{}</div><div style='font-size:20px;font-weight:700'>{}</div></div>",
            CARD_STYLE, label, value
        );
    }
    html.push_str("  </div>\n");

    html.push_str("  <h3 style='margin-top:22px'>Recommended topics</h3>\n");
    let _ = writeln!(html, "  <div style='{}'>", PANEL_STYLE);
    html.push_str("    <table>\n      <tr><th>#</th><th>Topic</th><th>ER (%)</th><th>CTR (%)</th><th>Trend</th><th>Status</th><th>Explanation</th></tr>\n");
    for item in &document.recommendations.items {
        let _ = writeln!(
            html,
            "      <tr><td>{}</td><td>{}</td><td>{}</td><td>{}</td><td>{}</td><td>{}</td><td>{}</td></tr>",
            item.rank,
            escape(&item.topic),
            percent_field(item.er_pred),
            percent_field(item.ctr_pred),
            item.trend.label(),
            item.status.label(),
            escape(&item.explain)
        );
    }
    html.push_str("    </table>\n  </div>\n");

    html.push_str("  <h3 style='margin-top:22px'>Audience segments</h3>\n");
    let _ = writeln!(html, "  <div style='{}'>", PANEL_STYLE);
    html.push_str("    <table>\n      <tr><th>Segment</th><th>Share</th><th>Focus</th></tr>\n");
    for row in &document.segments {
        let _ = writeln!(
            html,
            "      <tr><td>{}</td><td>{:.0}%</td><td>{}</td></tr>",
            escape(&row.name),
            row.share_percent,
            escape(&row.focus)
        );
    }
    html.push_str("    </table>\n  </div>\n</body></html>\n");
    html
}

pub fn escape(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    for ch in value.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(ch),
        }
    }
    out
}
