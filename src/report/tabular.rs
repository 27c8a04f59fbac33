use std::io::Write;

use crate::error::Result;
use crate::report::{percent_field, ReportDocument};

pub const HEADER: [&str; 8] = [
    "rank", "topic", "drivers", "er_pct", "ctr_pct", "trend", "status", "explain",
];

/// KPI rows first, tagged `KPI` in the rank column, then one row per topic.
pub fn write_csv<W: Write>(writer: W, document: &ReportDocument<'_>) -> Result<()> {
    let mut csv = csv::Writer::from_writer(writer);
    csv.write_record(HEADER)?;

    let kpi = &document.recommendations.kpi;
    let kpi_rows = [
        ("Average ER (%)", percent_field(kpi.avg_er)),
        ("Average CTR (%)", percent_field(kpi.avg_ctr)),
        ("Rising trends", kpi.rising_trend_count.to_string()),
        ("Model quality", format!("{:.2}", kpi.model_quality_proxy)),
    ];
    for (label, value) in kpi_rows {
        csv.write_record(["KPI", label, value.as_str(), "", "", "", "", ""])?;
    }

    for item in &document.recommendations.items {
        csv.write_record([
            item.rank.to_string(),
            item.topic.clone(),
            item.drivers.clone(),
            percent_field(item.er_pred),
            percent_field(item.ctr_pred),
            item.trend.label().to_string(),
            item.status.label().to_string(),
            item.explain.clone(),
        ])?;
    }

    csv.flush()?;
    Ok(())
}
