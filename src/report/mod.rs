//! Report export of a recommendation cycle as CSV, HTML or a paginated text document.

pub mod html;
pub mod paged;
pub mod tabular;

use chrono::{NaiveDate, NaiveDateTime};
use serde::Serialize;
use std::fs::File;
use std::io::BufWriter;
use std::path::{Path, PathBuf};
use tracing::info;

use crate::catalog::AudienceSegment;
use crate::error::{EngineError, Result};
use crate::session::Identity;
use crate::Recommendations;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum ReportFormat {
    Csv,
    Html,
    Text,
}

impl ReportFormat {
    pub fn from_str(value: &str) -> Option<Self> {
        match value.trim().to_lowercase().as_str() {
            "csv" => Some(ReportFormat::Csv),
            "html" | "htm" => Some(ReportFormat::Html),
            "text" | "txt" | "print" | "pdf" => Some(ReportFormat::Text),
            _ => None,
        }
    }

    pub fn extension(self) -> &'static str {
        match self {
            ReportFormat::Csv => "csv",
            ReportFormat::Html => "html",
            ReportFormat::Text => "txt",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            ReportFormat::Csv => "CSV",
            ReportFormat::Html => "HTML",
            ReportFormat::Text => "TEXT",
        }
    }
}

#[derive(Debug, Clone)]
pub struct ReportRequest {
    pub title: String,
    pub period_from: NaiveDate,
    pub period_to: NaiveDate,
    pub format: ReportFormat,
    pub author: Identity,
}

#[derive(Debug, Clone, Serialize)]
pub struct ReportEntry {
    pub id: u64,
    pub title: String,
    pub period: String,
    pub format: ReportFormat,
    pub created_at: NaiveDateTime,
    pub status: String,
    pub path: PathBuf,
}

/// Inputs shared by every renderer.
pub struct ReportDocument<'a> {
    pub title: &'a str,
    pub period: &'a str,
    pub author: &'a str,
    pub recommendations: &'a Recommendations,
    pub segments: Vec<SegmentRow>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SegmentRow {
    pub name: String,
    pub share_percent: f64,
    pub focus: String,
}

pub fn segments_table(segments: &[AudienceSegment]) -> Vec<SegmentRow> {
    segments
        .iter()
        .map(|segment| SegmentRow {
            name: segment.name.clone(),
            share_percent: segment.share_percent(),
            focus: segment.focus.clone(),
        })
        .collect()
}

pub fn period_label(from: NaiveDate, to: NaiveDate) -> String {
    format!("{}–{}", from.format("%d.%m"), to.format("%d.%m"))
}

/// Keeps alphanumerics, spaces, `_` and `-`, then turns spaces into `_`.
pub fn safe_title(title: &str) -> String {
    title
        .chars()
        .filter(|c| c.is_alphanumeric() || matches!(c, ' ' | '_' | '-'))
        .collect::<String>()
        .trim()
        .replace(' ', "_")
}

/// Percentage with one decimal, shared by all formats.
pub fn percent_field(value: f64) -> String {
    format!("{:.1}", value * 100.0)
}

pub struct ReportService {
    dir: PathBuf,
    entries: Vec<ReportEntry>,
    next_id: u64,
}

impl ReportService {
    pub fn new(dir: impl Into<PathBuf>) -> Result<Self> {
        let dir = dir.into();
        std::fs::create_dir_all(&dir)?;
        Ok(Self {
            dir,
            entries: Vec::new(),
            next_id: 1,
        })
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Built reports, newest first.
    pub fn entries(&self) -> &[ReportEntry] {
        &self.entries
    }

    pub fn build(
        &mut self,
        request: &ReportRequest,
        recommendations: &Recommendations,
        segments: &[AudienceSegment],
    ) -> Result<ReportEntry> {
        let now = chrono::Local::now().naive_local();
        self.build_at(request, recommendations, segments, now)
    }

    pub fn build_at(
        &mut self,
        request: &ReportRequest,
        recommendations: &Recommendations,
        segments: &[AudienceSegment],
        now: NaiveDateTime,
    ) -> Result<ReportEntry> {
        if request.period_to < request.period_from {
            return Err(EngineError::Report(format!(
                "period ends ({}) before it starts ({})",
                request.period_to, request.period_from
            )));
        }

        let period = period_label(request.period_from, request.period_to);
        let id = self.next_id;
        let filename = format!(
            "report_{}_{}_{}.{}",
            safe_title(&request.title),
            now.format("%Y%m%d_%H%M%S"),
            id,
            request.format.extension()
        );
        let path = self.dir.join(filename);

        let document = ReportDocument {
            title: &request.title,
            period: &period,
            author: &request.author.user_name,
            recommendations,
            segments: segments_table(segments),
        };

        match request.format {
            ReportFormat::Csv => {
                let writer = BufWriter::new(File::create(&path)?);
                tabular::write_csv(writer, &document)?;
            }
            ReportFormat::Html => std::fs::write(&path, html::render_html(&document))?,
            ReportFormat::Text => std::fs::write(&path, paged::render_text(&document))?,
        }

        let entry = ReportEntry {
            id,
            title: request.title.clone(),
            period,
            format: request.format,
            created_at: now,
            status: "ready".to_string(),
            path,
        };
        self.next_id += 1;
        self.entries.insert(0, entry.clone());

        info!(
            id = entry.id,
            format = entry.format.label(),
            path = %entry.path.display(),
            "report written"
        );
        Ok(entry)
    }
}
