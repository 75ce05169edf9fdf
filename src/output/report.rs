//! Report over a previously written table
//!
//! Reads the table back, converts the Date column into timestamps where
//! possible, keeps the first rows only, and renders every row and column
//! in full.

use crate::model::{PostRecord, COLUMNS};
use crate::output::table::read_table;
use crate::ScrapeError;
use chrono::{DateTime, NaiveDateTime};
use std::path::Path;

/// Timestamp format of the listing's `title` attribute, e.g. "Tue Jun 5 15:53:56 2018 UTC"
const LISTING_DATE_FORMAT: &str = "%a %b %d %H:%M:%S %Y UTC";

/// One report row
#[derive(Debug, Clone)]
pub struct ReportRow {
    pub index: usize,
    pub record: PostRecord,
    /// Parsed Date column; `None` keeps the raw text
    pub posted_at: Option<NaiveDateTime>,
}

impl ReportRow {
    fn cells(&self) -> Vec<String> {
        let date = match self.posted_at {
            Some(ts) => ts.format("%Y-%m-%d %H:%M:%S").to_string(),
            None => self.record.date.clone(),
        };
        vec![
            self.index.to_string(),
            self.record.title.clone(),
            self.record.username.clone(),
            date,
            self.record.comments.to_string(),
            self.record.upvotes.clone(),
            self.record.link.clone(),
        ]
    }
}

/// Parses a Date column value
///
/// Accepts the listing format and RFC 3339 (the `datetime` attribute form).
pub fn parse_post_date(raw: &str) -> Option<NaiveDateTime> {
    let normalized = raw.split_whitespace().collect::<Vec<_>>().join(" ");

    NaiveDateTime::parse_from_str(&normalized, LISTING_DATE_FORMAT)
        .ok()
        .or_else(|| {
            DateTime::parse_from_rfc3339(&normalized)
                .ok()
                .map(|dt| dt.naive_utc())
        })
}

/// Loads the first `limit` rows of the table at `path`
pub fn load_report(path: &Path, delimiter: char, limit: usize) -> Result<Vec<ReportRow>, ScrapeError> {
    let rows = read_table(path, delimiter)?;
    tracing::debug!("Read {} rows from {}", rows.len(), path.display());

    Ok(rows
        .into_iter()
        .take(limit)
        .map(|row| ReportRow {
            posted_at: parse_post_date(&row.record.date),
            index: row.index,
            record: row.record,
        })
        .collect())
}

/// Renders rows as an aligned text table, nothing truncated
pub fn format_report(rows: &[ReportRow]) -> String {
    let mut header = vec![String::new()];
    header.extend(COLUMNS.iter().map(|c| c.to_string()));

    let body: Vec<Vec<String>> = rows.iter().map(ReportRow::cells).collect();

    let mut widths: Vec<usize> = header.iter().map(|c| c.chars().count()).collect();
    for cells in &body {
        for (width, cell) in widths.iter_mut().zip(cells) {
            *width = (*width).max(cell.chars().count());
        }
    }

    let mut out = String::new();
    for cells in std::iter::once(&header).chain(body.iter()) {
        let line = cells
            .iter()
            .zip(&widths)
            .enumerate()
            .map(|(col, (cell, width))| {
                // Index and Comments are right-aligned
                if col == 0 || col == 4 {
                    format!("{:>width$}", cell, width = *width)
                } else {
                    format!("{:<width$}", cell, width = *width)
                }
            })
            .collect::<Vec<_>>()
            .join("  ");
        out.push_str(line.trim_end());
        out.push('\n');
    }
    out
}

/// Prints the report to stdout
pub fn print_report(rows: &[ReportRow]) {
    print!("{}", format_report(rows));
    println!("[{} rows x {} columns]", rows.len(), COLUMNS.len());
}
