//! Document loading
//!
//! Turns raw markup into a queryable tree. Parsing is error-tolerant: broken
//! or unclosed tags never fail the load, and missing nodes only surface later
//! during extraction.

use scraper::Html;
use std::path::Path;

/// Parses listing markup into a document tree
pub fn load_document(markup: &str) -> Html {
    Html::parse_document(markup)
}

/// Writes the raw markup of the last fetched page to `path`, replacing any previous copy
pub fn write_snapshot(path: &Path, markup: &str) -> std::io::Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)?;
        }
    }
    std::fs::write(path, markup)
}
