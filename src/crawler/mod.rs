//! Crawler module for listing page fetching and processing
//!
//! This module contains the scraping pipeline:
//! - HTTP fetching with status validation
//! - Error-tolerant HTML document loading
//! - Per-post field extraction
//! - The pagination loop that ties them together

mod coordinator;
mod document;
mod extractor;
mod fetcher;

pub use coordinator::{run_scrape, SubredditScraper};
pub use document::{load_document, write_snapshot};
pub use extractor::{extract_record, find_post_nodes, parse_comment_count, Selectors};
pub use fetcher::{build_http_client, fetch_page, is_success_status, FetchedPage};
