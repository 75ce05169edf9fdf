//! Subreddit Scraper: paginated listing harvester
//!
//! This crate walks the "next page" links of an old-style subreddit listing,
//! extracts one record per post, and writes the collected records to a
//! delimited table that can later be read back for reporting.

pub mod config;
pub mod crawler;
pub mod model;
pub mod output;
pub mod state;

use thiserror::Error;

/// Main error type for scraping operations
#[derive(Debug, Error)]
pub enum ScrapeError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Unable to download page {url} (HTTP {status})")]
    Fetch { url: String, status: u16 },

    #[error("HTTP error for {url}: {source}")]
    Http { url: String, source: reqwest::Error },

    #[error("HTTP client error: {0}")]
    Reqwest(#[from] reqwest::Error),

    #[error("Post is missing required field '{field}'")]
    Extraction { field: &'static str },

    #[error("Invalid selector: {0}")]
    Selector(String),

    #[error("Cannot resolve next page link '{href}': {source}")]
    NextPage {
        href: String,
        source: ::url::ParseError,
    },

    #[error("Malformed table at row {row}: {message}")]
    Table { row: usize, message: String },

    #[error("URL parse error: {0}")]
    UrlParse(#[from] ::url::ParseError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Configuration-specific errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse TOML: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Invalid URL in config: {0}")]
    InvalidUrl(String),
}

/// Result type alias for scraping operations
pub type Result<T> = std::result::Result<T, ScrapeError>;

/// Result type alias for configuration operations
pub type ConfigResult<T> = std::result::Result<T, ConfigError>;

// Re-export commonly used types
pub use config::Config;
pub use model::PostRecord;
pub use crawler::SubredditScraper;
pub use state::{PageState, ScrapeState};
