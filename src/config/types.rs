use serde::Deserialize;
use std::path::PathBuf;
use std::time::Duration;

/// Listing scraped when no seed URL is configured
pub const DEFAULT_SEED_URL: &str = "https://old.reddit.com/r/gaming/top/?t=all";

/// Identifying header value; the site serves different markup without it
pub const DEFAULT_USER_AGENT: &str = "data-science-project";

/// Default output table path
pub const DEFAULT_OUTPUT_PATH: &str = "Top 100 posts in a subreddit.csv";

/// Main configuration structure
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub scraper: ScraperConfig,
    #[serde(rename = "user-agent", default)]
    pub user_agent: UserAgentConfig,
    #[serde(default)]
    pub output: OutputConfig,
}

/// Pagination loop configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ScraperConfig {
    /// First listing page to fetch
    #[serde(rename = "seed-url")]
    pub seed_url: String,

    /// Stop once at least this many posts are collected (checked between pages)
    #[serde(rename = "target-posts")]
    pub target_posts: usize,

    /// Pause between page fetches (milliseconds)
    #[serde(rename = "delay-ms")]
    pub delay_ms: u64,
}

impl ScraperConfig {
    pub fn delay(&self) -> Duration {
        Duration::from_millis(self.delay_ms)
    }
}

impl Default for ScraperConfig {
    fn default() -> Self {
        Self {
            seed_url: DEFAULT_SEED_URL.to_string(),
            target_posts: 100,
            delay_ms: 2000,
        }
    }
}

/// Client identification
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct UserAgentConfig {
    /// Value sent in the User-Agent header
    pub value: String,
}

impl Default for UserAgentConfig {
    fn default() -> Self {
        Self {
            value: DEFAULT_USER_AGENT.to_string(),
        }
    }
}

/// Output configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    /// Path of the delimited table
    pub path: PathBuf,

    /// Field separator, a single character
    pub delimiter: String,

    /// Where each fetched page's raw markup is copied (optional)
    #[serde(rename = "snapshot-path")]
    pub snapshot_path: Option<PathBuf>,

    /// Number of rows shown by the report
    #[serde(rename = "report-rows")]
    pub report_rows: usize,
}

impl OutputConfig {
    /// Returns the delimiter character
    ///
    /// Validation guarantees the string holds exactly one character.
    pub fn delimiter_char(&self) -> char {
        self.delimiter.chars().next().unwrap_or('|')
    }
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            path: PathBuf::from(DEFAULT_OUTPUT_PATH),
            delimiter: "|".to_string(),
            snapshot_path: None,
            report_rows: 100,
        }
    }
}
