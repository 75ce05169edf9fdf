/// Scrape loop state definitions
use std::fmt;
use url::Url;

/// Represents the state of the pagination loop
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ScrapeState {
    /// The loop will fetch this page next
    Running(Url),

    /// The loop has finished; the collected posts are final
    Done,
}

impl ScrapeState {
    /// Returns true if this is the terminal state
    pub fn is_done(&self) -> bool {
        matches!(self, Self::Done)
    }

    /// The URL that will be fetched next, if still running
    pub fn current_url(&self) -> Option<&Url> {
        match self {
            Self::Running(url) => Some(url),
            Self::Done => None,
        }
    }
}

impl fmt::Display for ScrapeState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Running(url) => write!(f, "running ({})", url),
            Self::Done => write!(f, "done"),
        }
    }
}
