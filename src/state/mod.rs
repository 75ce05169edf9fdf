//! State module for tracking scrape progress
//!
//! # Components
//!
//! - `ScrapeState`: Whether the pagination loop is still running, and on which page
//! - `PageState`: The document currently being processed

mod page_state;
mod scrape_state;

// Re-export main types
pub use page_state::PageState;
pub use scrape_state::ScrapeState;
