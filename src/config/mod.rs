//! Configuration module for the subreddit scraper
//!
//! This module handles loading, parsing, and validating TOML configuration files.
//! Every key has a default, so a run without any file uses the built-in listing,
//! output path and pacing.
//!
//! # Example
//!
//! ```no_run
//! use subreddit_scraper::config::load_config;
//! use std::path::Path;
//!
//! let config = load_config(Path::new("scraper.toml")).unwrap();
//! println!("Collecting at least {} posts", config.scraper.target_posts);
//! ```

mod parser;
mod types;
mod validation;

// Re-export types
pub use types::{Config, OutputConfig, ScraperConfig, UserAgentConfig};

// Re-export parser functions
pub use parser::{load_config, load_config_or_default};
pub use validation::validate;
