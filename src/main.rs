//! Subreddit scraper entry point
//!
//! `scrape` (the default) collects posts and writes the table; `report` reads
//! a written table back and prints it.

use anyhow::Context;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use subreddit_scraper::config::{load_config_or_default, validate, Config};
use subreddit_scraper::crawler::run_scrape;
use subreddit_scraper::output::{load_report, print_report, write_table};
use tracing_subscriber::EnvFilter;

/// Subreddit Scraper: collect top posts from a paginated listing
#[derive(Parser, Debug)]
#[command(name = "subreddit-scraper")]
#[command(version = "1.0.0")]
#[command(about = "Scrape posts from a subreddit listing into a delimited table", long_about = None)]
struct Cli {
    /// Path to TOML configuration file (built-in defaults when omitted)
    #[arg(short, long, value_name = "CONFIG", global = true)]
    config: Option<PathBuf>,

    /// Increase logging verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Suppress non-error output
    #[arg(short, long, conflicts_with = "verbose", global = true)]
    quiet: bool,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Scrape the listing and write the table (default)
    Scrape {
        /// Listing URL to start from
        #[arg(long)]
        url: Option<String>,

        /// Table file to write
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Print a previously written table
    Report {
        /// Table file to read
        #[arg(short, long)]
        input: Option<PathBuf>,

        /// Number of rows to show
        #[arg(long)]
        rows: Option<usize>,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Setup logging based on verbosity
    setup_logging(cli.verbose, cli.quiet);

    let mut config = match load_config_or_default(cli.config.as_deref()) {
        Ok(cfg) => cfg,
        Err(e) => {
            tracing::error!("Failed to load configuration: {}", e);
            return Err(e.into());
        }
    };

    match cli.command.unwrap_or(Command::Scrape {
        url: None,
        output: None,
    }) {
        Command::Scrape { url, output } => {
            if let Some(url) = url {
                config.scraper.seed_url = url;
            }
            if let Some(output) = output {
                config.output.path = output;
            }
            validate(&config)?;
            handle_scrape(&config).await
        }
        Command::Report { input, rows } => {
            if let Some(input) = input {
                config.output.path = input;
            }
            if let Some(rows) = rows {
                config.output.report_rows = rows;
            }
            validate(&config)?;
            handle_report(&config)
        }
    }
}

/// Sets up the logging/tracing subscriber based on verbosity level
fn setup_logging(verbose: u8, quiet: bool) {
    let filter = if quiet {
        // Only show errors
        EnvFilter::new("error")
    } else {
        match verbose {
            0 => EnvFilter::new("subreddit_scraper=info,warn"),
            1 => EnvFilter::new("subreddit_scraper=debug,info"),
            2 => EnvFilter::new("subreddit_scraper=trace,debug"),
            _ => EnvFilter::new("trace"),
        }
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_thread_ids(false)
        .with_file(false)
        .init();
}

/// Runs the pagination loop and writes the table
async fn handle_scrape(config: &Config) -> anyhow::Result<()> {
    let posts = match run_scrape(config).await {
        Ok(posts) => posts,
        Err(e) => {
            tracing::error!("Scrape failed: {}", e);
            return Err(e.into());
        }
    };

    write_table(&posts, &config.output.path, config.output.delimiter_char())
        .with_context(|| format!("writing {}", config.output.path.display()))?;

    Ok(())
}

/// Reads the table back and prints it
fn handle_report(config: &Config) -> anyhow::Result<()> {
    let rows = load_report(
        &config.output.path,
        config.output.delimiter_char(),
        config.output.report_rows,
    )
    .with_context(|| format!("reading {}", config.output.path.display()))?;

    print_report(&rows);
    Ok(())
}
