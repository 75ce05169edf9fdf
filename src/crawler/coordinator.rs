//! Scrape coordinator - pagination loop
//!
//! The loop is strictly sequential: fetch a listing page, parse it, extract
//! every post on it, then either stop or follow the next-page link after a
//! courtesy pause. The target count is only checked between pages, so the
//! final page is always kept whole and the result may exceed the target.

use crate::config::{validate, Config};
use crate::crawler::document::write_snapshot;
use crate::crawler::extractor::{extract_record, Selectors};
use crate::crawler::{build_http_client, fetch_page};
use crate::model::PostRecord;
use crate::state::{PageState, ScrapeState};
use crate::ScrapeError;
use reqwest::Client;
use std::path::PathBuf;
use std::time::Duration;
use url::Url;

/// Drives the fetch / parse / extract loop over a paginated listing
pub struct SubredditScraper {
    client: Client,
    selectors: Selectors,
    target_posts: usize,
    delay: Duration,
    snapshot_path: Option<PathBuf>,
}

/// What one processed page contributes to the run
struct PageOutcome {
    records: Vec<PostRecord>,
    next: ScrapeState,
}

impl SubredditScraper {
    /// Creates a scraper from the configuration
    ///
    /// # Returns
    ///
    /// * `Ok(SubredditScraper)` - Ready to run
    /// * `Err(ScrapeError)` - The HTTP client or selectors could not be built
    pub fn new(config: &Config) -> Result<Self, ScrapeError> {
        Ok(Self {
            client: build_http_client(&config.user_agent)?,
            selectors: Selectors::new()?,
            target_posts: config.scraper.target_posts,
            delay: config.scraper.delay(),
            snapshot_path: config.output.snapshot_path.clone(),
        })
    }

    /// Scrapes from `seed_url` until the target is reached or pages run out
    ///
    /// Records are returned in scrape order: page order, then in-page order.
    /// Any fetch or extraction failure aborts the whole run and discards
    /// the records collected so far.
    pub async fn run(&self, seed_url: &str) -> Result<Vec<PostRecord>, ScrapeError> {
        let mut state = ScrapeState::Running(Url::parse(seed_url)?);
        let mut posts: Vec<PostRecord> = Vec::new();
        let mut pages = 0usize;
        let start_time = std::time::Instant::now();

        tracing::info!(
            "Scraping {} (target: {} posts)",
            seed_url,
            self.target_posts
        );

        loop {
            let url = match state {
                ScrapeState::Running(url) => url,
                ScrapeState::Done => break,
            };

            let page = fetch_page(&self.client, url.as_str()).await?;
            if let Some(path) = &self.snapshot_path {
                write_snapshot(path, &page.body)?;
            }
            pages += 1;

            // Relative links resolve against where the page was served from
            let outcome = self.process_page(page.url, &page.body, posts.len())?;
            let on_page = outcome.records.len();
            let deleted = outcome
                .records
                .iter()
                .filter(|record| record.is_deleted_author())
                .count();

            for record in outcome.records {
                // 1-based progress counter
                tracing::debug!("Post {}: {}", posts.len() + 1, record.title);
                posts.push(record);
            }

            tracing::info!(
                "Page {}: {} posts ({} deleted authors), {} collected",
                pages,
                on_page,
                deleted,
                posts.len()
            );

            state = outcome.next;

            if let Some(next_url) = state.current_url() {
                tracing::debug!("Next page: {}", next_url);
                if !self.delay.is_zero() {
                    tokio::time::sleep(self.delay).await;
                }
            }
        }

        tracing::info!(
            "Scrape finished: {} posts from {} pages in {:?}",
            posts.len(),
            pages,
            start_time.elapsed()
        );

        Ok(posts)
    }

    /// Parses one page and decides the next state
    ///
    /// The document never outlives this call, so it is not held across an
    /// await point.
    fn process_page(
        &self,
        url: Url,
        markup: &str,
        collected: usize,
    ) -> Result<PageOutcome, ScrapeError> {
        let page = PageState::load(url, markup);

        let records = page
            .post_nodes(&self.selectors)
            .into_iter()
            .map(|node| extract_record(node, &self.selectors))
            .collect::<Result<Vec<_>, _>>()?;

        let total = collected + records.len();
        let next = if total >= self.target_posts {
            tracing::info!(
                "Reached {} posts (target {}), stopping",
                total,
                self.target_posts
            );
            ScrapeState::Done
        } else {
            match page.next_page_url(&self.selectors)? {
                Some(next_url) => ScrapeState::Running(next_url),
                None => {
                    tracing::info!(
                        "No next page after {} posts (target {}), stopping early",
                        total,
                        self.target_posts
                    );
                    ScrapeState::Done
                }
            }
        };

        Ok(PageOutcome { records, next })
    }
}

/// Runs a scrape of the configured seed URL
///
/// The configuration is validated first; an invalid one is
/// `ScrapeError::Config`.
///
/// # Example
///
/// ```no_run
/// use subreddit_scraper::config::Config;
/// use subreddit_scraper::crawler::run_scrape;
///
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let posts = run_scrape(&Config::default()).await?;
/// println!("{} posts", posts.len());
/// # Ok(())
/// # }
/// ```
pub async fn run_scrape(config: &Config) -> Result<Vec<PostRecord>, ScrapeError> {
    validate(config)?;
    let scraper = SubredditScraper::new(config)?;
    scraper.run(&config.scraper.seed_url).await
}
