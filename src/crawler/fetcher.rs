//! HTTP fetcher implementation
//!
//! One GET per listing page. The client identifies itself with the configured
//! User-Agent, since the site serves different markup to unidentified clients.
//! There is no retry: any transport failure or non-2xx status aborts the run.

use crate::config::UserAgentConfig;
use crate::ScrapeError;
use reqwest::Client;
use url::Url;

/// A successfully fetched listing page
#[derive(Debug)]
pub struct FetchedPage {
    /// URL the body was served from, after any redirects
    pub url: Url,
    pub body: String,
}

/// Builds the HTTP client used for every page fetch
///
/// Timeouts and redirect handling are left at the transport defaults.
///
/// # Example
///
/// ```no_run
/// use subreddit_scraper::config::UserAgentConfig;
/// use subreddit_scraper::crawler::build_http_client;
///
/// let client = build_http_client(&UserAgentConfig::default()).unwrap();
/// ```
pub fn build_http_client(config: &UserAgentConfig) -> Result<Client, reqwest::Error> {
    Client::builder()
        .user_agent(config.value.clone())
        .gzip(true)
        .brotli(true)
        .build()
}

/// Returns true for status codes in 200..=299 (both ends inclusive)
pub fn is_success_status(status: u16) -> bool {
    (200..=299).contains(&status)
}

/// Fetches a listing page and returns its body as text
///
/// Redirects are followed by the transport; the returned URL is the one the
/// body was actually served from.
///
/// # Returns
///
/// * `Ok(FetchedPage)` - The final URL and response body
/// * `Err(ScrapeError::Fetch)` - The server answered with a non-success status
/// * `Err(ScrapeError::Http)` - The request or body read failed
pub async fn fetch_page(client: &Client, url: &str) -> Result<FetchedPage, ScrapeError> {
    tracing::debug!("GET {}", url);

    let response = client
        .get(url)
        .send()
        .await
        .map_err(|source| ScrapeError::Http {
            url: url.to_string(),
            source,
        })?;

    let status = response.status().as_u16();
    if !is_success_status(status) {
        return Err(ScrapeError::Fetch {
            url: url.to_string(),
            status,
        });
    }

    let final_url = response.url().clone();
    if final_url.as_str() != url {
        tracing::debug!("{} redirected to {}", url, final_url);
    }

    let body = response.text().await.map_err(|source| ScrapeError::Http {
        url: url.to_string(),
        source,
    })?;

    Ok(FetchedPage {
        url: final_url,
        body,
    })
}
