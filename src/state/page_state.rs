/// Transient state for the listing page being processed
use crate::crawler::{load_document, Selectors};
use crate::ScrapeError;
use scraper::{ElementRef, Html};
use url::Url;

/// The parsed document of one listing page
///
/// Replaced on every iteration and never persisted. The next-page URL is
/// looked up on demand, since the loop only needs it when the target has
/// not been reached yet.
pub struct PageState {
    /// URL the markup was fetched from, used to resolve relative links
    pub url: Url,

    /// The parsed document
    pub document: Html,
}

impl PageState {
    /// Parses `markup` fetched from `url`
    pub fn load(url: Url, markup: &str) -> Self {
        Self {
            url,
            document: load_document(markup),
        }
    }

    /// Resolves the next-page control's link, if the page has one
    ///
    /// A control without a nested link counts as absent.
    pub fn next_page_url(&self, selectors: &Selectors) -> Result<Option<Url>, ScrapeError> {
        let href = self
            .document
            .select(&selectors.next_button)
            .next()
            .and_then(|button| button.select(&selectors.next_link).next())
            .and_then(|link| link.value().attr("href"))
            .map(str::trim)
            .filter(|href| !href.is_empty());

        match href {
            Some(href) => self
                .url
                .join(href)
                .map(Some)
                .map_err(|source| ScrapeError::NextPage {
                    href: href.to_string(),
                    source,
                }),
            None => Ok(None),
        }
    }

    /// All post nodes on this page, in document order
    pub fn post_nodes<'a>(&'a self, selectors: &Selectors) -> Vec<ElementRef<'a>> {
        crate::crawler::find_post_nodes(&self.document, selectors)
    }
}
