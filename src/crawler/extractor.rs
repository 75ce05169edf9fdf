//! Post extraction from listing documents
//!
//! Every post on an old-style listing page is a `div.thing`. Each field is
//! looked up independently inside that node:
//!
//! | Field    | Node                  | Value               |
//! |----------|-----------------------|---------------------|
//! | title    | `p.title`             | text, trimmed       |
//! | username | `a.author`            | text, or `[Deleted]`|
//! | date     | `time.live-timestamp` | `title` attribute   |
//! | comments | `a.comments`          | leading count token |
//! | upvotes  | `div.score.unvoted`   | `title` attribute   |
//! | link     | `a.comments`          | `href` attribute    |
//!
//! Only the author may be absent; every other missing node is an
//! `ScrapeError::Extraction` naming the field.

use crate::model::{PostRecord, DELETED_USER};
use crate::ScrapeError;
use scraper::{ElementRef, Html, Selector};

/// Compiled selectors for listing pages
#[derive(Debug, Clone)]
pub struct Selectors {
    pub post: Selector,
    pub title: Selector,
    pub author: Selector,
    pub timestamp: Selector,
    pub comments: Selector,
    pub score: Selector,
    pub next_button: Selector,
    pub next_link: Selector,
}

impl Selectors {
    pub fn new() -> Result<Self, ScrapeError> {
        Ok(Self {
            post: compile("div.thing")?,
            title: compile("p.title")?,
            author: compile("a.author")?,
            timestamp: compile("time.live-timestamp")?,
            comments: compile("a.comments")?,
            score: compile("div.score.unvoted")?,
            next_button: compile("span.next-button")?,
            next_link: compile("a")?,
        })
    }
}

fn compile(css: &str) -> Result<Selector, ScrapeError> {
    Selector::parse(css).map_err(|e| ScrapeError::Selector(format!("{}: {:?}", css, e)))
}

/// Returns every post node in document order
///
/// A page without posts yields an empty list, not an error.
pub fn find_post_nodes<'a>(document: &'a Html, selectors: &Selectors) -> Vec<ElementRef<'a>> {
    document.select(&selectors.post).collect()
}

/// Extracts one record from a post node
pub fn extract_record(post: ElementRef<'_>, selectors: &Selectors) -> Result<PostRecord, ScrapeError> {
    let title = first(post, &selectors.title)
        .map(|el| element_text(el).trim().to_string())
        .ok_or(ScrapeError::Extraction { field: "title" })?;

    // Deleted accounts have no author link at all
    let username = first(post, &selectors.author)
        .map(element_text)
        .unwrap_or_else(|| DELETED_USER.to_string());

    let date = first(post, &selectors.timestamp)
        .and_then(|el| el.value().attr("title"))
        .ok_or(ScrapeError::Extraction { field: "date" })?
        .to_string();

    let comments = first(post, &selectors.comments)
        .map(element_text)
        .ok_or(ScrapeError::Extraction { field: "comments" })
        .and_then(|text| parse_comment_count(&text))?;

    let upvotes = first(post, &selectors.score)
        .and_then(|el| el.value().attr("title"))
        .ok_or(ScrapeError::Extraction { field: "upvotes" })?
        .to_string();

    let link = first(post, &selectors.comments)
        .and_then(|el| el.value().attr("href"))
        .ok_or(ScrapeError::Extraction { field: "link" })?
        .to_string();

    Ok(PostRecord {
        title,
        username,
        date,
        comments,
        upvotes,
        link,
    })
}

/// Parses the comment link text, e.g. "42 comments" or "1,204 comments"
///
/// Posts without comments show the bare word "comment", which counts as 0.
pub fn parse_comment_count(text: &str) -> Result<u32, ScrapeError> {
    let token = text
        .split_whitespace()
        .next()
        .ok_or(ScrapeError::Extraction { field: "comments" })?;

    if token == "comment" {
        return Ok(0);
    }

    token
        .replace(',', "")
        .parse()
        .map_err(|_| ScrapeError::Extraction { field: "comments" })
}

fn first<'a>(post: ElementRef<'a>, selector: &Selector) -> Option<ElementRef<'a>> {
    post.select(selector).next()
}

fn element_text(element: ElementRef<'_>) -> String {
    element.text().collect()
}
