//! Integration tests for the scraper
//!
//! These tests use wiremock to serve paginated listings and run the full
//! fetch / extract / paginate loop end-to-end.

use subreddit_scraper::config::{Config, OutputConfig, ScraperConfig, UserAgentConfig};
use subreddit_scraper::output::{read_table, write_table};
use subreddit_scraper::{ScrapeError, SubredditScraper};
use wiremock::matchers::{header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// Creates a test configuration with no courtesy delay
fn create_test_config(seed_url: String, target_posts: usize) -> Config {
    Config {
        scraper: ScraperConfig {
            seed_url,
            target_posts,
            delay_ms: 0,
        },
        user_agent: UserAgentConfig {
            value: "test-agent".to_string(),
        },
        output: OutputConfig::default(),
    }
}

/// Renders a listing page with `count` posts numbered from `first`
fn listing_page(first: usize, count: usize, next_href: Option<&str>) -> String {
    let mut html = String::from("<html><head><title>top</title></head><body><div id=\"siteTable\">");
    for n in first..first + count {
        let author = if n % 10 == 3 {
            String::new()
        } else {
            format!(r#"<a class="author" href="/user/u{n}">u{n}</a>"#)
        };
        let comments = if n % 7 == 0 {
            "comment".to_string()
        } else {
            format!("{n} comments")
        };
        html.push_str(&format!(
            r#"<div class="thing link">
                <div class="score unvoted" title="{score}">{score}</div>
                <p class="title"><a class="title">Post number {n}</a></p>
                <p class="tagline">submitted <time class="live-timestamp" title="Tue Jun 5 15:53:56 2018 UTC">ago</time> by {author}</p>
                <a class="bylink comments" href="/r/test/comments/{n}/">{comments}</a>
            </div>"#,
            score = n * 10
        ));
    }
    html.push_str("</div>");
    if let Some(href) = next_href {
        html.push_str(&format!(
            r#"<div class="nav-buttons"><span class="nextprev">view more: <span class="next-button"><a href="{href}" rel="nofollow next">next &rsaquo;</a></span></span></div>"#
        ));
    }
    html.push_str("</body></html>");
    html
}

async fn mount_page(server: &MockServer, page_path: &str, body: String, expected: u64) {
    Mock::given(method("GET"))
        .and(path(page_path))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_string(body)
                .insert_header("content-type", "text/html; charset=UTF-8"),
        )
        .expect(expected)
        .mount(server)
        .await;
}

#[tokio::test]
async fn test_threshold_is_floor_not_cap() {
    let server = MockServer::start().await;

    mount_page(&server, "/page/1", listing_page(0, 30, Some("/page/2")), 1).await;
    mount_page(&server, "/page/2", listing_page(30, 30, Some("/page/3")), 1).await;
    mount_page(&server, "/page/3", listing_page(60, 30, Some("/page/4")), 1).await;
    mount_page(&server, "/page/4", listing_page(90, 30, Some("/page/5")), 1).await;
    // Never reached: the fourth page already crosses the target
    mount_page(&server, "/page/5", listing_page(120, 30, None), 0).await;

    let config = create_test_config(format!("{}/page/1", server.uri()), 100);
    let scraper = SubredditScraper::new(&config).unwrap();
    let posts = scraper.run(&config.scraper.seed_url).await.unwrap();

    assert_eq!(posts.len(), 120);
    assert_eq!(posts[0].title, "Post number 0");
    assert_eq!(posts[119].title, "Post number 119");
}

#[tokio::test]
async fn test_final_page_pushes_past_target() {
    let server = MockServer::start().await;

    mount_page(&server, "/page/1", listing_page(0, 95, Some("/page/2")), 1).await;
    mount_page(&server, "/page/2", listing_page(95, 30, Some("/page/3")), 1).await;
    mount_page(&server, "/page/3", listing_page(125, 30, None), 0).await;

    let config = create_test_config(format!("{}/page/1", server.uri()), 100);
    let scraper = SubredditScraper::new(&config).unwrap();
    let posts = scraper.run(&config.scraper.seed_url).await.unwrap();

    assert_eq!(posts.len(), 125);
}

#[tokio::test]
async fn test_stops_early_without_next_page() {
    let server = MockServer::start().await;

    mount_page(&server, "/page/1", listing_page(0, 25, Some("/page/2")), 1).await;
    mount_page(&server, "/page/2", listing_page(25, 25, None), 1).await;

    let config = create_test_config(format!("{}/page/1", server.uri()), 100);
    let scraper = SubredditScraper::new(&config).unwrap();
    let posts = scraper.run(&config.scraper.seed_url).await.unwrap();

    assert_eq!(posts.len(), 50);
}

#[tokio::test]
async fn test_record_fields_and_order() {
    let server = MockServer::start().await;

    mount_page(&server, "/page/1", listing_page(0, 5, Some("/page/2")), 1).await;
    mount_page(&server, "/page/2", listing_page(5, 5, None), 1).await;

    let config = create_test_config(format!("{}/page/1", server.uri()), 100);
    let scraper = SubredditScraper::new(&config).unwrap();
    let posts = scraper.run(&config.scraper.seed_url).await.unwrap();

    let titles: Vec<&str> = posts.iter().map(|p| p.title.as_str()).collect();
    assert_eq!(
        titles,
        (0..10)
            .map(|n| format!("Post number {}", n))
            .collect::<Vec<_>>()
    );

    // Post 0 has the bare "comment" label, post 3 a deleted author
    assert_eq!(posts[0].comments, 0);
    assert_eq!(posts[3].username, "[Deleted]");
    assert_eq!(posts[4].username, "u4");
    assert_eq!(posts[4].comments, 4);
    assert_eq!(posts[4].upvotes, "40");
    assert_eq!(posts[4].date, "Tue Jun 5 15:53:56 2018 UTC");
    assert_eq!(posts[4].link, "/r/test/comments/4/");
}

#[tokio::test]
async fn test_absolute_next_link() {
    let server = MockServer::start().await;
    let next = format!("{}/page/2", server.uri());

    mount_page(&server, "/page/1", listing_page(0, 3, Some(&next)), 1).await;
    mount_page(&server, "/page/2", listing_page(3, 3, None), 1).await;

    let config = create_test_config(format!("{}/page/1", server.uri()), 100);
    let scraper = SubredditScraper::new(&config).unwrap();
    let posts = scraper.run(&config.scraper.seed_url).await.unwrap();

    assert_eq!(posts.len(), 6);
}

#[tokio::test]
async fn test_sends_identifying_user_agent() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/page/1"))
        .and(header("user-agent", "test-agent"))
        .respond_with(ResponseTemplate::new(200).set_body_string(listing_page(0, 2, None)))
        .expect(1)
        .mount(&server)
        .await;

    let config = create_test_config(format!("{}/page/1", server.uri()), 100);
    let scraper = SubredditScraper::new(&config).unwrap();
    let posts = scraper.run(&config.scraper.seed_url).await.unwrap();

    assert_eq!(posts.len(), 2);
}

#[tokio::test]
async fn test_error_status_aborts_run() {
    let server = MockServer::start().await;

    mount_page(&server, "/page/1", listing_page(0, 25, Some("/page/2")), 1).await;
    Mock::given(method("GET"))
        .and(path("/page/2"))
        .respond_with(ResponseTemplate::new(503))
        .expect(1)
        .mount(&server)
        .await;

    let config = create_test_config(format!("{}/page/1", server.uri()), 100);
    let scraper = SubredditScraper::new(&config).unwrap();
    let result = scraper.run(&config.scraper.seed_url).await;

    match result {
        Err(ScrapeError::Fetch { url, status }) => {
            assert_eq!(status, 503);
            assert!(url.ends_with("/page/2"));
        }
        other => panic!("expected fetch error, got {:?}", other),
    }
}

#[tokio::test]
async fn test_redirect_on_seed_is_followed() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/old"))
        .respond_with(
            ResponseTemplate::new(301).insert_header("location", format!("{}/page/1", server.uri()).as_str()),
        )
        .mount(&server)
        .await;
    mount_page(&server, "/page/1", listing_page(0, 4, None), 1).await;

    let config = create_test_config(format!("{}/old", server.uri()), 100);
    let scraper = SubredditScraper::new(&config).unwrap();
    let posts = scraper.run(&config.scraper.seed_url).await.unwrap();

    assert_eq!(posts.len(), 4);
}

#[tokio::test]
async fn test_missing_required_field_aborts_run() {
    let server = MockServer::start().await;

    let broken = listing_page(25, 25, None).replacen("score unvoted", "score", 1);
    mount_page(&server, "/page/1", listing_page(0, 25, Some("/page/2")), 1).await;
    mount_page(&server, "/page/2", broken, 1).await;

    let config = create_test_config(format!("{}/page/1", server.uri()), 100);
    let scraper = SubredditScraper::new(&config).unwrap();
    let result = scraper.run(&config.scraper.seed_url).await;

    assert!(matches!(
        result,
        Err(ScrapeError::Extraction { field: "upvotes" })
    ));
}

#[tokio::test]
async fn test_courtesy_delay_between_pages() {
    let server = MockServer::start().await;

    mount_page(&server, "/page/1", listing_page(0, 1, Some("/page/2")), 1).await;
    mount_page(&server, "/page/2", listing_page(1, 1, Some("/page/3")), 1).await;
    mount_page(&server, "/page/3", listing_page(2, 1, None), 1).await;

    let mut config = create_test_config(format!("{}/page/1", server.uri()), 100);
    config.scraper.delay_ms = 60;
    let scraper = SubredditScraper::new(&config).unwrap();

    let start = std::time::Instant::now();
    let posts = scraper.run(&config.scraper.seed_url).await.unwrap();

    assert_eq!(posts.len(), 3);
    // Two pauses: before page 2 and before page 3
    assert!(start.elapsed() >= std::time::Duration::from_millis(120));
}

#[tokio::test]
async fn test_snapshot_holds_last_page() {
    let server = MockServer::start().await;
    let last_page = listing_page(2, 2, None);

    mount_page(&server, "/page/1", listing_page(0, 2, Some("/page/2")), 1).await;
    mount_page(&server, "/page/2", last_page.clone(), 1).await;

    let dir = tempfile::tempdir().unwrap();
    let snapshot = dir.path().join("subreddit.html");

    let mut config = create_test_config(format!("{}/page/1", server.uri()), 100);
    config.output.snapshot_path = Some(snapshot.clone());
    let scraper = SubredditScraper::new(&config).unwrap();
    scraper.run(&config.scraper.seed_url).await.unwrap();

    assert_eq!(std::fs::read_to_string(&snapshot).unwrap(), last_page);
}

#[tokio::test]
async fn test_scrape_then_write_and_read_back() {
    let server = MockServer::start().await;

    mount_page(&server, "/page/1", listing_page(0, 25, Some("/page/2")), 1).await;
    mount_page(&server, "/page/2", listing_page(25, 25, None), 1).await;

    let config = create_test_config(format!("{}/page/1", server.uri()), 100);
    let scraper = SubredditScraper::new(&config).unwrap();
    let posts = scraper.run(&config.scraper.seed_url).await.unwrap();

    let dir = tempfile::tempdir().unwrap();
    let table = dir.path().join("Top 100 posts in a subreddit.csv");
    write_table(&posts, &table, '|').unwrap();

    let rows = read_table(&table, '|').unwrap();
    assert_eq!(rows.len(), posts.len());
    for (i, row) in rows.iter().enumerate() {
        assert_eq!(row.index, i);
        assert_eq!(row.record, posts[i]);
    }
}

#[tokio::test]
async fn test_relative_next_link_after_redirect() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/old/top"))
        .respond_with(
            ResponseTemplate::new(301)
                .insert_header("location", format!("{}/r/gaming/top", server.uri()).as_str()),
        )
        .expect(1)
        .mount(&server)
        .await;
    // Path-relative href: must resolve against the redirect target
    mount_page(&server, "/r/gaming/top", listing_page(0, 2, Some("page2")), 1).await;
    mount_page(&server, "/r/gaming/page2", listing_page(2, 2, None), 1).await;
    mount_page(&server, "/old/page2", listing_page(2, 2, None), 0).await;

    let config = create_test_config(format!("{}/old/top", server.uri()), 100);
    let scraper = SubredditScraper::new(&config).unwrap();
    let posts = scraper.run(&config.scraper.seed_url).await.unwrap();

    assert_eq!(posts.len(), 4);
    assert_eq!(posts[3].title, "Post number 3");
}
