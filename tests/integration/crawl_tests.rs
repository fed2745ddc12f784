//! Integration tests for the crawler
//!
//! These tests use wiremock to serve a small MediaWiki-like site and
//! exercise the HTTP fetcher and the full crawl end-to-end.

use std::time::{Duration, Instant};
use wikitree::config::{
    Config, CrawlConfig, FailurePolicy, FetchConfig, OutputConfig, UserAgentConfig,
};
use wikitree::crawler::{crawl_category, FetchError, HttpFetcher, PageKind, PageSource};
use wikitree::dataset::Dataset;
use wikitree::output::write_records;
use wikitree::WikitreeError;
use wiremock::matchers::{header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

const USER_AGENT: &str = "TestBot/1.0.0 (+https://example.com/contact; test@example.com)";

fn user_agent() -> UserAgentConfig {
    UserAgentConfig {
        crawler_name: "TestBot".to_string(),
        crawler_version: "1.0.0".to_string(),
        contact_url: "https://example.com/contact".to_string(),
        contact_email: "test@example.com".to_string(),
    }
}

/// Fast timings: short backoff, no politeness pause
fn fast_fetch(max_attempts: u32) -> FetchConfig {
    FetchConfig {
        timeout_secs: 1,
        max_attempts,
        initial_backoff_ms: 10,
        max_backoff_ms: 50,
        jitter_ms: 5,
        politeness_min_ms: 0,
        politeness_max_ms: 0,
    }
}

fn create_test_config(on_failure: FailurePolicy) -> Config {
    Config {
        user_agent: user_agent(),
        fetch: fast_fetch(3),
        crawl: CrawlConfig { on_failure },
        output: OutputConfig::default(),
        roots: vec![],
    }
}

fn category_html(title: &str, articles: &[&str], subcategories: &[&str]) -> String {
    let members: String = articles
        .iter()
        .map(|a| format!(r#"<li><a href="/wiki/{0}" title="{0}">{0}</a></li>"#, a))
        .collect();
    let tree: String = subcategories
        .iter()
        .map(|c| {
            format!(
                r#"<div class="CategoryTreeItem"><span class="CategoryTreeBullet"></span><a href="/wiki/Category:{0}" title="Category:{0}">{0}</a></div>"#,
                c
            )
        })
        .collect();
    format!(
        r#"<!DOCTYPE html><html><head><title>{0}</title></head><body>
        <h1 id="firstHeading"><span class="mw-page-title-namespace">Category</span>:<span class="mw-page-title-main">{0}</span></h1>
        <ul><li><a class="interlanguage-link-target" href="https://es.wikipedia.org/wiki/Categor%C3%ADa:{0}" hreflang="es">Español</a></li></ul>
        <div id="mw-subcategories">{1}</div>
        <div id="mw-pages"><h2>Pages in category</h2><div class="mw-content-ltr"><div class="mw-category"><ul>{2}</ul></div></div></div>
        </body></html>"#,
        title, tree, members
    )
}

fn article_html(title: &str, sections: &[(&str, usize)]) -> String {
    let body: String = sections
        .iter()
        .map(|(heading, words)| {
            format!(
                r#"<div class="mw-heading mw-heading2"><h2 id="{0}">{0}</h2><span class="mw-editsection">[edit]</span></div>
                <style>.mw-parser-output .hatnote {{ font-style: italic }}</style>
                <p>{1}</p>"#,
                heading,
                vec!["lorem"; *words].join(" ")
            )
        })
        .collect();
    format!(
        r#"<!DOCTYPE html><html><body>
        <h1 id="firstHeading"><span class="mw-page-title-main">{0}</span></h1>
        <div class="mw-parser-output"><p>Lead paragraph.</p>{1}
        <div class="mw-authority-control"><div class="navbox">Authority control databases</div></div>
        </div></body></html>"#,
        title, body
    )
}

async fn mount_page(server: &MockServer, page_path: &str, body: String, expected_hits: u64) {
    Mock::given(method("GET"))
        .and(path(page_path))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_string(body)
                .insert_header("content-type", "text/html; charset=UTF-8"),
        )
        .expect(expected_hits)
        .mount(server)
        .await;
}

#[tokio::test]
async fn test_full_crawl_over_http() {
    let mock_server = MockServer::start().await;
    let base_url = mock_server.uri();

    // C0 has two articles and one subcategory; C1 links back to C0
    mount_page(
        &mock_server,
        "/wiki/Category:C0",
        category_html("C0", &["A1", "A2"], &["C1"]),
        1,
    )
    .await;
    mount_page(
        &mock_server,
        "/wiki/Category:C1",
        category_html("C1", &[], &["C0"]),
        1,
    )
    .await;
    mount_page(&mock_server, "/wiki/A1", article_html("A1", &[("Intro", 50)]), 1).await;
    mount_page(&mock_server, "/wiki/A2", article_html("A2", &[]), 1).await;

    let config = create_test_config(FailurePolicy::Abort);
    let outcome = crawl_category(&config, &format!("{}/wiki/Category:C0", base_url))
        .await
        .expect("Crawl failed");

    assert_eq!(outcome.records.len(), 2);

    let root = &outcome.records[0];
    assert_eq!(root.id, format!("{}/wiki/Category:C0", base_url));
    assert_eq!(root.parent_id, None);
    assert_eq!(root.name, "C0");
    assert_eq!(
        root.languages,
        vec!["https://es.wikipedia.org/wiki/Categoría:C0".to_string()]
    );
    assert_eq!(root.articles.len(), 2);
    assert_eq!(root.articles[0].id, format!("{}/wiki/A1", base_url));
    assert_eq!(root.articles[0].name, "A1");
    assert_eq!(root.articles[0].sections.len(), 1);
    assert_eq!(root.articles[0].sections[0].name, "Intro");
    assert_eq!(root.articles[0].sections[0].word_count, 50);
    assert!(root.articles[1].sections.is_empty());

    let child = &outcome.records[1];
    assert_eq!(child.id, format!("{}/wiki/Category:C1", base_url));
    assert_eq!(child.parent_id, Some(root.id.clone()));
    assert!(child.articles.is_empty());

    assert_eq!(outcome.stats.categories, 2);
    assert_eq!(outcome.stats.articles, 2);
    assert_eq!(outcome.stats.sections, 1);
    assert!(outcome.failures.is_empty());
}

#[tokio::test]
async fn test_crawled_records_answer_word_count_lookups() {
    let mock_server = MockServer::start().await;
    let base_url = mock_server.uri();

    mount_page(
        &mock_server,
        "/wiki/Category:Venues",
        category_html("Venues", &["Arena"], &[]),
        1,
    )
    .await;
    mount_page(
        &mock_server,
        "/wiki/Arena",
        article_html("Arena", &[("History", 12), ("Events", 8)]),
        1,
    )
    .await;

    let config = create_test_config(FailurePolicy::Abort);
    let outcome = crawl_category(&config, &format!("{}/wiki/Category:Venues", base_url))
        .await
        .expect("Crawl failed");

    let dir = tempfile::tempdir().expect("Failed to create temp dir");
    write_records(&dir.path().join("data_en.json"), &outcome.records)
        .expect("Failed to write records");

    let mut dataset = Dataset::new();
    dataset.load(dir.path(), "en").expect("Failed to load records");

    let article = &outcome.records[0].articles[0];
    let section_total: u64 = article.sections.iter().map(|s| s.word_count).sum();
    assert_eq!(section_total, 20);
    assert_eq!(dataset.article_word_count("en", &article.id), section_total);
}

#[tokio::test]
async fn test_reserved_characters_in_titles_are_requested_encoded() {
    let mock_server = MockServer::start().await;
    let base_url = mock_server.uri();

    mount_page(
        &mock_server,
        "/wiki/Category:Songs",
        category_html("Songs", &["100%25_Pure", "Why%3F_(song)"], &[]),
        1,
    )
    .await;
    mount_page(
        &mock_server,
        "/wiki/100%25_Pure",
        article_html("100% Pure", &[("Tracks", 4)]),
        1,
    )
    .await;
    mount_page(
        &mock_server,
        "/wiki/Why%3F_(song)",
        article_html("Why? (song)", &[("Charts", 2)]),
        1,
    )
    .await;

    let config = create_test_config(FailurePolicy::Abort);
    let outcome = crawl_category(&config, &format!("{}/wiki/Category:Songs", base_url))
        .await
        .expect("Crawl failed");

    let articles = &outcome.records[0].articles;
    assert_eq!(articles.len(), 2);
    assert_eq!(articles[0].id, format!("{}/wiki/100%_Pure", base_url));
    assert_eq!(articles[0].sections[0].word_count, 4);
    assert_eq!(articles[1].id, format!("{}/wiki/Why?_(song)", base_url));
    assert_eq!(articles[1].sections[0].word_count, 2);

    let received: Vec<String> = mock_server
        .received_requests()
        .await
        .expect("Request recording is enabled")
        .iter()
        .map(|request| request.url.path().to_string())
        .collect();
    assert_eq!(
        received,
        vec!["/wiki/Category:Songs", "/wiki/100%25_Pure", "/wiki/Why%3F_(song)"]
    );
}

#[tokio::test]
async fn test_transient_failures_are_retried() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/wiki/Flaky"))
        .respond_with(ResponseTemplate::new(500))
        .up_to_n_times(2)
        .mount(&mock_server)
        .await;
    mount_page(&mock_server, "/wiki/Flaky", "<html>ok</html>".to_string(), 1).await;

    let fetcher = HttpFetcher::new(&user_agent(), &fast_fetch(3)).expect("Failed to build fetcher");
    let body = fetcher
        .fetch(&format!("{}/wiki/Flaky", mock_server.uri()))
        .await
        .expect("Fetch should succeed on the third attempt");

    assert!(body.contains("ok"));
    let requests = mock_server.received_requests().await.unwrap_or_default();
    assert_eq!(requests.len(), 3);
}

#[tokio::test]
async fn test_fetch_gives_up_after_max_attempts() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/wiki/Down"))
        .respond_with(ResponseTemplate::new(503))
        .expect(3)
        .mount(&mock_server)
        .await;

    let fetcher = HttpFetcher::new(&user_agent(), &fast_fetch(3)).expect("Failed to build fetcher");
    let result = fetcher
        .fetch(&format!("{}/wiki/Down", mock_server.uri()))
        .await;

    match result {
        Err(FetchError::Exhausted { attempts, last, .. }) => {
            assert_eq!(attempts, 3);
            assert!(matches!(*last, FetchError::Status { status: 503, .. }));
        }
        other => panic!("expected exhausted fetch, got {:?}", other),
    }
}

#[tokio::test]
async fn test_not_found_is_retried_like_any_failure() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/wiki/Missing"))
        .respond_with(ResponseTemplate::new(404))
        .expect(2)
        .mount(&mock_server)
        .await;

    let fetcher = HttpFetcher::new(&user_agent(), &fast_fetch(2)).expect("Failed to build fetcher");
    let result = fetcher
        .fetch(&format!("{}/wiki/Missing", mock_server.uri()))
        .await;
    assert!(matches!(
        result,
        Err(FetchError::Exhausted { attempts: 2, .. })
    ));
}

#[tokio::test]
async fn test_timeout_counts_as_failed_attempt() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/wiki/Slow"))
        .respond_with(ResponseTemplate::new(200).set_delay(Duration::from_secs(3)))
        .mount(&mock_server)
        .await;

    let fetcher = HttpFetcher::new(&user_agent(), &fast_fetch(1)).expect("Failed to build fetcher");
    let result = fetcher
        .fetch(&format!("{}/wiki/Slow", mock_server.uri()))
        .await;

    match result {
        Err(FetchError::Exhausted { attempts, last, .. }) => {
            assert_eq!(attempts, 1);
            assert!(matches!(*last, FetchError::Timeout { .. }));
        }
        other => panic!("expected timeout, got {:?}", other),
    }
}

#[tokio::test]
async fn test_user_agent_header_is_sent() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/wiki/Identified"))
        .and(header("user-agent", USER_AGENT))
        .respond_with(ResponseTemplate::new(200).set_body_string("hello"))
        .expect(1)
        .mount(&mock_server)
        .await;

    let fetcher = HttpFetcher::new(&user_agent(), &fast_fetch(1)).expect("Failed to build fetcher");
    let body = fetcher
        .fetch(&format!("{}/wiki/Identified", mock_server.uri()))
        .await
        .expect("Request without the bot header would not match");
    assert_eq!(body, "hello");
}

#[tokio::test]
async fn test_politeness_pause_after_every_attempt() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/wiki/Down"))
        .respond_with(ResponseTemplate::new(503))
        .expect(2)
        .mount(&mock_server)
        .await;

    let fetch = FetchConfig {
        initial_backoff_ms: 0,
        max_backoff_ms: 0,
        jitter_ms: 0,
        politeness_min_ms: 150,
        politeness_max_ms: 150,
        ..fast_fetch(2)
    };
    let fetcher = HttpFetcher::new(&user_agent(), &fetch).expect("Failed to build fetcher");

    let start = Instant::now();
    let result = fetcher
        .fetch(&format!("{}/wiki/Down", mock_server.uri()))
        .await;

    assert!(result.is_err());
    assert!(
        start.elapsed() >= Duration::from_millis(300),
        "expected two pauses, took {:?}",
        start.elapsed()
    );
}

#[tokio::test]
async fn test_crawl_aborts_on_unreachable_article() {
    let mock_server = MockServer::start().await;
    let base_url = mock_server.uri();

    mount_page(
        &mock_server,
        "/wiki/Category:Root",
        category_html("Root", &["Broken"], &["Child"]),
        1,
    )
    .await;
    mount_page(
        &mock_server,
        "/wiki/Category:Child",
        category_html("Child", &[], &[]),
        0,
    )
    .await;
    Mock::given(method("GET"))
        .and(path("/wiki/Broken"))
        .respond_with(ResponseTemplate::new(500))
        .expect(3)
        .mount(&mock_server)
        .await;

    let config = create_test_config(FailurePolicy::Abort);
    let result = crawl_category(&config, &format!("{}/wiki/Category:Root", base_url)).await;

    match result {
        Err(WikitreeError::Fetch(FetchError::Exhausted { url, .. })) => {
            assert_eq!(url, format!("{}/wiki/Broken", base_url));
        }
        other => panic!("expected aborted crawl, got {:?}", other.map(|o| o.records)),
    }
}

#[tokio::test]
async fn test_crawl_continues_with_skip_policy() {
    let mock_server = MockServer::start().await;
    let base_url = mock_server.uri();

    mount_page(
        &mock_server,
        "/wiki/Category:Root",
        category_html("Root", &["Broken", "Fine"], &["Gone", "Child"]),
        1,
    )
    .await;
    mount_page(
        &mock_server,
        "/wiki/Category:Child",
        category_html("Child", &[], &[]),
        1,
    )
    .await;
    mount_page(&mock_server, "/wiki/Fine", article_html("Fine", &[("Body", 4)]), 1).await;
    Mock::given(method("GET"))
        .and(path("/wiki/Broken"))
        .respond_with(ResponseTemplate::new(500))
        .expect(3)
        .mount(&mock_server)
        .await;
    Mock::given(method("GET"))
        .and(path("/wiki/Category:Gone"))
        .respond_with(ResponseTemplate::new(404))
        .expect(3)
        .mount(&mock_server)
        .await;

    let config = create_test_config(FailurePolicy::Skip);
    let outcome = crawl_category(&config, &format!("{}/wiki/Category:Root", base_url))
        .await
        .expect("Skip policy should not fail the crawl");

    let ids: Vec<_> = outcome.records.iter().map(|r| r.id.as_str()).collect();
    assert_eq!(
        ids,
        vec![
            format!("{}/wiki/Category:Root", base_url),
            format!("{}/wiki/Category:Child", base_url),
        ]
    );
    assert_eq!(outcome.records[0].articles.len(), 1);
    assert_eq!(outcome.records[0].articles[0].name, "Fine");

    let kinds: Vec<_> = outcome.failures.iter().map(|f| f.kind).collect();
    assert_eq!(kinds, vec![PageKind::Article, PageKind::Category]);
    assert_eq!(outcome.stats.categories, 3);
    assert_eq!(outcome.stats.articles, 1);
    assert_eq!(outcome.stats.sections, 1);
}
