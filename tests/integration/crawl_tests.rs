//! Integration tests for the crawler
//!
//! These tests use wiremock to create mock HTTP servers and run the full
//! crawl cycle end-to-end over the real reqwest transport.

use mail_ripple::config::Config;
use mail_ripple::crawler::{find_email_addresses, Coordinator};
use mail_ripple::url::normalize_domain;
use mail_ripple::MailRippleError;
use std::collections::BTreeSet;
use std::time::Duration;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// Creates a test configuration with short timeouts
fn create_test_config() -> Config {
    let mut config = Config::default();
    config.crawler.request_timeout_ms = 500;
    config.crawler.connect_timeout_ms = 500;
    config
}

fn html(body: &str) -> ResponseTemplate {
    ResponseTemplate::new(200)
        .set_body_string(format!("<html><body>{}</body></html>", body))
        .insert_header("content-type", "text/html")
}

async fn mount_page(server: &MockServer, route: &str, body: &str) {
    Mock::given(method("GET"))
        .and(path(route))
        .respond_with(html(body))
        .expect(1)
        .mount(server)
        .await;
}

fn emails(list: &[&str]) -> BTreeSet<String> {
    list.iter().map(|s| s.to_string()).collect()
}

#[tokio::test]
async fn test_full_crawl_five_linked_pages() {
    let mock_server = MockServer::start().await;
    let nav = r#"
        <a href="/">Home</a>
        <a class="nav" href="/about">About</a>
        <a href = "/team">Team</a>
        <a href="/contact">Contact</a>
        <a href="/jobs">Jobs</a>
        <a href="/logo.png"><img src="/logo.png"></a>
        <a href="https://elsewhere.example/">Partner</a>
    "#;

    // Every page links to every other page; expect(1) asserts single visits
    mount_page(&mock_server, "/", &format!("{} info@shop.com", nav)).await;
    mount_page(&mock_server, "/about", &format!("{} info@shop.com", nav)).await;
    mount_page(&mock_server, "/team", nav).await;
    mount_page(
        &mock_server,
        "/contact",
        &format!(r#"{} <a href="mailto:orders@shop.com">Orders</a>"#, nav),
    )
    .await;
    mount_page(&mock_server, "/jobs", &format!("{} orders@shop.com", nav)).await;

    Mock::given(method("GET"))
        .and(path("/logo.png"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&mock_server)
        .await;

    let report = find_email_addresses(&mock_server.uri(), &create_test_config())
        .await
        .expect("Crawl failed to start");

    assert_eq!(report.emails, emails(&["info@shop.com", "orders@shop.com"]));
    assert_eq!(report.stats.pages_fetched, 5);
    assert_eq!(report.stats.pages_failed, 0);
    assert_eq!(
        report.boundary.as_deref(),
        Some(format!("{}/", mock_server.uri()).as_str())
    );
}

#[tokio::test]
async fn test_parallel_crawl_same_result() {
    let mock_server = MockServer::start().await;
    let nav = r#"<a href="/a">A</a> <a href="/b">B</a> <a href="/c">C</a>"#;

    mount_page(&mock_server, "/", nav).await;
    mount_page(&mock_server, "/a", &format!("{} a@site.io", nav)).await;
    mount_page(&mock_server, "/b", &format!("{} b@site.io", nav)).await;
    mount_page(&mock_server, "/c", &format!("{} a@site.io", nav)).await;

    let mut config = create_test_config();
    config.crawler.max_concurrent_fetches = 3;

    let report = find_email_addresses(&mock_server.uri(), &config)
        .await
        .expect("Crawl failed to start");

    assert_eq!(report.emails, emails(&["a@site.io", "b@site.io"]));
    assert_eq!(report.urls_visited, 4);
}

#[tokio::test]
async fn test_seed_not_found_stops_crawl() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/"))
        .respond_with(ResponseTemplate::new(404).set_body_string(
            r#"<a href="/contact">Contact</a> lost@shop.com"#,
        ))
        .expect(1)
        .mount(&mock_server)
        .await;

    Mock::given(method("GET"))
        .and(path("/contact"))
        .respond_with(html("hidden@shop.com"))
        .expect(0)
        .mount(&mock_server)
        .await;

    let report = find_email_addresses(&mock_server.uri(), &create_test_config())
        .await
        .expect("Crawl failed to start");

    assert!(report.emails.is_empty());
    assert!(report.boundary.is_none());
    assert_eq!(report.stats.pages_failed, 1);
}

#[tokio::test]
async fn test_slow_page_retried_three_times_then_skipped() {
    let mock_server = MockServer::start().await;

    mount_page(
        &mock_server,
        "/",
        r#"<a href="/slow">Slow</a> <a href="/fast">Fast</a>"#,
    )
    .await;

    // Slower than the 500ms request timeout on every attempt
    Mock::given(method("GET"))
        .and(path("/slow"))
        .respond_with(html("slow@shop.com").set_delay(Duration::from_secs(2)))
        .expect(3)
        .mount(&mock_server)
        .await;

    mount_page(
        &mock_server,
        "/fast",
        r#"<a href="/slow">Slow</a> <a href="/sibling">Sibling</a> fast@shop.com"#,
    )
    .await;
    mount_page(&mock_server, "/sibling", "sibling@shop.com").await;

    let report = find_email_addresses(&mock_server.uri(), &create_test_config())
        .await
        .expect("Crawl failed to start");

    assert_eq!(report.emails, emails(&["fast@shop.com", "sibling@shop.com"]));
    assert_eq!(report.stats.timeout_failures, 1);
}

#[tokio::test]
async fn test_request_timeout_status_is_retried() {
    let mock_server = MockServer::start().await;

    mount_page(&mock_server, "/", r#"<a href="/busy">Busy</a> home@shop.com"#).await;

    Mock::given(method("GET"))
        .and(path("/busy"))
        .respond_with(ResponseTemplate::new(408))
        .expect(3)
        .mount(&mock_server)
        .await;

    let report = find_email_addresses(&mock_server.uri(), &create_test_config())
        .await
        .expect("Crawl failed to start");

    assert_eq!(report.emails, emails(&["home@shop.com"]));
    assert_eq!(report.stats.timeout_failures, 1);
}

#[tokio::test]
async fn test_server_error_not_retried() {
    let mock_server = MockServer::start().await;

    mount_page(&mock_server, "/", r#"<a href="/broken">Broken</a>"#).await;

    Mock::given(method("GET"))
        .and(path("/broken"))
        .respond_with(ResponseTemplate::new(503))
        .expect(1)
        .mount(&mock_server)
        .await;

    let report = find_email_addresses(&mock_server.uri(), &create_test_config())
        .await
        .expect("Crawl failed to start");

    assert!(report.emails.is_empty());
    assert_eq!(report.stats.pages_failed, 1);
    assert_eq!(report.stats.timeout_failures, 0);
}

#[tokio::test]
async fn test_seed_redirect_sets_boundary() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/"))
        .respond_with(ResponseTemplate::new(301).insert_header("location", "/home/"))
        .expect(1)
        .mount(&mock_server)
        .await;

    mount_page(
        &mock_server,
        "/home/",
        r#"<a href="team">Team</a> <a href="/about">About</a>"#,
    )
    .await;
    mount_page(&mock_server, "/home/team", "team@shop.com").await;

    Mock::given(method("GET"))
        .and(path("/about"))
        .respond_with(html("about@shop.com"))
        .expect(0)
        .mount(&mock_server)
        .await;

    let report = find_email_addresses(&mock_server.uri(), &create_test_config())
        .await
        .expect("Crawl failed to start");

    assert_eq!(
        report.boundary.as_deref(),
        Some(format!("{}/home/", mock_server.uri()).as_str())
    );
    assert_eq!(report.emails, emails(&["team@shop.com"]));
}

#[tokio::test]
async fn test_unreachable_seed_yields_empty_report() {
    let config = create_test_config();
    let coordinator = Coordinator::from_config(&config).expect("Failed to build coordinator");

    let report = coordinator.run(&normalize_domain("127.0.0.1:1")).await;

    assert!(report.emails.is_empty());
    assert_eq!(report.stats.pages_fetched, 0);
    assert_eq!(report.stats.pages_failed, 1);
}

#[tokio::test]
async fn test_deadline_cuts_crawl_short() {
    let mock_server = MockServer::start().await;

    mount_page(&mock_server, "/", r#"<a href="/slow">Slow</a> seed@shop.com"#).await;

    Mock::given(method("GET"))
        .and(path("/slow"))
        .respond_with(html("slow@shop.com").set_delay(Duration::from_secs(5)))
        .mount(&mock_server)
        .await;

    let mut config = create_test_config();
    config.crawler.request_timeout_ms = 10_000;
    config.crawler.crawl_deadline_secs = Some(1);

    let report = find_email_addresses(&mock_server.uri(), &config)
        .await
        .expect("Crawl failed to start");

    assert!(report.deadline_reached);
    assert_eq!(report.emails, emails(&["seed@shop.com"]));
}

#[tokio::test]
async fn test_invalid_config_is_rejected_before_crawling() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .respond_with(html("never@shop.com"))
        .expect(0)
        .mount(&mock_server)
        .await;

    let mut config = create_test_config();
    config.crawler.max_attempts = 0;

    let result = find_email_addresses(&mock_server.uri(), &config).await;
    assert!(matches!(result, Err(MailRippleError::Config(_))));
}
