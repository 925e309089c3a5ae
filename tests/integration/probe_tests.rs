//! Prober-level tests: classification, retry bound, backoff behavior

use linktide::config::CheckerConfig;
use linktide::probe::Prober;
use std::time::Duration;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

const PAGE: &str = "https://site.test/";

/// A prober with a 1-second backoff base so tests stay fast
fn fast_prober() -> Prober {
    let config = CheckerConfig {
        grace_days: 3,
        backoff_base_seconds: 1,
        max_concurrent_probes: 4,
        redirect_limit: 10,
    };
    Prober::new(&config, "TestAgent/1.0").expect("failed to build prober")
}

#[tokio::test]
async fn test_200_is_healthy() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/ok"))
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&server)
        .await;

    let result = fast_prober()
        .probe(&format!("{}/ok", server.uri()), PAGE)
        .await;

    assert!(!result.is_broken);
    assert_eq!(result.code, 200);
    assert!(result.reason.is_empty());
}

#[tokio::test]
async fn test_500_retries_three_times_then_terminal() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/down"))
        .respond_with(ResponseTemplate::new(500))
        .expect(3)
        .mount(&server)
        .await;

    let result = fast_prober()
        .probe(&format!("{}/down", server.uri()), PAGE)
        .await;

    assert!(result.is_broken);
    assert_eq!(result.code, 500);
    assert_eq!(
        result.reason,
        "Server error (possibly because of authentication)"
    );
}

#[tokio::test]
async fn test_404_reason() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/gone"))
        .respond_with(ResponseTemplate::new(404))
        .expect(3)
        .mount(&server)
        .await;

    let result = fast_prober()
        .probe(&format!("{}/gone", server.uri()), PAGE)
        .await;

    assert!(result.is_broken);
    assert_eq!(result.code, 404);
    assert_eq!(result.reason, "Page not found");
}

#[tokio::test]
async fn test_transient_failure_recovers_within_attempts() {
    let server = MockServer::start().await;

    // First two attempts fail, the third succeeds
    Mock::given(method("GET"))
        .and(path("/flaky"))
        .respond_with(ResponseTemplate::new(503))
        .up_to_n_times(2)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/flaky"))
        .respond_with(ResponseTemplate::new(200))
        .mount(&server)
        .await;

    let result = fast_prober()
        .probe(&format!("{}/flaky", server.uri()), PAGE)
        .await;

    assert!(!result.is_broken);
    assert_eq!(result.code, 200);
}

#[tokio::test]
async fn test_429_backs_off_and_retries() {
    let server = MockServer::start().await;

    // Retry-After of zero keeps the test fast without losing the retry
    Mock::given(method("GET"))
        .and(path("/limited"))
        .respond_with(ResponseTemplate::new(429).insert_header("Retry-After", "0"))
        .up_to_n_times(2)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/limited"))
        .respond_with(ResponseTemplate::new(200))
        .mount(&server)
        .await;

    let result = fast_prober()
        .probe(&format!("{}/limited", server.uri()), PAGE)
        .await;

    assert!(!result.is_broken);
}

#[tokio::test]
async fn test_429_on_every_attempt_is_terminal() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/limited"))
        .respond_with(ResponseTemplate::new(429).insert_header("Retry-After", "0"))
        .expect(3)
        .mount(&server)
        .await;

    let result = fast_prober()
        .probe(&format!("{}/limited", server.uri()), PAGE)
        .await;

    assert!(result.is_broken);
    assert_eq!(result.code, 429);
    assert_eq!(result.reason, "Too many requests");
}

#[tokio::test]
async fn test_redirect_chain_to_200_is_healthy() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/moved"))
        .respond_with(ResponseTemplate::new(301).insert_header("Location", "/final"))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/final"))
        .respond_with(ResponseTemplate::new(200))
        .mount(&server)
        .await;

    let result = fast_prober()
        .probe(&format!("{}/moved", server.uri()), PAGE)
        .await;

    assert!(!result.is_broken);
    assert_eq!(result.code, 200);
}

#[tokio::test]
async fn test_unresolvable_302_is_unauthorized_redirect() {
    let server = MockServer::start().await;
    // A 302 with no Location header cannot be followed further
    Mock::given(method("GET"))
        .and(path("/auth"))
        .respond_with(ResponseTemplate::new(302))
        .mount(&server)
        .await;

    let result = fast_prober()
        .probe(&format!("{}/auth", server.uri()), PAGE)
        .await;

    assert!(result.is_broken);
    assert_eq!(result.code, 302);
    assert_eq!(result.reason, "Unauthorized redirect (likely)");
}

#[tokio::test]
async fn test_connection_refused_has_no_http_code() {
    // Nothing listens on port 1
    let result = fast_prober().probe("http://127.0.0.1:1/", PAGE).await;

    assert!(result.is_broken);
    assert_eq!(result.code, -1);
    assert!(result.reason.starts_with("Request error"));
}

#[tokio::test]
async fn test_timeout_is_classified_as_timeout() {
    let server = MockServer::start().await;
    // Slower than the largest per-attempt timeout (3 x 1s backoff base)
    Mock::given(method("GET"))
        .and(path("/slow"))
        .respond_with(ResponseTemplate::new(200).set_delay(Duration::from_secs(10)))
        .mount(&server)
        .await;

    let result = fast_prober()
        .probe(&format!("{}/slow", server.uri()), PAGE)
        .await;

    assert!(result.is_broken);
    assert_eq!(result.code, -1);
    assert_eq!(result.reason, "Timeout");
}

#[tokio::test]
async fn test_result_carries_source_page() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200))
        .mount(&server)
        .await;

    let result = fast_prober()
        .probe(&format!("{}/ok", server.uri()), "https://site.test/docs")
        .await;

    assert_eq!(result.page, "https://site.test/docs");
    assert_eq!(result.dest, format!("{}/ok", server.uri()));
}
