//! End-to-end resolution tests: mock HTTP chains plus a scripted browser.

mod helpers;

use httptest::{matchers::*, responders::*, Expectation, Server};

use helpers::ScriptedLauncher;
use link_redirect::initialization::init_redirect_client;
use link_redirect::{Config, Resolver, Source};

fn config() -> Config {
    Config {
        timeout_ms: 2_000,
        observe_window_ms: 50,
        poll_interval_ms: 10,
        ..Default::default()
    }
}

fn resolver(config: &Config, launcher: ScriptedLauncher) -> Resolver {
    let client = init_redirect_client(config).expect("Failed to build client");
    Resolver::new(config, client, launcher.into_shared())
}

#[tokio::test]
async fn test_shortener_chain_resolves_without_browser() {
    let server = Server::run();
    server.expect(
        Expectation::matching(request::method_path("GET", "/s/abc"))
            .respond_with(status_code(301).append_header("Location", "/track?id=1")),
    );
    server.expect(
        Expectation::matching(request::method_path("GET", "/track")).respond_with(
            status_code(200).body(
                r#"<html><head><meta http-equiv="refresh" content="0; url=/land?campaign=winter&amp;campaignMarker=w1"></head></html>"#,
            ),
        ),
    );
    let launcher = ScriptedLauncher::new(&[]);
    let calls = launcher.calls();
    let resolver = resolver(&config(), launcher);

    let result = resolver.resolve_one(&server.url_str("/s/abc"), true).await;

    assert_eq!(result.source, Source::Chain);
    assert_eq!(result.campaign.as_deref(), Some("winter"));
    assert_eq!(result.campaign_marker.as_deref(), Some("w1"));
    assert_eq!(result.hops, 2);
    assert!(result.error.is_none());
    assert_eq!(calls.launches(), 0);
}

#[tokio::test]
async fn test_js_only_redirect_uses_browser_once_per_request() {
    let server = Server::run();
    server.expect(
        Expectation::matching(request::method_path("GET", "/app"))
            .times(2)
            .respond_with(status_code(200).body("<script src=/bundle.js></script>")),
    );
    let launcher = ScriptedLauncher::new(&[
        &[
            "about:blank",
            "https://final.example/a?campaign=one&campaignMarker=1",
        ],
        &["https://final.example/b?campaign=two&campaignMarker=2"],
    ]);
    let calls = launcher.calls();
    let resolver = resolver(&config(), launcher);

    let inputs = vec![server.url_str("/app"), server.url_str("/app")];
    let results = resolver.resolve_batch(&inputs, true).await;

    assert_eq!(results.len(), 2);
    assert!(results.iter().all(|r| r.source == Source::Browser));
    assert_eq!(results[0].campaign.as_deref(), Some("one"));
    assert_eq!(results[1].campaign.as_deref(), Some("two"));
    assert_eq!(calls.launches(), 1);
    assert_eq!(calls.pages(), 2);
    assert_eq!(calls.navigations(), vec![server.url_str("/app"), server.url_str("/app")]);
}

#[tokio::test]
async fn test_browser_unavailable_reports_error_but_keeps_chain_url() {
    let server = Server::run();
    server.expect(
        Expectation::matching(request::method_path("GET", "/app"))
            .respond_with(status_code(200).body("<p>needs js</p>")),
    );
    let resolver = resolver(&config(), ScriptedLauncher::failing());

    let result = resolver.resolve_one(&server.url_str("/app"), true).await;

    assert_eq!(result.source, Source::Chain);
    assert_eq!(result.final_url, server.url_str("/app"));
    let error = result.error.expect("error expected");
    assert!(error.contains("Browser launch failed"), "{error}");
}

#[tokio::test]
async fn test_every_input_yields_one_result_in_order() {
    let server = Server::run();
    server.expect(
        Expectation::matching(request::method_path("GET", "/ok"))
            .respond_with(status_code(302).append_header("Location", "/x?campaign=a&campaignMarker=b")),
    );
    server.expect(
        Expectation::matching(request::method_path("GET", "/gone")).respond_with(status_code(410)),
    );
    let resolver = resolver(&config(), ScriptedLauncher::new(&[]));

    let inputs = vec![
        server.url_str("/ok"),
        "javascript:alert(1)".to_string(),
        server.url_str("/gone"),
        "http://127.0.0.1:9/unreachable".to_string(),
    ];
    let results = resolver.resolve_batch(&inputs, false).await;

    assert_eq!(results.len(), 4);
    assert!(results[0].is_complete());
    assert!(results[1].error.is_some());
    assert_eq!(results[2].final_url, server.url_str("/gone"));
    assert!(results[2].error.is_none());
    assert_eq!(results[3].final_url, "http://127.0.0.1:9/unreachable");
    assert!(results[3].error.is_none());
    assert!(!results[3].is_complete());
}
