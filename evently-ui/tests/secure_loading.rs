//! Loader behavior for each kind of reference

mod common;

use common::{harness, PNG_BYTES};
use evently_ui::config::ApiConfig;
use evently_ui::resource::{DisplaySource, LoadError, LoadState, ResourceReference};
use futures::executor::block_on;

fn protected(filename: &str) -> ResourceReference {
    ResourceReference::secure_file(filename, &ApiConfig::default())
}

#[test]
fn test_local_references_load_without_fetch() {
    let h = harness(Some("secret"));
    let config = ApiConfig::default();

    for raw in ["blob:http://localhost:8080/0b6c", "data:image/gif;base64,R0lGODlhAQABAAAAACw="] {
        let reference = ResourceReference::parse(raw, &config).unwrap();
        let state = block_on(h.loader.load(Some(&reference)));
        assert_eq!(state, LoadState::Loaded(DisplaySource::Passthrough(raw.to_string())));
    }

    assert_eq!(h.fetcher.calls(), 0);
    assert!(h.urls.created.borrow().is_empty());
}

#[test]
fn test_public_url_passes_through() {
    let h = harness(Some("secret"));
    let reference = ResourceReference::parse("https://cdn.example.org/logo.png", &ApiConfig::default()).unwrap();

    let state = block_on(h.loader.load(Some(&reference)));

    assert_eq!(state.src(), Some("https://cdn.example.org/logo.png"));
    assert_eq!(h.fetcher.calls(), 0);
}

#[test]
fn test_absent_reference_stays_idle() {
    let h = harness(Some("secret"));
    assert_eq!(block_on(h.loader.load(None)), LoadState::Idle);
    assert_eq!(h.fetcher.calls(), 0);
}

#[test]
fn test_protected_fetch_sends_bearer_token() {
    let h = harness(Some("tok-123"));

    block_on(h.loader.load(Some(&protected("receipt.png"))));

    let request = h.fetcher.last_request();
    assert_eq!(h.fetcher.calls(), 1);
    assert_eq!(request.url, "http://localhost:5000/api/secure-file/receipt.png");
    assert_eq!(request.header("authorization"), Some("Bearer tok-123"));
    assert!(request.include_credentials);
}

#[test]
fn test_protected_fetch_without_token_has_no_authorization() {
    for token in [None, Some("   ")] {
        let h = harness(token);

        let state = block_on(h.loader.load(Some(&protected("receipt.png"))));

        let request = h.fetcher.last_request();
        assert_eq!(request.header("Authorization"), None);
        assert!(request.include_credentials);
        assert!(state.handle().is_some());
    }
}

#[test]
fn test_protected_ok_allocates_fresh_handles() {
    let h = harness(Some("tok"));
    h.fetcher.respond_ok(PNG_BYTES, "image/png");
    h.fetcher.respond_ok(PNG_BYTES, "image/png");

    let first = block_on(h.loader.load(Some(&protected("a.png"))));
    let second = block_on(h.loader.load(Some(&protected("a.png"))));

    let first = first.handle().unwrap().clone();
    let second = second.handle().unwrap().clone();
    assert_ne!(first, second);
    assert!(first.url().starts_with("blob:"));
    assert_eq!(h.urls.live.borrow().len(), 2);
}

#[test]
fn test_forbidden_reports_status() {
    let h = harness(Some("expired"));
    h.fetcher.respond_status(403);

    let state = block_on(h.loader.load(Some(&protected("id.jpg"))));

    assert_eq!(state, LoadState::Failed(LoadError::Http { status: 403 }));
    assert!(state.is_placeholder());
    let reports = h.diagnostics.reports.borrow();
    assert_eq!(reports.len(), 1);
    assert_eq!(reports[0].1.status(), Some(403));
    assert!(h.urls.created.borrow().is_empty());
}

#[test]
fn test_transport_failure_is_reported_not_raised() {
    let h = harness(Some("tok"));
    h.fetcher.respond_err(LoadError::Transport("dns lookup failed".to_string()));
    h.fetcher.respond_err(LoadError::Timeout { millis: 30_000 });

    let first = block_on(h.loader.load(Some(&protected("a.png"))));
    let second = block_on(h.loader.load(Some(&protected("a.png"))));

    assert!(matches!(first, LoadState::Failed(LoadError::Transport(_))));
    assert_eq!(second, LoadState::Failed(LoadError::Timeout { millis: 30_000 }));
    assert_eq!(h.diagnostics.reports.borrow().len(), 2);
    assert_eq!(h.fetcher.calls(), 2);
}

#[test]
fn test_allocation_failure_is_reported() {
    let h = harness(Some("tok"));
    h.urls.fail.set(true);

    let state = block_on(h.loader.load(Some(&protected("a.png"))));

    assert!(matches!(state, LoadState::Failed(LoadError::Allocation(_))));
    assert_eq!(h.diagnostics.reports.borrow().len(), 1);
}
