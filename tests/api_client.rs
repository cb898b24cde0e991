use anchormarks_flow::api::{ApiClient, ApiError, BookmarkApi};
use anchormarks_flow::search::search;
use anchormarks_flow::settings::Settings;
use httpmock::prelude::*;
use serde_json::json;

fn settings_for(server: &MockServer) -> Settings {
    Settings {
        server_url: server.base_url(),
        api_key: "secret".into(),
        debug_logging: false,
    }
}

#[test]
fn quick_search_sends_key_term_and_limit() {
    let server = MockServer::start();
    let m = server.mock(|when, then| {
        when.method(GET)
            .path("/api/quick-search")
            .query_param("q", "rust book")
            .query_param("limit", "15")
            .header("X-API-Key", "secret");
        then.status(200).json_body(json!([
            {"id": "a1", "url": "https://doc.rust-lang.org/book/", "title": "The Book", "click_count": 5},
            {"id": 2, "url": "https://rust-lang.org"}
        ]));
    });

    let client = ApiClient::new().unwrap();
    let list = client
        .quick_search(&settings_for(&server), Some("rust book"), 15)
        .unwrap();

    m.assert();
    assert_eq!(list.len(), 2);
    assert_eq!(list[0].title.as_deref(), Some("The Book"));
    assert_eq!(list[1].id(), "2");
}

#[test]
fn top_bookmarks_only_send_limit() {
    let server = MockServer::start();
    let m = server.mock(|when, then| {
        when.method(GET)
            .path("/api/quick-search")
            .query_param("limit", "10");
        then.status(200).json_body(json!([]));
    });

    let client = ApiClient::new().unwrap();
    let list = client
        .quick_search(&settings_for(&server), None, 10)
        .unwrap();
    m.assert();
    assert!(list.is_empty());
}

#[test]
fn trailing_slash_in_server_url_is_tolerated() {
    let server = MockServer::start();
    let m = server.mock(|when, then| {
        when.method(GET).path("/api/quick-search");
        then.status(200).json_body(json!([]));
    });

    let mut settings = settings_for(&server);
    settings.server_url.push('/');
    ApiClient::new()
        .unwrap()
        .quick_search(&settings, None, 10)
        .unwrap();
    m.assert();
}

#[test]
fn non_200_is_a_status_error() {
    let server = MockServer::start();
    server.mock(|when, then| {
        when.method(GET).path("/api/quick-search");
        then.status(401).json_body(json!({"error": "bad key"}));
    });

    let err = ApiClient::new()
        .unwrap()
        .quick_search(&settings_for(&server), Some("x"), 15)
        .unwrap_err();
    assert!(matches!(err, ApiError::Status(s) if s.as_u16() == 401));
}

#[test]
fn malformed_body_is_a_decode_error() {
    let server = MockServer::start();
    server.mock(|when, then| {
        when.method(GET).path("/api/quick-search");
        then.status(200).body("<html>not json</html>");
    });

    let err = ApiClient::new()
        .unwrap()
        .quick_search(&settings_for(&server), Some("x"), 15)
        .unwrap_err();
    assert!(matches!(err, ApiError::Decode(_)));
}

#[test]
fn unreachable_server_is_a_transport_error() {
    let settings = Settings {
        server_url: "http://127.0.0.1:9".into(),
        api_key: "secret".into(),
        debug_logging: false,
    };
    let client = ApiClient::new().unwrap();
    let err = client.quick_search(&settings, Some("x"), 15).unwrap_err();
    assert!(matches!(err, ApiError::Transport(_)));

    let results = search(&client, &settings, "x");
    assert_eq!(results.len(), 1);
    assert_eq!(results[0].title, "Cannot connect to AnchorMarks");
}

#[test]
fn malformed_body_surfaces_as_cannot_connect() {
    let server = MockServer::start();
    server.mock(|when, then| {
        when.method(GET).path("/api/quick-search");
        then.status(200).json_body(json!({"not": "a list"}));
    });

    let results = search(&ApiClient::new().unwrap(), &settings_for(&server), "");
    assert_eq!(results.len(), 1);
    assert_eq!(results[0].title, "Cannot connect to AnchorMarks");
}

#[test]
fn record_with_null_url_does_not_hide_the_rest() {
    let server = MockServer::start();
    server.mock(|when, then| {
        when.method(GET).path("/api/quick-search");
        then.status(200).json_body(json!([
            {"id": "x", "url": null, "title": null},
            {"id": "y", "url": "https://docs.rs", "title": "Docs"}
        ]));
    });

    let results = search(&ApiClient::new().unwrap(), &settings_for(&server), "docs");
    let titles: Vec<_> = results.iter().map(|r| r.title.as_str()).collect();
    assert_eq!(titles, ["Untitled", "Docs"]);
}

#[test]
fn add_bookmark_posts_json_url() {
    let server = MockServer::start();
    let m = server.mock(|when, then| {
        when.method(POST)
            .path("/api/bookmarks")
            .header("X-API-Key", "secret")
            .json_body(json!({"url": "https://example.com"}));
        then.status(201)
            .json_body(json!({"id": "new", "url": "https://example.com"}));
    });

    let created = ApiClient::new()
        .unwrap()
        .add_bookmark(&settings_for(&server), "https://example.com")
        .unwrap();
    m.assert();
    assert_eq!(created.id(), "new");
}

#[test]
fn track_click_posts_to_bookmark() {
    let server = MockServer::start();
    let m = server.mock(|when, then| {
        when.method(POST)
            .path("/api/bookmarks/abc/click")
            .header("X-API-Key", "secret");
        then.status(200);
    });

    ApiClient::new()
        .unwrap()
        .track_click(&settings_for(&server), "abc")
        .unwrap();
    m.assert();
}
