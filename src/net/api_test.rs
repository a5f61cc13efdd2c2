use futures::executor::block_on;

use super::*;
use crate::net::types::LoginResponse;
use crate::testing::{FakeTransport, RecordingNavigator};
use crate::util::token_store::MemoryTokenStore;

fn client<'a>(
    transport: &'a FakeTransport,
    store: &MemoryTokenStore,
    nav: &'a RecordingNavigator,
) -> ApiClient<&'a FakeTransport, MemoryTokenStore, &'a RecordingNavigator> {
    ApiClient::new(ClientConfig::default(), transport, store.clone(), nav)
}

// =============================================================
// authorize
// =============================================================

#[test]
fn authorize_attaches_bearer_when_token_present() {
    let transport = FakeTransport::default();
    let nav = RecordingNavigator::default();
    let store = MemoryTokenStore::with_token("abc");
    let req = client(&transport, &store, &nav).authorize(HttpRequest::new(Method::Get, "/x"));
    assert_eq!(req.header("authorization"), Some("Bearer abc"));
}

#[test]
fn authorize_leaves_request_alone_without_token() {
    let transport = FakeTransport::default();
    let nav = RecordingNavigator::default();
    let store = MemoryTokenStore::new();
    let req = client(&transport, &store, &nav).authorize(HttpRequest::new(Method::Get, "/x"));
    assert!(req.headers.is_empty());
}

#[test]
fn authorize_replaces_existing_authorization_header() {
    let transport = FakeTransport::default();
    let nav = RecordingNavigator::default();
    let store = MemoryTokenStore::with_token("fresh");
    let mut req = HttpRequest::new(Method::Get, "/x");
    req.headers.push(("Authorization".to_owned(), "Bearer stale".to_owned()));
    let req = client(&transport, &store, &nav).authorize(req);
    assert_eq!(req.headers.len(), 1);
    assert_eq!(req.header("Authorization"), Some("Bearer fresh"));
}

// =============================================================
// request / intercept
// =============================================================

#[test]
fn get_resolves_url_and_unwraps_body() {
    let transport = FakeTransport::replying(200, r#"{"success":true,"data":{"token":"t"},"error":null}"#);
    let nav = RecordingNavigator::default();
    let store = MemoryTokenStore::with_token("abc");
    let resp: ApiResponse<LoginResponse> = block_on(client(&transport, &store, &nav).get("/me")).unwrap();
    assert!(resp.is_success());

    let sent = transport.sent.borrow();
    assert_eq!(sent[0].url, "/api/v1/me");
    assert_eq!(sent[0].method, Method::Get);
    assert_eq!(sent[0].header("Authorization"), Some("Bearer abc"));
    assert!(sent[0].body.is_none());
}

#[test]
fn post_serializes_json_body() {
    let transport = FakeTransport::replying(201, r#"{"id":5}"#);
    let nav = RecordingNavigator::default();
    let store = MemoryTokenStore::new();
    let body = serde_json::json!({ "title": "hello" });
    let resp: serde_json::Value = block_on(client(&transport, &store, &nav).post("posts", &body)).unwrap();
    assert_eq!(resp, serde_json::json!({ "id": 5 }));
    assert_eq!(transport.sent.borrow()[0].body, Some(body));
    assert_eq!(transport.sent.borrow()[0].method, Method::Post);
}

#[test]
fn empty_success_body_decodes_as_unit() {
    let transport = FakeTransport::replying(204, "");
    let nav = RecordingNavigator::default();
    let store = MemoryTokenStore::new();
    let resp: Result<(), ApiError> = block_on(client(&transport, &store, &nav).delete("/posts/1"));
    assert!(resp.is_ok());
    assert_eq!(transport.sent.borrow()[0].method, Method::Delete);
}

#[test]
fn unauthorized_clears_token_redirects_once_and_rejects() {
    let transport = FakeTransport::replying(401, r#"{"success":false,"data":null,"error":{"code":"AUTH","message":"expired"}}"#);
    let nav = RecordingNavigator::default();
    let store = MemoryTokenStore::with_token("abc");
    let resp: Result<serde_json::Value, ApiError> = block_on(client(&transport, &store, &nav).get("/secret"));
    assert!(matches!(resp, Err(ApiError::Unauthorized)));
    assert!(store.get().is_none());
    assert_eq!(nav.visits(), vec!["/login".to_owned()]);
}

#[test]
fn concurrent_unauthorized_responses_are_harmless() {
    let transport = FakeTransport::default();
    transport.push(401, "");
    transport.push(401, "");
    let nav = RecordingNavigator::default();
    let store = MemoryTokenStore::with_token("abc");
    let api = client(&transport, &store, &nav);
    let (a, b) = block_on(futures::future::join(
        api.get::<serde_json::Value>("/a"),
        api.get::<serde_json::Value>("/b"),
    ));
    assert!(a.is_err() && b.is_err());
    assert!(store.get().is_none());
    assert!(nav.visits().iter().all(|p| p == "/login"));
    assert_eq!(nav.visits().len(), 2);
}

#[test]
fn other_statuses_pass_through_without_side_effects() {
    let body = r#"{"success":false,"data":null,"error":{"code":"NOT_FOUND","message":"missing"}}"#;
    let transport = FakeTransport::replying(404, body);
    let nav = RecordingNavigator::default();
    let store = MemoryTokenStore::with_token("abc");
    let err = block_on(client(&transport, &store, &nav).get::<serde_json::Value>("/x")).unwrap_err();
    assert_eq!(err.status(), Some(404));
    assert_eq!(err.envelope_error().map(|e| e.code).as_deref(), Some("NOT_FOUND"));
    assert_eq!(store.get().as_deref(), Some("abc"));
    assert!(nav.visits().is_empty());
    assert_eq!(transport.sent.borrow().len(), 1);
}

#[test]
fn transport_errors_propagate_unchanged() {
    let transport = FakeTransport::default();
    let nav = RecordingNavigator::default();
    let store = MemoryTokenStore::with_token("abc");
    let err = block_on(client(&transport, &store, &nav).get::<serde_json::Value>("/x")).unwrap_err();
    assert!(matches!(err, ApiError::Transport(ref m) if m == "no scripted response"));
    assert_eq!(err.status(), None);
    assert_eq!(store.get().as_deref(), Some("abc"));
}

#[test]
fn undecodable_success_body_is_decode_error() {
    let transport = FakeTransport::replying(200, "<html>");
    let nav = RecordingNavigator::default();
    let store = MemoryTokenStore::new();
    let err = block_on(client(&transport, &store, &nav).get::<serde_json::Value>("/x")).unwrap_err();
    assert!(matches!(err, ApiError::Decode(_)));
}

#[test]
fn envelope_error_absent_for_plain_bodies() {
    let err = ApiError::Status { status: 500, body: "boom".to_owned() };
    assert!(err.envelope_error().is_none());
    assert!(ApiError::Unauthorized.envelope_error().is_none());
}
