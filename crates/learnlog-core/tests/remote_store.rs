mod common;

use std::time::{Duration, Instant};

use common::{closed_url, CannedServer, Reply};
use learnlog_core::auth::AuthClient;
use learnlog_core::store::{parse_date, EntryDraft, EntryId, EntryStore, RemoteStore};
use learnlog_core::LearnlogError;

const ENTRY: &str = r#"{"_id":"65a1f0c2","title":"Ownership","content":"moves","tags":["rust"],"date":"2024-01-15T00:00:00.000Z","createdAt":"2024-01-15T08:00:00.000Z","updatedAt":"2024-01-15T08:00:00.000Z","__v":0}"#;

fn store(url: &str) -> RemoteStore {
    RemoteStore::new(url, Duration::from_secs(3)).expect("client should build")
}

fn draft() -> EntryDraft {
    EntryDraft::new("Ownership", "moves", parse_date("2024-01-15").unwrap()).with_tag_list("rust")
}

#[test]
fn test_list_decodes_entries() {
    let server = CannedServer::start(vec![CannedServer::json(200, &format!("[{}]", ENTRY))]);

    let entries = store(&server.url).list().expect("list should succeed");

    assert_eq!(entries.len(), 1);
    assert_eq!(entries[0].id.as_str(), "65a1f0c2");
    assert_eq!(entries[0].tags, vec!["rust"]);
    let requests = server.finish();
    assert!(requests[0].starts_with("GET /api/logs "));
}

#[test]
fn test_bearer_token_is_sent() {
    let server = CannedServer::start(vec![CannedServer::json(200, "[]")]);

    store(&server.url)
        .with_token(Some("secret-token".to_string()))
        .list()
        .expect("list should succeed");

    let requests = server.finish();
    assert!(requests[0]
        .to_ascii_lowercase()
        .contains("authorization: bearer secret-token"));
}

#[test]
fn test_create_posts_json_payload() {
    let server = CannedServer::start(vec![CannedServer::json(201, ENTRY)]);

    let created = store(&server.url).create(&draft()).expect("create should succeed");

    assert_eq!(created.id.as_str(), "65a1f0c2");
    let requests = server.finish();
    assert!(requests[0].starts_with("POST /api/logs "));
    assert!(requests[0].contains(r#""title":"Ownership""#));
    assert!(requests[0].contains(r#""tags":["rust"]"#));
}

#[test]
fn test_update_and_delete_target_entry_path() {
    let server = CannedServer::start(vec![
        CannedServer::json(200, ENTRY),
        CannedServer::json(200, r#"{"message":"Log deleted"}"#),
    ]);
    let mut remote = store(&server.url);
    let id = EntryId::new("65a1f0c2");

    remote.update(&id, &draft()).expect("update should succeed");
    remote.delete(&id).expect("delete should succeed");

    let requests = server.finish();
    assert!(requests[0].starts_with("PUT /api/logs/65a1f0c2 "));
    assert!(requests[1].starts_with("DELETE /api/logs/65a1f0c2 "));
}

#[test]
fn test_status_mapping() {
    let server = CannedServer::start(vec![
        CannedServer::json(400, r#"{"message":"Title is required"}"#),
        CannedServer::json(401, r#"{"message":"Token is not valid"}"#),
        CannedServer::json(404, r#"{"message":"Log not found"}"#),
        CannedServer::json(500, r#"{"message":"boom"}"#),
    ]);
    let mut remote = store(&server.url);
    let id = EntryId::new("65a1f0c2");

    match remote.create(&draft()) {
        Err(LearnlogError::Validation(message)) => assert_eq!(message, "Title is required"),
        other => panic!("expected validation error, got {:?}", other),
    }
    assert!(remote.list().unwrap_err().is_unauthorized());
    assert!(matches!(
        remote.update(&id, &draft()),
        Err(LearnlogError::NotFound(_))
    ));
    assert!(matches!(remote.list(), Err(LearnlogError::Server(_))));
    server.finish();
}

#[test]
fn test_malformed_body_is_server_error() {
    let server = CannedServer::start(vec![CannedServer::json(200, "<html>proxy</html>")]);

    let err = store(&server.url).list().unwrap_err();

    assert!(matches!(err, LearnlogError::Server(_)));
    assert!(err.is_connectivity());
    server.finish();
}

#[test]
fn test_connection_refused_is_network_error() {
    let err = store(&closed_url()).list().unwrap_err();
    assert!(matches!(err, LearnlogError::Network(_)), "got {:?}", err);
}

#[test]
fn test_stalled_backend_times_out() {
    let server = CannedServer::start(vec![Reply::Stall(Duration::from_secs(6))]);
    let started = Instant::now();

    let err = store(&server.url).list().unwrap_err();

    assert!(matches!(err, LearnlogError::Timeout(_)), "got {:?}", err);
    assert!(started.elapsed() < Duration::from_secs(6));
}

#[test]
fn test_login_returns_token_and_user() {
    let server = CannedServer::start(vec![CannedServer::json(
        200,
        r#"{"token":"jwt-abc","user":{"id":"u1","username":"ada","email":"ada@example.com"}}"#,
    )]);
    let client = AuthClient::new(&server.url, Duration::from_secs(3)).expect("client");

    let response = client
        .login("ada@example.com", "hunter22")
        .expect("login should succeed");

    assert_eq!(response.token, "jwt-abc");
    assert_eq!(response.user.username, "ada");
    let requests = server.finish();
    assert!(requests[0].starts_with("POST /api/auth/login "));
    assert!(requests[0].contains(r#""email":"ada@example.com""#));
}

#[test]
fn test_register_surfaces_backend_message() {
    let server = CannedServer::start(vec![CannedServer::json(
        400,
        r#"{"message":"User already exists"}"#,
    )]);
    let client = AuthClient::new(&server.url, Duration::from_secs(3)).expect("client");

    match client.register("ada", "ada@example.com", "hunter22") {
        Err(LearnlogError::Validation(message)) => assert_eq!(message, "User already exists"),
        other => panic!("expected validation error, got {:?}", other),
    }
    server.finish();
}
