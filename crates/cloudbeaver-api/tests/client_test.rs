#![allow(clippy::unwrap_used)]
// Integration tests for `CloudBeaverClient` using wiremock.

use pretty_assertions::assert_eq;
use serde_json::json;
use wiremock::matchers::{body_partial_json, body_string_contains, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use cloudbeaver_api::{CloudBeaverClient, Error, Team};

// ── Helpers ─────────────────────────────────────────────────────────

async fn setup() -> (MockServer, CloudBeaverClient) {
    let server = MockServer::start().await;
    let client = CloudBeaverClient::with_client(
        reqwest::Client::new(),
        &server.uri(),
        "cbadmin",
        "s3cret".to_string().into(),
    )
    .unwrap();
    (server, client)
}

fn team(id: &str, name: &str, description: &str) -> Team {
    Team {
        team_id: id.into(),
        team_name: name.into(),
        description: description.into(),
    }
}

// ── Authentication tests ────────────────────────────────────────────

#[tokio::test]
async fn test_login_success() {
    let (server, client) = setup().await;

    Mock::given(method("POST"))
        .and(path("/api/gql"))
        .and(body_string_contains("authLogin"))
        .and(body_partial_json(json!({
            "variables": {
                "provider": "local",
                "credentials": { "user": "cbadmin", "password": "s3cret" }
            }
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "data": { "authInfo": { "authStatus": "SUCCESS" } }
        })))
        .expect(1)
        .mount(&server)
        .await;

    client.login().await.unwrap();
}

#[tokio::test]
async fn test_login_rejected() {
    let (server, client) = setup().await;

    Mock::given(method("POST"))
        .and(body_string_contains("authLogin"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "data": null,
            "errors": [{ "message": "Invalid user credentials" }]
        })))
        .mount(&server)
        .await;

    let result = client.login().await;
    assert!(
        matches!(result, Err(Error::Authentication { ref message }) if message == "Invalid user credentials"),
        "expected Authentication error, got: {result:?}"
    );
}

#[tokio::test]
async fn test_unauthorized_status() {
    let (server, client) = setup().await;

    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(401))
        .mount(&server)
        .await;

    let result = client.get_team("infra").await;
    assert!(matches!(result, Err(Error::Authentication { .. })));
}

// ── Team tests ──────────────────────────────────────────────────────

#[tokio::test]
async fn test_create_team() {
    let (server, client) = setup().await;

    Mock::given(method("POST"))
        .and(path("/api/gql"))
        .and(body_string_contains("createTeam"))
        .and(body_partial_json(json!({
            "variables": { "teamId": "one", "teamName": "one", "description": "" }
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "data": { "team": { "teamId": "one", "teamName": "one", "description": null } }
        })))
        .expect(1)
        .mount(&server)
        .await;

    let created = client.create_team("one", "one", "").await.unwrap();
    assert_eq!(created, team("one", "one", ""));
}

#[tokio::test]
async fn test_get_team() {
    let (server, client) = setup().await;

    Mock::given(method("POST"))
        .and(body_string_contains("listTeams"))
        .and(body_partial_json(json!({ "variables": { "teamId": "infra" } })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "data": { "teams": [
                { "teamId": "infra", "teamName": "Infrastructure", "description": "Ops" }
            ] }
        })))
        .mount(&server)
        .await;

    let found = client.get_team("infra").await.unwrap();
    assert_eq!(found, team("infra", "Infrastructure", "Ops"));
}

#[tokio::test]
async fn test_get_team_not_found() {
    let (server, client) = setup().await;

    Mock::given(method("POST"))
        .and(body_string_contains("listTeams"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!({ "data": { "teams": [] } })),
        )
        .mount(&server)
        .await;

    let err = client.get_team("ghost").await.unwrap_err();
    assert!(
        matches!(err, Error::TeamNotFound { ref team_id } if team_id == "ghost"),
        "expected not-found, got: {err:?}"
    );
}

#[tokio::test]
async fn test_update_team() {
    let (server, client) = setup().await;

    Mock::given(method("POST"))
        .and(body_string_contains("updateTeam"))
        .and(body_partial_json(json!({
            "variables": { "teamId": "one", "teamName": "two", "description": "Some description" }
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "data": { "team": {
                "teamId": "one", "teamName": "two", "description": "Some description"
            } }
        })))
        .mount(&server)
        .await;

    let updated = client
        .update_team("one", "two", "Some description")
        .await
        .unwrap();
    assert_eq!(updated, team("one", "two", "Some description"));
}

#[tokio::test]
async fn test_list_teams() {
    let (server, client) = setup().await;

    Mock::given(method("POST"))
        .and(body_string_contains("listTeams"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "data": { "teams": [
                { "teamId": "admin", "teamName": "admin", "description": "" },
                { "teamId": "user", "teamName": "user" }
            ] }
        })))
        .mount(&server)
        .await;

    let teams = client.list_teams().await.unwrap();
    assert_eq!(teams.len(), 2);
    assert_eq!(teams[1], team("user", "user", ""));
}

#[tokio::test]
async fn test_delete_team() {
    let (server, client) = setup().await;

    Mock::given(method("POST"))
        .and(body_string_contains("deleteTeam"))
        .and(body_partial_json(json!({ "variables": { "teamId": "one", "force": false } })))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!({ "data": { "deleted": true } })),
        )
        .expect(1)
        .mount(&server)
        .await;

    client.delete_team("one").await.unwrap();
}

#[tokio::test]
async fn test_delete_team_refused() {
    let (server, client) = setup().await;

    Mock::given(method("POST"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!({ "data": { "deleted": false } })),
        )
        .mount(&server)
        .await;

    let result = client.delete_team("one").await;
    assert!(matches!(result, Err(Error::GraphQl { operation: "deleteTeam", .. })));
}

// ── Error tests ─────────────────────────────────────────────────────

#[tokio::test]
async fn test_graphql_errors_are_joined() {
    let (server, client) = setup().await;

    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "data": null,
            "errors": [{ "message": "Team already exists" }, { "message": "try another id" }]
        })))
        .mount(&server)
        .await;

    let err = client.create_team("one", "one", "").await.unwrap_err();
    match err {
        Error::GraphQl { operation, message } => {
            assert_eq!(operation, "createTeam");
            assert_eq!(message, "Team already exists; try another id");
        }
        other => panic!("expected GraphQl error, got: {other:?}"),
    }
}

#[tokio::test]
async fn test_server_error_with_graphql_body() {
    let (server, client) = setup().await;

    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(500).set_body_json(json!({
            "errors": [{ "message": "Access denied" }]
        })))
        .mount(&server)
        .await;

    let err = client.update_team("one", "one", "").await.unwrap_err();
    assert!(matches!(err, Error::GraphQl { operation: "updateTeam", .. }));
}

#[tokio::test]
async fn test_server_error_plain_body() {
    let (server, client) = setup().await;

    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(502).set_body_string("Bad Gateway"))
        .mount(&server)
        .await;

    let err = client.get_team("one").await.unwrap_err();
    assert!(matches!(err, Error::Http { status: 502, .. }));
}

#[tokio::test]
async fn test_malformed_body() {
    let (server, client) = setup().await;

    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>oops</html>"))
        .mount(&server)
        .await;

    let err = client.get_team("one").await.unwrap_err();
    match err {
        Error::Deserialization { body, .. } => assert_eq!(body, "<html>oops</html>"),
        other => panic!("expected Deserialization error, got: {other:?}"),
    }
}

#[tokio::test]
async fn test_missing_data() {
    let (server, client) = setup().await;

    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "data": null })))
        .mount(&server)
        .await;

    let err = client.create_team("one", "one", "").await.unwrap_err();
    assert!(matches!(err, Error::MissingData { operation: "createTeam" }));
}
