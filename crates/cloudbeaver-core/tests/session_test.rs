#![allow(clippy::unwrap_used)]
// Session tests: connect against a wiremock CloudBeaver and drive the
// resource through the real HTTP client.

use pretty_assertions::assert_eq;
use secrecy::SecretString;
use serde_json::json;
use wiremock::matchers::{body_string_contains, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use cloudbeaver_core::{
    ConnectOptions, ConnectionContext, CoreError, DiagnosticKind, Session, TeamState, Value,
};

fn context(server: &MockServer) -> ConnectionContext {
    ConnectionContext::try_new(
        server.uri(),
        "cbadmin",
        SecretString::from("s3cret".to_owned()),
    )
    .unwrap()
}

async fn mount_login(server: &MockServer, status: &str) {
    Mock::given(method("POST"))
        .and(path("/api/gql"))
        .and(body_string_contains("authLogin"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "data": { "authInfo": { "authStatus": status } }
        })))
        .mount(server)
        .await;
}

#[tokio::test]
async fn connect_logs_in_and_creates_team() {
    let server = MockServer::start().await;
    mount_login(&server, "SUCCESS").await;

    Mock::given(method("POST"))
        .and(body_string_contains("createTeam"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "data": { "team": { "teamId": "one", "teamName": "one", "description": null } }
        })))
        .expect(1)
        .mount(&server)
        .await;

    let session = Session::connect(context(&server), &ConnectOptions::default())
        .await
        .unwrap();
    assert_eq!(session.context().username(), "cbadmin");

    let created = session
        .team_resource()
        .create(&TeamState::new("one"))
        .await
        .unwrap();

    assert_eq!(created.name, Value::known("one"));
    assert_eq!(created.description, Value::known(""));
}

#[tokio::test]
async fn connect_fails_when_login_rejected() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(body_string_contains("authLogin"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "data": null,
            "errors": [{ "message": "Invalid user credentials" }]
        })))
        .mount(&server)
        .await;

    let result = Session::connect(context(&server), &ConnectOptions::default()).await;
    assert!(matches!(
        result,
        Err(CoreError::AuthenticationFailed { .. })
    ));
}

#[tokio::test]
async fn lookup_of_missing_team_is_client_error() {
    let server = MockServer::start().await;
    mount_login(&server, "SUCCESS").await;

    Mock::given(method("POST"))
        .and(body_string_contains("listTeams"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "data": { "teams": [] }
        })))
        .mount(&server)
        .await;

    let session = Session::connect(context(&server), &ConnectOptions::default())
        .await
        .unwrap();
    let diags = session.team_data_source().read_id("ghost").await.unwrap_err();

    assert_eq!(diags.count(DiagnosticKind::ClientCall), 1);
    assert!(diags.to_string().contains("ghost"));
}
