//! Login, profile loading and logout

use crate::common::fixtures::{profile_json, token_json};
use crate::common::{LOGIN_PATH, PROFILE_PATH, REFRESH_PATH, memory_client};
use rb_admin_core::auth::rbac::{Department, Role};
use rb_admin_core::{AccessPolicy, ClientError, HttpMethod, Session};
use std::sync::Arc;
use wiremock::matchers::{body_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

#[tokio::test]
async fn test_login_loads_and_caches_profile() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(LOGIN_PATH))
        .and(body_json(serde_json::json!({"username": "lead", "password": "secret"})))
        .respond_with(ResponseTemplate::new(200).set_body_json(token_json("a1", Some("r1"))))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path(PROFILE_PATH))
        .and(header("authorization", "Bearer a1"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(profile_json("quality_assurance", "team_lead")),
        )
        .expect(1)
        .mount(&server)
        .await;

    let dir = tempfile::tempdir().unwrap();
    let cache = dir.path().join("profile.json");
    let (client, _) = memory_client(&server, None);
    let session =
        Session::new(client, Arc::new(AccessPolicy::new())).with_profile_cache(&cache);

    let profile = session.login("lead", "secret").await.unwrap();

    assert_eq!(profile.department, Some(Department::QualityAssurance));
    assert_eq!(profile.role, Some(Role::TeamLead));
    assert_eq!(session.client().refresh_token_value().as_deref(), Some("r1"));
    assert!(cache.exists());

    assert!(session.can_access("/projects"));
    assert!(!session.can_access("/integrations"));
    assert!(session.can_use("agents", HttpMethod::Patch));
    assert!(!session.can_use("agents", HttpMethod::Delete));

    session.logout().await.unwrap();
    assert!(!cache.exists());
    assert!(session.profile().is_none());
    assert!(session.client().access_token().is_none());
}

#[tokio::test]
async fn test_login_rejected() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(LOGIN_PATH))
        .respond_with(ResponseTemplate::new(401))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path(REFRESH_PATH))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;

    let (client, _) = memory_client(&server, None);
    let session = Session::new(client, Arc::new(AccessPolicy::new()));

    let err = session.login("lead", "wrong").await.unwrap_err();
    assert!(matches!(err, ClientError::Auth(_)));
    assert!(!session.is_authenticated());
}

#[tokio::test]
async fn test_expired_session_is_cleared() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(PROFILE_PATH))
        .respond_with(ResponseTemplate::new(401))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path(REFRESH_PATH))
        .respond_with(ResponseTemplate::new(401))
        .expect(1)
        .mount(&server)
        .await;

    let dir = tempfile::tempdir().unwrap();
    let cache = dir.path().join("profile.json");
    tokio::fs::write(&cache, r#"{"department": "support", "role": "admin"}"#)
        .await
        .unwrap();

    let (client, _) = memory_client(&server, Some("expired"));
    let session =
        Session::new(client, Arc::new(AccessPolicy::new())).with_profile_cache(&cache);
    session.restore().await.unwrap();

    let err = session.fetch_profile().await.unwrap_err();

    assert!(matches!(err, ClientError::Unauthorized(_)));
    assert!(err.is_auth_error());
    assert!(session.client().access_token().is_none());
    assert!(session.profile().is_none());
    assert!(!cache.exists());
}

#[tokio::test]
async fn test_profile_server_error() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(PROFILE_PATH))
        .respond_with(ResponseTemplate::new(503).set_body_string("maintenance"))
        .mount(&server)
        .await;

    let (client, _) = memory_client(&server, Some("abc"));
    let session = Session::new(client, Arc::new(AccessPolicy::new()));

    match session.fetch_profile().await.unwrap_err() {
        ClientError::Status { status, message } => {
            assert_eq!(status, 503);
            assert_eq!(message, "maintenance");
        }
        other => panic!("unexpected error: {}", other),
    }
}

#[tokio::test]
async fn test_unknown_role_grants_nothing() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(PROFILE_PATH))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(profile_json("quality_assurance", "intern")),
        )
        .mount(&server)
        .await;

    let (client, _) = memory_client(&server, Some("abc"));
    let session = Session::new(client, Arc::new(AccessPolicy::new()));
    let profile = session.fetch_profile().await.unwrap();

    assert_eq!(profile.role, Some(Role::Unknown));
    assert!(session.can_access("/dashboard"));
    assert!(!session.can_access("/manual-review"));
    assert!(!session.can_use("chats", HttpMethod::Get));
}
