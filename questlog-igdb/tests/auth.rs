use questlog_igdb::*;
use serde_json::json;
use wiremock::matchers::{body_string_contains, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

const NOW: i64 = 1_700_000_000_000;

fn config(server: &MockServer, with_credentials: bool) -> IgdbConfig {
    let token_url = format!("{}/oauth2/token", server.uri());
    IgdbConfig::from_sources(
        |key| match key {
            "IGDB_CLIENT_ID" if with_credentials => Some("my-client".to_string()),
            "IGDB_CLIENT_SECRET" if with_credentials => Some("my-secret".to_string()),
            "IGDB_TOKEN_URL" => Some(token_url.clone()),
            "IGDB_API_URL" => Some(server.uri()),
            _ => None,
        },
        IgdbFileConfig::default(),
    )
}

fn auth_client(
    server: &MockServer,
    store: MemoryCredentialStore,
) -> AuthClient<MemoryCredentialStore> {
    AuthClient::new(config(server, true), store)
        .unwrap()
        .with_clock(|| NOW)
}

fn token_response() -> ResponseTemplate {
    ResponseTemplate::new(200).set_body_json(json!({
        "access_token": "fresh-token",
        "expires_in": 5_000_000,
        "token_type": "bearer"
    }))
}

#[tokio::test]
async fn valid_cached_token_skips_exchange() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/oauth2/token"))
        .respond_with(token_response())
        .expect(0)
        .mount(&server)
        .await;

    let cached = Credential {
        access_token: "cached-token".to_string(),
        expires_at: NOW + 60 * 60 * 1000,
        token_type: "bearer".to_string(),
    };
    let auth = auth_client(&server, MemoryCredentialStore::with_credential(cached));

    assert_eq!(auth.get_valid_token().await.unwrap(), "cached-token");
    assert_eq!(auth.store().save_count(), 0);
}

#[tokio::test]
async fn missing_token_triggers_one_exchange_and_save() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/oauth2/token"))
        .and(body_string_contains("client_id=my-client"))
        .and(body_string_contains("client_secret=my-secret"))
        .and(body_string_contains("grant_type=client_credentials"))
        .respond_with(token_response())
        .expect(1)
        .mount(&server)
        .await;

    let auth = auth_client(&server, MemoryCredentialStore::new());

    assert_eq!(auth.get_valid_token().await.unwrap(), "fresh-token");
    assert_eq!(auth.store().save_count(), 1);

    let saved = auth.store().load().unwrap();
    assert_eq!(saved.access_token, "fresh-token");
    assert_eq!(saved.expires_at, NOW + 5_000_000 * 1000);

    // Second call is served from the store.
    assert_eq!(auth.get_valid_token().await.unwrap(), "fresh-token");
    assert_eq!(auth.store().save_count(), 1);
}

#[tokio::test]
async fn token_inside_expiry_buffer_is_refreshed() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/oauth2/token"))
        .respond_with(token_response())
        .expect(1)
        .mount(&server)
        .await;

    let almost_expired = Credential {
        access_token: "stale-token".to_string(),
        expires_at: NOW + 60 * 1000,
        token_type: "bearer".to_string(),
    };
    let auth = auth_client(&server, MemoryCredentialStore::with_credential(almost_expired));

    assert_eq!(auth.get_valid_token().await.unwrap(), "fresh-token");
    assert_eq!(auth.store().save_count(), 1);
}

#[tokio::test]
async fn refresh_always_exchanges() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/oauth2/token"))
        .respond_with(token_response())
        .expect(1)
        .mount(&server)
        .await;

    let cached = Credential {
        access_token: "cached-token".to_string(),
        expires_at: NOW + 60 * 60 * 1000,
        token_type: "bearer".to_string(),
    };
    let auth = auth_client(&server, MemoryCredentialStore::with_credential(cached));

    let credential = auth.refresh_token().await.unwrap();
    assert_eq!(credential.access_token, "fresh-token");
    assert_eq!(auth.store().save_count(), 1);
}

#[tokio::test]
async fn missing_client_id_is_configuration_error() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(token_response())
        .expect(0)
        .mount(&server)
        .await;

    let auth = AuthClient::new(config(&server, false), MemoryCredentialStore::new()).unwrap();
    let err = auth.get_valid_token().await.unwrap_err();

    assert!(matches!(err, IgdbError::Configuration(_)));
    assert!(err.is_fatal());
}

#[tokio::test]
async fn rejected_exchange_reports_status_and_body() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/oauth2/token"))
        .respond_with(ResponseTemplate::new(400).set_body_string("invalid client secret"))
        .expect(1)
        .mount(&server)
        .await;

    let auth = auth_client(&server, MemoryCredentialStore::new());
    let err = auth.get_valid_token().await.unwrap_err();

    match err {
        IgdbError::Auth { status, body } => {
            assert_eq!(status, 400);
            assert_eq!(body, "invalid client secret");
        }
        other => panic!("expected Auth error, got {other:?}"),
    }
    assert_eq!(auth.store().save_count(), 0);
}

#[tokio::test]
async fn malformed_token_body_is_fatal_auth_error() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/oauth2/token"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>maintenance</html>"))
        .expect(1)
        .mount(&server)
        .await;

    let auth = auth_client(&server, MemoryCredentialStore::new());
    let err = auth.get_valid_token().await.unwrap_err();

    match &err {
        IgdbError::Auth { status, body } => {
            assert_eq!(*status, 200);
            assert!(body.contains("maintenance"), "{body}");
        }
        other => panic!("expected Auth error, got {other:?}"),
    }
    assert!(err.is_fatal());
    assert_eq!(auth.store().save_count(), 0);
}

#[tokio::test]
async fn file_store_round_trips_through_exchange() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/oauth2/token"))
        .respond_with(token_response())
        .expect(1)
        .mount(&server)
        .await;

    let dir = tempfile::tempdir().unwrap();
    let token_path = dir.path().join("nested").join("token.json");
    let auth = AuthClient::new(config(&server, true), FileCredentialStore::new(&token_path))
        .unwrap()
        .with_clock(|| NOW);

    auth.get_valid_token().await.unwrap();
    assert!(token_path.exists());

    // A new client reading the same file does not exchange again.
    let second = AuthClient::new(config(&server, true), FileCredentialStore::new(&token_path))
        .unwrap()
        .with_clock(|| NOW);
    assert_eq!(second.get_valid_token().await.unwrap(), "fresh-token");
}
