use std::time::{Duration, Instant};

use questlog_igdb::*;
use serde_json::json;
use wiremock::matchers::{body_string_contains, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

const NOW: i64 = 1_700_000_000_000;

fn client(server: &MockServer) -> IgdbClient<MemoryCredentialStore> {
    let uri = server.uri();
    let config = IgdbConfig::from_sources(
        |key| match key {
            "IGDB_CLIENT_ID" => Some("my-client".to_string()),
            "IGDB_CLIENT_SECRET" => Some("my-secret".to_string()),
            "IGDB_TOKEN_URL" => Some(format!("{}/oauth2/token", uri)),
            "IGDB_API_URL" => Some(uri.clone()),
            _ => None,
        },
        IgdbFileConfig::default(),
    );
    let cached = Credential {
        access_token: "cached-token".to_string(),
        expires_at: NOW + 60 * 60 * 1000,
        token_type: "bearer".to_string(),
    };
    let auth = AuthClient::new(config, MemoryCredentialStore::with_credential(cached))
        .unwrap()
        .with_clock(|| NOW);
    IgdbClient::new(auth).unwrap()
}

fn json_response(body: serde_json::Value) -> ResponseTemplate {
    ResponseTemplate::new(200).set_body_json(body)
}

async fn mount(server: &MockServer, endpoint: &str, body: serde_json::Value) {
    Mock::given(method("POST"))
        .and(path(format!("/{}", endpoint)))
        .respond_with(json_response(body))
        .mount(server)
        .await;
}

fn chrono_trigger() -> serde_json::Value {
    json!([{
        "id": 1,
        "name": "Chrono Trigger",
        "summary": "A time-travel RPG.",
        "first_release_date": 794880000,
        "total_rating": 93.4,
        "genres": [12, 31],
        "platforms": [19],
        "game_modes": [1],
        "involved_companies": [100, 101]
    }])
}

#[tokio::test]
async fn search_sends_query_with_auth_headers() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/games"))
        .and(header("Client-ID", "my-client"))
        .and(header("Authorization", "Bearer cached-token"))
        .and(body_string_contains("search \"Chrono Trigger\";"))
        .and(body_string_contains("limit 10;"))
        .respond_with(json_response(json!([
            { "id": 1, "name": "Chrono Trigger" },
            { "id": 2, "name": "Chrono Cross" }
        ])))
        .expect(1)
        .mount(&server)
        .await;

    let results = client(&server).search_by_name("Chrono Trigger", 10).await.unwrap();

    let names: Vec<_> = results.iter().map(|r| r.name.as_str()).collect();
    assert_eq!(names, vec!["Chrono Trigger", "Chrono Cross"]);
}

#[tokio::test]
async fn search_api_error_carries_status() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/games"))
        .respond_with(ResponseTemplate::new(429).set_body_string("Too Many Requests"))
        .mount(&server)
        .await;

    let err = client(&server).search_by_name("Hades", 10).await.unwrap_err();
    assert!(matches!(err, IgdbError::Api { status: 429, .. }));
    assert!(!err.is_fatal());
}

#[tokio::test]
async fn resolves_full_entity_graph() {
    let server = MockServer::start().await;
    mount(&server, "games", chrono_trigger()).await;
    mount(
        &server,
        "genres",
        json!([
            { "id": 31, "name": "Adventure" },
            { "id": 12, "name": "Role-playing (RPG)" }
        ]),
    )
    .await;
    mount(&server, "platforms", json!([{ "id": 19, "name": "Super Nintendo" }])).await;
    mount(&server, "game_modes", json!([{ "id": 1, "name": "Single player" }])).await;
    mount(
        &server,
        "involved_companies",
        json!([
            { "id": 100, "company": 7, "developer": true, "publisher": true },
            { "id": 101, "company": 8, "developer": false, "publisher": true }
        ]),
    )
    .await;
    mount(
        &server,
        "companies",
        json!([
            { "id": 7, "name": "Square" },
            { "id": 8, "name": "Nintendo" }
        ]),
    )
    .await;

    let record = client(&server).resolve_entity_graph(1).await.unwrap().unwrap();

    assert_eq!(record.id, 1);
    assert_eq!(record.name, "Chrono Trigger");
    assert_eq!(record.summary.as_deref(), Some("A time-travel RPG."));
    assert_eq!(record.release_date.as_deref(), Some("1995-03-11"));
    assert_eq!(record.rating, Some(93.4));
    // Names follow the game's id order, not the response order.
    assert_eq!(record.genres, vec!["Role-playing (RPG)", "Adventure"]);
    assert_eq!(record.platforms, vec!["Super Nintendo"]);
    assert_eq!(record.game_modes, vec!["Single player"]);
    assert!(record.themes.is_empty());
    assert!(record.game_engines.is_empty());
    assert_eq!(record.developers, vec!["Square"]);
    assert_eq!(record.publishers, vec!["Square", "Nintendo"]);
}

#[tokio::test]
async fn relation_lookups_query_by_id() {
    let server = MockServer::start().await;
    mount(
        &server,
        "games",
        json!([{ "id": 5, "name": "Hades", "themes": [17, 38] }]),
    )
    .await;
    Mock::given(method("POST"))
        .and(path("/themes"))
        .and(body_string_contains("where id = (17,38);"))
        .and(body_string_contains("limit 2;"))
        .respond_with(json_response(json!([
            { "id": 17, "name": "Fantasy" },
            { "id": 38, "name": "Action" }
        ])))
        .expect(1)
        .mount(&server)
        .await;

    let record = client(&server).resolve_entity_graph(5).await.unwrap().unwrap();
    assert_eq!(record.themes, vec!["Fantasy", "Action"]);
}

#[tokio::test]
async fn unknown_game_resolves_to_none() {
    let server = MockServer::start().await;
    mount(&server, "games", json!([])).await;

    let record = client(&server).resolve_entity_graph(404).await.unwrap();
    assert!(record.is_none());
}

#[tokio::test]
async fn failed_relation_lookup_fails_the_game() {
    let server = MockServer::start().await;
    mount(&server, "games", chrono_trigger()).await;
    mount(&server, "genres", json!([{ "id": 12, "name": "Role-playing (RPG)" }])).await;
    mount(&server, "game_modes", json!([{ "id": 1, "name": "Single player" }])).await;
    mount(&server, "involved_companies", json!([])).await;
    mount(&server, "companies", json!([])).await;
    Mock::given(method("POST"))
        .and(path("/platforms"))
        .respond_with(ResponseTemplate::new(500).set_body_string("internal error"))
        .mount(&server)
        .await;

    let err = client(&server).resolve_entity_graph(1).await.unwrap_err();

    match err {
        IgdbError::Resolution(message) => {
            assert!(message.contains("game 1"), "{message}");
            assert!(message.contains("/platforms"), "{message}");
        }
        other => panic!("expected Resolution error, got {other:?}"),
    }
}

#[tokio::test]
async fn relation_lookups_run_concurrently() {
    const DELAY: Duration = Duration::from_millis(300);
    let relations = [
        "genres",
        "platforms",
        "game_modes",
        "themes",
        "player_perspectives",
        "game_engines",
    ];

    let server = MockServer::start().await;
    mount(
        &server,
        "games",
        json!([{
            "id": 7,
            "name": "Okami",
            "genres": [1],
            "platforms": [2],
            "game_modes": [3],
            "themes": [4],
            "player_perspectives": [5],
            "game_engines": [6]
        }]),
    )
    .await;
    for (i, endpoint) in relations.iter().enumerate() {
        Mock::given(method("POST"))
            .and(path(format!("/{}", endpoint)))
            .respond_with(
                json_response(json!([{ "id": i + 1, "name": endpoint }])).set_delay(DELAY),
            )
            .expect(1)
            .mount(&server)
            .await;
    }

    let client = client(&server);
    let started = Instant::now();
    let record = client.resolve_entity_graph(7).await.unwrap().unwrap();
    let elapsed = started.elapsed();

    assert_eq!(record.genres, vec!["genres"]);
    assert_eq!(record.game_engines, vec!["game_engines"]);
    // One-at-a-time lookups would take six delays.
    assert!(
        elapsed < DELAY * 3,
        "relation lookups took {elapsed:?}, expected about {DELAY:?}"
    );
}
