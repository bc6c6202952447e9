//! Provider integration tests with a mocked API-Football endpoint.
//!
//! These exercise the full cache-aside fetch path: TTL hits that skip the
//! provider, misses that fetch and write back, force-refresh bypass, the
//! search fallback chain, and the import mapping end to end.

use std::time::Duration;

use serde_json::json;
use wiremock::matchers::{method, path, query_param, query_param_is_missing};
use wiremock::{Mock, MockServer, ResponseTemplate};

use scoutia::commands::market::new_athlete_from_entry;
use scoutia::football::cache::cache_key;
use scoutia::{ApiFootballClient, CacheStatus, CacheStore, ExternalId, LeagueId, Season};

fn test_client(server: &MockServer) -> ApiFootballClient {
    let cache = CacheStore::in_memory().unwrap();
    ApiFootballClient::new("test-key", cache)
        .unwrap()
        .with_base_url(server.uri())
}

fn haaland_entry() -> serde_json::Value {
    json!({
        "player": {
            "id": 874,
            "name": "E. Haaland",
            "age": 25,
            "nationality": "Norway"
        },
        "statistics": [
            {
                "team": { "id": 50, "name": "Manchester City" },
                "league": { "id": 39, "name": "Premier League", "season": 2025 },
                "games": { "appearences": 20, "position": "Attacker", "rating": "7.8" },
                "goals": { "total": 18, "assists": 3 },
                "cards": { "yellow": 2, "red": 0 },
                "tackles": { "total": 4 }
            }
        ]
    })
}

fn envelope(entries: Vec<serde_json::Value>) -> serde_json::Value {
    json!({ "response": entries, "errors": [] })
}

#[tokio::test]
async fn test_fresh_cache_hit_skips_provider() {
    let server = MockServer::start().await;

    // Any request to the provider fails the test.
    Mock::given(method("GET"))
        .and(path("/players"))
        .respond_with(ResponseTemplate::new(200).set_body_json(envelope(vec![])))
        .expect(0)
        .mount(&server)
        .await;

    let client = test_client(&server);

    let key = cache_key(
        "/players",
        &[("id", "874".to_string()), ("season", "2025".to_string())],
    );
    let payload = serde_json::to_string(&vec![haaland_entry()]).unwrap();
    client.cache().put(&key, &payload).unwrap();

    let (entry, status) = client
        .player_statistics(ExternalId::new(874), Season::new(2025), false)
        .await
        .unwrap();
    let entry = entry.unwrap();

    assert_eq!(status, CacheStatus::Hit);
    assert_eq!(entry.player.name, "E. Haaland");
    assert_eq!(entry.statistics[0].goals.total, Some(18));
}

#[tokio::test]
async fn test_cache_miss_fetches_and_writes_back() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/players"))
        .and(query_param("id", "874"))
        .and(query_param("season", "2025"))
        .respond_with(ResponseTemplate::new(200).set_body_json(envelope(vec![haaland_entry()])))
        .expect(1)
        .mount(&server)
        .await;

    let client = test_client(&server);

    let (entry, status) = client
        .player_statistics(ExternalId::new(874), Season::new(2025), false)
        .await
        .unwrap();
    assert_eq!(status, CacheStatus::Miss);
    assert_eq!(entry.unwrap().player.id, 874);

    // The write-back is fire-and-forget; poll until it lands.
    let key = cache_key(
        "/players",
        &[("id", "874".to_string()), ("season", "2025".to_string())],
    );
    let mut stored = None;
    for _ in 0..40 {
        if let Some(entry) = client.cache().get(&key) {
            stored = Some(entry);
            break;
        }
        tokio::time::sleep(Duration::from_millis(50)).await;
    }
    let stored = stored.expect("write-back never landed");
    assert!(stored.payload.contains("E. Haaland"));
}

#[tokio::test]
async fn test_force_refresh_bypasses_fresh_cache() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/players"))
        .respond_with(ResponseTemplate::new(200).set_body_json(envelope(vec![haaland_entry()])))
        .expect(1)
        .mount(&server)
        .await;

    let client = test_client(&server);

    // Fresh cached copy with different content; --refresh must ignore it.
    let key = cache_key(
        "/players",
        &[("id", "874".to_string()), ("season", "2025".to_string())],
    );
    let stale_shaped = json!({ "player": { "id": 874, "name": "Cached Name" } });
    client
        .cache()
        .put(&key, &serde_json::to_string(&vec![stale_shaped]).unwrap())
        .unwrap();

    let (entry, status) = client
        .player_statistics(ExternalId::new(874), Season::new(2025), true)
        .await
        .unwrap();

    assert_eq!(status, CacheStatus::Refreshed);
    assert_eq!(entry.unwrap().player.name, "E. Haaland");
}

#[tokio::test]
async fn test_search_falls_back_through_leagues() {
    let server = MockServer::start().await;

    // Global search: empty.
    Mock::given(method("GET"))
        .and(path("/players"))
        .and(query_param("search", "Endrick"))
        .and(query_param_is_missing("league"))
        .respond_with(ResponseTemplate::new(200).set_body_json(envelope(vec![])))
        .expect(1)
        .mount(&server)
        .await;

    // First fallback league (71) has the player.
    Mock::given(method("GET"))
        .and(path("/players"))
        .and(query_param("search", "Endrick"))
        .and(query_param("league", "71"))
        .respond_with(ResponseTemplate::new(200).set_body_json(envelope(vec![json!({
            "player": { "id": 1100, "name": "Endrick", "age": 19, "nationality": "Brazil" },
            "statistics": [ { "games": { "position": "Attacker" } } ]
        })])))
        .expect(1)
        .mount(&server)
        .await;

    // Later fallback leagues must not be queried.
    for league in ["307", "39"] {
        Mock::given(method("GET"))
            .and(path("/players"))
            .and(query_param("league", league))
            .respond_with(ResponseTemplate::new(200).set_body_json(envelope(vec![])))
            .expect(0)
            .mount(&server)
            .await;
    }

    let client = test_client(&server);
    let results = client.search_players("Endrick", None, false).await.unwrap();

    assert_eq!(results.len(), 1);
    assert_eq!(results[0].player.name, "Endrick");
}

#[tokio::test]
async fn test_search_empty_everywhere_returns_empty_list() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/players"))
        .respond_with(ResponseTemplate::new(200).set_body_json(envelope(vec![])))
        .expect(4) // global + three fallback leagues
        .mount(&server)
        .await;

    let client = test_client(&server);
    let results = client
        .search_players("Nobody Anywhere", None, false)
        .await
        .unwrap();

    assert!(results.is_empty());
}

#[tokio::test]
async fn test_search_sends_normalized_query() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/players"))
        .and(query_param("search", "Vinicius Junior"))
        .and(query_param("league", "13"))
        .respond_with(ResponseTemplate::new(200).set_body_json(envelope(vec![])))
        .expect(1)
        .mount(&server)
        .await;

    let client = test_client(&server);
    let results = client
        .search_players("Vinícius Júnior", Some(LeagueId::new(13)), false)
        .await
        .unwrap();

    assert!(results.is_empty());
}

#[tokio::test]
async fn test_envelope_errors_logged_not_fatal() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/players"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "response": [],
            "errors": { "requests": "Too many requests. Your rate limit is 10 requests per minute." }
        })))
        .mount(&server)
        .await;

    let client = test_client(&server);
    let results = client
        .search_players("Anyone", Some(LeagueId::new(39)), false)
        .await
        .unwrap();

    assert!(results.is_empty());
}

#[tokio::test]
async fn test_provider_http_error_propagates() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/players"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;

    let client = test_client(&server);
    let result = client
        .player_statistics(ExternalId::new(874), Season::new(2025), false)
        .await;

    assert!(result.is_err());
}

#[tokio::test]
async fn test_import_maps_attacker_position_end_to_end() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/players"))
        .and(query_param("search", "Haaland"))
        .and(query_param("league", "39"))
        .respond_with(ResponseTemplate::new(200).set_body_json(envelope(vec![haaland_entry()])))
        .mount(&server)
        .await;

    let client = test_client(&server);
    let results = client
        .search_players("Haaland", Some(LeagueId::new(39)), false)
        .await
        .unwrap();
    assert_eq!(results.len(), 1);

    let mut db = scoutia::storage::ScoutDatabase::new_in_memory().unwrap();
    let new_athlete = new_athlete_from_entry(&results[0]);
    let id = db.insert_athlete(&new_athlete).unwrap();

    let stored = db.get_athlete(id).unwrap().unwrap();
    assert_eq!(stored.position, "FW");
    assert_eq!(stored.external_id, Some(ExternalId::new(874)));
}

#[tokio::test]
async fn test_injuries_and_transfers_endpoints() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/players/injuries"))
        .and(query_param("player", "874"))
        .respond_with(ResponseTemplate::new(200).set_body_json(envelope(vec![json!({
            "player": { "id": 874, "name": "E. Haaland", "type": "Missing Fixture", "reason": "Knee Injury" },
            "team": { "id": 50, "name": "Manchester City" },
            "fixture": { "id": 12345, "date": "2026-01-18T15:00:00+00:00" },
            "league": { "id": 39, "name": "Premier League", "season": 2025 }
        })])))
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/transfers"))
        .and(query_param("player", "874"))
        .respond_with(ResponseTemplate::new(200).set_body_json(envelope(vec![json!({
            "player": { "id": 874 },
            "transfers": [
                {
                    "date": "2022-07-01",
                    "type": "€ 60m",
                    "teams": {
                        "in": { "id": 50, "name": "Manchester City" },
                        "out": { "id": 165, "name": "Borussia Dortmund" }
                    }
                }
            ]
        })])))
        .mount(&server)
        .await;

    let client = test_client(&server);

    let injuries = client.injuries(ExternalId::new(874), false).await.unwrap();
    assert_eq!(injuries.len(), 1);
    assert_eq!(injuries[0].player.reason.as_deref(), Some("Knee Injury"));

    let transfers = client.transfers(ExternalId::new(874), false).await.unwrap();
    assert_eq!(transfers.len(), 1);
    assert_eq!(
        transfers[0]
            .teams
            .as_ref()
            .unwrap()
            .joined
            .as_ref()
            .unwrap()
            .name
            .as_deref(),
        Some("Manchester City")
    );
}
