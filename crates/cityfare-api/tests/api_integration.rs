//! End-to-end handler tests: the warp route tree against a wiremock
//! upstream and a fresh in-memory store per test.

use std::sync::Arc;
use std::time::Duration;

use cityfare_api::{routes, AppState};
use cityfare_store::{MemoryRecipeStore, RecipeBackend};
use cityfare_upstream::UpstreamClient;
use url::Url;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn app_state(server: &MockServer) -> AppState {
    let base = Url::parse(&server.uri()).unwrap();
    let upstream = UpstreamClient::new(base, "test-key", Duration::from_secs(5)).unwrap();
    let store: Arc<dyn RecipeBackend> = Arc::new(MemoryRecipeStore::new());

    AppState { store, upstream }
}

fn insights_body() -> serde_json::Value {
    serde_json::json!({
        "coordinates": {"latitude": 48.8566, "longitude": 2.3522},
        "population": 2161000,
        "knownFor": ["croissants", "art"]
    })
}

fn weather_body() -> serde_json::Value {
    serde_json::json!([{
        "cityId": "paris",
        "cityName": "Paris",
        "predictions": [
            {"when": "today", "min": 8.0, "max": 16.0},
            {"when": "tomorrow", "min": 3.0, "max": 14.0}
        ]
    }])
}

async fn mount_paris(server: &MockServer) {
    Mock::given(method("GET"))
        .and(path("/cities/paris/insights"))
        .respond_with(ResponseTemplate::new(200).set_body_json(insights_body()))
        .mount(server)
        .await;
    Mock::given(method("GET"))
        .and(path("/weather-predictions"))
        .respond_with(ResponseTemplate::new(200).set_body_json(weather_body()))
        .mount(server)
        .await;
}

fn body_json(body: &[u8]) -> serde_json::Value {
    serde_json::from_slice(body).unwrap()
}

#[tokio::test]
async fn test_get_city_infos_success() {
    let mock_server = MockServer::start().await;
    mount_paris(&mock_server).await;

    let state = app_state(&mock_server);
    state.store.add("paris", "Add cream and butter").unwrap();

    let response = warp::test::request()
        .method("GET")
        .path("/cities/paris/infos")
        .reply(&routes(state))
        .await;

    assert_eq!(response.status(), 200);
    let body = body_json(response.body());
    assert_eq!(body["coordinates"], serde_json::json!([48.8566, 2.3522]));
    assert_eq!(body["population"], 2161000);
    assert_eq!(body["knownFor"], serde_json::json!(["croissants", "art"]));
    assert_eq!(
        body["weatherPredictions"],
        serde_json::json!([
            {"when": "today", "min": 8.0, "max": 16.0},
            {"when": "tomorrow", "min": 3.0, "max": 14.0}
        ])
    );
    assert_eq!(
        body["recipes"],
        serde_json::json!([{"id": 1, "content": "Add cream and butter"}])
    );
}

#[tokio::test]
async fn test_get_city_infos_unknown_city() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/cities/unknown-city-xyz/insights"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&mock_server)
        .await;

    let response = warp::test::request()
        .method("GET")
        .path("/cities/unknown-city-xyz/infos")
        .reply(&routes(app_state(&mock_server)))
        .await;

    assert_eq!(response.status(), 404);
    assert!(body_json(response.body())["error"].is_string());
}

#[tokio::test]
async fn test_get_city_infos_weather_down() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/cities/paris/insights"))
        .respond_with(ResponseTemplate::new(200).set_body_json(insights_body()))
        .mount(&mock_server)
        .await;
    Mock::given(method("GET"))
        .and(path("/weather-predictions"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&mock_server)
        .await;

    let response = warp::test::request()
        .method("GET")
        .path("/cities/paris/infos")
        .reply(&routes(app_state(&mock_server)))
        .await;

    assert_eq!(response.status(), 500);
    assert!(body_json(response.body())["error"].is_string());
}

#[tokio::test]
async fn test_recipe_lifecycle() {
    let mock_server = MockServer::start().await;
    mount_paris(&mock_server).await;

    let filter = routes(app_state(&mock_server));

    // Create
    let response = warp::test::request()
        .method("POST")
        .path("/cities/paris/recipes")
        .json(&serde_json::json!({"content": "Add cream and butter"}))
        .reply(&filter)
        .await;
    assert_eq!(response.status(), 201);
    assert_eq!(
        body_json(response.body()),
        serde_json::json!({"id": 1, "content": "Add cream and butter"})
    );

    // Listed in the aggregated view
    let response = warp::test::request()
        .method("GET")
        .path("/cities/paris/infos")
        .reply(&filter)
        .await;
    assert_eq!(response.status(), 200);
    assert_eq!(
        body_json(response.body())["recipes"],
        serde_json::json!([{"id": 1, "content": "Add cream and butter"}])
    );

    // Delete
    let response = warp::test::request()
        .method("DELETE")
        .path("/cities/paris/recipes/1")
        .reply(&filter)
        .await;
    assert_eq!(response.status(), 204);
    assert!(response.body().is_empty());

    // Gone from the aggregated view
    let response = warp::test::request()
        .method("GET")
        .path("/cities/paris/infos")
        .reply(&filter)
        .await;
    assert_eq!(body_json(response.body())["recipes"], serde_json::json!([]));
}

#[tokio::test]
async fn test_add_recipe_rejects_short_content_without_upstream_call() {
    let mock_server = MockServer::start().await;

    // Validation fails before the existence check, so no upstream call
    Mock::given(method("GET"))
        .and(path("/cities/paris/insights"))
        .respond_with(ResponseTemplate::new(200).set_body_json(insights_body()))
        .expect(0)
        .mount(&mock_server)
        .await;

    let response = warp::test::request()
        .method("POST")
        .path("/cities/paris/recipes")
        .json(&serde_json::json!({"content": "too short"}))
        .reply(&routes(app_state(&mock_server)))
        .await;

    assert_eq!(response.status(), 400);
    assert_eq!(
        body_json(response.body())["error"],
        "Recipe content is too short (minimum 10 characters)"
    );
}

#[tokio::test]
async fn test_add_recipe_missing_content_field() {
    let mock_server = MockServer::start().await;

    let response = warp::test::request()
        .method("POST")
        .path("/cities/paris/recipes")
        .json(&serde_json::json!({}))
        .reply(&routes(app_state(&mock_server)))
        .await;

    assert_eq!(response.status(), 400);
    assert_eq!(body_json(response.body())["error"], "Recipe content is required");
}

#[tokio::test]
async fn test_add_recipe_unknown_city() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/cities/atlantis/insights"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&mock_server)
        .await;

    let state = app_state(&mock_server);
    let response = warp::test::request()
        .method("POST")
        .path("/cities/atlantis/recipes")
        .json(&serde_json::json!({"content": "A perfectly valid recipe"}))
        .reply(&routes(state.clone()))
        .await;

    assert_eq!(response.status(), 404);
    // Nothing was stored for the unknown city
    assert!(state.store.list("atlantis").is_empty());
}

#[tokio::test]
async fn test_add_recipe_malformed_body() {
    let mock_server = MockServer::start().await;

    let response = warp::test::request()
        .method("POST")
        .path("/cities/paris/recipes")
        .body("not json")
        .reply(&routes(app_state(&mock_server)))
        .await;

    assert_eq!(response.status(), 400);
    assert!(body_json(response.body())["error"].is_string());
}

#[tokio::test]
async fn test_delete_recipe_unknown_recipe() {
    let mock_server = MockServer::start().await;
    mount_paris(&mock_server).await;

    let response = warp::test::request()
        .method("DELETE")
        .path("/cities/paris/recipes/99")
        .reply(&routes(app_state(&mock_server)))
        .await;

    assert_eq!(response.status(), 404);
    assert!(body_json(response.body())["error"].is_string());
}

#[tokio::test]
async fn test_delete_recipe_unknown_city() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/cities/atlantis/insights"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&mock_server)
        .await;

    let response = warp::test::request()
        .method("DELETE")
        .path("/cities/atlantis/recipes/1")
        .reply(&routes(app_state(&mock_server)))
        .await;

    assert_eq!(response.status(), 404);
}

#[tokio::test]
async fn test_health() {
    let mock_server = MockServer::start().await;

    let response = warp::test::request()
        .method("GET")
        .path("/health")
        .reply(&routes(app_state(&mock_server)))
        .await;

    assert_eq!(response.status(), 200);
    assert_eq!(body_json(response.body()), serde_json::json!({"status": "ok"}));
}

#[tokio::test]
async fn test_unknown_route_has_stable_error_shape() {
    let mock_server = MockServer::start().await;

    let response = warp::test::request()
        .method("GET")
        .path("/nope")
        .reply(&routes(app_state(&mock_server)))
        .await;

    assert_eq!(response.status(), 404);
    assert!(body_json(response.body())["error"].is_string());
}
