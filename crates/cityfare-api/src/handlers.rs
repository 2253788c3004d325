//! Request handlers for the three city endpoints plus health.

use std::convert::Infallible;
use std::sync::Arc;

use serde::{Deserialize, Serialize};
use warp::http::StatusCode;
use warp::Reply;

use cityfare_store::{validate_content, Recipe, RecipeBackend};
use cityfare_upstream::{CityBundle, UpstreamClient, WeatherPrediction};

use crate::error::ApiError;

/// Shared state injected into every handler.
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn RecipeBackend>,
    pub upstream: UpstreamClient,
}

/// Body of `POST /cities/:cityId/recipes`.
///
/// A missing `content` field is treated the same as an empty one.
#[derive(Debug, Deserialize)]
pub struct RecipeBody {
    #[serde(default)]
    pub content: String,
}

/// Aggregated response for `GET /cities/:cityId/infos`.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CityInfoResponse {
    /// [latitude, longitude]
    pub coordinates: (f64, f64),
    pub population: u64,
    pub known_for: Vec<String>,
    pub weather_predictions: Vec<WeatherPrediction>,
    pub recipes: Vec<Recipe>,
}

impl CityInfoResponse {
    fn from_parts(bundle: CityBundle, recipes: Vec<Recipe>) -> Self {
        Self {
            coordinates: bundle.coordinates,
            population: bundle.population,
            known_for: bundle.known_for,
            weather_predictions: bundle.predictions,
            recipes,
        }
    }
}

/// `GET /cities/:cityId/infos`
pub async fn get_city_infos(
    city_id: String,
    state: AppState,
) -> Result<warp::reply::Response, Infallible> {
    Ok(city_infos(&city_id, &state)
        .await
        .unwrap_or_else(|e| e.into_response()))
}

async fn city_infos(city_id: &str, state: &AppState) -> Result<warp::reply::Response, ApiError> {
    let bundle = state.upstream.fetch_city_bundle(city_id).await?;
    let recipes = state.store.list(city_id);

    let body = CityInfoResponse::from_parts(bundle, recipes);
    Ok(json_with_status(&body, StatusCode::OK))
}

/// `POST /cities/:cityId/recipes`
pub async fn add_recipe(
    city_id: String,
    body: RecipeBody,
    state: AppState,
) -> Result<warp::reply::Response, Infallible> {
    Ok(create_recipe(&city_id, &body, &state)
        .await
        .unwrap_or_else(|e| e.into_response()))
}

async fn create_recipe(
    city_id: &str,
    body: &RecipeBody,
    state: &AppState,
) -> Result<warp::reply::Response, ApiError> {
    // Validation runs before the existence check; invalid input never
    // reaches the upstream catalog.
    validate_content(&body.content)?;
    state.upstream.city_exists(city_id).await?;

    let recipe = state.store.add(city_id, &body.content)?;
    tracing::info!("Created recipe {} for city {}", recipe.id, city_id);

    Ok(json_with_status(&recipe, StatusCode::CREATED))
}

/// `DELETE /cities/:cityId/recipes/:recipeId`
pub async fn delete_recipe(
    city_id: String,
    recipe_id: i64,
    state: AppState,
) -> Result<warp::reply::Response, Infallible> {
    Ok(remove_recipe(&city_id, recipe_id, &state)
        .await
        .unwrap_or_else(|e| e.into_response()))
}

async fn remove_recipe(
    city_id: &str,
    recipe_id: i64,
    state: &AppState,
) -> Result<warp::reply::Response, ApiError> {
    state.upstream.city_exists(city_id).await?;
    state.store.delete(city_id, recipe_id)?;
    tracing::info!("Deleted recipe {} for city {}", recipe_id, city_id);

    Ok(StatusCode::NO_CONTENT.into_response())
}

/// `GET /health`
pub async fn health() -> Result<warp::reply::Response, Infallible> {
    Ok(warp::reply::json(&serde_json::json!({"status": "ok"})).into_response())
}

fn json_with_status<T: Serialize>(body: &T, status: StatusCode) -> warp::reply::Response {
    warp::reply::with_status(warp::reply::json(body), status).into_response()
}
