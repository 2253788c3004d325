//! Route tree and rejection recovery.

use std::convert::Infallible;

use warp::http::StatusCode;
use warp::{Filter, Rejection, Reply};

use crate::error::ErrorBody;
use crate::handlers::{self, AppState};

/// Maximum accepted request body size.
const BODY_LIMIT_BYTES: u64 = 16 * 1024;

/// Build the full route tree, rejection recovery included.
pub fn routes(
    state: AppState,
) -> impl Filter<Extract = (impl Reply,), Error = Infallible> + Clone {
    let city_infos = warp::path!("cities" / String / "infos")
        .and(warp::get())
        .and(with_state(state.clone()))
        .and_then(handlers::get_city_infos);

    let add_recipe = warp::path!("cities" / String / "recipes")
        .and(warp::post())
        .and(warp::body::content_length_limit(BODY_LIMIT_BYTES))
        .and(warp::body::json())
        .and(with_state(state.clone()))
        .and_then(handlers::add_recipe);

    let delete_recipe = warp::path!("cities" / String / "recipes" / i64)
        .and(warp::delete())
        .and(with_state(state))
        .and_then(handlers::delete_recipe);

    let health = warp::path!("health")
        .and(warp::get())
        .and_then(handlers::health);

    city_infos
        .or(add_recipe)
        .or(delete_recipe)
        .or(health)
        .recover(handle_rejection)
}

fn with_state(state: AppState) -> impl Filter<Extract = (AppState,), Error = Infallible> + Clone {
    warp::any().map(move || state.clone())
}

/// Convert every rejection into the stable JSON error shape.
///
/// Nothing about the failure's internals leaks to the client.
async fn handle_rejection(err: Rejection) -> Result<impl Reply, Infallible> {
    let (status, message) = if err.is_not_found() {
        (StatusCode::NOT_FOUND, "Resource not found".to_string())
    } else if let Some(e) = err.find::<warp::filters::body::BodyDeserializeError>() {
        (StatusCode::BAD_REQUEST, e.to_string())
    } else if err.find::<warp::reject::PayloadTooLarge>().is_some() {
        (StatusCode::PAYLOAD_TOO_LARGE, "Request body too large".to_string())
    } else if err.find::<warp::reject::MethodNotAllowed>().is_some() {
        (StatusCode::METHOD_NOT_ALLOWED, "Method not allowed".to_string())
    } else {
        tracing::error!("Unhandled rejection: {:?}", err);
        (StatusCode::INTERNAL_SERVER_ERROR, "Internal server error".to_string())
    };

    let body = warp::reply::json(&ErrorBody { error: message });
    Ok(warp::reply::with_status(body, status))
}
