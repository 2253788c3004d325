//! API error taxonomy and HTTP status mapping.
//!
//! Handler failures converge here: validation errors map to 400, missing
//! cities and recipes to 404, and upstream trouble to 500. Transport detail
//! never reaches the client.

use serde::Serialize;
use thiserror::Error;
use warp::http::StatusCode;
use warp::Reply;

use cityfare_store::{StoreError, ValidationError};
use cityfare_upstream::UpstreamError;

/// Stable JSON body returned for every failure.
#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub error: String,
}

/// Any failure a request handler can produce.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error(transparent)]
    Store(#[from] StoreError),

    #[error(transparent)]
    Upstream(#[from] UpstreamError),
}

impl ApiError {
    /// HTTP status this error maps to.
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::Validation(_) => StatusCode::BAD_REQUEST,
            ApiError::Store(StoreError::Validation(_)) => StatusCode::BAD_REQUEST,
            ApiError::Store(StoreError::RecipeNotFound { .. }) => StatusCode::NOT_FOUND,
            ApiError::Upstream(UpstreamError::CityNotFound(_)) => StatusCode::NOT_FOUND,
            ApiError::Upstream(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Client-facing message. Transport errors are reduced to a generic
    /// description.
    pub fn message(&self) -> String {
        match self {
            ApiError::Upstream(UpstreamError::Network(_)) => {
                "Upstream service unavailable".to_string()
            }
            ApiError::Upstream(UpstreamError::InvalidResponse(_)) => {
                "Upstream service returned an invalid response".to_string()
            }
            other => other.to_string(),
        }
    }

    /// Render this error as the stable JSON reply.
    pub fn into_response(self) -> warp::reply::Response {
        let body = warp::reply::json(&ErrorBody {
            error: self.message(),
        });
        warp::reply::with_status(body, self.status()).into_response()
    }
}
