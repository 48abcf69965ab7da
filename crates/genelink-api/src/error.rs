//! API error type and [`axum::response::IntoResponse`] implementation.

use axum::{
  Json,
  http::StatusCode,
  response::{IntoResponse, Response},
};
use genelink_core::error::PipelineError;
use serde_json::json;
use thiserror::Error;

/// An error returned by an API handler.
///
/// The variant is the caller-visible classification: not-found vs conflict
/// vs upstream-failure vs store failure.
#[derive(Debug, Error)]
pub enum ApiError {
  #[error("not found: {0}")]
  NotFound(String),

  #[error("conflict: {0}")]
  Conflict(String),

  /// The knowledge-graph service failed or had no match for a name.
  #[error("upstream failure: {0}")]
  Upstream(String),

  #[error("store error: {0}")]
  Store(#[source] Box<dyn std::error::Error + Send + Sync>),
}

impl From<PipelineError> for ApiError {
  fn from(e: PipelineError) -> Self {
    match e {
      PipelineError::UserNotFound(username) => {
        ApiError::NotFound(format!("user {username:?} not found"))
      }
      PipelineError::Lookup(e) => ApiError::Upstream(e.to_string()),
      PipelineError::Store(e) => ApiError::Store(e),
    }
  }
}

impl IntoResponse for ApiError {
  fn into_response(self) -> Response {
    let (status, message) = match &self {
      ApiError::NotFound(m) => (StatusCode::NOT_FOUND, m.clone()),
      ApiError::Conflict(m) => (StatusCode::CONFLICT, m.clone()),
      ApiError::Upstream(m) => (StatusCode::BAD_GATEWAY, m.clone()),
      ApiError::Store(e) => (StatusCode::INTERNAL_SERVER_ERROR, e.to_string()),
    };
    (
      status,
      Json(json!({ "status": "error", "message": message })),
    )
      .into_response()
  }
}
