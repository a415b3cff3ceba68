//! API error type and [`axum::response::IntoResponse`] implementation.

use axum::{
  Json,
  http::StatusCode,
  response::{IntoResponse, Response},
};
use serde_json::json;
use thiserror::Error;

/// An error returned by an API handler. Every variant renders as
/// `{"error": "<message>"}`.
#[derive(Debug, Error)]
pub enum ApiError {
  #[error("bad request: {0}")]
  BadRequest(String),

  #[error("not found: {0}")]
  NotFound(String),

  #[error("conflict: {0}")]
  Conflict(String),

  /// The store failed. `message` is what the client sees; the source is only
  /// logged.
  #[error("{message}: {source}")]
  Store {
    message: &'static str,
    #[source]
    source:  Box<dyn std::error::Error + Send + Sync>,
  },
}

impl ApiError {
  /// Map a repository error onto its HTTP counterpart. `failure` is the
  /// client-facing message used when the store itself failed.
  pub fn from_core(e: potluck_core::Error, failure: &'static str) -> Self {
    use potluck_core::Error;
    match e {
      Error::InvalidInput(m) => ApiError::BadRequest(m),
      Error::DuplicateName(_) => ApiError::Conflict("Name already exists".into()),
      Error::NotFound(_) => ApiError::NotFound("Person not found".into()),
      Error::StoreUnavailable(source) => ApiError::Store { message: failure, source },
    }
  }
}

impl IntoResponse for ApiError {
  fn into_response(self) -> Response {
    let (status, message) = match &self {
      ApiError::BadRequest(m) => (StatusCode::BAD_REQUEST, m.clone()),
      ApiError::NotFound(m) => (StatusCode::NOT_FOUND, m.clone()),
      ApiError::Conflict(m) => (StatusCode::CONFLICT, m.clone()),
      ApiError::Store { message, source } => {
        tracing::error!(error = %source, "{message}");
        (StatusCode::INTERNAL_SERVER_ERROR, (*message).to_owned())
      }
    };
    (status, Json(json!({ "error": message }))).into_response()
  }
}
