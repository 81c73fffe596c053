//! API error type and [`axum::response::IntoResponse`] implementation.

use axum::{
  Json,
  extract::rejection::{JsonRejection, PathRejection, QueryRejection},
  http::StatusCode,
  response::{IntoResponse, Response},
};
use copypastor_core::AsCoreError;
use serde_json::json;
use thiserror::Error;

/// An error returned by an API handler.
///
/// Every variant renders as `{"error": "<message>"}`.
#[derive(Debug, Error)]
pub enum ApiError {
  #[error("not found: {0}")]
  NotFound(String),

  #[error("bad request: {0}")]
  BadRequest(String),

  #[error("store error: {0}")]
  Store(#[source] Box<dyn std::error::Error + Send + Sync>),
}

impl ApiError {
  /// Classify a backend error: domain failures keep their meaning, anything
  /// else is reported as a store failure.
  pub fn from_store<E>(e: E) -> Self
  where
    E: std::error::Error + AsCoreError + Send + Sync + 'static,
  {
    match e.as_core() {
      Some(core) => Self::from_core(core),
      None => ApiError::Store(Box::new(e)),
    }
  }

  fn from_core(e: &copypastor_core::Error) -> Self {
    match e {
      copypastor_core::Error::Validation(m) => ApiError::BadRequest(m.clone()),
      copypastor_core::Error::NotFound(id) => {
        ApiError::NotFound(format!("snippet {id} not found"))
      }
    }
  }
}

impl From<copypastor_core::Error> for ApiError {
  fn from(e: copypastor_core::Error) -> Self { Self::from_core(&e) }
}

impl From<JsonRejection> for ApiError {
  fn from(r: JsonRejection) -> Self { ApiError::BadRequest(r.body_text()) }
}

impl From<PathRejection> for ApiError {
  fn from(r: PathRejection) -> Self { ApiError::BadRequest(r.body_text()) }
}

impl From<QueryRejection> for ApiError {
  fn from(r: QueryRejection) -> Self { ApiError::BadRequest(r.body_text()) }
}

impl IntoResponse for ApiError {
  fn into_response(self) -> Response {
    let (status, message) = match &self {
      ApiError::NotFound(m) => (StatusCode::NOT_FOUND, m.clone()),
      ApiError::BadRequest(m) => (StatusCode::BAD_REQUEST, m.clone()),
      // Storage failures are reported as 400, the same as validation failures.
      ApiError::Store(e) => (StatusCode::BAD_REQUEST, e.to_string()),
    };
    tracing::warn!(status = status.as_u16(), error = %message, "request failed");
    (status, Json(json!({ "error": message }))).into_response()
  }
}
