//! Handler for `GET /export`: a full JSON dump served as a file download.
//!
//! Read-only; there is no matching import.

use std::sync::Arc;

use axum::{extract::State, http::header, response::IntoResponse};
use copypastor_core::store::SnippetStore;

use crate::error::ApiError;

/// Suggested download name.
pub const EXPORT_FILENAME: &str = "copypastor-export.json";

/// `GET /export`: every snippet, newest first, pretty-printed.
pub async fn handler<S>(
  State(store): State<Arc<S>>,
) -> Result<impl IntoResponse, ApiError>
where
  S: SnippetStore,
{
  let snippets = store.export().await.map_err(ApiError::from_store)?;
  let body = serde_json::to_string_pretty(&snippets)
    .map_err(|e| ApiError::Store(Box::new(e)))?;
  tracing::info!(count = snippets.len(), "export generated");

  Ok((
    [
      (header::CONTENT_TYPE, "application/json".to_string()),
      (
        header::CONTENT_DISPOSITION,
        format!("attachment; filename=\"{EXPORT_FILENAME}\""),
      ),
    ],
    body,
  ))
}
