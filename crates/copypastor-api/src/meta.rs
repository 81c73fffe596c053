//! Handler for `GET /meta`.

use std::sync::Arc;

use axum::{Json, extract::State};
use copypastor_core::{meta::Meta, store::SnippetStore};

use crate::error::ApiError;

/// `GET /meta`: `{"tags": [...], "categories": [...]}`, recomputed on every
/// call.
pub async fn handler<S>(State(store): State<Arc<S>>) -> Result<Json<Meta>, ApiError>
where
  S: SnippetStore,
{
  let meta = store.meta().await.map_err(ApiError::from_store)?;
  Ok(Json(meta))
}
