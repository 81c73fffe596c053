//! Handlers for `/snippets` endpoints.
//!
//! | Method   | Path                   | Notes |
//! |----------|------------------------|-------|
//! | `GET`    | `/snippets`            | `?search`, `?category`, `?tag`, `?sort=newest\|most_used` |
//! | `POST`   | `/snippets`            | Body: [`SnippetBody`]; returns 201 + stored snippet |
//! | `PUT`    | `/snippets/:id`        | Body: [`SnippetBody`]; full overwrite |
//! | `PUT`    | `/snippets/:id/pin`    | Body: `{"pinned": true}` |
//! | `PATCH`  | `/snippets/:id/usage`  | Marks the snippet as just copied |
//! | `DELETE` | `/snippets/:id`        | 404 if the id does not exist |

use std::sync::Arc;

use axum::{Json, extract::State, http::StatusCode, response::IntoResponse};
use copypastor_core::{
  query::SnippetQuery,
  snippet::{Snippet, SnippetFields, SnippetId},
  store::SnippetStore,
};
use serde::{Deserialize, Serialize};

use crate::{
  error::ApiError,
  extract::{ApiJson, ApiPath, ApiQuery},
};

const SUCCESS: &str = "success";

// ─── Response envelopes ───────────────────────────────────────────────────────

/// `{"message": "success", "data": ...}`
#[derive(Debug, Serialize, Deserialize)]
pub struct DataResponse<T> {
  pub message: String,
  pub data:    T,
}

impl<T> DataResponse<T> {
  fn success(data: T) -> Json<Self> {
    Json(Self { message: SUCCESS.into(), data })
  }
}

/// `{"message": "success"}`
#[derive(Debug, Serialize, Deserialize)]
pub struct MessageResponse {
  pub message: String,
}

/// `{"message": "success", "pinned": <bool>}`
#[derive(Debug, Serialize, Deserialize)]
pub struct PinResponse {
  pub message: String,
  pub pinned:  bool,
}

// ─── List ─────────────────────────────────────────────────────────────────────

/// `GET /snippets[?search=...][&category=...][&tag=...][&sort=...]`
pub async fn list<S>(
  State(store): State<Arc<S>>,
  ApiQuery(query): ApiQuery<SnippetQuery>,
) -> Result<Json<DataResponse<Vec<Snippet>>>, ApiError>
where
  S: SnippetStore,
{
  let query = query.normalized();
  tracing::debug!(?query, "listing snippets");
  let snippets = store.list(&query).await.map_err(ApiError::from_store)?;
  Ok(DataResponse::success(snippets))
}

// ─── Create / update ──────────────────────────────────────────────────────────

/// JSON body accepted by `POST /snippets` and `PUT /snippets/:id`.
///
/// Every field is optional at the wire level so that a missing `title` or
/// `content` surfaces as a validation error rather than a decode error.
/// Unknown fields (e.g. an echoed `id`) are ignored.
#[derive(Debug, Default, Deserialize)]
pub struct SnippetBody {
  #[serde(default)]
  pub title:    Option<String>,
  #[serde(default)]
  pub content:  Option<String>,
  #[serde(default)]
  pub category: Option<String>,
  #[serde(default)]
  pub tags:     Option<String>,
}

impl TryFrom<SnippetBody> for SnippetFields {
  type Error = copypastor_core::Error;

  fn try_from(b: SnippetBody) -> Result<Self, Self::Error> {
    SnippetFields::parse(b.title, b.content, b.category, b.tags)
  }
}

/// `POST /snippets`: returns 201 + the stored [`Snippet`].
pub async fn create<S>(
  State(store): State<Arc<S>>,
  ApiJson(body): ApiJson<SnippetBody>,
) -> Result<impl IntoResponse, ApiError>
where
  S: SnippetStore,
{
  let fields = SnippetFields::try_from(body)?;
  let snippet = store.create(fields).await.map_err(ApiError::from_store)?;
  tracing::info!(id = snippet.id, "snippet created");
  Ok((StatusCode::CREATED, DataResponse::success(snippet)))
}

/// `PUT /snippets/:id`: overwrites title, content, category, and tags.
pub async fn update<S>(
  State(store): State<Arc<S>>,
  ApiPath(id): ApiPath<SnippetId>,
  ApiJson(body): ApiJson<SnippetBody>,
) -> Result<Json<DataResponse<Snippet>>, ApiError>
where
  S: SnippetStore,
{
  let fields = SnippetFields::try_from(body)?;
  let snippet = store.update(id, fields).await.map_err(ApiError::from_store)?;
  tracing::info!(id, "snippet updated");
  Ok(DataResponse::success(snippet))
}

// ─── Pin ──────────────────────────────────────────────────────────────────────

/// Target pin state; `true`/`false` and `1`/`0` are both accepted.
#[derive(Debug, Clone, Copy, Deserialize)]
#[serde(untagged)]
pub enum PinFlag {
  Bool(bool),
  Int(i64),
}

impl From<PinFlag> for bool {
  fn from(flag: PinFlag) -> Self {
    match flag {
      PinFlag::Bool(b) => b,
      PinFlag::Int(n) => n != 0,
    }
  }
}

#[derive(Debug, Deserialize)]
pub struct PinBody {
  pub pinned: PinFlag,
}

/// `PUT /snippets/:id/pin`: body: `{"pinned": true}`. Setting the current
/// value again succeeds with the same response.
pub async fn pin<S>(
  State(store): State<Arc<S>>,
  ApiPath(id): ApiPath<SnippetId>,
  ApiJson(body): ApiJson<PinBody>,
) -> Result<Json<PinResponse>, ApiError>
where
  S: SnippetStore,
{
  let pinned = store
    .set_pinned(id, body.pinned.into())
    .await
    .map_err(ApiError::from_store)?;
  tracing::info!(id, pinned, "snippet pin set");
  Ok(Json(PinResponse { message: SUCCESS.into(), pinned }))
}

// ─── Usage ────────────────────────────────────────────────────────────────────

/// `PATCH /snippets/:id/usage`: sets `last_copied` to now.
pub async fn usage<S>(
  State(store): State<Arc<S>>,
  ApiPath(id): ApiPath<SnippetId>,
) -> Result<Json<MessageResponse>, ApiError>
where
  S: SnippetStore,
{
  let at = store.touch(id).await.map_err(ApiError::from_store)?;
  tracing::debug!(id, %at, "snippet used");
  Ok(Json(MessageResponse { message: SUCCESS.into() }))
}

// ─── Delete ───────────────────────────────────────────────────────────────────

/// `DELETE /snippets/:id`
pub async fn delete_one<S>(
  State(store): State<Arc<S>>,
  ApiPath(id): ApiPath<SnippetId>,
) -> Result<Json<MessageResponse>, ApiError>
where
  S: SnippetStore,
{
  store.delete(id).await.map_err(ApiError::from_store)?;
  tracing::info!(id, "snippet deleted");
  Ok(Json(MessageResponse { message: SUCCESS.into() }))
}
