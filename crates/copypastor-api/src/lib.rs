//! JSON REST API for copypastor.
//!
//! Exposes an axum [`Router`] backed by any
//! [`copypastor_core::store::SnippetStore`]. Transport, static assets, and
//! request tracing are the caller's responsibility.
//!
//! # Mounting
//!
//! ```rust,ignore
//! .nest("/api", copypastor_api::api_router(store.clone()))
//! ```

pub mod error;
pub mod export;
pub mod extract;
pub mod meta;
pub mod snippets;

use std::sync::Arc;

use axum::{
  Router,
  routing::{get, patch, put},
};
use copypastor_core::store::SnippetStore;

pub use error::ApiError;

/// Build a fully-materialised API router for `store`.
///
/// The returned `Router<()>` can be nested into any parent router regardless
/// of its own state type.
pub fn api_router<S>(store: Arc<S>) -> Router<()>
where
  S: SnippetStore + 'static,
{
  Router::new()
    // Snippets
    .route("/snippets", get(snippets::list::<S>).post(snippets::create::<S>))
    .route(
      "/snippets/{id}",
      put(snippets::update::<S>).delete(snippets::delete_one::<S>),
    )
    .route("/snippets/{id}/pin", put(snippets::pin::<S>))
    .route("/snippets/{id}/usage", patch(snippets::usage::<S>))
    // Derived views
    .route("/export", get(export::handler::<S>))
    .route("/meta", get(meta::handler::<S>))
    .with_state(store)
}

// ─── Integration tests ────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
  use super::*;

  use axum::{
    body::Body,
    http::{HeaderMap, Request, StatusCode, header},
  };
  use copypastor_store_sqlite::SqliteStore;
  use serde_json::{Value, json};
  use tower::ServiceExt as _;

  async fn app() -> Router {
    let store = SqliteStore::open_in_memory().await.unwrap();
    api_router(Arc::new(store))
  }

  async fn send(
    app: &Router,
    method: &str,
    uri: &str,
    body: Option<Value>,
  ) -> (StatusCode, HeaderMap, Value) {
    let mut builder = Request::builder().method(method).uri(uri);
    let body = match body {
      Some(v) => {
        builder = builder.header(header::CONTENT_TYPE, "application/json");
        Body::from(v.to_string())
      }
      None => Body::empty(),
    };
    let resp = app
      .clone()
      .oneshot(builder.body(body).unwrap())
      .await
      .unwrap();
    let status = resp.status();
    let headers = resp.headers().clone();
    let bytes = axum::body::to_bytes(resp.into_body(), usize::MAX).await.unwrap();
    let json = if bytes.is_empty() {
      Value::Null
    } else {
      serde_json::from_slice(&bytes).unwrap()
    };
    (status, headers, json)
  }

  async fn create(app: &Router, body: Value) -> i64 {
    let (status, _, json) = send(app, "POST", "/snippets", Some(body)).await;
    assert_eq!(status, StatusCode::CREATED, "create failed: {json}");
    json["data"]["id"].as_i64().unwrap()
  }

  fn titles(json: &Value) -> Vec<&str> {
    json["data"]
      .as_array()
      .unwrap()
      .iter()
      .map(|s| s["title"].as_str().unwrap())
      .collect()
  }

  // ── Create ──────────────────────────────────────────────────────────────────

  #[tokio::test]
  async fn create_returns_envelope_with_id_and_fields() {
    let app = app().await;
    let (status, _, json) = send(
      &app,
      "POST",
      "/snippets",
      Some(json!({ "title": "Key", "content": "sk-1", "category": "Work", "tags": "api-key" })),
    )
    .await;

    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(json["message"], "success");
    assert!(json["data"]["id"].is_i64());
    assert_eq!(json["data"]["title"], "Key");
    assert_eq!(json["data"]["content"], "sk-1");
    assert_eq!(json["data"]["category"], "Work");
    assert_eq!(json["data"]["tags"], "api-key");
    assert_eq!(json["data"]["pinned"], false);
    assert_eq!(json["data"]["last_copied"], Value::Null);
  }

  #[tokio::test]
  async fn create_without_title_is_400_with_error_body() {
    let app = app().await;
    let (status, _, json) =
      send(&app, "POST", "/snippets", Some(json!({ "content": "x" }))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(json["error"].as_str().unwrap().contains("title"));
  }

  #[tokio::test]
  async fn malformed_json_is_400_with_error_body() {
    let app = app().await;
    let req = Request::builder()
      .method("POST")
      .uri("/snippets")
      .header(header::CONTENT_TYPE, "application/json")
      .body(Body::from("{not json"))
      .unwrap();
    let resp = app.oneshot(req).await.unwrap();
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    let bytes = axum::body::to_bytes(resp.into_body(), usize::MAX).await.unwrap();
    let json: Value = serde_json::from_slice(&bytes).unwrap();
    assert!(json["error"].is_string());
  }

  // ── List ────────────────────────────────────────────────────────────────────

  #[tokio::test]
  async fn list_filters_and_orders_pinned_first() {
    let app = app().await;
    create(&app, json!({ "title": "A", "content": "a", "category": "Dev" })).await;
    let b = create(&app, json!({ "title": "B", "content": "b", "category": "Dev" })).await;
    create(&app, json!({ "title": "C", "content": "c", "category": "Work" })).await;

    let (status, _, json) =
      send(&app, "PUT", &format!("/snippets/{b}/pin"), Some(json!({ "pinned": true }))).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json, json!({ "message": "success", "pinned": true }));

    let (status, _, json) =
      send(&app, "GET", "/snippets?category=Dev&sort=newest", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["message"], "success");
    assert_eq!(titles(&json), ["B", "A"]);
  }

  #[tokio::test]
  async fn list_with_empty_params_returns_everything() {
    let app = app().await;
    create(&app, json!({ "title": "A", "content": "a" })).await;
    create(&app, json!({ "title": "B", "content": "b", "tags": "x" })).await;

    let (_, _, json) = send(&app, "GET", "/snippets?search=&tag=&category=", None).await;
    assert_eq!(titles(&json), ["B", "A"]);
  }

  #[tokio::test]
  async fn list_rejects_unknown_sort() {
    let app = app().await;
    let (status, _, json) = send(&app, "GET", "/snippets?sort=oldest", None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(json["error"].is_string());
  }

  // ── Update ──────────────────────────────────────────────────────────────────

  #[tokio::test]
  async fn update_overwrites_and_clears_omitted_fields() {
    let app = app().await;
    let id = create(
      &app,
      json!({ "title": "old", "content": "old", "category": "Dev", "tags": "t" }),
    )
    .await;

    let (status, _, json) = send(
      &app,
      "PUT",
      &format!("/snippets/{id}"),
      Some(json!({ "id": id, "title": "new", "content": "new" })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["data"]["title"], "new");
    assert_eq!(json["data"]["category"], Value::Null);
    assert_eq!(json["data"]["tags"], Value::Null);
  }

  #[tokio::test]
  async fn writes_to_unknown_id_are_404() {
    let app = app().await;
    let body = json!({ "title": "t", "content": "c" });

    let (status, _, json) = send(&app, "PUT", "/snippets/99", Some(body)).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert!(json["error"].as_str().unwrap().contains("99"));

    let (status, _, _) =
      send(&app, "PUT", "/snippets/99/pin", Some(json!({ "pinned": true }))).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, _, _) = send(&app, "PATCH", "/snippets/99/usage", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, _, _) = send(&app, "DELETE", "/snippets/99", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
  }

  #[tokio::test]
  async fn non_numeric_id_is_400() {
    let app = app().await;
    let (status, _, json) = send(&app, "DELETE", "/snippets/abc", None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(json["error"].is_string());
  }

  // ── Pin / usage / delete ────────────────────────────────────────────────────

  #[tokio::test]
  async fn pin_twice_gives_identical_responses_and_accepts_integers() {
    let app = app().await;
    let id = create(&app, json!({ "title": "t", "content": "c" })).await;
    let uri = format!("/snippets/{id}/pin");

    let first = send(&app, "PUT", &uri, Some(json!({ "pinned": 1 }))).await;
    let second = send(&app, "PUT", &uri, Some(json!({ "pinned": true }))).await;
    assert_eq!(first.0, StatusCode::OK);
    assert_eq!(first.0, second.0);
    assert_eq!(first.2, second.2);

    let (_, _, json) = send(&app, "PUT", &uri, Some(json!({ "pinned": 0 }))).await;
    assert_eq!(json["pinned"], false);
  }

  #[tokio::test]
  async fn usage_sets_last_copied() {
    let app = app().await;
    let id = create(&app, json!({ "title": "t", "content": "c" })).await;

    let (status, _, json) =
      send(&app, "PATCH", &format!("/snippets/{id}/usage"), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json, json!({ "message": "success" }));

    let (_, _, json) = send(&app, "GET", "/snippets?sort=most_used", None).await;
    assert!(json["data"][0]["last_copied"].is_string());
  }

  #[tokio::test]
  async fn delete_then_delete_again_is_404() {
    let app = app().await;
    let id = create(&app, json!({ "title": "t", "content": "c" })).await;

    let (status, _, json) = send(&app, "DELETE", &format!("/snippets/{id}"), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json, json!({ "message": "success" }));

    let (status, _, _) = send(&app, "DELETE", &format!("/snippets/{id}"), None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
  }

  // ── Export / meta ───────────────────────────────────────────────────────────

  #[tokio::test]
  async fn export_is_an_attachment_array() {
    let app = app().await;
    create(&app, json!({ "title": "A", "content": "a" })).await;
    create(&app, json!({ "title": "B", "content": "b" })).await;

    let (status, headers, json) = send(&app, "GET", "/export", None).await;
    assert_eq!(status, StatusCode::OK);
    let disposition = headers[header::CONTENT_DISPOSITION].to_str().unwrap();
    assert!(disposition.starts_with("attachment"));
    assert!(disposition.contains("copypastor-export.json"));
    let list = json.as_array().unwrap();
    assert_eq!(list.len(), 2);
    assert_eq!(list[0]["title"], "B");
  }

  #[tokio::test]
  async fn meta_tracks_new_tags_and_categories() {
    let app = app().await;
    let (_, _, json) = send(&app, "GET", "/meta", None).await;
    assert_eq!(json, json!({ "tags": [], "categories": [] }));

    create(
      &app,
      json!({ "title": "t", "content": "c", "category": "Dev", "tags": "api-key, react-hooks  production" }),
    )
    .await;

    let (_, _, json) = send(&app, "GET", "/meta", None).await;
    assert_eq!(
      json,
      json!({ "tags": ["api-key", "react-hooks", "production"], "categories": ["Dev"] })
    );
  }
}
