//! Async HTTP client wrapping the copypastor JSON API.

use anyhow::{Context, Result, anyhow};
use copypastor_core::{
  meta::Meta,
  query::SnippetQuery,
  snippet::{Snippet, SnippetFields, SnippetId},
};
use reqwest::{Client, RequestBuilder, Response};
use serde::{Deserialize, de::DeserializeOwned};
use serde_json::json;

/// Connection settings for the copypastor API.
#[derive(Debug, Clone)]
pub struct ApiConfig {
  pub base_url: String,
}

/// Async HTTP client for the copypastor REST API.
///
/// Cheap to clone; the inner [`reqwest::Client`] is `Arc`-based.
#[derive(Clone)]
pub struct ApiClient {
  client: Client,
  config: ApiConfig,
}

/// `{"message": ..., "data": ...}`
#[derive(Deserialize)]
struct Envelope<T> {
  data: T,
}

#[derive(Deserialize)]
struct PinReply {
  pinned: bool,
}

#[derive(Deserialize)]
struct ErrorReply {
  error: String,
}

impl ApiClient {
  /// Requests carry no timeout and are never retried; a slow server is
  /// waited on and a failure is returned to the caller as is.
  pub fn new(config: ApiConfig) -> Result<Self> {
    let client = Client::builder()
      .build()
      .context("failed to build HTTP client")?;
    Ok(Self { client, config })
  }

  fn url(&self, path: &str) -> String {
    format!("{}/api{}", self.config.base_url.trim_end_matches('/'), path)
  }

  /// Send `req`, turning a non-2xx status into an error carrying the
  /// server's `{"error": ...}` message when there is one.
  async fn send(&self, req: RequestBuilder, what: &str) -> Result<Response> {
    let resp = req.send().await.with_context(|| format!("{what} failed"))?;
    let status = resp.status();
    if status.is_success() {
      return Ok(resp);
    }
    let message = match resp.json::<ErrorReply>().await {
      Ok(reply) => reply.error,
      Err(_) => status.to_string(),
    };
    Err(anyhow!("{what} → {status}: {message}"))
  }

  async fn data<T: DeserializeOwned>(&self, req: RequestBuilder, what: &str) -> Result<T> {
    let resp = self.send(req, what).await?;
    let envelope: Envelope<T> = resp
      .json()
      .await
      .with_context(|| format!("deserialising {what} response"))?;
    Ok(envelope.data)
  }

  // ── Reads ─────────────────────────────────────────────────────────────────

  /// `GET /api/snippets[?search=..&category=..&tag=..&sort=..]`
  pub async fn list_snippets(&self, query: &SnippetQuery) -> Result<Vec<Snippet>> {
    let req = self.client.get(self.url("/snippets")).query(query);
    self.data(req, "GET /snippets").await
  }

  /// `GET /api/meta`
  pub async fn meta(&self) -> Result<Meta> {
    let resp = self.send(self.client.get(self.url("/meta")), "GET /meta").await?;
    resp.json().await.context("deserialising meta")
  }

  /// `GET /api/export`, returned as the raw pretty-printed document.
  pub async fn export(&self) -> Result<String> {
    let resp = self
      .send(self.client.get(self.url("/export")), "GET /export")
      .await?;
    resp.text().await.context("reading export body")
  }

  // ── Mutations ─────────────────────────────────────────────────────────────

  /// `POST /api/snippets`
  pub async fn create(&self, fields: &SnippetFields) -> Result<Snippet> {
    let req = self.client.post(self.url("/snippets")).json(fields);
    self.data(req, "POST /snippets").await
  }

  /// `PUT /api/snippets/:id`
  pub async fn update(&self, id: SnippetId, fields: &SnippetFields) -> Result<Snippet> {
    let req = self.client.put(self.url(&format!("/snippets/{id}"))).json(fields);
    self.data(req, "PUT /snippets/:id").await
  }

  /// `PUT /api/snippets/:id/pin`; returns the stored pin state.
  pub async fn set_pinned(&self, id: SnippetId, pinned: bool) -> Result<bool> {
    let req = self
      .client
      .put(self.url(&format!("/snippets/{id}/pin")))
      .json(&json!({ "pinned": pinned }));
    let resp = self.send(req, "PUT /snippets/:id/pin").await?;
    let reply: PinReply = resp.json().await.context("deserialising pin reply")?;
    Ok(reply.pinned)
  }

  /// `PATCH /api/snippets/:id/usage`
  pub async fn touch(&self, id: SnippetId) -> Result<()> {
    let req = self.client.patch(self.url(&format!("/snippets/{id}/usage")));
    self.send(req, "PATCH /snippets/:id/usage").await?;
    Ok(())
  }

  /// `DELETE /api/snippets/:id`
  pub async fn delete(&self, id: SnippetId) -> Result<()> {
    let req = self.client.delete(self.url(&format!("/snippets/{id}")));
    self.send(req, "DELETE /snippets/:id").await?;
    Ok(())
  }
}

#[cfg(test)]
mod tests {
  use std::time::Duration;

  use axum::{Json, Router, http::StatusCode, routing::get};

  use super::*;

  async fn serve(router: Router) -> ApiClient {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move { axum::serve(listener, router).await.unwrap() });
    ApiClient::new(ApiConfig { base_url: format!("http://{addr}/") }).unwrap()
  }

  #[tokio::test]
  async fn slow_responses_are_waited_for() {
    let router = Router::new().route(
      "/api/meta",
      get(|| async {
        tokio::time::sleep(Duration::from_secs(2)).await;
        Json(Meta { tags: vec!["late".into()], categories: Vec::new() })
      }),
    );
    let client = serve(router).await;

    let meta = client.meta().await.unwrap();
    assert_eq!(meta.tags, ["late"]);
  }

  #[tokio::test]
  async fn error_bodies_become_the_error_message() {
    let router = Router::new().route(
      "/api/snippets",
      get(|| async {
        (
          StatusCode::BAD_REQUEST,
          Json(serde_json::json!({ "error": "unknown variant `oldest`" })),
        )
      }),
    );
    let client = serve(router).await;

    let err = client.list_snippets(&SnippetQuery::default()).await.unwrap_err();
    let message = err.to_string();
    assert!(message.contains("400"));
    assert!(message.contains("unknown variant `oldest`"));
  }
}
