//! HTTP server for copypastor: configuration, seeding, and the top-level
//! router that mounts the JSON API under `/api`.

pub mod seed;

use std::{
  path::{Path, PathBuf},
  sync::Arc,
};

use axum::Router;
use copypastor_core::store::SnippetStore;
use serde::Deserialize;
use tower_http::trace::TraceLayer;

// ─── Configuration ────────────────────────────────────────────────────────────

/// Runtime server configuration.
///
/// Layered as: built-in defaults, then the TOML file, then `COPYPASTOR_*`
/// environment variables.
#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
  pub host:           String,
  pub port:           u16,
  /// SQLite file; a leading `~/` is expanded against `$HOME`.
  pub database_path:  PathBuf,
  /// Insert example snippets when the database is empty.
  pub seed_demo_data: bool,
}

impl ServerConfig {
  pub fn load(file: &Path) -> Result<Self, config::ConfigError> {
    config::Config::builder()
      .set_default("host", "127.0.0.1")?
      .set_default("port", 3000)?
      .set_default("database_path", "snippets.db")?
      .set_default("seed_demo_data", true)?
      .add_source(config::File::from(file).required(false))
      .add_source(config::Environment::with_prefix("COPYPASTOR"))
      .build()?
      .try_deserialize()
  }

  pub fn address(&self) -> String { format!("{}:{}", self.host, self.port) }

  pub fn database_path(&self) -> PathBuf { expand_tilde(&self.database_path) }
}

// ─── Router ───────────────────────────────────────────────────────────────────

/// The full application: the API nested under `/api`, wrapped in request
/// tracing.
pub fn router<S>(store: Arc<S>) -> Router
where
  S: SnippetStore + 'static,
{
  Router::new()
    .nest("/api", copypastor_api::api_router(store))
    .layer(TraceLayer::new_for_http())
}

/// Expand a leading `~` to the user's home directory.
pub fn expand_tilde(path: &Path) -> PathBuf {
  let s = path.to_string_lossy();
  if let Some(rest) = s.strip_prefix("~/")
    && let Ok(home) = std::env::var("HOME")
  {
    return PathBuf::from(home).join(rest);
  }
  path.to_path_buf()
}
