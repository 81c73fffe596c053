//! copypastor server binary.
//!
//! Reads `config.toml` (or the path specified with `--config`), opens the
//! SQLite store, seeds it on first run, and serves the JSON API over HTTP.
//!
//! Any setting can be overridden from the environment, e.g.
//!
//! ```text
//! COPYPASTOR_PORT=8080 copypastor-server
//! ```

use std::{path::PathBuf, sync::Arc};

use anyhow::Context as _;
use clap::Parser;
use copypastor_server::{ServerConfig, seed};
use copypastor_store_sqlite::SqliteStore;
use tokio::net::TcpListener;
use tracing::level_filters::LevelFilter;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(author, version, about = "copypastor snippet server")]
struct Cli {
  /// Path to the TOML configuration file.
  #[arg(short, long, default_value = "config.toml")]
  config: PathBuf,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
  // Initialise tracing.
  tracing_subscriber::fmt()
    .with_env_filter(
      EnvFilter::builder()
        .with_default_directive(LevelFilter::INFO.into())
        .from_env_lossy(),
    )
    .init();

  let cli = Cli::parse();

  let server_cfg = ServerConfig::load(&cli.config)
    .with_context(|| format!("failed to load configuration from {:?}", cli.config))?;

  let store_path = server_cfg.database_path();
  let store = SqliteStore::open(&store_path)
    .await
    .with_context(|| format!("failed to open store at {store_path:?}"))?;
  tracing::info!(path = %store_path.display(), "store opened");

  if server_cfg.seed_demo_data {
    let inserted = store
      .seed_if_empty(seed::demo_snippets())
      .await
      .context("failed to seed demo snippets")?;
    if inserted > 0 {
      tracing::info!(inserted, "seeded demo snippets");
    }
  }

  let app = copypastor_server::router(Arc::new(store));
  let address = server_cfg.address();

  tracing::info!("Listening on http://{address}");
  let listener = TcpListener::bind(&address)
    .await
    .with_context(|| format!("failed to bind {address}"))?;

  axum::serve(listener, app).await.context("server error")?;

  Ok(())
}
