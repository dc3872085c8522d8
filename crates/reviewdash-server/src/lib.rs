//! Server wiring for the review dashboard: configuration and the top-level
//! router. The binary in `main.rs` does startup and serving.

use std::{
  path::{Path, PathBuf},
  sync::Arc,
};

use anyhow::Context as _;
use axum::Router;
use reviewdash_api::ApiState;
use reviewdash_core::{page::DEFAULT_PAGE_SIZE, store::ReviewStore};
use serde::Deserialize;
use tower_http::trace::TraceLayer;

/// Environment variable prefix, e.g. `REVIEWDASH_STORE_PATH`.
pub const ENV_PREFIX: &str = "REVIEWDASH";

// ─── Configuration ────────────────────────────────────────────────────────────

/// Runtime server configuration, deserialised from `config.toml` and the
/// environment. Every key is optional.
#[derive(Debug, Deserialize, Clone, PartialEq)]
#[serde(default)]
pub struct ServerConfig {
  pub host:              String,
  pub port:              u16,
  /// SQLite database file.
  pub store_path:        PathBuf,
  /// CSV export ingested at startup and by `POST /api/reload`.
  pub source_path:       PathBuf,
  pub default_page_size: usize,
  pub load_on_start:     bool,
}

impl Default for ServerConfig {
  fn default() -> Self {
    Self {
      host:              "127.0.0.1".to_string(),
      port:              8501,
      store_path:        PathBuf::from("reviews.db"),
      source_path:       PathBuf::from("data/reviews.csv"),
      default_page_size: DEFAULT_PAGE_SIZE,
      load_on_start:     true,
    }
  }
}

impl ServerConfig {
  /// Layer the optional TOML file at `path` under `REVIEWDASH_*` variables.
  pub fn load(path: &Path) -> anyhow::Result<Self> {
    let settings = config::Config::builder()
      .add_source(config::File::from(path).required(false))
      .add_source(config::Environment::with_prefix(ENV_PREFIX).try_parsing(true))
      .build()
      .context("failed to read config file")?;

    let mut cfg: ServerConfig = settings
      .try_deserialize()
      .context("failed to deserialise ServerConfig")?;

    anyhow::ensure!(cfg.default_page_size > 0, "default_page_size must be at least 1");

    cfg.store_path = expand_tilde(&cfg.store_path);
    cfg.source_path = expand_tilde(&cfg.source_path);
    Ok(cfg)
  }

  pub fn address(&self) -> String { format!("{}:{}", self.host, self.port) }
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

// ─── Router ───────────────────────────────────────────────────────────────────

/// The full application: the JSON API under `/api`, with request tracing.
pub fn app<S>(store: Arc<S>, cfg: &ServerConfig) -> Router
where
  S: ReviewStore + Clone + Send + Sync + 'static,
{
  let state = ApiState::new(store, cfg.source_path.clone())
    .with_default_page_size(cfg.default_page_size);

  Router::new()
    .nest("/api", reviewdash_api::api_router(state))
    .layer(TraceLayer::new_for_http())
}
