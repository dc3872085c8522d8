//! JSON REST API for the review dashboard.
//!
//! Exposes an axum [`Router`] backed by any
//! [`reviewdash_core::store::ReviewStore`]. Rendering, paging widgets and the
//! `All` convention of filter dropdowns belong to the presentation layer that
//! calls this API.
//!
//! | Method | Path | Notes |
//! |--------|------|-------|
//! | `GET`  | `/reviews` | Filter params, `page`, `page_size`; newest first |
//! | `GET`  | `/summary` | Per-restaurant metrics |
//! | `GET`  | `/overview` | Headline metrics |
//! | `GET`  | `/dimensions/{dimension}/values` | Sorted distinct values |
//! | `POST` | `/reload` | Re-ingest the configured CSV source |

pub mod dimensions;
pub mod error;
pub mod params;
pub mod reload;
pub mod reviews;
pub mod summary;

use std::{path::PathBuf, sync::Arc};

use axum::{
  Router,
  routing::{get, post},
};
use reviewdash_core::{page::DEFAULT_PAGE_SIZE, store::ReviewStore};
use tokio::sync::Mutex;

pub use error::ApiError;

// ─── Application state ────────────────────────────────────────────────────────

/// Shared state threaded through all handlers.
#[derive(Clone)]
pub struct ApiState<S> {
  pub store:             Arc<S>,
  /// CSV file re-read by `POST /reload`.
  pub source_path:       Arc<PathBuf>,
  pub default_page_size: usize,
  /// Held for the duration of a reload.
  pub reload_lock:       Arc<Mutex<()>>,
}

impl<S> ApiState<S> {
  pub fn new(store: Arc<S>, source_path: impl Into<PathBuf>) -> Self {
    Self {
      store,
      source_path: Arc::new(source_path.into()),
      default_page_size: DEFAULT_PAGE_SIZE,
      reload_lock: Arc::new(Mutex::new(())),
    }
  }

  pub fn with_default_page_size(mut self, page_size: usize) -> Self {
    self.default_page_size = page_size;
    self
  }
}

// ─── Router ───────────────────────────────────────────────────────────────────

/// Build the API router for `state`.
///
/// The returned `Router<()>` can be nested into any parent router regardless
/// of its own state type.
pub fn api_router<S>(state: ApiState<S>) -> Router<()>
where
  S: ReviewStore + Clone + Send + Sync + 'static,
{
  Router::new()
    .route("/reviews", get(reviews::list::<S>))
    .route("/summary", get(summary::summary::<S>))
    .route("/overview", get(summary::overview::<S>))
    .route("/dimensions/{dimension}/values", get(dimensions::values::<S>))
    .route("/reload", post(reload::reload::<S>))
    .with_state(state)
}

// ─── Integration tests ────────────────────────────────────────────────────────
