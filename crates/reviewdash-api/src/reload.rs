//! Handler for `POST /reload`.
//!
//! Re-ingests the configured source. Concurrent reloads queue behind one
//! another; readers are kept off a half-replaced set by the store itself.

use axum::{Json, extract::State};
use reviewdash_core::store::ReviewStore;
use reviewdash_csv::LoadReport;

use crate::{ApiState, error::ApiError};

/// `POST /reload`: returns the [`LoadReport`].
pub async fn reload<S>(
  State(state): State<ApiState<S>>,
) -> Result<Json<LoadReport>, ApiError>
where
  S: ReviewStore,
{
  let _guard = state.reload_lock.lock().await;
  let report =
    reviewdash_csv::load_path(&*state.store, state.source_path.as_path()).await?;
  Ok(Json(report))
}
