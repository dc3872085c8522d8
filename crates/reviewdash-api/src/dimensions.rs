//! Handler for `GET /dimensions/{dimension}/values`.
//!
//! Feeds the presentation layer's filter widgets. No `All` entry is added;
//! callers prepend their own.

use axum::{
  Json,
  extract::{Path, State},
};
use reviewdash_core::{filter::Dimension, store::ReviewStore};

use crate::{ApiState, error::ApiError};

/// `GET /dimensions/{dimension}/values`
pub async fn values<S>(
  State(state): State<ApiState<S>>,
  Path(dimension): Path<String>,
) -> Result<Json<Vec<String>>, ApiError>
where
  S: ReviewStore,
{
  let dim: Dimension = dimension
    .parse()
    .map_err(|_| ApiError::NotFound(format!("dimension {dimension:?} not found")))?;

  let values = state
    .store
    .distinct_values(dim)
    .await
    .map_err(|e| ApiError::Store(Box::new(e)))?;
  Ok(Json(values))
}
