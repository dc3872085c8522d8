//! Handlers for the aggregate endpoints.
//!
//! | Method | Path | Notes |
//! |--------|------|-------|
//! | `GET`  | `/summary` | Per-restaurant metrics, ascending by name |
//! | `GET`  | `/overview` | Totals, distinct restaurants, mean rating, qualified rate |

use axum::{
  Json,
  extract::{Query, State},
};
use reviewdash_core::{
  store::ReviewStore,
  summary::{Overview, RestaurantSummary},
};

use crate::{ApiState, error::ApiError, params::Selection};

/// `GET /summary[?<dimension>=<value>...]`
pub async fn summary<S>(
  State(state): State<ApiState<S>>,
  Query(pairs): Query<Vec<(String, String)>>,
) -> Result<Json<Vec<RestaurantSummary>>, ApiError>
where
  S: ReviewStore,
{
  let sel = Selection::from_pairs(pairs)?;
  let groups = state
    .store
    .summarize(&sel.filter)
    .await
    .map_err(|e| ApiError::Store(Box::new(e)))?;
  Ok(Json(groups))
}

/// `GET /overview[?<dimension>=<value>...]`
pub async fn overview<S>(
  State(state): State<ApiState<S>>,
  Query(pairs): Query<Vec<(String, String)>>,
) -> Result<Json<Overview>, ApiError>
where
  S: ReviewStore,
{
  let sel = Selection::from_pairs(pairs)?;
  let overview = state
    .store
    .overview(&sel.filter)
    .await
    .map_err(|e| ApiError::Store(Box::new(e)))?;
  Ok(Json(overview))
}
