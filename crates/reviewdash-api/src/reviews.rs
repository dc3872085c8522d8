//! Handler for `GET /reviews`.
//!
//! Returns one page of the filtered reviews, newest first. Ties on
//! `date_created` keep load order, so paging is stable between calls.

use axum::{
  Json,
  extract::{Query, State},
};
use reviewdash_core::{
  page::{Page, PageRequest},
  review::Review,
  store::ReviewStore,
};

use crate::{ApiState, error::ApiError, params::Selection};

/// `GET /reviews[?<dimension>=<value>...][&page=N][&page_size=N]`
pub async fn list<S>(
  State(state): State<ApiState<S>>,
  Query(pairs): Query<Vec<(String, String)>>,
) -> Result<Json<Page<Review>>, ApiError>
where
  S: ReviewStore,
{
  let sel = Selection::from_pairs(pairs)?;
  let request = PageRequest::new(
    sel.page_size.unwrap_or(state.default_page_size),
    sel.page.unwrap_or(1),
  )?;

  let mut reviews = state
    .store
    .query(&sel.filter)
    .await
    .map_err(|e| ApiError::Store(Box::new(e)))?;

  // Stable sort: equal dates stay in id order.
  reviews.sort_by(|a, b| b.date_created.cmp(&a.date_created));

  Ok(Json(Page::paginate(reviews, request)))
}
