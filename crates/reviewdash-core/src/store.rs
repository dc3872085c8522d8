//! The `ReviewStore` trait.
//!
//! The trait is implemented by storage backends (e.g.
//! `reviewdash-store-sqlite`). The loader and the API depend on this
//! abstraction, not on any concrete backend.

use std::future::Future;

use crate::{
  filter::{Dimension, FilterSpec},
  review::{NewReview, Review},
  summary::{Overview, RestaurantSummary},
};

/// Abstraction over a review store backend.
///
/// The record set is replaced wholesale by [`ReviewStore::replace_all`] and is
/// read-only otherwise. Backends must serialise `replace_all` against the read
/// methods so a reader never observes a partially cleared set.
///
/// All methods return `Send` futures so the trait can be used in
/// multi-threaded async runtimes (e.g. tokio with `axum`).
pub trait ReviewStore: Send + Sync {
  type Error: std::error::Error + Send + Sync + 'static;

  // ── Writes ────────────────────────────────────────────────────────────

  /// Delete every stored review, then insert `reviews`. Returns the number
  /// of records inserted.
  fn replace_all(
    &self,
    reviews: Vec<NewReview>,
  ) -> impl Future<Output = Result<usize, Self::Error>> + Send + '_;

  // ── Reads ─────────────────────────────────────────────────────────────

  /// Every review matching `filter`, in id order.
  fn query<'a>(
    &'a self,
    filter: &'a FilterSpec,
  ) -> impl Future<Output = Result<Vec<Review>, Self::Error>> + Send + 'a;

  /// Per-restaurant metrics over the reviews matching `filter`, in ascending
  /// restaurant-name order. Restaurants with no matching reviews are absent.
  fn summarize<'a>(
    &'a self,
    filter: &'a FilterSpec,
  ) -> impl Future<Output = Result<Vec<RestaurantSummary>, Self::Error>> + Send + 'a;

  /// Headline metrics over the reviews matching `filter`.
  fn overview<'a>(
    &'a self,
    filter: &'a FilterSpec,
  ) -> impl Future<Output = Result<Overview, Self::Error>> + Send + 'a;

  /// Every value currently stored for `dimension`, sorted ascending.
  fn distinct_values(
    &self,
    dimension: Dimension,
  ) -> impl Future<Output = Result<Vec<String>, Self::Error>> + Send + '_;
}
