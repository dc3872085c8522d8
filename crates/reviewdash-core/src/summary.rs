//! Aggregate metrics computed over a filtered set of reviews.
//!
//! Stores compute these natively (e.g. in SQL); the in-memory functions here
//! define the reference semantics and are what backends are tested against.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::review::Review;

/// Confidence value that counts towards the qualified rate.
pub const QUALIFIED_CONFIDENCE: &str = "high";

/// `100 * part / whole`, or 0 when `whole` is 0.
pub fn percentage(part: u64, whole: u64) -> f64 {
  if whole == 0 {
    return 0.0;
  }
  100.0 * part as f64 / whole as f64
}

/// Whether a review counts towards [`Overview::qualified_rate`].
pub fn is_qualified(review: &Review) -> bool {
  review.review_only.is_yes()
    && review.name_only.is_yes()
    && review.confidence == QUALIFIED_CONFIDENCE
}

// ─── Per restaurant ──────────────────────────────────────────────────────────

/// Metrics for one restaurant within a filtered set.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RestaurantSummary {
  pub restaurant_name:      String,
  pub review_count:         u64,
  /// Mean over non-null ratings; `None` if there are none.
  pub average_rating:       Option<f64>,
  /// Mean over non-null ratings of local reviews; `None` if there are none.
  pub average_local_rating: Option<f64>,
  /// Percentage of reviews with `is_local == yes`, in `[0, 100]`.
  pub local_rate:           f64,
}

impl RestaurantSummary {
  pub fn from_counts(
    restaurant_name: String,
    review_count: u64,
    local_count: u64,
    average_rating: Option<f64>,
    average_local_rating: Option<f64>,
  ) -> Self {
    Self {
      restaurant_name,
      review_count,
      average_rating,
      average_local_rating,
      local_rate: percentage(local_count, review_count),
    }
  }
}

// ─── Whole set ───────────────────────────────────────────────────────────────

/// Headline metrics for a filtered set.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Overview {
  pub total_reviews:    u64,
  pub restaurant_count: u64,
  pub average_rating:   Option<f64>,
  /// Percentage of reviews that are [qualified](is_qualified).
  pub qualified_rate:   f64,
}

impl Overview {
  pub fn from_counts(
    total_reviews: u64,
    restaurant_count: u64,
    qualified_count: u64,
    average_rating: Option<f64>,
  ) -> Self {
    Self {
      total_reviews,
      restaurant_count,
      average_rating,
      qualified_rate: percentage(qualified_count, total_reviews),
    }
  }

  pub fn from_reviews(reviews: &[Review]) -> Self {
    let mut names = std::collections::BTreeSet::new();
    let mut ratings = Mean::default();
    let mut qualified = 0;
    for r in reviews {
      names.insert(r.restaurant_name.as_str());
      ratings.push(r.rating);
      if is_qualified(r) {
        qualified += 1;
      }
    }
    Self::from_counts(
      reviews.len() as u64,
      names.len() as u64,
      qualified,
      ratings.value(),
    )
  }
}

/// Group `reviews` by restaurant, in ascending name order.
pub fn summarize_reviews(reviews: &[Review]) -> Vec<RestaurantSummary> {
  #[derive(Default)]
  struct Acc {
    count:         u64,
    local:         u64,
    all:           Mean,
    local_ratings: Mean,
  }

  let mut groups: BTreeMap<&str, Acc> = BTreeMap::new();
  for r in reviews {
    let acc = groups.entry(r.restaurant_name.as_str()).or_default();
    acc.count += 1;
    acc.all.push(r.rating);
    if r.is_local.is_yes() {
      acc.local += 1;
      acc.local_ratings.push(r.rating);
    }
  }

  groups
    .into_iter()
    .map(|(name, acc)| {
      RestaurantSummary::from_counts(
        name.to_owned(),
        acc.count,
        acc.local,
        acc.all.value(),
        acc.local_ratings.value(),
      )
    })
    .collect()
}

/// Running mean that ignores missing values.
#[derive(Default)]
struct Mean {
  sum: f64,
  n:   u64,
}

impl Mean {
  fn push(&mut self, v: Option<f64>) {
    if let Some(v) = v {
      self.sum += v;
      self.n += 1;
    }
  }

  fn value(&self) -> Option<f64> {
    (self.n > 0).then(|| self.sum / self.n as f64)
  }
}
