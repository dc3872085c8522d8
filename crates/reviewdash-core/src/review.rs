//! Review records: the single, flat record type held by the store.
//!
//! Records are immutable once loaded. The only mutation is wholesale
//! replacement of the stored set by the loader.

use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::{Error, filter::Dimension};

/// Confidence assigned when the source does not supply one.
pub const DEFAULT_CONFIDENCE: &str = "low";

/// Model name assigned when the source does not supply one.
pub const DEFAULT_MODEL: &str = "unknown";

// ─── Flag ────────────────────────────────────────────────────────────────────

/// A categorical yes/no classification flag.
#[derive(
  Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum Flag {
  Yes,
  #[default]
  No,
}

impl Flag {
  /// The canonical stored form: `"yes"` or `"no"`.
  pub fn as_str(self) -> &'static str {
    match self {
      Self::Yes => "yes",
      Self::No => "no",
    }
  }

  pub fn is_yes(self) -> bool { matches!(self, Self::Yes) }
}

impl FromStr for Flag {
  type Err = Error;

  /// Lenient parse used at ingestion: `yes`/`no`, `y`/`n`, `true`/`false`
  /// and `1`/`0`, case-insensitive.
  fn from_str(s: &str) -> Result<Self, Self::Err> {
    match s.trim().to_ascii_lowercase().as_str() {
      "yes" | "y" | "true" | "1" => Ok(Self::Yes),
      "no" | "n" | "false" | "0" => Ok(Self::No),
      _ => Err(Error::InvalidFlag(s.to_owned())),
    }
  }
}

impl std::fmt::Display for Flag {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    f.write_str(self.as_str())
  }
}

// ─── Records ─────────────────────────────────────────────────────────────────

/// A stored review with its store-assigned sequential id.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Review {
  pub id:              i64,
  pub restaurant_name: String,
  pub cuisine:         String,
  pub date_created:    DateTime<Utc>,
  pub reviewer_name:   Option<String>,
  pub review_text:     Option<String>,
  pub rating:          Option<f64>,
  pub word_count:      f64,
  pub name_only:       Flag,
  pub review_only:     Flag,
  pub name_and_review: Flag,
  pub is_local:        Flag,
  pub confidence:      String,
  pub model:           String,
}

impl Review {
  /// This record's value for a filter dimension, in its stored form.
  pub fn value(&self, dimension: Dimension) -> &str {
    match dimension {
      Dimension::RestaurantName => &self.restaurant_name,
      Dimension::Cuisine => &self.cuisine,
      Dimension::NameOnly => self.name_only.as_str(),
      Dimension::ReviewOnly => self.review_only.as_str(),
      Dimension::NameAndReview => self.name_and_review.as_str(),
      Dimension::IsLocal => self.is_local.as_str(),
      Dimension::Confidence => &self.confidence,
      Dimension::Model => &self.model,
    }
  }
}

/// Input for [`ReviewStore::replace_all`](crate::store::ReviewStore::replace_all).
/// The `id` is assigned by the store.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewReview {
  pub restaurant_name: String,
  pub cuisine:         String,
  pub date_created:    DateTime<Utc>,
  pub reviewer_name:   Option<String>,
  pub review_text:     Option<String>,
  pub rating:          Option<f64>,
  pub word_count:      f64,
  pub name_only:       Flag,
  pub review_only:     Flag,
  pub name_and_review: Flag,
  pub is_local:        Flag,
  pub confidence:      String,
  pub model:           String,
}

impl NewReview {
  /// Convenience constructor with every optional or defaultable field set to
  /// its default.
  pub fn new(
    restaurant_name: impl Into<String>,
    cuisine: impl Into<String>,
    date_created: DateTime<Utc>,
  ) -> Self {
    Self {
      restaurant_name: restaurant_name.into(),
      cuisine: cuisine.into(),
      date_created,
      reviewer_name: None,
      review_text: None,
      rating: None,
      word_count: 0.0,
      name_only: Flag::default(),
      review_only: Flag::default(),
      name_and_review: Flag::default(),
      is_local: Flag::default(),
      confidence: DEFAULT_CONFIDENCE.to_owned(),
      model: DEFAULT_MODEL.to_owned(),
    }
  }

  /// Attach a store-assigned id.
  pub fn into_review(self, id: i64) -> Review {
    Review {
      id,
      restaurant_name: self.restaurant_name,
      cuisine: self.cuisine,
      date_created: self.date_created,
      reviewer_name: self.reviewer_name,
      review_text: self.review_text,
      rating: self.rating,
      word_count: self.word_count,
      name_only: self.name_only,
      review_only: self.review_only,
      name_and_review: self.name_and_review,
      is_local: self.is_local,
      confidence: self.confidence,
      model: self.model,
    }
  }
}
