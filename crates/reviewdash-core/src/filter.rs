//! Filter specification over the fixed set of categorical review columns.
//!
//! A [`FilterSpec`] maps each [`Dimension`] to a set of accepted values.
//! Values within one dimension are OR-ed; dimensions are AND-ed. A dimension
//! that is absent, has an empty set, or contains [`ALL_SENTINEL`] imposes no
//! constraint.

use std::{
  collections::{BTreeMap, BTreeSet},
  str::FromStr,
};

use serde::{Deserialize, Serialize};

use crate::{Error, review::Review};

/// The presentation-layer marker meaning "no restriction".
pub const ALL_SENTINEL: &str = "All";

// ─── Dimension ───────────────────────────────────────────────────────────────

/// A filterable categorical attribute of a [`Review`].
#[derive(
  Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize,
  Deserialize,
)]
#[serde(rename_all = "snake_case")]
pub enum Dimension {
  RestaurantName,
  #[serde(alias = "type")]
  Cuisine,
  NameOnly,
  ReviewOnly,
  NameAndReview,
  IsLocal,
  Confidence,
  Model,
}

impl Dimension {
  pub const ALL: [Dimension; 8] = [
    Self::RestaurantName,
    Self::Cuisine,
    Self::NameOnly,
    Self::ReviewOnly,
    Self::NameAndReview,
    Self::IsLocal,
    Self::Confidence,
    Self::Model,
  ];

  /// The external name; also the column name in the store.
  pub fn as_str(self) -> &'static str {
    match self {
      Self::RestaurantName => "restaurant_name",
      Self::Cuisine => "cuisine",
      Self::NameOnly => "name_only",
      Self::ReviewOnly => "review_only",
      Self::NameAndReview => "name_and_review",
      Self::IsLocal => "is_local",
      Self::Confidence => "confidence",
      Self::Model => "model",
    }
  }
}

impl FromStr for Dimension {
  type Err = Error;

  fn from_str(s: &str) -> Result<Self, Self::Err> {
    match s {
      "restaurant_name" => Ok(Self::RestaurantName),
      "cuisine" | "type" => Ok(Self::Cuisine),
      "name_only" => Ok(Self::NameOnly),
      "review_only" => Ok(Self::ReviewOnly),
      "name_and_review" => Ok(Self::NameAndReview),
      "is_local" => Ok(Self::IsLocal),
      "confidence" => Ok(Self::Confidence),
      "model" => Ok(Self::Model),
      other => Err(Error::UnknownDimension(other.to_owned())),
    }
  }
}

impl std::fmt::Display for Dimension {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    f.write_str(self.as_str())
  }
}

// ─── FilterSpec ──────────────────────────────────────────────────────────────

/// Multi-select filter over review dimensions.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FilterSpec {
  selections: BTreeMap<Dimension, BTreeSet<String>>,
}

impl FilterSpec {
  pub fn new() -> Self { Self::default() }

  /// Builder form of [`FilterSpec::restrict`].
  pub fn with<I, V>(mut self, dimension: Dimension, values: I) -> Self
  where
    I: IntoIterator<Item = V>,
    V: Into<String>,
  {
    self.restrict(dimension, values);
    self
  }

  /// Add accepted values for `dimension`. Repeated calls accumulate.
  pub fn restrict<I, V>(&mut self, dimension: Dimension, values: I)
  where
    I: IntoIterator<Item = V>,
    V: Into<String>,
  {
    self
      .selections
      .entry(dimension)
      .or_default()
      .extend(values.into_iter().map(Into::into));
  }

  /// Remove any restriction on `dimension`.
  pub fn clear(&mut self, dimension: Dimension) {
    self.selections.remove(&dimension);
  }

  /// Dimensions that actually constrain results, with their accepted values.
  pub fn active(&self) -> impl Iterator<Item = (Dimension, &BTreeSet<String>)> {
    self
      .selections
      .iter()
      .filter(|(_, values)| {
        !values.is_empty() && !values.contains(ALL_SENTINEL)
      })
      .map(|(dim, values)| (*dim, values))
  }

  pub fn is_unrestricted(&self) -> bool { self.active().next().is_none() }

  /// Evaluate the filter against a single record in memory.
  pub fn matches(&self, review: &Review) -> bool {
    self
      .active()
      .all(|(dim, values)| values.contains(review.value(dim)))
  }
}
