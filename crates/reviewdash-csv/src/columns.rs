//! Header resolution: which CSV column feeds which review field.
//!
//! Header names are matched case-insensitively after trimming. Required
//! columns must all be present; the optional ones fall back to defaults.

use csv::StringRecord;

use crate::error::{LoadError, Result};

pub const RESTAURANT_NAME: &str = "Restaurant Name";
pub const CUISINE: &str = "Cuisine";
pub const REVIEW_DATE: &str = "Review Date";
pub const REVIEWER_NAME: &str = "Reviewer Name";
pub const REVIEW: &str = "Review";
pub const RATING: &str = "Rating";
pub const WORD_COUNT: &str = "Word Count";
pub const NAME_ONLY: &str = "Name Only";
pub const REVIEW_ONLY: &str = "Review Only";
pub const NAME_AND_REVIEW: &str = "Name & Review";
pub const IS_LOCAL: &str = "Is Local";
pub const CONFIDENCE: &str = "Confidence";
pub const MODEL: &str = "Model";

/// Column indices into each record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColumnMap {
  pub restaurant_name: usize,
  pub cuisine:         usize,
  pub review_date:     usize,
  pub reviewer_name:   usize,
  pub review:          usize,
  pub rating:          Option<usize>,
  pub word_count:      Option<usize>,
  pub name_only:       Option<usize>,
  pub review_only:     Option<usize>,
  pub name_and_review: Option<usize>,
  pub is_local:        Option<usize>,
  pub confidence:      Option<usize>,
  pub model:           Option<usize>,
}

impl ColumnMap {
  /// Resolve `headers`, failing with every missing required column at once.
  pub fn resolve(headers: &StringRecord) -> Result<Self> {
    let find = |name: &str| {
      headers
        .iter()
        .position(|h| h.trim().eq_ignore_ascii_case(name))
    };

    let mut missing = Vec::new();
    let mut required = |name: &'static str| {
      find(name).unwrap_or_else(|| {
        missing.push(name.to_owned());
        0
      })
    };

    let restaurant_name = required(RESTAURANT_NAME);
    let cuisine = required(CUISINE);
    let review_date = required(REVIEW_DATE);
    let reviewer_name = required(REVIEWER_NAME);
    let review = required(REVIEW);

    if !missing.is_empty() {
      return Err(LoadError::MissingColumns(missing));
    }

    Ok(Self {
      restaurant_name,
      cuisine,
      review_date,
      reviewer_name,
      review,
      rating: find(RATING),
      word_count: find(WORD_COUNT),
      name_only: find(NAME_ONLY),
      review_only: find(REVIEW_ONLY),
      name_and_review: find(NAME_AND_REVIEW),
      is_local: find(IS_LOCAL),
      confidence: find(CONFIDENCE),
      model: find(MODEL),
    })
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn resolves_required_and_optional_columns() {
    let headers = StringRecord::from(vec![
      "review", " restaurant name ", "CUISINE", "Review Date", "Reviewer Name",
      "Is Local",
    ]);
    let map = ColumnMap::resolve(&headers).unwrap();
    assert_eq!(map.review, 0);
    assert_eq!(map.restaurant_name, 1);
    assert_eq!(map.cuisine, 2);
    assert_eq!(map.is_local, Some(5));
    assert_eq!(map.rating, None);
    assert_eq!(map.model, None);
  }

  #[test]
  fn reports_every_missing_required_column() {
    let headers = StringRecord::from(vec!["Restaurant Name", "Rating"]);
    let err = ColumnMap::resolve(&headers).unwrap_err();
    match err {
      LoadError::MissingColumns(cols) => assert_eq!(
        cols,
        ["Cuisine", "Review Date", "Reviewer Name", "Review"]
      ),
      other => panic!("unexpected error: {other}"),
    }
  }
}
