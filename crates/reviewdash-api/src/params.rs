//! Query-string parsing shared by the filtered endpoints.
//!
//! Each filter dimension may be repeated for multi-select
//! (`?cuisine=Thai&cuisine=Mexican`). `page` and `page_size` are only
//! meaningful to `/reviews`; the other endpoints ignore them.

use reviewdash_core::filter::{Dimension, FilterSpec};

use crate::error::ApiError;

/// A parsed query string.
#[derive(Debug, Default)]
pub struct Selection {
  pub filter:    FilterSpec,
  pub page:      Option<usize>,
  pub page_size: Option<usize>,
}

fn parse_usize(key: &str, value: &str) -> Result<usize, ApiError> {
  value
    .parse()
    .map_err(|_| ApiError::BadRequest(format!("{key} must be a non-negative integer")))
}

impl Selection {
  /// Build from raw `(key, value)` pairs. Unknown keys are rejected; an
  /// empty value (`?cuisine=`) leaves its dimension unrestricted.
  pub fn from_pairs(pairs: Vec<(String, String)>) -> Result<Self, ApiError> {
    let mut sel = Selection::default();
    for (key, value) in pairs {
      match key.as_str() {
        "page" => sel.page = Some(parse_usize(&key, &value)?),
        "page_size" => sel.page_size = Some(parse_usize(&key, &value)?),
        other => {
          let dim: Dimension = other.parse()?;
          if !value.is_empty() {
            sel.filter.restrict(dim, [value]);
          }
        }
      }
    }
    Ok(sel)
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  fn pairs(raw: &[(&str, &str)]) -> Vec<(String, String)> {
    raw.iter().map(|(k, v)| (k.to_string(), v.to_string())).collect()
  }

  #[test]
  fn repeated_keys_accumulate() {
    let sel = Selection::from_pairs(pairs(&[
      ("cuisine", "Thai"),
      ("type", "Mexican"),
      ("page", "2"),
    ]))
    .unwrap();
    let (dim, values) = sel.filter.active().next().unwrap();
    assert_eq!(dim, Dimension::Cuisine);
    assert_eq!(values.len(), 2);
    assert_eq!(sel.page, Some(2));
    assert_eq!(sel.page_size, None);
  }

  #[test]
  fn empty_value_is_unrestricted() {
    let sel = Selection::from_pairs(pairs(&[("cuisine", ""), ("model", "gpt-4o")]))
      .unwrap();
    let dims: Vec<_> = sel.filter.active().map(|(dim, _)| dim).collect();
    assert_eq!(dims, [Dimension::Model]);

    let err = Selection::from_pairs(pairs(&[("stars", "")])).unwrap_err();
    assert!(matches!(err, ApiError::BadRequest(_)));
  }

  #[test]
  fn unknown_key_is_bad_request() {
    let err = Selection::from_pairs(pairs(&[("rating", "5")])).unwrap_err();
    assert!(matches!(err, ApiError::BadRequest(_)));
  }

  #[test]
  fn bad_page_is_bad_request() {
    let err = Selection::from_pairs(pairs(&[("page", "-1")])).unwrap_err();
    assert!(matches!(err, ApiError::BadRequest(_)));
  }
}
