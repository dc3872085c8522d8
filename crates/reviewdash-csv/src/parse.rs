//! Row coercion: one CSV record into one [`NewReview`].
//!
//! Pipeline:
//!   csv::StringRecord
//!     └─ field() per column           → trimmed, possibly empty &str
//!          └─ parse_date / number / flag → typed values or CoerceError
//!               └─ NewReview with defaults for absent optional columns

use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use csv::StringRecord;
use reviewdash_core::review::{DEFAULT_CONFIDENCE, DEFAULT_MODEL, Flag, NewReview};

use crate::{
  columns::{self, ColumnMap},
  error::CoerceError,
};

const DATETIME_FORMATS: &[&str] = &[
  "%Y-%m-%d %H:%M:%S%.f",
  "%Y-%m-%dT%H:%M:%S%.f",
  "%Y-%m-%d %H:%M",
];

const DATE_FORMATS: &[&str] = &["%Y-%m-%d", "%m/%d/%Y", "%B %d, %Y"];

// ─── Field helpers ───────────────────────────────────────────────────────────

/// Trimmed field at `idx`; empty when the column or the cell is absent.
fn field(record: &StringRecord, idx: Option<usize>) -> &str {
  idx.and_then(|i| record.get(i)).map(str::trim).unwrap_or("")
}

fn non_empty(s: &str) -> Option<String> {
  (!s.is_empty()).then(|| s.to_owned())
}

/// Parse a review date. Values without an offset are taken as UTC.
pub(crate) fn parse_date(s: &str) -> Option<DateTime<Utc>> {
  if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
    return Some(dt.with_timezone(&Utc));
  }
  for fmt in DATETIME_FORMATS {
    if let Ok(naive) = NaiveDateTime::parse_from_str(s, fmt) {
      return Some(naive.and_utc());
    }
  }
  for fmt in DATE_FORMATS {
    if let Ok(date) = NaiveDate::parse_from_str(s, fmt) {
      return date.and_hms_opt(0, 0, 0).map(|naive| naive.and_utc());
    }
  }
  None
}

/// Empty cells and `nan` are missing; anything else must be a finite number.
fn parse_number(
  column: &'static str,
  s: &str,
) -> Result<Option<f64>, CoerceError> {
  if s.is_empty() || s.eq_ignore_ascii_case("nan") {
    return Ok(None);
  }
  match s.parse::<f64>() {
    Ok(v) if v.is_finite() => Ok(Some(v)),
    _ => Err(CoerceError::InvalidNumber { column, value: s.to_owned() }),
  }
}

fn parse_flag(column: &'static str, s: &str) -> Result<Flag, CoerceError> {
  if s.is_empty() {
    return Ok(Flag::default());
  }
  s.parse()
    .map_err(|_| CoerceError::InvalidFlag { column, value: s.to_owned() })
}

// ─── Record ──────────────────────────────────────────────────────────────────

/// Coerce one data row.
pub(crate) fn parse_record(
  map: &ColumnMap,
  record: &StringRecord,
) -> Result<NewReview, CoerceError> {
  let restaurant_name = non_empty(field(record, Some(map.restaurant_name)))
    .ok_or(CoerceError::MissingValue(columns::RESTAURANT_NAME))?;
  let cuisine = non_empty(field(record, Some(map.cuisine)))
    .ok_or(CoerceError::MissingValue(columns::CUISINE))?;

  let raw_date = field(record, Some(map.review_date));
  if raw_date.is_empty() {
    return Err(CoerceError::MissingValue(columns::REVIEW_DATE));
  }
  let date_created = parse_date(raw_date)
    .ok_or_else(|| CoerceError::InvalidDate(raw_date.to_owned()))?;

  let confidence = field(record, map.confidence).to_lowercase();
  let model = field(record, map.model);

  Ok(NewReview {
    restaurant_name,
    cuisine,
    date_created,
    reviewer_name: non_empty(field(record, Some(map.reviewer_name))),
    review_text: non_empty(field(record, Some(map.review))),
    rating: parse_number(columns::RATING, field(record, map.rating))?,
    word_count: parse_number(columns::WORD_COUNT, field(record, map.word_count))?
      .unwrap_or(0.0),
    name_only: parse_flag(columns::NAME_ONLY, field(record, map.name_only))?,
    review_only: parse_flag(columns::REVIEW_ONLY, field(record, map.review_only))?,
    name_and_review: parse_flag(
      columns::NAME_AND_REVIEW,
      field(record, map.name_and_review),
    )?,
    is_local: parse_flag(columns::IS_LOCAL, field(record, map.is_local))?,
    confidence: if confidence.is_empty() {
      DEFAULT_CONFIDENCE.to_owned()
    } else {
      confidence
    },
    model: non_empty(model).unwrap_or_else(|| DEFAULT_MODEL.to_owned()),
  })
}

#[cfg(test)]
mod tests {
  use chrono::TimeZone;

  use super::*;

  fn full_map() -> ColumnMap {
    ColumnMap::resolve(&StringRecord::from(vec![
      "Restaurant Name", "Cuisine", "Review Date", "Reviewer Name", "Review",
      "Rating", "Word Count", "Name Only", "Review Only", "Name & Review",
      "Is Local", "Confidence", "Model",
    ]))
    .unwrap()
  }

  fn minimal_map() -> ColumnMap {
    ColumnMap::resolve(&StringRecord::from(vec![
      "Restaurant Name", "Cuisine", "Review Date", "Reviewer Name", "Review",
    ]))
    .unwrap()
  }

  #[test]
  fn date_formats() {
    let noon = Utc.with_ymd_and_hms(2024, 3, 4, 12, 30, 0).unwrap();
    let midnight = Utc.with_ymd_and_hms(2024, 3, 4, 0, 0, 0).unwrap();

    assert_eq!(parse_date("2024-03-04T12:30:00Z"), Some(noon));
    assert_eq!(parse_date("2024-03-04T14:30:00+02:00"), Some(noon));
    assert_eq!(parse_date("2024-03-04 12:30:00"), Some(noon));
    assert_eq!(parse_date("2024-03-04 12:30:00.000"), Some(noon));
    assert_eq!(parse_date("2024-03-04T12:30:00"), Some(noon));
    assert_eq!(parse_date("2024-03-04 12:30"), Some(noon));
    assert_eq!(parse_date("2024-03-04"), Some(midnight));
    assert_eq!(parse_date("03/04/2024"), Some(midnight));
    assert_eq!(parse_date("March 4, 2024"), Some(midnight));
    assert_eq!(parse_date("last tuesday"), None);
  }

  #[test]
  fn full_row() {
    let record = StringRecord::from(vec![
      "Orinoco", "Venezuelan", "2024-03-04", " Ana ", "Great arepas", "4.5",
      "2", "YES", "no", "", "yes", "High", "gpt-4o",
    ]);
    let r = parse_record(&full_map(), &record).unwrap();
    assert_eq!(r.restaurant_name, "Orinoco");
    assert_eq!(r.reviewer_name.as_deref(), Some("Ana"));
    assert_eq!(r.review_text.as_deref(), Some("Great arepas"));
    assert_eq!(r.rating, Some(4.5));
    assert_eq!(r.word_count, 2.0);
    assert_eq!(r.name_only, Flag::Yes);
    assert_eq!(r.review_only, Flag::No);
    assert_eq!(r.name_and_review, Flag::No);
    assert_eq!(r.is_local, Flag::Yes);
    assert_eq!(r.confidence, "high");
    assert_eq!(r.model, "gpt-4o");
  }

  #[test]
  fn absent_optional_columns_take_defaults() {
    let record = StringRecord::from(vec![
      "Orinoco", "Venezuelan", "2024-03-04", "", "",
    ]);
    let r = parse_record(&minimal_map(), &record).unwrap();
    assert_eq!(r.reviewer_name, None);
    assert_eq!(r.review_text, None);
    assert_eq!(r.rating, None);
    assert_eq!(r.word_count, 0.0);
    assert_eq!(r.is_local, Flag::No);
    assert_eq!(r.confidence, "low");
    assert_eq!(r.model, "unknown");
  }

  #[test]
  fn empty_and_nan_ratings_are_missing() {
    let mut cells = vec![
      "Orinoco", "Venezuelan", "2024-03-04", "", "", "NaN", "", "", "", "",
      "", "", "",
    ];
    let r = parse_record(&full_map(), &StringRecord::from(cells.clone())).unwrap();
    assert_eq!(r.rating, None);
    assert_eq!(r.word_count, 0.0);

    cells[5] = "";
    let r = parse_record(&full_map(), &StringRecord::from(cells)).unwrap();
    assert_eq!(r.rating, None);
  }

  #[test]
  fn coercion_failures() {
    let base = vec![
      "Orinoco", "Venezuelan", "2024-03-04", "", "", "", "", "", "", "", "",
      "", "",
    ];
    let map = full_map();

    let mut bad_date = base.clone();
    bad_date[2] = "someday";
    assert_eq!(
      parse_record(&map, &StringRecord::from(bad_date)),
      Err(CoerceError::InvalidDate("someday".into()))
    );

    let mut bad_rating = base.clone();
    bad_rating[5] = "five stars";
    assert!(matches!(
      parse_record(&map, &StringRecord::from(bad_rating)),
      Err(CoerceError::InvalidNumber { column: "Rating", .. })
    ));

    let mut bad_flag = base.clone();
    bad_flag[10] = "maybe";
    assert!(matches!(
      parse_record(&map, &StringRecord::from(bad_flag)),
      Err(CoerceError::InvalidFlag { column: "Is Local", .. })
    ));

    let mut no_name = base;
    no_name[0] = "  ";
    assert_eq!(
      parse_record(&map, &StringRecord::from(no_name)),
      Err(CoerceError::MissingValue("Restaurant Name"))
    );
  }
}
