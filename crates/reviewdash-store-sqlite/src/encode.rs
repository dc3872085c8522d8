//! Encoding and decoding helpers between domain types and the plain-text
//! representations stored in SQLite columns.
//!
//! Timestamps are stored as RFC 3339 strings; flags as `'yes'` / `'no'`.

use chrono::{DateTime, Utc};
use reviewdash_core::review::{Flag, Review};

use crate::{Error, Result};

// ─── DateTime<Utc> ───────────────────────────────────────────────────────────

pub fn encode_dt(dt: DateTime<Utc>) -> String { dt.to_rfc3339() }

pub fn decode_dt(s: &str) -> Result<DateTime<Utc>> {
  DateTime::parse_from_rfc3339(s)
    .map(|dt| dt.with_timezone(&Utc))
    .map_err(|e| Error::DateParse(e.to_string()))
}

// ─── Flag ────────────────────────────────────────────────────────────────────

pub fn encode_flag(f: Flag) -> &'static str { f.as_str() }

pub fn decode_flag(s: &str) -> Result<Flag> { Ok(s.parse()?) }

// ─── Row types ───────────────────────────────────────────────────────────────

/// Column list matching [`RawReview::from_row`], in order.
pub const REVIEW_COLUMNS: &str = "id, restaurant_name, cuisine, date_created, \
   reviewer_name, review_text, rating, word_count, name_only, review_only, \
   name_and_review, is_local, confidence, model";

/// Raw values read directly from a `reviews` row.
pub struct RawReview {
  pub id:              i64,
  pub restaurant_name: String,
  pub cuisine:         String,
  pub date_created:    String,
  pub reviewer_name:   Option<String>,
  pub review_text:     Option<String>,
  pub rating:          Option<f64>,
  pub word_count:      f64,
  pub name_only:       String,
  pub review_only:     String,
  pub name_and_review: String,
  pub is_local:        String,
  pub confidence:      String,
  pub model:           String,
}

impl RawReview {
  /// Read a row selected with [`REVIEW_COLUMNS`].
  pub fn from_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<Self> {
    Ok(Self {
      id:              row.get(0)?,
      restaurant_name: row.get(1)?,
      cuisine:         row.get(2)?,
      date_created:    row.get(3)?,
      reviewer_name:   row.get(4)?,
      review_text:     row.get(5)?,
      rating:          row.get(6)?,
      word_count:      row.get(7)?,
      name_only:       row.get(8)?,
      review_only:     row.get(9)?,
      name_and_review: row.get(10)?,
      is_local:        row.get(11)?,
      confidence:      row.get(12)?,
      model:           row.get(13)?,
    })
  }

  pub fn into_review(self) -> Result<Review> {
    Ok(Review {
      id:              self.id,
      restaurant_name: self.restaurant_name,
      cuisine:         self.cuisine,
      date_created:    decode_dt(&self.date_created)?,
      reviewer_name:   self.reviewer_name,
      review_text:     self.review_text,
      rating:          self.rating,
      word_count:      self.word_count,
      name_only:       decode_flag(&self.name_only)?,
      review_only:     decode_flag(&self.review_only)?,
      name_and_review: decode_flag(&self.name_and_review)?,
      is_local:        decode_flag(&self.is_local)?,
      confidence:      self.confidence,
      model:           self.model,
    })
  }
}
