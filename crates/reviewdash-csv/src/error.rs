//! Error types for the review loader.

use serde::Serialize;
use thiserror::Error;

/// A failure that aborts the whole load.
#[derive(Debug, Error)]
pub enum LoadError {
  #[error("cannot read source: {0}")]
  Io(#[from] std::io::Error),

  #[error("malformed CSV: {0}")]
  Csv(#[from] csv::Error),

  #[error("source is missing required columns: {}", .0.join(", "))]
  MissingColumns(Vec<String>),

  #[error("parse task failed: {0}")]
  Join(#[from] tokio::task::JoinError),

  #[error("store error: {0}")]
  Store(#[source] Box<dyn std::error::Error + Send + Sync>),
}

pub type Result<T, E = LoadError> = std::result::Result<T, E>;

/// Why a single row could not be turned into a review.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum CoerceError {
  #[error("missing value for {0}")]
  MissingValue(&'static str),

  #[error("invalid date {0:?}")]
  InvalidDate(String),

  #[error("invalid number in {column}: {value:?}")]
  InvalidNumber { column: &'static str, value: String },

  #[error("invalid yes/no flag in {column}: {value:?}")]
  InvalidFlag { column: &'static str, value: String },

  #[error("unreadable record: {0}")]
  Record(String),
}

/// A skipped row: its 1-based position among the data rows and the reason.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RowError {
  pub row:    usize,
  pub reason: String,
}

impl RowError {
  pub fn new(row: usize, err: &CoerceError) -> Self {
    Self { row, reason: err.to_string() }
  }
}
