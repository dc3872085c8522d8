//! Error types for `reviewdash-core`.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
  #[error("unknown filter dimension: {0:?}")]
  UnknownDimension(String),

  #[error("invalid yes/no flag: {0:?}")]
  InvalidFlag(String),

  #[error("page size must be at least 1")]
  InvalidPageSize,
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
