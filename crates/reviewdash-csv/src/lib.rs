//! Ingestion loader: CSV review exports into a [`ReviewStore`].
//!
//! Rows that fail coercion are skipped with a logged diagnostic and counted;
//! only a source that cannot be read at all (or lacks required columns) fails
//! the load.
//!
//! # Quick start
//!
//! ```no_run
//! # async fn run(store: reviewdash_store_sqlite::SqliteStore) -> Result<(), reviewdash_csv::LoadError> {
//! let report = reviewdash_csv::load_path(&store, "data/reviews.csv").await?;
//! println!("loaded {}, skipped {}", report.loaded, report.skipped);
//! # Ok(())
//! # }
//! ```
//!
//! [`ReviewStore`]: reviewdash_core::store::ReviewStore

pub mod columns;
pub mod error;
mod load;
mod parse;

pub use error::{CoerceError, LoadError, Result, RowError};
pub use load::{LoadReport, load_path, load_reader};

use std::io::Read;

use columns::ColumnMap;
use reviewdash_core::review::NewReview;

/// The coerced contents of a source, before anything touches the store.
#[derive(Debug, Clone, Default)]
pub struct ParsedSource {
  pub reviews: Vec<NewReview>,
  pub skipped: Vec<RowError>,
}

/// Parse a CSV source with a header row.
///
/// Per-row problems land in [`ParsedSource::skipped`]; only header and I/O
/// failures are returned as errors.
pub fn parse_reader<R: Read>(reader: R) -> Result<ParsedSource> {
  let mut reader = csv::ReaderBuilder::new()
    .has_headers(true)
    .from_reader(reader);

  let map = ColumnMap::resolve(reader.headers()?)?;
  let mut parsed = ParsedSource::default();

  for (idx, result) in reader.records().enumerate() {
    let row = idx + 1;
    let outcome = match result {
      Ok(record) => parse::parse_record(&map, &record),
      Err(e) if e.is_io_error() => return Err(e.into()),
      Err(e) => Err(CoerceError::Record(e.to_string())),
    };

    match outcome {
      Ok(review) => parsed.reviews.push(review),
      Err(err) => {
        tracing::warn!(row, error = %err, "skipping malformed review row");
        parsed.skipped.push(RowError::new(row, &err));
      }
    }
  }

  Ok(parsed)
}
