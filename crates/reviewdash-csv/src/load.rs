//! Replacing the stored review set from a CSV source.

use std::{fs::File, io::{BufReader, Read}, path::Path};

use reviewdash_core::store::ReviewStore;
use serde::Serialize;

use crate::{LoadError, ParsedSource, Result, RowError, parse_reader};

/// Outcome of a successful load.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LoadReport {
  /// Records now in the store.
  pub loaded:  usize,
  /// Rows dropped because they could not be coerced.
  pub skipped: usize,
  pub errors:  Vec<RowError>,
}

/// Parse `reader`, then replace the whole stored set with its rows.
///
/// Parsing runs on the blocking pool. The store is only touched once the
/// source has been fully parsed, so a source with missing columns leaves the
/// previous set in place.
pub async fn load_reader<S, R>(store: &S, reader: R) -> Result<LoadReport>
where
  S: ReviewStore,
  R: Read + Send + 'static,
{
  let parsed = tokio::task::spawn_blocking(move || parse_reader(reader)).await??;
  replace_with(store, parsed).await
}

/// [`load_reader`] over the file at `path`. The file is opened on the
/// blocking pool too.
pub async fn load_path<S: ReviewStore>(
  store: &S,
  path: impl AsRef<Path>,
) -> Result<LoadReport> {
  let path = path.as_ref().to_path_buf();
  tracing::info!(path = %path.display(), "loading reviews");
  let parsed = tokio::task::spawn_blocking(move || {
    let file = File::open(&path)?;
    parse_reader(BufReader::new(file))
  })
  .await??;
  replace_with(store, parsed).await
}

async fn replace_with<S: ReviewStore>(
  store: &S,
  parsed: ParsedSource,
) -> Result<LoadReport> {
  let skipped = parsed.skipped.len();

  let loaded = store
    .replace_all(parsed.reviews)
    .await
    .map_err(|e| LoadError::Store(Box::new(e)))?;

  if loaded == 0 {
    tracing::warn!(skipped, "no reviews were imported");
  } else {
    tracing::info!(loaded, skipped, "imported reviews");
  }

  Ok(LoadReport { loaded, skipped, errors: parsed.skipped })
}

#[cfg(test)]
mod tests {
  use std::io::{Cursor, Write as _};

  use reviewdash_core::{filter::FilterSpec, store::ReviewStore};
  use reviewdash_store_sqlite::SqliteStore;

  use super::*;

  const SOURCE: &str = "\
Restaurant Name,Cuisine,Review Date,Reviewer Name,Review,Rating,Word Count,Name Only,Review Only,Name & Review,Is Local,Confidence,Model
Orinoco,Venezuelan,2024-03-01,Ana,Great,4,1,yes,yes,yes,yes,high,gpt-4o
Orinoco,Venezuelan,2024-03-02,Bo,Good,5,1,no,no,no,no,low,gpt-4o
Orinoco,Venezuelan,2024-03-03,Cy,Fine,,1,no,no,no,yes,low,gpt-4o
";

  async fn store() -> SqliteStore {
    SqliteStore::open_in_memory().await.expect("in-memory store")
  }

  #[tokio::test]
  async fn load_n_rows_yields_n_records() {
    let s = store().await;
    let report = load_reader(&s, SOURCE.as_bytes()).await.unwrap();
    assert_eq!(report.loaded, 3);
    assert_eq!(report.skipped, 0);
    assert_eq!(s.query(&FilterSpec::new()).await.unwrap().len(), 3);

    let summary = s.summarize(&FilterSpec::new()).await.unwrap();
    assert_eq!(summary[0].average_rating, Some(4.5));
    assert_eq!(summary[0].average_local_rating, Some(4.0));
  }

  #[tokio::test]
  async fn reload_replaces_previous_records() {
    let s = store().await;
    load_reader(&s, SOURCE.as_bytes()).await.unwrap();
    load_reader(&s, SOURCE.as_bytes()).await.unwrap();
    assert_eq!(s.query(&FilterSpec::new()).await.unwrap().len(), 3);
  }

  #[tokio::test]
  async fn skipped_rows_are_reported_not_fatal() {
    let s = store().await;
    let source = format!("{SOURCE}Orinoco,Venezuelan,yesterday,Di,Bad,3,1,no,no,no,no,low,x\n");
    let report = load_reader(&s, Cursor::new(source)).await.unwrap();
    assert_eq!(report.loaded, 3);
    assert_eq!(report.skipped, 1);
    assert_eq!(report.errors[0].row, 4);
  }

  #[tokio::test]
  async fn zero_rows_is_reported_not_fatal() {
    let s = store().await;
    load_reader(&s, SOURCE.as_bytes()).await.unwrap();

    let header_only = SOURCE.lines().next().unwrap();
    let report = load_reader(&s, header_only.as_bytes()).await.unwrap();
    assert_eq!(report.loaded, 0);
    assert!(s.query(&FilterSpec::new()).await.unwrap().is_empty());
  }

  #[tokio::test]
  async fn missing_columns_leave_store_untouched() {
    let s = store().await;
    load_reader(&s, SOURCE.as_bytes()).await.unwrap();

    let err = load_reader(&s, "Restaurant Name\nOrinoco\n".as_bytes())
      .await
      .unwrap_err();
    assert!(matches!(err, LoadError::MissingColumns(_)));
    assert_eq!(s.query(&FilterSpec::new()).await.unwrap().len(), 3);
  }

  #[tokio::test]
  async fn load_from_file() {
    let s = store().await;
    let mut file = tempfile::NamedTempFile::new().unwrap();
    file.write_all(SOURCE.as_bytes()).unwrap();

    let report = load_path(&s, file.path()).await.unwrap();
    assert_eq!(report.loaded, 3);
  }

  #[tokio::test(flavor = "multi_thread")]
  async fn load_from_file_on_multi_thread_runtime() {
    let s = store().await;
    let mut file = tempfile::NamedTempFile::new().unwrap();
    file.write_all(SOURCE.as_bytes()).unwrap();

    let (a, b) = tokio::join!(load_path(&s, file.path()), load_path(&s, file.path()));
    assert_eq!(a.unwrap().loaded, 3);
    assert_eq!(b.unwrap().loaded, 3);
    assert_eq!(s.query(&FilterSpec::new()).await.unwrap().len(), 3);
  }

  #[tokio::test]
  async fn unreadable_file_is_a_load_error() {
    let s = store().await;
    let dir = tempfile::tempdir().unwrap();
    let err = load_path(&s, dir.path().join("missing.csv")).await.unwrap_err();
    assert!(matches!(err, LoadError::Io(_)));
  }
}
