//! [`SqliteStore`]: the SQLite implementation of [`ReviewStore`].

use std::path::Path;

use reviewdash_core::{
  filter::{Dimension, FilterSpec},
  review::{NewReview, Review},
  store::ReviewStore,
  summary::{Overview, QUALIFIED_CONFIDENCE, RestaurantSummary},
};

use crate::{
  Result,
  encode::{REVIEW_COLUMNS, RawReview, encode_dt, encode_flag},
  schema::SCHEMA,
  sql::where_clause,
};

// ─── Store ───────────────────────────────────────────────────────────────────

/// A review store backed by a single SQLite file.
///
/// Cloning is cheap; the inner connection is reference-counted.
#[derive(Clone)]
pub struct SqliteStore {
  conn: tokio_rusqlite::Connection,
}

impl SqliteStore {
  /// Open (or create) a store at `path` and run schema initialisation.
  pub async fn open(path: impl AsRef<Path>) -> Result<Self> {
    let conn = tokio_rusqlite::Connection::open(path).await?;
    let store = Self { conn };
    store.init_schema().await?;
    Ok(store)
  }

  /// Open an in-memory store, useful for testing.
  pub async fn open_in_memory() -> Result<Self> {
    let conn = tokio_rusqlite::Connection::open_in_memory().await?;
    let store = Self { conn };
    store.init_schema().await?;
    Ok(store)
  }

  async fn init_schema(&self) -> Result<()> {
    self
      .conn
      .call(|conn| {
        conn.execute_batch(SCHEMA)?;
        Ok(())
      })
      .await?;
    Ok(())
  }
}

// ─── ReviewStore impl ────────────────────────────────────────────────────────

impl ReviewStore for SqliteStore {
  type Error = crate::Error;

  // ── Writes ────────────────────────────────────────────────────────────────

  async fn replace_all(&self, reviews: Vec<NewReview>) -> Result<usize> {
    let (deleted, inserted) = self
      .conn
      .call(move |conn| {
        // The delete commits on its own. A crash, or an insert error that
        // rolls the transaction back, leaves the table empty.
        let deleted = conn.execute("DELETE FROM reviews", [])?;

        let tx = conn.transaction()?;
        let mut inserted = 0;
        {
          let mut stmt = tx.prepare(
            "INSERT INTO reviews (
               restaurant_name, cuisine, date_created, reviewer_name,
               review_text, rating, word_count, name_only, review_only,
               name_and_review, is_local, confidence, model
             ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12, ?13)",
          )?;
          for r in &reviews {
            inserted += stmt.execute(rusqlite::params![
              r.restaurant_name,
              r.cuisine,
              encode_dt(r.date_created),
              r.reviewer_name,
              r.review_text,
              r.rating,
              r.word_count,
              encode_flag(r.name_only),
              encode_flag(r.review_only),
              encode_flag(r.name_and_review),
              encode_flag(r.is_local),
              r.confidence,
              r.model,
            ])?;
          }
        }
        tx.commit()?;
        Ok((deleted, inserted))
      })
      .await?;

    tracing::debug!(deleted, inserted, "replaced review set");
    Ok(inserted)
  }

  // ── Reads ─────────────────────────────────────────────────────────────────

  async fn query(&self, filter: &FilterSpec) -> Result<Vec<Review>> {
    let clause = where_clause(filter);

    let raws: Vec<RawReview> = self
      .conn
      .call(move |conn| {
        let sql = format!(
          "SELECT {REVIEW_COLUMNS} FROM reviews {} ORDER BY id",
          clause.sql
        );
        let mut stmt = conn.prepare(&sql)?;
        let rows = stmt
          .query_map(
            rusqlite::params_from_iter(clause.params.iter()),
            RawReview::from_row,
          )?
          .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(rows)
      })
      .await?;

    raws.into_iter().map(RawReview::into_review).collect()
  }

  async fn summarize(&self, filter: &FilterSpec) -> Result<Vec<RestaurantSummary>> {
    let clause = where_clause(filter);

    let rows = self
      .conn
      .call(move |conn| {
        // AVG skips NULLs and yields NULL over an empty input.
        let sql = format!(
          "SELECT
             restaurant_name,
             COUNT(*),
             SUM(CASE WHEN is_local = 'yes' THEN 1 ELSE 0 END),
             AVG(rating),
             AVG(CASE WHEN is_local = 'yes' THEN rating END)
           FROM reviews
           {}
           GROUP BY restaurant_name
           ORDER BY restaurant_name",
          clause.sql
        );
        let mut stmt = conn.prepare(&sql)?;
        let rows = stmt
          .query_map(
            rusqlite::params_from_iter(clause.params.iter()),
            |row| {
              Ok((
                row.get::<_, String>(0)?,
                row.get::<_, i64>(1)?,
                row.get::<_, i64>(2)?,
                row.get::<_, Option<f64>>(3)?,
                row.get::<_, Option<f64>>(4)?,
              ))
            },
          )?
          .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(rows)
      })
      .await?;

    Ok(
      rows
        .into_iter()
        .map(|(name, count, local, avg, avg_local)| {
          RestaurantSummary::from_counts(
            name,
            count as u64,
            local as u64,
            avg,
            avg_local,
          )
        })
        .collect(),
    )
  }

  async fn overview(&self, filter: &FilterSpec) -> Result<Overview> {
    let clause = where_clause(filter);

    let (total, restaurants, qualified, avg) = self
      .conn
      .call(move |conn| {
        let sql = format!(
          "SELECT
             COUNT(*),
             COUNT(DISTINCT restaurant_name),
             COALESCE(SUM(CASE
               WHEN review_only = 'yes' AND name_only = 'yes'
                AND confidence = '{QUALIFIED_CONFIDENCE}'
               THEN 1 ELSE 0 END), 0),
             AVG(rating)
           FROM reviews
           {}",
          clause.sql
        );
        Ok(conn.query_row(
          &sql,
          rusqlite::params_from_iter(clause.params.iter()),
          |row| {
            Ok((
              row.get::<_, i64>(0)?,
              row.get::<_, i64>(1)?,
              row.get::<_, i64>(2)?,
              row.get::<_, Option<f64>>(3)?,
            ))
          },
        )?)
      })
      .await?;

    Ok(Overview::from_counts(
      total as u64,
      restaurants as u64,
      qualified as u64,
      avg,
    ))
  }

  async fn distinct_values(&self, dimension: Dimension) -> Result<Vec<String>> {
    let column = dimension.as_str();

    let values = self
      .conn
      .call(move |conn| {
        let sql = format!(
          "SELECT DISTINCT {column} FROM reviews ORDER BY {column}"
        );
        let mut stmt = conn.prepare(&sql)?;
        let rows = stmt
          .query_map([], |row| row.get::<_, String>(0))?
          .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(rows)
      })
      .await?;

    Ok(values)
  }
}
