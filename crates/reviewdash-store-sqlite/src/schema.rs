//! SQL schema for the review store.
//!
//! Executed once at connection startup. Future migrations will be gated on
//! `PRAGMA user_version`.

/// Full schema DDL; idempotent thanks to `CREATE TABLE IF NOT EXISTS`.
pub const SCHEMA: &str = "
PRAGMA journal_mode = WAL;

-- Replaced wholesale on every load; never updated row by row.
CREATE TABLE IF NOT EXISTS reviews (
    id               INTEGER PRIMARY KEY,
    restaurant_name  TEXT NOT NULL,
    cuisine          TEXT NOT NULL,
    date_created     TEXT NOT NULL,   -- RFC 3339 UTC
    reviewer_name    TEXT,
    review_text      TEXT,
    rating           REAL,
    word_count       REAL NOT NULL DEFAULT 0,
    name_only        TEXT NOT NULL DEFAULT 'no',   -- 'yes' | 'no'
    review_only      TEXT NOT NULL DEFAULT 'no',
    name_and_review  TEXT NOT NULL DEFAULT 'no',
    is_local         TEXT NOT NULL DEFAULT 'no',
    confidence       TEXT NOT NULL DEFAULT 'low',
    model            TEXT NOT NULL DEFAULT 'unknown'
);

CREATE INDEX IF NOT EXISTS reviews_restaurant_idx ON reviews(restaurant_name);
CREATE INDEX IF NOT EXISTS reviews_cuisine_idx    ON reviews(cuisine);

PRAGMA user_version = 1;
";
