//! Core types and trait definitions for the review dashboard.
//!
//! This crate is deliberately free of HTTP, CSV and database dependencies.
//! The loader, the store and the API all depend on it.

// We intentionally use native `async fn` in traits (stabilised in Rust 1.75).
// Suppress the advisory lint about `Send` bounds on the returned futures.
#![allow(async_fn_in_trait)]

pub mod error;
pub mod filter;
pub mod page;
pub mod review;
pub mod store;
pub mod summary;

pub use error::{Error, Result};
