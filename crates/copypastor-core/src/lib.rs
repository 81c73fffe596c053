//! Core types and trait definitions for the copypastor snippet manager.
//!
//! This crate is deliberately free of HTTP and database dependencies. The
//! store, API, and terminal client crates all build on it.

// We intentionally use native `async fn` in traits (stabilised in Rust 1.75).
// Suppress the advisory lint about `Send` bounds on the returned futures.
#![allow(async_fn_in_trait)]

pub mod error;
pub mod meta;
pub mod query;
pub mod snippet;
pub mod store;
pub mod tags;

pub use error::{AsCoreError, Error, Result};
