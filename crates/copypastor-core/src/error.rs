//! Error types for `copypastor-core`.

use thiserror::Error;

use crate::snippet::SnippetId;

#[derive(Debug, Error)]
pub enum Error {
  /// A required input field was missing or blank.
  #[error("validation failed: {0}")]
  Validation(String),

  /// The operation targeted an id the store does not hold.
  #[error("snippet not found: {0}")]
  NotFound(SnippetId),
}

pub type Result<T, E = Error> = std::result::Result<T, E>;

/// Implemented by backend error types so that callers holding only a
/// [`SnippetStore`](crate::store::SnippetStore) bound can tell domain failures
/// (validation, unknown id) apart from storage failures.
pub trait AsCoreError {
  /// The wrapped domain error, or `None` for a pure backend failure.
  fn as_core(&self) -> Option<&Error>;
}

impl AsCoreError for Error {
  fn as_core(&self) -> Option<&Error> { Some(self) }
}
