//! The `SnippetStore` trait.
//!
//! Implemented by storage backends (e.g. `copypastor-store-sqlite`). The HTTP
//! layer depends on this abstraction, not on any concrete backend.
//!
//! Every operation is a short sequence of statements against the backend and
//! nothing more: there is no in-process locking, no multi-operation
//! transaction, and no retry. Conflicting writes are serialised by the
//! backend itself.

use std::future::Future;

use chrono::{DateTime, Utc};

use crate::{
  AsCoreError,
  meta::Meta,
  query::SnippetQuery,
  snippet::{Snippet, SnippetFields, SnippetId},
};

/// Abstraction over a snippet store backend.
///
/// Writes that target a single id fail with
/// [`Error::NotFound`](crate::Error::NotFound) when no row was affected;
/// they never report success for an unknown id.
///
/// All methods return `Send` futures so the trait can be used in multi-threaded
/// async runtimes (e.g. tokio with `axum`).
pub trait SnippetStore: Send + Sync {
  type Error: std::error::Error + AsCoreError + Send + Sync + 'static;

  // ── Reads ─────────────────────────────────────────────────────────────

  /// Return every snippet matching `query`, ordered per its sort mode.
  fn list<'a>(
    &'a self,
    query: &'a SnippetQuery,
  ) -> impl Future<Output = Result<Vec<Snippet>, Self::Error>> + Send + 'a;

  /// Retrieve a snippet by id. Returns `None` if not found.
  fn get(
    &self,
    id: SnippetId,
  ) -> impl Future<Output = Result<Option<Snippet>, Self::Error>> + Send + '_;

  /// Every snippet, newest first, ignoring pins.
  fn export(
    &self,
  ) -> impl Future<Output = Result<Vec<Snippet>, Self::Error>> + Send + '_;

  /// Distinct tags and categories, recomputed from the current rows.
  fn meta(&self) -> impl Future<Output = Result<Meta, Self::Error>> + Send + '_;

  // ── Writes ────────────────────────────────────────────────────────────

  /// Persist a new snippet. The store assigns `id` and `created_at`; the
  /// snippet starts unpinned with no `last_copied`.
  fn create(
    &self,
    fields: SnippetFields,
  ) -> impl Future<Output = Result<Snippet, Self::Error>> + Send + '_;

  /// Overwrite title, content, category, and tags. Omitted optional fields
  /// are cleared. Leaves `created_at`, `pinned`, and `last_copied` alone.
  fn update(
    &self,
    id: SnippetId,
    fields: SnippetFields,
  ) -> impl Future<Output = Result<Snippet, Self::Error>> + Send + '_;

  /// Set `pinned` to an explicit value. Setting the current value succeeds.
  fn set_pinned(
    &self,
    id: SnippetId,
    pinned: bool,
  ) -> impl Future<Output = Result<bool, Self::Error>> + Send + '_;

  /// Set `last_copied` to now and return the new timestamp.
  fn touch(
    &self,
    id: SnippetId,
  ) -> impl Future<Output = Result<DateTime<Utc>, Self::Error>> + Send + '_;

  /// Remove a snippet immediately and permanently.
  fn delete(
    &self,
    id: SnippetId,
  ) -> impl Future<Output = Result<(), Self::Error>> + Send + '_;
}
