//! Filter and sort parameters for listing snippets.

use serde::{Deserialize, Serialize};

/// Result ordering. Pinned snippets always come first under either mode.
#[derive(
  Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize,
)]
#[serde(rename_all = "snake_case")]
pub enum SortOrder {
  /// Most recently created first.
  #[default]
  Newest,
  /// Most recently copied first; never-copied snippets after all copied ones,
  /// then newest first.
  MostUsed,
}

impl SortOrder {
  /// The wire value used in the `sort` query parameter.
  pub fn as_str(self) -> &'static str {
    match self {
      Self::Newest => "newest",
      Self::MostUsed => "most_used",
    }
  }

  pub fn toggled(self) -> Self {
    match self {
      Self::Newest => Self::MostUsed,
      Self::MostUsed => Self::Newest,
    }
  }
}

/// Parameters for [`SnippetStore::list`](crate::store::SnippetStore::list).
///
/// Every present filter narrows the result (logical AND); absent filters
/// impose nothing. There is no pagination: the full matching set is returned.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SnippetQuery {
  /// Case-insensitive substring of title, tags, or content.
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub search:   Option<String>,
  /// Exact category match.
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub category: Option<String>,
  /// Substring of the raw tags field; `api` also matches `api-key`.
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub tag:      Option<String>,
  #[serde(default)]
  pub sort:     SortOrder,
}

impl SnippetQuery {
  /// Treat empty filter strings as absent.
  pub fn normalized(self) -> Self {
    Self {
      search:   self.search.filter(|s| !s.is_empty()),
      category: self.category.filter(|s| !s.is_empty()),
      tag:      self.tag.filter(|s| !s.is_empty()),
      sort:     self.sort,
    }
  }
}
