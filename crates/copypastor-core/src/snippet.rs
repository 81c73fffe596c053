//! Snippet: the single persisted entity.
//!
//! A snippet is a piece of reusable text plus a little metadata. Categories
//! and tags are plain text columns, not entities of their own; the distinct
//! values are projected on read (see [`crate::meta`]).

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::{Error, Result, tags};

/// Store-assigned integer identity.
pub type SnippetId = i64;

// ─── Snippet ─────────────────────────────────────────────────────────────────

/// A stored snippet as returned by every read path.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Snippet {
  pub id:          SnippetId,
  pub title:       String,
  /// Free-form text. Never interpreted or rewritten on write.
  pub content:     String,
  /// `None` renders as "Uncategorized"; no sentinel is stored.
  pub category:    Option<String>,
  /// Raw whitespace/comma delimited tag list.
  pub tags:        Option<String>,
  /// Server-assigned on creation; never changes afterwards.
  pub created_at:  DateTime<Utc>,
  /// `None` until the snippet is first marked as used.
  pub last_copied: Option<DateTime<Utc>>,
  pub pinned:      bool,
}

impl Snippet {
  /// The individual tags of this snippet, in field order.
  pub fn tag_tokens(&self) -> Vec<&str> {
    self.tags.as_deref().map(|t| tags::tokenize(t).collect()).unwrap_or_default()
  }
}

// ─── SnippetFields ───────────────────────────────────────────────────────────

/// The user-editable part of a snippet: the input to create and to full
/// update. `id`, `created_at`, `pinned` and `last_copied` are owned by the
/// store and cannot be supplied here.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SnippetFields {
  pub title:    String,
  pub content:  String,
  pub category: Option<String>,
  pub tags:     Option<String>,
}

impl SnippetFields {
  /// Fields with the two required values and no category or tags.
  pub fn new(title: impl Into<String>, content: impl Into<String>) -> Self {
    Self {
      title:    title.into(),
      content:  content.into(),
      category: None,
      tags:     None,
    }
  }

  pub fn with_category(mut self, category: impl Into<String>) -> Self {
    self.category = Some(category.into());
    self
  }

  pub fn with_tags(mut self, tags: impl Into<String>) -> Self {
    self.tags = Some(tags.into());
    self
  }

  /// Build validated, normalised fields from loosely-typed input, where any
  /// field may have been omitted by the caller.
  pub fn parse(
    title: Option<String>,
    content: Option<String>,
    category: Option<String>,
    tags: Option<String>,
  ) -> Result<Self> {
    let fields = Self {
      title:    title.unwrap_or_default(),
      content:  content.unwrap_or_default(),
      category,
      tags,
    }
    .normalized();
    fields.validate()?;
    Ok(fields)
  }

  /// Check that `title` and `content` are present and not blank.
  pub fn validate(&self) -> Result<()> {
    if self.title.trim().is_empty() {
      return Err(Error::Validation("title is required".into()));
    }
    if self.content.trim().is_empty() {
      return Err(Error::Validation("content is required".into()));
    }
    Ok(())
  }

  /// Collapse blank optional fields to `None` so absence is stored as NULL.
  pub fn normalized(self) -> Self {
    Self {
      category: non_blank(self.category),
      tags: non_blank(self.tags),
      ..self
    }
  }
}

fn non_blank(value: Option<String>) -> Option<String> {
  value.filter(|v| !v.trim().is_empty())
}
