//! Encoding and decoding helpers between domain types and the plain-text
//! representations stored in SQLite columns.
//!
//! Timestamps are written as fixed-width RFC 3339 UTC strings with
//! microsecond precision, so lexical column order is chronological order.
//! Rows written as `YYYY-MM-DD HH:MM:SS` (SQLite's `datetime('now')`) are
//! restamped when the schema is migrated, and still accepted on read.

use chrono::{DateTime, NaiveDateTime, SecondsFormat, SubsecRound, Utc};
use copypastor_core::snippet::Snippet;

use crate::{Error, Result};

// ─── DateTime<Utc> ───────────────────────────────────────────────────────────

/// The current time at the precision the store persists.
pub fn now() -> DateTime<Utc> { Utc::now().trunc_subsecs(6) }

pub fn encode_dt(dt: DateTime<Utc>) -> String {
  dt.to_rfc3339_opts(SecondsFormat::Micros, true)
}

pub fn decode_dt(s: &str) -> Result<DateTime<Utc>> {
  if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
    return Ok(dt.with_timezone(&Utc));
  }
  NaiveDateTime::parse_from_str(s, "%Y-%m-%d %H:%M:%S")
    .map(|naive| naive.and_utc())
    .map_err(|e| Error::DateParse(format!("{s:?}: {e}")))
}

// ─── Row type ────────────────────────────────────────────────────────────────

/// Column list matching [`RawSnippet::from_row`].
pub const SNIPPET_COLUMNS: &str =
  "id, title, content, category, tags, created_at, last_copied, pinned";

/// Raw values read directly from a `snippets` row.
pub struct RawSnippet {
  pub id:          i64,
  pub title:       String,
  pub content:     String,
  pub category:    Option<String>,
  pub tags:        Option<String>,
  pub created_at:  String,
  pub last_copied: Option<String>,
  pub pinned:      Option<i64>,
}

impl RawSnippet {
  pub fn from_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<Self> {
    Ok(Self {
      id:          row.get(0)?,
      title:       row.get(1)?,
      content:     row.get(2)?,
      category:    row.get(3)?,
      tags:        row.get(4)?,
      created_at:  row.get(5)?,
      last_copied: row.get(6)?,
      pinned:      row.get(7)?,
    })
  }

  pub fn into_snippet(self) -> Result<Snippet> {
    Ok(Snippet {
      id:          self.id,
      title:       self.title,
      content:     self.content,
      category:    self.category,
      tags:        self.tags,
      created_at:  decode_dt(&self.created_at)?,
      last_copied: self.last_copied.as_deref().map(decode_dt).transpose()?,
      pinned:      self.pinned.unwrap_or(0) != 0,
    })
  }
}
