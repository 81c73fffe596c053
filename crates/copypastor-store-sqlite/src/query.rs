//! Query builder: turns a [`SnippetQuery`] into a parameterised `SELECT`.
//!
//! Filters are ANDed. Ordering always puts pinned rows first; the remaining
//! keys depend on the sort mode, with `id DESC` as the last tie-break so the
//! order is total.

use copypastor_core::query::{SnippetQuery, SortOrder};

use crate::encode::SNIPPET_COLUMNS;

const ORDER_NEWEST: &str = "ORDER BY pinned DESC, created_at DESC, id DESC";

const ORDER_MOST_USED: &str =
  "ORDER BY pinned DESC, last_copied DESC NULLS LAST, created_at DESC, id DESC";

/// Ordering for full exports: newest first, pins ignored.
pub const ORDER_EXPORT: &str = "ORDER BY created_at DESC, id DESC";

/// A SQL string plus its positional text parameters.
#[derive(Debug)]
pub struct Statement {
  pub sql:    String,
  pub params: Vec<String>,
}

/// Build the listing statement for `query`.
pub fn list_statement(query: &SnippetQuery) -> Statement {
  let mut conds: Vec<String> = Vec::new();
  let mut params: Vec<String> = Vec::new();

  if let Some(term) = query.search.as_deref().filter(|t| !t.is_empty()) {
    params.push(like_pattern(term));
    let n = params.len();
    conds.push(format!(
      "(title LIKE ?{n} ESCAPE '\\' OR tags LIKE ?{n} ESCAPE '\\' \
       OR content LIKE ?{n} ESCAPE '\\')"
    ));
  }

  if let Some(category) = query.category.as_deref().filter(|c| !c.is_empty()) {
    params.push(category.to_owned());
    conds.push(format!("category = ?{}", params.len()));
  }

  if let Some(tag) = query.tag.as_deref().filter(|t| !t.is_empty()) {
    params.push(like_pattern(tag));
    conds.push(format!("tags LIKE ?{} ESCAPE '\\'", params.len()));
  }

  let where_clause = if conds.is_empty() {
    String::new()
  } else {
    format!(" WHERE {}", conds.join(" AND "))
  };

  let order = match query.sort {
    SortOrder::Newest => ORDER_NEWEST,
    SortOrder::MostUsed => ORDER_MOST_USED,
  };

  Statement {
    sql: format!("SELECT {SNIPPET_COLUMNS} FROM snippets{where_clause} {order}"),
    params,
  }
}

/// A `LIKE` pattern matching `term` literally anywhere in the column.
fn like_pattern(term: &str) -> String {
  let mut pattern = String::with_capacity(term.len() + 2);
  pattern.push('%');
  for c in term.chars() {
    if matches!(c, '\\' | '%' | '_') {
      pattern.push('\\');
    }
    pattern.push(c);
  }
  pattern.push('%');
  pattern
}
