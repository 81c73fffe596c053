//! Tag tokenization.
//!
//! Tags are not stored as a collection: a snippet carries one free-text field
//! and the individual tags are derived from it on read.

/// Split a raw tags field into tokens.
///
/// Any run of whitespace and/or commas is a separator; empty tokens are
/// dropped, so leading, trailing, and repeated separators are harmless.
pub fn tokenize(raw: &str) -> impl Iterator<Item = &str> {
  raw
    .split(|c: char| c.is_whitespace() || c == ',')
    .filter(|t| !t.is_empty())
}
