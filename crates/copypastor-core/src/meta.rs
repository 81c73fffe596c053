//! Metadata aggregation: the distinct tags and categories across all
//! snippets, used to populate client-side filter controls.
//!
//! Always derived from the current rows; nothing here is cached.

use std::collections::{BTreeSet, HashSet};

use serde::{Deserialize, Serialize};

use crate::tags;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Meta {
  /// Every distinct tag token, in first-seen order.
  pub tags:       Vec<String>,
  /// Every distinct non-blank category, sorted.
  pub categories: Vec<String>,
}

impl Meta {
  /// Fold raw `tags` fields and `category` values into a [`Meta`].
  pub fn aggregate<T, C>(tag_fields: T, categories: C) -> Self
  where
    T: IntoIterator,
    T::Item: AsRef<str>,
    C: IntoIterator,
    C::Item: AsRef<str>,
  {
    let mut seen = HashSet::new();
    let mut tag_list = Vec::new();
    for field in tag_fields {
      for token in tags::tokenize(field.as_ref()) {
        if seen.insert(token.to_owned()) {
          tag_list.push(token.to_owned());
        }
      }
    }

    let categories: BTreeSet<String> = categories
      .into_iter()
      .map(|c| c.as_ref().to_owned())
      .filter(|c| !c.trim().is_empty())
      .collect();

    Self { tags: tag_list, categories: categories.into_iter().collect() }
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn tags_are_tokenized_and_deduplicated() {
    let meta = Meta::aggregate(
      ["api-key react-hooks production", "react-hooks", "urls,api-key"],
      ["Work", "Dev", "Work"],
    );
    assert_eq!(meta.tags, ["api-key", "react-hooks", "production", "urls"]);
    assert_eq!(meta.categories, ["Dev", "Work"]);
  }

  #[test]
  fn empty_input() {
    let meta = Meta::aggregate(Vec::<String>::new(), [""]);
    assert!(meta.tags.is_empty());
    assert!(meta.categories.is_empty());
  }
}
