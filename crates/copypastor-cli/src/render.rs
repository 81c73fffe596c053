//! Pure render models: what the UI shows, computed from state and the latest
//! server response. No terminal types here; `ui` draws these.

use chrono::{DateTime, Utc};
use copypastor_core::{meta::Meta, snippet::Snippet};

use crate::state::{ClientState, ViewMode};

pub const UNCATEGORIZED: &str = "Uncategorized";
pub const EMPTY_LIST: &str = "No snippets found";

// ─── Content ──────────────────────────────────────────────────────────────────

/// Snippet content classified for display. Classification happens only here;
/// stored content is never altered.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Body {
  /// A JSON object or array, pretty-printed.
  Json(String),
  /// An `http(s)://` URL.
  Link(String),
  /// Content starting with `# `: the heading text and everything after the
  /// first line.
  Heading { title: String, rest: String },
  Plain(String),
}

pub fn format_content(content: &str) -> Body {
  if let Ok(value) = serde_json::from_str::<serde_json::Value>(content) {
    if value.is_object() || value.is_array() {
      if let Ok(pretty) = serde_json::to_string_pretty(&value) {
        return Body::Json(pretty);
      }
    }
  }

  if content.starts_with("http://") || content.starts_with("https://") {
    return Body::Link(content.to_owned());
  }

  if let Some(stripped) = content.strip_prefix("# ") {
    let (title, rest) = stripped.split_once('\n').unwrap_or((stripped, ""));
    return Body::Heading { title: title.to_owned(), rest: rest.to_owned() };
  }

  Body::Plain(content.to_owned())
}

// ─── Relative time ────────────────────────────────────────────────────────────

/// "3 hours ago", "1 day ago", "12 seconds ago".
pub fn time_ago(then: DateTime<Utc>, now: DateTime<Utc>) -> String {
  const UNITS: [(i64, &str); 5] = [
    (31_536_000, "year"),
    (2_592_000, "month"),
    (86_400, "day"),
    (3_600, "hour"),
    (60, "minute"),
  ];

  let seconds = (now - then).num_seconds().max(0);
  for (size, unit) in UNITS {
    let n = seconds / size;
    if n >= 1 {
      return plural(n, unit);
    }
  }
  plural(seconds, "second")
}

fn plural(n: i64, unit: &str) -> String {
  if n == 1 {
    format!("1 {unit} ago")
  } else {
    format!("{n} {unit}s ago")
  }
}

// ─── Snippet list ─────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Card {
  pub id:       i64,
  pub title:    String,
  pub pinned:   bool,
  pub tags:     Vec<String>,
  pub category: String,
  pub body:     Body,
  /// "Used: ..." once copied, "Added: ..." before.
  pub footer:   String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListModel {
  pub view:  ViewMode,
  pub cards: Vec<Card>,
}

impl ListModel {
  pub fn empty_message(&self) -> Option<&'static str> {
    self.cards.is_empty().then_some(EMPTY_LIST)
  }
}

pub fn list_model(state: &ClientState, snippets: &[Snippet], now: DateTime<Utc>) -> ListModel {
  ListModel {
    view:  state.view,
    cards: snippets.iter().map(|s| card(s, now)).collect(),
  }
}

fn card(snippet: &Snippet, now: DateTime<Utc>) -> Card {
  let footer = match snippet.last_copied {
    Some(at) => format!("Used: {}", time_ago(at, now)),
    None => format!("Added: {}", time_ago(snippet.created_at, now)),
  };
  Card {
    id: snippet.id,
    title: snippet.title.clone(),
    pinned: snippet.pinned,
    tags: snippet.tag_tokens().into_iter().map(str::to_owned).collect(),
    category: category_label(snippet).unwrap_or(UNCATEGORIZED).to_owned(),
    body: format_content(&snippet.content),
    footer,
  }
}

/// The snippet's category, treating a blank value as no category.
fn category_label(snippet: &Snippet) -> Option<&str> {
  snippet.category.as_deref().filter(|c| !c.trim().is_empty())
}

// ─── Sidebar ──────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SidebarItem {
  /// Clears the category filter.
  AllSnippets,
  Category(String),
  Tag(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SidebarEntry {
  pub item:   SidebarItem,
  pub label:  String,
  pub active: bool,
}

/// Filter controls populated from the latest metadata response.
pub fn sidebar_model(state: &ClientState, meta: &Meta) -> Vec<SidebarEntry> {
  let mut entries = vec![SidebarEntry {
    item:   SidebarItem::AllSnippets,
    label:  "All Snippets".into(),
    active: state.active_category.is_none(),
  }];

  entries.extend(meta.categories.iter().map(|c| SidebarEntry {
    item:   SidebarItem::Category(c.clone()),
    label:  c.clone(),
    active: state.active_category.as_deref() == Some(c.as_str()),
  }));

  entries.extend(meta.tags.iter().map(|t| SidebarEntry {
    item:   SidebarItem::Tag(t.clone()),
    label:  format!("#{t}"),
    active: state.active_tag.as_deref() == Some(t.as_str()),
  }));

  entries
}

// ─── Dashboard ────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DashboardRow {
  pub id:        i64,
  pub title:     String,
  pub category:  String,
  pub last_used: String,
}

pub fn dashboard_rows(snippets: &[Snippet]) -> Vec<DashboardRow> {
  snippets
    .iter()
    .map(|s| DashboardRow {
      id:        s.id,
      title:     s.title.clone(),
      category:  category_label(s).unwrap_or("None").to_owned(),
      last_used: s
        .last_copied
        .map(|at| at.format("%Y-%m-%d").to_string())
        .unwrap_or_else(|| "-".to_owned()),
    })
    .collect()
}

#[cfg(test)]
mod tests {
  use chrono::{Duration, TimeZone};

  use super::*;

  fn at(secs: i64) -> DateTime<Utc> {
    Utc.timestamp_opt(1_700_000_000 + secs, 0).unwrap()
  }

  fn snippet(id: i64) -> Snippet {
    Snippet {
      id,
      title: format!("s{id}"),
      content: "plain".into(),
      category: None,
      tags: None,
      created_at: at(0),
      last_copied: None,
      pinned: false,
    }
  }

  #[test]
  fn json_objects_are_pretty_printed() {
    assert_eq!(
      format_content(r#"{"key":"sk"}"#),
      Body::Json("{\n  \"key\": \"sk\"\n}".into())
    );
    // Scalars are valid JSON but are not treated as structured content.
    assert_eq!(format_content("42"), Body::Plain("42".into()));
  }

  #[test]
  fn links_headings_and_plain_text() {
    assert_eq!(
      format_content("https://figma.com/x"),
      Body::Link("https://figma.com/x".into())
    );
    assert_eq!(
      format_content("# Title\nline 1\nline 2"),
      Body::Heading { title: "Title".into(), rest: "line 1\nline 2".into() }
    );
    assert_eq!(
      format_content("# Only"),
      Body::Heading { title: "Only".into(), rest: String::new() }
    );
    assert_eq!(format_content("<b>x</b>"), Body::Plain("<b>x</b>".into()));
  }

  #[test]
  fn time_ago_buckets() {
    let now = at(0);
    assert_eq!(time_ago(now, now), "0 seconds ago");
    assert_eq!(time_ago(now - Duration::seconds(59), now), "59 seconds ago");
    assert_eq!(time_ago(now - Duration::seconds(60), now), "1 minute ago");
    assert_eq!(time_ago(now - Duration::hours(5), now), "5 hours ago");
    assert_eq!(time_ago(now - Duration::days(1), now), "1 day ago");
    assert_eq!(time_ago(now - Duration::days(400), now), "1 year ago");
    assert_eq!(time_ago(now + Duration::seconds(5), now), "0 seconds ago");
  }

  #[test]
  fn cards_show_category_tags_and_usage() {
    let mut used = snippet(1);
    used.tags = Some("api-key, react-hooks  production".into());
    used.category = Some("Work".into());
    used.last_copied = Some(at(-120));
    let fresh = snippet(2);

    let state = ClientState::default();
    let model = list_model(&state, &[used, fresh], at(0));
    assert_eq!(model.empty_message(), None);
    assert_eq!(model.cards[0].tags, ["api-key", "react-hooks", "production"]);
    assert_eq!(model.cards[0].category, "Work");
    assert_eq!(model.cards[0].footer, "Used: 2 minutes ago");
    assert_eq!(model.cards[1].category, UNCATEGORIZED);
    assert_eq!(model.cards[1].footer, "Added: 0 seconds ago");
  }

  #[test]
  fn empty_list_has_message() {
    let model = list_model(&ClientState::default(), &[], at(0));
    assert_eq!(model.empty_message(), Some(EMPTY_LIST));
  }

  #[test]
  fn sidebar_marks_active_filters() {
    let meta = Meta {
      tags:       vec!["api".into(), "urls".into()],
      categories: vec!["Dev".into(), "Work".into()],
    };
    let state = ClientState {
      active_category: Some("Work".into()),
      active_tag: Some("urls".into()),
      ..ClientState::default()
    };
    let entries = sidebar_model(&state, &meta);
    let active: Vec<&str> = entries
      .iter()
      .filter(|e| e.active)
      .map(|e| e.label.as_str())
      .collect();
    assert_eq!(entries.len(), 5);
    assert_eq!(active, ["Work", "#urls"]);
  }

  #[test]
  fn dashboard_placeholders() {
    let mut used = snippet(1);
    used.last_copied = Some(Utc.with_ymd_and_hms(2026, 3, 4, 5, 6, 7).unwrap());
    let rows = dashboard_rows(&[used, snippet(2)]);
    assert_eq!(rows[0].last_used, "2026-03-04");
    assert_eq!(rows[1].last_used, "-");
    assert_eq!(rows[1].category, "None");
  }

  #[test]
  fn blank_category_reads_as_uncategorized() {
    let mut blank = snippet(1);
    blank.category = Some("  ".into());

    let model = list_model(&ClientState::default(), &[blank.clone()], at(0));
    assert_eq!(model.cards[0].category, UNCATEGORIZED);
    assert_eq!(dashboard_rows(&[blank])[0].category, "None");
  }
}
