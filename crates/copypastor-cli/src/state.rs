//! Client-side filter, sort, and view selection.
//!
//! [`ClientState`] is the only mutable selection state in the client. Every
//! mutator reports what the caller has to do next ([`Change`]); the request
//! that follows is derived purely from the state by [`request_params`].

use std::time::{Duration, Instant};

use copypastor_core::query::{SnippetQuery, SortOrder};

/// Quiet period before a search edit triggers a fetch.
pub const SEARCH_DEBOUNCE: Duration = Duration::from_millis(300);

// ─── View mode ────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ViewMode {
  #[default]
  List,
  Grid,
}

impl ViewMode {
  pub fn toggled(self) -> Self {
    match self {
      Self::List => Self::Grid,
      Self::Grid => Self::List,
    }
  }
}

// ─── Change ───────────────────────────────────────────────────────────────────

/// The consequence of a state mutation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Change {
  /// Nothing observable changed.
  None,
  /// Re-render the snippets already fetched.
  Rerender,
  /// Re-fetch the snippet list with the full current filter set.
  Refetch,
}

// ─── ClientState ──────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ClientState {
  pub search:          String,
  pub active_category: Option<String>,
  pub active_tag:      Option<String>,
  pub sort:            SortOrder,
  pub view:            ViewMode,
}

impl ClientState {
  pub fn set_search(&mut self, search: impl Into<String>) -> Change {
    let search = search.into();
    if search == self.search {
      return Change::None;
    }
    self.search = search;
    Change::Refetch
  }

  /// Select `category`, or clear the filter if it is already the active one.
  pub fn toggle_category(&mut self, category: &str) -> Change {
    toggle(&mut self.active_category, category);
    Change::Refetch
  }

  pub fn clear_category(&mut self) -> Change {
    if self.active_category.take().is_some() {
      Change::Refetch
    } else {
      Change::None
    }
  }

  /// Select `tag`, or clear the filter if it is already the active one.
  pub fn toggle_tag(&mut self, tag: &str) -> Change {
    toggle(&mut self.active_tag, tag);
    Change::Refetch
  }

  pub fn set_sort(&mut self, sort: SortOrder) -> Change {
    if sort == self.sort {
      return Change::None;
    }
    self.sort = sort;
    Change::Refetch
  }

  pub fn set_view(&mut self, view: ViewMode) -> Change {
    if view == self.view {
      return Change::None;
    }
    self.view = view;
    Change::Rerender
  }
}

fn toggle(slot: &mut Option<String>, value: &str) {
  if slot.as_deref() == Some(value) {
    *slot = None;
  } else {
    *slot = Some(value.to_owned());
  }
}

// ─── Pure request derivation ──────────────────────────────────────────────────

/// The list request for the current selection. Always the full filter set,
/// never a delta.
pub fn request_params(state: &ClientState) -> SnippetQuery {
  SnippetQuery {
    search:   Some(state.search.clone()),
    category: state.active_category.clone(),
    tag:      state.active_tag.clone(),
    sort:     state.sort,
  }
  .normalized()
}

/// The dashboard request: every snippet, newest first, whatever the main
/// view is filtered on.
pub fn dashboard_params() -> SnippetQuery {
  SnippetQuery { sort: SortOrder::Newest, ..SnippetQuery::default() }
}

// ─── Debounce ─────────────────────────────────────────────────────────────────

/// Trailing-edge debounce driven by explicit timestamps.
///
/// Only throttles how often requests are issued; responses that arrive out of
/// order are not reconciled.
#[derive(Debug, Clone)]
pub struct Debounce {
  interval: Duration,
  deadline: Option<Instant>,
}

impl Debounce {
  pub fn new(interval: Duration) -> Self { Self { interval, deadline: None } }

  /// Restart the quiet period from `now`.
  pub fn schedule(&mut self, now: Instant) { self.deadline = Some(now + self.interval); }

  pub fn cancel(&mut self) { self.deadline = None; }

  pub fn is_pending(&self) -> bool { self.deadline.is_some() }

  /// `true` exactly once, on the first call at or after the deadline.
  pub fn fire(&mut self, now: Instant) -> bool {
    match self.deadline {
      Some(deadline) if now >= deadline => {
        self.deadline = None;
        true
      }
      _ => false,
    }
  }
}
