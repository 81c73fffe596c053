//! Application state machine and event dispatcher.
//!
//! Every mutation goes to the server first; the visible list, the sidebar,
//! and the dashboard (when open) are then re-fetched from scratch. A failed
//! request leaves the last successfully rendered data on screen and reports
//! the error in the status bar.

use std::{path::PathBuf, sync::Arc, time::Instant};

use anyhow::{Context, Result};
use copypastor_core::{
  meta::Meta,
  query::SortOrder,
  snippet::{Snippet, SnippetFields, SnippetId},
};
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use crate::{
  client::ApiClient,
  clipboard::Clipboard,
  form::{Form, FormMode, FormOutcome},
  render::{self, SidebarItem},
  state::{
    Change, ClientState, Debounce, SEARCH_DEBOUNCE, dashboard_params, request_params,
  },
};

/// Where `x` writes the export document.
pub const EXPORT_PATH: &str = "copypastor-export.json";

// ─── Screen ───────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Screen {
  /// Focus on the snippet list.
  List,
  /// Focus on the category/tag filter pane.
  Sidebar,
  /// Typing into the search box.
  Search,
  /// The create/edit form is open.
  Form,
  /// The management table of every snippet.
  Dashboard,
  /// Waiting for `y` to confirm a delete.
  ConfirmDelete,
}

// ─── App ──────────────────────────────────────────────────────────────────────

/// Top-level application state.
pub struct App {
  pub screen: Screen,

  /// Filter, sort, and view selection.
  pub state: ClientState,

  /// The last successfully fetched list for `state`.
  pub snippets: Vec<Snippet>,

  /// The last successfully fetched tag and category sets.
  pub meta: Meta,

  /// Every snippet, newest first, while the dashboard is open.
  pub dashboard: Option<Vec<Snippet>>,

  pub list_cursor:      usize,
  pub sidebar_cursor:   usize,
  pub dashboard_cursor: usize,

  /// Open create/edit form, if any.
  pub form: Option<Form>,

  /// Snippet awaiting delete confirmation, and the screen to return to.
  pub pending_delete: Option<(SnippetId, Screen)>,

  /// One-line status message shown in the status bar.
  pub status_msg: String,

  pub search_debounce: Debounce,

  pub export_path: PathBuf,

  /// Shared HTTP client.
  pub client: Arc<ApiClient>,

  /// `None` when no system clipboard is reachable.
  clipboard: Option<Box<dyn Clipboard>>,
}

impl App {
  pub fn new(client: ApiClient, clipboard: Option<Box<dyn Clipboard>>) -> Self {
    Self {
      screen: Screen::List,
      state: ClientState::default(),
      snippets: Vec::new(),
      meta: Meta::default(),
      dashboard: None,
      list_cursor: 0,
      sidebar_cursor: 0,
      dashboard_cursor: 0,
      form: None,
      pending_delete: None,
      status_msg: String::new(),
      search_debounce: Debounce::new(SEARCH_DEBOUNCE),
      export_path: PathBuf::from(EXPORT_PATH),
      client: Arc::new(client),
      clipboard,
    }
  }

  // ── Data loading ──────────────────────────────────────────────────────────

  /// Initial load: the list for the default selection plus metadata.
  pub async fn load(&mut self) -> Result<()> {
    self.status_msg = "Loading snippets…".into();
    self.refresh_list().await?;
    self.refresh_meta().await?;
    self.status_msg.clear();
    Ok(())
  }

  /// Re-fetch the list with the full current filter set.
  pub async fn refresh_list(&mut self) -> Result<()> {
    let query = request_params(&self.state);
    let snippets = self.client.list_snippets(&query).await?;
    self.snippets = snippets;
    self.list_cursor = clamp(self.list_cursor, self.snippets.len());
    Ok(())
  }

  pub async fn refresh_meta(&mut self) -> Result<()> {
    self.meta = self.client.meta().await?;
    let entries = render::sidebar_model(&self.state, &self.meta).len();
    self.sidebar_cursor = clamp(self.sidebar_cursor, entries);
    Ok(())
  }

  /// Re-fetch the dashboard table; a no-op while it is closed.
  pub async fn refresh_dashboard(&mut self) -> Result<()> {
    if self.dashboard.is_none() {
      return Ok(());
    }
    let rows = self.client.list_snippets(&dashboard_params()).await?;
    self.dashboard_cursor = clamp(self.dashboard_cursor, rows.len());
    self.dashboard = Some(rows);
    Ok(())
  }

  async fn refresh_after_mutation(&mut self) -> Result<()> {
    self.refresh_list().await?;
    self.refresh_meta().await?;
    self.refresh_dashboard().await
  }

  /// Act on the outcome of a selection change.
  pub async fn apply(&mut self, change: Change) -> Result<()> {
    match change {
      Change::Refetch => {
        self.list_cursor = 0;
        self.refresh_list().await
      }
      Change::Rerender | Change::None => Ok(()),
    }
  }

  /// Fire the search debounce if its quiet period has elapsed.
  pub async fn tick(&mut self, now: Instant) {
    if self.search_debounce.fire(now) {
      let result = self.apply(Change::Refetch).await;
      self.report(result);
    }
  }

  fn report(&mut self, result: Result<()>) {
    if let Err(e) = result {
      self.status_msg = format!("Error: {e:#}");
    }
  }

  // ── Selection ─────────────────────────────────────────────────────────────

  /// The snippet under the list cursor, if any.
  pub fn cursor_snippet(&self) -> Option<&Snippet> { self.snippets.get(self.list_cursor) }

  pub fn dashboard_snippet(&self) -> Option<&Snippet> {
    self.dashboard.as_ref()?.get(self.dashboard_cursor)
  }

  // ── Mutations ─────────────────────────────────────────────────────────────

  /// Create or overwrite a snippet depending on `mode`.
  pub async fn save(&mut self, mode: FormMode, fields: SnippetFields) -> Result<Snippet> {
    let snippet = match mode {
      FormMode::Create => self.client.create(&fields).await?,
      FormMode::Edit(id) => self.client.update(id, &fields).await?,
    };
    self.refresh_after_mutation().await?;
    Ok(snippet)
  }

  /// Set the pin flag to the opposite of what is currently displayed.
  pub async fn toggle_pin(&mut self, id: SnippetId) -> Result<bool> {
    let current = self
      .snippets
      .iter()
      .chain(self.dashboard.iter().flatten())
      .find(|s| s.id == id)
      .is_some_and(|s| s.pinned);
    let pinned = self.client.set_pinned(id, !current).await?;
    self.refresh_after_mutation().await?;
    Ok(pinned)
  }

  /// Record a copy of `id`. Usage affects only ordering and the
  /// "Used:" footer, so metadata is left alone.
  pub async fn mark_used(&mut self, id: SnippetId) -> Result<()> {
    self.client.touch(id).await?;
    self.refresh_list().await?;
    self.refresh_dashboard().await
  }

  pub async fn delete(&mut self, id: SnippetId) -> Result<()> {
    self.client.delete(id).await?;
    self.refresh_after_mutation().await
  }

  /// Put the snippet's content on the system clipboard, then mark it used.
  pub async fn copy(&mut self, id: SnippetId) -> Result<()> {
    let Some(snippet) = self.snippets.iter().find(|s| s.id == id) else {
      return Ok(());
    };
    let (title, content) = (snippet.title.clone(), snippet.content.clone());
    let clipboard = self.clipboard.as_mut().context("no clipboard available")?;
    clipboard.copy_text(content)?;
    self.mark_used(id).await?;
    self.status_msg = format!("Copied \"{title}\"");
    Ok(())
  }

  /// Write the export document to `export_path`.
  pub async fn export(&mut self) -> Result<()> {
    let document = self.client.export().await?;
    tokio::fs::write(&self.export_path, document)
      .await
      .with_context(|| format!("writing {}", self.export_path.display()))?;
    self.status_msg = format!("Exported to {}", self.export_path.display());
    Ok(())
  }

  async fn open_dashboard(&mut self) -> Result<()> {
    self.dashboard = Some(Vec::new());
    self.dashboard_cursor = 0;
    self.screen = Screen::Dashboard;
    self.refresh_dashboard().await
  }

  // ── Key handling ──────────────────────────────────────────────────────────

  /// Process a key event. Returns `false` to quit.
  ///
  /// Request failures are shown in the status bar; they never end the
  /// session.
  pub async fn handle_key(&mut self, key: KeyEvent) -> bool {
    if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
      return false;
    }

    let result = match self.screen {
      Screen::List => match self.handle_list_key(key).await {
        Ok(cont) => return cont,
        Err(e) => Err(e),
      },
      Screen::Sidebar => self.handle_sidebar_key(key).await,
      Screen::Search => self.handle_search_key(key).await,
      Screen::Form => self.handle_form_key(key).await,
      Screen::Dashboard => self.handle_dashboard_key(key).await,
      Screen::ConfirmDelete => self.handle_confirm_key(key).await,
    };
    self.report(result);
    true
  }

  async fn handle_list_key(&mut self, key: KeyEvent) -> Result<bool> {
    self.status_msg.clear();
    match key.code {
      KeyCode::Char('q') => return Ok(false),

      KeyCode::Down | KeyCode::Char('j') => {
        if self.list_cursor + 1 < self.snippets.len() {
          self.list_cursor += 1;
        }
      }
      KeyCode::Up | KeyCode::Char('k') => {
        self.list_cursor = self.list_cursor.saturating_sub(1);
      }

      KeyCode::Char('/') => self.screen = Screen::Search,
      KeyCode::Tab => self.screen = Screen::Sidebar,

      KeyCode::Char('s') => {
        let change = self.state.set_sort(self.state.sort.toggled());
        self.apply(change).await?;
        self.status_msg = match self.state.sort {
          SortOrder::Newest => "Sorted by newest".into(),
          SortOrder::MostUsed => "Sorted by most used".into(),
        };
      }
      KeyCode::Char('v') => {
        let change = self.state.set_view(self.state.view.toggled());
        self.apply(change).await?;
      }

      KeyCode::Enter | KeyCode::Char('y') => {
        if let Some(id) = self.cursor_snippet().map(|s| s.id) {
          self.copy(id).await?;
        }
      }
      // Copy the top result without moving the cursor.
      KeyCode::Char('Y') => {
        if let Some(id) = self.snippets.first().map(|s| s.id) {
          self.copy(id).await?;
        }
      }
      KeyCode::Char('p') => {
        if let Some(id) = self.cursor_snippet().map(|s| s.id) {
          let pinned = self.toggle_pin(id).await?;
          self.status_msg = if pinned { "Pinned".into() } else { "Unpinned".into() };
        }
      }

      KeyCode::Char('n') => {
        self.form = Some(Form::create());
        self.screen = Screen::Form;
      }
      KeyCode::Char('e') => {
        if let Some(form) = self.cursor_snippet().map(Form::edit) {
          self.form = Some(form);
          self.screen = Screen::Form;
        }
      }
      KeyCode::Char('d') => {
        if let Some(id) = self.cursor_snippet().map(|s| s.id) {
          self.pending_delete = Some((id, Screen::List));
          self.screen = Screen::ConfirmDelete;
        }
      }

      KeyCode::Char('D') => self.open_dashboard().await?,
      KeyCode::Char('x') => self.export().await?,
      KeyCode::Char('r') => {
        self.refresh_list().await?;
        self.refresh_meta().await?;
      }

      _ => {}
    }
    Ok(true)
  }

  async fn handle_search_key(&mut self, key: KeyEvent) -> Result<()> {
    match key.code {
      // Leave the search box and fetch right away.
      KeyCode::Enter => {
        self.screen = Screen::List;
        if self.search_debounce.is_pending() {
          self.search_debounce.cancel();
          self.apply(Change::Refetch).await?;
        }
      }
      KeyCode::Esc => {
        self.screen = Screen::List;
        self.search_debounce.cancel();
        let change = self.state.set_search("");
        self.apply(change).await?;
      }
      KeyCode::Backspace => {
        let mut search = self.state.search.clone();
        search.pop();
        self.edit_search(search);
      }
      KeyCode::Char(c) => {
        let search = format!("{}{c}", self.state.search);
        self.edit_search(search);
      }
      _ => {}
    }
    Ok(())
  }

  fn edit_search(&mut self, search: String) {
    if self.state.set_search(search) == Change::Refetch {
      self.search_debounce.schedule(Instant::now());
    }
  }

  async fn handle_sidebar_key(&mut self, key: KeyEvent) -> Result<()> {
    let entries = render::sidebar_model(&self.state, &self.meta);
    match key.code {
      KeyCode::Char('q') | KeyCode::Esc | KeyCode::Tab => self.screen = Screen::List,
      KeyCode::Down | KeyCode::Char('j') => {
        if self.sidebar_cursor + 1 < entries.len() {
          self.sidebar_cursor += 1;
        }
      }
      KeyCode::Up | KeyCode::Char('k') => {
        self.sidebar_cursor = self.sidebar_cursor.saturating_sub(1);
      }
      KeyCode::Enter | KeyCode::Char(' ') => {
        if let Some(entry) = entries.get(self.sidebar_cursor) {
          let change = match &entry.item {
            SidebarItem::AllSnippets => self.state.clear_category(),
            SidebarItem::Category(c) => self.state.toggle_category(c),
            SidebarItem::Tag(t) => self.state.toggle_tag(t),
          };
          self.apply(change).await?;
        }
      }
      _ => {}
    }
    Ok(())
  }

  async fn handle_form_key(&mut self, key: KeyEvent) -> Result<()> {
    let Some(form) = self.form.as_mut() else {
      self.screen = Screen::List;
      return Ok(());
    };
    let mode = form.mode;
    match form.handle_key(key) {
      FormOutcome::Editing => {}
      FormOutcome::Cancel => self.close_form(),
      FormOutcome::Submit(fields) => {
        let snippet = self.save(mode, fields).await?;
        self.close_form();
        self.status_msg = match mode {
          FormMode::Create => format!("Created \"{}\"", snippet.title),
          FormMode::Edit(_) => format!("Saved \"{}\"", snippet.title),
        };
      }
    }
    Ok(())
  }

  fn close_form(&mut self) {
    self.form = None;
    self.screen = if self.dashboard.is_some() { Screen::Dashboard } else { Screen::List };
  }

  async fn handle_dashboard_key(&mut self, key: KeyEvent) -> Result<()> {
    let len = self.dashboard.as_ref().map_or(0, Vec::len);
    match key.code {
      KeyCode::Char('q') | KeyCode::Esc | KeyCode::Char('D') => {
        self.dashboard = None;
        self.screen = Screen::List;
      }
      KeyCode::Down | KeyCode::Char('j') => {
        if self.dashboard_cursor + 1 < len {
          self.dashboard_cursor += 1;
        }
      }
      KeyCode::Up | KeyCode::Char('k') => {
        self.dashboard_cursor = self.dashboard_cursor.saturating_sub(1);
      }
      KeyCode::Char('e') | KeyCode::Enter => {
        if let Some(form) = self.dashboard_snippet().map(Form::edit) {
          self.form = Some(form);
          self.screen = Screen::Form;
        }
      }
      KeyCode::Char('d') => {
        if let Some(id) = self.dashboard_snippet().map(|s| s.id) {
          self.pending_delete = Some((id, Screen::Dashboard));
          self.screen = Screen::ConfirmDelete;
        }
      }
      KeyCode::Char('p') => {
        if let Some(id) = self.dashboard_snippet().map(|s| s.id) {
          self.toggle_pin(id).await?;
        }
      }
      _ => {}
    }
    Ok(())
  }

  async fn handle_confirm_key(&mut self, key: KeyEvent) -> Result<()> {
    let Some((id, back)) = self.pending_delete.take() else {
      self.screen = Screen::List;
      return Ok(());
    };
    self.screen = back;
    if matches!(key.code, KeyCode::Char('y') | KeyCode::Char('Y')) {
      self.delete(id).await?;
      self.status_msg = "Deleted".into();
    }
    Ok(())
  }
}

fn clamp(cursor: usize, len: usize) -> usize { cursor.min(len.saturating_sub(1)) }

#[cfg(test)]
mod tests {
  use std::{sync::Mutex, time::Duration};

  use copypastor_store_sqlite::SqliteStore;

  use super::*;
  use crate::{client::ApiConfig, state::ViewMode};

  /// Serve a fresh in-memory store on an ephemeral port.
  async fn spawn_server() -> String {
    let store = SqliteStore::open_in_memory().await.unwrap();
    store
      .seed_if_empty(copypastor_server::seed::demo_snippets())
      .await
      .unwrap();
    let router = copypastor_server::router(Arc::new(store));
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move { axum::serve(listener, router).await.unwrap() });
    format!("http://{addr}")
  }

  /// Records every copy instead of touching the system clipboard.
  #[derive(Clone, Default)]
  struct Recorded(Arc<Mutex<Vec<String>>>);

  impl Clipboard for Recorded {
    fn copy_text(&mut self, text: String) -> Result<()> {
      self.0.lock().unwrap().push(text);
      Ok(())
    }
  }

  async fn app_with(clipboard: Option<Box<dyn Clipboard>>) -> App {
    let client = ApiClient::new(ApiConfig { base_url: spawn_server().await }).unwrap();
    let mut app = App::new(client, clipboard);
    app.load().await.unwrap();
    app
  }

  async fn app() -> App { app_with(None).await }

  fn key(code: KeyCode) -> KeyEvent { KeyEvent::new(code, KeyModifiers::NONE) }

  fn titles(snippets: &[Snippet]) -> Vec<&str> {
    snippets.iter().map(|s| s.title.as_str()).collect()
  }

  fn id_of(app: &App, title: &str) -> SnippetId {
    app.snippets.iter().find(|s| s.title == title).unwrap().id
  }

  #[tokio::test]
  async fn initial_load_fetches_list_and_meta() {
    let app = app().await;
    assert_eq!(app.snippets.len(), 4);
    assert_eq!(app.meta.categories, ["Dev", "Work"]);
    assert!(app.meta.tags.contains(&"react-hooks".to_string()));
  }

  #[tokio::test]
  async fn category_and_tag_filters_combine() {
    let mut app = app().await;
    let change = app.state.toggle_category("Dev");
    app.apply(change).await.unwrap();
    assert_eq!(titles(&app.snippets), ["Project Alpha Figma Link", "React useEffect Hook"]);

    let change = app.state.toggle_tag("react");
    app.apply(change).await.unwrap();
    assert_eq!(titles(&app.snippets), ["React useEffect Hook"]);

    let change = app.state.clear_category();
    app.apply(change).await.unwrap();
    assert_eq!(
      titles(&app.snippets),
      ["React useEffect Hook", "Production API Key"]
    );
  }

  #[tokio::test]
  async fn search_waits_for_debounce() {
    let mut app = app().await;
    app.screen = Screen::Search;
    for c in "figma".chars() {
      app.handle_key(key(KeyCode::Char(c))).await;
    }
    assert_eq!(app.state.search, "figma");
    assert_eq!(app.snippets.len(), 4);

    app.tick(Instant::now()).await;
    assert_eq!(app.snippets.len(), 4);

    app.tick(Instant::now() + SEARCH_DEBOUNCE + Duration::from_millis(10)).await;
    assert_eq!(titles(&app.snippets), ["Project Alpha Figma Link"]);
  }

  #[tokio::test]
  async fn enter_in_search_fetches_immediately() {
    let mut app = app().await;
    app.handle_key(key(KeyCode::Char('/'))).await;
    for c in "STANDUP".chars() {
      app.handle_key(key(KeyCode::Char(c))).await;
    }
    app.handle_key(key(KeyCode::Enter)).await;
    assert_eq!(app.screen, Screen::List);
    assert!(!app.search_debounce.is_pending());
    assert_eq!(titles(&app.snippets), ["Daily Standup Template"]);
  }

  #[tokio::test]
  async fn mutations_refresh_list_and_meta() {
    let mut app = app().await;
    let created = app
      .save(
        FormMode::Create,
        SnippetFields::new("Deploy", "make deploy")
          .with_category("Ops")
          .with_tags("shell"),
      )
      .await
      .unwrap();
    assert_eq!(app.snippets[0].id, created.id);
    assert_eq!(app.meta.categories, ["Dev", "Ops", "Work"]);
    assert!(app.meta.tags.contains(&"shell".to_string()));

    app.delete(created.id).await.unwrap();
    assert_eq!(app.snippets.len(), 4);
    assert_eq!(app.meta.categories, ["Dev", "Work"]);
    assert!(!app.meta.tags.contains(&"shell".to_string()));
  }

  #[tokio::test]
  async fn pin_toggles_and_floats_to_top() {
    let mut app = app().await;
    let id = id_of(&app, "Daily Standup Template");

    assert!(app.toggle_pin(id).await.unwrap());
    assert_eq!(app.snippets[0].id, id);
    assert!(app.snippets[0].pinned);

    assert!(!app.toggle_pin(id).await.unwrap());
    assert!(app.snippets.iter().all(|s| !s.pinned));
  }

  #[tokio::test]
  async fn most_used_reflects_usage_after_refetch() {
    let mut app = app().await;
    let change = app.state.set_sort(SortOrder::MostUsed);
    app.apply(change).await.unwrap();

    let id = id_of(&app, "Daily Standup Template");
    app.mark_used(id).await.unwrap();
    assert_eq!(app.snippets[0].id, id);
    assert!(app.snippets[0].last_copied.is_some());
  }

  #[tokio::test]
  async fn view_toggle_does_not_refetch() {
    let mut app = app().await;
    app.handle_key(key(KeyCode::Char('v'))).await;
    assert_eq!(app.state.view, ViewMode::Grid);
    assert_eq!(app.snippets.len(), 4);
  }

  #[tokio::test]
  async fn dashboard_tracks_mutations_regardless_of_filters() {
    let mut app = app().await;
    let change = app.state.toggle_category("Work");
    app.apply(change).await.unwrap();
    assert_eq!(app.snippets.len(), 2);

    app.handle_key(key(KeyCode::Char('D'))).await;
    assert_eq!(app.screen, Screen::Dashboard);
    assert_eq!(app.dashboard.as_ref().map(Vec::len), Some(4));

    let id = app.dashboard_snippet().unwrap().id;
    app.handle_key(key(KeyCode::Char('d'))).await;
    assert_eq!(app.screen, Screen::ConfirmDelete);
    app.handle_key(key(KeyCode::Char('y'))).await;
    assert_eq!(app.screen, Screen::Dashboard);
    let rows = app.dashboard.as_ref().unwrap();
    assert_eq!(rows.len(), 3);
    assert!(rows.iter().all(|s| s.id != id));

    app.handle_key(key(KeyCode::Esc)).await;
    assert_eq!(app.dashboard, None);
  }

  #[tokio::test]
  async fn failed_mutation_keeps_last_view() {
    let mut app = app().await;
    let before = app.snippets.clone();
    assert!(app.delete(9_999).await.is_err());
    assert_eq!(app.snippets, before);

    app.pending_delete = Some((9_999, Screen::List));
    app.screen = Screen::ConfirmDelete;
    assert!(app.handle_key(key(KeyCode::Char('y'))).await);
    assert!(app.status_msg.starts_with("Error:"));
    assert!(app.status_msg.contains("not found"));
    assert_eq!(app.snippets, before);
  }

  #[tokio::test]
  async fn form_submit_creates_snippet() {
    let mut app = app().await;
    app.handle_key(key(KeyCode::Char('n'))).await;
    assert_eq!(app.screen, Screen::Form);
    for c in "Hello".chars() {
      app.handle_key(key(KeyCode::Char(c))).await;
    }
    app.handle_key(key(KeyCode::Tab)).await;
    for c in "world".chars() {
      app.handle_key(key(KeyCode::Char(c))).await;
    }
    app
      .handle_key(KeyEvent::new(KeyCode::Char('s'), KeyModifiers::CONTROL))
      .await;
    assert_eq!(app.screen, Screen::List);
    assert!(app.form.is_none());
    assert_eq!(app.snippets[0].title, "Hello");
    assert_eq!(app.snippets[0].category, None);
  }

  #[tokio::test]
  async fn export_writes_document() {
    let mut app = app().await;
    let path = std::env::temp_dir().join(format!(
      "copypastor-export-{}.json",
      std::process::id()
    ));
    app.export_path = path.clone();
    app.export().await.unwrap();

    let raw = std::fs::read_to_string(&path).unwrap();
    let exported: Vec<Snippet> = serde_json::from_str(&raw).unwrap();
    assert_eq!(exported.len(), 4);
    std::fs::remove_file(path).ok();
  }

  #[tokio::test]
  async fn copy_first_puts_content_on_clipboard_then_marks_used() {
    let recorded = Recorded::default();
    let mut app = app_with(Some(Box::new(recorded.clone()))).await;
    app.list_cursor = 2;
    let first = app.snippets[0].clone();
    assert_eq!(first.last_copied, None);

    app.handle_key(key(KeyCode::Char('Y'))).await;

    assert_eq!(*recorded.0.lock().unwrap(), [first.content.clone()]);
    let after = app.snippets.iter().find(|s| s.id == first.id).unwrap();
    assert!(after.last_copied.is_some());
    assert_eq!(app.status_msg, format!("Copied \"{}\"", first.title));
    assert_eq!(app.list_cursor, 2);
  }

  #[tokio::test]
  async fn enter_copies_the_snippet_under_the_cursor() {
    let recorded = Recorded::default();
    let mut app = app_with(Some(Box::new(recorded.clone()))).await;
    app.handle_key(key(KeyCode::Char('j'))).await;
    let target = app.snippets[1].clone();

    app.handle_key(key(KeyCode::Enter)).await;

    assert_eq!(*recorded.0.lock().unwrap(), [target.content.clone()]);
    let used: Vec<SnippetId> = app
      .snippets
      .iter()
      .filter(|s| s.last_copied.is_some())
      .map(|s| s.id)
      .collect();
    assert_eq!(used, [target.id]);
  }

  #[tokio::test]
  async fn copy_without_clipboard_reports_and_sends_no_usage() {
    let mut app = app().await;
    app.handle_key(key(KeyCode::Char('y'))).await;

    assert!(app.status_msg.starts_with("Error:"));
    assert!(app.status_msg.contains("clipboard"));
    app.refresh_list().await.unwrap();
    assert!(app.snippets.iter().all(|s| s.last_copied.is_none()));
  }
}
