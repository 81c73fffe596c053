//! Create/edit form for a single snippet.

use copypastor_core::snippet::{Snippet, SnippetFields, SnippetId};
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormMode {
  Create,
  Edit(SnippetId),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Field {
  #[default]
  Title,
  Content,
  Category,
  Tags,
}

impl Field {
  pub const ALL: [Field; 4] = [Field::Title, Field::Content, Field::Category, Field::Tags];

  pub fn label(self) -> &'static str {
    match self {
      Field::Title => "Title",
      Field::Content => "Content",
      Field::Category => "Category",
      Field::Tags => "Tags",
    }
  }

  fn next(self) -> Self {
    match self {
      Field::Title => Field::Content,
      Field::Content => Field::Category,
      Field::Category => Field::Tags,
      Field::Tags => Field::Title,
    }
  }

  fn prev(self) -> Self {
    match self {
      Field::Title => Field::Tags,
      Field::Content => Field::Title,
      Field::Category => Field::Content,
      Field::Tags => Field::Category,
    }
  }
}

/// What the form wants the app to do after a key press.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FormOutcome {
  Editing,
  Cancel,
  Submit(SnippetFields),
}

#[derive(Debug, Clone)]
pub struct Form {
  pub mode:     FormMode,
  pub title:    String,
  pub content:  String,
  pub category: String,
  pub tags:     String,
  pub focus:    Field,
  /// Validation message from the last submit attempt.
  pub error:    Option<String>,
}

impl Form {
  pub fn create() -> Self {
    Self {
      mode:     FormMode::Create,
      title:    String::new(),
      content:  String::new(),
      category: String::new(),
      tags:     String::new(),
      focus:    Field::default(),
      error:    None,
    }
  }

  /// A form pre-filled from `snippet`.
  pub fn edit(snippet: &Snippet) -> Self {
    Self {
      mode:     FormMode::Edit(snippet.id),
      title:    snippet.title.clone(),
      content:  snippet.content.clone(),
      category: snippet.category.clone().unwrap_or_default(),
      tags:     snippet.tags.clone().unwrap_or_default(),
      focus:    Field::default(),
      error:    None,
    }
  }

  pub fn value(&self, field: Field) -> &str {
    match field {
      Field::Title => &self.title,
      Field::Content => &self.content,
      Field::Category => &self.category,
      Field::Tags => &self.tags,
    }
  }

  fn focused_mut(&mut self) -> &mut String {
    match self.focus {
      Field::Title => &mut self.title,
      Field::Content => &mut self.content,
      Field::Category => &mut self.category,
      Field::Tags => &mut self.tags,
    }
  }

  /// Validate the form as the server would. A failure is kept on the form
  /// and nothing is submitted.
  pub fn submit(&mut self) -> FormOutcome {
    let parsed = SnippetFields::parse(
      Some(self.title.clone()),
      Some(self.content.clone()),
      Some(self.category.clone()),
      Some(self.tags.clone()),
    );
    match parsed {
      Ok(fields) => {
        self.error = None;
        FormOutcome::Submit(fields)
      }
      Err(e) => {
        self.error = Some(e.to_string());
        FormOutcome::Editing
      }
    }
  }

  pub fn handle_key(&mut self, key: KeyEvent) -> FormOutcome {
    let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
    match key.code {
      KeyCode::Esc => return FormOutcome::Cancel,
      KeyCode::Char('s') if ctrl => return self.submit(),
      KeyCode::Tab | KeyCode::Down => self.focus = self.focus.next(),
      KeyCode::BackTab | KeyCode::Up => self.focus = self.focus.prev(),
      // Content is multi-line; every other field submits on Enter.
      KeyCode::Enter if self.focus == Field::Content => self.content.push('\n'),
      KeyCode::Enter => return self.submit(),
      KeyCode::Backspace => {
        self.focused_mut().pop();
      }
      KeyCode::Char(c) if !ctrl => self.focused_mut().push(c),
      _ => {}
    }
    FormOutcome::Editing
  }
}
