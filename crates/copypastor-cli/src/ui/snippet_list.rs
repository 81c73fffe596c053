//! Snippet pane in list or grid layout.

use chrono::Utc;
use ratatui::{
  Frame,
  layout::{Constraint, Layout, Rect},
  style::{Color, Modifier, Style},
  text::{Line, Span},
  widgets::{Block, Borders, Paragraph, Wrap},
};

use crate::{
  app::{App, Screen},
  render::{self, Body, Card},
  state::ViewMode,
};

const GRID_COLUMNS: usize = 3;
const LIST_CARD_HEIGHT: u16 = 6;
const GRID_CARD_HEIGHT: u16 = 9;

pub fn draw(f: &mut Frame, area: Rect, app: &App) {
  let model = render::list_model(&app.state, &app.snippets, Utc::now());

  let focused = matches!(app.screen, Screen::List | Screen::Search);
  let block = Block::default()
    .title(format!(" Snippets ({}) ", model.cards.len()))
    .borders(Borders::ALL)
    .border_style(Style::default().fg(if focused { Color::Cyan } else { Color::DarkGray }));
  let inner = block.inner(area);
  f.render_widget(block, area);

  if let Some(message) = model.empty_message() {
    f.render_widget(
      Paragraph::new(message).style(Style::default().fg(Color::DarkGray)),
      inner,
    );
    return;
  }

  let (columns, height) = match model.view {
    ViewMode::List => (1, LIST_CARD_HEIGHT),
    ViewMode::Grid => (GRID_COLUMNS, GRID_CARD_HEIGHT),
  };

  // Scroll whole rows so the cursor stays visible.
  let visible_rows = (inner.height / height).max(1) as usize;
  let cursor_row = app.list_cursor / columns;
  let first_row = cursor_row.saturating_sub(visible_rows - 1);

  let rows = Layout::vertical(vec![Constraint::Length(height); visible_rows]).split(inner);
  for (r, row_area) in rows.iter().enumerate() {
    let cells = Layout::horizontal(vec![Constraint::Ratio(1, columns as u32); columns])
      .split(*row_area);
    for (c, cell) in cells.iter().enumerate() {
      let index = (first_row + r) * columns + c;
      if let Some(card) = model.cards.get(index) {
        draw_card(f, *cell, card, index == app.list_cursor);
      }
    }
  }
}

fn draw_card(f: &mut Frame, area: Rect, card: &Card, selected: bool) {
  let mut title = vec![Span::styled(
    format!(" {} ", card.title),
    Style::default().add_modifier(Modifier::BOLD),
  )];
  if card.pinned {
    title.insert(0, Span::styled(" 📌", Style::default().fg(Color::Yellow)));
  }

  let border = if selected { Color::Blue } else { Color::DarkGray };
  let block = Block::default()
    .title(Line::from(title))
    .title_bottom(Line::from(Span::styled(
      format!(" {} ", card.footer),
      Style::default().fg(Color::DarkGray),
    )))
    .borders(Borders::ALL)
    .border_style(Style::default().fg(border));

  let mut lines = vec![meta_line(card)];
  lines.extend(body_lines(&card.body));

  f.render_widget(
    Paragraph::new(lines).block(block).wrap(Wrap { trim: false }),
    area,
  );
}

fn meta_line(card: &Card) -> Line<'static> {
  let mut spans = vec![Span::styled(
    card.category.clone(),
    Style::default().fg(Color::Magenta),
  )];
  for tag in &card.tags {
    spans.push(Span::raw(" "));
    spans.push(Span::styled(format!("#{tag}"), Style::default().fg(Color::Cyan)));
  }
  Line::from(spans)
}

fn body_lines(body: &Body) -> Vec<Line<'static>> {
  match body {
    Body::Json(pretty) => pretty
      .lines()
      .map(|l| Line::styled(l.to_owned(), Style::default().fg(Color::Green)))
      .collect(),
    Body::Link(url) => vec![Line::styled(
      url.clone(),
      Style::default().fg(Color::Blue).add_modifier(Modifier::UNDERLINED),
    )],
    Body::Heading { title, rest } => {
      let mut lines = vec![Line::styled(
        title.clone(),
        Style::default().add_modifier(Modifier::BOLD),
      )];
      lines.extend(rest.lines().map(|l| Line::raw(l.to_owned())));
      lines
    }
    Body::Plain(text) => text.lines().map(|l| Line::raw(l.to_owned())).collect(),
  }
}
