//! Management table of every snippet, independent of the active filters.

use ratatui::{
  Frame,
  layout::{Constraint, Rect},
  style::{Color, Modifier, Style},
  widgets::{Block, Borders, Row, Table, TableState},
};

use crate::{app::App, render};

pub fn draw(f: &mut Frame, area: Rect, app: &App) {
  let rows = render::dashboard_rows(app.dashboard.as_deref().unwrap_or_default());

  let block = Block::default()
    .title(format!(" Dashboard ({}) ", rows.len()))
    .borders(Borders::ALL)
    .border_style(Style::default().fg(Color::Cyan));

  let header = Row::new(["ID", "Title", "Category", "Last used"])
    .style(Style::default().fg(Color::DarkGray).add_modifier(Modifier::BOLD));

  let body = rows.into_iter().map(|row| {
    Row::new([
      row.id.to_string(),
      row.title,
      row.category,
      row.last_used,
    ])
  });

  let table = Table::new(
    body,
    [
      Constraint::Length(6),
      Constraint::Percentage(50),
      Constraint::Percentage(25),
      Constraint::Length(12),
    ],
  )
  .header(header)
  .block(block)
  .row_highlight_style(Style::default().bg(Color::Blue).fg(Color::White));

  let mut state = TableState::default();
  state.select(Some(app.dashboard_cursor));
  f.render_stateful_widget(table, area, &mut state);
}
