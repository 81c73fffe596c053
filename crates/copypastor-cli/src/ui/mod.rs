//! TUI rendering: orchestrates all panes.

pub mod dashboard;
pub mod form;
pub mod sidebar;
pub mod snippet_list;

use chrono::Local;
use ratatui::{
  Frame,
  layout::{Constraint, Direction, Flex, Layout, Rect},
  style::{Color, Modifier, Style},
  text::{Line, Span},
  widgets::{Block, Borders, Clear, Paragraph},
};

use crate::{
  app::{App, Screen},
  state::ViewMode,
};

// ─── Root draw ────────────────────────────────────────────────────────────────

/// Main draw function called each frame.
pub fn draw(f: &mut Frame, app: &App) {
  let area = f.area();

  let rows = Layout::default()
    .direction(Direction::Vertical)
    .constraints([
      Constraint::Length(1), // header
      Constraint::Length(3), // search box
      Constraint::Min(0),    // body
      Constraint::Length(1), // status bar
    ])
    .split(area);

  draw_header(f, rows[0], app);
  draw_search(f, rows[1], app);
  draw_body(f, rows[2], app);
  draw_status(f, rows[3], app);

  match app.screen {
    Screen::Form => {
      if let Some(form) = &app.form {
        form::draw(f, centered(area, 70, 80), form);
      }
    }
    Screen::ConfirmDelete => draw_confirm(f, centered(area, 40, 20), app),
    _ => {}
  }
}

// ─── Header ───────────────────────────────────────────────────────────────────

fn draw_header(f: &mut Frame, area: Rect, app: &App) {
  let date = Local::now().format("%Y-%m-%d").to_string();
  let view = match app.state.view {
    ViewMode::List => "list",
    ViewMode::Grid => "grid",
  };

  let left = Span::styled(
    format!(" copypastor  sort: {}  view: {view}", app.state.sort.as_str()),
    Style::default().fg(Color::White).add_modifier(Modifier::BOLD),
  );
  let right = Span::styled(format!("{date} "), Style::default().fg(Color::DarkGray));

  let pad = area
    .width
    .saturating_sub(left.content.len() as u16)
    .saturating_sub(right.content.len() as u16);

  let line = Line::from(vec![left, Span::raw(" ".repeat(pad as usize)), right]);
  f.render_widget(
    Paragraph::new(line).style(Style::default().bg(Color::DarkGray)),
    area,
  );
}

// ─── Search ───────────────────────────────────────────────────────────────────

fn draw_search(f: &mut Frame, area: Rect, app: &App) {
  let active = app.screen == Screen::Search;
  let border = if active { Color::Yellow } else { Color::DarkGray };
  let block = Block::default()
    .title(" Search ")
    .borders(Borders::ALL)
    .border_style(Style::default().fg(border));

  let text = if active {
    format!("{}_", app.state.search)
  } else if app.state.search.is_empty() {
    "press / to search titles, tags, and content".into()
  } else {
    app.state.search.clone()
  };
  let style = if active || !app.state.search.is_empty() {
    Style::default().fg(Color::Yellow)
  } else {
    Style::default().fg(Color::DarkGray)
  };
  f.render_widget(Paragraph::new(text).style(style).block(block), area);
}

// ─── Body ─────────────────────────────────────────────────────────────────────

fn draw_body(f: &mut Frame, area: Rect, app: &App) {
  let cols = Layout::default()
    .direction(Direction::Horizontal)
    .constraints([Constraint::Percentage(25), Constraint::Percentage(75)])
    .split(area);

  sidebar::draw(f, cols[0], app);

  if app.dashboard.is_some() {
    dashboard::draw(f, cols[1], app);
  } else {
    snippet_list::draw(f, cols[1], app);
  }
}

// ─── Modals ───────────────────────────────────────────────────────────────────

fn centered(area: Rect, percent_x: u16, percent_y: u16) -> Rect {
  let [area] = Layout::vertical([Constraint::Percentage(percent_y)])
    .flex(Flex::Center)
    .areas(area);
  let [area] = Layout::horizontal([Constraint::Percentage(percent_x)])
    .flex(Flex::Center)
    .areas(area);
  area
}

fn draw_confirm(f: &mut Frame, area: Rect, app: &App) {
  let title = app
    .pending_delete
    .and_then(|(id, _)| {
      app
        .snippets
        .iter()
        .chain(app.dashboard.iter().flatten())
        .find(|s| s.id == id)
    })
    .map(|s| s.title.as_str())
    .unwrap_or("this snippet");

  let block = Block::default()
    .title(" Delete ")
    .borders(Borders::ALL)
    .border_style(Style::default().fg(Color::Red));
  let text = vec![
    Line::from(format!("Delete \"{title}\"?")),
    Line::from(""),
    Line::from(Span::styled(
      "y confirm  any other key cancels",
      Style::default().fg(Color::DarkGray),
    )),
  ];
  f.render_widget(Clear, area);
  f.render_widget(Paragraph::new(text).block(block), area);
}

// ─── Status bar ───────────────────────────────────────────────────────────────

fn draw_status(f: &mut Frame, area: Rect, app: &App) {
  let (mode_label, hints) = match app.screen {
    Screen::List => (
      "NORMAL",
      "jk move  Enter copy  Y copy top  / search  Tab filters  s sort  v view  n new  e edit  p pin  d delete  D dashboard  x export  q quit",
    ),
    Screen::Sidebar => ("FILTER", "jk move  Enter toggle  Tab back"),
    Screen::Search => ("SEARCH", "Type to search  Enter done  Esc clear"),
    Screen::Form => ("EDIT", "Tab next field  Enter newline in content  Ctrl-S save  Esc cancel"),
    Screen::Dashboard => ("DASHBOARD", "jk move  e edit  p pin  d delete  Esc close"),
    Screen::ConfirmDelete => ("CONFIRM", "y delete  any other key cancels"),
  };

  let status = if app.status_msg.is_empty() {
    hints.to_string()
  } else {
    app.status_msg.clone()
  };

  let mode_span = Span::styled(
    format!(" {mode_label} "),
    Style::default()
      .fg(Color::Black)
      .bg(Color::Cyan)
      .add_modifier(Modifier::BOLD),
  );
  let hint_span = Span::styled(format!("  {status}"), Style::default().fg(Color::DarkGray));

  f.render_widget(
    Paragraph::new(Line::from(vec![mode_span, hint_span]))
      .style(Style::default().bg(Color::Black)),
    area,
  );
}
