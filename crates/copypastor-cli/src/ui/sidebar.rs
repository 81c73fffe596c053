//! Filter pane: "All Snippets", categories, then tags.

use ratatui::{
  Frame,
  layout::Rect,
  style::{Color, Modifier, Style},
  text::{Line, Span},
  widgets::{Block, Borders, List, ListItem, ListState},
};

use crate::{
  app::{App, Screen},
  render::{self, SidebarItem},
};

pub fn draw(f: &mut Frame, area: Rect, app: &App) {
  let focused = app.screen == Screen::Sidebar;
  let block = Block::default()
    .title(" Filters ")
    .borders(Borders::ALL)
    .border_style(Style::default().fg(if focused { Color::Cyan } else { Color::DarkGray }));

  let entries = render::sidebar_model(&app.state, &app.meta);
  let mut items = Vec::with_capacity(entries.len() + 2);
  let mut last_kind = "";
  for entry in &entries {
    let kind = match entry.item {
      SidebarItem::AllSnippets => "",
      SidebarItem::Category(_) => "Categories",
      SidebarItem::Tag(_) => "Tags",
    };
    if kind != last_kind {
      items.push(ListItem::new(Line::from(Span::styled(
        kind,
        Style::default().fg(Color::DarkGray).add_modifier(Modifier::BOLD),
      ))));
      last_kind = kind;
    }

    let marker = if entry.active { "● " } else { "  " };
    let style = if entry.active {
      Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD)
    } else {
      Style::default()
    };
    items.push(ListItem::new(Line::from(vec![
      Span::styled(marker, style),
      Span::styled(entry.label.clone(), style),
    ])));
  }

  // Section headings occupy rows too; map the cursor onto the item index.
  let selected = focused.then(|| {
    let headings = entries
      .iter()
      .take(app.sidebar_cursor + 1)
      .map(|e| match e.item {
        SidebarItem::AllSnippets => 0,
        SidebarItem::Category(_) => 1,
        SidebarItem::Tag(_) => 2,
      })
      .collect::<std::collections::BTreeSet<_>>()
      .iter()
      .filter(|k| **k != 0)
      .count();
    app.sidebar_cursor + headings
  });

  let mut state = ListState::default();
  state.select(selected);

  f.render_stateful_widget(
    List::new(items)
      .block(block)
      .highlight_style(Style::default().bg(Color::Blue).fg(Color::White)),
    area,
    &mut state,
  );
}
