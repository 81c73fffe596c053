//! Create/edit modal.

use ratatui::{
  Frame,
  layout::{Constraint, Layout, Rect},
  style::{Color, Modifier, Style},
  text::Line,
  widgets::{Block, Borders, Clear, Paragraph, Wrap},
};

use crate::form::{Field, Form, FormMode};

pub fn draw(f: &mut Frame, area: Rect, form: &Form) {
  let title = match form.mode {
    FormMode::Create => " New snippet ".to_string(),
    FormMode::Edit(id) => format!(" Edit snippet {id} "),
  };
  let block = Block::default()
    .title(title)
    .borders(Borders::ALL)
    .border_style(Style::default().fg(Color::Cyan));
  let inner = block.inner(area);
  f.render_widget(Clear, area);
  f.render_widget(block, area);

  let [title_area, content_area, category_area, tags_area, error_area] = Layout::vertical([
    Constraint::Length(3),
    Constraint::Min(5),
    Constraint::Length(3),
    Constraint::Length(3),
    Constraint::Length(1),
  ])
  .areas(inner);

  for (field, area) in Field::ALL
    .into_iter()
    .zip([title_area, content_area, category_area, tags_area])
  {
    draw_field(f, area, form, field);
  }

  if let Some(error) = &form.error {
    f.render_widget(
      Paragraph::new(error.as_str()).style(Style::default().fg(Color::Red)),
      error_area,
    );
  }
}

fn draw_field(f: &mut Frame, area: Rect, form: &Form, field: Field) {
  let focused = form.focus == field;
  let border = if focused {
    Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD)
  } else {
    Style::default().fg(Color::DarkGray)
  };
  let block = Block::default()
    .title(format!(" {} ", field.label()))
    .borders(Borders::ALL)
    .border_style(border);

  let mut lines: Vec<Line> = form.value(field).split('\n').map(Line::raw).collect();
  if focused {
    if let Some(last) = lines.last_mut() {
      last.push_span("_");
    }
  }

  f.render_widget(
    Paragraph::new(lines).block(block).wrap(Wrap { trim: false }),
    area,
  );
}
