//! Add/edit form: a popup drawn over the body.

use ratatui::{
  Frame,
  layout::{Position, Rect},
  style::{Color, Modifier, Style},
  text::{Line, Span},
  widgets::{Block, Borders, Clear, Paragraph},
};

use crate::form::{Form, LABELS};

const WIDTH: u16 = 48;
const LABEL_WIDTH: u16 = 10;

/// Render `form` centred within `area`.
pub fn draw(f: &mut Frame, area: Rect, form: &Form) {
  // Two lines per field plus borders.
  let height = (LABELS.len() as u16) * 2 + 2;
  let popup = Rect {
    x:      area.x + area.width.saturating_sub(WIDTH) / 2,
    y:      area.y + area.height.saturating_sub(height) / 2,
    width:  WIDTH.min(area.width),
    height: height.min(area.height),
  };

  let block = Block::default()
    .title(form.title())
    .borders(Borders::ALL)
    .border_style(Style::default().fg(Color::Cyan));
  let inner = block.inner(popup);
  f.render_widget(Clear, popup);
  f.render_widget(block, popup);

  let mut lines: Vec<Line> = Vec::new();
  for (i, (label, value)) in LABELS.iter().zip(&form.fields).enumerate() {
    let style = if form.is_locked(i) {
      Style::default().fg(Color::DarkGray)
    } else if i == form.focus {
      Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD)
    } else {
      Style::default()
    };
    lines.push(Line::from(vec![
      Span::styled(format!("{:<width$}", format!("{label}:"), width = LABEL_WIDTH as usize), style),
      Span::styled(value.clone(), style),
    ]));
    lines.push(Line::from(""));
  }
  f.render_widget(Paragraph::new(lines), inner);

  // Place the terminal cursor at the end of the focused field.
  let x = inner.x + LABEL_WIDTH + form.fields[form.focus].chars().count() as u16;
  let y = inner.y + (form.focus as u16) * 2;
  if x < inner.right() && y < inner.bottom() {
    f.set_cursor_position(Position::new(x, y));
  }
}
