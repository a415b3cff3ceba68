//! Person card: right panel, styled like a sticky note.

use potluck_core::person::Person;
use ratatui::{
  Frame,
  layout::Rect,
  style::{Color, Modifier, Style},
  text::{Line, Span},
  widgets::{Block, Borders, Paragraph, Wrap},
};

use crate::board::palette_index;

/// Sticky-note colours: yellow, pink, blue, green, purple, orange.
const PALETTE: [Color; 6] = [
  Color::Rgb(254, 240, 138),
  Color::Rgb(251, 207, 232),
  Color::Rgb(191, 219, 254),
  Color::Rgb(187, 247, 208),
  Color::Rgb(233, 213, 255),
  Color::Rgb(254, 215, 170),
];

/// Render `person` (or a hint when nothing is selected) into `area`.
pub fn draw(f: &mut Frame, area: Rect, person: Option<&Person>) {
  let Some(person) = person else {
    let block = Block::default()
      .title(" Card ")
      .borders(Borders::ALL)
      .border_style(Style::default().fg(Color::DarkGray));
    let inner = block.inner(area);
    f.render_widget(block, area);
    f.render_widget(
      Paragraph::new("Press [a] to add yourself to the list.")
        .style(Style::default().fg(Color::DarkGray)),
      inner,
    );
    return;
  };

  let note = Style::default()
    .bg(PALETTE[palette_index(&person.name)])
    .fg(Color::Black);

  let block = Block::default()
    .title(format!(" 📌 {} ", person.name))
    .borders(Borders::ALL)
    .style(note);
  let inner = block.inner(area);
  f.render_widget(block, area);

  let label = Style::default().add_modifier(Modifier::BOLD);
  let row = |icon: &str, name: &str, value: &Option<String>| {
    Line::from(vec![
      Span::styled(format!("{icon} {name:<9}"), label),
      Span::raw(value.as_deref().unwrap_or("-").to_owned()),
    ])
  };

  let lines = vec![
    Line::from(""),
    row("🍽️", "Food:", &person.food),
    row("🥤", "Drink:", &person.drink),
    row("🍰", "Dessert:", &person.dessert),
    Line::from(""),
    Line::from(Span::styled(
      format!("updated {}", person.updated_at.format("%Y-%m-%d %H:%M")),
      Style::default().fg(Color::DarkGray),
    )),
  ];

  f.render_widget(Paragraph::new(lines).wrap(Wrap { trim: false }), inner);
}
