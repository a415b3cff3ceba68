//! People list pane: left panel.

use ratatui::{
  Frame,
  layout::Rect,
  style::{Color, Modifier, Style},
  text::{Line, Span},
  widgets::{Block, Borders, List, ListItem, ListState, Paragraph},
};

use crate::app::App;

/// Render the filtered list of names into `area`.
pub fn draw(f: &mut Frame, area: Rect, app: &App) {
  let filtered = app.filtered_people();
  let total = app.board.people().len();

  // Title with count.
  let title = if app.filter_active || !app.filter.is_empty() {
    format!(" People ({}/{}) ", filtered.len(), total)
  } else {
    format!(" People ({}) ", total)
  };

  let block = Block::default()
    .title(title)
    .borders(Borders::ALL)
    .border_style(Style::default().fg(Color::DarkGray));

  let mut inner_area = block.inner(area);
  f.render_widget(block, area);

  // Filter bar on the bottom line of the pane.
  if (app.filter_active || !app.filter.is_empty()) && inner_area.height > 2 {
    let filter_area = Rect {
      x:      inner_area.x,
      y:      inner_area.y + inner_area.height - 1,
      width:  inner_area.width,
      height: 1,
    };
    inner_area.height = inner_area.height.saturating_sub(1);

    let filter_text = if app.filter_active {
      format!("/{}_", app.filter)
    } else {
      format!("/{}", app.filter)
    };
    f.render_widget(
      Paragraph::new(filter_text).style(Style::default().fg(Color::Yellow)),
      filter_area,
    );
  }

  if filtered.is_empty() {
    let message = if app.filter.is_empty() {
      "No one has signed up yet."
    } else {
      "No one matches that name."
    };
    f.render_widget(
      Paragraph::new(message).style(Style::default().fg(Color::DarkGray)),
      inner_area,
    );
    return;
  }

  // One line per person: name, then a dot per contribution.
  let items: Vec<ListItem> = filtered
    .iter()
    .map(|person| {
      let count = [&person.food, &person.drink, &person.dessert]
        .into_iter()
        .filter(|v| v.is_some())
        .count();
      ListItem::new(Line::from(vec![
        Span::raw(person.name.clone()),
        Span::styled(format!(" {}", "•".repeat(count)), Style::default().fg(Color::Green)),
      ]))
    })
    .collect();

  let mut state = ListState::default();
  state.select(Some(app.list_cursor));

  f.render_stateful_widget(
    List::new(items)
      .highlight_style(
        Style::default()
          .bg(Color::Blue)
          .fg(Color::White)
          .add_modifier(Modifier::BOLD),
      )
      .highlight_symbol(""),
    inner_area,
    &mut state,
  );
}
