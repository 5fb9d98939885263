use ratatui::prelude::*;
use ratatui::widgets::{Block, Borders, Paragraph};

/// Catch-all error page for paths no route matches
pub fn draw_not_found(frame: &mut Frame, area: Rect, path: &str) {
  let block = Block::default()
    .title(" Not found ")
    .title_alignment(Alignment::Center)
    .borders(Borders::ALL)
    .border_style(Style::default().fg(Color::Red));

  let text = vec![
    Line::styled(format!("Nothing lives at {}", path), Style::default().fg(Color::Red)),
    Line::raw(""),
    Line::styled(
      "Press q to go back or : to pick a page.",
      Style::default().fg(Color::DarkGray),
    ),
  ];

  frame.render_widget(Paragraph::new(text).block(block), area);
}
