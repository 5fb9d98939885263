use crate::shell::SiteData;
use crate::ui::renderfns::plain_text;
use ratatui::prelude::*;
use ratatui::widgets::{Block, Borders, Paragraph, Wrap};

/// Front page: the text fields of the ACF options
pub fn draw_home(frame: &mut Frame, area: Rect, data: &SiteData, scroll: u16) {
  let block = Block::default()
    .title(" Home ")
    .title_alignment(Alignment::Center)
    .borders(Borders::ALL)
    .border_style(Style::default().fg(Color::Blue));

  let blocks = data.acf().text_blocks();
  if blocks.is_empty() {
    let paragraph = Paragraph::new("Nothing to show yet. Try :portfolio or :about.")
      .block(block)
      .style(Style::default().fg(Color::DarkGray));
    frame.render_widget(paragraph, area);
    return;
  }

  let mut lines = Vec::new();
  for (i, text) in blocks.iter().enumerate() {
    if i > 0 {
      lines.push(Line::raw(""));
    }
    let style = if i == 0 {
      Style::default().fg(Color::Yellow).bold()
    } else {
      Style::default()
    };
    lines.extend(
      plain_text(text)
        .lines()
        .map(|line| Line::styled(line.to_string(), style)),
    );
  }

  let paragraph = Paragraph::new(lines)
    .block(block)
    .wrap(Wrap { trim: true })
    .scroll((scroll, 0));
  frame.render_widget(paragraph, area);
}
