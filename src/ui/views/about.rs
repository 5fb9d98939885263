use crate::shell::SiteData;
use crate::ui::renderfns::plain_text;
use ratatui::prelude::*;
use ratatui::widgets::{Block, Borders, Paragraph, Wrap};

/// Slug of the page shown on the about route
const ABOUT_SLUG: &str = "about";

pub fn draw_about(frame: &mut Frame, area: Rect, data: &SiteData, scroll: u16) {
  let page = data.page(ABOUT_SLUG);

  let title = match &page {
    Some(page) => format!(" {} ", plain_text(&page.title)),
    None => " About ".to_string(),
  };

  let block = Block::default()
    .title(title)
    .title_alignment(Alignment::Center)
    .borders(Borders::ALL)
    .border_style(Style::default().fg(Color::Blue));

  let (text, style) = match &page {
    Some(page) => (plain_text(&page.content), Style::default()),
    None => (
      "No page with slug \"about\" was published.".to_string(),
      Style::default().fg(Color::DarkGray),
    ),
  };

  let paragraph = Paragraph::new(text)
    .block(block)
    .style(style)
    .wrap(Wrap { trim: true })
    .scroll((scroll, 0));
  frame.render_widget(paragraph, area);
}
