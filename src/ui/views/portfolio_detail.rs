use crate::ui::renderfns::plain_text;
use crate::ui::views::portfolio_list::date_part;
use crate::wp::types::PortfolioItem;
use ratatui::prelude::*;
use ratatui::widgets::{Block, Borders, Paragraph, Wrap};
use serde_json::Value;

/// Single portfolio entry
pub fn draw_portfolio_detail(frame: &mut Frame, area: Rect, item: &PortfolioItem, scroll: u16) {
  let title = plain_text(&item.title);
  let block = Block::default()
    .title(format!(" {} ", if title.is_empty() { &item.slug } else { &title }))
    .title_alignment(Alignment::Center)
    .borders(Borders::ALL)
    .border_style(Style::default().fg(Color::Blue));

  let inner = block.inner(area);
  frame.render_widget(block, area);

  let fields = custom_fields(&item.acf);
  let chunks = Layout::default()
    .direction(Direction::Vertical)
    .constraints([
      Constraint::Length(1 + fields.len() as u16), // Date and custom fields
      Constraint::Length(1),                       // Separator
      Constraint::Min(1),                          // Content
    ])
    .split(inner);

  let mut header = vec![Line::from(vec![
    Span::styled("Date: ", Style::default().fg(Color::DarkGray)),
    Span::raw(date_part(&item.date).to_string()),
  ])];
  for (name, value) in fields {
    header.push(Line::from(vec![
      Span::styled(format!("{}: ", name), Style::default().fg(Color::DarkGray)),
      Span::styled(value, Style::default().fg(Color::Yellow)),
    ]));
  }
  frame.render_widget(Paragraph::new(header), chunks[0]);

  let sep = Paragraph::new("─".repeat(chunks[1].width as usize))
    .style(Style::default().fg(Color::DarkGray));
  frame.render_widget(sep, chunks[1]);

  let body = match plain_text(&item.content) {
    content if content.is_empty() => plain_text(&item.excerpt),
    content => content,
  };
  let content = Paragraph::new(body)
    .wrap(Wrap { trim: true })
    .scroll((scroll, 0));
  frame.render_widget(content, chunks[2]);
}

/// Top-level string fields of the per-item ACF object, for the header block
fn custom_fields(acf: &Value) -> Vec<(String, String)> {
  acf
    .as_object()
    .map(|fields| {
      fields
        .iter()
        .filter_map(|(name, value)| {
          let text = plain_text(value.as_str()?);
          (!text.is_empty()).then(|| (name.replace('_', " "), text))
        })
        .collect()
    })
    .unwrap_or_default()
}
