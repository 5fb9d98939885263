use crate::shell::SiteData;
use crate::ui::renderfns::{plain_text, truncate};
use ratatui::prelude::*;
use ratatui::widgets::{Block, Borders, List, ListItem, ListState, Paragraph};

pub fn draw_portfolio_list(frame: &mut Frame, area: Rect, data: &SiteData, selected: usize) {
  let items = data.portfolio();

  let block = Block::default()
    .title(format!(" Portfolio ({}) ", items.len()))
    .title_alignment(Alignment::Center)
    .borders(Borders::ALL)
    .border_style(Style::default().fg(Color::Blue));

  if items.is_empty() {
    let paragraph = Paragraph::new("No portfolio entries found.")
      .block(block)
      .style(Style::default().fg(Color::DarkGray));
    frame.render_widget(paragraph, area);
    return;
  }

  let rows: Vec<ListItem> = items
    .iter()
    .map(|item| {
      let title = plain_text(&item.title);
      let title = if title.is_empty() { item.slug.clone() } else { title };
      let excerpt = plain_text(&item.excerpt).replace('\n', " ");

      let line = Line::from(vec![
        Span::styled(
          format!("{:<32}", truncate(&title, 32)),
          Style::default().fg(Color::Cyan),
        ),
        Span::raw(" "),
        Span::styled(
          format!("{:<10}", date_part(&item.date)),
          Style::default().fg(Color::DarkGray),
        ),
        Span::raw(" "),
        Span::raw(truncate(&excerpt, 60)),
      ]);
      ListItem::new(line)
    })
    .collect();

  let list = List::new(rows)
    .block(block)
    .highlight_style(
      Style::default()
        .bg(Color::DarkGray)
        .add_modifier(Modifier::BOLD),
    )
    .highlight_symbol("> ");

  let mut state = ListState::default();
  state.select(Some(selected.min(items.len() - 1)));

  frame.render_stateful_widget(list, area, &mut state);
}

/// `2021-05-01T10:00:00` → `2021-05-01`
pub fn date_part(date: &str) -> &str {
  date.split('T').next().unwrap_or(date)
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn test_date_part() {
    assert_eq!(date_part("2021-05-01T10:00:00"), "2021-05-01");
    assert_eq!(date_part(""), "");
  }
}
