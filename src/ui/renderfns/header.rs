use ratatui::prelude::*;
use ratatui::widgets::Paragraph;

/// Draw the header bar with site title, origin and navigation shortcuts
pub fn draw_header(frame: &mut Frame, area: Rect, title: &str, origin: &str, portfolio: Option<usize>) {
  let mut spans = vec![
    Span::styled(format!(" {} ", title), Style::default().fg(Color::Cyan).bold()),
    Span::styled("│", Style::default().fg(Color::DarkGray)),
    Span::styled(
      format!(" {} ", extract_domain(origin)),
      Style::default().fg(Color::White),
    ),
  ];

  if let Some(count) = portfolio {
    spans.push(Span::styled("│", Style::default().fg(Color::DarkGray)));
    spans.push(Span::styled(
      format!(" {} works ", count),
      Style::default().fg(Color::Yellow),
    ));
  }

  spans.push(Span::raw("  "));
  for (key, label) in [(":", "go to"), ("j/k", "nav"), ("q", "back")] {
    spans.push(Span::styled(format!("<{}>", key), Style::default().fg(Color::Cyan)));
    spans.push(Span::styled(format!(" {}   ", label), Style::default().fg(Color::DarkGray)));
  }

  let paragraph = Paragraph::new(Line::from(spans)).style(Style::default().bg(Color::Black));
  frame.render_widget(paragraph, area);
}

/// Extract the host part of an origin URL
pub fn extract_domain(url: &str) -> &str {
  let host = url
    .strip_prefix("https://")
    .or_else(|| url.strip_prefix("http://"))
    .unwrap_or(url);
  host.split('/').next().unwrap_or(host)
}
