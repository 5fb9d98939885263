mod renderfns;
mod views;

use crate::app::{App, Mode};
use crate::routes::Route;
use crate::shell::{Readiness, Resource, SiteData};
use ratatui::prelude::*;
use ratatui::widgets::{Block, Borders, Paragraph, Wrap};
use renderfns::header::extract_domain;

/// Main draw function
pub fn draw(frame: &mut Frame, app: &App) {
  let chunks = Layout::default()
    .direction(Direction::Vertical)
    .constraints([
      Constraint::Length(1), // Header
      Constraint::Min(1),    // Main content
      Constraint::Length(1), // Breadcrumb
      Constraint::Length(1), // Status bar
    ])
    .split(frame.area());

  let shell = app.shell();
  let data = shell.site_data();

  let title = site_title(app, data);
  let origin = shell.endpoints().origin();
  let portfolio_count = data.map(|d| d.portfolio().len());
  renderfns::draw_header(frame, chunks[0], &title, origin, portfolio_count);

  match shell.readiness() {
    Readiness::Failed(resource) => {
      draw_load_error(frame, chunks[1], resource, shell.error_detail(resource));
    }
    Readiness::Loading => draw_loading(frame, chunks[1]),
    Readiness::Ready => {
      if let Some(data) = data {
        draw_route(frame, chunks[1], app, data);
        renderfns::draw_footer(frame, chunks[2], &app.breadcrumb());
      }
    }
    Readiness::Nothing => {}
  }

  draw_status_bar(frame, chunks[3], app);
}

/// Configured title, then the ACF site title, then the bare domain
fn site_title(app: &App, data: Option<&SiteData>) -> String {
  if let Some(title) = &app.config().title {
    return title.clone();
  }
  data
    .and_then(|d| d.acf().site_title().map(str::to_string))
    .unwrap_or_else(|| extract_domain(app.shell().endpoints().origin()).to_string())
}

fn draw_route(frame: &mut Frame, area: Rect, app: &App, data: &SiteData) {
  match app.current_route() {
    Route::Home => views::home::draw_home(frame, area, data, app.scroll()),
    Route::Portfolio => {
      views::portfolio_list::draw_portfolio_list(frame, area, data, app.portfolio_selected())
    }
    Route::PortfolioSingle(slug) => match data.portfolio_item(slug) {
      Some(item) => {
        views::portfolio_detail::draw_portfolio_detail(frame, area, item, app.scroll())
      }
      None => {
        let path = Route::PortfolioSingle(slug.clone()).path();
        views::not_found::draw_not_found(frame, area, &path)
      }
    },
    Route::About => views::about::draw_about(frame, area, data, app.scroll()),
    Route::NotFound(path) => views::not_found::draw_not_found(frame, area, path),
  }
}

fn draw_loading(frame: &mut Frame, area: Rect) {
  let block = Block::default()
    .borders(Borders::ALL)
    .border_style(Style::default().fg(Color::DarkGray));
  let paragraph = Paragraph::new("Loading...")
    .block(block)
    .alignment(Alignment::Center)
    .style(Style::default().fg(Color::DarkGray));
  frame.render_widget(paragraph, area);
}

/// Full-page error for the first resource that failed to load
fn draw_load_error(frame: &mut Frame, area: Rect, resource: Resource, detail: Option<&str>) {
  let block = Block::default()
    .title(" Error ")
    .title_alignment(Alignment::Center)
    .borders(Borders::ALL)
    .border_style(Style::default().fg(Color::Red));

  let mut lines = vec![Line::styled(
    resource.error_message(),
    Style::default().fg(Color::Red).bold(),
  )];
  if let Some(detail) = detail {
    lines.push(Line::raw(""));
    lines.push(Line::styled(
      detail.to_string(),
      Style::default().fg(Color::DarkGray),
    ));
  }

  let paragraph = Paragraph::new(lines)
    .block(block)
    .wrap(Wrap { trim: true });
  frame.render_widget(paragraph, area);
}

fn draw_status_bar(frame: &mut Frame, area: Rect, app: &App) {
  let line = match app.mode() {
    Mode::Normal => {
      let hint = app
        .status_message()
        .map(str::to_string)
        .unwrap_or_else(|| " :go to  j/k:nav  Enter:open  q:back  Ctrl-C:quit".to_string());
      Line::styled(hint, Style::default().fg(Color::DarkGray))
    }
    Mode::Command => {
      let mut spans = vec![Span::styled(
        format!(":{}", app.command_input()),
        Style::default().fg(Color::Yellow),
      )];
      let suggestions = app.autocomplete_suggestions();
      for (i, cmd) in suggestions.iter().enumerate() {
        let style = if i == app.selected_suggestion() {
          Style::default().fg(Color::Black).bg(Color::Cyan)
        } else {
          Style::default().fg(Color::DarkGray)
        };
        spans.push(Span::raw("  "));
        spans.push(Span::styled(cmd.name, style));
      }
      if let Some(cmd) = suggestions.get(app.selected_suggestion()) {
        spans.push(Span::styled(
          format!("   {}", cmd.description),
          Style::default().fg(Color::DarkGray).italic(),
        ));
      }
      Line::from(spans)
    }
  };

  frame.render_widget(Paragraph::new(line), area);
}
