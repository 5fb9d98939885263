use crate::commands::{self, Command, CommandTarget};
use crate::config::Config;
use crate::event::{Event, EventHandler};
use crate::routes::Route;
use crate::shell::{Readiness, Shell};
use crate::ui;
use crate::wp::{Endpoints, WpClient};
use color_eyre::Result;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use crossterm::terminal::{
  disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen,
};
use crossterm::ExecutableCommand;
use ratatui::prelude::*;
use std::io::stdout;
use std::sync::Arc;
use std::time::Duration;
use tracing::{info, warn};

/// Input mode
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Mode {
  Normal,
  Command,
}

/// Main application state
pub struct App {
  /// Navigation stack - root is always at index 0
  route_stack: Vec<Route>,

  /// Current input mode
  mode: Mode,

  /// Command input buffer (after pressing :)
  command_input: String,

  /// Selected autocomplete suggestion index
  selected_suggestion: usize,

  /// Highlighted row of the portfolio list
  portfolio_selected: usize,

  /// Vertical scroll of text views
  scroll: u16,

  /// One-line feedback shown in the status bar
  status_message: Option<String>,

  config: Config,

  /// The three site fetches
  shell: Shell,

  last_readiness: Readiness,

  should_quit: bool,
}

impl App {
  pub fn new(config: Config) -> Result<Self> {
    let client = WpClient::new()?;
    let shell = Shell::new(Endpoints::new(&config.origin), Arc::new(client));
    Ok(Self::with_shell(config, shell))
  }

  pub fn with_shell(config: Config, shell: Shell) -> Self {
    Self {
      route_stack: vec![Route::Home],
      mode: Mode::Normal,
      command_input: String::new(),
      selected_suggestion: 0,
      portfolio_selected: 0,
      scroll: 0,
      status_message: None,
      config,
      last_readiness: shell.readiness(),
      shell,
      should_quit: false,
    }
  }

  pub async fn run(&mut self) -> Result<()> {
    // Setup terminal
    enable_raw_mode()?;
    stdout().execute(EnterAlternateScreen)?;
    let mut terminal = Terminal::new(CrosstermBackend::new(stdout()))?;

    let result = self.event_loop(&mut terminal).await;

    self.shell.teardown();

    // Cleanup terminal
    disable_raw_mode()?;
    stdout().execute(LeaveAlternateScreen)?;

    result
  }

  async fn event_loop<B: Backend>(&mut self, terminal: &mut Terminal<B>) -> Result<()> {
    let mut events = EventHandler::new(Duration::from_millis(self.config.tick_rate_ms));

    self.shell.start();

    while !self.should_quit {
      terminal.draw(|frame| ui::draw(frame, self))?;

      match events.next().await {
        Some(event) => self.handle_event(event),
        None => break,
      }
    }

    Ok(())
  }

  fn handle_event(&mut self, event: Event) {
    match event {
      Event::Key(key) => self.handle_key(key),
      Event::Resize => {} // Redrawn on the next loop iteration
      Event::Tick => self.tick(),
    }
  }

  fn tick(&mut self) {
    if !self.shell.poll() {
      return;
    }

    let readiness = self.shell.readiness();
    if readiness != self.last_readiness {
      match readiness {
        Readiness::Failed(resource) => warn!(
          resource = %resource,
          url = self.shell.fetch(resource).url().unwrap_or_default(),
          error = self.shell.error_detail(resource).unwrap_or_default(),
          "site failed to load"
        ),
        Readiness::Ready => info!("site ready"),
        _ => {}
      }
      self.last_readiness = readiness;
    }
  }

  fn handle_key(&mut self, key: KeyEvent) {
    if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
      self.should_quit = true;
      return;
    }

    match self.mode {
      Mode::Normal => self.handle_normal_mode_key(key),
      Mode::Command => self.handle_command_mode_key(key),
    }
  }

  fn handle_normal_mode_key(&mut self, key: KeyEvent) {
    match key.code {
      KeyCode::Char('q') => {
        if self.route_stack.len() > 1 {
          self.back();
        } else {
          self.should_quit = true;
        }
      }
      KeyCode::Esc => self.back(),

      KeyCode::Up | KeyCode::Char('k') => self.move_selection(-1),
      KeyCode::Down | KeyCode::Char('j') => self.move_selection(1),
      KeyCode::Enter => self.enter_selected(),

      KeyCode::Char(':') => {
        self.mode = Mode::Command;
        self.command_input.clear();
        self.selected_suggestion = 0;
      }

      _ => {}
    }
  }

  fn handle_command_mode_key(&mut self, key: KeyEvent) {
    match key.code {
      KeyCode::Esc => {
        self.mode = Mode::Normal;
        self.command_input.clear();
        self.selected_suggestion = 0;
      }
      KeyCode::Enter => {
        self.execute_command();
        self.mode = Mode::Normal;
        self.selected_suggestion = 0;
      }
      KeyCode::Tab | KeyCode::Down => {
        let count = commands::get_suggestions(&self.command_input).len();
        if count > 0 {
          self.selected_suggestion = (self.selected_suggestion + 1) % count;
        }
      }
      KeyCode::BackTab | KeyCode::Up => {
        let count = commands::get_suggestions(&self.command_input).len();
        if count > 0 {
          self.selected_suggestion = (self.selected_suggestion + count - 1) % count;
        }
      }
      KeyCode::Backspace => {
        self.command_input.pop();
        self.selected_suggestion = 0;
      }
      KeyCode::Char(c) => {
        self.command_input.push(c);
        self.selected_suggestion = 0;
      }
      _ => {}
    }
  }

  fn execute_command(&mut self) {
    match commands::resolve(&self.command_input, self.selected_suggestion) {
      CommandTarget::Navigate(route) => self.navigate(route),
      CommandTarget::Quit => self.should_quit = true,
      CommandTarget::Unknown(input) => {
        self.status_message = Some(format!("Unknown command: {}", input));
      }
    }
    self.command_input.clear();
  }

  /// Push `route` unless it is already showing.
  pub fn navigate(&mut self, route: Route) {
    if self.current_route() == &route {
      return;
    }
    info!(path = %route.path(), "navigate");
    if route == Route::Portfolio {
      self.portfolio_selected = 0;
    }
    self.route_stack.push(route);
    self.scroll = 0;
    self.status_message = None;
  }

  fn back(&mut self) {
    if self.route_stack.len() > 1 {
      self.route_stack.pop();
      self.scroll = 0;
    }
  }

  fn portfolio_len(&self) -> usize {
    self
      .shell
      .site_data()
      .map(|data| data.portfolio().len())
      .unwrap_or(0)
  }

  fn move_selection(&mut self, delta: i32) {
    match self.current_route() {
      Route::Portfolio => {
        let len = self.portfolio_len();
        if len > 0 {
          self.portfolio_selected =
            (self.portfolio_selected as i32 + delta).rem_euclid(len as i32) as usize;
        }
      }
      _ => {
        self.scroll = if delta < 0 {
          self.scroll.saturating_sub(1)
        } else {
          self.scroll.saturating_add(1)
        };
      }
    }
  }

  fn enter_selected(&mut self) {
    if self.current_route() != &Route::Portfolio {
      return;
    }
    let slug = self.shell.site_data().and_then(|data| {
      data
        .portfolio()
        .get(self.portfolio_selected)
        .map(|item| item.slug.clone())
    });
    if let Some(slug) = slug {
      self.navigate(Route::PortfolioSingle(slug));
    }
  }

  // Accessors for UI rendering
  pub fn current_route(&self) -> &Route {
    // Root is never popped
    &self.route_stack[self.route_stack.len() - 1]
  }

  pub fn shell(&self) -> &Shell {
    &self.shell
  }

  pub fn config(&self) -> &Config {
    &self.config
  }

  pub fn mode(&self) -> &Mode {
    &self.mode
  }

  pub fn command_input(&self) -> &str {
    &self.command_input
  }

  pub fn portfolio_selected(&self) -> usize {
    self.portfolio_selected
  }

  pub fn scroll(&self) -> u16 {
    self.scroll
  }

  pub fn status_message(&self) -> Option<&str> {
    self.status_message.as_deref()
  }

  pub fn breadcrumb(&self) -> Vec<String> {
    self.route_stack.iter().map(Route::label).collect()
  }

  pub fn autocomplete_suggestions(&self) -> Vec<&'static Command> {
    commands::get_suggestions(&self.command_input)
  }

  pub fn selected_suggestion(&self) -> usize {
    self.selected_suggestion
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::fetch::testing::FakeTransport;
  use serde_json::json;

  fn press(app: &mut App, code: KeyCode) {
    app.handle_key(KeyEvent::new(code, KeyModifiers::NONE));
  }

  fn type_command(app: &mut App, text: &str) {
    press(app, KeyCode::Char(':'));
    for c in text.chars() {
      press(app, KeyCode::Char(c));
    }
    press(app, KeyCode::Enter);
  }

  async fn ready_app() -> App {
    let endpoints = Endpoints::new("https://site.test");
    let transport = FakeTransport::new();
    transport.respond(&endpoints.pages(), json!([]));
    transport.respond(&endpoints.acf_options(), json!({"acf": {}}));
    transport.respond(
      &endpoints.portfolio(),
      json!([{"slug": "harbor"}, {"slug": "dunes"}]),
    );

    let mut shell = Shell::new(endpoints, Arc::new(transport));
    shell.start();
    shell.settle().await;
    App::with_shell(Config::default(), shell)
  }

  #[tokio::test]
  async fn test_command_navigation() {
    let mut app = ready_app().await;
    assert_eq!(app.current_route(), &Route::Home);

    type_command(&mut app, "p");
    assert_eq!(app.current_route(), &Route::Portfolio);
    assert_eq!(app.mode(), &Mode::Normal);

    type_command(&mut app, "/about");
    assert_eq!(app.current_route(), &Route::About);
    assert_eq!(app.breadcrumb(), vec!["Home", "Portfolio", "About"]);
  }

  #[tokio::test]
  async fn test_open_portfolio_item() {
    let mut app = ready_app().await;
    type_command(&mut app, "portfolio");

    press(&mut app, KeyCode::Char('j'));
    assert_eq!(app.portfolio_selected(), 1);
    press(&mut app, KeyCode::Char('j'));
    assert_eq!(app.portfolio_selected(), 0);
    press(&mut app, KeyCode::Up);
    assert_eq!(app.portfolio_selected(), 1);

    press(&mut app, KeyCode::Enter);
    assert_eq!(
      app.current_route(),
      &Route::PortfolioSingle("dunes".to_string())
    );

    press(&mut app, KeyCode::Char('q'));
    assert_eq!(app.current_route(), &Route::Portfolio);
  }

  #[tokio::test]
  async fn test_quit_from_root() {
    let mut app = ready_app().await;
    press(&mut app, KeyCode::Esc);
    assert!(!app.should_quit);
    press(&mut app, KeyCode::Char('q'));
    assert!(app.should_quit);
  }

  #[tokio::test]
  async fn test_unknown_command_sets_status() {
    let mut app = ready_app().await;
    type_command(&mut app, "zzz");
    assert_eq!(app.status_message(), Some("Unknown command: zzz"));
    assert_eq!(app.current_route(), &Route::Home);
  }

  #[tokio::test]
  async fn test_navigating_to_same_route_is_noop() {
    let mut app = ready_app().await;
    type_command(&mut app, "about");
    type_command(&mut app, "about");
    assert_eq!(app.breadcrumb().len(), 2);
  }
}
