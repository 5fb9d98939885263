//! Application shell: the three site fetches and their combined readiness.

use crate::fetch::{Fetch, FetchStatus, Transport};
use crate::wp::types::{self, AcfOptions, Page, PortfolioItem};
use crate::wp::Endpoints;
use serde_json::{Map, Value};
use std::fmt;
use std::sync::Arc;
use tracing::info;

/// One of the three resources the site needs before it can render
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Resource {
  Page,
  Acf,
  Portfolio,
}

impl Resource {
  /// Fixed order in which errors are reported
  pub const PRECEDENCE: [Resource; 3] = [Resource::Page, Resource::Acf, Resource::Portfolio];

  pub fn label(&self) -> &'static str {
    match self {
      Resource::Page => "Page",
      Resource::Acf => "Acf",
      Resource::Portfolio => "Portfolio",
    }
  }

  /// Text of the full-page error view
  pub fn error_message(&self) -> &'static str {
    match self {
      Resource::Page => "Error - Page data",
      Resource::Acf => "Error - ACF data",
      Resource::Portfolio => "Error - Portfolio data",
    }
  }
}

impl fmt::Display for Resource {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str(self.label())
  }
}

/// What the shell should render
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Readiness {
  /// A resource failed; the first in precedence order is reported
  Failed(Resource),
  Loading,
  /// All three fetched, the router can mount
  Ready,
  /// Nothing started yet
  Nothing,
}

/// Combine the three statuses into one readiness.
///
/// Errors are checked before anything else and in fixed order, so an error
/// wins over a request still in flight.
pub fn aggregate(page: FetchStatus, acf: FetchStatus, portfolio: FetchStatus) -> Readiness {
  let statuses = [page, acf, portfolio];

  if let Some(i) = statuses.iter().position(|s| *s == FetchStatus::Error) {
    return Readiness::Failed(Resource::PRECEDENCE[i]);
  }
  if statuses.contains(&FetchStatus::Fetching) {
    return Readiness::Loading;
  }
  if statuses.iter().all(|s| *s == FetchStatus::Fetched) {
    return Readiness::Ready;
  }
  Readiness::Nothing
}

/// Payload slices handed to route views once everything has loaded.
///
/// Pages and portfolio items are deserialized once, when the slices are
/// extracted.
#[derive(Debug, Clone, PartialEq)]
pub struct SiteData {
  pub pages: Value,
  pub acf: Value,
  pub portfolio: Value,
  page_list: Vec<Page>,
  portfolio_list: Vec<PortfolioItem>,
}

impl SiteData {
  /// Pull the slices out of the named containers, defaulting to `{}`.
  pub fn extract(page: &Value, acf: &Value, portfolio: &Value) -> Self {
    let pages = slice(page, &["pages"]);
    let portfolio = slice(portfolio, &["portfolio"]);
    Self {
      page_list: types::pages(&pages),
      portfolio_list: types::portfolio_items(&portfolio),
      pages,
      acf: slice(acf, &["options", "acf"]),
      portfolio,
    }
  }

  pub fn pages(&self) -> &[Page] {
    &self.page_list
  }

  pub fn portfolio(&self) -> &[PortfolioItem] {
    &self.portfolio_list
  }

  pub fn acf(&self) -> AcfOptions<'_> {
    AcfOptions::new(&self.acf)
  }

  pub fn page(&self, slug: &str) -> Option<&Page> {
    self.page_list.iter().find(|p| p.slug == slug)
  }

  pub fn portfolio_item(&self, slug: &str) -> Option<&PortfolioItem> {
    self.portfolio_list.iter().find(|item| item.slug == slug)
  }
}

fn slice(container: &Value, path: &[&str]) -> Value {
  path
    .iter()
    .try_fold(container, |value, key| value.get(*key))
    .cloned()
    .unwrap_or_else(|| Value::Object(Map::new()))
}

/// Owner of the pages, ACF options and portfolio fetches.
pub struct Shell {
  endpoints: Endpoints,
  page: Fetch,
  acf: Fetch,
  portfolio: Fetch,
  /// Built once all three are fetched, dropped when that stops holding
  site: Option<SiteData>,
}

impl Shell {
  pub fn new(endpoints: Endpoints, transport: Arc<dyn Transport>) -> Self {
    Self {
      endpoints,
      page: Fetch::new(Resource::Page.label(), Arc::clone(&transport)),
      acf: Fetch::new(Resource::Acf.label(), Arc::clone(&transport)),
      portfolio: Fetch::new(Resource::Portfolio.label(), transport),
      site: None,
    }
  }

  pub fn endpoints(&self) -> &Endpoints {
    &self.endpoints
  }

  /// Point each fetch at its endpoint. The three requests run concurrently.
  pub fn start(&mut self) {
    info!(origin = self.endpoints.origin(), "loading site");
    self.page.set_url(&self.endpoints.pages());
    self.acf.set_url(&self.endpoints.acf_options());
    self.portfolio.set_url(&self.endpoints.portfolio());
    self.refresh_site();
  }

  /// Poll all three fetches. Returns `true` if any state changed.
  pub fn poll(&mut self) -> bool {
    let page = self.page.poll();
    let acf = self.acf.poll();
    let portfolio = self.portfolio.poll();
    let changed = page || acf || portfolio;
    if changed {
      self.refresh_site();
    }
    changed
  }

  /// Wait for all three fetches to reach a resting state.
  #[cfg(test)]
  pub async fn settle(&mut self) {
    self.page.settle().await;
    self.acf.settle().await;
    self.portfolio.settle().await;
    self.refresh_site();
  }

  fn refresh_site(&mut self) {
    if self.readiness() != Readiness::Ready {
      self.site = None;
    } else if self.site.is_none() {
      self.site = Some(SiteData::extract(
        &self.page.state().data,
        &self.acf.state().data,
        &self.portfolio.state().data,
      ));
    }
  }

  pub fn fetch(&self, resource: Resource) -> &Fetch {
    match resource {
      Resource::Page => &self.page,
      Resource::Acf => &self.acf,
      Resource::Portfolio => &self.portfolio,
    }
  }

  pub fn readiness(&self) -> Readiness {
    aggregate(
      self.page.status(),
      self.acf.status(),
      self.portfolio.status(),
    )
  }

  /// Extracted slices, only once every resource has been fetched
  pub fn site_data(&self) -> Option<&SiteData> {
    self.site.as_ref()
  }

  /// Underlying error text for a failed resource, for logs and detail lines
  pub fn error_detail(&self, resource: Resource) -> Option<&str> {
    self.fetch(resource).state().error.as_deref()
  }

  pub fn teardown(&mut self) {
    self.page.teardown();
    self.acf.teardown();
    self.portfolio.teardown();
    self.site = None;
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::fetch::testing::FakeTransport;
  use crate::fetch::FetchError;
  use serde_json::json;

  use crate::fetch::FetchStatus::{Error, Fetched, Fetching, Idle};

  fn endpoints() -> Endpoints {
    Endpoints::new("https://site.test")
  }

  fn transport_with_all(endpoints: &Endpoints) -> FakeTransport {
    let transport = FakeTransport::new();
    transport.respond(&endpoints.pages(), json!([{"slug": "about", "title": {"rendered": "About"}}]));
    transport.respond(
      &endpoints.acf_options(),
      json!({"acf": {"site_title": "Studio"}}),
    );
    transport.respond(&endpoints.portfolio(), json!([{"slug": "harbor"}]));
    transport
  }

  async fn pump(shell: &mut Shell) {
    for _ in 0..20 {
      tokio::task::yield_now().await;
      shell.poll();
    }
  }

  #[test]
  fn test_aggregate_table() {
    assert_eq!(aggregate(Idle, Idle, Idle), Readiness::Nothing);
    assert_eq!(aggregate(Fetched, Fetched, Fetched), Readiness::Ready);
    assert_eq!(aggregate(Fetched, Fetching, Fetched), Readiness::Loading);
    assert_eq!(aggregate(Fetched, Idle, Fetched), Readiness::Nothing);
    assert_eq!(
      aggregate(Fetched, Fetched, Error),
      Readiness::Failed(Resource::Portfolio)
    );
  }

  #[test]
  fn test_error_beats_fetching() {
    assert_eq!(
      aggregate(Fetching, Error, Fetching),
      Readiness::Failed(Resource::Acf)
    );
  }

  #[test]
  fn test_error_precedence_is_fixed() {
    assert_eq!(
      aggregate(Error, Error, Error),
      Readiness::Failed(Resource::Page)
    );
    assert_eq!(
      aggregate(Fetched, Error, Error),
      Readiness::Failed(Resource::Acf)
    );
  }

  #[test]
  fn test_extract_falls_back_to_empty_object() {
    let data = SiteData::extract(&json!([]), &json!({"options": {}}), &json!({"other": 1}));
    assert_eq!(data.pages, json!({}));
    assert_eq!(data.acf, json!({}));
    assert_eq!(data.portfolio, json!({}));
    assert!(data.portfolio().is_empty());
  }

  #[tokio::test]
  async fn test_all_fetched_is_ready() {
    let endpoints = endpoints();
    let transport = Arc::new(transport_with_all(&endpoints));
    let mut shell = Shell::new(endpoints, transport);

    assert_eq!(shell.readiness(), Readiness::Nothing);
    shell.start();
    assert_eq!(shell.readiness(), Readiness::Loading);
    assert!(shell.site_data().is_none());

    shell.settle().await;
    assert_eq!(shell.readiness(), Readiness::Ready);

    let data = shell.site_data().unwrap();
    assert_eq!(data.acf, json!({"site_title": "Studio"}));
    assert_eq!(data.acf().site_title(), Some("Studio"));
    assert_eq!(data.page("about").unwrap().title, "About");
    assert_eq!(data.portfolio_item("harbor").unwrap().slug, "harbor");
  }

  #[tokio::test]
  async fn test_site_data_built_once_when_ready() {
    let endpoints = endpoints();
    let transport = Arc::new(transport_with_all(&endpoints));
    let mut shell = Shell::new(endpoints, transport);

    shell.start();
    pump(&mut shell).await;
    assert_eq!(shell.readiness(), Readiness::Ready);

    let first = shell.site_data().map(|d| d as *const SiteData);
    assert!(first.is_some());
    assert!(!shell.poll());
    assert_eq!(shell.site_data().map(|d| d as *const SiteData), first);
    assert_eq!(shell.site_data().unwrap().portfolio().len(), 1);

    shell.teardown();
    assert!(shell.site_data().is_none());
  }

  #[tokio::test]
  async fn test_portfolio_error_shows_error_view() {
    let endpoints = endpoints();
    let transport = transport_with_all(&endpoints);
    transport.fail(
      &endpoints.portfolio(),
      FetchError::Network("HTTP 500".to_string()),
    );
    let mut shell = Shell::new(endpoints, Arc::new(transport));

    shell.start();
    shell.settle().await;

    assert_eq!(shell.readiness(), Readiness::Failed(Resource::Portfolio));
    assert!(shell.site_data().is_none());
    assert_eq!(
      shell.error_detail(Resource::Portfolio),
      Some("request failed: HTTP 500")
    );
    assert_eq!(
      Resource::Portfolio.error_message(),
      "Error - Portfolio data"
    );
  }

  #[tokio::test]
  async fn test_error_shown_while_others_fetching() {
    let endpoints = endpoints();
    let transport = transport_with_all(&endpoints);
    let _page_gate = transport.gate(&endpoints.pages());
    transport.fail(&endpoints.acf_options(), FetchError::Parse("bad".to_string()));
    let mut shell = Shell::new(endpoints, Arc::new(transport));

    shell.start();
    pump(&mut shell).await;

    assert_eq!(shell.fetch(Resource::Page).status(), FetchStatus::Fetching);
    assert_eq!(shell.readiness(), Readiness::Failed(Resource::Acf));
  }

  #[tokio::test]
  async fn test_teardown_while_loading() {
    let endpoints = endpoints();
    let transport = transport_with_all(&endpoints);
    let page_gate = transport.gate(&endpoints.pages());
    let mut shell = Shell::new(endpoints, Arc::new(transport));

    shell.start();
    shell.teardown();
    let _ = page_gate.send(Ok(json!([])));
    pump(&mut shell).await;

    assert_eq!(shell.readiness(), Readiness::Nothing);
  }
}
