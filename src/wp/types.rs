//! Content types read out of REST payloads.
//!
//! Deserialization is lenient: every field has a default, and items that
//! still fail to deserialize are skipped rather than reported.

use crate::fetch::flatten_named;
use serde::de::DeserializeOwned;
use serde::Deserialize;
use serde_json::Value;

// ============================================================================
// API shapes
// ============================================================================

/// WordPress wraps HTML fields as `{"rendered": "..."}`
#[derive(Debug, Clone, Default, Deserialize)]
struct ApiRendered {
  #[serde(default)]
  rendered: String,
}

#[derive(Debug, Deserialize)]
struct ApiPage {
  #[serde(default)]
  id: u64,
  #[serde(default)]
  slug: String,
  #[serde(default)]
  title: ApiRendered,
  #[serde(default)]
  content: ApiRendered,
  #[serde(default)]
  link: String,
}

#[derive(Debug, Deserialize)]
struct ApiPortfolioItem {
  #[serde(default)]
  id: u64,
  #[serde(default)]
  slug: String,
  #[serde(default)]
  date: String,
  #[serde(default)]
  title: ApiRendered,
  #[serde(default)]
  content: ApiRendered,
  #[serde(default)]
  excerpt: ApiRendered,
  #[serde(default)]
  link: String,
  #[serde(default)]
  acf: Value,
}

// ============================================================================
// Domain types
// ============================================================================

/// A WordPress page
#[derive(Debug, Clone, PartialEq)]
pub struct Page {
  pub id: u64,
  pub slug: String,
  /// Rendered HTML title
  pub title: String,
  /// Rendered HTML body
  pub content: String,
  pub link: String,
}

impl From<ApiPage> for Page {
  fn from(api: ApiPage) -> Self {
    Self {
      id: api.id,
      slug: api.slug,
      title: api.title.rendered,
      content: api.content.rendered,
      link: api.link,
    }
  }
}

/// An entry of the portfolio custom post type
#[derive(Debug, Clone, PartialEq)]
pub struct PortfolioItem {
  pub id: u64,
  pub slug: String,
  pub date: String,
  pub title: String,
  pub content: String,
  pub excerpt: String,
  pub link: String,
  /// Per-item custom fields, kept raw
  pub acf: Value,
}

impl From<ApiPortfolioItem> for PortfolioItem {
  fn from(api: ApiPortfolioItem) -> Self {
    Self {
      id: api.id,
      slug: api.slug,
      date: api.date,
      title: api.title.rendered,
      content: api.content.rendered,
      excerpt: api.excerpt.rendered,
      link: api.link,
      acf: api.acf,
    }
  }
}

/// Deserialize every element of a JSON array, skipping the ones that don't fit.
/// Anything that is not an array yields nothing.
fn collect<A, T>(value: &Value) -> Vec<T>
where
  A: DeserializeOwned,
  T: From<A>,
{
  value
    .as_array()
    .map(|items| {
      items
        .iter()
        .filter_map(|item| serde_json::from_value::<A>(item.clone()).ok())
        .map(T::from)
        .collect()
    })
    .unwrap_or_default()
}

pub fn pages(value: &Value) -> Vec<Page> {
  collect::<ApiPage, Page>(value)
}

pub fn portfolio_items(value: &Value) -> Vec<PortfolioItem> {
  collect::<ApiPortfolioItem, PortfolioItem>(value)
}

/// Global custom fields from the ACF options page
#[derive(Debug, Clone, PartialEq)]
pub struct AcfOptions<'a> {
  fields: &'a Value,
}

impl<'a> AcfOptions<'a> {
  pub fn new(fields: &'a Value) -> Self {
    Self { fields }
  }

  /// First non-empty string among the given keys
  pub fn text(&self, keys: &[&str]) -> Option<&'a str> {
    let fields: &'a Value = self.fields;
    keys
      .iter()
      .filter_map(|key| fields.get(*key).and_then(Value::as_str))
      .find(|s| !s.trim().is_empty())
  }

  /// Site title, if the options define one
  pub fn site_title(&self) -> Option<&'a str> {
    self.text(&["site_title", "title", "name"])
  }

  /// All text values of the options, with grouped fields flattened one level.
  pub fn text_blocks(&self) -> Vec<String> {
    let values = match self.fields.as_object() {
      Some(fields) => fields.values().cloned().collect(),
      None => return Vec::new(),
    };

    flatten_named(values)
      .into_iter()
      .filter_map(|value| match value {
        Value::String(s) if !s.trim().is_empty() => Some(s),
        _ => None,
      })
      .collect()
  }
}
