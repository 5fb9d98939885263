/// Origin used when neither config, flag nor environment set one
pub const DEFAULT_ORIGIN: &str = "https://gregorythomason.com";

/// The fixed REST endpoints of a site, built from its origin
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Endpoints {
  origin: String,
}

impl Endpoints {
  pub fn new(origin: &str) -> Self {
    Self {
      origin: origin.trim().trim_end_matches('/').to_string(),
    }
  }

  pub fn origin(&self) -> &str {
    &self.origin
  }

  /// Base of the core `wp/v2` namespace
  pub fn rest_url(&self) -> String {
    format!("{}/wp-json/wp/v2", self.origin)
  }

  pub fn pages(&self) -> String {
    format!("{}/pages", self.rest_url())
  }

  /// ACF options page; the trailing `options` segment names the payload
  pub fn acf_options(&self) -> String {
    format!("{}/wp-json/acf/v3/options/options", self.origin)
  }

  pub fn portfolio(&self) -> String {
    format!("{}/portfolio", self.rest_url())
  }
}

impl Default for Endpoints {
  fn default() -> Self {
    Self::new(DEFAULT_ORIGIN)
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn test_endpoint_urls() {
    let endpoints = Endpoints::new("https://example.com");
    assert_eq!(endpoints.pages(), "https://example.com/wp-json/wp/v2/pages");
    assert_eq!(
      endpoints.acf_options(),
      "https://example.com/wp-json/acf/v3/options/options"
    );
    assert_eq!(
      endpoints.portfolio(),
      "https://example.com/wp-json/wp/v2/portfolio"
    );
  }

  #[test]
  fn test_origin_trailing_slash_trimmed() {
    let endpoints = Endpoints::new(" https://example.com/ ");
    assert_eq!(endpoints.origin(), "https://example.com");
    assert_eq!(endpoints.rest_url(), "https://example.com/wp-json/wp/v2");
  }

  #[test]
  fn test_default_origin() {
    assert_eq!(Endpoints::default().origin(), DEFAULT_ORIGIN);
  }
}
