//! Client-side routes of the site.

/// A route the router can mount
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum Route {
  #[default]
  Home,
  Portfolio,
  PortfolioSingle(String),
  About,
  /// Catch-all; keeps the path that failed to match
  NotFound(String),
}

impl Route {
  /// Match a path. Leading, trailing and doubled slashes are ignored.
  pub fn parse(path: &str) -> Self {
    let segments: Vec<&str> = path
      .trim()
      .split('/')
      .filter(|segment| !segment.is_empty())
      .collect();

    match segments.as_slice() {
      [] => Route::Home,
      ["portfolio"] => Route::Portfolio,
      ["portfolio", slug] => Route::PortfolioSingle((*slug).to_string()),
      ["about"] => Route::About,
      _ => Route::NotFound(path.trim().to_string()),
    }
  }

  pub fn path(&self) -> String {
    match self {
      Route::Home => "/".to_string(),
      Route::Portfolio => "/portfolio".to_string(),
      Route::PortfolioSingle(slug) => format!("/portfolio/{}", slug),
      Route::About => "/about".to_string(),
      Route::NotFound(path) => path.clone(),
    }
  }

  /// Label for the breadcrumb
  pub fn label(&self) -> String {
    match self {
      Route::Home => "Home".to_string(),
      Route::Portfolio => "Portfolio".to_string(),
      Route::PortfolioSingle(slug) => slug.clone(),
      Route::About => "About".to_string(),
      Route::NotFound(_) => "Not found".to_string(),
    }
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn test_parse_known_routes() {
    assert_eq!(Route::parse("/"), Route::Home);
    assert_eq!(Route::parse(""), Route::Home);
    assert_eq!(Route::parse("/portfolio"), Route::Portfolio);
    assert_eq!(Route::parse("portfolio/"), Route::Portfolio);
    assert_eq!(
      Route::parse("/portfolio/harbor"),
      Route::PortfolioSingle("harbor".to_string())
    );
    assert_eq!(Route::parse("/about"), Route::About);
  }

  #[test]
  fn test_parse_catch_all() {
    assert_eq!(
      Route::parse("/contact"),
      Route::NotFound("/contact".to_string())
    );
    assert_eq!(
      Route::parse("/portfolio/a/b"),
      Route::NotFound("/portfolio/a/b".to_string())
    );
    assert_eq!(Route::parse("/About"), Route::NotFound("/About".to_string()));
  }

  #[test]
  fn test_path_round_trips() {
    for path in ["/", "/portfolio", "/portfolio/harbor", "/about"] {
      assert_eq!(Route::parse(path).path(), path);
    }
  }
}
