//! Reshaping of REST payloads.

use serde_json::{Map, Value};
use url::Url;

/// Wrap a payload in an object keyed by the last path segment of `url`.
///
/// `https://site/wp-json/wp/v2/portfolio` yields `{"portfolio": payload}`.
/// A trailing slash yields the empty key, mirroring a plain split on `/`.
pub fn named_container(url: &str, payload: Value) -> Value {
  let mut container = Map::new();
  container.insert(last_path_segment(url), payload);
  Value::Object(container)
}

fn last_path_segment(url: &str) -> String {
  match Url::parse(url) {
    Ok(parsed) => parsed
      .path_segments()
      .and_then(|mut segments| segments.next_back())
      .unwrap_or_default()
      .to_string(),
    Err(_) => {
      let path = url.split(['?', '#']).next().unwrap_or(url);
      path.rsplit('/').next().unwrap_or(path).to_string()
    }
  }
}

/// Flatten named sub-objects into one uniform sequence.
///
/// Objects are replaced by their values (keys dropped, order kept), arrays are
/// spliced in as-is and scalars stay single elements. Only one level is
/// flattened: arrays or objects nested deeper are left untouched.
pub fn flatten_named(values: Vec<Value>) -> Vec<Value> {
  let mut flat = Vec::with_capacity(values.len());
  for value in values {
    match value {
      Value::Array(items) => flat.extend(items),
      Value::Object(fields) => flat.extend(fields.into_iter().map(|(_, v)| v)),
      scalar => flat.push(scalar),
    }
  }
  flat
}
