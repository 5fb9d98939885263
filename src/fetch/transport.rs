//! The seam between the fetch state machine and the network.

use futures::future::BoxFuture;
use serde_json::Value;

/// Failure of a single GET, as surfaced in [`FetchState::error`](super::FetchState).
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum FetchError {
  /// Connection, DNS or HTTP-level failure
  #[error("request failed: {0}")]
  Network(String),
  /// The body could not be parsed as JSON
  #[error("invalid JSON response: {0}")]
  Parse(String),
  /// The request task panicked before producing a result
  #[error("request ended without a response")]
  Lost,
}

/// Something that can GET a URL and parse the body as JSON.
///
/// The returned future must be `'static` so it can be moved onto a spawned
/// task and dropped when the request is cancelled.
pub trait Transport: Send + Sync {
  fn get_json(&self, url: &str) -> BoxFuture<'static, Result<Value, FetchError>>;
}
