//! Request lifecycle state and the reducer that drives it.

use serde_json::Value;
use std::fmt;

/// Lifecycle status of a single URL fetch
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum FetchStatus {
  /// Nothing requested yet, or the URL was blank
  #[default]
  Idle,
  Fetching,
  Fetched,
  Error,
}

impl FetchStatus {
  pub fn as_str(&self) -> &'static str {
    match self {
      FetchStatus::Idle => "idle",
      FetchStatus::Fetching => "fetching",
      FetchStatus::Fetched => "fetched",
      FetchStatus::Error => "error",
    }
  }

  /// Whether the status is one the machine rests in until the URL changes
  pub fn is_terminal(&self) -> bool {
    matches!(self, FetchStatus::Fetched | FetchStatus::Error)
  }
}

impl fmt::Display for FetchStatus {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str(self.as_str())
  }
}

/// The `{status, data, error}` triple observed by a consumer.
#[derive(Debug, Clone, PartialEq)]
pub struct FetchState {
  pub status: FetchStatus,
  /// Named container around the payload once fetched, an empty array otherwise
  pub data: Value,
  pub error: Option<String>,
}

impl Default for FetchState {
  fn default() -> Self {
    Self {
      status: FetchStatus::Idle,
      data: Value::Array(Vec::new()),
      error: None,
    }
  }
}

/// Transitions dispatched by the fetch lifecycle
#[derive(Debug, Clone, PartialEq)]
pub enum FetchAction {
  Fetching,
  Fetched(Value),
  Failed(String),
}

impl FetchAction {
  pub fn name(&self) -> &'static str {
    match self {
      FetchAction::Fetching => "FETCHING",
      FetchAction::Fetched(_) => "FETCHED",
      FetchAction::Failed(_) => "FETCH_ERROR",
    }
  }
}

impl FetchState {
  /// Reduce an action into a new state.
  ///
  /// Every action starts from the initial state, so data from a previous
  /// success never survives into an error and vice versa.
  pub fn reduce(action: FetchAction) -> Self {
    let initial = Self::default();
    match action {
      FetchAction::Fetching => Self {
        status: FetchStatus::Fetching,
        ..initial
      },
      FetchAction::Fetched(payload) => Self {
        status: FetchStatus::Fetched,
        data: payload,
        ..initial
      },
      FetchAction::Failed(message) => Self {
        status: FetchStatus::Error,
        error: Some(message),
        ..initial
      },
    }
  }

  pub fn is_fetched(&self) -> bool {
    self.status == FetchStatus::Fetched
  }

  pub fn is_error(&self) -> bool {
    self.status == FetchStatus::Error
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use serde_json::json;

  #[test]
  fn test_default_is_idle_with_empty_data() {
    let state = FetchState::default();
    assert_eq!(state.status, FetchStatus::Idle);
    assert_eq!(state.data, json!([]));
    assert_eq!(state.error, None);
  }

  #[test]
  fn test_failed_resets_data() {
    let state = FetchState::reduce(FetchAction::Failed("boom".to_string()));
    assert!(state.is_error());
    assert_eq!(state.data, json!([]));
    assert_eq!(state.error.as_deref(), Some("boom"));
  }

  #[test]
  fn test_fetched_clears_error() {
    let state = FetchState::reduce(FetchAction::Fetched(json!({"pages": []})));
    assert!(state.is_fetched());
    assert_eq!(state.error, None);
    assert_eq!(state.data, json!({"pages": []}));
  }

  #[test]
  fn test_status_display() {
    assert_eq!(FetchStatus::Fetching.to_string(), "fetching");
    assert!(FetchStatus::Error.is_terminal());
    assert!(!FetchStatus::Idle.is_terminal());
  }
}
