//! Data fetching with request lifecycle, caching and cancellation.
//!
//! A [`Fetch`] tracks one URL at a time and exposes its [`FetchState`]. It is
//! driven from the UI loop in the same way as any other polled source:
//!
//! ```ignore
//! let mut pages = Fetch::new("Page", transport.clone());
//! pages.set_url("https://example.com/wp-json/wp/v2/pages");
//!
//! // On every tick
//! if pages.poll() {
//!     // State changed, trigger re-render
//! }
//!
//! match pages.state().status {
//!     FetchStatus::Fetching => render_spinner(),
//!     FetchStatus::Fetched => render(&pages.state().data),
//!     FetchStatus::Error => render_error(pages.state().error.as_deref()),
//!     FetchStatus::Idle => {}
//! }
//! ```
//!
//! Responses are cached per instance by exact URL, so switching back to a URL
//! that was already fetched replays the cached payload without a network call.
//! Changing the URL supersedes the request in flight: it still runs to
//! completion and a successful payload is cached, but it never touches the
//! state. Tearing the instance down aborts every outstanding request.

mod cache;
pub mod normalize;
mod state;
mod transport;

#[cfg(test)]
pub(crate) mod testing;

pub use cache::ResponseCache;
pub use normalize::{flatten_named, named_container};
pub use state::{FetchAction, FetchState, FetchStatus};
pub use transport::{FetchError, Transport};

use futures::FutureExt;
use serde_json::Value;
use std::panic::AssertUnwindSafe;
use std::sync::Arc;
use tokio::sync::mpsc;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

/// Result of a network request, tagged with the request it belongs to
#[derive(Debug)]
struct Completion {
  request_id: u64,
  url: String,
  result: Result<Value, FetchError>,
}

/// Bookkeeping for the request whose result may still change the state
struct InFlight {
  request_id: u64,
  /// Cancelled once the request is superseded
  token: CancellationToken,
}

/// Fetch state machine for one consumer.
pub struct Fetch {
  /// Logical name, only used in logs
  label: String,
  url: Option<String>,
  state: FetchState,
  cache: ResponseCache,
  transport: Arc<dyn Transport>,
  in_flight: Option<InFlight>,
  next_request_id: u64,
  /// Every request task reports here, current or superseded
  completions_tx: mpsc::UnboundedSender<Completion>,
  completions: mpsc::UnboundedReceiver<Completion>,
  /// Aborts all request tasks on teardown
  shutdown: CancellationToken,
  torn_down: bool,
}

impl Fetch {
  pub fn new(label: impl Into<String>, transport: Arc<dyn Transport>) -> Self {
    let (completions_tx, completions) = mpsc::unbounded_channel();
    Self {
      label: label.into(),
      url: None,
      state: FetchState::default(),
      cache: ResponseCache::new(),
      transport,
      in_flight: None,
      next_request_id: 0,
      completions_tx,
      completions,
      shutdown: CancellationToken::new(),
      torn_down: false,
    }
  }

  pub fn url(&self) -> Option<&str> {
    self.url.as_deref()
  }

  pub fn state(&self) -> &FetchState {
    &self.state
  }

  pub fn status(&self) -> FetchStatus {
    self.state.status
  }

  #[cfg(test)]
  pub fn cache(&self) -> &ResponseCache {
    &self.cache
  }

  #[cfg(test)]
  pub fn is_in_flight(&self) -> bool {
    self.in_flight.is_some()
  }

  /// Point the machine at `url`.
  ///
  /// Setting the URL it already tracks is a no-op. Any other value supersedes
  /// the request in flight and restarts from `fetching`; a blank URL leaves the
  /// machine idle without touching the network. Must be called from within a
  /// tokio runtime when the URL is not cached.
  pub fn set_url(&mut self, url: &str) {
    if self.torn_down {
      warn!(label = %self.label, url, "set_url after teardown ignored");
      return;
    }
    if self.url.as_deref() == Some(url) {
      return;
    }

    self.supersede_in_flight();
    self.url = Some(url.to_string());

    if url.trim().is_empty() {
      debug!(label = %self.label, "blank url, staying idle");
      self.state = FetchState::default();
      return;
    }

    self.dispatch(FetchAction::Fetching);

    if let Some(cached) = self.cache.get(url) {
      debug!(label = %self.label, url, "cache hit");
      let payload = named_container(url, cached.clone());
      self.dispatch(FetchAction::Fetched(payload));
      return;
    }

    self.start_request(url);
  }

  /// Apply every completed request without blocking.
  ///
  /// Returns `true` if the state changed. Call this on every tick.
  pub fn poll(&mut self) -> bool {
    let mut changed = false;
    while let Ok(completion) = self.completions.try_recv() {
      changed |= self.complete(completion);
    }
    changed
  }

  /// Wait until the current request, if any, has been applied.
  ///
  /// A hung request keeps this pending forever; there is no timeout.
  #[cfg(test)]
  pub async fn settle(&mut self) {
    while self.in_flight.is_some() {
      match self.completions.recv().await {
        Some(completion) => {
          self.complete(completion);
        }
        None => break,
      }
    }
  }

  /// Abort outstanding work and discard state. Idempotent.
  ///
  /// The cache survives so the owner can inspect it, but the instance accepts
  /// no further URLs and never changes state or cache again.
  pub fn teardown(&mut self) {
    if self.torn_down {
      return;
    }
    self.supersede_in_flight();
    self.shutdown.cancel();
    self.torn_down = true;
    self.state = FetchState::default();
    debug!(label = %self.label, "torn down");
  }

  fn dispatch(&mut self, action: FetchAction) {
    debug!(
      label = %self.label,
      action = action.name(),
      from = %self.state.status,
      "dispatch"
    );
    self.state = FetchState::reduce(action);
  }

  fn start_request(&mut self, url: &str) {
    let request_id = self.next_request_id;
    self.next_request_id += 1;

    let token = self.shutdown.child_token();
    let shutdown = self.shutdown.clone();
    let tx = self.completions_tx.clone();
    let request = AssertUnwindSafe(self.transport.get_json(url)).catch_unwind();
    let url = url.to_string();
    let label = self.label.clone();

    info!(label = %label, url = %url, request_id, "fetching");

    tokio::spawn(async move {
      let outcome = tokio::select! {
        biased;
        _ = shutdown.cancelled() => {
          debug!(label = %label, url = %url, request_id, "request aborted");
          return;
        }
        outcome = request => outcome,
      };
      if shutdown.is_cancelled() {
        return;
      }
      let result = outcome.unwrap_or(Err(FetchError::Lost));
      // Receiver may already be gone
      let _ = tx.send(Completion {
        request_id,
        url,
        result,
      });
    });

    self.in_flight = Some(InFlight { request_id, token });
  }

  /// Mark the current request as superseded. It keeps running so its payload
  /// can still land in the cache.
  fn supersede_in_flight(&mut self) {
    if let Some(in_flight) = self.in_flight.take() {
      debug!(label = %self.label, request_id = in_flight.request_id, "superseding request");
      in_flight.token.cancel();
    }
  }

  /// Cache a successful payload, then apply the completion if it still belongs
  /// to the current request.
  fn complete(&mut self, completion: Completion) -> bool {
    if self.torn_down {
      return false;
    }
    if let Ok(payload) = &completion.result {
      self.cache.insert(&completion.url, payload.clone());
    }

    let current = matches!(
      &self.in_flight,
      Some(in_flight)
        if in_flight.request_id == completion.request_id && !in_flight.token.is_cancelled()
    );
    if !current {
      warn!(
        label = %self.label,
        url = %completion.url,
        request_id = completion.request_id,
        "dropping stale response"
      );
      return false;
    }
    self.in_flight = None;

    match completion.result {
      Ok(payload) => {
        info!(label = %self.label, url = %completion.url, "fetched");
        let container = named_container(&completion.url, payload);
        self.dispatch(FetchAction::Fetched(container));
      }
      Err(e) => {
        warn!(label = %self.label, url = %completion.url, error = %e, "fetch failed");
        self.dispatch(FetchAction::Failed(e.to_string()));
      }
    }
    true
  }
}

impl Drop for Fetch {
  fn drop(&mut self) {
    self.shutdown.cancel();
  }
}

impl std::fmt::Debug for Fetch {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    f.debug_struct("Fetch")
      .field("label", &self.label)
      .field("url", &self.url)
      .field("state", &self.state)
      .field("cached", &self.cache.len())
      .field("in_flight", &self.in_flight.as_ref().map(|f| f.request_id))
      .finish_non_exhaustive()
  }
}
