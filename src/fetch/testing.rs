//! In-memory transport for tests.

use super::{FetchError, Transport};
use futures::future::BoxFuture;
use futures::FutureExt;
use serde_json::Value;
use std::collections::HashMap;
use std::sync::Mutex;
use tokio::sync::oneshot;

enum Reply {
  /// Answered immediately, every time
  Ready(Result<Value, FetchError>),
  /// Answered once, when the test sends on the paired sender
  Gated(Option<oneshot::Receiver<Result<Value, FetchError>>>),
  /// The request future panics
  Panic,
}

/// Transport whose answers are scripted per URL, counting calls.
#[derive(Default)]
pub struct FakeTransport {
  replies: Mutex<HashMap<String, Reply>>,
  calls: Mutex<HashMap<String, usize>>,
}

impl FakeTransport {
  pub fn new() -> Self {
    Self::default()
  }

  pub fn respond(&self, url: &str, payload: Value) {
    self.set(url, Reply::Ready(Ok(payload)));
  }

  pub fn fail(&self, url: &str, error: FetchError) {
    self.set(url, Reply::Ready(Err(error)));
  }

  /// Hold the next request for `url` until the returned sender fires.
  pub fn gate(&self, url: &str) -> oneshot::Sender<Result<Value, FetchError>> {
    let (tx, rx) = oneshot::channel();
    self.set(url, Reply::Gated(Some(rx)));
    tx
  }

  pub fn explode(&self, url: &str) {
    self.set(url, Reply::Panic);
  }

  pub fn calls(&self, url: &str) -> usize {
    self.calls.lock().unwrap().get(url).copied().unwrap_or(0)
  }

  pub fn total_calls(&self) -> usize {
    self.calls.lock().unwrap().values().sum()
  }

  fn set(&self, url: &str, reply: Reply) {
    self.replies.lock().unwrap().insert(url.to_string(), reply);
  }
}

impl Transport for FakeTransport {
  fn get_json(&self, url: &str) -> BoxFuture<'static, Result<Value, FetchError>> {
    *self.calls.lock().unwrap().entry(url.to_string()).or_default() += 1;

    let mut replies = self.replies.lock().unwrap();
    match replies.get_mut(url) {
      Some(Reply::Ready(result)) => {
        let result = result.clone();
        async move { result }.boxed()
      }
      Some(Reply::Gated(rx)) => match rx.take() {
        Some(rx) => async move {
          rx.await
            .unwrap_or_else(|_| Err(FetchError::Network("gate dropped".to_string())))
        }
        .boxed(),
        None => futures::future::pending().boxed(),
      },
      Some(Reply::Panic) => explode().boxed(),
      None => {
        let url = url.to_string();
        async move { Err(FetchError::Network(format!("no route for {url}"))) }.boxed()
      }
    }
  }
}

async fn explode() -> Result<Value, FetchError> {
  panic!("transport panicked")
}
