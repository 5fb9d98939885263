use crate::fetch::{FetchError, Transport};
use color_eyre::{eyre::eyre, Result};
use futures::future::BoxFuture;
use futures::FutureExt;
use serde_json::Value;

/// HTTP transport for the WordPress REST API
#[derive(Clone)]
pub struct WpClient {
  client: reqwest::Client,
}

impl WpClient {
  pub fn new() -> Result<Self> {
    let client = reqwest::Client::builder()
      .user_agent(concat!("wpfolio/", env!("CARGO_PKG_VERSION")))
      .build()
      .map_err(|e| eyre!("Failed to create HTTP client: {}", e))?;

    Ok(Self { client })
  }

  /// GET `url` and parse the body as JSON.
  ///
  /// Non-success statuses count as network failures; the body is only parsed
  /// once the status is known to be good.
  pub async fn fetch_json(&self, url: &str) -> Result<Value, FetchError> {
    let response = self
      .client
      .get(url)
      .send()
      .await
      .map_err(|e| FetchError::Network(e.to_string()))?;

    let status = response.status();
    if !status.is_success() {
      return Err(FetchError::Network(format!("HTTP {} for {}", status, url)));
    }

    let body = response
      .bytes()
      .await
      .map_err(|e| FetchError::Network(e.to_string()))?;

    serde_json::from_slice(&body).map_err(|e| FetchError::Parse(e.to_string()))
  }
}

impl Transport for WpClient {
  fn get_json(&self, url: &str) -> BoxFuture<'static, Result<Value, FetchError>> {
    let client = self.clone();
    let url = url.to_string();
    async move { client.fetch_json(&url).await }.boxed()
  }
}
