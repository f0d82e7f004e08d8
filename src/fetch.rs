//! HTTP access for the two one-shot dataset downloads.
//!
//! The [`HttpClient`] trait is the seam: production code uses
//! [`BasicClient`] over reqwest, tests can substitute a canned client.

use anyhow::{Context, Result};
use async_trait::async_trait;

#[async_trait]
pub trait HttpClient: Send + Sync {
    async fn execute(&self, req: reqwest::Request) -> reqwest::Result<reqwest::Response>;
}

pub struct BasicClient(reqwest::Client);

impl BasicClient {
    pub fn new() -> Self {
        Self(reqwest::Client::new())
    }
}

impl Default for BasicClient {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl HttpClient for BasicClient {
    async fn execute(&self, req: reqwest::Request) -> reqwest::Result<reqwest::Response> {
        self.0.execute(req).await
    }
}

/// Downloads a dataset as raw bytes. Non-2xx responses are errors: a failed
/// fetch of either dataset aborts initialization, there is no retry.
pub async fn fetch_bytes<C: HttpClient>(client: &C, url: &str) -> Result<Vec<u8>> {
    let req = reqwest::Request::new(reqwest::Method::GET, url.parse()?);

    let resp = client
        .execute(req)
        .await
        .with_context(|| format!("fetching {url}"))?;
    let resp = resp
        .error_for_status()
        .with_context(|| format!("fetching {url}"))?;

    Ok(resp.bytes().await?.to_vec())
}
