//! Retrieval of published CSV text, over HTTP or from disk.

mod client;

pub use client::{BasicClient, HttpClient};

use anyhow::{Context, Result, bail};
use tracing::debug;

/// Issues a GET for `url` and returns the body. Non-2xx responses are errors
/// carrying the status line.
pub async fn fetch_bytes<C: HttpClient + ?Sized>(client: &C, url: &str) -> Result<Vec<u8>> {
    let req = reqwest::Request::new(reqwest::Method::GET, url.parse()?);

    let resp = client.execute(req).await?;
    let status = resp.status();
    if !status.is_success() {
        bail!("{}", status);
    }
    Ok(resp.bytes().await?.to_vec())
}

/// Loads a dataset from a local path, or over HTTP when `location` is a URL.
#[tracing::instrument(skip(client))]
pub async fn fetch_source<C: HttpClient + ?Sized>(client: &C, location: &str) -> Result<Vec<u8>> {
    let bytes = if is_remote(location) {
        fetch_bytes(client, location).await?
    } else {
        tokio::fs::read(location)
            .await
            .with_context(|| format!("could not read {location}"))?
    };
    debug!(bytes = bytes.len(), "Source bytes received");
    Ok(bytes)
}

pub fn is_remote(location: &str) -> bool {
    location.starts_with("http://") || location.starts_with("https://")
}
