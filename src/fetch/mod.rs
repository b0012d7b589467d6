mod basic;
mod client;
pub mod auth;

pub use basic::BasicClient;
pub use client::HttpClient;

use anyhow::{Context, Result};
use serde::de::DeserializeOwned;
use tracing::debug;

/// Issues a single GET and decodes the JSON body.
///
/// # Errors
///
/// Fails on transport errors, on any non-success status and when the body
/// is not valid JSON for `T`. Nothing is retried. The request URL is
/// stripped from reqwest's errors since decorators may have put secrets in it.
pub async fn fetch_json<C: HttpClient, T: DeserializeOwned>(
    client: &C,
    url: reqwest::Url,
) -> Result<T> {
    let shown = url.to_string();
    let req = reqwest::Request::new(reqwest::Method::GET, url);

    let resp = client
        .execute(req)
        .await
        .map_err(reqwest::Error::without_url)
        .with_context(|| format!("GET {shown} failed"))?;
    let status = resp.status();
    debug!(%status, "Response received");

    let resp = resp
        .error_for_status()
        .map_err(reqwest::Error::without_url)
        .with_context(|| format!("GET {shown} returned {status}"))?;

    resp.json::<T>()
        .await
        .map_err(reqwest::Error::without_url)
        .with_context(|| format!("Response from {shown} is not the expected JSON"))
}
