use anyhow::{Context, Error, Result, anyhow};
use serde::de::DeserializeOwned;
use std::future::Future;
use std::time::Duration;
use tracing::debug;

const USER_AGENT: &str = "wallet-groups/0.1";

/// Builds the HTTP client shared by all providers, with a per-request timeout.
pub fn http_client(timeout: Duration) -> Result<reqwest::Client> {
    reqwest::Client::builder()
        .user_agent(USER_AGENT)
        .timeout(timeout)
        .build()
        .context("Failed to build HTTP client")
}

/// Retries an async operation with configurable attempts and delays
///
/// # Parameters
/// - `operation`: Closure returning a future
/// - `retries`: Number of retry attempts (total runs = 1 initial + retries)
/// - `delay_ms`: Milliseconds between retry attempts
///
/// # Returns
/// Either the successful result or the error after all attempts
pub async fn with_retry<F, Fut, T>(
    mut operation: F,
    retries: usize,
    delay_ms: u64,
) -> Result<T, Error>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<T, reqwest::Error>>,
{
    let mut attempt = 1;
    loop {
        match operation().await.map_err(anyhow::Error::from) {
            Ok(val) => return Ok(val),
            Err(err) => {
                if attempt > retries {
                    return Err(err);
                }
                debug!(
                    "Attempt {}/{} failed: {}. Retrying...",
                    attempt, retries, err
                );
                attempt += 1;
                tokio::time::sleep(Duration::from_millis(delay_ms)).await;
            }
        }
    }
}

/// Sends a request with retries and decodes a successful JSON body.
///
/// URLs are stripped from transport errors since some carry API keys.
pub async fn get_json<T, B>(build: B, what: &str) -> Result<T>
where
    T: DeserializeOwned,
    B: Fn() -> reqwest::RequestBuilder,
{
    let response = with_retry(
        || async { build().send().await.map_err(reqwest::Error::without_url) },
        2,
        300,
    )
    .await
    .with_context(|| format!("Request failed for {what}"))?;

    let status = response.status();
    if !status.is_success() {
        return Err(anyhow!("HTTP error: {} for {}", status, what));
    }

    let text = response
        .text()
        .await
        .with_context(|| format!("Failed to read response body for {what}"))?;
    debug!(what, "Received response");
    serde_json::from_str(&text)
        .with_context(|| format!("Failed to parse response for {what}: '{text}'"))
}
