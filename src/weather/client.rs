use anyhow::{anyhow, Context, Result};
use std::time::Duration;
use tokio_retry::{strategy::ExponentialBackoff, Retry};

use super::cache::{read_cached, write_cached, CacheConfig};

pub const USER_AGENT: &str = concat!("fairweather/", env!("CARGO_PKG_VERSION"));

/// Create the HTTP client shared by all Open-Meteo calls
pub fn create_client() -> Result<reqwest::Client> {
    reqwest::Client::builder()
        .timeout(Duration::from_secs(10))
        .user_agent(USER_AGENT)
        .build()
        .context("Failed to create HTTP client")
}

/// GET a JSON body, going through the disk cache when enabled.
///
/// `max_age` limits how stale a cached entry may be; `None` means cached
/// entries never expire (archive data does not change). Network fetches retry
/// with exponential backoff; cache writes are best-effort.
pub async fn get_json(
    client: &reqwest::Client,
    cache: &CacheConfig,
    url: &str,
    max_age: Option<Duration>,
    verbose: bool,
) -> Result<String> {
    if cache.enabled {
        if let Some(body) = read_cached(&cache.path, url, max_age) {
            if verbose {
                eprintln!("  cache hit: {}", url);
            }
            return Ok(body);
        }
    }

    // Retry strategy: exponential backoff with 3 attempts
    let retry_strategy = ExponentialBackoff::from_millis(100)
        .max_delay(Duration::from_secs(5))
        .take(3);

    let body = Retry::spawn(retry_strategy, || async {
        let response = client.get(url).send().await.map_err(|e| {
            if e.is_timeout() {
                anyhow!("Request timed out. The weather service may be slow or unreachable.")
            } else if e.is_connect() {
                anyhow!("Could not reach the weather service. Check your network connection.")
            } else {
                anyhow!("Request failed: {}", e)
            }
        })?;

        let status = response.status();
        if status.as_u16() == 429 {
            return Err(anyhow!(
                "The weather service is rate limiting requests. Wait a minute and try again."
            ));
        }
        if !status.is_success() {
            let reason = response.text().await.unwrap_or_default();
            return Err(anyhow!(
                "The weather service rejected the request ({}): {}",
                status,
                reason.trim()
            ));
        }

        response
            .text()
            .await
            .map_err(|e| anyhow!("Failed to read response body: {}", e))
    })
    .await?;

    if cache.enabled {
        write_cached(&cache.path, url, &body);
    }

    Ok(body)
}
