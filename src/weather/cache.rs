use chrono::Utc;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Configuration for HTTP response caching
#[derive(Clone, Debug)]
pub struct CacheConfig {
    pub enabled: bool, // false when --no-cache
    pub max_age: Duration,
    pub path: PathBuf,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            max_age: Duration::from_secs(3600),
            path: get_cache_path(),
        }
    }
}

/// Get the platform-appropriate cache directory for fairweather
pub fn get_cache_path() -> PathBuf {
    dirs::cache_dir()
        .map(|p| p.join("fairweather/http-cache"))
        .unwrap_or_else(|| {
            PathBuf::from(format!(
                "{}/.cache/fairweather/http-cache",
                std::env::var("HOME").unwrap_or_default()
            ))
        })
}

/// A cached response body with the time it was fetched.
///
/// Open-Meteo is unauthenticated and responses carry no useful validators, so
/// entries are stored whole and keyed by URL; freshness is an age check.
#[derive(Serialize, Deserialize)]
struct CacheEntry {
    fetched_at: i64, // unix seconds
    body: String,
}

/// Read a cached response body if one exists and is fresh enough.
/// `max_age: None` means entries never expire.
pub fn read_cached(cache_path: &Path, url: &str, max_age: Option<Duration>) -> Option<String> {
    let bytes = cacache::read_sync(cache_path, url).ok()?;
    let entry: CacheEntry = serde_json::from_slice(&bytes).ok()?;

    if let Some(max_age) = max_age {
        let age = Utc::now().timestamp() - entry.fetched_at;
        if age < 0 || age as u64 > max_age.as_secs() {
            return None;
        }
    }

    Some(entry.body)
}

/// Store a response body (fire-and-forget, disk errors never fail a fetch)
pub fn write_cached(cache_path: &Path, url: &str, body: &str) {
    let entry = CacheEntry {
        fetched_at: Utc::now().timestamp(),
        body: body.to_string(),
    };
    if let Ok(serialized) = serde_json::to_vec(&entry) {
        let _ = cacache::write_sync(cache_path, url, &serialized);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::env;

    fn temp_cache(name: &str) -> PathBuf {
        let path = env::temp_dir().join(format!("fairweather_test_cache_{}", name));
        let _ = std::fs::remove_dir_all(&path);
        path
    }

    #[test]
    fn test_roundtrip() {
        let cache = temp_cache("roundtrip");
        let url = "https://example.com/v1/forecast?latitude=1";
        write_cached(&cache, url, "{\"hourly\":{}}");

        let body = read_cached(&cache, url, None).unwrap();
        assert_eq!(body, "{\"hourly\":{}}");
        let _ = std::fs::remove_dir_all(&cache);
    }

    #[test]
    fn test_miss_on_unknown_url() {
        let cache = temp_cache("miss");
        assert!(read_cached(&cache, "https://example.com/nope", None).is_none());
    }

    #[test]
    fn test_fresh_entry_honors_max_age() {
        let cache = temp_cache("max_age");
        let url = "https://example.com/v1/geocode?name=berlin";
        write_cached(&cache, url, "{}");

        // Just written: fresh under any positive max age
        assert!(read_cached(&cache, url, Some(Duration::from_secs(60))).is_some());
        // Zero max age expires immediately unless read in the same second;
        // the no-expiry path must still hit
        assert!(read_cached(&cache, url, None).is_some());
        let _ = std::fs::remove_dir_all(&cache);
    }

    #[test]
    fn test_stale_entry_expires() {
        let cache = temp_cache("stale");
        let url = "https://example.com/v1/forecast?latitude=2";
        let entry = CacheEntry {
            fetched_at: Utc::now().timestamp() - 7200,
            body: "{}".to_string(),
        };
        cacache::write_sync(&cache, url, serde_json::to_vec(&entry).unwrap()).unwrap();

        assert!(read_cached(&cache, url, Some(Duration::from_secs(3600))).is_none());
        assert!(read_cached(&cache, url, None).is_some());
        let _ = std::fs::remove_dir_all(&cache);
    }
}
