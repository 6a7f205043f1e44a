pub mod init;
mod schema;

pub use schema::{CacheSettings, Config};

use anyhow::{Context, Result};
use std::fs;
use std::path::PathBuf;
use std::time::Duration;

use crate::weather::cache::{get_cache_path, CacheConfig};

const DEFAULT_CACHE_MAX_AGE: Duration = Duration::from_secs(3600);
pub const DEFAULT_HISTORY_YEARS: u32 = 5;

/// Get the config directory path (~/.config/fairweather/)
pub fn get_config_dir() -> PathBuf {
    let home = dirs::home_dir().expect("Could not determine home directory");
    home.join(".config").join("fairweather")
}

/// Get the default config file path (~/.config/fairweather/config.yaml)
pub fn get_config_path() -> PathBuf {
    get_config_dir().join("config.yaml")
}

/// Ensure the config directory exists
pub fn ensure_config_dir() -> Result<()> {
    let config_dir = get_config_dir();
    if !config_dir.exists() {
        fs::create_dir_all(&config_dir).with_context(|| {
            format!(
                "Failed to create config directory at {}",
                config_dir.display()
            )
        })?;
    }
    Ok(())
}

/// Load configuration from a YAML file
///
/// A missing file is not an error: every setting has a default, so this
/// returns `Config::default()` when nothing is on disk. An explicitly given
/// path that does not exist is still an error.
///
/// # Arguments
///
/// * `path` - Optional path to config file. If None, uses default path
///   (~/.config/fairweather/config.yaml)
pub fn load_config(path: Option<PathBuf>) -> Result<Config> {
    let (config_path, explicit) = match path {
        Some(p) => (p, true),
        None => (get_config_path(), false),
    };

    if !config_path.exists() {
        if explicit {
            anyhow::bail!("Config file not found at {}", config_path.display());
        }
        return Ok(Config::default());
    }

    let config_content = fs::read_to_string(&config_path)
        .with_context(|| format!("Failed to read config file at {}", config_path.display()))?;

    let config: Config = serde_saphyr::from_str(&config_content).with_context(|| {
        format!(
            "Failed to parse config: invalid YAML in {}",
            config_path.display()
        )
    })?;

    Ok(config)
}

/// Resolve the file config's cache settings into a runtime cache config
pub fn cache_config(config: &Config, no_cache: bool) -> Result<CacheConfig> {
    let settings = config.cache.as_ref();

    let max_age = match settings.and_then(|s| s.max_age.as_deref()) {
        Some(s) => humantime::parse_duration(s)
            .with_context(|| format!("Invalid cache.max_age '{}' (try \"1h\" or \"30m\")", s))?,
        None => DEFAULT_CACHE_MAX_AGE,
    };

    Ok(CacheConfig {
        enabled: settings.and_then(|s| s.enabled).unwrap_or(true) && !no_cache,
        max_age,
        path: get_cache_path(),
    })
}
