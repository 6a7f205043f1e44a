use serde::{Deserialize, Serialize};

use crate::scoring::{ComfortThresholds, ScoringConfig};

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct Config {
    /// Default location when none is given on the command line
    #[serde(default)]
    pub location: Option<String>,

    /// Personal comfort thresholds applied to every analysis
    #[serde(default)]
    pub thresholds: Option<ComfortThresholds>,

    /// Scoring band overrides
    #[serde(default)]
    pub scoring: Option<ScoringConfig>,

    /// How many past years the history command averages (default 5)
    #[serde(default)]
    pub history_years: Option<u32>,

    #[serde(default)]
    pub cache: Option<CacheSettings>,
}

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct CacheSettings {
    #[serde(default)]
    pub enabled: Option<bool>,

    /// Maximum age for cached forecast and geocoding responses,
    /// as a humantime string (e.g. "1h", "30m")
    #[serde(default)]
    pub max_age: Option<String>,
}
