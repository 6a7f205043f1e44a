use serde::{Deserialize, Serialize};

use super::bands::Band;

/// Scoring band table.
///
/// Each axis maps one weather metric onto a 0..1 likelihood via clamped
/// linear interpolation. Absent axes fall back to the built-in bands, so a
/// config only needs to name the axes it wants to move.
///
/// Example YAML:
/// ```yaml
/// scoring:
///   heat: { start: 25, end: 35 }
///   cold: { start: 15, end: 5 }
///   wind: { start: 0, end: 40 }
///   humidity: { start: 0, end: 90 }
/// ```
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct ScoringConfig {
    /// Temperature band for the very-hot score, °C ascending
    #[serde(default)]
    pub heat: Option<Band>,

    /// Temperature band for the very-cold score, °C descending
    #[serde(default)]
    pub cold: Option<Band>,

    /// Wind speed band for the very-windy score, km/h ascending
    #[serde(default)]
    pub wind: Option<Band>,

    /// Relative humidity band for the very-humid score, % ascending
    #[serde(default)]
    pub humidity: Option<Band>,
}

impl Default for ScoringConfig {
    fn default() -> Self {
        Self {
            heat: Some(Band::HEAT),
            cold: Some(Band::COLD),
            wind: Some(Band::WIND),
            humidity: Some(Band::HUMIDITY),
        }
    }
}

impl ScoringConfig {
    pub fn heat_band(&self) -> Band {
        self.heat.unwrap_or(Band::HEAT)
    }

    pub fn cold_band(&self) -> Band {
        self.cold.unwrap_or(Band::COLD)
    }

    pub fn wind_band(&self) -> Band {
        self.wind.unwrap_or(Band::WIND)
    }

    pub fn humidity_band(&self) -> Band {
        self.humidity.unwrap_or(Band::HUMIDITY)
    }
}

/// Personal comfort thresholds. Each metric is independently optional; absent
/// means no preference on that axis.
#[derive(Debug, Clone, Default, Deserialize, Serialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct ComfortThresholds {
    /// Temperature in °C beyond which the user is uncomfortable
    #[serde(default)]
    pub temperature: Option<f64>,

    /// Relative humidity in % beyond which the user is uncomfortable
    #[serde(default)]
    pub humidity: Option<f64>,

    /// Wind speed in km/h beyond which the user is uncomfortable
    #[serde(default)]
    pub wind_speed: Option<f64>,
}

impl ComfortThresholds {
    pub fn is_empty(&self) -> bool {
        self.temperature.is_none() && self.humidity.is_none() && self.wind_speed.is_none()
    }

    /// Drop values that are not finite numbers. A threshold that failed to
    /// parse is treated as absent rather than failing the run.
    pub fn sanitized(&self) -> Self {
        let keep = |v: Option<f64>| v.filter(|n| n.is_finite());
        Self {
            temperature: keep(self.temperature),
            humidity: keep(self.humidity),
            wind_speed: keep(self.wind_speed),
        }
    }

    /// Per-field merge: values set in `overrides` win.
    pub fn merged(&self, overrides: &ComfortThresholds) -> Self {
        Self {
            temperature: overrides.temperature.or(self.temperature),
            humidity: overrides.humidity.or(self.humidity),
            wind_speed: overrides.wind_speed.or(self.wind_speed),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_scoring_config() {
        let config = ScoringConfig::default();

        assert_eq!(config.heat, Some(Band::HEAT));
        assert_eq!(config.cold, Some(Band::COLD));
        assert_eq!(config.wind, Some(Band::WIND));
        assert_eq!(config.humidity, Some(Band::HUMIDITY));
    }

    #[test]
    fn test_partial_config_falls_back_to_builtin_bands() {
        let yaml = r#"
heat: { start: 28, end: 38 }
"#;
        let config: ScoringConfig = serde_saphyr::from_str(yaml).unwrap();
        assert_eq!(
            config.heat_band(),
            Band {
                start: 28.0,
                end: 38.0
            }
        );
        assert_eq!(config.cold_band(), Band::COLD);
        assert_eq!(config.wind_band(), Band::WIND);
        assert_eq!(config.humidity_band(), Band::HUMIDITY);
    }

    #[test]
    fn test_empty_scoring_config_parse() {
        let yaml = "{}";
        let config: ScoringConfig = serde_saphyr::from_str(yaml).unwrap();
        assert!(config.heat.is_none());
        assert!(config.cold.is_none());
        assert!(config.wind.is_none());
        assert!(config.humidity.is_none());
    }

    #[test]
    fn test_full_scoring_config_parse() {
        let yaml = r#"
heat: { start: 25, end: 35 }
cold: { start: 15, end: 5 }
wind: { start: 0, end: 40 }
humidity: { start: 0, end: 90 }
"#;
        let config: ScoringConfig = serde_saphyr::from_str(yaml).unwrap();
        assert_eq!(config, ScoringConfig::default());
    }

    #[test]
    fn test_thresholds_parse_all_optional() {
        let yaml = r#"
temperature: 30
wind_speed: 25
"#;
        let thresholds: ComfortThresholds = serde_saphyr::from_str(yaml).unwrap();
        assert_eq!(thresholds.temperature, Some(30.0));
        assert_eq!(thresholds.humidity, None);
        assert_eq!(thresholds.wind_speed, Some(25.0));
        assert!(!thresholds.is_empty());
    }

    #[test]
    fn test_thresholds_sanitized_drops_non_finite() {
        let thresholds = ComfortThresholds {
            temperature: Some(f64::NAN),
            humidity: Some(80.0),
            wind_speed: Some(f64::INFINITY),
        };
        let clean = thresholds.sanitized();
        assert_eq!(clean.temperature, None);
        assert_eq!(clean.humidity, Some(80.0));
        assert_eq!(clean.wind_speed, None);
    }

    #[test]
    fn test_thresholds_merged_overrides_win() {
        let base = ComfortThresholds {
            temperature: Some(30.0),
            humidity: Some(80.0),
            wind_speed: None,
        };
        let overrides = ComfortThresholds {
            temperature: Some(28.0),
            humidity: None,
            wind_speed: Some(25.0),
        };
        let merged = base.merged(&overrides);
        assert_eq!(merged.temperature, Some(28.0));
        assert_eq!(merged.humidity, Some(80.0));
        assert_eq!(merged.wind_speed, Some(25.0));
    }
}
