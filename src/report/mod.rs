use chrono::NaiveDateTime;

use crate::geocode::ResolvedLocation;
use crate::scoring::{ComfortThresholds, LikelihoodScores};
use crate::weather::types::{AnalysisKind, WeatherReading};

/// Plain-language qualifier for a likelihood score.
pub fn qualifier(score: f64) -> &'static str {
    if score >= 0.9 {
        "near-certain"
    } else if score >= 0.7 {
        "very likely"
    } else if score >= 0.4 {
        "likely"
    } else if score >= 0.15 {
        "possible"
    } else {
        "unlikely"
    }
}

/// Build the narrative report: restate the metrics and location, call out the
/// dominant adverse condition, and mention thresholds when they apply.
/// Deterministic string templating over values the scorer already produced.
pub fn narrative(
    kind: AnalysisKind,
    location: &ResolvedLocation,
    when: NaiveDateTime,
    reading: &WeatherReading,
    scores: &LikelihoodScores,
    thresholds: Option<&ComfortThresholds>,
) -> String {
    let source = match kind {
        AnalysisKind::Forecast => "Forecast",
        AnalysisKind::History => "Historical average",
    };

    let mut report = format!(
        "{} for {} ({:.2}, {:.2}) on {} at {}: {:.1} °C, {:.0}% humidity, wind around {:.1} km/h.",
        source,
        location.label,
        location.coords.latitude,
        location.coords.longitude,
        when.format("%Y-%m-%d"),
        when.format("%H:%M"),
        reading.temperature,
        reading.humidity,
        reading.wind_speed,
    );

    let axes = [
        ("very hot", scores.very_hot),
        ("very cold", scores.very_cold),
        ("very windy", scores.very_windy),
        ("very humid", scores.very_humid),
    ];
    let (dominant, peak) = axes
        .iter()
        .copied()
        .max_by(|a, b| a.1.total_cmp(&b.1))
        .unwrap_or(("very hot", 0.0));

    if peak >= 0.15 {
        report.push_str(&format!(
            " {} conditions are {} ({:.0}%).",
            capitalize(dominant),
            qualifier(peak),
            peak * 100.0
        ));
    } else {
        report.push_str(" No adverse conditions stand out.");
    }

    if thresholds.is_some_and(|t| !t.is_empty()) {
        report.push_str(&format!(
            " Against your comfort thresholds, discomfort is {} ({:.0}%).",
            qualifier(scores.uncomfortable),
            scores.uncomfortable * 100.0
        ));
    }

    report
}

fn capitalize(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().collect::<String>() + chars.as_str(),
        None => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::weather::types::Coordinates;
    use chrono::{NaiveDate, NaiveTime};

    fn sample() -> (ResolvedLocation, NaiveDateTime, WeatherReading, LikelihoodScores) {
        let location = ResolvedLocation {
            label: "New York, United States".to_string(),
            coords: Coordinates {
                latitude: 40.71,
                longitude: -74.0,
            },
        };
        let when = NaiveDateTime::new(
            NaiveDate::from_ymd_opt(2026, 8, 9).unwrap(),
            NaiveTime::from_hms_opt(14, 0, 0).unwrap(),
        );
        let reading = WeatherReading {
            temperature: 30.5,
            humidity: 45.0,
            wind_speed: 20.0,
        };
        let scores = LikelihoodScores {
            very_hot: 0.55,
            very_cold: 0.0,
            very_windy: 0.5,
            very_humid: 0.5,
            uncomfortable: 0.55,
        };
        (location, when, reading, scores)
    }

    #[test]
    fn test_qualifier_bands() {
        assert_eq!(qualifier(0.0), "unlikely");
        assert_eq!(qualifier(0.2), "possible");
        assert_eq!(qualifier(0.5), "likely");
        assert_eq!(qualifier(0.8), "very likely");
        assert_eq!(qualifier(1.0), "near-certain");
    }

    #[test]
    fn test_narrative_restates_metrics_and_location() {
        let (location, when, reading, scores) = sample();
        let report = narrative(
            AnalysisKind::Forecast,
            &location,
            when,
            &reading,
            &scores,
            None,
        );
        assert!(report.starts_with("Forecast for New York, United States (40.71, -74.00)"));
        assert!(report.contains("2026-08-09 at 14:00"));
        assert!(report.contains("30.5 °C"));
        assert!(report.contains("45% humidity"));
        assert!(report.contains("20.0 km/h"));
        assert!(report.contains("Very hot conditions are likely (55%)."));
        assert!(!report.contains("comfort thresholds"));
    }

    #[test]
    fn test_narrative_history_wording() {
        let (location, when, reading, scores) = sample();
        let report = narrative(
            AnalysisKind::History,
            &location,
            when,
            &reading,
            &scores,
            None,
        );
        assert!(report.starts_with("Historical average for"));
    }

    #[test]
    fn test_narrative_mentions_thresholds_when_supplied() {
        let (location, when, reading, mut scores) = sample();
        scores.uncomfortable = 0.72;
        let thresholds = ComfortThresholds {
            temperature: Some(28.0),
            ..Default::default()
        };
        let report = narrative(
            AnalysisKind::Forecast,
            &location,
            when,
            &reading,
            &scores,
            Some(&thresholds),
        );
        assert!(report.contains("comfort thresholds"));
        assert!(report.contains("very likely (72%)"));
    }

    #[test]
    fn test_narrative_calm_conditions() {
        let (location, when, _, _) = sample();
        let reading = WeatherReading {
            temperature: 20.0,
            humidity: 10.0,
            wind_speed: 2.0,
        };
        let scores = LikelihoodScores {
            very_hot: 0.0,
            very_cold: 0.0,
            very_windy: 0.05,
            very_humid: 0.11,
            uncomfortable: 0.11,
        };
        let report = narrative(
            AnalysisKind::Forecast,
            &location,
            when,
            &reading,
            &scores,
            None,
        );
        assert!(report.contains("No adverse conditions stand out."));
    }
}
