use super::bands::threshold_excess;
use super::config::{ComfortThresholds, ScoringConfig};
use crate::weather::types::WeatherReading;

/// The five condition likelihoods, each clamped to [0.0, 1.0].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LikelihoodScores {
    pub very_hot: f64,
    pub very_cold: f64,
    pub very_windy: f64,
    pub very_humid: f64,
    pub uncomfortable: f64,
}

impl LikelihoodScores {
    /// Largest of the four single-axis scores.
    pub fn axis_peak(&self) -> f64 {
        self.very_hot
            .max(self.very_cold)
            .max(self.very_windy)
            .max(self.very_humid)
    }

    /// Display label and value for every score, in declaration order.
    pub fn rows(&self) -> [(&'static str, f64); 5] {
        [
            ("Very Hot", self.very_hot),
            ("Very Cold", self.very_cold),
            ("Very Windy", self.very_windy),
            ("Very Humid", self.very_humid),
            ("Uncomfortable", self.uncomfortable),
        ]
    }
}

#[derive(Debug, Clone)]
pub struct ConditionContribution {
    pub label: &'static str,   // e.g. "Very Hot"
    pub description: String,   // e.g. "30.5 °C in the 25..35 °C band"
    pub score: f64,
}

#[derive(Debug, Clone)]
pub struct ScoreResult {
    pub scores: LikelihoodScores,
    pub breakdown: Vec<ConditionContribution>,
}

/// Score a weather reading against the band table and optional comfort
/// thresholds.
///
/// Pure and total for finite input: four independent clamped interpolations
/// plus a composite discomfort score. Without thresholds the composite is the
/// maximum of the four axis scores; with thresholds the worst relative
/// overshoot past a threshold is added on top before clamping, so a breached
/// threshold always raises the score and a slack one never lowers it.
/// Thresholds that are not positive finite numbers do not participate.
pub fn score_conditions(
    reading: &WeatherReading,
    thresholds: Option<&ComfortThresholds>,
    config: &ScoringConfig,
) -> ScoreResult {
    let mut breakdown = Vec::new();

    let heat = config.heat_band();
    let very_hot = heat.position(reading.temperature);
    breakdown.push(ConditionContribution {
        label: "Very Hot",
        description: format!(
            "{:.1} °C in the {:.0}..{:.0} °C band",
            reading.temperature, heat.start, heat.end
        ),
        score: very_hot,
    });

    let cold = config.cold_band();
    let very_cold = cold.position(reading.temperature);
    breakdown.push(ConditionContribution {
        label: "Very Cold",
        description: format!(
            "{:.1} °C in the {:.0}..{:.0} °C band",
            reading.temperature, cold.start, cold.end
        ),
        score: very_cold,
    });

    let wind = config.wind_band();
    let very_windy = wind.position(reading.wind_speed);
    breakdown.push(ConditionContribution {
        label: "Very Windy",
        description: format!(
            "{:.1} km/h in the {:.0}..{:.0} km/h band",
            reading.wind_speed, wind.start, wind.end
        ),
        score: very_windy,
    });

    let humidity = config.humidity_band();
    let very_humid = humidity.position(reading.humidity);
    breakdown.push(ConditionContribution {
        label: "Very Humid",
        description: format!(
            "{:.0}% in the {:.0}..{:.0}% band",
            reading.humidity, humidity.start, humidity.end
        ),
        score: very_humid,
    });

    let axis_peak = very_hot.max(very_cold).max(very_windy).max(very_humid);

    // Worst relative overshoot past any usable threshold, if thresholds
    // were given at all.
    let worst_excess = thresholds.and_then(|t| {
        let candidates = [
            ("temperature", t.temperature, reading.temperature),
            ("humidity", t.humidity, reading.humidity),
            ("wind speed", t.wind_speed, reading.wind_speed),
        ];
        candidates
            .iter()
            .filter_map(|(dim, threshold, actual)| {
                threshold
                    .and_then(|thr| threshold_excess(*actual, thr).map(|e| (*dim, thr, e)))
            })
            .max_by(|a, b| a.2.total_cmp(&b.2))
    });

    let (uncomfortable, description) = match worst_excess {
        Some((dim, thr, excess)) if excess > 0.0 => (
            (axis_peak + excess).clamp(0.0, 1.0),
            format!(
                "highest condition score raised by {:.0}% overshoot of the {} {} threshold",
                excess * 100.0,
                thr,
                dim
            ),
        ),
        Some(_) => (
            axis_peak,
            "no comfort threshold exceeded; highest of the four condition scores".to_string(),
        ),
        None => (
            axis_peak,
            "highest of the four condition scores".to_string(),
        ),
    };

    breakdown.push(ConditionContribution {
        label: "Uncomfortable",
        description,
        score: uncomfortable,
    });

    ScoreResult {
        scores: LikelihoodScores {
            very_hot,
            very_cold,
            very_windy,
            very_humid,
            uncomfortable,
        },
        breakdown,
    }
}
