use serde::{Deserialize, Serialize};

/// A scoring band for one weather axis: the metric value at which the
/// condition's likelihood leaves 0.0 (`start`) and the value at which it
/// saturates to 1.0 (`end`).
///
/// `end < start` is valid and means the likelihood rises as the value falls
/// (the cold axis).
#[derive(Debug, Clone, Copy, Deserialize, Serialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct Band {
    pub start: f64,
    pub end: f64,
}

impl Band {
    pub const HEAT: Band = Band {
        start: 25.0,
        end: 35.0,
    };
    pub const COLD: Band = Band {
        start: 15.0,
        end: 5.0,
    };
    pub const WIND: Band = Band {
        start: 0.0,
        end: 40.0,
    };
    pub const HUMIDITY: Band = Band {
        start: 0.0,
        end: 90.0,
    };

    /// Clamped linear position of `value` inside the band: 0.0 at or before
    /// `start`, 1.0 at or past `end`, linear in between.
    pub fn position(&self, value: f64) -> f64 {
        ((value - self.start) / (self.end - self.start)).clamp(0.0, 1.0)
    }

    /// A band with equal or non-finite endpoints has no slope to
    /// interpolate along.
    pub fn is_degenerate(&self) -> bool {
        !self.start.is_finite() || !self.end.is_finite() || self.start == self.end
    }
}

/// Relative overshoot of `actual` past a comfort `threshold`, floored at zero.
///
/// Returns `None` when the threshold is not a positive finite number: dividing
/// by a zero or negative threshold could manufacture an unbounded excess, so
/// the dimension is skipped instead.
pub fn threshold_excess(actual: f64, threshold: f64) -> Option<f64> {
    if !threshold.is_finite() || threshold <= 0.0 {
        return None;
    }
    Some(((actual - threshold) / threshold).max(0.0))
}
