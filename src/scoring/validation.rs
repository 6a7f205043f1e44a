use super::bands::Band;
use super::config::ScoringConfig;

/// Validate the scoring band table at startup.
/// Returns all validation errors at once (not just the first).
pub fn validate_scoring(config: &ScoringConfig) -> Result<(), Vec<String>> {
    let mut errors = Vec::new();

    let axes: [(&str, Option<Band>); 4] = [
        ("scoring.heat", config.heat),
        ("scoring.cold", config.cold),
        ("scoring.wind", config.wind),
        ("scoring.humidity", config.humidity),
    ];

    for (path, band) in axes {
        let Some(band) = band else { continue };
        if !band.start.is_finite() || !band.end.is_finite() {
            errors.push(format!(
                "{}: band endpoints must be finite numbers (got {}..{})",
                path, band.start, band.end
            ));
        } else if band.start == band.end {
            errors.push(format!(
                "{}: band endpoints must differ (got {}..{})",
                path, band.start, band.end
            ));
        }
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}
