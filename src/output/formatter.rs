use std::io::IsTerminal;

use owo_colors::OwoColorize;
use terminal_size::{terminal_size, Width};

use crate::scoring::ScoreResult;
use crate::weather::types::{AnalysisKind, WeatherReading};

/// Check if stdout is a TTY (for auto-detecting color support)
pub fn should_use_colors() -> bool {
    std::io::stdout().is_terminal()
}

/// Format a likelihood as a whole percentage ("55%")
pub fn format_percent(score: f64) -> String {
    format!("{:.0}%", score.clamp(0.0, 1.0) * 100.0)
}

/// Bar width shrinks on narrow terminals; pipes get the full width.
fn bar_width() -> usize {
    match terminal_size() {
        Some((Width(w), _)) if (w as usize) < 60 => 10,
        _ => 20,
    }
}

fn bar(score: f64, width: usize) -> String {
    let filled = (score.clamp(0.0, 1.0) * width as f64).round() as usize;
    format!("{}{}", "█".repeat(filled), "░".repeat(width - filled))
}

/// Single summary line for the reading that produced the scores
pub fn format_reading_line(kind: AnalysisKind, reading: &WeatherReading, use_colors: bool) -> String {
    let line = format!(
        "{}: {:.1} °C | {:.0}% humidity | {:.1} km/h wind",
        kind.as_str(),
        reading.temperature,
        reading.humidity,
        reading.wind_speed
    );
    if use_colors {
        line.dimmed().to_string()
    } else {
        line
    }
}

/// Format the five scores as rows of label, percentage, and bar, highest
/// likelihood first.
pub fn format_score_table(result: &ScoreResult, use_colors: bool) -> String {
    let mut rows = result.scores.rows().to_vec();
    rows.sort_by(|a, b| b.1.total_cmp(&a.1));

    let width = bar_width();

    rows.iter()
        .map(|(label, score)| {
            let pct = format!("{:>4}", format_percent(*score));
            let meter = bar(*score, width);

            if use_colors {
                let meter = if *score >= 0.7 {
                    meter.red().to_string()
                } else if *score >= 0.4 {
                    meter.yellow().to_string()
                } else {
                    meter.green().to_string()
                };
                format!("{:<13}  {}  {}", label, pct.bold(), meter)
            } else {
                format!("{:<13}  {}  {}", label, pct, meter)
            }
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// Per-axis detail for verbose mode
pub fn format_breakdown(result: &ScoreResult) -> String {
    result
        .breakdown
        .iter()
        .map(|c| {
            format!(
                "  {:<13} {:>4}  {}",
                c.label,
                format_percent(c.score),
                c.description
            )
        })
        .collect::<Vec<_>>()
        .join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scoring::{score_conditions, ScoringConfig};

    fn sample_result() -> ScoreResult {
        let reading = WeatherReading {
            temperature: 30.5,
            humidity: 45.0,
            wind_speed: 20.0,
        };
        score_conditions(&reading, None, &ScoringConfig::default())
    }

    #[test]
    fn test_format_percent() {
        assert_eq!(format_percent(0.55), "55%");
        assert_eq!(format_percent(0.0), "0%");
        assert_eq!(format_percent(1.0), "100%");
        assert_eq!(format_percent(1.7), "100%");
    }

    #[test]
    fn test_bar_fills_proportionally() {
        assert_eq!(bar(0.0, 10), "░░░░░░░░░░");
        assert_eq!(bar(1.0, 10), "██████████");
        assert_eq!(bar(0.5, 10), "█████░░░░░");
    }

    #[test]
    fn test_table_sorted_by_likelihood() {
        let table = format_score_table(&sample_result(), false);
        let lines: Vec<&str> = table.lines().collect();
        assert_eq!(lines.len(), 5);
        // 30.5 °C / 45% / 20 km/h: Very Hot (55%) leads, Very Cold (0%) trails
        assert!(lines[0].starts_with("Very Hot"));
        assert!(lines[4].starts_with("Very Cold"));
        assert!(lines[0].contains("55%"));
    }

    #[test]
    fn test_table_plain_output_has_no_escape_codes() {
        let table = format_score_table(&sample_result(), false);
        assert!(!table.contains('\x1b'));
    }

    #[test]
    fn test_reading_line() {
        let reading = WeatherReading {
            temperature: 30.5,
            humidity: 45.0,
            wind_speed: 20.0,
        };
        let line = format_reading_line(AnalysisKind::Forecast, &reading, false);
        assert_eq!(line, "forecast: 30.5 °C | 45% humidity | 20.0 km/h wind");
    }

    #[test]
    fn test_breakdown_lists_every_axis() {
        let detail = format_breakdown(&sample_result());
        for label in ["Very Hot", "Very Cold", "Very Windy", "Very Humid", "Uncomfortable"] {
            assert!(detail.contains(label));
        }
        assert!(detail.contains("25..35"));
    }
}
