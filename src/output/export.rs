use anyhow::{Context, Result};
use atomic_write_file::AtomicWriteFile;
use chrono::NaiveDateTime;
use std::io::Write;
use std::path::Path;

use crate::scoring::LikelihoodScores;
use crate::weather::types::{AnalysisKind, Coordinates, WeatherReading};

pub const CSV_HEADER: &str = "analysis,timestamp,latitude,longitude,temperature_c,humidity_pct,wind_speed_kmh,very_hot,very_cold,very_windy,very_humid,uncomfortable,report";

/// One analysis flattened for export
pub struct ExportRow<'a> {
    pub kind: AnalysisKind,
    pub when: NaiveDateTime,
    pub coords: Coordinates,
    pub reading: &'a WeatherReading,
    pub scores: &'a LikelihoodScores,
    pub report: &'a str,
}

/// Quote a field when it contains a comma, quote, or newline; inner quotes
/// are doubled.
fn csv_field(value: &str) -> String {
    if value.contains(',') || value.contains('"') || value.contains('\n') {
        format!("\"{}\"", value.replace('"', "\"\""))
    } else {
        value.to_string()
    }
}

/// Format rows as CSV with a header line
pub fn format_csv(rows: &[ExportRow]) -> String {
    let mut out = String::from(CSV_HEADER);
    for row in rows {
        out.push('\n');
        out.push_str(&format!(
            "{},{},{:.4},{:.4},{:.1},{:.0},{:.1},{:.2},{:.2},{:.2},{:.2},{:.2},{}",
            row.kind.as_str(),
            row.when.format("%Y-%m-%dT%H:%M"),
            row.coords.latitude,
            row.coords.longitude,
            row.reading.temperature,
            row.reading.humidity,
            row.reading.wind_speed,
            row.scores.very_hot,
            row.scores.very_cold,
            row.scores.very_windy,
            row.scores.very_humid,
            row.scores.uncomfortable,
            csv_field(row.report),
        ));
    }
    out
}

/// Write an export atomically; the file is never left half-written.
pub fn write_export(path: &Path, content: &str) -> Result<()> {
    let mut file = AtomicWriteFile::open(path)
        .with_context(|| format!("Failed to open {} for writing", path.display()))?;

    file.write_all(content.as_bytes())
        .context("Failed to write export")?;
    file.write_all(b"\n").context("Failed to write export")?;

    file.commit().context("Failed to save export")?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{NaiveDate, NaiveTime};

    fn sample_row<'a>(
        reading: &'a WeatherReading,
        scores: &'a LikelihoodScores,
        report: &'a str,
    ) -> ExportRow<'a> {
        ExportRow {
            kind: AnalysisKind::Forecast,
            when: NaiveDateTime::new(
                NaiveDate::from_ymd_opt(2026, 8, 9).unwrap(),
                NaiveTime::from_hms_opt(14, 0, 0).unwrap(),
            ),
            coords: Coordinates {
                latitude: 40.7128,
                longitude: -74.006,
            },
            reading,
            scores,
            report,
        }
    }

    fn sample_scores() -> LikelihoodScores {
        LikelihoodScores {
            very_hot: 0.55,
            very_cold: 0.0,
            very_windy: 0.5,
            very_humid: 0.5,
            uncomfortable: 0.55,
        }
    }

    #[test]
    fn test_format_csv_empty() {
        assert_eq!(format_csv(&[]), CSV_HEADER);
    }

    #[test]
    fn test_format_csv_row() {
        let reading = WeatherReading {
            temperature: 30.5,
            humidity: 45.0,
            wind_speed: 20.0,
        };
        let scores = sample_scores();
        let csv = format_csv(&[sample_row(&reading, &scores, "Clear skies expected.")]);

        let lines: Vec<&str> = csv.lines().collect();
        assert_eq!(lines.len(), 2);
        assert_eq!(lines[0], CSV_HEADER);
        assert_eq!(
            lines[1],
            "forecast,2026-08-09T14:00,40.7128,-74.0060,30.5,45,20.0,0.55,0.00,0.50,0.50,0.55,Clear skies expected."
        );
    }

    #[test]
    fn test_report_with_commas_is_quoted() {
        let reading = WeatherReading {
            temperature: 30.5,
            humidity: 45.0,
            wind_speed: 20.0,
        };
        let scores = sample_scores();
        let report = "Hot, humid, and windy with \"gusts\".";
        let csv = format_csv(&[sample_row(&reading, &scores, report)]);

        assert!(csv.ends_with("\"Hot, humid, and windy with \"\"gusts\"\".\""));
    }

    #[test]
    fn test_plain_field_not_quoted() {
        assert_eq!(csv_field("plain"), "plain");
        assert_eq!(csv_field("a,b"), "\"a,b\"");
        assert_eq!(csv_field("say \"hi\""), "\"say \"\"hi\"\"\"");
    }

    #[test]
    fn test_write_export_creates_file() {
        let path = std::env::temp_dir().join("fairweather_test_export.csv");
        let _ = std::fs::remove_file(&path);

        write_export(&path, "analysis,timestamp").unwrap();
        let content = std::fs::read_to_string(&path).unwrap();
        assert_eq!(content, "analysis,timestamp\n");

        let _ = std::fs::remove_file(&path);
    }
}
