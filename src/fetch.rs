use anyhow::{bail, Result};
use chrono::{Local, NaiveDate, NaiveDateTime, NaiveTime};

use crate::geocode::{self, ResolvedLocation};
use crate::report;
use crate::scoring::{score_conditions, ComfortThresholds, ScoreResult, ScoringConfig};
use crate::weather::cache::CacheConfig;
use crate::weather::types::{AnalysisKind, WeatherReading};
use crate::weather::{forecast, history};

/// One analysis request, assembled from CLI args and file config
pub struct AnalysisRequest {
    pub location: String,
    pub when: NaiveDateTime,
    pub kind: AnalysisKind,
    pub years: u32,
    pub thresholds: Option<ComfortThresholds>,
}

/// Everything the renderers and the exporter need
pub struct AnalysisOutcome {
    pub location: ResolvedLocation,
    pub when: NaiveDateTime,
    pub kind: AnalysisKind,
    pub reading: WeatherReading,
    pub result: ScoreResult,
    pub report: String,
}

/// Combine optional date and time strings into the event instant.
/// Defaults: today, 14:00.
pub fn event_datetime(date: Option<&str>, time: Option<&str>) -> Result<NaiveDateTime> {
    let date = match date {
        Some(s) => match NaiveDate::parse_from_str(s, "%Y-%m-%d") {
            Ok(d) => d,
            Err(_) => bail!("Invalid date '{}'. Use YYYY-MM-DD, e.g. 2026-08-09.", s),
        },
        None => Local::now().date_naive(),
    };

    let time = match time {
        Some(s) => match NaiveTime::parse_from_str(s, "%H:%M") {
            Ok(t) => t,
            Err(_) => bail!("Invalid time '{}'. Use 24-hour HH:MM, e.g. 14:00.", s),
        },
        None => NaiveTime::from_hms_opt(14, 0, 0).unwrap(),
    };

    Ok(NaiveDateTime::new(date, time))
}

/// Resolve the location, acquire a reading, score it, and build the report.
///
/// This function is called from main.rs for every data-producing subcommand
/// (forecast, history, export).
pub async fn run_analysis(
    client: &reqwest::Client,
    cache: &CacheConfig,
    scoring: &ScoringConfig,
    request: &AnalysisRequest,
    verbose: bool,
) -> Result<AnalysisOutcome> {
    let location = geocode::resolve(client, cache, &request.location, verbose).await?;

    let reading = match request.kind {
        AnalysisKind::Forecast => {
            forecast::fetch_forecast(client, cache, location.coords, request.when, verbose).await?
        }
        AnalysisKind::History => {
            history::fetch_history_average(
                client,
                cache,
                location.coords,
                request.when,
                request.years,
                verbose,
            )
            .await?
        }
    };

    if verbose {
        eprintln!(
            "Reading: {:.1} °C, {:.0}% humidity, {:.1} km/h wind",
            reading.temperature, reading.humidity, reading.wind_speed
        );
    }

    // Sanitize before the scorer sees anything: non-finite thresholds are
    // treated as absent, an all-empty set as no thresholds at all.
    let thresholds = request
        .thresholds
        .as_ref()
        .map(|t| t.sanitized())
        .filter(|t| !t.is_empty());

    let result = score_conditions(&reading, thresholds.as_ref(), scoring);
    let report = report::narrative(
        request.kind,
        &location,
        request.when,
        &reading,
        &result.scores,
        thresholds.as_ref(),
    );

    Ok(AnalysisOutcome {
        location,
        when: request.when,
        kind: request.kind,
        reading,
        result,
        report,
    })
}
