use anyhow::{anyhow, Context, Result};
use chrono::NaiveDateTime;
use serde::Deserialize;

use super::cache::CacheConfig;
use super::client::get_json;
use super::types::{Coordinates, WeatherReading};

const FORECAST_URL: &str = "https://api.open-meteo.com/v1/forecast";
const HOURLY_FIELDS: &str = "temperature_2m,relative_humidity_2m,wind_speed_10m";

#[derive(Debug, Deserialize)]
pub(super) struct HourlyResponse {
    pub(super) hourly: HourlySeries,
}

/// Parallel arrays of hourly values as Open-Meteo returns them. Individual
/// entries may be null when a station has gaps.
#[derive(Debug, Deserialize)]
pub(super) struct HourlySeries {
    time: Vec<String>,
    temperature_2m: Vec<Option<f64>>,
    relative_humidity_2m: Vec<Option<f64>>,
    wind_speed_10m: Vec<Option<f64>>,
}

impl HourlySeries {
    /// Extract the reading for the requested local hour, failing with a
    /// descriptive message when the hour or any metric is missing.
    pub(super) fn reading_at(&self, hour_key: &str) -> Result<WeatherReading> {
        let idx = self
            .time
            .iter()
            .position(|t| t == hour_key)
            .ok_or_else(|| anyhow!("No data for {}", hour_key))?;

        let metric = |series: &[Option<f64>], name: &str| -> Result<f64> {
            series
                .get(idx)
                .copied()
                .flatten()
                .filter(|v| v.is_finite())
                .ok_or_else(|| anyhow!("Weather data has no {} for {}", name, hour_key))
        };

        Ok(WeatherReading {
            temperature: metric(&self.temperature_2m, "temperature")?,
            humidity: metric(&self.relative_humidity_2m, "humidity")?,
            wind_speed: metric(&self.wind_speed_10m, "wind speed")?,
        })
    }
}

/// Open-Meteo hourly timestamps are local time with the minutes zeroed.
pub(super) fn hour_key(when: NaiveDateTime) -> String {
    when.format("%Y-%m-%dT%H:00").to_string()
}

/// Fetch the hourly forecast for the event date and pick the requested hour.
pub async fn fetch_forecast(
    client: &reqwest::Client,
    cache: &CacheConfig,
    coords: Coordinates,
    when: NaiveDateTime,
    verbose: bool,
) -> Result<WeatherReading> {
    let date = when.format("%Y-%m-%d");
    let url = format!(
        "{}?latitude={:.4}&longitude={:.4}&hourly={}&timezone=auto&start_date={}&end_date={}",
        FORECAST_URL, coords.latitude, coords.longitude, HOURLY_FIELDS, date, date
    );

    let body = get_json(client, cache, &url, Some(cache.max_age), verbose)
        .await
        .context("Failed to fetch forecast from Open-Meteo")?;

    let parsed: HourlyResponse =
        serde_json::from_str(&body).context("Failed to parse Open-Meteo forecast response")?;

    parsed
        .hourly
        .reading_at(&hour_key(when))
        .with_context(|| format!("No forecast available for {}", when.format("%Y-%m-%d %H:%M")))
}
