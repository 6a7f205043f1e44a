use anyhow::{bail, Context, Result};
use chrono::{Datelike, NaiveDate, NaiveDateTime};
use futures::stream::{FuturesUnordered, StreamExt};

use super::cache::CacheConfig;
use super::client::get_json;
use super::forecast::{hour_key, HourlyResponse};
use super::types::{Coordinates, WeatherReading};

const ARCHIVE_URL: &str = "https://archive-api.open-meteo.com/v1/archive";
const HOURLY_FIELDS: &str = "temperature_2m,relative_humidity_2m,wind_speed_10m";

/// Average the same calendar date and hour across each of the past `years`
/// years.
///
/// Years are fetched concurrently. A year that fails or has gaps is skipped
/// with a warning; only all years failing is an error.
pub async fn fetch_history_average(
    client: &reqwest::Client,
    cache: &CacheConfig,
    coords: Coordinates,
    when: NaiveDateTime,
    years: u32,
    verbose: bool,
) -> Result<WeatherReading> {
    if years == 0 {
        bail!("History span must cover at least 1 year");
    }

    let mut futures = FuturesUnordered::new();
    for offset in 1..=years as i32 {
        let year = when.date().year() - offset;
        let at = NaiveDateTime::new(shift_to_year(when.date(), year), when.time());
        let client = client.clone();
        let cache = cache.clone();
        futures.push(async move {
            let result = fetch_archive_reading(&client, &cache, coords, at, verbose).await;
            (year, result)
        });
    }

    let mut readings = Vec::new();
    while let Some((year, result)) = futures.next().await {
        match result {
            Ok(reading) => {
                if verbose {
                    eprintln!(
                        "  {}: {:.1} °C, {:.0}% humidity, {:.1} km/h wind",
                        year, reading.temperature, reading.humidity, reading.wind_speed
                    );
                }
                readings.push(reading);
            }
            Err(e) => {
                eprintln!("Warning: skipping {}: {:#}", year, e);
            }
        }
    }

    if readings.is_empty() {
        bail!(
            "No historical data for any of the past {} years at this location",
            years
        );
    }

    if verbose {
        eprintln!("Averaging {} of {} years", readings.len(), years);
    }

    Ok(average(&readings))
}

/// Shift a date to `year`. February 29 falls back to February 28 when the
/// target year has no leap day.
fn shift_to_year(date: NaiveDate, year: i32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, date.month(), date.day())
        .unwrap_or_else(|| NaiveDate::from_ymd_opt(year, 2, 28).unwrap())
}

fn average(readings: &[WeatherReading]) -> WeatherReading {
    let n = readings.len() as f64;
    WeatherReading {
        temperature: readings.iter().map(|r| r.temperature).sum::<f64>() / n,
        humidity: readings.iter().map(|r| r.humidity).sum::<f64>() / n,
        wind_speed: readings.iter().map(|r| r.wind_speed).sum::<f64>() / n,
    }
}

async fn fetch_archive_reading(
    client: &reqwest::Client,
    cache: &CacheConfig,
    coords: Coordinates,
    at: NaiveDateTime,
    verbose: bool,
) -> Result<WeatherReading> {
    let date = at.format("%Y-%m-%d");
    let url = format!(
        "{}?latitude={:.4}&longitude={:.4}&hourly={}&timezone=auto&start_date={}&end_date={}",
        ARCHIVE_URL, coords.latitude, coords.longitude, HOURLY_FIELDS, date, date
    );

    // Past weather does not change: archive entries never expire
    let body = get_json(client, cache, &url, None, verbose)
        .await
        .context("Failed to fetch from the Open-Meteo archive")?;

    let parsed: HourlyResponse =
        serde_json::from_str(&body).context("Failed to parse Open-Meteo archive response")?;

    parsed.hourly.reading_at(&hour_key(at))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_shift_to_year_plain_date() {
        let date = NaiveDate::from_ymd_opt(2026, 8, 9).unwrap();
        assert_eq!(
            shift_to_year(date, 2021),
            NaiveDate::from_ymd_opt(2021, 8, 9).unwrap()
        );
    }

    #[test]
    fn test_shift_to_year_leap_day_fallback() {
        let leap = NaiveDate::from_ymd_opt(2024, 2, 29).unwrap();
        assert_eq!(
            shift_to_year(leap, 2023),
            NaiveDate::from_ymd_opt(2023, 2, 28).unwrap()
        );
        assert_eq!(
            shift_to_year(leap, 2020),
            NaiveDate::from_ymd_opt(2020, 2, 29).unwrap()
        );
    }

    #[test]
    fn test_average_of_readings() {
        let readings = [
            WeatherReading {
                temperature: 20.0,
                humidity: 40.0,
                wind_speed: 10.0,
            },
            WeatherReading {
                temperature: 30.0,
                humidity: 60.0,
                wind_speed: 20.0,
            },
        ];
        let avg = average(&readings);
        assert_eq!(avg.temperature, 25.0);
        assert_eq!(avg.humidity, 50.0);
        assert_eq!(avg.wind_speed, 15.0);
    }
}
