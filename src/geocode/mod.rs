use anyhow::{bail, Context, Result};
use serde::Deserialize;

use crate::weather::cache::CacheConfig;
use crate::weather::client::get_json;
use crate::weather::types::Coordinates;

const GEOCODE_URL: &str = "https://geocoding-api.open-meteo.com/v1/search";

/// A location input resolved to coordinates, with a display label.
#[derive(Debug, Clone)]
pub struct ResolvedLocation {
    pub label: String,
    pub coords: Coordinates,
}

#[derive(Debug, Deserialize)]
struct GeocodeResponse {
    #[serde(default)]
    results: Option<Vec<GeocodeHit>>,
}

#[derive(Debug, Deserialize)]
struct GeocodeHit {
    latitude: f64,
    longitude: f64,
    name: String,
    #[serde(default)]
    admin1: Option<String>,
    #[serde(default)]
    country: Option<String>,
}

impl GeocodeHit {
    fn label(&self) -> String {
        let mut parts = vec![self.name.clone()];
        parts.extend(self.admin1.clone());
        parts.extend(self.country.clone());
        parts.join(", ")
    }
}

/// Parse a raw "lat, lon" pair.
///
/// `Ok(None)` means the input is not a coordinate pair and should be geocoded
/// as a place name. A pair that parses but lies outside valid ranges is an
/// error, not a place name.
pub fn parse_coordinates(input: &str) -> Result<Option<Coordinates>> {
    let parts: Vec<&str> = input.split(',').map(str::trim).collect();
    if parts.len() != 2 {
        return Ok(None);
    }
    let (Ok(latitude), Ok(longitude)) = (parts[0].parse::<f64>(), parts[1].parse::<f64>()) else {
        return Ok(None);
    };

    let coords = Coordinates {
        latitude,
        longitude,
    };
    if !coords.in_bounds() {
        bail!(
            "Coordinates out of range: latitude must be within -90..90 and longitude within -180..180 (got {}, {})",
            parts[0],
            parts[1]
        );
    }
    Ok(Some(coords))
}

/// Resolve a location input: raw coordinates directly, anything else through
/// the Open-Meteo geocoding API (top match).
pub async fn resolve(
    client: &reqwest::Client,
    cache: &CacheConfig,
    input: &str,
    verbose: bool,
) -> Result<ResolvedLocation> {
    let input = input.trim();
    if input.is_empty() {
        bail!("Location is empty. Pass a place name or \"lat, lon\" coordinates.");
    }

    if let Some(coords) = parse_coordinates(input)? {
        return Ok(ResolvedLocation {
            label: format!("{:.2}, {:.2}", coords.latitude, coords.longitude),
            coords,
        });
    }

    let url = reqwest::Url::parse_with_params(
        GEOCODE_URL,
        &[
            ("name", input),
            ("count", "1"),
            ("language", "en"),
            ("format", "json"),
        ],
    )
    .context("Failed to build geocoding URL")?;

    let body = get_json(client, cache, url.as_str(), Some(cache.max_age), verbose)
        .await
        .with_context(|| format!("Failed to look up \"{}\"", input))?;

    let parsed: GeocodeResponse =
        serde_json::from_str(&body).context("Failed to parse geocoding response")?;

    let hit = parsed
        .results
        .unwrap_or_default()
        .into_iter()
        .next()
        .with_context(|| {
            format!(
                "No location matches \"{}\". Try a larger place name or raw \"lat, lon\" coordinates.",
                input
            )
        })?;

    let coords = Coordinates {
        latitude: hit.latitude,
        longitude: hit.longitude,
    };
    if !coords.in_bounds() {
        bail!("Geocoder returned unusable coordinates for \"{}\"", input);
    }

    if verbose {
        eprintln!(
            "Resolved \"{}\" -> {} ({:.4}, {:.4})",
            input,
            hit.label(),
            coords.latitude,
            coords.longitude
        );
    }

    Ok(ResolvedLocation {
        label: hit.label(),
        coords,
    })
}
