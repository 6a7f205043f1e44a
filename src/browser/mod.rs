use anyhow::{Context, Result};

use crate::weather::types::Coordinates;

/// OpenStreetMap URL with a marker on the given coordinates
pub fn map_url(coords: Coordinates) -> String {
    format!(
        "https://www.openstreetmap.org/?mlat={:.5}&mlon={:.5}#map=12/{:.5}/{:.5}",
        coords.latitude, coords.longitude, coords.latitude, coords.longitude
    )
}

/// Open the location in the user's default browser
///
/// # Errors
/// Returns error if browser cannot be opened (e.g., no browser available)
pub fn open_map(coords: Coordinates) -> Result<()> {
    let url = map_url(coords);
    webbrowser::open(&url).with_context(|| format!("Failed to open browser for URL: {}", url))?;
    Ok(())
}
