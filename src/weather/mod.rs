pub mod cache;
pub mod client;
pub mod forecast;
pub mod history;
pub mod types;

pub use cache::{get_cache_path, CacheConfig};
pub use client::create_client;
pub use types::{AnalysisKind, Coordinates, WeatherReading};
