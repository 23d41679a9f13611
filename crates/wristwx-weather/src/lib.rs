//! Weather acquisition pipeline for wristwx
//!
//! Fetches current conditions and a multi-hour forecast from OpenWeatherMap,
//! normalizes the loosely typed remote status codes, and windows the forecast
//! into four forward-looking samples anchored to "now".

pub mod client;
pub mod current;
pub mod forecast;
pub mod location;
pub mod status;
pub mod types;

pub use client::OwmClient;
pub use current::normalize_current;
pub use forecast::window_forecast;
pub use location::{CachedLocation, LocationProvider, StaticLocation};
pub use status::RemoteStatus;
pub use types::*;
