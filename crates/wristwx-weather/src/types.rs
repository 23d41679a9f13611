use serde::{Deserialize, Serialize};

use crate::status::RemoteStatus;

/// Geographic coordinate, one fix per refresh cycle.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinate {
    pub latitude: f64,
    pub longitude: f64,
}

/// Fixed coordinate substituted for the real fix when the debug override is on
/// (Fukuoka, chosen for its stable test feed).
pub const DEBUG_COORDINATE: Coordinate = Coordinate {
    latitude: 33.586_597,
    longitude: 130.396_447,
};

/// Icon token forced by the debug override ("clear sky, day").
pub const DEBUG_ICON: &str = "01d";

/// Normalized current conditions, built once from one HTTP response.
///
/// A non-success status implies every measurement field holds its default.
#[derive(Debug, Clone, PartialEq)]
pub struct WeatherReading {
    pub status: RemoteStatus,
    pub temperature_f: i32,
    pub temperature_c: i32,
    pub conditions: String,
    pub icon: String,
    pub place: String,
    pub observed_at: i64,
}

impl WeatherReading {
    /// Reading carrying only a status, all measurements defaulted.
    pub fn status_only(status: RemoteStatus) -> Self {
        Self {
            status,
            temperature_f: 0,
            temperature_c: 0,
            conditions: String::new(),
            icon: String::new(),
            place: String::new(),
            observed_at: 0,
        }
    }
}

/// One of the four forecast output positions.
#[derive(Debug, Clone, PartialEq)]
pub struct ForecastSlot {
    /// Local hour of day, 0-23
    pub hour: u32,
    pub icon: String,
}

/// Four forecast samples anchored to "now"; slots past the end of the remote
/// sequence stay absent.
#[derive(Debug, Clone, PartialEq)]
pub struct ForecastWindow {
    pub status: RemoteStatus,
    pub slots: [Option<ForecastSlot>; 4],
}

impl ForecastWindow {
    /// Window carrying only a status, all slots absent.
    pub fn status_only(status: RemoteStatus) -> Self {
        Self {
            status,
            slots: [None, None, None, None],
        }
    }
}

/// Location service errors
#[derive(Debug, thiserror::Error)]
pub enum LocationError {
    #[error("Location service unavailable")]
    ServiceUnavailable,
    #[error("Location request timed out")]
    Timeout,
    #[error("Location error: {0}")]
    Other(String),
}

/// Weather pipeline errors
#[derive(Debug, thiserror::Error)]
pub enum WeatherError {
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),
    #[error("Malformed response body: {0}")]
    Parse(#[from] serde_json::Error),
}
