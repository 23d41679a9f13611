//! Current-conditions normalizer.

use serde::Deserialize;
use serde_json::Value;

use crate::status::RemoteStatus;
use crate::types::{WeatherError, WeatherReading, DEBUG_ICON};

/// Offset between Kelvin and Celsius; OpenWeatherMap reports absolute
/// temperature.
const KELVIN_OFFSET: f64 = 273.15;

#[derive(Debug, Deserialize)]
struct CurrentResponse {
    #[serde(default)]
    cod: Value,
    main: Option<MainReadings>,
    #[serde(default)]
    weather: Vec<ConditionEntry>,
    name: Option<String>,
    dt: Option<i64>,
}

#[derive(Debug, Deserialize)]
struct MainReadings {
    temp: f64,
}

#[derive(Debug, Deserialize)]
struct ConditionEntry {
    main: Option<String>,
    icon: Option<String>,
}

/// Parse a raw current-conditions body into a [`WeatherReading`].
///
/// An undecodable body is fatal for the cycle and propagates as
/// [`WeatherError::Parse`]; any decodable body with a `cod` field yields a
/// reading, error codes included. With `force_debug_icon` the icon token is
/// pinned to [`DEBUG_ICON`] for deterministic demos.
pub fn normalize_current(body: &str, force_debug_icon: bool) -> Result<WeatherReading, WeatherError> {
    let response: CurrentResponse = serde_json::from_str(body)?;

    let status = RemoteStatus::from_cod(&response.cod);
    if !status.is_success() {
        tracing::warn!(status = %status, "current conditions reported an error code");
        return Ok(WeatherReading::status_only(status));
    }

    let celsius = response
        .main
        .map(|m| m.temp - KELVIN_OFFSET)
        .unwrap_or_default();
    let primary = response.weather.into_iter().next();

    let icon = if force_debug_icon {
        DEBUG_ICON.to_string()
    } else {
        primary
            .as_ref()
            .and_then(|w| w.icon.clone())
            .unwrap_or_default()
    };

    let reading = WeatherReading {
        status,
        // Fahrenheit derives from the same source value, not the rounded
        // Celsius, so the two never drift by a degree.
        temperature_f: (celsius * 1.8 + 32.0).round() as i32,
        temperature_c: celsius.round() as i32,
        conditions: primary.and_then(|w| w.main).unwrap_or_default(),
        icon,
        place: response.name.unwrap_or_default(),
        observed_at: response.dt.unwrap_or_default(),
    };

    tracing::debug!(
        temperature_f = reading.temperature_f,
        temperature_c = reading.temperature_c,
        conditions = %reading.conditions,
        icon = %reading.icon,
        place = %reading.place,
        "normalized current conditions"
    );

    Ok(reading)
}
