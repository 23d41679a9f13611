//! Forecast windower.
//!
//! The remote feed emits entries on a fixed 3-hour stride starting from its
//! own anchor, which may already be stale by the time the response lands.
//! Windowing re-anchors to the moment the response was received, giving the
//! watch the next ~12 hours of lookahead.

use chrono::{Local, TimeZone, Timelike};
use serde::Deserialize;
use serde_json::Value;

use crate::status::RemoteStatus;
use crate::types::{ForecastSlot, ForecastWindow, WeatherError};

#[derive(Debug, Deserialize)]
struct ForecastResponse {
    #[serde(default)]
    cod: Value,
    #[serde(default)]
    list: Vec<ForecastEntry>,
}

#[derive(Debug, Deserialize)]
struct ForecastEntry {
    dt: i64,
    #[serde(default)]
    weather: Vec<IconEntry>,
}

#[derive(Debug, Deserialize)]
struct IconEntry {
    icon: Option<String>,
}

/// Local hour of day (0-23) for an epoch timestamp.
fn local_hour(epoch: i64) -> u32 {
    Local
        .timestamp_opt(epoch, 0)
        .earliest()
        .map(|t| t.hour())
        .unwrap_or(0)
}

/// Parse a raw forecast body and select four samples anchored to `now_epoch`.
///
/// `now_epoch` is wall-clock time at the moment the forecast response was
/// received, deliberately not the current-conditions observation time: the
/// forecast call happens a network round trip later.
///
/// Slot 0 comes from the earliest entry with `dt` strictly greater than
/// `now_epoch`; slots past the end of the sequence stay absent. An exhausted
/// sequence with a success code still reports success with all slots absent
/// (tolerated corner case, see the tests).
pub fn window_forecast(body: &str, now_epoch: i64) -> Result<ForecastWindow, WeatherError> {
    let response: ForecastResponse = serde_json::from_str(body)?;

    let status = RemoteStatus::from_cod(&response.cod);
    if !status.is_success() {
        tracing::warn!(status = %status, "forecast reported an error code");
        return Ok(ForecastWindow::status_only(status));
    }

    let entries = response.list;
    let anchor = entries
        .iter()
        .position(|e| e.dt > now_epoch)
        .unwrap_or(entries.len());

    let mut window = ForecastWindow::status_only(status);
    for (k, slot) in window.slots.iter_mut().enumerate() {
        let Some(entry) = entries.get(anchor + k) else {
            break;
        };
        *slot = Some(ForecastSlot {
            hour: local_hour(entry.dt),
            icon: entry
                .weather
                .first()
                .and_then(|w| w.icon.clone())
                .unwrap_or_default(),
        });
    }

    tracing::debug!(
        anchor,
        total = entries.len(),
        populated = window.slots.iter().filter(|s| s.is_some()).count(),
        "windowed forecast"
    );

    Ok(window)
}
