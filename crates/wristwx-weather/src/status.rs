//! Remote status normalization.
//!
//! OpenWeatherMap reports its own `cod` field as an integer on the
//! current-conditions endpoint (`200`) but as a string on the forecast
//! endpoint (`"200"`), and error codes arrive in either form depending on the
//! outcome. Both shapes are collapsed into one tagged type at the parse
//! boundary so nothing downstream ever compares mixed representations.

use serde_json::Value;

/// Application-level outcome reported by the remote service itself, distinct
/// from transport failure (which surfaces as `WeatherError::Network`).
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RemoteStatus {
    Success,
    RemoteError(String),
}

impl RemoteStatus {
    /// Normalize a raw `cod` value. Missing `cod` is treated as an error code
    /// of `null`, never a panic.
    pub fn from_cod(cod: &Value) -> Self {
        match cod {
            Value::Number(n) if n.as_i64() == Some(200) => Self::Success,
            Value::String(s) if s == "200" => Self::Success,
            Value::String(s) => Self::RemoteError(s.clone()),
            other => Self::RemoteError(other.to_string()),
        }
    }

    pub fn is_success(&self) -> bool {
        matches!(self, Self::Success)
    }
}

impl std::fmt::Display for RemoteStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Success => write!(f, "success"),
            Self::RemoteError(code) => write!(f, "ERR_{}", code),
        }
    }
}
