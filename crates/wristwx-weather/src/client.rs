//! OpenWeatherMap HTTP client.
//!
//! One GET per call, no retry and no request timeout: a transport failure
//! surfaces as an error and the refresh cycle that issued it simply ends.
//! Retry policy belongs to whoever triggers cycles, not here.

use crate::types::{Coordinate, WeatherError};

const OWM_API_BASE: &str = "http://api.openweathermap.org/data/2.5";

#[derive(Debug, Clone)]
pub struct OwmClient {
    client: reqwest::Client,
    api_key: String,
    base_url: String,
}

impl OwmClient {
    pub fn new(api_key: &str) -> Self {
        Self::with_base_url(api_key, OWM_API_BASE)
    }

    /// Client against a non-default base URL (tests point this at a mock
    /// server).
    pub fn with_base_url(api_key: &str, base_url: &str) -> Self {
        Self {
            client: reqwest::Client::new(),
            api_key: api_key.to_string(),
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    /// Fetch the raw current-conditions body for a coordinate.
    pub async fn current(&self, coord: Coordinate) -> Result<String, WeatherError> {
        self.fetch_raw("weather", coord).await
    }

    /// Fetch the raw multi-hour forecast body for a coordinate.
    pub async fn forecast(&self, coord: Coordinate) -> Result<String, WeatherError> {
        self.fetch_raw("forecast", coord).await
    }

    async fn fetch_raw(&self, endpoint: &str, coord: Coordinate) -> Result<String, WeatherError> {
        let url = format!(
            "{}/{}?lat={}&lon={}&appid={}",
            self.base_url, endpoint, coord.latitude, coord.longitude, self.api_key
        );
        tracing::debug!(endpoint, lat = coord.latitude, lon = coord.longitude, "GET weather api");

        let response = self.client.get(&url).send().await?;
        let body = response.text().await?;
        Ok(body)
    }
}
