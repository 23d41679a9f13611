pub mod config;

pub use config::{Config, LocationConfig, TemperatureScale, ValidationResult, WeatherConfig};

use anyhow::Result;

/// Initialize the core: tracing/logging setup.
pub fn init() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    tracing::info!("wristwx core initialized");
    Ok(())
}
