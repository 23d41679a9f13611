use std::sync::Arc;
use std::time::Duration;

use anyhow::Result;

use wristwx_core::Config;
use wristwx_device::{DeviceEvent, MpscChannel, Orchestrator};
use wristwx_weather::{CachedLocation, Coordinate, OwmClient, StaticLocation};

#[tokio::main]
async fn main() -> Result<()> {
    wristwx_core::init()?;

    let (config, _validation) = Config::load_validated()?;
    tracing::info!(
        scale = ?config.temperature_scale,
        debug_override = config.debug_override,
        "wristwx companion started"
    );

    let location = CachedLocation::new(
        StaticLocation::new(Coordinate {
            latitude: config.location.latitude,
            longitude: config.location.longitude,
        }),
        Duration::from_millis(config.location.timeout_ms),
        Duration::from_millis(config.location.max_cache_age_ms),
    );

    let (channel, mut transport_rx) = MpscChannel::new(8);

    // Far end of the delivery channel; the phone-SDK bridge attaches here.
    tokio::spawn(async move {
        while let Some(message) = transport_rx.recv().await {
            tracing::info!(
                bytes = message.encoded_len(),
                "message handed to device transport"
            );
        }
    });

    let orchestrator = Arc::new(Orchestrator::new(
        Arc::new(location),
        OwmClient::with_base_url(&config.weather.api_key, &config.weather.base_url),
        Arc::new(channel),
        config.debug_override,
    ));

    // The watch app just came up: push initial weather.
    let _ = orchestrator.handle_event(DeviceEvent::Ready);

    // SIGHUP stands in for the forwarded device refresh message (wake or
    // button press); ctrl-c shuts down.
    #[cfg(unix)]
    {
        use tokio::signal::unix::{signal, SignalKind};
        let mut refresh = signal(SignalKind::hangup())?;
        loop {
            tokio::select! {
                _ = tokio::signal::ctrl_c() => break,
                _ = refresh.recv() => {
                    let _ = orchestrator.handle_event(DeviceEvent::RefreshRequested);
                }
            }
        }
    }
    #[cfg(not(unix))]
    tokio::signal::ctrl_c().await?;

    tracing::info!("wristwx companion shutting down");
    Ok(())
}
