//! Refresh-cycle orchestrator.
//!
//! One cycle is a linear pipeline: locate, fetch current conditions, fetch
//! the forecast, assemble, deliver. Each device trigger starts a fresh cycle
//! in its own task; a trigger arriving while a cycle is still in flight
//! cancels the stale one first, so the newest trigger always wins on
//! delivery.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::{SystemTime, UNIX_EPOCH};

use parking_lot::Mutex;
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;

use wristwx_weather::{
    normalize_current, window_forecast, LocationError, LocationProvider, OwmClient, WeatherError,
    DEBUG_COORDINATE,
};

use crate::channel::DeliveryChannel;
use crate::message::OutboundMessage;

/// External triggers that start a refresh cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeviceEvent {
    /// Watch-side app reported ready
    Ready,
    /// Inbound device message asking for fresh weather (wake, button press)
    RefreshRequested,
}

/// Conditions that abort a cycle before a delivery attempt. A remote error
/// code is not one of them; it travels to the device as a normal message.
#[derive(Debug, thiserror::Error)]
pub enum CycleError {
    #[error("Location failure: {0}")]
    Location(#[from] LocationError),
    #[error("Weather fetch failure: {0}")]
    Weather(#[from] WeatherError),
}

pub struct Orchestrator {
    location: Arc<dyn LocationProvider>,
    client: OwmClient,
    channel: Arc<dyn DeliveryChannel>,
    /// Threaded in at construction; read-only for the process lifetime.
    debug_override: bool,
    cycle_seq: AtomicU64,
    inflight: Mutex<Option<CancellationToken>>,
}

impl Orchestrator {
    pub fn new(
        location: Arc<dyn LocationProvider>,
        client: OwmClient,
        channel: Arc<dyn DeliveryChannel>,
        debug_override: bool,
    ) -> Self {
        Self {
            location,
            client,
            channel,
            debug_override,
            cycle_seq: AtomicU64::new(0),
            inflight: Mutex::new(None),
        }
    }

    /// React to a device trigger: cancel any stale in-flight cycle and spawn
    /// a new one.
    pub fn handle_event(self: &Arc<Self>, event: DeviceEvent) -> JoinHandle<()> {
        let seq = self.cycle_seq.fetch_add(1, Ordering::Relaxed) + 1;
        tracing::info!(?event, seq, "device trigger");

        let token = CancellationToken::new();
        if let Some(stale) = self.inflight.lock().replace(token.clone()) {
            stale.cancel();
        }

        let this = Arc::clone(self);
        tokio::spawn(async move {
            tokio::select! {
                _ = token.cancelled() => {
                    tracing::info!(seq, "cycle superseded by a newer trigger");
                }
                result = this.run_cycle(seq) => {
                    if let Err(e) = result {
                        tracing::warn!(seq, error = %e, "cycle aborted");
                    }
                }
            }
        })
    }

    /// One full refresh cycle, sequential awaits, no branching back-edges.
    pub async fn run_cycle(&self, seq: u64) -> Result<(), CycleError> {
        let mut coord = self.location.locate().await?;
        if self.debug_override {
            coord = DEBUG_COORDINATE;
        }
        tracing::debug!(seq, lat = coord.latitude, lon = coord.longitude, "located");

        let body = self.client.current(coord).await?;
        let reading = normalize_current(&body, self.debug_override)?;

        let body = self.client.forecast(coord).await?;
        // Anchor the window to the moment this response landed, not to the
        // current-conditions observation time a round trip ago.
        let now_epoch = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_secs() as i64)
            .unwrap_or_default();
        let window = window_forecast(&body, now_epoch)?;

        let message = OutboundMessage::assemble(&reading, &window);
        if message.over_budget() {
            tracing::error!(
                seq,
                encoded_len = message.encoded_len(),
                "message exceeds device inbox budget, device will drop it"
            );
        }

        match self.channel.deliver(message).await {
            Ok(()) => tracing::info!(
                seq,
                weather_status = %reading.status,
                forecast_status = %window.status,
                "weather delivered to device"
            ),
            // Logged only: no retry, no backoff, the next trigger refreshes.
            Err(e) => tracing::error!(seq, error = %e, "delivery failed"),
        }

        Ok(())
    }
}
