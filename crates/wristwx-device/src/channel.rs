//! Delivery channel seam.
//!
//! The transport to the watch (phone SDK, bluetooth bridge) lives outside
//! this crate; it only sees the trait. Failures carry an opaque diagnostic
//! payload that the orchestrator logs and never retries.

use async_trait::async_trait;
use tokio::sync::mpsc;

use crate::message::OutboundMessage;

#[derive(Debug, thiserror::Error)]
pub enum DeliveryError {
    #[error("Delivery channel closed")]
    Closed,
    #[error("Device rejected message: {0}")]
    Rejected(String),
}

#[async_trait]
pub trait DeliveryChannel: Send + Sync {
    /// Transmit one message; resolves with this attempt's outcome.
    async fn deliver(&self, message: OutboundMessage) -> Result<(), DeliveryError>;
}

/// Channel handing messages to an in-process transport task.
pub struct MpscChannel {
    tx: mpsc::Sender<OutboundMessage>,
}

impl MpscChannel {
    /// Create the channel and the receiving end for the transport task.
    pub fn new(buffer: usize) -> (Self, mpsc::Receiver<OutboundMessage>) {
        let (tx, rx) = mpsc::channel(buffer);
        (Self { tx }, rx)
    }
}

#[async_trait]
impl DeliveryChannel for MpscChannel {
    async fn deliver(&self, message: OutboundMessage) -> Result<(), DeliveryError> {
        self.tx
            .send(message)
            .await
            .map_err(|_| DeliveryError::Closed)
    }
}
