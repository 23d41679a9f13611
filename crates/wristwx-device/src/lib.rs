//! Device-side half of wristwx
//!
//! Flattens a weather reading plus forecast window into the fixed field set
//! the watch expects and drives the refresh cycle from device triggers.

pub mod channel;
pub mod message;
pub mod orchestrator;

pub use channel::{DeliveryChannel, DeliveryError, MpscChannel};
pub use message::{FieldValue, OutboundMessage, DEVICE_INBOX_BYTES, MESSAGE_KEYS};
pub use orchestrator::{CycleError, DeviceEvent, Orchestrator};
