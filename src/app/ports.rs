//! Port traits: the boundary between the session core and the radio.
//!
//! ```text
//!   BLE transport ──▶ LinkState / payload ──▶ SessionService
//!   SessionService ──▶ BoardLink (writes) / EventSink (events)
//! ```
//!
//! The transport owns scanning, connecting, retry and notification
//! subscription. The core only sees state changes, payload bytes, and a
//! place to write.

use crate::error::LinkError;

/// Connection state reported by the transport for the board link.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LinkState {
    Connecting,
    Initializing,
    /// Services discovered and notifications enabled.
    Ready,
    Disconnecting,
    Disconnected,
}

/// Write side of the board's RX characteristic.
pub trait BoardLink {
    /// Write one value. Each call is one characteristic write; packets
    /// must reach the board in call order.
    fn write(&mut self, data: &[u8]) -> Result<(), LinkError>;
}

/// The core emits structured [`SessionEvent`](super::events::SessionEvent)s
/// through this port.
pub trait EventSink {
    fn emit(&mut self, event: &super::events::SessionEvent);
}
