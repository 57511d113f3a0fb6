//! Outbound session events.
//!
//! The [`SessionService`](super::service::SessionService) emits these
//! through the [`EventSink`](super::ports::EventSink) port. Adapters on
//! the other side decide what to do with them, from logging to feeding a
//! UI thread.

use crate::error::{CodecError, ResolutionError};
use crate::protocol::codec::SensorEvent;
use crate::resolver::DeviceCountCode;

use super::ports::LinkState;

/// Structured events emitted by the session core.
#[derive(Debug, Clone, PartialEq)]
pub enum SessionEvent {
    /// The board link changed state.
    LinkChanged { from: LinkState, to: LinkState },

    /// The selection was (re-)resolved for a new connection.
    Resolved { code: DeviceCountCode, sensors: u8 },

    /// Re-resolution on reconnect failed; no packets were sent.
    ResolutionFailed(ResolutionError),

    /// All address packets were written, in assignment order.
    PacketsSent(u8),

    /// A notification decoded successfully.
    Sensor(SensorEvent),

    /// A notification was dropped.
    DecodeFailed(CodecError),

    /// Ride distance after a speed sample or a reset.
    DistanceUpdated { km: f64 },

    /// Diameter command byte written to the board.
    DiameterSent(u8),

    /// Reset command written to the board.
    DiameterReset,
}
