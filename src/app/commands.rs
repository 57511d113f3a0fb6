//! Inbound commands to the session service.
//!
//! These represent actions requested by the user (wheel diameter entry,
//! reset buttons) that the [`SessionService`](super::service::SessionService)
//! turns into board writes or local state changes.

use crate::protocol::command::WheelDiameter;

/// Commands the presentation layer can send into the session.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SessionCommand {
    /// Send a validated wheel diameter to the board.
    SetWheelDiameter(WheelDiameter),

    /// Tell the board the diameter was cleared; speed stops until a new
    /// one is set.
    ResetDiameter,

    /// Zero the local distance counter. Nothing is sent to the board.
    ResetDistance,
}
