//! Session core: pure driver logic, zero I/O.
//!
//! Glues the resolver and the codec to a board connection: sends the
//! address packets when the link becomes ready, decodes notifications,
//! and keeps the ride distance. All interaction with the radio happens
//! through the **port traits** in [`ports`], so the whole session can be
//! driven from tests with mock adapters.

pub mod commands;
pub mod distance;
pub mod events;
pub mod ports;
pub mod service;
