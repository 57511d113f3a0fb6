//! cscbridge: phone-side driver for a BLE cycling-sensor bridge board.
//!
//! The board connects to up to three cycling sensors (speed, cadence,
//! heart rate) on the phone's behalf and relays their readings as short
//! notification records. This crate holds the radio-independent logic:
//! resolving the user's selection into address packets, decoding the
//! board's notifications, encoding wheel-diameter commands, and the
//! session core that ties them to a connection.

#![deny(unused_must_use)]

pub mod adapters;
pub mod app;
pub mod config;
pub mod error;
pub mod peripheral;
pub mod protocol;
pub mod resolver;
pub mod status;

pub use error::{Error, Result};
