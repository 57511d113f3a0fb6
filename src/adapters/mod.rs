//! Adapters: concrete implementations of the session port traits.
//!
//! | Adapter       | Implements | Connects to                    |
//! |---------------|------------|--------------------------------|
//! | `log_sink`    | EventSink  | `log` facade                   |
//! | `stream_link` | BoardLink  | any `io::Write` (hex per line) |
//!
//! A real BLE transport implements [`BoardLink`](crate::app::ports::BoardLink)
//! on top of its GATT client and feeds link states and notifications into
//! the service; these two cover logging and the command-line bridge.

pub mod log_sink;
pub mod stream_link;
