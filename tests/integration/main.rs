//! Integration test driver for `tests/integration/` submodule.
//!
//! Each `mod` below maps to a file that drives the session core against
//! mock adapters. Nothing here needs a radio.

mod codec_tests;
mod mock_link;
mod session_tests;
