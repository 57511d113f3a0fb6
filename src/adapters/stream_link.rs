//! [`BoardLink`] over a byte stream.
//!
//! Each characteristic write becomes one line of lowercase hex on the
//! wrapped writer. Used by the command-line bridge to hand packets to an
//! external BLE tool, and by tests to capture what would hit the air.

use std::io::Write;

use log::error;

use crate::app::ports::BoardLink;
use crate::error::LinkError;

pub struct StreamLink<W: Write> {
    out: W,
    writes: usize,
}

impl<W: Write> StreamLink<W> {
    pub fn new(out: W) -> Self {
        Self { out, writes: 0 }
    }

    /// Number of successful writes so far.
    pub fn writes(&self) -> usize {
        self.writes
    }

    pub fn into_inner(self) -> W {
        self.out
    }
}

impl<W: Write> BoardLink for StreamLink<W> {
    fn write(&mut self, data: &[u8]) -> Result<(), LinkError> {
        let mut line = String::with_capacity(data.len() * 2 + 1);
        for b in data {
            line.push_str(&format!("{:02x}", b));
        }
        line.push('\n');

        self.out
            .write_all(line.as_bytes())
            .and_then(|()| self.out.flush())
            .map_err(|e| {
                error!("Board write failed: {}", e);
                LinkError::WriteFailed
            })?;
        self.writes += 1;
        Ok(())
    }
}

/// Parse one line of hex (whitespace ignored) into bytes.
pub fn parse_hex_line(line: &str) -> Option<std::vec::Vec<u8>> {
    let digits: String = line.chars().filter(|c| !c.is_whitespace()).collect();
    if digits.len() % 2 != 0 {
        return None;
    }
    (0..digits.len())
        .step_by(2)
        .map(|i| u8::from_str_radix(digits.get(i..i + 2)?, 16).ok())
        .collect()
}
