//! Mock board link and event sink for integration tests.
//!
//! Records every write and every event so tests can assert on the full
//! history of a session.

use cscbridge::app::events::SessionEvent;
use cscbridge::app::ports::{BoardLink, EventSink};
use cscbridge::error::LinkError;
use cscbridge::peripheral::{DiscoveredPeripheral, PeripheralAddress};

// ── MockLink ──────────────────────────────────────────────────

pub struct MockLink {
    pub writes: Vec<Vec<u8>>,
    /// Fail the write with this zero-based index.
    pub fail_at: Option<usize>,
}

#[allow(dead_code)]
impl MockLink {
    pub fn new() -> Self {
        Self {
            writes: Vec::new(),
            fail_at: None,
        }
    }

    pub fn failing_at(index: usize) -> Self {
        Self {
            writes: Vec::new(),
            fail_at: Some(index),
        }
    }

    /// Address text of every 19-byte packet written, in order.
    pub fn packet_addresses(&self) -> Vec<String> {
        self.writes
            .iter()
            .filter(|w| w.len() == 19)
            .map(|w| {
                let end = w[..17].iter().position(|&b| b == 0).unwrap_or(17);
                String::from_utf8(w[..end].to_vec()).unwrap()
            })
            .collect()
    }
}

impl BoardLink for MockLink {
    fn write(&mut self, data: &[u8]) -> Result<(), LinkError> {
        let attempt = self.writes.len();
        if self.fail_at == Some(attempt) {
            self.fail_at = None;
            return Err(LinkError::WriteFailed);
        }
        self.writes.push(data.to_vec());
        Ok(())
    }
}

// ── MockSink ──────────────────────────────────────────────────

pub struct MockSink {
    pub events: Vec<SessionEvent>,
}

#[allow(dead_code)]
impl MockSink {
    pub fn new() -> Self {
        Self { events: Vec::new() }
    }

    pub fn count(&self, pred: impl Fn(&SessionEvent) -> bool) -> usize {
        self.events.iter().filter(|e| pred(e)).count()
    }

    pub fn last_distance(&self) -> Option<f64> {
        self.events.iter().rev().find_map(|e| match e {
            SessionEvent::DistanceUpdated { km } => Some(*km),
            _ => None,
        })
    }
}

impl EventSink for MockSink {
    fn emit(&mut self, event: &SessionEvent) {
        self.events.push(event.clone());
    }
}

// ── Fixtures ──────────────────────────────────────────────────

pub fn device(name: &str, last_octet: u8) -> DiscoveredPeripheral {
    let addr = format!("F0:0D:00:00:00:{:02X}", last_octet);
    DiscoveredPeripheral::new(Some(name), PeripheralAddress::new(&addr).unwrap(), -55)
}

pub fn address(last_octet: u8) -> String {
    format!("F0:0D:00:00:00:{:02X}", last_octet)
}
