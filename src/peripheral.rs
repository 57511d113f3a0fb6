//! Peripheral identities observed while scanning.
//!
//! A [`DiscoveredPeripheral`] is keyed by its address; repeated
//! advertisements update the name and signal strength in place through
//! [`ScanRegistry::observe`].

use core::fmt;

use heapless::{String, Vec};
use log::debug;

use crate::error::AddressError;
use crate::protocol::ADDRESS_LEN;

/// Longest advertised name kept.
pub const NAME_CAP: usize = 32;
/// Distinct peripherals remembered per scan.
pub const SCAN_CAPACITY: usize = 16;

// ── Address ──────────────────────────────────────────────────

/// Hardware address in its text form, e.g. `C7:3A:11:08:9F:E2`.
///
/// Stored as ASCII because the board receives exactly these bytes.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct PeripheralAddress(String<ADDRESS_LEN>);

impl PeripheralAddress {
    pub fn new(text: &str) -> Result<Self, AddressError> {
        if text.is_empty() {
            return Err(AddressError::Empty);
        }
        // NUL terminates the address field on the board side.
        if !text.bytes().all(|b| b.is_ascii_graphic()) {
            return Err(AddressError::NotAscii);
        }
        let mut s = String::new();
        s.push_str(text).map_err(|()| AddressError::TooLong)?;
        Ok(Self(s))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn as_bytes(&self) -> &[u8] {
        self.0.as_bytes()
    }
}

impl fmt::Display for PeripheralAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

// ── Discovered peripheral ────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DiscoveredPeripheral {
    name: Option<String<NAME_CAP>>,
    address: PeripheralAddress,
    /// Last seen signal strength (dBm). Not part of the protocol.
    rssi: i8,
}

impl DiscoveredPeripheral {
    pub fn new(name: Option<&str>, address: PeripheralAddress, rssi: i8) -> Self {
        Self {
            name: name.map(truncate_name),
            address,
            rssi,
        }
    }

    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    pub fn address(&self) -> &PeripheralAddress {
        &self.address
    }

    pub fn rssi(&self) -> i8 {
        self.rssi
    }

    /// Apply a repeated advertisement. A missing name keeps the old one
    /// since scan responses do not always carry it.
    pub fn refresh(&mut self, name: Option<&str>, rssi: i8) {
        if let Some(name) = name {
            self.name = Some(truncate_name(name));
        }
        self.rssi = rssi;
    }
}

fn truncate_name(name: &str) -> String<NAME_CAP> {
    let mut s = String::new();
    for c in name.chars() {
        if s.push(c).is_err() {
            break;
        }
    }
    s
}

// ── Scan registry ────────────────────────────────────────────

/// Deduplicated list of peripherals seen during one scan, in first-seen
/// order.
#[derive(Debug, Default)]
pub struct ScanRegistry {
    devices: Vec<DiscoveredPeripheral, SCAN_CAPACITY>,
}

impl ScanRegistry {
    pub fn new() -> Self {
        Self { devices: Vec::new() }
    }

    /// Record an advertisement. Returns `false` only when the address is
    /// new and the registry is full.
    pub fn observe(&mut self, name: Option<&str>, address: PeripheralAddress, rssi: i8) -> bool {
        if let Some(existing) = self.devices.iter_mut().find(|d| d.address == address) {
            existing.refresh(name, rssi);
            return true;
        }
        debug!("Found: {} ({:?}, RSSI {})", address, name, rssi);
        self.devices
            .push(DiscoveredPeripheral::new(name, address, rssi))
            .is_ok()
    }

    pub fn get(&self, address: &PeripheralAddress) -> Option<&DiscoveredPeripheral> {
        self.devices.iter().find(|d| &d.address == address)
    }

    pub fn devices(&self) -> &[DiscoveredPeripheral] {
        &self.devices
    }

    pub fn len(&self) -> usize {
        self.devices.len()
    }

    pub fn is_empty(&self) -> bool {
        self.devices.is_empty()
    }

    pub fn is_full(&self) -> bool {
        self.devices.is_full()
    }

    /// Forget everything (new scan).
    pub fn clear(&mut self) {
        self.devices.clear();
    }
}
