//! Address packet: one per sensor, written to the board on Ready.
//!
//! ```text
//! ┌──────────────────────────────┬───────┬──────┐
//! │ address text (≤17 B, 0-pad)  │ count │ code │
//! │ bytes 0..17                  │ [17]  │ [18] │
//! └──────────────────────────────┴───────┴──────┘
//! ```
//!
//! Every packet of a session carries the same count and code bytes; only
//! the address differs.

use core::fmt;

use super::DeviceCountCode;
use crate::error::PacketError;
use crate::peripheral::PeripheralAddress;
use crate::protocol::{
    ADDRESS_LEN, ADDRESS_PACKET_LEN, MAX_SENSORS, PACKET_CODE_OFFSET, PACKET_COUNT_OFFSET,
};

#[derive(Clone, Copy, PartialEq, Eq)]
pub struct AddressPacket([u8; ADDRESS_PACKET_LEN]);

impl AddressPacket {
    /// Lay out `address` followed by the session metadata.
    ///
    /// Shorter addresses leave zero bytes between the text and the
    /// metadata, which always sits in the final two positions.
    pub fn build(address: &PeripheralAddress, sensor_count: u8, code: DeviceCountCode) -> Self {
        let mut buf = [0u8; ADDRESS_PACKET_LEN];
        let addr = address.as_bytes();
        buf[..addr.len()].copy_from_slice(addr);
        buf[PACKET_COUNT_OFFSET] = sensor_count;
        buf[PACKET_CODE_OFFSET] = code.as_u8();
        Self(buf)
    }

    pub fn as_bytes(&self) -> &[u8; ADDRESS_PACKET_LEN] {
        &self.0
    }

    pub fn sensor_count(&self) -> u8 {
        self.0[PACKET_COUNT_OFFSET]
    }

    pub fn code_byte(&self) -> u8 {
        self.0[PACKET_CODE_OFFSET]
    }

    /// Board-side parse of a received packet.
    pub fn parse(bytes: &[u8]) -> Result<ParsedAddressPacket, PacketError> {
        let buf: &[u8; ADDRESS_PACKET_LEN] =
            bytes.try_into().map_err(|_| PacketError::InvalidLength)?;

        let sensor_count = buf[PACKET_COUNT_OFFSET];
        if sensor_count == 0 || usize::from(sensor_count) > MAX_SENSORS {
            return Err(PacketError::InvalidCount);
        }
        let code = DeviceCountCode::from_u8(buf[PACKET_CODE_OFFSET])
            .ok_or(PacketError::InvalidDeviceCode)?;

        let field = &buf[..ADDRESS_LEN];
        let end = field.iter().position(|&b| b == 0).unwrap_or(ADDRESS_LEN);
        let text = core::str::from_utf8(&field[..end]).map_err(|_| PacketError::InvalidAddress)?;
        let address = PeripheralAddress::new(text).map_err(|_| PacketError::InvalidAddress)?;

        Ok(ParsedAddressPacket {
            address,
            sensor_count,
            code,
        })
    }
}

impl fmt::Debug for AddressPacket {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "AddressPacket({:02x?})", self.0)
    }
}

/// Fields recovered from an [`AddressPacket`] by the board.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedAddressPacket {
    pub address: PeripheralAddress,
    pub sensor_count: u8,
    pub code: DeviceCountCode,
}
