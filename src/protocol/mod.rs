//! Byte-oriented wire vocabulary shared by the board link.
//!
//! ```text
//!  phone ──▶ RX characteristic (write)   AddressPacket × n, command byte
//!  phone ◀── TX characteristic (notify)  1..4 byte sensor records
//! ```
//!
//! There is no frame header: the board distinguishes what the phone wrote
//! by length (1 byte = command, 19 bytes = address packet) and the phone
//! distinguishes notifications the same way. See [`codec`] for the
//! inbound records and [`command`] for the outbound command byte.

pub mod codec;
pub mod command;

// ── GATT layout ──────────────────────────────────────────────

/// Board data service.
pub const DATA_SERVICE_UUID: u128 = 0x75c276c3_8f97_20bc_a143_b354244886d4;
/// Phone → board writes (addresses, diameter, reset).
pub const CHAR_RX_UUID: u128 = 0x6acf4f08_cc9d_d495_6b41_aa7e60c4e8a6;
/// Board → phone notifications (sensor records, message codes).
pub const CHAR_TX_UUID: u128 = 0xd3d46a35_4394_e9aa_5a43_e7921120aaed;

// ── Record type tags ─────────────────────────────────────────

pub const TYPE_SPEED: u8 = 1;
pub const TYPE_CADENCE: u8 = 2;
pub const TYPE_HEART_RATE: u8 = 3;
pub const TYPE_BATTERY: u8 = 4;

// ── Address packet layout ────────────────────────────────────

/// Text length of a `AA:BB:CC:DD:EE:FF` address.
pub const ADDRESS_LEN: usize = 17;
/// Address bytes followed by the count and code bytes.
pub const ADDRESS_PACKET_LEN: usize = ADDRESS_LEN + 2;
/// Offset of the peripheral-count byte.
pub const PACKET_COUNT_OFFSET: usize = ADDRESS_PACKET_LEN - 2;
/// Offset of the DeviceCountCode byte.
pub const PACKET_CODE_OFFSET: usize = ADDRESS_PACKET_LEN - 1;

/// Most sensors the board can track alongside itself.
pub const MAX_SENSORS: usize = 3;
