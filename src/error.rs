//! Unified error types for the bridge core.
//!
//! Each subsystem has its own small `Copy` enum; all of them convert into
//! the crate-wide [`Error`] so the session driver can funnel everything
//! through one type.

use core::fmt;

// ---------------------------------------------------------------------------
// Top-level error
// ---------------------------------------------------------------------------

/// Every fallible operation in the crate funnels into this type.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Error {
    /// The peripheral selection could not be turned into a session.
    Resolution(ResolutionError),
    /// A notification payload could not be decoded.
    Codec(CodecError),
    /// A wheel diameter entry was rejected.
    Diameter(DiameterError),
    /// A peripheral address was malformed.
    Address(AddressError),
    /// An address packet received by the board was malformed.
    Packet(PacketError),
    /// Writing to the board failed.
    Link(LinkError),
    /// Configuration is invalid.
    Config(&'static str),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Resolution(e) => write!(f, "resolution: {e}"),
            Self::Codec(e) => write!(f, "codec: {e}"),
            Self::Diameter(e) => write!(f, "diameter: {e}"),
            Self::Address(e) => write!(f, "address: {e}"),
            Self::Packet(e) => write!(f, "packet: {e}"),
            Self::Link(e) => write!(f, "link: {e}"),
            Self::Config(msg) => write!(f, "config: {msg}"),
        }
    }
}

impl std::error::Error for Error {}

// ---------------------------------------------------------------------------
// Resolution errors
// ---------------------------------------------------------------------------

/// Fatal to starting a session. The user has to re-select peripherals;
/// nothing is retried automatically.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResolutionError {
    /// No peripheral name matched the board fragment.
    NoBoardSelected,
    /// More than one peripheral name matched the board fragment.
    MultipleBoardsSelected,
    /// A sensor had no name or matched none of the known fragments.
    UnrecognizedSensor,
    /// Only the board was selected.
    NoSensorSelected,
    /// More sensors than the board can track.
    TooManySensors,
}

impl fmt::Display for ResolutionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NoBoardSelected => write!(f, "no board selected"),
            Self::MultipleBoardsSelected => write!(f, "more than one board selected"),
            Self::UnrecognizedSensor => write!(f, "unrecognized sensor selected"),
            Self::NoSensorSelected => write!(f, "no sensor selected"),
            Self::TooManySensors => write!(f, "too many sensors selected"),
        }
    }
}

impl From<ResolutionError> for Error {
    fn from(e: ResolutionError) -> Self {
        Self::Resolution(e)
    }
}

// ---------------------------------------------------------------------------
// Codec errors
// ---------------------------------------------------------------------------

/// Per-message decode failures. Recoverable: the payload is dropped and
/// the notification stream keeps running.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CodecError {
    /// Payload length matches no known record shape.
    InvalidLength(usize),
    /// Record shape is known but the type tag is not valid for it.
    UnknownType(u8),
}

impl fmt::Display for CodecError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidLength(len) => write!(f, "invalid payload length {len}"),
            Self::UnknownType(tag) => write!(f, "unknown type tag {tag}"),
        }
    }
}

impl From<CodecError> for Error {
    fn from(e: CodecError) -> Self {
        Self::Codec(e)
    }
}

// ---------------------------------------------------------------------------
// Diameter input errors
// ---------------------------------------------------------------------------

/// Caller-side validation failures for a wheel diameter entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DiameterError {
    /// The entry could not be parsed as a number.
    NotANumber,
    /// Larger than 255 inches.
    TooLarge,
    /// Smaller than 1 inch.
    TooSmall,
}

impl DiameterError {
    /// Message code shown to the user for this failure.
    pub const fn status_code(self) -> u8 {
        match self {
            Self::NotANumber => 23,
            Self::TooLarge => 24,
            Self::TooSmall => 25,
        }
    }
}

impl fmt::Display for DiameterError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NotANumber => write!(f, "diameter must be a number"),
            Self::TooLarge => write!(f, "diameter must not exceed 255 inches"),
            Self::TooSmall => write!(f, "diameter must be at least 1 inch"),
        }
    }
}

impl From<DiameterError> for Error {
    fn from(e: DiameterError) -> Self {
        Self::Diameter(e)
    }
}

// ---------------------------------------------------------------------------
// Address errors
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AddressError {
    Empty,
    /// Longer than the 17 bytes an address packet can carry.
    TooLong,
    NotAscii,
}

impl fmt::Display for AddressError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Empty => write!(f, "address is empty"),
            Self::TooLong => write!(f, "address longer than 17 bytes"),
            Self::NotAscii => write!(f, "address is not printable ASCII"),
        }
    }
}

impl From<AddressError> for Error {
    fn from(e: AddressError) -> Self {
        Self::Address(e)
    }
}

// ---------------------------------------------------------------------------
// Address packet errors (board side)
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PacketError {
    /// Not exactly 19 bytes.
    InvalidLength,
    /// Peripheral count outside 1..=3.
    InvalidCount,
    /// DeviceCountCode outside 1..=7.
    InvalidDeviceCode,
    /// Address bytes are empty or not ASCII.
    InvalidAddress,
}

impl fmt::Display for PacketError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidLength => write!(f, "address packet must be 19 bytes"),
            Self::InvalidCount => write!(f, "peripheral count out of range"),
            Self::InvalidDeviceCode => write!(f, "device count code out of range"),
            Self::InvalidAddress => write!(f, "address field malformed"),
        }
    }
}

impl From<PacketError> for Error {
    fn from(e: PacketError) -> Self {
        Self::Packet(e)
    }
}

// ---------------------------------------------------------------------------
// Board link errors
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LinkError {
    /// The board is not in the Ready state.
    NotConnected,
    /// The characteristic write was rejected by the transport.
    WriteFailed,
}

impl fmt::Display for LinkError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NotConnected => write!(f, "board not connected"),
            Self::WriteFailed => write!(f, "characteristic write failed"),
        }
    }
}

impl From<LinkError> for Error {
    fn from(e: LinkError) -> Self {
        Self::Link(e)
    }
}

// ---------------------------------------------------------------------------
// Convenience Result alias
// ---------------------------------------------------------------------------

/// Crate-wide `Result` alias.
pub type Result<T> = core::result::Result<T, Error>;
