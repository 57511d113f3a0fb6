//! Outbound single-byte commands written to the RX characteristic.
//!
//! ```text
//! 0x00            reset wheel diameter
//! 0b0ddd_dddd     diameter, whole inches
//! 0b1ddd_dddd     diameter + 0.5 inch
//! ```
//!
//! The half-inch flag shares the byte with the magnitude, so only
//! diameters up to 127 inches survive a round trip. Entries between 128
//! and 255 pass input validation and are sent as-is; with a fraction the
//! flag bit is already set by the magnitude and the half is lost. This is
//! a limitation of the board's wire format and is kept deliberately.

use crate::error::DiameterError;

/// Reset command byte.
pub const RESET_COMMAND: u8 = 0x00;
/// Set on the diameter byte when the entry has a fractional part.
pub const DIAMETER_HALF_FLAG: u8 = 0x80;

/// Largest accepted entry, in inches.
pub const MAX_DIAMETER_INCHES: f64 = 255.0;
/// Smallest accepted entry, in inches.
pub const MIN_DIAMETER_INCHES: f64 = 1.0;

const CM_PER_INCH: f64 = 2.54;

/// A wheel diameter that passed input validation (1..=255 inches).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WheelDiameter {
    inches: f64,
}

impl WheelDiameter {
    pub fn new(inches: f64) -> Result<Self, DiameterError> {
        if inches.is_nan() {
            return Err(DiameterError::NotANumber);
        }
        if inches > MAX_DIAMETER_INCHES {
            return Err(DiameterError::TooLarge);
        }
        if inches < MIN_DIAMETER_INCHES {
            return Err(DiameterError::TooSmall);
        }
        Ok(Self { inches })
    }

    /// Parse a user entry such as `"27"` or `"27.5"`.
    pub fn parse(text: &str) -> Result<Self, DiameterError> {
        let inches: f64 = text.trim().parse().map_err(|_| DiameterError::NotANumber)?;
        Self::new(inches)
    }

    pub fn inches(self) -> f64 {
        self.inches
    }

    /// Whole-inch part, truncated.
    pub fn whole_inches(self) -> u8 {
        self.inches.trunc() as u8
    }

    /// Any fractional part is transmitted as a half inch.
    pub fn has_fraction(self) -> bool {
        self.inches.fract() != 0.0
    }
}

/// Encode a validated diameter into its command byte.
pub fn encode_diameter_command(diameter: WheelDiameter) -> u8 {
    encode_diameter_byte(diameter.whole_inches(), diameter.has_fraction())
}

/// Raw form of [`encode_diameter_command`].
pub const fn encode_diameter_byte(whole_inches: u8, half: bool) -> u8 {
    if half {
        whole_inches | DIAMETER_HALF_FLAG
    } else {
        whole_inches
    }
}

/// Command telling the board the diameter was cleared.
pub const fn encode_reset_command() -> u8 {
    RESET_COMMAND
}

/// Board-side view of a received command byte.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DiameterCommand {
    Reset,
    WheelDiameter { whole_inches: u8, half: bool },
}

impl DiameterCommand {
    pub const fn from_byte(byte: u8) -> Self {
        if byte == RESET_COMMAND {
            Self::Reset
        } else {
            Self::WheelDiameter {
                whole_inches: byte & !DIAMETER_HALF_FLAG,
                half: byte & DIAMETER_HALF_FLAG != 0,
            }
        }
    }

    /// Diameter in centimetres, `None` for a reset.
    pub fn centimeters(self) -> Option<f64> {
        match self {
            Self::Reset => None,
            Self::WheelDiameter { whole_inches, half } => {
                let inches = f64::from(whole_inches) + if half { 0.5 } else { 0.0 };
                Some(inches * CM_PER_INCH)
            }
        }
    }
}
