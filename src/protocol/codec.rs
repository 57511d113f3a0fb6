//! Notification payload decoder.
//!
//! Records pushed by the board on the TX characteristic:
//! ```text
//! len 1  [code]                       message code
//! len 2  [3, bpm]                     heart rate
//! len 3  [1, kmh, hundredths]         speed  = kmh + hundredths / 100
//! len 3  [2, rpm_lo, rpm_hi]          cadence (LE u16)
//! len 4  [4, role, percent, -]        battery level, last byte reserved
//! ```
//!
//! Decoding is a pure function of the payload; it holds no state and may
//! run concurrently for different peripherals.

use serde::Serialize;

use super::{TYPE_BATTERY, TYPE_CADENCE, TYPE_HEART_RATE, TYPE_SPEED};
use crate::error::CodecError;
use crate::resolver::SensorRole;

/// One decoded notification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum SensorEvent {
    /// Status code from the board (see [`crate::status::StatusCode`]).
    MessageCode { code: u8 },
    Speed {
        whole_kmh: u8,
        fractional_hundredths: u8,
    },
    Cadence { rpm: u16 },
    HeartRate { bpm: u8 },
    /// `sensor_role` is the wire tag of the sensor the level belongs to.
    BatteryLevel { sensor_role: u8, percent: u8 },
}

impl SensorEvent {
    /// Speed in km/h, if this is a speed record.
    pub fn speed_kmh(&self) -> Option<f64> {
        match *self {
            Self::Speed {
                whole_kmh,
                fractional_hundredths,
            } => Some(f64::from(whole_kmh) + f64::from(fractional_hundredths) / 100.0),
            _ => None,
        }
    }

    /// Role of the sensor a battery record refers to.
    pub fn battery_role(&self) -> Option<SensorRole> {
        match *self {
            Self::BatteryLevel { sensor_role, .. } => Some(SensorRole::from_wire_tag(sensor_role)),
            _ => None,
        }
    }

    /// True for a battery record at or below `threshold` percent.
    pub fn is_low_battery(&self, threshold: u8) -> bool {
        matches!(*self, Self::BatteryLevel { percent, .. } if percent <= threshold)
    }
}

/// Decode one notification payload.
///
/// Dispatch is purely on length; see the module docs for the layouts.
pub fn decode(bytes: &[u8]) -> Result<SensorEvent, CodecError> {
    match *bytes {
        [code] => Ok(SensorEvent::MessageCode { code }),
        [TYPE_HEART_RATE, bpm] => Ok(SensorEvent::HeartRate { bpm }),
        [TYPE_SPEED, whole_kmh, fractional_hundredths] => Ok(SensorEvent::Speed {
            whole_kmh,
            fractional_hundredths,
        }),
        [TYPE_CADENCE, lo, hi] => Ok(SensorEvent::Cadence {
            rpm: u16::from_le_bytes([lo, hi]),
        }),
        [TYPE_BATTERY, sensor_role, percent, _reserved] => Ok(SensorEvent::BatteryLevel {
            sensor_role,
            percent,
        }),
        [tag, _] | [tag, _, _] | [tag, _, _, _] => Err(CodecError::UnknownType(tag)),
        _ => Err(CodecError::InvalidLength(bytes.len())),
    }
}
