//! Status codes carried by single-byte `MessageCode` notifications.
//!
//! Codes 10–22 are produced by the board as sensors come and go; 23–25
//! are raised on the phone when a diameter entry is rejected. Mapping a
//! code to on-screen text is up to the presentation layer;
//! [`StatusCode::description`] is the reference wording.

use core::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StatusCode {
    ServiceNotFound,
    CscSensorDisconnected,
    HeartRateDisconnected,
    AllSensorsDisconnected,
    SpeedConnected,
    CadenceConnected,
    FirstSensorConnected,
    SecondSensorReadyWithSpeed,
    SecondSensorReady,
    SecondSensorWaiting,
    ThirdSensorConnected,
    HeartRateConnected,
    HeartRateReconnected,
    DiameterNotANumber,
    DiameterTooLarge,
    DiameterTooSmall,
    /// Code not known to this build.
    Other(u8),
}

impl StatusCode {
    pub const fn from_code(code: u8) -> Self {
        match code {
            10 => Self::ServiceNotFound,
            11 => Self::CscSensorDisconnected,
            12 => Self::HeartRateDisconnected,
            13 => Self::AllSensorsDisconnected,
            14 => Self::SpeedConnected,
            15 => Self::CadenceConnected,
            16 => Self::FirstSensorConnected,
            17 => Self::SecondSensorReadyWithSpeed,
            18 => Self::SecondSensorReady,
            19 => Self::SecondSensorWaiting,
            20 => Self::ThirdSensorConnected,
            21 => Self::HeartRateConnected,
            22 => Self::HeartRateReconnected,
            23 => Self::DiameterNotANumber,
            24 => Self::DiameterTooLarge,
            25 => Self::DiameterTooSmall,
            other => Self::Other(other),
        }
    }

    pub const fn code(self) -> u8 {
        match self {
            Self::ServiceNotFound => 10,
            Self::CscSensorDisconnected => 11,
            Self::HeartRateDisconnected => 12,
            Self::AllSensorsDisconnected => 13,
            Self::SpeedConnected => 14,
            Self::CadenceConnected => 15,
            Self::FirstSensorConnected => 16,
            Self::SecondSensorReadyWithSpeed => 17,
            Self::SecondSensorReady => 18,
            Self::SecondSensorWaiting => 19,
            Self::ThirdSensorConnected => 20,
            Self::HeartRateConnected => 21,
            Self::HeartRateReconnected => 22,
            Self::DiameterNotANumber => 23,
            Self::DiameterTooLarge => 24,
            Self::DiameterTooSmall => 25,
            Self::Other(code) => code,
        }
    }

    /// True once every selected sensor is up and data will flow.
    pub const fn is_ready(self) -> bool {
        matches!(
            self,
            Self::SpeedConnected
                | Self::CadenceConnected
                | Self::SecondSensorReadyWithSpeed
                | Self::SecondSensorReady
                | Self::ThirdSensorConnected
                | Self::HeartRateConnected
        )
    }

    /// The board only measures speed once it knows the wheel diameter.
    pub const fn needs_diameter(self) -> bool {
        matches!(
            self,
            Self::SpeedConnected | Self::SecondSensorReadyWithSpeed | Self::ThirdSensorConnected
        )
    }

    pub const fn description(self) -> &'static str {
        match self {
            Self::ServiceNotFound => "Service not found, retrying",
            Self::CscSensorDisconnected => "Disconnected from CSC sensor",
            Self::HeartRateDisconnected => "Disconnected from heart rate sensor",
            Self::AllSensorsDisconnected => "Disconnected from all sensors",
            Self::SpeedConnected => "Speed sensor connected, enter wheel diameter to start",
            Self::CadenceConnected => "Cadence sensor connected",
            Self::FirstSensorConnected => "First sensor connected, waiting for next sensor",
            Self::SecondSensorReadyWithSpeed => {
                "Second sensor connected, enter wheel diameter to start"
            }
            Self::SecondSensorReady => "Second sensor connected",
            Self::SecondSensorWaiting => "Second sensor connected, waiting for next sensor",
            Self::ThirdSensorConnected => "Third sensor connected, enter wheel diameter to start",
            Self::HeartRateConnected => "Heart rate sensor connected",
            Self::HeartRateReconnected => "Heart rate sensor reconnected",
            Self::DiameterNotANumber => "Diameter value must be a number",
            Self::DiameterTooLarge => "Please enter a value smaller than 255 inch",
            Self::DiameterTooSmall => "Please enter a value bigger than 1 inch",
            Self::Other(_) => "Unknown status",
        }
    }
}

impl fmt::Display for StatusCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {}", self.code(), self.description())
    }
}
