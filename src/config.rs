//! Bridge configuration parameters
//!
//! Name fragments used to classify peripherals and the few tunables the
//! session driver needs. Loaded from JSON by the CLI; defaults match the
//! stock sensor kit (Nordic board, SPD/CAD sensors, Polar strap).

use heapless::String;
use serde::{Deserialize, Serialize};

/// Maximum length of a single name fragment.
pub const FRAGMENT_CAP: usize = 16;

/// Substrings that identify each peripheral role by advertised name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NameFragments {
    pub board: String<FRAGMENT_CAP>,
    pub speed: String<FRAGMENT_CAP>,
    pub cadence: String<FRAGMENT_CAP>,
    pub heart_rate: String<FRAGMENT_CAP>,
}

impl Default for NameFragments {
    fn default() -> Self {
        Self {
            board: fragment("Nordic"),
            speed: fragment("SPD"),
            cadence: fragment("CAD"),
            heart_rate: fragment("Polar"),
        }
    }
}

/// Core bridge configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BridgeConfig {
    /// Role-identifying name fragments
    pub fragments: NameFragments,
    /// Board plus sensors the user may select at once
    pub max_selected_peripherals: u8,
    /// Seconds represented by one speed notification (distance integration)
    pub distance_sample_secs: f64,
    /// Battery percentage at or below which a sensor is reported low
    pub low_battery_percent: u8,
}

impl Default for BridgeConfig {
    fn default() -> Self {
        Self {
            fragments: NameFragments::default(),
            max_selected_peripherals: 4,
            distance_sample_secs: 1.0, // board notifies speed at 1 Hz
            low_battery_percent: 10,
        }
    }
}

/// Errors from [`BridgeConfig::validate`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigError {
    /// A field failed range validation.
    ValidationFailed(&'static str),
}

impl core::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::ValidationFailed(msg) => write!(f, "validation failed: {}", msg),
        }
    }
}

impl From<ConfigError> for crate::error::Error {
    fn from(e: ConfigError) -> Self {
        match e {
            ConfigError::ValidationFailed(msg) => Self::Config(msg),
        }
    }
}

impl BridgeConfig {
    /// Reject configurations that would make classification ambiguous or
    /// the distance counter non-finite.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let f = &self.fragments;
        let all = [&f.board, &f.speed, &f.cadence, &f.heart_rate];

        if all.iter().any(|s| s.is_empty()) {
            return Err(ConfigError::ValidationFailed("name fragment is empty"));
        }
        // Classification is first-match on substrings, so one fragment
        // inside another would shadow a role.
        for (i, a) in all.iter().enumerate() {
            for (j, b) in all.iter().enumerate() {
                if i != j && a.contains(b.as_str()) {
                    return Err(ConfigError::ValidationFailed(
                        "name fragments must not overlap",
                    ));
                }
            }
        }
        if self.max_selected_peripherals < 2 {
            return Err(ConfigError::ValidationFailed(
                "max_selected_peripherals must allow a board and a sensor",
            ));
        }
        if !self.distance_sample_secs.is_finite() || self.distance_sample_secs <= 0.0 {
            return Err(ConfigError::ValidationFailed(
                "distance_sample_secs must be positive and finite",
            ));
        }
        if self.low_battery_percent > 100 {
            return Err(ConfigError::ValidationFailed("low_battery_percent above 100"));
        }
        Ok(())
    }
}

fn fragment(s: &str) -> String<FRAGMENT_CAP> {
    let mut out = String::new();
    // Built-in literals are all shorter than FRAGMENT_CAP.
    let _ = out.push_str(s);
    out
}
