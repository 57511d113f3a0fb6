//! Ride distance integrated from the speed stream.

/// Session-scoped distance counter, fed only by speed samples.
///
/// Each speed notification stands for `sample_secs` of riding at that
/// speed (the board notifies at a fixed rate).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DistanceAccumulator {
    km: f64,
    sample_secs: f64,
}

impl DistanceAccumulator {
    pub fn new(sample_secs: f64) -> Self {
        Self {
            km: 0.0,
            sample_secs,
        }
    }

    /// Add one speed sample (km/h) and return the new total in km.
    pub fn add_sample(&mut self, kmh: f64) -> f64 {
        self.km += kmh * self.sample_secs / 3600.0;
        self.km
    }

    pub fn km(&self) -> f64 {
        self.km
    }

    pub fn reset(&mut self) {
        self.km = 0.0;
    }
}
