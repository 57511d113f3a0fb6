//! Log-based event sink adapter.
//!
//! Implements [`EventSink`] by writing one structured line per session
//! event to the `log` facade.

use log::{info, warn};

use crate::app::events::SessionEvent;
use crate::app::ports::EventSink;
use crate::protocol::codec::SensorEvent;
use crate::status::StatusCode;

/// Adapter that logs every [`SessionEvent`].
#[derive(Debug, Default)]
pub struct LogEventSink;

impl LogEventSink {
    pub fn new() -> Self {
        Self
    }
}

impl EventSink for LogEventSink {
    fn emit(&mut self, event: &SessionEvent) {
        match event {
            SessionEvent::LinkChanged { from, to } => {
                info!("LINK | {:?} -> {:?}", from, to);
            }
            SessionEvent::Resolved { code, sensors } => {
                info!("RESOLVE | sensors={} code={}", sensors, code.as_u8());
            }
            SessionEvent::ResolutionFailed(e) => {
                warn!("RESOLVE | failed: {}", e);
            }
            SessionEvent::PacketsSent(n) => {
                info!("PACKETS | sent={}", n);
            }
            SessionEvent::Sensor(SensorEvent::MessageCode { code }) => {
                info!("STATUS | {}", StatusCode::from_code(*code));
            }
            SessionEvent::Sensor(SensorEvent::Speed {
                whole_kmh,
                fractional_hundredths,
            }) => {
                info!("SPEED | {}.{:02} km/h", whole_kmh, fractional_hundredths);
            }
            SessionEvent::Sensor(SensorEvent::Cadence { rpm }) => {
                info!("CADENCE | {} rpm", rpm);
            }
            SessionEvent::Sensor(SensorEvent::HeartRate { bpm }) => {
                info!("HR | {} bpm", bpm);
            }
            SessionEvent::Sensor(SensorEvent::BatteryLevel {
                sensor_role,
                percent,
            }) => {
                info!("BATT | sensor={} level={}%", sensor_role, percent);
            }
            SessionEvent::DecodeFailed(e) => {
                warn!("DECODE | dropped: {}", e);
            }
            SessionEvent::DistanceUpdated { km } => {
                info!("DIST | {:.3} km", km);
            }
            SessionEvent::DiameterSent(byte) => {
                info!("DIAM | sent 0x{:02x}", byte);
            }
            SessionEvent::DiameterReset => {
                info!("DIAM | reset");
            }
        }
    }
}
