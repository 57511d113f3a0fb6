//! Session service, the driver core.
//!
//! [`SessionService`] owns the peripheral selection, the current
//! resolution, the board link state, and the distance counter. Radio I/O
//! flows through port traits passed in at each call, so the service can
//! be driven entirely by mock adapters.
//!
//! ```text
//!  LinkState ──▶ ┌──────────────────────────┐ ──▶ BoardLink (packets, commands)
//!                │      SessionService       │
//!  payload   ──▶ │ Resolver · Codec · Dist.  │ ──▶ EventSink
//!                └──────────────────────────┘
//! ```

use heapless::Vec;
use log::{debug, info, warn};

use crate::config::BridgeConfig;
use crate::error::{Error, LinkError, ResolutionError};
use crate::peripheral::DiscoveredPeripheral;
use crate::protocol::codec::{SensorEvent, decode};
use crate::protocol::command::{WheelDiameter, encode_diameter_command, encode_reset_command};
use crate::protocol::MAX_SENSORS;
use crate::resolver::{Resolution, resolve, selection};
use crate::status::StatusCode;

use super::commands::SessionCommand;
use super::distance::DistanceAccumulator;
use super::events::SessionEvent;
use super::ports::{BoardLink, EventSink, LinkState};

/// Board plus the most sensors it can track.
pub const MAX_SELECTION: usize = MAX_SENSORS + 1;

// ───────────────────────────────────────────────────────────────
// SessionService
// ───────────────────────────────────────────────────────────────

/// One connection session with the board.
pub struct SessionService {
    config: BridgeConfig,
    selection: Vec<DiscoveredPeripheral, MAX_SELECTION>,
    board: DiscoveredPeripheral,
    /// Present from resolution until the link drops.
    resolution: Option<Resolution>,
    link: LinkState,
    distance: DistanceAccumulator,
    diameter: Option<WheelDiameter>,
}

impl SessionService {
    /// Validate the configuration and selection and resolve it once up
    /// front, so a bad selection fails before any connection is opened.
    pub fn new(config: BridgeConfig, selected: &[DiscoveredPeripheral]) -> Result<Self, Error> {
        config.validate()?;
        selection::validate(selected, &config)?;

        let selection: Vec<DiscoveredPeripheral, MAX_SELECTION> =
            Vec::from_slice(selected).map_err(|()| ResolutionError::TooManySensors)?;
        let resolution = resolve(&selection, &config.fragments)?;
        let distance = DistanceAccumulator::new(config.distance_sample_secs);

        Ok(Self {
            config,
            selection,
            board: resolution.board.clone(),
            resolution: Some(resolution),
            link: LinkState::Disconnected,
            distance,
            diameter: None,
        })
    }

    // ── Link lifecycle ────────────────────────────────────────

    /// Feed a connection-state change from the transport.
    ///
    /// On every transition into [`LinkState::Ready`] the address packets
    /// are written in assignment order. A disconnect drops the resolution;
    /// the next `Ready` resolves the selection again from scratch.
    ///
    /// Returns the number of packets written.
    pub fn on_link_state(
        &mut self,
        state: LinkState,
        link: &mut impl BoardLink,
        sink: &mut impl EventSink,
    ) -> Result<u8, Error> {
        let prev = self.link;
        if prev == state {
            return Ok(0);
        }
        self.link = state;
        sink.emit(&SessionEvent::LinkChanged {
            from: prev,
            to: state,
        });

        match state {
            LinkState::Ready => self.send_addresses(link, sink),
            LinkState::Disconnected => {
                if self.resolution.take().is_some() {
                    info!("Board disconnected, session abandoned");
                }
                Ok(0)
            }
            LinkState::Connecting | LinkState::Initializing | LinkState::Disconnecting => Ok(0),
        }
    }

    /// Decode one notification from the board.
    ///
    /// Decode failures are logged and reported through the sink; they never
    /// end the session.
    pub fn on_notification(&mut self, payload: &[u8], sink: &mut impl EventSink) -> Option<SensorEvent> {
        let event = match decode(payload) {
            Ok(event) => event,
            Err(e) => {
                warn!("Dropping notification {:02x?}: {}", payload, e);
                sink.emit(&SessionEvent::DecodeFailed(e));
                return None;
            }
        };

        sink.emit(&SessionEvent::Sensor(event));

        match event {
            SensorEvent::MessageCode { code } => {
                debug!("Board status {}", StatusCode::from_code(code));
            }
            SensorEvent::BatteryLevel { sensor_role, percent }
                if event.is_low_battery(self.config.low_battery_percent) =>
            {
                warn!("Sensor {} battery low: {}%", sensor_role, percent);
            }
            _ => {}
        }

        if let Some(kmh) = event.speed_kmh() {
            let km = self.distance.add_sample(kmh);
            sink.emit(&SessionEvent::DistanceUpdated { km });
        }

        Some(event)
    }

    // ── Command handling ──────────────────────────────────────

    /// Process a user command. Board writes require a ready link.
    pub fn handle_command(
        &mut self,
        cmd: SessionCommand,
        link: &mut impl BoardLink,
        sink: &mut impl EventSink,
    ) -> Result<(), Error> {
        match cmd {
            SessionCommand::SetWheelDiameter(diameter) => {
                self.require_ready()?;
                let byte = encode_diameter_command(diameter);
                info!("Sending wheel diameter {} in (0x{:02x})", diameter.inches(), byte);
                link.write(&[byte])?;
                self.diameter = Some(diameter);
                sink.emit(&SessionEvent::DiameterSent(byte));
            }
            SessionCommand::ResetDiameter => {
                self.require_ready()?;
                link.write(&[encode_reset_command()])?;
                self.diameter = None;
                sink.emit(&SessionEvent::DiameterReset);
            }
            SessionCommand::ResetDistance => {
                self.distance.reset();
                sink.emit(&SessionEvent::DistanceUpdated { km: 0.0 });
            }
        }
        Ok(())
    }

    // ── Queries ───────────────────────────────────────────────

    pub fn board(&self) -> &DiscoveredPeripheral {
        &self.board
    }

    pub fn link_state(&self) -> LinkState {
        self.link
    }

    /// Current resolution; `None` between a disconnect and the next ready.
    pub fn resolution(&self) -> Option<&Resolution> {
        self.resolution.as_ref()
    }

    pub fn distance_km(&self) -> f64 {
        self.distance.km()
    }

    pub fn wheel_diameter(&self) -> Option<WheelDiameter> {
        self.diameter
    }

    pub fn config(&self) -> &BridgeConfig {
        &self.config
    }

    // ── Internal ──────────────────────────────────────────────

    fn require_ready(&self) -> Result<(), LinkError> {
        if self.link == LinkState::Ready {
            Ok(())
        } else {
            Err(LinkError::NotConnected)
        }
    }

    fn send_addresses(
        &mut self,
        link: &mut impl BoardLink,
        sink: &mut impl EventSink,
    ) -> Result<u8, Error> {
        let resolution = match self.resolution.take() {
            Some(r) => r,
            None => resolve(&self.selection, &self.config.fragments).inspect_err(|e| {
                warn!("Re-resolution failed: {}", e);
                sink.emit(&SessionEvent::ResolutionFailed(*e));
            })?,
        };
        sink.emit(&SessionEvent::Resolved {
            code: resolution.assignment.code(),
            sensors: resolution.assignment.sensor_count(),
        });

        let packets = resolution.packets();
        self.resolution = Some(resolution);

        let mut sent = 0u8;
        for packet in &packets {
            link.write(packet.as_bytes())?;
            sent += 1;
        }
        info!("Sent {} address packet(s) to board", sent);
        sink.emit(&SessionEvent::PacketsSent(sent));
        Ok(sent)
    }
}
