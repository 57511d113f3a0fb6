//! Sensor role resolution.
//!
//! Turns the user's peripheral selection into the board plus an ordered
//! list of sensors, and derives the address packets the board needs to
//! connect to them.
//!
//! ```text
//!  selection ──▶ classify by name ──▶ role set ──▶ DeviceCountCode
//!                        │
//!                        └──▶ canonical order (Speed, Cadence, HeartRate)
//!                                   │
//!                                   └──▶ AddressPacket × n  (transmit order)
//! ```
//!
//! Resolution runs once per connection session and holds no state; after
//! a disconnect the driver resolves again from the same selection.

pub mod packet;
pub mod selection;

use heapless::Vec;
use log::info;

use crate::config::NameFragments;
use crate::error::ResolutionError;
use crate::peripheral::DiscoveredPeripheral;
use crate::protocol::{MAX_SENSORS, TYPE_CADENCE, TYPE_HEART_RATE, TYPE_SPEED};
pub use packet::{AddressPacket, ParsedAddressPacket};

// ---------------------------------------------------------------------------
// Roles
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SensorRole {
    Board,
    Speed,
    Cadence,
    HeartRate,
    Unknown,
}

impl SensorRole {
    /// First-match classification by name fragment: board, then speed,
    /// cadence and heart rate. Unnamed peripherals are `Unknown`.
    pub fn classify(name: Option<&str>, fragments: &NameFragments) -> Self {
        let Some(name) = name else {
            return Self::Unknown;
        };
        if name.contains(fragments.board.as_str()) {
            Self::Board
        } else if name.contains(fragments.speed.as_str()) {
            Self::Speed
        } else if name.contains(fragments.cadence.as_str()) {
            Self::Cadence
        } else if name.contains(fragments.heart_rate.as_str()) {
            Self::HeartRate
        } else {
            Self::Unknown
        }
    }

    /// Record type tag used on the wire, for sensor roles only.
    pub const fn wire_tag(self) -> Option<u8> {
        match self {
            Self::Speed => Some(TYPE_SPEED),
            Self::Cadence => Some(TYPE_CADENCE),
            Self::HeartRate => Some(TYPE_HEART_RATE),
            Self::Board | Self::Unknown => None,
        }
    }

    pub const fn from_wire_tag(tag: u8) -> Self {
        match tag {
            TYPE_SPEED => Self::Speed,
            TYPE_CADENCE => Self::Cadence,
            TYPE_HEART_RATE => Self::HeartRate,
            _ => Self::Unknown,
        }
    }

    /// Position in the transmit order; non-sensor roles sort last.
    const fn canonical_rank(self) -> u8 {
        match self {
            Self::Speed => 0,
            Self::Cadence => 1,
            Self::HeartRate => 2,
            Self::Board | Self::Unknown => 3,
        }
    }

    const fn bit(self) -> u8 {
        match self {
            Self::Speed => 0b001,
            Self::Cadence => 0b010,
            Self::HeartRate => 0b100,
            Self::Board | Self::Unknown => 0,
        }
    }
}

/// Set of sensor roles present in a selection.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RoleSet(u8);

impl RoleSet {
    pub const fn empty() -> Self {
        Self(0)
    }

    pub fn insert(&mut self, role: SensorRole) {
        self.0 |= role.bit();
    }

    pub const fn contains(self, role: SensorRole) -> bool {
        let bit = role.bit();
        bit != 0 && self.0 & bit != 0
    }

    pub const fn is_empty(self) -> bool {
        self.0 == 0
    }
}

impl FromIterator<SensorRole> for RoleSet {
    fn from_iter<I: IntoIterator<Item = SensorRole>>(iter: I) -> Self {
        let mut set = Self::empty();
        for role in iter {
            set.insert(role);
        }
        set
    }
}

// ---------------------------------------------------------------------------
// Device count code
// ---------------------------------------------------------------------------

/// Which combination of sensor roles is active. Sent to the board and
/// used to pick status texts; independent of how many sensors share a
/// role.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum DeviceCountCode {
    SpeedOnly = 1,
    CadenceOnly = 2,
    SpeedCadence = 3,
    SpeedCadenceHeartRate = 4,
    SpeedHeartRate = 5,
    CadenceHeartRate = 6,
    HeartRateOnly = 7,
}

impl DeviceCountCode {
    /// Role-set mask → code.
    const TABLE: [(u8, Self); 7] = [
        (0b001, Self::SpeedOnly),
        (0b010, Self::CadenceOnly),
        (0b011, Self::SpeedCadence),
        (0b111, Self::SpeedCadenceHeartRate),
        (0b101, Self::SpeedHeartRate),
        (0b110, Self::CadenceHeartRate),
        (0b100, Self::HeartRateOnly),
    ];

    /// `None` for the empty set.
    pub fn from_roles(roles: RoleSet) -> Option<Self> {
        Self::TABLE
            .iter()
            .find(|(mask, _)| *mask == roles.0)
            .map(|&(_, code)| code)
    }

    pub fn from_u8(raw: u8) -> Option<Self> {
        Self::TABLE
            .iter()
            .find(|(_, code)| code.as_u8() == raw)
            .map(|&(_, code)| code)
    }

    pub const fn as_u8(self) -> u8 {
        self as u8
    }

    pub fn roles(self) -> RoleSet {
        Self::TABLE
            .iter()
            .find(|(_, code)| *code == self)
            .map_or(RoleSet::empty(), |&(mask, _)| RoleSet(mask))
    }
}

// ---------------------------------------------------------------------------
// Assignment
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AssignedSensor {
    pub peripheral: DiscoveredPeripheral,
    pub role: SensorRole,
}

/// Sensors in transmit order plus the code describing their roles.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RoleAssignment {
    sensors: Vec<AssignedSensor, MAX_SENSORS>,
    code: DeviceCountCode,
}

impl RoleAssignment {
    pub fn sensors(&self) -> &[AssignedSensor] {
        &self.sensors
    }

    pub fn code(&self) -> DeviceCountCode {
        self.code
    }

    /// Number of sensors, as carried in every address packet.
    pub fn sensor_count(&self) -> u8 {
        self.sensors.len() as u8
    }

    pub fn roles(&self) -> impl Iterator<Item = SensorRole> + '_ {
        self.sensors.iter().map(|s| s.role)
    }

    /// One packet per sensor, in transmit order.
    pub fn packets(&self) -> Vec<AddressPacket, MAX_SENSORS> {
        self.sensors
            .iter()
            .map(|s| AddressPacket::build(s.peripheral.address(), self.sensor_count(), self.code))
            .collect()
    }
}

/// Outcome of a successful [`resolve`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Resolution {
    pub board: DiscoveredPeripheral,
    pub assignment: RoleAssignment,
}

impl Resolution {
    pub fn packets(&self) -> Vec<AddressPacket, MAX_SENSORS> {
        self.assignment.packets()
    }
}

/// Classify the selection, order the sensors, and derive the code.
pub fn resolve(
    peripherals: &[DiscoveredPeripheral],
    fragments: &NameFragments,
) -> Result<Resolution, ResolutionError> {
    let is_board = |p: &&DiscoveredPeripheral| {
        SensorRole::classify(p.name(), fragments) == SensorRole::Board
    };

    let mut boards = peripherals.iter().filter(is_board);
    let board = boards.next().ok_or(ResolutionError::NoBoardSelected)?;
    if boards.next().is_some() {
        return Err(ResolutionError::MultipleBoardsSelected);
    }

    let sensor_count = peripherals.len() - 1;
    if sensor_count == 0 {
        return Err(ResolutionError::NoSensorSelected);
    }
    if sensor_count > MAX_SENSORS {
        return Err(ResolutionError::TooManySensors);
    }

    let mut sensors: Vec<AssignedSensor, MAX_SENSORS> = Vec::new();
    for p in peripherals.iter().filter(|p| !is_board(p)) {
        let role = SensorRole::classify(p.name(), fragments);
        if role == SensorRole::Unknown {
            return Err(ResolutionError::UnrecognizedSensor);
        }
        sensors
            .push(AssignedSensor {
                peripheral: p.clone(),
                role,
            })
            .map_err(|_| ResolutionError::TooManySensors)?;
    }

    let code = DeviceCountCode::from_roles(sensors.iter().map(|s| s.role).collect())
        .ok_or(ResolutionError::NoSensorSelected)?;
    sort_canonical(&mut sensors);

    info!(
        "Resolved board {} with {} sensor(s), code {}",
        board.address(),
        sensors.len(),
        code.as_u8()
    );

    Ok(Resolution {
        board: board.clone(),
        assignment: RoleAssignment { sensors, code },
    })
}

/// Stable insertion sort by canonical rank using adjacent swaps.
fn sort_canonical(sensors: &mut [AssignedSensor]) {
    for i in 1..sensors.len() {
        let mut j = i;
        while j > 0 && sensors[j - 1].role.canonical_rank() > sensors[j].role.canonical_rank() {
            sensors.swap(j - 1, j);
            j -= 1;
        }
    }
}
