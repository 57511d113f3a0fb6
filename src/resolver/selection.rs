//! Pre-connect checks on the user's selection.
//!
//! Runs before [`resolve`](super::resolve) so the scanner screen can
//! refuse a bad selection without opening a connection.

use log::warn;

use super::SensorRole;
use crate::config::BridgeConfig;
use crate::error::ResolutionError;
use crate::peripheral::DiscoveredPeripheral;

/// Check the selection size, that every device is recognised, and that
/// exactly one board plus at least one sensor is present.
pub fn validate(
    selected: &[DiscoveredPeripheral],
    config: &BridgeConfig,
) -> Result<(), ResolutionError> {
    if selected.len() > usize::from(config.max_selected_peripherals) {
        warn!(
            "Selection rejected: {} devices, limit {}",
            selected.len(),
            config.max_selected_peripherals
        );
        return Err(ResolutionError::TooManySensors);
    }

    let mut boards = 0usize;
    for p in selected {
        match SensorRole::classify(p.name(), &config.fragments) {
            SensorRole::Unknown => {
                warn!("Selection rejected: unrecognized device {}", p.address());
                return Err(ResolutionError::UnrecognizedSensor);
            }
            SensorRole::Board => boards += 1,
            _ => {}
        }
    }

    match boards {
        0 => Err(ResolutionError::NoBoardSelected),
        1 if selected.len() == 1 => Err(ResolutionError::NoSensorSelected),
        1 => Ok(()),
        _ => Err(ResolutionError::MultipleBoardsSelected),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::peripheral::PeripheralAddress;

    fn dev(name: Option<&str>, last: u8) -> DiscoveredPeripheral {
        let addr = format!("11:22:33:44:55:{:02X}", last);
        DiscoveredPeripheral::new(name, PeripheralAddress::new(&addr).unwrap(), -70)
    }

    #[test]
    fn valid_selection_passes() {
        let sel = [dev(Some("Nordic"), 0), dev(Some("SPD"), 1), dev(Some("Polar"), 2)];
        assert_eq!(validate(&sel, &BridgeConfig::default()), Ok(()));
    }

    #[test]
    fn more_than_four_devices_rejected() {
        let sel = [
            dev(Some("Nordic"), 0),
            dev(Some("SPD"), 1),
            dev(Some("CAD"), 2),
            dev(Some("Polar"), 3),
            dev(Some("SPD"), 4),
        ];
        assert_eq!(
            validate(&sel, &BridgeConfig::default()),
            Err(ResolutionError::TooManySensors)
        );
    }

    #[test]
    fn unnamed_device_rejected() {
        let sel = [dev(Some("Nordic"), 0), dev(None, 1)];
        assert_eq!(
            validate(&sel, &BridgeConfig::default()),
            Err(ResolutionError::UnrecognizedSensor)
        );
    }

    #[test]
    fn sensors_without_board_rejected() {
        let sel = [dev(Some("SPD"), 1), dev(Some("CAD"), 2)];
        assert_eq!(
            validate(&sel, &BridgeConfig::default()),
            Err(ResolutionError::NoBoardSelected)
        );
    }

    #[test]
    fn board_alone_rejected() {
        let sel = [dev(Some("Nordic"), 0)];
        assert_eq!(
            validate(&sel, &BridgeConfig::default()),
            Err(ResolutionError::NoSensorSelected)
        );
    }
}
