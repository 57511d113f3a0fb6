//! Wire-level checks from the board's side of the link.

use cscbridge::peripheral::PeripheralAddress;
use cscbridge::protocol::codec::{SensorEvent, decode};
use cscbridge::protocol::command::{DiameterCommand, WheelDiameter, encode_diameter_command};
use cscbridge::resolver::{AddressPacket, DeviceCountCode, SensorRole};
use cscbridge::status::StatusCode;

#[test]
fn board_recovers_every_packet_field() {
    let addr = PeripheralAddress::new("E4:5F:01:2A:7C:90").unwrap();
    let packet = AddressPacket::build(&addr, 2, DeviceCountCode::CadenceHeartRate);
    let parsed = AddressPacket::parse(packet.as_bytes()).unwrap();

    assert_eq!(parsed.address.as_str(), "E4:5F:01:2A:7C:90");
    assert_eq!(parsed.sensor_count, 2);
    assert!(parsed.code.roles().contains(SensorRole::HeartRate));
    assert!(!parsed.code.roles().contains(SensorRole::Speed));
}

#[test]
fn board_reads_the_diameter_the_phone_sent() {
    for (text, cm) in [("28", 28.0 * 2.54), ("26.5", 26.5 * 2.54), ("1", 2.54)] {
        let byte = encode_diameter_command(WheelDiameter::parse(text).unwrap());
        let got = DiameterCommand::from_byte(byte).centimeters().unwrap();
        assert!((got - cm).abs() < 1e-9, "{text}: {got} != {cm}");
    }
}

#[test]
fn status_stream_decodes_to_known_codes() {
    for code in [10u8, 14, 16, 17, 20, 22] {
        let ev = decode(&[code]).unwrap();
        let SensorEvent::MessageCode { code: got } = ev else {
            panic!("expected a message code, got {ev:?}");
        };
        assert!(!matches!(StatusCode::from_code(got), StatusCode::Other(_)));
    }
}

#[test]
fn battery_record_names_its_sensor() {
    let ev = decode(&[4, 3, 8, 0]).unwrap();
    assert_eq!(ev.battery_role(), Some(SensorRole::HeartRate));
    assert!(ev.is_low_battery(10));
    assert!(!decode(&[4, 1, 80, 0]).unwrap().is_low_battery(10));
}

#[test]
fn events_serialize_with_a_type_tag() {
    let json = serde_json::to_string(&decode(&[1, 24, 75]).unwrap()).unwrap();
    assert_eq!(json, r#"{"type":"speed","whole_kmh":24,"fractional_hundredths":75}"#);

    let json = serde_json::to_string(&decode(&[3, 151]).unwrap()).unwrap();
    assert_eq!(json, r#"{"type":"heart_rate","bpm":151}"#);
}
