//! Fuzz target: `AddressPacket::parse`
//!
//! Arbitrary bytes must never panic the board-side parser, and anything
//! it accepts must rebuild into a packet carrying the same fields.
//!
//! cargo fuzz run fuzz_address_packet

#![no_main]

use cscbridge::resolver::AddressPacket;
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    let Ok(parsed) = AddressPacket::parse(data) else {
        return;
    };
    let rebuilt = AddressPacket::build(&parsed.address, parsed.sensor_count, parsed.code);
    assert_eq!(rebuilt.sensor_count(), parsed.sensor_count);
    assert_eq!(rebuilt.code_byte(), parsed.code.as_u8());
    assert!(AddressPacket::parse(rebuilt.as_bytes()).is_ok());
});
