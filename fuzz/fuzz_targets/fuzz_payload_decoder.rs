//! Fuzz target: notification decoding through `SessionService`
//!
//! Splits the input into payloads on a length prefix and feeds each one
//! to a live session. Decoding must never panic and the distance counter
//! must stay finite and non-negative.
//!
//! cargo fuzz run fuzz_payload_decoder

#![no_main]

use cscbridge::app::events::SessionEvent;
use cscbridge::app::ports::EventSink;
use cscbridge::app::service::SessionService;
use cscbridge::config::BridgeConfig;
use cscbridge::peripheral::{DiscoveredPeripheral, PeripheralAddress};
use libfuzzer_sys::fuzz_target;

struct Discard;
impl EventSink for Discard {
    fn emit(&mut self, _: &SessionEvent) {}
}

fuzz_target!(|data: &[u8]| {
    let sel = [
        DiscoveredPeripheral::new(Some("Nordic"), PeripheralAddress::new("01:02:03:04:05:06").unwrap(), 0),
        DiscoveredPeripheral::new(Some("SPD"), PeripheralAddress::new("01:02:03:04:05:07").unwrap(), 0),
    ];
    let mut svc = SessionService::new(BridgeConfig::default(), &sel).unwrap();
    let mut sink = Discard;

    let mut rest = data;
    while let Some((&len, tail)) = rest.split_first() {
        let n = usize::from(len % 8).min(tail.len());
        let (payload, next) = tail.split_at(n);
        if let Some(event) = svc.on_notification(payload, &mut sink) {
            assert!((1..=4).contains(&payload.len()), "decoded {:?} from {} bytes", event, payload.len());
        }
        rest = next;
    }

    let km = svc.distance_km();
    assert!(km.is_finite() && km >= 0.0, "distance {km}");
});
