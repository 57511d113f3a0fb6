//! End-to-end session scenarios through `SessionService`.

use cscbridge::app::commands::SessionCommand;
use cscbridge::app::events::SessionEvent;
use cscbridge::app::ports::LinkState;
use cscbridge::app::service::SessionService;
use cscbridge::config::BridgeConfig;
use cscbridge::error::{Error, LinkError, ResolutionError};
use cscbridge::protocol::command::WheelDiameter;
use cscbridge::resolver::DeviceCountCode;

use crate::mock_link::{MockLink, MockSink, address, device};

fn connect(svc: &mut SessionService, link: &mut MockLink, sink: &mut MockSink) -> u8 {
    svc.on_link_state(LinkState::Connecting, link, sink).unwrap();
    svc.on_link_state(LinkState::Initializing, link, sink).unwrap();
    svc.on_link_state(LinkState::Ready, link, sink).unwrap()
}

fn full_session() -> SessionService {
    let sel = [
        device("Polar H10", 3),
        device("CAD-77", 2),
        device("Nordic_CSC", 0),
        device("SPD-42", 1),
    ];
    SessionService::new(BridgeConfig::default(), &sel).unwrap()
}

// ── Address packets ───────────────────────────────────────────

#[test]
fn ready_writes_packets_in_canonical_order() {
    let mut svc = full_session();
    let (mut link, mut sink) = (MockLink::new(), MockSink::new());

    assert_eq!(connect(&mut svc, &mut link, &mut sink), 3);
    assert_eq!(
        link.packet_addresses(),
        [address(1), address(2), address(3)],
        "speed, cadence, heart rate"
    );
    for w in &link.writes {
        assert_eq!(w[17], 3);
        assert_eq!(w[18], DeviceCountCode::SpeedCadenceHeartRate.as_u8());
    }
    assert!(sink.events.contains(&SessionEvent::PacketsSent(3)));
}

#[test]
fn nothing_is_written_before_ready() {
    let mut svc = full_session();
    let (mut link, mut sink) = (MockLink::new(), MockSink::new());

    svc.on_link_state(LinkState::Connecting, &mut link, &mut sink).unwrap();
    svc.on_link_state(LinkState::Initializing, &mut link, &mut sink).unwrap();
    assert!(link.writes.is_empty());
}

#[test]
fn reconnect_resolves_again_and_resends() {
    let mut svc = full_session();
    let (mut link, mut sink) = (MockLink::new(), MockSink::new());

    connect(&mut svc, &mut link, &mut sink);
    svc.on_link_state(LinkState::Disconnected, &mut link, &mut sink).unwrap();
    assert!(svc.resolution().is_none());

    connect(&mut svc, &mut link, &mut sink);
    assert!(svc.resolution().is_some());
    assert_eq!(link.writes.len(), 6);
    assert_eq!(link.packet_addresses()[3..], [address(1), address(2), address(3)]);
    assert_eq!(
        sink.count(|e| matches!(e, SessionEvent::Resolved { .. })),
        2
    );
}

#[test]
fn write_failure_stops_the_packet_sequence() {
    let mut svc = full_session();
    let mut link = MockLink::failing_at(1);
    let mut sink = MockSink::new();

    svc.on_link_state(LinkState::Connecting, &mut link, &mut sink).unwrap();
    let result = svc.on_link_state(LinkState::Ready, &mut link, &mut sink);

    assert_eq!(result, Err(Error::Link(LinkError::WriteFailed)));
    assert_eq!(link.writes.len(), 1, "later packets must not jump the queue");
    assert_eq!(sink.count(|e| matches!(e, SessionEvent::PacketsSent(_))), 0);
}

// ── Selection ─────────────────────────────────────────────────

#[test]
fn bad_selections_fail_before_connecting() {
    let cfg = BridgeConfig::default;

    let no_board = [device("SPD-1", 1)];
    assert_eq!(
        SessionService::new(cfg(), &no_board).err(),
        Some(Error::Resolution(ResolutionError::NoBoardSelected))
    );

    let unknown = [device("Nordic", 0), device("Garmin", 1)];
    assert_eq!(
        SessionService::new(cfg(), &unknown).err(),
        Some(Error::Resolution(ResolutionError::UnrecognizedSensor))
    );

    let two_boards = [device("Nordic", 0), device("Nordic B", 9), device("SPD", 1)];
    assert_eq!(
        SessionService::new(cfg(), &two_boards).err(),
        Some(Error::Resolution(ResolutionError::MultipleBoardsSelected))
    );
}

#[test]
fn invalid_config_is_rejected() {
    let mut cfg = BridgeConfig::default();
    cfg.distance_sample_secs = 0.0;
    let sel = [device("Nordic", 0), device("SPD", 1)];
    assert!(matches!(
        SessionService::new(cfg, &sel),
        Err(Error::Config(_))
    ));
}

#[test]
fn config_that_would_corrupt_the_session_is_refused() {
    let sel = [device("Nordic", 0), device("SPD", 1)];

    // An infinite interval would turn the first 0 km/h sample into NaN km.
    let mut cfg = BridgeConfig::default();
    cfg.distance_sample_secs = f64::INFINITY;
    assert!(matches!(
        SessionService::new(cfg, &sel),
        Err(Error::Config(_))
    ));

    // "Nord" inside "Nordic" would let a speed sensor pass as the board.
    let mut cfg = BridgeConfig::default();
    cfg.fragments.speed = heapless::String::try_from("Nord").unwrap();
    assert!(matches!(
        SessionService::new(cfg, &sel),
        Err(Error::Config(_))
    ));
}

#[test]
fn stationary_samples_keep_distance_finite() {
    let mut svc = full_session();
    let mut sink = MockSink::new();
    svc.on_notification(&[1, 0, 0], &mut sink);
    assert_eq!(svc.distance_km(), 0.0);
}

// ── Notifications ─────────────────────────────────────────────

#[test]
fn malformed_payloads_do_not_end_the_stream() {
    let mut svc = full_session();
    let (mut link, mut sink) = (MockLink::new(), MockSink::new());
    connect(&mut svc, &mut link, &mut sink);

    assert!(svc.on_notification(&[], &mut sink).is_none());
    assert!(svc.on_notification(&[9, 9, 9], &mut sink).is_none());
    assert!(svc.on_notification(&[1, 2, 3, 4, 5], &mut sink).is_none());
    assert!(svc.on_notification(&[3, 72], &mut sink).is_some());

    assert_eq!(sink.count(|e| matches!(e, SessionEvent::DecodeFailed(_))), 3);
    assert_eq!(svc.link_state(), LinkState::Ready);
}

#[test]
fn speed_samples_accumulate_distance() {
    let mut svc = full_session();
    let mut sink = MockSink::new();

    // 36.00 km/h for 100 one-second samples is one kilometre.
    for _ in 0..100 {
        svc.on_notification(&[1, 36, 0], &mut sink);
    }
    assert!((svc.distance_km() - 1.0).abs() < 1e-9);
    assert!((sink.last_distance().unwrap() - 1.0).abs() < 1e-9);

    // Cadence and heart rate leave the distance alone.
    svc.on_notification(&[2, 0, 90], &mut sink);
    svc.on_notification(&[3, 140], &mut sink);
    assert!((svc.distance_km() - 1.0).abs() < 1e-9);

    let mut link = MockLink::new();
    svc.handle_command(SessionCommand::ResetDistance, &mut link, &mut sink)
        .unwrap();
    assert_eq!(svc.distance_km(), 0.0);
    assert_eq!(sink.last_distance(), Some(0.0));
    assert!(link.writes.is_empty(), "distance reset is local");
}

#[test]
fn sample_interval_comes_from_config() {
    let mut cfg = BridgeConfig::default();
    cfg.distance_sample_secs = 2.0;
    let sel = [device("Nordic", 0), device("SPD", 1)];
    let mut svc = SessionService::new(cfg, &sel).unwrap();
    let mut sink = MockSink::new();

    svc.on_notification(&[1, 18, 0], &mut sink);
    assert!((svc.distance_km() - 0.01).abs() < 1e-9);
}

// ── Commands ──────────────────────────────────────────────────

#[test]
fn diameter_and_reset_bytes_reach_the_board() {
    let mut svc = full_session();
    let (mut link, mut sink) = (MockLink::new(), MockSink::new());
    connect(&mut svc, &mut link, &mut sink);
    link.writes.clear();

    let d = WheelDiameter::parse("27.5").unwrap();
    svc.handle_command(SessionCommand::SetWheelDiameter(d), &mut link, &mut sink)
        .unwrap();
    svc.handle_command(SessionCommand::ResetDiameter, &mut link, &mut sink)
        .unwrap();

    assert_eq!(link.writes, [vec![0x9B], vec![0x00]]);
    assert!(sink.events.contains(&SessionEvent::DiameterSent(0x9B)));
    assert!(sink.events.contains(&SessionEvent::DiameterReset));
    assert_eq!(svc.wheel_diameter(), None);
}

#[test]
fn commands_after_disconnect_are_refused() {
    let mut svc = full_session();
    let (mut link, mut sink) = (MockLink::new(), MockSink::new());
    connect(&mut svc, &mut link, &mut sink);
    svc.on_link_state(LinkState::Disconnected, &mut link, &mut sink).unwrap();
    link.writes.clear();

    assert_eq!(
        svc.handle_command(SessionCommand::ResetDiameter, &mut link, &mut sink),
        Err(Error::Link(LinkError::NotConnected))
    );
    assert!(link.writes.is_empty());
}
