//! cscbridge: command-line replay bridge.
//!
//! ```text
//!  args: name@address ...  ──▶ SessionService::new ──▶ packets (hex, stdout)
//!  stdin: hex payload       ──▶ on_notification    ──▶ JSON event (stdout)
//!  stdin: control line      ──▶ handle_command / on_link_state
//! ```
//!
//! Control lines: `diameter <inches>`, `reset-diameter`, `reset-distance`,
//! `disconnect`, `ready`. Anything else is read as a hex payload.
//! Logs go to stderr; set `RUST_LOG` to change the level and
//! `CSCBRIDGE_CONFIG` to load a JSON [`BridgeConfig`].

#![deny(unused_must_use)]

use std::io::{self, BufRead, Write};

use anyhow::{Context, Result, bail};
use log::{info, warn};
use serde::Serialize;

use cscbridge::adapters::log_sink::LogEventSink;
use cscbridge::adapters::stream_link::{StreamLink, parse_hex_line};
use cscbridge::app::commands::SessionCommand;
use cscbridge::app::ports::LinkState;
use cscbridge::app::service::SessionService;
use cscbridge::config::BridgeConfig;
use cscbridge::peripheral::{DiscoveredPeripheral, PeripheralAddress};
use cscbridge::protocol::codec::SensorEvent;
use cscbridge::protocol::command::WheelDiameter;

const CONFIG_ENV: &str = "CSCBRIDGE_CONFIG";

#[derive(Serialize)]
struct DistanceLine {
    distance_km: f64,
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let config = load_config()?;
    let selected = parse_selection(std::env::args().skip(1))?;

    let mut session = SessionService::new(config, &selected).context("selection rejected")?;
    info!("Board {} selected", session.board().address());

    let mut link = StreamLink::new(io::stdout());
    let mut sink = LogEventSink::new();

    for state in [LinkState::Connecting, LinkState::Initializing, LinkState::Ready] {
        session
            .on_link_state(state, &mut link, &mut sink)
            .context("link setup failed")?;
    }

    let stdin = io::stdin();
    for line in stdin.lock().lines() {
        let line = line.context("reading stdin")?;
        let line = line.trim();
        if line.is_empty() {
            continue;
        }
        if let Err(e) = handle_line(line, &mut session, &mut link, &mut sink) {
            warn!("{:#}", e);
        }
    }

    session
        .on_link_state(LinkState::Disconnected, &mut link, &mut sink)
        .context("disconnect failed")?;
    info!("Ride distance {:.3} km", session.distance_km());
    Ok(())
}

fn load_config() -> Result<BridgeConfig> {
    let Ok(path) = std::env::var(CONFIG_ENV) else {
        return Ok(BridgeConfig::default());
    };
    let text = std::fs::read_to_string(&path).with_context(|| format!("reading {path}"))?;
    let config: BridgeConfig =
        serde_json::from_str(&text).with_context(|| format!("parsing {path}"))?;
    info!("Loaded config from {}", path);
    Ok(config)
}

/// `name@address` per argument; an empty name selects an unnamed device.
fn parse_selection(args: impl Iterator<Item = String>) -> Result<Vec<DiscoveredPeripheral>> {
    let mut selected = Vec::new();
    for arg in args {
        let Some((name, addr)) = arg.rsplit_once('@') else {
            bail!("expected name@address, got {arg:?}");
        };
        let address = PeripheralAddress::new(addr)
            .map_err(|e| anyhow::anyhow!("bad address in {arg:?}: {e}"))?;
        let name = (!name.is_empty()).then_some(name);
        selected.push(DiscoveredPeripheral::new(name, address, 0));
    }
    if selected.is_empty() {
        bail!("usage: cscbridge NAME@ADDRESS [NAME@ADDRESS ...]");
    }
    Ok(selected)
}

fn handle_line<W: Write>(
    line: &str,
    session: &mut SessionService,
    link: &mut StreamLink<W>,
    sink: &mut LogEventSink,
) -> Result<()> {
    let command = match line.split_once(' ').map_or((line, ""), |(c, rest)| (c, rest.trim())) {
        ("diameter", value) => match WheelDiameter::parse(value) {
            Ok(d) => Some(SessionCommand::SetWheelDiameter(d)),
            Err(e) => {
                // Rejected entries surface as the matching status code.
                print_json(&SensorEvent::MessageCode {
                    code: e.status_code(),
                })?;
                bail!("diameter {value:?} rejected: {e}");
            }
        },
        ("reset-diameter", _) => Some(SessionCommand::ResetDiameter),
        ("reset-distance", _) => Some(SessionCommand::ResetDistance),
        ("disconnect", _) => {
            session
                .on_link_state(LinkState::Disconnected, link, sink)
                .context("disconnect failed")?;
            return Ok(());
        }
        ("ready", _) => {
            session
                .on_link_state(LinkState::Connecting, link, sink)
                .and_then(|_| session.on_link_state(LinkState::Ready, link, sink))
                .context("reconnect failed")?;
            return Ok(());
        }
        _ => None,
    };

    if let Some(cmd) = command {
        session
            .handle_command(cmd, link, sink)
            .context("command failed")?;
        if cmd == SessionCommand::ResetDistance {
            print_json(&DistanceLine { distance_km: 0.0 })?;
        }
        return Ok(());
    }

    let Some(payload) = parse_hex_line(line) else {
        bail!("not a command or hex payload: {line:?}");
    };
    if let Some(event) = session.on_notification(&payload, sink) {
        print_json(&event)?;
        if event.speed_kmh().is_some() {
            print_json(&DistanceLine {
                distance_km: session.distance_km(),
            })?;
        }
    }
    Ok(())
}

fn print_json(value: &impl Serialize) -> Result<()> {
    let text = serde_json::to_string(value).context("encoding event")?;
    let mut out = io::stdout().lock();
    writeln!(out, "{text}").context("writing stdout")?;
    Ok(())
}
