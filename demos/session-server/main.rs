// demos/session-server/main.rs
//
// A PFCP session server: terminates N4 on a UDP socket and programs an
// in-memory datapath. Pair it with any PFCP client (or the scenarios in
// tests/) to watch association, session, and heartbeat handling end to end.

use anyhow::{anyhow, Context, Result};
use clap::Parser;
use log::{debug, info, warn, LevelFilter};
use network_interface::{NetworkInterface, NetworkInterfaceConfig};
use serde::Deserialize;
use std::net::{IpAddr, Ipv4Addr, UdpSocket};
use std::path::PathBuf;
use std::sync::Arc;

use upf_n4::datapath::memory::MemoryDatapath;
use upf_n4::message::display;
use upf_n4::n4::N4Handler;
use upf_n4::xact::UdpTransaction;

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Network interface to bind to (first IPv4 address is used)
    #[arg(short, long, conflicts_with = "addr")]
    interface: Option<String>,

    /// Explicit IPv4 address to bind to
    #[arg(short, long)]
    addr: Option<Ipv4Addr>,

    /// UDP port to listen on
    #[arg(short, long, default_value_t = 8805)]
    port: u16,

    /// Optional YAML config file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Log verbosity (error, warn, info, debug, trace)
    #[arg(long, default_value = "info")]
    log_level: LevelFilter,
}

/// File-based settings; command-line flags win over these.
#[derive(Debug, Default, Deserialize)]
struct Config {
    /// Name of the GTP-U device rules are installed on.
    #[serde(default)]
    device: Option<String>,
    #[serde(default)]
    addr: Option<Ipv4Addr>,
    #[serde(default)]
    port: Option<u16>,
}

fn load_config(path: Option<&PathBuf>) -> Result<Config> {
    match path {
        Some(path) => {
            let raw = std::fs::read_to_string(path)
                .with_context(|| format!("reading config {}", path.display()))?;
            serde_yaml_ng::from_str(&raw)
                .with_context(|| format!("parsing config {}", path.display()))
        }
        None => Ok(Config::default()),
    }
}

fn interface_ipv4(name: &str) -> Result<Ipv4Addr> {
    let interfaces = NetworkInterface::show()?;
    let interface = interfaces
        .iter()
        .find(|iface| iface.name == name)
        .ok_or_else(|| anyhow!("interface '{name}' not found"))?;
    interface
        .addr
        .iter()
        .find_map(|addr| match addr {
            network_interface::Addr::V4(v4) => Some(v4.ip),
            _ => None,
        })
        .ok_or_else(|| anyhow!("no IPv4 address on interface '{name}'"))
}

fn main() -> Result<()> {
    let args = Args::parse();
    simple_logger::SimpleLogger::new()
        .with_level(args.log_level)
        .init()?;

    let config = load_config(args.config.as_ref())?;
    let device = config.device.unwrap_or_else(|| "upfgtp".to_string());
    let addr = match (&args.interface, args.addr.or(config.addr)) {
        (Some(name), _) => interface_ipv4(name)?,
        (None, Some(addr)) => addr,
        (None, None) => Ipv4Addr::LOCALHOST,
    };
    let port = if args.port != 8805 {
        args.port
    } else {
        config.port.unwrap_or(args.port)
    };

    let socket = UdpSocket::bind((IpAddr::V4(addr), port))?;
    info!("N4 listening on {} (device {device})", socket.local_addr()?);

    let datapath = Arc::new(MemoryDatapath::new(device.clone()));
    let handler = N4Handler::new(datapath.clone(), device, addr);

    let mut buf = [0u8; 1500];
    loop {
        let (len, peer) = socket.recv_from(&mut buf)?;
        let data = &buf[..len];

        match display::describe(data) {
            Ok(summary) => debug!("rx {peer}: {summary}"),
            Err(e) => {
                warn!("rx {peer}: undecodable datagram ({e})");
                continue;
            }
        }

        let mut xact = UdpTransaction::new(&socket, peer);
        if let Err(e) = handler.dispatch(&mut xact, data) {
            warn!("dispatch from {peer} failed: {e}");
        } else {
            debug!(
                "datapath now holds {} PDR(s), {} FAR(s); {} session(s)",
                datapath.pdr_count(),
                datapath.far_count(),
                handler.sessions().len()
            );
        }
    }
}
