use std::time::Duration;

use clap::{Args, Subcommand, ValueEnum};
use espwire_peer::{
    Connection, ConnectionConfig, ConnectionState, MessageStream, DEFAULT_CLIENT_INFO,
};
use espwire_proto::{HelloResponse, Message};
use espwire_transport::TransportConfig;
use tracing::{debug, warn};

use crate::exit::{peer_error, CliError, CliResult, INTERNAL, USAGE};
use crate::output::OutputFormat;

pub mod entities;
pub mod info;
pub mod logs;
pub mod ping;
pub mod states;
pub mod switch;
pub mod version;

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Handshake and print the device's identity.
    Info(InfoArgs),
    /// Measure ping round trips.
    Ping(PingArgs),
    /// List the entities the device exposes.
    Entities(EntitiesArgs),
    /// Stream entity state updates.
    States(StatesArgs),
    /// Stream device log lines.
    Logs(LogsArgs),
    /// Turn a switch on or off.
    Switch(SwitchArgs),
    /// Show version information.
    Version(VersionArgs),
}

/// Where and how to reach the device. Shared by every subcommand.
#[derive(Args, Debug)]
pub struct DeviceArgs {
    /// Device address (`host`, `host:port`, `[ipv6]:port`). Port defaults to 6053.
    #[arg(long, short = 'a', env = "ESPWIRE_ADDRESS", global = true)]
    pub address: Option<String>,
    /// API password.
    #[arg(long, env = "ESPWIRE_PASSWORD", hide_env_values = true, global = true)]
    pub password: Option<String>,
    /// Client identity sent in the hello exchange.
    #[arg(long, value_name = "TEXT", global = true)]
    pub client_info: Option<String>,
    /// Connect and request timeout (e.g. 5s, 500ms).
    #[arg(long, default_value = "10s", global = true)]
    pub timeout: String,
}

impl DeviceArgs {
    fn address(&self) -> CliResult<&str> {
        self.address
            .as_deref()
            .filter(|addr| !addr.trim().is_empty())
            .ok_or_else(|| {
                CliError::new(
                    USAGE,
                    "no device address (use --address or ESPWIRE_ADDRESS)",
                )
            })
    }

    fn connection_config(&self) -> CliResult<ConnectionConfig> {
        let timeout = parse_timeout(&self.timeout)?;
        let transport = TransportConfig {
            connect_timeout: Some(timeout),
            ..TransportConfig::default()
        };
        Ok(ConnectionConfig::default()
            .with_client_info(self.client_info.as_deref().unwrap_or(DEFAULT_CLIENT_INFO))
            .with_password(self.password.clone().unwrap_or_default())
            .with_request_timeout(Some(timeout))
            .with_transport(transport))
    }
}

pub fn run(command: Command, device: DeviceArgs, format: OutputFormat) -> CliResult<i32> {
    if let Command::Version(args) = command {
        return version::run(args);
    }

    let runtime = tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()
        .map_err(|err| CliError::new(INTERNAL, format!("runtime setup failed: {err}")))?;
    runtime.block_on(dispatch(command, device, format))
}

async fn dispatch(command: Command, device: DeviceArgs, format: OutputFormat) -> CliResult<i32> {
    match command {
        Command::Info(args) => info::run(args, &device, format).await,
        Command::Ping(args) => ping::run(args, &device, format).await,
        Command::Entities(args) => entities::run(args, &device, format).await,
        Command::States(args) => states::run(args, &device, format).await,
        Command::Logs(args) => logs::run(args, &device, format).await,
        Command::Switch(args) => switch::run(args, &device, format).await,
        Command::Version(args) => version::run(args),
    }
}

#[derive(Args, Debug)]
pub struct InfoArgs {}

#[derive(Args, Debug)]
pub struct PingArgs {
    /// Number of pings to send.
    #[arg(long, short = 'c', default_value = "1")]
    pub count: u32,
    /// Delay between pings (e.g. 1s, 250ms).
    #[arg(long, default_value = "1s")]
    pub interval: String,
}

#[derive(Args, Debug)]
pub struct EntitiesArgs {}

#[derive(Args, Debug)]
pub struct StatesArgs {
    /// Exit after N updates.
    #[arg(long)]
    pub count: Option<usize>,
}

#[derive(Args, Debug)]
pub struct LogsArgs {
    /// Minimum device log level (none, error, warn, info, debug, verbose, very-verbose).
    #[arg(long, default_value = "debug")]
    pub level: espwire_proto::LogLevel,
    /// Ask the device to dump its configuration first.
    #[arg(long)]
    pub dump_config: bool,
    /// Exit after N lines.
    #[arg(long)]
    pub count: Option<usize>,
}

#[derive(Args, Debug)]
pub struct SwitchArgs {
    /// Entity key (decimal or 0x-prefixed hex), as printed by `entities`.
    #[arg(value_parser = parse_key)]
    pub key: u32,
    /// Target state.
    pub state: SwitchState,
}

#[derive(Copy, Clone, Debug, ValueEnum)]
pub enum SwitchState {
    On,
    Off,
}

impl SwitchState {
    pub fn is_on(self) -> bool {
        matches!(self, SwitchState::On)
    }
}

#[derive(Args, Debug)]
pub struct VersionArgs {
    /// Show extended version information.
    #[arg(long)]
    pub extended: bool,
}

/// Dial, handshake and return the authenticated connection.
async fn open(device: &DeviceArgs) -> CliResult<(Connection, HelloResponse)> {
    let address = device.address()?;
    let config = device.connection_config()?;
    let conn = espwire_peer::dial_with_config(address, config)
        .await
        .map_err(|err| peer_error("connect failed", err))?;
    let hello = conn
        .handshake()
        .await
        .map_err(|err| peer_error("handshake failed", err))?;
    debug!(server = %hello.server_info, "session established");
    Ok((conn, hello))
}

/// Negotiate a disconnect unless the device already went away.
async fn hang_up(conn: &Connection) {
    if conn.state() == ConnectionState::Closed {
        return;
    }
    if let Err(err) = conn.disconnect().await {
        warn!(error = %err, "disconnect failed");
    }
}

/// Drain `stream` into `emit` until it ends, `count` items were emitted or
/// the user interrupts.
async fn pump<F>(
    stream: &mut MessageStream,
    count: Option<usize>,
    what: &str,
    mut emit: F,
) -> CliResult<()>
where
    F: FnMut(&Message) -> bool,
{
    if count == Some(0) {
        return Ok(());
    }

    let interrupt = tokio::signal::ctrl_c();
    tokio::pin!(interrupt);

    let mut emitted = 0usize;
    loop {
        let next = tokio::select! {
            next = stream.recv() => next,
            _ = &mut interrupt => {
                debug!("interrupted");
                return Ok(());
            }
        };
        match next {
            Some(Ok(message)) => {
                if emit(&message) {
                    emitted = emitted.saturating_add(1);
                    if count.is_some_and(|count| emitted >= count) {
                        return Ok(());
                    }
                }
            }
            Some(Err(err)) => return Err(peer_error(&format!("{what} stream ended"), err)),
            None => return Ok(()),
        }
    }
}

fn parse_key(input: &str) -> Result<u32, String> {
    let input = input.trim();
    let parsed = match input.strip_prefix("0x").or_else(|| input.strip_prefix("0X")) {
        Some(hex) => u32::from_str_radix(hex, 16),
        None => input.parse(),
    };
    parsed.map_err(|_| format!("invalid entity key: {input}"))
}

fn parse_timeout(input: &str) -> CliResult<Duration> {
    let input = input.trim();
    if input.is_empty() {
        return Err(CliError::new(USAGE, "timeout must not be empty"));
    }

    let (number, unit) = if let Some(num) = input.strip_suffix("ms") {
        (num, "ms")
    } else if let Some(num) = input.strip_suffix('s') {
        (num, "s")
    } else {
        (input, "s")
    };

    let value: u64 = number
        .parse()
        .map_err(|_| CliError::new(USAGE, format!("invalid timeout value: {input}")))?;

    if value == 0 {
        return Err(CliError::new(USAGE, "timeout must be greater than zero"));
    }

    Ok(match unit {
        "ms" => Duration::from_millis(value),
        _ => Duration::from_secs(value),
    })
}
