//! Watch a device: print its identity and entities, then stream state
//! changes and log lines until the device goes away or Ctrl-C.
//!
//! Run with:
//!   cargo run --example monitor -- garage.local [password] [switch-key]
//!
//! With a switch key the switch is turned on at start and off again on
//! Ctrl-C.

use std::collections::HashMap;

use espwire::peer::{dial_with_config, ConnectionConfig};
use espwire::proto::{LogLevel, Schema, SubscribeLogsResponse};
use futures_util::StreamExt;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let mut args = std::env::args().skip(1);
    let addr = args
        .next()
        .ok_or("usage: monitor <address> [password] [switch-key]")?;
    let config = ConnectionConfig::default()
        .with_client_info("espwire monitor example")
        .with_password(args.next().unwrap_or_default());
    let switch_key = args.next().map(|key| key.parse::<u32>()).transpose()?;

    let conn = dial_with_config(&addr, config).await?;
    let hello = conn.handshake().await?;
    eprintln!("Connected to {} ({})", addr, hello.server_info);

    let info = conn.device_info().await?;
    eprintln!(
        "Device {} ({}), ESPHome {}",
        info.name, info.mac_address, info.esphome_version
    );
    eprintln!("Ping: {:?}", conn.ping().await?);

    let names: HashMap<u32, String> = conn
        .list_entities()
        .await?
        .into_iter()
        .map(|entity| {
            eprintln!(
                "  {:>10} {:<14} {} ({})",
                entity.key, entity.kind, entity.name, entity.object_id
            );
            (entity.key, entity.name)
        })
        .collect();

    let mut states = conn.subscribe_states().await?;
    let mut logs = conn.subscribe_logs(LogLevel::Verbose, false).await?;

    if let Some(key) = switch_key {
        conn.send_switch_command(key, true).await?;
    }

    let interrupt = tokio::signal::ctrl_c();
    tokio::pin!(interrupt);

    loop {
        tokio::select! {
            state = states.next() => {
                let Some(state) = state else { break };
                let state = state?;
                let name = state
                    .state_key()
                    .and_then(|key| names.get(&key))
                    .map_or("?", String::as_str);
                println!("state {name}: {state:?}");
            }
            line = logs.next() => {
                let Some(line) = line else { break };
                if let Some(line) = SubscribeLogsResponse::from_message(&*line?) {
                    println!("log [{}] {}", line.tag, line.message);
                }
            }
            _ = &mut interrupt => {
                if let Some(key) = switch_key {
                    conn.send_switch_command(key, false).await?;
                }
                conn.disconnect().await?;
                break;
            }
        }
    }

    eprintln!("Connection closed: {}", conn.closed().await);
    Ok(())
}
