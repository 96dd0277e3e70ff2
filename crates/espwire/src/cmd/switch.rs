use serde::Serialize;

use crate::cmd::{hang_up, open, DeviceArgs, SwitchArgs};
use crate::exit::{peer_error, CliResult, SUCCESS};
use crate::output::{print_json, OutputFormat};

#[derive(Debug, Serialize)]
struct SwitchOutput {
    key: u32,
    state: bool,
}

pub async fn run(args: SwitchArgs, device: &DeviceArgs, format: OutputFormat) -> CliResult<i32> {
    let (conn, _) = open(device).await?;
    let state = args.state.is_on();
    let sent = conn.send_switch_command(args.key, state).await;
    hang_up(&conn).await;
    sent.map_err(|err| peer_error("switch command failed", err))?;

    let out = SwitchOutput {
        key: args.key,
        state,
    };
    match format {
        OutputFormat::Json => print_json(&out),
        OutputFormat::Table | OutputFormat::Pretty => {
            println!("switch {} -> {}", out.key, if state { "on" } else { "off" });
        }
    }
    Ok(SUCCESS)
}
