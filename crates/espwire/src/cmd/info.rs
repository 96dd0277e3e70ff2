use serde::Serialize;

use crate::cmd::{hang_up, open, DeviceArgs, InfoArgs};
use crate::exit::{peer_error, CliResult, SUCCESS};
use crate::output::{print_json, OutputFormat};

#[derive(Debug, Serialize)]
struct InfoOutput {
    server_info: String,
    api_version: String,
    name: String,
    model: String,
    mac_address: String,
    esphome_version: String,
    compilation_time: String,
    uses_password: bool,
    has_deep_sleep: bool,
    ping_latency_ms: Option<f64>,
}

pub async fn run(_args: InfoArgs, device: &DeviceArgs, format: OutputFormat) -> CliResult<i32> {
    let (conn, hello) = open(device).await?;
    let info = conn
        .device_info()
        .await
        .map_err(|err| peer_error("device info failed", err))?;
    let ping_latency_ms = conn
        .ping()
        .await
        .ok()
        .map(|rtt| rtt.as_secs_f64() * 1000.0);
    hang_up(&conn).await;

    let out = InfoOutput {
        server_info: hello.server_info,
        api_version: format!("{}.{}", hello.api_version_major, hello.api_version_minor),
        name: info.name,
        model: info.model,
        mac_address: info.mac_address,
        esphome_version: info.esphome_version,
        compilation_time: info.compilation_time,
        uses_password: info.uses_password,
        has_deep_sleep: info.has_deep_sleep,
        ping_latency_ms,
    };
    print_info(&out, format);
    Ok(SUCCESS)
}

fn print_info(out: &InfoOutput, format: OutputFormat) {
    match format {
        OutputFormat::Json => print_json(out),
        OutputFormat::Table | OutputFormat::Pretty => {
            println!("Device Info:");
            println!("  Name:             {}", out.name);
            println!("  Model:            {}", out.model);
            println!("  MAC address:      {}", out.mac_address);
            println!("  ESPHome version:  {}", out.esphome_version);
            println!("  Compiled:         {}", out.compilation_time);
            println!("  Server:           {}", out.server_info);
            println!("  API version:      {}", out.api_version);
            println!("  Password:         {}", yes_no(out.uses_password));
            println!("  Deep sleep:       {}", yes_no(out.has_deep_sleep));
            match out.ping_latency_ms {
                Some(ms) => println!("  Ping:             {ms:.2}ms"),
                None => println!("  Ping:             unavailable"),
            }
        }
    }
}

fn yes_no(flag: bool) -> &'static str {
    if flag {
        "yes"
    } else {
        "no"
    }
}
