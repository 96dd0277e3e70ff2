use serde::Serialize;

use crate::cmd::{hang_up, open, parse_timeout, DeviceArgs, PingArgs};
use crate::exit::{peer_error, CliResult, SUCCESS};
use crate::output::{print_json, OutputFormat};

#[derive(Debug, Serialize)]
struct PingOutput {
    seq: u32,
    round_trip_ms: f64,
}

pub async fn run(args: PingArgs, device: &DeviceArgs, format: OutputFormat) -> CliResult<i32> {
    let interval = parse_timeout(&args.interval)?;
    let (conn, _) = open(device).await?;

    for seq in 1..=args.count {
        if seq > 1 {
            tokio::time::sleep(interval).await;
        }
        let rtt = match conn.ping().await {
            Ok(rtt) => rtt,
            Err(err) => {
                hang_up(&conn).await;
                return Err(peer_error("ping failed", err));
            }
        };
        let out = PingOutput {
            seq,
            round_trip_ms: rtt.as_secs_f64() * 1000.0,
        };
        match format {
            OutputFormat::Json => print_json(&out),
            OutputFormat::Table | OutputFormat::Pretty => {
                println!("ping seq={} time={:.2}ms", out.seq, out.round_trip_ms);
            }
        }
    }

    hang_up(&conn).await;
    Ok(SUCCESS)
}
