use espwire_proto::{Schema, SubscribeLogsResponse};

use crate::cmd::{hang_up, open, pump, DeviceArgs, LogsArgs};
use crate::exit::{peer_error, CliResult, SUCCESS};
use crate::output::{print_log, LogOutput, OutputFormat};

pub async fn run(args: LogsArgs, device: &DeviceArgs, format: OutputFormat) -> CliResult<i32> {
    let (conn, _) = open(device).await?;
    let mut stream = conn
        .subscribe_logs(args.level, args.dump_config)
        .await
        .map_err(|err| peer_error("log subscription failed", err))?;

    let outcome = pump(&mut stream, args.count, "log", |message| {
        match SubscribeLogsResponse::from_message(message) {
            Some(line) => {
                print_log(&LogOutput::from_response(line), format);
                true
            }
            None => false,
        }
    })
    .await;

    drop(stream);
    hang_up(&conn).await;
    outcome.map(|()| SUCCESS)
}
