use tracing::debug;

use crate::cmd::{hang_up, open, pump, DeviceArgs, StatesArgs};
use crate::exit::{peer_error, CliResult, SUCCESS};
use crate::output::{print_state, OutputFormat, StateOutput};

pub async fn run(args: StatesArgs, device: &DeviceArgs, format: OutputFormat) -> CliResult<i32> {
    let (conn, _) = open(device).await?;
    let mut stream = conn
        .subscribe_states()
        .await
        .map_err(|err| peer_error("state subscription failed", err))?;

    let outcome = pump(&mut stream, args.count, "state", |message| {
        match StateOutput::from_message(message) {
            Some(state) => {
                print_state(&state, format);
                true
            }
            None => {
                debug!(message = message.name(), "ignoring non-state message");
                false
            }
        }
    })
    .await;

    drop(stream);
    hang_up(&conn).await;
    outcome.map(|()| SUCCESS)
}
