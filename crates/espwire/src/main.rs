mod cmd;
mod exit;
mod logging;
mod output;

use clap::Parser;

use crate::cmd::{Command, DeviceArgs};
use crate::logging::{init_logging, LogFormat, LogLevel};
use crate::output::OutputFormat;

#[derive(Parser, Debug)]
#[command(name = "espwire", version, about = "ESPHome native API client")]
struct Cli {
    #[command(flatten)]
    device: DeviceArgs,

    /// Output format.
    #[arg(long, value_name = "FORMAT", global = true)]
    format: Option<OutputFormat>,

    /// Log output format (stderr).
    #[arg(long, value_name = "FORMAT", default_value = "text", global = true)]
    log_format: LogFormat,

    /// Minimum log level (stderr).
    #[arg(long, value_name = "LEVEL", default_value = "warn", global = true)]
    log_level: LogLevel,

    #[command(subcommand)]
    command: Command,
}

fn main() {
    let cli = Cli::parse();
    init_logging(cli.log_format, cli.log_level);

    let format = cli.format.unwrap_or_else(OutputFormat::default_for_stdout);
    let result = cmd::run(cli.command, cli.device, format);

    match result {
        Ok(code) => std::process::exit(code),
        Err(err) => {
            eprintln!("error: {err}");
            std::process::exit(err.code);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_switch_subcommand() {
        let cli = Cli::try_parse_from([
            "espwire",
            "--address",
            "garage.local",
            "switch",
            "0x1f2e3d4c",
            "on",
        ])
        .expect("switch args should parse");

        match cli.command {
            Command::Switch(args) => {
                assert_eq!(args.key, 0x1f2e_3d4c);
                assert!(args.state.is_on());
            }
            other => panic!("unexpected command: {other:?}"),
        }
        assert_eq!(cli.device.address.as_deref(), Some("garage.local"));
    }

    #[test]
    fn global_flags_follow_the_subcommand() {
        let cli = Cli::try_parse_from([
            "espwire",
            "states",
            "--count",
            "3",
            "--address",
            "10.0.0.7:6053",
            "--password",
            "hunter2",
            "--timeout",
            "500ms",
        ])
        .expect("states args should parse");

        assert!(matches!(cli.command, Command::States(ref args) if args.count == Some(3)));
        assert_eq!(cli.device.password.as_deref(), Some("hunter2"));
        assert_eq!(cli.device.timeout, "500ms");
    }

    #[test]
    fn parses_device_log_level() {
        let cli = Cli::try_parse_from(["espwire", "logs", "--level", "very-verbose"])
            .expect("logs args should parse");
        match cli.command {
            Command::Logs(args) => {
                assert_eq!(args.level, espwire_proto::LogLevel::VeryVerbose);
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn rejects_unknown_switch_state() {
        let err = Cli::try_parse_from(["espwire", "switch", "7", "toggle"])
            .expect_err("unknown state should fail");
        assert_eq!(err.kind(), clap::error::ErrorKind::InvalidValue);
    }

    #[test]
    fn rejects_malformed_key() {
        let err = Cli::try_parse_from(["espwire", "switch", "garage", "on"])
            .expect_err("non-numeric key should fail");
        assert_eq!(err.kind(), clap::error::ErrorKind::ValueValidation);
    }
}
