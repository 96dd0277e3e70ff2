use std::fmt;
use std::io::IsTerminal;

use clap::ValueEnum;
use comfy_table::{presets::UTF8_FULL, ContentArrangement, Table};
use espwire_peer::control::epoch_seconds;
use espwire_proto::{ClimateMode, FanSpeed, LogLevel, Message, SubscribeLogsResponse};
use serde::Serialize;

#[derive(Clone, Debug, Copy, ValueEnum)]
pub enum OutputFormat {
    Json,
    Table,
    Pretty,
}

impl OutputFormat {
    pub fn default_for_stdout() -> Self {
        if std::io::stdout().is_terminal() {
            Self::Table
        } else {
            Self::Json
        }
    }
}

pub fn table(header: Vec<&str>) -> Table {
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_header(header);
    table
}

pub fn print_json<T: Serialize>(value: &T) {
    println!(
        "{}",
        serde_json::to_string(value).unwrap_or_else(|_| "{}".to_string())
    );
}

/// One entity state update, flattened for printing.
#[derive(Debug, Serialize, PartialEq)]
pub struct StateOutput {
    pub kind: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub key: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub entity_id: Option<String>,
    pub value: String,
    pub timestamp: u32,
}

impl StateOutput {
    pub fn from_message(message: &Message) -> Option<Self> {
        let (kind, value) = match message {
            Message::BinarySensorStateResponse(m) => (
                "binary_sensor",
                missing_or(m.missing_state, || on_off(m.state)),
            ),
            Message::CoverStateResponse(m) => (
                "cover",
                format!("position={:.2} tilt={:.2}", m.position, m.tilt),
            ),
            Message::FanStateResponse(m) => (
                "fan",
                format!(
                    "{} oscillating={} speed={}",
                    on_off(m.state),
                    m.oscillating,
                    enum_label::<FanSpeed>(m.speed)
                ),
            ),
            Message::LightStateResponse(m) => (
                "light",
                format!("{} brightness={:.2}", on_off(m.state), m.brightness),
            ),
            Message::SensorStateResponse(m) => (
                "sensor",
                missing_or(m.missing_state, || m.state.to_string()),
            ),
            Message::SwitchStateResponse(m) => ("switch", on_off(m.state)),
            Message::TextSensorStateResponse(m) => (
                "text_sensor",
                missing_or(m.missing_state, || m.state.clone()),
            ),
            Message::ClimateStateResponse(m) => (
                "climate",
                format!(
                    "mode={} current={:.1} target={:.1}",
                    enum_label::<ClimateMode>(m.mode),
                    m.current_temperature,
                    m.target_temperature
                ),
            ),
            Message::HomeAssistantStateResponse(m) => {
                return Some(Self {
                    kind: "homeassistant",
                    key: None,
                    entity_id: Some(m.entity_id.clone()),
                    value: m.state.clone(),
                    timestamp: epoch_seconds(),
                });
            }
            _ => return None,
        };

        Some(Self {
            kind,
            key: message.state_key(),
            entity_id: None,
            value,
            timestamp: epoch_seconds(),
        })
    }

    fn subject(&self) -> String {
        match (&self.entity_id, self.key) {
            (Some(entity_id), _) => entity_id.clone(),
            (None, Some(key)) => key.to_string(),
            (None, None) => "-".to_string(),
        }
    }
}

pub fn print_state(state: &StateOutput, format: OutputFormat) {
    match format {
        OutputFormat::Json => print_json(state),
        OutputFormat::Table => {
            let mut table = table(vec!["KIND", "KEY", "VALUE"]);
            table.add_row(vec![
                state.kind.to_string(),
                state.subject(),
                state.value.clone(),
            ]);
            println!("{table}");
        }
        OutputFormat::Pretty => {
            println!("{} {} = {}", state.kind, state.subject(), state.value);
        }
    }
}

/// One device log line.
#[derive(Debug, Serialize, PartialEq)]
pub struct LogOutput {
    pub level: &'static str,
    pub tag: String,
    pub message: String,
    pub timestamp: u32,
}

impl LogOutput {
    pub fn from_response(line: &SubscribeLogsResponse) -> Self {
        Self {
            level: LogLevel::try_from(line.level).map_or("unknown", LogLevel::label),
            tag: line.tag.clone(),
            message: line.message.clone(),
            timestamp: epoch_seconds(),
        }
    }
}

pub fn print_log(line: &LogOutput, format: OutputFormat) {
    match format {
        OutputFormat::Json => print_json(line),
        OutputFormat::Table => {
            let mut table = table(vec!["LEVEL", "TAG", "MESSAGE"]);
            table.add_row(vec![
                line.level.to_string(),
                line.tag.clone(),
                line.message.clone(),
            ]);
            println!("{table}");
        }
        OutputFormat::Pretty => {
            println!("[{}][{}] {}", line.level, line.tag, line.message);
        }
    }
}

fn on_off(state: bool) -> String {
    if state { "on" } else { "off" }.to_string()
}

fn missing_or(missing: bool, value: impl FnOnce() -> String) -> String {
    if missing {
        "unknown".to_string()
    } else {
        value()
    }
}

fn enum_label<E>(value: i32) -> String
where
    E: TryFrom<i32> + fmt::Debug,
{
    E::try_from(value)
        .map(|known| format!("{known:?}").to_lowercase())
        .unwrap_or_else(|_| value.to_string())
}
