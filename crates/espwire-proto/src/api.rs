//! Protobuf schemas of the native API, one struct per message id.
//!
//! Field numbers follow the device firmware's `api.proto`. Every
//! `ListEntities*Response` starts with `object_id`, `key`, `name` and
//! `unique_id`; every `*StateResponse` starts with the entity `key`.

// Connection

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct HelloRequest {
    #[prost(string, tag = "1")]
    pub client_info: ::prost::alloc::string::String,
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct HelloResponse {
    #[prost(uint32, tag = "1")]
    pub api_version_major: u32,
    #[prost(uint32, tag = "2")]
    pub api_version_minor: u32,
    #[prost(string, tag = "3")]
    pub server_info: ::prost::alloc::string::String,
}

#[derive(Clone, PartialEq, ::prost::Message)]
#[prost(skip_debug)]
pub struct ConnectRequest {
    /// Treated as opaque credential material and redacted in debug output.
    #[prost(string, tag = "1")]
    pub password: ::prost::alloc::string::String,
}

impl std::fmt::Debug for ConnectRequest {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ConnectRequest")
            .field(
                "password",
                &format_args!("<redacted:{} bytes>", self.password.len()),
            )
            .finish()
    }
}

#[derive(Clone, Copy, PartialEq, ::prost::Message)]
pub struct ConnectResponse {
    #[prost(bool, tag = "1")]
    pub invalid_password: bool,
}

#[derive(Clone, Copy, PartialEq, ::prost::Message)]
pub struct DisconnectRequest {}

#[derive(Clone, Copy, PartialEq, ::prost::Message)]
pub struct DisconnectResponse {}

#[derive(Clone, Copy, PartialEq, ::prost::Message)]
pub struct PingRequest {}

#[derive(Clone, Copy, PartialEq, ::prost::Message)]
pub struct PingResponse {}

#[derive(Clone, Copy, PartialEq, ::prost::Message)]
pub struct DeviceInfoRequest {}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct DeviceInfoResponse {
    #[prost(bool, tag = "1")]
    pub uses_password: bool,
    #[prost(string, tag = "2")]
    pub name: ::prost::alloc::string::String,
    #[prost(string, tag = "3")]
    pub mac_address: ::prost::alloc::string::String,
    #[prost(string, tag = "4")]
    pub esphome_version: ::prost::alloc::string::String,
    #[prost(string, tag = "5")]
    pub compilation_time: ::prost::alloc::string::String,
    #[prost(string, tag = "6")]
    pub model: ::prost::alloc::string::String,
    #[prost(bool, tag = "7")]
    pub has_deep_sleep: bool,
}

// Entity listing

#[derive(Clone, Copy, PartialEq, ::prost::Message)]
pub struct ListEntitiesRequest {}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct ListEntitiesBinarySensorResponse {
    #[prost(string, tag = "1")]
    pub object_id: ::prost::alloc::string::String,
    #[prost(fixed32, tag = "2")]
    pub key: u32,
    #[prost(string, tag = "3")]
    pub name: ::prost::alloc::string::String,
    #[prost(string, tag = "4")]
    pub unique_id: ::prost::alloc::string::String,
    #[prost(string, tag = "5")]
    pub device_class: ::prost::alloc::string::String,
    #[prost(bool, tag = "6")]
    pub is_status_binary_sensor: bool,
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct ListEntitiesCoverResponse {
    #[prost(string, tag = "1")]
    pub object_id: ::prost::alloc::string::String,
    #[prost(fixed32, tag = "2")]
    pub key: u32,
    #[prost(string, tag = "3")]
    pub name: ::prost::alloc::string::String,
    #[prost(string, tag = "4")]
    pub unique_id: ::prost::alloc::string::String,
    #[prost(bool, tag = "5")]
    pub assumed_state: bool,
    #[prost(bool, tag = "6")]
    pub supports_position: bool,
    #[prost(bool, tag = "7")]
    pub supports_tilt: bool,
    #[prost(string, tag = "8")]
    pub device_class: ::prost::alloc::string::String,
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct ListEntitiesFanResponse {
    #[prost(string, tag = "1")]
    pub object_id: ::prost::alloc::string::String,
    #[prost(fixed32, tag = "2")]
    pub key: u32,
    #[prost(string, tag = "3")]
    pub name: ::prost::alloc::string::String,
    #[prost(string, tag = "4")]
    pub unique_id: ::prost::alloc::string::String,
    #[prost(bool, tag = "5")]
    pub supports_oscillation: bool,
    #[prost(bool, tag = "6")]
    pub supports_speed: bool,
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct ListEntitiesLightResponse {
    #[prost(string, tag = "1")]
    pub object_id: ::prost::alloc::string::String,
    #[prost(fixed32, tag = "2")]
    pub key: u32,
    #[prost(string, tag = "3")]
    pub name: ::prost::alloc::string::String,
    #[prost(string, tag = "4")]
    pub unique_id: ::prost::alloc::string::String,
    #[prost(bool, tag = "5")]
    pub supports_brightness: bool,
    #[prost(bool, tag = "6")]
    pub supports_rgb: bool,
    #[prost(bool, tag = "7")]
    pub supports_white_value: bool,
    #[prost(bool, tag = "8")]
    pub supports_color_temperature: bool,
    #[prost(float, tag = "9")]
    pub min_mireds: f32,
    #[prost(float, tag = "10")]
    pub max_mireds: f32,
    #[prost(string, repeated, tag = "11")]
    pub effects: ::prost::alloc::vec::Vec<::prost::alloc::string::String>,
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct ListEntitiesSensorResponse {
    #[prost(string, tag = "1")]
    pub object_id: ::prost::alloc::string::String,
    #[prost(fixed32, tag = "2")]
    pub key: u32,
    #[prost(string, tag = "3")]
    pub name: ::prost::alloc::string::String,
    #[prost(string, tag = "4")]
    pub unique_id: ::prost::alloc::string::String,
    #[prost(string, tag = "5")]
    pub icon: ::prost::alloc::string::String,
    #[prost(string, tag = "6")]
    pub unit_of_measurement: ::prost::alloc::string::String,
    #[prost(int32, tag = "7")]
    pub accuracy_decimals: i32,
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct ListEntitiesSwitchResponse {
    #[prost(string, tag = "1")]
    pub object_id: ::prost::alloc::string::String,
    #[prost(fixed32, tag = "2")]
    pub key: u32,
    #[prost(string, tag = "3")]
    pub name: ::prost::alloc::string::String,
    #[prost(string, tag = "4")]
    pub unique_id: ::prost::alloc::string::String,
    #[prost(string, tag = "5")]
    pub icon: ::prost::alloc::string::String,
    #[prost(bool, tag = "6")]
    pub assumed_state: bool,
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct ListEntitiesTextSensorResponse {
    #[prost(string, tag = "1")]
    pub object_id: ::prost::alloc::string::String,
    #[prost(fixed32, tag = "2")]
    pub key: u32,
    #[prost(string, tag = "3")]
    pub name: ::prost::alloc::string::String,
    #[prost(string, tag = "4")]
    pub unique_id: ::prost::alloc::string::String,
    #[prost(string, tag = "5")]
    pub icon: ::prost::alloc::string::String,
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct ListEntitiesCameraResponse {
    #[prost(string, tag = "1")]
    pub object_id: ::prost::alloc::string::String,
    #[prost(fixed32, tag = "2")]
    pub key: u32,
    #[prost(string, tag = "3")]
    pub name: ::prost::alloc::string::String,
    #[prost(string, tag = "4")]
    pub unique_id: ::prost::alloc::string::String,
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct ListEntitiesClimateResponse {
    #[prost(string, tag = "1")]
    pub object_id: ::prost::alloc::string::String,
    #[prost(fixed32, tag = "2")]
    pub key: u32,
    #[prost(string, tag = "3")]
    pub name: ::prost::alloc::string::String,
    #[prost(string, tag = "4")]
    pub unique_id: ::prost::alloc::string::String,
    #[prost(bool, tag = "5")]
    pub supports_current_temperature: bool,
    #[prost(bool, tag = "6")]
    pub supports_two_point_target_temperature: bool,
    #[prost(enumeration = "ClimateMode", repeated, tag = "7")]
    pub supported_modes: ::prost::alloc::vec::Vec<i32>,
    #[prost(float, tag = "8")]
    pub visual_min_temperature: f32,
    #[prost(float, tag = "9")]
    pub visual_max_temperature: f32,
    #[prost(float, tag = "10")]
    pub visual_temperature_step: f32,
    #[prost(bool, tag = "11")]
    pub supports_away: bool,
    #[prost(bool, tag = "12")]
    pub supports_action: bool,
}

#[derive(Clone, Copy, PartialEq, ::prost::Message)]
pub struct ListEntitiesDoneResponse {}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct ListEntitiesServicesArgument {
    #[prost(string, tag = "1")]
    pub name: ::prost::alloc::string::String,
    #[prost(enumeration = "ServiceArgType", tag = "2")]
    pub r#type: i32,
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct ListEntitiesServicesResponse {
    #[prost(string, tag = "1")]
    pub name: ::prost::alloc::string::String,
    #[prost(fixed32, tag = "2")]
    pub key: u32,
    #[prost(message, repeated, tag = "3")]
    pub args: ::prost::alloc::vec::Vec<ListEntitiesServicesArgument>,
}

// State streaming

#[derive(Clone, Copy, PartialEq, ::prost::Message)]
pub struct SubscribeStatesRequest {}

#[derive(Clone, Copy, PartialEq, ::prost::Message)]
pub struct BinarySensorStateResponse {
    #[prost(fixed32, tag = "1")]
    pub key: u32,
    #[prost(bool, tag = "2")]
    pub state: bool,
    #[prost(bool, tag = "3")]
    pub missing_state: bool,
}

#[derive(Clone, Copy, PartialEq, ::prost::Message)]
pub struct CoverStateResponse {
    #[prost(fixed32, tag = "1")]
    pub key: u32,
    #[prost(enumeration = "LegacyCoverState", tag = "2")]
    pub legacy_state: i32,
    #[prost(float, tag = "3")]
    pub position: f32,
    #[prost(float, tag = "4")]
    pub tilt: f32,
    #[prost(enumeration = "CoverOperation", tag = "5")]
    pub current_operation: i32,
}

#[derive(Clone, Copy, PartialEq, ::prost::Message)]
pub struct FanStateResponse {
    #[prost(fixed32, tag = "1")]
    pub key: u32,
    #[prost(bool, tag = "2")]
    pub state: bool,
    #[prost(bool, tag = "3")]
    pub oscillating: bool,
    #[prost(enumeration = "FanSpeed", tag = "4")]
    pub speed: i32,
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct LightStateResponse {
    #[prost(fixed32, tag = "1")]
    pub key: u32,
    #[prost(bool, tag = "2")]
    pub state: bool,
    #[prost(float, tag = "3")]
    pub brightness: f32,
    #[prost(float, tag = "4")]
    pub red: f32,
    #[prost(float, tag = "5")]
    pub green: f32,
    #[prost(float, tag = "6")]
    pub blue: f32,
    #[prost(float, tag = "7")]
    pub white: f32,
    #[prost(float, tag = "8")]
    pub color_temperature: f32,
    #[prost(string, tag = "9")]
    pub effect: ::prost::alloc::string::String,
}

#[derive(Clone, Copy, PartialEq, ::prost::Message)]
pub struct SensorStateResponse {
    #[prost(fixed32, tag = "1")]
    pub key: u32,
    #[prost(float, tag = "2")]
    pub state: f32,
    #[prost(bool, tag = "3")]
    pub missing_state: bool,
}

#[derive(Clone, Copy, PartialEq, ::prost::Message)]
pub struct SwitchStateResponse {
    #[prost(fixed32, tag = "1")]
    pub key: u32,
    #[prost(bool, tag = "2")]
    pub state: bool,
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct TextSensorStateResponse {
    #[prost(fixed32, tag = "1")]
    pub key: u32,
    #[prost(string, tag = "2")]
    pub state: ::prost::alloc::string::String,
    #[prost(bool, tag = "3")]
    pub missing_state: bool,
}

#[derive(Clone, Copy, PartialEq, ::prost::Message)]
pub struct ClimateStateResponse {
    #[prost(fixed32, tag = "1")]
    pub key: u32,
    #[prost(enumeration = "ClimateMode", tag = "2")]
    pub mode: i32,
    #[prost(float, tag = "3")]
    pub current_temperature: f32,
    #[prost(float, tag = "4")]
    pub target_temperature: f32,
    #[prost(float, tag = "5")]
    pub target_temperature_low: f32,
    #[prost(float, tag = "6")]
    pub target_temperature_high: f32,
    #[prost(bool, tag = "7")]
    pub away: bool,
    #[prost(enumeration = "ClimateAction", tag = "8")]
    pub action: i32,
}

// Commands

#[derive(Clone, Copy, PartialEq, ::prost::Message)]
pub struct CoverCommandRequest {
    #[prost(fixed32, tag = "1")]
    pub key: u32,
    #[prost(bool, tag = "2")]
    pub has_legacy_command: bool,
    #[prost(enumeration = "LegacyCoverCommand", tag = "3")]
    pub legacy_command: i32,
    #[prost(bool, tag = "4")]
    pub has_position: bool,
    #[prost(float, tag = "5")]
    pub position: f32,
    #[prost(bool, tag = "6")]
    pub has_tilt: bool,
    #[prost(float, tag = "7")]
    pub tilt: f32,
    #[prost(bool, tag = "8")]
    pub stop: bool,
}

#[derive(Clone, Copy, PartialEq, ::prost::Message)]
pub struct FanCommandRequest {
    #[prost(fixed32, tag = "1")]
    pub key: u32,
    #[prost(bool, tag = "2")]
    pub has_state: bool,
    #[prost(bool, tag = "3")]
    pub state: bool,
    #[prost(bool, tag = "4")]
    pub has_speed: bool,
    #[prost(enumeration = "FanSpeed", tag = "5")]
    pub speed: i32,
    #[prost(bool, tag = "6")]
    pub has_oscillating: bool,
    #[prost(bool, tag = "7")]
    pub oscillating: bool,
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct LightCommandRequest {
    #[prost(fixed32, tag = "1")]
    pub key: u32,
    #[prost(bool, tag = "2")]
    pub has_state: bool,
    #[prost(bool, tag = "3")]
    pub state: bool,
    #[prost(bool, tag = "4")]
    pub has_brightness: bool,
    #[prost(float, tag = "5")]
    pub brightness: f32,
    #[prost(bool, tag = "6")]
    pub has_rgb: bool,
    #[prost(float, tag = "7")]
    pub red: f32,
    #[prost(float, tag = "8")]
    pub green: f32,
    #[prost(float, tag = "9")]
    pub blue: f32,
    #[prost(bool, tag = "10")]
    pub has_white: bool,
    #[prost(float, tag = "11")]
    pub white: f32,
    #[prost(bool, tag = "12")]
    pub has_color_temperature: bool,
    #[prost(float, tag = "13")]
    pub color_temperature: f32,
    #[prost(bool, tag = "14")]
    pub has_transition_length: bool,
    #[prost(uint32, tag = "15")]
    pub transition_length: u32,
    #[prost(bool, tag = "16")]
    pub has_flash_length: bool,
    #[prost(uint32, tag = "17")]
    pub flash_length: u32,
    #[prost(bool, tag = "18")]
    pub has_effect: bool,
    #[prost(string, tag = "19")]
    pub effect: ::prost::alloc::string::String,
}

#[derive(Clone, Copy, PartialEq, ::prost::Message)]
pub struct SwitchCommandRequest {
    #[prost(fixed32, tag = "1")]
    pub key: u32,
    #[prost(bool, tag = "2")]
    pub state: bool,
}

#[derive(Clone, Copy, PartialEq, ::prost::Message)]
pub struct ClimateCommandRequest {
    #[prost(fixed32, tag = "1")]
    pub key: u32,
    #[prost(bool, tag = "2")]
    pub has_mode: bool,
    #[prost(enumeration = "ClimateMode", tag = "3")]
    pub mode: i32,
    #[prost(bool, tag = "4")]
    pub has_target_temperature: bool,
    #[prost(float, tag = "5")]
    pub target_temperature: f32,
    #[prost(bool, tag = "6")]
    pub has_target_temperature_low: bool,
    #[prost(float, tag = "7")]
    pub target_temperature_low: f32,
    #[prost(bool, tag = "8")]
    pub has_target_temperature_high: bool,
    #[prost(float, tag = "9")]
    pub target_temperature_high: f32,
    #[prost(bool, tag = "10")]
    pub has_away: bool,
    #[prost(bool, tag = "11")]
    pub away: bool,
}

// Logs

#[derive(Clone, Copy, PartialEq, ::prost::Message)]
pub struct SubscribeLogsRequest {
    #[prost(enumeration = "LogLevel", tag = "1")]
    pub level: i32,
    #[prost(bool, tag = "2")]
    pub dump_config: bool,
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct SubscribeLogsResponse {
    #[prost(enumeration = "LogLevel", tag = "1")]
    pub level: i32,
    #[prost(string, tag = "2")]
    pub tag: ::prost::alloc::string::String,
    #[prost(string, tag = "3")]
    pub message: ::prost::alloc::string::String,
    #[prost(bool, tag = "4")]
    pub send_failed: bool,
}

// Home Assistant services and states

#[derive(Clone, Copy, PartialEq, ::prost::Message)]
pub struct SubscribeHomeassistantServicesRequest {}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct HomeassistantServiceMap {
    #[prost(string, tag = "1")]
    pub key: ::prost::alloc::string::String,
    #[prost(string, tag = "2")]
    pub value: ::prost::alloc::string::String,
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct HomeassistantServiceResponse {
    #[prost(string, tag = "1")]
    pub service: ::prost::alloc::string::String,
    #[prost(message, repeated, tag = "2")]
    pub data: ::prost::alloc::vec::Vec<HomeassistantServiceMap>,
    #[prost(message, repeated, tag = "3")]
    pub data_template: ::prost::alloc::vec::Vec<HomeassistantServiceMap>,
    #[prost(message, repeated, tag = "4")]
    pub variables: ::prost::alloc::vec::Vec<HomeassistantServiceMap>,
}

#[derive(Clone, Copy, PartialEq, ::prost::Message)]
pub struct SubscribeHomeAssistantStatesRequest {}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct SubscribeHomeAssistantStateResponse {
    #[prost(string, tag = "1")]
    pub entity_id: ::prost::alloc::string::String,
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct HomeAssistantStateResponse {
    #[prost(string, tag = "1")]
    pub entity_id: ::prost::alloc::string::String,
    #[prost(string, tag = "2")]
    pub state: ::prost::alloc::string::String,
}

// Time

#[derive(Clone, Copy, PartialEq, ::prost::Message)]
pub struct GetTimeRequest {}

#[derive(Clone, Copy, PartialEq, ::prost::Message)]
pub struct GetTimeResponse {
    #[prost(fixed32, tag = "1")]
    pub epoch_seconds: u32,
}

// User-defined services

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct ExecuteServiceArgument {
    #[prost(bool, tag = "1")]
    pub bool_: bool,
    /// Older devices read integers from this field; newer ones from `int_`.
    #[prost(int32, tag = "2")]
    pub legacy_int: i32,
    #[prost(float, tag = "3")]
    pub float_: f32,
    #[prost(string, tag = "4")]
    pub string_: ::prost::alloc::string::String,
    #[prost(sint32, tag = "5")]
    pub int_: i32,
    // Devices expect the scalar arrays unpacked.
    #[prost(bool, repeated, packed = "false", tag = "6")]
    pub bool_array: ::prost::alloc::vec::Vec<bool>,
    #[prost(sint32, repeated, packed = "false", tag = "7")]
    pub int_array: ::prost::alloc::vec::Vec<i32>,
    #[prost(float, repeated, packed = "false", tag = "8")]
    pub float_array: ::prost::alloc::vec::Vec<f32>,
    #[prost(string, repeated, tag = "9")]
    pub string_array: ::prost::alloc::vec::Vec<::prost::alloc::string::String>,
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct ExecuteServiceRequest {
    #[prost(fixed32, tag = "1")]
    pub key: u32,
    #[prost(message, repeated, tag = "2")]
    pub args: ::prost::alloc::vec::Vec<ExecuteServiceArgument>,
}

// Camera

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct CameraImageResponse {
    #[prost(fixed32, tag = "1")]
    pub key: u32,
    #[prost(bytes = "vec", tag = "2")]
    pub data: ::prost::alloc::vec::Vec<u8>,
    #[prost(bool, tag = "3")]
    pub done: bool,
}

#[derive(Clone, Copy, PartialEq, ::prost::Message)]
pub struct CameraImageRequest {
    #[prost(bool, tag = "1")]
    pub single: bool,
    #[prost(bool, tag = "2")]
    pub stream: bool,
}

// Enumerations

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, ::prost::Enumeration)]
#[repr(i32)]
pub enum LogLevel {
    None = 0,
    Error = 1,
    Warn = 2,
    Info = 3,
    Debug = 4,
    Verbose = 5,
    VeryVerbose = 6,
}

impl LogLevel {
    /// Lowercase label as shown in device logs.
    pub fn label(self) -> &'static str {
        match self {
            LogLevel::None => "none",
            LogLevel::Error => "error",
            LogLevel::Warn => "warn",
            LogLevel::Info => "info",
            LogLevel::Debug => "debug",
            LogLevel::Verbose => "verbose",
            LogLevel::VeryVerbose => "very_verbose",
        }
    }
}

impl std::str::FromStr for LogLevel {
    type Err = String;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.to_ascii_lowercase().replace('-', "_").as_str() {
            "none" => Ok(LogLevel::None),
            "error" => Ok(LogLevel::Error),
            "warn" | "warning" => Ok(LogLevel::Warn),
            "info" => Ok(LogLevel::Info),
            "debug" => Ok(LogLevel::Debug),
            "verbose" => Ok(LogLevel::Verbose),
            "very_verbose" => Ok(LogLevel::VeryVerbose),
            other => Err(format!("unknown log level: {other}")),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, ::prost::Enumeration)]
#[repr(i32)]
pub enum LegacyCoverState {
    Open = 0,
    Closed = 1,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, ::prost::Enumeration)]
#[repr(i32)]
pub enum CoverOperation {
    Idle = 0,
    IsOpening = 1,
    IsClosing = 2,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, ::prost::Enumeration)]
#[repr(i32)]
pub enum LegacyCoverCommand {
    Open = 0,
    Close = 1,
    Stop = 2,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, ::prost::Enumeration)]
#[repr(i32)]
pub enum FanSpeed {
    Low = 0,
    Medium = 1,
    High = 2,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, ::prost::Enumeration)]
#[repr(i32)]
pub enum ClimateMode {
    Off = 0,
    Auto = 1,
    Cool = 2,
    Heat = 3,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, ::prost::Enumeration)]
#[repr(i32)]
pub enum ClimateAction {
    Off = 0,
    Cooling = 2,
    Heating = 3,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, ::prost::Enumeration)]
#[repr(i32)]
pub enum ServiceArgType {
    Bool = 0,
    Int = 1,
    Float = 2,
    String = 3,
    BoolArray = 4,
    IntArray = 5,
    FloatArray = 6,
    StringArray = 7,
}
