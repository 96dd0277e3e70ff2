use std::fmt;

use crate::api;
use crate::error::{CatalogError, Result};

/// A protobuf schema bound to one message id.
pub trait Schema: prost::Message + Default + Clone + Sized + 'static {
    /// The message id this schema is framed with.
    const ID: MessageId;

    /// Wrap the value in the [`Message`] union.
    fn into_message(self) -> Message;

    /// Borrow the value back out of a [`Message`] tagged with [`Self::ID`].
    fn from_message(message: &Message) -> Option<&Self>;
}

macro_rules! catalog {
    ($($id:literal => $name:ident),+ $(,)?) => {
        /// Numeric message type ids. Requests and responses share one space.
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
        #[repr(u32)]
        pub enum MessageId {
            $($name = $id,)+
        }

        impl MessageId {
            /// Every id in the catalog, in ascending numeric order.
            pub const ALL: &'static [MessageId] = &[$(MessageId::$name,)+];

            pub fn from_u32(value: u32) -> Option<Self> {
                match value {
                    $($id => Some(MessageId::$name),)+
                    _ => None,
                }
            }

            pub fn as_u32(self) -> u32 {
                self as u32
            }

            /// Schema name, e.g. `"HelloRequest"`.
            pub fn name(self) -> &'static str {
                match self {
                    $(MessageId::$name => stringify!($name),)+
                }
            }

            /// The schema's default value, wrapped.
            #[cfg(test)]
            fn empty_message(self) -> Message {
                match self {
                    $(MessageId::$name => Message::$name(<api::$name>::default()),)+
                }
            }
        }

        /// A decoded message, tagged by its schema.
        #[derive(Debug, Clone, PartialEq)]
        pub enum Message {
            $($name(api::$name),)+
        }

        impl Message {
            pub fn id(&self) -> MessageId {
                match self {
                    $(Message::$name(_) => MessageId::$name,)+
                }
            }

            /// Serialize the payload, without any framing.
            pub fn encode_payload(&self) -> Vec<u8> {
                match self {
                    $(Message::$name(inner) => prost::Message::encode_to_vec(inner),)+
                }
            }

            /// Decode `payload` with the schema registered for `type_id`.
            pub fn decode(type_id: u32, payload: &[u8]) -> Result<Self> {
                let id = MessageId::from_u32(type_id)
                    .ok_or(CatalogError::UnsupportedType(type_id))?;
                let decoded = match id {
                    $(MessageId::$name => {
                        <api::$name as prost::Message>::decode(payload).map(Message::$name)
                    })+
                };
                decoded.map_err(|source| CatalogError::Decode { id, source })
            }
        }

        $(
            impl Schema for api::$name {
                const ID: MessageId = MessageId::$name;

                fn into_message(self) -> Message {
                    Message::$name(self)
                }

                fn from_message(message: &Message) -> Option<&Self> {
                    match message {
                        Message::$name(inner) => Some(inner),
                        _ => None,
                    }
                }
            }

            impl From<api::$name> for Message {
                fn from(value: api::$name) -> Self {
                    Message::$name(value)
                }
            }
        )+
    };
}

catalog! {
    1 => HelloRequest,
    2 => HelloResponse,
    3 => ConnectRequest,
    4 => ConnectResponse,
    5 => DisconnectRequest,
    6 => DisconnectResponse,
    7 => PingRequest,
    8 => PingResponse,
    9 => DeviceInfoRequest,
    10 => DeviceInfoResponse,
    11 => ListEntitiesRequest,
    12 => ListEntitiesBinarySensorResponse,
    13 => ListEntitiesCoverResponse,
    14 => ListEntitiesFanResponse,
    15 => ListEntitiesLightResponse,
    16 => ListEntitiesSensorResponse,
    17 => ListEntitiesSwitchResponse,
    18 => ListEntitiesTextSensorResponse,
    19 => ListEntitiesDoneResponse,
    20 => SubscribeStatesRequest,
    21 => BinarySensorStateResponse,
    22 => CoverStateResponse,
    23 => FanStateResponse,
    24 => LightStateResponse,
    25 => SensorStateResponse,
    26 => SwitchStateResponse,
    27 => TextSensorStateResponse,
    28 => SubscribeLogsRequest,
    29 => SubscribeLogsResponse,
    30 => CoverCommandRequest,
    31 => FanCommandRequest,
    32 => LightCommandRequest,
    33 => SwitchCommandRequest,
    34 => SubscribeHomeassistantServicesRequest,
    35 => HomeassistantServiceResponse,
    36 => GetTimeRequest,
    37 => GetTimeResponse,
    38 => SubscribeHomeAssistantStatesRequest,
    39 => SubscribeHomeAssistantStateResponse,
    40 => HomeAssistantStateResponse,
    41 => ListEntitiesServicesResponse,
    42 => ExecuteServiceRequest,
    43 => ListEntitiesCameraResponse,
    44 => CameraImageResponse,
    45 => CameraImageRequest,
    46 => ListEntitiesClimateResponse,
    47 => ClimateStateResponse,
    48 => ClimateCommandRequest,
}

impl MessageId {
    /// Responses a device sends while streaming entity state.
    pub const STATE_RESPONSES: &'static [MessageId] = &[
        MessageId::BinarySensorStateResponse,
        MessageId::CoverStateResponse,
        MessageId::FanStateResponse,
        MessageId::LightStateResponse,
        MessageId::SensorStateResponse,
        MessageId::SwitchStateResponse,
        MessageId::TextSensorStateResponse,
        MessageId::HomeAssistantStateResponse,
        MessageId::ClimateStateResponse,
    ];

    /// Responses a device sends while enumerating its entities.
    pub const LIST_ENTITY_RESPONSES: &'static [MessageId] = &[
        MessageId::ListEntitiesBinarySensorResponse,
        MessageId::ListEntitiesCoverResponse,
        MessageId::ListEntitiesFanResponse,
        MessageId::ListEntitiesLightResponse,
        MessageId::ListEntitiesSensorResponse,
        MessageId::ListEntitiesSwitchResponse,
        MessageId::ListEntitiesTextSensorResponse,
        MessageId::ListEntitiesCameraResponse,
        MessageId::ListEntitiesClimateResponse,
    ];
}

impl fmt::Display for MessageId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl Message {
    pub fn name(&self) -> &'static str {
        self.id().name()
    }

    /// Entity key carried by a state response.
    pub fn state_key(&self) -> Option<u32> {
        match self {
            Message::BinarySensorStateResponse(m) => Some(m.key),
            Message::CoverStateResponse(m) => Some(m.key),
            Message::FanStateResponse(m) => Some(m.key),
            Message::LightStateResponse(m) => Some(m.key),
            Message::SensorStateResponse(m) => Some(m.key),
            Message::SwitchStateResponse(m) => Some(m.key),
            Message::TextSensorStateResponse(m) => Some(m.key),
            Message::ClimateStateResponse(m) => Some(m.key),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use proptest::prelude::*;

    use super::*;
    use crate::api::*;

    #[test]
    fn every_schema_roundtrips_its_default() {
        for id in MessageId::ALL {
            let message = id.empty_message();
            assert_eq!(message.id(), *id);
            let decoded = Message::decode(id.as_u32(), &message.encode_payload())
                .unwrap_or_else(|err| panic!("{id} should decode: {err}"));
            assert_eq!(decoded, message);
        }
    }

    proptest! {
        // Whatever a schema accepts, it re-encodes to the same bytes.
        #[test]
        fn decoded_messages_reencode_identically(
            index in 0..MessageId::ALL.len(),
            payload in proptest::collection::vec(any::<u8>(), 0..256),
        ) {
            let id = MessageId::ALL[index];
            if let Ok(message) = Message::decode(id.as_u32(), &payload) {
                prop_assert_eq!(message.id(), id);
                let encoded = message.encode_payload();
                let again = Message::decode(id.as_u32(), &encoded).unwrap();
                prop_assert_eq!(again.id(), id);
                prop_assert_eq!(again.encode_payload(), encoded);
            }
        }

        #[test]
        fn sensor_state_roundtrips(
            key in any::<u32>(),
            state in -1.0e6f32..1.0e6,
            missing in any::<bool>(),
        ) {
            let message = Message::from(SensorStateResponse {
                key,
                state,
                missing_state: missing,
            });
            let decoded = Message::decode(25, &message.encode_payload()).unwrap();
            prop_assert_eq!(decoded, message);
        }

        #[test]
        fn text_and_listing_roundtrip(
            key in any::<u32>(),
            name in ".{0,40}",
            object_id in "[a-z_]{0,20}",
        ) {
            let listing = Message::from(ListEntitiesSwitchResponse {
                object_id: object_id.clone(),
                key,
                name: name.clone(),
                unique_id: format!("{object_id}-{key}"),
                ..Default::default()
            });
            let decoded = Message::decode(17, &listing.encode_payload()).unwrap();
            prop_assert_eq!(decoded, listing);

            let state = Message::from(TextSensorStateResponse {
                key,
                state: name,
                missing_state: false,
            });
            let decoded = Message::decode(27, &state.encode_payload()).unwrap();
            prop_assert_eq!(decoded, state);
        }
    }

    #[test]
    fn execute_service_arguments_use_device_wire_layout() {
        let argument = ExecuteServiceArgument {
            legacy_int: 7,
            int_: -2,
            bool_array: vec![true, false],
            int_array: vec![-1],
            float_array: vec![1.0],
            ..Default::default()
        };
        assert_eq!(
            prost::Message::encode_to_vec(&argument),
            vec![
                0x10, 0x07, // legacy_int = 7
                0x28, 0x03, // int_ = -2, zigzag
                0x30, 0x01, 0x30, 0x00, // bool_array, one tag per element
                0x38, 0x01, // int_array = [-1], zigzag
                0x45, 0x00, 0x00, 0x80, 0x3F, // float_array = [1.0]
            ]
        );
    }

    #[test]
    fn ids_are_contiguous_and_unique() {
        assert_eq!(MessageId::ALL.len(), 48);
        for (index, id) in MessageId::ALL.iter().enumerate() {
            assert_eq!(id.as_u32(), index as u32 + 1);
            assert_eq!(MessageId::from_u32(id.as_u32()), Some(*id));
        }
        assert_eq!(MessageId::from_u32(0), None);
        assert_eq!(MessageId::from_u32(49), None);
    }

    #[test]
    fn names_match_schemas() {
        assert_eq!(MessageId::HelloRequest.name(), "HelloRequest");
        assert_eq!(MessageId::ListEntitiesDoneResponse.to_string(), "ListEntitiesDoneResponse");
        assert_eq!(
            Message::from(SwitchCommandRequest { key: 1, state: true }).name(),
            "SwitchCommandRequest"
        );
    }

    #[test]
    fn decode_reproduces_encoded_value() {
        let response = HelloResponse {
            api_version_major: 1,
            api_version_minor: 3,
            server_info: "fake-server".into(),
        };
        let payload = response.clone().into_message().encode_payload();

        let decoded = Message::decode(2, &payload).unwrap();
        assert_eq!(decoded.id(), MessageId::HelloResponse);
        assert_eq!(HelloResponse::from_message(&decoded), Some(&response));
        assert_eq!(HelloRequest::from_message(&decoded), None);
    }

    #[test]
    fn hello_request_wire_bytes() {
        let payload = Message::from(HelloRequest {
            client_info: "test-client".into(),
        })
        .encode_payload();

        let mut expected = vec![0x0A, 0x0B];
        expected.extend_from_slice(b"test-client");
        assert_eq!(payload, expected);
    }

    #[test]
    fn empty_payload_decodes_to_default() {
        let decoded = Message::decode(MessageId::ConnectResponse.as_u32(), &[]).unwrap();
        assert_eq!(
            decoded,
            Message::ConnectResponse(ConnectResponse {
                invalid_password: false
            })
        );
    }

    #[test]
    fn unknown_type_is_unsupported() {
        let err = Message::decode(99, &[]).unwrap_err();
        assert!(matches!(err, CatalogError::UnsupportedType(99)));
    }

    #[test]
    fn malformed_payload_reports_schema() {
        // Field 1, length-delimited, claims 16 bytes but carries two.
        let err = Message::decode(MessageId::HelloResponse.as_u32(), &[0x1A, 0x10, b'a', b'b'])
            .unwrap_err();
        match err {
            CatalogError::Decode { id, .. } => assert_eq!(id, MessageId::HelloResponse),
            other => panic!("expected decode error, got {other:?}"),
        }
    }

    #[test]
    fn schema_ids_line_up_with_variants() {
        assert_eq!(<ListEntitiesDoneResponse as Schema>::ID, MessageId::ListEntitiesDoneResponse);
        assert_eq!(<ClimateCommandRequest as Schema>::ID.as_u32(), 48);
        assert_eq!(
            Message::from(CameraImageRequest {
                single: true,
                stream: false
            })
            .id(),
            <CameraImageRequest as Schema>::ID
        );
    }

    #[test]
    fn state_key_only_for_entity_states() {
        let state = Message::from(SensorStateResponse {
            key: 0xDEAD_BEEF,
            state: 21.5,
            missing_state: false,
        });
        assert_eq!(state.state_key(), Some(0xDEAD_BEEF));

        let ha_state = Message::from(HomeAssistantStateResponse {
            entity_id: "sun.sun".into(),
            state: "above_horizon".into(),
        });
        assert_eq!(ha_state.state_key(), None);
    }

    #[test]
    fn log_level_enumeration_roundtrip() {
        let request = SubscribeLogsRequest {
            level: LogLevel::VeryVerbose as i32,
            dump_config: true,
        };
        let decoded = Message::decode(28, &Message::from(request).encode_payload()).unwrap();
        let request = SubscribeLogsRequest::from_message(&decoded).unwrap();
        assert_eq!(request.level(), LogLevel::VeryVerbose);
        assert!(request.dump_config);
        assert_eq!("warning".parse::<LogLevel>().unwrap(), LogLevel::Warn);
        assert!("loud".parse::<LogLevel>().is_err());
    }

    #[test]
    fn connect_request_debug_redacts_password() {
        let message = Message::from(ConnectRequest {
            password: "hunter2".into(),
        });
        let rendered = format!("{message:?}");
        assert!(rendered.contains("<redacted:7 bytes>"));
        assert!(!rendered.contains("hunter2"));
    }
}
