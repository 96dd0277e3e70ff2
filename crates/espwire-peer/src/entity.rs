use std::fmt;
use std::sync::Arc;

use espwire_proto::{Message, MessageId};

/// Kind of device entity, derived from the listing message's schema.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum EntityKind {
    Unknown,
    BinarySensor,
    Cover,
    Fan,
    Light,
    Sensor,
    Switch,
    TextSensor,
    Camera,
    Climate,
}

impl EntityKind {
    /// Map a listing message id to its entity kind.
    pub fn from_message_id(id: MessageId) -> Self {
        match id {
            MessageId::ListEntitiesBinarySensorResponse => EntityKind::BinarySensor,
            MessageId::ListEntitiesCoverResponse => EntityKind::Cover,
            MessageId::ListEntitiesFanResponse => EntityKind::Fan,
            MessageId::ListEntitiesLightResponse => EntityKind::Light,
            MessageId::ListEntitiesSensorResponse => EntityKind::Sensor,
            MessageId::ListEntitiesSwitchResponse => EntityKind::Switch,
            MessageId::ListEntitiesTextSensorResponse => EntityKind::TextSensor,
            MessageId::ListEntitiesCameraResponse => EntityKind::Camera,
            MessageId::ListEntitiesClimateResponse => EntityKind::Climate,
            _ => EntityKind::Unknown,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            EntityKind::Unknown => "unknown",
            EntityKind::BinarySensor => "binary_sensor",
            EntityKind::Cover => "cover",
            EntityKind::Fan => "fan",
            EntityKind::Light => "light",
            EntityKind::Sensor => "sensor",
            EntityKind::Switch => "switch",
            EntityKind::TextSensor => "text_sensor",
            EntityKind::Camera => "camera",
            EntityKind::Climate => "climate",
        }
    }
}

impl fmt::Display for EntityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

pub fn classify(message: &Message) -> EntityKind {
    EntityKind::from_message_id(message.id())
}

/// One entity enumerated by the device.
#[derive(Debug, Clone, PartialEq)]
pub struct Entity {
    pub key: u32,
    pub name: String,
    pub object_id: String,
    pub unique_id: String,
    pub kind: EntityKind,
    /// The listing message, for kind-specific fields.
    pub details: Arc<Message>,
}

impl Entity {
    /// Build an entity from a listing message. `None` for any other schema.
    pub fn from_message(message: Arc<Message>) -> Option<Self> {
        let listed = message.as_list_entity()?;
        Some(Self {
            key: listed.key(),
            name: listed.name().to_string(),
            object_id: listed.object_id().to_string(),
            unique_id: listed.unique_id().to_string(),
            kind: classify(&message),
            details: Arc::clone(&message),
        })
    }
}

#[cfg(test)]
mod tests {
    use espwire_proto::{
        ListEntitiesDoneResponse, ListEntitiesLightResponse, ListEntitiesServicesResponse,
        SwitchStateResponse,
    };

    use super::*;

    #[test]
    fn listing_ids_map_to_kinds() {
        let kinds: Vec<EntityKind> = MessageId::LIST_ENTITY_RESPONSES
            .iter()
            .map(|id| EntityKind::from_message_id(*id))
            .collect();
        assert_eq!(
            kinds,
            vec![
                EntityKind::BinarySensor,
                EntityKind::Cover,
                EntityKind::Fan,
                EntityKind::Light,
                EntityKind::Sensor,
                EntityKind::Switch,
                EntityKind::TextSensor,
                EntityKind::Camera,
                EntityKind::Climate,
            ]
        );
    }

    #[test]
    fn everything_else_is_unknown() {
        for id in MessageId::ALL {
            if !MessageId::LIST_ENTITY_RESPONSES.contains(id) {
                assert_eq!(EntityKind::from_message_id(*id), EntityKind::Unknown, "{id}");
            }
        }
        assert_eq!(
            classify(&Message::from(SwitchStateResponse { key: 1, state: false })),
            EntityKind::Unknown
        );
    }

    #[test]
    fn entity_from_listing_message() {
        let message = Arc::new(Message::from(ListEntitiesLightResponse {
            object_id: "porch".into(),
            key: 77,
            name: "Porch Light".into(),
            unique_id: "node-light-porch".into(),
            supports_brightness: true,
            effects: vec!["Rainbow".into()],
            ..Default::default()
        }));

        let entity = Entity::from_message(Arc::clone(&message)).unwrap();
        assert_eq!(entity.key, 77);
        assert_eq!(entity.name, "Porch Light");
        assert_eq!(entity.object_id, "porch");
        assert_eq!(entity.kind, EntityKind::Light);
        assert_eq!(entity.kind.to_string(), "light");
        assert_eq!(entity.details, message);
    }

    #[test]
    fn non_listing_messages_are_not_entities() {
        assert!(Entity::from_message(Arc::new(ListEntitiesDoneResponse {}.into())).is_none());
        let services = ListEntitiesServicesResponse {
            name: "restart".into(),
            key: 5,
            args: Vec::new(),
        };
        assert!(Entity::from_message(Arc::new(services.into())).is_none());
    }
}
