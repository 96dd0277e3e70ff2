use crate::api::*;
use crate::catalog::Message;

/// Fields shared by every `ListEntities*Response`.
pub trait ListEntity {
    /// Numeric entity key, used to address commands and match states.
    fn key(&self) -> u32;
    fn name(&self) -> &str;
    fn object_id(&self) -> &str;
    fn unique_id(&self) -> &str;
}

macro_rules! list_entities {
    ($($name:ident),+ $(,)?) => {
        $(
            impl ListEntity for $name {
                fn key(&self) -> u32 {
                    self.key
                }

                fn name(&self) -> &str {
                    &self.name
                }

                fn object_id(&self) -> &str {
                    &self.object_id
                }

                fn unique_id(&self) -> &str {
                    &self.unique_id
                }
            }
        )+

        impl Message {
            /// View a listing message through its common entity fields.
            ///
            /// `None` for every other schema, including the done sentinel and
            /// service descriptions.
            pub fn as_list_entity(&self) -> Option<&dyn ListEntity> {
                match self {
                    $(Message::$name(inner) => Some(inner),)+
                    _ => None,
                }
            }
        }
    };
}

list_entities! {
    ListEntitiesBinarySensorResponse,
    ListEntitiesCoverResponse,
    ListEntitiesFanResponse,
    ListEntitiesLightResponse,
    ListEntitiesSensorResponse,
    ListEntitiesSwitchResponse,
    ListEntitiesTextSensorResponse,
    ListEntitiesCameraResponse,
    ListEntitiesClimateResponse,
}
