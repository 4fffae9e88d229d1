use std::fmt;

use serde::{
    de::{IgnoredAny, MapAccess, Visitor},
    ser::SerializeMap,
    Deserialize, Deserializer, Serialize, Serializer,
};

/// Type that serializes to an empty map and deserializes from any map while
/// ignoring its content. Stands in for messages with no content fields and
/// for messages that use no decorators.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub struct SerdeIgnored;

impl Serialize for SerdeIgnored {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_map(Some(0))?.end()
    }
}

impl<'de> Deserialize<'de> for SerdeIgnored {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        struct NoopVisitor;

        impl<'de> Visitor<'de> for NoopVisitor {
            type Value = SerdeIgnored;

            fn expecting(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
                formatter.write_str("a map with ignored content")
            }

            fn visit_map<A>(self, mut map: A) -> Result<Self::Value, A::Error>
            where
                A: MapAccess<'de>,
            {
                while map.next_entry::<IgnoredAny, IgnoredAny>()?.is_some() {}
                Ok(SerdeIgnored)
            }
        }

        deserializer.deserialize_map(NoopVisitor)
    }
}
