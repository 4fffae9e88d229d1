mod mime_type;
mod serde_ignored;
pub(crate) mod utils;

pub use mime_type::MimeType;
pub use serde_ignored::SerdeIgnored as NoContent;
pub use serde_ignored::SerdeIgnored as NoDecorators;

#[cfg(test)]
#[allow(clippy::unwrap_used)]
pub mod test_utils {
    use chrono::{DateTime, Utc};
    use serde::{Deserialize, Serialize};
    use serde_json::{json, Value};

    use super::utils;
    use crate::{msg_parts::MsgParts, AriesMessage};

    pub struct OptDateTimeRfc3339<'a>(pub &'a Option<DateTime<Utc>>);

    impl<'a> Serialize for OptDateTimeRfc3339<'a> {
        fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
        where
            S: serde::Serializer,
        {
            utils::serialize_opt_datetime(self.0, serializer)
        }
    }

    /// Asserts that `value` serializes exactly to `json` and that `json`
    /// deserializes back to `value`.
    pub fn test_serde<T>(value: T, json: Value)
    where
        T: for<'de> Deserialize<'de> + Serialize + std::fmt::Debug + PartialEq,
    {
        let deserialized = T::deserialize(&json).unwrap();

        assert_eq!(serde_json::to_value(&value).unwrap(), json);
        assert_eq!(deserialized, value);
    }

    /// Wraps the given content and decorators in the full message envelope
    /// (with the test `@id` and the given `@type`) and round-trips it as an
    /// [`AriesMessage`].
    pub fn test_msg<C, D>(content: C, decorators: D, msg_type: &str, mut json: Value)
    where
        AriesMessage: From<MsgParts<C, D>>,
    {
        let id = "test".to_owned();

        let obj = json.as_object_mut().expect("JSON object");
        obj.insert("@id".to_owned(), json!(id));
        obj.insert("@type".to_owned(), json!(msg_type));

        let msg = MsgParts::<C, D>::builder()
            .id(id)
            .content(content)
            .decorators(decorators)
            .build();

        test_serde(AriesMessage::from(msg), json);
    }
}
