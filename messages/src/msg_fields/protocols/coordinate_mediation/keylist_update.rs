use serde::{Deserialize, Serialize};
use typed_builder::TypedBuilder;

use super::CoordinateMediation;
use crate::{decorators::thread::Thread, msg_parts::MsgParts, AriesMessage};

pub type KeylistUpdate = MsgParts<KeylistUpdateContent, KeylistUpdateDecorators>;

#[derive(Clone, Debug, Deserialize, Serialize, PartialEq, TypedBuilder)]
pub struct KeylistUpdateContent {
    pub updates: Vec<KeylistUpdateItem>,
}

#[derive(Clone, Debug, Deserialize, Serialize, PartialEq, TypedBuilder)]
pub struct KeylistUpdateItem {
    pub recipient_key: String,
    pub action: KeylistUpdateItemAction,
}

#[derive(Clone, Copy, Debug, Deserialize, Serialize, PartialEq)]
pub enum KeylistUpdateItemAction {
    #[serde(rename = "add")]
    Add,
    #[serde(rename = "remove")]
    Remove,
}

#[derive(Clone, Debug, Default, Deserialize, PartialEq, Serialize, TypedBuilder)]
pub struct KeylistUpdateDecorators {
    #[builder(default, setter(strip_option))]
    #[serde(rename = "~thread", skip_serializing_if = "Option::is_none")]
    pub thread: Option<Thread>,
}

impl From<KeylistUpdate> for AriesMessage {
    fn from(value: KeylistUpdate) -> Self {
        Self::CoordinateMediation(CoordinateMediation::KeylistUpdate(value))
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use serde_json::json;

    use super::*;
    use crate::misc::test_utils;

    #[test]
    fn test_keylist_update() {
        let content = KeylistUpdateContent::builder()
            .updates(vec![KeylistUpdateItem {
                recipient_key: "3Dn1SJNPaCXcvvJvSbsFWP2xaCjMom3can8CQNhWrTRx".to_owned(),
                action: KeylistUpdateItemAction::Add,
            }])
            .build();

        let expected = json!({
            "updates": [
                {
                    "recipient_key": "3Dn1SJNPaCXcvvJvSbsFWP2xaCjMom3can8CQNhWrTRx",
                    "action": "add"
                }
            ]
        });

        test_utils::test_msg(
            content,
            KeylistUpdateDecorators::default(),
            "https://didcomm.org/coordinate-mediation/1.0/keylist-update",
            expected,
        );
    }

    #[test]
    fn test_keylist_update_remove() {
        let content = KeylistUpdateContent::builder()
            .updates(vec![KeylistUpdateItem {
                recipient_key: "9WCgWKUaAJj3VWxxtzvvMQN3AoFxoBtBDo9ntwJnVVCC".to_owned(),
                action: KeylistUpdateItemAction::Remove,
            }])
            .build();

        let expected = json!({
            "updates": [
                {
                    "recipient_key": "9WCgWKUaAJj3VWxxtzvvMQN3AoFxoBtBDo9ntwJnVVCC",
                    "action": "remove"
                }
            ]
        });

        test_utils::test_msg(
            content,
            KeylistUpdateDecorators::default(),
            "https://didcomm.org/coordinate-mediation/1.0/keylist-update",
            expected,
        );
    }
}
