use serde::{Deserialize, Serialize};
use typed_builder::TypedBuilder;

/// Struct representing the `~thread` decorator from its [RFC](<https://github.com/hyperledger/aries-rfcs/blob/main/concepts/0008-message-id-and-threading/README.md>).
#[derive(Clone, Debug, Deserialize, Serialize, PartialEq, TypedBuilder)]
pub struct Thread {
    pub thid: String,
    #[builder(default, setter(strip_option))]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pthid: Option<String>,
    #[builder(default, setter(strip_option))]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sender_order: Option<u32>,
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
pub mod tests {
    use serde_json::json;

    use super::*;
    use crate::misc::test_utils;

    pub fn make_minimal_thread() -> Thread {
        Thread::builder().thid("test".to_owned()).build()
    }

    pub fn make_extended_thread() -> Thread {
        Thread::builder()
            .thid("test".to_owned())
            .pthid("test_pthid".to_owned())
            .sender_order(5)
            .build()
    }

    #[test]
    fn test_minimal_thread() {
        let thread = make_minimal_thread();
        let expected = json!({ "thid": thread.thid });

        test_utils::test_serde(thread, expected);
    }

    #[test]
    fn test_extended_thread() {
        let thread = make_extended_thread();

        let expected = json!({
            "thid": thread.thid,
            "pthid": thread.pthid,
            "sender_order": thread.sender_order
        });

        test_utils::test_serde(thread, expected);
    }
}
