use serde::{Deserialize, Serialize};
use typed_builder::TypedBuilder;

use super::DidExchange;
use crate::{
    decorators::{thread::Thread, timing::Timing},
    misc::NoContent,
    msg_parts::MsgParts,
    AriesMessage,
};

/// The complete message carries no fields of its own, only threading decorators.
pub type Complete = MsgParts<NoContent, CompleteDecorators>;

#[derive(Clone, Debug, Deserialize, Serialize, PartialEq, TypedBuilder)]
pub struct CompleteDecorators {
    #[serde(rename = "~thread")]
    pub thread: Thread,
    #[builder(default, setter(strip_option))]
    #[serde(rename = "~timing")]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub timing: Option<Timing>,
}

impl From<Complete> for AriesMessage {
    fn from(value: Complete) -> Self {
        Self::DidExchange(DidExchange::Complete(value))
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use serde_json::json;

    use super::*;
    use crate::{
        decorators::{thread::tests::make_extended_thread, timing::tests::make_extended_timing},
        misc::test_utils,
    };

    #[test]
    fn test_minimal_didexchange_complete() {
        let decorators = CompleteDecorators::builder()
            .thread(make_extended_thread())
            .build();
        let expected = json!({
            "~thread": decorators.thread
        });

        test_utils::test_msg(
            NoContent,
            decorators,
            "https://didcomm.org/didexchange/1.0/complete",
            expected,
        );
    }

    #[test]
    fn test_extended_didexchange_complete() {
        let decorators = CompleteDecorators::builder()
            .thread(make_extended_thread())
            .timing(make_extended_timing())
            .build();

        let expected = json!({
            "~thread": decorators.thread,
            "~timing": decorators.timing
        });

        test_utils::test_msg(
            NoContent,
            decorators,
            "https://didcomm.org/didexchange/1.0/complete",
            expected,
        );
    }
}
