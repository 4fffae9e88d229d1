use serde::{Deserialize, Serialize};
use typed_builder::TypedBuilder;

use super::DidExchange;
use crate::{
    decorators::{attachment::Attachment, thread::Thread, timing::Timing},
    msg_parts::MsgParts,
    AriesMessage,
};

pub type Request = MsgParts<RequestContent, RequestDecorators>;

#[derive(Clone, Debug, Deserialize, Serialize, PartialEq, TypedBuilder)]
pub struct RequestContent {
    pub label: String,
    #[builder(default, setter(strip_option))]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub goal_code: Option<String>,
    #[builder(default, setter(strip_option))]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub goal: Option<String>,
    pub did: String,
    #[builder(default, setter(strip_option))]
    #[serde(rename = "did_doc~attach", skip_serializing_if = "Option::is_none")]
    pub did_doc: Option<Attachment>,
}

#[derive(Clone, Debug, Default, Deserialize, PartialEq, Serialize, TypedBuilder)]
pub struct RequestDecorators {
    #[builder(default, setter(strip_option))]
    #[serde(rename = "~thread", skip_serializing_if = "Option::is_none")]
    pub thread: Option<Thread>,
    #[builder(default, setter(strip_option))]
    #[serde(rename = "~timing", skip_serializing_if = "Option::is_none")]
    pub timing: Option<Timing>,
}

impl From<Request> for AriesMessage {
    fn from(value: Request) -> Self {
        Self::DidExchange(DidExchange::Request(value))
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
#[allow(clippy::field_reassign_with_default)]
pub mod tests {
    use serde_json::json;

    use super::*;
    use crate::{
        decorators::{
            attachment::tests::make_base64_attachment, thread::tests::make_extended_thread,
            timing::tests::make_extended_timing,
        },
        misc::test_utils,
    };

    pub fn request_content() -> RequestContent {
        RequestContent::builder()
            .label("test_request_label".to_owned())
            .did("test_did".to_owned())
            .did_doc(make_base64_attachment())
            .build()
    }

    #[test]
    fn test_minimal_didexchange_request() {
        let content = request_content();
        let expected = json!({
            "label": content.label,
            "did": content.did,
            "did_doc~attach": content.did_doc,
        });
        test_utils::test_msg(
            content,
            RequestDecorators::default(),
            "https://didcomm.org/didexchange/1.0/request",
            expected,
        );
    }

    #[test]
    fn test_extended_didexchange_request() {
        let content = request_content();

        let mut decorators = RequestDecorators::default();
        decorators.thread = Some(make_extended_thread());
        decorators.timing = Some(make_extended_timing());

        let expected = json!({
            "label": content.label,
            "did": content.did,
            "did_doc~attach": content.did_doc,
            "~thread": decorators.thread,
            "~timing": decorators.timing
        });

        test_utils::test_msg(
            content,
            decorators,
            "https://didcomm.org/didexchange/1.0/request",
            expected,
        );
    }
}
