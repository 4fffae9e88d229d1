use super::CoordinateMediation;
use crate::{misc::NoContent, msg_parts::MsgParts, AriesMessage};

/// Request to a mediator to start routing messages for the sender.
pub type MediateRequest = MsgParts<NoContent>;

impl From<MediateRequest> for AriesMessage {
    fn from(value: MediateRequest) -> Self {
        Self::CoordinateMediation(CoordinateMediation::MediateRequest(value))
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use serde_json::json;

    use super::*;
    use crate::misc::{test_utils, NoDecorators};

    #[test]
    fn test_mediate_request() {
        let expected = json!({});

        test_utils::test_msg(
            NoContent,
            NoDecorators,
            "https://didcomm.org/coordinate-mediation/1.0/mediate-request",
            expected,
        );
    }
}
