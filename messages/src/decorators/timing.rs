use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::misc::utils;

/// Struct representing the `~timing` decorator from its [RFC](<https://github.com/hyperledger/aries-rfcs/blob/main/features/0032-message-timing/README.md>).
#[derive(Clone, Debug, Deserialize, Serialize, Default, PartialEq)]
pub struct Timing {
    #[serde(skip_serializing_if = "Option::is_none")]
    #[serde(serialize_with = "utils::serialize_opt_datetime")]
    pub in_time: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    #[serde(serialize_with = "utils::serialize_opt_datetime")]
    pub out_time: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    #[serde(serialize_with = "utils::serialize_opt_datetime")]
    pub expires_time: Option<DateTime<Utc>>,
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
#[allow(clippy::field_reassign_with_default)]
pub mod tests {
    use serde_json::json;

    use super::*;
    use crate::misc::test_utils::{self, OptDateTimeRfc3339};

    pub fn make_extended_timing() -> Timing {
        let dt = DateTime::default();

        let mut timing = Timing::default();
        timing.in_time = Some(dt);
        timing.out_time = Some(dt);
        timing.expires_time = Some(dt);
        timing
    }

    #[test]
    fn test_minimal_timing() {
        let timing = Timing::default();
        let expected = json!({});

        test_utils::test_serde(timing, expected);
    }

    #[test]
    fn test_extended_timing() {
        let timing = make_extended_timing();

        let expected = json!({
            "in_time": OptDateTimeRfc3339(&timing.in_time),
            "out_time": OptDateTimeRfc3339(&timing.out_time),
            "expires_time": OptDateTimeRfc3339(&timing.expires_time)
        });

        test_utils::test_serde(timing, expected);
    }
}
