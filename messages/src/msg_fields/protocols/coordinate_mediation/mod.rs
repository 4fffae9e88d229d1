//! Module containing the `coordinate mediation` protocol messages, as defined in the [RFC](<https://github.com/hyperledger/aries-rfcs/blob/main/features/0211-route-coordination/README.md>).

pub mod keylist_update;
pub mod mediate_request;

use derive_more::From;
use serde::{Deserialize, Serialize};

use self::{keylist_update::KeylistUpdate, mediate_request::MediateRequest};

#[derive(Clone, Debug, From, Deserialize, Serialize, PartialEq)]
#[serde(tag = "@type")]
pub enum CoordinateMediation {
    #[serde(rename = "https://didcomm.org/coordinate-mediation/1.0/mediate-request")]
    MediateRequest(MediateRequest),
    #[serde(rename = "https://didcomm.org/coordinate-mediation/1.0/keylist-update")]
    KeylistUpdate(KeylistUpdate),
}
