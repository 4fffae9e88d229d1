//! Module containing the `out of band` protocol messages, as defined in the [RFC](<https://github.com/hyperledger/aries-rfcs/blob/main/features/0434-outofband/README.md>).

pub mod invitation;

use derive_more::From;
use diddoc::aries::service::AriesService;
use serde::{Deserialize, Serialize};

use self::invitation::Invitation;

#[derive(Clone, Debug, From, Deserialize, Serialize, PartialEq)]
#[serde(tag = "@type")]
pub enum OutOfBand {
    #[serde(rename = "https://didcomm.org/out-of-band/1.1/invitation")]
    Invitation(Invitation),
}

#[derive(Clone, Debug, Deserialize, Serialize, PartialEq)]
#[serde(untagged)]
pub enum OobService {
    Did(String),
    AriesService(AriesService),
}
