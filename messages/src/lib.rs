pub mod decorators;
pub mod misc;
pub mod msg_fields;
pub mod msg_parts;

use derive_more::From;
use serde::{Deserialize, Serialize};

use crate::msg_fields::protocols::{
    coordinate_mediation::CoordinateMediation, did_exchange::DidExchange, out_of_band::OutOfBand,
};

/// Enum that can represent any message of the implemented protocols.
///
/// Each protocol enum is internally tagged by the `@type` field, so
/// deserializing into [`AriesMessage`] resolves the concrete message type
/// from the serialized `@type` and serializing appends it back.
#[derive(Clone, Debug, From, Deserialize, Serialize, PartialEq)]
#[serde(untagged)]
pub enum AriesMessage {
    OutOfBand(OutOfBand),
    DidExchange(DidExchange),
    CoordinateMediation(CoordinateMediation),
}
