use serde::{Deserialize, Serialize};
use typed_builder::TypedBuilder;

use super::{OobService, OutOfBand};
use crate::{
    decorators::{attachment::Attachment, timing::Timing},
    misc::MimeType,
    msg_parts::MsgParts,
    AriesMessage,
};

pub type Invitation = MsgParts<InvitationContent, InvitationDecorators>;

#[derive(Clone, Debug, Deserialize, Serialize, PartialEq, TypedBuilder)]
pub struct InvitationContent {
    #[builder(default, setter(strip_option))]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
    #[builder(default, setter(strip_option))]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub goal_code: Option<String>,
    #[builder(default, setter(strip_option))]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub goal: Option<String>,
    #[builder(default, setter(strip_option))]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub accept: Option<Vec<MimeType>>,
    #[builder(default, setter(strip_option))]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub handshake_protocols: Option<Vec<String>>,
    #[builder(default, setter(strip_option))]
    #[serde(rename = "requests~attach", skip_serializing_if = "Option::is_none")]
    pub requests_attach: Option<Vec<Attachment>>,
    pub services: Vec<OobService>,
}

#[derive(Clone, Debug, Default, Deserialize, PartialEq, Serialize, TypedBuilder)]
pub struct InvitationDecorators {
    #[builder(default, setter(strip_option))]
    #[serde(rename = "~timing", skip_serializing_if = "Option::is_none")]
    pub timing: Option<Timing>,
}

impl From<Invitation> for AriesMessage {
    fn from(value: Invitation) -> Self {
        Self::OutOfBand(OutOfBand::Invitation(value))
    }
}
