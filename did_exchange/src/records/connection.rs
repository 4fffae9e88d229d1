use std::{collections::HashMap, fmt};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use typed_builder::TypedBuilder;
use uuid::Uuid;

/// Persistent record of a single pairwise negotiation, from invitation
/// receipt (or implicit request) through completion or abandonment.
///
/// `invitation_key` is the recipient key the other party advertised in their
/// invitation. For requesters it selects the expected response signer; for
/// responders it routes inbound requests back to the originating invitation.
#[derive(Clone, Debug, Deserialize, Serialize, PartialEq, TypedBuilder)]
pub struct ConnRecord {
    #[builder(default = Uuid::new_v4().to_string())]
    pub connection_id: String,
    pub state: ConnState,
    pub their_role: ConnRole,
    #[builder(default)]
    pub my_did: Option<String>,
    #[builder(default)]
    pub their_did: Option<String>,
    #[builder(default)]
    pub their_label: Option<String>,
    #[builder(default)]
    pub alias: Option<String>,
    #[builder(default)]
    pub invitation_key: Option<String>,
    #[builder(default)]
    pub invitation_msg_id: Option<String>,
    #[builder(default)]
    pub request_id: Option<String>,
    #[builder(default)]
    pub accept: AcceptPolicy,
    #[builder(default)]
    pub multiuse: bool,
    #[builder(default)]
    pub mediation_id: Option<String>,
    /// Connection used to route inbound traffic for this one. Chained
    /// records form the routing path folded into new DID documents.
    #[builder(default)]
    pub inbound_connection_id: Option<String>,
    #[builder(default)]
    pub metadata: HashMap<String, Value>,
    #[builder(default = Utc::now())]
    pub created_at: DateTime<Utc>,
    #[builder(default = Utc::now())]
    pub updated_at: DateTime<Utc>,
}

#[derive(Clone, Copy, Debug, Deserialize, Serialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum ConnState {
    Invitation,
    Request,
    Response,
    Completed,
    Abandoned,
}

impl ConnState {
    pub fn is_terminal(&self) -> bool {
        matches!(self, ConnState::Completed | ConnState::Abandoned)
    }
}

impl fmt::Display for ConnState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let state = match self {
            ConnState::Invitation => "invitation",
            ConnState::Request => "request",
            ConnState::Response => "response",
            ConnState::Completed => "completed",
            ConnState::Abandoned => "abandoned",
        };
        f.write_str(state)
    }
}

/// Role of the other party in the exchange.
#[derive(Clone, Copy, Debug, Deserialize, Serialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum ConnRole {
    Requester,
    Responder,
}

impl fmt::Display for ConnRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let role = match self {
            ConnRole::Requester => "requester",
            ConnRole::Responder => "responder",
        };
        f.write_str(role)
    }
}

#[derive(Clone, Copy, Debug, Default, Deserialize, Serialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum AcceptPolicy {
    Auto,
    #[default]
    Manual,
}
