use serde::{Deserialize, Serialize};
use typed_builder::TypedBuilder;
use url::Url;
use uuid::Uuid;

/// Snapshot of a mediation agreement with a routing agent. Only granted
/// records may contribute routing keys and an endpoint to new DID documents;
/// a requested record carries no endpoint yet.
#[derive(Clone, Debug, Deserialize, Serialize, PartialEq, TypedBuilder)]
pub struct MediationRecord {
    #[builder(default = Uuid::new_v4().to_string())]
    pub mediation_id: String,
    #[builder(default)]
    pub role: MediationRole,
    pub state: MediationState,
    /// Connection over which the mediator is reached.
    pub connection_id: String,
    #[builder(default)]
    pub routing_keys: Vec<String>,
    #[builder(default)]
    pub endpoint: Option<Url>,
}

#[derive(Clone, Copy, Debug, Default, Deserialize, Serialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum MediationRole {
    #[default]
    Client,
    Server,
}

#[derive(Clone, Copy, Debug, Deserialize, Serialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum MediationState {
    Requested,
    Granted,
    Denied,
}

#[cfg(test)]
mod unit_tests {
    use super::*;

    #[test]
    fn test_builder_defaults() {
        let record = MediationRecord::builder()
            .state(MediationState::Requested)
            .connection_id("conn-1".to_owned())
            .build();

        assert!(!record.mediation_id.is_empty());
        assert_eq!(record.role, MediationRole::Client);
        assert!(record.routing_keys.is_empty());
        assert!(record.endpoint.is_none());
    }
}
