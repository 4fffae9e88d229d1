use async_trait::async_trait;
use messages::msg_fields::protocols::coordinate_mediation::mediate_request::MediateRequest;

use crate::{errors::error::DidExchangeResult, records::mediation::MediationRecord};

/// Interface to the mediation subsystem. The manager only reads granted
/// records and asks for new mediation to be initiated; the grant protocol
/// itself runs elsewhere.
#[async_trait]
pub trait BaseMediator: Send + Sync {
    /// Record to fall back on when an operation names no mediation id.
    async fn get_default_mediator(&self) -> DidExchangeResult<Option<MediationRecord>>;

    async fn get_mediator(&self, mediation_id: &str) -> DidExchangeResult<MediationRecord>;

    /// Starts mediation over `connection_id`: returns the requested-state
    /// record plus the mediate-request message to deliver.
    async fn prepare_request(
        &self,
        connection_id: &str,
    ) -> DidExchangeResult<(MediationRecord, MediateRequest)>;
}
