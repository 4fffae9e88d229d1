use async_trait::async_trait;
use messages::AriesMessage;
use typed_builder::TypedBuilder;
use url::Url;

use crate::errors::error::DidExchangeResult;

/// Outbound delivery seam. The manager hands fully built messages here;
/// packing and transport are the host agent's concern.
#[async_trait]
pub trait BaseResponder: Send + Sync {
    async fn send(&self, message: AriesMessage, route: OutboundRoute) -> DidExchangeResult<()>;
}

/// Where to deliver an outbound message: over an established connection, or
/// straight to a bare endpoint.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct OutboundRoute {
    pub connection_id: Option<String>,
    pub endpoint: Option<Url>,
}

impl OutboundRoute {
    pub fn to_connection(connection_id: impl Into<String>) -> Self {
        Self {
            connection_id: Some(connection_id.into()),
            endpoint: None,
        }
    }

    pub fn to_endpoint(endpoint: Url) -> Self {
        Self {
            connection_id: None,
            endpoint: Some(endpoint),
        }
    }
}

/// Delivery metadata the transport layer attaches to an inbound message.
#[derive(Clone, Debug, Default, PartialEq, TypedBuilder)]
pub struct MessageReceipt {
    #[builder(default)]
    pub sender_did: Option<String>,
    #[builder(default)]
    pub recipient_did: Option<String>,
    #[builder(default)]
    pub recipient_verkey: Option<String>,
    #[builder(default)]
    pub recipient_did_public: bool,
}
