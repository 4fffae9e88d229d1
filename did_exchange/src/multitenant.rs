use async_trait::async_trait;

use crate::errors::error::DidExchangeResult;

/// Relay key registration for multi-tenant deployments. The hosting agent
/// maps inbound recipient keys to subwallets; every freshly minted key must
/// be announced exactly once.
#[async_trait]
pub trait MultitenantRegistrar: Send + Sync {
    async fn add_key(&self, wallet_id: &str, verkey: &str) -> DidExchangeResult<()>;
}
