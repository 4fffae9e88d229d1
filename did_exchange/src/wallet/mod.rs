pub mod in_memory;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::errors::error::DidExchangeResult;

/// Key management seam. Implementations own the private keys; callers
/// address them by base58 verkey only.
#[async_trait]
pub trait BaseWallet: Send + Sync {
    /// Creates a new DID and keypair, optionally derived from a 32 byte seed.
    async fn create_and_store_my_did(&self, seed: Option<&str>) -> DidExchangeResult<DidData>;

    async fn get_local_did(&self, did: &str) -> DidExchangeResult<DidData>;

    /// The wallet's public DID, when one has been configured.
    async fn get_public_did(&self) -> DidExchangeResult<Option<DidData>>;

    async fn sign(&self, verkey: &str, msg: &[u8]) -> DidExchangeResult<Vec<u8>>;

    async fn verify(&self, verkey: &str, msg: &[u8], signature: &[u8])
        -> DidExchangeResult<bool>;
}

#[derive(Clone, Debug, Deserialize, Serialize, PartialEq)]
pub struct DidData {
    did: String,
    verkey: String,
    posture: DidPosture,
}

impl DidData {
    pub fn new(did: &str, verkey: &str, posture: DidPosture) -> Self {
        Self {
            did: did.into(),
            verkey: verkey.into(),
            posture,
        }
    }

    pub fn did(&self) -> &str {
        &self.did
    }

    pub fn verkey(&self) -> &str {
        &self.verkey
    }

    pub fn posture(&self) -> DidPosture {
        self.posture
    }
}

/// Visibility of a DID beyond the wallet. Posted DIDs are resolvable by
/// peers even though they are not the wallet's declared public DID.
#[derive(Clone, Copy, Debug, Default, Deserialize, Serialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum DidPosture {
    Public,
    Posted,
    #[default]
    WalletOnly,
}

impl DidPosture {
    pub fn is_public(&self) -> bool {
        matches!(self, DidPosture::Public | DidPosture::Posted)
    }
}
