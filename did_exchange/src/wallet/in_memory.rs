use std::{collections::HashMap, sync::RwLock};

use async_trait::async_trait;
use ed25519_dalek::{Signature, Signer, SigningKey, Verifier, VerifyingKey};
use rand::rngs::OsRng;

use crate::{
    errors::error::{DidExchangeError, DidExchangeErrorKind, DidExchangeResult},
    wallet::{BaseWallet, DidData, DidPosture},
};

/// Ed25519 wallet kept entirely in memory, for tests and demos. DIDs are
/// derived the indy way: the DID is the base58 encoding of the first 16
/// bytes of the public key, the verkey the encoding of all 32.
#[derive(Default)]
pub struct InMemoryWallet {
    dids: RwLock<HashMap<String, DidData>>,
    keys: RwLock<HashMap<String, SigningKey>>,
    public_did: RwLock<Option<String>>,
}

fn lock_err() -> DidExchangeError {
    DidExchangeError::from_msg(DidExchangeErrorKind::LockError, "Unable to lock wallet store")
}

impl InMemoryWallet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a DID marked public and selects it as the wallet public DID.
    pub fn create_and_store_public_did(&self, seed: Option<&str>) -> DidExchangeResult<DidData> {
        let data = self.create_did(seed, DidPosture::Public)?;
        *self.public_did.write().map_err(|_| lock_err())? = Some(data.did().to_owned());
        Ok(data)
    }

    /// Creates a DID resolvable by peers without selecting it as the wallet
    /// public DID.
    pub fn create_and_store_posted_did(&self, seed: Option<&str>) -> DidExchangeResult<DidData> {
        self.create_did(seed, DidPosture::Posted)
    }

    fn create_did(&self, seed: Option<&str>, posture: DidPosture) -> DidExchangeResult<DidData> {
        let signing_key = match seed {
            Some(seed) => Self::signing_key_from_seed(seed)?,
            None => SigningKey::generate(&mut OsRng),
        };
        let public = signing_key.verifying_key().to_bytes();
        let did = bs58::encode(&public[0..16]).into_string();
        let verkey = bs58::encode(&public).into_string();
        let data = DidData::new(&did, &verkey, posture);

        self.dids
            .write()
            .map_err(|_| lock_err())?
            .insert(did, data.clone());
        self.keys
            .write()
            .map_err(|_| lock_err())?
            .insert(data.verkey().to_owned(), signing_key);
        Ok(data)
    }

    fn signing_key_from_seed(seed: &str) -> DidExchangeResult<SigningKey> {
        let bytes: [u8; 32] = seed.as_bytes().try_into().map_err(|_| {
            DidExchangeError::from_msg(
                DidExchangeErrorKind::InvalidInput,
                "Invalid seed length, expected exactly 32 bytes",
            )
        })?;
        Ok(SigningKey::from_bytes(&bytes))
    }
}

#[async_trait]
impl BaseWallet for InMemoryWallet {
    async fn create_and_store_my_did(&self, seed: Option<&str>) -> DidExchangeResult<DidData> {
        self.create_did(seed, DidPosture::WalletOnly)
    }

    async fn get_local_did(&self, did: &str) -> DidExchangeResult<DidData> {
        self.dids
            .read()
            .map_err(|_| lock_err())?
            .get(did)
            .cloned()
            .ok_or_else(|| {
                DidExchangeError::from_msg(
                    DidExchangeErrorKind::WalletError,
                    format!("Unknown DID: {did}"),
                )
            })
    }

    async fn get_public_did(&self) -> DidExchangeResult<Option<DidData>> {
        let did = self.public_did.read().map_err(|_| lock_err())?.clone();
        match did {
            Some(did) => self.get_local_did(&did).await.map(Some),
            None => Ok(None),
        }
    }

    async fn sign(&self, verkey: &str, msg: &[u8]) -> DidExchangeResult<Vec<u8>> {
        let keys = self.keys.read().map_err(|_| lock_err())?;
        let key = keys.get(verkey).ok_or_else(|| {
            DidExchangeError::from_msg(
                DidExchangeErrorKind::WalletError,
                format!("Unknown signing key: {verkey}"),
            )
        })?;
        Ok(key.sign(msg).to_bytes().to_vec())
    }

    async fn verify(
        &self,
        verkey: &str,
        msg: &[u8],
        signature: &[u8],
    ) -> DidExchangeResult<bool> {
        let decoded = bs58::decode(verkey).into_vec().map_err(|err| {
            DidExchangeError::from_msg(
                DidExchangeErrorKind::NotBase58,
                format!("Invalid verkey: {err}"),
            )
        })?;
        let public: [u8; 32] = match decoded.as_slice().try_into() {
            Ok(bytes) => bytes,
            Err(_) => return Ok(false),
        };
        let Ok(key) = VerifyingKey::from_bytes(&public) else {
            return Ok(false);
        };
        let Ok(signature) = Signature::from_slice(signature) else {
            return Ok(false);
        };
        Ok(key.verify(msg, &signature).is_ok())
    }
}
