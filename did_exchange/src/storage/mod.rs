pub mod in_memory;
pub mod object_cache;

use async_trait::async_trait;
use diddoc::aries::diddoc::AriesDidDoc;
use messages::msg_fields::protocols::{
    did_exchange::request::Request, out_of_band::invitation::Invitation,
};

use crate::{
    errors::error::DidExchangeResult,
    records::connection::{ConnRecord, ConnRole},
};

/// Lookup and persistence of connection records and the raw protocol
/// messages attached to them.
#[async_trait]
pub trait ConnectionPersistence: Send + Sync {
    /// Persists the record, refreshing its `updated_at` timestamp.
    async fn save(&self, record: &mut ConnRecord) -> DidExchangeResult<()>;

    async fn retrieve_by_id(&self, connection_id: &str) -> DidExchangeResult<ConnRecord>;

    /// Finds the invitation-state record advertising `invitation_key`.
    /// Records that progressed past the invitation state never match.
    async fn retrieve_by_invitation_key(
        &self,
        invitation_key: &str,
        their_role: ConnRole,
    ) -> DidExchangeResult<ConnRecord>;

    async fn retrieve_by_request_id(&self, request_id: &str) -> DidExchangeResult<ConnRecord>;

    async fn retrieve_by_did(
        &self,
        their_did: &str,
        my_did: Option<&str>,
        their_role: ConnRole,
    ) -> DidExchangeResult<ConnRecord>;

    async fn attach_invitation(
        &self,
        connection_id: &str,
        invitation: &Invitation,
    ) -> DidExchangeResult<()>;

    async fn retrieve_invitation(&self, connection_id: &str) -> DidExchangeResult<Invitation>;

    async fn attach_request(
        &self,
        connection_id: &str,
        request: &Request,
    ) -> DidExchangeResult<()>;

    async fn retrieve_request(&self, connection_id: &str) -> DidExchangeResult<Request>;
}

/// Storage of peer DID documents and the verkey index derived from them.
#[async_trait]
pub trait DidDocPersistence: Send + Sync {
    /// Stores the document under its DID, replacing any previous version.
    async fn save_did_document(&self, doc: &AriesDidDoc) -> DidExchangeResult<()>;

    async fn fetch_did_document(&self, did: &str) -> DidExchangeResult<AriesDidDoc>;

    async fn add_key_for_did(&self, did: &str, key: &str) -> DidExchangeResult<()>;

    async fn find_did_for_key(&self, key: &str) -> DidExchangeResult<Option<String>>;

    async fn remove_keys_for_did(&self, did: &str) -> DidExchangeResult<()>;
}

pub trait BaseStorage: ConnectionPersistence + DidDocPersistence {}
