use async_trait::async_trait;
use chrono::Utc;
use diddoc::aries::diddoc::AriesDidDoc;
use messages::msg_fields::protocols::{
    did_exchange::request::Request, out_of_band::invitation::Invitation,
};

use crate::{
    errors::error::{DidExchangeError, DidExchangeErrorKind, DidExchangeResult},
    records::connection::{ConnRecord, ConnRole, ConnState},
    storage::{object_cache::ObjectCache, BaseStorage, ConnectionPersistence, DidDocPersistence},
};

/// Cache-backed store for tests, demos and single-process agents.
///
/// The verkey index maps each recipient key of a stored DID document back to
/// the document's DID, so inbound sender keys resolve to a known peer.
pub struct InMemoryStorage {
    connections: ObjectCache<ConnRecord>,
    did_docs: ObjectCache<AriesDidDoc>,
    did_keys: ObjectCache<String>,
    invitations: ObjectCache<Invitation>,
    requests: ObjectCache<Request>,
}

impl InMemoryStorage {
    pub fn new() -> Self {
        Self {
            connections: ObjectCache::new("connection"),
            did_docs: ObjectCache::new("did-doc"),
            did_keys: ObjectCache::new("did-key"),
            invitations: ObjectCache::new("invitation"),
            requests: ObjectCache::new("request"),
        }
    }
}

impl Default for InMemoryStorage {
    fn default() -> Self {
        Self::new()
    }
}

impl BaseStorage for InMemoryStorage {}

#[async_trait]
impl ConnectionPersistence for InMemoryStorage {
    async fn save(&self, record: &mut ConnRecord) -> DidExchangeResult<()> {
        record.updated_at = Utc::now();
        self.connections
            .insert(&record.connection_id, record.clone())?;
        Ok(())
    }

    async fn retrieve_by_id(&self, connection_id: &str) -> DidExchangeResult<ConnRecord> {
        self.connections.get(connection_id)
    }

    async fn retrieve_by_invitation_key(
        &self,
        invitation_key: &str,
        their_role: ConnRole,
    ) -> DidExchangeResult<ConnRecord> {
        let ids = self.connections.find_by(|(id, m)| {
            let record = m.lock().ok()?;
            (record.invitation_key.as_deref() == Some(invitation_key)
                && record.their_role == their_role
                && record.state == ConnState::Invitation)
                .then(|| id.clone())
        })?;
        let id = ids.first().ok_or_else(|| {
            DidExchangeError::from_msg(
                DidExchangeErrorKind::NotFound,
                format!("No connection record found for invitation key: {invitation_key}"),
            )
        })?;
        self.connections.get(id)
    }

    async fn retrieve_by_request_id(&self, request_id: &str) -> DidExchangeResult<ConnRecord> {
        let ids = self.connections.find_by(|(id, m)| {
            let record = m.lock().ok()?;
            (record.request_id.as_deref() == Some(request_id)).then(|| id.clone())
        })?;
        let id = ids.first().ok_or_else(|| {
            DidExchangeError::from_msg(
                DidExchangeErrorKind::NotFound,
                format!("No connection record found for request id: {request_id}"),
            )
        })?;
        self.connections.get(id)
    }

    async fn retrieve_by_did(
        &self,
        their_did: &str,
        my_did: Option<&str>,
        their_role: ConnRole,
    ) -> DidExchangeResult<ConnRecord> {
        let ids = self.connections.find_by(|(id, m)| {
            let record = m.lock().ok()?;
            (record.their_did.as_deref() == Some(their_did)
                && record.their_role == their_role
                && (my_did.is_none() || record.my_did.as_deref() == my_did))
                .then(|| id.clone())
        })?;
        let id = ids.first().ok_or_else(|| {
            DidExchangeError::from_msg(
                DidExchangeErrorKind::NotFound,
                format!("No connection record found for did: {their_did}"),
            )
        })?;
        self.connections.get(id)
    }

    async fn attach_invitation(
        &self,
        connection_id: &str,
        invitation: &Invitation,
    ) -> DidExchangeResult<()> {
        self.invitations.insert(connection_id, invitation.clone())?;
        Ok(())
    }

    async fn retrieve_invitation(&self, connection_id: &str) -> DidExchangeResult<Invitation> {
        self.invitations.get(connection_id)
    }

    async fn attach_request(
        &self,
        connection_id: &str,
        request: &Request,
    ) -> DidExchangeResult<()> {
        self.requests.insert(connection_id, request.clone())?;
        Ok(())
    }

    async fn retrieve_request(&self, connection_id: &str) -> DidExchangeResult<Request> {
        self.requests.get(connection_id)
    }
}

#[async_trait]
impl DidDocPersistence for InMemoryStorage {
    async fn save_did_document(&self, doc: &AriesDidDoc) -> DidExchangeResult<()> {
        if doc.id.is_empty() {
            return Err(DidExchangeError::from_msg(
                DidExchangeErrorKind::InvalidInput,
                "Cannot store DID document without an id",
            ));
        }
        self.did_docs.insert(&doc.id, doc.clone())?;
        Ok(())
    }

    async fn fetch_did_document(&self, did: &str) -> DidExchangeResult<AriesDidDoc> {
        self.did_docs.get(did)
    }

    async fn add_key_for_did(&self, did: &str, key: &str) -> DidExchangeResult<()> {
        self.did_keys.insert(key, did.to_string())?;
        Ok(())
    }

    async fn find_did_for_key(&self, key: &str) -> DidExchangeResult<Option<String>> {
        match self.did_keys.get(key) {
            Ok(did) => Ok(Some(did)),
            Err(err) if err.kind() == DidExchangeErrorKind::NotFound => Ok(None),
            Err(err) => Err(err),
        }
    }

    async fn remove_keys_for_did(&self, did: &str) -> DidExchangeResult<()> {
        let keys = self.did_keys.find_by(|(key, m)| {
            let value = m.lock().ok()?;
            (value.as_str() == did).then(|| key.clone())
        })?;
        for key in keys {
            self.did_keys.remove(&key)?;
        }
        Ok(())
    }
}
