use diddoc::aries::{
    diddoc::AriesDidDoc,
    service::{AriesService, SERVICE_SUFFIX},
};
use typed_builder::TypedBuilder;
use url::Url;

use super::DidExchangeManager;
use crate::{
    errors::error::{DidExchangeError, DidExchangeErrorKind, DidExchangeResult},
    records::{connection::ConnState, mediation::MediationRecord},
    wallet::DidData,
};

/// Deliverable address derived from one service block of a peer's DID
/// document.
#[derive(Clone, Debug, PartialEq, TypedBuilder)]
pub struct ConnectionTarget {
    pub did: String,
    pub endpoint: Url,
    #[builder(default)]
    pub label: Option<String>,
    #[builder(default)]
    pub recipient_keys: Vec<String>,
    #[builder(default)]
    pub routing_keys: Vec<String>,
    pub sender_key: String,
}

impl DidExchangeManager {
    /// Builds our DID document for `my_info`, folding in the inbound routing
    /// chain and the mediator when present.
    ///
    /// Each router connection must be completed and its stored peer document
    /// must expose a service with at least one recipient key; that key joins
    /// the routing keys and the router's endpoint takes over. A mediation
    /// record then appends its routing keys and overrides the endpoint once
    /// more. One service block is emitted per effective endpoint, all
    /// sharing the same key material.
    pub async fn create_did_document(
        &self,
        my_info: &DidData,
        inbound_connection_id: Option<&str>,
        svc_endpoints: &[Url],
        mediation_record: Option<&MediationRecord>,
    ) -> DidExchangeResult<AriesDidDoc> {
        debug!(
            "DidExchangeManager::create_did_document >> did: {}",
            my_info.did()
        );

        let mut routing_keys: Vec<String> = Vec::new();
        let mut endpoints: Vec<Url> = svc_endpoints.to_vec();

        let mut router_id = inbound_connection_id.map(str::to_owned);
        while let Some(rid) = router_id {
            let router = self.storage.retrieve_by_id(&rid).await?;
            if router.state != ConnState::Completed {
                return Err(DidExchangeError::from_msg(
                    DidExchangeErrorKind::InvalidState,
                    format!("Router connection not completed: {rid}"),
                ));
            }
            let their_did = router.their_did.as_deref().ok_or_else(|| {
                DidExchangeError::from_msg(
                    DidExchangeErrorKind::InvalidState,
                    format!("Router connection {rid} has no resolved DID"),
                )
            })?;
            let doc = self.storage.fetch_did_document(their_did).await?;
            let service = doc.service.first().ok_or_else(|| {
                DidExchangeError::from_msg(
                    DidExchangeErrorKind::InvalidInput,
                    format!("No services defined by routing DIDDoc: {rid}"),
                )
            })?;
            let recipient_keys = doc.resolve_service_keys(service)?;
            let key = recipient_keys.first().ok_or_else(|| {
                DidExchangeError::from_msg(
                    DidExchangeErrorKind::InvalidInput,
                    "Routing DIDDoc service has no recipient key(s)",
                )
            })?;
            routing_keys.push(key.clone());
            endpoints = vec![service.service_endpoint.clone()];
            router_id = router.inbound_connection_id.clone();
        }

        if let Some(mediation_record) = mediation_record {
            routing_keys.extend(mediation_record.routing_keys.iter().cloned());
            let endpoint = mediation_record.endpoint.clone().ok_or_else(|| {
                DidExchangeError::from_msg(
                    DidExchangeErrorKind::InvalidState,
                    format!(
                        "Mediation record {} has no endpoint",
                        mediation_record.mediation_id
                    ),
                )
            })?;
            endpoints = vec![endpoint];
        }

        let Some((primary, extra)) = endpoints.split_first() else {
            return Err(DidExchangeError::from_msg(
                DidExchangeErrorKind::InvalidInput,
                "Cannot create DID document without a service endpoint",
            ));
        };

        let mut did_doc = AriesDidDoc::default();
        did_doc.set_id(my_info.did().to_owned());
        did_doc.set_service_endpoint(primary.clone());
        did_doc.set_recipient_keys(vec![my_info.verkey().to_owned()]);
        did_doc.set_routing_keys(routing_keys.clone());
        if let Some(service) = did_doc.service.get_mut(0) {
            service.id = format!("{};{}", my_info.did(), SERVICE_SUFFIX);
        }

        for (index, endpoint) in extra.iter().enumerate() {
            let service = AriesService::create()
                .set_id(format!("{};{}{}", my_info.did(), SERVICE_SUFFIX, index + 1))
                .set_service_endpoint(endpoint.clone())
                .set_recipient_keys(vec![my_info.verkey().to_owned()])
                .set_routing_keys(routing_keys.clone());
            did_doc.service.push(service);
        }

        Ok(did_doc)
    }

    /// Upserts the peer document and rebuilds the key index entries mapping
    /// its controlled keys back to its DID.
    pub async fn store_did_document(&self, doc: &AriesDidDoc) -> DidExchangeResult<()> {
        debug!("DidExchangeManager::store_did_document >> did: {}", doc.id);

        self.storage.save_did_document(doc).await?;
        self.storage.remove_keys_for_did(&doc.id).await?;
        for key in &doc.public_key {
            if key.controller == doc.id {
                self.storage
                    .add_key_for_did(&doc.id, &key.public_key_base_58)
                    .await?;
            }
        }
        Ok(())
    }

    pub async fn fetch_did_document(&self, did: &str) -> DidExchangeResult<AriesDidDoc> {
        self.storage.fetch_did_document(did).await
    }

    /// Deliverable targets for the peer described by `doc`, one per service
    /// whose recipient keys resolve non-empty.
    pub fn diddoc_connection_targets(
        &self,
        doc: Option<&AriesDidDoc>,
        sender_verkey: &str,
        their_label: Option<&str>,
    ) -> DidExchangeResult<Vec<ConnectionTarget>> {
        let doc = doc.ok_or_else(|| {
            DidExchangeError::from_msg(
                DidExchangeErrorKind::InvalidInput,
                "No DIDDoc provided for connection target",
            )
        })?;
        if doc.id.is_empty() {
            return Err(DidExchangeError::from_msg(
                DidExchangeErrorKind::InvalidInput,
                "DIDDoc has no DID",
            ));
        }
        if doc.service.is_empty() {
            return Err(DidExchangeError::from_msg(
                DidExchangeErrorKind::InvalidInput,
                "No services defined by DIDDoc",
            ));
        }

        let mut targets = Vec::new();
        for service in &doc.service {
            let recipient_keys = doc.resolve_service_keys(service)?;
            if recipient_keys.is_empty() {
                continue;
            }
            targets.push(
                ConnectionTarget::builder()
                    .did(doc.id.clone())
                    .endpoint(service.service_endpoint.clone())
                    .label(their_label.map(str::to_owned))
                    .recipient_keys(recipient_keys)
                    .routing_keys(service.routing_keys.clone())
                    .sender_key(sender_verkey.to_owned())
                    .build(),
            );
        }
        Ok(targets)
    }
}
