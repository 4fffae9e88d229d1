mod base;

pub use base::ConnectionTarget;

use std::sync::Arc;

use diddoc::aries::diddoc::AriesDidDoc;
use messages::{
    decorators::{attachment::Attachment, thread::Thread},
    msg_fields::protocols::{
        coordinate_mediation::keylist_update::{
            KeylistUpdate, KeylistUpdateContent, KeylistUpdateDecorators, KeylistUpdateItem,
            KeylistUpdateItemAction,
        },
        did_exchange::{
            complete::Complete,
            problem_report::ProblemReport,
            request::{Request, RequestContent, RequestDecorators},
            response::{Response, ResponseContent, ResponseDecorators},
        },
        out_of_band::{invitation::Invitation, OobService},
    },
};
use typed_builder::TypedBuilder;
use url::Url;
use uuid::Uuid;

use crate::{
    errors::error::{DidExchangeError, DidExchangeErrorKind, DidExchangeResult},
    mediation::BaseMediator,
    multitenant::MultitenantRegistrar,
    records::{
        connection::{AcceptPolicy, ConnRecord, ConnRole, ConnState},
        mediation::{MediationRecord, MediationState},
    },
    responder::{BaseResponder, MessageReceipt, OutboundRoute},
    signing::{attachment_content, base64_attachment, jws_sign_attachment, jws_verify_attachment},
    storage::BaseStorage,
    wallet::{BaseWallet, DidData},
};

/// Static configuration of a [`DidExchangeManager`].
#[derive(Clone, Debug, TypedBuilder)]
pub struct ManagerConfig {
    /// Endpoint advertised in newly created DID documents.
    pub default_endpoint: Url,
    /// Label sent in requests when the caller provides none.
    pub default_label: String,
    /// Extra endpoints appended as secondary service blocks.
    #[builder(default)]
    pub additional_endpoints: Vec<Url>,
    /// Whether requests against a public DID are honored.
    #[builder(default)]
    pub public_invites: bool,
    /// Whether received invitations are answered without manual approval.
    #[builder(default)]
    pub auto_accept_invites: bool,
    /// Whether received requests are answered without manual approval.
    #[builder(default)]
    pub auto_accept_requests: bool,
    /// Subwallet id announced to the relay registrar, when hosted.
    #[builder(default)]
    pub wallet_id: Option<String>,
}

/// Drives the connection protocol: builds and consumes its messages, keeps
/// connection records in step with the negotiation and maintains the peer
/// DID document store.
pub struct DidExchangeManager {
    wallet: Arc<dyn BaseWallet>,
    storage: Arc<dyn BaseStorage>,
    responder: Arc<dyn BaseResponder>,
    mediator: Arc<dyn BaseMediator>,
    multitenant: Option<Arc<dyn MultitenantRegistrar>>,
    config: ManagerConfig,
}

impl DidExchangeManager {
    pub fn new(
        wallet: Arc<dyn BaseWallet>,
        storage: Arc<dyn BaseStorage>,
        responder: Arc<dyn BaseResponder>,
        mediator: Arc<dyn BaseMediator>,
        multitenant: Option<Arc<dyn MultitenantRegistrar>>,
        config: ManagerConfig,
    ) -> Self {
        Self {
            wallet,
            storage,
            responder,
            mediator,
            multitenant,
            config,
        }
    }

    pub fn config(&self) -> &ManagerConfig {
        &self.config
    }

    /// Stores a received out-of-band invitation and, under the auto-accept
    /// policy, immediately answers it with a connection request.
    pub async fn receive_invitation(
        &self,
        invitation: Invitation,
        auto_accept: Option<bool>,
        alias: Option<String>,
    ) -> DidExchangeResult<ConnRecord> {
        debug!("DidExchangeManager::receive_invitation >> invitation: {invitation:?}");

        if invitation.content.services.is_empty() {
            return Err(DidExchangeError::from_msg(
                DidExchangeErrorKind::InvalidInput,
                "Invitation must contain service blocks or service DIDs",
            ));
        }
        let invitation_key = match invitation.content.services.first() {
            Some(OobService::AriesService(service)) => {
                let key = service.recipient_keys.first().cloned().ok_or_else(|| {
                    DidExchangeError::from_msg(
                        DidExchangeErrorKind::InvalidInput,
                        "Existing service block must contain recipient keys and service endpoint",
                    )
                })?;
                Some(key)
            }
            _ => None,
        };

        let accept = match auto_accept.unwrap_or(self.config.auto_accept_invites) {
            true => AcceptPolicy::Auto,
            false => AcceptPolicy::Manual,
        };

        let mut conn_rec = ConnRecord::builder()
            .state(ConnState::Invitation)
            .their_role(ConnRole::Responder)
            .their_label(invitation.content.label.clone())
            .alias(alias)
            .invitation_key(invitation_key)
            .invitation_msg_id(Some(invitation.id.clone()))
            .accept(accept)
            .build();
        self.storage.save(&mut conn_rec).await?;
        self.storage
            .attach_invitation(&conn_rec.connection_id, &invitation)
            .await?;

        if conn_rec.accept == AcceptPolicy::Auto {
            let request = self.create_request(&mut conn_rec, None, None, None).await?;
            self.responder
                .send(
                    request.into(),
                    OutboundRoute::to_connection(conn_rec.connection_id.as_str()),
                )
                .await?;
        } else {
            debug!("Connection invitation will await acceptance");
        }

        Ok(conn_rec)
    }

    /// Builds the connection request for a record in the invitation state.
    /// Mints a pairwise DID unless the record already carries one, signs the
    /// DID document attachment with that DID's verkey and threads the message
    /// back to the originating invitation.
    pub async fn create_request(
        &self,
        conn_rec: &mut ConnRecord,
        my_label: Option<&str>,
        my_endpoint: Option<&Url>,
        mediation_id: Option<&str>,
    ) -> DidExchangeResult<Request> {
        debug!(
            "DidExchangeManager::create_request >> connection_id: {}",
            conn_rec.connection_id
        );

        let mediation_record = self.mediation_record_if_id(mediation_id, true).await?;

        let (my_info, fresh_verkey) = match &conn_rec.my_did {
            Some(did) => (self.wallet.get_local_did(did).await?, None),
            None => {
                let did_data = self.mint_pairwise_did().await?;
                conn_rec.my_did = Some(did_data.did().to_owned());
                let verkey = did_data.verkey().to_owned();
                (did_data, Some(verkey))
            }
        };

        let endpoints = self.effective_endpoints(my_endpoint);
        let did_doc = self
            .create_did_document(
                &my_info,
                conn_rec.inbound_connection_id.as_deref(),
                &endpoints,
                mediation_record.as_ref(),
            )
            .await?;
        let attach = jws_sign_attachment(
            base64_attachment(&did_doc)?,
            my_info.verkey(),
            self.wallet.as_ref(),
        )
        .await?;

        let request_id = Uuid::new_v4().to_string();
        let pthid = conn_rec.invitation_msg_id.clone().or_else(|| {
            conn_rec
                .their_did
                .as_ref()
                .map(|did| format!("did:sov:{did}"))
        });
        let thread = {
            let builder = Thread::builder().thid(request_id.clone());
            match pthid {
                Some(pthid) => builder.pthid(pthid).build(),
                None => builder.build(),
            }
        };

        let content = RequestContent::builder()
            .label(my_label.unwrap_or(&self.config.default_label).to_owned())
            .did(my_info.did().to_owned())
            .did_doc(attach)
            .build();
        let decorators = RequestDecorators::builder().thread(thread).build();
        let request = Request::builder()
            .id(request_id.clone())
            .content(content)
            .decorators(decorators)
            .build();

        conn_rec.request_id = Some(request_id);
        conn_rec.state = ConnState::Request;
        conn_rec.mediation_id = mediation_record
            .as_ref()
            .map(|record| record.mediation_id.clone());
        self.storage.save(conn_rec).await?;

        if let (Some(verkey), Some(mediation_record)) = (fresh_verkey, &mediation_record) {
            self.send_keylist_update(
                vec![KeylistUpdateItem {
                    recipient_key: verkey,
                    action: KeylistUpdateItemAction::Add,
                }],
                mediation_record,
            )
            .await?;
        }

        Ok(request)
    }

    /// Starts an exchange against a public DID, without a prior invitation.
    pub async fn create_request_implicit(
        &self,
        their_public_did: &str,
        my_label: Option<&str>,
        my_endpoint: Option<&Url>,
        mediation_id: Option<&str>,
        use_public_did: bool,
        alias: Option<String>,
    ) -> DidExchangeResult<ConnRecord> {
        debug!(
            "DidExchangeManager::create_request_implicit >> their_public_did: {their_public_did}"
        );

        let my_did = match use_public_did {
            true => {
                let public = self.wallet.get_public_did().await?.ok_or_else(|| {
                    DidExchangeError::from_msg(
                        DidExchangeErrorKind::WalletError,
                        "No public DID configured",
                    )
                })?;
                Some(public.did().to_owned())
            }
            false => None,
        };

        let mut conn_rec = ConnRecord::builder()
            .state(ConnState::Invitation)
            .their_role(ConnRole::Responder)
            .my_did(my_did)
            .their_did(Some(their_public_did.to_owned()))
            .alias(alias)
            .build();
        self.storage.save(&mut conn_rec).await?;

        let request = self
            .create_request(&mut conn_rec, my_label, my_endpoint, mediation_id)
            .await?;
        self.responder
            .send(
                request.into(),
                OutboundRoute::to_connection(conn_rec.connection_id.as_str()),
            )
            .await?;

        Ok(conn_rec)
    }

    /// Consumes a connection request addressed to one of our invitations
    /// (when `recipient_verkey` names the invitation key) or to a public DID.
    /// Returns the record holding the request, answering it immediately when
    /// the accept policy allows.
    #[allow(clippy::too_many_arguments)]
    pub async fn receive_request(
        &self,
        request: Request,
        recipient_did: &str,
        recipient_verkey: Option<&str>,
        my_endpoint: Option<&Url>,
        alias: Option<String>,
        auto_accept_implicit: Option<bool>,
        mediation_id: Option<&str>,
    ) -> DidExchangeResult<ConnRecord> {
        debug!("DidExchangeManager::receive_request >> request: {request:?}");

        let mut keylist_updates: Vec<KeylistUpdateItem> = Vec::new();

        let (connection_key, base_rec) = match recipient_verkey {
            Some(verkey) => {
                let base = self
                    .storage
                    .retrieve_by_invitation_key(verkey, ConnRole::Requester)
                    .await
                    .map_err(|err| match err.kind() {
                        DidExchangeErrorKind::NotFound => DidExchangeError::from_msg(
                            DidExchangeErrorKind::NotFound,
                            format!(
                                "No explicit invitation found for pairwise connection in state \
                                 {}: a prior connection request may have updated the connection \
                                 state",
                                ConnState::Invitation
                            ),
                        ),
                        _ => err,
                    })?;
                (verkey.to_owned(), Some(base))
            }
            None => {
                if !self.config.public_invites {
                    return Err(DidExchangeError::from_msg(
                        DidExchangeErrorKind::InvalidConfiguration,
                        "Public invitations are not enabled: connection request refused",
                    ));
                }
                let public = self.wallet.get_local_did(recipient_did).await?;
                if !public.posture().is_public() {
                    return Err(DidExchangeError::from_msg(
                        DidExchangeErrorKind::InvalidInput,
                        format!("Request DID {recipient_did} is not public"),
                    ));
                }
                (public.verkey().to_owned(), None)
            }
        };

        // Multi-use invitations spawn a fresh record per request and keep
        // accepting; a single-use invitation key retires once consumed.
        let mut spawned_rec = None;
        if let Some(base) = &base_rec {
            if base.multiuse {
                let did_data = self.mint_pairwise_did().await?;
                keylist_updates.push(KeylistUpdateItem {
                    recipient_key: did_data.verkey().to_owned(),
                    action: KeylistUpdateItemAction::Add,
                });
                let mut fresh = ConnRecord::builder()
                    .state(ConnState::Invitation)
                    .their_role(base.their_role)
                    .my_did(Some(did_data.did().to_owned()))
                    .invitation_key(base.invitation_key.clone())
                    .invitation_msg_id(base.invitation_msg_id.clone())
                    .accept(base.accept)
                    .metadata(base.metadata.clone())
                    .build();
                self.storage.save(&mut fresh).await?;
                spawned_rec = Some(fresh);
            } else {
                keylist_updates.push(KeylistUpdateItem {
                    recipient_key: connection_key.clone(),
                    action: KeylistUpdateItemAction::Remove,
                });
            }
        }

        let attachment = request.content.did_doc.as_ref().ok_or_else(|| {
            DidExchangeError::from_msg(
                DidExchangeErrorKind::InvalidInput,
                "DID Doc attachment missing or has no data",
            )
        })?;
        let their_doc = self.verify_diddoc(attachment, None).await?;
        if request.content.did != their_doc.id {
            return Err(DidExchangeError::from_msg(
                DidExchangeErrorKind::InvalidInput,
                format!(
                    "Connection DID {} does not match DID Doc id {}",
                    request.content.did, their_doc.id
                ),
            ));
        }
        self.store_did_document(&their_doc).await?;

        let (mut conn_rec, auto_accept) = match spawned_rec.or(base_rec) {
            Some(mut rec) => {
                let auto_accept = rec.accept == AcceptPolicy::Auto;
                rec.their_label = Some(request.content.label.clone());
                if alias.is_some() {
                    rec.alias = alias;
                }
                rec.their_did = Some(request.content.did.clone());
                rec.state = ConnState::Request;
                rec.request_id = Some(request.id.clone());
                self.storage.save(&mut rec).await?;
                (rec, auto_accept)
            }
            None => {
                // Request against the implicit invitation on a public DID;
                // a pairwise DID keeps the public one out of the connection.
                let did_data = self.mint_pairwise_did().await?;
                keylist_updates.push(KeylistUpdateItem {
                    recipient_key: did_data.verkey().to_owned(),
                    action: KeylistUpdateItemAction::Add,
                });
                let auto_accept =
                    auto_accept_implicit.unwrap_or(self.config.auto_accept_requests);
                let accept = match auto_accept {
                    true => AcceptPolicy::Auto,
                    false => AcceptPolicy::Manual,
                };
                let mut rec = ConnRecord::builder()
                    .state(ConnState::Request)
                    .their_role(ConnRole::Requester)
                    .my_did(Some(did_data.did().to_owned()))
                    .their_did(Some(request.content.did.clone()))
                    .their_label(Some(request.content.label.clone()))
                    .alias(alias)
                    .invitation_key(Some(connection_key.clone()))
                    .request_id(Some(request.id.clone()))
                    .accept(accept)
                    .build();
                self.storage.save(&mut rec).await?;
                (rec, auto_accept)
            }
        };

        self.storage
            .attach_request(&conn_rec.connection_id, &request)
            .await?;

        let mediation_record = self.mediation_record_if_id(mediation_id, false).await?;
        if let Some(mediation_record) = &mediation_record {
            if !keylist_updates.is_empty() {
                self.send_keylist_update(keylist_updates, mediation_record)
                    .await?;
            }
        }

        if auto_accept {
            let response = self
                .create_response(&mut conn_rec, my_endpoint, mediation_id)
                .await?;
            self.responder
                .send(
                    response.into(),
                    OutboundRoute::to_connection(conn_rec.connection_id.as_str()),
                )
                .await?;
        } else {
            debug!("Connection request will await acceptance");
        }

        Ok(conn_rec)
    }

    /// Builds the response for a connection in the request state. The DID
    /// document attachment is signed with the invitation key so the requester
    /// can tie the response back to the invitation it trusts.
    pub async fn create_response(
        &self,
        conn_rec: &mut ConnRecord,
        my_endpoint: Option<&Url>,
        mediation_id: Option<&str>,
    ) -> DidExchangeResult<Response> {
        debug!(
            "DidExchangeManager::create_response >> connection_id: {}",
            conn_rec.connection_id
        );

        let mediation_record = self.mediation_record_if_id(mediation_id, true).await?;

        if conn_rec.state != ConnState::Request {
            return Err(DidExchangeError::from_msg(
                DidExchangeErrorKind::InvalidState,
                format!("Connection not in state {}", ConnState::Request),
            ));
        }
        let request = self
            .storage
            .retrieve_request(&conn_rec.connection_id)
            .await?;

        let (my_info, fresh_verkey) = match &conn_rec.my_did {
            Some(did) => (self.wallet.get_local_did(did).await?, None),
            None => {
                let did_data = self.mint_pairwise_did().await?;
                conn_rec.my_did = Some(did_data.did().to_owned());
                let verkey = did_data.verkey().to_owned();
                (did_data, Some(verkey))
            }
        };

        let endpoints = self.effective_endpoints(my_endpoint);
        let did_doc = self
            .create_did_document(
                &my_info,
                conn_rec.inbound_connection_id.as_deref(),
                &endpoints,
                mediation_record.as_ref(),
            )
            .await?;
        let invitation_key = conn_rec.invitation_key.clone().ok_or_else(|| {
            DidExchangeError::from_msg(
                DidExchangeErrorKind::InvalidState,
                "Connection record has no invitation key to sign the response",
            )
        })?;
        let attach = jws_sign_attachment(
            base64_attachment(&did_doc)?,
            &invitation_key,
            self.wallet.as_ref(),
        )
        .await?;

        let thid = request
            .decorators
            .thread
            .as_ref()
            .map(|thread| thread.thid.clone())
            .unwrap_or_else(|| request.id.clone());
        let pthid = request
            .decorators
            .thread
            .as_ref()
            .and_then(|thread| thread.pthid.clone());
        let thread = {
            let builder = Thread::builder().thid(thid);
            match pthid {
                Some(pthid) => builder.pthid(pthid).build(),
                None => builder.build(),
            }
        };

        let content = ResponseContent::builder()
            .did(my_info.did().to_owned())
            .did_doc(attach)
            .build();
        let decorators = ResponseDecorators::builder().thread(thread).build();
        let response = Response::builder()
            .id(Uuid::new_v4().to_string())
            .content(content)
            .decorators(decorators)
            .build();

        conn_rec.state = ConnState::Response;
        conn_rec.mediation_id = mediation_record
            .as_ref()
            .map(|record| record.mediation_id.clone());
        self.storage.save(conn_rec).await?;

        if let (Some(verkey), Some(mediation_record)) = (fresh_verkey, &mediation_record) {
            self.send_keylist_update(
                vec![KeylistUpdateItem {
                    recipient_key: verkey,
                    action: KeylistUpdateItemAction::Add,
                }],
                mediation_record,
            )
            .await?;
        }

        Ok(response)
    }

    /// Consumes the response to a request we sent, completing our side of
    /// the exchange.
    pub async fn accept_response(
        &self,
        response: Response,
        receipt: &MessageReceipt,
    ) -> DidExchangeResult<ConnRecord> {
        debug!("DidExchangeManager::accept_response >> response: {response:?}");

        let thid = &response.decorators.thread.thid;
        let by_thread = match self.storage.retrieve_by_request_id(thid).await {
            Ok(rec) => Some(rec),
            Err(err) if err.kind() == DidExchangeErrorKind::NotFound => None,
            Err(err) => return Err(err),
        };
        let by_did = match (&by_thread, &receipt.sender_did) {
            (None, Some(sender_did)) => match self
                .storage
                .retrieve_by_did(
                    sender_did,
                    receipt.recipient_did.as_deref(),
                    ConnRole::Responder,
                )
                .await
            {
                Ok(rec) => Some(rec),
                Err(err) if err.kind() == DidExchangeErrorKind::NotFound => None,
                Err(err) => return Err(err),
            },
            _ => None,
        };
        let mut conn_rec = by_thread.or(by_did).ok_or_else(|| {
            DidExchangeError::from_msg(
                DidExchangeErrorKind::NotFound,
                "No corresponding connection request found",
            )
        })?;

        if !matches!(conn_rec.state, ConnState::Request | ConnState::Response) {
            return Err(DidExchangeError::from_msg(
                DidExchangeErrorKind::InvalidState,
                format!(
                    "Cannot accept connection response for connection in state: {}",
                    conn_rec.state
                ),
            ));
        }

        let attachment = response.content.did_doc.as_ref().ok_or_else(|| {
            DidExchangeError::from_msg(
                DidExchangeErrorKind::InvalidInput,
                "No DIDDoc attached; cannot connect to public DID",
            )
        })?;
        let their_doc = self
            .verify_diddoc(attachment, conn_rec.invitation_key.as_deref())
            .await?;
        if response.content.did != their_doc.id {
            return Err(DidExchangeError::from_msg(
                DidExchangeErrorKind::InvalidInput,
                format!(
                    "Connection DID {} does not match DID Doc id {}",
                    response.content.did, their_doc.id
                ),
            ));
        }
        self.store_did_document(&their_doc).await?;

        conn_rec.their_did = Some(response.content.did.clone());
        conn_rec.state = ConnState::Completed;
        self.storage.save(&mut conn_rec).await?;

        Ok(conn_rec)
    }

    /// Consumes the complete message that finishes the exchange on the
    /// responder side.
    pub async fn accept_complete(
        &self,
        complete: Complete,
        _receipt: &MessageReceipt,
    ) -> DidExchangeResult<ConnRecord> {
        debug!("DidExchangeManager::accept_complete >> complete: {complete:?}");

        let thid = &complete.decorators.thread.thid;
        let mut conn_rec = self
            .storage
            .retrieve_by_request_id(thid)
            .await
            .map_err(|err| match err.kind() {
                DidExchangeErrorKind::NotFound => DidExchangeError::from_msg(
                    DidExchangeErrorKind::NotFound,
                    "No corresponding connection request found",
                ),
                _ => err,
            })?;

        conn_rec.state = ConnState::Completed;
        self.storage.save(&mut conn_rec).await?;

        Ok(conn_rec)
    }

    /// Moves the connection to the abandoned state on a reported failure.
    pub async fn receive_problem_report(
        &self,
        report: ProblemReport,
        _receipt: &MessageReceipt,
    ) -> DidExchangeResult<ConnRecord> {
        debug!("DidExchangeManager::receive_problem_report >> report: {report:?}");

        let thid = &report.decorators.thread.thid;
        let mut conn_rec = self
            .storage
            .retrieve_by_request_id(thid)
            .await
            .map_err(|err| match err.kind() {
                DidExchangeErrorKind::NotFound => DidExchangeError::from_msg(
                    DidExchangeErrorKind::NotFound,
                    "No corresponding connection request found for problem report",
                ),
                _ => err,
            })?;
        if conn_rec.state.is_terminal() {
            return Err(DidExchangeError::from_msg(
                DidExchangeErrorKind::InvalidState,
                format!("Cannot abandon connection in state: {}", conn_rec.state),
            ));
        }

        info!(
            "Connection {} abandoned: {}",
            conn_rec.connection_id,
            report.content.explain.as_deref().unwrap_or("no reason given")
        );
        conn_rec.state = ConnState::Abandoned;
        self.storage.save(&mut conn_rec).await?;

        Ok(conn_rec)
    }

    /// Verifies the attachment signature and parses the signed DID document.
    async fn verify_diddoc(
        &self,
        attachment: &Attachment,
        expected_signer: Option<&str>,
    ) -> DidExchangeResult<AriesDidDoc> {
        if attachment.data.jws.is_none() {
            return Err(DidExchangeError::from_msg(
                DidExchangeErrorKind::AuthenticationError,
                "DID Doc attachment is not signed",
            ));
        }
        if !jws_verify_attachment(attachment, expected_signer, self.wallet.as_ref()).await? {
            return Err(DidExchangeError::from_msg(
                DidExchangeErrorKind::AuthenticationError,
                "DID Doc signature failed verification",
            ));
        }
        let content = attachment_content(attachment)?;
        serde_json::from_slice(&content).map_err(Into::into)
    }

    /// Mints a pairwise DID and announces its verkey to the relay registrar.
    async fn mint_pairwise_did(&self) -> DidExchangeResult<DidData> {
        let did_data = self.wallet.create_and_store_my_did(None).await?;
        self.register_key_for_relay(did_data.verkey()).await?;
        Ok(did_data)
    }

    async fn register_key_for_relay(&self, verkey: &str) -> DidExchangeResult<()> {
        if let (Some(wallet_id), Some(registrar)) = (&self.config.wallet_id, &self.multitenant) {
            registrar.add_key(wallet_id, verkey).await?;
        }
        Ok(())
    }

    /// Resolves the mediation record for `mediation_id`, falling back to the
    /// default mediator when asked to. Any resolved record must be granted.
    async fn mediation_record_if_id(
        &self,
        mediation_id: Option<&str>,
        or_default: bool,
    ) -> DidExchangeResult<Option<MediationRecord>> {
        let record = match mediation_id {
            Some(id) => Some(self.mediator.get_mediator(id).await?),
            None if or_default => self.mediator.get_default_mediator().await?,
            None => None,
        };
        if let Some(record) = &record {
            if record.state != MediationState::Granted {
                return Err(DidExchangeError::from_msg(
                    DidExchangeErrorKind::InvalidState,
                    format!(
                        "Mediation is not granted for mediation record {}",
                        record.mediation_id
                    ),
                ));
            }
        }
        Ok(record)
    }

    fn effective_endpoints(&self, my_endpoint: Option<&Url>) -> Vec<Url> {
        match my_endpoint {
            Some(endpoint) => vec![endpoint.clone()],
            None => {
                let mut endpoints = vec![self.config.default_endpoint.clone()];
                endpoints.extend(self.config.additional_endpoints.iter().cloned());
                endpoints
            }
        }
    }

    async fn send_keylist_update(
        &self,
        updates: Vec<KeylistUpdateItem>,
        mediation_record: &MediationRecord,
    ) -> DidExchangeResult<()> {
        let update = KeylistUpdate::builder()
            .id(Uuid::new_v4().to_string())
            .content(KeylistUpdateContent::builder().updates(updates).build())
            .decorators(KeylistUpdateDecorators::default())
            .build();
        self.responder
            .send(
                update.into(),
                OutboundRoute::to_connection(mediation_record.connection_id.as_str()),
            )
            .await
    }
}
