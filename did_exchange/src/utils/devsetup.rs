//! Mocks and fixtures shared by the unit and integration tests.

use std::{
    collections::HashMap,
    sync::{Arc, Mutex, PoisonError},
};

use async_trait::async_trait;
use diddoc::aries::service::AriesService;
use messages::{
    misc::NoContent,
    msg_fields::protocols::{
        coordinate_mediation::mediate_request::MediateRequest,
        out_of_band::{
            invitation::{Invitation, InvitationContent, InvitationDecorators},
            OobService,
        },
    },
    AriesMessage,
};
use uuid::Uuid;

use crate::{
    errors::error::{DidExchangeError, DidExchangeErrorKind, DidExchangeResult},
    manager::{DidExchangeManager, ManagerConfig},
    mediation::BaseMediator,
    multitenant::MultitenantRegistrar,
    records::mediation::{MediationRecord, MediationState},
    responder::{BaseResponder, OutboundRoute},
    storage::in_memory::InMemoryStorage,
    wallet::in_memory::InMemoryWallet,
};

pub const TEST_ENDPOINT: &str = "http://aries.ca/endpoint";
pub const TEST_LABEL: &str = "This guy";
pub const TEST_SEED: &str = "testseed000000000000000000000001";
pub const TEST_MEDIATOR_CONN_ID: &str = "mediator-conn-id";
pub const TEST_MEDIATOR_ENDPOINT: &str = "http://mediator.example.com";
pub const TEST_MEDIATOR_ROUTING_KEY: &str = "3LYuxJBJkngDbvJj4zjx13DBUdZ2P96eNybwd2n9L9AU";

pub fn init_test_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}

pub fn test_config() -> ManagerConfig {
    ManagerConfig::builder()
        .default_endpoint(TEST_ENDPOINT.parse().expect("valid url"))
        .default_label(TEST_LABEL.to_owned())
        .build()
}

/// Out-of-band invitation with a single inline service block.
pub fn test_invitation(recipient_key: &str) -> Invitation {
    let service = AriesService::create()
        .set_id("#inline".to_owned())
        .set_service_endpoint(TEST_ENDPOINT.parse().expect("valid url"))
        .set_recipient_keys(vec![recipient_key.to_owned()]);

    Invitation::builder()
        .id(Uuid::new_v4().to_string())
        .content(
            InvitationContent::builder()
                .label(TEST_LABEL.to_owned())
                .handshake_protocols(vec!["https://didcomm.org/didexchange/1.0".to_owned()])
                .services(vec![OobService::AriesService(service)])
                .build(),
        )
        .decorators(InvitationDecorators::default())
        .build()
}

/// Captures outbound messages instead of delivering them.
#[derive(Default)]
pub struct MockResponder {
    messages: Mutex<Vec<(AriesMessage, OutboundRoute)>>,
}

impl MockResponder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn messages(&self) -> Vec<(AriesMessage, OutboundRoute)> {
        self.messages
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }
}

#[async_trait]
impl BaseResponder for MockResponder {
    async fn send(&self, message: AriesMessage, route: OutboundRoute) -> DidExchangeResult<()> {
        self.messages
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push((message, route));
        Ok(())
    }
}

/// Serves mediation records from a map, with an optional default.
#[derive(Default)]
pub struct MockMediator {
    records: Mutex<HashMap<String, MediationRecord>>,
    default_id: Mutex<Option<String>>,
}

impl MockMediator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&self, record: MediationRecord) {
        self.records
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(record.mediation_id.clone(), record);
    }

    pub fn set_default(&self, mediation_id: &str) {
        *self
            .default_id
            .lock()
            .unwrap_or_else(PoisonError::into_inner) = Some(mediation_id.to_owned());
    }

    /// Granted record pointing at the standing test mediator.
    pub fn granted_record() -> MediationRecord {
        MediationRecord::builder()
            .state(MediationState::Granted)
            .connection_id(TEST_MEDIATOR_CONN_ID.to_owned())
            .routing_keys(vec![TEST_MEDIATOR_ROUTING_KEY.to_owned()])
            .endpoint(Some(TEST_MEDIATOR_ENDPOINT.parse().expect("valid url")))
            .build()
    }
}

#[async_trait]
impl BaseMediator for MockMediator {
    async fn get_default_mediator(&self) -> DidExchangeResult<Option<MediationRecord>> {
        let default_id = self
            .default_id
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone();
        Ok(default_id.and_then(|id| {
            self.records
                .lock()
                .unwrap_or_else(PoisonError::into_inner)
                .get(&id)
                .cloned()
        }))
    }

    async fn get_mediator(&self, mediation_id: &str) -> DidExchangeResult<MediationRecord> {
        self.records
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .get(mediation_id)
            .cloned()
            .ok_or_else(|| {
                DidExchangeError::from_msg(
                    DidExchangeErrorKind::NotFound,
                    format!("No mediation record found for id: {mediation_id}"),
                )
            })
    }

    async fn prepare_request(
        &self,
        connection_id: &str,
    ) -> DidExchangeResult<(MediationRecord, MediateRequest)> {
        let record = MediationRecord::builder()
            .state(MediationState::Requested)
            .connection_id(connection_id.to_owned())
            .build();
        let request = MediateRequest::builder()
            .id(Uuid::new_v4().to_string())
            .content(NoContent)
            .build();
        self.insert(record.clone());
        Ok((record, request))
    }
}

/// Records relay key registrations instead of forwarding them.
#[derive(Default)]
pub struct MockRegistrar {
    keys: Mutex<Vec<(String, String)>>,
}

impl MockRegistrar {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn keys(&self) -> Vec<(String, String)> {
        self.keys
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }
}

#[async_trait]
impl MultitenantRegistrar for MockRegistrar {
    async fn add_key(&self, wallet_id: &str, verkey: &str) -> DidExchangeResult<()> {
        self.keys
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push((wallet_id.to_owned(), verkey.to_owned()));
        Ok(())
    }
}

/// Fully wired manager over in-memory backends and mocks.
pub struct TestAgent {
    pub wallet: Arc<InMemoryWallet>,
    pub storage: Arc<InMemoryStorage>,
    pub responder: Arc<MockResponder>,
    pub mediator: Arc<MockMediator>,
    pub manager: DidExchangeManager,
}

pub fn build_test_agent() -> TestAgent {
    build_test_agent_with(test_config(), None)
}

pub fn build_test_agent_with(
    config: ManagerConfig,
    registrar: Option<Arc<MockRegistrar>>,
) -> TestAgent {
    init_test_logging();
    let wallet = Arc::new(InMemoryWallet::new());
    let storage = Arc::new(InMemoryStorage::new());
    let responder = Arc::new(MockResponder::new());
    let mediator = Arc::new(MockMediator::new());
    let manager = DidExchangeManager::new(
        wallet.clone(),
        storage.clone(),
        responder.clone(),
        mediator.clone(),
        registrar.map(|registrar| registrar as Arc<dyn MultitenantRegistrar>),
        config,
    );
    TestAgent {
        wallet,
        storage,
        responder,
        mediator,
        manager,
    }
}
