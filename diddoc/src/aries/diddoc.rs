use url::Url;

use crate::{
    aries::service::AriesService,
    errors::error::{DiddocError, DiddocErrorKind, DiddocResult},
    validation::validate_verkey,
    w3c::model::{
        Authentication, DdoKeyReference, Ed25519PublicKey, CONTEXT, KEY_AUTHENTICATION_TYPE,
        KEY_TYPE,
    },
};

#[derive(Debug, Deserialize, Serialize, PartialEq, Clone)]
pub struct AriesDidDoc {
    #[serde(rename = "@context")]
    pub context: String,
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    #[serde(rename = "publicKey")]
    pub public_key: Vec<Ed25519PublicKey>,
    #[serde(default)]
    pub authentication: Vec<Authentication>,
    pub service: Vec<AriesService>,
}

impl Default for AriesDidDoc {
    fn default() -> AriesDidDoc {
        AriesDidDoc {
            context: String::from(CONTEXT),
            id: String::new(),
            public_key: vec![],
            authentication: vec![],
            service: vec![AriesService::default()],
        }
    }
}

impl AriesDidDoc {
    pub fn set_id(&mut self, id: String) {
        self.id = id;
    }

    pub fn set_service_endpoint(&mut self, service_endpoint: Url) {
        if let Some(service) = self.service.get_mut(0) {
            service.service_endpoint = service_endpoint;
        }
    }

    /// Registers the given base58 keys as recipient keys of the primary service.
    /// Each key is added to `publicKey` under a `did#N` reference and linked
    /// through an `authentication` entry.
    pub fn set_recipient_keys(&mut self, recipient_keys: Vec<String>) {
        for (index, key_in_base58) in recipient_keys.into_iter().enumerate() {
            let key_reference =
                AriesDidDoc::build_key_reference(&self.id, &(index + 1).to_string());

            self.public_key.push(Ed25519PublicKey {
                id: key_reference.clone(),
                type_: String::from(KEY_TYPE),
                controller: self.id.clone(),
                public_key_base_58: key_in_base58.clone(),
            });

            self.authentication.push(Authentication {
                type_: String::from(KEY_AUTHENTICATION_TYPE),
                public_key: key_reference,
            });

            if let Some(service) = self.service.get_mut(0) {
                service.recipient_keys.push(key_in_base58);
            }
        }
    }

    /// Routing keys are carried by value on the primary service, never as
    /// references into `publicKey`.
    pub fn set_routing_keys(&mut self, routing_keys: Vec<String>) {
        if let Some(service) = self.service.get_mut(0) {
            service.routing_keys.extend(routing_keys);
        }
    }

    pub fn validate(&self) -> DiddocResult<()> {
        if self.context != CONTEXT {
            return Err(DiddocError::from_msg(
                DiddocErrorKind::InvalidJson,
                format!(
                    "DIDDoc validation failed: Unsupported @context value: {:?}",
                    self.context
                ),
            ));
        }

        if self.id.is_empty() {
            return Err(DiddocError::from_msg(
                DiddocErrorKind::InvalidJson,
                "DIDDoc validation failed: id is empty",
            ));
        }

        for service in &self.service {
            for recipient_key_entry in &service.recipient_keys {
                let public_key = self.get_key(recipient_key_entry)?;
                self.is_authentication_key(&public_key.id)?;
            }

            for routing_key_entry in &service.routing_keys {
                validate_verkey(routing_key_entry)?;
            }
        }

        Ok(())
    }

    /// Recipient keys of the primary service, resolved to base58 values.
    pub fn recipient_keys(&self) -> DiddocResult<Vec<String>> {
        match self.service.first() {
            Some(service) => self.resolve_service_keys(service),
            None => Ok(Vec::new()),
        }
    }

    /// Resolves the recipient key entries of the given service to base58
    /// values, whether inlined or referenced through `publicKey`.
    pub fn resolve_service_keys(&self, service: &AriesService) -> DiddocResult<Vec<String>> {
        service
            .recipient_keys
            .iter()
            .map(|key_entry| {
                self.get_key(key_entry)
                    .map(|key_record| key_record.public_key_base_58)
            })
            .collect()
    }

    pub fn routing_keys(&self) -> Vec<String> {
        self.service
            .first()
            .map(|service| service.routing_keys.clone())
            .unwrap_or_default()
    }

    pub fn get_endpoint(&self) -> Option<Url> {
        self.service.first().map(|s| s.service_endpoint.clone())
    }

    /// Primary service with its recipient keys resolved to base58 values.
    pub fn get_service(&self) -> DiddocResult<AriesService> {
        let service = self.service.first().ok_or_else(|| {
            DiddocError::from_msg(
                DiddocErrorKind::InvalidState,
                format!("No service found on did doc: {self:?}"),
            )
        })?;
        let recipient_keys = self.recipient_keys()?;
        let routing_keys = self.routing_keys();
        Ok(AriesService {
            recipient_keys,
            routing_keys,
            ..service.clone()
        })
    }

    fn get_key(&self, key_value_or_reference: &str) -> DiddocResult<Ed25519PublicKey> {
        let public_key = match validate_verkey(key_value_or_reference) {
            Ok(key) => self.find_key_by_value(key),
            Err(_) => {
                let key_ref = AriesDidDoc::parse_key_reference(key_value_or_reference)?;
                self.find_key_by_reference(&key_ref)
            }
        }?;
        Self::validate_ed25519_key(&public_key)?;
        Ok(public_key)
    }

    fn validate_ed25519_key(public_key: &Ed25519PublicKey) -> DiddocResult<()> {
        if public_key.type_ != KEY_TYPE {
            return Err(DiddocError::from_msg(
                DiddocErrorKind::InvalidJson,
                format!(
                    "DIDDoc validation failed: Unsupported PublicKey type: {:?}",
                    public_key.type_
                ),
            ));
        }
        validate_verkey(&public_key.public_key_base_58)?;
        Ok(())
    }

    fn find_key_by_reference(&self, key_ref: &DdoKeyReference) -> DiddocResult<Ed25519PublicKey> {
        self.public_key
            .iter()
            .find(|ddo_key| match &key_ref.did {
                None => ddo_key.id == key_ref.key_id,
                Some(did) => {
                    ddo_key.id == key_ref.key_id
                        || ddo_key.id == format!("{}#{}", did, key_ref.key_id)
                }
            })
            .cloned()
            .ok_or_else(|| {
                DiddocError::from_msg(
                    DiddocErrorKind::InvalidJson,
                    format!("Failed to find entry in public_key by key reference: {key_ref:?}"),
                )
            })
    }

    fn find_key_by_value(&self, key: &str) -> DiddocResult<Ed25519PublicKey> {
        self.public_key
            .iter()
            .find(|ddo_key| ddo_key.public_key_base_58 == key)
            .cloned()
            .ok_or_else(|| {
                DiddocError::from_msg(
                    DiddocErrorKind::InvalidJson,
                    format!("Failed to find entry in public_key by key value: {key}"),
                )
            })
    }

    fn is_authentication_key(&self, key: &str) -> DiddocResult<()> {
        if self.authentication.is_empty() {
            // Legacy documents may omit authentication entries entirely.
            return Ok(());
        }
        let authentication_key = self
            .authentication
            .iter()
            .find(|auth_key| {
                if auth_key.public_key == key {
                    return true;
                }
                match AriesDidDoc::parse_key_reference(&auth_key.public_key) {
                    Ok(auth_public_key_ref) => auth_public_key_ref.key_id == key,
                    Err(_) => false,
                }
            })
            .ok_or_else(|| {
                DiddocError::from_msg(
                    DiddocErrorKind::InvalidJson,
                    format!(
                        "DIDDoc validation failed: Cannot find Authentication record key: {key:?}"
                    ),
                )
            })?;

        if authentication_key.type_ != KEY_AUTHENTICATION_TYPE
            && authentication_key.type_ != KEY_TYPE
        {
            return Err(DiddocError::from_msg(
                DiddocErrorKind::InvalidJson,
                format!(
                    "DIDDoc validation failed: Unsupported Authentication type: {:?}",
                    authentication_key.type_
                ),
            ));
        }

        Ok(())
    }

    fn build_key_reference(did: &str, id: &str) -> String {
        format!("{did}#{id}")
    }

    fn parse_key_reference(key_reference: &str) -> DiddocResult<DdoKeyReference> {
        match key_reference.split_once('#') {
            Some((did, key_id)) => Ok(DdoKeyReference {
                did: Some(did.to_string()),
                key_id: key_id.to_string(),
            }),
            None if key_reference.is_empty() => Err(DiddocError::from_msg(
                DiddocErrorKind::InvalidJson,
                format!("DIDDoc validation failed: Invalid key reference: {key_reference:?}"),
            )),
            None => Ok(DdoKeyReference {
                did: None,
                key_id: key_reference.to_string(),
            }),
        }
    }
}

pub mod test_utils {
    use url::Url;

    use crate::{
        aries::{diddoc::AriesDidDoc, service::AriesService},
        w3c::model::{
            Authentication, DdoKeyReference, Ed25519PublicKey, CONTEXT, KEY_AUTHENTICATION_TYPE,
            KEY_TYPE,
        },
    };

    pub fn _key_1() -> String {
        String::from("3Dn1SJNPaCXcvvJvSbsFWP2xaCjMom3can8CQNhWrTRx")
    }

    pub fn _key_2() -> String {
        String::from("9WCgWKUaAJj3VWxxtzvvMQN3AoFxoBtBDo9ntwJnVVCC")
    }

    pub fn _key_3() -> String {
        String::from("3LYuxJBJkngDbvJj4zjx13DBUdZ2P96eNybwd2n9L9AU")
    }

    pub fn _did() -> String {
        String::from("55GkHamhTU1ZbTbV2ab9DE")
    }

    pub fn _service_endpoint() -> Url {
        "http://localhost:8080".parse().expect("valid url")
    }

    pub fn _recipient_keys() -> Vec<String> {
        vec![_key_1()]
    }

    pub fn _routing_keys() -> Vec<String> {
        vec![_key_2(), _key_3()]
    }

    pub fn _routing_keys_1() -> Vec<String> {
        vec![_key_1(), _key_3()]
    }

    pub fn _key_reference_1() -> String {
        AriesDidDoc::build_key_reference(&_did(), "1")
    }

    pub fn _key_reference_full_1_typed() -> DdoKeyReference {
        DdoKeyReference {
            did: Some(_did()),
            key_id: "1".to_string(),
        }
    }

    pub fn _key_reference_2() -> String {
        AriesDidDoc::build_key_reference(&_did(), "2")
    }

    pub fn _key_reference_3() -> String {
        AriesDidDoc::build_key_reference(&_did(), "3")
    }

    /// Document in the oldest observed shape: bare numeric `publicKey` ids,
    /// recipient keys given as full references.
    pub fn _did_doc_bare_key_ids() -> AriesDidDoc {
        AriesDidDoc {
            context: String::from(CONTEXT),
            id: _did(),
            public_key: vec![Ed25519PublicKey {
                id: "1".to_string(),
                type_: KEY_TYPE.to_string(),
                controller: _did(),
                public_key_base_58: _key_1(),
            }],
            authentication: vec![Authentication {
                type_: KEY_AUTHENTICATION_TYPE.to_string(),
                public_key: _key_reference_1(),
            }],
            service: vec![AriesService {
                service_endpoint: _service_endpoint(),
                recipient_keys: vec![_key_reference_1()],
                routing_keys: vec![_key_2(), _key_3()],
                ..Default::default()
            }],
        }
    }

    pub fn _did_doc_inlined_recipient_keys() -> AriesDidDoc {
        AriesDidDoc {
            context: String::from(CONTEXT),
            id: _did(),
            public_key: vec![Ed25519PublicKey {
                id: _key_reference_1(),
                type_: KEY_TYPE.to_string(),
                controller: _did(),
                public_key_base_58: _key_1(),
            }],
            authentication: vec![Authentication {
                type_: KEY_AUTHENTICATION_TYPE.to_string(),
                public_key: _key_reference_1(),
            }],
            service: vec![AriesService {
                service_endpoint: _service_endpoint(),
                recipient_keys: vec![_key_1()],
                routing_keys: vec![_key_2(), _key_3()],
                ..Default::default()
            }],
        }
    }

    pub fn _did_doc_recipient_keys_by_value() -> AriesDidDoc {
        AriesDidDoc {
            context: String::from(CONTEXT),
            id: _did(),
            public_key: vec![
                Ed25519PublicKey {
                    id: _key_reference_1(),
                    type_: KEY_TYPE.to_string(),
                    controller: _did(),
                    public_key_base_58: _key_1(),
                },
                Ed25519PublicKey {
                    id: _key_reference_2(),
                    type_: KEY_TYPE.to_string(),
                    controller: _did(),
                    public_key_base_58: _key_2(),
                },
                Ed25519PublicKey {
                    id: _key_reference_3(),
                    type_: KEY_TYPE.to_string(),
                    controller: _did(),
                    public_key_base_58: _key_3(),
                },
            ],
            authentication: vec![Authentication {
                type_: KEY_AUTHENTICATION_TYPE.to_string(),
                public_key: _key_reference_1(),
            }],
            service: vec![AriesService {
                service_endpoint: _service_endpoint(),
                recipient_keys: vec![_key_1()],
                routing_keys: vec![_key_2(), _key_3()],
                ..Default::default()
            }],
        }
    }

    pub fn _did_doc_empty_routing() -> AriesDidDoc {
        AriesDidDoc {
            context: String::from(CONTEXT),
            id: _did(),
            public_key: vec![Ed25519PublicKey {
                id: _key_1(),
                type_: KEY_TYPE.to_string(),
                controller: _did(),
                public_key_base_58: _key_1(),
            }],
            authentication: vec![Authentication {
                type_: KEY_AUTHENTICATION_TYPE.to_string(),
                public_key: _key_1(),
            }],
            service: vec![AriesService {
                service_endpoint: _service_endpoint(),
                recipient_keys: vec![_key_1()],
                routing_keys: vec![],
                ..Default::default()
            }],
        }
    }
}

#[cfg(test)]
mod unit_tests {
    use serde_json::json;

    use crate::aries::diddoc::{test_utils::*, AriesDidDoc};

    #[test]
    fn test_did_doc_build_works() {
        let mut did_doc: AriesDidDoc = AriesDidDoc::default();
        did_doc.set_id(_did());
        did_doc.set_service_endpoint(_service_endpoint());
        did_doc.set_recipient_keys(_recipient_keys());
        did_doc.set_routing_keys(_routing_keys());

        assert_eq!(_did_doc_inlined_recipient_keys(), did_doc);
    }

    #[test]
    fn test_did_doc_validate_works() {
        _did_doc_bare_key_ids().validate().unwrap();
        _did_doc_inlined_recipient_keys().validate().unwrap();
        _did_doc_recipient_keys_by_value().validate().unwrap();
        _did_doc_empty_routing().validate().unwrap();
    }

    #[test]
    fn test_did_doc_key_for_reference_works() {
        let ddo = _did_doc_bare_key_ids();
        let key_resolved = ddo
            .find_key_by_reference(&_key_reference_full_1_typed())
            .unwrap();
        assert_eq!(_key_1(), key_resolved.public_key_base_58);
    }

    #[test]
    fn test_did_doc_resolve_recipient_key_by_reference_works() {
        let ddo: AriesDidDoc = serde_json::from_value(json!({
            "@context": "https://w3id.org/did/v1",
            "id": "testid",
            "publicKey": [
                {
                    "id": "testid#1",
                    "type": "Ed25519VerificationKey2018",
                    "controller": "testid",
                    "publicKeyBase58": "3Dn1SJNPaCXcvvJvSbsFWP2xaCjMom3can8CQNhWrTRx"
                }
            ],
            "authentication": [
                {
                    "type": "Ed25519SignatureAuthentication2018",
                    "publicKey": "testid#1"
                }
            ],
            "service": [
                {
                    "id": "did:example:123456789abcdefghi;indy",
                    "type": "IndyAgent",
                    "priority": 0,
                    "recipientKeys": [
                        "testid#1"
                    ],
                    "routingKeys": [
                        "9WCgWKUaAJj3VWxxtzvvMQN3AoFxoBtBDo9ntwJnVVCC",
                        "3LYuxJBJkngDbvJj4zjx13DBUdZ2P96eNybwd2n9L9AU"
                    ],
                    "serviceEndpoint": "http://localhost:8080"
                }
            ]
        }))
        .unwrap();
        assert_eq!(_recipient_keys(), ddo.recipient_keys().unwrap());
    }

    #[test]
    fn test_did_doc_resolve_recipient_keys_works() {
        let recipient_keys = _did_doc_bare_key_ids().recipient_keys().unwrap();
        assert_eq!(_recipient_keys(), recipient_keys);

        let recipient_keys = _did_doc_recipient_keys_by_value().recipient_keys().unwrap();
        assert_eq!(_recipient_keys(), recipient_keys);
    }

    #[test]
    fn test_did_doc_resolve_service_keys_works() {
        let ddo = _did_doc_recipient_keys_by_value();
        let service = ddo.service.first().unwrap();
        assert_eq!(_recipient_keys(), ddo.resolve_service_keys(service).unwrap());
    }

    #[test]
    fn test_did_doc_resolve_routing_keys_works() {
        let routing_keys = _did_doc_bare_key_ids().routing_keys();
        assert_eq!(_routing_keys(), routing_keys);

        let routing_keys = _did_doc_recipient_keys_by_value().routing_keys();
        assert_eq!(_routing_keys(), routing_keys);
    }

    #[test]
    fn test_did_doc_serialization() {
        let ddo = _did_doc_bare_key_ids();
        let ddo_value = serde_json::to_value(ddo).unwrap();
        let expected_value = json!({
            "@context": "https://w3id.org/did/v1",
            "id": "55GkHamhTU1ZbTbV2ab9DE",
            "publicKey": [
                {
                    "id": "1",
                    "type": "Ed25519VerificationKey2018",
                    "controller": "55GkHamhTU1ZbTbV2ab9DE",
                    "publicKeyBase58": "3Dn1SJNPaCXcvvJvSbsFWP2xaCjMom3can8CQNhWrTRx"
                }
            ],
            "authentication": [
                {
                    "type": "Ed25519SignatureAuthentication2018",
                    "publicKey": "55GkHamhTU1ZbTbV2ab9DE#1"
                }
            ],
            "service": [
                {
                    "id": "did:example:123456789abcdefghi;indy",
                    "type": "IndyAgent",
                    "priority": 0,
                    "recipientKeys": [
                        "55GkHamhTU1ZbTbV2ab9DE#1"
                    ],
                    "routingKeys": [
                        "9WCgWKUaAJj3VWxxtzvvMQN3AoFxoBtBDo9ntwJnVVCC",
                        "3LYuxJBJkngDbvJj4zjx13DBUdZ2P96eNybwd2n9L9AU"
                    ],
                    "serviceEndpoint": "http://localhost:8080/"
                }
            ]
        });
        assert_eq!(expected_value, ddo_value);
    }

    #[test]
    fn test_did_doc_build_key_reference_works() {
        assert_eq!(
            _key_reference_1(),
            AriesDidDoc::build_key_reference(&_did(), "1")
        );
    }

    #[test]
    fn test_did_doc_parse_key_reference_works() {
        assert_eq!(
            _key_reference_full_1_typed(),
            AriesDidDoc::parse_key_reference(&_key_reference_1()).unwrap()
        );
    }
}
