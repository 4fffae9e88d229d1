use base64::Engine;
use messages::decorators::attachment::{
    Attachment, AttachmentData, AttachmentType, Jws, JwsHeader,
};
use serde::Serialize;
use serde_json::json;

use crate::{
    errors::error::{DidExchangeError, DidExchangeErrorKind, DidExchangeResult},
    utils::base64::URL_SAFE_LENIENT,
    wallet::BaseWallet,
};

/// Serializes the value into a base64-encoded attachment.
pub fn base64_attachment<T: Serialize>(value: &T) -> DidExchangeResult<Attachment> {
    let content_b64 = URL_SAFE_LENIENT.encode(serde_json::to_string(value)?);
    Ok(Attachment::builder()
        .data(
            AttachmentData::builder()
                .content(AttachmentType::Base64(content_b64))
                .build(),
        )
        .build())
}

/// Raw bytes of the attachment payload, whatever its encoding.
pub fn attachment_content(attachment: &Attachment) -> DidExchangeResult<Vec<u8>> {
    match &attachment.data.content {
        AttachmentType::Json(value) => Ok(serde_json::to_vec(value)?),
        AttachmentType::Base64(encoded) => URL_SAFE_LENIENT.decode(encoded).map_err(|err| {
            DidExchangeError::from_msg(
                DidExchangeErrorKind::EncodeError,
                format!("Attachment base64 decoding failed: {err}"),
            )
        }),
        AttachmentType::Links(_) => Err(DidExchangeError::from_msg(
            DidExchangeErrorKind::InvalidJson,
            "Attachment is not a JSON or Base64",
        )),
    }
}

/// Attaches a detached JWS over the base64 payload, signed with `verkey`.
/// The signing input is `<b64(protected)>.<b64(payload)>` per RFC 7515.
pub async fn jws_sign_attachment(
    mut attachment: Attachment,
    verkey: &str,
    wallet: &dyn BaseWallet,
) -> DidExchangeResult<Attachment> {
    let AttachmentType::Base64(payload_b64) = &attachment.data.content else {
        return Err(DidExchangeError::from_msg(
            DidExchangeErrorKind::InvalidState,
            "Cannot sign a non base64-encoded attachment",
        ));
    };

    let protected_header = json!({
        "alg": "EdDSA",
        "kid": verkey,
    });
    let b64_protected = URL_SAFE_LENIENT.encode(protected_header.to_string());
    let sign_input = format!("{b64_protected}.{payload_b64}").into_bytes();
    let signed = wallet.sign(verkey, &sign_input).await?;

    let jws = Jws::builder()
        .header(JwsHeader::builder().kid(verkey.to_owned()).build())
        .protected(b64_protected)
        .signature(URL_SAFE_LENIENT.encode(signed))
        .build();
    attachment.data.jws = Some(jws);
    Ok(attachment)
}

/// Checks the attachment's detached JWS. The signer's verkey is taken from
/// the JWS header; when `expected_signer` is given, a header naming any
/// other key fails verification without touching the wallet.
pub async fn jws_verify_attachment(
    attachment: &Attachment,
    expected_signer: Option<&str>,
    wallet: &dyn BaseWallet,
) -> DidExchangeResult<bool> {
    let Some(jws) = &attachment.data.jws else {
        return Ok(false);
    };
    if let Some(expected) = expected_signer {
        if jws.header.kid != expected {
            return Ok(false);
        }
    }
    let AttachmentType::Base64(payload_b64) = &attachment.data.content else {
        return Err(DidExchangeError::from_msg(
            DidExchangeErrorKind::InvalidState,
            "Cannot verify a non base64-encoded attachment",
        ));
    };

    let sign_input = format!("{}.{}", jws.protected, payload_b64).into_bytes();
    let signature = URL_SAFE_LENIENT.decode(&jws.signature).map_err(|err| {
        DidExchangeError::from_msg(
            DidExchangeErrorKind::EncodeError,
            format!("JWS signature base64 decoding failed: {err}"),
        )
    })?;
    wallet.verify(&jws.header.kid, &sign_input, &signature).await
}

#[cfg(test)]
mod unit_tests {
    use serde_json::json;

    use super::*;
    use crate::wallet::in_memory::InMemoryWallet;

    #[tokio::test]
    async fn test_attachment_content_roundtrip() {
        let value = json!({"did": "55GkHamhTU1ZbTbV2ab9DE"});

        let attachment = base64_attachment(&value).unwrap();
        let content = attachment_content(&attachment).unwrap();
        let decoded: serde_json::Value = serde_json::from_slice(&content).unwrap();
        assert_eq!(decoded, value);
    }

    #[tokio::test]
    async fn test_links_attachment_has_no_content() {
        let attachment = Attachment::builder()
            .data(
                AttachmentData::builder()
                    .content(AttachmentType::Links(vec![
                        "https://example.org/doc".parse().unwrap()
                    ]))
                    .build(),
            )
            .build();

        let err = attachment_content(&attachment).unwrap_err();
        assert_eq!(err.kind(), DidExchangeErrorKind::InvalidJson);
    }

    #[tokio::test]
    async fn test_sign_and_verify_attachment() {
        let wallet = InMemoryWallet::new();
        let did_data = wallet.create_and_store_public_did(None).unwrap();

        let attachment = base64_attachment(&json!({"did": "test"})).unwrap();
        let signed = jws_sign_attachment(attachment, did_data.verkey(), &wallet)
            .await
            .unwrap();

        assert!(jws_verify_attachment(&signed, None, &wallet).await.unwrap());
        assert!(
            jws_verify_attachment(&signed, Some(did_data.verkey()), &wallet)
                .await
                .unwrap()
        );
        assert!(!jws_verify_attachment(&signed, Some("other-key"), &wallet)
            .await
            .unwrap());
    }

    #[tokio::test]
    async fn test_tampered_payload_fails_verification() {
        let wallet = InMemoryWallet::new();
        let did_data = wallet.create_and_store_public_did(None).unwrap();

        let attachment = base64_attachment(&json!({"did": "test"})).unwrap();
        let mut signed = jws_sign_attachment(attachment, did_data.verkey(), &wallet)
            .await
            .unwrap();
        signed.data.content =
            AttachmentType::Base64(URL_SAFE_LENIENT.encode("{\"did\":\"evil\"}"));

        assert!(!jws_verify_attachment(&signed, None, &wallet).await.unwrap());
    }

    #[tokio::test]
    async fn test_unsigned_attachment_fails_verification() {
        let wallet = InMemoryWallet::new();
        let attachment = base64_attachment(&json!({"did": "test"})).unwrap();
        assert!(!jws_verify_attachment(&attachment, None, &wallet)
            .await
            .unwrap());
    }
}
