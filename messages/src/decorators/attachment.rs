use serde::{Deserialize, Serialize};
use serde_json::Value;
use typed_builder::TypedBuilder;
use url::Url;

use crate::misc::MimeType;

/// Struct representing the `~attach` decorator from its [RFC](<https://github.com/hyperledger/aries-rfcs/blob/main/concepts/0017-attachments/README.md>).
#[derive(Clone, Debug, Deserialize, Serialize, PartialEq, TypedBuilder)]
pub struct Attachment {
    #[builder(default, setter(strip_option))]
    #[serde(rename = "@id")]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[builder(default, setter(strip_option))]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[builder(default, setter(strip_option))]
    #[serde(rename = "mime-type")]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mime_type: Option<MimeType>,
    pub data: AttachmentData,
}

#[derive(Clone, Debug, Deserialize, Serialize, PartialEq, TypedBuilder)]
pub struct AttachmentData {
    #[builder(default, setter(strip_option))]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub jws: Option<Jws>,
    #[builder(default, setter(strip_option))]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sha256: Option<String>,
    #[serde(flatten)]
    pub content: AttachmentType,
}

/// Detached JWS over the attachment payload. The `protected` header and the
/// `signature` are base64url strings; the unprotected header carries the
/// signer's verkey so the signature can be checked without resolving the
/// payload first.
#[derive(Clone, Debug, Deserialize, Serialize, PartialEq, TypedBuilder)]
pub struct Jws {
    pub header: JwsHeader,
    pub protected: String,
    pub signature: String,
}

#[derive(Clone, Debug, Deserialize, Serialize, PartialEq, TypedBuilder)]
pub struct JwsHeader {
    pub kid: String,
}

#[derive(Clone, Debug, Deserialize, Serialize, PartialEq)]
#[serde(rename_all = "lowercase")]
pub enum AttachmentType {
    /// Attachment data encoded as base64.
    Base64(String),
    /// Attachment data provided inline as JSON.
    Json(Value),
    /// Links to binary data hosted elsewhere.
    Links(Vec<Url>),
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
pub mod tests {
    use serde_json::json;

    use super::*;
    use crate::misc::test_utils;

    pub fn make_base64_attachment() -> Attachment {
        Attachment::builder()
            .id("test".to_owned())
            .data(
                AttachmentData::builder()
                    .content(AttachmentType::Base64("eyJkaWQiOiJ0ZXN0In0=".to_owned()))
                    .build(),
            )
            .build()
    }

    #[test]
    fn test_base64_attachment() {
        let attachment = make_base64_attachment();

        let expected = json!({
            "@id": "test",
            "data": {
                "base64": "eyJkaWQiOiJ0ZXN0In0="
            }
        });

        test_utils::test_serde(attachment, expected);
    }

    #[test]
    fn test_signed_attachment() {
        let jws = Jws::builder()
            .header(JwsHeader::builder().kid("3Dn1SJNPaCXcvvJvSbsFWP2xaCjMom3can8CQNhWrTRx".to_owned()).build())
            .protected("eyJhbGciOiJFZERTQSJ9".to_owned())
            .signature("c2lnbmF0dXJl".to_owned())
            .build();

        let attachment = Attachment::builder()
            .mime_type(MimeType::Json)
            .data(
                AttachmentData::builder()
                    .jws(jws)
                    .content(AttachmentType::Base64("eyJkaWQiOiJ0ZXN0In0=".to_owned()))
                    .build(),
            )
            .build();

        let expected = json!({
            "mime-type": "application/json",
            "data": {
                "jws": {
                    "header": { "kid": "3Dn1SJNPaCXcvvJvSbsFWP2xaCjMom3can8CQNhWrTRx" },
                    "protected": "eyJhbGciOiJFZERTQSJ9",
                    "signature": "c2lnbmF0dXJl"
                },
                "base64": "eyJkaWQiOiJ0ZXN0In0="
            }
        });

        test_utils::test_serde(attachment, expected);
    }

    #[test]
    fn test_json_attachment() {
        let attachment = Attachment::builder()
            .data(
                AttachmentData::builder()
                    .content(AttachmentType::Json(json!({"did": "test"})))
                    .build(),
            )
            .build();

        let expected = json!({
            "data": {
                "json": { "did": "test" }
            }
        });

        test_utils::test_serde(attachment, expected);
    }
}
