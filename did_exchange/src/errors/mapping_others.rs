use crate::errors::error::{DidExchangeError, DidExchangeErrorKind};

impl From<serde_json::Error> for DidExchangeError {
    fn from(err: serde_json::Error) -> Self {
        DidExchangeError::from_msg(
            DidExchangeErrorKind::InvalidJson,
            format!("Invalid json: {err}"),
        )
    }
}
