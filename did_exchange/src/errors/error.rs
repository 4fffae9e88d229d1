use std::{error::Error, fmt};

pub mod prelude {
    pub use super::{err_msg, DidExchangeError, DidExchangeErrorKind, DidExchangeResult};
}

#[derive(Copy, Clone, Eq, PartialEq, Debug, thiserror::Error)]
pub enum DidExchangeErrorKind {
    // Common
    #[error("Object is in invalid state for requested operation")]
    InvalidState,
    #[error("Invalid Configuration")]
    InvalidConfiguration,
    #[error("Authentication error")]
    AuthenticationError,
    #[error("Invalid JSON string")]
    InvalidJson,
    #[error("Invalid input parameter")]
    InvalidInput,
    #[error("Object not found")]
    NotFound,
    #[error("Could not encode or decode value")]
    EncodeError,

    // Validation
    #[error("Invalid DID")]
    InvalidDid,
    #[error("Invalid VERKEY")]
    InvalidVerkey,
    #[error("Value needs to be base58")]
    NotBase58,

    // Backends
    #[error("Wallet error")]
    WalletError,
    #[error("Unable to lock storage")]
    LockError,
}

#[derive(thiserror::Error)]
pub struct DidExchangeError {
    msg: String,
    kind: DidExchangeErrorKind,
}

impl fmt::Display for DidExchangeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Error: {}", self.msg())?;
        let mut current = self.source();
        while let Some(cause) = current {
            writeln!(f, "Caused by:\n{cause}")?;
            current = cause.source();
        }
        Ok(())
    }
}

impl fmt::Debug for DidExchangeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(self, f)
    }
}

impl DidExchangeError {
    pub fn from_msg<D>(kind: DidExchangeErrorKind, msg: D) -> DidExchangeError
    where
        D: fmt::Display,
    {
        DidExchangeError {
            msg: msg.to_string(),
            kind,
        }
    }

    pub fn kind(&self) -> DidExchangeErrorKind {
        self.kind
    }

    pub fn msg(&self) -> &str {
        &self.msg
    }
}

pub fn err_msg<D>(kind: DidExchangeErrorKind, msg: D) -> DidExchangeError
where
    D: fmt::Display,
{
    DidExchangeError::from_msg(kind, msg)
}

pub type DidExchangeResult<T> = Result<T, DidExchangeError>;
