use std::fmt;

pub mod prelude {
    pub use super::{err_msg, DiddocError, DiddocErrorKind, DiddocResult};
}

#[derive(Copy, Clone, Eq, PartialEq, Debug, thiserror::Error)]
pub enum DiddocErrorKind {
    #[error("Invalid JSON string")]
    InvalidJson,
    #[error("Object is in invalid state for requested operation")]
    InvalidState,
    #[error("Invalid DID")]
    InvalidDid,
    #[error("Invalid VERKEY")]
    InvalidVerkey,
    #[error("Value needs to be base58")]
    NotBase58,
}

#[derive(thiserror::Error)]
pub struct DiddocError {
    msg: String,
    kind: DiddocErrorKind,
}

impl fmt::Display for DiddocError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Error: {}", self.msg())
    }
}

impl fmt::Debug for DiddocError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{self}")
    }
}

impl DiddocError {
    pub fn from_msg<D>(kind: DiddocErrorKind, msg: D) -> DiddocError
    where
        D: fmt::Display + fmt::Debug + Send + Sync + 'static,
    {
        DiddocError {
            msg: msg.to_string(),
            kind,
        }
    }

    pub fn kind(&self) -> DiddocErrorKind {
        self.kind
    }

    pub fn msg(&self) -> &str {
        &self.msg
    }
}

pub fn err_msg<D>(kind: DiddocErrorKind, msg: D) -> DiddocError
where
    D: fmt::Display + fmt::Debug + Send + Sync + 'static,
{
    DiddocError::from_msg(kind, msg)
}

pub type DiddocResult<T> = Result<T, DiddocError>;
