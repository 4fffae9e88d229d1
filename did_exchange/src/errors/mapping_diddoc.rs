use diddoc::errors::error::{DiddocError, DiddocErrorKind};

use crate::errors::error::{DidExchangeError, DidExchangeErrorKind};

impl From<DiddocErrorKind> for DidExchangeErrorKind {
    fn from(kind: DiddocErrorKind) -> Self {
        match kind {
            DiddocErrorKind::InvalidJson => DidExchangeErrorKind::InvalidJson,
            DiddocErrorKind::InvalidState => DidExchangeErrorKind::InvalidState,
            DiddocErrorKind::InvalidDid => DidExchangeErrorKind::InvalidDid,
            DiddocErrorKind::InvalidVerkey => DidExchangeErrorKind::InvalidVerkey,
            DiddocErrorKind::NotBase58 => DidExchangeErrorKind::NotBase58,
        }
    }
}

impl From<DiddocError> for DidExchangeError {
    fn from(err: DiddocError) -> Self {
        DidExchangeError::from_msg(err.kind().into(), err.msg().to_owned())
    }
}
