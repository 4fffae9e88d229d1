use crate::errors::error::{DiddocError, DiddocErrorKind, DiddocResult};

/// Base58-decodes a verkey and checks it is exactly 32 bytes long.
pub fn validate_verkey(verkey: &str) -> DiddocResult<&str> {
    match bs58::decode(verkey).into_vec() {
        Ok(ref bytes) if bytes.len() == 32 => Ok(verkey),
        Ok(_) => Err(DiddocError::from_msg(
            DiddocErrorKind::InvalidVerkey,
            "Invalid Verkey length",
        )),
        Err(err) => Err(DiddocError::from_msg(
            DiddocErrorKind::NotBase58,
            format!("Invalid Verkey: {err}"),
        )),
    }
}
