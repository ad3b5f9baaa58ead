use std::fmt;

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::error::TypeError;
use crate::ids::BatchId;

const TOKEN_PREFIX: &str = "FARMCHAIN";
const NONCE_BYTES: usize = 8;

/// The unique public lookup token embedded in a batch's QR code.
///
/// Issued exactly once at batch creation and immutable thereafter. The
/// format is `FARMCHAIN-<batch uuid>-<16 hex nonce chars>`: the batch id
/// makes the token self-describing, the random nonce keeps tokens
/// unguessable from the id alone. Global uniqueness is enforced by the
/// batch registry's token index.
#[derive(Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ScanToken(String);

impl ScanToken {
    /// Issue a fresh token for a batch.
    pub fn issue(batch: &BatchId) -> Self {
        let mut nonce = [0u8; NONCE_BYTES];
        rand::thread_rng().fill(&mut nonce);
        Self(format!(
            "{TOKEN_PREFIX}-{}-{}",
            batch.as_uuid().simple(),
            hex::encode(nonce)
        ))
    }

    /// Parse and validate a token received from a consumer scan.
    pub fn parse(s: &str) -> Result<Self, TypeError> {
        let mut parts = s.splitn(3, '-');
        let (prefix, id, nonce) = (parts.next(), parts.next(), parts.next());
        match (prefix, id, nonce) {
            (Some(TOKEN_PREFIX), Some(id), Some(nonce))
                if uuid::Uuid::parse_str(id).is_ok()
                    && nonce.len() == NONCE_BYTES * 2
                    && nonce.bytes().all(|b| b.is_ascii_hexdigit()) =>
            {
                Ok(Self(s.to_string()))
            }
            _ => Err(TypeError::InvalidToken(s.to_string())),
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for ScanToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ScanToken({})", self.0)
    }
}

impl fmt::Display for ScanToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
