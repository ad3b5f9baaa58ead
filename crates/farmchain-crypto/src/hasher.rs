/// Domain-separated BLAKE3 content hasher.
///
/// Each hasher carries a domain tag (e.g., `"farmchain-record-v1"`) that is
/// prepended to every hash computation. This prevents cross-type hash
/// collisions: a record and a batch with identical canonical bytes will
/// produce different hashes.
pub struct ContentHasher {
    domain: &'static str,
}

impl ContentHasher {
    /// Hasher for ledger records.
    pub const RECORD: Self = Self {
        domain: "farmchain-record-v1",
    };
    /// Hasher for batch snapshots.
    pub const BATCH: Self = Self {
        domain: "farmchain-batch-v1",
    };

    /// Create a hasher with a custom domain tag.
    pub const fn new(domain: &'static str) -> Self {
        Self { domain }
    }

    /// Hash raw bytes with domain separation.
    pub fn hash(&self, data: &[u8]) -> [u8; 32] {
        let mut hasher = blake3::Hasher::new();
        hasher.update(self.domain.as_bytes());
        hasher.update(b":");
        hasher.update(data);
        *hasher.finalize().as_bytes()
    }

    /// Hash payload bytes chained to an optional predecessor hash.
    ///
    /// The predecessor hash is folded in between the domain tag and the
    /// payload, so splicing a record into a different position in the
    /// chain changes its hash.
    pub fn hash_linked(&self, payload: &[u8], prev: Option<[u8; 32]>) -> [u8; 32] {
        let mut hasher = blake3::Hasher::new();
        hasher.update(self.domain.as_bytes());
        hasher.update(b":");
        if let Some(prev) = prev {
            hasher.update(&prev);
        }
        hasher.update(payload);
        *hasher.finalize().as_bytes()
    }

    /// Hash a serializable value as canonical JSON with domain separation.
    pub fn hash_json<T: serde::Serialize>(&self, value: &T) -> Result<[u8; 32], HasherError> {
        let data =
            serde_json::to_vec(value).map_err(|e| HasherError::Serialization(e.to_string()))?;
        Ok(self.hash(&data))
    }

    /// Verify that data produces the expected hash.
    pub fn verify(&self, data: &[u8], expected: &[u8; 32]) -> bool {
        self.hash(data) == *expected
    }

    /// The domain tag used by this hasher.
    pub fn domain(&self) -> &str {
        self.domain
    }
}

/// Errors from hashing operations.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum HasherError {
    #[error("serialization error: {0}")]
    Serialization(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hash_is_deterministic() {
        let data = b"120kg roma tomatoes";
        assert_eq!(ContentHasher::RECORD.hash(data), ContentHasher::RECORD.hash(data));
    }

    #[test]
    fn different_domains_produce_different_hashes() {
        let data = b"same content";
        assert_ne!(
            ContentHasher::RECORD.hash(data),
            ContentHasher::BATCH.hash(data)
        );
    }

    #[test]
    fn linked_hash_depends_on_predecessor() {
        let payload = b"transport event";
        let genesis = ContentHasher::RECORD.hash_linked(payload, None);
        let linked = ContentHasher::RECORD.hash_linked(payload, Some([7; 32]));
        let relinked = ContentHasher::RECORD.hash_linked(payload, Some([8; 32]));
        assert_ne!(genesis, linked);
        assert_ne!(linked, relinked);
    }

    #[test]
    fn verify_correct_and_tampered_data() {
        let data = b"quality notes";
        let hash = ContentHasher::RECORD.hash(data);
        assert!(ContentHasher::RECORD.verify(data, &hash));
        assert!(!ContentHasher::RECORD.verify(b"Quality notes", &hash));
    }

    #[test]
    fn hash_json_is_deterministic() {
        let value = serde_json::json!({"kind": "storage", "temperature": 4.5});
        let a = ContentHasher::RECORD.hash_json(&value).unwrap();
        let b = ContentHasher::RECORD.hash_json(&value).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn custom_domain() {
        let hasher = ContentHasher::new("farmchain-test-v1");
        assert_ne!(hasher.hash(b"data"), ContentHasher::RECORD.hash(b"data"));
    }
}
