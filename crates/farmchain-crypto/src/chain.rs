use serde::Serialize;

use crate::hasher::{ContentHasher, HasherError};

/// Trait for values that participate in a hash chain.
pub trait ChainEntry {
    /// The entry's own stored content hash.
    fn entry_hash(&self) -> [u8; 32];
    /// The previous entry's hash (None for the first entry).
    fn prev_hash(&self) -> Option<[u8; 32]>;
    /// Canonical payload bytes, excluding the entry's own hash and the
    /// predecessor link (the link is folded in separately).
    fn payload_bytes(&self) -> Result<Vec<u8>, HasherError>;
}

/// Outcome of walking a chain.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ChainStatus {
    /// Every link and every content hash checked out.
    Valid,
    /// The first fault found, with its position.
    Fault(ChainFault),
}

impl ChainStatus {
    pub fn is_valid(&self) -> bool {
        matches!(self, Self::Valid)
    }
}

/// A specific chain integrity fault.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, thiserror::Error)]
#[serde(rename_all = "snake_case")]
pub enum ChainFault {
    #[error("first entry carries a predecessor hash (should be none)")]
    GenesisHasPredecessor,

    #[error("missing predecessor hash at index {index}")]
    MissingLink { index: usize },

    #[error("broken link at index {index}: predecessor hash does not match")]
    BrokenLink { index: usize },

    #[error("tampered content at index {index}: stored hash does not match recomputed")]
    TamperedContent { index: usize },
}

/// Hash chain integrity verifier.
///
/// Checks that a sequence of entries forms a valid chain:
/// 1. the first entry has no predecessor hash;
/// 2. each later entry's `prev_hash` equals the previous entry's stored hash;
/// 3. each entry's stored hash equals the hash recomputed from its payload
///    bytes and its predecessor link.
///
/// Verification stops at the first fault; an empty sequence is valid.
pub struct HashChainVerifier;

impl HashChainVerifier {
    pub fn verify_chain<E: ChainEntry>(
        entries: &[E],
        hasher: &ContentHasher,
    ) -> Result<ChainStatus, HasherError> {
        let Some(first) = entries.first() else {
            return Ok(ChainStatus::Valid);
        };

        if first.prev_hash().is_some() {
            return Ok(ChainStatus::Fault(ChainFault::GenesisHasPredecessor));
        }

        let computed = hasher.hash_linked(&first.payload_bytes()?, None);
        if computed != first.entry_hash() {
            return Ok(ChainStatus::Fault(ChainFault::TamperedContent { index: 0 }));
        }

        for (index, window) in entries.windows(2).enumerate() {
            let index = index + 1;
            let expected_prev = window[0].entry_hash();
            match window[1].prev_hash() {
                Some(prev) if prev == expected_prev => {}
                Some(_) => return Ok(ChainStatus::Fault(ChainFault::BrokenLink { index })),
                None => return Ok(ChainStatus::Fault(ChainFault::MissingLink { index })),
            }

            let computed = hasher.hash_linked(&window[1].payload_bytes()?, Some(expected_prev));
            if computed != window[1].entry_hash() {
                return Ok(ChainStatus::Fault(ChainFault::TamperedContent { index }));
            }
        }

        Ok(ChainStatus::Valid)
    }
}

#[cfg(test)]
mod tests {
    use proptest::prelude::*;

    use super::*;

    const HASHER: ContentHasher = ContentHasher::new("farmchain-chain-test-v1");

    struct TestEntry {
        hash: [u8; 32],
        prev: Option<[u8; 32]>,
        payload: Vec<u8>,
    }

    impl ChainEntry for TestEntry {
        fn entry_hash(&self) -> [u8; 32] {
            self.hash
        }
        fn prev_hash(&self) -> Option<[u8; 32]> {
            self.prev
        }
        fn payload_bytes(&self) -> Result<Vec<u8>, HasherError> {
            Ok(self.payload.clone())
        }
    }

    fn build_chain(payloads: &[Vec<u8>]) -> Vec<TestEntry> {
        let mut chain = Vec::new();
        let mut prev: Option<[u8; 32]> = None;
        for payload in payloads {
            let hash = HASHER.hash_linked(payload, prev);
            chain.push(TestEntry {
                hash,
                prev,
                payload: payload.clone(),
            });
            prev = Some(hash);
        }
        chain
    }

    fn numbered_chain(count: usize) -> Vec<TestEntry> {
        let payloads: Vec<Vec<u8>> = (0..count)
            .map(|i| format!("record-{i}").into_bytes())
            .collect();
        build_chain(&payloads)
    }

    #[test]
    fn empty_chain_is_valid() {
        let chain: Vec<TestEntry> = vec![];
        let status = HashChainVerifier::verify_chain(&chain, &HASHER).unwrap();
        assert!(status.is_valid());
    }

    #[test]
    fn single_and_multi_entry_chains_are_valid() {
        for count in [1, 2, 10] {
            let chain = numbered_chain(count);
            let status = HashChainVerifier::verify_chain(&chain, &HASHER).unwrap();
            assert!(status.is_valid(), "chain of {count} should verify");
        }
    }

    #[test]
    fn genesis_with_predecessor_fails() {
        let mut chain = numbered_chain(1);
        chain[0].prev = Some([1; 32]);
        let status = HashChainVerifier::verify_chain(&chain, &HASHER).unwrap();
        assert_eq!(status, ChainStatus::Fault(ChainFault::GenesisHasPredecessor));
    }

    #[test]
    fn broken_link_detected_at_index() {
        let mut chain = numbered_chain(3);
        chain[2].prev = Some([99; 32]);
        let status = HashChainVerifier::verify_chain(&chain, &HASHER).unwrap();
        assert_eq!(status, ChainStatus::Fault(ChainFault::BrokenLink { index: 2 }));
    }

    #[test]
    fn missing_link_detected_at_index() {
        let mut chain = numbered_chain(3);
        chain[1].prev = None;
        let status = HashChainVerifier::verify_chain(&chain, &HASHER).unwrap();
        assert_eq!(status, ChainStatus::Fault(ChainFault::MissingLink { index: 1 }));
    }

    #[test]
    fn tampered_payload_detected_at_index() {
        let mut chain = numbered_chain(3);
        chain[1].payload = b"tampered".to_vec();
        let status = HashChainVerifier::verify_chain(&chain, &HASHER).unwrap();
        assert_eq!(
            status,
            ChainStatus::Fault(ChainFault::TamperedContent { index: 1 })
        );
    }

    proptest! {
        #[test]
        fn any_well_formed_chain_verifies(
            payloads in prop::collection::vec(prop::collection::vec(any::<u8>(), 0..64), 0..16)
        ) {
            let chain = build_chain(&payloads);
            let status = HashChainVerifier::verify_chain(&chain, &HASHER).unwrap();
            prop_assert!(status.is_valid());
        }

        #[test]
        fn single_byte_flip_is_detected(
            payloads in prop::collection::vec(prop::collection::vec(any::<u8>(), 1..64), 1..8),
            pick in any::<prop::sample::Index>(),
        ) {
            let mut chain = build_chain(&payloads);
            let index = pick.index(chain.len());
            chain[index].payload[0] ^= 0x01;
            let status = HashChainVerifier::verify_chain(&chain, &HASHER).unwrap();
            prop_assert_eq!(
                status,
                ChainStatus::Fault(ChainFault::TamperedContent { index })
            );
        }
    }
}
