use std::collections::HashSet;

use farmchain_crypto::{ChainFault, ChainStatus, ContentHasher, HashChainVerifier};
use farmchain_types::BatchId;
use serde::Serialize;

use crate::error::LedgerError;
use crate::traits::LedgerReader;

/// Result of verifying a batch's record stream.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct VerificationReport {
    pub batch: BatchId,
    pub record_count: u64,
    /// Hash-chain outcome: `Valid`, or the first `BrokenLink` /
    /// `TamperedContent` fault with its index.
    pub status: ChainStatus,
    /// Ledger-level violations beyond the raw chain walk.
    pub violations: Vec<Violation>,
}

impl VerificationReport {
    /// Returns `true` if the chain and all ledger-level checks passed.
    pub fn is_valid(&self) -> bool {
        self.status.is_valid() && self.violations.is_empty()
    }

    /// The chain fault, if the hash chain failed.
    pub fn fault(&self) -> Option<ChainFault> {
        match self.status {
            ChainStatus::Valid => None,
            ChainStatus::Fault(fault) => Some(fault),
        }
    }
}

/// A ledger-level integrity violation detected during verification.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Violation {
    pub index: usize,
    pub kind: ViolationKind,
    pub description: String,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ViolationKind {
    /// Event timestamps are not strictly ascending (chain order and
    /// timestamp order must agree).
    TimestampOrder,
    /// Two records in the stream share a content hash.
    DuplicateHash,
    /// A record stored under this batch references a different batch.
    ForeignRecord,
}

/// Stream integrity verifier.
///
/// Read-only and deterministic: recomputes every content hash from stored
/// fields, re-walks every predecessor link, and cross-checks ordering.
/// Never mutates the ledger.
pub struct StreamValidator;

impl StreamValidator {
    /// Verify a single batch's stream against all invariants.
    pub fn verify<R: LedgerReader>(
        reader: &R,
        batch: &BatchId,
    ) -> Result<VerificationReport, LedgerError> {
        let records = reader.read(batch)?;

        let status = HashChainVerifier::verify_chain(&records, &ContentHasher::RECORD)?;

        let mut violations = Vec::new();
        let mut seen_hashes = HashSet::new();
        for (index, record) in records.iter().enumerate() {
            if record.batch != *batch {
                violations.push(Violation {
                    index,
                    kind: ViolationKind::ForeignRecord,
                    description: format!("record belongs to batch {}", record.batch),
                });
            }
            if !seen_hashes.insert(record.record_hash) {
                violations.push(Violation {
                    index,
                    kind: ViolationKind::DuplicateHash,
                    description: "content hash already present in stream".into(),
                });
            }
            if index > 0 && record.timestamp <= records[index - 1].timestamp {
                violations.push(Violation {
                    index,
                    kind: ViolationKind::TimestampOrder,
                    description: "event timestamp not after predecessor".into(),
                });
            }
        }

        Ok(VerificationReport {
            batch: *batch,
            record_count: records.len() as u64,
            status,
            violations,
        })
    }

    /// Verify every batch known to the ledger.
    pub fn verify_all<R: LedgerReader>(
        reader: &R,
    ) -> Result<Vec<VerificationReport>, LedgerError> {
        let batches = reader.batches()?;
        let mut reports = Vec::with_capacity(batches.len());
        for batch in &batches {
            reports.push(Self::verify(reader, batch)?);
        }
        Ok(reports)
    }
}
