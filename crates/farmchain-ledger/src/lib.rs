//! Append-only record ledger for Farmchain.
//!
//! This crate is the heart of Farmchain. It provides:
//! - Hash-linked ledger record types with per-kind validation
//! - `LedgerWriter` / `LedgerReader` trait boundaries
//! - `InMemoryLedger` implementation for tests and embedding
//! - Stream verification (chain links, content hashes, ordering)
//! - Projection builders (consumer timeline, chain-derived status)
//!
//! Each produce batch owns one linear record stream. Every record commits
//! to its predecessor through a BLAKE3 content hash, so any mutation,
//! reordering, or splicing of stored history is detectable by
//! [`StreamValidator`] without a consensus protocol.

pub mod error;
pub mod memory;
pub mod projection;
pub mod records;
pub mod schema;
pub mod traits;
pub mod validation;

pub use error::LedgerError;
pub use memory::InMemoryLedger;
pub use projection::{ProjectionBuilder, StatusProjection, TimelineEntry, TimelineProjection};
pub use records::{LedgerRecord, RecordDraft, RecordRef};
pub use traits::{LedgerReader, LedgerWriter};
pub use validation::{StreamValidator, VerificationReport, Violation, ViolationKind};
