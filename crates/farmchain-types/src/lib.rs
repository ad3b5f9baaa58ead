//! Foundation types for Farmchain.
//!
//! This crate provides the core identity, lifecycle, and entity types used
//! throughout the Farmchain system. Every other Farmchain crate depends on
//! `farmchain-types`.
//!
//! # Key Types
//!
//! - [`BatchId`] / [`RecordId`] — UUID v7 identifiers for batches and ledger records
//! - [`ActorId`] — opaque identifier for the author of a supply-chain event
//! - [`ScanToken`] — the unique public lookup token embedded in a batch's QR code
//! - [`RecordKind`] — supply-chain event classification
//! - [`BatchStatus`] — forward-only batch lifecycle state
//! - [`Batch`] / [`BatchDraft`] — one tracked lot of produce and its insert form

pub mod actor;
pub mod batch;
pub mod error;
pub mod ids;
pub mod record;
pub mod token;

pub use actor::ActorId;
pub use batch::{Batch, BatchDraft};
pub use error::TypeError;
pub use ids::{BatchId, RecordId};
pub use record::{BatchStatus, RecordKind};
pub use token::ScanToken;
