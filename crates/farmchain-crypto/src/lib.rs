//! Content hashing and hash-chain verification for Farmchain.
//!
//! Two primitives live here:
//! - [`ContentHasher`] — domain-separated BLAKE3 hashing of canonical bytes
//! - [`HashChainVerifier`] — walks a sequence of [`ChainEntry`] values and
//!   checks predecessor links and stored content hashes
//!
//! Both are pure: no I/O, no clocks, deterministic for a given input.

pub mod chain;
pub mod hasher;

pub use chain::{ChainEntry, ChainFault, ChainStatus, HashChainVerifier};
pub use hasher::{ContentHasher, HasherError};
