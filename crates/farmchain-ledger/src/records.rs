use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use farmchain_crypto::{ChainEntry, HasherError};
use farmchain_types::{ActorId, BatchId, RecordId, RecordKind};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// One immutable, hash-linked event in a batch's supply-chain history.
///
/// Once appended, no field is ever modified or deleted. `record_hash` is
/// the domain-separated BLAKE3 digest of the record's canonical content
/// plus `prev_hash`; `prev_hash` is `None` only for the first record of a
/// batch's stream.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct LedgerRecord {
    pub id: RecordId,
    pub batch: BatchId,
    pub author: ActorId,
    pub kind: RecordKind,
    pub location: Option<String>,
    pub temperature: Option<f64>,
    pub humidity: Option<f64>,
    pub storage_conditions: Option<String>,
    pub transport_method: Option<String>,
    pub expected_delivery: Option<DateTime<Utc>>,
    pub actual_delivery: Option<DateTime<Utc>>,
    pub notes: Option<String>,
    /// Open, kind-specific structured payload. `BTreeMap` keeps key order
    /// canonical so the content hash is stable.
    pub payload: BTreeMap<String, Value>,
    pub timestamp: DateTime<Utc>,
    pub prev_hash: Option<[u8; 32]>,
    pub record_hash: [u8; 32],
}

impl LedgerRecord {
    /// Short hex rendering of the record hash for logs and timelines.
    pub fn short_hash(&self) -> String {
        hex::encode(&self.record_hash[..4])
    }

    /// Returns `true` if this record marks a delivery milestone
    /// (retail-kind or carrying an actual-delivery timestamp).
    pub fn is_delivery_milestone(&self) -> bool {
        self.kind == RecordKind::Retail || self.actual_delivery.is_some()
    }
}

/// Canonical view used for content hashing: every field of the record
/// except `prev_hash` (folded into the hash separately) and `record_hash`
/// itself. Field order is fixed by declaration; `serde_json` encodes it
/// deterministically.
#[derive(Serialize)]
struct CanonicalRecord<'a> {
    id: &'a RecordId,
    batch: &'a BatchId,
    author: &'a ActorId,
    kind: &'a RecordKind,
    location: &'a Option<String>,
    temperature: &'a Option<f64>,
    humidity: &'a Option<f64>,
    storage_conditions: &'a Option<String>,
    transport_method: &'a Option<String>,
    expected_delivery: &'a Option<DateTime<Utc>>,
    actual_delivery: &'a Option<DateTime<Utc>>,
    notes: &'a Option<String>,
    payload: &'a BTreeMap<String, Value>,
    timestamp: &'a DateTime<Utc>,
}

impl ChainEntry for LedgerRecord {
    fn entry_hash(&self) -> [u8; 32] {
        self.record_hash
    }

    fn prev_hash(&self) -> Option<[u8; 32]> {
        self.prev_hash
    }

    fn payload_bytes(&self) -> Result<Vec<u8>, HasherError> {
        let canonical = CanonicalRecord {
            id: &self.id,
            batch: &self.batch,
            author: &self.author,
            kind: &self.kind,
            location: &self.location,
            temperature: &self.temperature,
            humidity: &self.humidity,
            storage_conditions: &self.storage_conditions,
            transport_method: &self.transport_method,
            expected_delivery: &self.expected_delivery,
            actual_delivery: &self.actual_delivery,
            notes: &self.notes,
            payload: &self.payload,
            timestamp: &self.timestamp,
        };
        serde_json::to_vec(&canonical).map_err(|e| HasherError::Serialization(e.to_string()))
    }
}

/// Input for appending a record. The id, predecessor hash, content hash,
/// and (when absent) the event timestamp are assigned by the engine.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct RecordDraft {
    pub batch: BatchId,
    pub author: ActorId,
    pub kind: RecordKind,
    #[serde(default)]
    pub location: Option<String>,
    #[serde(default)]
    pub temperature: Option<f64>,
    #[serde(default)]
    pub humidity: Option<f64>,
    #[serde(default)]
    pub storage_conditions: Option<String>,
    #[serde(default)]
    pub transport_method: Option<String>,
    #[serde(default)]
    pub expected_delivery: Option<DateTime<Utc>>,
    #[serde(default)]
    pub actual_delivery: Option<DateTime<Utc>>,
    #[serde(default)]
    pub notes: Option<String>,
    #[serde(default)]
    pub payload: BTreeMap<String, Value>,
    /// Event timestamp; defaults to "now" at append time.
    #[serde(default)]
    pub timestamp: Option<DateTime<Utc>>,
}

impl RecordDraft {
    pub fn new(batch: BatchId, author: ActorId, kind: RecordKind) -> Self {
        Self {
            batch,
            author,
            kind,
            location: None,
            temperature: None,
            humidity: None,
            storage_conditions: None,
            transport_method: None,
            expected_delivery: None,
            actual_delivery: None,
            notes: None,
            payload: BTreeMap::new(),
            timestamp: None,
        }
    }

    /// Draft for the implicit first record appended at batch registration.
    pub fn harvest(batch: BatchId, author: ActorId, location: &str, notes: String) -> Self {
        Self {
            location: Some(location.to_string()),
            notes: Some(notes),
            ..Self::new(batch, author, RecordKind::Harvest)
        }
    }
}

/// Lightweight reference to a stored record (stream head answers).
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecordRef {
    pub id: RecordId,
    pub batch: BatchId,
    pub kind: RecordKind,
    pub timestamp: DateTime<Utc>,
    pub record_hash: [u8; 32],
}

impl From<&LedgerRecord> for RecordRef {
    fn from(record: &LedgerRecord) -> Self {
        Self {
            id: record.id,
            batch: record.batch,
            kind: record.kind,
            timestamp: record.timestamp,
            record_hash: record.record_hash,
        }
    }
}
