use chrono::{DateTime, Utc};
use farmchain_registry::BatchDirectory;
use farmchain_types::{ActorId, BatchId, BatchStatus, RecordId, RecordKind};
use serde::Serialize;

use crate::error::LedgerError;
use crate::records::LedgerRecord;
use crate::traits::LedgerReader;

/// One step of a batch's journey, for consumer-facing rendering.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct TimelineEntry {
    pub index: usize,
    pub record_id: RecordId,
    pub kind: RecordKind,
    pub author: ActorId,
    pub timestamp: DateTime<Utc>,
    pub location: Option<String>,
    pub summary: String,
    /// Short content-hash fingerprint, printable next to each step.
    pub fingerprint: String,
}

/// Chronological journey view of a batch.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct TimelineProjection {
    pub batch: BatchId,
    pub entries: Vec<TimelineEntry>,
}

/// Batch status derived purely from the record chain, next to the
/// directory's stored status. `diverged` flags the known inconsistency of
/// the stored field being mutated outside the ledger (`in_transit`,
/// `sold`).
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct StatusProjection {
    pub batch: BatchId,
    pub stored: BatchStatus,
    pub derived: BatchStatus,
    pub diverged: bool,
}

/// Deterministic projection builders over a [`LedgerReader`].
pub struct ProjectionBuilder;

impl ProjectionBuilder {
    pub fn timeline<R: LedgerReader>(
        reader: &R,
        batch: &BatchId,
    ) -> Result<TimelineProjection, LedgerError> {
        let records = reader.read(batch)?;
        let entries = records
            .iter()
            .enumerate()
            .map(|(index, record)| TimelineEntry {
                index,
                record_id: record.id,
                kind: record.kind,
                author: record.author.clone(),
                timestamp: record.timestamp,
                location: record.location.clone(),
                summary: summarize(record),
                fingerprint: record.short_hash(),
            })
            .collect();

        Ok(TimelineProjection {
            batch: *batch,
            entries,
        })
    }

    pub fn status<R: LedgerReader, D: BatchDirectory>(
        reader: &R,
        directory: &D,
        batch: &BatchId,
    ) -> Result<StatusProjection, LedgerError> {
        let stored = directory
            .get(batch)?
            .ok_or(LedgerError::BatchNotFound(*batch))?
            .status;

        let mut derived = BatchStatus::Registered;
        for record in reader.read(batch)? {
            let implied = implied_status(&record);
            if derived.can_transition_to(implied) {
                derived = implied;
            }
        }

        Ok(StatusProjection {
            batch: *batch,
            stored,
            derived,
            diverged: stored != derived,
        })
    }
}

/// The lifecycle state a record implies for its batch.
fn implied_status(record: &LedgerRecord) -> BatchStatus {
    if record
        .payload
        .get("sold")
        .and_then(|v| v.as_bool())
        .unwrap_or(false)
    {
        return BatchStatus::Sold;
    }
    if record.is_delivery_milestone() {
        return BatchStatus::Delivered;
    }
    match record.kind {
        RecordKind::Transport | RecordKind::Storage => BatchStatus::InTransit,
        _ => BatchStatus::Registered,
    }
}

fn summarize(record: &LedgerRecord) -> String {
    if let Some(notes) = record.notes.as_deref().filter(|n| !n.trim().is_empty()) {
        return notes.to_string();
    }
    match record.kind {
        RecordKind::Harvest => "harvested".to_string(),
        RecordKind::Storage => record
            .storage_conditions
            .clone()
            .map(|c| format!("stored ({c})"))
            .unwrap_or_else(|| "stored".to_string()),
        RecordKind::Transport => record
            .transport_method
            .clone()
            .map(|m| format!("in transit ({m})"))
            .unwrap_or_else(|| "in transit".to_string()),
        RecordKind::Processing => "processed".to_string(),
        RecordKind::Retail => "arrived at point of sale".to_string(),
        RecordKind::QualityCheck => "quality checked".to_string(),
    }
}
