use std::fmt;

use serde::{Deserialize, Serialize};

/// Kind of supply-chain event recorded in a batch's ledger stream.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RecordKind {
    /// Initial event, appended when the batch is registered.
    Harvest,
    /// Warehousing with environmental conditions.
    Storage,
    /// Movement between supply-chain stages.
    Transport,
    /// Washing, packing, or other processing steps.
    Processing,
    /// Arrival at the point of sale.
    Retail,
    /// Inspection or quality assessment.
    QualityCheck,
}

impl fmt::Display for RecordKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::Harvest => "harvest",
            Self::Storage => "storage",
            Self::Transport => "transport",
            Self::Processing => "processing",
            Self::Retail => "retail",
            Self::QualityCheck => "quality_check",
        };
        write!(f, "{s}")
    }
}

/// Lifecycle state of a produce batch.
///
/// Transitions are forward-only: `Registered → InTransit → Delivered →
/// Sold`. Skipping a stage forward is allowed (a retail record delivers a
/// batch that was never marked in transit); moving backward is not.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BatchStatus {
    Registered,
    InTransit,
    Delivered,
    Sold,
}

impl BatchStatus {
    /// Returns `true` if a transition from `self` to `next` is allowed.
    /// Same-state transitions are allowed (treated as no-ops by callers).
    pub fn can_transition_to(&self, next: BatchStatus) -> bool {
        next >= *self
    }
}

impl fmt::Display for BatchStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::Registered => "registered",
            Self::InTransit => "in_transit",
            Self::Delivered => "delivered",
            Self::Sold => "sold",
        };
        write!(f, "{s}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn kind_serde_uses_snake_case() {
        let json = serde_json::to_string(&RecordKind::QualityCheck).unwrap();
        assert_eq!(json, "\"quality_check\"");
        let parsed: RecordKind = serde_json::from_str("\"transport\"").unwrap();
        assert_eq!(parsed, RecordKind::Transport);
    }

    #[test]
    fn status_is_forward_only() {
        use BatchStatus::*;
        assert!(Registered.can_transition_to(InTransit));
        assert!(Registered.can_transition_to(Delivered));
        assert!(InTransit.can_transition_to(Sold));
        assert!(!Delivered.can_transition_to(InTransit));
        assert!(!Sold.can_transition_to(Registered));
    }

    #[test]
    fn same_state_is_allowed() {
        assert!(BatchStatus::Delivered.can_transition_to(BatchStatus::Delivered));
    }

    #[test]
    fn display_matches_wire_format() {
        assert_eq!(BatchStatus::InTransit.to_string(), "in_transit");
        assert_eq!(RecordKind::QualityCheck.to_string(), "quality_check");
    }
}
