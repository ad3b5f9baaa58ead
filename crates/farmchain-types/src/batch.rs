use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::actor::ActorId;
use crate::ids::BatchId;
use crate::record::BatchStatus;
use crate::token::ScanToken;

/// One tracked lot of produce from a single origin.
///
/// Created once by the originating farmer and never deleted; the
/// supply-chain history attached to it must remain queryable forever.
/// `status` is a derived convenience field kept in step with the batch's
/// ledger stream by the engine and the workflows around it.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Batch {
    pub id: BatchId,
    pub farmer: ActorId,
    pub crop_type: String,
    pub variety: Option<String>,
    pub quantity: f64,
    pub unit: String,
    pub harvest_date: DateTime<Utc>,
    pub price_per_unit: Option<f64>,
    pub organic: bool,
    pub scan_token: ScanToken,
    pub status: BatchStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Insert form for a batch; id, token, status, and timestamps are
/// assigned by the registry.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct BatchDraft {
    pub farmer: ActorId,
    pub crop_type: String,
    #[serde(default)]
    pub variety: Option<String>,
    pub quantity: f64,
    #[serde(default = "default_unit")]
    pub unit: String,
    pub harvest_date: DateTime<Utc>,
    #[serde(default)]
    pub price_per_unit: Option<f64>,
    #[serde(default)]
    pub organic: bool,
}

fn default_unit() -> String {
    "kg".to_string()
}

impl BatchDraft {
    /// Materialize the draft into a batch with a fresh identity.
    pub fn into_batch(self) -> Batch {
        let id = BatchId::new();
        let scan_token = ScanToken::issue(&id);
        let now = Utc::now();
        Batch {
            id,
            farmer: self.farmer,
            crop_type: self.crop_type,
            variety: self.variety,
            quantity: self.quantity,
            unit: self.unit,
            harvest_date: self.harvest_date,
            price_per_unit: self.price_per_unit,
            organic: self.organic,
            scan_token,
            status: BatchStatus::Registered,
            created_at: now,
            updated_at: now,
        }
    }
}
