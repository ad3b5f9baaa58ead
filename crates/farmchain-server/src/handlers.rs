use axum::extract::{Path, Query, State};
use axum::response::Json;
use farmchain_ledger::{
    LedgerReader, LedgerRecord, LedgerWriter, ProjectionBuilder, RecordDraft, StatusProjection,
    StreamValidator, TimelineProjection, VerificationReport,
};
use farmchain_registry::{BatchDirectory, RegistryError};
use farmchain_types::{ActorId, Batch, BatchDraft, BatchId, ScanToken};
use serde::Deserialize;
use serde_json::json;

use crate::error::ServerResult;
use crate::state::AppState;

pub async fn health_handler() -> Json<serde_json::Value> {
    Json(json!({ "status": "ok" }))
}

pub async fn info_handler() -> Json<serde_json::Value> {
    Json(json!({
        "name": "farmchain-server",
        "version": env!("CARGO_PKG_VERSION"),
    }))
}

/// Registration workflow: create the batch, then append its implicit
/// first `harvest` record.
pub async fn register_batch(
    State(state): State<AppState>,
    Json(draft): Json<BatchDraft>,
) -> ServerResult<Json<Batch>> {
    let batch = state.registry.create(draft)?;
    let notes = format!(
        "Harvested {}{} of {}",
        batch.quantity, batch.unit, batch.crop_type
    );
    state.ledger.append(RecordDraft::harvest(
        batch.id,
        batch.farmer.clone(),
        "Farm",
        notes,
    ))?;
    tracing::info!(batch = %batch.id.short_id(), crop = %batch.crop_type, "batch registered");
    Ok(Json(batch))
}

pub async fn get_batch(
    State(state): State<AppState>,
    Path(id): Path<BatchId>,
) -> ServerResult<Json<Batch>> {
    let batch = state
        .registry
        .get(&id)?
        .ok_or(RegistryError::BatchNotFound(id))?;
    Ok(Json(batch))
}

/// Consumer scan: resolve a public token to its batch.
pub async fn batch_by_token(
    State(state): State<AppState>,
    Path(token): Path<String>,
) -> ServerResult<Json<Batch>> {
    let token = ScanToken::parse(&token)?;
    let batch = state
        .registry
        .get_by_token(&token)?
        .ok_or(RegistryError::TokenNotFound)?;
    Ok(Json(batch))
}

pub async fn available_batches(State(state): State<AppState>) -> ServerResult<Json<Vec<Batch>>> {
    Ok(Json(state.registry.available()?))
}

#[derive(Deserialize)]
pub struct SearchQuery {
    pub q: String,
}

pub async fn search_batches(
    State(state): State<AppState>,
    Query(query): Query<SearchQuery>,
) -> ServerResult<Json<Vec<Batch>>> {
    Ok(Json(state.registry.search(&query.q)?))
}

pub async fn farmer_batches(
    State(state): State<AppState>,
    Path(farmer): Path<String>,
) -> ServerResult<Json<Vec<Batch>>> {
    Ok(Json(state.registry.list_by_farmer(&ActorId::new(farmer))?))
}

/// Logistics/retail workflows: append one supply-chain record.
pub async fn append_record(
    State(state): State<AppState>,
    Json(draft): Json<RecordDraft>,
) -> ServerResult<Json<LedgerRecord>> {
    let record = state.ledger.append(draft)?;
    Ok(Json(record))
}

pub async fn batch_records(
    State(state): State<AppState>,
    Path(id): Path<BatchId>,
) -> ServerResult<Json<Vec<LedgerRecord>>> {
    Ok(Json(state.ledger.read(&id)?))
}

pub async fn batch_timeline(
    State(state): State<AppState>,
    Path(id): Path<BatchId>,
) -> ServerResult<Json<TimelineProjection>> {
    Ok(Json(ProjectionBuilder::timeline(state.ledger.as_ref(), &id)?))
}

pub async fn batch_status(
    State(state): State<AppState>,
    Path(id): Path<BatchId>,
) -> ServerResult<Json<StatusProjection>> {
    Ok(Json(ProjectionBuilder::status(
        state.ledger.as_ref(),
        state.registry.as_ref(),
        &id,
    )?))
}

pub async fn verify_batch(
    State(state): State<AppState>,
    Path(id): Path<BatchId>,
) -> ServerResult<Json<VerificationReport>> {
    let report = StreamValidator::verify(state.ledger.as_ref(), &id)?;
    if !report.is_valid() {
        tracing::warn!(batch = %id.short_id(), "stream failed verification");
    }
    Ok(Json(report))
}
