//! Reputation Proof API Endpoints
//!
//! Read-only listing of an owner's unexpended reputation proofs.

use axum::{
    Json, Router,
    extract::{Path, State},
    http::StatusCode,
    routing::get,
};
use tracing::error;

use crate::error::QueryError;
use crate::proofs::{ProofRecord, ProofScan, ProofService};

/// API state for proof endpoints
#[derive(Clone)]
pub struct ProofsApiState {
    pub service: ProofService,
}

fn validate_owner(owner_pk: &str) -> Result<&str, (StatusCode, String)> {
    let owner_pk = owner_pk.trim();
    if owner_pk.is_empty() {
        return Err((StatusCode::BAD_REQUEST, "Owner public key is required".to_string()));
    }
    Ok(owner_pk)
}

fn query_failure(owner_pk: &str, err: QueryError) -> (StatusCode, String) {
    error!("Proof listing for {} failed: {}", owner_pk, err);
    (StatusCode::BAD_GATEWAY, err.to_string())
}

/// GET /get_unexpended_reputation_proofs/:owner_pk - Spendable proofs of an owner
pub async fn get_unexpended_proofs(
    State(state): State<ProofsApiState>,
    Path(owner_pk): Path<String>,
) -> Result<Json<Vec<ProofRecord>>, (StatusCode, String)> {
    let owner_pk = validate_owner(&owner_pk)?;

    state
        .service
        .list_unexpended_proofs(owner_pk)
        .await
        .map(Json)
        .map_err(|e| query_failure(owner_pk, e))
}

/// GET /proofs/:owner_pk/scan - Listing plus counts of excluded boxes
pub async fn get_proof_scan(
    State(state): State<ProofsApiState>,
    Path(owner_pk): Path<String>,
) -> Result<Json<ProofScan>, (StatusCode, String)> {
    let owner_pk = validate_owner(&owner_pk)?;

    state
        .service
        .scan(owner_pk)
        .await
        .map(Json)
        .map_err(|e| query_failure(owner_pk, e))
}

/// Create the proofs API router
pub fn create_proofs_router(state: ProofsApiState) -> Router {
    Router::new()
        .route(
            "/get_unexpended_reputation_proofs/{owner_pk}",
            get(get_unexpended_proofs),
        )
        .route("/proofs/{owner_pk}/scan", get(get_proof_scan))
        .with_state(state)
}
