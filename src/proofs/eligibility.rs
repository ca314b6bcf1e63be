//! Spendability check for decoded proofs.

use serde::Serialize;

use super::model::ReputationProof;

/// Why a proof was left out of the listing
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Ineligibility {
    /// Nothing left to expend
    FullyExpended,
    /// Already earmarked for a task
    Assigned,
}

/// `Ok(())` when the proof still has free, unassigned reputation.
///
/// A fully expended proof is reported as such even if it also carries an
/// assignment marker.
pub fn check(proof: &ReputationProof) -> Result<(), Ineligibility> {
    if proof.expended_amount() >= proof.total_amount() {
        return Err(Ineligibility::FullyExpended);
    }
    if proof.has_assignment() {
        return Err(Ineligibility::Assigned);
    }
    Ok(())
}

pub fn is_spendable(proof: &ReputationProof) -> bool {
    check(proof).is_ok()
}
