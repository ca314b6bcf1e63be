//! Reputation proof entity.

use serde::Serialize;

use super::metrics::{self, ProofMetrics};
use crate::error::DecodeError;

/// A reputation proof box, validated.
///
/// Built once per query and never mutated. `free_amount` and
/// `free_percentage` are always derived from the two stored amounts.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ReputationProof {
    box_id: String,
    token_id: String,
    owner_pk: String,
    total_amount: u64,
    expended_amount: u64,
    has_assignment: bool,
}

impl ReputationProof {
    /// Fails when `total_amount` is zero or `expended_amount` exceeds it.
    pub fn new(
        box_id: impl Into<String>,
        token_id: impl Into<String>,
        owner_pk: impl Into<String>,
        total_amount: u64,
        expended_amount: u64,
        has_assignment: bool,
    ) -> Result<Self, DecodeError> {
        // Validates both amount invariants.
        metrics::compute(total_amount, expended_amount)?;

        Ok(Self {
            box_id: box_id.into(),
            token_id: token_id.into(),
            owner_pk: owner_pk.into(),
            total_amount,
            expended_amount,
            has_assignment,
        })
    }

    pub fn box_id(&self) -> &str {
        &self.box_id
    }

    pub fn token_id(&self) -> &str {
        &self.token_id
    }

    pub fn owner_pk(&self) -> &str {
        &self.owner_pk
    }

    pub fn total_amount(&self) -> u64 {
        self.total_amount
    }

    pub fn expended_amount(&self) -> u64 {
        self.expended_amount
    }

    pub fn has_assignment(&self) -> bool {
        self.has_assignment
    }

    pub fn metrics(&self) -> ProofMetrics {
        metrics::derive(self.total_amount, self.expended_amount)
    }

    pub fn free_amount(&self) -> u64 {
        self.metrics().free_amount
    }

    pub fn free_percentage(&self) -> f64 {
        self.metrics().free_percentage
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_derived_amounts() {
        let proof = ReputationProof::new("b", "t", "pk", 100, 30, false).unwrap();
        assert_eq!(proof.free_amount(), 70);
        assert_eq!(proof.free_percentage(), 70.0);
        assert_eq!(
            proof.free_amount(),
            proof.total_amount() - proof.expended_amount()
        );
    }

    #[test]
    fn test_zero_total_rejected() {
        assert_eq!(
            ReputationProof::new("b", "t", "pk", 0, 0, false),
            Err(DecodeError::NonPositiveTotal)
        );
    }

    #[test]
    fn test_overspent_rejected() {
        assert!(matches!(
            ReputationProof::new("b", "t", "pk", 5, 6, false),
            Err(DecodeError::ExpendedExceedsTotal { .. })
        ));
    }
}
