//! Serializable output shape for eligible proofs.

use serde::{Deserialize, Serialize};

use super::model::ReputationProof;

/// One entry of the unexpended-proofs listing
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProofRecord {
    pub box_id: String,
    pub token_id: String,
    pub total_amount: u64,
    pub free_amount: u64,
    pub free_percentage: f64,
}

impl From<&ReputationProof> for ProofRecord {
    fn from(proof: &ReputationProof) -> Self {
        let metrics = proof.metrics();
        Self {
            box_id: proof.box_id().to_string(),
            token_id: proof.token_id().to_string(),
            total_amount: proof.total_amount(),
            free_amount: metrics.free_amount,
            free_percentage: metrics.free_percentage,
        }
    }
}

/// Map proofs to records in the order received
pub fn present<'a, I>(proofs: I) -> Vec<ProofRecord>
where
    I: IntoIterator<Item = &'a ReputationProof>,
{
    proofs.into_iter().map(ProofRecord::from).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_record_fields() {
        let proof = ReputationProof::new("b1", "t1", "pk", 100, 30, false).unwrap();
        let records = present([&proof]);

        assert_eq!(
            serde_json::to_value(&records).unwrap(),
            serde_json::json!([{
                "box_id": "b1",
                "token_id": "t1",
                "total_amount": 100,
                "free_amount": 70,
                "free_percentage": 70.0
            }])
        );
    }

    #[test]
    fn test_order_is_kept() {
        let proofs: Vec<_> = ["c", "a", "b"]
            .iter()
            .map(|id| ReputationProof::new(*id, "t", "pk", 10, 1, false).unwrap())
            .collect();

        let ids: Vec<_> = present(&proofs).into_iter().map(|r| r.box_id).collect();
        assert_eq!(ids, vec!["c", "a", "b"]);
    }
}
