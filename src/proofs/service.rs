//! Unexpended-proof listing: fetch, decode, filter, present.

use serde::Serialize;
use std::sync::Arc;
use tracing::{debug, info, warn};

use super::decoder::ProofDecoder;
use super::eligibility::{self, Ineligibility};
use super::presenter::{self, ProofRecord};
use crate::error::QueryResult;
use crate::ledger::RawRecordSource;

/// Outcome of one listing, with counts of what was left out
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ProofScan {
    pub records: Vec<ProofRecord>,
    /// Boxes returned by the record source
    pub fetched: usize,
    /// Boxes skipped because they could not be decoded
    pub malformed: usize,
    pub fully_expended: usize,
    pub assigned: usize,
}

#[derive(Clone)]
pub struct ProofService {
    source: Arc<dyn RawRecordSource>,
    decoder: ProofDecoder,
}

impl ProofService {
    pub fn new(source: Arc<dyn RawRecordSource>, decoder: ProofDecoder) -> Self {
        Self { source, decoder }
    }

    /// Eligible proofs of `owner_pk`, in record-source order
    pub async fn list_unexpended_proofs(&self, owner_pk: &str) -> QueryResult<Vec<ProofRecord>> {
        Ok(self.scan(owner_pk).await?.records)
    }

    pub async fn scan(&self, owner_pk: &str) -> QueryResult<ProofScan> {
        let boxes = self.source.fetch(owner_pk).await?;

        let mut scan = ProofScan {
            fetched: boxes.len(),
            ..ProofScan::default()
        };
        let mut eligible = Vec::with_capacity(boxes.len());

        for raw in &boxes {
            let proof = match self.decoder.decode(raw, owner_pk) {
                Ok(proof) => proof,
                Err(e) => {
                    warn!(
                        "Skipping malformed proof box {}: {}",
                        raw.box_id.as_deref().unwrap_or("<unknown>"),
                        e
                    );
                    scan.malformed += 1;
                    continue;
                }
            };

            match eligibility::check(&proof) {
                Ok(()) => eligible.push(proof),
                Err(reason) => {
                    debug!("Proof box {} excluded: {:?}", proof.box_id(), reason);
                    match reason {
                        Ineligibility::FullyExpended => scan.fully_expended += 1,
                        Ineligibility::Assigned => scan.assigned += 1,
                    }
                }
            }
        }

        scan.records = presenter::present(&eligible);

        info!(
            "Owner {}: {} unexpended proofs ({} fetched, {} malformed, {} expended, {} assigned)",
            owner_pk,
            scan.records.len(),
            scan.fetched,
            scan.malformed,
            scan.fully_expended,
            scan.assigned
        );

        Ok(scan)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::{QueryError, QueryResult};
    use crate::ledger::{RawBox, StaticRecordSource};
    use async_trait::async_trait;
    use serde_json::json;

    const OWNER: &str = "owner-pk";

    fn proof_box(id: &str, total: u64, expended: u64, assignment: Option<&str>) -> RawBox {
        let mut registers = json!({
            "R4": {"renderedValue": OWNER},
            "R7": {"renderedValue": expended.to_string()}
        });
        if let Some(task) = assignment {
            registers["R5"] = json!({"renderedValue": "plain/txt-utf8"});
            registers["R6"] = json!({"renderedValue": task});
        }
        serde_json::from_value(json!({
            "boxId": id,
            "assets": [{"tokenId": format!("token-{}", id), "amount": total}],
            "additionalRegisters": registers
        }))
        .unwrap()
    }

    fn service(boxes: Vec<RawBox>) -> ProofService {
        ProofService::new(
            Arc::new(StaticRecordSource::new(boxes)),
            ProofDecoder::default(),
        )
    }

    struct FailingSource;

    #[async_trait]
    impl RawRecordSource for FailingSource {
        async fn fetch(&self, _owner_pk: &str) -> QueryResult<Vec<RawBox>> {
            Err(QueryError::Status {
                status: 500,
                body: "boom".to_string(),
            })
        }
    }

    #[tokio::test]
    async fn test_single_partial_proof() {
        let records = service(vec![proof_box("a", 100, 30, None)])
            .list_unexpended_proofs(OWNER)
            .await
            .unwrap();

        assert_eq!(records.len(), 1);
        assert_eq!(records[0].free_amount, 70);
        assert_eq!(records[0].free_percentage, 70.0);
    }

    #[tokio::test]
    async fn test_fully_expended_excluded() {
        let scan = service(vec![proof_box("a", 50, 50, None)])
            .scan(OWNER)
            .await
            .unwrap();

        assert!(scan.records.is_empty());
        assert_eq!(scan.fully_expended, 1);
    }

    #[tokio::test]
    async fn test_counts_add_up() {
        let mut bad = proof_box("bad", 10, 0, None);
        bad.assets.clear();

        let scan = service(vec![
            proof_box("a", 10, 1, None),
            proof_box("b", 10, 10, None),
            proof_box("c", 10, 1, Some("task")),
            bad,
        ])
        .scan(OWNER)
        .await
        .unwrap();

        assert_eq!(scan.fetched, 4);
        assert_eq!(scan.records.len(), 1);
        assert_eq!(scan.malformed, 1);
        assert_eq!(scan.fully_expended, 1);
        assert_eq!(scan.assigned, 1);
    }

    #[tokio::test]
    async fn test_empty_listing_is_success() {
        let records = service(Vec::new())
            .list_unexpended_proofs(OWNER)
            .await
            .unwrap();
        assert!(records.is_empty());
    }

    #[tokio::test]
    async fn test_query_failure_propagates() {
        let service = ProofService::new(Arc::new(FailingSource), ProofDecoder::default());
        let err = service.list_unexpended_proofs(OWNER).await.unwrap_err();
        assert!(matches!(err, QueryError::Status { status: 500, .. }));
    }
}
