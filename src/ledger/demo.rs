//! Offline record sources
//!
//! `DemoRecordSource` fabricates plausible proof boxes for local runs without
//! an explorer. `StaticRecordSource` replays a fixed batch and is what tests
//! inject in place of the network.

use async_trait::async_trait;
use rand::{Rng, RngCore};
use sha2::{Digest, Sha512};
use std::collections::BTreeMap;
use tracing::debug;

use super::RawRecordSource;
use super::types::{RawAsset, RawBox, RawRegister};
use crate::error::QueryResult;
use crate::proofs::RegisterLayout;

/// Random well-formed, unassigned proof boxes for any owner
#[derive(Debug, Clone)]
pub struct DemoRecordSource {
    records: usize,
    layout: RegisterLayout,
}

impl DemoRecordSource {
    pub fn new(records: usize, layout: RegisterLayout) -> Self {
        Self { records, layout }
    }

    fn random_id<R: RngCore>(rng: &mut R) -> String {
        let mut seed = [0u8; 10];
        rng.fill_bytes(&mut seed);
        hex::encode(Sha512::digest(seed))
    }

    fn generate(&self, owner_pk: &str) -> Vec<RawBox> {
        let mut rng = rand::thread_rng();
        let mut boxes: Vec<RawBox> = (0..self.records)
            .map(|_| {
                let total: u64 = rng.gen_range(50..100);
                let expended: u64 = rng.gen_range(0..50);

                let mut registers = BTreeMap::new();
                registers.insert(
                    self.layout.owner_register.clone(),
                    RawRegister::rendered(owner_pk),
                );
                registers.insert(
                    self.layout.expended_register.clone(),
                    RawRegister::rendered(expended.to_string()),
                );

                RawBox {
                    box_id: Some(Self::random_id(&mut rng)),
                    assets: vec![RawAsset {
                        token_id: Some(Self::random_id(&mut rng)),
                        amount: Some(serde_json::Value::from(total)),
                    }],
                    additional_registers: registers,
                }
            })
            .collect();

        boxes.sort_by(|a, b| a.box_id.cmp(&b.box_id));
        boxes
    }
}

#[async_trait]
impl RawRecordSource for DemoRecordSource {
    async fn fetch(&self, owner_pk: &str) -> QueryResult<Vec<RawBox>> {
        debug!("Generating {} demo proof boxes for {}", self.records, owner_pk);
        Ok(self.generate(owner_pk))
    }
}

/// Returns the same boxes for every owner, in the given order
#[derive(Debug, Clone, Default)]
pub struct StaticRecordSource {
    boxes: Vec<RawBox>,
}

impl StaticRecordSource {
    pub fn new(boxes: Vec<RawBox>) -> Self {
        Self { boxes }
    }
}

#[async_trait]
impl RawRecordSource for StaticRecordSource {
    async fn fetch(&self, _owner_pk: &str) -> QueryResult<Vec<RawBox>> {
        Ok(self.boxes.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::proofs::ProofDecoder;

    #[tokio::test]
    async fn test_demo_boxes_decode() {
        let layout = RegisterLayout::default();
        let source = DemoRecordSource::new(25, layout.clone());
        let boxes = source.fetch("9fOwner").await.unwrap();
        assert_eq!(boxes.len(), 25);

        let decoder = ProofDecoder::new(layout);
        for raw in &boxes {
            let proof = decoder.decode(raw, "9fOwner").unwrap();
            assert!((50..100).contains(&proof.total_amount()));
            assert!(proof.expended_amount() < 50);
            assert!(!proof.has_assignment());
        }
    }

    #[tokio::test]
    async fn test_demo_boxes_sorted_by_id() {
        let source = DemoRecordSource::new(10, RegisterLayout::default());
        let boxes = source.fetch("owner").await.unwrap();
        let ids: Vec<_> = boxes.iter().map(|b| b.box_id.clone()).collect();
        let mut sorted = ids.clone();
        sorted.sort();
        assert_eq!(ids, sorted);
    }

    #[tokio::test]
    async fn test_static_source_preserves_order() {
        let boxes = vec![
            RawBox {
                box_id: Some("z".to_string()),
                ..RawBox::default()
            },
            RawBox {
                box_id: Some("a".to_string()),
                ..RawBox::default()
            },
        ];
        let source = StaticRecordSource::new(boxes.clone());
        assert_eq!(source.fetch("anyone").await.unwrap(), boxes);
    }
}
