//! Reputation Proof Pipeline
//!
//! Turns the raw boxes of one owner into the list of proofs that still carry
//! free, unassigned reputation.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────┐     ┌─────────────────┐     ┌─────────────────┐
//! │ RawRecordSource │────►│ ProofDecoder    │────►│ eligibility     │
//! │ (ledger boxes)  │     │ (skip + warn on │     │ (free > 0 and   │
//! └─────────────────┘     │  bad records)   │     │  not assigned)  │
//!                         └─────────────────┘     └────────┬────────┘
//!                                                          ▼
//!                                                 ┌─────────────────┐
//!                                                 │ presenter       │
//!                                                 │ (ProofRecord)   │
//!                                                 └─────────────────┘
//! ```
//!
//! ## Amount Model
//!
//! - `free_amount = total_amount - expended_amount`
//! - `free_percentage = free_amount / total_amount * 100`, two decimals
//! - A box with a zero total or an overspent expended register is malformed

mod decoder;
pub mod eligibility;
pub mod metrics;
mod model;
pub mod presenter;
mod service;

pub use decoder::{ProofDecoder, RegisterLayout};
pub use eligibility::{Ineligibility, is_spendable};
pub use metrics::ProofMetrics;
pub use model::ReputationProof;
pub use presenter::{ProofRecord, present};
pub use service::{ProofScan, ProofService};
