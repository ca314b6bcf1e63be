//! Unexpended Reputation Proofs
//!
//! Lists the reputation proof boxes an owner holds on the Ergo ledger that
//! still carry free, unassigned reputation.
//!
//! ## Module Structure
//!
//! ```text
//! src/
//! ├── lib.rs         - Crate root with re-exports
//! ├── main.rs        - Server entrypoint
//! ├── config.rs      - Configuration management
//! ├── error.rs       - Decode and query errors
//! ├── ledger/        - Raw record sources
//! │   ├── types.rs    - Explorer box shapes
//! │   ├── explorer.rs - Ergo explorer client (retry, paging)
//! │   └── demo.rs     - Demo and fixed record sources
//! ├── proofs/        - Proof pipeline
//! │   ├── decoder.rs     - Raw box → ReputationProof
//! │   ├── eligibility.rs - Spendability policy
//! │   ├── metrics.rs     - Free amount / percentage
//! │   ├── presenter.rs   - Serializable records
//! │   └── service.rs     - Fetch → decode → filter → present
//! └── api/           - HTTP API endpoints
//!     └── proofs.rs  - Proof listing routes
//! ```

pub mod api;
pub mod config;
pub mod error;
pub mod ledger;
pub mod proofs;

// Re-export main types for convenience
pub use config::ProofsConfig;
pub use error::{DecodeError, QueryError, QueryResult};
pub use ledger::{
    DemoRecordSource, ExplorerClient, ExplorerConfig, RawBox, RawRecordSource, SourceMode,
    StaticRecordSource, build_record_source,
};
pub use proofs::{
    ProofDecoder, ProofRecord, ProofScan, ProofService, RegisterLayout, ReputationProof,
};

// Re-export API types
pub use api::{ProofsApiState, create_proofs_router};
