//! HTTP API endpoints for the reputation proof service

pub mod proofs;

pub use proofs::{ProofsApiState, create_proofs_router};
