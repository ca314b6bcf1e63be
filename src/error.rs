//! Error types for proof decoding and ledger queries.

use thiserror::Error;

/// A raw ledger record that cannot become a [`ReputationProof`].
///
/// Decode errors are per-record: the offending box is skipped and the rest
/// of the batch is still processed.
///
/// [`ReputationProof`]: crate::proofs::ReputationProof
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DecodeError {
    /// A required field or register is absent.
    #[error("Missing required field: {0}")]
    MissingField(&'static str),

    /// A register expected to hold an integer holds something else.
    #[error("Field {field} is not a non-negative integer: {value:?}")]
    NotANumber {
        /// Field name.
        field: &'static str,
        /// Raw rendered value.
        value: String,
    },

    /// The reputation token amount is zero.
    #[error("Total amount must be greater than zero")]
    NonPositiveTotal,

    /// More reputation was expended than the box holds.
    #[error("Expended amount {expended} exceeds total amount {total}")]
    ExpendedExceedsTotal {
        /// Expended amount.
        expended: u64,
        /// Total amount.
        total: u64,
    },

    /// The owner register names a different public key than the one queried.
    #[error("Owner register {found:?} does not match requested owner {expected:?}")]
    OwnerMismatch {
        /// Requested owner.
        expected: String,
        /// Owner found in the register.
        found: String,
    },
}

/// The ledger query failed as a whole.
///
/// A query error fails the entire request; callers never see a partial list.
#[derive(Error, Debug)]
pub enum QueryError {
    /// The request could not be sent or the connection broke.
    #[error("Ledger query transport failure: {0}")]
    Transport(#[from] reqwest::Error),

    /// The explorer answered with a non-success status.
    #[error("Ledger query failed with status {status}: {body}")]
    Status {
        /// HTTP status code.
        status: u16,
        /// Response body, truncated.
        body: String,
    },

    /// The explorer answered, but the payload was not a box listing.
    #[error("Invalid ledger query response: {0}")]
    InvalidResponse(String),

    /// Every attempt hit a transient failure.
    #[error("Ledger query failed after {attempts} attempts: {last}")]
    RetriesExhausted {
        /// Attempts made.
        attempts: u32,
        /// Last failure seen.
        last: String,
    },

    /// The owner holds more boxes than one listing may carry.
    #[error("Ledger query matched {total} boxes, more than the limit of {limit}")]
    TooManyRecords {
        /// Configured `max_records`.
        limit: usize,
        /// Boxes reported by the explorer.
        total: u64,
    },
}

/// Result type for ledger queries.
pub type QueryResult<T> = std::result::Result<T, QueryError>;
