//! Free amount and free percentage of a proof.
//!
//! Percentages are rounded half away from zero to two decimals, i.e.
//! `f64::round` applied to the value scaled by 100.

use serde::Serialize;

use crate::error::DecodeError;

/// Derived view of how much of a proof is still free
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ProofMetrics {
    pub free_amount: u64,
    pub free_percentage: f64,
}

/// Amount not yet expended
fn free_amount(total_amount: u64, expended_amount: u64) -> Result<u64, DecodeError> {
    total_amount
        .checked_sub(expended_amount)
        .ok_or(DecodeError::ExpendedExceedsTotal {
            expended: expended_amount,
            total: total_amount,
        })
}

/// Free amount and percentage for a validated `(total, expended)` pair
pub fn compute(total_amount: u64, expended_amount: u64) -> Result<ProofMetrics, DecodeError> {
    if total_amount == 0 {
        return Err(DecodeError::NonPositiveTotal);
    }
    free_amount(total_amount, expended_amount)?;
    Ok(derive(total_amount, expended_amount))
}

/// Metrics for amounts already checked by [`compute`]
pub(crate) fn derive(total_amount: u64, expended_amount: u64) -> ProofMetrics {
    let free_amount = total_amount - expended_amount;
    ProofMetrics {
        free_amount,
        free_percentage: free_percentage(free_amount, total_amount),
    }
}

/// `free / total * 100`, rounded to two decimals. `total` must be non-zero.
fn free_percentage(free_amount: u64, total_amount: u64) -> f64 {
    let ratio = free_amount as f64 / total_amount as f64;
    round2(ratio * 100.0)
}

fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}
