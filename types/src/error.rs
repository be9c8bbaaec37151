//! Validation errors for the core types.

use thiserror::Error;

/// Errors produced when constructing core types from raw strings.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum TypeError {
    #[error("address is empty")]
    EmptyAddress,

    #[error("amount is not a number: {0:?}")]
    AmountNotNumeric(String),

    #[error("amount is not finite: {0:?}")]
    AmountNotFinite(String),

    #[error("amount is negative: {0:?}")]
    AmountNegative(String),
}
