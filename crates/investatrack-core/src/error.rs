//! Error types for investatrack-core

use thiserror::Error;

/// Local precondition failures of the transaction form.
///
/// The Display text is what the user sees.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Please fill in all required fields")]
    MissingFields { fields: Vec<&'static str> },

    #[error("Please enter a valid number for {label}")]
    InvalidNumber { label: &'static str },
}
