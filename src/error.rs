//! Error types for payledger

use std::fmt;

#[derive(Debug, Clone, PartialEq)]
pub enum LedgerError {
    AccountNotFound(String),
    AccountExists(String),
    AccountBlocked,
    InsufficientFunds(String),
    InvalidAmount(f64),
    MalformedRequest(String),
}

impl fmt::Display for LedgerError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            LedgerError::AccountNotFound(iban) => write!(f, "Account {} not found", iban),
            LedgerError::AccountExists(iban) => write!(f, "Account {} already exists", iban),
            LedgerError::AccountBlocked => write!(f, "One of the accounts is blocked"),
            LedgerError::InsufficientFunds(iban) => {
                write!(f, "Insufficient funds on account {}", iban)
            }
            LedgerError::InvalidAmount(amount) => write!(f, "Invalid amount: {}", amount),
            LedgerError::MalformedRequest(msg) => write!(f, "Malformed request: {}", msg),
        }
    }
}

impl std::error::Error for LedgerError {}

impl From<serde_json::Error> for LedgerError {
    fn from(err: serde_json::Error) -> Self {
        LedgerError::MalformedRequest(err.to_string())
    }
}

/// Convenience alias used across the crate
pub type Result<T> = std::result::Result<T, LedgerError>;
