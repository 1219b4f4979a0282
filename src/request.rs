//! JSON transfer-request boundary
//!
//! A malformed payload is rejected here and never reaches
//! [`Ledger::transfer`]; domain errors propagate unchanged.

use crate::error::Result;
use crate::ledger::Ledger;
use serde::{Deserialize, Serialize};

/// Wire shape of a transfer request
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TransferRequest {
    pub from_iban: String,
    pub to_iban: String,
    pub amount: f64,
}

impl TransferRequest {
    /// Parse a request from JSON, mapping any deserialization failure to
    /// [`crate::LedgerError::MalformedRequest`]
    pub fn from_json(json: &str) -> Result<Self> {
        let request = serde_json::from_str(json)?;
        Ok(request)
    }
}

impl Ledger {
    /// Execute a transfer described by a JSON payload
    pub fn transfer_json(&mut self, json: &str) -> Result<()> {
        let request = TransferRequest::from_json(json)?;
        self.transfer(&request.from_iban, &request.to_iban, request.amount)
    }
}
