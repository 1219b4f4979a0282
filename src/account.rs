//! Account record and status

use serde::{Deserialize, Serialize};

/// Whether an account may take part in transfers
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AccountStatus {
    Active,
    Blocked,
}

/// A single ledger account
///
/// Serializes to the wire shape `{balance, iban, status}` used by the
/// account-listing output.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Account {
    pub balance: f64,
    pub iban: String,
    pub status: AccountStatus,
}

impl Account {
    /// New active account with a zero balance
    pub fn new(iban: impl Into<String>) -> Self {
        Account {
            balance: 0.0,
            iban: iban.into(),
            status: AccountStatus::Active,
        }
    }

    pub fn is_active(&self) -> bool {
        self.status == AccountStatus::Active
    }
}
