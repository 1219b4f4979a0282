//! Lock-guarded ledger for multi-owner use
//!
//! The plain [`Ledger`] is single-owner by design. This wrapper is the
//! concurrency extension for callers that need to share one ledger across
//! threads: every mutating call holds the write lock across the full
//! check-then-mutate sequence, so concurrent transfers touching overlapping
//! accounts cannot interleave.

use crate::account::Account;
use crate::error::Result;
use crate::ledger::Ledger;
use parking_lot::RwLock;
use std::collections::HashMap;
use std::sync::Arc;

/// Thread-safe handle to a ledger
#[derive(Debug, Clone)]
pub struct SharedLedger {
    inner: Arc<RwLock<Ledger>>,
}

impl SharedLedger {
    pub fn new(emission_iban: impl Into<String>, destruction_iban: impl Into<String>) -> Self {
        SharedLedger {
            inner: Arc::new(RwLock::new(Ledger::new(emission_iban, destruction_iban))),
        }
    }

    /// Wrap an existing ledger
    pub fn from_ledger(ledger: Ledger) -> Self {
        SharedLedger {
            inner: Arc::new(RwLock::new(ledger)),
        }
    }

    pub fn create_account(&self, iban: &str) -> Result<()> {
        self.inner.write().create_account(iban)
    }

    pub fn transfer(&self, from: &str, to: &str, amount: f64) -> Result<()> {
        self.inner.write().transfer(from, to, amount)
    }

    pub fn transfer_json(&self, json: &str) -> Result<()> {
        self.inner.write().transfer_json(json)
    }

    pub fn emit(&self, amount: f64) -> Result<()> {
        self.inner.write().emit(amount)
    }

    pub fn destroy(&self, from: &str, amount: f64) -> Result<()> {
        self.inner.write().destroy(from, amount)
    }

    pub fn block_account(&self, iban: &str) -> Result<()> {
        self.inner.write().block_account(iban)
    }

    pub fn unblock_account(&self, iban: &str) -> Result<()> {
        self.inner.write().unblock_account(iban)
    }

    pub fn snapshot(&self) -> HashMap<String, Account> {
        self.inner.read().snapshot()
    }

    pub fn contains(&self, key: &str) -> bool {
        self.inner.read().contains(key)
    }

    pub fn balance_of(&self, key: &str) -> Option<f64> {
        self.inner.read().balance_of(key)
    }

    pub fn total_balance(&self) -> f64 {
        self.inner.read().total_balance()
    }
}
