//! Core ledger: account map, transfers, emission and destruction
//!
//! All mutation funnels through [`Ledger::transfer`]; emission and
//! destruction are expressed in terms of the two reserved accounts. The
//! ledger is single-owner and lock-free; see [`crate::shared`] for the
//! multi-owner wrapper.

use crate::account::{Account, AccountStatus};
use crate::error::{LedgerError, Result};
use std::collections::HashMap;
use tracing::{info, warn};

/// Internal lookup key of the emission account
pub const EMISSION_KEY: &str = "emission";

/// Internal lookup key of the destruction account
pub const DESTRUCTION_KEY: &str = "destruction";

/// In-memory payment ledger
///
/// The emission and destruction accounts are named fields rather than map
/// entries, so a user-created account can never shadow them; they are still
/// addressable through [`EMISSION_KEY`] and [`DESTRUCTION_KEY`]. The IBANs
/// passed to [`Ledger::new`] are display identifiers only, never lookup
/// keys.
#[derive(Debug, Clone)]
pub struct Ledger {
    emission: Account,
    destruction: Account,
    accounts: HashMap<String, Account>,
}

impl Ledger {
    /// Create a ledger holding only the two reserved accounts, both active
    /// with a zero balance
    pub fn new(emission_iban: impl Into<String>, destruction_iban: impl Into<String>) -> Self {
        let ledger = Ledger {
            emission: Account::new(emission_iban),
            destruction: Account::new(destruction_iban),
            accounts: HashMap::new(),
        };
        info!("Payment ledger created");
        ledger
    }

    /// Resolve a lookup key to an account, reserved keys included
    fn account(&self, key: &str) -> Option<&Account> {
        match key {
            EMISSION_KEY => Some(&self.emission),
            DESTRUCTION_KEY => Some(&self.destruction),
            _ => self.accounts.get(key),
        }
    }

    fn account_mut(&mut self, key: &str) -> Option<&mut Account> {
        match key {
            EMISSION_KEY => Some(&mut self.emission),
            DESTRUCTION_KEY => Some(&mut self.destruction),
            _ => self.accounts.get_mut(key),
        }
    }

    /// Apply a balance delta. Callers verify existence first.
    fn adjust(&mut self, key: &str, delta: f64) {
        if let Some(account) = self.account_mut(key) {
            account.balance += delta;
        }
    }

    /// Register a new account with a zero balance
    ///
    /// The reserved keys `"emission"` and `"destruction"` count as taken.
    pub fn create_account(&mut self, iban: &str) -> Result<()> {
        if self.contains(iban) {
            warn!("Account {} already exists", iban);
            return Err(LedgerError::AccountExists(iban.to_string()));
        }
        self.accounts.insert(iban.to_string(), Account::new(iban));
        Ok(())
    }

    /// Move `amount` from one account to another
    ///
    /// Precondition order is fixed: sender exists, recipient exists, both
    /// active, amount valid, funds sufficient. The first failing check wins
    /// and nothing is mutated on any failure.
    pub fn transfer(&mut self, from: &str, to: &str, amount: f64) -> Result<()> {
        info!("Transfer attempt: {} from {} to {}", amount, from, to);

        let sender = match self.account(from) {
            Some(account) => account,
            None => {
                warn!("Sender {} not found", from);
                return Err(LedgerError::AccountNotFound(from.to_string()));
            }
        };
        let recipient = match self.account(to) {
            Some(account) => account,
            None => {
                warn!("Recipient {} not found", to);
                return Err(LedgerError::AccountNotFound(to.to_string()));
            }
        };

        if !sender.is_active() || !recipient.is_active() {
            warn!("Transfer rejected: one of {} and {} is blocked", from, to);
            return Err(LedgerError::AccountBlocked);
        }

        check_amount(amount)?;

        if sender.balance < amount {
            warn!("Insufficient funds on {}", from);
            return Err(LedgerError::InsufficientFunds(from.to_string()));
        }

        // Checks passed; a self-transfer nets to zero.
        self.adjust(from, -amount);
        self.adjust(to, amount);

        info!("Transferred {} from {} to {}", amount, from, to);
        Ok(())
    }

    /// Credit the emission account by fiat
    ///
    /// No source account is debited; this intentionally breaks conservation.
    /// Fails only on a negative or non-finite amount.
    pub fn emit(&mut self, amount: f64) -> Result<()> {
        check_amount(amount)?;
        self.emission.balance += amount;
        info!("Emitted {}", amount);
        Ok(())
    }

    /// Remove `amount` from an account permanently
    ///
    /// Funds pass through the destruction account, whose balance is reset
    /// to zero immediately afterwards. A failed transfer leaves everything
    /// untouched, reset included.
    pub fn destroy(&mut self, from: &str, amount: f64) -> Result<()> {
        self.transfer(from, DESTRUCTION_KEY, amount)?;
        self.destruction.balance = 0.0;
        info!("Destroyed {} from {}", amount, from);
        Ok(())
    }

    /// Block an account. Idempotent.
    pub fn block_account(&mut self, iban: &str) -> Result<()> {
        let account = self
            .account_mut(iban)
            .ok_or_else(|| LedgerError::AccountNotFound(iban.to_string()))?;
        account.status = AccountStatus::Blocked;
        info!("Account {} blocked", iban);
        Ok(())
    }

    /// Unblock an account. Idempotent.
    pub fn unblock_account(&mut self, iban: &str) -> Result<()> {
        let account = self
            .account_mut(iban)
            .ok_or_else(|| LedgerError::AccountNotFound(iban.to_string()))?;
        account.status = AccountStatus::Active;
        info!("Account {} unblocked", iban);
        Ok(())
    }

    /// Copy-out listing of every account keyed by its internal lookup key
    pub fn snapshot(&self) -> HashMap<String, Account> {
        let mut out = HashMap::with_capacity(self.accounts.len() + 2);
        out.insert(EMISSION_KEY.to_string(), self.emission.clone());
        out.insert(DESTRUCTION_KEY.to_string(), self.destruction.clone());
        for (key, account) in &self.accounts {
            out.insert(key.clone(), account.clone());
        }
        out
    }

    /// Whether a lookup key resolves to an account
    pub fn contains(&self, key: &str) -> bool {
        self.account(key).is_some()
    }

    pub fn balance_of(&self, key: &str) -> Option<f64> {
        self.account(key).map(|account| account.balance)
    }

    /// Sum over every account, reserved ones included
    pub fn total_balance(&self) -> f64 {
        self.emission.balance
            + self.destruction.balance
            + self.accounts.values().map(|account| account.balance).sum::<f64>()
    }
}

fn check_amount(amount: f64) -> Result<()> {
    if !amount.is_finite() || amount < 0.0 {
        return Err(LedgerError::InvalidAmount(amount));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_ledger() -> Ledger {
        Ledger::new("EM00AA000000000000000000", "DE00BB000000000000000000")
    }

    #[test]
    fn test_new_ledger_has_reserved_accounts() {
        let ledger = test_ledger();
        assert!(ledger.contains(EMISSION_KEY));
        assert!(ledger.contains(DESTRUCTION_KEY));
        assert_eq!(ledger.balance_of(EMISSION_KEY), Some(0.0));
        assert_eq!(ledger.balance_of(DESTRUCTION_KEY), Some(0.0));
    }

    #[test]
    fn test_reserved_ibans_are_display_only() {
        let ledger = test_ledger();
        // Lookup goes through the fixed keys, not the IBAN strings.
        assert!(!ledger.contains("EM00AA000000000000000000"));
        let snapshot = ledger.snapshot();
        assert_eq!(snapshot[EMISSION_KEY].iban, "EM00AA000000000000000000");
        assert_eq!(snapshot[DESTRUCTION_KEY].iban, "DE00BB000000000000000000");
    }

    #[test]
    fn test_create_account() {
        let mut ledger = test_ledger();
        ledger.create_account("BY04CBDC00000000000000000000").unwrap();
        assert_eq!(ledger.balance_of("BY04CBDC00000000000000000000"), Some(0.0));
    }

    #[test]
    fn test_create_duplicate_account_fails() {
        let mut ledger = test_ledger();
        ledger.create_account("BY04CBDC00000000000000000000").unwrap();
        let err = ledger
            .create_account("BY04CBDC00000000000000000000")
            .unwrap_err();
        assert_eq!(
            err,
            LedgerError::AccountExists("BY04CBDC00000000000000000000".to_string())
        );
    }

    #[test]
    fn test_create_account_rejects_reserved_keys() {
        let mut ledger = test_ledger();
        assert!(ledger.create_account(EMISSION_KEY).is_err());
        assert!(ledger.create_account(DESTRUCTION_KEY).is_err());
    }

    #[test]
    fn test_transfer_moves_funds_and_conserves_total() {
        let mut ledger = test_ledger();
        ledger.create_account("A").unwrap();
        ledger.emit(1000.0).unwrap();

        let total_before = ledger.total_balance();
        ledger.transfer(EMISSION_KEY, "A", 100.0).unwrap();

        assert_eq!(ledger.balance_of(EMISSION_KEY), Some(900.0));
        assert_eq!(ledger.balance_of("A"), Some(100.0));
        assert_eq!(ledger.total_balance(), total_before);
    }

    #[test]
    fn test_transfer_sender_missing_reported_first() {
        let mut ledger = test_ledger();
        // Neither account exists: the sender must be the one reported.
        let err = ledger.transfer("ghost-from", "ghost-to", 1.0).unwrap_err();
        assert_eq!(err, LedgerError::AccountNotFound("ghost-from".to_string()));
    }

    #[test]
    fn test_transfer_missing_recipient_reported_before_blocked_sender() {
        let mut ledger = test_ledger();
        ledger.create_account("A").unwrap();
        ledger.block_account("A").unwrap();
        let err = ledger.transfer("A", "ghost", 1.0).unwrap_err();
        assert_eq!(err, LedgerError::AccountNotFound("ghost".to_string()));
    }

    #[test]
    fn test_transfer_blocked_account_fails_without_mutation() {
        let mut ledger = test_ledger();
        ledger.create_account("A").unwrap();
        ledger.create_account("B").unwrap();
        ledger.emit(50.0).unwrap();
        ledger.transfer(EMISSION_KEY, "A", 50.0).unwrap();

        ledger.block_account("A").unwrap();
        let before = ledger.snapshot();
        let err = ledger.transfer("A", "B", 1.0).unwrap_err();
        assert_eq!(err, LedgerError::AccountBlocked);
        assert_eq!(ledger.snapshot(), before);

        // Blocked recipient fails the same way.
        ledger.unblock_account("A").unwrap();
        ledger.block_account("B").unwrap();
        let err = ledger.transfer("A", "B", 1.0).unwrap_err();
        assert_eq!(err, LedgerError::AccountBlocked);
    }

    #[test]
    fn test_transfer_insufficient_funds_fails_without_mutation() {
        let mut ledger = test_ledger();
        ledger.create_account("A").unwrap();
        let before = ledger.snapshot();
        let err = ledger.transfer(EMISSION_KEY, "A", 999_999.0).unwrap_err();
        assert_eq!(err, LedgerError::InsufficientFunds(EMISSION_KEY.to_string()));
        assert_eq!(ledger.snapshot(), before);
    }

    #[test]
    fn test_transfer_rejects_negative_and_non_finite_amounts() {
        let mut ledger = test_ledger();
        ledger.create_account("A").unwrap();
        ledger.emit(100.0).unwrap();

        let before = ledger.snapshot();
        for amount in [-1.0, f64::NAN, f64::INFINITY, f64::NEG_INFINITY] {
            let err = ledger.transfer(EMISSION_KEY, "A", amount).unwrap_err();
            assert!(matches!(err, LedgerError::InvalidAmount(_)));
        }
        assert_eq!(ledger.snapshot(), before);
    }

    #[test]
    fn test_zero_amount_transfer_is_a_no_op() {
        let mut ledger = test_ledger();
        ledger.create_account("A").unwrap();
        let before = ledger.snapshot();
        ledger.transfer(EMISSION_KEY, "A", 0.0).unwrap();
        assert_eq!(ledger.snapshot(), before);
    }

    #[test]
    fn test_self_transfer_nets_to_zero() {
        let mut ledger = test_ledger();
        ledger.create_account("A").unwrap();
        ledger.emit(100.0).unwrap();
        ledger.transfer(EMISSION_KEY, "A", 100.0).unwrap();
        ledger.transfer("A", "A", 40.0).unwrap();
        assert_eq!(ledger.balance_of("A"), Some(100.0));
    }

    #[test]
    fn test_emit_rejects_negative_amount() {
        let mut ledger = test_ledger();
        let err = ledger.emit(-5.0).unwrap_err();
        assert_eq!(err, LedgerError::InvalidAmount(-5.0));
        assert_eq!(ledger.balance_of(EMISSION_KEY), Some(0.0));
    }

    #[test]
    fn test_destroy_vanishes_funds() {
        let mut ledger = test_ledger();
        ledger.create_account("A").unwrap();
        ledger.emit(1000.0).unwrap();
        ledger.transfer(EMISSION_KEY, "A", 100.0).unwrap();

        let total_before = ledger.total_balance();
        ledger.destroy("A", 10.0).unwrap();

        assert_eq!(ledger.balance_of("A"), Some(90.0));
        assert_eq!(ledger.balance_of(DESTRUCTION_KEY), Some(0.0));
        assert_eq!(ledger.total_balance(), total_before - 10.0);
    }

    #[test]
    fn test_failed_destroy_leaves_state_untouched() {
        let mut ledger = test_ledger();
        ledger.create_account("A").unwrap();
        let before = ledger.snapshot();

        let err = ledger.destroy("A", 10.0).unwrap_err();
        assert_eq!(err, LedgerError::InsufficientFunds("A".to_string()));
        assert_eq!(ledger.snapshot(), before);

        let err = ledger.destroy("ghost", 10.0).unwrap_err();
        assert_eq!(err, LedgerError::AccountNotFound("ghost".to_string()));
        assert_eq!(ledger.snapshot(), before);
    }

    #[test]
    fn test_block_and_unblock_are_idempotent() {
        let mut ledger = test_ledger();
        ledger.create_account("A").unwrap();

        ledger.block_account("A").unwrap();
        ledger.block_account("A").unwrap();
        assert_eq!(ledger.snapshot()["A"].status, AccountStatus::Blocked);

        ledger.unblock_account("A").unwrap();
        ledger.unblock_account("A").unwrap();
        assert_eq!(ledger.snapshot()["A"].status, AccountStatus::Active);
    }

    #[test]
    fn test_block_unknown_account_fails() {
        let mut ledger = test_ledger();
        let err = ledger.block_account("ghost").unwrap_err();
        assert_eq!(err, LedgerError::AccountNotFound("ghost".to_string()));
        assert!(ledger.unblock_account("ghost").is_err());
    }

    #[test]
    fn test_snapshot_is_copy_out() {
        let mut ledger = test_ledger();
        ledger.create_account("A").unwrap();

        let mut snapshot = ledger.snapshot();
        snapshot.get_mut("A").unwrap().balance = 1_000_000.0;
        snapshot.get_mut(EMISSION_KEY).unwrap().status = AccountStatus::Blocked;

        assert_eq!(ledger.balance_of("A"), Some(0.0));
        assert_eq!(ledger.snapshot()[EMISSION_KEY].status, AccountStatus::Active);
    }
}
