//! payledger - A minimal in-memory payment ledger
//!
//! # Architecture
//!
//! The crate is organized into logical modules:
//!
//! ## Core Ledger
//! - [`ledger`] - Account map, transfers, emission and destruction
//! - [`account`] - Account record and status
//!
//! ## Boundaries
//! - [`request`] - JSON transfer-request boundary
//! - [`iban`] - Pseudo-random IBAN generation for demo/test seeding
//!
//! ## Concurrency Extension
//! - [`shared`] - Lock-guarded ledger for multi-owner use
//!
//! ## Configuration & Utilities
//! - [`config`] - Configuration management
//! - [`error`] - Error types

#![forbid(unsafe_code)]

// ============================================================================
// Core Ledger
// ============================================================================
pub mod account;
pub mod ledger;

// ============================================================================
// Boundaries
// ============================================================================
pub mod iban;
pub mod request;

// ============================================================================
// Concurrency Extension
// ============================================================================
pub mod shared;

// ============================================================================
// Configuration & Utilities
// ============================================================================
pub mod config;
pub mod error;

pub use account::{Account, AccountStatus};
pub use error::{LedgerError, Result};
pub use ledger::Ledger;
pub use request::TransferRequest;
pub use shared::SharedLedger;
