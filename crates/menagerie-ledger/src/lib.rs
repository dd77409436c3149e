//! Fungible token ledger for the Menagerie registry and marketplace.
//!
//! Every minor unit of value in the system is tracked through this ledger.
//! Supply enters exclusively via deposits; transfers move value between
//! principals and never create or destroy it. The sum of all balances must
//! always equal the deposited supply, and [`TokenLedger::audit`] verifies
//! exactly that.
//!
//! # Architecture
//!
//! - [`ledger`] -- The [`TokenLedger`] struct: balances, an append-only
//!   entry log, single-leg transfers, and multi-leg atomic settlement.
//!
//! # Atomicity
//!
//! A transfer either moves the full amount or moves nothing; there is no
//! partial transfer. Multi-leg settlements ([`TokenLedger::settle`])
//! extend the same guarantee across several movements: every leg is
//! validated against the balances the preceding legs would leave behind,
//! and only a fully valid batch is applied. A purchase that pays the
//! seller and then cannot cover the fee therefore leaves every balance
//! untouched.
//!
//! # Usage
//!
//! ```
//! use menagerie_ledger::TokenLedger;
//! use menagerie_types::Principal;
//!
//! let mut ledger = TokenLedger::new();
//! let alice = Principal::new();
//! let bob = Principal::new();
//!
//! ledger.deposit(alice, 500).ok();
//! ledger.transfer(200, alice, bob).ok();
//!
//! assert_eq!(ledger.balance_of(alice), 300);
//! assert_eq!(ledger.balance_of(bob), 200);
//! ```

pub mod ledger;

// Re-export primary types at crate root.
pub use ledger::{AuditResult, TokenLedger, TransferLeg};

use menagerie_types::Principal;

// ---------------------------------------------------------------------------
// Error types
// ---------------------------------------------------------------------------

/// Errors that can occur when recording ledger movements.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum LedgerError {
    /// Transfer amounts must be strictly positive.
    #[error("transfer amount must be positive")]
    ZeroAmount,

    /// A transfer cannot move value from a principal to itself.
    #[error("transfer source and destination are the same principal")]
    SelfTransfer,

    /// The source principal cannot cover the debit.
    #[error("insufficient balance: needed {needed}, available {available}")]
    InsufficientBalance {
        /// Minor units the debit required.
        needed: u128,
        /// Minor units actually available to the source.
        available: u128,
    },

    /// A credit would push the destination's balance past `u128::MAX`.
    #[error("balance overflow crediting {principal}")]
    BalanceOverflow {
        /// The principal whose balance would overflow.
        principal: Principal,
    },

    /// An internal error that should not occur in normal operation.
    #[error("internal ledger error: {0}")]
    Internal(&'static str),
}
