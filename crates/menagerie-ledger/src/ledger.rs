//! The token ledger: balances plus an append-only log of all movements.
//!
//! The [`TokenLedger`] struct is the in-memory representation of the
//! fungible balance store. It enforces the funding rule (no debit beyond
//! the source's balance), records every movement as a [`LedgerEntry`],
//! and settles multi-leg batches atomically.
//!
//! # Design
//!
//! - **Append-only**: entries are never modified or deleted.
//! - **Validate, then commit**: every fallible check happens before any
//!   balance is written, so a failed operation leaves no trace.
//! - **Conservation**: the sum of all balances always equals the deposited
//!   supply; [`TokenLedger::audit`] verifies it.
//! - **Precision**: all amounts are unsigned integer minor units -- no
//!   floating point anywhere near settlement.

use std::collections::BTreeMap;

use chrono::Utc;

use menagerie_types::{EntryReason, LedgerEntry, Principal};

use crate::LedgerError;

// ---------------------------------------------------------------------------
// Transfer legs
// ---------------------------------------------------------------------------

/// One movement inside a multi-leg settlement.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TransferLeg {
    /// Amount to move, in minor units (must be positive).
    pub amount: u128,
    /// Source principal.
    pub from: Principal,
    /// Destination principal.
    pub to: Principal,
    /// Category recorded in the entry log.
    pub reason: EntryReason,
}

// ---------------------------------------------------------------------------
// Audit
// ---------------------------------------------------------------------------

/// The result of a conservation audit over the whole ledger.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuditResult {
    /// Circulating balances equal the deposited supply.
    Balanced,
    /// Balances and supply disagree. Transfers conserve value by
    /// construction, so this indicates corruption.
    Imbalanced {
        /// Supply injected through deposits.
        deposited: u128,
        /// Sum of all current balances.
        circulating: u128,
    },
}

// ---------------------------------------------------------------------------
// Token ledger
// ---------------------------------------------------------------------------

/// The fungible balance store backing mint payments and marketplace
/// settlement.
///
/// Every movement -- supply deposits, mint fees, sale payments, market
/// fees, plain transfers -- debits one balance, credits another, and
/// appends one [`LedgerEntry`]. The ledger enforces two invariants:
///
/// 1. No debit ever exceeds the source's balance.
/// 2. Value is conserved: balances sum to the deposited supply.
#[derive(Debug)]
pub struct TokenLedger {
    /// Current balance per principal. Absent means zero.
    balances: BTreeMap<Principal, u128>,
    /// All movements, in application order.
    entries: Vec<LedgerEntry>,
    /// Supply injected through deposits; the conservation anchor.
    total_supply: u128,
    /// Sequence number the next entry will receive.
    next_sequence: u64,
}

impl TokenLedger {
    /// Create a new empty ledger.
    pub const fn new() -> Self {
        Self {
            balances: BTreeMap::new(),
            entries: Vec::new(),
            total_supply: 0,
            next_sequence: 1,
        }
    }

    /// Return the number of entries in the log.
    pub const fn len(&self) -> usize {
        self.entries.len()
    }

    /// Return whether the log has no entries.
    pub const fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Return the current balance of `principal` (zero if never seen).
    pub fn balance_of(&self, principal: Principal) -> u128 {
        self.balances.get(&principal).copied().unwrap_or(0)
    }

    /// Return the supply injected through deposits so far.
    pub const fn total_supply(&self) -> u128 {
        self.total_supply
    }

    /// Return all entries, in application order.
    pub fn entries(&self) -> &[LedgerEntry] {
        &self.entries
    }

    /// Return all entries that touch `principal`, as source or destination.
    pub fn entries_for(&self, principal: Principal) -> Vec<&LedgerEntry> {
        self.entries
            .iter()
            .filter(|entry| entry.from == Some(principal) || entry.to == principal)
            .collect()
    }

    /// Inject supply from outside the system, crediting `to`.
    ///
    /// Returns the sequence number of the recorded entry.
    ///
    /// # Errors
    ///
    /// Returns [`LedgerError::ZeroAmount`] for a zero deposit, or
    /// [`LedgerError::BalanceOverflow`] if the credit would exceed
    /// `u128::MAX`.
    pub fn deposit(&mut self, to: Principal, amount: u128) -> Result<u64, LedgerError> {
        if amount == 0 {
            return Err(LedgerError::ZeroAmount);
        }
        let credited = self
            .balance_of(to)
            .checked_add(amount)
            .ok_or(LedgerError::BalanceOverflow { principal: to })?;
        let supply = self
            .total_supply
            .checked_add(amount)
            .ok_or(LedgerError::Internal("total supply overflow"))?;
        self.ensure_sequence_space(1)?;

        self.balances.insert(to, credited);
        self.total_supply = supply;
        Ok(self.push_entry(EntryReason::Deposit, None, to, amount))
    }

    /// Move `amount` from one principal to another, untagged.
    ///
    /// Returns the sequence number of the recorded entry.
    ///
    /// # Errors
    ///
    /// Returns [`LedgerError::InsufficientBalance`] if `from` cannot cover
    /// the amount; [`LedgerError::ZeroAmount`] and
    /// [`LedgerError::SelfTransfer`] for degenerate legs.
    pub fn transfer(
        &mut self,
        amount: u128,
        from: Principal,
        to: Principal,
    ) -> Result<u64, LedgerError> {
        self.transfer_tagged(amount, from, to, EntryReason::Transfer)
    }

    /// Move `amount` from one principal to another, recording it under the
    /// given category.
    ///
    /// Returns the sequence number of the recorded entry. The transfer is
    /// atomic: on any error neither balance changes and nothing is logged.
    ///
    /// # Errors
    ///
    /// Same as [`TokenLedger::transfer`].
    pub fn transfer_tagged(
        &mut self,
        amount: u128,
        from: Principal,
        to: Principal,
        reason: EntryReason,
    ) -> Result<u64, LedgerError> {
        if amount == 0 {
            return Err(LedgerError::ZeroAmount);
        }
        if from == to {
            return Err(LedgerError::SelfTransfer);
        }
        let available = self.balance_of(from);
        let debited = available
            .checked_sub(amount)
            .ok_or(LedgerError::InsufficientBalance {
                needed: amount,
                available,
            })?;
        let credited = self
            .balance_of(to)
            .checked_add(amount)
            .ok_or(LedgerError::BalanceOverflow { principal: to })?;
        self.ensure_sequence_space(1)?;

        self.balances.insert(from, debited);
        self.balances.insert(to, credited);
        Ok(self.push_entry(reason, Some(from), to, amount))
    }

    /// Apply a batch of transfer legs as one atomic unit.
    ///
    /// Each leg is validated against the balances the preceding legs would
    /// leave behind. If any leg fails, no balance changes and nothing is
    /// logged; on success every leg is applied and logged in order.
    ///
    /// # Errors
    ///
    /// The first failing leg's error, with the ledger untouched.
    pub fn settle(&mut self, legs: &[TransferLeg]) -> Result<(), LedgerError> {
        // Validation pass: project every leg onto scratch balances.
        let mut projected: BTreeMap<Principal, u128> = BTreeMap::new();
        for leg in legs {
            if leg.amount == 0 {
                return Err(LedgerError::ZeroAmount);
            }
            if leg.from == leg.to {
                return Err(LedgerError::SelfTransfer);
            }
            let available = projected
                .get(&leg.from)
                .copied()
                .unwrap_or_else(|| self.balance_of(leg.from));
            let receiving = projected
                .get(&leg.to)
                .copied()
                .unwrap_or_else(|| self.balance_of(leg.to));
            let debited =
                available
                    .checked_sub(leg.amount)
                    .ok_or(LedgerError::InsufficientBalance {
                        needed: leg.amount,
                        available,
                    })?;
            let credited = receiving
                .checked_add(leg.amount)
                .ok_or(LedgerError::BalanceOverflow { principal: leg.to })?;
            projected.insert(leg.from, debited);
            projected.insert(leg.to, credited);
        }
        let leg_count = u64::try_from(legs.len())
            .map_err(|_overflow| LedgerError::Internal("leg count exceeds u64 range"))?;
        self.ensure_sequence_space(leg_count)?;

        // Commit pass: write projected balances, then log every leg.
        for (principal, balance) in projected {
            self.balances.insert(principal, balance);
        }
        for leg in legs {
            self.push_entry(leg.reason, Some(leg.from), leg.to, leg.amount);
        }
        Ok(())
    }

    /// Verify conservation: circulating balances must equal the deposited
    /// supply.
    pub fn audit(&self) -> AuditResult {
        let mut circulating: u128 = 0;
        for balance in self.balances.values() {
            circulating = circulating.saturating_add(*balance);
        }
        if circulating == self.total_supply {
            AuditResult::Balanced
        } else {
            AuditResult::Imbalanced {
                deposited: self.total_supply,
                circulating,
            }
        }
    }

    /// Check that `count` more sequence numbers can be allocated.
    fn ensure_sequence_space(&self, count: u64) -> Result<(), LedgerError> {
        self.next_sequence
            .checked_add(count)
            .map(|_next| ())
            .ok_or(LedgerError::Internal("entry sequence space exhausted"))
    }

    /// Append an entry and return its sequence number. Callers must have
    /// verified sequence space beforehand.
    fn push_entry(
        &mut self,
        entry_type: EntryReason,
        from: Option<Principal>,
        to: Principal,
        amount: u128,
    ) -> u64 {
        let sequence = self.next_sequence;
        // Bounded by the sequence-space check in the validation phase.
        self.next_sequence = sequence.saturating_add(1);
        self.entries.push(LedgerEntry {
            sequence,
            entry_type,
            from,
            to,
            amount,
            recorded_at: Utc::now(),
        });
        tracing::debug!(sequence, entry_type = ?entry_type, amount, "ledger entry recorded");
        sequence
    }
}

impl Default for TokenLedger {
    fn default() -> Self {
        Self::new()
    }
}
