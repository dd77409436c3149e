//! The public error vocabulary of the protocol.
//!
//! Every registry and marketplace operation fails with one of the kinds
//! defined here. The kinds are a stable external contract: callers match
//! on them, so variants are never merged or renamed, and reserved kinds
//! stay enumerable even while no code path currently produces them.

use menagerie_ledger::LedgerError;

/// Errors surfaced by registry and marketplace operations.
///
/// Operations fail fast on the first violated precondition and perform
/// no partial mutation, so an error always means "nothing happened".
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum ContractError {
    /// The caller is not the principal this operation requires.
    #[error("caller is not authorized for this operation")]
    NotAuthorized,

    /// No record exists for the requested id.
    #[error("no record exists for the requested id")]
    NotFound,

    /// Breeding preconditions failed: identical parents, a missing
    /// parent, or an unexpired cooldown on either side.
    #[error("breeding preconditions are not met")]
    CannotBreed,

    /// A parameter failed validation (out-of-range id, price below the
    /// minimum, self-directed transfer or purchase, fee above the cap).
    #[error("operation parameters failed validation")]
    InvalidParams,

    /// A parent's breeding cooldown has not elapsed.
    ///
    /// Reserved kind: the breeding path currently reports
    /// [`ContractError::CannotBreed`] for cooldown failures. Kept so the
    /// external contract can distinguish the case later without a
    /// breaking change.
    #[error("breeding cooldown has not elapsed")]
    CooldownActive,

    /// The listing is not open for purchase. Covers expiry as well as
    /// the sold and cancelled terminal states.
    #[error("listing is no longer open for purchase")]
    ListingExpired,

    /// The offered price does not match the listing price.
    ///
    /// Reserved kind: purchases settle at the listed price, so no code
    /// path currently produces it.
    #[error("offered price does not match the listing price")]
    PriceMismatch,

    /// The creature already has an open listing.
    ///
    /// Reserved kind: duplicate active listings are currently permitted,
    /// so no code path produces it.
    #[error("creature is already listed for sale")]
    AlreadyListed,

    /// The listing exists but is not in the active state.
    #[error("listing is not active")]
    NotListed,

    /// A ledger debit could not be covered.
    #[error("insufficient balance: needed {needed} but only {available} available")]
    InsufficientBalance {
        /// The amount the operation tried to move.
        needed: u128,
        /// The payer's balance at the time of the attempt.
        available: u128,
    },
}

impl From<LedgerError> for ContractError {
    /// Map ledger failures onto the public vocabulary. Funding shortfalls
    /// keep their shape; every other ledger rejection signals a malformed
    /// movement and surfaces as [`ContractError::InvalidParams`].
    fn from(error: LedgerError) -> Self {
        match error {
            LedgerError::InsufficientBalance { needed, available } => {
                Self::InsufficientBalance { needed, available }
            }
            LedgerError::ZeroAmount
            | LedgerError::SelfTransfer
            | LedgerError::BalanceOverflow { .. }
            | LedgerError::Internal(_) => Self::InvalidParams,
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use menagerie_types::Principal;

    use super::*;

    #[test]
    fn funding_shortfalls_keep_their_detail() {
        let mapped = ContractError::from(LedgerError::InsufficientBalance {
            needed: 750,
            available: 20,
        });
        assert_eq!(
            mapped,
            ContractError::InsufficientBalance {
                needed: 750,
                available: 20,
            }
        );
    }

    #[test]
    fn malformed_movements_surface_as_invalid_params() {
        let malformed = [
            LedgerError::ZeroAmount,
            LedgerError::SelfTransfer,
            LedgerError::BalanceOverflow {
                principal: Principal::new(),
            },
            LedgerError::Internal("entry sequence space exhausted"),
        ];
        for error in malformed {
            assert_eq!(ContractError::from(error), ContractError::InvalidParams);
        }
    }

    #[test]
    fn messages_stay_lowercase_and_stable() {
        assert_eq!(
            ContractError::NotAuthorized.to_string(),
            "caller is not authorized for this operation"
        );
        assert_eq!(
            ContractError::InsufficientBalance {
                needed: 100,
                available: 1,
            }
            .to_string(),
            "insufficient balance: needed 100 but only 1 available"
        );
    }
}
