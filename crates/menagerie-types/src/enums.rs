//! Enumeration types shared across the registry, marketplace, and ledger.

use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// Listing lifecycle
// ---------------------------------------------------------------------------

/// The stored lifecycle state of a marketplace listing.
///
/// `Sold` and `Cancelled` are terminal. There is intentionally no stored
/// `Expired` state: an `Active` listing past its expiry ordinal is simply
/// no longer purchasable, a predicate computed at read time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum ListingStatus {
    /// Open for purchase until the expiry ordinal passes.
    Active,
    /// Settled through a successful purchase (terminal).
    Sold,
    /// Withdrawn by the seller (terminal).
    Cancelled,
}

// ---------------------------------------------------------------------------
// Ledger entry categories
// ---------------------------------------------------------------------------

/// The category of a balance movement in the token ledger.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum EntryReason {
    /// Supply injected from outside the system (no source principal).
    Deposit,
    /// Mint price paid to the registry's privileged owner (minter -> owner).
    MintFee,
    /// Sale price paid at settlement (buyer -> seller).
    SalePayment,
    /// Marketplace fee collected at settlement (buyer -> privileged owner).
    MarketFee,
    /// Untagged balance movement between two principals.
    Transfer,
}
