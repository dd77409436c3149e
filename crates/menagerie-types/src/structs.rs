//! Core entity structs for creatures, listings, sales, and ledger entries.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::dna::Dna;
use crate::enums::{EntryReason, ListingStatus};
use crate::ids::{CreatureId, ListingId, Principal};

// ---------------------------------------------------------------------------
// Creature
// ---------------------------------------------------------------------------

/// A registered creature's full trait record.
///
/// Created by mint or breed, mutated in place by breeding (cooldown),
/// interaction (points and stage), never deleted. Ownership is tracked
/// separately by the registry, not here.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Creature {
    /// Unique creature identifier.
    pub id: CreatureId,
    /// Immutable 32-byte genetic value.
    pub dna: Dna,
    /// Generation number: 1 for minted creatures, first parent's
    /// generation + 1 for bred ones.
    pub generation: u32,
    /// Clock ordinal at which the creature was created.
    pub birth_ordinal: u64,
    /// First parent, `None` for minted creatures.
    pub parent_one: Option<CreatureId>,
    /// Second parent, `None` for minted creatures.
    pub parent_two: Option<CreatureId>,
    /// Evolution stage, between 1 and the configured maximum (4).
    pub evolution_stage: u32,
    /// Interaction points accumulated since the last evolution.
    pub interaction_points: u64,
    /// Ordinal of the most recent breeding event this creature parented,
    /// 0 if it has never bred.
    pub last_breed_ordinal: u64,
}

// ---------------------------------------------------------------------------
// Listing
// ---------------------------------------------------------------------------

/// A marketplace listing for a single creature.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Listing {
    /// Unique listing identifier.
    pub id: ListingId,
    /// The creature offered for sale.
    pub creature_id: CreatureId,
    /// The principal who created the listing (creature owner at listing
    /// time; ownership is re-validated at purchase).
    pub seller: Principal,
    /// Asking price in minor units.
    pub price: u128,
    /// Clock ordinal at which the listing was created.
    pub listed_at_ordinal: u64,
    /// Ordinal at which the listing stops being purchasable. Never
    /// extended, not even by a price update.
    pub expires_at_ordinal: u64,
    /// Stored lifecycle state. Expiry is computed against
    /// `expires_at_ordinal` at read time, never written back here.
    pub status: ListingStatus,
}

impl Listing {
    /// Whether the listing can be bought at `current_ordinal`: stored
    /// state is `Active` and the expiry ordinal has not been reached.
    pub fn is_purchasable(&self, current_ordinal: u64) -> bool {
        self.status == ListingStatus::Active && current_ordinal < self.expires_at_ordinal
    }
}

// ---------------------------------------------------------------------------
// Sale history
// ---------------------------------------------------------------------------

/// Running sale statistics for one creature, created on its first
/// successful purchase and updated in place on every later one.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SaleRecord {
    /// Price of the most recent sale, in minor units.
    pub last_price: u128,
    /// Number of completed sales; 1 after the first purchase.
    pub total_sales: u64,
    /// Highest sale price observed, raised only when strictly exceeded.
    pub highest_price: u128,
}

// ---------------------------------------------------------------------------
// Purchase receipt
// ---------------------------------------------------------------------------

/// Settlement summary returned by a successful purchase.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Purchase {
    /// The listing that was settled.
    pub listing_id: ListingId,
    /// The creature whose ownership changed hands.
    pub creature_id: CreatureId,
    /// The seller, credited with the full sale price.
    pub seller: Principal,
    /// The buyer, debited the sale price plus the marketplace fee.
    pub buyer: Principal,
    /// Sale price in minor units, as listed.
    pub price: u128,
    /// Marketplace fee paid by the buyer on top of the price.
    pub fee: u128,
    /// The price net of the fee. Reported for accounting; the seller's
    /// actual credit is the full price, with the fee charged separately.
    pub seller_amount: u128,
}

// ---------------------------------------------------------------------------
// Marketplace statistics
// ---------------------------------------------------------------------------

/// Point-in-time snapshot of marketplace-wide counters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct MarketStats {
    /// Current fee rate in basis points out of 1000 (25 = 2.5%).
    pub fee_basis_points: u64,
    /// Listings ever created, including cancelled and sold ones.
    pub total_listings: u64,
    /// Cumulative sum of settled sale prices, in minor units.
    pub total_volume: u128,
}

// ---------------------------------------------------------------------------
// Ledger entry
// ---------------------------------------------------------------------------

/// One immutable movement in the token ledger's append-only log.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LedgerEntry {
    /// Position in the log, starting at 1.
    pub sequence: u64,
    /// The category of movement.
    pub entry_type: EntryReason,
    /// Source principal, `None` for supply deposits.
    pub from: Option<Principal>,
    /// Destination principal.
    pub to: Principal,
    /// Amount moved, in minor units (always positive).
    pub amount: u128,
    /// Real-world timestamp, for audit only.
    pub recorded_at: DateTime<Utc>,
}
