//! Shared type definitions for the Menagerie workspace.
//!
//! This crate is the single source of truth for the data types used across
//! the registry, marketplace, and ledger crates. It holds no behavior
//! beyond constructors, accessors, and the listing purchasability
//! predicate; all state machines live downstream.
//!
//! # Modules
//!
//! - [`ids`] -- Type-safe identifier wrappers (counter ids and principals)
//! - [`dna`] -- Fixed-width genetic value type
//! - [`enums`] -- Listing lifecycle and ledger entry categories
//! - [`structs`] -- Core entity structs (creatures, listings, sales, ledger)

pub mod dna;
pub mod enums;
pub mod ids;
pub mod structs;

// Re-export all public types at crate root for convenience.
pub use dna::{DNA_SIZE, Dna};
pub use enums::{EntryReason, ListingStatus};
pub use ids::{CreatureId, ListingId, Principal};
pub use structs::{Creature, LedgerEntry, Listing, MarketStats, Purchase, SaleRecord};
