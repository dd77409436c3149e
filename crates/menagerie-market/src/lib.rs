//! Fixed-price creature marketplace with atomic settlement.
//!
//! This crate sells creatures through listings. It owns no balances and
//! no creatures: payments settle through `menagerie-ledger` and
//! ownership moves through `menagerie-registry`, with the marketplace
//! coordinating both so a purchase either applies in full or not at
//! all.
//!
//! # Modules
//!
//! - [`marketplace`] -- The [`Marketplace`]: listings, purchases, fees,
//!   and sale history.

pub mod marketplace;

// Re-export primary types at crate root for convenience.
pub use marketplace::Marketplace;
