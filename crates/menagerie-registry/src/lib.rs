//! Creature registry: minting, ownership, breeding, and evolution.
//!
//! This crate is the logic layer for creatures -- every mutation of a
//! trait record or an ownership entry goes through the
//! [`CreatureRegistry`]. It sits between `menagerie-types` (which
//! defines the data structures) and `menagerie-market` (which settles
//! sales against it), and pays mint prices through `menagerie-ledger`.
//!
//! # Modules
//!
//! - [`breeding`] -- Cooldown gating and deterministic offspring DNA
//!   derivation ([`offspring_dna`]).
//! - [`evolution`] -- Interaction points and stage advancement.
//! - [`registry`] -- The [`CreatureRegistry`]: minting, transfers, and
//!   approval bookkeeping.
//!
//! [`offspring_dna`]: breeding::offspring_dna

pub mod breeding;
pub mod evolution;
pub mod registry;

// Re-export primary types at crate root for convenience.
pub use breeding::{cooldown_elapsed, offspring_dna};
pub use registry::CreatureRegistry;
