//! Protocol kernel: clock and entropy capabilities, configuration, and
//! the shared error vocabulary for the creature registry and marketplace.
//!
//! This crate owns everything the domain crates consume but do not
//! define themselves: how the current ordinal is read, where DNA entropy
//! comes from, which tunables govern minting, breeding, evolution, and
//! trading, and which error kinds public operations may surface.
//!
//! # Modules
//!
//! - [`clock`] -- [`BlockClock`] capability and the in-memory
//!   [`OrdinalClock`] that backs tests and single-process deployments.
//! - [`config`] -- Configuration loading from `menagerie-config.yaml`
//!   into a strongly-typed struct with per-field defaults.
//! - [`entropy`] -- [`EntropySource`] capability with a digest-derived
//!   implementation and a fixed stub for tests.
//! - [`error`] -- [`ContractError`], the stable public error kinds.
//!
//! [`BlockClock`]: clock::BlockClock
//! [`OrdinalClock`]: clock::OrdinalClock
//! [`EntropySource`]: entropy::EntropySource
//! [`ContractError`]: error::ContractError

pub mod clock;
pub mod config;
pub mod entropy;
pub mod error;
