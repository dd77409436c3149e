//! Ordinal clock capability.
//!
//! The registry and marketplace never read wall-clock time. Every temporal
//! rule in the system (breeding cooldowns, listing expiry, birth ordinals)
//! is stated in terms of a monotonically increasing ordinal supplied by the
//! embedding environment, the way a chain height would be. Operations take
//! the clock as a capability parameter, so tests can pin time exactly.
//!
//! # Design Principles
//!
//! - The ordinal only moves forward, and only between operations; within
//!   one operation every read sees the same value.
//! - Advancement uses checked arithmetic (no silent overflow).

/// Errors that can occur during clock operations.
#[derive(Debug, thiserror::Error)]
pub enum ClockError {
    /// Ordinal counter would overflow.
    #[error("ordinal counter overflow: cannot advance beyond u64::MAX")]
    OrdinalOverflow,
}

/// A source of the current chain ordinal ("block height").
///
/// Monotonic, advanced outside this system. Implementations must report a
/// stable value for the duration of a single operation.
pub trait BlockClock {
    /// Return the current ordinal.
    fn current_ordinal(&self) -> u64;
}

/// An explicitly advanced ordinal counter.
///
/// The embedder advances it between operations to model the passage of
/// chain time. [`OrdinalClock::starting_at`] restores a clock at an
/// arbitrary height for testing and replay.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OrdinalClock {
    /// Current ordinal value.
    ordinal: u64,
}

impl OrdinalClock {
    /// Create a clock positioned at the given ordinal.
    pub const fn starting_at(ordinal: u64) -> Self {
        Self { ordinal }
    }

    /// Advance by one ordinal. Returns the new ordinal.
    ///
    /// # Errors
    ///
    /// Returns [`ClockError::OrdinalOverflow`] if the counter would exceed
    /// `u64::MAX`.
    pub fn advance(&mut self) -> Result<u64, ClockError> {
        self.ordinal = self
            .ordinal
            .checked_add(1)
            .ok_or(ClockError::OrdinalOverflow)?;
        Ok(self.ordinal)
    }

    /// Advance by `count` ordinals at once. Returns the new ordinal.
    ///
    /// # Errors
    ///
    /// Returns [`ClockError::OrdinalOverflow`] if the counter would exceed
    /// `u64::MAX`.
    pub fn advance_by(&mut self, count: u64) -> Result<u64, ClockError> {
        self.ordinal = self
            .ordinal
            .checked_add(count)
            .ok_or(ClockError::OrdinalOverflow)?;
        Ok(self.ordinal)
    }

    /// Return the current ordinal without advancing.
    pub const fn ordinal(&self) -> u64 {
        self.ordinal
    }
}

impl BlockClock for OrdinalClock {
    fn current_ordinal(&self) -> u64 {
        self.ordinal
    }
}
