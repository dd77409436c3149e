//! Type-safe identifier wrappers.
//!
//! Creatures and listings are numbered by strictly increasing `u64`
//! counters owned by the registry and marketplace respectively, so their
//! identifiers wrap a counter value rather than a random UUID. Principals
//! stand in for external wallet addresses and wrap a random [`Uuid`].
//!
//! The newtypes exist to prevent accidental mixing of identifier spaces at
//! compile time: a `CreatureId` can never be passed where a `ListingId` is
//! expected.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Generates a newtype wrapper around a `u64` counter value with standard
/// derives.
macro_rules! define_serial_id {
    (
        $(#[$meta:meta])*
        $name:ident
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
        pub struct $name(pub u64);

        impl $name {
            /// Wrap a raw counter value.
            pub const fn new(value: u64) -> Self {
                Self(value)
            }

            /// Return the inner counter value.
            pub const fn into_inner(self) -> u64 {
                self.0
            }
        }

        impl core::fmt::Display for $name {
            fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl From<u64> for $name {
            fn from(value: u64) -> Self {
                Self(value)
            }
        }

        impl From<$name> for u64 {
            fn from(id: $name) -> Self {
                id.0
            }
        }
    };
}

define_serial_id! {
    /// Unique identifier for a creature. Allocated by the registry's
    /// strictly increasing counter; the first minted creature is id 1 and
    /// no id is ever reused.
    CreatureId
}

define_serial_id! {
    /// Unique identifier for a marketplace listing, allocated by the
    /// marketplace's own strictly increasing counter.
    ListingId
}

/// An authenticated caller identity.
///
/// The registry and marketplace trust this identity completely; signature
/// verification happens upstream. Wraps a random UUID so embedders and
/// tests can conjure distinct principals cheaply.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Principal(pub Uuid);

impl Principal {
    /// Create a fresh principal identity (random UUID v4).
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// Return the inner [`Uuid`] value.
    pub const fn into_inner(self) -> Uuid {
        self.0
    }
}

impl Default for Principal {
    fn default() -> Self {
        Self::new()
    }
}

impl core::fmt::Display for Principal {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<Uuid> for Principal {
    fn from(id: Uuid) -> Self {
        Self(id)
    }
}

impl From<Principal> for Uuid {
    fn from(id: Principal) -> Self {
        id.0
    }
}
