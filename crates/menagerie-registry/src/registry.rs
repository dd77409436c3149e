//! Creature records, ownership, and minting.
//!
//! The [`CreatureRegistry`] owns the trait records and the ownership map.
//! It allocates creature ids from a single monotonic counter (shared by
//! minting and breeding), collects the mint price through the token
//! ledger, and stores approval grants that are recorded but never
//! consulted for authorization.
//!
//! # Design
//!
//! - **Validate, then commit**: every operation performs all fallible
//!   checks before the first write, so a failed call mutates nothing.
//! - **Ids are serial**: the first creature is id 1; an id is valid iff
//!   `1 <= id <= minted_count`. A failed mint consumes no id.
//! - **Capabilities are parameters**: the clock, entropy source, and
//!   ledger are passed per call rather than owned, which keeps the
//!   registry a pure state machine over its own maps.

use std::collections::BTreeMap;

use sha2::{Digest, Sha256};

use menagerie_core::clock::BlockClock;
use menagerie_core::config::ProtocolConfig;
use menagerie_core::entropy::EntropySource;
use menagerie_core::error::ContractError;
use menagerie_ledger::TokenLedger;
use menagerie_types::{Creature, CreatureId, Dna, EntryReason, Principal};

/// Registry of all minted creatures and their owners.
#[derive(Debug)]
pub struct CreatureRegistry {
    /// Trait record per creature id.
    creatures: BTreeMap<CreatureId, Creature>,
    /// Current owner per creature id.
    owners: BTreeMap<CreatureId, Principal>,
    /// Stored approval grants, keyed by (granting owner, operator).
    /// Recorded state only; no operation consults these for
    /// authorization.
    approvals: BTreeMap<(Principal, Principal), bool>,
    /// Highest creature id allocated so far (0 before the first mint).
    last_creature_id: u64,
    /// Privileged owner: receives mint payments, may adjust fees.
    owner: Principal,
    /// Protocol tunables fixed at construction.
    config: ProtocolConfig,
}

impl CreatureRegistry {
    /// Create an empty registry governed by `owner` under `config`.
    pub const fn new(owner: Principal, config: ProtocolConfig) -> Self {
        Self {
            creatures: BTreeMap::new(),
            owners: BTreeMap::new(),
            approvals: BTreeMap::new(),
            last_creature_id: 0,
            owner,
            config,
        }
    }

    // -----------------------------------------------------------------------
    // Lookups
    // -----------------------------------------------------------------------

    /// Return the current owner of `id`, if the creature exists.
    pub fn owner_of(&self, id: CreatureId) -> Option<Principal> {
        self.owners.get(&id).copied()
    }

    /// Return the trait record of `id`, if the creature exists.
    pub fn traits_of(&self, id: CreatureId) -> Option<&Creature> {
        self.creatures.get(&id)
    }

    /// Return the operator approved for `owner`'s creatures.
    ///
    /// Always reports none. Grants recorded by
    /// [`CreatureRegistry::set_approved`] are stored state only and are
    /// deliberately not surfaced here.
    #[allow(clippy::unused_self)]
    pub const fn approved_operator(&self, _owner: Principal) -> Option<Principal> {
        None
    }

    /// Return the number of creatures minted so far.
    pub const fn minted_count(&self) -> u64 {
        self.last_creature_id
    }

    /// Return the privileged owner principal.
    pub const fn privileged_owner(&self) -> Principal {
        self.owner
    }

    /// Return the protocol tunables this registry was built with.
    pub const fn config(&self) -> &ProtocolConfig {
        &self.config
    }

    /// Whether `id` falls inside the allocated id range.
    pub(crate) const fn is_minted(&self, id: CreatureId) -> bool {
        let serial = id.into_inner();
        serial >= 1 && serial <= self.last_creature_id
    }

    // -----------------------------------------------------------------------
    // Minting
    // -----------------------------------------------------------------------

    /// Mint a new generation-1 creature to `caller`.
    ///
    /// Collects the mint price from `caller` into the privileged owner's
    /// balance, then allocates the next id and derives DNA from the
    /// entropy value at the current ordinal. The whole operation is
    /// atomic: if the payment fails, no id is consumed and no record is
    /// created.
    ///
    /// # Errors
    ///
    /// Returns [`ContractError::InsufficientBalance`] if `caller` cannot
    /// cover the mint price, or [`ContractError::InvalidParams`] if the
    /// payment leg is degenerate (the privileged owner minting to
    /// itself) or the id space is exhausted.
    pub fn mint(
        &mut self,
        caller: Principal,
        clock: &dyn BlockClock,
        entropy: &dyn EntropySource,
        ledger: &mut TokenLedger,
    ) -> Result<CreatureId, ContractError> {
        let ordinal = clock.current_ordinal();
        let serial = self
            .last_creature_id
            .checked_add(1)
            .ok_or(ContractError::InvalidParams)?;

        // Payment first: a failed debit must leave the id counter alone.
        ledger.transfer_tagged(self.config.mint_price, caller, self.owner, EntryReason::MintFee)?;

        let id = CreatureId::new(serial);
        let creature = Creature {
            id,
            dna: mint_dna(entropy, ordinal, serial),
            generation: 1,
            birth_ordinal: ordinal,
            parent_one: None,
            parent_two: None,
            evolution_stage: 1,
            interaction_points: 0,
            last_breed_ordinal: 0,
        };

        self.last_creature_id = serial;
        self.creatures.insert(id, creature);
        self.owners.insert(id, caller);
        tracing::debug!(creature = serial, ordinal, "creature minted");
        Ok(id)
    }

    // -----------------------------------------------------------------------
    // Ownership
    // -----------------------------------------------------------------------

    /// Reassign ownership of `id` from `sender` to `recipient`.
    ///
    /// The caller must be `sender`, and `sender` must currently own the
    /// creature. Stored approval grants play no part in this check.
    ///
    /// # Errors
    ///
    /// Returns [`ContractError::InvalidParams`] if `id` is outside the
    /// minted range or `sender == recipient`, and
    /// [`ContractError::NotAuthorized`] if `caller` is not `sender` or
    /// `sender` does not own the creature.
    pub fn transfer(
        &mut self,
        caller: Principal,
        id: CreatureId,
        sender: Principal,
        recipient: Principal,
    ) -> Result<(), ContractError> {
        if !self.is_minted(id) || sender == recipient {
            return Err(ContractError::InvalidParams);
        }
        if caller != sender {
            return Err(ContractError::NotAuthorized);
        }
        if self.owner_of(id) != Some(sender) {
            return Err(ContractError::NotAuthorized);
        }

        self.owners.insert(id, recipient);
        tracing::debug!(creature = id.into_inner(), "ownership transferred");
        Ok(())
    }

    /// Move ownership of `id` as part of a marketplace settlement.
    ///
    /// Bypasses the caller-identity check of
    /// [`CreatureRegistry::transfer`]; the marketplace has already
    /// authorized the sale. Still verifies that `from` owns the creature
    /// so a stale listing cannot move someone else's property.
    ///
    /// # Errors
    ///
    /// Returns [`ContractError::NotFound`] if the creature has no owner,
    /// [`ContractError::NotAuthorized`] if `from` is not the owner, or
    /// [`ContractError::InvalidParams`] if `from == to`.
    pub fn settle_transfer(
        &mut self,
        id: CreatureId,
        from: Principal,
        to: Principal,
    ) -> Result<(), ContractError> {
        if from == to {
            return Err(ContractError::InvalidParams);
        }
        let current = self.owner_of(id).ok_or(ContractError::NotFound)?;
        if current != from {
            return Err(ContractError::NotAuthorized);
        }

        self.owners.insert(id, to);
        tracing::debug!(creature = id.into_inner(), "ownership settled");
        Ok(())
    }

    // -----------------------------------------------------------------------
    // Approvals
    // -----------------------------------------------------------------------

    /// Record or overwrite an approval grant from `caller` to `operator`.
    ///
    /// The grant is stored verbatim but never enforced: no transfer path
    /// consults it, and [`CreatureRegistry::approved_operator`] does not
    /// report it.
    ///
    /// # Errors
    ///
    /// Returns [`ContractError::InvalidParams`] if `operator` is the
    /// privileged owner or `caller` itself.
    pub fn set_approved(
        &mut self,
        caller: Principal,
        operator: Principal,
        approved: bool,
    ) -> Result<(), ContractError> {
        if operator == self.owner || operator == caller {
            return Err(ContractError::InvalidParams);
        }

        self.approvals.insert((caller, operator), approved);
        Ok(())
    }

    // -----------------------------------------------------------------------
    // Internal record access for breeding and evolution
    // -----------------------------------------------------------------------

    /// Mutable access to a trait record.
    pub(crate) fn record_mut(&mut self, id: CreatureId) -> Option<&mut Creature> {
        self.creatures.get_mut(&id)
    }

    /// Allocate the next creature id without writing it back.
    pub(crate) fn peek_next_serial(&self) -> Result<u64, ContractError> {
        self.last_creature_id
            .checked_add(1)
            .ok_or(ContractError::InvalidParams)
    }

    /// Insert a fully-built creature under `serial`, owned by `owner`.
    /// Callers must have obtained `serial` from
    /// [`CreatureRegistry::peek_next_serial`].
    pub(crate) fn commit_creature(&mut self, serial: u64, creature: Creature, owner: Principal) {
        let id = CreatureId::new(serial);
        self.last_creature_id = serial;
        self.creatures.insert(id, creature);
        self.owners.insert(id, owner);
    }
}

/// Derive mint DNA from the entropy value at `ordinal` and the creature's
/// serial number, digested so distinct serials at the same ordinal get
/// distinct DNA.
fn mint_dna(entropy: &dyn EntropySource, ordinal: u64, serial: u64) -> Dna {
    let mut hasher = Sha256::new();
    hasher.update(entropy.entropy_at(ordinal));
    hasher.update(serial.to_be_bytes());
    Dna::from_bytes(hasher.finalize().into())
}
