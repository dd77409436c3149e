//! Breeding: cooldown gating and offspring derivation.
//!
//! Two creatures can produce an offspring when both exist, they are
//! distinct, and both have sat out the breeding cooldown. Offspring DNA
//! is derived deterministically from the parents: the first half of
//! parent one's DNA is concatenated with the second half of parent
//! two's, and the 32-byte splice is digested so the child's DNA is not
//! a recognizable patchwork of its parents.
//!
//! Authorization is asymmetric: only ownership of the first parent is
//! checked against the caller. The second parent contributes DNA and
//! pays the cooldown without its owner's consent.

use sha2::{Digest, Sha256};

use menagerie_core::clock::BlockClock;
use menagerie_core::error::ContractError;
use menagerie_types::{Creature, CreatureId, DNA_SIZE, Dna, Principal};

use crate::registry::CreatureRegistry;

/// Byte length of one DNA half (`DNA_SIZE` is even).
const HALF: usize = DNA_SIZE / 2;

/// Whether `creature` has waited out the breeding cooldown at
/// `current_ordinal`.
///
/// Freshly created creatures carry a last-breed ordinal of 0, so on a
/// young chain (current ordinal below the cooldown) even a creature
/// that has never bred is not yet eligible.
pub const fn cooldown_elapsed(creature: &Creature, current_ordinal: u64, cooldown: u64) -> bool {
    current_ordinal.saturating_sub(creature.last_breed_ordinal) >= cooldown
}

/// Derive offspring DNA from two parents.
///
/// Takes the first half of `first`, the second half of `second`, and
/// digests the concatenation. Deterministic: the same parent pair in
/// the same order always yields the same child DNA.
pub fn offspring_dna(first: &Dna, second: &Dna) -> Dna {
    let (first_half, _) = first.as_bytes().split_at(HALF);
    let (_, second_half) = second.as_bytes().split_at(HALF);
    let mut hasher = Sha256::new();
    hasher.update(first_half);
    hasher.update(second_half);
    Dna::from_bytes(hasher.finalize().into())
}

impl CreatureRegistry {
    /// Whether `first` and `second` can currently breed.
    ///
    /// True iff both ids resolve to existing creatures, the ids differ,
    /// and both parents' cooldowns have elapsed. A missing creature
    /// yields `false`, not an error.
    pub fn can_breed(&self, first: CreatureId, second: CreatureId, clock: &dyn BlockClock) -> bool {
        if first == second {
            return false;
        }
        let (Some(parent_one), Some(parent_two)) = (self.traits_of(first), self.traits_of(second))
        else {
            return false;
        };
        let current = clock.current_ordinal();
        let cooldown = self.config().breeding_cooldown_ordinals;
        cooldown_elapsed(parent_one, current, cooldown)
            && cooldown_elapsed(parent_two, current, cooldown)
    }

    /// Breed `first` with `second`, minting the offspring to `caller`.
    ///
    /// The offspring starts at stage 1 with zero points, generation one
    /// above the first parent, and records both parent ids. Both
    /// parents' last-breed ordinals are reset to the current ordinal, so
    /// an immediate second attempt with either parent fails.
    ///
    /// # Errors
    ///
    /// Returns [`ContractError::NotFound`] if either parent has no
    /// resolvable owner, [`ContractError::NotAuthorized`] if `caller`
    /// does not own the first parent (the second parent's owner is not
    /// consulted), and [`ContractError::CannotBreed`] if the pair fails
    /// [`CreatureRegistry::can_breed`].
    pub fn breed(
        &mut self,
        caller: Principal,
        first: CreatureId,
        second: CreatureId,
        clock: &dyn BlockClock,
    ) -> Result<CreatureId, ContractError> {
        let first_owner = self.owner_of(first).ok_or(ContractError::NotFound)?;
        self.owner_of(second).ok_or(ContractError::NotFound)?;
        if caller != first_owner {
            return Err(ContractError::NotAuthorized);
        }
        if !self.can_breed(first, second, clock) {
            return Err(ContractError::CannotBreed);
        }

        let ordinal = clock.current_ordinal();
        let serial = self.peek_next_serial()?;
        let parent_one = self.traits_of(first).ok_or(ContractError::NotFound)?;
        let parent_two = self.traits_of(second).ok_or(ContractError::NotFound)?;
        let dna = offspring_dna(&parent_one.dna, &parent_two.dna);
        let generation = parent_one
            .generation
            .checked_add(1)
            .ok_or(ContractError::InvalidParams)?;

        let offspring = Creature {
            id: CreatureId::new(serial),
            dna,
            generation,
            birth_ordinal: ordinal,
            parent_one: Some(first),
            parent_two: Some(second),
            evolution_stage: 1,
            interaction_points: 0,
            last_breed_ordinal: 0,
        };

        // Commit: reset both parents' cooldowns, then register the child.
        if let Some(parent) = self.record_mut(first) {
            parent.last_breed_ordinal = ordinal;
        }
        if let Some(parent) = self.record_mut(second) {
            parent.last_breed_ordinal = ordinal;
        }
        self.commit_creature(serial, offspring, caller);
        tracing::debug!(
            offspring = serial,
            first_parent = first.into_inner(),
            second_parent = second.into_inner(),
            ordinal,
            "creatures bred"
        );
        Ok(CreatureId::new(serial))
    }
}
