//! Evolution: interaction points and stage advancement.
//!
//! Interacting with a creature earns it one point per call. Crossing
//! the point threshold advances the stage by exactly one and resets the
//! points, so a creature can never skip stages no matter how many
//! points a single call lands on. At the maximum stage points keep
//! accumulating but the stage is final.

use menagerie_core::error::ContractError;
use menagerie_types::CreatureId;

use crate::registry::CreatureRegistry;

impl CreatureRegistry {
    /// Record one interaction with `id`, advancing its stage when the
    /// point threshold is reached.
    ///
    /// Reports `true` exactly when this call caused an evolution. On
    /// evolution the points reset to zero and the stage advances by
    /// one; otherwise the incremented point total is retained.
    ///
    /// # Errors
    ///
    /// Returns [`ContractError::InvalidParams`] if `id` is outside the
    /// minted range, or [`ContractError::NotFound`] if no trait record
    /// exists for it.
    pub fn interact(&mut self, id: CreatureId) -> Result<bool, ContractError> {
        if !self.is_minted(id) {
            return Err(ContractError::InvalidParams);
        }
        let threshold = self.config().evolution_threshold;
        let max_stage = self.config().max_evolution_stage;
        let record = self.record_mut(id).ok_or(ContractError::NotFound)?;

        record.interaction_points = record.interaction_points.saturating_add(1);
        if record.interaction_points >= threshold && record.evolution_stage < max_stage {
            record.interaction_points = 0;
            record.evolution_stage = record.evolution_stage.saturating_add(1);
            tracing::debug!(
                creature = id.into_inner(),
                stage = record.evolution_stage,
                "creature evolved"
            );
            return Ok(true);
        }
        Ok(false)
    }
}
