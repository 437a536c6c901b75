//! Species customization hooks.
//!
//! Concrete species tune engine behavior through a small, fixed set of
//! optional decision hooks instead of overriding the engine itself. All
//! hooks have neutral defaults; a species implements only what it needs.

use crate::ai::MobAi;
use crate::command::AiCommand;
use crate::env::{MobView, WorldEnv};
use crate::types::Tick;

/// Optional per-species decision hooks, invoked polymorphically by the
/// dispatcher and the acquisition walk.
pub trait SpeciesHooks: Send + Sync {
    /// Final veto over an otherwise-acquired focus. Returning true rejects
    /// the candidate; the acquisition walk skips it and continues with the
    /// next one.
    fn veto_target(&self, me: &MobView, candidate: &MobView) -> bool {
        let _ = (me, candidate);
        false
    }

    /// Extra eligibility for conditional target types, OR-ed with the
    /// built-in sub-checks (prior aggression, faction opposition, karma,
    /// criminal, murderer).
    fn special_eligibility(&self, me: &MobView, candidate: &MobView) -> bool {
        let _ = (me, candidate);
        false
    }

    /// Full replacement of the per-tick routine. Returning true skips the
    /// default state machine for this tick.
    fn override_think(
        &self,
        ai: &mut MobAi,
        env: &WorldEnv<'_>,
        now: Tick,
        out: &mut Vec<AiCommand>,
    ) -> bool {
        let _ = (ai, env, now, out);
        false
    }
}

/// Neutral hook set used when a species customizes nothing.
#[derive(Clone, Copy, Debug, Default)]
pub struct DefaultSpecies;

impl SpeciesHooks for DefaultSpecies {}
