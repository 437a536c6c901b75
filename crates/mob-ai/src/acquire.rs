//! Target acquisition: the throttled perception scan.
//!
//! One scan walks every mob inside the perception radius, runs the see pass
//! (long-term sightings, guard calls), sorts the candidates by the profile's
//! ordering bits, then tries each set type bit in declared priority order.
//! The first type that yields a candidate wins; within a type, rejection
//! rules run per candidate in sorted order.

use std::collections::HashSet;
use std::sync::Arc;

use crate::ai::MobAi;
use crate::command::AiCommand;
use crate::env::{LedgerOracle, MobView, OracleError, TopologyOracle, WorldEnv};
use crate::hooks::SpeciesHooks;
use crate::memory::Sighting;
use crate::select::{TargetType, apply_order_passes};
use crate::types::{MobId, Tick};

impl MobAi {
    /// Scan entry point used by the wander and guard handlers. Oracle
    /// failures are logged and treated as an empty scan.
    pub(crate) fn acquire_with_veto(
        &mut self,
        env: &WorldEnv<'_>,
        my: &MobView,
        now: Tick,
        out: &mut Vec<AiCommand>,
    ) -> Option<MobId> {
        match self.try_acquire(env, my, now, out) {
            Ok(target) => target,
            Err(error) => {
                tracing::warn!(mob = %self.id, %error, "acquisition scan failed");
                None
            }
        }
    }

    fn try_acquire(
        &mut self,
        env: &WorldEnv<'_>,
        my: &MobView,
        now: Tick,
        out: &mut Vec<AiCommand>,
    ) -> Result<Option<MobId>, OracleError> {
        let mode = self.profile.fight_mode;
        if mode.type_bits().is_empty() {
            if !mode.order_bits().is_empty() {
                tracing::warn!(
                    mob = %self.id,
                    "selection mask has ordering bits but no type bits; nothing will match"
                );
            }
            return Ok(None);
        }

        // Scans are throttled independently of the think interval.
        if now < self.next_reacquire {
            return Ok(None);
        }
        self.next_reacquire = now + self.config.reacquire_delay;

        let mobs = env.mobs()?;
        let topology = env.topology()?;
        let ledger = env.ledger()?;
        let hooks = Arc::clone(&self.hooks);

        let mut candidates: Vec<MobView> = mobs
            .mobs_in_range(my.position, self.profile.perception)
            .into_iter()
            .filter(|&id| id != self.id)
            .filter_map(|id| mobs.mob(id))
            .collect();

        self.see_pass(topology, &candidates, now, out);

        apply_order_passes(mode, my.position, &mut candidates);

        let fought = live_opponents(ledger, self.id);

        let mut winner = None;
        for ty in mode.types() {
            winner = self.acquire_pass(env, my, ty, &candidates, &fought, hooks.as_ref(), now)?;
            if winner.is_some() {
                break;
            }
        }

        if let Some(target) = winner {
            tracing::debug!(mob = %self.id, %target, "acquired focus");
            if let Some(view) = candidates.iter().find(|view| view.id == target) {
                self.memories.last_known.remember(
                    target,
                    view.position,
                    self.config.last_known_ttl,
                    now.0,
                );
            }
            self.focus = Some(target);
        }
        Ok(winner)
    }

    /// The see pass: refresh long-term player sightings and, for town
    /// guards, summon the watch on guard-worthy mobs inside guarded regions.
    fn see_pass(
        &mut self,
        topology: &dyn TopologyOracle,
        candidates: &[MobView],
        now: Tick,
        out: &mut Vec<AiCommand>,
    ) {
        for view in candidates {
            if !view.perceivable() {
                continue;
            }
            if view.is_player && !view.blessed {
                self.memories.sightings.remember(
                    view.id,
                    Sighting { at: view.position },
                    self.config.sighting_ttl,
                    now.0,
                );
            }
            if self.profile.town_guard && view.wanted && topology.guarded(view.position) {
                out.push(AiCommand::CallGuards(view.id));
            }
        }
    }

    /// One pass over the sorted candidates for a single target type. Returns
    /// the first candidate that survives every rejection rule, falling back
    /// to this pass's own first path-blocked candidate so an inaccessible
    /// high-priority type still outranks later types.
    #[allow(clippy::too_many_arguments)]
    fn acquire_pass(
        &mut self,
        env: &WorldEnv<'_>,
        my: &MobView,
        ty: TargetType,
        candidates: &[MobView],
        fought: &HashSet<MobId>,
        hooks: &dyn SpeciesHooks,
        now: Tick,
    ) -> Result<Option<MobId>, OracleError> {
        let topology = env.topology()?;
        let mut last_resort = None;

        for view in candidates {
            if !view.perceivable() || view.blessed {
                continue;
            }
            if self.profile.players_only && !view.is_player {
                continue;
            }

            // Summon relations: never the summoner unless the mask says so,
            // never a sibling summon of the same summoner.
            let is_my_summoner = my.summoner == Some(view.id);
            if is_my_summoner && ty != TargetType::Summoner {
                continue;
            }
            if my.summoner.is_some() && my.summoner == view.summoner {
                continue;
            }
            // Never the own pet or the own master.
            if view.controller == Some(self.id) || my.controller == Some(view.id) {
                continue;
            }

            if view.allied_with(my) && !self.profile.faction_allies {
                continue;
            }
            if view.opposed_to(my) && !self.profile.faction_enemies {
                continue;
            }

            let prior_fight = fought.contains(&view.id);
            let eligible = match ty {
                TargetType::All => true,
                TargetType::Aggressor => prior_fight,
                TargetType::Evil => view.is_evil(),
                TargetType::Criminal => view.criminal,
                TargetType::Murderer => view.murderer,
                TargetType::FactionEnemy => my.opposed_to(view),
                TargetType::Players => view.is_player,
                TargetType::Summoner => is_my_summoner,
            };
            if !eligible && !(ty.is_conditional() && hooks.special_eligibility(my, view)) {
                continue;
            }

            // Monsters ignore monsters: two evil non-players leave each
            // other alone unless they are already fighting.
            if ty == TargetType::All
                && my.is_evil()
                && view.is_evil()
                && !view.is_player
                && !my.is_player
                && !prior_fight
            {
                continue;
            }

            if hooks.veto_target(my, view) {
                continue;
            }

            if !topology.line_of_sight(my.position, view.position) {
                // Desired but unseen: remember how to get there and move on.
                self.record_investigation(env, my, view.id, view.position, now)?;
                continue;
            }

            let distance = my.position.distance(view.position);
            if distance > self.config.engage_range
                && !topology.path_clear(my.position, view.position)
            {
                last_resort.get_or_insert(view.id);
                continue;
            }

            return Ok(Some(view.id));
        }

        if self.profile.ignore_unreachable {
            return Ok(None);
        }
        Ok(last_resort)
    }
}

/// Counterparts of every live aggression relation involving `actor`, in
/// either direction.
fn live_opponents(ledger: &dyn LedgerOracle, actor: MobId) -> HashSet<MobId> {
    ledger
        .aggressors(actor)
        .into_iter()
        .chain(ledger.aggressed(actor))
        .filter(|entry| !entry.expired)
        .map(|entry| entry.counterpart)
        .collect()
}
