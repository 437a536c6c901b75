//! Priority combatant re-evaluation.
//!
//! While fighting, a mob periodically reconsiders whether someone else
//! deserves its attention more than the current combatant: whoever has dealt
//! it the most damage, provided that candidate is perceivable and reachable.
//! A strike counter suppresses ping-ponging between two comparable attackers.

use crate::ai::MobAi;
use crate::env::{MobView, OracleError, WorldEnv};
use crate::types::{MobId, Tick};

/// Proposals tolerated for one candidate inside the ping-pong window before
/// further proposals are suppressed.
const MAX_STRIKES: u32 = 2;

impl MobAi {
    /// Proposes a better combatant than the current one, or `None` to keep
    /// fighting as-is. Never mutates the combatant itself; the caller decides
    /// whether to act on the proposal.
    pub(crate) fn reevaluate_combatant(
        &mut self,
        env: &WorldEnv<'_>,
        my: &MobView,
        now: Tick,
    ) -> Result<Option<MobId>, OracleError> {
        let Some(current) = self.combatant else {
            return Ok(None);
        };
        let ledger = env.ledger()?;

        let mut scored: Vec<(MobId, u32)> = ledger
            .damage_entries(self.id)
            .into_iter()
            .filter(|entry| !entry.expired && entry.source != self.id)
            .map(|entry| (entry.source, entry.total))
            .collect();

        if scored.is_empty() {
            // Nobody has dealt damage yet: fall back to the nearest live
            // aggressor so a fresh pile-on still gets an answer.
            return self.nearest_aggressor_proposal(env, my, current, now);
        }

        // The current combatant competes even with zero recorded damage, and
        // a challenger must strictly exceed its total; a tie keeps the
        // incumbent.
        if !scored.iter().any(|&(id, _)| id == current) {
            scored.push((current, 0));
        }
        let baseline = scored
            .iter()
            .find(|&&(id, _)| id == current)
            .map(|&(_, total)| total)
            .unwrap_or(0);
        scored.sort_by_key(|&(_, total)| std::cmp::Reverse(total));

        for (candidate, total) in scored {
            if candidate == current {
                // Nothing ranked below the incumbent can exceed its total.
                return Ok(None);
            }
            if total <= baseline {
                continue;
            }
            if !self.candidate_reachable(env, my, candidate)? {
                continue;
            }
            if self.ping_pong_suppressed(candidate, now) {
                tracing::debug!(mob = %self.id, %candidate, "switch proposal suppressed");
                continue;
            }
            tracing::debug!(mob = %self.id, %candidate, damage = total, "proposing combatant switch");
            return Ok(Some(candidate));
        }
        Ok(None)
    }

    fn nearest_aggressor_proposal(
        &mut self,
        env: &WorldEnv<'_>,
        my: &MobView,
        current: MobId,
        now: Tick,
    ) -> Result<Option<MobId>, OracleError> {
        let ledger = env.ledger()?;
        let mobs = env.mobs()?;

        let mut nearest: Option<(MobId, u32)> = None;
        for entry in ledger.aggressors(self.id) {
            if entry.expired {
                continue;
            }
            let Some(view) = mobs.mob(entry.counterpart) else {
                continue;
            };
            if !view.perceivable() {
                continue;
            }
            let distance = my.position.distance(view.position);
            if nearest.is_none_or(|(_, best)| distance < best) {
                nearest = Some((entry.counterpart, distance));
            }
        }

        let Some((candidate, _)) = nearest else {
            return Ok(None);
        };
        if candidate == current || !self.candidate_reachable(env, my, candidate)? {
            return Ok(None);
        }
        if self.ping_pong_suppressed(candidate, now) {
            return Ok(None);
        }
        Ok(Some(candidate))
    }

    fn candidate_reachable(
        &self,
        env: &WorldEnv<'_>,
        my: &MobView,
        candidate: MobId,
    ) -> Result<bool, OracleError> {
        let Some(view) = env.mobs()?.mob(candidate) else {
            return Ok(false);
        };
        if !view.perceivable() {
            return Ok(false);
        }
        let distance = my.position.distance(view.position);
        if distance > self.profile.perception {
            return Ok(false);
        }
        Ok(distance <= self.config.engage_range
            || env.topology()?.path_clear(my.position, view.position))
    }

    /// Counts a switch proposal against `candidate` and reports whether the
    /// candidate has exhausted its strikes.
    ///
    /// The window runs from the first strike; later strikes do not extend it,
    /// so suppression always lapses `ping_pong_window` after the first
    /// proposal.
    fn ping_pong_suppressed(&mut self, candidate: MobId, now: Tick) -> bool {
        match self.memories.strikes.recall_mut(&candidate, now.0) {
            Some(count) => {
                if *count >= MAX_STRIKES {
                    return true;
                }
                *count += 1;
                false
            }
            None => {
                self.memories.strikes.remember(
                    candidate,
                    1,
                    self.config.ping_pong_window,
                    now.0,
                );
                false
            }
        }
    }
}
