//! Per-tick handlers for the action state machine.

use crate::ai::{CombatantInfo, MobAi};
use crate::command::AiCommand;
use crate::env::{MobView, OracleError, WorldEnv};
use crate::investigate::ReplayStatus;
use crate::machine::ActionState;
use crate::types::{Direction, Tick};

/// Hits margin above the flee threshold required before a fleeing mob turns
/// to fight again, preventing flee/fight oscillation at the boundary.
const RECOVER_MARGIN: u32 = 10;

impl MobAi {
    /// Dispatches to the handler for the current action state.
    pub(crate) fn handle_action(
        &mut self,
        env: &WorldEnv<'_>,
        my: &MobView,
        info: &CombatantInfo,
        now: Tick,
        out: &mut Vec<AiCommand>,
    ) -> Result<(), OracleError> {
        match self.action {
            ActionState::Wander => self.do_wander(env, my, now, out),
            ActionState::Combat => self.do_combat(env, my, info, now, out),
            ActionState::Guard => self.do_guard(env, my, info, now, out),
            ActionState::Hunt => self.do_hunt(info, now, out),
            ActionState::Navigate => self.do_navigate(my, now, out),
            ActionState::Flee => self.do_flee(my, info, now, out),
            ActionState::Chase => self.do_chase(env, my, now, out),
            ActionState::Interact => self.do_interact(env, now, out),
            ActionState::Backoff => self.do_backoff(env, my, now, out),
        }
    }

    /// Wander: replay any pending investigation, otherwise scan for a target,
    /// otherwise roam.
    fn do_wander(
        &mut self,
        env: &WorldEnv<'_>,
        my: &MobView,
        now: Tick,
        out: &mut Vec<AiCommand>,
    ) -> Result<(), OracleError> {
        match self.replay_investigation(env, my, now, out)? {
            ReplayStatus::Stepped | ReplayStatus::Abandoned => return Ok(()),
            // A successful hand-off falls straight through to acquisition.
            ReplayStatus::LineOfSight | ReplayStatus::Idle => {}
        }

        if let Some(target) = self.acquire_with_veto(env, my, now, out) {
            self.set_combatant(target, now, out);
        } else {
            out.push(AiCommand::Roam);
        }
        Ok(())
    }

    fn do_combat(
        &mut self,
        _env: &WorldEnv<'_>,
        _my: &MobView,
        info: &CombatantInfo,
        now: Tick,
        out: &mut Vec<AiCommand>,
    ) -> Result<(), OracleError> {
        let Some(target) = self.combatant else {
            self.transition(ActionState::Wander, now);
            return Ok(());
        };

        if info.dead || info.fled {
            self.clear_combatant(out);
            self.transition(ActionState::Wander, now);
            return Ok(());
        }

        if !info.visible {
            // Limited tracking: close on the last known location while the
            // memory holds, otherwise give the target up.
            if let Some(&last) = self.memories.last_known.recall(&target, now.0) {
                out.push(AiCommand::Travel(last));
            } else {
                self.clear_combatant(out);
                self.transition(ActionState::Wander, now);
            }
            return Ok(());
        }

        if let Some(view) = &info.view {
            self.memories.last_known.remember(
                target,
                view.position,
                self.config.last_known_ttl,
                now.0,
            );
        }

        out.push(AiCommand::Approach(target));
        Ok(())
    }

    /// Uncontrolled guard: fight whoever threatens the post, otherwise scan,
    /// otherwise hold.
    fn do_guard(
        &mut self,
        env: &WorldEnv<'_>,
        my: &MobView,
        info: &CombatantInfo,
        now: Tick,
        out: &mut Vec<AiCommand>,
    ) -> Result<(), OracleError> {
        if let Some(target) = self.combatant
            && !info.dead
            && !info.fled
        {
            out.push(AiCommand::Approach(target));
            return Ok(());
        }

        self.clear_combatant(out);
        if let Some(target) = self.acquire_with_veto(env, my, now, out) {
            self.set_combatant(target, now, out);
        } else {
            out.push(AiCommand::Halt);
        }
        Ok(())
    }

    /// Hunt: full-speed pursuit of the combatant, no visibility requirement.
    fn do_hunt(
        &mut self,
        info: &CombatantInfo,
        now: Tick,
        out: &mut Vec<AiCommand>,
    ) -> Result<(), OracleError> {
        let Some(target) = self.combatant else {
            self.transition(ActionState::Wander, now);
            return Ok(());
        };
        if info.dead || info.fled {
            self.clear_combatant(out);
            self.transition(ActionState::Wander, now);
            return Ok(());
        }
        out.push(AiCommand::Approach(target));
        Ok(())
    }

    fn do_navigate(
        &mut self,
        my: &MobView,
        now: Tick,
        out: &mut Vec<AiCommand>,
    ) -> Result<(), OracleError> {
        while let Some(&next) = self.beacons.front() {
            if my.position.distance(next) <= 1 {
                self.beacons.pop_front();
                continue;
            }
            out.push(AiCommand::Travel(next));
            return Ok(());
        }
        self.transition(ActionState::Wander, now);
        Ok(())
    }

    fn do_flee(
        &mut self,
        my: &MobView,
        info: &CombatantInfo,
        now: Tick,
        out: &mut Vec<AiCommand>,
    ) -> Result<(), OracleError> {
        let Some(target) = self.combatant else {
            self.transition(ActionState::Wander, now);
            return Ok(());
        };
        if info.dead || info.fled {
            self.clear_combatant(out);
            self.transition(ActionState::Wander, now);
            return Ok(());
        }

        let recover_at = (self.profile.flee_below + RECOVER_MARGIN).min(100);
        let recovered = my.hits_max > 0 && my.hits * 100 >= recover_at * my.hits_max;
        if recovered {
            self.transition(ActionState::Combat, now);
            return Ok(());
        }

        out.push(AiCommand::RunFrom(target));
        Ok(())
    }

    /// Chase: follow the focus (or combatant) without attacking.
    fn do_chase(
        &mut self,
        env: &WorldEnv<'_>,
        _my: &MobView,
        now: Tick,
        out: &mut Vec<AiCommand>,
    ) -> Result<(), OracleError> {
        let Some(target) = self.focus.or(self.combatant) else {
            self.transition(ActionState::Wander, now);
            return Ok(());
        };
        match env.mobs()?.mob(target) {
            Some(view) if view.perceivable() => out.push(AiCommand::Approach(target)),
            _ => self.transition(ActionState::Wander, now),
        }
        Ok(())
    }

    fn do_interact(
        &mut self,
        env: &WorldEnv<'_>,
        now: Tick,
        out: &mut Vec<AiCommand>,
    ) -> Result<(), OracleError> {
        let Some(target) = self.focus else {
            self.transition(ActionState::Wander, now);
            return Ok(());
        };
        match env.mobs()?.mob(target) {
            Some(view) if view.perceivable() => out.push(AiCommand::Halt),
            _ => self.transition(ActionState::Wander, now),
        }
        Ok(())
    }

    /// Backoff: step away from a crowding focus until outside engage range.
    fn do_backoff(
        &mut self,
        env: &WorldEnv<'_>,
        my: &MobView,
        now: Tick,
        out: &mut Vec<AiCommand>,
    ) -> Result<(), OracleError> {
        let Some(target) = self.focus.or(self.combatant) else {
            self.transition(ActionState::Wander, now);
            return Ok(());
        };
        let Some(view) = env.mobs()?.mob(target) else {
            self.transition(ActionState::Wander, now);
            return Ok(());
        };
        if my.position.distance(view.position) > self.config.engage_range {
            self.transition(ActionState::Wander, now);
            return Ok(());
        }
        // Away is the heading from the target through us.
        if let Some(away) = Direction::toward(view.position, my.position) {
            out.push(AiCommand::Move(away));
        } else {
            out.push(AiCommand::Roam);
        }
        Ok(())
    }
}
