//! The per-actor AI instance and its think entry point.
//!
//! One [`MobAi`] is created with, and destroyed with, its actor. The
//! scheduler invokes [`MobAi::think`] once per due pulse; a controller
//! invokes [`MobAi::give_order`]. Everything else is internal.

use std::collections::VecDeque;
use std::sync::Arc;

use crate::command::AiCommand;
use crate::config::AiConfig;
use crate::env::{MobView, OracleError, WorldEnv};
use crate::hooks::{DefaultSpecies, SpeciesHooks};
use crate::machine::{ActionState, OrderState};
use crate::memory::AiMemories;
use crate::profile::AiProfile;
use crate::scheduler::ThinkDisposition;
use crate::types::{MobId, Point, Tick};

/// Defects surfaced by a think pass. Transient world conditions (no target,
/// blocked path) are ordinary return values, never errors; this type only
/// carries host wiring failures. The scheduler logs it at the per-actor
/// boundary and the pulse continues.
#[derive(Clone, Copy, Debug, PartialEq, Eq, thiserror::Error)]
pub enum ThinkError {
    #[error("oracle failure during think: {0}")]
    Oracle(#[from] OracleError),
}

/// Auxiliary perception info about the current combatant, computed once per
/// tick before dispatch.
#[derive(Clone, Debug, Default)]
pub(crate) struct CombatantInfo {
    pub view: Option<MobView>,
    pub reachable: bool,
    pub visible: bool,
    pub dead: bool,
    pub fled: bool,
}

/// Decision state for one actor.
pub struct MobAi {
    pub(crate) id: MobId,
    pub(crate) profile: AiProfile,
    pub(crate) config: AiConfig,
    pub(crate) hooks: Arc<dyn SpeciesHooks>,
    pub(crate) action: ActionState,
    pub(crate) order: OrderState,
    pub(crate) order_target: Option<MobId>,
    pub(crate) focus: Option<MobId>,
    pub(crate) combatant: Option<MobId>,
    pub(crate) beacons: VecDeque<Point>,
    pub(crate) investigating: Option<MobId>,
    pub(crate) memories: AiMemories,
    pub(crate) next_reacquire: Tick,
    pub(crate) engaged_speed: bool,
}

impl MobAi {
    pub fn new(id: MobId, profile: AiProfile, config: AiConfig) -> Self {
        Self::with_hooks(id, profile, config, Arc::new(DefaultSpecies))
    }

    pub fn with_hooks(
        id: MobId,
        profile: AiProfile,
        config: AiConfig,
        hooks: Arc<dyn SpeciesHooks>,
    ) -> Self {
        Self {
            id,
            profile,
            config,
            hooks,
            action: ActionState::Wander,
            order: OrderState::None,
            order_target: None,
            focus: None,
            combatant: None,
            beacons: VecDeque::new(),
            investigating: None,
            memories: AiMemories::new(),
            next_reacquire: Tick::ZERO,
            engaged_speed: false,
        }
    }

    pub fn id(&self) -> MobId {
        self.id
    }

    pub fn action(&self) -> ActionState {
        self.action
    }

    pub fn order(&self) -> OrderState {
        self.order
    }

    pub fn focus(&self) -> Option<MobId> {
        self.focus
    }

    pub fn combatant(&self) -> Option<MobId> {
        self.combatant
    }

    pub fn profile(&self) -> &AiProfile {
        &self.profile
    }

    pub fn memories(&self) -> &AiMemories {
        &self.memories
    }

    pub fn memories_mut(&mut self) -> &mut AiMemories {
        &mut self.memories
    }

    /// Think interval derived from the actor's current activity; picked up by
    /// the scheduler on the next pulse without re-registration.
    pub fn current_interval(&self) -> u64 {
        if self.engaged_speed {
            self.profile.active_interval
        } else {
            self.profile.passive_interval
        }
    }

    /// Starts multi-waypoint beacon following.
    pub fn navigate_to(&mut self, beacons: impl IntoIterator<Item = Point>, now: Tick) {
        self.transition(ActionState::Navigate, now);
        self.beacons = beacons.into_iter().collect();
    }

    /// Sets the waypoints walked in a loop under the patrol order. Call after
    /// [`MobAi::give_order`], which cancels any previous route.
    pub fn set_patrol_route(&mut self, beacons: impl IntoIterator<Item = Point>) {
        self.beacons = beacons.into_iter().collect();
    }

    /// Forces a top-level behavior change, e.g. from a species hook entering
    /// one of the states the default machine never enters on its own.
    pub fn set_action(&mut self, action: ActionState, now: Tick) {
        self.transition(action, now);
    }

    /// Sets the non-combat focus used by the chase, interact, and backoff
    /// states.
    pub fn set_focus(&mut self, focus: Option<MobId>) {
        self.focus = focus;
    }

    /// Per-tick think routine, invoked by the scheduler when this actor is
    /// due. Appends effects to `out`; never blocks.
    pub fn think(
        &mut self,
        env: &WorldEnv<'_>,
        now: Tick,
        out: &mut Vec<AiCommand>,
    ) -> Result<ThinkDisposition, ThinkError> {
        let Some(my) = env.mobs()?.mob(self.id) else {
            tracing::debug!(mob = %self.id, "actor no longer resolves, stopping ai");
            return Ok(ThinkDisposition::Stop);
        };
        if my.deleted {
            return Ok(ThinkDisposition::Stop);
        }
        if !my.alive {
            // Dead but not deleted (awaiting resurrection or corpse decay):
            // stay registered, do nothing.
            return Ok(self.disposition());
        }

        // The flee condition overrides everything else.
        if self.action != ActionState::Flee && self.should_flee(&my) {
            tracing::debug!(mob = %self.id, hits = my.hits, "breaking off to flee");
            self.transition(ActionState::Flee, now);
        }

        let hooks = Arc::clone(&self.hooks);
        if hooks.override_think(self, env, now, out) {
            return Ok(self.disposition());
        }

        if my.controller.is_none()
            && matches!(self.action, ActionState::Combat | ActionState::Guard)
            && self.combatant.is_some()
        {
            match self.reevaluate_combatant(env, &my, now) {
                Ok(Some(better)) => {
                    let vetoed = match env.mobs()?.mob(better) {
                        Some(view) => hooks.veto_target(&my, &view),
                        None => true,
                    };
                    if !vetoed {
                        self.set_combatant(better, now, out);
                    }
                }
                Ok(None) => {}
                Err(error) => {
                    tracing::warn!(mob = %self.id, %error, "combatant re-evaluation failed");
                }
            }
        }

        let info = self.combatant_info(env, &my)?;

        if my.controller.is_some() {
            self.handle_order(env, &my, &info, now, out)?;
        } else {
            self.handle_action(env, &my, &info, now, out)?;
        }

        Ok(self.disposition())
    }

    pub(crate) fn disposition(&self) -> ThinkDisposition {
        ThinkDisposition::Continue {
            next_interval: self.current_interval(),
        }
    }

    fn should_flee(&self, my: &MobView) -> bool {
        self.profile.flee_below > 0
            && self.combatant.is_some()
            && my.hits_max > 0
            && my.hits * 100 < self.profile.flee_below * my.hits_max
    }

    /// Switches the top-level action state, resetting speed and transient
    /// per-state fields.
    pub(crate) fn transition(&mut self, to: ActionState, now: Tick) {
        let from = self.action;
        if from == to {
            return;
        }
        tracing::debug!(mob = %self.id, %from, %to, "action transition");
        self.action = to;
        self.focus = None;
        self.beacons.clear();
        self.engaged_speed = to.engaged();

        // Leaving a fight forces a fresh scan instead of orbiting the old
        // target's last position.
        if matches!(from, ActionState::Combat | ActionState::Guard)
            && matches!(to, ActionState::Wander | ActionState::Guard)
        {
            self.next_reacquire = now;
        }
    }

    pub(crate) fn set_combatant(&mut self, target: MobId, now: Tick, out: &mut Vec<AiCommand>) {
        if self.combatant != Some(target) {
            tracing::debug!(mob = %self.id, %target, "engaging combatant");
            self.combatant = Some(target);
            out.push(AiCommand::Engage(target));
        }
        if self.action != ActionState::Combat && self.action != ActionState::Guard {
            self.transition(ActionState::Combat, now);
        }
    }

    pub(crate) fn clear_combatant(&mut self, out: &mut Vec<AiCommand>) {
        if self.combatant.take().is_some() {
            out.push(AiCommand::Disengage);
        }
    }

    pub(crate) fn combatant_info(
        &self,
        env: &WorldEnv<'_>,
        my: &MobView,
    ) -> Result<CombatantInfo, OracleError> {
        let Some(target) = self.combatant else {
            return Ok(CombatantInfo::default());
        };
        let Some(view) = env.mobs()?.mob(target) else {
            return Ok(CombatantInfo {
                dead: true,
                ..CombatantInfo::default()
            });
        };
        let topology = env.topology()?;
        let dead = !view.alive || view.deleted;
        let distance = my.position.distance(view.position);
        let fled = distance > self.profile.perception;
        let visible = !view.hidden && topology.line_of_sight(my.position, view.position);
        let reachable = distance <= self.config.engage_range
            || topology.path_clear(my.position, view.position);
        Ok(CombatantInfo {
            view: Some(view),
            reachable,
            visible,
            dead,
            fled,
        })
    }
}
