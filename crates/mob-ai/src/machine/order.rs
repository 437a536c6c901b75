//! Controller orders: the entry point and per-tick handlers.

use crate::ai::{CombatantInfo, MobAi};
use crate::command::AiCommand;
use crate::env::{MobView, OracleError, WorldEnv};
use crate::machine::OrderState;
use crate::types::{MobId, Tick};

/// Distance at which a following or guarding mob is close enough to its
/// controller to hold position.
const HEEL_RANGE: u32 = 2;

impl MobAi {
    /// Order entry point, invoked by the actor's controller.
    ///
    /// Changing order always forgives any residual aggression toward the
    /// controller, cancels in-flight path state, and resets movement speed
    /// according to the new order's urgency.
    pub fn give_order(
        &mut self,
        controller: MobId,
        order: OrderState,
        target: Option<MobId>,
        now: Tick,
        out: &mut Vec<AiCommand>,
    ) {
        tracing::debug!(mob = %self.id, %order, "order received");
        self.order = order;
        self.order_target = target;

        out.push(AiCommand::ForgiveAggressor(controller));

        self.beacons.clear();
        self.investigating = None;
        self.memories.investigations.clear();
        self.engaged_speed = order.urgent();

        match order {
            OrderState::Attack => {
                if let Some(target) = target {
                    self.set_combatant(target, now, out);
                }
            }
            OrderState::Stop => {
                self.clear_combatant(out);
                self.focus = None;
                out.push(AiCommand::Halt);
            }
            _ => {}
        }
    }

    /// Dispatches to the handler for the current order state.
    pub(crate) fn handle_order(
        &mut self,
        env: &WorldEnv<'_>,
        my: &MobView,
        info: &CombatantInfo,
        now: Tick,
        out: &mut Vec<AiCommand>,
    ) -> Result<(), OracleError> {
        match self.order {
            // Orders with no standing behavior fall through to the action
            // machine.
            OrderState::None | OrderState::Release | OrderState::Friend => {
                self.handle_action(env, my, info, now, out)
            }
            OrderState::Come => self.do_order_come(env, my, now, out),
            OrderState::Follow => self.do_order_follow(env, my, out),
            OrderState::Guard => self.do_order_guard(env, my, now, out),
            OrderState::Attack => self.do_order_attack(env, now, out),
            OrderState::Patrol => self.do_order_patrol(my, out),
            OrderState::Stay | OrderState::Stop => {
                out.push(AiCommand::Halt);
                Ok(())
            }
            OrderState::Transfer | OrderState::Drop => {
                self.clear_combatant(out);
                out.push(AiCommand::Halt);
                Ok(())
            }
        }
    }

    fn do_order_come(
        &mut self,
        env: &WorldEnv<'_>,
        my: &MobView,
        _now: Tick,
        out: &mut Vec<AiCommand>,
    ) -> Result<(), OracleError> {
        let Some(principal) = my.controller else {
            out.push(AiCommand::Halt);
            return Ok(());
        };
        match env.mobs()?.mob(principal) {
            Some(view) if my.position.distance(view.position) > 1 => {
                out.push(AiCommand::Travel(view.position));
            }
            _ => {
                // Arrived (or controller gone): hold until the next order.
                self.order = OrderState::Stay;
                self.engaged_speed = false;
                out.push(AiCommand::Halt);
            }
        }
        Ok(())
    }

    fn do_order_follow(
        &mut self,
        env: &WorldEnv<'_>,
        my: &MobView,
        out: &mut Vec<AiCommand>,
    ) -> Result<(), OracleError> {
        let Some(principal) = my.controller else {
            out.push(AiCommand::Halt);
            return Ok(());
        };
        match env.mobs()?.mob(principal) {
            Some(view) if my.position.distance(view.position) > HEEL_RANGE => {
                out.push(AiCommand::Approach(principal));
            }
            _ => out.push(AiCommand::Halt),
        }
        Ok(())
    }

    /// Guard order: re-derive the combatant from whichever of the
    /// controller's attackers or our own is reachable and currently hostile.
    ///
    /// The chosen combatant must hold a live aggression against the principal
    /// (or us), not merely be whoever the principal last pointed at; a stale,
    /// already-resolved threat is dropped.
    fn do_order_guard(
        &mut self,
        env: &WorldEnv<'_>,
        my: &MobView,
        now: Tick,
        out: &mut Vec<AiCommand>,
    ) -> Result<(), OracleError> {
        let Some(principal) = my.controller else {
            out.push(AiCommand::Halt);
            return Ok(());
        };
        let mobs = env.mobs()?;
        let ledger = env.ledger()?;
        let topology = env.topology()?;

        let mut threat = None;
        let candidates = ledger
            .aggressors(principal)
            .into_iter()
            .chain(ledger.aggressors(self.id));
        for entry in candidates {
            if entry.expired || entry.counterpart == self.id {
                continue;
            }
            let Some(view) = mobs.mob(entry.counterpart) else {
                continue;
            };
            if !view.perceivable() {
                continue;
            }
            let distance = my.position.distance(view.position);
            if distance > self.profile.perception {
                continue;
            }
            if distance > self.config.engage_range
                && !topology.path_clear(my.position, view.position)
            {
                continue;
            }
            threat = Some(entry.counterpart);
            break;
        }

        if let Some(target) = threat {
            self.set_combatant(target, now, out);
            if let Some(better) = self.reevaluate_combatant(env, my, now)? {
                self.set_combatant(better, now, out);
            }
            if let Some(current) = self.combatant {
                out.push(AiCommand::Approach(current));
            }
        } else {
            self.clear_combatant(out);
            match mobs.mob(principal) {
                Some(view) if my.position.distance(view.position) > HEEL_RANGE => {
                    out.push(AiCommand::Approach(principal));
                }
                _ => out.push(AiCommand::Halt),
            }
        }
        Ok(())
    }

    fn do_order_attack(
        &mut self,
        env: &WorldEnv<'_>,
        now: Tick,
        out: &mut Vec<AiCommand>,
    ) -> Result<(), OracleError> {
        let Some(target) = self.order_target else {
            self.order = OrderState::None;
            return Ok(());
        };
        match env.mobs()?.mob(target) {
            Some(view) if view.alive && !view.deleted => {
                self.set_combatant(target, now, out);
                out.push(AiCommand::Approach(target));
            }
            _ => {
                // Target resolved; stand down.
                self.clear_combatant(out);
                self.order = OrderState::None;
                self.order_target = None;
                out.push(AiCommand::Halt);
            }
        }
        Ok(())
    }

    /// Patrol cycles the beacon list instead of consuming it. One full
    /// rotation without an unreached beacon means the route is degenerate.
    fn do_order_patrol(&mut self, my: &MobView, out: &mut Vec<AiCommand>) -> Result<(), OracleError> {
        for _ in 0..self.beacons.len() {
            let Some(&next) = self.beacons.front() else {
                break;
            };
            if my.position.distance(next) <= 1 {
                // Reached: rotate to the back and try the next one.
                if let Some(done) = self.beacons.pop_front() {
                    self.beacons.push_back(done);
                }
                continue;
            }
            out.push(AiCommand::Travel(next));
            return Ok(());
        }
        out.push(AiCommand::Halt);
        Ok(())
    }
}
