//! Action and order state machines.
//!
//! The action machine drives autonomous behavior; the order machine layers a
//! controller's commands on top for controlled mobs. Per-tick dispatch lives
//! in [`action`] and [`order`] as handler methods on the AI instance.

mod action;
mod order;

use serde::{Deserialize, Serialize};

/// Top-level behavior state selecting which per-tick routine executes.
///
/// `Wander` is the implicit initial state; there is no terminal state — the
/// machine runs for the actor's entire lifetime.
#[derive(
    Clone,
    Copy,
    Debug,
    Default,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    strum::Display,
    strum::AsRefStr,
)]
#[strum(serialize_all = "snake_case")]
pub enum ActionState {
    /// Idle roaming; acquisition and investigation replay happen here.
    #[default]
    Wander,
    /// Actively fighting the current combatant.
    Combat,
    /// Holding a position or principal, fighting whoever threatens it.
    Guard,
    /// Pursuing a combatant at full speed without waiting for perception.
    Hunt,
    /// Multi-waypoint beacon following.
    Navigate,
    /// Running from the current combatant.
    Flee,
    /// Following a target without attacking.
    Chase,
    /// Engaged with a focus non-violently.
    Interact,
    /// Stepping away from a crowding focus.
    Backoff,
}

impl ActionState {
    /// States serviced at the engaged (faster) think interval.
    pub fn engaged(self) -> bool {
        matches!(
            self,
            ActionState::Combat
                | ActionState::Guard
                | ActionState::Hunt
                | ActionState::Flee
                | ActionState::Chase
        )
    }
}

/// Controller-issued order for controlled mobs, layered atop [`ActionState`].
#[derive(
    Clone,
    Copy,
    Debug,
    Default,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    strum::Display,
    strum::AsRefStr,
)]
#[strum(serialize_all = "snake_case")]
pub enum OrderState {
    /// No standing order; the action machine runs unimpeded.
    #[default]
    None,
    /// Move to the controller once, then hold.
    Come,
    /// Keep following the controller.
    Follow,
    /// Guard the controller against live aggressors.
    Guard,
    /// Attack the order target.
    Attack,
    /// Walk the patrol beacons in a loop.
    Patrol,
    /// Hold position.
    Stay,
    /// Cease everything: combat, movement, and the standing order.
    Stop,
    /// Ownership hand-off in progress; hold and disengage.
    Transfer,
    /// Released from control; resume autonomous behavior.
    Release,
    /// Drop carried goods, then await orders.
    Drop,
    /// Friend registration acknowledged; no behavior change.
    Friend,
}

impl OrderState {
    /// Orders implying urgency get the engaged think interval.
    pub fn urgent(self) -> bool {
        matches!(
            self,
            OrderState::Come | OrderState::Follow | OrderState::Guard | OrderState::Attack
        )
    }
}
