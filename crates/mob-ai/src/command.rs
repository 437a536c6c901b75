//! Outward effect channel.
//!
//! A think pass never mutates the world directly; it appends [`AiCommand`]
//! values that the host applies after the pulse. Movement commands map onto
//! the host's step primitive and longer-horizon path follower.

use crate::types::{Direction, MobId, Point};

/// One effect requested by a think pass, applied by the host in order.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AiCommand {
    /// Take a single step in a direction.
    Move(Direction),

    /// Follow a planned path toward a fixed point (navigation beacons,
    /// last-known locations).
    Travel(Point),

    /// Follow a planned path toward a moving mob.
    Approach(MobId),

    /// Move away from a mob at fleeing speed.
    RunFrom(MobId),

    /// Take an aimless wander step; the host picks the direction.
    Roam,

    /// Stop all movement.
    Halt,

    /// Set the given mob as combatant and enter war mode.
    Engage(MobId),

    /// Clear the combatant and leave war mode.
    Disengage,

    /// Attempt to open the door at a point.
    OpenDoor(Point),

    /// Summon town guards onto a guard-worthy mob.
    CallGuards(MobId),

    /// Drop all aggression toward a mob from the external ledger.
    ForgiveAggressor(MobId),
}
