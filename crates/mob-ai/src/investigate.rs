//! Investigative memory: recorded paths toward desired-but-unseen targets.
//!
//! When acquisition wants a target that is in range but out of sight, the
//! engine records a path snapshot toward the target's position at that
//! moment. Wander ticks replay the snapshot one step at a time, without
//! replanning, until line of sight is gained, the snapshot goes stale, or
//! the world gets in the way.

use crate::ai::MobAi;
use crate::command::AiCommand;
use crate::env::{DoorState, MobView, OracleError, WorldEnv, decision_seed};
use crate::types::{Direction, MobId, Point, Tick};

// Per-decision RNG salts; distinct so the two rolls in one tick differ.
const DOOR_SALT: u64 = 1;
const BOUNCE_SALT: u64 = 2;

/// An immutable step sequence with a forward-only cursor.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PathSnapshot {
    steps: Vec<Direction>,
    cursor: usize,
}

impl PathSnapshot {
    pub fn new(steps: Vec<Direction>) -> Self {
        Self { steps, cursor: 0 }
    }

    /// Consumes and returns the next step, or `None` when exhausted.
    pub fn next(&mut self) -> Option<Direction> {
        let step = self.steps.get(self.cursor).copied()?;
        self.cursor += 1;
        Some(step)
    }

    pub fn remaining(&self) -> usize {
        self.steps.len() - self.cursor
    }
}

/// One recorded investigation: where the target was when the path was
/// planned, and the snapshot leading there.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Investigation {
    pub goal: Point,
    pub path: PathSnapshot,
}

/// Outcome of one replay attempt, reported to the wander handler.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ReplayStatus {
    /// No investigation pending.
    Idle,
    /// Consumed one step of the path.
    Stepped,
    /// Sight gained; the record was dropped and acquisition may run now.
    LineOfSight,
    /// The record went stale or the path was blocked; dropped.
    Abandoned,
}

impl MobAi {
    /// Records a path toward `target` at `goal`, unless an investigation for
    /// that target is already on file. Targets without a ground path are not
    /// recorded at all.
    pub(crate) fn record_investigation(
        &mut self,
        env: &WorldEnv<'_>,
        my: &MobView,
        target: MobId,
        goal: Point,
        now: Tick,
    ) -> Result<(), OracleError> {
        if self.memories.investigations.contains(&target, now.0) {
            return Ok(());
        }
        let Some(steps) = env.topology()?.plan_path(my.position, goal) else {
            return Ok(());
        };
        tracing::debug!(mob = %self.id, %target, %goal, steps = steps.len(), "recording investigation");
        self.memories.investigations.remember(
            target,
            Investigation {
                goal,
                path: PathSnapshot::new(steps),
            },
            self.config.investigation_ttl,
            now.0,
        );
        if self.investigating.is_none() {
            self.investigating = Some(target);
        }
        Ok(())
    }

    /// Replays at most one step of the pending investigation.
    ///
    /// Abandonment always drops the record and, when the path was physically
    /// blocked, emits a bounce step away from the obstacle so the mob does
    /// not freeze against it.
    pub(crate) fn replay_investigation(
        &mut self,
        env: &WorldEnv<'_>,
        my: &MobView,
        now: Tick,
        out: &mut Vec<AiCommand>,
    ) -> Result<ReplayStatus, OracleError> {
        let Some(target) = self.investigating else {
            return Ok(ReplayStatus::Idle);
        };
        let Some(record) = self.memories.investigations.recall_mut(&target, now.0) else {
            // Expired underneath us.
            self.investigating = None;
            return Ok(ReplayStatus::Idle);
        };
        let goal = record.goal;

        let mobs = env.mobs()?;
        let topology = env.topology()?;

        // Target gone, dead, or drifted too far from the recorded goal: the
        // snapshot no longer leads anywhere useful.
        let stale = match mobs.mob(target) {
            Some(view) if view.alive && !view.deleted => {
                view.position.distance(goal) > self.config.investigation_drift
            }
            _ => true,
        };
        if stale {
            return Ok(self.abandon_investigation(target, None, now, out));
        }

        if !my.hidden && topology.line_of_sight(my.position, goal) {
            tracing::debug!(mob = %self.id, %target, "investigation resolved by sight");
            self.memories.investigations.forget(&target);
            self.investigating = None;
            return Ok(ReplayStatus::LineOfSight);
        }

        let Some(record) = self.memories.investigations.recall_mut(&target, now.0) else {
            self.investigating = None;
            return Ok(ReplayStatus::Idle);
        };
        let Some(step) = record.path.next() else {
            // Walked the whole snapshot without gaining sight.
            return Ok(self.abandon_investigation(target, None, now, out));
        };

        let ahead = my.position.step(step);
        match topology.door_at(ahead) {
            Some(DoorState::Closed { locked: true }) => {
                Ok(self.abandon_investigation(target, Some(step), now, out))
            }
            Some(DoorState::Closed { locked: false }) => {
                if !self.profile.can_open_doors {
                    return Ok(self.abandon_investigation(target, Some(step), now, out));
                }
                let seed = decision_seed(self.id, now, DOOR_SALT);
                if env.rng()?.roll_d100(seed) <= self.config.door_open_chance {
                    out.push(AiCommand::OpenDoor(ahead));
                    out.push(AiCommand::Move(step));
                    Ok(ReplayStatus::Stepped)
                } else {
                    Ok(self.abandon_investigation(target, Some(step), now, out))
                }
            }
            Some(DoorState::Open) | None => {
                out.push(AiCommand::Move(step));
                Ok(ReplayStatus::Stepped)
            }
        }
    }

    /// Drops the record and pointer. When replay ran into an obstacle,
    /// `blocked` carries the step that failed and a bounce step is emitted
    /// roughly away from it.
    fn abandon_investigation(
        &mut self,
        target: MobId,
        blocked: Option<Direction>,
        now: Tick,
        out: &mut Vec<AiCommand>,
    ) -> ReplayStatus {
        tracing::debug!(mob = %self.id, %target, "abandoning investigation");
        self.memories.investigations.forget(&target);
        self.investigating = None;

        if let Some(step) = blocked {
            // Pick one of the three headings facing away from the obstacle.
            let seed = decision_seed(self.id, now, BOUNCE_SALT);
            let spin = (seed % 3) as i8 - 1;
            let back = step.reverse();
            let index = Direction::ALL
                .iter()
                .position(|&d| d == back)
                .unwrap_or(0) as i8;
            let bounced = Direction::ALL[(index + spin).rem_euclid(8) as usize];
            out.push(AiCommand::Move(bounced));
        }
        ReplayStatus::Abandoned
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn snapshot_cursor_is_forward_only() {
        let mut path = PathSnapshot::new(vec![Direction::North, Direction::East]);
        assert_eq!(path.remaining(), 2);
        assert_eq!(path.next(), Some(Direction::North));
        assert_eq!(path.next(), Some(Direction::East));
        assert_eq!(path.next(), None);
        assert_eq!(path.next(), None);
        assert_eq!(path.remaining(), 0);
    }
}
