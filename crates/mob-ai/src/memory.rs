//! Per-actor memory stores.
//!
//! Each AI instance owns a small set of [`TtlStore`]s keyed by subject mob.
//! They are the only timeout mechanism in the engine: combat and perception
//! memory expires on a seconds scale, investigative paths after tens of
//! seconds, and ping-pong strike records after two minutes.

use ttl_store::TtlStore;

use crate::investigate::Investigation;
use crate::types::{MobId, Point, Tick};

/// A refreshed long-term sighting of a player.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Sighting {
    pub at: Point,
}

/// All memory owned by one AI instance.
///
/// Stores persist for the actor's lifetime but can be dropped wholesale when
/// the actor leaves a simulated region.
#[derive(Clone, Debug, Default)]
pub struct AiMemories {
    /// Long-term "who did I recently see" memory, refreshed by the see pass.
    pub sightings: TtlStore<MobId, Sighting>,

    /// Short-lived last known location of an acquired focus, supporting
    /// limited tracking of temporarily hidden targets.
    pub last_known: TtlStore<MobId, Point>,

    /// Recorded paths toward desired-but-unseen targets.
    pub investigations: TtlStore<MobId, Investigation>,

    /// Priority-proposal strike counters for ping-pong suppression.
    pub strikes: TtlStore<MobId, u32>,
}

impl AiMemories {
    pub fn new() -> Self {
        Self::default()
    }

    /// Drops everything, e.g. when the owner leaves an active region.
    pub fn clear(&mut self) {
        self.sightings.clear();
        self.last_known.clear();
        self.investigations.clear();
        self.strikes.clear();
    }

    /// Bulk-purges expired entries across all stores.
    pub fn sweep(&mut self, now: Tick) {
        self.sightings.purge_expired(now.0);
        self.last_known.purge_expired(now.0);
        self.investigations.purge_expired(now.0);
        self.strikes.purge_expired(now.0);
    }
}
