//! Per-species behavior profile.
//!
//! A profile is pure data supplied at construction time: the selection
//! specification, perception radius, targeting flags, and the two think
//! intervals. Stat and loot definitions stay outside the engine.

use crate::select::FightMode;

/// Static behavior parameters for one AI instance.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AiProfile {
    /// Composite selection specification (type bits + ordering bits).
    pub fight_mode: FightMode,

    /// Perception radius in tiles for acquisition scans.
    pub perception: u32,

    /// Only player characters are valid focus candidates.
    pub players_only: bool,

    /// Faction allies may be targeted.
    pub faction_allies: bool,

    /// Faction enemies may be targeted.
    pub faction_enemies: bool,

    /// Skip the last-resort queue: never settle for a candidate without an
    /// accessible ground path.
    pub ignore_unreachable: bool,

    /// May open unlocked doors while replaying an investigation path.
    pub can_open_doors: bool,

    /// Town-guard-eligible: observing a guard-worthy mob in a guarded region
    /// summons the watch.
    pub town_guard: bool,

    /// Think interval in milliseconds while engaged (combat, fleeing,
    /// urgent orders).
    pub active_interval: u64,

    /// Think interval in milliseconds while idle.
    pub passive_interval: u64,

    /// Flee when current hits drop below this percentage of maximum.
    /// Zero means the mob never flees.
    pub flee_below: u32,
}

impl AiProfile {
    pub const DEFAULT_PERCEPTION: u32 = 10;
    pub const DEFAULT_ACTIVE_INTERVAL: u64 = 200;
    pub const DEFAULT_PASSIVE_INTERVAL: u64 = 800;

    pub fn new(fight_mode: FightMode) -> Self {
        Self {
            fight_mode,
            perception: Self::DEFAULT_PERCEPTION,
            players_only: false,
            faction_allies: false,
            faction_enemies: true,
            ignore_unreachable: false,
            can_open_doors: false,
            town_guard: false,
            active_interval: Self::DEFAULT_ACTIVE_INTERVAL,
            passive_interval: Self::DEFAULT_PASSIVE_INTERVAL,
            flee_below: 0,
        }
    }

    pub fn with_perception(mut self, perception: u32) -> Self {
        self.perception = perception;
        self
    }

    pub fn with_intervals(mut self, active: u64, passive: u64) -> Self {
        self.active_interval = active;
        self.passive_interval = passive;
        self
    }

    pub fn with_flee_below(mut self, percent: u32) -> Self {
        self.flee_below = percent.min(100);
        self
    }

    pub fn with_door_opening(mut self) -> Self {
        self.can_open_doors = true;
        self
    }

    pub fn town_guard(mut self) -> Self {
        self.town_guard = true;
        self
    }
}

impl Default for AiProfile {
    fn default() -> Self {
        Self::new(FightMode::empty())
    }
}
