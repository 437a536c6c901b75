//! Shared in-memory world double implementing all four oracles.
#![allow(dead_code)]

use std::collections::{HashMap, HashSet};

use mob_ai::{
    AggressionEntry, AiCommand, DamageEntry, DoorState, Env, LedgerOracle, MobAi, MobId, MobOracle,
    MobView, PcgRng, Point, RngOracle, Tick, TopologyOracle, WorldEnv,
};

/// Mutable fake world: tests poke its maps directly between think ticks.
#[derive(Default)]
pub struct FakeWorld {
    pub mobs: HashMap<MobId, MobView>,
    pub blocked_sight: HashSet<(Point, Point)>,
    pub blocked_paths: HashSet<(Point, Point)>,
    pub planned: HashMap<(Point, Point), Vec<mob_ai::Direction>>,
    pub doors: HashMap<Point, DoorState>,
    pub guarded: HashSet<Point>,
    pub aggressors: HashMap<MobId, Vec<AggressionEntry>>,
    pub aggressed: HashMap<MobId, Vec<AggressionEntry>>,
    pub damage: HashMap<MobId, Vec<DamageEntry>>,
    /// When set, every d100 roll resolves to this value.
    pub forced_roll: Option<u32>,
}

impl FakeWorld {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, view: MobView) {
        self.mobs.insert(view.id, view);
    }

    pub fn env(&self) -> WorldEnv<'_> {
        Env::new(
            Some(self as &dyn MobOracle),
            Some(self as &dyn TopologyOracle),
            Some(self as &dyn LedgerOracle),
            Some(self as &dyn RngOracle),
        )
    }

    /// Records a live aggression of `attacker` against `victim` in both
    /// ledger directions.
    pub fn attack(&mut self, attacker: MobId, victim: MobId) {
        self.aggressors.entry(victim).or_default().push(AggressionEntry {
            counterpart: attacker,
            expired: false,
        });
        self.aggressed.entry(attacker).or_default().push(AggressionEntry {
            counterpart: victim,
            expired: false,
        });
    }

    pub fn set_damage(&mut self, victim: MobId, source: MobId, total: u32) {
        let entries = self.damage.entry(victim).or_default();
        if let Some(entry) = entries.iter_mut().find(|e| e.source == source) {
            entry.total = total;
        } else {
            entries.push(DamageEntry {
                source,
                total,
                expired: false,
            });
        }
    }

    pub fn block_sight(&mut self, a: Point, b: Point) {
        self.blocked_sight.insert((a, b));
    }

    pub fn unblock_sight(&mut self, a: Point, b: Point) {
        self.blocked_sight.remove(&(a, b));
        self.blocked_sight.remove(&(b, a));
    }

    pub fn block_path(&mut self, a: Point, b: Point) {
        self.blocked_paths.insert((a, b));
    }

    pub fn force_roll(&mut self, roll: u32) {
        assert!((1..=100).contains(&roll));
        self.forced_roll = Some(roll);
    }
}

impl MobOracle for FakeWorld {
    fn mob(&self, id: MobId) -> Option<MobView> {
        self.mobs.get(&id).cloned()
    }

    fn mobs_in_range(&self, center: Point, range: u32) -> Vec<MobId> {
        let mut ids: Vec<MobId> = self
            .mobs
            .values()
            .filter(|view| center.distance(view.position) <= range)
            .map(|view| view.id)
            .collect();
        ids.sort();
        ids
    }
}

impl TopologyOracle for FakeWorld {
    fn line_of_sight(&self, from: Point, to: Point) -> bool {
        !self.blocked_sight.contains(&(from, to)) && !self.blocked_sight.contains(&(to, from))
    }

    fn path_clear(&self, from: Point, to: Point) -> bool {
        !self.blocked_paths.contains(&(from, to)) && !self.blocked_paths.contains(&(to, from))
    }

    fn plan_path(&self, from: Point, to: Point) -> Option<Vec<mob_ai::Direction>> {
        self.planned.get(&(from, to)).cloned()
    }

    fn door_at(&self, at: Point) -> Option<DoorState> {
        self.doors.get(&at).copied()
    }

    fn guarded(&self, at: Point) -> bool {
        self.guarded.contains(&at)
    }
}

impl LedgerOracle for FakeWorld {
    fn aggressors(&self, victim: MobId) -> Vec<AggressionEntry> {
        self.aggressors.get(&victim).cloned().unwrap_or_default()
    }

    fn aggressed(&self, attacker: MobId) -> Vec<AggressionEntry> {
        self.aggressed.get(&attacker).cloned().unwrap_or_default()
    }

    fn damage_entries(&self, victim: MobId) -> Vec<DamageEntry> {
        self.damage.get(&victim).cloned().unwrap_or_default()
    }
}

impl RngOracle for FakeWorld {
    fn next_u32(&self, seed: u64) -> u32 {
        match self.forced_roll {
            // Arrange for roll_d100 to land exactly on the forced value.
            Some(roll) => roll - 1,
            None => PcgRng.next_u32(seed),
        }
    }
}

/// Neutral monster snapshot at a position; tests tweak fields afterward.
pub fn mob_at(id: u32, x: i32, y: i32) -> MobView {
    MobView {
        id: MobId(id),
        position: Point::new(x, y),
        alive: true,
        deleted: false,
        hidden: false,
        blessed: false,
        is_player: false,
        hits: 50,
        hits_max: 50,
        strength: 10,
        intellect: 10,
        karma: 0,
        criminal: false,
        murderer: false,
        faction: None,
        controller: None,
        summoner: None,
        wanted: false,
    }
}

pub fn player_at(id: u32, x: i32, y: i32) -> MobView {
    MobView {
        is_player: true,
        ..mob_at(id, x, y)
    }
}

/// Opt-in decision tracing for debugging a failing scenario; enable with
/// `RUST_LOG=mob_ai=debug`.
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

/// Runs one think tick and returns the emitted commands.
pub fn think(ai: &mut MobAi, world: &FakeWorld, at: u64) -> Vec<AiCommand> {
    init_tracing();
    let mut out = Vec::new();
    ai.think(&world.env(), Tick(at), &mut out)
        .expect("think should not fail with all oracles wired");
    out
}
