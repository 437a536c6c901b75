//! Engine configuration constants and tunable parameters.

/// Tunable timing and behavior parameters shared by every AI instance.
///
/// All durations are milliseconds of engine time ([`crate::Tick`]).
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AiConfig {
    /// Nominal scheduler pulse resolution. The pulse source is owned by the
    /// host loop; this value only documents the granularity think intervals
    /// are rounded to.
    pub pulse_resolution: u64,

    /// Minimum delay between two full perception scans for one actor,
    /// independent of the scheduler's own pulse interval.
    pub reacquire_delay: u64,

    /// TTL of the long-term "recently seen player" memory refreshed by the
    /// see pass.
    pub sighting_ttl: u64,

    /// TTL of the short-lived last-known-location memory recorded for a
    /// freshly acquired focus.
    pub last_known_ttl: u64,

    /// TTL of an investigative path snapshot.
    pub investigation_ttl: u64,

    /// A replayed investigation is discarded when its subject has drifted
    /// more than this many tiles from the recorded goal.
    pub investigation_drift: u32,

    /// Window within which repeated priority-combatant proposals for the same
    /// candidate are counted; after two strikes further proposals are
    /// suppressed until the window lapses.
    pub ping_pong_window: u64,

    /// Percent chance (0-100) that a door-capable mob opens an unlocked door
    /// blocking an investigation step.
    pub door_open_chance: u32,

    /// Range at which a mob is considered close enough to engage without an
    /// accessibility check.
    pub engage_range: u32,
}

impl AiConfig {
    pub const DEFAULT_PULSE_RESOLUTION: u64 = 50;
    pub const DEFAULT_REACQUIRE_DELAY: u64 = 1_000;
    pub const DEFAULT_SIGHTING_TTL: u64 = 60_000;
    pub const DEFAULT_LAST_KNOWN_TTL: u64 = 10_000;
    pub const DEFAULT_INVESTIGATION_TTL: u64 = 30_000;
    pub const DEFAULT_INVESTIGATION_DRIFT: u32 = 5;
    pub const DEFAULT_PING_PONG_WINDOW: u64 = 120_000;
    pub const DEFAULT_DOOR_OPEN_CHANCE: u32 = 50;
    pub const DEFAULT_ENGAGE_RANGE: u32 = 1;

    pub fn new() -> Self {
        Self {
            pulse_resolution: Self::DEFAULT_PULSE_RESOLUTION,
            reacquire_delay: Self::DEFAULT_REACQUIRE_DELAY,
            sighting_ttl: Self::DEFAULT_SIGHTING_TTL,
            last_known_ttl: Self::DEFAULT_LAST_KNOWN_TTL,
            investigation_ttl: Self::DEFAULT_INVESTIGATION_TTL,
            investigation_drift: Self::DEFAULT_INVESTIGATION_DRIFT,
            ping_pong_window: Self::DEFAULT_PING_PONG_WINDOW,
            door_open_chance: Self::DEFAULT_DOOR_OPEN_CHANCE,
            engage_range: Self::DEFAULT_ENGAGE_RANGE,
        }
    }

    pub fn with_reacquire_delay(mut self, delay: u64) -> Self {
        self.reacquire_delay = delay;
        self
    }

    pub fn with_ping_pong_window(mut self, window: u64) -> Self {
        self.ping_pong_window = window;
        self
    }

    pub fn with_door_open_chance(mut self, chance: u32) -> Self {
        self.door_open_chance = chance.min(100);
        self
    }
}

impl Default for AiConfig {
    fn default() -> Self {
        Self::new()
    }
}
