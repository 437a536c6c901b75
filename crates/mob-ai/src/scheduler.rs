//! Timer multiplexer driving every AI instance from one pulse source.
//!
//! The host loop calls [`AiScheduler::pulse`] at its own cadence; the
//! scheduler visits only the actors whose think interval has elapsed.
//! Registration changes are queued and applied at the start of the next
//! pulse, so a think routine may freely register or deregister actors
//! (including itself) without invalidating the in-flight visit.

use std::collections::{BTreeMap, VecDeque};

use crate::ai::ThinkError;
use crate::types::{MobId, Tick};

/// What an actor's think pass asks the scheduler to do next.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ThinkDisposition {
    /// Stay registered and think again after `next_interval` milliseconds.
    Continue { next_interval: u64 },
    /// Deregister; the actor is gone.
    Stop,
}

#[derive(Clone, Copy, Debug)]
struct SchedEntry {
    enabled: bool,
    interval: u64,
    next_due: Tick,
}

#[derive(Clone, Copy, Debug)]
enum Request {
    Register { id: MobId, interval: u64 },
    Deregister(MobId),
    Enable(MobId),
    Disable(MobId),
}

/// Multiplexes per-actor think timers onto a single host pulse.
///
/// Entries are keyed in a [`BTreeMap`] so a pulse visits due actors in
/// stable id order, keeping whole-world runs reproducible.
pub struct AiScheduler {
    resolution: u64,
    entries: BTreeMap<MobId, SchedEntry>,
    requests: VecDeque<Request>,
}

impl AiScheduler {
    /// `resolution` is the granularity think intervals are rounded up to,
    /// normally the host pulse period.
    pub fn new(resolution: u64) -> Self {
        Self {
            resolution: resolution.max(1),
            entries: BTreeMap::new(),
            requests: VecDeque::new(),
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn contains(&self, id: MobId) -> bool {
        self.entries.contains_key(&id)
    }

    /// Queues registration; takes effect at the start of the next pulse.
    pub fn register(&mut self, id: MobId, interval: u64) {
        self.requests.push_back(Request::Register { id, interval });
    }

    pub fn deregister(&mut self, id: MobId) {
        self.requests.push_back(Request::Deregister(id));
    }

    pub fn enable(&mut self, id: MobId) {
        self.requests.push_back(Request::Enable(id));
    }

    /// Disabled actors stay registered but are skipped until re-enabled.
    pub fn disable(&mut self, id: MobId) {
        self.requests.push_back(Request::Disable(id));
    }

    /// Runs one pulse: applies queued requests, then invokes `think` for
    /// every enabled actor whose timer has elapsed. Returns the number of
    /// think passes executed.
    ///
    /// A think error is logged and the actor is rescheduled at its previous
    /// interval; one failing actor never stalls the pulse.
    pub fn pulse<F>(&mut self, now: Tick, mut think: F) -> usize
    where
        F: FnMut(MobId, Tick) -> Result<ThinkDisposition, ThinkError>,
    {
        self.apply_requests(now);

        let due: Vec<MobId> = self
            .entries
            .iter()
            .filter(|(_, entry)| entry.enabled && entry.next_due <= now)
            .map(|(&id, _)| id)
            .collect();

        let mut executed = 0;
        for id in due {
            executed += 1;
            match think(id, now) {
                Ok(ThinkDisposition::Continue { next_interval }) => {
                    let interval = self.round_up(next_interval);
                    if let Some(entry) = self.entries.get_mut(&id) {
                        entry.interval = interval;
                        entry.next_due = now + interval;
                    }
                }
                Ok(ThinkDisposition::Stop) => {
                    self.entries.remove(&id);
                }
                Err(error) => {
                    tracing::error!(mob = %id, %error, "think pass failed");
                    if let Some(entry) = self.entries.get_mut(&id) {
                        entry.next_due = now + entry.interval;
                    }
                }
            }
        }
        executed
    }

    fn apply_requests(&mut self, now: Tick) {
        while let Some(request) = self.requests.pop_front() {
            match request {
                Request::Register { id, interval } => {
                    let interval = self.round_up(interval);
                    self.entries.insert(
                        id,
                        SchedEntry {
                            enabled: true,
                            interval,
                            next_due: now + interval,
                        },
                    );
                }
                Request::Deregister(id) => {
                    self.entries.remove(&id);
                }
                Request::Enable(id) => {
                    if let Some(entry) = self.entries.get_mut(&id) {
                        if !entry.enabled {
                            entry.enabled = true;
                            entry.next_due = now + entry.interval;
                        }
                    }
                }
                Request::Disable(id) => {
                    if let Some(entry) = self.entries.get_mut(&id) {
                        entry.enabled = false;
                    }
                }
            }
        }
    }

    fn round_up(&self, interval: u64) -> u64 {
        interval.max(self.resolution).div_ceil(self.resolution) * self.resolution
    }
}
