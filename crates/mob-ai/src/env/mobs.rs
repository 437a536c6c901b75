//! Read-only view of mobile entities.
//!
//! The engine never owns actor state; everything it knows about a mob at a
//! given instant comes through [`MobOracle`] as a [`MobView`] snapshot.

use std::fmt;

use crate::types::{MobId, Point};

/// Faction membership handle. Two mobs in the same non-default faction are
/// allies; two mobs in different factions are enemies.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct FactionId(pub u16);

impl fmt::Display for FactionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "faction:{}", self.0)
    }
}

/// Point-in-time snapshot of one mob, as visible to an observer.
///
/// Views are cheap copies; the engine re-fetches them each tick rather than
/// caching, so a stale view never outlives its pulse.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MobView {
    pub id: MobId,
    pub position: Point,
    pub alive: bool,
    /// Entity has been removed from the world but a handle still resolves.
    pub deleted: bool,
    pub hidden: bool,
    /// Blessed mobs are exempt from all hostile targeting.
    pub blessed: bool,
    pub is_player: bool,
    pub hits: u32,
    pub hits_max: u32,
    pub strength: u32,
    pub intellect: u32,
    /// Moral alignment; negative values are evil.
    pub karma: i32,
    pub criminal: bool,
    pub murderer: bool,
    pub faction: Option<FactionId>,
    /// Controller for pet-like mobs obeying orders.
    pub controller: Option<MobId>,
    /// Summoner for conjured mobs.
    pub summoner: Option<MobId>,
    /// Flagged guard-worthy: a town guard observing this mob in a guarded
    /// region will summon the watch.
    pub wanted: bool,
}

impl MobView {
    pub fn is_evil(&self) -> bool {
        self.karma < 0
    }

    /// True when the mob can be perceived at all by a hostile observer.
    pub fn perceivable(&self) -> bool {
        self.alive && !self.deleted && !self.hidden
    }

    /// True for faction allies of `other`.
    pub fn allied_with(&self, other: &MobView) -> bool {
        matches!((self.faction, other.faction), (Some(a), Some(b)) if a == b)
    }

    /// True for members of opposing factions.
    pub fn opposed_to(&self, other: &MobView) -> bool {
        matches!((self.faction, other.faction), (Some(a), Some(b)) if a != b)
    }
}

/// Resolves mob handles and answers spatial perception queries.
pub trait MobOracle {
    /// Snapshot of a single mob, or `None` for a dangling handle.
    fn mob(&self, id: MobId) -> Option<MobView>;

    /// All mobs within `range` tiles of `center`, the observer included.
    ///
    /// The returned list is transient; callers must not hold it across ticks.
    fn mobs_in_range(&self, center: Point, range: u32) -> Vec<MobId>;
}
