//! Selection specifications: which mobs are eligible targets and how the
//! candidate list is ordered.
//!
//! A [`FightMode`] is a single bitmask split into two disjoint ranges. The
//! low bits enumerate target *types* (categories of mob the owner is willing
//! to attack); the high bits enumerate *ordering* keys. Several type bits may
//! be set: acquisition tries each in the declared [`TYPE_ORDER`] sequence and
//! the first type that yields a candidate wins. Several ordering bits may be
//! set: each is applied as a successive stable sort pass in [`ORDER_PASSES`]
//! sequence, so the last-applied key is the coarsest. Compound ordering is
//! deliberately repeated stable sorting, not one lexicographic comparator;
//! changing that would change observable tie-breaks.

use bitflags::bitflags;

use crate::env::MobView;
use crate::types::Point;

bitflags! {
    /// Composite selection specification for one mob.
    #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
    pub struct FightMode: u32 {
        // ===== type range (bits 0-15) =====
        /// Attack anything eligible, unconditionally.
        const ALL           = 1 << 0;
        /// Attack mobs with a live aggression relation against the owner.
        const AGGRESSOR     = 1 << 1;
        /// Attack evil-aligned mobs.
        const EVIL          = 1 << 2;
        /// Attack flagged criminals.
        const CRIMINAL      = 1 << 3;
        /// Attack known murderers.
        const MURDERER      = 1 << 4;
        /// Attack members of opposing factions.
        const FACTION_ENEMY = 1 << 5;
        /// Attack player characters.
        const PLAYERS       = 1 << 6;
        /// Attack the owner's own summoner (normally forbidden).
        const SUMMONER      = 1 << 7;

        // ===== ordering range (bits 16-31) =====
        /// Prefer lower current hit points.
        const WEAKEST   = 1 << 16;
        /// Prefer higher strength.
        const STRONGEST = 1 << 17;
        /// Prefer higher intellect.
        const SMARTEST  = 1 << 18;
        /// Prefer shorter distance to the observer.
        const CLOSEST   = 1 << 19;
    }
}

/// One target category, matching a single type bit.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, strum::Display, strum::AsRefStr)]
#[strum(serialize_all = "snake_case")]
pub enum TargetType {
    All,
    Aggressor,
    Evil,
    Criminal,
    Murderer,
    FactionEnemy,
    Players,
    Summoner,
}

impl TargetType {
    /// True for types whose eligibility is conditional on the candidate's
    /// relation to the observer, as opposed to the unconditional `All`.
    pub fn is_conditional(self) -> bool {
        !matches!(self, TargetType::All)
    }
}

/// One ordering key, matching a single ordering bit.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, strum::Display, strum::AsRefStr)]
#[strum(serialize_all = "snake_case")]
pub enum OrderKey {
    Weakest,
    Strongest,
    Smartest,
    Closest,
}

/// Declared priority sequence of type bits: acquisition tries aggressors
/// before opportunistic categories, with `All` first since it subsumes the
/// rest when set.
pub const TYPE_ORDER: [(FightMode, TargetType); 8] = [
    (FightMode::ALL, TargetType::All),
    (FightMode::AGGRESSOR, TargetType::Aggressor),
    (FightMode::EVIL, TargetType::Evil),
    (FightMode::CRIMINAL, TargetType::Criminal),
    (FightMode::MURDERER, TargetType::Murderer),
    (FightMode::FACTION_ENEMY, TargetType::FactionEnemy),
    (FightMode::PLAYERS, TargetType::Players),
    (FightMode::SUMMONER, TargetType::Summoner),
];

/// Declared sequence of sort passes. `Closest` runs last so it is the
/// coarsest, final key whenever it is combined with the others.
pub const ORDER_PASSES: [(FightMode, OrderKey); 4] = [
    (FightMode::WEAKEST, OrderKey::Weakest),
    (FightMode::STRONGEST, OrderKey::Strongest),
    (FightMode::SMARTEST, OrderKey::Smartest),
    (FightMode::CLOSEST, OrderKey::Closest),
];

impl FightMode {
    const TYPE_MASK: u32 = 0x0000_FFFF;
    const ORDER_MASK: u32 = 0xFFFF_0000;

    /// The type-range bits of this specification.
    pub fn type_bits(self) -> FightMode {
        FightMode::from_bits_truncate(self.bits() & Self::TYPE_MASK)
    }

    /// The ordering-range bits of this specification.
    pub fn order_bits(self) -> FightMode {
        FightMode::from_bits_truncate(self.bits() & Self::ORDER_MASK)
    }

    /// Target types set on this specification, in declared priority order.
    pub fn types(self) -> impl Iterator<Item = TargetType> {
        TYPE_ORDER
            .into_iter()
            .filter(move |(bit, _)| self.contains(*bit))
            .map(|(_, ty)| ty)
    }

    /// Ordering keys set on this specification, in declared pass order.
    pub fn order_keys(self) -> impl Iterator<Item = OrderKey> {
        ORDER_PASSES
            .into_iter()
            .filter(move |(bit, _)| self.contains(*bit))
            .map(|(_, key)| key)
    }
}

/// Sorts `candidates` by the ordering bits of `mode`, one stable pass per set
/// key, in declared pass order.
pub fn apply_order_passes(mode: FightMode, observer: Point, candidates: &mut [MobView]) {
    for key in mode.order_keys() {
        match key {
            OrderKey::Weakest => candidates.sort_by_key(|view| view.hits),
            OrderKey::Strongest => candidates.sort_by_key(|view| std::cmp::Reverse(view.strength)),
            OrderKey::Smartest => candidates.sort_by_key(|view| std::cmp::Reverse(view.intellect)),
            OrderKey::Closest => candidates.sort_by_key(|view| observer.distance(view.position)),
        }
    }
}
