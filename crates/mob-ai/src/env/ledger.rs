//! Aggression and damage ledgers.
//!
//! Combat bookkeeping lives outside the engine; these traits expose the two
//! relations the decision logic reads: who is fighting whom, and who has
//! contributed how much damage to a victim.

use crate::types::MobId;

/// One aggression relation entry. Expired entries are retained by the ledger
/// for a grace period and must be filtered by consumers.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct AggressionEntry {
    pub counterpart: MobId,
    pub expired: bool,
}

/// Cumulative damage one source has dealt to a victim.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct DamageEntry {
    pub source: MobId,
    pub total: u32,
    pub expired: bool,
}

/// Read access to the external combat ledgers.
pub trait LedgerOracle {
    /// Mobs that have attacked `victim`.
    fn aggressors(&self, victim: MobId) -> Vec<AggressionEntry>;

    /// Mobs that `attacker` has attacked.
    fn aggressed(&self, attacker: MobId) -> Vec<AggressionEntry>;

    /// Damage contributions received by `victim`, one entry per source.
    fn damage_entries(&self, victim: MobId) -> Vec<DamageEntry>;
}
