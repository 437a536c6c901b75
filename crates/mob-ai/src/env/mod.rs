//! Traits describing the world the engine decides against.
//!
//! Oracles expose mob snapshots, geometry queries, the combat ledgers, and a
//! deterministic random source. The [`Env`] aggregate bundles them so the
//! decision logic can reach everything it needs without hard coupling to
//! concrete implementations.

mod error;
mod ledger;
mod mobs;
mod rng;
mod topology;

pub use error::OracleError;
pub use ledger::{AggressionEntry, DamageEntry, LedgerOracle};
pub use mobs::{FactionId, MobOracle, MobView};
pub use rng::{PcgRng, RngOracle, decision_seed};
pub use topology::{DoorState, TopologyOracle};

/// Aggregates the read-only oracles required by one think pass.
#[derive(Clone, Copy, Debug)]
pub struct Env<'a, M, T, L, R>
where
    M: MobOracle + ?Sized,
    T: TopologyOracle + ?Sized,
    L: LedgerOracle + ?Sized,
    R: RngOracle + ?Sized,
{
    mobs: Option<&'a M>,
    topology: Option<&'a T>,
    ledger: Option<&'a L>,
    rng: Option<&'a R>,
}

/// Trait-object environment used throughout the engine.
pub type WorldEnv<'a> = Env<
    'a,
    dyn MobOracle + 'a,
    dyn TopologyOracle + 'a,
    dyn LedgerOracle + 'a,
    dyn RngOracle + 'a,
>;

impl<'a, M, T, L, R> Env<'a, M, T, L, R>
where
    M: MobOracle + ?Sized,
    T: TopologyOracle + ?Sized,
    L: LedgerOracle + ?Sized,
    R: RngOracle + ?Sized,
{
    pub fn new(
        mobs: Option<&'a M>,
        topology: Option<&'a T>,
        ledger: Option<&'a L>,
        rng: Option<&'a R>,
    ) -> Self {
        Self {
            mobs,
            topology,
            ledger,
            rng,
        }
    }

    pub fn with_all(mobs: &'a M, topology: &'a T, ledger: &'a L, rng: &'a R) -> Self {
        Self::new(Some(mobs), Some(topology), Some(ledger), Some(rng))
    }

    pub fn empty() -> Self {
        Self {
            mobs: None,
            topology: None,
            ledger: None,
            rng: None,
        }
    }

    /// Returns the MobOracle, or an error if not available.
    pub fn mobs(&self) -> Result<&'a M, OracleError> {
        self.mobs.ok_or(OracleError::MobsNotAvailable)
    }

    /// Returns the TopologyOracle, or an error if not available.
    pub fn topology(&self) -> Result<&'a T, OracleError> {
        self.topology.ok_or(OracleError::TopologyNotAvailable)
    }

    /// Returns the LedgerOracle, or an error if not available.
    pub fn ledger(&self) -> Result<&'a L, OracleError> {
        self.ledger.ok_or(OracleError::LedgerNotAvailable)
    }

    /// Returns the RngOracle, or an error if not available.
    pub fn rng(&self) -> Result<&'a R, OracleError> {
        self.rng.ok_or(OracleError::RngNotAvailable)
    }
}

impl<'a, M, T, L, R> Env<'a, M, T, L, R>
where
    M: MobOracle + 'a,
    T: TopologyOracle + 'a,
    L: LedgerOracle + 'a,
    R: RngOracle + 'a,
{
    /// Converts this environment into the trait-object based [`WorldEnv`].
    pub fn as_world_env(&self) -> WorldEnv<'a> {
        let mobs: Option<&'a dyn MobOracle> = self.mobs.map(|mobs| mobs as _);
        let topology: Option<&'a dyn TopologyOracle> = self.topology.map(|topology| topology as _);
        let ledger: Option<&'a dyn LedgerOracle> = self.ledger.map(|ledger| ledger as _);
        let rng: Option<&'a dyn RngOracle> = self.rng.map(|rng| rng as _);
        Env::new(mobs, topology, ledger, rng)
    }
}
