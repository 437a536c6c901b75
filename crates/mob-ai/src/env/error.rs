use thiserror::Error;

/// Errors raised when a required oracle is missing from the environment.
///
/// These indicate a wiring defect in the host, not a transient world
/// condition; the think boundary logs them and skips the tick.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Error)]
pub enum OracleError {
    #[error("mob oracle not available")]
    MobsNotAvailable,
    #[error("topology oracle not available")]
    TopologyNotAvailable,
    #[error("aggression ledger oracle not available")]
    LedgerNotAvailable,
    #[error("rng oracle not available")]
    RngNotAvailable,
}
