//! Autonomous decision engine for non-player actors in a tick-based world.
//!
//! `mob-ai` owns the per-actor state machines, target selection, memory, and
//! scheduling; everything it knows about the world arrives through the
//! read-only oracles in [`env`], and everything it wants done leaves as
//! [`AiCommand`] values for the host to apply. One [`MobAi`] per actor, one
//! [`AiScheduler`] per world, one [`MobAi::think`] call per due pulse.
pub mod ai;
pub mod command;
pub mod config;
pub mod env;
pub mod hooks;
pub mod investigate;
pub mod machine;
pub mod memory;
pub mod persist;
pub mod profile;
pub mod scheduler;
pub mod select;
pub mod types;

mod acquire;
mod priority;

pub use ai::{MobAi, ThinkError};
pub use command::AiCommand;
pub use config::AiConfig;
pub use env::{
    AggressionEntry, DamageEntry, DoorState, Env, FactionId, LedgerOracle, MobOracle, MobView,
    OracleError, PcgRng, RngOracle, TopologyOracle, WorldEnv, decision_seed,
};
pub use hooks::{DefaultSpecies, SpeciesHooks};
pub use investigate::{Investigation, PathSnapshot, ReplayStatus};
pub use machine::{ActionState, OrderState};
pub use memory::{AiMemories, Sighting};
pub use persist::{FORMAT_VERSION, PersistError, SavedAi};
pub use profile::AiProfile;
pub use scheduler::{AiScheduler, ThinkDisposition};
pub use select::{FightMode, OrderKey, TargetType, apply_order_passes};
pub use types::{Direction, MobId, Point, Tick};
