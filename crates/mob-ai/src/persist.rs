//! Durable snapshot of the decision state.
//!
//! Only the two state machine positions survive a save: memories, focus,
//! combatant, and timers are transient perception that a freshly loaded
//! world re-derives within one scan. The snapshot carries a format version
//! so stale saves fail loudly instead of decoding garbage.

use serde::{Deserialize, Serialize};

use crate::ai::MobAi;
use crate::machine::{ActionState, OrderState};

pub const FORMAT_VERSION: u8 = 1;

#[derive(Debug, thiserror::Error)]
pub enum PersistError {
    #[error("unsupported save format version {0}")]
    UnsupportedVersion(u8),
    #[error("codec failure: {0}")]
    Codec(#[from] bincode::Error),
}

/// Serialized decision state for one actor.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SavedAi {
    pub version: u8,
    pub action: ActionState,
    pub order: OrderState,
}

impl SavedAi {
    pub fn encode(&self) -> Result<Vec<u8>, PersistError> {
        Ok(bincode::serialize(self)?)
    }

    pub fn decode(bytes: &[u8]) -> Result<Self, PersistError> {
        let saved: SavedAi = bincode::deserialize(bytes)?;
        if saved.version != FORMAT_VERSION {
            return Err(PersistError::UnsupportedVersion(saved.version));
        }
        Ok(saved)
    }
}

impl MobAi {
    /// Snapshot for persistence.
    pub fn saved(&self) -> SavedAi {
        SavedAi {
            version: FORMAT_VERSION,
            action: self.action,
            order: self.order,
        }
    }

    /// Applies a decoded snapshot. The think speed is re-derived from the
    /// restored states.
    pub fn restore(&mut self, saved: &SavedAi) {
        self.action = saved.action;
        self.order = saved.order;
        self.engaged_speed = saved.action.engaged() || saved.order.urgent();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn snapshot_round_trips() {
        let saved = SavedAi {
            version: FORMAT_VERSION,
            action: ActionState::Flee,
            order: OrderState::Guard,
        };
        let bytes = saved.encode().unwrap();
        assert_eq!(SavedAi::decode(&bytes).unwrap(), saved);
    }

    #[test]
    fn unknown_version_is_rejected() {
        let saved = SavedAi {
            version: 9,
            action: ActionState::Wander,
            order: OrderState::None,
        };
        let bytes = saved.encode().unwrap();
        assert!(matches!(
            SavedAi::decode(&bytes),
            Err(PersistError::UnsupportedVersion(9))
        ));
    }
}
