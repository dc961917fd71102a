//! Save/load of game state snapshots
//!
//! The reducer never touches storage. The session hands snapshots to these
//! helpers after each transition and feeds loaded ones back through
//! `Action::RestoreState`.

pub mod storage;

pub use storage::{MemoryStorage, Storage};

#[cfg(not(target_arch = "wasm32"))]
pub use storage::FileStorage;

#[cfg(target_arch = "wasm32")]
pub use storage::LocalStorage;

use crate::error::StorageError;
use crate::sim::GameState;

/// Serialize the full state under `key`
pub fn save_state(storage: &mut dyn Storage, key: &str, state: &GameState) -> Result<(), StorageError> {
    let json = serde_json::to_string(state)?;
    storage.set_item(key, &json)
}

/// Load a snapshot, treating a malformed one as absent
pub fn load_state(storage: &dyn Storage, key: &str) -> Option<GameState> {
    let json = match storage.get_item(key) {
        Ok(Some(json)) => json,
        Ok(None) => return None,
        Err(e) => {
            log::warn!("Could not read saved state: {}", e);
            return None;
        }
    };

    match serde_json::from_str(&json) {
        Ok(state) => {
            log::info!("Loaded saved state");
            Some(state)
        }
        Err(e) => {
            log::warn!("Ignoring malformed saved state: {}", e);
            None
        }
    }
}
