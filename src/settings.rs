//! Player settings
//!
//! Persisted separately from the game state, in the same key-value storage.

use serde::{Deserialize, Serialize};

use crate::consts::{FEEDBACK_DURATION_MS, STATE_STORAGE_KEY};
use crate::error::StorageError;
use crate::persistence::Storage;

/// Session preferences
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// How long answer feedback stays visible (ms)
    pub feedback_duration_ms: f64,
    /// Persist the state after every action
    pub autosave: bool,
    /// Storage key for the game state
    pub state_key: String,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            feedback_duration_ms: FEEDBACK_DURATION_MS,
            autosave: true,
            state_key: STATE_STORAGE_KEY.to_string(),
        }
    }
}

impl Settings {
    /// Storage key
    const STORAGE_KEY: &'static str = "battle_math_settings";

    /// Load settings, falling back to defaults
    pub fn load(storage: &dyn Storage) -> Self {
        if let Ok(Some(json)) = storage.get_item(Self::STORAGE_KEY) {
            match serde_json::from_str(&json) {
                Ok(settings) => {
                    log::info!("Loaded settings");
                    return settings;
                }
                Err(e) => log::warn!("Ignoring malformed settings: {}", e),
            }
        }

        log::info!("Using default settings");
        Self::default()
    }

    pub fn save(&self, storage: &mut dyn Storage) -> Result<(), StorageError> {
        let json = serde_json::to_string(self)?;
        storage.set_item(Self::STORAGE_KEY, &json)?;
        log::info!("Settings saved");
        Ok(())
    }
}
