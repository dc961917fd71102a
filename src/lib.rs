//! Battle Math - an arithmetic practice minigame
//!
//! Core modules:
//! - `sim`: Deterministic game state machine (operands, actions, reducer)
//! - `persistence`: Key-value storage and snapshot save/load
//! - `feedback`: Transient success/error/wave-clear messages
//! - `settings`: User preferences persisted next to the save
//! - `session`: Startup, restore and autosave glue around the reducer

pub mod error;
pub mod feedback;
pub mod persistence;
pub mod session;
pub mod settings;
pub mod sim;

pub use error::{GameError, StorageError};
pub use feedback::{Feedback, FeedbackMessage};
pub use session::Session;
pub use settings::Settings;

/// Game rule constants
pub mod consts {
    /// Enemies in wave 1; each later wave adds one more
    pub const BASE_ENEMIES: u32 = 3;

    /// Auto-difficulty: questions answered before easy becomes medium
    pub const THRESHOLD_MEDIUM: u32 = 5;
    /// Auto-difficulty: questions answered before anything becomes hard
    pub const THRESHOLD_HARD: u32 = 10;

    /// Precision of decimal operands and expected answers
    pub const ANSWER_DECIMALS: u32 = 2;

    /// Draws a new problem may take before a repeated pair is accepted
    pub const MAX_PROBLEM_ATTEMPTS: u32 = 32;

    /// Storage key for the persisted game state
    pub const STATE_STORAGE_KEY: &str = "state";

    /// How long a feedback message stays on screen (ms)
    pub const FEEDBACK_DURATION_MS: f64 = 1500.0;
}

/// Round to a fixed number of decimal places
#[inline]
pub fn round_to_places(value: f64, places: u32) -> f64 {
    let factor = 10f64.powi(places as i32);
    (value * factor).round() / factor
}

/// Enemy count at the start of a wave (and after a wrong answer)
#[inline]
pub fn wave_baseline(wave: u32) -> u32 {
    consts::BASE_ENEMIES.saturating_add(wave.saturating_sub(1))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_round_to_places() {
        assert_eq!(round_to_places(0.1 + 0.2, 2), 0.3);
        assert_eq!(round_to_places(2.0 / 3.0, 2), 0.67);
        assert_eq!(round_to_places(7.0, 2), 7.0);
    }

    #[test]
    fn test_wave_baseline() {
        assert_eq!(wave_baseline(1), 3);
        assert_eq!(wave_baseline(2), 4);
        assert_eq!(wave_baseline(10), 12);
        assert_eq!(wave_baseline(u32::MAX), u32::MAX);
    }
}
