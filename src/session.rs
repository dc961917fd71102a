//! Game session
//!
//! Owns the published state plus its collaborators (operand generator,
//! storage, feedback). Every action goes through the reducer; the result
//! replaces the state wholesale and is then persisted.

use rand::Rng;
use rand_pcg::Pcg32;

use crate::error::GameError;
use crate::feedback::{Feedback, FeedbackMessage};
use crate::persistence::{self, Storage};
use crate::settings::Settings;
use crate::sim::{Action, GameState, OperandGenerator, RawAction, apply};

pub struct Session<S: Storage, R: Rng = Pcg32> {
    state: GameState,
    generator: OperandGenerator<R>,
    storage: S,
    feedback: Feedback,
    settings: Settings,
}

impl<S: Storage, R: Rng> Session<S, R> {
    /// Start a session, restoring a saved game if one exists
    pub fn boot(storage: S, generator: OperandGenerator<R>, settings: Settings) -> Result<Self, GameError> {
        let mut session = Self {
            state: GameState::default(),
            generator,
            storage,
            feedback: Feedback::new(settings.feedback_duration_ms),
            settings,
        };

        session.state = apply(&session.state, Action::NewProblem, &mut session.generator)?;

        match persistence::load_state(&session.storage, &session.settings.state_key) {
            Some(snapshot) => {
                session.state = apply(
                    &session.state,
                    Action::RestoreState(Box::new(snapshot)),
                    &mut session.generator,
                )?;
                log::info!(
                    "Restored wave {} with {} enemies",
                    session.state.wave_number,
                    session.state.enemy_count
                );
            }
            None => {
                log::info!("No saved game, starting fresh");
                session.persist();
            }
        }

        Ok(session)
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    /// Apply an action and publish the resulting state
    pub fn dispatch(&mut self, action: Action, now_ms: f64) -> Result<&GameState, GameError> {
        let restart = matches!(action, Action::Restart);
        let answered = matches!(action, Action::CheckAnswer);
        let previous_result = self.state.last_result;
        self.state = apply(&self.state, action, &mut self.generator)?;

        if restart {
            self.feedback.clear();
        }
        // Only a new outcome shows a message; a lingering one stays expired
        if answered || self.state.last_result != previous_result {
            self.feedback.observe(self.state.last_result, now_ms);
        }

        if self.settings.autosave {
            self.persist();
        }
        Ok(&self.state)
    }

    /// Decode a tagged action and dispatch it
    pub fn dispatch_raw(&mut self, raw: RawAction, now_ms: f64) -> Result<&GameState, GameError> {
        let action = Action::try_from(raw)?;
        self.dispatch(action, now_ms)
    }

    /// Feedback message to show at `now_ms`
    pub fn feedback(&mut self, now_ms: f64) -> Option<&FeedbackMessage> {
        self.feedback.current(now_ms)
    }

    /// Write the current state; failures are logged, never propagated
    pub fn persist(&mut self) {
        if let Err(e) = persistence::save_state(&mut self.storage, &self.settings.state_key, &self.state) {
            log::warn!("Failed to save game state: {}", e);
        }
    }
}
