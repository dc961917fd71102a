//! Actions accepted by the reducer
//!
//! Collaborators either build an `Action` directly or hand over a
//! `RawAction` (numeric tag + optional JSON payload) which is decoded here.

use serde::{Deserialize, Serialize};
use serde::de::DeserializeOwned;

use super::state::{Difficulty, GameState, Mode, NumberFormat};
use crate::error::GameError;

/// A state transition request
#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    SetAnswer(String),
    AddEnemy,
    RemoveEnemy,
    CheckAnswer,
    NewProblem,
    SetMode(Mode),
    SetDifficulty(Difficulty),
    Restart,
    SetNumberFormat(NumberFormat),
    RestoreState(Box<GameState>),
    IncrementQuestionCount,
    ToggleAutoDifficulty,
    FinishGame,
}

impl Action {
    /// Numeric tag used by `RawAction`
    pub fn tag(&self) -> u8 {
        match self {
            Action::SetAnswer(_) => 0,
            Action::AddEnemy => 1,
            Action::RemoveEnemy => 2,
            Action::CheckAnswer => 3,
            Action::NewProblem => 4,
            Action::SetMode(_) => 5,
            Action::SetDifficulty(_) => 6,
            Action::Restart => 7,
            Action::SetNumberFormat(_) => 8,
            Action::RestoreState(_) => 9,
            Action::IncrementQuestionCount => 10,
            Action::ToggleAutoDifficulty => 11,
            Action::FinishGame => 12,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Action::SetAnswer(_) => "SetAnswer",
            Action::AddEnemy => "AddEnemy",
            Action::RemoveEnemy => "RemoveEnemy",
            Action::CheckAnswer => "CheckAnswer",
            Action::NewProblem => "NewProblem",
            Action::SetMode(_) => "SetMode",
            Action::SetDifficulty(_) => "SetDifficulty",
            Action::Restart => "Restart",
            Action::SetNumberFormat(_) => "SetNumberFormat",
            Action::RestoreState(_) => "RestoreState",
            Action::IncrementQuestionCount => "IncrementQuestionCount",
            Action::ToggleAutoDifficulty => "ToggleAutoDifficulty",
            Action::FinishGame => "FinishGame",
        }
    }
}

/// Tagged action as produced by an untyped caller
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RawAction {
    #[serde(rename = "type")]
    pub tag: u8,
    #[serde(default)]
    pub payload: Option<serde_json::Value>,
}

impl RawAction {
    pub fn new(tag: u8) -> Self {
        Self { tag, payload: None }
    }

    pub fn with_payload(tag: u8, payload: serde_json::Value) -> Self {
        Self {
            tag,
            payload: Some(payload),
        }
    }

    fn decode<T: DeserializeOwned>(self, action: &'static str) -> Result<T, GameError> {
        let payload = self.payload.ok_or_else(|| GameError::InvalidPayload {
            action,
            reason: "missing payload".to_string(),
        })?;
        serde_json::from_value(payload).map_err(|e| GameError::InvalidPayload {
            action,
            reason: e.to_string(),
        })
    }
}

impl TryFrom<RawAction> for Action {
    type Error = GameError;

    fn try_from(raw: RawAction) -> Result<Self, Self::Error> {
        let tag = raw.tag;
        let action = match tag {
            0 => Action::SetAnswer(raw.decode("SetAnswer")?),
            1 => Action::AddEnemy,
            2 => Action::RemoveEnemy,
            3 => Action::CheckAnswer,
            4 => Action::NewProblem,
            5 => Action::SetMode(raw.decode("SetMode")?),
            6 => Action::SetDifficulty(raw.decode("SetDifficulty")?),
            7 => Action::Restart,
            8 => Action::SetNumberFormat(raw.decode("SetNumberFormat")?),
            9 => Action::RestoreState(Box::new(raw.decode("RestoreState")?)),
            10 => Action::IncrementQuestionCount,
            11 => Action::ToggleAutoDifficulty,
            12 => Action::FinishGame,
            _ => {
                log::error!("Invalid action {}", tag);
                return Err(GameError::InvalidAction(tag));
            }
        };
        Ok(action)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_decode_payload_actions() {
        let action = Action::try_from(RawAction::with_payload(6, json!("hard"))).unwrap();
        assert_eq!(action, Action::SetDifficulty(Difficulty::Hard));

        let action = Action::try_from(RawAction::with_payload(8, json!("decimal"))).unwrap();
        assert_eq!(action, Action::SetNumberFormat(NumberFormat::Decimal));

        let action = Action::try_from(RawAction::with_payload(0, json!("12."))).unwrap();
        assert_eq!(action, Action::SetAnswer("12.".to_string()));
    }

    #[test]
    fn test_tags_agree_both_ways() {
        for tag in [1u8, 2, 3, 4, 7, 10, 11, 12] {
            let action = Action::try_from(RawAction::new(tag)).unwrap();
            assert_eq!(action.tag(), tag);
        }
    }

    #[test]
    fn test_unknown_tag_is_invalid_action() {
        let err = Action::try_from(RawAction::new(42)).unwrap_err();
        assert!(matches!(err, GameError::InvalidAction(42)));
        assert_eq!(err.to_string(), "invalid action 42");
    }

    #[test]
    fn test_missing_or_bad_payload() {
        let err = Action::try_from(RawAction::new(5)).unwrap_err();
        assert!(matches!(err, GameError::InvalidPayload { action: "SetMode", .. }));

        let err = Action::try_from(RawAction::with_payload(5, json!("modulo"))).unwrap_err();
        assert!(matches!(err, GameError::InvalidPayload { .. }));
    }

    #[test]
    fn test_raw_action_from_json() {
        let raw: RawAction = serde_json::from_str(r#"{"type": 9, "payload": {"waveNumber": 4}}"#).unwrap();
        match Action::try_from(raw).unwrap() {
            Action::RestoreState(snapshot) => assert_eq!(snapshot.wave_number, 4),
            other => panic!("unexpected {:?}", other),
        }
    }
}
