//! State transitions
//!
//! `apply` is the only entry point. Composite actions run as a pipeline of
//! plain sub-transitions on an owned copy, so no intermediate state escapes.

use rand::Rng;

use super::action::{Action, RawAction};
use super::operands::OperandGenerator;
use super::state::{Difficulty, GameState, LastResult, NumberFormat};
use crate::consts::*;
use crate::error::GameError;
use crate::wave_baseline;

/// Apply an action, producing the next state
pub fn apply<R: Rng>(
    state: &GameState,
    action: Action,
    generator: &mut OperandGenerator<R>,
) -> Result<GameState, GameError> {
    log::debug!("apply {}", action.name());
    let state = state.clone();

    let next = match action {
        Action::SetAnswer(text) => set_answer(state, text),
        Action::AddEnemy => add_enemy(state),
        Action::RemoveEnemy => remove_enemy(state),
        Action::CheckAnswer => check_answer(state, generator),
        Action::NewProblem => new_problem(state, generator),
        Action::SetMode(mode) => {
            let mut state = state;
            state.mode = mode;
            state.operator = mode.operator();
            regenerate(state, generator)
        }
        Action::SetDifficulty(difficulty) => {
            let mut state = state;
            state.difficulty = difficulty;
            regenerate(state, generator)
        }
        Action::SetNumberFormat(format) => {
            let mut state = state;
            state.number_format = format;
            regenerate(state, generator)
        }
        Action::Restart => restart(&state, generator),
        Action::RestoreState(snapshot) => {
            let mut state = *snapshot;
            state.is_restored_from_persistence = true;
            state
        }
        Action::IncrementQuestionCount => increment_question_count(state),
        Action::ToggleAutoDifficulty => {
            let mut state = state;
            state.auto_difficulty_enabled = !state.auto_difficulty_enabled;
            state
        }
        Action::FinishGame => {
            let mut state = state;
            state.won = true;
            log::info!("Game finished on wave {}", state.wave_number);
            state
        }
    };

    Ok(next)
}

/// Decode a tagged action and apply it
pub fn apply_raw<R: Rng>(
    state: &GameState,
    raw: RawAction,
    generator: &mut OperandGenerator<R>,
) -> Result<GameState, GameError> {
    let action = Action::try_from(raw)?;
    apply(state, action, generator)
}

/// Accept empty input or digits with at most one decimal point
pub fn is_valid_answer_input(text: &str) -> bool {
    text.chars().all(|c| c.is_ascii_digit() || c == '.')
        && text.chars().filter(|&c| c == '.').count() <= 1
}

/// Parse the answer buffer the way the number format reads it.
///
/// Whole numbers take the leading digits ("12.5" reads as 12); decimals
/// parse the whole buffer ("3." reads as 3).
pub fn parse_answer(answer: &str, format: NumberFormat) -> Option<f64> {
    match format {
        NumberFormat::WholeNumber => {
            let digits: String = answer.chars().take_while(char::is_ascii_digit).collect();
            digits.parse::<u64>().ok().map(|n| n as f64)
        }
        NumberFormat::Decimal => answer.parse::<f64>().ok().filter(|v| v.is_finite()),
    }
}

fn set_answer(mut state: GameState, text: String) -> GameState {
    if !is_valid_answer_input(&text) {
        log::debug!("rejected answer input {:?}", text);
        return state;
    }
    state.answer = text;
    state.is_restored_from_persistence = false;
    state
}

fn regenerate<R: Rng>(mut state: GameState, generator: &mut OperandGenerator<R>) -> GameState {
    let (operand1, operand2) = generator.generate(state.difficulty, state.mode, state.number_format);
    state.operand1 = operand1;
    state.operand2 = operand2;
    state
}

fn restart<R: Rng>(state: &GameState, generator: &mut OperandGenerator<R>) -> GameState {
    let fresh = GameState {
        mode: state.mode,
        operator: state.mode.operator(),
        difficulty: state.difficulty,
        number_format: state.number_format,
        ..GameState::default()
    };
    regenerate(fresh, generator)
}

/// Wrong answer: enemies reset to the wave baseline
fn add_enemy(mut state: GameState) -> GameState {
    state.previous_enemy_count = state.enemy_count;
    state.enemy_count = wave_baseline(state.wave_number);
    state
}

/// Correct answer: one enemy down, possibly clearing the wave
fn remove_enemy(mut state: GameState) -> GameState {
    state.previous_enemy_count = state.enemy_count;
    state.enemy_count = state.enemy_count.saturating_sub(1);

    if state.enemy_count == 0 {
        if state.auto_difficulty_enabled {
            state.wave_number = state.wave_number.saturating_add(1);
            state.enemy_count = wave_baseline(state.wave_number);
            state.previous_enemy_count = state.enemy_count;
            state.last_result = LastResult::WaveClear;
            log::info!(
                "Wave cleared, wave {} begins with {} enemies",
                state.wave_number,
                state.enemy_count
            );
        } else {
            state.won = true;
            state.last_result = LastResult::Correct;
            log::info!("Victory after {} questions", state.questions_answered);
        }
    }
    state
}

/// New operands differing from the current pair, with a bounded retry
fn new_problem<R: Rng>(mut state: GameState, generator: &mut OperandGenerator<R>) -> GameState {
    let current = (state.operand1, state.operand2);
    let mut pair = current;
    for attempt in 1..=MAX_PROBLEM_ATTEMPTS {
        pair = generator.generate(state.difficulty, state.mode, state.number_format);
        if pair != current {
            break;
        }
        if attempt == MAX_PROBLEM_ATTEMPTS {
            log::debug!("accepting repeated problem {:?} after {} draws", pair, attempt);
        }
    }

    state.operand1 = pair.0;
    state.operand2 = pair.1;
    state.answer.clear();
    state.last_result = LastResult::None;
    state
}

fn increment_question_count(mut state: GameState) -> GameState {
    state.questions_answered = state.questions_answered.saturating_add(1);
    if !state.auto_difficulty_enabled {
        return state;
    }

    let before = state.difficulty;
    if state.questions_answered >= THRESHOLD_HARD && state.difficulty != Difficulty::Hard {
        state.difficulty = Difficulty::Hard;
    } else if state.questions_answered >= THRESHOLD_MEDIUM && state.difficulty == Difficulty::Easy
    {
        state.difficulty = Difficulty::Medium;
    }
    if state.difficulty != before {
        log::info!(
            "Difficulty raised to {} after {} questions",
            state.difficulty.as_str(),
            state.questions_answered
        );
    }
    state
}

fn check_answer<R: Rng>(state: GameState, generator: &mut OperandGenerator<R>) -> GameState {
    let parsed = parse_answer(&state.answer, state.number_format);
    let expected = state.expected_answer();

    let (state, outcome) = if parsed == Some(expected) {
        let state = remove_enemy(state);
        let outcome = if state.enemy_count == wave_baseline(state.wave_number) {
            LastResult::WaveClear
        } else {
            LastResult::Correct
        };
        (state, outcome)
    } else {
        (add_enemy(state), LastResult::Wrong)
    };

    let mut state = increment_question_count(new_problem(state, generator));
    // Stamped after new_problem, which resets it
    state.last_result = outcome;
    state
}
