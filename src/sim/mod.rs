//! Deterministic game state machine
//!
//! All gameplay logic lives here. This module must stay pure:
//! - State is replaced, never shared or mutated in place by callers
//! - Randomness only through `OperandGenerator`
//! - No storage, rendering or timing dependencies

pub mod action;
pub mod operands;
pub mod reducer;
pub mod state;

pub use action::{Action, RawAction};
pub use operands::OperandGenerator;
pub use reducer::{apply, apply_raw, is_valid_answer_input, parse_answer};
pub use state::{Difficulty, GameState, LastResult, Mode, NumberFormat, Operator};
