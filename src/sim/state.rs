//! Game state and the enums it is built from
//!
//! Everything the view and the persistence layer need lives in `GameState`.
//! Field names serialize in camelCase and every field has a default so that
//! snapshots written by older builds still restore.

use serde::{Deserialize, Serialize};

use crate::consts::*;

/// Arithmetic operation being practised
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub enum Mode {
    #[default]
    Addition,
    Subtraction,
    Multiplication,
    Division,
}

impl Mode {
    pub const ALL: [Mode; 4] = [
        Mode::Addition,
        Mode::Subtraction,
        Mode::Multiplication,
        Mode::Division,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Mode::Addition => "addition",
            Mode::Subtraction => "subtraction",
            Mode::Multiplication => "multiplication",
            Mode::Division => "division",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "addition" | "add" | "+" => Some(Mode::Addition),
            "subtraction" | "sub" | "-" => Some(Mode::Subtraction),
            "multiplication" | "mul" | "*" => Some(Mode::Multiplication),
            "division" | "div" | "/" => Some(Mode::Division),
            _ => None,
        }
    }

    /// Operator shown for this mode
    pub fn operator(&self) -> Operator {
        match self {
            Mode::Addition => Operator::Add,
            Mode::Subtraction => Operator::Sub,
            Mode::Multiplication => Operator::Mul,
            Mode::Division => Operator::Div,
        }
    }
}

/// Operator symbol, always derived from `Mode`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum Operator {
    #[default]
    #[serde(rename = "+")]
    Add,
    #[serde(rename = "-")]
    Sub,
    #[serde(rename = "*")]
    Mul,
    #[serde(rename = "/")]
    Div,
}

impl Operator {
    pub fn symbol(&self) -> char {
        match self {
            Operator::Add => '+',
            Operator::Sub => '-',
            Operator::Mul => '*',
            Operator::Div => '/',
        }
    }

    /// Apply the operator to two operands
    pub fn evaluate(&self, lhs: f64, rhs: f64) -> f64 {
        match self {
            Operator::Add => lhs + rhs,
            Operator::Sub => lhs - rhs,
            Operator::Mul => lhs * rhs,
            Operator::Div => lhs / rhs,
        }
    }
}

/// Operand magnitude
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub enum Difficulty {
    #[default]
    Easy,
    Medium,
    Hard,
}

impl Difficulty {
    pub const ALL: [Difficulty; 3] = [Difficulty::Easy, Difficulty::Medium, Difficulty::Hard];

    pub fn as_str(&self) -> &'static str {
        match self {
            Difficulty::Easy => "easy",
            Difficulty::Medium => "medium",
            Difficulty::Hard => "hard",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "easy" => Some(Difficulty::Easy),
            "medium" | "med" => Some(Difficulty::Medium),
            "hard" => Some(Difficulty::Hard),
            _ => None,
        }
    }

    /// Half-open operand range `[low, high)`
    pub fn range(&self) -> (f64, f64) {
        match self {
            Difficulty::Easy => (1.0, 9.0),
            Difficulty::Medium => (10.0, 99.0),
            Difficulty::Hard => (100.0, 999.0),
        }
    }
}

/// Whether operands and answers are integers or two-place decimals
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub enum NumberFormat {
    #[default]
    WholeNumber,
    Decimal,
}

impl NumberFormat {
    pub const ALL: [NumberFormat; 2] = [NumberFormat::WholeNumber, NumberFormat::Decimal];

    pub fn as_str(&self) -> &'static str {
        match self {
            NumberFormat::WholeNumber => "wholeNumber",
            NumberFormat::Decimal => "decimal",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "wholenumber" | "whole" | "int" => Some(NumberFormat::WholeNumber),
            "decimal" | "decimals" | "dec" => Some(NumberFormat::Decimal),
            _ => None,
        }
    }
}

/// Outcome of the most recent question, consumed by the feedback layer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub enum LastResult {
    #[default]
    None,
    Correct,
    Wrong,
    WaveClear,
}

impl LastResult {
    /// Message text and whether it is an error message
    pub fn message(&self) -> Option<(&'static str, bool)> {
        match self {
            LastResult::None => None,
            LastResult::Correct => Some(("Correct!", false)),
            LastResult::Wrong => Some(("Wrong answer, try again!", true)),
            LastResult::WaveClear => Some(("Wave Cleared!", false)),
        }
    }
}

/// Complete game state (serializable snapshot)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct GameState {
    /// Raw answer input, possibly partial ("12.")
    pub answer: String,
    pub operand1: f64,
    pub operand2: f64,
    pub operator: Operator,
    pub mode: Mode,
    pub difficulty: Difficulty,
    pub number_format: NumberFormat,
    pub enemy_count: u32,
    pub previous_enemy_count: u32,
    /// Current wave (1-based, never decreases)
    pub wave_number: u32,
    pub won: bool,
    pub questions_answered: u32,
    pub auto_difficulty_enabled: bool,
    /// Set by RestoreState, cleared by the first keystroke
    pub is_restored_from_persistence: bool,
    pub last_result: LastResult,
}

impl Default for GameState {
    fn default() -> Self {
        Self {
            answer: String::new(),
            operand1: 0.0,
            operand2: 0.0,
            operator: Operator::Add,
            mode: Mode::Addition,
            difficulty: Difficulty::Easy,
            number_format: NumberFormat::WholeNumber,
            enemy_count: BASE_ENEMIES,
            previous_enemy_count: BASE_ENEMIES,
            wave_number: 1,
            won: false,
            questions_answered: 0,
            auto_difficulty_enabled: true,
            is_restored_from_persistence: false,
            last_result: LastResult::None,
        }
    }
}

impl GameState {
    /// Correct answer for the current problem, rounded to answer precision
    pub fn expected_answer(&self) -> f64 {
        crate::round_to_places(
            self.operator.evaluate(self.operand1, self.operand2),
            ANSWER_DECIMALS,
        )
    }

    /// Problem as shown to the player, e.g. "3 + 4 = "
    pub fn problem_text(&self) -> String {
        format!(
            "{} {} {} = ",
            self.operand1,
            self.operator.symbol(),
            self.operand2
        )
    }
}
