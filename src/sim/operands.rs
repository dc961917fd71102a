//! Operand generation
//!
//! Produces `(operand1, operand2)` pairs for a mode/difficulty/format.
//! Randomness is owned by the generator so tests can use a seeded source.

use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

use super::state::{Difficulty, Mode, NumberFormat};
use crate::consts::ANSWER_DECIMALS;
use crate::round_to_places;

/// Smallest divisor allowed for decimal division
const MIN_DECIMAL_DIVISOR: f64 = 0.01;

/// Random operand source
#[derive(Debug, Clone)]
pub struct OperandGenerator<R = Pcg32> {
    rng: R,
}

impl OperandGenerator<Pcg32> {
    /// Deterministic generator for reproducible runs
    pub fn seeded(seed: u64) -> Self {
        Self::new(Pcg32::seed_from_u64(seed))
    }

    /// Generator seeded from the thread RNG
    pub fn from_entropy() -> Self {
        Self::new(Pcg32::from_rng(&mut rand::rng()))
    }
}

impl<R: Rng> OperandGenerator<R> {
    pub fn new(rng: R) -> Self {
        Self { rng }
    }

    /// Draw a value from `[low, high)`.
    ///
    /// Decimal draws are `random * (high - low)` rounded to two places and
    /// are NOT offset by `low`. Whole draws are floored and offset by `low`;
    /// an inverted range yields a value at or just below `low`.
    fn draw(&mut self, low: f64, high: f64, format: NumberFormat) -> f64 {
        let unit: f64 = self.rng.random();
        match format {
            NumberFormat::Decimal => round_to_places(unit * (high - low), ANSWER_DECIMALS),
            NumberFormat::WholeNumber => (unit * (high - low)).floor() + low,
        }
    }

    /// Generate a valid operand pair
    pub fn generate(
        &mut self,
        difficulty: Difficulty,
        mode: Mode,
        format: NumberFormat,
    ) -> (f64, f64) {
        let (low, high) = difficulty.range();
        let operand1 = self.draw(low, high, format);

        let upper = match (mode, format) {
            (Mode::Division, NumberFormat::WholeNumber) => (high / operand1).floor(),
            (Mode::Subtraction, _) => operand1,
            _ => high,
        };
        let mut operand2 = self.draw(low, upper, format);

        match (mode, format) {
            (Mode::Division, NumberFormat::WholeNumber) => {
                // Walk down to a divisor; 1 always divides so this terminates
                operand2 = operand2.max(1.0);
                while operand2 > 1.0 && operand1 % operand2 != 0.0 {
                    operand2 -= 1.0;
                }
            }
            (Mode::Division, NumberFormat::Decimal) if operand2.abs() < MIN_DECIMAL_DIVISOR => {
                operand2 = MIN_DECIMAL_DIVISOR;
            }
            _ => {}
        }

        (operand1, operand2)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use rand::RngCore;

    /// RNG that always yields zero bits (random::<f64>() == 0.0)
    struct ZeroRng;

    impl RngCore for ZeroRng {
        fn next_u32(&mut self) -> u32 {
            0
        }
        fn next_u64(&mut self) -> u64 {
            0
        }
        fn fill_bytes(&mut self, dest: &mut [u8]) {
            dest.fill(0);
        }
    }

    fn is_two_places(value: f64) -> bool {
        (value * 100.0 - (value * 100.0).round()).abs() < 1e-6
    }

    #[test]
    fn test_whole_ranges_per_difficulty() {
        let mut generator = OperandGenerator::seeded(7);
        for difficulty in Difficulty::ALL {
            let (low, high) = difficulty.range();
            for _ in 0..200 {
                let (a, b) = generator.generate(difficulty, Mode::Addition, NumberFormat::WholeNumber);
                assert!(a >= low && a < high, "{a} outside [{low}, {high})");
                assert!(b >= low && b < high, "{b} outside [{low}, {high})");
                assert_eq!(a.fract(), 0.0);
                assert_eq!(b.fract(), 0.0);
            }
        }
    }

    #[test]
    fn test_decimal_operand_ignores_low_offset() {
        let mut generator = OperandGenerator::seeded(11);
        for _ in 0..200 {
            let (a, _) = generator.generate(Difficulty::Medium, Mode::Multiplication, NumberFormat::Decimal);
            assert!((0.0..=89.0).contains(&a));
            assert!(is_two_places(a));
        }
    }

    #[test]
    fn test_easy_division_hundred_pairs_divide() {
        let mut generator = OperandGenerator::seeded(2024);
        for _ in 0..100 {
            let (a, b) = generator.generate(Difficulty::Easy, Mode::Division, NumberFormat::WholeNumber);
            assert!(b >= 1.0);
            assert_eq!(a % b, 0.0, "{a} / {b} is not exact");
        }
    }

    #[test]
    fn test_division_bottoms_out_at_one() {
        // Zero RNG: operand1 = 1, upper = 9, operand2 = 1
        let mut generator = OperandGenerator::new(ZeroRng);
        let (a, b) = generator.generate(Difficulty::Easy, Mode::Division, NumberFormat::WholeNumber);
        assert_eq!((a, b), (1.0, 1.0));

        // Hard: operand1 = 100, upper = 9 < low, operand2 starts at 100
        let (a, b) = generator.generate(Difficulty::Hard, Mode::Division, NumberFormat::WholeNumber);
        assert_eq!(a, 100.0);
        assert_eq!(a % b, 0.0);
    }

    #[test]
    fn test_decimal_division_never_zero_divisor() {
        let mut generator = OperandGenerator::new(ZeroRng);
        let (_, b) = generator.generate(Difficulty::Easy, Mode::Division, NumberFormat::Decimal);
        assert_eq!(b, MIN_DECIMAL_DIVISOR);
    }

    #[test]
    fn test_seeded_generators_agree() {
        let mut g1 = OperandGenerator::seeded(99);
        let mut g2 = OperandGenerator::seeded(99);
        for _ in 0..20 {
            assert_eq!(
                g1.generate(Difficulty::Hard, Mode::Subtraction, NumberFormat::Decimal),
                g2.generate(Difficulty::Hard, Mode::Subtraction, NumberFormat::Decimal),
            );
        }
    }

    fn any_difficulty() -> impl Strategy<Value = Difficulty> {
        prop_oneof![
            Just(Difficulty::Easy),
            Just(Difficulty::Medium),
            Just(Difficulty::Hard)
        ]
    }

    fn any_format() -> impl Strategy<Value = NumberFormat> {
        prop_oneof![Just(NumberFormat::WholeNumber), Just(NumberFormat::Decimal)]
    }

    proptest! {
        #[test]
        fn prop_whole_division_is_exact(seed in any::<u64>(), difficulty in any_difficulty()) {
            let mut generator = OperandGenerator::seeded(seed);
            let (a, b) = generator.generate(difficulty, Mode::Division, NumberFormat::WholeNumber);
            prop_assert!(b >= 1.0);
            prop_assert_eq!(a % b, 0.0);
        }

        #[test]
        fn prop_subtraction_never_negative(
            seed in any::<u64>(),
            difficulty in any_difficulty(),
            format in any_format()
        ) {
            let mut generator = OperandGenerator::seeded(seed);
            let (a, b) = generator.generate(difficulty, Mode::Subtraction, format);
            prop_assert!(b <= a, "{} - {} is negative", a, b);
        }

        #[test]
        fn prop_decimal_operands_have_two_places(
            seed in any::<u64>(),
            difficulty in any_difficulty()
        ) {
            let mut generator = OperandGenerator::seeded(seed);
            for mode in Mode::ALL {
                let (a, b) = generator.generate(difficulty, mode, NumberFormat::Decimal);
                prop_assert!(is_two_places(a));
                prop_assert!(is_two_places(b));
            }
        }
    }
}
