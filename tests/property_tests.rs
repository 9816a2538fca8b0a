use proptest::prelude::*;

use scicalc::calculator::{
    BinaryOperator, CalcError, Command, Engine, apply_binary, format_number,
};

fn arb_finite() -> impl Strategy<Value = f64> {
    prop::num::f64::NORMAL | prop::num::f64::SUBNORMAL | prop::num::f64::ZERO
}

fn arb_operator() -> impl Strategy<Value = BinaryOperator> {
    prop_oneof![
        Just(BinaryOperator::Add),
        Just(BinaryOperator::Subtract),
        Just(BinaryOperator::Multiply),
        Just(BinaryOperator::Divide),
    ]
}

fn press_digits(engine: &mut Engine, digits: &[u8]) {
    for &d in digits {
        engine.apply(Command::digit(d).unwrap());
    }
}

fn digit_text(digits: &[u8]) -> String {
    digits.iter().map(|d| char::from(b'0' + d)).collect()
}

/// `a op b =` with both operands typed in directly.
fn evaluate(a: f64, op: BinaryOperator, b: f64) -> Engine {
    let mut engine = Engine::new();
    engine.apply_all([
        Command::Paste(format_number(a)),
        Command::Operator(op),
        Command::Paste(format_number(b)),
        Command::Equals,
    ]);
    engine
}

// --- Operand entry ---

proptest! {
    #[test]
    fn digits_concatenate(first in 1u8..=9, rest in prop::collection::vec(0u8..=9, 0..18)) {
        let mut typed = vec![first];
        typed.extend(rest);

        let mut engine = Engine::new();
        press_digits(&mut engine, &typed);
        prop_assert_eq!(engine.display(), digit_text(&typed));
    }

    #[test]
    fn decimal_point_appears_once(
        whole in prop::collection::vec(1u8..=9, 1..6),
        presses in 1usize..5,
        fraction in prop::collection::vec(0u8..=9, 0..6),
    ) {
        let mut engine = Engine::new();
        press_digits(&mut engine, &whole);
        for _ in 0..presses {
            engine.apply(Command::DecimalPoint);
        }
        press_digits(&mut engine, &fraction);
        engine.apply(Command::DecimalPoint);

        let expected = format!("{}.{}", digit_text(&whole), digit_text(&fraction));
        prop_assert_eq!(engine.display(), expected.as_str());
        prop_assert_eq!(engine.display().matches('.').count(), 1);
    }

    #[test]
    fn sign_change_toggles_single_minus(
        digits in prop::collection::vec(1u8..=9, 1..8),
        presses in 0usize..7,
    ) {
        let mut engine = Engine::new();
        press_digits(&mut engine, &digits);
        for _ in 0..presses {
            engine.apply(Command::SignChange);
        }

        let text = digit_text(&digits);
        let expected = if presses % 2 == 1 { format!("-{}", text) } else { text };
        prop_assert_eq!(engine.display(), expected.as_str());
    }

    #[test]
    fn sign_change_on_zero_is_noop(presses in 0usize..7) {
        let mut engine = Engine::new();
        for _ in 0..presses {
            engine.apply(Command::SignChange);
        }
        prop_assert_eq!(engine.display(), "0");
    }
}

// --- Binary evaluation ---

proptest! {
    #[test]
    fn binary_equals_matches_arithmetic(a in arb_finite(), op in arb_operator(), b in arb_finite()) {
        prop_assume!(op != BinaryOperator::Divide || b != 0.0);
        let expected = apply_binary(a, op, b).unwrap();
        prop_assume!(expected.is_finite());

        let engine = evaluate(a, op, b);
        prop_assert!(!engine.is_error());
        prop_assert_eq!(engine.display(), format_number(expected));
        let trail = format!("{} {} {} =", format_number(a), op, format_number(b));
        prop_assert_eq!(engine.trail(), trail.as_str());
    }

    #[test]
    fn dividing_by_zero_fails(a in arb_finite()) {
        let engine = evaluate(a, BinaryOperator::Divide, 0.0);
        prop_assert!(engine.is_error());
        prop_assert_eq!(engine.trail(), CalcError::DivideByZero.to_string());
    }

    #[test]
    fn next_digit_recovers_from_error(a in arb_finite(), d in 0u8..=9) {
        let mut engine = evaluate(a, BinaryOperator::Divide, 0.0);
        engine.apply(Command::digit(d).unwrap());
        prop_assert!(!engine.is_error());
        prop_assert_eq!(engine.display(), digit_text(&[d]));
        prop_assert_eq!(engine.trail(), "");
    }
}
