//! Chained evaluation of an ordered tile triple.
//!
//! The first tile contributes only its operand; the second and third each
//! contribute operator and operand, applied strictly left to right (no
//! precedence). An undefined interim result short-circuits: the second
//! operation is never applied to it.

use crate::{Operator, Outcome, Tile};

/// Apply one binary operation.
///
/// Division by zero yields [`Outcome::Undefined`]; everything else goes
/// through the finiteness check in [`Outcome::from_value`].
pub fn perform_operation(a: f64, op: Operator, b: f64) -> Outcome {
    let value = match op {
        Operator::Add => a + b,
        Operator::Sub => a - b,
        Operator::Mul => a * b,
        Operator::Div => {
            if b == 0.0 {
                return Outcome::Undefined;
            }
            a / b
        }
    };
    Outcome::from_value(value)
}

/// Evaluate `(t1.operand  t2.operator  t2.operand)  t3.operator  t3.operand`.
pub fn evaluate(t1: &Tile, t2: &Tile, t3: &Tile) -> Outcome {
    let interim = perform_operation(f64::from(t1.operand), t2.operator, f64::from(t2.operand));
    match interim {
        Outcome::Undefined => Outcome::Undefined,
        Outcome::Value(v) => perform_operation(v, t3.operator, f64::from(t3.operand)),
    }
}

/// Render the chained formula the way the UI displays it, left to right
/// without parentheses: `"5 / 2 - 3"`.
pub fn expression(t1: &Tile, t2: &Tile, t3: &Tile) -> String {
    format!(
        "{} {} {} {} {}",
        t1.operand, t2.operator, t2.operand, t3.operator, t3.operand
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tile(id: u32, operator: Operator, operand: u8) -> Tile {
        Tile::new(id, operator, operand)
    }

    #[test]
    fn test_perform_operation_basic() {
        assert_eq!(perform_operation(5.0, Operator::Add, 3.0), Outcome::Value(8.0));
        assert_eq!(perform_operation(5.0, Operator::Sub, 8.0), Outcome::Value(-3.0));
        assert_eq!(perform_operation(5.0, Operator::Mul, 3.0), Outcome::Value(15.0));
        assert_eq!(perform_operation(5.0, Operator::Div, 2.0), Outcome::Value(2.5));
    }

    #[test]
    fn test_division_by_zero_is_undefined() {
        assert!(perform_operation(5.0, Operator::Div, 0.0).is_undefined());
    }

    #[test]
    fn test_division_is_floating_point() {
        // No integer truncation anywhere in the chain.
        let result = evaluate(
            &tile(1, Operator::Add, 7),
            &tile(2, Operator::Div, 2),
            &tile(3, Operator::Add, 1),
        );
        assert_eq!(result, Outcome::Value(4.5));
    }

    #[test]
    fn test_chained_evaluation() {
        // 5 + 3, then * 7
        let result = evaluate(
            &tile(1, Operator::Add, 5),
            &tile(2, Operator::Add, 3),
            &tile(3, Operator::Mul, 7),
        );
        assert_eq!(result, Outcome::Value(56.0));

        // 5 / 2, then - 3
        let result = evaluate(
            &tile(1, Operator::Add, 5),
            &tile(2, Operator::Div, 2),
            &tile(3, Operator::Sub, 3),
        );
        assert_eq!(result, Outcome::Value(-0.5));
    }

    #[test]
    fn test_undefined_interim_short_circuits() {
        // 5 / 0 is undefined; the trailing operation must not resurrect it.
        let result = evaluate(
            &tile(1, Operator::Add, 5),
            &tile(2, Operator::Div, 0),
            &tile(3, Operator::Add, 9),
        );
        assert!(result.is_undefined());

        // Even when the trailing operation is itself a division by zero.
        let result = evaluate(
            &tile(1, Operator::Add, 5),
            &tile(2, Operator::Div, 0),
            &tile(3, Operator::Div, 0),
        );
        assert!(result.is_undefined());
    }

    #[test]
    fn test_trailing_division_by_zero() {
        let result = evaluate(
            &tile(1, Operator::Add, 5),
            &tile(2, Operator::Add, 3),
            &tile(3, Operator::Div, 0),
        );
        assert!(result.is_undefined());
    }

    #[test]
    fn test_expression_rendering() {
        let s = expression(
            &tile(1, Operator::Add, 5),
            &tile(2, Operator::Div, 2),
            &tile(3, Operator::Sub, 3),
        );
        assert_eq!(s, "5 / 2 - 3");
    }
}
