//! Operator registry.
//!
//! Precedence and associativity live here so both the shunting-yard
//! assembler (`parser.rs`) and the postfix evaluator (`expr.rs`) agree
//! on a single table.

use regex::RegexBuilder;

use crate::value::{NumberValue, Value};

/// A unary prefix operator. Both bind at precedence 8 and are
/// right-associative; `Regex` binds at precedence 7.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UnaryOperator {
    Not,
    Negate,
}

impl UnaryOperator {
    pub fn precedence(self) -> u8 {
        8
    }
}

/// A binary infix operator with its precedence.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BinaryOperator {
    Or,
    And,
    Eq,
    Ne,
    Lt,
    Le,
    Gt,
    Ge,
    Add,
    Sub,
    Mul,
    Div,
    Mod,
    Regex { case_insensitive: bool },
}

impl BinaryOperator {
    pub fn precedence(self) -> u8 {
        match self {
            BinaryOperator::Or => 1,
            BinaryOperator::And => 2,
            BinaryOperator::Eq | BinaryOperator::Ne => 3,
            BinaryOperator::Lt | BinaryOperator::Le | BinaryOperator::Gt | BinaryOperator::Ge => 4,
            BinaryOperator::Add | BinaryOperator::Sub => 5,
            BinaryOperator::Mul | BinaryOperator::Div | BinaryOperator::Mod => 6,
            BinaryOperator::Regex { .. } => 7,
        }
    }

    pub fn right_associative(self) -> bool {
        matches!(self, BinaryOperator::Regex { .. })
    }
}

/// Apply a unary operator. `None` means the operand's kind made the
/// operator inapplicable; the caller treats that as an evaluation
/// failure (expression result becomes `null`).
pub fn apply_unary(op: UnaryOperator, value: &Value) -> Option<Value> {
    match op {
        UnaryOperator::Not => Some(Value::boolean(!value.is_truthy())),
        UnaryOperator::Negate => match value.as_number() {
            Some(n) => match n.as_decimal() {
                Some(d) => Some(Value::number(NumberValue::from_decimal(-d))),
                None => Some(Value::number(NumberValue::from_f64(-n.as_f64()))),
            },
            None => None,
        },
    }
}

/// Apply a binary operator against two already-evaluated operands (both
/// sides of a postfix stream are evaluated before the operator token is
/// reached, so `&&`/`||` cannot skip evaluating either side; their
/// "short-circuit" semantics are about which operand *value* comes out,
/// never coerced to a boolean, not about skipping work). Returns `None`
/// on a type-shape mismatch (arithmetic by non-numbers, division/modulus
/// by zero), which the caller folds into a failed evaluation.
pub fn apply_binary(op: BinaryOperator, lhs: &Value, rhs: &Value) -> Option<Value> {
    match op {
        BinaryOperator::Or => Some(if lhs.is_truthy() { lhs.clone() } else { rhs.clone() }),
        BinaryOperator::And => Some(if !lhs.is_truthy() { lhs.clone() } else { rhs.clone() }),
        BinaryOperator::Eq => Some(Value::boolean(lhs.deep_eq(rhs))),
        BinaryOperator::Ne => Some(Value::boolean(!lhs.deep_eq(rhs))),
        // Comparisons on mismatched kinds yield null, not false.
        BinaryOperator::Lt => Some(match lhs.partial_cmp(rhs) {
            Some(ord) => Value::boolean(ord == std::cmp::Ordering::Less),
            None => Value::Null,
        }),
        BinaryOperator::Le => Some(match lhs.partial_cmp(rhs) {
            Some(ord) => Value::boolean(matches!(ord, std::cmp::Ordering::Less | std::cmp::Ordering::Equal)),
            None => Value::Null,
        }),
        BinaryOperator::Gt => Some(match lhs.partial_cmp(rhs) {
            Some(ord) => Value::boolean(ord == std::cmp::Ordering::Greater),
            None => Value::Null,
        }),
        BinaryOperator::Ge => Some(match lhs.partial_cmp(rhs) {
            Some(ord) => {
                Value::boolean(matches!(ord, std::cmp::Ordering::Greater | std::cmp::Ordering::Equal))
            }
            None => Value::Null,
        }),
        BinaryOperator::Add => arithmetic(lhs, rhs, |a, b| Some(a + b), |a, b| a + b),
        BinaryOperator::Sub => arithmetic(lhs, rhs, |a, b| Some(a - b), |a, b| a - b),
        BinaryOperator::Mul => arithmetic(lhs, rhs, |a, b| Some(a * b), |a, b| a * b),
        BinaryOperator::Div => {
            if is_zero_divisor(rhs) {
                return None;
            }
            arithmetic(lhs, rhs, |a, b| Some(a / b), |a, b| a / b)
        }
        BinaryOperator::Mod => {
            if is_zero_divisor(rhs) {
                return None;
            }
            arithmetic(lhs, rhs, |a, b| Some(a % b), |a, b| a % b)
        }
        BinaryOperator::Regex { case_insensitive } => {
            let (Value::String(text), Value::String(pattern)) = (lhs, rhs) else {
                return None;
            };
            let re = RegexBuilder::new(pattern).case_insensitive(case_insensitive).build().ok()?;
            Some(Value::boolean(re.is_match(text)))
        }
    }
}

fn is_zero_divisor(v: &Value) -> bool {
    match v.as_number() {
        Some(n) => match n.as_decimal() {
            Some(d) => d.is_zero(),
            None => n.as_f64() == 0.0,
        },
        None => false,
    }
}

fn arithmetic(
    lhs: &Value,
    rhs: &Value,
    exact: impl FnOnce(rust_decimal::Decimal, rust_decimal::Decimal) -> Option<rust_decimal::Decimal>,
    approx: impl FnOnce(f64, f64) -> f64,
) -> Option<Value> {
    let (a, b) = (lhs.as_number()?, rhs.as_number()?);
    if let (Some(da), Some(db)) = (a.as_decimal(), b.as_decimal()) {
        if let Some(result) = exact(da, db) {
            return Some(Value::number(NumberValue::from_decimal(result)));
        }
        // exact path declined (e.g. division by zero) -- treated as a
        // failed evaluation, not a fallback to double.
        return None;
    }
    Some(Value::number(NumberValue::from_f64(approx(a.as_f64(), b.as_f64()))))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::value::NumberValue;

    #[test]
    fn division_by_zero_is_none_not_panic() {
        let lhs = Value::number(NumberValue::from_i64(1));
        let rhs = Value::number(NumberValue::from_i64(0));
        assert!(apply_binary(BinaryOperator::Div, &lhs, &rhs).is_none());
    }

    #[test]
    fn or_and_return_operand_values_not_coerced_booleans() {
        let lhs = Value::number(NumberValue::from_i64(0));
        let rhs = Value::String("x".into());
        let result = apply_binary(BinaryOperator::Or, &lhs, &rhs).unwrap();
        match result {
            Value::Number(n) => assert_eq!(n.as_f64(), 0.0),
            other => panic!("expected numeric passthrough, got {other:?}"),
        }
    }
}
