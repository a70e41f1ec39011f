//! The token sum type produced by the shunting-yard assembler and
//! consumed by the postfix expression runtime.
//!
//! An [`Expression`] is always in postfix (reverse-Polish) order: by
//! the time a `UnaryOp`/`BinaryOp`/`Function` token is reached, every
//! token it applies to has already run and left its result on the
//! evaluator's value stack.

use crate::operators::{BinaryOperator, UnaryOperator};
use crate::selector::Segment;
use crate::value::Value;

/// A finalized, evaluable postfix token list.
pub type Expression = Vec<Token>;

#[derive(Debug, Clone)]
pub enum Token {
    /// A literal (a JSON value or a regex-literal-derived string, etc.)
    Value(Value),
    /// Bare `@` with no trailing path: the current node itself.
    CurrentNode,
    /// A root-rooted subquery (`$.a.b`, `$..c`, or bare `$`). Carries a
    /// parse-time-assigned stable id so repeated occurrences of the
    /// *same* subquery within one expression share one memoized
    /// evaluation via `Resources::memoized_root`. An empty segment list
    /// means bare `$`.
    RootQuery(u64, Vec<Segment>),
    /// A current-rooted subquery (`@.a.b`, `@..c`). Never memoized:
    /// `@` is a different node for every candidate a filter visits.
    CurrentQuery(Vec<Segment>),
    UnaryOp(UnaryOperator),
    BinaryOp(BinaryOperator),
    /// A resolved built-in function name, applied to the top
    /// `arity_of(name)` entries of the pending argument list.
    Function(String),
    /// A nested, independently evaluated expression, used once per
    /// function-call argument, always immediately followed by
    /// `Argument` in the enclosing stream.
    Expression(Expression),
    /// Pop the top of the value stack and append it to the current
    /// argument list.
    Argument,
}
