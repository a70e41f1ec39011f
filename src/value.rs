//! Uniform JSON value abstraction.
//!
//! Host-provided JSON is converted once, up front, into this module's
//! owned `Value` (`from_json`) rather than threaded through the engine
//! as borrowed `&serde_json::Value`. That costs a clone of the input
//! document, but it means every value flowing through selectors,
//! filter expressions, operators and functions, whether it originated
//! in the document or was synthesized, shares one representation.
//! That keeps ancestor (`^`) re-walks, root memoization and
//! de-duplication free of a second, borrow-based evaluator.

use std::cmp::Ordering;

use rust_decimal::Decimal;
use serde_json::Value as Json;

/// The kind tag shared by host and synthetic values.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Kind {
    Null,
    True,
    False,
    Number,
    String,
    Array,
    Object,
    Undefined,
}

/// A JSON-shaped value: either borrowed from the input document
/// (cloned once on entry to expression evaluation) or synthesized by an
/// operator, function, or sub-selector.
#[derive(Debug, Clone)]
pub enum Value {
    Null,
    True,
    False,
    Number(NumberValue),
    String(String),
    Array(Vec<Value>),
    Object(Vec<(String, Value)>),
    /// Absent: a path that did not resolve. Distinct from `Null`.
    Undefined,
}

/// A number carrying both an exact-decimal and an approximate-double
/// representation. Either extraction can independently fail (e.g. a
/// double that overflows `Decimal`'s range falls back to `f64`-only).
#[derive(Debug, Clone, Copy)]
pub struct NumberValue {
    decimal: Option<Decimal>,
    double: f64,
}

impl NumberValue {
    pub fn from_decimal(d: Decimal) -> Self {
        Self { decimal: Some(d), double: d.try_into().unwrap_or(f64::NAN) }
    }

    pub fn from_f64(f: f64) -> Self {
        Self { decimal: Decimal::try_from(f).ok(), double: f }
    }

    pub fn from_i64(i: i64) -> Self {
        Self { decimal: Some(Decimal::from(i)), double: i as f64 }
    }

    pub fn as_decimal(&self) -> Option<Decimal> {
        self.decimal
    }

    pub fn as_f64(&self) -> f64 {
        self.double
    }
}

impl PartialEq for NumberValue {
    fn eq(&self, other: &Self) -> bool {
        Value::numbers_equal(self, other)
    }
}

impl Value {
    pub fn kind(&self) -> Kind {
        match self {
            Value::Null => Kind::Null,
            Value::True => Kind::True,
            Value::False => Kind::False,
            Value::Number(_) => Kind::Number,
            Value::String(_) => Kind::String,
            Value::Array(_) => Kind::Array,
            Value::Object(_) => Kind::Object,
            Value::Undefined => Kind::Undefined,
        }
    }

    pub fn number(n: NumberValue) -> Self {
        Value::Number(n)
    }

    pub fn boolean(b: bool) -> Self {
        if b { Value::True } else { Value::False }
    }

    /// Convert a borrowed host JSON value into an owned `Value`.
    pub fn from_json(v: &Json) -> Self {
        match v {
            Json::Null => Value::Null,
            Json::Bool(true) => Value::True,
            Json::Bool(false) => Value::False,
            Json::Number(n) => {
                let double = n.as_f64().unwrap_or(f64::NAN);
                let decimal = Decimal::from_str_exact_json(n);
                Value::Number(NumberValue { decimal, double })
            }
            Json::String(s) => Value::String(s.clone()),
            Json::Array(a) => Value::Array(a.iter().map(Value::from_json).collect()),
            Json::Object(o) => {
                Value::Object(o.iter().map(|(k, v)| (k.clone(), Value::from_json(v))).collect())
            }
        }
    }

    /// Convert back to a host JSON value for the public API surface.
    /// `Undefined` has no JSON representation and becomes `null`, same
    /// as a failed path lookup would.
    pub fn to_json(&self) -> Json {
        match self {
            Value::Null | Value::Undefined => Json::Null,
            Value::True => Json::Bool(true),
            Value::False => Json::Bool(false),
            Value::Number(n) => serde_json::Number::from_f64(n.as_f64()).map(Json::Number).unwrap_or(Json::Null),
            Value::String(s) => Json::String(s.clone()),
            Value::Array(a) => Json::Array(a.iter().map(Value::to_json).collect()),
            Value::Object(o) => Json::Object(o.iter().map(|(k, v)| (k.clone(), v.to_json())).collect()),
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::String(s) => Some(s.as_str()),
            _ => None,
        }
    }

    pub fn as_number(&self) -> Option<&NumberValue> {
        match self {
            Value::Number(n) => Some(n),
            _ => None,
        }
    }

    pub fn index(&self, i: usize) -> Option<&Value> {
        match self {
            Value::Array(a) => a.get(i),
            _ => None,
        }
    }

    pub fn get(&self, name: &str) -> Option<&Value> {
        match self {
            Value::Object(o) => o.iter().find(|(k, _)| k == name).map(|(_, v)| v),
            _ => None,
        }
    }

    pub fn iter_object(&self) -> impl Iterator<Item = (&str, &Value)> {
        match self {
            Value::Object(o) => either::Left(o.iter().map(|(k, v)| (k.as_str(), v))),
            _ => either::Right(std::iter::empty()),
        }
    }

    /// Truthiness rule: false iff False/Null/Undefined, an empty array,
    /// an empty object, or an empty string. Numbers are always true,
    /// including zero and NaN.
    pub fn is_truthy(&self) -> bool {
        match self {
            Value::False | Value::Null | Value::Undefined => false,
            Value::Array(a) => !a.is_empty(),
            Value::Object(o) => !o.is_empty(),
            Value::String(s) => !s.is_empty(),
            Value::Number(_) | Value::True => true,
        }
    }

    /// Deep, ordering-independent equality.
    pub fn deep_eq(&self, other: &Value) -> bool {
        match (self, other) {
            (Value::Null, Value::Null) => true,
            (Value::True, Value::True) => true,
            (Value::False, Value::False) => true,
            (Value::Undefined, Value::Undefined) => true,
            (Value::Number(a), Value::Number(b)) => Value::numbers_equal(a, b),
            (Value::String(a), Value::String(b)) => a == b,
            (Value::Array(a), Value::Array(b)) => {
                a.len() == b.len() && a.iter().zip(b.iter()).all(|(x, y)| x.deep_eq(y))
            }
            (Value::Object(a), Value::Object(b)) => {
                if a.len() != b.len() {
                    return false;
                }
                let mut sa: Vec<_> = a.iter().collect();
                let mut sb: Vec<_> = b.iter().collect();
                sa.sort_by(|x, y| x.0.cmp(&y.0));
                sb.sort_by(|x, y| x.0.cmp(&y.0));
                sa.iter().zip(sb.iter()).all(|((ka, va), (kb, vb))| ka == kb && va.deep_eq(vb))
            }
            _ => false,
        }
    }

    fn numbers_equal(a: &NumberValue, b: &NumberValue) -> bool {
        if let (Some(da), Some(db)) = (a.decimal, b.decimal) {
            return da == db;
        }
        a.double == b.double
    }

    /// Ordinal comparison used by `<, <=, >, >=` and by `min`/`max`
    /// over homogeneous numbers or strings. Returns `None` for
    /// incomparable kinds (mixed-kind comparisons yield null, not an
    /// ordering).
    pub fn partial_cmp(&self, other: &Value) -> Option<Ordering> {
        match (self, other) {
            (Value::Number(a), Value::Number(b)) => {
                if let (Some(da), Some(db)) = (a.decimal, b.decimal) {
                    da.partial_cmp(&db)
                } else {
                    a.double.partial_cmp(&b.double)
                }
            }
            (Value::String(a), Value::String(b)) => Some(a.as_bytes().cmp(b.as_bytes())),
            _ => None,
        }
    }

}

/// Minimal two-variant iterator adapter so `iter_object` can return
/// `impl Iterator` without boxing regardless of which branch it takes.
mod either {
    pub enum Either<L, R> {
        Left(L),
        Right(R),
    }

    pub use Either::{Left, Right};

    impl<L, R, T> Iterator for Either<L, R>
    where
        L: Iterator<Item = T>,
        R: Iterator<Item = T>,
    {
        type Item = T;
        fn next(&mut self) -> Option<T> {
            match self {
                Either::Left(l) => l.next(),
                Either::Right(r) => r.next(),
            }
        }
    }
}

/// Extension to parse a `serde_json::Number` into an exact `Decimal`
/// without going through its lossy `f64` representation first.
trait DecimalFromJsonNumber {
    fn from_str_exact_json(n: &serde_json::Number) -> Option<Decimal>;
}

impl DecimalFromJsonNumber for Decimal {
    fn from_str_exact_json(n: &serde_json::Number) -> Option<Decimal> {
        n.to_string().parse::<Decimal>().ok()
    }
}
