//! Built-in functions callable from filter and argument expressions.
//!
//! A function call is resolved by name at parse time (unknown names are
//! a parse error) and applied at evaluation time against already
//! evaluated argument values. Arity violations fail the containing
//! expression outright (the caller must treat this as `false`, not
//! `null`); type-shape mismatches within a correct-arity call instead
//! evaluate to `null`, matching every other expression-level mismatch.

use regex::Regex;

use crate::value::{NumberValue, Value};

/// A call whose argument count does not match the function's arity.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ArityError;

/// Resolve a function name to its fixed arity, or `None` if the name is
/// not a built-in (a parse-time error at the call site).
pub fn arity_of(name: &str) -> Option<usize> {
    match name {
        "abs" | "sum" | "avg" | "prod" | "min" | "max" | "length" | "keys" | "ceil" | "floor"
        | "to_number" => Some(1),
        "contains" | "starts_with" | "ends_with" | "tokenize" => Some(2),
        _ => None,
    }
}

/// Apply a built-in function by name. `args.len()` must already match
/// `arity_of(name)`; callers enforce that at parse/evaluation time.
pub fn call(name: &str, args: &[Value]) -> Result<Value, ArityError> {
    let expected = arity_of(name).ok_or(ArityError)?;
    if args.len() != expected {
        return Err(ArityError);
    }
    Ok(match name {
        "abs" => fn_abs(&args[0]),
        "sum" => fn_sum(&args[0]),
        "avg" => fn_avg(&args[0]),
        "prod" => fn_prod(&args[0]),
        "min" => fn_min_max(&args[0], true),
        "max" => fn_min_max(&args[0], false),
        "length" => fn_length(&args[0]),
        "keys" => fn_keys(&args[0]),
        "ceil" => fn_round(&args[0], f64::ceil, round_decimal_ceil),
        "floor" => fn_round(&args[0], f64::floor, round_decimal_floor),
        "to_number" => fn_to_number(&args[0]),
        "contains" => fn_contains(&args[0], &args[1]),
        "starts_with" => fn_starts_with(&args[0], &args[1]),
        "ends_with" => fn_ends_with(&args[0], &args[1]),
        "tokenize" => fn_tokenize(&args[0], &args[1]),
        _ => unreachable!("arity_of/call fell out of sync for {name}"),
    })
}

fn fn_abs(v: &Value) -> Value {
    match v.as_number() {
        Some(n) => match n.as_decimal() {
            Some(d) => Value::number(NumberValue::from_decimal(d.abs())),
            None => Value::number(NumberValue::from_f64(n.as_f64().abs())),
        },
        None => Value::Null,
    }
}

fn numbers_of(v: &Value) -> Option<Vec<&NumberValue>> {
    match v {
        Value::Array(items) => items.iter().map(|x| x.as_number()).collect(),
        _ => None,
    }
}

fn fn_sum(v: &Value) -> Value {
    match numbers_of(v) {
        Some(ns) => fold_numeric(&ns, NumberValue::from_i64(0), |acc, n| add(acc, n)),
        None => Value::Null,
    }
}

fn fn_prod(v: &Value) -> Value {
    match numbers_of(v) {
        Some(ns) if ns.is_empty() => Value::Null,
        Some(ns) => fold_numeric(&ns, NumberValue::from_i64(1), |acc, n| mul(acc, n)),
        None => Value::Null,
    }
}

fn fn_avg(v: &Value) -> Value {
    match numbers_of(v) {
        Some(ns) if ns.is_empty() => Value::Null,
        Some(ns) => {
            let count = ns.len() as i64;
            let total = fold_numeric(&ns, NumberValue::from_i64(0), |acc, n| add(acc, n));
            match total.as_number() {
                Some(n) => {
                    let divisor = NumberValue::from_i64(count);
                    match (n.as_decimal(), divisor.as_decimal()) {
                        (Some(a), Some(b)) => Value::number(NumberValue::from_decimal(a / b)),
                        _ => Value::number(NumberValue::from_f64(n.as_f64() / divisor.as_f64())),
                    }
                }
                None => Value::Null,
            }
        }
        None => Value::Null,
    }
}

fn add(a: NumberValue, b: &NumberValue) -> NumberValue {
    match (a.as_decimal(), b.as_decimal()) {
        (Some(x), Some(y)) => NumberValue::from_decimal(x + y),
        _ => NumberValue::from_f64(a.as_f64() + b.as_f64()),
    }
}

fn mul(a: NumberValue, b: &NumberValue) -> NumberValue {
    match (a.as_decimal(), b.as_decimal()) {
        (Some(x), Some(y)) => NumberValue::from_decimal(x * y),
        _ => NumberValue::from_f64(a.as_f64() * b.as_f64()),
    }
}

fn fold_numeric(
    ns: &[&NumberValue],
    init: NumberValue,
    step: impl Fn(NumberValue, &NumberValue) -> NumberValue,
) -> Value {
    let mut acc = init;
    for n in ns {
        acc = step(acc, n);
    }
    Value::number(acc)
}

fn fn_min_max(v: &Value, want_min: bool) -> Value {
    let Value::Array(items) = v else {
        return Value::Null;
    };
    if items.is_empty() {
        return Value::Null;
    }
    if let Some(_) = items[0].as_number() {
        if !items.iter().all(|x| x.as_number().is_some()) {
            return Value::Null;
        }
        return items
            .iter()
            .cloned()
            .reduce(|a, b| {
                let better = a.partial_cmp(&b);
                match (want_min, better) {
                    (true, Some(std::cmp::Ordering::Greater)) => b,
                    (false, Some(std::cmp::Ordering::Less)) => b,
                    _ => a,
                }
            })
            .unwrap_or(Value::Null);
    }
    if let Value::String(_) = &items[0] {
        if !items.iter().all(|x| matches!(x, Value::String(_))) {
            return Value::Null;
        }
        return items
            .iter()
            .cloned()
            .reduce(|a, b| {
                let ord = a.partial_cmp(&b);
                match (want_min, ord) {
                    (true, Some(std::cmp::Ordering::Greater)) => b,
                    (false, Some(std::cmp::Ordering::Less)) => b,
                    _ => a,
                }
            })
            .unwrap_or(Value::Null);
    }
    Value::Null
}

fn fn_length(v: &Value) -> Value {
    match v {
        Value::Object(o) => Value::number(NumberValue::from_i64(o.len() as i64)),
        Value::Array(a) => Value::number(NumberValue::from_i64(a.len() as i64)),
        Value::String(s) => Value::number(NumberValue::from_i64(s.chars().count() as i64)),
        _ => Value::Null,
    }
}

fn fn_keys(v: &Value) -> Value {
    match v {
        Value::Object(o) => Value::Array(o.iter().map(|(k, _)| Value::String(k.clone())).collect()),
        _ => Value::Null,
    }
}

fn round_decimal_ceil(d: rust_decimal::Decimal) -> rust_decimal::Decimal {
    d.ceil()
}

fn round_decimal_floor(d: rust_decimal::Decimal) -> rust_decimal::Decimal {
    d.floor()
}

fn fn_round(
    v: &Value,
    approx: impl Fn(f64) -> f64,
    exact: impl Fn(rust_decimal::Decimal) -> rust_decimal::Decimal,
) -> Value {
    match v.as_number() {
        Some(n) => match n.as_decimal() {
            Some(d) => Value::number(NumberValue::from_decimal(exact(d))),
            None => Value::number(NumberValue::from_f64(approx(n.as_f64()))),
        },
        None => Value::Null,
    }
}

fn fn_to_number(v: &Value) -> Value {
    match v {
        Value::Number(_) => v.clone(),
        Value::String(s) => s
            .parse::<rust_decimal::Decimal>()
            .map(|d| Value::number(NumberValue::from_decimal(d)))
            .or_else(|_| s.parse::<f64>().map(|f| Value::number(NumberValue::from_f64(f))))
            .unwrap_or(Value::Null),
        _ => Value::Null,
    }
}

fn fn_contains(haystack: &Value, needle: &Value) -> Value {
    match (haystack, needle) {
        (Value::Array(items), needle) => Value::boolean(items.iter().any(|x| x.deep_eq(needle))),
        (Value::String(s), Value::String(sub)) => Value::boolean(s.contains(sub.as_str())),
        _ => Value::Null,
    }
}

fn fn_starts_with(a: &Value, b: &Value) -> Value {
    match (a, b) {
        (Value::String(s), Value::String(prefix)) => Value::boolean(s.starts_with(prefix.as_str())),
        _ => Value::Null,
    }
}

fn fn_ends_with(a: &Value, b: &Value) -> Value {
    match (a, b) {
        (Value::String(s), Value::String(suffix)) => Value::boolean(s.ends_with(suffix.as_str())),
        _ => Value::Null,
    }
}

fn fn_tokenize(a: &Value, b: &Value) -> Value {
    match (a, b) {
        (Value::String(s), Value::String(pattern)) => match Regex::new(pattern) {
            Ok(re) => Value::Array(re.split(s).map(|part| Value::String(part.to_string())).collect()),
            Err(_) => Value::Null,
        },
        _ => Value::Null,
    }
}
