//! The selector tree and the segment-chain orchestration that threads a
//! parsed query against a document.
//!
//! Each [`Selector`] variant implements `select_one`, matching itself
//! against a single input node and producing zero or more descendants.
//! [`evaluate_segments`] threads those matches through a `JsonPath`'s
//! segments the way the teacher's `JsonPathEval::eval` threads
//! `results`/`paths` vectors stage by stage (see `eval.rs` in
//! `lessisbetter-json-joy-rs`), generalized here with filter
//! expressions, the ancestor operator, recursive-descent depth
//! bounding, and sequential-vs-parallel union execution.

use std::sync::Arc;

use crate::error::JsonPathError;
use crate::path::{PathNode, PathStep};
use crate::resources::{ExecutionMode, Resources};
use crate::token::Expression;
use crate::value::Value;

/// A single JSONPath query: an ordered sequence of segments applied
/// left to right, starting from the document root.
#[derive(Debug, Clone, PartialEq)]
pub struct JsonPath {
    pub segments: Vec<Segment>,
}

/// One `.foo`, `[...]`, or `..foo` step. More than one selector in
/// `selectors` means this position is a union; the segments that
/// follow act as the shared tail every union member proceeds into, so
/// no explicit shared-tail pointer is needed.
#[derive(Debug, Clone, PartialEq)]
pub struct Segment {
    pub selectors: Vec<Selector>,
    pub recursive: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Selector {
    Identifier(String),
    Index(isize),
    Slice { start: Option<isize>, stop: Option<isize>, step: isize },
    Wildcard,
    Filter(Expression),
    /// `^` repeated `depth` times.
    Parent(usize),
}

type Match = (Arc<PathNode>, Value);

impl Selector {
    fn select_one(
        &self,
        resources: &Resources,
        root: &Value,
        path: &Arc<PathNode>,
        current: &Value,
    ) -> Result<Vec<Match>, JsonPathError> {
        Ok(match self {
            Selector::Identifier(name) => select_identifier(name, path, current),
            Selector::Index(i) => select_index(*i, path, current).into_iter().collect(),
            Selector::Slice { start, stop, step } => select_slice(*start, *stop, *step, path, current),
            Selector::Wildcard => select_wildcard(path, current),
            Selector::Filter(expr) => select_filter(expr, resources, root, path, current),
            Selector::Parent(depth) => select_parent(*depth, root, path).into_iter().collect(),
        })
    }
}

fn select_identifier(name: &str, path: &Arc<PathNode>, current: &Value) -> Vec<Match> {
    match current {
        Value::Object(_) => {
            current.get(name).map(|v| (path.child_name(name), v.clone())).into_iter().collect()
        }
        // Convenience: `.length` on an array/string reads its length,
        // matching real-world filter usage.
        Value::Array(_) | Value::String(_) if name == "length" => {
            let len = match current {
                Value::Array(a) => a.len(),
                Value::String(s) => s.chars().count(),
                _ => unreachable!(),
            };
            vec![(path.child_name(name), Value::number(crate::value::NumberValue::from_i64(len as i64)))]
        }
        _ => Vec::new(),
    }
}

fn normalize_index(i: isize, len: usize) -> Option<usize> {
    if i >= 0 {
        let i = i as usize;
        (i < len).then_some(i)
    } else {
        let from_end = len as isize + i;
        (from_end >= 0).then_some(from_end as usize)
    }
}

fn select_index(i: isize, path: &Arc<PathNode>, current: &Value) -> Option<Match> {
    let Value::Array(items) = current else { return None };
    let idx = normalize_index(i, items.len())?;
    Some((path.child_index(idx), items[idx].clone()))
}

fn select_slice(
    start: Option<isize>,
    stop: Option<isize>,
    step: isize,
    path: &Arc<PathNode>,
    current: &Value,
) -> Vec<Match> {
    let Value::Array(items) = current else { return Vec::new() };
    let len = items.len() as isize;
    if step == 0 || len == 0 {
        return Vec::new();
    }
    let mut out = Vec::new();
    if step > 0 {
        let lo = clamp_slice_bound(start, len, 0, false);
        let hi = clamp_slice_bound(stop, len, len, false);
        let mut i = lo;
        while i < hi {
            if i >= 0 {
                out.push((path.child_index(i as usize), items[i as usize].clone()));
            }
            i += step;
        }
    } else {
        let lo = clamp_slice_bound(start, len, len - 1, true);
        let hi = clamp_slice_bound(stop, len, -1, true);
        let mut i = lo;
        while i > hi {
            if i >= 0 && i < len {
                out.push((path.child_index(i as usize), items[i as usize].clone()));
            }
            i += step;
        }
    }
    out
}

/// Clamp an explicit slice bound into array range. `reverse` selects the
/// negative-step normalization, where a positive bound clamps to the last
/// valid index (`len - 1`) rather than one past the end (`len`).
fn clamp_slice_bound(value: Option<isize>, len: isize, default: isize, reverse: bool) -> isize {
    match value {
        None => default,
        Some(v) if v < 0 => (len + v).max(-1),
        Some(v) if reverse => v.min(len - 1),
        Some(v) => v.min(len),
    }
}

fn select_wildcard(path: &Arc<PathNode>, current: &Value) -> Vec<Match> {
    match current {
        Value::Array(items) => {
            items.iter().enumerate().map(|(i, v)| (path.child_index(i), v.clone())).collect()
        }
        Value::Object(props) => {
            props.iter().map(|(k, v)| (path.child_name(k), v.clone())).collect()
        }
        _ => Vec::new(),
    }
}

fn select_parent(depth: usize, root: &Value, path: &Arc<PathNode>) -> Option<Match> {
    let ancestor = path.ancestor(depth)?;
    let location = ancestor.to_location();
    let value = value_at_steps(root, location.steps())?;
    Some((ancestor, value.clone()))
}

/// Re-walk `root` along a materialized location, rebuilding the
/// ancestor's value from the root down rather than storing it directly.
pub(crate) fn value_at_steps<'a>(root: &'a Value, steps: &[PathStep]) -> Option<&'a Value> {
    let mut current = root;
    for step in steps {
        current = match step {
            PathStep::Name(name) => current.get(name)?,
            PathStep::Index(i) => current.index(*i)?,
        };
    }
    Some(current)
}

fn select_filter(
    expr: &Expression,
    resources: &Resources,
    root: &Value,
    path: &Arc<PathNode>,
    current: &Value,
) -> Vec<Match> {
    let candidates = match current {
        Value::Array(items) => {
            items.iter().enumerate().map(|(i, v)| (path.child_index(i), v)).collect::<Vec<_>>()
        }
        Value::Object(props) => {
            props.iter().map(|(k, v)| (path.child_name(k), v)).collect::<Vec<_>>()
        }
        _ => Vec::new(),
    };
    candidates
        .into_iter()
        .filter_map(|(child_path, child_value)| {
            let passes = crate::expr::eval(expr, resources, root, &child_path, child_value)
                .map(|v| v.is_truthy())
                .unwrap_or(false);
            passes.then(|| (child_path, child_value.clone()))
        })
        .collect()
}

/// Thread `segments` against a starting node, producing every
/// `(path, value)` pair reached. Shared by the top-level driver (start
/// = document root) and by embedded subqueries inside filter
/// expressions (start = `@` or `$` at that point in the expression).
pub fn evaluate_segments(
    segments: &[Segment],
    resources: &Resources,
    root: &Value,
    start_path: &Arc<PathNode>,
    start_value: &Value,
) -> Result<Vec<Match>, JsonPathError> {
    let mut frontier = vec![(start_path.clone(), start_value.clone())];
    for segment in segments {
        let mut next = Vec::new();
        for (path, value) in &frontier {
            if segment.recursive {
                collect_recursive(&segment.selectors, resources, root, path, value, 0, &mut next)?;
            } else {
                apply_union(&segment.selectors, resources, root, path, value, &mut next)?;
            }
        }
        frontier = next;
    }
    Ok(frontier)
}

fn apply_union(
    selectors: &[Selector],
    resources: &Resources,
    root: &Value,
    path: &Arc<PathNode>,
    value: &Value,
    out: &mut Vec<Match>,
) -> Result<(), JsonPathError> {
    match resources.options.execution_mode {
        ExecutionMode::Sequential => {
            for selector in selectors {
                out.extend(selector.select_one(resources, root, path, value)?);
            }
            Ok(())
        }
        ExecutionMode::Parallel => apply_union_parallel(selectors, resources, root, path, value, out),
    }
}

#[cfg(feature = "parallel")]
fn apply_union_parallel(
    selectors: &[Selector],
    resources: &Resources,
    root: &Value,
    path: &Arc<PathNode>,
    value: &Value,
    out: &mut Vec<Match>,
) -> Result<(), JsonPathError> {
    use rayon::prelude::*;

    // `Value`/`Arc<PathNode>` are not `Sync`; each union member gets its
    // own clone of the inputs it needs so the fork-join point never
    // shares mutable state. Each branch returns its own Vec, joined
    // sequentially afterwards.
    let owned_value = value.clone();
    let results: Result<Vec<Vec<Match>>, JsonPathError> = selectors
        .par_iter()
        .map(|selector| selector.select_one(resources, root, path, &owned_value))
        .collect();
    for matches in results? {
        out.extend(matches);
    }
    Ok(())
}

#[cfg(not(feature = "parallel"))]
fn apply_union_parallel(
    selectors: &[Selector],
    resources: &Resources,
    root: &Value,
    path: &Arc<PathNode>,
    value: &Value,
    out: &mut Vec<Match>,
) -> Result<(), JsonPathError> {
    for selector in selectors {
        out.extend(selector.select_one(resources, root, path, value)?);
    }
    Ok(())
}

fn collect_recursive(
    selectors: &[Selector],
    resources: &Resources,
    root: &Value,
    path: &Arc<PathNode>,
    current: &Value,
    depth: usize,
    out: &mut Vec<Match>,
) -> Result<(), JsonPathError> {
    resources.check_depth(depth)?;
    apply_union(selectors, resources, root, path, current, out)?;
    match current {
        Value::Object(props) => {
            for (k, v) in props {
                collect_recursive(selectors, resources, root, &path.child_name(k), v, depth + 1, out)?;
            }
        }
        Value::Array(items) => {
            for (i, v) in items.iter().enumerate() {
                collect_recursive(selectors, resources, root, &path.child_index(i), v, depth + 1, out)?;
            }
        }
        _ => {}
    }
    Ok(())
}

/// Run a subquery's segments and fold the matches into a single value:
/// `Undefined` for zero matches, the bare value for exactly one, or a
/// synthetic `Array` wrapping every match when there is more than one.
pub fn try_evaluate(
    segments: &[Segment],
    resources: &Resources,
    root: &Value,
    start_path: &Arc<PathNode>,
    start_value: &Value,
) -> Value {
    match evaluate_segments(segments, resources, root, start_path, start_value) {
        Ok(mut matches) => match matches.len() {
            0 => Value::Undefined,
            1 => matches.pop().unwrap().1,
            _ => Value::Array(matches.into_iter().map(|(_, v)| v).collect()),
        },
        Err(_) => Value::Undefined,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::resources::Options;
    use serde_json::json;

    fn eval(jp: &JsonPath, doc: &serde_json::Value) -> Vec<(String, Value)> {
        let root = Value::from_json(doc);
        let resources = Resources::new(Options::default());
        evaluate_segments(&jp.segments, &resources, &root, &PathNode::root(), &root)
            .unwrap()
            .into_iter()
            .map(|(p, v)| (p.to_location().to_normalized_string(), v))
            .collect()
    }

    #[test]
    fn wildcard_then_identifier() {
        let doc = json!({"books": [{"title": "a"}, {"title": "b"}]});
        let jp = JsonPath {
            segments: vec![
                Segment { selectors: vec![Selector::Identifier("books".into())], recursive: false },
                Segment { selectors: vec![Selector::Wildcard], recursive: false },
                Segment { selectors: vec![Selector::Identifier("title".into())], recursive: false },
            ],
        };
        let results = eval(&jp, &doc);
        assert_eq!(results.len(), 2);
        assert_eq!(results[0].0, "$['books'][0]['title']");
    }

    #[test]
    fn negative_index_and_out_of_range() {
        let doc = json!([1, 2, 3]);
        let last = JsonPath { segments: vec![Segment { selectors: vec![Selector::Index(-1)], recursive: false }] };
        let results = eval(&last, &doc);
        assert_eq!(results.len(), 1);

        let none = JsonPath { segments: vec![Segment { selectors: vec![Selector::Index(-4)], recursive: false }] };
        assert!(eval(&none, &doc).is_empty());
    }

    #[test]
    fn reverse_step_slice_clamps_start_to_last_valid_index() {
        // $[5:1:-2] on a 3-element array: start clamps to len-1 (2), not
        // len (3), so index 2 is reachable and emitted.
        let doc = json!([1, 2, 3]);
        let jp = JsonPath {
            segments: vec![Segment {
                selectors: vec![Selector::Slice { start: Some(5), stop: Some(1), step: -2 }],
                recursive: false,
            }],
        };
        let results = eval(&jp, &doc);
        assert_eq!(results.len(), 1);
        assert!(results[0].1.deep_eq(&Value::from_json(&json!(3))));
    }

    #[test]
    fn max_depth_exceeded_on_recursive_descent() {
        let doc = json!({"a": {"b": {"c": {"d": 1}}}});
        let root = Value::from_json(&doc);
        let resources = Resources::new(Options { max_depth: 1, ..Options::default() });
        let jp = Segment { selectors: vec![Selector::Identifier("d".into())], recursive: true };
        let err = evaluate_segments(&[jp], &resources, &root, &PathNode::root(), &root).unwrap_err();
        assert!(matches!(err, JsonPathError::MaxDepthExceeded { max_depth: 1 }));
    }
}
