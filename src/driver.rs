//! The three public entry points: `select_values`, `select_paths`,
//! `select_nodes`. Each threads a parsed [`JsonPath`] against a host
//! document, then applies `NoDuplicates`/`SortByPath` post-processing
//! per [`ProcessingFlags`].

use crate::error::JsonPathError;
use crate::path::{Location, PathNode};
use crate::resources::{Options, Resources};
use crate::selector::{evaluate_segments, JsonPath};
use crate::value::Value;

fn run(path: &JsonPath, root: &serde_json::Value, options: Options) -> Result<Vec<(Location, Value)>, JsonPathError> {
    let resources = Resources::new(options);
    let root_value = Value::from_json(root);
    let matches = evaluate_segments(&path.segments, &resources, &root_value, &PathNode::root(), &root_value)?;
    let mut results: Vec<(Location, Value)> =
        matches.into_iter().map(|(node, value)| (node.to_location(), value)).collect();

    let flags = resources.flags();
    if flags.no_duplicates {
        let mut seen = std::collections::HashSet::new();
        results.retain(|(location, _)| seen.insert(location.clone()));
    }
    if flags.sort_by_path {
        results.sort_by(|(a, _), (b, _)| a.cmp(b));
    }
    Ok(results)
}

/// Evaluate `path` against `root`, returning the matched values in
/// document encounter order (or path order, if `options.sort` is set).
pub fn select_values(
    path: &JsonPath,
    root: &serde_json::Value,
    options: Options,
) -> Result<Vec<serde_json::Value>, JsonPathError> {
    Ok(run(path, root, options)?.into_iter().map(|(_, v)| v.to_json()).collect())
}

/// Evaluate `path` against `root`, returning each match's normalized
/// path string, e.g. `$['store']['books'][0]`.
pub fn select_paths(
    path: &JsonPath,
    root: &serde_json::Value,
    options: Options,
) -> Result<Vec<String>, JsonPathError> {
    Ok(run(path, root, options)?.into_iter().map(|(location, _)| location.to_normalized_string()).collect())
}

/// Evaluate `path` against `root`, returning `(normalized path, value)`
/// pairs for every match.
pub fn select_nodes(
    path: &JsonPath,
    root: &serde_json::Value,
    options: Options,
) -> Result<Vec<(String, serde_json::Value)>, JsonPathError> {
    Ok(run(path, root, options)?
        .into_iter()
        .map(|(location, value)| (location.to_normalized_string(), value.to_json()))
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::JsonPathParser;
    use serde_json::json;

    fn parse(s: &str) -> JsonPath {
        JsonPathParser::parse(s).unwrap()
    }

    #[test]
    fn select_values_returns_matches_in_encounter_order() {
        let doc = json!({"books": [{"title": "a"}, {"title": "b"}]});
        let path = parse("$.books[*].title");
        let values = select_values(&path, &doc, Options::default()).unwrap();
        assert_eq!(values, vec![json!("a"), json!("b")]);
    }

    #[test]
    fn select_paths_reports_normalized_strings() {
        let doc = json!({"a": [1, 2]});
        let path = parse("$.a[*]");
        let paths = select_paths(&path, &doc, Options::default()).unwrap();
        assert_eq!(paths, vec!["$['a'][0]", "$['a'][1]"]);
    }

    #[test]
    fn no_duplicates_collapses_overlapping_union_members() {
        let doc = json!([10, 20, 30]);
        let path = parse("$[0,0,1]");
        let options = Options { no_duplicates: true, ..Options::default() };
        let values = select_values(&path, &doc, options).unwrap();
        assert_eq!(values, vec![json!(10), json!(20)]);
    }

    #[test]
    fn sort_by_path_orders_names_before_indices() {
        let doc = json!({"a": 1, "0": 2});
        let path = parse("$[*]");
        let options = Options { sort: true, ..Options::default() };
        let paths = select_paths(&path, &doc, options).unwrap();
        assert_eq!(paths, vec!["$['0']", "$['a']"]);
    }

    #[test]
    fn filter_with_ancestor_operator_reaches_sibling_context() {
        let doc = json!({
            "books": [
                {"price": 8, "category": "fiction"},
                {"price": 22, "category": "fiction"}
            ]
        });
        let path = parse("$.books[?(@.price < 10)]^^.books[?(@.price > 20)]");
        let values = select_values(&path, &doc, Options::default()).unwrap();
        assert_eq!(values, vec![json!({"price": 22, "category": "fiction"})]);
    }

    #[test]
    fn max_depth_error_surfaces_through_select_values() {
        let doc = json!({"a": {"b": {"c": 1}}});
        let path = parse("$..c");
        let options = Options { max_depth: 0, ..Options::default() };
        let err = select_values(&path, &doc, options).unwrap_err();
        assert!(matches!(err, JsonPathError::MaxDepthExceeded { .. }));
    }

    #[test]
    fn no_match_returns_empty_not_an_error() {
        let doc = json!({"a": 1});
        let path = parse("$.missing");
        let values = select_values(&path, &doc, Options::default()).unwrap();
        assert!(values.is_empty());
    }
}
