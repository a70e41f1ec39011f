//! An extended JSONPath implementation: root/current anchors, dot and
//! bracket navigation, recursive descent, wildcards, unions, slices,
//! filter predicates with a full expression language, built-in
//! functions, and an ancestor (`^`) operator for stepping back up a
//! match's own path.
//!
//! # Example
//!
//! ```
//! use jsonpath_joy::{parse, select_values, Options};
//! use serde_json::json;
//!
//! let path = parse("$.store.books[?(@.price < 10)].title").unwrap();
//!
//! let doc = json!({
//!     "store": {
//!         "books": [
//!             {"title": "Sayings of the Century", "price": 8.95},
//!             {"title": "Sword of Honour", "price": 12.99}
//!         ]
//!     }
//! });
//!
//! let titles = select_values(&path, &doc, Options::default()).unwrap();
//! assert_eq!(titles, vec![json!("Sayings of the Century")]);
//! ```

mod driver;
mod error;
mod expr;
mod functions;
mod operators;
mod parser;
mod path;
mod resources;
mod selector;
mod token;
mod value;

pub use driver::{select_nodes, select_paths, select_values};
pub use error::{JsonPathError, JsonPathParseError};
pub use parser::JsonPathParser;
pub use resources::{ExecutionMode, Options};
pub use selector::{JsonPath, Segment, Selector};
pub use value::{Kind, Value};

/// Parse a JSONPath query string. The returned [`JsonPath`] can be
/// reused against any number of documents and option sets.
pub fn parse(input: &str) -> Result<JsonPath, JsonPathParseError> {
    JsonPathParser::parse(input)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn bookstore() -> serde_json::Value {
        json!({
            "store": {
                "books": [
                    {"category": "fiction", "author": "Nigel Rees", "title": "Sayings of the Century", "price": 8.95},
                    {"category": "fiction", "author": "Evelyn Waugh", "title": "Sword of Honour", "price": 12.99},
                    {"category": "reference", "author": "Herman Melville", "title": "Moby Dick", "price": 8.99}
                ],
                "bicycle": {"color": "red", "price": 19.95}
            }
        })
    }

    #[test]
    fn end_to_end_filter_and_projection() {
        let doc = bookstore();
        let path = parse("$.store.books[?(@.price < 10)].title").unwrap();
        let titles = select_values(&path, &doc, Options::default()).unwrap();
        assert_eq!(titles, vec![json!("Sayings of the Century"), json!("Moby Dick")]);
    }

    #[test]
    fn end_to_end_recursive_descent_for_all_authors() {
        let doc = bookstore();
        let path = parse("$..author").unwrap();
        let authors = select_values(&path, &doc, Options::default()).unwrap();
        assert_eq!(authors.len(), 3);
    }

    #[test]
    fn end_to_end_union_and_slice() {
        let doc = bookstore();
        let path = parse("$.store.books[0:2]").unwrap();
        let values = select_values(&path, &doc, Options::default()).unwrap();
        assert_eq!(values.len(), 2);
    }

    #[test]
    fn parse_error_reports_position() {
        let err = parse("$.store[").unwrap_err();
        assert_eq!(err.line, 1);
    }

    #[test]
    fn select_nodes_pairs_normalized_path_with_value() {
        let doc = bookstore();
        let path = parse("$.store.bicycle.color").unwrap();
        let nodes = select_nodes(&path, &doc, Options::default()).unwrap();
        assert_eq!(nodes, vec![("$['store']['bicycle']['color']".to_string(), json!("red"))]);
    }
}
