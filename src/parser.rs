//! Tokenizer and grammar.
//!
//! The outer path grammar (segments, unions, brackets, recursive
//! descent, the ancestor operator) is a straightforward recursive
//! descent over a `char`-at-a-time cursor, in the same style as the
//! original JSONPath parser this crate grew from. Filter and function
//! argument expressions are built by a dedicated precedence-climbing
//! descent (`parse_or` down to `parse_primary`) that emits tokens in
//! postfix order directly: each level appends its left operand's
//! tokens, then its right operand's, then its own operator, which is
//! exactly what a shunting-yard assembler would hand to the evaluator,
//! without needing an explicit operator stack.

use std::collections::HashMap;

use crate::error::JsonPathParseError;
use crate::functions;
use crate::operators::{BinaryOperator, UnaryOperator};
use crate::selector::{JsonPath, Segment, Selector};
use crate::token::{Expression, Token};
use crate::value::{NumberValue, Value};

pub struct JsonPathParser<'a> {
    input: &'a str,
    pos: usize,
    line: usize,
    col: usize,
    root_query_ids: HashMap<&'a str, u64>,
    next_root_id: u64,
}

impl<'a> JsonPathParser<'a> {
    pub fn parse(input: &'a str) -> Result<JsonPath, JsonPathParseError> {
        let mut parser = Self {
            input,
            pos: 0,
            line: 1,
            col: 1,
            root_query_ids: HashMap::new(),
            next_root_id: 0,
        };
        parser.expect('$')?;
        let segments = parser.parse_segments(true)?;
        parser.skip_whitespace();
        if !parser.is_at_end() {
            return Err(parser.error(format!("unexpected trailing input: {:?}", &parser.input[parser.pos..])));
        }
        Ok(JsonPath { segments })
    }

    // --- path grammar -------------------------------------------------

    /// Parse zero or more `.name` / `.* ` / `..selector` / `[...]` / `^`
    /// segments. `top_level` only affects nothing structurally; it is
    /// kept so a future caller parsing a bare sub-path can distinguish
    /// intent in error messages.
    fn parse_segments(&mut self, _top_level: bool) -> Result<Vec<Segment>, JsonPathParseError> {
        let mut segments = Vec::new();
        loop {
            match self.peek() {
                Some('.') => {
                    self.advance();
                    if self.peek() == Some('.') {
                        self.advance();
                        let selectors = self.parse_recursive_selectors()?;
                        segments.push(Segment { selectors, recursive: true });
                    } else if self.peek() == Some('*') {
                        self.advance();
                        segments.push(Segment { selectors: vec![Selector::Wildcard], recursive: false });
                    } else {
                        let name = self.parse_identifier()?;
                        segments.push(Segment { selectors: vec![Selector::Identifier(name)], recursive: false });
                    }
                }
                Some('[') => {
                    let selectors = self.parse_bracket_selectors()?;
                    segments.push(Segment { selectors, recursive: false });
                }
                Some('^') => {
                    let mut depth = 0usize;
                    while self.peek() == Some('^') {
                        self.advance();
                        depth += 1;
                    }
                    segments.push(Segment { selectors: vec![Selector::Parent(depth)], recursive: false });
                }
                _ => break,
            }
        }
        Ok(segments)
    }

    fn parse_recursive_selectors(&mut self) -> Result<Vec<Selector>, JsonPathParseError> {
        match self.peek() {
            Some('*') => {
                self.advance();
                Ok(vec![Selector::Wildcard])
            }
            Some('[') => self.parse_bracket_selectors(),
            None => Ok(vec![Selector::Wildcard]),
            _ => {
                let name = self.parse_identifier()?;
                Ok(vec![Selector::Identifier(name)])
            }
        }
    }

    fn parse_bracket_selectors(&mut self) -> Result<Vec<Selector>, JsonPathParseError> {
        self.expect('[')?;
        let mut selectors = Vec::new();
        loop {
            self.skip_whitespace();
            if self.peek() == Some(']') {
                self.advance();
                break;
            }
            selectors.push(self.parse_bracket_selector()?);
            self.skip_whitespace();
            match self.peek() {
                Some(',') => {
                    self.advance();
                }
                Some(']') => {
                    self.advance();
                    break;
                }
                other => return Err(self.error(format!("expected ',' or ']', found {other:?}"))),
            }
        }
        Ok(selectors)
    }

    fn parse_bracket_selector(&mut self) -> Result<Selector, JsonPathParseError> {
        match self.peek() {
            Some('\'') | Some('"') => Ok(Selector::Identifier(self.parse_string()?)),
            Some('*') => {
                self.advance();
                Ok(Selector::Wildcard)
            }
            Some('?') => {
                self.advance();
                self.skip_whitespace();
                // Both `[?(expr)]` and the bare `[?expr]` form are
                // accepted; the wrapping parens are optional, not
                // required.
                let wrapped = self.peek() == Some('(');
                if wrapped {
                    self.advance();
                    self.skip_whitespace();
                }
                let expr = self.parse_or()?;
                self.skip_whitespace();
                if wrapped {
                    self.expect(')')?;
                }
                Ok(Selector::Filter(expr))
            }
            Some('^') => {
                let mut depth = 0usize;
                while self.peek() == Some('^') {
                    self.advance();
                    depth += 1;
                }
                Ok(Selector::Parent(depth))
            }
            Some(':') | Some('-') | Some('0'..='9') => self.parse_index_or_slice(),
            other => Err(self.error(format!("invalid selector start {other:?}"))),
        }
    }

    fn parse_index_or_slice(&mut self) -> Result<Selector, JsonPathParseError> {
        let start = self.parse_optional_signed_int()?;
        if self.peek() == Some(':') {
            self.advance();
            let stop = self.parse_optional_signed_int()?;
            let step = if self.peek() == Some(':') {
                self.advance();
                self.parse_optional_signed_int()?.unwrap_or(1)
            } else {
                1
            };
            Ok(Selector::Slice { start, stop, step })
        } else {
            Ok(Selector::Index(start.unwrap_or(0)))
        }
    }

    fn parse_optional_signed_int(&mut self) -> Result<Option<isize>, JsonPathParseError> {
        self.skip_whitespace();
        if matches!(self.peek(), Some('0'..='9') | Some('-')) {
            Ok(Some(self.parse_signed_int()?))
        } else {
            Ok(None)
        }
    }

    fn parse_signed_int(&mut self) -> Result<isize, JsonPathParseError> {
        let start = self.pos;
        if self.peek() == Some('-') {
            self.advance();
        }
        let digits_start = self.pos;
        while matches!(self.peek(), Some('0'..='9')) {
            self.advance();
        }
        if self.pos == digits_start {
            return Err(self.error("expected a digit"));
        }
        self.input[start..self.pos].parse::<isize>().map_err(|_| self.error("integer out of range"))
    }

    fn parse_identifier(&mut self) -> Result<String, JsonPathParseError> {
        let start = self.pos;
        while let Some(c) = self.peek() {
            if c.is_alphanumeric() || c == '_' || c == '-' {
                self.advance();
            } else {
                break;
            }
        }
        if self.pos == start {
            return Err(self.error("expected an identifier"));
        }
        Ok(self.input[start..self.pos].to_string())
    }

    fn parse_string(&mut self) -> Result<String, JsonPathParseError> {
        let quote = self.peek().ok_or_else(|| self.error("unterminated string"))?;
        self.advance();
        let mut result = String::new();
        loop {
            match self.peek() {
                None => return Err(self.error("unterminated string")),
                Some(c) if c == quote => {
                    self.advance();
                    break;
                }
                Some('\\') => {
                    self.advance();
                    match self.peek() {
                        Some('n') => result.push('\n'),
                        Some('t') => result.push('\t'),
                        Some('r') => result.push('\r'),
                        Some('b') => result.push('\u{8}'),
                        Some('f') => result.push('\u{c}'),
                        Some('/') => result.push('/'),
                        Some('\\') => result.push('\\'),
                        Some('\'') => result.push('\''),
                        Some('"') => result.push('"'),
                        Some('u') => {
                            self.advance();
                            let code = self.parse_unicode_escape()?;
                            result.push(code);
                            continue;
                        }
                        other => return Err(self.error(format!("invalid escape sequence \\{other:?}"))),
                    }
                    self.advance();
                }
                Some(c) => {
                    result.push(c);
                    self.advance();
                }
            }
        }
        Ok(result)
    }

    fn parse_unicode_escape(&mut self) -> Result<char, JsonPathParseError> {
        let high = self.parse_hex4()?;
        if (0xD800..=0xDBFF).contains(&high) && self.peek() == Some('\\') {
            let checkpoint = self.pos;
            self.advance();
            if self.peek() == Some('u') {
                self.advance();
                let low = self.parse_hex4()?;
                if (0xDC00..=0xDFFF).contains(&low) {
                    let combined = 0x10000 + ((high - 0xD800) << 10) + (low - 0xDC00);
                    return char::from_u32(combined).ok_or_else(|| self.error("invalid surrogate pair"));
                }
            }
            self.pos = checkpoint;
        }
        char::from_u32(high).ok_or_else(|| self.error("invalid \\u escape"))
    }

    fn parse_hex4(&mut self) -> Result<u32, JsonPathParseError> {
        let start = self.pos;
        for _ in 0..4 {
            if !matches!(self.peek(), Some(c) if c.is_ascii_hexdigit()) {
                return Err(self.error("expected 4 hex digits"));
            }
            self.advance();
        }
        u32::from_str_radix(&self.input[start..self.pos], 16).map_err(|_| self.error("invalid \\u escape"))
    }

    // --- expression grammar (tightest to loosest matches operators.rs) -

    fn parse_or(&mut self) -> Result<Expression, JsonPathParseError> {
        let mut left = self.parse_and()?;
        loop {
            self.skip_whitespace();
            if self.peek_str("||") {
                self.advance_by(2);
                self.skip_whitespace();
                left.extend(self.parse_and()?);
                left.push(Token::BinaryOp(BinaryOperator::Or));
            } else {
                break;
            }
        }
        Ok(left)
    }

    fn parse_and(&mut self) -> Result<Expression, JsonPathParseError> {
        let mut left = self.parse_equality()?;
        loop {
            self.skip_whitespace();
            if self.peek_str("&&") {
                self.advance_by(2);
                self.skip_whitespace();
                left.extend(self.parse_equality()?);
                left.push(Token::BinaryOp(BinaryOperator::And));
            } else {
                break;
            }
        }
        Ok(left)
    }

    fn parse_equality(&mut self) -> Result<Expression, JsonPathParseError> {
        let mut left = self.parse_relational()?;
        loop {
            self.skip_whitespace();
            let op = if self.peek_str("==") {
                Some((BinaryOperator::Eq, 2))
            } else if self.peek_str("!=") {
                Some((BinaryOperator::Ne, 2))
            } else {
                None
            };
            match op {
                Some((op, len)) => {
                    self.advance_by(len);
                    self.skip_whitespace();
                    left.extend(self.parse_relational()?);
                    left.push(Token::BinaryOp(op));
                }
                None => break,
            }
        }
        Ok(left)
    }

    fn parse_relational(&mut self) -> Result<Expression, JsonPathParseError> {
        let mut left = self.parse_additive()?;
        loop {
            self.skip_whitespace();
            let op = if self.peek_str("<=") {
                Some((BinaryOperator::Le, 2))
            } else if self.peek_str(">=") {
                Some((BinaryOperator::Ge, 2))
            } else if self.peek() == Some('<') {
                Some((BinaryOperator::Lt, 1))
            } else if self.peek() == Some('>') {
                Some((BinaryOperator::Gt, 1))
            } else {
                None
            };
            match op {
                Some((op, len)) => {
                    self.advance_by(len);
                    self.skip_whitespace();
                    left.extend(self.parse_additive()?);
                    left.push(Token::BinaryOp(op));
                }
                None => break,
            }
        }
        Ok(left)
    }

    fn parse_additive(&mut self) -> Result<Expression, JsonPathParseError> {
        let mut left = self.parse_multiplicative()?;
        loop {
            self.skip_whitespace();
            let op = match self.peek() {
                Some('+') => Some(BinaryOperator::Add),
                Some('-') => Some(BinaryOperator::Sub),
                _ => None,
            };
            match op {
                Some(op) => {
                    self.advance();
                    self.skip_whitespace();
                    left.extend(self.parse_multiplicative()?);
                    left.push(Token::BinaryOp(op));
                }
                None => break,
            }
        }
        Ok(left)
    }

    fn parse_multiplicative(&mut self) -> Result<Expression, JsonPathParseError> {
        let mut left = self.parse_regex()?;
        loop {
            self.skip_whitespace();
            let op = match self.peek() {
                Some('*') => Some(BinaryOperator::Mul),
                Some('/') => Some(BinaryOperator::Div),
                Some('%') => Some(BinaryOperator::Mod),
                _ => None,
            };
            match op {
                Some(op) => {
                    self.advance();
                    self.skip_whitespace();
                    left.extend(self.parse_regex()?);
                    left.push(Token::BinaryOp(op));
                }
                None => break,
            }
        }
        Ok(left)
    }

    fn parse_regex(&mut self) -> Result<Expression, JsonPathParseError> {
        let mut left = self.parse_unary()?;
        self.skip_whitespace();
        if self.peek_str("=~") {
            self.advance_by(2);
            self.skip_whitespace();
            let (pattern, case_insensitive) = self.parse_regex_literal()?;
            left.push(Token::Value(Value::String(pattern)));
            left.push(Token::BinaryOp(BinaryOperator::Regex { case_insensitive }));
        }
        Ok(left)
    }

    fn parse_regex_literal(&mut self) -> Result<(String, bool), JsonPathParseError> {
        self.expect('/')?;
        let mut pattern = String::new();
        loop {
            match self.peek() {
                None => return Err(self.error("unterminated regex literal")),
                Some('/') => {
                    self.advance();
                    break;
                }
                Some('\\') => {
                    self.advance();
                    if let Some(c) = self.peek() {
                        pattern.push('\\');
                        pattern.push(c);
                        self.advance();
                    }
                }
                Some(c) => {
                    pattern.push(c);
                    self.advance();
                }
            }
        }
        let case_insensitive = if self.peek() == Some('i') {
            self.advance();
            true
        } else {
            false
        };
        Ok((pattern, case_insensitive))
    }

    fn parse_unary(&mut self) -> Result<Expression, JsonPathParseError> {
        self.skip_whitespace();
        match self.peek() {
            Some('!') => {
                self.advance();
                self.skip_whitespace();
                let mut expr = self.parse_unary()?;
                expr.push(Token::UnaryOp(UnaryOperator::Not));
                Ok(expr)
            }
            Some('-') if !matches!(self.peek_at(1), Some('0'..='9')) => {
                self.advance();
                self.skip_whitespace();
                let mut expr = self.parse_unary()?;
                expr.push(Token::UnaryOp(UnaryOperator::Negate));
                Ok(expr)
            }
            _ => self.parse_primary(),
        }
    }

    fn parse_primary(&mut self) -> Result<Expression, JsonPathParseError> {
        self.skip_whitespace();
        match self.peek() {
            Some('(') => {
                self.advance();
                self.skip_whitespace();
                let expr = self.parse_or()?;
                self.skip_whitespace();
                self.expect(')')?;
                Ok(expr)
            }
            Some('@') => {
                self.advance();
                if matches!(self.peek(), Some('.') | Some('[') | Some('^')) {
                    let segments = self.parse_segments(false)?;
                    Ok(vec![Token::CurrentQuery(segments)])
                } else {
                    Ok(vec![Token::CurrentNode])
                }
            }
            Some('$') => {
                self.advance();
                let start = self.pos;
                let segments = self.parse_segments(false)?;
                let key = &self.input[start..self.pos];
                let id = *self.root_query_ids.entry(key).or_insert_with(|| {
                    let id = self.next_root_id;
                    self.next_root_id += 1;
                    id
                });
                Ok(vec![Token::RootQuery(id, segments)])
            }
            Some('\'') | Some('"') => {
                let s = self.parse_string()?;
                Ok(vec![Token::Value(Value::String(s))])
            }
            Some('/') => {
                // A bare regex literal is only meaningful on the right of
                // `=~`; `parse_regex` handles that case directly, so a
                // literal reached here is a syntax error.
                Err(self.error("unexpected regex literal"))
            }
            Some(c) if c.is_ascii_digit() || c == '-' => self.parse_number_literal(),
            Some(c) if c.is_ascii_lowercase() => {
                if self.peek_str("true") && !self.ident_continues_at(4) {
                    self.advance_by(4);
                    return Ok(vec![Token::Value(Value::True)]);
                }
                if self.peek_str("false") && !self.ident_continues_at(5) {
                    self.advance_by(5);
                    return Ok(vec![Token::Value(Value::False)]);
                }
                if self.peek_str("null") && !self.ident_continues_at(4) {
                    self.advance_by(4);
                    return Ok(vec![Token::Value(Value::Null)]);
                }
                self.parse_function_call()
            }
            other => Err(self.error(format!("unexpected character {other:?} in expression"))),
        }
    }

    fn ident_continues_at(&self, offset: usize) -> bool {
        matches!(self.peek_at(offset), Some(c) if c.is_alphanumeric() || c == '_')
    }

    fn parse_function_call(&mut self) -> Result<Expression, JsonPathParseError> {
        let start = self.pos;
        while matches!(self.peek(), Some(c) if c.is_alphanumeric() || c == '_') {
            self.advance();
        }
        let name = self.input[start..self.pos].to_string();
        let arity = functions::arity_of(&name).ok_or_else(|| self.error(format!("unknown function '{name}'")))?;
        self.skip_whitespace();
        self.expect('(')?;
        let mut args = Vec::new();
        self.skip_whitespace();
        if self.peek() != Some(')') {
            loop {
                self.skip_whitespace();
                args.push(self.parse_or()?);
                self.skip_whitespace();
                if self.peek() == Some(',') {
                    self.advance();
                } else {
                    break;
                }
            }
        }
        self.skip_whitespace();
        self.expect(')')?;
        if args.len() != arity {
            return Err(self.error(format!("'{name}' takes {arity} argument(s), found {}", args.len())));
        }
        let mut expr = Vec::new();
        for arg in args {
            expr.push(Token::Expression(arg));
            expr.push(Token::Argument);
        }
        expr.push(Token::Function(name));
        Ok(expr)
    }

    fn parse_number_literal(&mut self) -> Result<Expression, JsonPathParseError> {
        let start = self.pos;
        if self.peek() == Some('-') {
            self.advance();
        }
        if !matches!(self.peek(), Some('0'..='9')) {
            return Err(self.error("invalid number"));
        }
        while matches!(self.peek(), Some('0'..='9')) {
            self.advance();
        }
        if self.peek() == Some('.') && matches!(self.peek_at(1), Some('0'..='9')) {
            self.advance();
            while matches!(self.peek(), Some('0'..='9')) {
                self.advance();
            }
        }
        if matches!(self.peek(), Some('e') | Some('E')) {
            self.advance();
            if matches!(self.peek(), Some('+') | Some('-')) {
                self.advance();
            }
            if !matches!(self.peek(), Some('0'..='9')) {
                return Err(self.error("invalid exponent"));
            }
            while matches!(self.peek(), Some('0'..='9')) {
                self.advance();
            }
        }
        let text = &self.input[start..self.pos];
        let number = match text.parse::<rust_decimal::Decimal>() {
            Ok(d) => NumberValue::from_decimal(d),
            Err(_) => NumberValue::from_f64(text.parse::<f64>().map_err(|_| self.error("invalid number"))?),
        };
        Ok(vec![Token::Value(Value::number(number))])
    }

    // --- cursor primitives ---------------------------------------------

    fn peek(&self) -> Option<char> {
        self.input[self.pos..].chars().next()
    }

    fn peek_at(&self, n: usize) -> Option<char> {
        self.input[self.pos..].chars().nth(n)
    }

    fn peek_str(&self, s: &str) -> bool {
        self.input[self.pos..].starts_with(s)
    }

    fn advance(&mut self) {
        if let Some(c) = self.peek() {
            self.pos += c.len_utf8();
            if c == '\n' {
                self.line += 1;
                self.col = 1;
            } else {
                self.col += 1;
            }
        }
    }

    fn advance_by(&mut self, n: usize) {
        for _ in 0..n {
            self.advance();
        }
    }

    fn is_at_end(&self) -> bool {
        self.pos >= self.input.len()
    }

    fn expect(&mut self, expected: char) -> Result<(), JsonPathParseError> {
        if self.peek() == Some(expected) {
            self.advance();
            Ok(())
        } else {
            Err(self.error(format!("expected '{expected}', found {:?}", self.peek())))
        }
    }

    fn skip_whitespace(&mut self) {
        while matches!(self.peek(), Some(c) if c.is_whitespace()) {
            self.advance();
        }
    }

    fn error(&self, message: impl Into<String>) -> JsonPathParseError {
        JsonPathParseError::new(self.line, self.col, message)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_root_with_no_segments() {
        let path = JsonPathParser::parse("$").unwrap();
        assert!(path.segments.is_empty());
    }

    #[test]
    fn dot_and_bracket_notation_are_equivalent_shapes() {
        let a = JsonPathParser::parse("$.store.books").unwrap();
        let b = JsonPathParser::parse("$['store']['books']").unwrap();
        assert_eq!(a.segments.len(), b.segments.len());
        assert_eq!(a.segments.len(), 2);
    }

    #[test]
    fn recursive_descent_and_wildcard() {
        let path = JsonPathParser::parse("$..book[*].title").unwrap();
        assert_eq!(path.segments.len(), 3);
        assert!(path.segments[0].recursive);
    }

    #[test]
    fn slice_with_negative_step() {
        let path = JsonPathParser::parse("$.items[5:1:-2]").unwrap();
        match &path.segments[1].selectors[0] {
            Selector::Slice { start, stop, step } => {
                assert_eq!(*start, Some(5));
                assert_eq!(*stop, Some(1));
                assert_eq!(*step, -2);
            }
            other => panic!("{other:?}"),
        }
    }

    #[test]
    fn bare_filter_without_wrapping_parens_is_accepted() {
        let path = JsonPathParser::parse("$.books[?@.category=='memoir',?@.price>23].title").unwrap();
        assert_eq!(path.segments[1].selectors.len(), 2);
        for selector in &path.segments[1].selectors {
            assert!(matches!(selector, Selector::Filter(_)));
        }
    }

    #[test]
    fn filter_predicate_with_function_and_comparison() {
        let path = JsonPathParser::parse("$.books[?(@.price < 10 && length(@.title) > 0)]").unwrap();
        match &path.segments[1].selectors[0] {
            Selector::Filter(_) => {}
            other => panic!("{other:?}"),
        }
    }

    #[test]
    fn ancestor_operator_after_current() {
        let path = JsonPathParser::parse("$.books[?(@^.name == 'x')]").unwrap();
        let Selector::Filter(expr) = &path.segments[1].selectors[0] else { panic!() };
        assert!(expr.iter().any(|t| matches!(t, Token::CurrentQuery(segs) if matches!(segs[0].selectors[0], Selector::Parent(1)))));
    }

    #[test]
    fn unknown_function_is_a_parse_error() {
        let err = JsonPathParser::parse("$.books[?(nope(@.x) == 1)]").unwrap_err();
        assert!(err.message.contains("unknown function"));
    }

    #[test]
    fn arity_mismatch_is_a_parse_error() {
        let err = JsonPathParser::parse("$.books[?(abs(@.x, @.y) == 1)]").unwrap_err();
        assert!(err.message.contains("argument"));
    }

    #[test]
    fn repeated_root_subquery_shares_a_memo_id() {
        let path = JsonPathParser::parse("$.books[?($.limit == $.limit)]").unwrap();
        let Selector::Filter(expr) = &path.segments[1].selectors[0] else { panic!() };
        let ids: Vec<u64> = expr
            .iter()
            .filter_map(|t| match t {
                Token::RootQuery(id, _) => Some(*id),
                _ => None,
            })
            .collect();
        assert_eq!(ids, vec![0, 0]);
    }

    #[test]
    fn regex_literal_with_case_insensitive_flag() {
        let path = JsonPathParser::parse(r#"$.books[?(@.title =~ /^the/i)]"#).unwrap();
        let Selector::Filter(expr) = &path.segments[1].selectors[0] else { panic!() };
        assert!(expr.iter().any(|t| matches!(t, Token::BinaryOp(BinaryOperator::Regex { case_insensitive: true }))));
    }

    #[test]
    fn unicode_escape_with_surrogate_pair() {
        let path = JsonPathParser::parse("$['\\uD83D\\uDE00']").unwrap();
        match &path.segments[0].selectors[0] {
            Selector::Identifier(name) => assert_eq!(name, "\u{1F600}"),
            other => panic!("{other:?}"),
        }
    }

    #[test]
    fn literal_unicode_identifier_in_bracket_notation() {
        let path = JsonPathParser::parse("$['😀']").unwrap();
        match &path.segments[0].selectors[0] {
            Selector::Identifier(name) => assert_eq!(name, "😀"),
            other => panic!("{other:?}"),
        }
    }

    #[test]
    fn error_carries_line_and_column() {
        let err = JsonPathParser::parse("$.books[").unwrap_err();
        assert_eq!(err.line, 1);
        assert!(err.column > 1);
    }
}
