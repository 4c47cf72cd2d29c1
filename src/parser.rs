//! The parsing state machine. A [Parser] makes a single left-to-right pass over a slice of
//! input symbols, with one symbol of lookahead and no backtracking, and builds a [Value] tree.
//!
//! The first failure aborts the parse: it is recorded in the parser (see
//! [Parser::last_error]) and handed back to the caller as a [ParserError]. There is no error
//! recovery, nested failures simply propagate up through every enclosing construct.
//!
//! The current implementation of the parser is *not* internally thread safe.
use std::marker::PhantomData;

use crate::coords::Coords;
use crate::errors::{Details, ErrorCode, ParserResult};
use crate::grammar::{Grammar, JsonGrammar};
use crate::parser_error;
use crate::symbols::{Symbol, Text};
use crate::value::Value;
use crate::Kind;

/// Main JSON parser struct
pub struct Parser<'a, T: Text = String, G = JsonGrammar> {
    /// The complete input
    input: &'a [T::Symbol],
    /// Current position within the input
    coords: Coords,
    /// The first error encountered, if any
    last_error: ErrorCode,
    grammar: PhantomData<G>,
}

impl<'a, T: Text, G: Grammar<T::Symbol>> Parser<'a, T, G> {
    /// Create a new parser positioned at the start of `input`
    pub fn new(input: &'a [T::Symbol]) -> Self {
        Parser {
            input,
            coords: Coords::default(),
            last_error: ErrorCode::Success,
            grammar: PhantomData,
        }
    }

    /// Scan forward to the next object-begin symbol, and parse the object it opens. Anything
    /// before the object is skipped.
    ///
    /// The parser keeps its position once this returns, so calling it again reads the next
    /// object in the input.
    pub fn parse_object_expected(&mut self) -> ParserResult<Value<T, G>> {
        tracing::trace!(start = %self.coords, "scanning for object");
        let result = if self.scan_to(G::is_object_begin) {
            self.advance();
            self.parse_object()
        } else {
            self.fail(Details::ObjectExpected)
        };
        self.trace_result(&result);
        result
    }

    /// As for [Parser::parse_object_expected], but looks for an array
    pub fn parse_array_expected(&mut self) -> ParserResult<Value<T, G>> {
        tracing::trace!(start = %self.coords, "scanning for array");
        let result = if self.scan_to(G::is_array_begin) {
            self.advance();
            self.parse_array()
        } else {
            self.fail(Details::ArrayExpected)
        };
        self.trace_result(&result);
        result
    }

    /// The current (zero-based) line
    pub fn line(&self) -> usize {
        self.coords.line
    }

    /// The current (zero-based) column
    pub fn column(&self) -> usize {
        self.coords.column
    }

    pub fn coords(&self) -> Coords {
        self.coords
    }

    /// The first error encountered, or [ErrorCode::Success]
    pub fn last_error(&self) -> ErrorCode {
        self.last_error
    }

    fn trace_result(&self, result: &ParserResult<Value<T, G>>) {
        if let Ok(value) = result {
            tracing::debug!(
                kind = ?value.kind(),
                children = value.children().len(),
                line = self.coords.line,
                column = self.coords.column,
                "parsed document"
            );
        }
    }

    /// Record a failure at the current position
    fn fail<V>(&mut self, details: Details) -> ParserResult<V> {
        self.fail_at(details, self.coords)
    }

    fn fail_at<V>(&mut self, details: Details, coords: Coords) -> ParserResult<V> {
        if self.last_error == ErrorCode::Success {
            self.last_error = details.code();
        }
        tracing::debug!(%details, code = %details.code(), at = %coords, "parse failed");
        parser_error!(details, coords)
    }

    /// The lookahead symbol
    fn peek(&self) -> Option<T::Symbol> {
        self.input.get(self.coords.absolute).copied()
    }

    /// Consume the lookahead symbol
    fn advance(&mut self) {
        if let Some(c) = self.peek() {
            self.coords.advance(G::is_newline(c));
        }
    }

    /// Advance until `target` matches the lookahead, without consuming it. False if the input
    /// runs out first.
    fn scan_to(&mut self, target: fn(T::Symbol) -> bool) -> bool {
        while let Some(c) = self.peek() {
            if target(c) {
                return true;
            }
            self.advance();
        }
        false
    }

    /// Skip whitespace and return the next significant symbol, if there is one
    fn skip_whitespace(&mut self) -> Option<T::Symbol> {
        while let Some(c) = self.peek() {
            if !c.is_space() {
                return Some(c);
            }
            self.advance();
        }
        None
    }

    /// Consume a maximal run of symbols matching `predicate`, returning how many were taken
    fn take_while(&mut self, predicate: impl Fn(T::Symbol) -> bool) -> usize {
        let start = self.coords.absolute;
        while let Some(c) = self.peek() {
            if !predicate(c) {
                break;
            }
            self.advance();
        }
        self.coords.absolute - start
    }

    /// Dispatch on the lookahead symbol and parse whichever value it starts
    fn parse_value(&mut self) -> ParserResult<Value<T, G>> {
        let c = match self.peek() {
            Some(c) => c,
            None => return self.fail(Details::ValueExpected),
        };
        if c.is_alpha() {
            self.parse_keyword()
        } else if G::is_string_begin(c) {
            self.advance();
            Ok(Value::string(self.parse_string_literal()?))
        } else if G::is_array_begin(c) {
            self.advance();
            self.parse_array()
        } else if G::is_object_begin(c) {
            self.advance();
            self.parse_object()
        } else if c.is_digit() || G::is_minus(c) {
            Ok(Value::number(self.parse_number()))
        } else {
            self.fail(Details::UnexpectedCharacter(c.to_char()))
        }
    }

    fn parse_keyword(&mut self) -> ParserResult<Value<T, G>> {
        let input = self.input;
        let start = self.coords;
        self.take_while(|c| c.is_alpha());
        let word = &input[start.absolute..self.coords.absolute];
        match G::classify_keyword(word) {
            Kind::Invalid => {
                let text = T::from_symbols(word).to_utf8().into_owned();
                self.fail_at(Details::UnknownKeyword(text), start)
            }
            kind => Ok(Value::with_data(T::from_symbols(word), kind)),
        }
    }

    /// Consume the body of a string literal, up to and including the first string-end symbol
    /// that isn't escaped. The opening delimiter has already been consumed. Escape sequences are
    /// kept exactly as they appear in the input.
    fn parse_string_literal(&mut self) -> ParserResult<T> {
        let start = self.coords.absolute;
        let mut escaped = false;
        while let Some(c) = self.peek() {
            if !escaped && G::is_string_end(c) {
                let text = T::from_symbols(&self.input[start..self.coords.absolute]);
                self.advance();
                return Ok(text);
            }
            escaped = !escaped && G::is_escape(c);
            self.advance();
        }
        self.fail(Details::UnterminatedString)
    }

    /// Numbers are an optional minus, an integer part, an optional fraction and an optional
    /// exponent. If a decimal point or exponent marker isn't followed by any digits, scanning
    /// stops straight after the marker.
    ///
    /// The exponent may also carry a `+` or `-` sign. This goes beyond the minimal grammar,
    /// which only expects digits after the marker, so that `1e-5` reads as a single number.
    fn parse_number(&mut self) -> T {
        let start = self.coords.absolute;
        if self.peek().map_or(false, G::is_minus) {
            self.advance();
        }
        self.take_while(|c| c.is_digit());
        if self.peek().map_or(false, G::is_decimal_point) {
            self.advance();
            if self.take_while(|c| c.is_digit()) == 0 {
                return self.number_text(start);
            }
        }
        if self.peek().map_or(false, G::is_exponent) {
            self.advance();
            if self.peek().map_or(false, |c| G::is_minus(c) || G::is_plus(c)) {
                self.advance();
            }
            self.take_while(|c| c.is_digit());
        }
        self.number_text(start)
    }

    fn number_text(&self, start: usize) -> T {
        T::from_symbols(&self.input[start..self.coords.absolute])
    }

    /// An array is a list of comma separated values. The array-begin symbol has already been
    /// consumed.
    fn parse_array(&mut self) -> ParserResult<Value<T, G>> {
        let mut array = Value::new(Kind::Array);
        let mut comma_expected = false;
        loop {
            let c = match self.skip_whitespace() {
                Some(c) => c,
                None => return self.fail(Details::UnterminatedArray),
            };
            if G::is_array_end(c) {
                self.advance();
                return Ok(array);
            }
            if comma_expected {
                if !G::is_comma(c) {
                    return self.fail(Details::CommaExpected(c.to_char()));
                }
                self.advance();
                comma_expected = false;
                continue;
            }
            array.add_child(self.parse_value()?);
            comma_expected = true;
        }
    }

    /// An object is a list of comma separated key/value pairs. The object-begin symbol has
    /// already been consumed.
    fn parse_object(&mut self) -> ParserResult<Value<T, G>> {
        let mut object = Value::new(Kind::Object);
        let mut comma_expected = false;
        loop {
            let c = match self.skip_whitespace() {
                Some(c) => c,
                None => return self.fail(Details::UnterminatedObject),
            };
            if G::is_object_end(c) {
                self.advance();
                return Ok(object);
            }
            if comma_expected {
                if !G::is_comma(c) {
                    return self.fail(Details::CommaExpected(c.to_char()));
                }
                self.advance();
                comma_expected = false;
                continue;
            }
            object.add_child(self.parse_pair()?);
            comma_expected = true;
        }
    }

    /// Parse a single `key : value` member, returning the key with its value attached
    fn parse_pair(&mut self) -> ParserResult<Value<T, G>> {
        match self.skip_whitespace() {
            Some(c) if G::is_string_begin(c) => self.advance(),
            Some(c) => return self.fail(Details::KeyExpected(c.to_char())),
            None => return self.fail(Details::UnterminatedObject),
        }
        let mut key = Value::with_data(self.parse_string_literal()?, Kind::Key);
        match self.skip_whitespace() {
            Some(c) if G::is_colon(c) => self.advance(),
            Some(c) => return self.fail(Details::ColonExpected(c.to_char())),
            None => return self.fail(Details::UnterminatedObject),
        }
        self.skip_whitespace();
        key.add_child(self.parse_value()?);
        Ok(key)
    }
}

#[cfg(test)]
mod tests {
    use crate::errors::{Details, ErrorCode};
    use crate::grammar::AngleGrammar;
    use crate::parser::Parser;
    use crate::Kind;

    fn chars(input: &str) -> Vec<char> {
        input.chars().collect()
    }

    #[test]
    fn should_parse_empty_containers() {
        let input = chars("{}");
        let mut parser: Parser = Parser::new(&input);
        let object = parser.parse_object_expected().unwrap();
        assert_eq!(object.kind(), Kind::Object);
        assert!(object.children().is_empty());

        let input = chars("  [ ]");
        let mut parser: Parser = Parser::new(&input);
        let array = parser.parse_array_expected().unwrap();
        assert_eq!(array.kind(), Kind::Array);
        assert!(array.children().is_empty());
    }

    #[test]
    fn should_skip_leading_content_before_the_root() {
        let input = chars("garbage {\"a\":1}");
        let mut parser: Parser = Parser::new(&input);
        let object = parser.parse_object_expected().unwrap();
        assert_eq!(object.get("a").unwrap().data(), "1");
    }

    #[test]
    fn should_parse_numbers() {
        let cases = [
            ("0", "0"),
            ("-12", "-12"),
            ("3.25", "3.25"),
            ("1e10", "1e10"),
            ("6.02E23", "6.02E23"),
            ("1e-5", "1e-5"),
            ("2.5e+3", "2.5e+3"),
            ("1.", "1."),
        ];
        for (text, expected) in cases {
            let input = chars(&format!("[{}]", text));
            let mut parser: Parser = Parser::new(&input);
            let array = parser.parse_array_expected().unwrap();
            let number = &array.children()[0];
            assert_eq!(number.kind(), Kind::Number);
            assert_eq!(number.data(), expected);
        }
    }

    #[test]
    fn should_stop_numbers_after_a_bare_decimal_point() {
        let input = chars("[1.e5]");
        let mut parser: Parser = Parser::new(&input);
        let err = parser.parse_array_expected().unwrap_err();
        assert_eq!(err.details, Details::CommaExpected('e'));
        assert_eq!(err.column(), 3);
    }

    #[test]
    fn should_keep_escape_sequences_verbatim() {
        let input = chars(r#"{"quote":"say \"hi\"","slash":"a\\","unicode":"é"}"#);
        let mut parser: Parser = Parser::new(&input);
        let object = parser.parse_object_expected().unwrap();
        assert_eq!(object.get("quote").unwrap().data(), r#"say \"hi\""#);
        assert_eq!(object.get("slash").unwrap().data(), r"a\\");
        assert_eq!(object.get("unicode").unwrap().data(), r"é");
    }

    #[test]
    fn should_allow_empty_strings_and_keys() {
        let input = chars(r#"{"":""}"#);
        let mut parser: Parser = Parser::new(&input);
        let object = parser.parse_object_expected().unwrap();
        assert_eq!(object.get("").unwrap().kind(), Kind::String);
        assert_eq!(object.to_string(), r#"{"":""}"#);
    }

    #[test]
    fn should_report_unknown_keywords_at_their_start() {
        let input = chars("{\"a\": nope}");
        let mut parser: Parser = Parser::new(&input);
        let err = parser.parse_object_expected().unwrap_err();
        assert_eq!(err.details, Details::UnknownKeyword("nope".to_string()));
        assert_eq!(err.column(), 6);
        assert_eq!(parser.last_error(), ErrorCode::Unexpected);
        assert_eq!(parser.column(), 10);
    }

    #[test]
    fn should_report_missing_colons_and_keys() {
        let input = chars("{\"a\" 1}");
        let mut parser: Parser = Parser::new(&input);
        let err = parser.parse_object_expected().unwrap_err();
        assert_eq!(err.details, Details::ColonExpected('1'));

        let input = chars("{a: 1}");
        let mut parser: Parser = Parser::new(&input);
        let err = parser.parse_object_expected().unwrap_err();
        assert_eq!(err.details, Details::KeyExpected('a'));
        assert_eq!(err.code(), ErrorCode::Unexpected);
    }

    #[test]
    fn should_report_missing_commas() {
        let input = chars("[1 2]");
        let mut parser: Parser = Parser::new(&input);
        let err = parser.parse_array_expected().unwrap_err();
        assert_eq!(err.details, Details::CommaExpected('2'));
        assert_eq!(err.column(), 3);
    }

    #[test]
    fn should_accept_a_trailing_comma() {
        let input = chars("[1,]");
        let mut parser: Parser = Parser::new(&input);
        let array = parser.parse_array_expected().unwrap();
        assert_eq!(array.children().len(), 1);
    }

    #[test]
    fn should_report_end_of_input() {
        let cases = [
            ("", Details::ObjectExpected),
            ("   ", Details::ObjectExpected),
            ("{", Details::UnterminatedObject),
            ("{\"a\"", Details::UnterminatedObject),
            ("{\"a\":", Details::ValueExpected),
            ("{\"a\":  ", Details::ValueExpected),
            ("{\"a", Details::UnterminatedString),
            ("{\"a\":[1,", Details::UnterminatedArray),
        ];
        for (text, expected) in cases {
            let input = chars(text);
            let mut parser: Parser = Parser::new(&input);
            let err = parser.parse_object_expected().unwrap_err();
            assert_eq!(err.details, expected, "input: {:?}", text);
            assert_eq!(parser.last_error(), ErrorCode::EndOfInput);
            assert_eq!(err.coords.absolute, input.len());
        }
    }

    #[test]
    fn should_track_lines_and_columns() {
        let input = chars("{\n  \"a\": 1,\n  \"b\": ?\n}");
        let mut parser: Parser = Parser::new(&input);
        let err = parser.parse_object_expected().unwrap_err();
        assert_eq!(err.details, Details::UnexpectedCharacter('?'));
        assert_eq!((err.line(), err.column()), (2, 7));
        assert_eq!((parser.line(), parser.column()), (2, 7));
    }

    #[test]
    fn should_count_newlines_inside_strings() {
        let input = chars("{\"a\":\"x\ny\", !}");
        let mut parser: Parser = Parser::new(&input);
        let err = parser.parse_object_expected().unwrap_err();
        assert_eq!(err.details, Details::KeyExpected('!'));
        assert_eq!((err.line(), err.column()), (1, 4));
    }

    #[test]
    fn should_read_consecutive_documents() {
        let input = chars("{\"a\":1} {\"b\":2}");
        let mut parser: Parser = Parser::new(&input);
        let first = parser.parse_object_expected().unwrap();
        let second = parser.parse_object_expected().unwrap();
        assert!(first.get("a").is_some());
        assert!(second.get("b").is_some());
        assert_eq!(
            parser.parse_object_expected().unwrap_err().details,
            Details::ObjectExpected
        );
    }

    #[test]
    fn should_keep_the_first_error() {
        let input = chars("{\"a\": x} ");
        let mut parser: Parser = Parser::new(&input);
        assert!(parser.parse_object_expected().is_err());
        assert_eq!(parser.last_error(), ErrorCode::Unexpected);
        assert!(parser.parse_object_expected().is_err());
        assert_eq!(parser.last_error(), ErrorCode::Unexpected);
    }

    #[test]
    fn should_parse_with_angle_delimiters() {
        let input = chars("{<k>: [<v>, <w\\>>]}");
        let mut parser: Parser<String, AngleGrammar> = Parser::new(&input);
        let object = parser.parse_object_expected().unwrap();
        let items = object.get("k").unwrap().children();
        assert_eq!(items[0].data(), "v");
        assert_eq!(items[1].data(), "w\\>");
        assert_eq!(object.encode(), "{<k>:[<v>,<w\\>>]}");
    }

    #[test]
    fn should_parse_narrow_input() {
        let input = br#"{"n":[true,false,null,-1.5]}"#;
        let mut parser: Parser<Vec<u8>> = Parser::new(input);
        let object = parser.parse_object_expected().unwrap();
        let key = b"n".to_vec();
        let items = object.get(&key).unwrap().children();
        let kinds: Vec<Kind> = items.iter().map(|v| v.kind()).collect();
        assert_eq!(kinds, [Kind::True, Kind::False, Kind::Null, Kind::Number]);
        assert_eq!(object.encode(), input.to_vec());
    }
}
