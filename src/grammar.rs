//! Grammar traits. The parser and the serializer never hardcode a delimiter, they ask a
//! [Grammar] instead. Every function has a default matching standard JSON, so a custom
//! grammar only overrides the symbols it wants to change.
//!
//! Grammars are stateless: every item is an associated function, and the grammar in use is
//! chosen at compile time through a type parameter.
use crate::symbols::{matches_ascii, Symbol};
use crate::Kind;

/// The delimiter symbols and keyword rules consulted during parsing and encoding
pub trait Grammar<C: Symbol> {
    fn string_begin() -> C {
        C::from_ascii(b'"')
    }

    fn string_end() -> C {
        C::from_ascii(b'"')
    }

    fn is_string_begin(c: C) -> bool {
        c == Self::string_begin()
    }

    fn is_string_end(c: C) -> bool {
        c == Self::string_end()
    }

    fn array_begin() -> C {
        C::from_ascii(b'[')
    }

    fn array_end() -> C {
        C::from_ascii(b']')
    }

    fn is_array_begin(c: C) -> bool {
        c == Self::array_begin()
    }

    fn is_array_end(c: C) -> bool {
        c == Self::array_end()
    }

    fn object_begin() -> C {
        C::from_ascii(b'{')
    }

    fn object_end() -> C {
        C::from_ascii(b'}')
    }

    fn is_object_begin(c: C) -> bool {
        c == Self::object_begin()
    }

    fn is_object_end(c: C) -> bool {
        c == Self::object_end()
    }

    fn comma() -> C {
        C::from_ascii(b',')
    }

    fn is_comma(c: C) -> bool {
        c == Self::comma()
    }

    fn colon() -> C {
        C::from_ascii(b':')
    }

    fn is_colon(c: C) -> bool {
        c == Self::colon()
    }

    fn is_newline(c: C) -> bool {
        c == C::from_ascii(b'\n')
    }

    /// The marker which makes the following symbol inside a string literal ordinary content
    fn is_escape(c: C) -> bool {
        c == C::from_ascii(b'\\')
    }

    fn is_minus(c: C) -> bool {
        c == C::from_ascii(b'-')
    }

    fn is_plus(c: C) -> bool {
        c == C::from_ascii(b'+')
    }

    fn is_exponent(c: C) -> bool {
        c == C::from_ascii(b'e') || c == C::from_ascii(b'E')
    }

    fn is_decimal_point(c: C) -> bool {
        c == C::from_ascii(b'.')
    }

    /// Map a run of alphabetic symbols onto the [Kind] of literal it spells, or
    /// [Kind::Invalid] if it isn't a keyword
    fn classify_keyword(word: &[C]) -> Kind {
        if matches_ascii(word, "null") {
            Kind::Null
        } else if matches_ascii(word, "true") {
            Kind::True
        } else if matches_ascii(word, "false") {
            Kind::False
        } else {
            Kind::Invalid
        }
    }
}

/// The standard JSON grammar
#[derive(Debug, Copy, Clone, PartialEq, Eq, Default)]
pub struct JsonGrammar;

impl<C: Symbol> Grammar<C> for JsonGrammar {}

/// A grammar whose string literals (and object keys) are delimited by `<` and `>`, so that
/// `{<name>: <value>}` is a valid document
#[derive(Debug, Copy, Clone, PartialEq, Eq, Default)]
pub struct AngleGrammar;

impl<C: Symbol> Grammar<C> for AngleGrammar {
    fn string_begin() -> C {
        C::from_ascii(b'<')
    }

    fn string_end() -> C {
        C::from_ascii(b'>')
    }
}
