//! A JSON tree parser and serializer, generic over both the character type it reads and the
//! grammar (delimiter symbols and keywords) it understands.
//!
//! ```
//! let value = jtree::parse_str(r#"{"name":"JohnDoe","children":["Jane","Doe"]}"#).unwrap();
//! assert_eq!(value.find("name").unwrap().value().data(), "JohnDoe");
//! assert_eq!(value.to_string(), r#"{"name":"JohnDoe","children":["Jane","Doe"]}"#);
//! ```
use crate::dom::DomParser;
use crate::errors::ParserResult;
use crate::grammar::Grammar;

pub mod coords;
pub mod decoders;
pub mod dom;
pub mod errors;
pub mod grammar;
pub mod parser;
pub mod symbols;
#[cfg(test)]
mod test_macros;
pub mod value;

pub use crate::grammar::{AngleGrammar, JsonGrammar};
pub use crate::parser::Parser;
pub use crate::value::Value;

/// Tag identifying which construct a [Value] represents
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum Kind {
    /// The `null` literal
    Null,
    /// The `true` literal
    True,
    /// The `false` literal
    False,
    /// A string literal
    String,
    /// An object member, holding exactly one value
    Key,
    /// A numeric literal, kept as text
    Number,
    /// Ordered list of values
    Array,
    /// Ordered list of [Kind::Key] members
    Object,
    /// Not a value. Never produced by a successful parse.
    Invalid,
}

/// Parse a string holding a JSON object using the standard grammar
pub fn parse_str(input: &str) -> ParserResult<Value> {
    DomParser::default().parse_str(input)
}

/// Parse a string holding an object written in an arbitrary grammar
pub fn parse_str_with<G: Grammar<char>>(input: &str) -> ParserResult<Value<String, G>> {
    DomParser::<G>::new().parse_str(input)
}
