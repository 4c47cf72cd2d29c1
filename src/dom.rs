//! The DOM front end
//!
//! [DomParser] is a reusable, configurable wrapper around [Parser] which takes care of getting
//! hold of the input (strings, byte buffers or files) and decoding it into `char`s, and always
//! produces `String` backed trees.
use std::fs::File;
use std::io::{BufReader, Read};
use std::marker::PhantomData;
use std::path::Path;

use thiserror::Error;

use crate::decoders::{decode, Encoding};
use crate::errors::{ParserError, ParserResult};
use crate::grammar::{Grammar, JsonGrammar};
use crate::parser::Parser;
use crate::value::Value;

/// The kind of construct expected at the root of a document
#[derive(Debug, Copy, Clone, PartialEq, Eq, Default)]
pub enum Root {
    #[default]
    Object,
    Array,
}

/// Errors which can occur when parsing from a file
#[derive(Debug, Error)]
pub enum DomError {
    #[error("failed to read input: {0}")]
    Io(#[from] std::io::Error),
    #[error(transparent)]
    Parse(#[from] ParserError),
}

/// Main DOM parser struct
pub struct DomParser<G = JsonGrammar> {
    encoding: Encoding,
    root: Root,
    grammar: PhantomData<G>,
}

impl<G> Default for DomParser<G> {
    /// The default encoding is Utf-8 (unless the `default_utf8_encoding` feature is switched off),
    /// and the default root is an object
    fn default() -> Self {
        Self {
            encoding: Default::default(),
            root: Default::default(),
            grammar: PhantomData,
        }
    }
}

impl<G: Grammar<char>> DomParser<G> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Use a specific [Encoding] when decoding bytes and files
    pub fn with_encoding(self, encoding: Encoding) -> Self {
        Self { encoding, ..self }
    }

    /// Expect a specific kind of [Root]
    pub fn with_root(self, root: Root) -> Self {
        Self { root, ..self }
    }

    pub fn parse_file<PathLike: AsRef<Path>>(
        &self,
        path: PathLike,
    ) -> Result<Value<String, G>, DomError> {
        let f = File::open(&path)?;
        let mut reader = BufReader::new(f);
        let mut bytes = vec![];
        reader.read_to_end(&mut bytes)?;
        tracing::debug!(path = %path.as_ref().display(), bytes = bytes.len(), "read file");
        Ok(self.parse_bytes(&bytes)?)
    }

    /// Decode and parse a byte buffer. Bytes which aren't valid in the configured [Encoding]
    /// fail with [crate::errors::Details::InvalidEncoding].
    pub fn parse_bytes(&self, bytes: &[u8]) -> ParserResult<Value<String, G>> {
        let chars = decode(bytes, self.encoding)?;
        self.parse_chars(&chars)
    }

    pub fn parse_str(&self, str: &str) -> ParserResult<Value<String, G>> {
        let chars: Vec<char> = str.chars().collect();
        self.parse_chars(&chars)
    }

    pub fn parse_chars(&self, chars: &[char]) -> ParserResult<Value<String, G>> {
        let mut parser: Parser<String, G> = Parser::new(chars);
        match self.root {
            Root::Object => parser.parse_object_expected(),
            Root::Array => parser.parse_array_expected(),
        }
    }
}
