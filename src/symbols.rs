//! The parser and the value tree are generic over the kind of character they consume and the
//! kind of string they store. A [Symbol] is a single input character, supplying the basic
//! classification predicates, and a [Text] is the owned string built from a run of them.
//!
//! Implementations are provided for narrow (`u8`), wide (`u16`) and Unicode (`char`) input.
use std::borrow::Cow;
use std::fmt::Debug;

/// A single input character
pub trait Symbol: Copy + Eq + Debug {
    /// Build a symbol from an ASCII byte. Grammars use this to name their delimiters.
    fn from_ascii(byte: u8) -> Self;

    /// Lossy conversion, only used when reporting errors
    fn to_char(self) -> char;

    fn is_space(self) -> bool;

    fn is_alpha(self) -> bool;

    fn is_digit(self) -> bool;
}

impl Symbol for u8 {
    fn from_ascii(byte: u8) -> Self {
        byte
    }

    fn to_char(self) -> char {
        char::from(self)
    }

    fn is_space(self) -> bool {
        self.is_ascii_whitespace() || self == 0x0b
    }

    fn is_alpha(self) -> bool {
        self.is_ascii_alphabetic()
    }

    fn is_digit(self) -> bool {
        self.is_ascii_digit()
    }
}

impl Symbol for u16 {
    fn from_ascii(byte: u8) -> Self {
        u16::from(byte)
    }

    fn to_char(self) -> char {
        char::from_u32(u32::from(self)).unwrap_or(char::REPLACEMENT_CHARACTER)
    }

    fn is_space(self) -> bool {
        u8::try_from(self).map_or(false, |b| b.is_space())
    }

    fn is_alpha(self) -> bool {
        u8::try_from(self).map_or(false, |b| b.is_alpha())
    }

    fn is_digit(self) -> bool {
        u8::try_from(self).map_or(false, |b| b.is_digit())
    }
}

impl Symbol for char {
    fn from_ascii(byte: u8) -> Self {
        char::from(byte)
    }

    fn to_char(self) -> char {
        self
    }

    fn is_space(self) -> bool {
        self.is_whitespace()
    }

    fn is_alpha(self) -> bool {
        self.is_alphabetic()
    }

    fn is_digit(self) -> bool {
        self.is_ascii_digit()
    }
}

/// An owned string of [Symbol]s, used as the payload of every value in a tree
pub trait Text: Clone + Default + Debug + PartialEq {
    type Symbol: Symbol;

    /// Copy a run of input symbols verbatim
    fn from_symbols(symbols: &[Self::Symbol]) -> Self;

    fn push_symbol(&mut self, symbol: Self::Symbol);

    fn push_text(&mut self, other: &Self);

    fn is_empty(&self) -> bool;

    /// Lossy UTF-8 view of the text
    fn to_utf8(&self) -> Cow<'_, str>;

    /// Build a text from an ASCII literal such as a keyword
    fn from_ascii(ascii: &str) -> Self {
        let mut text = Self::default();
        ascii
            .bytes()
            .for_each(|b| text.push_symbol(Self::Symbol::from_ascii(b)));
        text
    }
}

impl Text for String {
    type Symbol = char;

    fn from_symbols(symbols: &[char]) -> Self {
        symbols.iter().collect()
    }

    fn push_symbol(&mut self, symbol: char) {
        self.push(symbol)
    }

    fn push_text(&mut self, other: &Self) {
        self.push_str(other)
    }

    fn is_empty(&self) -> bool {
        String::is_empty(self)
    }

    fn to_utf8(&self) -> Cow<'_, str> {
        Cow::Borrowed(self.as_str())
    }
}

impl Text for Vec<u8> {
    type Symbol = u8;

    fn from_symbols(symbols: &[u8]) -> Self {
        symbols.to_vec()
    }

    fn push_symbol(&mut self, symbol: u8) {
        self.push(symbol)
    }

    fn push_text(&mut self, other: &Self) {
        self.extend_from_slice(other)
    }

    fn is_empty(&self) -> bool {
        Vec::is_empty(self)
    }

    fn to_utf8(&self) -> Cow<'_, str> {
        String::from_utf8_lossy(self)
    }
}

impl Text for Vec<u16> {
    type Symbol = u16;

    fn from_symbols(symbols: &[u16]) -> Self {
        symbols.to_vec()
    }

    fn push_symbol(&mut self, symbol: u16) {
        self.push(symbol)
    }

    fn push_text(&mut self, other: &Self) {
        self.extend_from_slice(other)
    }

    fn is_empty(&self) -> bool {
        Vec::is_empty(self)
    }

    fn to_utf8(&self) -> Cow<'_, str> {
        Cow::Owned(String::from_utf16_lossy(self))
    }
}

/// Check whether a run of symbols spells out exactly the given ASCII literal
pub fn matches_ascii<C: Symbol>(symbols: &[C], ascii: &str) -> bool {
    symbols.len() == ascii.len()
        && symbols
            .iter()
            .zip(ascii.bytes())
            .all(|(s, b)| *s == C::from_ascii(b))
}
