//! The parser works over a slice of symbols, so byte input (from a buffer or a file) has to be
//! decoded into `char`s first. The decoding itself is handled by `chisel-decoders`; this module
//! picks the right decoder for a given [Encoding], and makes sure that the whole of the input
//! was decoded.
use chisel_decoders::{ascii::AsciiDecoder, utf8::Utf8Decoder};
use std::io::BufRead;

use crate::coords::Coords;
use crate::errors::{Details, ParserResult};
use crate::parser_error;

/// Enumeration of different supported encoding types
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Encoding {
    Utf8,
    Ascii,
}

impl Default for Encoding {
    #[cfg(feature = "default_utf8_encoding")]
    fn default() -> Self {
        Self::Utf8
    }

    #[cfg(not(feature = "default_utf8_encoding"))]
    fn default() -> Self {
        Self::Ascii
    }
}

/// Create a `char` iterator over a buffer, based on a specific encoding
fn new_decoder<'a, Buffer: BufRead>(
    buffer: &'a mut Buffer,
    encoding: Encoding,
) -> Box<dyn Iterator<Item = char> + 'a> {
    match encoding {
        Encoding::Ascii => Box::new(AsciiDecoder::new(buffer)),
        Encoding::Utf8 => Box::new(Utf8Decoder::new(buffer)),
    }
}

/// Offset of a multi-byte sequence that runs past the end of `bytes`, following the same steps
/// as the UTF-8 decoder. The decoder doesn't guard against a truncated final sequence, so input
/// is cut short here instead.
fn complete_prefix(bytes: &[u8]) -> usize {
    let mut index = 0;
    while index < bytes.len() {
        let len = match bytes[index].leading_ones() {
            0 => 1,
            n @ 2..=4 => n as usize,
            _ => return bytes.len(),
        };
        if index + len > bytes.len() {
            return index;
        }
        index += len;
    }
    bytes.len()
}

/// Decode the whole of a byte buffer into `char`s.
///
/// Every decoded `char` is checked against the bytes it came from, so malformed sequences which
/// the decoder lets through (overlong forms, bad continuation bytes) are caught along with the
/// ones it rejects outright. The first bad sequence fails the decode with
/// [Details::InvalidEncoding], positioned at the symbol the parser would have seen next.
pub fn decode(bytes: &[u8], encoding: Encoding) -> ParserResult<Vec<char>> {
    let limit = match encoding {
        Encoding::Utf8 => complete_prefix(bytes),
        Encoding::Ascii => bytes.len(),
    };
    let mut reader = &bytes[..limit];
    let mut chars = Vec::with_capacity(limit);
    let mut coords = Coords::default();
    let mut offset = 0;
    let mut scratch = [0u8; 4];
    for c in new_decoder(&mut reader, encoding) {
        let encoded = c.encode_utf8(&mut scratch).as_bytes();
        if !bytes[offset..].starts_with(encoded) {
            break;
        }
        offset += encoded.len();
        coords.advance(c == '\n');
        chars.push(c);
    }
    if offset < bytes.len() {
        tracing::debug!(?encoding, offset, at = %coords, "invalid byte sequence");
        return parser_error!(Details::InvalidEncoding(offset), coords);
    }
    Ok(chars)
}
