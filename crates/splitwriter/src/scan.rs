//! Reference split strategies.
//!
//! These follow the usual scanner conventions for bytes, runes, lines and
//! words, minus everything that depends on knowing where the stream ends.

use bstr::ByteSlice;

use crate::split::{Split, SplitResult, Token};

/// Splits the input into single bytes.
#[derive(Debug, Clone, Copy, Default)]
pub struct ScanBytes;

impl Split for ScanBytes {
    fn split<'a>(&self, data: &'a [u8]) -> SplitResult<'a> {
        Ok(data.first().map(|_| Token::borrowed(1, &data[..1])))
    }
}

/// Splits the input into UTF-8 encoded runes.
///
/// A multi-byte sequence that is cut short by the end of the buffered data
/// waits for the next write. Bytes that can never become part of a valid
/// sequence are delivered one at a time as they are, so a token is never
/// longer than its advance; sinks that want text can decode each such token
/// lossily to U+FFFD.
#[derive(Debug, Clone, Copy, Default)]
pub struct ScanRunes;

impl Split for ScanRunes {
    fn split<'a>(&self, data: &'a [u8]) -> SplitResult<'a> {
        let Some(&first) = data.first() else {
            return Ok(None);
        };
        if first.is_ascii() {
            return Ok(Some(Token::borrowed(1, &data[..1])));
        }
        Ok(match bstr::decode_utf8(data) {
            (Some(_), width) => Some(Token::borrowed(width, &data[..width])),
            (None, valid) if valid == data.len() && is_leading_byte(first) => None,
            (None, _) => Some(Token::borrowed(1, &data[..1])),
        })
    }
}

fn is_leading_byte(b: u8) -> bool {
    matches!(b, 0xC2..=0xF4)
}

/// Splits the input into lines, without their terminators.
///
/// A line ends at `\n`; one `\r` immediately before it is dropped too. The
/// final line of a stream is only delivered once its `\n` arrives.
#[derive(Debug, Clone, Copy, Default)]
pub struct ScanLines;

impl Split for ScanLines {
    fn split<'a>(&self, data: &'a [u8]) -> SplitResult<'a> {
        Ok(data.find_byte(b'\n').map(|i| Token::borrowed(i + 1, drop_cr(&data[..i]))))
    }
}

fn drop_cr(line: &[u8]) -> &[u8] {
    line.strip_suffix(b"\r").unwrap_or(line)
}

/// Splits the input into words separated by Unicode whitespace.
///
/// Leading whitespace is skipped as part of the next word's advance. A word
/// is complete only once the whitespace character that ends it has arrived,
/// so whitespace with no finished word after it stays pending.
#[derive(Debug, Clone, Copy, Default)]
pub struct ScanWords;

impl Split for ScanWords {
    fn split<'a>(&self, data: &'a [u8]) -> SplitResult<'a> {
        let mut start = 0;
        while start < data.len() {
            let (is_space, width) = decode_space(&data[start..]);
            if !is_space {
                break;
            }
            start += width;
        }

        let mut i = start;
        while i < data.len() {
            let (is_space, width) = decode_space(&data[i..]);
            if is_space {
                return Ok(Some(Token::borrowed(i + width, &data[start..i])));
            }
            i += width;
        }
        Ok(None)
    }
}

/// Decode the rune at the front of `data` and report whether it is
/// whitespace. Undecodable bytes count as one non-space byte.
fn decode_space(data: &[u8]) -> (bool, usize) {
    match bstr::decode_utf8(data) {
        (Some(ch), width) => (ch.is_whitespace(), width),
        (None, _) => (false, 1),
    }
}
