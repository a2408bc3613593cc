//! Low-level byte-by-byte parser for ASCII text.
//!
//! This module provides [ByteParser] for parsing line-oriented literal
//! formats with support for peeking, consuming and reading the primitive
//! tokens of a bracket record (unsigned integers, quoted strings, bare words).
//! Used as the foundation for the [BracketParser](crate::brackets::BracketParser).

use crate::parser::byte_source::{ByteSource, InMemoryByteSource};
use crate::parser::parsing_error::ParsingError;
use std::path::Path;

// =#========================================================================#=
// BYTE PARSER
// =#========================================================================#=
/// A byte-by-byte parser for ASCII text with support for peeking, consuming, and pattern matching.
///
/// # Example
/// ```
/// use rstdep::parser::ByteParser;
///
/// let mut parser = ByteParser::for_str("(12, 'Nucleus')");
/// assert!(parser.consume_if(b'('));
/// assert_eq!(parser.parse_unsigned().unwrap(), 12);
/// assert!(parser.consume_if(b','));
/// parser.skip_inline_whitespace();
/// assert_eq!(parser.parse_quoted_string().unwrap(), "Nucleus");
/// ```
pub struct ByteParser<S: ByteSource> {
    source: S,
}

impl ByteParser<InMemoryByteSource> {
    /// Creates a new `ByteParser` from a string by copying it into a Vec.
    pub fn for_str(input: &str) -> Self {
        Self::new(InMemoryByteSource::from_vec(input.as_bytes().to_vec()))
    }

    /// Creates a new `ByteParser` by reading the whole file into memory.
    pub fn from_file<P: AsRef<Path>>(path: P) -> std::io::Result<Self> {
        Ok(Self::new(InMemoryByteSource::from_file(path)?))
    }
}

impl<S: ByteSource> ByteParser<S> {
    /// Creates a new `ByteParser` from a byte source.
    pub fn new(source: S) -> Self {
        Self { source }
    }

    /// Peeks at the current byte without consuming it.
    #[inline(always)]
    pub fn peek(&self) -> Option<u8> {
        self.source.peek()
    }

    /// Gets the current byte and advances the position (consumes it).
    #[inline(always)]
    pub fn next_byte(&mut self) -> Option<u8> {
        self.source.next_byte()
    }

    /// Skips (consumes) all consecutive whitespace characters, including newlines.
    pub fn skip_whitespace(&mut self) {
        while let Some(b) = self.peek() {
            if b == b' ' || b == b'\t' || b == b'\n' || b == b'\r' {
                self.next_byte();
            } else {
                break;
            }
        }
    }

    /// Skips (consumes) spaces, tabs and carriage returns, but stops at a newline.
    ///
    /// Records are line-oriented, so within a record only inline whitespace
    /// is allowed.
    pub fn skip_inline_whitespace(&mut self) {
        while let Some(b) = self.peek() {
            if b == b' ' || b == b'\t' || b == b'\r' {
                self.next_byte();
            } else {
                break;
            }
        }
    }

    /// Checks if the current byte matches the target byte exactly.
    pub fn peek_is(&self, ch: u8) -> bool {
        self.peek() == Some(ch)
    }

    /// Consumes the current byte if it matches the target byte.
    ///
    /// # Returns
    /// `true` if the byte was matched and consumed, `false` otherwise
    pub fn consume_if(&mut self, ch: u8) -> bool {
        if self.peek_is(ch) {
            self.next_byte();
            true
        } else {
            false
        }
    }

    /// Consumes the given byte or fails with an unexpected-character error.
    pub fn expect(&mut self, ch: u8) -> Result<(), ParsingError> {
        if self.consume_if(ch) {
            Ok(())
        } else {
            Err(ParsingError::unexpected_char(self))
        }
    }

    /// Returns whether the end of data (EOF) has been reached.
    pub fn is_eof(&self) -> bool {
        self.source.is_eof()
    }

    /// Returns the current parser position in the input.
    pub fn position(&self) -> usize {
        self.source.position()
    }

    /// Returns the 1-based line number of the current position.
    pub fn line(&self) -> usize {
        self.source.line()
    }

    /// Returns a string from up to `k` bytes from the current position for error context.
    ///
    /// Invalid UTF-8 sequences are replaced with the Unicode replacement character.
    pub fn get_context_as_string(&self, k: usize) -> String {
        let context_bytes = self.source.get_context(k);
        String::from_utf8_lossy(&context_bytes).into_owned()
    }

    /// Parses an unsigned decimal integer.
    ///
    /// # Errors
    /// Returns an error if no digit is found or the value overflows `usize`.
    pub fn parse_unsigned(&mut self) -> Result<usize, ParsingError> {
        let mut digits = String::new();
        while let Some(b) = self.peek() {
            if b.is_ascii_digit() {
                digits.push(b as char);
                self.next_byte();
            } else {
                break;
            }
        }

        if digits.is_empty() {
            return Err(ParsingError::unexpected_char(self));
        }

        digits
            .parse::<usize>()
            .map_err(|e| ParsingError::invalid_integer(self, format!("{digits}: {e}")))
    }

    /// Parses a string enclosed in single or double quotes.
    ///
    /// Assumes the parser is at the opening quote. Supported escapes are
    /// `\\`, `\'`, `\"`, `\n` and `\t`; any other escaped byte is kept
    /// together with its backslash. A string may not span lines.
    ///
    /// # Errors
    /// Returns an error if the string is not closed before the end of the line.
    pub fn parse_quoted_string(&mut self) -> Result<String, ParsingError> {
        let quote = match self.peek() {
            Some(q @ (b'\'' | b'"')) => q,
            _ => return Err(ParsingError::unexpected_char(self)),
        };
        self.next_byte();

        let mut bytes = Vec::new();
        loop {
            match self.peek() {
                None | Some(b'\n') => return Err(ParsingError::unclosed_string(self)),
                Some(b) if b == quote => {
                    self.next_byte();
                    break;
                }
                Some(b'\\') => {
                    self.next_byte();
                    match self.peek() {
                        None | Some(b'\n') => return Err(ParsingError::unclosed_string(self)),
                        Some(b'n') => bytes.push(b'\n'),
                        Some(b't') => bytes.push(b'\t'),
                        Some(e @ (b'\\' | b'\'' | b'"')) => bytes.push(e),
                        Some(other) => {
                            bytes.push(b'\\');
                            bytes.push(other);
                        }
                    }
                    self.next_byte();
                }
                Some(b) => {
                    bytes.push(b);
                    self.next_byte();
                }
            }
        }

        Ok(String::from_utf8_lossy(&bytes).into_owned())
    }

    /// Parses a bare word made of ASCII letters, digits and underscores.
    pub fn parse_word(&mut self) -> String {
        let mut word = String::new();
        while let Some(b) = self.peek() {
            if b.is_ascii_alphanumeric() || b == b'_' {
                word.push(b as char);
                self.next_byte();
            } else {
                break;
            }
        }
        word
    }
}
