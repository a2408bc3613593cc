//! Structs and logic to parse bracket record files.
//!
//! This module provides the [BracketParser] struct, which reads the
//! tuple-like record literals of a bracket file with a strict
//! recursive-descent parser, as well as lazy parsing via a
//! [BracketIterator].

use crate::brackets::defs::{DEFAULT_NUM_RECORDS_GUESS, MAX_LITERAL_DEPTH, NULL_LITERAL, RECORD_ARITY};
use crate::model::{BracketRecord, Nuclearity, Span};
use crate::parser::byte_parser::ByteParser;
use crate::parser::byte_source::ByteSource;
use crate::parser::parsing_error::ParsingError;

// =#========================================================================#=
// LITERAL
// =#========================================================================$=
/// The value types a record literal may be composed of.
#[derive(Debug, Clone, PartialEq)]
enum Literal {
    Tuple(Vec<Literal>),
    Int(usize),
    Str(String),
    Null,
}

impl Literal {
    fn describe(&self) -> String {
        match self {
            Literal::Tuple(items) => format!("tuple of {}", items.len()),
            Literal::Int(value) => format!("integer {value}"),
            Literal::Str(value) => format!("string '{value}'"),
            Literal::Null => NULL_LITERAL.to_string(),
        }
    }
}

// =#========================================================================#=
// BRACKET PARSER
// =#========================================================================$=
/// Parser for files with one bracket record per line.
///
/// # Format
/// * `record ::= '(' span ',' nuclearity ',' relation [','] ')'`
/// * `span ::= '(' integer ',' integer [','] ')'`
/// * `nuclearity ::= 'Nucleus' | 'Satellite'` (single or double quoted)
/// * `relation ::= string | None`
///
/// Furthermore:
/// * Spaces and tabs can occur between tokens
/// * Each record sits on its own line; blank lines are ignored
/// * Strings support the escapes `\\`, `\'`, `\"`, `\n`, `\t`
///
/// Types and arity are checked before a [BracketRecord] is created; no
/// other literal forms are evaluated.
///
/// # Example
/// ```
/// use rstdep::brackets::BracketParser;
/// use rstdep::parser::ByteParser;
///
/// let input = "((1, 1), 'Nucleus', 'span')\n((2, 2), 'Satellite', 'elaboration')\n";
/// let byte_parser = ByteParser::for_str(input);
/// let records = BracketParser::new().parse_all(byte_parser).unwrap();
/// assert_eq!(records.len(), 2);
/// ```
#[derive(Debug, Clone, Default)]
pub struct BracketParser;

// ============================================================================
// Construction (pub)
// ============================================================================
impl BracketParser {
    /// Creates a new [BracketParser] with default settings.
    pub fn new() -> Self {
        BracketParser
    }
}

// ============================================================================
// API Parsing (pub)
// ============================================================================
impl BracketParser {
    /// Consumes the parser and returns an iterator over records from the byte source.
    pub fn into_iter<B: ByteSource>(self, byte_parser: ByteParser<B>) -> BracketIterator<B> {
        BracketIterator {
            byte_parser,
            parser: self,
            done: false,
        }
    }

    /// Parses all records from the byte source until EOF.
    ///
    /// # Returns
    /// * `Ok(Vec<BracketRecord>)` - All parsed records in file order
    /// * `Err(ParsingError)` - If any record fails to parse
    pub fn parse_all<B: ByteSource>(
        &mut self,
        mut byte_parser: ByteParser<B>,
    ) -> Result<Vec<BracketRecord>, ParsingError> {
        let mut records = Vec::with_capacity(DEFAULT_NUM_RECORDS_GUESS);
        while let Some(record) = self.parse_next(&mut byte_parser)? {
            records.push(record);
        }
        Ok(records)
    }

    /// Parses the next record, skipping blank lines before it.
    ///
    /// # Returns
    /// * `Ok(Some(BracketRecord))` - The next record
    /// * `Ok(None)` - If only whitespace remained
    /// * `Err(ParsingError)` - If the record literal is malformed
    pub fn parse_next<B: ByteSource>(
        &mut self,
        parser: &mut ByteParser<B>,
    ) -> Result<Option<BracketRecord>, ParsingError> {
        parser.skip_whitespace();
        if parser.is_eof() {
            return Ok(None);
        }
        self.parse_record(parser).map(Some)
    }

    /// Parses a single record line `((left, right), nuclearity, relation)`.
    ///
    /// Expects the parser at the start of the record and consumes the
    /// terminating newline, if any.
    pub fn parse_record<B: ByteSource>(
        &mut self,
        parser: &mut ByteParser<B>,
    ) -> Result<BracketRecord, ParsingError> {
        let literal = Self::parse_literal(parser, 0)?;

        parser.skip_inline_whitespace();
        if !parser.is_eof() && !parser.peek_is(b'\n') {
            return Err(ParsingError::trailing_content(parser));
        }

        let record = Self::into_record(literal, parser)?;
        parser.consume_if(b'\n');
        Ok(record)
    }
}

// ============================================================================
// Parsing
// ============================================================================
impl BracketParser {
    /// Parses one literal value: tuple, unsigned integer, quoted string or `None`.
    fn parse_literal<B: ByteSource>(parser: &mut ByteParser<B>, depth: usize) -> Result<Literal, ParsingError> {
        parser.skip_inline_whitespace();
        match parser.peek() {
            None => Err(ParsingError::unexpected_eof(parser)),
            Some(b'(') => Self::parse_tuple(parser, depth),
            Some(b'\'' | b'"') => Ok(Literal::Str(parser.parse_quoted_string()?)),
            Some(b) if b.is_ascii_digit() => Ok(Literal::Int(parser.parse_unsigned()?)),
            Some(b) if b.is_ascii_alphabetic() => {
                let word = parser.parse_word();
                if word == NULL_LITERAL {
                    Ok(Literal::Null)
                } else {
                    Err(ParsingError::invalid_record(parser, format!("unknown literal '{word}'")))
                }
            }
            Some(_) => Err(ParsingError::unexpected_char(parser)),
        }
    }

    /// Parses `'(' [literal (',' literal)* [',']] ')'`.
    fn parse_tuple<B: ByteSource>(parser: &mut ByteParser<B>, depth: usize) -> Result<Literal, ParsingError> {
        if depth >= MAX_LITERAL_DEPTH {
            return Err(ParsingError::invalid_record(parser, "tuples nested too deeply".to_string()));
        }
        parser.expect(b'(')?;

        let mut items = Vec::new();
        loop {
            parser.skip_inline_whitespace();
            if parser.consume_if(b')') {
                break;
            }
            items.push(Self::parse_literal(parser, depth + 1)?);

            parser.skip_inline_whitespace();
            if !parser.consume_if(b',') {
                parser.expect(b')')?;
                break;
            }
        }

        Ok(Literal::Tuple(items))
    }

    /// Validates types and arity of a parsed literal and builds the record.
    fn into_record<B: ByteSource>(literal: Literal, parser: &ByteParser<B>) -> Result<BracketRecord, ParsingError> {
        let items = match literal {
            Literal::Tuple(items) => items,
            other => {
                return Err(ParsingError::invalid_record(
                    parser,
                    format!("expected a record tuple but found {}", other.describe()),
                ));
            }
        };
        let [span, nuclearity, relation]: [Literal; RECORD_ARITY] = items.try_into().map_err(|items: Vec<Literal>| {
            ParsingError::invalid_record(
                parser,
                format!("expected {RECORD_ARITY} elements but found {}", items.len()),
            )
        })?;

        let span = match span {
            Literal::Tuple(bounds) => match bounds.as_slice() {
                [Literal::Int(left), Literal::Int(right)] => Span::new(*left, *right),
                _ => {
                    return Err(ParsingError::invalid_record(
                        parser,
                        "span must be a tuple of two integers".to_string(),
                    ));
                }
            },
            other => {
                return Err(ParsingError::invalid_record(
                    parser,
                    format!("expected span tuple but found {}", other.describe()),
                ));
            }
        };
        if span.left == 0 || span.left > span.right {
            return Err(ParsingError::invalid_record(parser, format!("invalid span {span}")));
        }

        let nuclearity = match nuclearity {
            Literal::Str(label) => {
                Nuclearity::from_label(&label).ok_or_else(|| ParsingError::unknown_nuclearity(parser, label))?
            }
            other => {
                return Err(ParsingError::invalid_record(
                    parser,
                    format!("expected nuclearity string but found {}", other.describe()),
                ));
            }
        };

        let relation = match relation {
            Literal::Str(relation) => Some(relation),
            Literal::Null => None,
            other => {
                return Err(ParsingError::invalid_record(
                    parser,
                    format!("expected relation string or None but found {}", other.describe()),
                ));
            }
        };

        Ok(BracketRecord {
            span,
            nuclearity,
            relation,
        })
    }
}

// =#========================================================================#=
// BRACKET ITERATOR
// =#========================================================================$=
/// Iterator for lazy parsing of bracket records.
///
/// Created by [`BracketParser::into_iter`]. Stops after the first error.
pub struct BracketIterator<B: ByteSource> {
    byte_parser: ByteParser<B>,
    parser: BracketParser,
    done: bool,
}

impl<B: ByteSource> Iterator for BracketIterator<B> {
    type Item = Result<BracketRecord, ParsingError>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }

        match self.parser.parse_next(&mut self.byte_parser) {
            Ok(Some(record)) => Some(Ok(record)),
            Ok(None) => {
                self.done = true;
                None
            }
            Err(e) => {
                self.done = true;
                Some(Err(e))
            }
        }
    }
}
