use rstdep::brackets::{BracketParser, parse_file, parse_str};
use rstdep::model::{BracketRecord, Nuclearity::*, Span};
use rstdep::parser::ParsingErrorType;
use rstdep::parser::byte_parser::ByteParser;
use std::path::Path;

fn fixture(name: &str) -> std::path::PathBuf {
    Path::new("tests").join("fixtures").join("corpus").join(name)
}

// --- TESTS BRACKET STRING PARSING ---
#[test]
fn test_basic_records() {
    let records = parse_str("((1, 1), 'Nucleus', 'span')\n((2, 2), 'Satellite', 'elaboration')\n").unwrap();
    assert_eq!(
        records,
        vec![
            BracketRecord::new((1, 1), Nucleus, Some("span")),
            BracketRecord::new((2, 2), Satellite, Some("elaboration")),
        ]
    );
    assert!(records.iter().all(|r| r.is_leaf()));
}

#[test]
fn test_internal_record() {
    let records = parse_str("((3, 7), 'Satellite', 'same-unit')").unwrap();
    assert_eq!(records.len(), 1);
    assert_eq!(records[0].span, Span::new(3, 7));
    assert_eq!(records[0].span.num_edus(), 5);
    assert!(!records[0].is_leaf());
    assert_eq!(records[0].relation.as_deref(), Some("same-unit"));
}

#[test]
fn test_none_relation() {
    let records = parse_str("((1, 1), 'Nucleus', None)").unwrap();
    assert_eq!(records[0].relation, None);
}

#[test]
fn test_whitespace_variants() {
    let input = "  ( (1,1) ,\t\"Nucleus\" , 'span' , )  \r\n\r\n\n((2, 2),'Satellite','attribution')\r\n";
    let records = parse_str(input).unwrap();
    assert_eq!(records.len(), 2);
    assert_eq!(records[0], BracketRecord::new((1, 1), Nucleus, Some("span")));
    assert_eq!(records[1], BracketRecord::new((2, 2), Satellite, Some("attribution")));
}

#[test]
fn test_empty_input() {
    assert!(parse_str("").unwrap().is_empty());
    assert!(parse_str("\n\n   \n").unwrap().is_empty());
}

#[test]
fn test_iterator_parsing() {
    let input = "((1, 1), 'Nucleus', 'span')\n((2, 2), 'Satellite', 'x')\n((3, 3), 'Nucleus', 'y')\n";
    let mut iter = BracketParser::new().into_iter(ByteParser::for_str(input));
    assert_eq!(iter.next().unwrap().unwrap().span, Span::new(1, 1));
    assert_eq!(iter.next().unwrap().unwrap().span, Span::new(2, 2));
    assert_eq!(iter.next().unwrap().unwrap().span, Span::new(3, 3));
    assert!(iter.next().is_none());
}

#[test]
fn test_iterator_stops_after_error() {
    let input = "((1, 1), 'Nucleus', 'span')\n((2, 2), 'Core', 'x')\n((3, 3), 'Nucleus', 'y')\n";
    let results: Vec<_> = BracketParser::new().into_iter(ByteParser::for_str(input)).collect();
    assert_eq!(results.len(), 2);
    assert!(results[0].is_ok());
    assert!(results[1].is_err());
}

// --- TESTS BRACKET ERRORS ---
#[test]
fn test_unknown_nuclearity_line() {
    let input = "((1, 1), 'Nucleus', 'span')\n((2, 2), 'Satellite', 'x')\n((3, 3), 'nucleus', 'y')\n";
    let err = parse_str(input).unwrap_err();
    assert_eq!(err.kind(), &ParsingErrorType::UnknownNuclearity("nucleus".to_string()));
    assert_eq!(err.line(), 3);
}

#[test]
fn test_missing_element() {
    let err = parse_str("((1, 1), 'Nucleus')").unwrap_err();
    assert!(matches!(err.kind(), ParsingErrorType::InvalidRecord(msg) if msg.contains("3 elements")));
}

#[test]
fn test_span_errors() {
    for input in [
        "((0, 1), 'Nucleus', 'span')",
        "((4, 2), 'Nucleus', 'span')",
        "((1, 2, 3), 'Nucleus', 'span')",
        "(('1', 2), 'Nucleus', 'span')",
        "(1, 'Nucleus', 'span')",
    ] {
        let err = parse_str(input).unwrap_err();
        assert!(matches!(err.kind(), ParsingErrorType::InvalidRecord(_)), "{input}: {err}");
    }
}

#[test]
fn test_relation_must_be_string_or_none() {
    let err = parse_str("((1, 1), 'Nucleus', 7)").unwrap_err();
    assert!(matches!(err.kind(), ParsingErrorType::InvalidRecord(msg) if msg.contains("integer 7")));

    let err = parse_str("((1, 1), 'Nucleus', Null)").unwrap_err();
    assert!(matches!(err.kind(), ParsingErrorType::InvalidRecord(msg) if msg.contains("'Null'")));
}

#[test]
fn test_trailing_content() {
    let err = parse_str("((1, 1), 'Nucleus', 'span') ((2, 2), 'Nucleus', 'span')").unwrap_err();
    assert_eq!(err.kind(), &ParsingErrorType::TrailingContent);
    assert_eq!(err.line(), 1);
}

#[test]
fn test_record_spanning_lines() {
    let err = parse_str("((1, 1),\n'Nucleus', 'span')").unwrap_err();
    assert_eq!(err.kind(), &ParsingErrorType::UnexpectedChar('\n'));
}

#[test]
fn test_unclosed_string() {
    let err = parse_str("((1, 1), 'Nucleus, 'span')\n").unwrap_err();
    assert!(matches!(
        err.kind(),
        ParsingErrorType::UnclosedString | ParsingErrorType::UnexpectedChar(_)
    ));

    let err = parse_str("((1, 1), 'Nucleus', 'span\n").unwrap_err();
    assert_eq!(err.kind(), &ParsingErrorType::UnclosedString);
}

#[test]
fn test_unbalanced_parentheses() {
    let err = parse_str("((1, 1), 'Nucleus', 'span'").unwrap_err();
    assert_eq!(err.kind(), &ParsingErrorType::UnexpectedEOF);
}

// --- TESTS BRACKET FILES ---
#[test]
fn test_parse_file_single_quotes() {
    let records = parse_file(fixture("train-0.brackets")).unwrap();
    assert_eq!(records.len(), 6);
    assert_eq!(records[5], BracketRecord::new((3, 4), Satellite, Some("elaboration")));
}

#[test]
fn test_parse_file_double_quotes() {
    let records = parse_file(fixture("train-1.brackets")).unwrap();
    assert_eq!(records.len(), 4);
    assert_eq!(records[2], BracketRecord::new((1, 2), Satellite, Some("evaluation")));
}

#[test]
fn test_parse_file_blank_lines() {
    let records = parse_file(fixture("test-0.brackets")).unwrap();
    assert_eq!(records.len(), 2);
}

#[test]
fn test_parse_missing_file() {
    let err = parse_file(fixture("missing.brackets")).unwrap_err();
    assert!(matches!(err.kind(), ParsingErrorType::IoError(_)));
}
