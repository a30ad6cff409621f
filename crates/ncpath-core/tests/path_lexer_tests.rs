//! Path Lexer Tests
//!
//! ## Scenarios Covered
//!
//! 1. Plain and predicate segments are classified
//! 2. Leading/trailing separators are ignored, empty path is the whole tree
//! 3. Empty interior tokens and invalid names are rejected
//! 4. Custom separators

#![allow(clippy::unwrap_used, clippy::expect_used)]

use ncpath_core::{NcError, NcErrorKind, Path, PathSegment};

#[test]
fn test_plain_and_predicate_segments() {
    let path = Path::parse("router/interface/interface-name=to_sr2").unwrap();

    assert_eq!(path.len(), 3);
    assert_eq!(path.segments()[0], PathSegment::plain("router").unwrap());
    assert_eq!(path.segments()[1], PathSegment::plain("interface").unwrap());

    let terminal = path.last().unwrap();
    assert!(terminal.is_predicate());
    assert_eq!(terminal.name(), "interface-name");
    let predicate = terminal.predicate().unwrap();
    assert_eq!(predicate.key, "interface-name");
    assert_eq!(predicate.value, "to_sr2");
}

#[test]
fn test_surrounding_separators_are_stripped() {
    let a = Path::parse("/router/interface/").unwrap();
    let b = Path::parse("router/interface").unwrap();
    assert_eq!(a, b);
    assert_eq!(a.to_string(), "router/interface");
}

#[test]
fn test_empty_path_is_whole_tree() {
    assert!(Path::parse("").unwrap().is_empty());
    assert!(Path::parse("/").unwrap().is_empty());
    assert_eq!(Path::parse("").unwrap(), Path::root());
}

#[test]
fn test_empty_interior_segment_is_malformed() {
    let err = Path::parse("router//interface").unwrap_err();
    assert_eq!(err.kind(), NcErrorKind::MalformedPath);
    match err {
        NcError::MalformedPath { path, reason } => {
            assert_eq!(path, "router//interface");
            assert!(reason.contains("position 1"));
        }
        other => panic!("unexpected error: {:?}", other),
    }
}

#[test]
fn test_predicate_with_empty_key_is_malformed() {
    let err = Path::parse("router/=to_sr2").unwrap_err();
    assert_eq!(err.code(), "ERR_MALFORMED_PATH");
}

#[test]
fn test_invalid_segment_name_is_malformed() {
    assert!(Path::parse("router/inter face").is_err());
    assert!(Path::parse("router/a=b=c").is_err());
}

#[test]
fn test_predicate_value_may_contain_any_character() {
    let path = Path::parse("port/port-id=1/1/1").unwrap();
    // The separator still splits inside a value.
    assert_eq!(path.len(), 4);

    let path = Path::parse_with_separator("port|port-id=1/1/1", '|').unwrap();
    assert_eq!(path.len(), 2);
    assert_eq!(path.last().unwrap().predicate().unwrap().value, "1/1/1");
}

#[test]
fn test_from_str_matches_parse() {
    let parsed: Path = "service/vprn".parse().unwrap();
    assert_eq!(parsed, Path::parse("service/vprn").unwrap());
}
