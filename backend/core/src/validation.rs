//! Strict-mode checks for shorthand identifiers.
//!
//! The lenient parser accepts anything. These checks look for the shapes that
//! usually mean a value was cut short by an embedded sigil: empty segments,
//! names that cannot be CSS identifiers, and `key:` entries with no value.

use once_cell::sync::Lazy;
use regex::Regex;

use crate::error::ParseError;
use crate::parser::{Segment, SegmentKind, Segments};
use crate::types::AttrValue;

static TAG_NAME_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[A-Za-z][A-Za-z0-9-]*$").unwrap());

static NAME_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^-?[A-Za-z_][A-Za-z0-9_-]*$").unwrap());

static ATTRIBUTE_NAME_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r#"^[^\s"'>/=\x00-\x1F\x7F]+$"#).unwrap());

/// Whether `name` is usable as an element tag.
pub fn is_valid_tag_name(name: &str) -> bool {
    TAG_NAME_PATTERN.is_match(name)
}

/// Whether `name` is usable as an id or class.
pub fn is_valid_name(name: &str) -> bool {
    NAME_PATTERN.is_match(name)
}

/// Whether `name` can be written as an HTML attribute name without breaking
/// the markup around it.
pub fn is_valid_attribute_name(name: &str) -> bool {
    ATTRIBUTE_NAME_PATTERN.is_match(name)
}

/// Every problem in `identifier`, in scan order.
pub fn diagnose(identifier: &str) -> Vec<ParseError> {
    let mut problems = Vec::new();
    let mut seen_id = false;
    for segment in Segments::new(identifier) {
        check_segment(&segment, &mut seen_id, &mut problems);
    }
    problems
}

fn check_segment(segment: &Segment<'_>, seen_id: &mut bool, problems: &mut Vec<ParseError>) {
    let offset = segment.offset;
    match segment.kind {
        SegmentKind::Content => {}
        SegmentKind::Tag => {
            if !is_valid_tag_name(segment.text) {
                problems.push(ParseError::InvalidTagName {
                    name: segment.text.to_string(),
                    offset,
                });
            }
        }
        kind if segment.text.is_empty() => {
            problems.push(ParseError::EmptySegment { kind, offset });
        }
        kind @ (SegmentKind::Id | SegmentKind::Class) => {
            if kind == SegmentKind::Id {
                if *seen_id {
                    problems.push(ParseError::DuplicateId { offset });
                }
                *seen_id = true;
            }
            if !is_valid_name(segment.text) {
                problems.push(ParseError::InvalidName {
                    kind,
                    name: segment.text.to_string(),
                    offset,
                });
            }
        }
        kind @ (SegmentKind::Attribute | SegmentKind::Style) => {
            let (key, value) = segment.entry();
            if key.is_empty() {
                problems.push(ParseError::EmptyKey { kind, offset });
            } else if kind == SegmentKind::Attribute && !is_valid_attribute_name(key) {
                problems.push(ParseError::InvalidName {
                    kind,
                    name: key.to_string(),
                    offset,
                });
            } else if matches!(&value, AttrValue::Text(text) if text.is_empty()) {
                problems.push(ParseError::EmptyValue {
                    kind,
                    key: key.to_string(),
                    offset,
                });
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::parse_identifier_strict;

    #[test]
    fn test_clean_identifier_has_no_problems() {
        assert!(diagnose("div#main.card.is-active@data-x:1@hidden$width:10px!a.b#c").is_empty());
        assert!(diagnose("").is_empty());
    }

    #[test]
    fn test_hex_color_is_reported() {
        let problems = diagnose("div$color:#fff");
        assert_eq!(
            problems,
            vec![ParseError::EmptyValue {
                kind: SegmentKind::Style,
                key: "color".into(),
                offset: 4,
            }]
        );
    }

    #[test]
    fn test_decimal_split_is_reported() {
        let problems = diagnose("div$width:1.5em");
        assert_eq!(
            problems,
            vec![ParseError::InvalidName {
                kind: SegmentKind::Class,
                name: "5em".into(),
                offset: 12,
            }]
        );
    }

    #[test]
    fn test_empty_segments() {
        let problems = diagnose("div..a");
        assert_eq!(
            problems,
            vec![ParseError::EmptySegment {
                kind: SegmentKind::Class,
                offset: 4,
            }]
        );
        assert!(matches!(
            diagnose("div#")[..],
            [ParseError::EmptySegment { kind: SegmentKind::Id, offset: 4 }]
        ));
    }

    #[test]
    fn test_attribute_names_that_break_markup() {
        assert!(is_valid_attribute_name("data-x"));
        assert!(is_valid_attribute_name("aria-label"));
        assert!(!is_valid_attribute_name(""));
        assert!(!is_valid_attribute_name("a b"));
        assert!(!is_valid_attribute_name("x\"><script"));
        assert!(!is_valid_attribute_name("a=b"));

        let problems = diagnose("p@x\"><i y");
        assert_eq!(
            problems,
            vec![ParseError::InvalidName {
                kind: SegmentKind::Attribute,
                name: "x\"><i y".into(),
                offset: 2,
            }]
        );
    }

    #[test]
    fn test_empty_content_is_fine() {
        assert!(diagnose("p!").is_empty());
    }

    #[test]
    fn test_duplicate_id() {
        let problems = diagnose("div#a#b");
        assert_eq!(problems, vec![ParseError::DuplicateId { offset: 6 }]);
    }

    #[test]
    fn test_bad_tag_name() {
        let problems = diagnose("9lives");
        assert!(matches!(problems[..], [ParseError::InvalidTagName { .. }]));
    }

    #[test]
    fn test_empty_key() {
        let problems = diagnose("a@:x");
        assert_eq!(
            problems,
            vec![ParseError::EmptyKey {
                kind: SegmentKind::Attribute,
                offset: 2,
            }]
        );
    }

    #[test]
    fn test_strict_parse_returns_first_problem() {
        let err = parse_identifier_strict("div#a#b.1x").unwrap_err();
        assert_eq!(err, ParseError::DuplicateId { offset: 6 });
        assert_eq!(err.offset(), 6);

        let d = parse_identifier_strict("li.item!One").unwrap();
        assert_eq!(d.content, "One");
    }
}
