//! Shorthand identifier parser.
//!
//! An identifier such as `div#main.card@hidden$width:10px!Hello` is a leading
//! tag name followed by segments, each introduced by a sigil:
//!
//! | sigil | segment   | repeated                  |
//! |-------|-----------|---------------------------|
//! | `#`   | id        | last one wins             |
//! | `.`   | class     | appended in order         |
//! | `@`   | attribute | `key:value` or bare flag  |
//! | `$`   | style     | `key:value` or bare flag  |
//! | `!`   | content   | takes the rest verbatim   |
//!
//! A segment ends at the next sigil character. There is no escaping, so values
//! containing `#`, `.`, `@`, `$` or `!` (hex colors, decimals, URLs) cannot be
//! written before the content segment. [`Parser::parse_strict`] reports such
//! splits instead of silently accepting them.

use std::fmt;

use serde::Serialize;

use crate::error::ParseError;
use crate::types::{AttrValue, Descriptor, DEFAULT_TAG};
use crate::validation;

/// Characters that start a segment.
pub const SIGILS: [char; 5] = ['#', '.', '@', '$', '!'];

fn is_sigil(c: char) -> bool {
    SIGILS.contains(&c)
}

/// The field a segment writes to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SegmentKind {
    Tag,
    Id,
    Class,
    Attribute,
    Style,
    Content,
}

impl SegmentKind {
    pub fn from_sigil(c: char) -> Option<Self> {
        match c {
            '#' => Some(Self::Id),
            '.' => Some(Self::Class),
            '@' => Some(Self::Attribute),
            '$' => Some(Self::Style),
            '!' => Some(Self::Content),
            _ => None,
        }
    }

    /// The introducing character; the tag has none.
    pub fn sigil(self) -> Option<char> {
        match self {
            Self::Tag => None,
            Self::Id => Some('#'),
            Self::Class => Some('.'),
            Self::Attribute => Some('@'),
            Self::Style => Some('$'),
            Self::Content => Some('!'),
        }
    }
}

impl fmt::Display for SegmentKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Tag => "tag",
            Self::Id => "id",
            Self::Class => "class",
            Self::Attribute => "attribute",
            Self::Style => "style",
            Self::Content => "content",
        };
        f.write_str(name)
    }
}

/// One scanned piece of an identifier. `offset` is the byte offset of `text`
/// (just past the sigil).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Segment<'a> {
    pub kind: SegmentKind,
    pub text: &'a str,
    pub offset: usize,
}

impl<'a> Segment<'a> {
    /// Split attribute/style text on its first colon. Text without a colon is
    /// a flag.
    pub fn entry(&self) -> (&'a str, AttrValue) {
        split_entry(self.text)
    }
}

pub(crate) fn split_entry(text: &str) -> (&str, AttrValue) {
    match text.split_once(':') {
        Some((key, value)) => (key, AttrValue::Text(value.to_string())),
        None => (text, AttrValue::Flag),
    }
}

/// Single-pass segment scanner over an identifier.
#[derive(Debug, Clone)]
pub struct Segments<'a> {
    input: &'a str,
    pos: usize,
}

impl<'a> Segments<'a> {
    pub fn new(input: &'a str) -> Self {
        Self { input, pos: 0 }
    }
}

impl<'a> Iterator for Segments<'a> {
    type Item = Segment<'a>;

    fn next(&mut self) -> Option<Segment<'a>> {
        let first = self.input[self.pos..].chars().next()?;

        // Sigils are ASCII, so skipping one byte stays on a char boundary.
        let (kind, start) = match SegmentKind::from_sigil(first) {
            Some(kind) => (kind, self.pos + 1),
            None => (SegmentKind::Tag, self.pos),
        };

        let body = &self.input[start..];
        let len = match kind {
            SegmentKind::Content => body.len(),
            _ => body.find(is_sigil).unwrap_or(body.len()),
        };
        self.pos = start + len;

        Some(Segment {
            kind,
            text: &body[..len],
            offset: start,
        })
    }
}

/// Identifier parser with a configurable default tag.
#[derive(Debug, Clone)]
pub struct Parser {
    default_tag: String,
}

impl Parser {
    pub fn new() -> Self {
        Self {
            default_tag: DEFAULT_TAG.to_string(),
        }
    }

    pub fn with_default_tag(mut self, tag: impl Into<String>) -> Self {
        self.default_tag = tag.into();
        self
    }

    pub fn default_tag(&self) -> &str {
        &self.default_tag
    }

    /// Parse leniently. Never fails: every scanned segment lands in the field
    /// its sigil selects.
    pub fn parse(&self, identifier: &str) -> Descriptor {
        let mut descriptor = Descriptor::new(self.default_tag.as_str());
        for segment in Segments::new(identifier) {
            apply_segment(&mut descriptor, &segment);
        }
        descriptor
    }

    /// Parse, rejecting shorthand that is likely to have been split by an
    /// embedded sigil. Returns the first problem found.
    pub fn parse_strict(&self, identifier: &str) -> Result<Descriptor, ParseError> {
        match validation::diagnose(identifier).into_iter().next() {
            Some(problem) => Err(problem),
            None => Ok(self.parse(identifier)),
        }
    }
}

impl Default for Parser {
    fn default() -> Self {
        Self::new()
    }
}

fn apply_segment(descriptor: &mut Descriptor, segment: &Segment<'_>) {
    match segment.kind {
        SegmentKind::Tag => descriptor.tag = segment.text.to_string(),
        SegmentKind::Id => descriptor.id = segment.text.to_string(),
        SegmentKind::Class => descriptor.classes.push(segment.text.to_string()),
        SegmentKind::Attribute => {
            let (key, value) = segment.entry();
            descriptor.attributes.insert(key.to_string(), value);
        }
        SegmentKind::Style => {
            let (key, value) = segment.entry();
            descriptor.styles.insert(key.to_string(), value);
        }
        SegmentKind::Content => descriptor.content = segment.text.to_string(),
    }
}

/// Parse with the default `div` tag.
pub fn parse_identifier(identifier: &str) -> Descriptor {
    Parser::new().parse(identifier)
}

/// Strict parse with the default `div` tag.
pub fn parse_identifier_strict(identifier: &str) -> Result<Descriptor, ParseError> {
    Parser::new().parse_strict(identifier)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plain_text_is_tag() {
        let d = parse_identifier("section");
        assert_eq!(d.tag, "section");
        assert_eq!(d, Descriptor::new("section"));
    }

    #[test]
    fn test_full_identifier() {
        let d = parse_identifier(
            "div#myId.classOne.classTwo@border:0@autofocus$width:100px$background-color:rgb(255,255,255)",
        );
        assert_eq!(d.tag, "div");
        assert_eq!(d.id, "myId");
        assert_eq!(d.classes, vec!["classOne", "classTwo"]);
        assert_eq!(d.attributes.len(), 2);
        assert_eq!(d.attributes["border"], AttrValue::Text("0".into()));
        assert_eq!(d.attributes["autofocus"], AttrValue::Flag);
        assert_eq!(
            d.styles.keys().collect::<Vec<_>>(),
            vec!["width", "background-color"]
        );
        assert_eq!(d.styles["width"], AttrValue::Text("100px".into()));
        assert_eq!(
            d.styles["background-color"],
            AttrValue::Text("rgb(255,255,255)".into())
        );
        assert!(d.content.is_empty());
    }

    #[test]
    fn test_content_is_verbatim() {
        let d = parse_identifier("span!Hello #World");
        assert_eq!(d.tag, "span");
        assert_eq!(d.content, "Hello #World");
        assert!(d.id.is_empty());
        assert!(d.classes.is_empty());
    }

    #[test]
    fn test_content_keeps_every_sigil() {
        let d = parse_identifier("p.note!a.b@c$d!e#f");
        assert_eq!(d.classes, vec!["note"]);
        assert_eq!(d.content, "a.b@c$d!e#f");
    }

    #[test]
    fn test_empty_identifier_is_default() {
        assert_eq!(parse_identifier(""), Descriptor::default());
    }

    #[test]
    fn test_leading_sigil_keeps_default_tag() {
        let d = parse_identifier(".row.wide");
        assert_eq!(d.tag, "div");
        assert_eq!(d.classes, vec!["row", "wide"]);
    }

    #[test]
    fn test_last_id_wins() {
        let d = parse_identifier("a#first#second");
        assert_eq!(d.id, "second");
    }

    #[test]
    fn test_duplicate_classes_are_kept() {
        let d = parse_identifier("i.x.x");
        assert_eq!(d.classes, vec!["x", "x"]);
    }

    #[test]
    fn test_value_keeps_later_colons() {
        let d = parse_identifier("a@href:http://example");
        assert_eq!(d.attributes["href"], AttrValue::Text("http://example".into()));
    }

    #[test]
    fn test_repeated_attribute_overwrites_in_place() {
        let d = parse_identifier("input@type:text@name:q@type:search");
        assert_eq!(d.attributes.keys().collect::<Vec<_>>(), vec!["type", "name"]);
        assert_eq!(d.attributes["type"], AttrValue::Text("search".into()));
    }

    #[test]
    fn test_style_flag() {
        let d = parse_identifier("div$hidden");
        assert_eq!(d.styles["hidden"], AttrValue::Flag);
    }

    #[test]
    fn test_hex_color_splits_into_id() {
        // Known limitation: `#` always starts an id segment.
        let d = parse_identifier("div$color:#fff");
        assert_eq!(d.styles["color"], AttrValue::Text(String::new()));
        assert_eq!(d.id, "fff");
    }

    #[test]
    fn test_consecutive_sigils_give_empty_values() {
        let d = parse_identifier("div#.@");
        assert_eq!(d.id, "");
        assert_eq!(d.classes, vec![""]);
        assert_eq!(d.attributes[""], AttrValue::Flag);
    }

    #[test]
    fn test_custom_default_tag() {
        let parser = Parser::new().with_default_tag("span");
        assert_eq!(parser.parse("#x").tag, "span");
        assert_eq!(parser.parse("p#x").tag, "p");
    }

    #[test]
    fn test_segments_offsets() {
        let segments: Vec<_> = Segments::new("ul#nav.a!hi").collect();
        let kinds: Vec<_> = segments.iter().map(|s| s.kind).collect();
        assert_eq!(
            kinds,
            vec![
                SegmentKind::Tag,
                SegmentKind::Id,
                SegmentKind::Class,
                SegmentKind::Content
            ]
        );
        assert_eq!(segments[1].text, "nav");
        assert_eq!(segments[1].offset, 3);
        assert_eq!(segments[3].text, "hi");
        assert_eq!(segments[3].offset, 9);
    }

    #[test]
    fn test_non_ascii_text() {
        let d = parse_identifier("p.café!héllo");
        assert_eq!(d.classes, vec!["café"]);
        assert_eq!(d.content, "héllo");
    }

    #[test]
    fn test_segment_kind_sigils() {
        for sigil in SIGILS {
            let kind = SegmentKind::from_sigil(sigil).unwrap();
            assert_eq!(kind.sigil(), Some(sigil));
        }
        assert_eq!(SegmentKind::Tag.sigil(), None);
        assert_eq!(SegmentKind::Style.to_string(), "style");
    }
}
