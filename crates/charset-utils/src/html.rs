//! Minimal `<meta>` tag tokenizer over raw bytes.
//!
//! Only complete tags are produced: a tag needs its closing `>` inside the
//! buffer. Callers pass an already truncated buffer, so a tag cut off at the
//! end of it is never reported.

use once_cell::sync::Lazy;
use regex::bytes::Regex;

/// A `<meta ...>` tag, from `<` through `>`.
///
/// The body is a sequence of attributes. A quote opens a quoted value only
/// right after `=`; elsewhere in an unquoted value it is an ordinary byte.
static META_TAG_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(concat!(
        r#"(?i-u)<meta("#,
        r#"(?:[\s/](?:[\s/]*[^\s/>="']+"#,
        r#"(?:\s*=\s*(?:"[^"]*"|'[^']*'|[^\s>"'][^\s>]*)?)?)*)?"#,
        r#"[\s/]*)>"#
    ))
    .expect("meta tag regex is valid")
});

/// One attribute inside a tag body: name, then an optional quoted or
/// unquoted value.
static ATTRIBUTE_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r#"(?-u)([^\s"'>/=]+)(?:\s*=\s*(?:"([^"]*)"|'([^']*)'|([^\s>]+)))?"#)
        .expect("attribute regex is valid")
});

/// A complete `<meta>` tag found in a byte buffer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MetaTag {
    /// Offset of the opening `<`.
    pub start: usize,
    /// Offset one past the closing `>`.
    pub end: usize,
    /// Attributes in source order, names lowercased.
    attributes: Vec<(String, String)>,
}

impl MetaTag {
    /// Value of attribute `name` (lowercase). The first occurrence wins.
    pub fn attr(&self, name: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, v)| v.as_str())
    }
}

/// All complete `<meta>` tags in `bytes`, in document order.
pub fn meta_tags(bytes: &[u8]) -> impl Iterator<Item = MetaTag> + '_ {
    META_TAG_RE.captures_iter(bytes).filter_map(|cap| {
        let whole = cap.get(0)?;
        let body = cap.get(1).map(|m| m.as_bytes()).unwrap_or_default();
        Some(MetaTag {
            start: whole.start(),
            end: whole.end(),
            attributes: parse_attributes(body),
        })
    })
}

fn parse_attributes(body: &[u8]) -> Vec<(String, String)> {
    ATTRIBUTE_RE
        .captures_iter(body)
        .filter_map(|cap| {
            let name = String::from_utf8_lossy(cap.get(1)?.as_bytes()).to_ascii_lowercase();
            let value = cap
                .get(2)
                .or_else(|| cap.get(3))
                .or_else(|| cap.get(4))
                .map(|m| String::from_utf8_lossy(m.as_bytes()).into_owned())
                .unwrap_or_default();
            Some((name, value))
        })
        .collect()
}
