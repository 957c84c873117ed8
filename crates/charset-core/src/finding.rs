//! Detector findings and the combined determination.

use encoding_rs::Encoding;
use serde::Serialize;

/// Where a charset declaration was looked for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum CharsetSource {
    /// `charset` parameter of the `Content-Type` response header.
    HttpHeader,
    /// Byte-order mark at the very start of the content.
    ByteOrderMark,
    /// `<meta charset>` or `<meta http-equiv="Content-Type">` tag.
    MetaTag,
}

impl CharsetSource {
    pub fn describe(&self) -> &'static str {
        match self {
            Self::HttpHeader => "Content-Type response header",
            Self::ByteOrderMark => "byte-order mark",
            Self::MetaTag => "<meta> tag",
        }
    }
}

impl std::fmt::Display for CharsetSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Self::HttpHeader => "http-header",
            Self::ByteOrderMark => "byte-order-mark",
            Self::MetaTag => "meta-tag",
        };
        write!(f, "{}", name)
    }
}

/// Result of a single detector.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CharsetFinding {
    pub source: CharsetSource,
    pub present: bool,
    /// The declared charset label, verbatim.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub evidence: Option<String>,
    /// Canonical WHATWG name the evidence resolves to. Diagnostic only; an
    /// unknown label still counts as a declaration.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub encoding: Option<&'static str>,
}

impl CharsetFinding {
    pub fn found(source: CharsetSource, evidence: impl Into<String>) -> Self {
        let evidence = evidence.into();
        let encoding = Encoding::for_label(evidence.trim().as_bytes()).map(|e| e.name());
        Self {
            source,
            present: true,
            evidence: Some(evidence),
            encoding,
        }
    }

    pub fn absent(source: CharsetSource) -> Self {
        Self {
            source,
            present: false,
            evidence: None,
            encoding: None,
        }
    }
}

impl std::fmt::Display for CharsetFinding {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match (&self.evidence, self.present) {
            (Some(evidence), true) => write!(f, "{}: {}", self.source, evidence),
            (None, true) => write!(f, "{}: present", self.source),
            (_, false) => write!(f, "{}: none", self.source),
        }
    }
}

/// Combined outcome: defined when any detector found a declaration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CharsetDetermination {
    pub defined: bool,
    /// One finding per detector, in evaluation order.
    pub reasons: Vec<CharsetFinding>,
}

impl CharsetDetermination {
    pub fn from_findings(reasons: Vec<CharsetFinding>) -> Self {
        let defined = reasons.iter().any(|r| r.present);
        Self { defined, reasons }
    }

    /// Findings that declared a charset.
    pub fn signals(&self) -> impl Iterator<Item = &CharsetFinding> {
        self.reasons.iter().filter(|r| r.present)
    }
}
