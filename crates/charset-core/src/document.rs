//! Main-document inputs: response headers and raw transfer content.
//!
//! Both are produced by external collaborators (the network layer and the
//! content fetcher). The audit only ever reads them.

use std::collections::HashMap;
use std::str::FromStr;

use encoding_rs::Encoding;
use serde::{Deserialize, Serialize};

use crate::error::AuditError;

/// Number of leading transfer bytes a browser inspects before committing to
/// an encoding.
pub const WINDOW_BYTES: usize = 1024;

// ---------------------------------------------------------------------------
// Response headers
// ---------------------------------------------------------------------------

/// A single HTTP response header, in the `{name, value}` shape used by
/// devtools network records.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResponseHeader {
    pub name: String,
    pub value: String,
}

impl ResponseHeader {
    pub fn new(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            value: value.into(),
        }
    }
}

/// Parses a raw `Name: value` header line.
impl FromStr for ResponseHeader {
    type Err = AuditError;

    fn from_str(line: &str) -> Result<Self, Self::Err> {
        let (name, value) = line
            .split_once(':')
            .ok_or_else(|| AuditError::Headers(format!("missing ':' in header '{}'", line)))?;
        let name = name.trim();
        if name.is_empty() {
            return Err(AuditError::Headers(format!("empty header name in '{}'", line)));
        }
        Ok(Self::new(name, value.trim()))
    }
}

/// Ordered response headers with case-insensitive name lookup.
///
/// Duplicate names are kept in order; lookups return the first occurrence.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(from = "Vec<ResponseHeader>", into = "Vec<ResponseHeader>")]
pub struct ResponseHeaders {
    headers: Vec<ResponseHeader>,
    /// Map from ASCII-lowercased name to index of its first occurrence
    name_index: HashMap<String, usize>,
}

impl ResponseHeaders {
    pub fn new() -> Self {
        Self {
            headers: Vec::new(),
            name_index: HashMap::new(),
        }
    }

    /// Append a header. Returns its index.
    pub fn push(&mut self, name: impl Into<String>, value: impl Into<String>) -> usize {
        let header = ResponseHeader::new(name, value);
        let idx = self.headers.len();
        self.name_index
            .entry(header.name.to_ascii_lowercase())
            .or_insert(idx);
        self.headers.push(header);
        idx
    }

    /// Value of the first header named `name`, compared case-insensitively.
    pub fn get(&self, name: &str) -> Option<&str> {
        self.name_index
            .get(&name.to_ascii_lowercase())
            .map(|&idx| self.headers[idx].value.as_str())
    }

    pub fn len(&self) -> usize {
        self.headers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.headers.is_empty()
    }
}

impl PartialEq for ResponseHeaders {
    fn eq(&self, other: &Self) -> bool {
        self.headers == other.headers
    }
}

impl Eq for ResponseHeaders {}

impl From<Vec<ResponseHeader>> for ResponseHeaders {
    fn from(headers: Vec<ResponseHeader>) -> Self {
        let mut out = Self::new();
        for h in headers {
            out.push(h.name, h.value);
        }
        out
    }
}

impl From<ResponseHeaders> for Vec<ResponseHeader> {
    fn from(headers: ResponseHeaders) -> Self {
        headers.headers
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for ResponseHeaders {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut out = Self::new();
        for (name, value) in iter {
            out.push(name, value);
        }
        out
    }
}

// ---------------------------------------------------------------------------
// Document content
// ---------------------------------------------------------------------------

/// The main document exactly as transferred, including any leading BOM.
///
/// Stored as bytes so that window limits are byte-exact no matter how the
/// text was decoded upstream.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DocumentContent {
    bytes: Vec<u8>,
}

impl DocumentContent {
    pub fn from_bytes(bytes: impl Into<Vec<u8>>) -> Self {
        Self {
            bytes: bytes.into(),
        }
    }

    /// Content that was transferred as UTF-8.
    pub fn from_text(text: &str) -> Self {
        Self::from_bytes(text.as_bytes())
    }

    /// Rebuild the transfer bytes of text that was decoded from `encoding`.
    ///
    /// A leading U+FEFF turns back into that encoding's BOM for the UTF
    /// encodings. Characters the encoding cannot represent come out as
    /// numeric character references, as browsers do on form submission.
    pub fn from_decoded(text: &str, encoding: &'static Encoding) -> Self {
        let bytes = if encoding == encoding_rs::UTF_16LE {
            text.encode_utf16().flat_map(u16::to_le_bytes).collect()
        } else if encoding == encoding_rs::UTF_16BE {
            text.encode_utf16().flat_map(u16::to_be_bytes).collect()
        } else {
            let (bytes, used, had_errors) = encoding.encode(text);
            if had_errors {
                log::debug!(
                    "Text not fully representable in {}; unmappable characters escaped",
                    used.name()
                );
            }
            bytes.into_owned()
        };
        Self { bytes }
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }

    /// The first `limit` bytes, or the whole content when shorter.
    pub fn window(&self, limit: usize) -> &[u8] {
        &self.bytes[..self.bytes.len().min(limit)]
    }

    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }
}

impl From<&str> for DocumentContent {
    fn from(text: &str) -> Self {
        Self::from_text(text)
    }
}

impl From<Vec<u8>> for DocumentContent {
    fn from(bytes: Vec<u8>) -> Self {
        Self::from_bytes(bytes)
    }
}

/// Everything the audit needs to know about the main document.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MainDocument {
    pub headers: ResponseHeaders,
    pub content: DocumentContent,
}

impl MainDocument {
    pub fn new(headers: ResponseHeaders, content: impl Into<DocumentContent>) -> Self {
        Self {
            headers,
            content: content.into(),
        }
    }
}
