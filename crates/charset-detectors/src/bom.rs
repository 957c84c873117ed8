//! ByteOrderMarkDetector — UTF byte-order mark at the start of the content.

use charset_core::detector::CharsetDetector;
use charset_core::document::MainDocument;
use charset_core::finding::{CharsetFinding, CharsetSource};
use charset_core::options::AuditOptions;
use charset_utils::encoding::sniff_bom;

/// Checks byte 0 of the transfer content for a UTF-8 or UTF-16 BOM.
pub struct ByteOrderMarkDetector;

impl CharsetDetector for ByteOrderMarkDetector {
    fn name(&self) -> &str {
        "ByteOrderMarkDetector"
    }

    fn source(&self) -> CharsetSource {
        CharsetSource::ByteOrderMark
    }

    fn detect(&self, document: &MainDocument, _options: &AuditOptions) -> CharsetFinding {
        match sniff_bom(document.content.as_bytes()) {
            Some(encoding) => CharsetFinding::found(CharsetSource::ByteOrderMark, encoding.name()),
            None => CharsetFinding::absent(CharsetSource::ByteOrderMark),
        }
    }
}
