//! HeaderCharsetResolver — `charset` parameter of the Content-Type header.

use charset_core::detector::CharsetDetector;
use charset_core::document::MainDocument;
use charset_core::finding::{CharsetFinding, CharsetSource};
use charset_core::options::AuditOptions;
use charset_utils::mime::content_type_charset;

pub const CONTENT_TYPE_HEADER: &str = "content-type";

/// Looks up the first `Content-Type` header and reads its `charset` parameter.
pub struct HeaderCharsetResolver;

impl CharsetDetector for HeaderCharsetResolver {
    fn name(&self) -> &str {
        "HeaderCharsetResolver"
    }

    fn source(&self) -> CharsetSource {
        CharsetSource::HttpHeader
    }

    fn detect(&self, document: &MainDocument, _options: &AuditOptions) -> CharsetFinding {
        document
            .headers
            .get(CONTENT_TYPE_HEADER)
            .and_then(content_type_charset)
            .map(|charset| CharsetFinding::found(CharsetSource::HttpHeader, charset))
            .unwrap_or_else(|| CharsetFinding::absent(CharsetSource::HttpHeader))
    }
}
