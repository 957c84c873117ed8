//! MetaCharsetScanner — `<meta>` charset declarations in the leading byte window.
//!
//! The content is truncated to `window_bytes` transfer bytes first, and only
//! then searched. A tag counts only if everything from its `<` through its
//! `>` survived the truncation; there is no repair of cut-off tags.

use charset_core::detector::CharsetDetector;
use charset_core::document::MainDocument;
use charset_core::finding::{CharsetFinding, CharsetSource};
use charset_core::options::AuditOptions;
use charset_utils::html::{meta_tags, MetaTag};
use charset_utils::mime::meta_content_charset;

/// Finds the first complete charset-declaring `<meta>` tag in the window.
pub struct MetaCharsetScanner;

impl CharsetDetector for MetaCharsetScanner {
    fn name(&self) -> &str {
        "MetaCharsetScanner"
    }

    fn source(&self) -> CharsetSource {
        CharsetSource::MetaTag
    }

    fn detect(&self, document: &MainDocument, options: &AuditOptions) -> CharsetFinding {
        let window = document.content.window(options.window_bytes);

        for tag in meta_tags(window) {
            if let Some(charset) = declared_charset(&tag) {
                log::trace!("charset meta tag at bytes {}..{}", tag.start, tag.end);
                return CharsetFinding::found(CharsetSource::MetaTag, charset);
            }
        }

        if window.len() < document.content.len() {
            log::trace!(
                "meta scan stopped at byte {} of {}",
                window.len(),
                document.content.len()
            );
        }
        CharsetFinding::absent(CharsetSource::MetaTag)
    }
}

/// The charset a single `<meta>` tag declares, if any.
///
/// Either a non-empty `charset` attribute, or `http-equiv="Content-Type"`
/// with a `content` attribute carrying a `charset=` parameter.
pub fn declared_charset(tag: &MetaTag) -> Option<&str> {
    if let Some(charset) = tag.attr("charset").map(str::trim).filter(|c| !c.is_empty()) {
        return Some(charset);
    }

    let http_equiv = tag.attr("http-equiv")?;
    if !http_equiv.trim().eq_ignore_ascii_case("content-type") {
        return None;
    }
    meta_content_charset(tag.attr("content")?)
}
