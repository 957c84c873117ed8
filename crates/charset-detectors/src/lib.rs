//! Charset declaration detectors.

pub mod bom;
pub mod header;
pub mod meta;

use charset_core::detector::CharsetDetector;
use charset_core::engine::{CharsetEngine, EngineBuilder};
use charset_core::error::Result;

/// Return the standard detector set in reporting order.
///
/// Order:
///  1. HeaderCharsetResolver  (Content-Type `charset` parameter)
///  2. ByteOrderMarkDetector  (UTF BOM at byte 0)
///  3. MetaCharsetScanner     (complete `<meta>` declaration in the byte window)
///
/// The order only affects how reasons are listed; the determination is a
/// plain OR.
pub fn standard_detectors() -> Vec<Box<dyn CharsetDetector>> {
    vec![
        Box::new(header::HeaderCharsetResolver),
        Box::new(bom::ByteOrderMarkDetector),
        Box::new(meta::MetaCharsetScanner),
    ]
}

/// An engine running [`standard_detectors`].
pub fn standard_engine() -> Result<CharsetEngine> {
    standard_detectors()
        .into_iter()
        .fold(EngineBuilder::new(), EngineBuilder::detector)
        .build()
}
