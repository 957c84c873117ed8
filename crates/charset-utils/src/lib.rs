//! Byte-level helpers shared by the charset detectors.

pub mod encoding;
pub mod html;
pub mod mime;
