//! Core model for the charset audit: documents, findings, options, and the
//! engine that reduces detector findings to a single determination.

pub mod detector;
pub mod document;
pub mod engine;
pub mod error;
pub mod finding;
pub mod options;
pub mod report;

pub use document::{DocumentContent, MainDocument, ResponseHeaders, WINDOW_BYTES};
pub use finding::{CharsetDetermination, CharsetFinding, CharsetSource};
