//! Detector trait implemented by each charset declaration mechanism.

use crate::document::MainDocument;
use crate::finding::{CharsetFinding, CharsetSource};
use crate::options::AuditOptions;

/// A single, independent charset declaration check.
///
/// Detectors are pure: they only read the document and never fail. Absence
/// of a declaration is reported as a finding with `present == false`.
pub trait CharsetDetector: Send + Sync {
    /// Human-readable name of this detector.
    fn name(&self) -> &str;

    /// The declaration mechanism this detector inspects.
    fn source(&self) -> CharsetSource;

    /// Inspect the main document.
    fn detect(&self, document: &MainDocument, options: &AuditOptions) -> CharsetFinding;
}
